use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::foundation::core::{Fps, Point};
use crate::foundation::error::{ScanlineError, ScanlineResult};

/// Keys the app reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Keyframe the row under the scan bar.
    K,
    /// Return to the analyzer.
    A,
    /// Toggle animation.
    Space,
    /// Start/stop recording.
    R,
    Escape,
}

/// Input snapshot for one tick.
///
/// `pressed`/`released` are edge events for this tick; `down` is the held set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputFrame {
    /// Seconds since the session started.
    pub time: f64,
    /// Seconds since the previous tick.
    pub frame_time: f64,
    pub mouse: Point,
    pub pressed: Vec<Key>,
    pub down: Vec<Key>,
    pub released: Vec<Key>,
    /// Left mouse button went down this tick.
    pub clicked: bool,
}

impl InputFrame {
    /// `key` went down this tick.
    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    /// `key` is held this tick.
    pub fn is_down(&self, key: Key) -> bool {
        self.down.contains(&key)
    }

    /// `key` went up this tick.
    pub fn is_released(&self, key: Key) -> bool {
        self.released.contains(&key)
    }

    /// Point of a left click this tick, if any.
    pub fn click(&self) -> Option<Point> {
        self.clicked.then_some(self.mouse)
    }
}

/// One entry of an [`InputScript`]; held for `repeat` ticks.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScriptStep {
    pub repeat: u32,
    /// Mouse position; `None` keeps the previous position.
    pub mouse: Option<Point>,
    /// Keys pressed on the first tick of this step (and held for the rest).
    pub press: Vec<Key>,
    /// Keys held for every tick of this step without a press edge.
    pub hold: Vec<Key>,
    /// Keys released on the first tick of this step.
    pub release: Vec<Key>,
    pub click: bool,
}

impl Default for ScriptStep {
    fn default() -> Self {
        Self {
            repeat: 1,
            mouse: None,
            press: Vec::new(),
            hold: Vec::new(),
            release: Vec::new(),
            click: false,
        }
    }
}

/// A scripted input session used to drive the app without a window.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputScript {
    pub steps: Vec<ScriptStep>,
}

impl InputScript {
    /// Read a JSON input script from disk.
    pub fn from_path(path: &Path) -> ScanlineResult<Self> {
        let f = File::open(path)
            .with_context(|| format!("open input script '{}'", path.display()))?;
        serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            ScanlineError::serde(format!("parse input script '{}': {e}", path.display()))
        })
    }

    /// Number of ticks the script expands to.
    pub fn total_ticks(&self) -> u64 {
        self.steps.iter().map(|s| u64::from(s.repeat)).sum()
    }

    /// Expand the script into timed frames at `fps`.
    ///
    /// Press and release edges fire on the first tick of their step only; pressed keys stay held
    /// for the remaining ticks of the step and into later steps until released.
    pub fn frames(&self, fps: Fps) -> Vec<InputFrame> {
        let dt = fps.frame_duration_secs();
        let mut out = Vec::with_capacity(self.total_ticks() as usize);
        let mut mouse = Point::default();
        let mut latched: Vec<Key> = Vec::new();

        for step in &self.steps {
            if let Some(m) = step.mouse {
                mouse = m;
            }
            latched.retain(|k| !step.release.contains(k));
            for i in 0..step.repeat {
                let first = i == 0;
                let mut down = latched.clone();
                for k in step.press.iter().chain(&step.hold) {
                    if !down.contains(k) {
                        down.push(*k);
                    }
                }
                out.push(InputFrame {
                    time: fps.frames_to_secs(out.len() as u64),
                    frame_time: dt,
                    mouse,
                    pressed: if first { step.press.clone() } else { Vec::new() },
                    down,
                    released: if first {
                        step.release.clone()
                    } else {
                        Vec::new()
                    },
                    clicked: first && step.click,
                });
            }
            for k in &step.press {
                if !latched.contains(k) {
                    latched.push(*k);
                }
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../tests/unit/input/script.rs"]
mod tests;
