use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::RgbaImage;

use crate::config::RecorderConfig;
use crate::foundation::error::{ScanlineError, ScanlineResult};
use crate::record::encoder::{EncodeJob, FfmpegEncoder, VideoEncoder, frame_file_name};

/// How a recording ended.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordOutcome {
    /// Stopped before any frame was captured; nothing was encoded.
    Empty,
    /// Frames were encoded and the temporary frame files cleaned up (unless kept).
    Encoded { frames: u32, out_path: PathBuf },
    /// The encoder failed; frames were left on disk for a manual run of `manual_command`.
    EncodeFailed {
        frames: u32,
        frames_dir: PathBuf,
        manual_command: String,
        error: String,
    },
}

/// Result of [`FrameRecorder::capture_frame`].
#[derive(Clone, Debug, PartialEq)]
pub enum CaptureStatus {
    Captured { frames: u32 },
    /// The frame limit was reached and recording stopped by itself.
    Finished(RecordOutcome),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Idle,
    Recording { frames: u32, size: Option<(u32, u32)> },
}

/// Captures rendered frames as numbered PNG files and encodes them on stop.
pub struct FrameRecorder {
    cfg: RecorderConfig,
    encoder: Box<dyn VideoEncoder>,
    state: State,
}

impl std::fmt::Debug for FrameRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameRecorder")
            .field("cfg", &self.cfg)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl FrameRecorder {
    /// Recorder backed by the system `ffmpeg`.
    pub fn new(cfg: RecorderConfig) -> ScanlineResult<Self> {
        Self::with_encoder(cfg, Box::new(FfmpegEncoder::new()))
    }

    /// Recorder that hands finished recordings to `encoder` instead of `ffmpeg`.
    pub fn with_encoder(
        cfg: RecorderConfig,
        encoder: Box<dyn VideoEncoder>,
    ) -> ScanlineResult<Self> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            encoder,
            state: State::Idle,
        })
    }

    /// Settings this recorder was built with.
    pub fn config(&self) -> &RecorderConfig {
        &self.cfg
    }

    /// Whether frames are currently being captured.
    pub fn is_recording(&self) -> bool {
        matches!(self.state, State::Recording { .. })
    }

    /// Frames captured by the active recording; zero when idle.
    pub fn frame_count(&self) -> u32 {
        match self.state {
            State::Recording { frames, .. } => frames,
            State::Idle => 0,
        }
    }

    /// Begin a new recording into the configured frames directory.
    ///
    /// Stale frame files from an earlier run are removed first.
    #[tracing::instrument(skip(self), fields(dir = %self.cfg.frames_dir.display()))]
    pub fn start(&mut self) -> ScanlineResult<()> {
        if self.is_recording() {
            return Err(ScanlineError::record("recording already in progress"));
        }
        let dir = &self.cfg.frames_dir;
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create frames directory '{}'", dir.display()))?;
        remove_frame_files(dir)?;
        self.state = State::Recording {
            frames: 0,
            size: None,
        };
        tracing::info!(max_frames = self.cfg.max_frames, "recording started");
        Ok(())
    }

    /// Snapshot `frame` and write it as the next numbered PNG.
    ///
    /// A failed snapshot allocation, a size change or a write failure aborts the recording.
    pub fn capture_frame(&mut self, frame: &RgbaImage) -> ScanlineResult<CaptureStatus> {
        let State::Recording { frames, size } = self.state else {
            return Err(ScanlineError::record("capture_frame called while not recording"));
        };
        let dims = frame.dimensions();
        if let Some(expected) = size
            && expected != dims
        {
            return Err(self.abort(format!(
                "frame size changed from {}x{} to {}x{}",
                expected.0, expected.1, dims.0, dims.1
            )));
        }

        let raw = frame.as_raw();
        let mut snapshot: Vec<u8> = Vec::new();
        if let Err(e) = snapshot.try_reserve_exact(raw.len()) {
            return Err(self.abort(format!("failed to allocate frame snapshot: {e}")));
        }
        snapshot.extend_from_slice(raw);

        let path = self.cfg.frames_dir.join(frame_file_name(frames));
        if let Err(e) = image::save_buffer_with_format(
            &path,
            &snapshot,
            dims.0,
            dims.1,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        ) {
            return Err(self.abort(format!("write frame '{}': {e}", path.display())));
        }

        let frames = frames + 1;
        self.state = State::Recording {
            frames,
            size: Some(dims),
        };
        if frames >= self.cfg.max_frames {
            tracing::info!(frames, "frame limit reached; stopping recording");
            return Ok(CaptureStatus::Finished(self.stop()?));
        }
        Ok(CaptureStatus::Captured { frames })
    }

    /// Finish the recording and encode the captured frames.
    #[tracing::instrument(skip(self))]
    pub fn stop(&mut self) -> ScanlineResult<RecordOutcome> {
        let State::Recording { frames, .. } = self.state else {
            return Err(ScanlineError::record("stop called while not recording"));
        };
        self.state = State::Idle;
        if frames == 0 {
            tracing::info!("recording stopped without frames");
            return Ok(RecordOutcome::Empty);
        }

        let job = EncodeJob {
            frames_dir: self.cfg.frames_dir.clone(),
            fps: self.cfg.fps,
            crf: self.cfg.crf,
            out_path: self.cfg.out_path.clone(),
            overwrite: true,
        };
        match self.encoder.encode(&job) {
            Ok(()) => {
                if !self.cfg.keep_frames {
                    remove_frame_files(&job.frames_dir)?;
                    // Only succeeds when the directory held nothing but our frames.
                    let _ = std::fs::remove_dir(&job.frames_dir);
                }
                tracing::info!(frames, out = %job.out_path.display(), "recording encoded");
                Ok(RecordOutcome::Encoded {
                    frames,
                    out_path: job.out_path,
                })
            }
            Err(e) => {
                let manual_command = job.manual_command();
                tracing::warn!(
                    error = %e,
                    %manual_command,
                    "encoding failed; frames kept on disk"
                );
                Ok(RecordOutcome::EncodeFailed {
                    frames,
                    frames_dir: job.frames_dir,
                    manual_command,
                    error: e.to_string(),
                })
            }
        }
    }

    fn abort(&mut self, msg: String) -> ScanlineError {
        self.state = State::Idle;
        tracing::warn!(reason = %msg, "recording aborted");
        ScanlineError::record(msg)
    }
}

fn remove_frame_files(dir: &Path) -> ScanlineResult<()> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("list frames in '{}'", dir.display()))?;
    for entry in entries {
        let path = entry.context("read frames directory entry")?.path();
        let is_frame = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("frame_") && n.ends_with(".png"));
        if is_frame {
            std::fs::remove_file(&path)
                .with_context(|| format!("remove frame '{}'", path.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/record/recorder.rs"]
mod tests;
