//! Views as a tagged union: each variant owns its state and is driven through one
//! `update`/`draw` pair.

use crate::app::AppState;
use crate::foundation::error::ScanlineResult;
use crate::input::InputFrame;
use crate::render::surface::Surface;

/// Scan-bar analyzer over the source channels.
pub mod analyzer;
/// Full-screen recreation view.
pub mod recreate;

pub use analyzer::AnalyzerView;
pub use recreate::RecreateView;

/// Per-view behaviour.
pub trait Screen {
    /// Advance one tick. Returns the view to switch to, if any.
    fn update(
        &mut self,
        state: &mut AppState,
        input: &InputFrame,
    ) -> ScanlineResult<Option<View>>;
    /// Render the current frame into `surface`.
    fn draw(&self, state: &AppState, surface: &mut Surface) -> ScanlineResult<()>;
}

/// The active view.
#[derive(Clone, Debug)]
pub enum View {
    Analyzer(AnalyzerView),
    Recreate(RecreateView),
}

/// Discriminant of [`View`], for logging and assertions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    Analyzer,
    Recreate,
}

impl View {
    /// Which variant is active.
    pub fn kind(&self) -> ViewKind {
        match self {
            Self::Analyzer(_) => ViewKind::Analyzer,
            Self::Recreate(_) => ViewKind::Recreate,
        }
    }

    fn screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            Self::Analyzer(v) => v,
            Self::Recreate(v) => v,
        }
    }

    fn screen(&self) -> &dyn Screen {
        match self {
            Self::Analyzer(v) => v,
            Self::Recreate(v) => v,
        }
    }

    /// Advance the active view one tick.
    pub fn update(
        &mut self,
        state: &mut AppState,
        input: &InputFrame,
    ) -> ScanlineResult<Option<View>> {
        self.screen_mut().update(state, input)
    }

    /// Draw the active view.
    pub fn draw(&self, state: &AppState, surface: &mut Surface) -> ScanlineResult<()> {
        self.screen().draw(state, surface)
    }
}
