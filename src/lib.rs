//! Scanline recreation: keyframe one row of an image and regenerate a striped, optionally
//! animated image from it.
//!
//! - Load a [`SourceImage`], crop its dark border and inspect its channels
//! - Capture a row into a [`ScanlineRecreator`] and regenerate
//! - Drive the interactive [`App`] headlessly from [`InputFrame`]s, or record a
//!   [`RecreationSession`] to MP4 through `ffmpeg`
#![forbid(unsafe_code)]

mod foundation;

/// Interactive session state and tick loop.
pub mod app;
/// Session configuration.
pub mod config;
/// Keyboard-driven controls (hold acceleration, scan bar, offset).
pub mod control;
/// Per-tick input and scripted input sessions.
pub mod input;
/// Fixed analyzer layout.
pub mod layout;
/// Frame recording and video encoding.
pub mod record;
/// The scanline recreation algorithm.
pub mod recreate;
/// CPU draw surface, vector scenes, label text, textures and presentation.
pub mod render;
/// Headless keyframe-and-render pipeline.
pub mod session;
/// Source image decoding, channels and row profiles.
pub mod source;
/// Analyzer and recreation views.
pub mod view;

pub use crate::foundation::core::{Fps, Point, Rect, rect_at};
pub use crate::foundation::error::{ScanlineError, ScanlineResult};
pub use crate::foundation::math::wrap_index;

pub use crate::app::{App, AppState};
pub use crate::config::{RecorderConfig, SessionConfig};
pub use crate::input::{InputFrame, InputScript, Key};
pub use crate::layout::Layout;
pub use crate::record::encoder::{EncodeJob, FfmpegEncoder, VideoEncoder, is_ffmpeg_on_path};
pub use crate::record::recorder::{CaptureStatus, FrameRecorder, RecordOutcome};
pub use crate::recreate::params::RecreationParameters;
pub use crate::recreate::recreator::ScanlineRecreator;
pub use crate::render::present::{LastFramePresenter, Presenter};
pub use crate::render::scene::{DrawOp, Scene};
pub use crate::render::surface::Surface;
pub use crate::render::text::LabelFont;
pub use crate::session::{RecordStats, RecreationSession};
pub use crate::source::channel::{Channel, Component};
pub use crate::source::decode::SourceImage;
pub use crate::source::profile::ChannelProfile;
pub use crate::view::{View, ViewKind};
