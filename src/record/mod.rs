//! Frame recording: numbered PNG frames on disk, encoded to MP4 by the system `ffmpeg`.

/// External encoder seam (`ffmpeg` subprocess).
pub mod encoder;
/// Start/stop/capture recorder.
pub mod recorder;
