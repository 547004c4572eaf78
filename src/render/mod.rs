//! Headless drawing: an RGBA surface, vector scenes rasterized with vello_cpu, label text
//! shaped with parley, presentable textures and the presenter seam.

mod cpu;

/// Presenter trait and built-in presenters.
pub mod present;
/// Vector draw ops collected per frame.
pub mod scene;
/// CPU draw target.
pub mod surface;
/// Label font and text layout.
pub mod text;
/// Revision-tracked image uploads.
pub mod texture;
