//! Source image collaborator: decoding, border crop, channel split and row capture.

/// Channel selectors.
pub mod channel;
/// Decoded, cropped source image and its channel split.
pub mod decode;
/// Per-row channel plots.
pub mod profile;
