//! Scanline recreation: replay one captured row into a striped, optionally animated image.

/// Recreation parameters.
pub mod params;
/// The recreator and its regeneration pass.
pub mod recreator;
