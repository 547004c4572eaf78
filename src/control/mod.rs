//! Keyboard/mouse controls shared by the views.

/// Scan bar driven by mouse and Up/Down keys.
pub mod bar;
/// Press-then-accelerate key axis.
pub mod hold;
/// Left/Right horizontal offset control.
pub mod offset;
