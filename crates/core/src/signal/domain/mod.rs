pub mod color;
pub mod control_colors;
