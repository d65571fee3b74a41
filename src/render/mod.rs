pub mod color;
pub mod export;

pub use color::{display_positions, diverging_color};
