pub mod settings;

pub use settings::{ScalingPreset, Settings};
