pub mod area;
pub mod cache;
pub mod error;

pub use area::*;
pub use cache::*;
pub use error::*;
