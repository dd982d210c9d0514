pub mod config;
pub mod r#match;
pub mod utils;

pub use config::*;
pub use r#match::*;
pub use utils::*;

pub use nalgebra::Vector2;
