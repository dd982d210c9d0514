pub mod math;
pub mod time;

pub use math::*;
pub use time::*;
