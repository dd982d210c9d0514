pub mod assist;
pub mod controller;

pub use assist::*;
pub use controller::*;
