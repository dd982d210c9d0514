pub mod ball;
pub mod decision;
pub mod engine;
pub mod events;
pub mod field;
pub mod player;
pub mod state;
pub mod tactics;

pub use ball::*;
pub use decision::*;
pub use engine::*;
pub use events::*;
pub use field::*;
pub use player::*;
pub use state::*;
pub use tactics::*;
