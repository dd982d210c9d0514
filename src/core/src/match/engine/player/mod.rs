pub mod intent;
pub mod player;
pub mod state;

pub use intent::*;
pub use player::*;
pub use state::*;
