pub mod draw;
pub mod events;
pub mod resources;

pub use events::{EventContext, EventHandler};
