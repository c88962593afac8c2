pub mod collision;
pub mod config;
pub mod drag;
pub mod engine;
pub mod input;
pub mod movement;
pub mod selection;

pub use collision::collides;
pub use config::{InteractionConfig, SelectionConfig};
pub use drag::DragController;
pub use engine::InteractionEngine;
pub use input::InputEvent;
pub use selection::{SelectionEngine, link_closure};
