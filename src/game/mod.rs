//! Core game module: the session state machine, the tick engine, food placement,
//! and the shared components, resources, events, and constants.

use bevy::prelude::SystemSet;

mod components;
mod constants;
mod difficulty;
mod engine;
mod events;
mod placement;
mod resources;
mod session;

pub use components::*;
pub use constants::*;
pub use difficulty::*;
pub use engine::*;
pub use events::*;
pub use placement::*;
pub use resources::*;
pub use session::*;

/// Per-frame ordering of work across plugins.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameSet {
    /// Keyboard and buttons turn into `PlayerCommand`s.
    Input,
    /// Commands and ticks mutate the session.
    Simulation,
    /// Entities, UI and sound follow the session.
    Presentation,
}
