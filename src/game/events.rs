//! Game events (messages).

use bevy::prelude::*;

use super::{Direction, Position, ScorePopup, SpecialKind};

/// Player intent, produced by the keyboard and by on-screen buttons.
#[derive(Message, Clone, Copy, PartialEq, Eq, Debug)]
pub enum PlayerCommand {
    Steer(Direction),
    Start,
    TogglePause,
    Reset,
    ToggleSettings,
    CycleDifficulty,
    ToggleSound,
}

/// Message triggered when food is eaten (for visual effects and sound).
#[derive(Message)]
pub struct FoodEatenEvent {
    pub position: Position,
    pub special: Option<SpecialKind>,
}

/// Message triggered when a collision ends the game.
#[derive(Message)]
pub struct GameOverEvent {
    pub score: u32,
    pub new_record: bool,
}

/// Message carrying a floating score annotation to show.
#[derive(Message)]
pub struct PopupEvent {
    pub popup: ScorePopup,
}

/// Message triggered when the score reaches a new level.
#[derive(Message)]
pub struct LevelUpEvent {
    pub level: u32,
    pub interval_ms: u64,
}
