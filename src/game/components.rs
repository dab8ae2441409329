//! Grid types and ECS components for the snake game.

use bevy::prelude::*;
use std::time::Duration;

use super::{ARENA_HEIGHT, ARENA_WIDTH, PlayerCommand};

/// Grid position component for entities on the arena.
///
/// `y` grows downward, so row 0 is the top of the arena.
#[derive(Component, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Check if this position collides with another position.
    pub fn collides_with(&self, other: &Position) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// The neighbouring cell one step in `direction`.
    pub fn step(&self, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn in_bounds(&self) -> bool {
        (0..ARENA_WIDTH as i32).contains(&self.x) && (0..ARENA_HEIGHT as i32).contains(&self.y)
    }
}

/// Component to track previous position for smooth interpolation.
#[derive(Component, Clone, Copy, Debug)]
pub struct PreviousPosition {
    pub pos: Position,
}

/// Direction enum for snake movement.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Unit step on the grid.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }

    /// True when the two directions lie on different axes.
    pub fn is_orthogonal_to(&self, other: &Direction) -> bool {
        self != other && *self != other.opposite()
    }

    /// Reads keyboard input and returns the direction pressed this frame, if any.
    pub fn from_input(keyboard_input: &ButtonInput<KeyCode>) -> Option<Direction> {
        if keyboard_input.just_pressed(KeyCode::ArrowLeft)
            || keyboard_input.just_pressed(KeyCode::KeyA)
        {
            Some(Direction::Left)
        } else if keyboard_input.just_pressed(KeyCode::ArrowRight)
            || keyboard_input.just_pressed(KeyCode::KeyD)
        {
            Some(Direction::Right)
        } else if keyboard_input.just_pressed(KeyCode::ArrowUp)
            || keyboard_input.just_pressed(KeyCode::KeyW)
        {
            Some(Direction::Up)
        } else if keyboard_input.just_pressed(KeyCode::ArrowDown)
            || keyboard_input.just_pressed(KeyCode::KeyS)
        {
            Some(Direction::Down)
        } else {
            None
        }
    }
}

/// What a special food does when eaten.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum SpecialKind {
    /// Extra points.
    Bonus,
    /// Lengthens the tick interval.
    Slow,
}

/// A temporary pickup with a countdown lifespan measured in ticks.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub struct SpecialFood {
    pub position: Position,
    pub kind: SpecialKind,
    pub ticks_left: u32,
}

/// Component to mark the snake's head.
#[derive(Component)]
pub struct SnakeHead {
    pub direction: Direction,
}

/// Component to mark snake head eyes (children of head).
#[derive(Component)]
pub struct SnakeEye;

/// Component to mark snake body segments.
#[derive(Component)]
pub struct SnakeSegment;

/// Component to mark the regular food entity.
#[derive(Component)]
pub struct Food;

/// Component to mark the special food entity.
#[derive(Component)]
pub struct SpecialFoodMarker {
    pub kind: SpecialKind,
}

/// Component for food pulsing animation.
#[derive(Component)]
pub struct FoodPulse {
    pub timer: Timer,
}

/// Component for entities that should flash/pulse.
#[derive(Component)]
pub struct PulseEffect {
    pub timer: Timer,
    pub start_scale: f32,
    pub end_scale: f32,
}

/// Component for animating newly grown segments.
#[derive(Component)]
pub struct GrowingSegment {
    pub timer: Timer,
}

/// Floating score annotation, removed once `expires_at` (time since startup) has passed.
#[derive(Component)]
pub struct ScorePopupText {
    pub created_at: Duration,
    pub expires_at: Duration,
    pub origin: Vec2,
}

/// HUD value labels.
#[derive(Component, Clone, Copy, PartialEq, Eq, Debug)]
pub enum HudText {
    Score,
    Level,
    Record,
}

/// Clickable control; pressing it sends the wrapped command.
#[derive(Component, Clone, Copy, Debug)]
pub struct ControlButton(pub PlayerCommand);

/// Text of the pause/resume button.
#[derive(Component)]
pub struct PauseButtonLabel;

/// Text of the difficulty button in the settings panel.
#[derive(Component)]
pub struct DifficultyLabel;

/// Text of the sound toggle in the settings panel.
#[derive(Component)]
pub struct SoundLabel;

/// Component to mark the settings panel.
#[derive(Component)]
pub struct SettingsPanelUI;

/// Component to mark the game over overlay UI.
#[derive(Component)]
pub struct GameOverUI;

/// Component to mark the start menu UI.
#[derive(Component)]
pub struct MenuUI;

/// Component to mark the pause overlay UI.
#[derive(Component)]
pub struct PauseUI;
