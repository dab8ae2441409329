//! Game resources (singleton state) that live outside the session itself.

use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;

/// Drives session ticks at the session's current interval.
#[derive(Resource)]
pub struct TickTimer {
    pub timer: Timer,
}

impl TickTimer {
    pub fn new(interval: Duration) -> Self {
        TickTimer {
            timer: Timer::new(interval, TimerMode::Repeating),
        }
    }

    /// Restarts the timer when the interval changed. Returns whether it did.
    pub fn sync_interval(&mut self, interval: Duration) -> bool {
        if self.timer.duration() == interval {
            return false;
        }
        self.timer = Timer::new(interval, TimerMode::Repeating);
        true
    }
}

/// Resource to track time since last move for interpolation.
#[derive(Resource)]
pub struct MoveTimer {
    pub elapsed: Duration,
}

impl Default for MoveTimer {
    fn default() -> Self {
        MoveTimer {
            elapsed: Duration::ZERO,
        }
    }
}

/// Random source for food placement.
#[derive(Resource)]
pub struct GameRng(pub StdRng);

impl GameRng {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => GameRng(StdRng::seed_from_u64(seed)),
            None => GameRng(StdRng::from_rng(&mut rand::rng())),
        }
    }
}

/// Entities rendering the snake, head first, parallel to the session's snake.
#[derive(Resource, Default)]
pub struct SnakeBody {
    pub segments: Vec<Entity>,
}

/// Whether sound cues play.
#[derive(Resource)]
pub struct SoundSettings {
    pub enabled: bool,
}

/// Whether the settings panel is open.
#[derive(Resource, Default)]
pub struct SettingsPanel {
    pub visible: bool,
}

/// Resource for camera shake effect.
#[derive(Resource)]
pub struct CameraShake {
    pub timer: Timer,
    pub intensity: f32,
}

impl Default for CameraShake {
    fn default() -> Self {
        CameraShake {
            timer: Timer::from_seconds(0.0, TimerMode::Once),
            intensity: 0.0,
        }
    }
}
