//! Session state and its state machine.
//!
//! `Session` owns everything one game needs. Bevy systems only ever touch it
//! through the transition methods below and [`Session::tick`].

use bevy::prelude::*;
use rand::Rng;
use std::collections::VecDeque;
use std::time::Duration;

use super::engine::{self, TickEvent};
use super::{
    Difficulty, Direction, INITIAL_FOOD_POSITION, INITIAL_SNAKE_POSITION, Position, SpecialFood,
};

/// Game phase enum to track which state the game is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Playing,
    Paused,
    GameOver,
}

/// What the direction latch did with a proposed direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steer {
    /// The session was idle; the input started it without turning.
    Started,
    Turned,
    /// Same axis as the current direction (a reversal or a no-op).
    Rejected,
    /// The session is paused or over.
    Ignored,
}

/// Main game state resource.
#[derive(Resource, Debug, Clone)]
pub struct Session {
    /// Head first, never empty.
    pub snake: VecDeque<Position>,
    /// Latched direction; the next tick moves this way.
    pub direction: Direction,
    /// Direction the last tick actually moved.
    pub heading: Direction,
    pub food: Position,
    pub special_food: Option<SpecialFood>,
    pub score: u32,
    pub level: u32,
    pub interval_ms: u64,
    pub move_count: u64,
    pub phase: Phase,
    pub difficulty: Difficulty,
    pub high_score: u32,
}

impl Session {
    pub fn new(difficulty: Difficulty, high_score: u32) -> Self {
        Session {
            snake: VecDeque::from([INITIAL_SNAKE_POSITION]),
            direction: Direction::Right,
            heading: Direction::Right,
            food: INITIAL_FOOD_POSITION,
            special_food: None,
            score: 0,
            level: 1,
            interval_ms: difficulty.base_interval_ms(),
            move_count: 0,
            phase: Phase::Idle,
            difficulty,
            high_score,
        }
    }

    pub fn head(&self) -> Position {
        self.snake[0]
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// True while a game is running, paused or not.
    pub fn is_playing(&self) -> bool {
        matches!(self.phase, Phase::Playing | Phase::Paused)
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Idle -> Playing. Returns whether the session started.
    pub fn start(&mut self) -> bool {
        if self.phase == Phase::Idle {
            self.phase = Phase::Playing;
            true
        } else {
            false
        }
    }

    /// Playing <-> Paused; any other phase is left alone.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            Phase::Playing => Phase::Paused,
            Phase::Paused => Phase::Playing,
            other => other,
        };
    }

    /// Back to a fresh idle session. Difficulty and high score carry over.
    pub fn reset(&mut self) {
        *self = Session::new(self.difficulty, self.high_score);
    }

    /// Direction input latch.
    ///
    /// A turn must be orthogonal to the latched direction and must not point
    /// back along the last move, so two quick turns between ticks cannot fold
    /// the head into the neck.
    pub fn steer(&mut self, direction: Direction) -> Steer {
        match self.phase {
            Phase::Idle => {
                self.phase = Phase::Playing;
                Steer::Started
            }
            Phase::Playing
                if direction.is_orthogonal_to(&self.direction)
                    && direction != self.heading.opposite() =>
            {
                self.direction = direction;
                Steer::Turned
            }
            Phase::Playing => Steer::Rejected,
            Phase::Paused | Phase::GameOver => Steer::Ignored,
        }
    }

    /// Switches preset while no game is running. An idle session also picks
    /// up the new base interval.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if self.is_playing() {
            return false;
        }
        self.difficulty = difficulty;
        if self.phase == Phase::Idle {
            self.interval_ms = difficulty.base_interval_ms();
        }
        true
    }

    /// Advances one tick. Does nothing unless the session is playing and not paused.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> Vec<TickEvent> {
        engine::advance(self, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_new_session_is_idle_at_start_cell() {
        let session = Session::new(Difficulty::Hard, 340);

        assert_eq!(session.phase, Phase::Idle);
        assert_eq!(session.snake, VecDeque::from([Position::new(10, 10)]));
        assert_eq!(session.food, Position::new(15, 15));
        assert_eq!(session.direction, Direction::Right);
        assert_eq!(session.special_food, None);
        assert_eq!(session.score, 0);
        assert_eq!(session.level, 1);
        assert_eq!(session.interval_ms, 100);
        assert_eq!(session.high_score, 340);
        assert!(!session.is_playing());
    }

    #[test]
    fn test_first_steer_starts_without_turning() {
        let mut session = Session::new(Difficulty::Medium, 0);

        assert_eq!(session.steer(Direction::Up), Steer::Started);
        assert_eq!(session.phase, Phase::Playing);
        assert_eq!(session.direction, Direction::Right);
    }

    #[test]
    fn test_steer_accepts_only_orthogonal_turns() {
        let mut session = Session::new(Difficulty::Medium, 0);
        session.start();

        assert_eq!(session.steer(Direction::Left), Steer::Rejected);
        assert_eq!(session.steer(Direction::Right), Steer::Rejected);
        assert_eq!(session.direction, Direction::Right);

        assert_eq!(session.steer(Direction::Down), Steer::Turned);
        assert_eq!(session.direction, Direction::Down);
        assert_eq!(session.steer(Direction::Up), Steer::Rejected);
        assert_eq!(session.direction, Direction::Down);
    }

    #[test]
    fn test_two_turns_between_ticks_cannot_reverse() {
        let mut session = Session::new(Difficulty::Medium, 0);
        session.start();

        assert_eq!(session.steer(Direction::Up), Steer::Turned);
        assert_eq!(session.steer(Direction::Left), Steer::Rejected);
        assert_eq!(session.direction, Direction::Up);

        let mut rng = rand::rngs::StdRng::seed_from_u64(3);
        session.tick(&mut rng);
        assert_eq!(session.heading, Direction::Up);
        assert_eq!(session.head(), Position::new(10, 9));
        assert_eq!(session.steer(Direction::Left), Steer::Turned);
    }

    #[test]
    fn test_steer_is_ignored_when_paused_or_over() {
        let mut session = Session::new(Difficulty::Medium, 0);
        session.start();
        session.toggle_pause();
        assert_eq!(session.steer(Direction::Up), Steer::Ignored);
        assert_eq!(session.direction, Direction::Right);

        session.phase = Phase::GameOver;
        assert_eq!(session.steer(Direction::Up), Steer::Ignored);
        assert_eq!(session.phase, Phase::GameOver);
    }

    #[test]
    fn test_pause_toggles_only_while_playing() {
        let mut session = Session::new(Difficulty::Medium, 0);
        session.toggle_pause();
        assert_eq!(session.phase, Phase::Idle);

        session.start();
        session.toggle_pause();
        assert!(session.is_paused());
        assert!(session.is_playing());
        session.toggle_pause();
        assert_eq!(session.phase, Phase::Playing);

        session.phase = Phase::GameOver;
        session.toggle_pause();
        assert_eq!(session.phase, Phase::GameOver);
    }

    #[test]
    fn test_start_only_from_idle() {
        let mut session = Session::new(Difficulty::Medium, 0);
        assert!(session.start());
        assert!(!session.start());

        session.phase = Phase::GameOver;
        assert!(!session.start());
        assert!(session.is_game_over());
    }

    #[test]
    fn test_reset_keeps_difficulty_and_high_score() {
        let mut session = Session::new(Difficulty::Extreme, 120);
        session.start();
        session.snake.push_front(Position::new(11, 10));
        session.score = 300;
        session.level = 4;
        session.interval_ms = 30;
        session.move_count = 57;
        session.high_score = 300;
        session.phase = Phase::GameOver;

        session.reset();

        assert_eq!(session.phase, Phase::Idle);
        assert_eq!(session.snake.len(), 1);
        assert_eq!(session.score, 0);
        assert_eq!(session.level, 1);
        assert_eq!(session.move_count, 0);
        assert_eq!(session.interval_ms, Difficulty::Extreme.base_interval_ms());
        assert_eq!(session.difficulty, Difficulty::Extreme);
        assert_eq!(session.high_score, 300);
    }

    #[test]
    fn test_difficulty_is_locked_while_playing() {
        let mut session = Session::new(Difficulty::Medium, 0);
        assert!(session.set_difficulty(Difficulty::Easy));
        assert_eq!(session.interval_ms, 200);

        session.start();
        assert!(!session.set_difficulty(Difficulty::Hard));
        session.toggle_pause();
        assert!(!session.set_difficulty(Difficulty::Hard));
        assert_eq!(session.difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_difficulty_change_after_game_over_applies_on_reset() {
        let mut session = Session::new(Difficulty::Medium, 0);
        session.phase = Phase::GameOver;
        session.interval_ms = 90;

        assert!(session.set_difficulty(Difficulty::Hard));
        assert_eq!(session.interval_ms, 90);

        session.reset();
        assert_eq!(session.interval_ms, 100);
    }
}
