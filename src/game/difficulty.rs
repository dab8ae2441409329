//! Difficulty presets: base tick interval and score multiplier.

use clap::ValueEnum;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Extreme,
}

impl Difficulty {
    /// Tick interval a fresh session starts with, in milliseconds.
    pub fn base_interval_ms(self) -> u64 {
        match self {
            Difficulty::Easy => 200,
            Difficulty::Medium => 150,
            Difficulty::Hard => 100,
            Difficulty::Extreme => 50,
        }
    }

    /// Score multiplier in tenths (15 means x1.5).
    pub fn multiplier_tenths(self) -> u32 {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Medium => 15,
            Difficulty::Hard => 20,
            Difficulty::Extreme => 30,
        }
    }

    /// `base` scaled by the multiplier.
    pub fn points(self, base: u32) -> u32 {
        base * self.multiplier_tenths() / 10
    }

    /// The preset after this one, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Extreme,
            Difficulty::Extreme => Difficulty::Easy,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Extreme => "Extreme",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_are_exact_for_every_preset() {
        assert_eq!(Difficulty::Easy.points(10), 10);
        assert_eq!(Difficulty::Medium.points(10), 15);
        assert_eq!(Difficulty::Hard.points(10), 20);
        assert_eq!(Difficulty::Extreme.points(10), 30);

        assert_eq!(Difficulty::Medium.points(50), 75);
        assert_eq!(Difficulty::Extreme.points(50), 150);
    }

    #[test]
    fn test_next_cycles_through_all_presets() {
        let mut difficulty = Difficulty::Easy;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(difficulty);
            difficulty = difficulty.next();
        }
        assert_eq!(difficulty, Difficulty::Easy);
        assert_eq!(
            seen,
            vec![
                Difficulty::Easy,
                Difficulty::Medium,
                Difficulty::Hard,
                Difficulty::Extreme
            ]
        );
    }

    #[test]
    fn test_default_is_medium() {
        assert_eq!(Difficulty::default(), Difficulty::Medium);
        assert_eq!(Difficulty::default().base_interval_ms(), 150);
    }
}
