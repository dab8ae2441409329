//! Command line configuration.

use bevy::prelude::*;
use clap::Parser;
use std::path::PathBuf;

use crate::game::Difficulty;
use crate::storage::{JsonScoreStore, MemoryScoreStore, ScoreStore};

const DEFAULT_SAVE_FILE: &str = "snake_save.json";

#[derive(Parser, Debug)]
#[command(name = "snake_pro", version, about = "Snake with levels, bonus food and a saved record")]
pub struct Cli {
    /// Starting difficulty preset.
    #[arg(long, value_enum, default_value_t = Difficulty::Medium)]
    pub difficulty: Difficulty,

    /// File holding the best score.
    #[arg(long, default_value = DEFAULT_SAVE_FILE)]
    pub save_file: PathBuf,

    /// Keep the best score in memory only.
    #[arg(long)]
    pub no_save: bool,

    /// Start with sound cues disabled.
    #[arg(long)]
    pub mute: bool,

    /// Seed for food placement, for reproducible games.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    pub save_file: Option<PathBuf>,
    pub sound_enabled: bool,
    pub seed: Option<u64>,
}

impl From<Cli> for GameConfig {
    fn from(cli: Cli) -> Self {
        GameConfig {
            difficulty: cli.difficulty,
            save_file: (!cli.no_save).then_some(cli.save_file),
            sound_enabled: !cli.mute,
            seed: cli.seed,
        }
    }
}

impl GameConfig {
    pub fn score_store(&self) -> Box<dyn ScoreStore> {
        match &self.save_file {
            Some(path) => Box::new(JsonScoreStore::new(path.clone())),
            None => Box::new(MemoryScoreStore::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::from(Cli::try_parse_from(["snake_pro"]).unwrap());

        assert_eq!(config.difficulty, Difficulty::Medium);
        assert_eq!(config.save_file, Some(PathBuf::from(DEFAULT_SAVE_FILE)));
        assert!(config.sound_enabled);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "snake_pro",
            "--difficulty",
            "extreme",
            "--no-save",
            "--mute",
            "--seed",
            "42",
        ])
        .unwrap();
        let config = GameConfig::from(cli);

        assert_eq!(config.difficulty, Difficulty::Extreme);
        assert_eq!(config.save_file, None);
        assert!(!config.sound_enabled);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.score_store().load(), 0);
    }

    #[test]
    fn test_unknown_difficulty_is_rejected() {
        assert!(Cli::try_parse_from(["snake_pro", "--difficulty", "nightmare"]).is_err());
    }
}
