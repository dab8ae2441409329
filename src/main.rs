use bevy::{prelude::*, window::WindowResolution};
use bevy_vector_shapes::prelude::*;
use clap::Parser;

mod audio;
mod config;
mod food;
mod game;
mod rendering;
mod snake;
mod storage;
mod ui;

use audio::AudioCuePlugin;
use config::{Cli, GameConfig};
use food::FoodPlugin;
use game::{
    BACKGROUND_COLOR, CameraShake, FoodEatenEvent, GameOverEvent, GameRng, GameSet, LevelUpEvent,
    MoveTimer, PlayerCommand, PopupEvent, Session, SettingsPanel, SnakeBody, SoundSettings, TickTimer,
    WINDOW_HEIGHT, WINDOW_WIDTH,
};
use rendering::RenderingPlugin;
use snake::SnakePlugin;
use storage::BestScoreStore;
use ui::UiPlugin;

fn main() {
    let config = GameConfig::from(Cli::parse());
    let store = config.score_store();
    let session = Session::new(config.difficulty, store.load());

    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    resolution: WindowResolution::new(WINDOW_WIDTH, WINDOW_HEIGHT),
                    title: "Snake".to_string(),
                    ..Default::default()
                }),
                ..default()
            }),
            Shape2dPlugin::default(),
        ))
        .insert_resource(ClearColor(BACKGROUND_COLOR))
        .insert_resource(TickTimer::new(session.interval()))
        .insert_resource(GameRng::new(config.seed))
        .insert_resource(SoundSettings {
            enabled: config.sound_enabled,
        })
        .insert_resource(BestScoreStore(store))
        .insert_resource(session)
        .insert_resource(config)
        .init_resource::<MoveTimer>()
        .init_resource::<CameraShake>()
        .init_resource::<SettingsPanel>()
        .init_resource::<SnakeBody>()
        .add_message::<PlayerCommand>()
        .add_message::<FoodEatenEvent>()
        .add_message::<GameOverEvent>()
        .add_message::<PopupEvent>()
        .add_message::<LevelUpEvent>()
        .configure_sets(
            Update,
            (GameSet::Input, GameSet::Simulation, GameSet::Presentation).chain(),
        )
        .add_plugins((
            SnakePlugin,
            FoodPlugin,
            UiPlugin,
            RenderingPlugin,
            AudioCuePlugin,
        ))
        .add_systems(Startup, log_startup)
        .run();
}

fn log_startup(config: Res<GameConfig>, session: Res<Session>) {
    match &config.save_file {
        Some(path) => info!(
            "Best score {} loaded from {}",
            session.high_score,
            path.display()
        ),
        None => info!("Best score kept in memory only"),
    }
    info!(
        "Difficulty {}, tick interval {} ms",
        session.difficulty, session.interval_ms
    );
}
