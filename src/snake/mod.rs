//! Snake plugin - turns input into commands, runs the tick scheduler, and keeps
//! the snake entities in step with the session.

use bevy::prelude::*;
use bevy_vector_shapes::prelude::*;
use std::time::Duration;

use crate::game::{
    CELL_SIZE, CORNER_RADIUS, Direction, FoodEatenEvent, GameOverEvent, GameRng, GameSet,
    GrowingSegment, LevelUpEvent, MoveTimer, Phase, PlayerCommand, PopupEvent, Position, PreviousPosition,
    SNAKE_HEAD_COLOR, SNAKE_HEAD_GLOW_COLOR, SNAKE_SEGMENT_COLOR, Session, SettingsPanel,
    SnakeBody, SnakeEye, SnakeHead, SnakeSegment, SoundSettings, Steer, TickEvent, TickTimer,
    Z_SNAKE_HEAD, Z_SNAKE_SEGMENT,
};
use crate::rendering::cell_center;
use crate::storage::BestScoreStore;

/// Plugin for snake-related systems.
pub struct SnakePlugin;

impl Plugin for SnakePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, keyboard_commands.in_set(GameSet::Input))
            .add_systems(
                Update,
                (
                    apply_commands,
                    advance_session,
                    persist_record,
                    sync_snake_entities,
                )
                    .chain()
                    .in_set(GameSet::Simulation),
            );
    }
}

// Type aliases for complex queries
type SnakeHeadQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static mut SnakeHead,
        &'static mut Position,
        &'static mut PreviousPosition,
    ),
>;
type SegmentQuery<'w, 's> = Query<
    'w,
    's,
    (&'static mut Position, &'static mut PreviousPosition),
    (With<SnakeSegment>, Without<SnakeHead>),
>;

/// Spawns the snake head entity with eyes.
pub fn spawn_snake_head(commands: &mut Commands, position: Position) -> Entity {
    let size = CELL_SIZE * 0.9;
    // Normalize corner radius relative to the shape size (0.0 to 1.0 range)
    let corner_radius_normalized = CORNER_RADIUS / (size / 2.0);

    commands
        .spawn((
            ShapeBundle::rect(
                &ShapeConfig {
                    color: SNAKE_HEAD_COLOR,
                    corner_radii: Vec4::splat(corner_radius_normalized),
                    transform: Transform::from_translation(cell_center(position).extend(Z_SNAKE_HEAD)),
                    ..ShapeConfig::default_2d()
                },
                Vec2::splat(size),
            ),
            SnakeHead {
                direction: Direction::Right,
            },
            position,
            PreviousPosition { pos: position },
        ))
        .with_children(|parent| {
            // Glow effect behind the head
            parent.spawn(ShapeBundle::circle(
                &ShapeConfig {
                    color: SNAKE_HEAD_GLOW_COLOR,
                    alpha_mode: ShapeAlphaMode::Add,
                    transform: Transform::from_xyz(0.0, 0.0, -0.1),
                    ..ShapeConfig::default_2d()
                },
                CELL_SIZE * 0.8,
            ));

            let eye_radius = CELL_SIZE * 0.08;

            // Eyes are laid out for a head facing right; rotation handles the rest.
            for side in [1.0, -1.0] {
                parent.spawn((
                    ShapeBundle::circle(
                        &ShapeConfig {
                            color: Color::srgba(0.0, 0.0, 0.0, 1.0),
                            transform: Transform::from_xyz(
                                CELL_SIZE * 0.15,
                                side * CELL_SIZE * 0.15,
                                0.1,
                            ),
                            ..ShapeConfig::default_2d()
                        },
                        eye_radius,
                    ),
                    SnakeEye,
                ));
            }
        })
        .id()
}

/// Spawns a snake body segment at the given position.
pub fn spawn_snake_segment(commands: &mut Commands, position: Position) -> Entity {
    let size = CELL_SIZE;
    let corner_radius_normalized = CORNER_RADIUS / (size / 2.0);

    commands
        .spawn((
            ShapeBundle::rect(
                &ShapeConfig {
                    color: SNAKE_SEGMENT_COLOR,
                    corner_radii: Vec4::splat(corner_radius_normalized),
                    transform: Transform::from_translation(
                        cell_center(position).extend(Z_SNAKE_SEGMENT),
                    ),
                    ..ShapeConfig::default_2d()
                },
                Vec2::splat(size),
            ),
            SnakeSegment,
            position,
            PreviousPosition { pos: position },
        ))
        .id()
}

/// System to read keyboard input and translate it into player commands.
fn keyboard_commands(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    session: Res<Session>,
    mut command_writer: MessageWriter<PlayerCommand>,
) {
    if keyboard_input.just_pressed(KeyCode::Escape) {
        command_writer.write(PlayerCommand::ToggleSettings);
    }

    if keyboard_input.just_pressed(KeyCode::KeyP) {
        command_writer.write(PlayerCommand::TogglePause);
    }

    if keyboard_input.just_pressed(KeyCode::KeyR) {
        command_writer.write(PlayerCommand::Reset);
    }

    if keyboard_input.just_pressed(KeyCode::Space) {
        match session.phase {
            Phase::Idle => {
                command_writer.write(PlayerCommand::Start);
            }
            Phase::GameOver => {
                command_writer.write(PlayerCommand::Reset);
            }
            Phase::Playing | Phase::Paused => {}
        }
    }

    if let Some(direction) = Direction::from_input(&keyboard_input) {
        command_writer.write(PlayerCommand::Steer(direction));
    }
}

/// System to apply player commands to the session, in the order they were sent.
fn apply_commands(
    mut command_reader: MessageReader<PlayerCommand>,
    mut session: ResMut<Session>,
    mut tick_timer: ResMut<TickTimer>,
    mut settings_panel: ResMut<SettingsPanel>,
    mut sound: ResMut<SoundSettings>,
) {
    for command in command_reader.read() {
        match *command {
            PlayerCommand::Steer(direction) => match session.steer(direction) {
                Steer::Started => {
                    tick_timer.timer.reset();
                    info!("Game started on {}", session.difficulty);
                }
                Steer::Turned => debug!("Turned {:?}", direction),
                Steer::Rejected | Steer::Ignored => {}
            },
            PlayerCommand::Start => {
                if session.start() {
                    tick_timer.timer.reset();
                    info!("Game started on {}", session.difficulty);
                }
            }
            PlayerCommand::TogglePause => {
                session.toggle_pause();
                match session.phase {
                    Phase::Paused => info!("Paused"),
                    Phase::Playing => info!("Resumed"),
                    Phase::Idle | Phase::GameOver => {}
                }
            }
            PlayerCommand::Reset => {
                session.reset();
                tick_timer.timer.reset();
                info!("New game ready");
            }
            PlayerCommand::ToggleSettings => {
                settings_panel.visible = !settings_panel.visible;
            }
            PlayerCommand::CycleDifficulty => {
                let next = session.difficulty.next();
                if session.set_difficulty(next) {
                    info!("Difficulty set to {}", next);
                }
            }
            PlayerCommand::ToggleSound => {
                sound.enabled = !sound.enabled;
                info!("Sound {}", if sound.enabled { "on" } else { "off" });
            }
        }
    }
}

/// Tick scheduler: runs the session at its current interval and republishes
/// what happened as messages. A long frame runs every tick that fell due.
#[allow(clippy::too_many_arguments)]
fn advance_session(
    time: Res<Time>,
    mut tick_timer: ResMut<TickTimer>,
    mut move_timer: ResMut<MoveTimer>,
    mut session: ResMut<Session>,
    mut rng: ResMut<GameRng>,
    mut food_eaten_writer: MessageWriter<FoodEatenEvent>,
    mut game_over_writer: MessageWriter<GameOverEvent>,
    mut popup_writer: MessageWriter<PopupEvent>,
    mut level_up_writer: MessageWriter<LevelUpEvent>,
) {
    if tick_timer.sync_interval(session.interval()) {
        debug!("Tick interval is now {} ms", session.interval_ms);
    }

    tick_timer.timer.tick(time.delta());
    for _ in 0..tick_timer.timer.times_finished_this_tick() {
        if session.phase != Phase::Playing {
            break;
        }
        move_timer.elapsed = Duration::ZERO;

        for event in session.tick(&mut rng.0) {
            match event {
                TickEvent::SpecialFoodSpawned(special) => {
                    debug!("{:?} food at {:?}", special.kind, special.position);
                }
                TickEvent::SpecialFoodExpired(position) => {
                    debug!("Special food at {:?} expired", position);
                }
                TickEvent::FoodEaten { popup } => {
                    food_eaten_writer.write(FoodEatenEvent {
                        position: popup.position,
                        special: None,
                    });
                    popup_writer.write(PopupEvent { popup });
                }
                TickEvent::SpecialFoodEaten { kind, popup } => {
                    food_eaten_writer.write(FoodEatenEvent {
                        position: popup.position,
                        special: Some(kind),
                    });
                    popup_writer.write(PopupEvent { popup });
                }
                TickEvent::LevelUp { level, interval_ms } => {
                    info!("Level {} reached, tick interval {} ms", level, interval_ms);
                    level_up_writer.write(LevelUpEvent { level, interval_ms });
                }
                TickEvent::GameOver { score, new_record } => {
                    info!("Game Over! Final score: {}", score);
                    game_over_writer.write(GameOverEvent { score, new_record });
                }
            }
        }
    }
}

/// System to write a new record to the best-score store.
fn persist_record(
    mut game_over_reader: MessageReader<GameOverEvent>,
    mut store: ResMut<BestScoreStore>,
) {
    for event in game_over_reader.read() {
        if !event.new_record {
            continue;
        }
        match store.0.save(event.score) {
            Ok(()) => info!("New record: {}", event.score),
            Err(e) => warn!("Could not save record {}: {}", event.score, e),
        }
    }
}

/// System to keep one entity per snake cell, head first.
fn sync_snake_entities(
    mut commands: Commands,
    session: Res<Session>,
    mut body: ResMut<SnakeBody>,
    mut heads: SnakeHeadQuery,
    mut segments: SegmentQuery,
) {
    if body.segments.is_empty() {
        let head = spawn_snake_head(&mut commands, session.head());
        body.segments.push(head);
    }

    while body.segments.len() > session.snake.len() {
        if let Some(entity) = body.segments.pop() {
            commands.entity(entity).despawn();
        }
    }

    for (index, &target) in session.snake.iter().enumerate() {
        match body.segments.get(index).copied() {
            Some(entity) if index == 0 => {
                if let Ok((mut head, mut position, mut previous)) = heads.get_mut(entity) {
                    head.direction = session.direction;
                    move_to(&mut position, &mut previous, target);
                }
            }
            Some(entity) => {
                if let Ok((mut position, mut previous)) = segments.get_mut(entity) {
                    move_to(&mut position, &mut previous, target);
                }
            }
            None => {
                let segment = spawn_snake_segment(&mut commands, target);
                commands.entity(segment).insert(GrowingSegment {
                    timer: Timer::from_seconds(0.2, TimerMode::Once),
                });
                body.segments.push(segment);
            }
        }
    }
}

fn move_to(position: &mut Position, previous: &mut PreviousPosition, target: Position) {
    if *position == target {
        return;
    }
    // Anything but a single step (a reset) snaps instead of sliding.
    let single_step = (position.x - target.x).abs() + (position.y - target.y).abs() == 1;
    previous.pos = if single_step { *position } else { target };
    *position = target;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Difficulty;
    use crate::storage::{ScoreStore, StoreError};
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Store that records every save.
    struct RecordingStore {
        saved: Arc<Mutex<Vec<u32>>>,
    }

    impl ScoreStore for RecordingStore {
        fn load(&self) -> u32 {
            0
        }

        fn save(&mut self, score: u32) -> Result<(), StoreError> {
            self.saved.lock().unwrap().push(score);
            Ok(())
        }
    }

    fn test_app(session: Session) -> (App, Arc<Mutex<Vec<u32>>>) {
        let saved = Arc::new(Mutex::new(Vec::new()));
        let mut app = App::new();
        app.init_resource::<Time>()
            .init_resource::<ButtonInput<KeyCode>>()
            .insert_resource(TickTimer::new(session.interval()))
            .insert_resource(session)
            .insert_resource(GameRng::new(Some(7)))
            .insert_resource(BestScoreStore(Box::new(RecordingStore {
                saved: saved.clone(),
            })))
            .insert_resource(SoundSettings { enabled: true })
            .init_resource::<MoveTimer>()
            .init_resource::<SettingsPanel>()
            .add_message::<PlayerCommand>()
            .add_message::<FoodEatenEvent>()
            .add_message::<GameOverEvent>()
            .add_message::<PopupEvent>()
            .add_message::<LevelUpEvent>()
            .add_systems(
                Update,
                (
                    keyboard_commands,
                    apply_commands,
                    advance_session,
                    persist_record,
                )
                    .chain(),
            );
        (app, saved)
    }

    /// Runs one frame that lasted `ms` milliseconds.
    fn frame(app: &mut App, ms: u64) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(ms));
        app.update();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .clear();
    }

    /// Runs one zero-length frame with `key` freshly pressed.
    fn press(app: &mut App, key: KeyCode) {
        {
            let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            input.release_all();
            input.clear();
            input.press(key);
        }
        frame(app, 0);
    }

    fn session(app: &App) -> &Session {
        app.world().resource::<Session>()
    }

    /// A running session one step from the right wall.
    fn at_right_wall(score: u32, high_score: u32) -> Session {
        let mut session = Session::new(Difficulty::Medium, high_score);
        session.snake = VecDeque::from([Position::new(19, 10)]);
        session.score = score;
        session.phase = Phase::Playing;
        session
    }

    #[test]
    fn test_record_is_saved_once_per_game_over() {
        let (mut app, saved) = test_app(at_right_wall(40, 10));

        frame(&mut app, 150);
        assert!(session(&app).is_game_over());
        assert_eq!(session(&app).high_score, 40);

        frame(&mut app, 150);
        frame(&mut app, 150);
        assert_eq!(*saved.lock().unwrap(), vec![40]);
    }

    #[test]
    fn test_no_save_without_new_record() {
        let (mut app, saved) = test_app(at_right_wall(10, 40));

        frame(&mut app, 150);

        assert!(session(&app).is_game_over());
        assert_eq!(session(&app).high_score, 40);
        assert!(saved.lock().unwrap().is_empty());
    }

    #[test]
    fn test_start_restarts_tick_timer() {
        let (mut app, _) = test_app(Session::new(Difficulty::Medium, 0));

        frame(&mut app, 100);
        assert_eq!(
            app.world().resource::<TickTimer>().timer.elapsed(),
            Duration::from_millis(100)
        );

        press(&mut app, KeyCode::Space);

        assert_eq!(session(&app).phase, Phase::Playing);
        assert_eq!(
            app.world().resource::<TickTimer>().timer.elapsed(),
            Duration::ZERO
        );
    }

    #[test]
    fn test_cycle_difficulty_is_inert_while_playing() {
        let (mut app, _) = test_app(Session::new(Difficulty::Medium, 0));

        app.world_mut().write_message(PlayerCommand::CycleDifficulty);
        frame(&mut app, 0);
        assert_eq!(session(&app).difficulty, Difficulty::Hard);
        assert_eq!(session(&app).interval_ms, 100);

        press(&mut app, KeyCode::Space);
        app.world_mut().write_message(PlayerCommand::CycleDifficulty);
        frame(&mut app, 0);
        assert_eq!(session(&app).difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_paused_session_does_not_move() {
        let (mut app, _) = test_app(Session::new(Difficulty::Medium, 0));
        press(&mut app, KeyCode::Space);
        press(&mut app, KeyCode::KeyP);
        assert!(session(&app).is_paused());

        frame(&mut app, 600);

        assert!(app.world().resource::<TickTimer>().timer.times_finished_this_tick() > 0);
        assert_eq!(session(&app).move_count, 0);
        assert_eq!(session(&app).head(), Position::new(10, 10));
    }

    #[test]
    fn test_long_frame_runs_every_due_tick() {
        let (mut app, _) = test_app(Session::new(Difficulty::Medium, 0));
        press(&mut app, KeyCode::Space);

        frame(&mut app, 460);

        assert_eq!(session(&app).move_count, 3);
        assert_eq!(session(&app).head(), Position::new(13, 10));
    }

    #[test]
    fn test_long_frame_stops_at_game_over() {
        let (mut app, saved) = test_app(at_right_wall(40, 10));

        frame(&mut app, 600);

        assert!(session(&app).is_game_over());
        assert_eq!(session(&app).move_count, 1);
        assert_eq!(*saved.lock().unwrap(), vec![40]);
    }

    #[test]
    fn test_keys_drive_the_session() {
        let (mut app, _) = test_app(Session::new(Difficulty::Medium, 0));

        press(&mut app, KeyCode::Escape);
        assert!(app.world().resource::<SettingsPanel>().visible);
        press(&mut app, KeyCode::Escape);
        assert!(!app.world().resource::<SettingsPanel>().visible);

        press(&mut app, KeyCode::Space);
        assert_eq!(session(&app).phase, Phase::Playing);

        press(&mut app, KeyCode::KeyP);
        assert_eq!(session(&app).phase, Phase::Paused);
        press(&mut app, KeyCode::KeyP);
        assert_eq!(session(&app).phase, Phase::Playing);

        press(&mut app, KeyCode::ArrowUp);
        assert_eq!(session(&app).direction, Direction::Up);
        press(&mut app, KeyCode::KeyS);
        assert_eq!(session(&app).direction, Direction::Up);
    }

    #[derive(Resource, Default)]
    struct LevelUps(Vec<(u32, u64)>);

    fn collect_level_ups(mut reader: MessageReader<LevelUpEvent>, mut seen: ResMut<LevelUps>) {
        seen.0
            .extend(reader.read().map(|event| (event.level, event.interval_ms)));
    }

    #[test]
    fn test_level_up_is_published() {
        let mut almost = Session::new(Difficulty::Easy, 0);
        almost.food = Position::new(11, 10);
        almost.score = 90;
        almost.phase = Phase::Playing;
        let (mut app, _) = test_app(almost);
        app.init_resource::<LevelUps>()
            .add_systems(Update, collect_level_ups.after(persist_record));

        frame(&mut app, 200);

        assert_eq!(session(&app).score, 100);
        assert_eq!(app.world().resource::<LevelUps>().0, vec![(2, 190)]);
    }

    #[test]
    fn test_space_resets_after_game_over() {
        let (mut app, _) = test_app(at_right_wall(0, 0));
        frame(&mut app, 150);
        assert!(session(&app).is_game_over());

        press(&mut app, KeyCode::Space);

        assert_eq!(session(&app).phase, Phase::Idle);
        assert_eq!(session(&app).head(), Position::new(10, 10));
    }

    #[test]
    fn test_move_to_slides_one_cell() {
        let mut position = Position::new(4, 4);
        let mut previous = PreviousPosition { pos: position };

        move_to(&mut position, &mut previous, Position::new(5, 4));

        assert_eq!(position, Position::new(5, 4));
        assert_eq!(previous.pos, Position::new(4, 4));
    }

    #[test]
    fn test_move_to_snaps_on_jump() {
        let mut position = Position::new(18, 2);
        let mut previous = PreviousPosition {
            pos: Position::new(17, 2),
        };

        move_to(&mut position, &mut previous, Position::new(10, 10));

        assert_eq!(position, Position::new(10, 10));
        assert_eq!(previous.pos, Position::new(10, 10));
    }

    #[test]
    fn test_move_to_same_cell_keeps_previous() {
        let mut position = Position::new(3, 3);
        let mut previous = PreviousPosition {
            pos: Position::new(2, 3),
        };

        move_to(&mut position, &mut previous, Position::new(3, 3));

        assert_eq!(previous.pos, Position::new(2, 3));
    }
}
