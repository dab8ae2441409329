//! UI plugin - HUD, menus and overlays, on-screen controls, settings panel, and score popups.

use bevy::post_process::bloom::Bloom;
use bevy::prelude::*;
use bevy::render::view::Hdr;

use bevy_vector_shapes::prelude::*;

use crate::game::{
    ARENA_BORDER_COLOR, ARENA_COLOR, ARENA_HEIGHT, ARENA_WIDTH, BUTTON_COLOR, BUTTON_HOVER_COLOR,
    BUTTON_PRESSED_COLOR, CELL_SIZE, ControlButton, DifficultyLabel, Direction, GameOverEvent,
    GameOverUI, GameSet, HudText, LevelUpEvent, MenuUI, POPUP_LIFETIME, PauseButtonLabel, PauseUI, Phase,
    PlayerCommand, PopupEvent, ScorePopupText, Session, SettingsPanel, SettingsPanelUI,
    SoundLabel, SoundSettings, WINDOW_HEIGHT, WINDOW_WIDTH, Z_POPUP,
};
use crate::rendering::cell_center;

/// Plugin for UI and game flow systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_system)
            .add_systems(Update, button_commands.in_set(GameSet::Input))
            .add_systems(
                Update,
                (
                    button_colors,
                    update_button_visibility,
                    update_hud,
                    update_settings_panel,
                    sync_menu,
                    sync_pause_overlay,
                    sync_game_over_screen,
                    spawn_score_popups,
                    spawn_level_up_banner,
                    animate_score_popups,
                )
                    .chain()
                    .in_set(GameSet::Presentation),
            );
    }
}

const ARENA_PIXEL_WIDTH: f32 = ARENA_WIDTH as f32 * CELL_SIZE;
const ARENA_PIXEL_HEIGHT: f32 = ARENA_HEIGHT as f32 * CELL_SIZE;

/// Node covering exactly the arena, for overlays.
fn arena_overlay_node() -> Node {
    Node {
        position_type: PositionType::Absolute,
        left: Val::Px((WINDOW_WIDTH as f32 - ARENA_PIXEL_WIDTH) / 2.0),
        top: Val::Px((WINDOW_HEIGHT as f32 - ARENA_PIXEL_HEIGHT) / 2.0),
        width: Val::Px(ARENA_PIXEL_WIDTH),
        height: Val::Px(ARENA_PIXEL_HEIGHT),
        align_items: AlignItems::Center,
        justify_content: JustifyContent::Center,
        flex_direction: FlexDirection::Column,
        ..default()
    }
}

fn label(text: impl Into<String>, font_size: f32, color: Color) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(color),
    )
}

fn button(command: PlayerCommand, width: f32) -> impl Bundle {
    (
        Button,
        Node {
            width: Val::Px(width),
            height: Val::Px(36.0),
            margin: UiRect::all(Val::Px(4.0)),
            align_items: AlignItems::Center,
            justify_content: JustifyContent::Center,
            ..default()
        },
        BackgroundColor(BUTTON_COLOR),
        ControlButton(command),
    )
}

/// Whether a control makes sense in the current phase.
fn button_visible(command: PlayerCommand, phase: Phase) -> bool {
    match command {
        PlayerCommand::Start => phase == Phase::Idle,
        PlayerCommand::TogglePause => matches!(phase, Phase::Playing | Phase::Paused),
        PlayerCommand::Reset => phase == Phase::GameOver,
        PlayerCommand::Steer(_) => phase != Phase::GameOver,
        PlayerCommand::ToggleSettings
        | PlayerCommand::CycleDifficulty
        | PlayerCommand::ToggleSound => true,
    }
}

fn difficulty_text(session: &Session) -> String {
    if session.is_playing() {
        format!("Difficulty: {} (locked)", session.difficulty)
    } else {
        format!("Difficulty: {}", session.difficulty)
    }
}

fn sound_text(enabled: bool) -> &'static str {
    if enabled { "Sound: On" } else { "Sound: Off" }
}

/// Initial setup system - camera, arena, HUD, controls, settings panel.
fn setup_system(mut commands: Commands, session: Res<Session>, sound: Res<SoundSettings>) {
    // Setup camera with HDR and bloom for glowing effects
    commands.spawn((
        Camera2d,
        Hdr,
        Bloom {
            intensity: 0.3,
            low_frequency_boost: 0.6,
            low_frequency_boost_curvature: 0.5,
            high_pass_frequency: 0.8,
            ..default()
        },
    ));

    // Arena background
    commands.spawn((
        Sprite {
            color: ARENA_COLOR,
            custom_size: Some(Vec2::new(ARENA_PIXEL_WIDTH, ARENA_PIXEL_HEIGHT)),
            ..default()
        },
        Transform::from_translation(Vec3::new(0.0, 0.0, 0.0)),
    ));

    // Glowing arena border using hollow rectangle
    commands.spawn(ShapeBundle::rect(
        &ShapeConfig {
            color: ARENA_BORDER_COLOR,
            alpha_mode: ShapeAlphaMode::Add,
            hollow: true,
            thickness: 4.0,
            corner_radii: Vec4::splat(0.02),
            transform: Transform::from_xyz(0.0, 0.0, 0.1),
            ..ShapeConfig::default_2d()
        },
        Vec2::new(ARENA_PIXEL_WIDTH + 4.0, ARENA_PIXEL_HEIGHT + 4.0),
    ));

    // Score board
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            top: Val::Px(16.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            column_gap: Val::Px(24.0),
            ..default()
        })
        .with_children(|parent| {
            for (hud, title) in [
                (HudText::Score, "Score"),
                (HudText::Level, "Level"),
                (HudText::Record, "Record"),
            ] {
                parent
                    .spawn((
                        Node {
                            width: Val::Px(110.0),
                            padding: UiRect::all(Val::Px(8.0)),
                            flex_direction: FlexDirection::Column,
                            align_items: AlignItems::Center,
                            ..default()
                        },
                        BackgroundColor(BUTTON_COLOR),
                    ))
                    .with_children(|item| {
                        item.spawn(label(title, 14.0, Color::srgba(0.7, 0.75, 0.8, 1.0)));
                        item.spawn((label("0", 24.0, Color::WHITE), hud));
                    });
            }

            parent
                .spawn(button(PlayerCommand::ToggleSettings, 100.0))
                .with_children(|b| {
                    b.spawn(label("Settings", 16.0, Color::WHITE));
                });
        });

    // Settings panel (hidden until toggled)
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(84.0),
                right: Val::Px(16.0),
                padding: UiRect::all(Val::Px(8.0)),
                flex_direction: FlexDirection::Column,
                display: Display::None,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.8)),
            SettingsPanelUI,
        ))
        .with_children(|parent| {
            parent
                .spawn(button(PlayerCommand::CycleDifficulty, 240.0))
                .with_children(|b| {
                    b.spawn((label(difficulty_text(&session), 16.0, Color::WHITE), DifficultyLabel));
                });
            parent
                .spawn(button(PlayerCommand::ToggleSound, 240.0))
                .with_children(|b| {
                    b.spawn((label(sound_text(sound.enabled), 16.0, Color::WHITE), SoundLabel));
                });
        });

    // Control bar: game flow buttons and a direction pad
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(8.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            column_gap: Val::Px(32.0),
            ..default()
        })
        .with_children(|parent| {
            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Column,
                    ..default()
                })
                .with_children(|flow| {
                    flow.spawn(button(PlayerCommand::Start, 160.0))
                        .with_children(|b| {
                            b.spawn(label("Start (Space)", 16.0, Color::WHITE));
                        });
                    flow.spawn(button(PlayerCommand::TogglePause, 160.0))
                        .with_children(|b| {
                            b.spawn((label("Pause (P)", 16.0, Color::WHITE), PauseButtonLabel));
                        });
                    flow.spawn(button(PlayerCommand::Reset, 160.0))
                        .with_children(|b| {
                            b.spawn(label("Play again", 16.0, Color::WHITE));
                        });
                });

            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    ..default()
                })
                .with_children(|pad| {
                    pad.spawn(button(PlayerCommand::Steer(Direction::Up), 44.0))
                        .with_children(|b| {
                            b.spawn(label("^", 18.0, Color::WHITE));
                        });
                    pad.spawn(Node::default()).with_children(|row| {
                        row.spawn(button(PlayerCommand::Steer(Direction::Left), 44.0))
                            .with_children(|b| {
                                b.spawn(label("<", 18.0, Color::WHITE));
                            });
                        row.spawn(button(PlayerCommand::Steer(Direction::Down), 44.0))
                            .with_children(|b| {
                                b.spawn(label("v", 18.0, Color::WHITE));
                            });
                        row.spawn(button(PlayerCommand::Steer(Direction::Right), 44.0))
                            .with_children(|b| {
                                b.spawn(label(">", 18.0, Color::WHITE));
                            });
                    });
                });
        });
}

/// System to turn button presses into player commands.
fn button_commands(
    buttons: Query<(&Interaction, &ControlButton), Changed<Interaction>>,
    mut command_writer: MessageWriter<PlayerCommand>,
) {
    for (interaction, control) in buttons.iter() {
        if *interaction == Interaction::Pressed {
            command_writer.write(control.0);
        }
    }
}

/// System to give buttons hover and press feedback.
fn button_colors(
    mut buttons: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<Button>)>,
) {
    for (interaction, mut background) in buttons.iter_mut() {
        *background = match interaction {
            Interaction::Pressed => BUTTON_PRESSED_COLOR.into(),
            Interaction::Hovered => BUTTON_HOVER_COLOR.into(),
            Interaction::None => BUTTON_COLOR.into(),
        };
    }
}

/// System to show only the controls that apply to the current phase.
fn update_button_visibility(
    session: Res<Session>,
    mut buttons: Query<(&ControlButton, &mut Node)>,
    mut pause_labels: Query<&mut Text, With<PauseButtonLabel>>,
) {
    if !session.is_changed() {
        return;
    }

    for (control, mut node) in buttons.iter_mut() {
        let display = if button_visible(control.0, session.phase) {
            Display::Flex
        } else {
            Display::None
        };
        if node.display != display {
            node.display = display;
        }
    }

    for mut text in pause_labels.iter_mut() {
        let caption = if session.is_paused() {
            "Resume (P)"
        } else {
            "Pause (P)"
        };
        *text = Text::new(caption);
    }
}

/// System to update the score board.
fn update_hud(session: Res<Session>, mut query: Query<(&HudText, &mut Text)>) {
    if !session.is_changed() {
        return;
    }

    for (hud, mut text) in query.iter_mut() {
        let value = match hud {
            HudText::Score => session.score,
            HudText::Level => session.level,
            HudText::Record => session.high_score,
        };
        *text = Text::new(value.to_string());
    }
}

/// System to show the settings panel and refresh its labels.
#[allow(clippy::type_complexity)]
fn update_settings_panel(
    panel: Res<SettingsPanel>,
    session: Res<Session>,
    sound: Res<SoundSettings>,
    mut panels: Query<&mut Node, (With<SettingsPanelUI>, Without<ControlButton>)>,
    mut difficulty_labels: Query<&mut Text, (With<DifficultyLabel>, Without<SoundLabel>)>,
    mut sound_labels: Query<&mut Text, (With<SoundLabel>, Without<DifficultyLabel>)>,
) {
    if panel.is_changed()
        && let Ok(mut node) = panels.single_mut()
    {
        node.display = if panel.visible {
            Display::Flex
        } else {
            Display::None
        };
    }

    if session.is_changed() {
        for mut text in difficulty_labels.iter_mut() {
            *text = Text::new(difficulty_text(&session));
        }
    }

    if sound.is_changed() {
        for mut text in sound_labels.iter_mut() {
            *text = Text::new(sound_text(sound.enabled));
        }
    }
}

/// Spawns the start menu UI.
fn spawn_start_menu(commands: &mut Commands) {
    commands
        .spawn((
            arena_overlay_node(),
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.85)),
            MenuUI,
        ))
        .with_children(|parent| {
            parent.spawn((
                label("SNAKE", 80.0, Color::srgba(0.3, 1.0, 0.3, 1.0)),
                Node {
                    margin: UiRect::bottom(Val::Px(30.0)),
                    ..default()
                },
            ));

            parent.spawn((
                label("CONTROLS", 24.0, Color::WHITE),
                Node {
                    margin: UiRect::bottom(Val::Px(15.0)),
                    ..default()
                },
            ));

            for line in [
                "Arrow Keys or WASD to move",
                "P to pause, Esc for settings",
                "Red food: grow and score",
                "Orange: bonus points, purple: slows you down",
                "Don't hit the walls or yourself!",
            ] {
                parent.spawn((
                    label(line, 18.0, Color::srgba(0.8, 0.8, 0.8, 1.0)),
                    Node {
                        margin: UiRect::bottom(Val::Px(10.0)),
                        ..default()
                    },
                ));
            }

            parent.spawn((
                label("Press SPACE to start", 24.0, Color::srgba(1.0, 1.0, 0.3, 1.0)),
                Node {
                    margin: UiRect::top(Val::Px(20.0)),
                    ..default()
                },
            ));
        });
}

/// Spawns the game over screen UI.
fn spawn_game_over_screen(commands: &mut Commands, score: u32, new_record: bool) {
    commands
        .spawn((
            arena_overlay_node(),
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
            GameOverUI,
        ))
        .with_children(|parent| {
            parent.spawn((
                label("GAME OVER", 60.0, Color::srgba(1.0, 0.3, 0.3, 1.0)),
                Node {
                    margin: UiRect::bottom(Val::Px(20.0)),
                    ..default()
                },
            ));

            parent.spawn((
                label(format!("Final Score: {}", score), 30.0, Color::WHITE),
                Node {
                    margin: UiRect::bottom(Val::Px(20.0)),
                    ..default()
                },
            ));

            if new_record {
                parent.spawn((
                    label("New record!", 26.0, Color::srgba(1.0, 0.85, 0.2, 1.0)),
                    Node {
                        margin: UiRect::bottom(Val::Px(20.0)),
                        ..default()
                    },
                ));
            }

            parent.spawn(label(
                "Press SPACE to play again",
                20.0,
                Color::srgba(0.8, 0.8, 0.8, 1.0),
            ));
        });
}

/// System to show the start menu while the session is idle.
fn sync_menu(mut commands: Commands, session: Res<Session>, menu_ui: Query<Entity, With<MenuUI>>) {
    let idle = session.phase == Phase::Idle;
    if idle && menu_ui.is_empty() {
        spawn_start_menu(&mut commands);
    } else if !idle {
        for entity in menu_ui.iter() {
            commands.entity(entity).despawn();
        }
    }
}

/// System to show the pause overlay while paused.
fn sync_pause_overlay(
    mut commands: Commands,
    session: Res<Session>,
    pause_ui: Query<Entity, With<PauseUI>>,
) {
    if session.is_paused() && pause_ui.is_empty() {
        commands
            .spawn((
                arena_overlay_node(),
                BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
                PauseUI,
            ))
            .with_children(|parent| {
                parent.spawn(label("PAUSE", 60.0, Color::WHITE));
            });
    } else if !session.is_paused() {
        for entity in pause_ui.iter() {
            commands.entity(entity).despawn();
        }
    }
}

/// System to spawn the game over screen when the game ends and clear it afterwards.
fn sync_game_over_screen(
    mut commands: Commands,
    session: Res<Session>,
    mut game_over_reader: MessageReader<GameOverEvent>,
    game_over_ui: Query<Entity, With<GameOverUI>>,
) {
    for event in game_over_reader.read() {
        if game_over_ui.is_empty() {
            spawn_game_over_screen(&mut commands, event.score, event.new_record);
        }
    }

    if !session.is_game_over() {
        for entity in game_over_ui.iter() {
            commands.entity(entity).despawn();
        }
    }
}

/// System to spawn a floating annotation for every popup message.
fn spawn_score_popups(
    mut commands: Commands,
    time: Res<Time>,
    mut popup_reader: MessageReader<PopupEvent>,
) {
    for event in popup_reader.read() {
        let origin = cell_center(event.popup.position);
        let now = time.elapsed();
        commands.spawn((
            Text2d::new(event.popup.text.clone()),
            TextFont {
                font_size: 18.0,
                ..default()
            },
            TextColor(Color::srgba(1.0, 0.95, 0.4, 1.0)),
            Transform::from_translation(origin.extend(Z_POPUP)),
            ScorePopupText {
                created_at: now,
                expires_at: now + POPUP_LIFETIME,
                origin,
            },
        ));
    }
}

/// System to announce a new level in the middle of the arena.
fn spawn_level_up_banner(
    mut commands: Commands,
    time: Res<Time>,
    mut level_up_reader: MessageReader<LevelUpEvent>,
) {
    for event in level_up_reader.read() {
        let now = time.elapsed();
        commands.spawn((
            Text2d::new(format!("LEVEL {}", event.level)),
            TextFont {
                font_size: 40.0,
                ..default()
            },
            TextColor(Color::srgba(1.0, 0.95, 0.4, 1.0)),
            Transform::from_translation(Vec3::new(0.0, 0.0, Z_POPUP)),
            ScorePopupText {
                created_at: now,
                expires_at: now + POPUP_LIFETIME,
                origin: Vec2::ZERO,
            },
        ));
    }
}

/// System to float popups upward, fade them, and prune expired ones.
fn animate_score_popups(
    mut commands: Commands,
    time: Res<Time>,
    mut popups: Query<(Entity, &ScorePopupText, &mut Transform, &mut TextColor)>,
) {
    let now = time.elapsed();
    for (entity, popup, mut transform, mut color) in popups.iter_mut() {
        if now >= popup.expires_at {
            commands.entity(entity).despawn();
            continue;
        }

        let lifetime = (popup.expires_at - popup.created_at).as_secs_f32();
        let progress = (now - popup.created_at).as_secs_f32() / lifetime;
        transform.translation = (popup.origin + Vec2::Y * 30.0 * progress).extend(Z_POPUP);
        color.0 = Color::srgba(1.0, 0.95, 0.4, 1.0 - progress);
    }
}
