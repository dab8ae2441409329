//! Food plugin - keeps the food and special food entities in step with the session.

use bevy::prelude::*;
use bevy_vector_shapes::prelude::*;

use crate::game::{
    BONUS_FOOD_COLOR, CELL_SIZE, FOOD_COLOR, Food, FoodPulse, GameSet, Position,
    PreviousPosition, SLOW_FOOD_COLOR, Session, SpecialFood, SpecialFoodMarker, SpecialKind,
    Z_FOOD, Z_SPECIAL_FOOD,
};
use crate::rendering::cell_center;

/// Plugin for food-related systems.
pub struct FoodPlugin;

impl Plugin for FoodPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (sync_food, sync_special_food, food_pulse_animation)
                .chain()
                .in_set(GameSet::Presentation),
        );
    }
}

/// Spawns the regular food entity.
pub fn spawn_food(commands: &mut Commands, position: Position) -> Entity {
    commands
        .spawn((
            ShapeBundle::circle(
                &ShapeConfig {
                    color: FOOD_COLOR,
                    transform: Transform::from_translation(cell_center(position).extend(Z_FOOD)),
                    ..ShapeConfig::default_2d()
                },
                CELL_SIZE / 2.0,
            ),
            Food,
            position,
            PreviousPosition { pos: position },
            FoodPulse {
                timer: Timer::from_seconds(0.8, TimerMode::Repeating),
            },
        ))
        .id()
}

/// Spawns a special food entity, colored by kind.
pub fn spawn_special_food(commands: &mut Commands, special: &SpecialFood) -> Entity {
    let (color, period) = match special.kind {
        SpecialKind::Bonus => (BONUS_FOOD_COLOR, 1.0),
        SpecialKind::Slow => (SLOW_FOOD_COLOR, 0.3),
    };

    commands
        .spawn((
            ShapeBundle::circle(
                &ShapeConfig {
                    color,
                    transform: Transform::from_translation(
                        cell_center(special.position).extend(Z_SPECIAL_FOOD),
                    ),
                    ..ShapeConfig::default_2d()
                },
                CELL_SIZE / 2.0,
            ),
            SpecialFoodMarker { kind: special.kind },
            special.position,
            PreviousPosition {
                pos: special.position,
            },
            FoodPulse {
                timer: Timer::from_seconds(period, TimerMode::Repeating),
            },
        ))
        .id()
}

/// System to move the food entity to wherever the session put the food.
fn sync_food(
    mut commands: Commands,
    session: Res<Session>,
    mut foods: Query<(&mut Position, &mut PreviousPosition), With<Food>>,
) {
    match foods.single_mut() {
        Ok((mut position, mut previous)) => {
            if *position != session.food {
                // Food jumps, it never slides.
                *position = session.food;
                previous.pos = session.food;
            }
        }
        Err(_) => {
            spawn_food(&mut commands, session.food);
        }
    }
}

/// System to spawn and despawn the special food entity.
fn sync_special_food(
    mut commands: Commands,
    session: Res<Session>,
    specials: Query<(Entity, &Position, &SpecialFoodMarker)>,
) {
    let mut current = None;
    for (entity, position, marker) in specials.iter() {
        let matches = session
            .special_food
            .is_some_and(|special| special.position == *position && special.kind == marker.kind);
        if matches {
            current = Some(entity);
        } else {
            commands.entity(entity).despawn();
        }
    }

    if current.is_none()
        && let Some(special) = session.special_food
    {
        spawn_special_food(&mut commands, &special);
    }
}

/// System to animate food with a pulsing effect.
fn food_pulse_animation(time: Res<Time>, mut foods: Query<(&mut Transform, &mut FoodPulse)>) {
    for (mut transform, mut pulse) in foods.iter_mut() {
        pulse.timer.tick(time.delta());

        // Use sine wave for smooth pulsing
        let progress = pulse.timer.fraction();
        let scale = 1.0 + (progress * std::f32::consts::PI * 2.0).sin() * 0.15;

        transform.scale = Vec3::splat(scale);
    }
}
