//! Rendering plugin - handles position interpolation, rotation, visual effects, and camera.

use bevy::prelude::*;
use bevy_vector_shapes::prelude::*;
use rand::prelude::*;

use crate::game::{
    ARENA_HEIGHT, ARENA_WIDTH, BONUS_FOOD_COLOR, CELL_SIZE, CameraShake, Direction, Food,
    FoodEatenEvent, GameOverEvent, GameSet, GrowingSegment, MoveTimer, Position,
    PreviousPosition, PulseEffect, SLOW_FOOD_COLOR, Session, SnakeHead, SnakeSegment,
    SpecialFoodMarker, SpecialKind, Z_BACKGROUND, Z_FOOD, Z_SNAKE_HEAD, Z_SNAKE_SEGMENT,
    Z_SPECIAL_FOOD,
};

/// Plugin for rendering and visual effects.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                update_move_timer,
                position_translation,
                update_head_rotation,
                pulse_effect_system,
                spawn_food_eaten_effect,
                trigger_camera_shake_on_game_over,
                camera_shake_system,
                growing_segment_animation,
            )
                .chain()
                .in_set(GameSet::Presentation),
        );
    }
}

// Type alias for transform interpolation query
type TransformInterpolationQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static Position,
        &'static PreviousPosition,
        &'static mut Transform,
        Option<&'static SnakeHead>,
        Option<&'static SnakeSegment>,
        Option<&'static Food>,
        Option<&'static SpecialFoodMarker>,
    ),
>;

/// World-space center of a grid cell. Row 0 is drawn at the top.
pub fn cell_center(position: Position) -> Vec2 {
    Vec2::new(
        (position.x as f32 - ARENA_WIDTH as f32 / 2.0 + 0.5) * CELL_SIZE,
        (ARENA_HEIGHT as f32 / 2.0 - position.y as f32 - 0.5) * CELL_SIZE,
    )
}

/// System to track elapsed time for interpolation.
fn update_move_timer(mut move_timer: ResMut<MoveTimer>, time: Res<Time>) {
    move_timer.elapsed += time.delta();
}

/// System to interpolate entity positions for smooth movement.
fn position_translation(
    mut transforms: TransformInterpolationQuery,
    move_timer: Res<MoveTimer>,
    session: Res<Session>,
) {
    // Calculate interpolation progress (0.0 to 1.0)
    let progress = (move_timer.elapsed.as_secs_f32() / session.interval().as_secs_f32()).min(1.0);

    for (pos, prev_pos, mut transform, head, segment, food, special) in transforms.iter_mut() {
        // Set z-index based on entity type to ensure proper layering
        let z = if head.is_some() {
            Z_SNAKE_HEAD
        } else if segment.is_some() {
            Z_SNAKE_SEGMENT
        } else if special.is_some() {
            Z_SPECIAL_FOOD
        } else if food.is_some() {
            Z_FOOD
        } else {
            Z_BACKGROUND
        };

        let current = cell_center(*pos);
        let previous = cell_center(prev_pos.pos);
        let interpolated = previous + (current - previous) * progress;

        transform.translation = interpolated.extend(z);
    }
}

/// System to update snake head rotation based on direction.
fn update_head_rotation(mut heads: Query<(&SnakeHead, &mut Transform)>) {
    for (head, mut transform) in heads.iter_mut() {
        let rotation = match head.direction {
            Direction::Right => 0.0,
            Direction::Up => std::f32::consts::FRAC_PI_2,
            Direction::Left => std::f32::consts::PI,
            Direction::Down => -std::f32::consts::FRAC_PI_2,
        };

        transform.rotation = Quat::from_rotation_z(rotation);
    }
}

/// System to handle pulse effects (for eaten food flash).
fn pulse_effect_system(
    mut commands: Commands,
    time: Res<Time>,
    mut effects: Query<(Entity, &mut Transform, &mut PulseEffect)>,
) {
    for (entity, mut transform, mut effect) in effects.iter_mut() {
        effect.timer.tick(time.delta());

        if effect.timer.is_finished() {
            commands.entity(entity).despawn();
        } else {
            let progress = effect.timer.fraction();
            let scale = effect.start_scale + (effect.end_scale - effect.start_scale) * progress;
            transform.scale = Vec3::splat(scale);
        }
    }
}

/// System to spawn visual effect when food is eaten.
fn spawn_food_eaten_effect(
    mut commands: Commands,
    mut food_eaten_reader: MessageReader<FoodEatenEvent>,
) {
    for event in food_eaten_reader.read() {
        let color = match event.special {
            None => Color::srgba(1.0, 1.0, 0.3, 0.8),
            Some(SpecialKind::Bonus) => BONUS_FOOD_COLOR,
            Some(SpecialKind::Slow) => SLOW_FOOD_COLOR,
        };

        commands.spawn((
            ShapeBundle::circle(
                &ShapeConfig {
                    color,
                    alpha_mode: ShapeAlphaMode::Add,
                    transform: Transform::from_translation(
                        cell_center(event.position).extend(Z_FOOD + 0.5),
                    ),
                    ..ShapeConfig::default_2d()
                },
                CELL_SIZE / 2.0,
            ),
            PulseEffect {
                timer: Timer::from_seconds(0.3, TimerMode::Once),
                start_scale: 1.0,
                end_scale: 2.5,
            },
        ));
    }
}

/// System to trigger camera shake on game over.
fn trigger_camera_shake_on_game_over(
    mut game_over_reader: MessageReader<GameOverEvent>,
    mut camera_shake: ResMut<CameraShake>,
) {
    if game_over_reader.read().next().is_some() {
        camera_shake.timer = Timer::from_seconds(0.5, TimerMode::Once);
        camera_shake.intensity = 8.0;
    }
}

/// System to apply camera shake effect.
fn camera_shake_system(
    time: Res<Time>,
    mut camera_shake: ResMut<CameraShake>,
    mut camera_query: Query<&mut Transform, With<Camera2d>>,
) {
    if !camera_shake.timer.is_finished() {
        camera_shake.timer.tick(time.delta());

        if let Ok(mut camera_transform) = camera_query.single_mut() {
            if camera_shake.timer.is_finished() {
                // Reset camera position when shake is done
                camera_transform.translation.x = 0.0;
                camera_transform.translation.y = 0.0;
            } else {
                let progress = camera_shake.timer.fraction();
                let decay = 1.0 - progress;

                let mut rng = rand::rng();
                let shake_x = (rng.random::<f32>() - 0.5) * camera_shake.intensity * decay;
                let shake_y = (rng.random::<f32>() - 0.5) * camera_shake.intensity * decay;

                camera_transform.translation.x = shake_x;
                camera_transform.translation.y = shake_y;
            }
        }
    }
}

/// System to animate growing segments.
fn growing_segment_animation(
    mut commands: Commands,
    time: Res<Time>,
    mut growing: Query<(Entity, &mut Transform, &mut GrowingSegment)>,
) {
    for (entity, mut transform, mut growing_segment) in growing.iter_mut() {
        growing_segment.timer.tick(time.delta());

        if growing_segment.timer.is_finished() {
            transform.scale = Vec3::splat(1.0);
            commands.entity(entity).remove::<GrowingSegment>();
        } else {
            let progress = growing_segment.timer.fraction();
            // Use ease-out for a bouncy effect
            let scale = progress * (2.0 - progress);
            transform.scale = Vec3::splat(scale);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_center_corners() {
        let half = ARENA_WIDTH as f32 / 2.0 * CELL_SIZE - CELL_SIZE / 2.0;

        assert_eq!(cell_center(Position::new(0, 0)), Vec2::new(-half, half));
        assert_eq!(cell_center(Position::new(19, 19)), Vec2::new(half, -half));
    }

    #[test]
    fn test_moving_down_lowers_world_y() {
        let top = cell_center(Position::new(5, 5));
        let below = cell_center(Position::new(5, 5).step(Direction::Down));
        assert!(below.y < top.y);
        assert_eq!(below.x, top.x);
    }
}
