//! Tick transition: movement, collision, feeding, scoring and leveling.

use rand::Rng;

use super::placement::{place_food, place_special_food};
use super::{
    BONUS_POINTS, FOOD_POINTS, LEVEL_UP_SPEEDUP_MS, MIN_INTERVAL_MS, POINTS_PER_LEVEL, Phase,
    Position, SLOW_DOWN_MS, SPECIAL_FOOD_CHANCE, SPECIAL_FOOD_PERIOD, Session, SpecialFood,
    SpecialKind,
};

/// Transient text shown where something was eaten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScorePopup {
    pub position: Position,
    pub text: String,
}

/// Everything observable that happened during one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickEvent {
    SpecialFoodSpawned(SpecialFood),
    SpecialFoodExpired(Position),
    FoodEaten {
        popup: ScorePopup,
    },
    SpecialFoodEaten {
        kind: SpecialKind,
        popup: ScorePopup,
    },
    LevelUp {
        level: u32,
        interval_ms: u64,
    },
    GameOver {
        score: u32,
        new_record: bool,
    },
}

/// Advances `session` by one tick.
///
/// A collision ends the game and leaves the snake where it was; nothing after
/// the collision check applies on that tick.
pub fn advance<R: Rng>(session: &mut Session, rng: &mut R) -> Vec<TickEvent> {
    let mut events = Vec::new();
    if session.phase != Phase::Playing {
        return events;
    }

    session.move_count += 1;

    if session.move_count % SPECIAL_FOOD_PERIOD == 0
        && session.special_food.is_none()
        && rng.random_bool(SPECIAL_FOOD_CHANCE)
        && let Some(special) = place_special_food(rng, &session.snake, session.food)
    {
        session.special_food = Some(special);
        events.push(TickEvent::SpecialFoodSpawned(special));
    }

    if let Some(special) = session.special_food.as_mut() {
        special.ticks_left = special.ticks_left.saturating_sub(1);
        if special.ticks_left == 0 {
            let position = special.position;
            session.special_food = None;
            events.push(TickEvent::SpecialFoodExpired(position));
        }
    }

    let head = session.head().step(session.direction);
    if !head.in_bounds() || session.snake.contains(&head) {
        session.phase = Phase::GameOver;
        let new_record = session.score > session.high_score;
        if new_record {
            session.high_score = session.score;
        }
        events.push(TickEvent::GameOver {
            score: session.score,
            new_record,
        });
        return events;
    }

    session.snake.push_front(head);
    session.heading = session.direction;
    let mut fed = false;

    if head.collides_with(&session.food) {
        let points = session.difficulty.points(FOOD_POINTS);
        session.score += points;
        if session.score > 0 && session.score % POINTS_PER_LEVEL == 0 {
            session.level += 1;
            session.interval_ms = session
                .interval_ms
                .saturating_sub(LEVEL_UP_SPEEDUP_MS)
                .max(MIN_INTERVAL_MS);
            events.push(TickEvent::LevelUp {
                level: session.level,
                interval_ms: session.interval_ms,
            });
        }
        if let Some(food) = place_food(rng, &session.snake) {
            session.food = food;
        }
        events.push(TickEvent::FoodEaten {
            popup: ScorePopup {
                position: head,
                text: format!("+{points}"),
            },
        });
        fed = true;
    }

    if let Some(special) = session.special_food.filter(|s| s.position.collides_with(&head)) {
        let text = match special.kind {
            SpecialKind::Bonus => {
                let points = session.difficulty.points(BONUS_POINTS);
                session.score += points;
                format!("+{points} BONUS!")
            }
            SpecialKind::Slow => {
                session.interval_ms += SLOW_DOWN_MS;
                "SLOW!".to_string()
            }
        };
        session.special_food = None;
        events.push(TickEvent::SpecialFoodEaten {
            kind: special.kind,
            popup: ScorePopup {
                position: head,
                text,
            },
        });
        fed = true;
    }

    if !fed {
        session.snake.pop_back();
    }

    events
}
