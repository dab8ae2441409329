//! Random placement of food and special food on free cells.

use rand::Rng;
use std::collections::VecDeque;

use super::{
    ARENA_HEIGHT, ARENA_WIDTH, MAX_PLACEMENT_ATTEMPTS, Position, SPECIAL_FOOD_LIFETIME,
    SpecialFood, SpecialKind,
};

/// Picks a cell not covered by the snake. `None` only when the board is full.
pub fn place_food<R: Rng>(rng: &mut R, snake: &VecDeque<Position>) -> Option<Position> {
    find_free_cell(rng, |cell| snake.contains(cell))
}

/// Picks a cell covered by neither the snake nor the regular food, with a random kind.
pub fn place_special_food<R: Rng>(
    rng: &mut R,
    snake: &VecDeque<Position>,
    food: Position,
) -> Option<SpecialFood> {
    let position = find_free_cell(rng, |cell| *cell == food || snake.contains(cell))?;
    let kind = if rng.random_bool(0.5) {
        SpecialKind::Bonus
    } else {
        SpecialKind::Slow
    };

    Some(SpecialFood {
        position,
        kind,
        ticks_left: SPECIAL_FOOD_LIFETIME,
    })
}

fn find_free_cell<R, F>(rng: &mut R, occupied: F) -> Option<Position>
where
    R: Rng,
    F: Fn(&Position) -> bool,
{
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let candidate = Position::new(
            rng.random_range(0..ARENA_WIDTH as i32),
            rng.random_range(0..ARENA_HEIGHT as i32),
        );
        if !occupied(&candidate) {
            return Some(candidate);
        }
    }

    // Rejection sampling starved; choose among the remaining cells directly.
    let free: Vec<Position> = (0..ARENA_HEIGHT as i32)
        .flat_map(|y| (0..ARENA_WIDTH as i32).map(move |x| Position::new(x, y)))
        .filter(|cell| !occupied(cell))
        .collect();

    if free.is_empty() {
        None
    } else {
        Some(free[rng.random_range(0..free.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn all_cells_except(skip: &[Position]) -> VecDeque<Position> {
        (0..ARENA_HEIGHT as i32)
            .flat_map(|y| (0..ARENA_WIDTH as i32).map(move |x| Position::new(x, y)))
            .filter(|cell| !skip.contains(cell))
            .collect()
    }

    #[test]
    fn test_food_never_lands_on_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake: VecDeque<Position> = (0..15).map(|x| Position::new(x, 3)).collect();

        for _ in 0..500 {
            let food = place_food(&mut rng, &snake).unwrap();
            assert!(food.in_bounds());
            assert!(!snake.contains(&food));
        }
    }

    #[test]
    fn test_special_food_avoids_snake_and_food() {
        let mut rng = StdRng::seed_from_u64(11);
        let snake: VecDeque<Position> = (0..20).map(|y| Position::new(4, y)).collect();
        let food = Position::new(5, 5);

        for _ in 0..500 {
            let special = place_special_food(&mut rng, &snake, food).unwrap();
            assert!(special.position.in_bounds());
            assert_ne!(special.position, food);
            assert!(!snake.contains(&special.position));
            assert_eq!(special.ticks_left, SPECIAL_FOOD_LIFETIME);
        }
    }

    #[test]
    fn test_special_food_kinds_are_both_reachable() {
        let mut rng = StdRng::seed_from_u64(3);
        let snake = VecDeque::from([Position::new(0, 0)]);
        let kinds: Vec<SpecialKind> = (0..100)
            .filter_map(|_| place_special_food(&mut rng, &snake, Position::new(1, 1)))
            .map(|special| special.kind)
            .collect();

        assert!(kinds.contains(&SpecialKind::Bonus));
        assert!(kinds.contains(&SpecialKind::Slow));
    }

    #[test]
    fn test_last_free_cell_is_found() {
        let mut rng = StdRng::seed_from_u64(42);
        let hole = Position::new(13, 17);
        let snake = all_cells_except(&[hole]);

        assert_eq!(place_food(&mut rng, &snake), Some(hole));
    }

    #[test]
    fn test_full_board_yields_none() {
        let mut rng = StdRng::seed_from_u64(42);
        let snake = all_cells_except(&[]);
        assert_eq!(place_food(&mut rng, &snake), None);

        let food = Position::new(2, 2);
        let snake = all_cells_except(&[food]);
        assert_eq!(place_special_food(&mut rng, &snake, food), None);
    }
}
