//! Food placement on free grid cells

use rand::Rng;
use std::collections::HashSet;

use super::error::{GameError, GameResult};
use super::state::{Food, FoodType, Position};

/// Pick a uniformly random free cell for a new food item.
///
/// `occupied` lists every cell food must avoid (snake segments and
/// obstacles). Fails with [`GameError::NoSpaceAvailable`] when the grid
/// has no free cell left.
pub fn generate_food<'a, R, I>(
    grid_size: usize,
    occupied: I,
    food_type: FoodType,
    rng: &mut R,
) -> GameResult<Food>
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = &'a Position>,
{
    let taken: HashSet<Position> = occupied.into_iter().copied().collect();
    let size = grid_size as i32;

    let available: Vec<Position> = (0..size)
        .flat_map(|x| (0..size).map(move |y| Position::new(x, y)))
        .filter(|pos| !taken.contains(pos))
        .collect();

    if available.is_empty() {
        return Err(GameError::NoSpaceAvailable { grid_size });
    }

    let position = available[rng.gen_range(0..available.len())];
    Ok(Food::new(position, food_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_food_avoids_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = vec![Position::new(10, 10)];

        let food = generate_food(20, &snake, FoodType::Regular, &mut rng).unwrap();

        assert!(!snake.contains(&food.position));
        assert!(food.position.is_on_grid(20));
        assert_eq!(food.food_type, FoodType::Regular);
    }

    #[test]
    fn test_food_never_lands_on_occupied_cells() {
        let mut rng = StdRng::seed_from_u64(42);
        // Leave a single column free on a 4x4 grid
        let occupied: Vec<Position> = (0..3)
            .flat_map(|x| (0..4).map(move |y| Position::new(x, y)))
            .collect();

        for _ in 0..50 {
            let food = generate_food(4, &occupied, FoodType::Golden, &mut rng).unwrap();
            assert_eq!(food.position.x, 3);
            assert_eq!(food.food_type, FoodType::Golden);
        }
    }

    #[test]
    fn test_last_free_cell_is_chosen() {
        let mut rng = StdRng::seed_from_u64(1);
        let occupied = vec![Position::new(0, 0), Position::new(1, 0), Position::new(0, 1)];

        let food = generate_food(2, &occupied, FoodType::Regular, &mut rng).unwrap();
        assert_eq!(food.position, Position::new(1, 1));
    }

    #[test]
    fn test_full_grid_reports_no_space() {
        let mut rng = StdRng::seed_from_u64(3);
        let occupied = vec![
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(0, 1),
            Position::new(1, 1),
        ];

        let result = generate_food(2, &occupied, FoodType::Regular, &mut rng);
        assert_eq!(result, Err(GameError::NoSpaceAvailable { grid_size: 2 }));
    }
}
