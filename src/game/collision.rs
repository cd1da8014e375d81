use super::state::{CollisionType, Position, Snake};

/// Classify the collision of the snake's head, if any.
///
/// Self-collision is checked before obstacles. `_grid_size` is unused since
/// wrap-around keeps every coordinate on the grid.
pub fn detect_collision(
    snake: &Snake,
    _grid_size: usize,
    obstacles: &[Position],
) -> Option<CollisionType> {
    let head = snake.head();

    if snake.collides_with_body(head) {
        return Some(CollisionType::SelfCollision);
    }

    if obstacles.contains(&head) {
        return Some(CollisionType::Obstacle);
    }

    None
}

/// True when the head overlaps the body or an obstacle
pub fn is_collision(snake: &Snake, grid_size: usize, obstacles: &[Position]) -> bool {
    detect_collision(snake, grid_size, obstacles).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake(cells: &[(i32, i32)]) -> Snake {
        Snake::from_segments(cells.iter().map(|&(x, y)| Position::new(x, y)).collect())
    }

    #[test]
    fn test_no_collision() {
        let s = snake(&[(5, 5), (4, 5), (3, 5)]);
        assert!(!is_collision(&s, 20, &[Position::new(9, 9)]));
        assert_eq!(detect_collision(&s, 20, &[]), None);
    }

    #[test]
    fn test_head_on_tail_segment() {
        let s = snake(&[(5, 5), (5, 6), (6, 6), (6, 5), (5, 5)]);
        assert!(is_collision(&s, 20, &[]));
        assert_eq!(
            detect_collision(&s, 20, &[]),
            Some(CollisionType::SelfCollision)
        );
    }

    #[test]
    fn test_head_on_obstacle() {
        let s = snake(&[(2, 2), (1, 2)]);
        let obstacles = [Position::new(2, 2)];
        assert!(is_collision(&s, 20, &obstacles));
        assert_eq!(
            detect_collision(&s, 20, &obstacles),
            Some(CollisionType::Obstacle)
        );
    }

    #[test]
    fn test_single_segment_snake_never_self_collides() {
        let s = snake(&[(0, 0)]);
        assert!(!is_collision(&s, 1, &[]));
    }
}
