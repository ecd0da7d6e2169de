//! Fixed-step simulation tick
//!
//! Advances one level by exactly one step: apply steering, advance the blink
//! clock, move the head, resolve collisions, then resolve food.

use rand::Rng;

use super::food;
use super::grid::Cell;
use super::snake::Snake;
use super::state::{DeathCause, LevelPhase, LevelState, Rules};
use crate::level::LevelData;

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Level still in progress; `ate` is set when food was consumed this tick
    Running { ate: bool },
    /// Snake collided; the head that caused it stays in the body
    Died(DeathCause),
    /// Food threshold reached (food was consumed this tick)
    LevelComplete,
}

impl TickOutcome {
    /// Whether this tick consumed food (and so earned a point)
    pub fn ate_food(self) -> bool {
        matches!(self, TickOutcome::Running { ate: true } | TickOutcome::LevelComplete)
    }
}

/// Collision check for a head that has already been pushed onto `snake`.
///
/// First match wins: self, bounds, static obstacle, blinking obstacle (only
/// while `hazard_active`).
pub fn check_collision(
    snake: &Snake,
    head: Cell,
    level: &LevelData,
    hazard_active: bool,
) -> Option<DeathCause> {
    if snake.occupies_excluding_head(head) {
        Some(DeathCause::SelfCollision)
    } else if !level.in_bounds(head) {
        Some(DeathCause::OutOfBounds)
    } else if level.obstacles.contains(&head) {
        Some(DeathCause::Obstacle)
    } else if hazard_active && level.blinking.contains(&head) {
        Some(DeathCause::BlinkingObstacle)
    } else {
        None
    }
}

/// Advance the level by one tick
pub fn tick<R: Rng>(
    state: &mut LevelState,
    level: &LevelData,
    rules: &Rules,
    rng: &mut R,
) -> TickOutcome {
    // Finished levels stay finished until the controller resets them
    match state.phase {
        LevelPhase::Died(cause) => return TickOutcome::Died(cause),
        LevelPhase::LevelComplete => return TickOutcome::LevelComplete,
        LevelPhase::Running => {}
    }

    if let Some(direction) = state.pending_direction.take() {
        state.direction = direction;
    }

    state.time_ticks += 1;
    state.blink.tick();
    // Sampled once; drawing reads the same stored value
    state.hazard_active = state.blink.is_hazard_active();

    let new_head = state.snake.head().step(state.direction);
    state.snake.advance(new_head);

    if let Some(cause) = check_collision(&state.snake, new_head, level, state.hazard_active) {
        log::debug!("Died at {:?} ({:?}) on tick {}", new_head, cause, state.time_ticks);
        state.phase = LevelPhase::Died(cause);
        return TickOutcome::Died(cause);
    }

    if new_head != state.food {
        state.snake.drop_tail();
        return TickOutcome::Running { ate: false };
    }

    state.food_eaten += 1;
    if state.food_eaten >= rules.food_per_level {
        state.phase = LevelPhase::LevelComplete;
        return TickOutcome::LevelComplete;
    }

    state.food = food::place(&state.snake, level, rng);
    TickOutcome::Running { ate: true }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Direction;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rules(food_per_level: u32) -> Rules {
        Rules {
            food_per_level,
            blink_interval: 15,
            blinking_enabled: true,
        }
    }

    fn start_state(level: &LevelData, rules: &Rules) -> (LevelState, Pcg32) {
        let mut rng = Pcg32::seed_from_u64(12345);
        let state = LevelState::new(level, rules, &mut rng);
        (state, rng)
    }

    fn level_10x10() -> LevelData {
        let mut level = LevelData::empty(10, 10);
        level.start = Cell::new(1, 1);
        level
    }

    #[test]
    fn test_eat_food_scenario() {
        let level = level_10x10();
        let rules = rules(2);
        let (mut state, mut rng) = start_state(&level, &rules);
        state.food = Cell::new(4, 1);

        assert_eq!(tick(&mut state, &level, &rules, &mut rng), TickOutcome::Running { ate: false });
        assert_eq!(tick(&mut state, &level, &rules, &mut rng), TickOutcome::Running { ate: false });
        assert_eq!(state.snake.len(), 1);

        let outcome = tick(&mut state, &level, &rules, &mut rng);
        assert_eq!(outcome, TickOutcome::Running { ate: true });
        assert!(outcome.ate_food());
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.snake.head(), Cell::new(4, 1));
        assert_eq!(state.food_eaten, 1);
        assert!(!state.snake.contains(state.food));
    }

    #[test]
    fn test_threshold_completes_level_once() {
        let level = level_10x10();
        let rules = rules(1);
        let (mut state, mut rng) = start_state(&level, &rules);
        state.food = Cell::new(4, 1);

        tick(&mut state, &level, &rules, &mut rng);
        tick(&mut state, &level, &rules, &mut rng);
        assert_eq!(state.phase, LevelPhase::Running);
        assert_eq!(tick(&mut state, &level, &rules, &mut rng), TickOutcome::LevelComplete);
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.food_eaten, 1);

        // No further movement once complete
        let head = state.snake.head();
        assert_eq!(tick(&mut state, &level, &rules, &mut rng), TickOutcome::LevelComplete);
        assert_eq!(state.snake.head(), head);
        assert_eq!(state.food_eaten, 1);
    }

    #[test]
    fn test_wall_death_keeps_tentative_head() {
        let mut level = LevelData::empty(3, 3);
        level.start = Cell::new(2, 1);
        let rules = rules(5);
        let (mut state, mut rng) = start_state(&level, &rules);

        let outcome = tick(&mut state, &level, &rules, &mut rng);
        assert_eq!(outcome, TickOutcome::Died(DeathCause::OutOfBounds));
        assert_eq!(state.snake.head(), Cell::new(3, 1));
        assert_eq!(state.snake.len(), 2);
    }

    #[test]
    fn test_static_obstacle_kills() {
        let level = LevelData::parse("S#..\n....\n").unwrap();
        let rules = rules(5);
        let (mut state, mut rng) = start_state(&level, &rules);
        assert_eq!(
            tick(&mut state, &level, &rules, &mut rng),
            TickOutcome::Died(DeathCause::Obstacle)
        );
    }

    #[test]
    fn test_blinking_obstacle_only_kills_while_active() {
        let level = LevelData::parse("S*..\n....\n").unwrap();
        let rules = Rules {
            blink_interval: 1,
            ..rules(5)
        };

        // Interval 1: the first tick flips the hazard off before collision
        let (mut state, mut rng) = start_state(&level, &rules);
        state.food = Cell::new(3, 1);
        assert_eq!(tick(&mut state, &level, &rules, &mut rng), TickOutcome::Running { ate: false });
        assert!(!state.hazard_active);
        assert_eq!(state.snake.head(), Cell::new(1, 0));

        // Interval 2: still active on the first tick
        let rules = Rules {
            blink_interval: 2,
            ..rules
        };
        let (mut state, mut rng) = start_state(&level, &rules);
        assert_eq!(
            tick(&mut state, &level, &rules, &mut rng),
            TickOutcome::Died(DeathCause::BlinkingObstacle)
        );
        assert!(state.hazard_active);
    }

    #[test]
    fn test_blinking_disabled_is_permanent_obstacle() {
        let level = LevelData::parse("S*..\n....\n").unwrap();
        let rules = Rules {
            blink_interval: 1,
            blinking_enabled: false,
            ..rules(5)
        };
        let (mut state, mut rng) = start_state(&level, &rules);
        assert_eq!(
            tick(&mut state, &level, &rules, &mut rng),
            TickOutcome::Died(DeathCause::BlinkingObstacle)
        );
    }

    #[test]
    fn test_moving_into_vacating_tail_is_fatal() {
        let level = level_10x10();
        let rules = rules(10);
        let (mut state, mut rng) = start_state(&level, &rules);
        // Body: head (2,2), then (2,3), (1,3), tail (1,2); heading down
        state.snake = Snake::new(Cell::new(1, 2));
        for cell in [Cell::new(1, 3), Cell::new(2, 3), Cell::new(2, 2)] {
            state.snake.advance(cell);
        }
        state.direction = Direction::Up;
        state.food = Cell::new(8, 8);

        assert!(state.steer(Direction::Left));
        assert_eq!(
            tick(&mut state, &level, &rules, &mut rng),
            TickOutcome::Died(DeathCause::SelfCollision)
        );
        assert_eq!(state.snake.len(), 5);
    }

    #[test]
    fn test_self_collision_reported_before_bounds() {
        // Head already sits outside the grid on a body cell: self wins
        let level = level_10x10();
        let head = Cell::new(-1, 0);
        let mut snake = Snake::new(head);
        snake.advance(Cell::new(0, 0));
        snake.advance(head);
        assert_eq!(
            check_collision(&snake, head, &level, true),
            Some(DeathCause::SelfCollision)
        );
    }

    #[test]
    fn test_sentinel_food_on_full_grid_leads_to_death() {
        let level = LevelData::parse("S.\n").unwrap();
        let rules = rules(5);
        let (mut state, mut rng) = start_state(&level, &rules);
        assert_eq!(state.food, Cell::new(1, 0));

        assert_eq!(tick(&mut state, &level, &rules, &mut rng), TickOutcome::Running { ate: true });
        assert_eq!(state.food, Cell::ORIGIN);
        assert!(matches!(
            tick(&mut state, &level, &rules, &mut rng),
            TickOutcome::Died(_)
        ));
    }

    #[test]
    fn test_fixed_food_reused_after_eating() {
        let level = LevelData::parse("S.F.....\n").unwrap();
        let rules = rules(3);
        let (mut state, mut rng) = start_state(&level, &rules);
        assert_eq!(state.food, Cell::new(2, 0));

        tick(&mut state, &level, &rules, &mut rng);
        assert_eq!(tick(&mut state, &level, &rules, &mut rng), TickOutcome::Running { ate: true });
        assert_eq!(state.food, Cell::new(2, 0));
    }

    #[test]
    fn test_determinism() {
        let level = level_10x10();
        let rules = rules(50);
        let (mut a, mut rng_a) = start_state(&level, &rules);
        let (mut b, mut rng_b) = start_state(&level, &rules);

        let turns = [Direction::Down, Direction::Right, Direction::Up, Direction::Right];
        for (i, turn) in turns.iter().cycle().take(20).enumerate() {
            if i % 3 == 0 {
                a.steer(*turn);
                b.steer(*turn);
            }
            let oa = tick(&mut a, &level, &rules, &mut rng_a);
            let ob = tick(&mut b, &level, &rules, &mut rng_b);
            assert_eq!(oa, ob);
        }
        assert_eq!(a.snake, b.snake);
        assert_eq!(a.food, b.food);
    }

    proptest! {
        #[test]
        fn prop_leaving_grid_always_dies(
            width in 1u32..16,
            height in 1u32..16,
            along in 0u32..16,
            dir_index in 0usize..4,
        ) {
            let direction = Direction::ALL[dir_index];
            let start = match direction {
                Direction::Up => Cell::new((along % width) as i32, 0),
                Direction::Down => Cell::new((along % width) as i32, height as i32 - 1),
                Direction::Left => Cell::new(0, (along % height) as i32),
                Direction::Right => Cell::new(width as i32 - 1, (along % height) as i32),
            };
            let mut level = LevelData::empty(width, height);
            level.start = start;
            let rules = rules(1);
            let mut rng = Pcg32::seed_from_u64(u64::from(along));
            let mut state = LevelState::new(&level, &rules, &mut rng);
            state.direction = direction;
            // Food placed right outside is still never eaten
            state.food = start.step(direction);

            let outcome = tick(&mut state, &level, &rules, &mut rng);
            prop_assert_eq!(outcome, TickOutcome::Died(DeathCause::OutOfBounds));
        }

        #[test]
        fn prop_reversal_never_changes_direction(dir_index in 0usize..4, seed in any::<u64>()) {
            let current = Direction::ALL[dir_index];
            let mut level = LevelData::empty(20, 20);
            level.start = Cell::new(10, 10);
            let rules = rules(100);
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut state = LevelState::new(&level, &rules, &mut rng);
            state.direction = current;

            prop_assert!(!state.steer(current.opposite()));
            tick(&mut state, &level, &rules, &mut rng);
            prop_assert_eq!(state.direction, current);
        }

        #[test]
        fn prop_length_grows_only_when_eating(
            seed in any::<u64>(),
            moves in proptest::collection::vec(0usize..4, 1..40),
        ) {
            let mut level = LevelData::empty(12, 12);
            level.start = Cell::new(6, 6);
            let rules = rules(1000);
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut state = LevelState::new(&level, &rules, &mut rng);

            for m in moves {
                state.steer(Direction::ALL[m]);
                let before = state.snake.len();
                let eaten_before = state.food_eaten;
                match tick(&mut state, &level, &rules, &mut rng) {
                    TickOutcome::Running { ate: true } => {
                        prop_assert_eq!(state.snake.len(), before + 1);
                        prop_assert_eq!(state.food_eaten, eaten_before + 1);
                    }
                    TickOutcome::Running { ate: false } => {
                        prop_assert_eq!(state.snake.len(), before);
                        prop_assert_eq!(state.food_eaten, eaten_before);
                    }
                    TickOutcome::Died(_) => break,
                    TickOutcome::LevelComplete => unreachable!(),
                }
            }
        }
    }
}
