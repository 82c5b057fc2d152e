//! Invariants checked over long random sessions driven tick by tick

use grid_snake::game::{
    Direction, GameConfig, GridSimulation, Position, SessionState, TerminationReason,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

fn snapshot(sim: &GridSimulation) -> Vec<Position> {
    sim.body().collect()
}

const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

fn random_direction(rng: &mut StdRng) -> Direction {
    DIRECTIONS[rng.gen_range(0..DIRECTIONS.len())]
}

/// Play many seeded sessions with random steering and check every tick
#[test]
fn random_sessions_hold_invariants() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for session in 0..200u64 {
        let width = rng.gen_range(2..12);
        let height = rng.gen_range(2..12);
        let config = GameConfig::new(width, height).with_seed(session);
        let mut sim = GridSimulation::new(config.seed);
        sim.reset(&config).unwrap();

        for _ in 0..400 {
            let before = snapshot(&sim);
            let food_before = sim.food().unwrap();
            let score_before = sim.score();
            let direction_before = sim.direction();

            if rng.gen_bool(0.4) {
                let requested = random_direction(&mut rng);
                let accepted = sim.set_direction(requested);
                if let Some(current) = direction_before {
                    assert_eq!(accepted, !current.shares_axis(requested));
                }
            }

            let outcome = sim.tick();

            // Never reverse directly onto the neck
            if let (Some(old), Some(new)) = (direction_before, sim.direction()) {
                assert!(!old.is_opposite(new));
            }

            let after = snapshot(&sim);
            let Some(direction) = sim.direction() else {
                assert_eq!(after, before);
                continue;
            };
            let expected_head = before[0].moved_in_direction(direction);
            assert_eq!(after[0], expected_head);

            if outcome.ate_food {
                assert_eq!(expected_head, food_before);
                assert_eq!(after.len(), before.len() + 1);
                assert_eq!(sim.score(), score_before + config.growth_increment);
                assert_eq!(&after[1..], &before[..]);
                if let Some(food) = sim.food() {
                    assert!(!after.contains(&food));
                }
            } else {
                assert_eq!(after.len(), before.len());
                assert_eq!(sim.score(), score_before);
                assert_eq!(&after[1..], &before[..before.len() - 1]);
            }

            let out_of_bounds = !expected_head.is_within(width, height);
            let hit_body = after[1..].contains(&expected_head);
            match outcome.termination {
                Some(TerminationReason::Wall) => assert!(out_of_bounds),
                Some(TerminationReason::SelfCollision) => assert!(!out_of_bounds && hit_body),
                Some(TerminationReason::BoardFull) => assert!(sim.food().is_none()),
                None => {
                    assert!(!out_of_bounds && !hit_body);
                    assert_eq!(outcome.state, SessionState::Running);
                }
            }

            if sim.is_terminated() {
                break;
            }
        }
    }
}

#[test]
fn reset_is_idempotent_apart_from_food() {
    let config = GameConfig::new(15, 9).with_start(Position::new(3, 4));
    let mut sim = GridSimulation::new(Some(11));

    for _ in 0..20 {
        sim.reset(&config).unwrap();
        assert_eq!(sim.state(), SessionState::Running);
        assert_eq!(snapshot(&sim), vec![Position::new(3, 4)]);
        assert_eq!(sim.direction(), None);
        assert_eq!(sim.pending_direction(), None);
        assert_eq!(sim.score(), 0);
        assert_eq!(sim.termination(), None);
        assert_eq!((sim.grid_width(), sim.grid_height()), (15, 9));

        let food = sim.food().unwrap();
        assert_ne!(food, Position::new(3, 4));
        assert!(food.is_within(15, 9));
    }
}

#[test]
fn serpentine_route_reaches_first_food() {
    // Serpentine path over a 3x2 board covers every cell but the start, so the
    // first food is always eaten and the route never crosses itself
    let config = GameConfig::new(3, 2)
        .with_start(Position::new(0, 0))
        .with_seed(21);
    let mut sim = GridSimulation::new(config.seed);
    sim.reset(&config).unwrap();

    let path = [
        Direction::Right,
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Left,
    ];

    // Only steer when the route turns
    for step in path {
        if sim.direction() != Some(step) {
            assert!(sim.set_direction(step));
        }
        sim.tick();
        if sim.is_terminated() {
            break;
        }
    }

    let occupied: HashSet<Position> = sim.body().collect();
    assert_eq!(sim.snake().len(), occupied.len());
    assert!(occupied.len() >= 2);
    assert!(sim.score() >= config.growth_increment);
}
