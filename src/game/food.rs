use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::state::{Position, Snake};

/// Random draws tried before falling back to scanning the free cells
const MAX_RANDOM_ATTEMPTS: usize = 64;

/// Places food uniformly over the cells not covered by the snake
#[derive(Debug, Clone)]
pub struct FoodSpawner {
    rng: StdRng,
}

impl FoodSpawner {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Pick a free cell, or None when the snake covers the whole grid.
    ///
    /// Rejection sampling handles the common sparse board. Once the attempts run
    /// out the free cells are enumerated and one is drawn directly, so a nearly
    /// full board costs a single O(width * height) scan instead of an unbounded retry.
    pub fn spawn(&mut self, width: usize, height: usize, snake: &Snake) -> Option<Position> {
        if width == 0 || height == 0 || snake.len() >= width.saturating_mul(height) {
            return None;
        }

        for _ in 0..MAX_RANDOM_ATTEMPTS {
            let x = self.rng.gen_range(0..width) as i32;
            let y = self.rng.gen_range(0..height) as i32;
            let pos = Position::new(x, y);

            if !snake.contains(pos) {
                return Some(pos);
            }
        }

        let free: Vec<Position> = (0..height as i32)
            .flat_map(|y| (0..width as i32).map(move |x| Position::new(x, y)))
            .filter(|&pos| !snake.contains(pos))
            .collect();
        free.choose(&mut self.rng).copied()
    }
}
