use std::time::{Duration, Instant};

use crate::game::TerminationReason;

/// In-memory statistics for the current run of the program. Nothing is saved.
pub struct SessionMetrics {
    started_at: Instant,
    /// Frozen once the session ends
    pub elapsed_time: Duration,
    pub best_score: u32,
    pub games_played: u32,
    pub last_outcome: Option<TerminationReason>,
    in_progress: bool,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            elapsed_time: Duration::ZERO,
            best_score: 0,
            games_played: 0,
            last_outcome: None,
            in_progress: true,
        }
    }

    /// Refresh the clock while a session is in progress
    pub fn update(&mut self) {
        if self.in_progress {
            self.elapsed_time = self.started_at.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.started_at = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.in_progress = true;
    }

    pub fn on_game_over(&mut self, final_score: u32, reason: Option<TerminationReason>) {
        self.update();
        self.in_progress = false;
        self.games_played += 1;
        self.best_score = self.best_score.max(final_score);
        self.last_outcome = reason;
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = SessionMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_best_score_tracking() {
        let mut metrics = SessionMetrics::new();

        metrics.on_game_over(30, Some(TerminationReason::Wall));
        assert_eq!(metrics.best_score, 30);
        assert_eq!(metrics.games_played, 1);

        metrics.on_game_start();
        metrics.on_game_over(10, Some(TerminationReason::SelfCollision));
        assert_eq!(metrics.best_score, 30);
        assert_eq!(metrics.games_played, 2);
        assert_eq!(metrics.last_outcome, Some(TerminationReason::SelfCollision));
    }

    #[test]
    fn test_clock_stops_at_game_over() {
        let mut metrics = SessionMetrics::new();
        metrics.on_game_over(0, None);
        let frozen = metrics.elapsed_time;

        std::thread::sleep(Duration::from_millis(20));
        metrics.update();
        assert_eq!(metrics.elapsed_time, frozen);

        metrics.on_game_start();
        metrics.update();
        assert!(metrics.elapsed_time < Duration::from_millis(20));
    }
}
