use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Speed reduction per cleared row.
const SPEED_STEP_PER_LINE: i64 = 10;

/// Progress counters of one game.
///
/// - **Ticks**: automatic drop cycles processed so far
/// - **Lines cleared**: the score, one point per removed row
/// - **Speed**: drop interval scalar in milliseconds, lowered by 10 per row
/// - **Locked pieces** and a histogram of rows removed per lock
///
/// The speed scalar has no floor of its own and may go to zero or below after
/// enough clears. [`GameStats::drop_interval`] is what a timer should use; it
/// clamps the scalar to a minimum interval.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new(1000);
/// stats.complete_lock(2);
///
/// assert_eq!(stats.lines_cleared(), 2);
/// assert_eq!(stats.speed(), 980);
/// assert_eq!(
///     stats.drop_interval(Duration::from_millis(100)),
///     Duration::from_millis(980)
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    tick: u64,
    lines_cleared: usize,
    speed: i64,
    locked_pieces: usize,
    line_cleared_counter: [usize; 5],
}

impl GameStats {
    #[must_use]
    pub const fn new(initial_speed: i64) -> Self {
        Self {
            tick: 0,
            lines_cleared: 0,
            speed: initial_speed,
            locked_pieces: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Total rows removed since the game started.
    #[must_use]
    pub const fn lines_cleared(&self) -> usize {
        self.lines_cleared
    }

    /// Raw speed scalar. Not clamped.
    #[must_use]
    pub const fn speed(&self) -> i64 {
        self.speed
    }

    #[must_use]
    pub const fn locked_pieces(&self) -> usize {
        self.locked_pieces
    }

    /// Number of locks that removed `[0]` none, `[1]` one, ... `[4]` four rows.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Interval between automatic drops, never shorter than `min`.
    #[must_use]
    pub fn drop_interval(&self, min: Duration) -> Duration {
        let millis = u64::try_from(self.speed).unwrap_or(0);
        Duration::from_millis(millis).max(min)
    }

    pub(crate) fn advance_tick(&mut self) {
        self.tick += 1;
    }

    /// Records a lock that removed `cleared_lines` rows.
    pub fn complete_lock(&mut self, cleared_lines: usize) {
        self.locked_pieces += 1;
        if let Some(count) = self.line_cleared_counter.get_mut(cleared_lines) {
            *count += 1;
        }
        if cleared_lines > 0 {
            self.lines_cleared += cleared_lines;
            let step = i64::try_from(cleared_lines).unwrap_or(i64::MAX);
            self.speed = self
                .speed
                .saturating_sub(step.saturating_mul(SPEED_STEP_PER_LINE));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats() {
        let stats = GameStats::new(1000);
        assert_eq!(stats.tick(), 0);
        assert_eq!(stats.lines_cleared(), 0);
        assert_eq!(stats.speed(), 1000);
        assert_eq!(stats.locked_pieces(), 0);
    }

    #[test]
    fn test_lock_without_clear_keeps_speed() {
        let mut stats = GameStats::new(1000);
        stats.complete_lock(0);
        assert_eq!(stats.speed(), 1000);
        assert_eq!(stats.locked_pieces(), 1);
        assert_eq!(stats.line_cleared_counter(), &[1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_speed_drops_ten_per_line() {
        let mut stats = GameStats::new(1000);
        stats.complete_lock(1);
        stats.complete_lock(4);
        assert_eq!(stats.lines_cleared(), 5);
        assert_eq!(stats.speed(), 950);
        assert_eq!(stats.line_cleared_counter(), &[0, 1, 0, 0, 1]);
    }

    #[test]
    fn test_speed_is_unbounded_but_interval_is_clamped() {
        let mut stats = GameStats::new(20);
        stats.complete_lock(3);
        assert_eq!(stats.speed(), -10);

        let min = Duration::from_millis(100);
        assert_eq!(stats.drop_interval(min), min);
    }

    #[test]
    fn test_tick_is_monotonic() {
        let mut stats = GameStats::new(1000);
        stats.advance_tick();
        stats.advance_tick();
        assert_eq!(stats.tick(), 2);
    }
}
