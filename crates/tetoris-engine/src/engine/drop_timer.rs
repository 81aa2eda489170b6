use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Gravity interval in milliseconds, indexed by `level - 1`.
///
/// Levels beyond the table keep the last (fastest) interval.
pub const LEVEL_SPEED_MS: [u64; 11] = [800, 650, 500, 400, 300, 250, 200, 150, 100, 80, 50];

/// Time between gravity ticks at `level`.
///
/// Level 0 is treated as level 1.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use tetoris_engine::drop_interval;
///
/// assert_eq!(drop_interval(1), Duration::from_millis(800));
/// assert_eq!(drop_interval(11), Duration::from_millis(50));
/// assert_eq!(drop_interval(40), Duration::from_millis(50));
/// ```
#[must_use]
pub fn drop_interval(level: usize) -> Duration {
    let index = level.saturating_sub(1).min(LEVEL_SPEED_MS.len() - 1);
    Duration::from_millis(LEVEL_SPEED_MS[index])
}

/// Whether gravity ticks are currently delivered.
///
/// An external scheduler runs a repeating timer only while the state is
/// [`DropState::Running`], re-arming it whenever the level (and so the interval) changes.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum DropState {
    #[default]
    Running,
    Paused,
    GameOver,
}

impl DropState {
    /// Swaps `Running` and `Paused`. `GameOver` stays as it is.
    pub fn toggle_pause(&mut self) {
        *self = match *self {
            Self::Running => Self::Paused,
            Self::Paused => Self::Running,
            Self::GameOver => Self::GameOver,
        };
    }
}
