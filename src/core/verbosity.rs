//! Verbosity gate for info lines

use serde::{Deserialize, Serialize};

/// Maximum info level that is emitted.
///
/// Level 0 is the most important. A line at `level` passes when
/// `level <= threshold`; error lines are never gated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Verbosity(i32);

impl Verbosity {
    #[must_use]
    pub const fn new(threshold: i32) -> Self {
        Self(threshold)
    }

    #[must_use]
    pub const fn threshold(&self) -> i32 {
        self.0
    }

    /// Whether an info line at `level` should be written
    #[must_use]
    pub const fn enabled(&self, level: i32) -> bool {
        level <= self.0
    }
}

impl From<i32> for Verbosity {
    fn from(threshold: i32) -> Self {
        Self(threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_only_level_zero() {
        let v = Verbosity::default();
        assert!(v.enabled(0));
        assert!(!v.enabled(1));
        assert!(v.enabled(-3));
    }

    #[test]
    fn test_threshold_inclusive() {
        let v = Verbosity::new(2);
        assert!(v.enabled(2));
        assert!(!v.enabled(3));
        assert_eq!(v.threshold(), 2);
    }
}
