use crate::error::WalkerError;

/// Tuning for a [`Walker`](super::Walker).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkerConfig {
    max_crossings: usize,
}

impl WalkerConfig {
    /// Junction crossings allowed per move when nothing else is configured.
    pub const DEFAULT_MAX_CROSSINGS: usize = 1024;

    /// Creates a configuration allowing at most `max_crossings` junction
    /// crossings in a single `move_by` or `jump`.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_crossings` is zero.
    pub fn new(max_crossings: usize) -> Result<Self, WalkerError> {
        if max_crossings == 0 {
            return Err(WalkerError::InvalidParameters(
                "max_crossings must be positive".to_owned(),
            ));
        }
        Ok(Self { max_crossings })
    }

    /// Returns the crossing cap.
    #[must_use]
    pub fn max_crossings(&self) -> usize {
        self.max_crossings
    }
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            max_crossings: Self::DEFAULT_MAX_CROSSINGS,
        }
    }
}
