use std::error::Error;
use std::fmt;

use super::status::CombatOutcome;

// =============================================================================
// SessionError
// =============================================================================

/// Failure modes of combat session state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// A mutation was attempted on a session that already carries a terminal
    /// outcome. The stored outcome is never overwritten.
    AlreadyClosed {
        outcome: CombatOutcome,
    },

    /// Finalization was attempted before the session reached a terminal
    /// outcome.
    NotClosed,
}

impl SessionError {
    pub fn message(&self) -> String {
        match self {
            Self::AlreadyClosed { outcome } => {
                format!("session is already closed with outcome '{}'", outcome)
            }
            Self::NotClosed => "session has no terminal outcome to finalize".to_string(),
        }
    }

    #[must_use]
    pub const fn already_closed(outcome: CombatOutcome) -> Self {
        Self::AlreadyClosed { outcome }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.message())
    }
}

impl Error for SessionError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn already_closed_names_the_outcome() {
        let error = SessionError::already_closed(CombatOutcome::Victory);
        assert!(error.message().contains("'victory'"));
    }

    #[rstest]
    fn not_closed_has_a_stable_message() {
        assert!(SessionError::NotClosed.message().contains("no terminal outcome"));
    }
}
