use std::error::Error;
use std::fmt;

// =============================================================================
// SelectionError
// =============================================================================

/// Failure modes of the weighted draw.
///
/// Every variant points at broken pool content rather than bad player input,
/// so callers surface these as configuration errors.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionError {
    /// The candidate list was empty.
    EmptyPool,

    /// Every candidate carried weight zero; the draw has no reachable outcome.
    ZeroTotalWeight {
        candidate_count: usize,
    },

    /// A candidate carried a negative or non-finite weight.
    InvalidWeight {
        index: usize,
        weight: f64,
    },
}

impl SelectionError {
    pub fn message(&self) -> String {
        match self {
            Self::EmptyPool => "cannot draw from an empty candidate pool".to_string(),
            Self::ZeroTotalWeight { candidate_count } => {
                format!(
                    "all {} candidates have weight zero; refusing to fall back to a uniform draw",
                    candidate_count
                )
            }
            Self::InvalidWeight { index, weight } => {
                format!("candidate at index {} has invalid weight {}", index, weight)
            }
        }
    }

    #[must_use]
    pub const fn empty_pool() -> Self {
        Self::EmptyPool
    }

    #[must_use]
    pub const fn zero_total_weight(candidate_count: usize) -> Self {
        Self::ZeroTotalWeight { candidate_count }
    }

    #[must_use]
    pub const fn invalid_weight(index: usize, weight: f64) -> Self {
        Self::InvalidWeight { index, weight }
    }
}

impl fmt::Display for SelectionError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.message())
    }
}

impl Error for SelectionError {}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn zero_total_weight_message_names_the_count() {
        let error = SelectionError::zero_total_weight(4);
        assert!(error.message().contains("all 4 candidates"));
    }

    #[rstest]
    fn invalid_weight_message_names_the_index() {
        let error = SelectionError::invalid_weight(2, -3.5);
        assert!(error.message().contains("index 2"));
        assert!(error.message().contains("-3.5"));
    }
}
