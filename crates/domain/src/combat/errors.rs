use std::error::Error;
use std::fmt;

// =============================================================================
// BandConfigError
// =============================================================================

/// Failure modes of weapon band configuration.
///
/// Band configs come from equipment content; a broken one is a data-integrity
/// failure, never something to silently repair.
#[derive(Debug, Clone, PartialEq)]
pub enum BandConfigError {
    /// The five band widths sum past the full circle.
    ExceedsCircle {
        total: f64,
    },

    /// A band carried a negative or non-finite width.
    InvalidBand {
        band: &'static str,
        value: f64,
    },

    /// Every band is zero wide; the weapon has no hit geometry at all.
    Degenerate,
}

impl BandConfigError {
    pub fn message(&self) -> String {
        match self {
            Self::ExceedsCircle { total } => {
                format!("band widths sum to {} degrees, exceeding the 360 degree circle", total)
            }
            Self::InvalidBand { band, value } => {
                format!("band '{}' has invalid width {}", band, value)
            }
            Self::Degenerate => "every band is zero degrees wide".to_string(),
        }
    }

    #[must_use]
    pub const fn exceeds_circle(total: f64) -> Self {
        Self::ExceedsCircle { total }
    }

    #[must_use]
    pub const fn invalid_band(band: &'static str, value: f64) -> Self {
        Self::InvalidBand { band, value }
    }
}

impl fmt::Display for BandConfigError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.message())
    }
}

impl Error for BandConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn exceeds_circle_names_the_total() {
        let error = BandConfigError::exceeds_circle(400.0);
        assert!(error.message().contains("400"));
    }

    #[rstest]
    fn invalid_band_names_the_band() {
        let error = BandConfigError::invalid_band("crit", -1.0);
        assert!(error.message().contains("'crit'"));
    }
}
