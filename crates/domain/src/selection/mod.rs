//! Weighted random selection.
//!
//! A single generic draw primitive backs both enemy spawning and loot
//! generation: given candidates with non-negative weights and a uniform
//! [`Roll`], each candidate is selected with probability proportional to its
//! weight. An all-zero pool is a content bug and fails loudly instead of
//! degrading to a uniform draw.

pub mod errors;

pub use errors::SelectionError;

use crate::common::Roll;

// =============================================================================
// Weighted draw
// =============================================================================

/// Draws one candidate from a weighted list.
///
/// The roll is mapped onto the cumulative weight line: a candidate owning the
/// interval `[cumulative_before, cumulative_before + weight)` is selected when
/// the scaled roll lands inside it. The last positively weighted candidate
/// absorbs any floating-point residue at the top of the line, so the function
/// is total for every roll in `[0, 1)`.
///
/// # Errors
///
/// - [`SelectionError::EmptyPool`] for an empty candidate list.
/// - [`SelectionError::InvalidWeight`] for a negative or non-finite weight.
/// - [`SelectionError::ZeroTotalWeight`] when every weight is zero.
///
/// # Examples
///
/// ```
/// use skirmish_domain::common::Roll;
/// use skirmish_domain::selection::draw_weighted;
///
/// let pool = [("a", 100.0), ("b", 0.0)];
/// let picked = draw_weighted(&pool, Roll::new(0.9).unwrap()).unwrap();
/// assert_eq!(*picked, "a");
/// ```
pub fn draw_weighted<'a, T>(
    candidates: &'a [(T, f64)],
    roll: Roll,
) -> Result<&'a T, SelectionError> {
    if candidates.is_empty() {
        return Err(SelectionError::empty_pool());
    }

    for (index, (_, weight)) in candidates.iter().enumerate() {
        if !weight.is_finite() || *weight < 0.0 {
            return Err(SelectionError::invalid_weight(index, *weight));
        }
    }

    let total: f64 = candidates.iter().map(|(_, weight)| weight).sum();
    if total <= 0.0 {
        return Err(SelectionError::zero_total_weight(candidates.len()));
    }

    let target = roll.value() * total;
    let mut cumulative = 0.0;
    let mut fallback = None;

    for (candidate, weight) in candidates {
        if *weight <= 0.0 {
            continue;
        }
        cumulative += weight;
        fallback = Some(candidate);
        if target < cumulative {
            return Ok(candidate);
        }
    }

    // Floating-point residue: the scaled roll landed at or past the summed
    // total. The last reachable candidate owns that edge.
    Ok(fallback.expect("total weight is positive, so at least one candidate is reachable"))
}

// =============================================================================
// Tests
// =============================================================================
