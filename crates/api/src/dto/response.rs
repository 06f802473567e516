//! Response DTOs for API endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Combat Responses
// =============================================================================

/// State of a combat session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatSessionResponse {
    pub combat_id: String,

    pub user_id: String,

    pub location_id: String,

    pub enemy_type_id: String,

    pub combat_level: u32,

    pub player_hp: u32,

    pub enemy_hp: u32,

    pub turn_number: u32,

    /// `None` while the fight is ongoing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
}

/// Result of one attack turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackResponse {
    /// The hit zone the tap landed in.
    pub zone: String,

    /// Damage dealt to the enemy this turn.
    pub damage_dealt: u32,

    /// Damage the player received this turn.
    pub damage_taken: u32,

    /// The session state after the turn.
    pub session: CombatSessionResponse,
}

/// Result of completing a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub outcome: String,

    /// Loot granted on the first finalization of a victory; `None` on every
    /// other outcome and on replayed completions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loot: Option<Vec<LootDropResponse>>,
}

/// One granted loot drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootDropResponse {
    pub kind: String,

    pub lootable_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    pub quantity: u32,
}

// =============================================================================
// History Responses
// =============================================================================

/// A player's attempt and streak tallies at one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub user_id: String,

    pub location_id: String,

    pub total_attempts: u64,

    pub victories: u64,

    pub defeats: u64,

    pub current_streak: u32,

    pub longest_streak: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_attempt: Option<DateTime<Utc>>,
}

// =============================================================================
// Operational Responses
// =============================================================================

/// Result of an expiry sweep run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepResponse {
    pub expired_sessions: usize,
}

/// Health check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    #[must_use]
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

// =============================================================================
// Error Response
// =============================================================================

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error_code: String,

    pub message: String,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn ongoing_session_omits_the_outcome_field() {
        let response = CombatSessionResponse {
            combat_id: "c".to_string(),
            user_id: "u".to_string(),
            location_id: "l".to_string(),
            enemy_type_id: "e".to_string(),
            combat_level: 1,
            player_hp: 100,
            enemy_hp: 50,
            turn_number: 0,
            outcome: None,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("outcome"));
    }

    #[rstest]
    fn item_drop_omits_the_style_field() {
        let drop = LootDropResponse {
            kind: "item".to_string(),
            lootable_id: "x".to_string(),
            style: None,
            quantity: 1,
        };
        let json = serde_json::to_string(&drop).unwrap();
        assert!(!json.contains("style"));
    }

    #[rstest]
    fn error_response_round_trips() {
        let error = ErrorResponse::new("CONFLICT", "already exists");
        let json = serde_json::to_string(&error).unwrap();
        let parsed: ErrorResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, error);
    }
}
