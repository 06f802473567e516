//! Request DTOs for API endpoints.

use serde::{Deserialize, Serialize};

// =============================================================================
// Combat Requests
// =============================================================================

/// Request body for starting a combat session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartCombatRequest {
    /// The player starting the fight.
    pub user_id: String,

    /// The location the fight takes place in.
    pub location_id: String,

    /// Difficulty tier; scales the spawned enemy's stats.
    pub combat_level: u32,
}

/// Request body for one attack turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackRequest {
    /// Normalized tap position in `[0, 1]`.
    pub tap_position: f64,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn start_combat_request_deserializes() {
        let json = r#"{"user_id":"u","location_id":"l","combat_level":3}"#;
        let request: StartCombatRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.combat_level, 3);
    }

    #[rstest]
    fn attack_request_deserializes() {
        let request: AttackRequest = serde_json::from_str(r#"{"tap_position":0.42}"#).unwrap();
        assert_eq!(request.tap_position, 0.42);
    }

    #[rstest]
    fn attack_request_rejects_missing_tap() {
        assert!(serde_json::from_str::<AttackRequest>("{}").is_err());
    }
}
