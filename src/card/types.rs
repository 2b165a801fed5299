use serde::{Deserialize, Serialize};
use strum::Display;

/// The closed set of card content types.
///
/// Each variant carries its own action semantics in the router table;
/// structurally similar variants intentionally diverge (a friend card's
/// down-swipe shares, a friend-request card's does nothing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CardVariant {
    Friend,
    FriendRequest,
    PublicProfile,
    Prediction,
    ChallengeSubmission,
    Lesson,
}

/// One card in a deck. Immutable once placed; content changes replace the
/// card wholesale. The payload is opaque to the engine — the host renders it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub variant: CardVariant,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl Card {
    pub fn new(id: impl Into<String>, variant: CardVariant) -> Self {
        Self {
            id: id.into(),
            variant,
            payload: serde_json::Value::Null,
        }
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_displays_snake_case() {
        assert_eq!(CardVariant::FriendRequest.to_string(), "friend_request");
        assert_eq!(
            CardVariant::ChallengeSubmission.to_string(),
            "challenge_submission"
        );
    }

    #[test]
    fn variant_serde_round_trip() {
        let json = serde_json::to_string(&CardVariant::PublicProfile).unwrap();
        assert_eq!(json, "\"public_profile\"");
        let back: CardVariant = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CardVariant::PublicProfile);
    }

    #[test]
    fn card_payload_defaults_to_null() {
        let card: Card = serde_json::from_str(
            r#"{"id": "c1", "variant": "lesson"}"#,
        )
        .unwrap();
        assert_eq!(card.payload, serde_json::Value::Null);
    }
}
