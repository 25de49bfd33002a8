//! Analytics consent state.
//!
//! The browser keeps the visitor's choice under [`CONSENT_STORAGE_KEY`]. The
//! site reads it once on mount and only loads the analytics script when a
//! measurement id is configured and consent is [`ConsentState::Granted`].
//! Changes are announced through the [`CONSENT_CHANGED_EVENT`] event instead
//! of mutating shared globals.

use serde::{Deserialize, Serialize};

/// Client storage key holding the consent value.
pub const CONSENT_STORAGE_KEY: &str = "cookie-consent";

/// Name of the event dispatched when the visitor changes their choice.
pub const CONSENT_CHANGED_EVENT: &str = "consent-changed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsentState {
    Granted,
    Denied,
    /// No choice stored yet; the banner is shown.
    Unknown,
}

impl ConsentState {
    /// Parse a stored value. Anything unrecognised counts as no choice.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("granted") | Some("accepted") => ConsentState::Granted,
            Some("denied") | Some("declined") => ConsentState::Denied,
            _ => ConsentState::Unknown,
        }
    }

    /// Value to write back to client storage, `None` to clear it.
    pub fn to_stored(self) -> Option<&'static str> {
        match self {
            ConsentState::Granted => Some("granted"),
            ConsentState::Denied => Some("denied"),
            ConsentState::Unknown => None,
        }
    }
}

/// Whether the analytics script should be injected.
pub fn should_load_analytics(measurement_id: Option<&str>, consent: ConsentState) -> bool {
    let configured = measurement_id.is_some_and(|id| !id.trim().is_empty());
    configured && consent == ConsentState::Granted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stored_values() {
        assert_eq!(ConsentState::from_stored(Some("granted")), ConsentState::Granted);
        assert_eq!(ConsentState::from_stored(Some("denied")), ConsentState::Denied);
        assert_eq!(ConsentState::from_stored(Some("maybe")), ConsentState::Unknown);
        assert_eq!(ConsentState::from_stored(None), ConsentState::Unknown);
    }

    #[test]
    fn stored_value_round_trips() {
        for state in [ConsentState::Granted, ConsentState::Denied] {
            assert_eq!(ConsentState::from_stored(state.to_stored()), state);
        }
        assert_eq!(ConsentState::Unknown.to_stored(), None);
    }

    #[test]
    fn analytics_requires_id_and_consent() {
        assert!(should_load_analytics(Some("G-ABC123"), ConsentState::Granted));
        assert!(!should_load_analytics(Some("G-ABC123"), ConsentState::Unknown));
        assert!(!should_load_analytics(Some("G-ABC123"), ConsentState::Denied));
        assert!(!should_load_analytics(None, ConsentState::Granted));
        assert!(!should_load_analytics(Some("  "), ConsentState::Granted));
    }
}
