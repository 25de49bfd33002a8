use atelier_core::consent::{
    should_load_analytics, ConsentState, CONSENT_CHANGED_EVENT, CONSENT_STORAGE_KEY,
};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;

use crate::auth::cookie::read_cookie;
use crate::state::AppState;

/// Public site settings needed by the client shell.
#[derive(Debug, Serialize)]
pub struct SiteConfigResponse {
    pub site_url: String,
    /// Omitted when analytics is not configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics_measurement_id: Option<String>,
    /// Consent read from the visitor's `cookie-consent` cookie.
    pub consent: ConsentState,
    /// Whether the client should inject the analytics script.
    pub analytics_enabled: bool,
    pub consent_storage_key: &'static str,
    pub consent_changed_event: &'static str,
}

/// GET /api/site-config
pub async fn site_config(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<SiteConfigResponse> {
    let site = &state.config.site;
    let consent = ConsentState::from_stored(read_cookie(&headers, CONSENT_STORAGE_KEY));
    Json(SiteConfigResponse {
        site_url: site.site_url.clone(),
        analytics_measurement_id: site.analytics_measurement_id.clone(),
        consent,
        analytics_enabled: should_load_analytics(
            site.analytics_measurement_id.as_deref(),
            consent,
        ),
        consent_storage_key: CONSENT_STORAGE_KEY,
        consent_changed_event: CONSENT_CHANGED_EVENT,
    })
}
