//! Newsletter sign-up.

use atelier_db::models::newsletter::{CreateSubscriber, NewsletterSubscriber};
use atelier_db::repositories::NewsletterRepo;
use serde::Deserialize;
use validator::Validate;

use super::{trim_optional, validate_input, ActionError, ActionResult, StorageResultExt};
use crate::state::AppState;

/// Message returned when the address is already on the list.
pub const ALREADY_SUBSCRIBED: &str = "This email is already subscribed";

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct SubscribeInput {
    #[validate(email)]
    pub email: String,
    /// Where on the site the form was submitted (e.g. `footer`).
    #[validate(length(max = 50))]
    pub source: Option<String>,
}

impl SubscribeInput {
    fn normalized(self) -> Self {
        Self {
            email: self.email.trim().to_lowercase(),
            source: trim_optional(self.source),
        }
    }
}

/// Add an address to the newsletter list.
///
/// Addresses are compared after trimming and lower-casing; a repeat sign-up
/// is a conflict and leaves the stored row untouched.
pub async fn subscribe_newsletter(
    state: &AppState,
    input: SubscribeInput,
) -> ActionResult<NewsletterSubscriber> {
    subscribe(state, input).await.into()
}

async fn subscribe(
    state: &AppState,
    input: SubscribeInput,
) -> Result<NewsletterSubscriber, ActionError> {
    let input = input.normalized();
    validate_input(&input)?;

    let subscriber = NewsletterRepo::create(
        &state.pool,
        &CreateSubscriber {
            email: input.email,
            source: input.source,
        },
    )
    .await
    .storage("subscribe_newsletter")?
    .ok_or_else(|| ActionError::Conflict(ALREADY_SUBSCRIBED.to_string()))?;

    tracing::info!(subscriber_id = subscriber.id, "Newsletter subscriber added");
    Ok(subscriber)
}
