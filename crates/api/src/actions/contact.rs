//! Contact form submission and admin review of submissions.

use std::sync::Arc;

use atelier_core::contact::validate_transition;
use atelier_core::content::SubmissionStatus;
use atelier_core::types::DbId;
use atelier_core::validation::{budget_range, project_type};
use atelier_db::models::contact_submission::{ContactSubmission, CreateContactSubmission};
use atelier_db::repositories::ContactSubmissionRepo;
use atelier_mail::templates::{contact_confirmation, contact_notification, ContactDetails};
use atelier_mail::Mailer;
use serde::Deserialize;
use validator::Validate;

use super::{trim, trim_optional, validate_input, ActionError, ActionResult, StorageResultExt};
use crate::state::AppState;

/// Fields posted by the public contact form.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ContactInput {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(length(max = 100))]
    pub company: Option<String>,
    #[serde(alias = "projectType")]
    #[validate(custom(function = "project_type"))]
    pub project_type: String,
    #[serde(alias = "budgetRange")]
    #[validate(custom(function = "budget_range"))]
    pub budget_range: String,
    #[validate(length(min = 10, max = 5000))]
    pub message: String,
}

impl ContactInput {
    fn normalized(mut self) -> Self {
        trim(&mut self.name);
        trim(&mut self.email);
        trim(&mut self.project_type);
        trim(&mut self.budget_range);
        trim(&mut self.message);
        self.phone = trim_optional(self.phone);
        self.company = trim_optional(self.company);
        self
    }
}

/// Persist a contact submission, then send mail in the background.
///
/// Only the insert decides the outcome. Confirmation and notification
/// emails are spawned after it and their failures are logged.
pub async fn submit_contact(
    state: &AppState,
    input: ContactInput,
) -> ActionResult<ContactSubmission> {
    store_contact(state, input).await.into()
}

async fn store_contact(
    state: &AppState,
    input: ContactInput,
) -> Result<ContactSubmission, ActionError> {
    let input = input.normalized();
    validate_input(&input)?;

    let submission = ContactSubmissionRepo::create(
        &state.pool,
        &CreateContactSubmission {
            name: input.name,
            email: input.email,
            phone: input.phone,
            company: input.company,
            project_type: input.project_type,
            budget_range: input.budget_range,
            message: input.message,
        },
    )
    .await
    .storage("submit_contact")?;

    tracing::info!(
        submission_id = submission.id,
        project_type = %submission.project_type,
        "Contact submission stored",
    );

    spawn_contact_emails(
        Arc::clone(&state.mailer),
        submission.clone(),
        state.config.site.site_url.clone(),
        state.config.site.admin_notify_email.clone(),
    );

    Ok(submission)
}

fn spawn_contact_emails(
    mailer: Arc<dyn Mailer>,
    submission: ContactSubmission,
    site_url: String,
    admin_email: Option<String>,
) {
    tokio::spawn(async move {
        let details = ContactDetails {
            name: &submission.name,
            email: &submission.email,
            phone: submission.phone.as_deref(),
            company: submission.company.as_deref(),
            project_type: &submission.project_type,
            budget_range: &submission.budget_range,
            message: &submission.message,
        };

        if let Err(e) = mailer.send(contact_confirmation(&details, &site_url)).await {
            tracing::warn!(
                submission_id = submission.id,
                error = %e,
                "Failed to send contact confirmation",
            );
        }

        match admin_email {
            Some(admin_email) => {
                if let Err(e) = mailer
                    .send(contact_notification(&details, &admin_email))
                    .await
                {
                    tracing::warn!(
                        submission_id = submission.id,
                        error = %e,
                        "Failed to send admin notification",
                    );
                }
            }
            None => tracing::debug!("ADMIN_NOTIFY_EMAIL not set; skipping admin notification"),
        }
    });
}

/// Body of `PUT /api/admin/contacts/{id}/status`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StatusInput {
    pub status: String,
}

/// Move a submission along `pending -> contacted | converted | archived`.
pub async fn update_contact_status(
    state: &AppState,
    id: DbId,
    input: StatusInput,
) -> ActionResult<ContactSubmission> {
    change_status(state, id, input).await.into()
}

async fn change_status(
    state: &AppState,
    id: DbId,
    input: StatusInput,
) -> Result<ContactSubmission, ActionError> {
    let target: SubmissionStatus = input
        .status
        .trim()
        .parse()
        .map_err(|e: atelier_core::content::UnknownVariant| {
            ActionError::invalid_field("status", e.to_string())
        })?;

    let current = ContactSubmissionRepo::find_by_id(&state.pool, id)
        .await
        .storage("update_contact_status")?
        .ok_or_else(|| ActionError::NotFound(format!("Submission with id {id} not found")))?;

    let from: SubmissionStatus = current.status.parse().map_err(|e| {
        tracing::error!(submission_id = id, error = %e, "Stored submission status is invalid");
        ActionError::internal()
    })?;
    validate_transition(from, target)?;

    // Guarded on the status we just read so concurrent reviews cannot
    // both leave `pending`.
    let updated = ContactSubmissionRepo::update_status(
        &state.pool,
        id,
        from.as_str(),
        target.as_str(),
    )
    .await
    .storage("update_contact_status")?
    .ok_or_else(|| {
        ActionError::Conflict("Submission status changed; reload and try again".to_string())
    })?;

    tracing::info!(
        submission_id = id,
        from = %from,
        to = %target,
        "Contact submission status updated",
    );
    Ok(updated)
}
