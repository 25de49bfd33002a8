//! Contact submission review workflow.
//!
//! Submissions start as [`SubmissionStatus::Pending`]. Review moves them to
//! exactly one terminal state; terminal states do not move again.

use crate::content::SubmissionStatus;
use crate::error::CoreError;

/// Whether `status` is terminal (accepts no further transition).
pub fn is_terminal(status: SubmissionStatus) -> bool {
    !matches!(status, SubmissionStatus::Pending)
}

/// Check that a submission may move from `from` to `to`.
pub fn validate_transition(from: SubmissionStatus, to: SubmissionStatus) -> Result<(), CoreError> {
    if is_terminal(from) {
        return Err(CoreError::Conflict(format!(
            "Submission is already '{from}' and cannot change to '{to}'"
        )));
    }
    if to == SubmissionStatus::Pending {
        return Err(CoreError::Validation(
            "Submission is already pending".into(),
        ));
    }
    Ok(())
}
