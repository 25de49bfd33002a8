//! Plain-text messages sent after a contact form submission.

use crate::OutgoingEmail;

/// Fields of a stored submission needed to render the messages.
#[derive(Debug, Clone)]
pub struct ContactDetails<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub company: Option<&'a str>,
    pub project_type: &'a str,
    pub budget_range: &'a str,
    pub message: &'a str,
}

/// Acknowledgement sent to the visitor who submitted the form.
pub fn contact_confirmation(details: &ContactDetails<'_>, site_url: &str) -> OutgoingEmail {
    let body = format!(
        "Hi {name},\n\n\
         Thanks for reaching out about your {project_type} project. We have \
         received your message and will get back to you within two business days.\n\n\
         In the meantime you can browse our recent work at {site_url}/portfolio.\n\n\
         -- The team",
        name = details.name,
        project_type = details.project_type,
        site_url = site_url.trim_end_matches('/'),
    );
    OutgoingEmail {
        to: details.email.to_string(),
        reply_to: None,
        subject: "We received your message".to_string(),
        body,
    }
}

/// Internal notification sent to the configured admin inbox.
pub fn contact_notification(details: &ContactDetails<'_>, admin_email: &str) -> OutgoingEmail {
    let body = format!(
        "New contact submission\n\n\
         Name: {name}\n\
         Email: {email}\n\
         Phone: {phone}\n\
         Company: {company}\n\
         Project type: {project_type}\n\
         Budget: {budget}\n\n\
         {message}",
        name = details.name,
        email = details.email,
        phone = details.phone.unwrap_or("-"),
        company = details.company.unwrap_or("-"),
        project_type = details.project_type,
        budget = details.budget_range,
        message = details.message,
    );
    OutgoingEmail {
        to: admin_email.to_string(),
        reply_to: Some(details.email.to_string()),
        subject: format!("New inquiry from {}", details.name),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> ContactDetails<'static> {
        ContactDetails {
            name: "Jordan",
            email: "jordan@example.com",
            phone: None,
            company: Some("Acme"),
            project_type: "website",
            budget_range: "10k-25k",
            message: "We need a new site.",
        }
    }

    #[test]
    fn confirmation_goes_to_submitter() {
        let email = contact_confirmation(&details(), "https://example.com/");
        assert_eq!(email.to, "jordan@example.com");
        assert!(email.body.contains("Hi Jordan"));
        assert!(email.body.contains("https://example.com/portfolio"));
    }

    #[test]
    fn notification_replies_to_submitter() {
        let email = contact_notification(&details(), "team@example.com");
        assert_eq!(email.to, "team@example.com");
        assert_eq!(email.reply_to.as_deref(), Some("jordan@example.com"));
        assert!(email.body.contains("Company: Acme"));
        assert!(email.body.contains("Phone: -"));
    }
}
