use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use super::domain::{
    ContactReceipt, ContactSubmission, CreditReportReceipt, CreditReportRequest,
    LeadValidationError,
};
use super::mailer::{EmailAttachment, Mailer, MailerError, OutboundEmail};
use super::templates;
use crate::config::MailConfig;
use crate::report::{self, ReportError};

const CONTACT_CONFIRMATION: &str =
    "Your message has been sent successfully. We'll get back to you within 24 hours.";

/// Addresses used when composing lead emails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadSettings {
    pub from: String,
    pub notify: String,
    pub site_url: String,
}

impl From<&MailConfig> for LeadSettings {
    fn from(config: &MailConfig) -> Self {
        Self {
            from: config.from.clone(),
            notify: config.notify.clone(),
            site_url: config.site_url.clone(),
        }
    }
}

/// Handles the contact form and the free report request.
pub struct LeadService<M: ?Sized> {
    mailer: Arc<M>,
    settings: LeadSettings,
}

impl<M> LeadService<M>
where
    M: Mailer + ?Sized,
{
    pub fn new(mailer: Arc<M>, settings: LeadSettings) -> Self {
        Self { mailer, settings }
    }

    pub fn settings(&self) -> &LeadSettings {
        &self.settings
    }

    /// Forwards a contact message to the business inbox.
    pub async fn submit_contact(
        &self,
        submission: ContactSubmission,
    ) -> Result<ContactReceipt, LeadServiceError> {
        let contact = submission.validate()?;
        let email = OutboundEmail {
            from: self.settings.from.clone(),
            to: vec![self.settings.notify.clone()],
            subject: templates::contact_subject(&contact),
            html: templates::contact_notification(&contact, &received_at()),
            attachments: Vec::new(),
        };

        self.mailer.send(email).await.map_err(|err| {
            error!(error = %err, "contact notification failed");
            LeadServiceError::Notification(err)
        })?;

        info!(subject = %contact.subject, "contact message forwarded");
        Ok(ContactReceipt {
            message: CONTACT_CONFIRMATION.to_string(),
        })
    }

    /// Renders the report, notifies the owner, then tries to email the report
    /// to the requester. Only the owner notification is required to succeed.
    pub async fn request_credit_report(
        &self,
        request: CreditReportRequest,
    ) -> Result<CreditReportReceipt, LeadServiceError> {
        let request = request.validate()?;
        let pdf = report::render_credit_report(&request.name)?;

        let notification = OutboundEmail {
            from: self.settings.from.clone(),
            to: vec![self.settings.notify.clone()],
            subject: templates::LEAD_SUBJECT.to_string(),
            html: templates::lead_notification(&request, &received_at()),
            attachments: Vec::new(),
        };
        self.mailer.send(notification).await.map_err(|err| {
            error!(error = %err, "lead notification failed");
            LeadServiceError::Notification(err)
        })?;

        let delivery = OutboundEmail {
            from: self.settings.from.clone(),
            to: vec![request.email.clone()],
            subject: templates::DELIVERY_SUBJECT.to_string(),
            html: templates::report_delivery(&request.name, &self.settings.site_url),
            attachments: vec![EmailAttachment::pdf(templates::REPORT_FILENAME, &pdf)],
        };
        let user_email_sent = match self.mailer.send(delivery).await {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "report delivery failed; owner will follow up");
                false
            }
        };

        info!(user_email_sent, pdf_bytes = pdf.len(), "credit report request handled");
        Ok(CreditReportReceipt::new(user_email_sent))
    }
}

fn received_at() -> String {
    Utc::now().format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Error raised by the lead service.
#[derive(Debug, thiserror::Error)]
pub enum LeadServiceError {
    #[error(transparent)]
    Validation(#[from] LeadValidationError),
    #[error("could not notify the site owner: {0}")]
    Notification(#[source] MailerError),
    #[error(transparent)]
    Report(#[from] ReportError),
}
