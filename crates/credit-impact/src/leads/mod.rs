//! Lead capture: the contact form and the free report request, delivered
//! through an email API.

pub mod domain;
pub mod mailer;
pub mod router;
pub mod service;
pub mod templates;

pub use domain::{
    ContactReceipt, ContactSubmission, CreditReportReceipt, CreditReportRequest,
    LeadValidationError,
};
pub use mailer::{EmailAttachment, Mailer, MailerError, OutboundEmail, ResendMailer};
pub use router::lead_router;
pub use service::{LeadService, LeadServiceError, LeadSettings};
pub use templates::escape_html;
