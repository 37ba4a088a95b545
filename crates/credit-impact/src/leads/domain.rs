use serde::{Deserialize, Serialize};

/// Message posted from the site's contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

impl ContactSubmission {
    /// Trims every field and checks the required ones. A blank phone number
    /// is dropped.
    pub fn validate(self) -> Result<Self, LeadValidationError> {
        Ok(Self {
            first_name: required("first_name", self.first_name)?,
            last_name: required("last_name", self.last_name)?,
            email: email_address(self.email)?,
            phone: self
                .phone
                .map(|phone| phone.trim().to_string())
                .filter(|phone| !phone.is_empty()),
            subject: required("subject", self.subject)?,
            message: required("message", self.message)?,
        })
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Human label for the topics offered by the form; other values pass
    /// through unchanged.
    pub fn subject_label(&self) -> &str {
        match self.subject.as_str() {
            "credit-score" => "Credit Score Questions",
            "mortgage" => "Mortgage Interest Rates",
            "auto-loan" => "Auto Loan Questions",
            "financial-planning" => "Financial Planning",
            "calculator-help" => "Calculator Help",
            "partnership" => "Partnership Opportunities",
            "other" => "Other",
            custom => custom,
        }
    }
}

/// Request for the free credit improvement report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditReportRequest {
    pub name: String,
    pub email: String,
}

impl CreditReportRequest {
    pub fn validate(self) -> Result<Self, LeadValidationError> {
        Ok(Self {
            name: required("name", self.name)?,
            email: email_address(self.email)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactReceipt {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreditReportReceipt {
    /// False when the report could not be emailed to the requester; the owner
    /// was still notified and will follow up.
    pub user_email_sent: bool,
    pub message: String,
}

impl CreditReportReceipt {
    pub fn new(user_email_sent: bool) -> Self {
        let message = if user_email_sent {
            "Report sent successfully to your email!"
        } else {
            "Request received! We'll follow up with your report shortly."
        };
        Self {
            user_email_sent,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LeadValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
}

fn required(field: &'static str, value: String) -> Result<String, LeadValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(LeadValidationError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

fn email_address(value: String) -> Result<String, LeadValidationError> {
    let email = required("email", value)?;
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if valid {
        Ok(email)
    } else {
        Err(LeadValidationError::InvalidEmail(email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> ContactSubmission {
        ContactSubmission {
            first_name: " Avery ".to_string(),
            last_name: "Quinn".to_string(),
            email: "avery@example.com ".to_string(),
            phone: Some("  ".to_string()),
            subject: "mortgage".to_string(),
            message: "How much would a 20 point bump save me?".to_string(),
        }
    }

    #[test]
    fn validation_trims_and_drops_blank_phone() {
        let contact = contact().validate().expect("valid contact");
        assert_eq!(contact.first_name, "Avery");
        assert_eq!(contact.email, "avery@example.com");
        assert_eq!(contact.phone, None);
        assert_eq!(contact.full_name(), "Avery Quinn");
        assert_eq!(contact.subject_label(), "Mortgage Interest Rates");
    }

    #[test]
    fn missing_message_is_reported_by_field() {
        let submission = ContactSubmission {
            message: "\n".to_string(),
            ..contact()
        };
        assert_eq!(
            submission.validate(),
            Err(LeadValidationError::MissingField("message"))
        );
    }

    #[test]
    fn rejects_malformed_email() {
        for email in ["avery.example.com", "@example.com", "avery@", "a b@example.com"] {
            let request = CreditReportRequest {
                name: "Avery".to_string(),
                email: email.to_string(),
            };
            assert!(
                matches!(request.validate(), Err(LeadValidationError::InvalidEmail(_))),
                "{email} should be rejected"
            );
        }
    }

    #[test]
    fn receipt_message_reflects_delivery() {
        assert!(CreditReportReceipt::new(true).message.starts_with("Report sent"));
        assert!(CreditReportReceipt::new(false).message.starts_with("Request received"));
    }
}
