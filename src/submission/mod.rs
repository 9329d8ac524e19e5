//! The submission processor — field rendering, attachment admission, and
//! body composition for one enquiry.
//!
//! Everything here is a pure per-request transformation: admission and
//! rendering never fail, so the only fallible step left to the caller is
//! the SMTP send.

pub mod attachments;
pub mod fields;
pub mod types;

mod body;

pub use types::{AcceptedAttachment, EnquiryEmail, EnquiryForm, RawAttachment, RenderedBody};

use crate::config::SubmissionBudget;

/// Subject line for every forwarded enquiry.
pub const SUBJECT: &str = "New painting enquiry";

/// Process one submission into the outbound email.
pub fn process(form: &EnquiryForm, budget: &SubmissionBudget) -> EnquiryEmail {
    let (accepted, total_bytes) = attachments::admit(&form.attachments, budget);
    if !accepted.is_empty() {
        tracing::info!(count = accepted.len(), total_bytes, "Attachments admitted");
    }

    let text = fields::render_fields(&form.fields);
    let rendered = body::compose(&text, &accepted);

    EnquiryEmail {
        subject: SUBJECT,
        text: rendered.text,
        html: rendered.html,
        attachments: accepted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD as BASE64;

    fn form_with(json: serde_json::Value) -> EnquiryForm {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn empty_form_yields_empty_text_and_no_gallery() {
        let email = process(&EnquiryForm::default(), &SubmissionBudget::default());
        assert_eq!(email.text, "");
        assert!(!email.html.contains("gallery"));
        assert!(email.attachments.is_empty());
        assert_eq!(email.subject, "New painting enquiry");
    }

    #[test]
    fn fields_and_attachments_both_flow_into_the_email() {
        let form = form_with(serde_json::json!({
            "name": "Jo",
            "message": "two rooms",
            "attachments": [
                {"base64": BASE64.encode([1u8; 16])}
            ]
        }));
        let email = process(&form, &SubmissionBudget::default());
        assert_eq!(email.text, "name: Jo\nmessage: two rooms");
        assert_eq!(email.attachments.len(), 1);
        assert!(email.html.contains("cid:photo-0"));
        assert!(!email.text.contains("cid:"));
    }

    #[test]
    fn oversized_attachment_leaves_text_untouched() {
        let budget = SubmissionBudget {
            max_bytes_per_attachment: 8,
            ..SubmissionBudget::default()
        };
        let form = form_with(serde_json::json!({
            "name": "Jo",
            "attachments": [
                {"base64": BASE64.encode([0u8; 64])}
            ]
        }));
        let email = process(&form, &budget);
        assert!(email.attachments.is_empty());
        assert_eq!(email.text, "name: Jo");
        assert!(!email.html.contains("gallery"));
    }

    #[test]
    fn processing_is_deterministic() {
        let form = form_with(serde_json::json!({
            "name": "Jo",
            "attachments": [
                {"base64": BASE64.encode([4u8; 32])},
                {"base64": BASE64.encode([5u8; 32])}
            ]
        }));
        let budget = SubmissionBudget::default();
        let first = process(&form, &budget);
        let second = process(&form, &budget);
        assert_eq!(first.text, second.text);
        assert_eq!(first.html, second.html);
        assert_eq!(first.attachments, second.attachments);
    }
}
