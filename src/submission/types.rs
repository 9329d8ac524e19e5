//! Shared types for the submission pipeline.

use serde::Deserialize;
use serde_json::{Map, Value};

/// A raw enquiry form submission, straight off the wire.
///
/// Every text field lands in `fields` in its original encounter order;
/// `attachments` is captured by its own struct field so it never leaks
/// into field rendering.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnquiryForm {
    #[serde(default)]
    pub attachments: Vec<RawAttachment>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// A client-submitted attachment. Untrusted — size is unknown until the
/// payload is decoded, so nothing here is retained without admission.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAttachment {
    pub filename: Option<String>,
    #[serde(default)]
    pub base64: String,
    pub content_type: Option<String>,
}

/// An attachment that passed the admission budget checks.
///
/// `content_id` is unique per submission and stable between the MIME
/// part and the `cid:` reference in the HTML body. `content_type` is
/// guaranteed parseable by the transport (admission substitutes the
/// default otherwise).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedAttachment {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub content_id: String,
}

/// The rendered (text, html) body pair. Built once per request and
/// handed straight to the transport, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBody {
    pub text: String,
    pub html: String,
}

/// The outbound send request handed to the mail transport.
#[derive(Debug, Clone)]
pub struct EnquiryEmail {
    pub subject: &'static str,
    pub text: String,
    pub html: String,
    pub attachments: Vec<AcceptedAttachment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_deserializes_with_camel_case_attachment_keys() {
        let json = r#"{
            "name": "Jo",
            "attachments": [
                {"filename": "a.png", "base64": "aGk=", "contentType": "image/png"}
            ]
        }"#;
        let form: EnquiryForm = serde_json::from_str(json).unwrap();
        assert_eq!(form.attachments.len(), 1);
        assert_eq!(form.attachments[0].filename.as_deref(), Some("a.png"));
        assert_eq!(form.attachments[0].content_type.as_deref(), Some("image/png"));
        assert_eq!(form.fields.get("name"), Some(&serde_json::json!("Jo")));
        assert!(form.fields.get("attachments").is_none());
    }

    #[test]
    fn form_deserializes_without_attachments() {
        let form: EnquiryForm = serde_json::from_str(r#"{"name": "Jo"}"#).unwrap();
        assert!(form.attachments.is_empty());
    }

    #[test]
    fn form_preserves_field_encounter_order() {
        let json = r#"{"zeta": "1", "alpha": "2", "mid": "3"}"#;
        let form: EnquiryForm = serde_json::from_str(json).unwrap();
        let keys: Vec<&str> = form.fields.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn raw_attachment_base64_defaults_to_empty() {
        let att: RawAttachment = serde_json::from_str(r#"{"filename": "x.jpg"}"#).unwrap();
        assert!(att.base64.is_empty());
    }
}
