//! SMTP transport adapter — lettre-backed mail delivery.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use secrecy::ExposeSecret;
use tracing::info;

use crate::config::SmtpConfig;
use crate::error::TransportError;
use crate::submission::EnquiryEmail;

/// Mail delivery seam — the one operation in a request that may block or
/// fail independently of submission processing.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: EnquiryEmail) -> Result<(), TransportError>;
}

/// Lettre-backed SMTP mailer. The pooled transport and the from/to
/// mailboxes are built once at construction.
pub struct SmtpMailer {
    transport: SmtpTransport,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, TransportError> {
        let creds = Credentials::new(
            config.username.clone(),
            config.password.expose_secret().to_string(),
        );

        let builder = if config.secure {
            SmtpTransport::relay(&config.host)
        } else {
            SmtpTransport::starttls_relay(&config.host)
        }
        .map_err(|e| TransportError::Relay(e.to_string()))?;

        let transport = builder.port(config.port).credentials(creds).build();

        Ok(Self {
            transport,
            from: parse_mailbox(&config.from_address)?,
            to: parse_mailbox(&config.to_address)?,
        })
    }

    fn build_message(&self, email: &EnquiryEmail) -> Result<Message, TransportError> {
        Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(email.subject)
            .multipart(build_body(email)?)
            .map_err(|e| TransportError::Message(e.to_string()))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: EnquiryEmail) -> Result<(), TransportError> {
        let message = self.build_message(&email)?;
        let transport = self.transport.clone();

        // lettre's SmtpTransport is blocking; keep it off the async runtime.
        tokio::task::spawn_blocking(move || transport.send(&message))
            .await
            .map_err(|e| TransportError::Send(format!("send task panicked: {e}")))?
            .map_err(|e| TransportError::Send(e.to_string()))?;

        info!(attachments = email.attachments.len(), "Enquiry email sent");
        Ok(())
    }
}

/// Assemble the MIME body: a text/html alternative, with the HTML moved
/// into a related subtree holding the inline CID parts when attachments
/// were accepted.
pub fn build_body(email: &EnquiryEmail) -> Result<MultiPart, TransportError> {
    if email.attachments.is_empty() {
        return Ok(MultiPart::alternative_plain_html(
            email.text.clone(),
            email.html.clone(),
        ));
    }

    let mut related = MultiPart::related().singlepart(SinglePart::html(email.html.clone()));
    for attachment in &email.attachments {
        let content_type = ContentType::parse(&attachment.content_type).map_err(|e| {
            TransportError::Message(format!(
                "bad content type {}: {e}",
                attachment.content_type
            ))
        })?;
        related = related.singlepart(
            Attachment::new_inline(attachment.content_id.clone())
                .body(attachment.bytes.clone(), content_type),
        );
    }

    Ok(MultiPart::alternative()
        .singlepart(SinglePart::plain(email.text.clone()))
        .multipart(related))
}

fn parse_mailbox(address: &str) -> Result<Mailbox, TransportError> {
    address
        .parse()
        .map_err(|e: lettre::address::AddressError| TransportError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::{AcceptedAttachment, SUBJECT};

    fn email(attachments: Vec<AcceptedAttachment>) -> EnquiryEmail {
        EnquiryEmail {
            subject: SUBJECT,
            text: "name: Jo".into(),
            html: "<h2>New painting enquiry</h2><pre style=\"white-space:pre-wrap\">name: Jo</pre>"
                .into(),
            attachments,
        }
    }

    fn inline_photo(content_id: &str) -> AcceptedAttachment {
        AcceptedAttachment {
            filename: format!("{content_id}.jpg"),
            bytes: vec![0xFF, 0xD8, 0xFF],
            content_type: "image/jpeg".into(),
            content_id: content_id.into(),
        }
    }

    fn formatted(email: &EnquiryEmail) -> String {
        let message = Message::builder()
            .from("Relay <relay@example.com>".parse().unwrap())
            .to("Owner <owner@example.com>".parse().unwrap())
            .subject(email.subject)
            .multipart(build_body(email).unwrap())
            .unwrap();
        String::from_utf8_lossy(&message.formatted()).to_string()
    }

    // ── MIME assembly ───────────────────────────────────────────────

    #[test]
    fn body_without_attachments_is_plain_alternative() {
        let raw = formatted(&email(vec![]));
        assert!(raw.contains("multipart/alternative"));
        assert!(!raw.contains("multipart/related"));
        assert!(!raw.contains("Content-ID"));
    }

    #[test]
    fn body_with_attachments_nests_related_inside_alternative() {
        let raw = formatted(&email(vec![inline_photo("photo-0")]));
        assert!(raw.contains("multipart/alternative"));
        assert!(raw.contains("multipart/related"));
    }

    #[test]
    fn inline_parts_carry_matching_content_ids() {
        let raw = formatted(&email(vec![inline_photo("photo-0"), inline_photo("photo-1")]));
        assert!(raw.contains("photo-0"));
        assert!(raw.contains("photo-1"));
        assert!(raw.contains("Content-Disposition: inline"));
    }

    #[test]
    fn build_body_rejects_unparseable_content_type() {
        let mut bad = inline_photo("photo-0");
        bad.content_type = "not a mime type".into();
        assert!(build_body(&email(vec![bad])).is_err());
    }

    // ── Mailbox parsing ─────────────────────────────────────────────

    #[test]
    fn parse_mailbox_accepts_plain_and_named_forms() {
        assert!(parse_mailbox("owner@example.com").is_ok());
        assert!(parse_mailbox("Owner <owner@example.com>").is_ok());
    }

    #[test]
    fn parse_mailbox_reports_the_bad_address() {
        let err = parse_mailbox("not-an-address").unwrap_err();
        match err {
            TransportError::InvalidAddress { address, .. } => {
                assert_eq!(address, "not-an-address");
            }
            other => panic!("expected InvalidAddress, got {other:?}"),
        }
    }
}
