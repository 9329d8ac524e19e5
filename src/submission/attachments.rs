//! Attachment admission — budgeted, silent-drop filtering of client payloads.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use lettre::message::header::ContentType;
use tracing::debug;

use crate::config::SubmissionBudget;
use crate::submission::types::{AcceptedAttachment, RawAttachment};

/// MIME type substituted when the client omits one or sends something
/// the transport cannot parse.
const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

/// Admit attachments under the budget, in input order.
///
/// Dropping is always silent — an oversized, empty, or undecodable item
/// is skipped and processing continues, so one bad photo never rejects
/// an otherwise-valid enquiry. Skipped items do not count toward the
/// running total, and content-identifiers are assigned densely over the
/// accepted items only.
///
/// Returns the accepted attachments and their total decoded size.
pub fn admit(raw: &[RawAttachment], budget: &SubmissionBudget) -> (Vec<AcceptedAttachment>, usize) {
    let mut accepted = Vec::new();
    let mut total_bytes = 0usize;

    for item in raw.iter().take(budget.max_attachment_count) {
        let encoded: String = item
            .base64
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        if encoded.is_empty() {
            continue;
        }

        // Cheap pre-check so an oversized payload is never decoded.
        let estimate = estimated_len(&encoded);
        if estimate > budget.max_bytes_per_attachment {
            debug!(
                estimate,
                limit = budget.max_bytes_per_attachment,
                "Attachment over per-item budget, skipped"
            );
            continue;
        }

        let bytes = match BASE64.decode(&encoded) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(error = %e, "Attachment payload undecodable, skipped");
                continue;
            }
        };

        // The estimate is advisory; the decoded length is binding.
        if bytes.is_empty() || bytes.len() > budget.max_bytes_per_attachment {
            continue;
        }
        if total_bytes + bytes.len() > budget.max_total_bytes {
            debug!(
                total = total_bytes,
                size = bytes.len(),
                limit = budget.max_total_bytes,
                "Attachment over total budget, skipped"
            );
            continue;
        }

        let ordinal = accepted.len();
        total_bytes += bytes.len();
        accepted.push(AcceptedAttachment {
            filename: item
                .filename
                .clone()
                .filter(|f| !f.is_empty())
                .unwrap_or_else(|| format!("photo{ordinal}.jpg")),
            bytes,
            content_type: normalize_content_type(item.content_type.as_deref()),
            content_id: format!("photo-{ordinal}"),
        });
    }

    (accepted, total_bytes)
}

/// Decoded size of a padded base64 string, computed without decoding.
fn estimated_len(encoded: &str) -> usize {
    let pad = encoded.bytes().rev().take_while(|&b| b == b'=').count();
    ((encoded.len() / 4) * 3).saturating_sub(pad)
}

/// Keep the client's MIME type only when the transport can parse it.
fn normalize_content_type(client: Option<&str>) -> String {
    client
        .filter(|ct| ContentType::parse(ct).is_ok())
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string())
}
