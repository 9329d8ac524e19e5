//! Body composition — dual text/HTML rendering with an inline photo gallery.

use crate::submission::SUBJECT;
use crate::submission::types::{AcceptedAttachment, RenderedBody};

/// Compose the (text, html) body pair.
///
/// The plain-text body is the field text untouched; attachments never
/// appear in it. The HTML body wraps the field text in a preformatted
/// block and appends a gallery of `cid:` image references only when at
/// least one attachment was accepted.
pub fn compose(field_text: &str, attachments: &[AcceptedAttachment]) -> RenderedBody {
    let mut html = format!(
        "<h2>{SUBJECT}</h2><pre style=\"white-space:pre-wrap\">{}</pre>",
        escape_html(field_text)
    );

    if !attachments.is_empty() {
        html.push_str("<div class=\"gallery\">");
        for attachment in attachments {
            html.push_str(&format!(
                "<img src=\"cid:{}\" alt=\"{}\" style=\"max-width:480px;display:block;margin:8px 0\">",
                attachment.content_id,
                escape_html(&attachment.filename),
            ));
        }
        html.push_str("</div>");
    }

    RenderedBody {
        text: field_text.to_string(),
        html,
    }
}

/// Escape HTML metacharacters. Field values and filenames are
/// client-controlled and land inside markup.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
