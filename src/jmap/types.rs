//! Normalized records produced at the protocol boundary.
//!
//! Server responses are deserialized into these once; nothing downstream
//! inspects raw JSON. The same structs serialize back out for `--json`
//! output, so field names stay in JMAP's camelCase.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const KEYWORD_SEEN: &str = "$seen";
pub const KEYWORD_FLAGGED: &str = "$flagged";
pub const KEYWORD_DRAFT: &str = "$draft";
pub const KEYWORD_ANSWERED: &str = "$answered";

/// A folder ("mailbox"). The parent-pointer graph is a forest; an id in
/// `parent_id` that matches no known mailbox is treated as orphaned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mailbox {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub sort_order: u32,
    #[serde(default)]
    pub total_emails: u64,
    #[serde(default)]
    pub unread_emails: u64,
    #[serde(default)]
    pub total_threads: u64,
    #[serde(default)]
    pub unread_threads: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailAddress {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl EmailAddress {
    /// `Name <addr>` when a display name is present, bare address
    /// otherwise.
    pub fn display(&self) -> String {
        let email = self.email.as_deref().unwrap_or("");
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => format!("{name} <{email}>"),
            _ => email.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyValue {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub is_encoding_problem: bool,
    #[serde(default)]
    pub is_truncated: bool,
}

/// Body-part metadata; doubles as the attachment record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyPart {
    #[serde(default)]
    pub part_id: Option<String>,
    #[serde(default)]
    pub blob_id: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default, rename = "type")]
    pub content_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub charset: Option<String>,
    #[serde(default)]
    pub disposition: Option<String>,
    #[serde(default)]
    pub cid: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

/// The summary view used by `list-emails`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailSummary {
    pub id: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub from: Vec<EmailAddress>,
    #[serde(default)]
    pub to: Vec<EmailAddress>,
    #[serde(default)]
    pub received_at: Option<String>,
    #[serde(default)]
    pub preview: Option<String>,
    #[serde(default)]
    pub has_attachment: bool,
    #[serde(default)]
    pub keywords: HashMap<String, bool>,
    #[serde(default)]
    pub body_values: HashMap<String, BodyValue>,
}

/// The full-detail view used by `get-email`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailDetail {
    pub id: String,
    #[serde(default)]
    pub blob_id: Option<String>,
    #[serde(default)]
    pub thread_id: Option<String>,
    #[serde(default)]
    pub mailbox_ids: HashMap<String, bool>,
    #[serde(default)]
    pub keywords: HashMap<String, bool>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub received_at: Option<String>,
    #[serde(default)]
    pub sent_at: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub from: Vec<EmailAddress>,
    #[serde(default)]
    pub to: Vec<EmailAddress>,
    #[serde(default)]
    pub cc: Vec<EmailAddress>,
    #[serde(default)]
    pub bcc: Vec<EmailAddress>,
    #[serde(default)]
    pub reply_to: Vec<EmailAddress>,
    #[serde(default)]
    pub has_attachment: bool,
    #[serde(default)]
    pub preview: Option<String>,
    #[serde(default)]
    pub headers: Vec<Header>,
    #[serde(default)]
    pub attachments: Vec<BodyPart>,
    #[serde(default)]
    pub body_values: HashMap<String, BodyValue>,
    #[serde(default)]
    pub text_body: Vec<BodyPart>,
    #[serde(default)]
    pub html_body: Vec<BodyPart>,
}

/// The minimal read `file-email` needs before mutating: identity plus the
/// current folder membership.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailFilingInfo {
    pub id: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub from: Vec<EmailAddress>,
    #[serde(default)]
    pub mailbox_ids: HashMap<String, bool>,
    #[serde(default)]
    pub received_at: Option<String>,
}

/// Status flags shown in listings, derived from keywords.
pub fn status_line(keywords: &HashMap<String, bool>, has_attachment: bool) -> String {
    let mut parts = Vec::new();
    if !keywords.contains_key(KEYWORD_SEEN) {
        parts.push("UNREAD");
    }
    if keywords.contains_key(KEYWORD_FLAGGED) {
        parts.push("FLAGGED");
    }
    if keywords.contains_key(KEYWORD_DRAFT) {
        parts.push("DRAFT");
    }
    if keywords.contains_key(KEYWORD_ANSWERED) {
        parts.push("ANSWERED");
    }
    if has_attachment {
        parts.push("ATTACHMENT");
    }
    if parts.is_empty() {
        "READ".to_string()
    } else {
        parts.join(" | ")
    }
}
