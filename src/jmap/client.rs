//! The protocol client: single point of contact with the JMAP server.
//!
//! Read operations return normalized records (misses are `None`);
//! mutations issue exactly one set request each and interpret the
//! response for partial failure.

use std::collections::HashMap;

use log::debug;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::config::Credentials;
use crate::error::JmapError;
use crate::jmap::protocol::{
    ApiRequest, Comparator, EmailGetArgs, EmailQueryArgs, EmailQueryFilter, EmailSetArgs,
    GetResponse, Invocation, MailboxCreate, MailboxGetArgs, MailboxSetArgs, ResultReference,
    SetResponse,
};
use crate::jmap::transport::{HttpTransport, JmapTransport};
use crate::jmap::types::{EmailDetail, EmailFilingInfo, EmailSummary, Mailbox};

/// Client-assigned creation id used in `Mailbox/set` create maps.
const CREATION_ID: &str = "new-folder";

/// Body snippet cap for list views, matching the JMAP server default
/// behavior the scripts rely on.
const LIST_BODY_VALUE_BYTES: u64 = 5000;

const SUMMARY_PROPERTIES: &[&str] = &[
    "id",
    "subject",
    "from",
    "to",
    "receivedAt",
    "preview",
    "bodyValues",
    "hasAttachment",
    "keywords",
];

const FILING_PROPERTIES: &[&str] = &["id", "subject", "from", "mailboxIds", "receivedAt"];

#[derive(Debug, Clone)]
pub struct CreatedMailbox {
    pub id: String,
    pub name: String,
    pub parent_id: String,
}

pub struct JmapClient<T: JmapTransport> {
    transport: T,
}

impl JmapClient<HttpTransport> {
    /// Connects to the server and resolves the mail account.
    pub fn connect(credentials: &Credentials) -> Result<Self, JmapError> {
        Ok(JmapClient {
            transport: HttpTransport::connect(credentials)?,
        })
    }
}

impl<T: JmapTransport> JmapClient<T> {
    pub fn new(transport: T) -> Self {
        JmapClient { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn account_id(&self) -> String {
        self.transport.account_id()
    }

    /// Single-method round trip; returns the matching response arguments.
    fn call(&self, method: &str, args: Value) -> Result<Value, JmapError> {
        let request = ApiRequest::new(vec![Invocation::new(method, args, "0")]);
        let response = self.transport.exchange(&request)?;
        response.method_response(method, "0").cloned()
    }

    // --- Read operations ---

    /// Every folder known to the account, as a flat list. No pagination;
    /// account folder counts are small enough for one response.
    pub fn list_mailboxes(&self) -> Result<Vec<Mailbox>, JmapError> {
        let args = serde_json::to_value(MailboxGetArgs {
            account_id: self.account_id(),
            ids: None,
        })?;
        let response: GetResponse<Mailbox> =
            serde_json::from_value(self.call("Mailbox/get", args)?)?;
        debug!("fetched {} mailboxes", response.list.len());
        Ok(response.list)
    }

    /// Case-insensitive exact name match. When several folders share a
    /// name the first in server list order wins; callers accept that.
    pub fn mailbox_by_name(&self, name: &str) -> Result<Option<Mailbox>, JmapError> {
        let wanted = name.to_lowercase();
        Ok(self
            .list_mailboxes()?
            .into_iter()
            .find(|mb| mb.name.to_lowercase() == wanted))
    }

    /// Exact role match, same first-match policy as `mailbox_by_name`.
    pub fn mailbox_by_role(&self, role: &str) -> Result<Option<Mailbox>, JmapError> {
        Ok(self
            .list_mailboxes()?
            .into_iter()
            .find(|mb| mb.role.as_deref() == Some(role)))
    }

    /// Up to `limit` emails in the folder, newest received first, with a
    /// bounded text body snippet attached when available.
    pub fn list_emails(
        &self,
        mailbox_id: &str,
        limit: u32,
    ) -> Result<Vec<EmailSummary>, JmapError> {
        let account_id = self.account_id();
        let query_args = serde_json::to_value(EmailQueryArgs {
            account_id: account_id.clone(),
            filter: Some(EmailQueryFilter {
                in_mailbox: mailbox_id.to_string(),
            }),
            sort: vec![Comparator {
                property: "receivedAt".to_string(),
                is_ascending: false,
            }],
            limit,
        })?;
        let get_args = serde_json::to_value(EmailGetArgs {
            account_id,
            ids: None,
            ids_ref: Some(ResultReference {
                result_of: "0".to_string(),
                name: "Email/query".to_string(),
                path: "/ids".to_string(),
            }),
            properties: Some(SUMMARY_PROPERTIES.iter().map(|p| p.to_string()).collect()),
            fetch_text_body_values: true,
            max_body_value_bytes: Some(LIST_BODY_VALUE_BYTES),
            ..Default::default()
        })?;

        let request = ApiRequest::new(vec![
            Invocation::new("Email/query", query_args, "0"),
            Invocation::new("Email/get", get_args, "1"),
        ]);
        let response = self.transport.exchange(&request)?;
        let get: GetResponse<EmailSummary> =
            serde_json::from_value(response.method_response("Email/get", "1")?.clone())?;
        Ok(get.list)
    }

    /// Full-detail fetch of one email, every property and all body values.
    pub fn email_by_id(&self, email_id: &str) -> Result<Option<EmailDetail>, JmapError> {
        let args = serde_json::to_value(EmailGetArgs {
            account_id: self.account_id(),
            ids: Some(vec![email_id.to_string()]),
            properties: None,
            fetch_text_body_values: true,
            fetch_html_body_values: true,
            fetch_all_body_values: true,
            ..Default::default()
        })?;
        self.get_single_email(args)
    }

    /// Identity plus current folder membership, the read `file-email`
    /// does before mutating.
    pub fn email_filing_info(&self, email_id: &str) -> Result<Option<EmailFilingInfo>, JmapError> {
        let args = serde_json::to_value(EmailGetArgs {
            account_id: self.account_id(),
            ids: Some(vec![email_id.to_string()]),
            properties: Some(FILING_PROPERTIES.iter().map(|p| p.to_string()).collect()),
            ..Default::default()
        })?;
        self.get_single_email(args)
    }

    fn get_single_email<R: DeserializeOwned>(&self, args: Value) -> Result<Option<R>, JmapError> {
        let response: GetResponse<R> = serde_json::from_value(self.call("Email/get", args)?)?;
        Ok(response.list.into_iter().next())
    }

    // --- Mutation operations ---

    /// Creates a folder under `parent_id`. One create request; the
    /// response either names the new id, carries a rejection, or is a
    /// contract mismatch.
    pub fn create_mailbox(
        &self,
        parent_id: &str,
        name: &str,
    ) -> Result<CreatedMailbox, JmapError> {
        let mut create = HashMap::new();
        create.insert(
            CREATION_ID.to_string(),
            MailboxCreate {
                name: name.to_string(),
                parent_id: parent_id.to_string(),
            },
        );
        let args = serde_json::to_value(MailboxSetArgs {
            account_id: self.account_id(),
            create: Some(create),
            update: None,
        })?;
        let response: SetResponse = serde_json::from_value(self.call("Mailbox/set", args)?)?;

        if !response.not_created.is_empty() {
            return Err(JmapError::rejected(
                "Folder creation",
                response.not_created.get(CREATION_ID),
            ));
        }
        if let Some(created) = response.created.get(CREATION_ID) {
            return Ok(CreatedMailbox {
                id: created.id.clone(),
                name: name.to_string(),
                parent_id: parent_id.to_string(),
            });
        }
        Err(JmapError::UnexpectedResponse(
            "folder creation response did not contain expected data".to_string(),
        ))
    }

    /// Re-parents a folder. Descendants travel with it; that is inherent
    /// to the parent-pointer model, not something this call manages.
    pub fn move_mailbox(&self, mailbox_id: &str, new_parent_id: &str) -> Result<(), JmapError> {
        let mut update = HashMap::new();
        update.insert(mailbox_id.to_string(), json!({ "parentId": new_parent_id }));
        let args = serde_json::to_value(MailboxSetArgs {
            account_id: self.account_id(),
            create: None,
            update: Some(update),
        })?;
        let response: SetResponse = serde_json::from_value(self.call("Mailbox/set", args)?)?;
        interpret_update(&response, mailbox_id, "Folder move")
    }

    /// Files an email into `target_mailbox_id`. A move replaces the whole
    /// membership set without reading it first; a copy reads the current
    /// set and submits the union. The read-then-write of the copy path is
    /// exposed to a lost-update race; the server's own concurrency
    /// control is the only arbiter.
    pub fn file_email(
        &self,
        email_id: &str,
        target_mailbox_id: &str,
        copy: bool,
    ) -> Result<(), JmapError> {
        let new_mailbox_ids = if copy {
            let info = self.email_filing_info(email_id)?.ok_or_else(|| {
                JmapError::UnexpectedResponse(format!(
                    "email {email_id} not found while reading current folder membership"
                ))
            })?;
            let mut ids = info.mailbox_ids;
            ids.insert(target_mailbox_id.to_string(), true);
            ids
        } else {
            let mut ids = HashMap::new();
            ids.insert(target_mailbox_id.to_string(), true);
            ids
        };

        let mut update = HashMap::new();
        update.insert(email_id.to_string(), json!({ "mailboxIds": new_mailbox_ids }));
        let args = serde_json::to_value(EmailSetArgs {
            account_id: self.account_id(),
            update,
        })?;
        let response: SetResponse = serde_json::from_value(self.call("Email/set", args)?)?;
        interpret_update(&response, email_id, "Email filing")
    }
}

/// Shared success/rejection interpretation for update responses. A
/// response that commits neither way is surfaced as a contract mismatch
/// rather than assumed to be success or failure.
fn interpret_update(
    response: &SetResponse,
    id: &str,
    operation: &str,
) -> Result<(), JmapError> {
    if !response.not_updated.is_empty() {
        return Err(JmapError::rejected(operation, response.not_updated.get(id)));
    }
    if response.updated.contains_key(id) {
        return Ok(());
    }
    Err(JmapError::UnexpectedResponse(format!(
        "{operation} response did not contain expected data"
    )))
}
