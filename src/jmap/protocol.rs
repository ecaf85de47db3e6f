//! JMAP (RFC 8620 / RFC 8621) request and response envelope types.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::JmapError;

pub const CORE_CAPABILITY: &str = "urn:ietf:params:jmap:core";
pub const MAIL_CAPABILITY: &str = "urn:ietf:params:jmap:mail";

/// A method call or method response: `[name, arguments, callId]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invocation(pub String, pub Value, pub String);

impl Invocation {
    pub fn new(name: &str, args: Value, call_id: &str) -> Self {
        Invocation(name.to_string(), args, call_id.to_string())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequest {
    pub using: Vec<String>,
    pub method_calls: Vec<Invocation>,
}

impl ApiRequest {
    pub fn new(method_calls: Vec<Invocation>) -> Self {
        ApiRequest {
            using: vec![CORE_CAPABILITY.to_string(), MAIL_CAPABILITY.to_string()],
            method_calls,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub method_responses: Vec<Invocation>,
    #[serde(default)]
    pub session_state: Option<String>,
}

impl ApiResponse {
    /// Returns the arguments of the response matching `call_id` for the
    /// expected method. A server-level `error` invocation in that slot is
    /// surfaced as an `Api` error; a missing slot is a contract mismatch.
    pub fn method_response(&self, method: &str, call_id: &str) -> Result<&Value, JmapError> {
        for Invocation(name, args, id) in &self.method_responses {
            if id != call_id {
                continue;
            }
            if name == "error" {
                let error_type = args
                    .get("type")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown");
                let description = args
                    .get("description")
                    .and_then(Value::as_str)
                    .unwrap_or("no description");
                return Err(JmapError::Api(format!("{error_type}: {description}")));
            }
            if name == method {
                return Ok(args);
            }
        }
        Err(JmapError::UnexpectedResponse(format!(
            "no {method} response for call {call_id}"
        )))
    }
}

/// The session object obtained from `/.well-known/jmap`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub api_url: String,
    #[serde(default)]
    pub primary_accounts: HashMap<String, String>,
}

impl Session {
    pub fn mail_account_id(&self) -> Result<&str, JmapError> {
        self.primary_accounts
            .get(MAIL_CAPABILITY)
            .map(String::as_str)
            .ok_or_else(|| {
                JmapError::Connection("session has no primary mail account".to_string())
            })
    }
}

// --- Method arguments ---

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MailboxGetArgs {
    pub account_id: String,
    /// `None` requests every mailbox in the account.
    pub ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MailboxCreate {
    pub name: String,
    pub parent_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MailboxSetArgs {
    pub account_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create: Option<HashMap<String, MailboxCreate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<HashMap<String, Value>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparator {
    pub property: String,
    pub is_ascending: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailQueryFilter {
    pub in_mailbox: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailQueryArgs {
    pub account_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<EmailQueryFilter>,
    pub sort: Vec<Comparator>,
    pub limit: u32,
}

/// Back-reference to a previous method call in the same request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultReference {
    pub result_of: String,
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailGetArgs {
    pub account_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,
    #[serde(rename = "#ids", skip_serializing_if = "Option::is_none")]
    pub ids_ref: Option<ResultReference>,
    /// `None` requests all properties.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<String>>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub fetch_text_body_values: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub fetch_html_body_values: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub fetch_all_body_values: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_body_value_bytes: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailSetArgs {
    pub account_id: String,
    pub update: HashMap<String, Value>,
}

// --- Method responses ---

/// `Foo/get` response; `T` is the normalized record for the requested
/// properties.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetResponse<T> {
    #[serde(default = "Vec::new")]
    pub list: Vec<T>,
    #[serde(default)]
    pub not_found: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedRecord {
    pub id: String,
}

/// Server-supplied detail for a record that could not be created or
/// updated.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetError {
    #[serde(rename = "type")]
    pub error_type: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl fmt::Display for SetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(desc) => write!(f, "{} ({desc})", self.error_type),
            None => write!(f, "{}", self.error_type),
        }
    }
}

/// `Foo/set` response, shared by `Mailbox/set` and `Email/set`. The
/// `updated` values are server-set property patches and carry no
/// information we use beyond key membership.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetResponse {
    #[serde(default)]
    pub created: HashMap<String, CreatedRecord>,
    #[serde(default)]
    pub not_created: HashMap<String, SetError>,
    #[serde(default)]
    pub updated: HashMap<String, Option<Value>>,
    #[serde(default)]
    pub not_updated: HashMap<String, SetError>,
}
