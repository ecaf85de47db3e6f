//! Scripted transport and fixtures shared by unit and integration tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use serde_json::{json, Value};

use crate::error::JmapError;
use crate::jmap::protocol::{ApiRequest, ApiResponse, Invocation};
use crate::jmap::transport::JmapTransport;
use crate::jmap::types::Mailbox;

pub const TEST_ACCOUNT: &str = "acc-test";

/// A transport that replays canned responses in order and records every
/// request it sees.
pub struct ScriptedTransport {
    responses: RefCell<VecDeque<ApiResponse>>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<ApiResponse>) -> Self {
        ScriptedTransport {
            responses: RefCell::new(responses.into()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn exchange_count(&self) -> usize {
        self.requests.borrow().len()
    }

    /// Names of the methods called, in order, across all exchanges.
    pub fn called_methods(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .flat_map(|req| req.method_calls.iter().map(|inv| inv.0.clone()))
            .collect()
    }
}

impl JmapTransport for ScriptedTransport {
    fn exchange(&self, request: &ApiRequest) -> Result<ApiResponse, JmapError> {
        self.requests.borrow_mut().push(request.clone());
        self.responses.borrow_mut().pop_front().ok_or_else(|| {
            JmapError::UnexpectedResponse("scripted transport exhausted".to_string())
        })
    }

    fn account_id(&self) -> String {
        TEST_ACCOUNT.to_string()
    }
}

pub fn response(invocations: Vec<(&str, Value, &str)>) -> ApiResponse {
    ApiResponse {
        method_responses: invocations
            .into_iter()
            .map(|(name, args, call_id)| Invocation::new(name, args, call_id))
            .collect(),
        session_state: None,
    }
}

pub fn mailbox(id: &str, name: &str, parent: Option<&str>) -> Mailbox {
    Mailbox {
        id: id.to_string(),
        name: name.to_string(),
        role: None,
        parent_id: parent.map(str::to_string),
        sort_order: 0,
        total_emails: 0,
        unread_emails: 0,
        total_threads: 0,
        unread_threads: 0,
    }
}

/// The eight-folder PARA account: the usual special folders plus the four
/// PARA roots, with one project and one area subfolder.
pub fn para_fixture() -> Vec<Mailbox> {
    vec![
        mailbox("mb-inbox", "Inbox", None),
        mailbox("mb-sent", "Sent Items", None),
        mailbox("mb-projects", "100_projects", None),
        mailbox("mb-proj1", "2025-Q1_website-redesign", Some("mb-projects")),
        mailbox("mb-areas", "200_areas", None),
        mailbox("mb-area1", "Team Management", Some("mb-areas")),
        mailbox("mb-resources", "300_resources", None),
        mailbox("mb-archives", "400_archives", None),
    ]
}

/// A `Mailbox/get` response listing the given folders.
pub fn mailbox_get_response(mailboxes: &[Mailbox]) -> ApiResponse {
    response(vec![(
        "Mailbox/get",
        json!({
            "accountId": TEST_ACCOUNT,
            "state": "state-1",
            "list": serde_json::to_value(mailboxes).expect("mailboxes serialize"),
            "notFound": [],
        }),
        "0",
    )])
}

/// A `Mailbox/set` or `Email/set` response reporting `id` as updated.
pub fn set_updated_response(method: &str, id: &str) -> ApiResponse {
    response(vec![(
        method,
        json!({ "updated": { id: null }, "notUpdated": {} }),
        "0",
    )])
}

/// A set response rejecting `id` with a server error.
pub fn set_rejected_response(
    method: &str,
    id: &str,
    error_type: &str,
    description: &str,
) -> ApiResponse {
    response(vec![(
        method,
        json!({
            "notUpdated": { id: { "type": error_type, "description": description } }
        }),
        "0",
    )])
}

/// A `Mailbox/set` response for a successful create.
pub fn mailbox_created_response(creation_id: &str, new_id: &str) -> ApiResponse {
    response(vec![(
        "Mailbox/set",
        json!({ "created": { creation_id: { "id": new_id } } }),
        "0",
    )])
}
