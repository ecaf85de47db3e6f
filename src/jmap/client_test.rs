use serde_json::json;

use crate::error::JmapError;
use crate::jmap::client::JmapClient;
use crate::jmap::transport::MockJmapTransport;
use crate::test_helpers::{
    mailbox_created_response, mailbox_get_response, para_fixture, response, set_rejected_response,
    set_updated_response, ScriptedTransport,
};

#[test]
fn mailbox_by_name_is_case_insensitive_first_match() {
    let mut folders = para_fixture();
    // A second "inbox" later in the list must lose to the first.
    folders.push(crate::test_helpers::mailbox("mb-dup", "INBOX", None));

    let mut transport = MockJmapTransport::new();
    transport.expect_account_id().return_const("acc-test".to_string());
    let canned = folders.clone();
    transport
        .expect_exchange()
        .returning(move |_| Ok(mailbox_get_response(&canned)));

    let client = JmapClient::new(transport);
    let found = client.mailbox_by_name("inbox").unwrap().unwrap();
    assert_eq!(found.id, "mb-inbox");

    assert!(client.mailbox_by_name("no-such-folder").unwrap().is_none());
}

#[test]
fn mailbox_by_role_matches_exactly() {
    let mut folders = para_fixture();
    folders[0].role = Some("inbox".to_string());

    let transport = ScriptedTransport::new(vec![
        mailbox_get_response(&folders),
        mailbox_get_response(&folders),
    ]);
    let client = JmapClient::new(transport);

    assert_eq!(
        client.mailbox_by_role("inbox").unwrap().unwrap().id,
        "mb-inbox"
    );
    assert!(client.mailbox_by_role("trash").unwrap().is_none());
}

#[test]
fn list_emails_chains_query_and_get() {
    let transport = ScriptedTransport::new(vec![response(vec![
        (
            "Email/query",
            json!({ "accountId": "acc-test", "ids": ["M1"] }),
            "0",
        ),
        (
            "Email/get",
            json!({
                "accountId": "acc-test",
                "list": [{
                    "id": "M1",
                    "subject": "Hello",
                    "receivedAt": "2025-03-14T09:26:53Z",
                    "keywords": { "$seen": true }
                }],
                "notFound": []
            }),
            "1",
        ),
    ])]);
    let client = JmapClient::new(transport);

    let emails = client.list_emails("mb-inbox", 10).unwrap();
    assert_eq!(emails.len(), 1);
    assert_eq!(emails[0].subject.as_deref(), Some("Hello"));

    // One round trip carrying both method calls, the get keyed off the
    // query result.
    let requests = client.transport().requests();
    assert_eq!(requests.len(), 1);
    let calls = &requests[0].method_calls;
    assert_eq!(calls[0].0, "Email/query");
    assert_eq!(calls[0].1["sort"][0]["property"], "receivedAt");
    assert_eq!(calls[0].1["sort"][0]["isAscending"], false);
    assert_eq!(calls[0].1["limit"], 10);
    assert_eq!(calls[1].0, "Email/get");
    assert_eq!(calls[1].1["#ids"]["resultOf"], "0");
    assert_eq!(calls[1].1["maxBodyValueBytes"], 5000);
}

#[test]
fn file_email_move_issues_no_read() {
    let transport = ScriptedTransport::new(vec![set_updated_response("Email/set", "M1")]);
    let client = JmapClient::new(transport);

    client.file_email("M1", "mb-target", false).unwrap();

    assert_eq!(client.transport().called_methods(), vec!["Email/set"]);
    let requests = client.transport().requests();
    let update = &requests[0].method_calls[0].1["update"]["M1"]["mailboxIds"];
    assert_eq!(*update, json!({ "mb-target": true }));
}

#[test]
fn file_email_copy_reads_then_unions_membership() {
    let transport = ScriptedTransport::new(vec![
        response(vec![(
            "Email/get",
            json!({
                "accountId": "acc-test",
                "list": [{ "id": "M1", "mailboxIds": { "mb-x": true } }],
                "notFound": []
            }),
            "0",
        )]),
        set_updated_response("Email/set", "M1"),
    ]);
    let client = JmapClient::new(transport);

    client.file_email("M1", "mb-target", true).unwrap();

    assert_eq!(
        client.transport().called_methods(),
        vec!["Email/get", "Email/set"]
    );
    let requests = client.transport().requests();
    let update = &requests[1].method_calls[0].1["update"]["M1"]["mailboxIds"];
    assert_eq!(*update, json!({ "mb-x": true, "mb-target": true }));
}

#[test]
fn create_mailbox_returns_assigned_id() {
    let transport =
        ScriptedTransport::new(vec![mailbox_created_response("new-folder", "mb-new")]);
    let client = JmapClient::new(transport);

    let created = client.create_mailbox("mb-projects", "Q3 launch").unwrap();
    assert_eq!(created.id, "mb-new");
    assert_eq!(created.name, "Q3 launch");
    assert_eq!(created.parent_id, "mb-projects");

    let requests = client.transport().requests();
    let create = &requests[0].method_calls[0].1["create"]["new-folder"];
    assert_eq!(create["name"], "Q3 launch");
    assert_eq!(create["parentId"], "mb-projects");
}

#[test]
fn create_mailbox_surfaces_server_rejection() {
    let transport = ScriptedTransport::new(vec![response(vec![(
        "Mailbox/set",
        json!({
            "notCreated": {
                "new-folder": { "type": "invalidProperties", "description": "name in use" }
            }
        }),
        "0",
    )])]);
    let client = JmapClient::new(transport);

    let err = client.create_mailbox("mb-projects", "dup").unwrap_err();
    assert!(matches!(err, JmapError::MutationRejected { .. }));
    assert!(err.to_string().contains("invalidProperties"));
    assert!(err.to_string().contains("name in use"));
}

#[test]
fn move_mailbox_success_and_rejection() {
    let transport = ScriptedTransport::new(vec![
        set_updated_response("Mailbox/set", "mb-proj1"),
        set_rejected_response("Mailbox/set", "mb-proj1", "forbidden", "read-only share"),
    ]);
    let client = JmapClient::new(transport);

    client.move_mailbox("mb-proj1", "mb-archives").unwrap();
    let err = client.move_mailbox("mb-proj1", "mb-archives").unwrap_err();
    assert!(matches!(err, JmapError::MutationRejected { .. }));

    let requests = client.transport().requests();
    assert_eq!(
        requests[0].method_calls[0].1["update"]["mb-proj1"]["parentId"],
        "mb-archives"
    );
}

#[test]
fn empty_set_response_is_a_contract_mismatch() {
    // Neither updated nor notUpdated: the client cannot tell commit from
    // failure and must say so rather than guess.
    let transport =
        ScriptedTransport::new(vec![response(vec![("Email/set", json!({}), "0")])]);
    let client = JmapClient::new(transport);

    let err = client.file_email("M1", "mb-target", false).unwrap_err();
    assert!(matches!(err, JmapError::UnexpectedResponse(_)));
}

#[test]
fn server_error_invocation_surfaces_as_api_error() {
    let transport = ScriptedTransport::new(vec![response(vec![(
        "error",
        json!({ "type": "accountNotFound", "description": "unknown account" }),
        "0",
    )])]);
    let client = JmapClient::new(transport);

    let err = client.list_mailboxes().unwrap_err();
    assert!(matches!(err, JmapError::Api(_)));
    assert!(err.to_string().contains("accountNotFound"));
}
