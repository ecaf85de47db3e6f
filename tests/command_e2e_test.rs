//! End-to-end command flows over a scripted transport: each test drives a
//! whole subcommand and asserts the exact remote calls it made.

use std::io::Cursor;
use std::process::ExitCode;

use paramail::commands::archive_folder::{self, ArchiveFolderArgs};
use paramail::commands::create_folder;
use paramail::commands::file_email::{self, FileEmailArgs};
use paramail::jmap::client::JmapClient;
use paramail::para::{find_para_folder, ARCHIVE_ROOT};
use paramail::test_helpers::{
    mailbox, mailbox_created_response, mailbox_get_response, para_fixture, response,
    set_updated_response, ScriptedTransport,
};
use serde_json::json;

fn assert_exit(actual: ExitCode, expected: ExitCode) {
    assert_eq!(format!("{actual:?}"), format!("{expected:?}"));
}

#[test]
fn archive_folder_moves_project_under_archives() {
    let fixture = para_fixture();
    let transport = ScriptedTransport::new(vec![
        mailbox_get_response(&fixture), // 400_archives lookup
        mailbox_get_response(&fixture), // PARA search
        set_updated_response("Mailbox/set", "mb-proj1"),
    ]);
    let client = JmapClient::new(transport);

    let code = archive_folder::run(
        &client,
        &ArchiveFolderArgs {
            folder_name: "2025-Q1_website-redesign",
            dry_run: false,
            yes: true,
        },
        &mut Cursor::new(""),
    )
    .unwrap();

    assert_exit(code, ExitCode::SUCCESS);
    assert_eq!(
        client.transport().called_methods(),
        vec!["Mailbox/get", "Mailbox/get", "Mailbox/set"]
    );
    // The folder's new parent is 400_archives's id.
    let requests = client.transport().requests();
    assert_eq!(
        requests[2].method_calls[0].1["update"]["mb-proj1"]["parentId"],
        "mb-archives"
    );

    // The resolver reported the folder under 100_projects.
    let located = find_para_folder(&fixture, "2025-Q1_website-redesign", Some(1)).unwrap();
    assert_eq!(located.para_parent, "100_projects");
    assert_eq!(
        fixture.iter().find(|mb| mb.name == ARCHIVE_ROOT).unwrap().id,
        "mb-archives"
    );
}

#[test]
fn archive_folder_only_sees_immediate_children() {
    let mut fixture = para_fixture();
    fixture.push(mailbox("mb-deep", "meeting-notes", Some("mb-proj1")));
    let transport = ScriptedTransport::new(vec![
        mailbox_get_response(&fixture),
        mailbox_get_response(&fixture),
    ]);
    let client = JmapClient::new(transport);

    let code = archive_folder::run(
        &client,
        &ArchiveFolderArgs {
            folder_name: "meeting-notes",
            dry_run: false,
            yes: true,
        },
        &mut Cursor::new(""),
    )
    .unwrap();

    // Grandchild of a PARA root: not found, exit 1, nothing mutated.
    assert_exit(code, ExitCode::FAILURE);
    assert_eq!(
        client.transport().called_methods(),
        vec!["Mailbox/get", "Mailbox/get"]
    );
}

#[test]
fn archive_dry_run_mutates_nothing() {
    let fixture = para_fixture();
    let transport = ScriptedTransport::new(vec![
        mailbox_get_response(&fixture),
        mailbox_get_response(&fixture),
    ]);
    let client = JmapClient::new(transport);

    let code = archive_folder::run(
        &client,
        &ArchiveFolderArgs {
            folder_name: "2025-Q1_website-redesign",
            dry_run: true,
            yes: false,
        },
        &mut Cursor::new(""),
    )
    .unwrap();

    assert_exit(code, ExitCode::SUCCESS);
    assert_eq!(
        client.transport().called_methods(),
        vec!["Mailbox/get", "Mailbox/get"]
    );
}

#[test]
fn declined_confirmation_cancels_with_no_mutation() {
    let fixture = para_fixture();
    let transport = ScriptedTransport::new(vec![
        response(vec![(
            "Email/get",
            json!({
                "accountId": "acc-test",
                "list": [{
                    "id": "M1",
                    "subject": "Quarterly numbers",
                    "mailboxIds": { "mb-inbox": true },
                    "receivedAt": "2025-03-14T09:26:53Z"
                }],
                "notFound": []
            }),
            "0",
        )]),
        mailbox_get_response(&fixture),
    ]);
    let client = JmapClient::new(transport);

    let code = file_email::run(
        &client,
        &FileEmailArgs {
            email_id: "M1",
            folder_name: "2025-Q1_website-redesign",
            copy: false,
            yes: false,
            max_depth: None,
        },
        &mut Cursor::new("n\n"),
    )
    .unwrap();

    // Cancellation is not an error and issues zero mutation calls.
    assert_exit(code, ExitCode::SUCCESS);
    assert_eq!(
        client.transport().called_methods(),
        vec!["Email/get", "Mailbox/get"]
    );
}

#[test]
fn file_email_moves_after_confirmation() {
    let fixture = para_fixture();
    let transport = ScriptedTransport::new(vec![
        response(vec![(
            "Email/get",
            json!({
                "accountId": "acc-test",
                "list": [{
                    "id": "M1",
                    "subject": "Quarterly numbers",
                    "mailboxIds": { "mb-inbox": true, "mb-sent": true },
                    "receivedAt": "2025-03-14T09:26:53Z"
                }],
                "notFound": []
            }),
            "0",
        )]),
        mailbox_get_response(&fixture),
        set_updated_response("Email/set", "M1"),
    ]);
    let client = JmapClient::new(transport);

    let code = file_email::run(
        &client,
        &FileEmailArgs {
            email_id: "M1",
            folder_name: "Team Management",
            copy: false,
            yes: false,
            max_depth: None,
        },
        &mut Cursor::new("yes\n"),
    )
    .unwrap();

    assert_exit(code, ExitCode::SUCCESS);
    // A move replaces the whole membership set in one write, no prior
    // read beyond the initial display fetch.
    let requests = client.transport().requests();
    assert_eq!(
        requests[2].method_calls[0].1["update"]["M1"]["mailboxIds"],
        json!({ "mb-area1": true })
    );
}

#[test]
fn file_email_missing_email_fails_before_searching() {
    let transport = ScriptedTransport::new(vec![response(vec![(
        "Email/get",
        json!({ "accountId": "acc-test", "list": [], "notFound": ["M404"] }),
        "0",
    )])]);
    let client = JmapClient::new(transport);

    let code = file_email::run(
        &client,
        &FileEmailArgs {
            email_id: "M404",
            folder_name: "Team Management",
            copy: false,
            yes: true,
            max_depth: None,
        },
        &mut Cursor::new(""),
    )
    .unwrap();

    assert_exit(code, ExitCode::FAILURE);
    assert_eq!(client.transport().called_methods(), vec!["Email/get"]);
}

#[test]
fn create_then_lookup_round_trip() {
    let mut after_create = para_fixture();
    after_create.push(mailbox("mb-new", "Design Templates", Some("mb-resources")));

    let transport = ScriptedTransport::new(vec![
        mailbox_get_response(&para_fixture()), // parent lookup
        mailbox_created_response("new-folder", "mb-new"),
        mailbox_get_response(&after_create), // post-create lookup
    ]);
    let client = JmapClient::new(transport);

    let code = create_folder::run(&client, "300_resources", "Design Templates").unwrap();
    assert_exit(code, ExitCode::SUCCESS);

    let found = client.mailbox_by_name("Design Templates").unwrap().unwrap();
    assert_eq!(found.parent_id.as_deref(), Some("mb-resources"));
}
