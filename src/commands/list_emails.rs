use std::process::ExitCode;

use crate::error::JmapError;
use crate::jmap::client::JmapClient;
use crate::jmap::transport::JmapTransport;
use crate::jmap::types::{status_line, EmailSummary, Mailbox};
use crate::output::{banner, format_datetime, rule, truncate};

const PREVIEW_CHARS: usize = 200;
const BODY_CHARS: usize = 300;

/// Special-folder fallback when no folder matches the name directly.
const ROLE_FALLBACK: &[(&str, &str)] = &[
    ("inbox", "inbox"),
    ("sent", "sent"),
    ("sent items", "sent"),
    ("trash", "trash"),
    ("junk", "junk"),
    ("junk mail", "junk"),
    ("drafts", "drafts"),
    ("archive", "archive"),
];

pub fn run<T: JmapTransport>(
    client: &JmapClient<T>,
    folder: &str,
    limit: u32,
    show_ids: bool,
    json: bool,
) -> Result<ExitCode, JmapError> {
    let Some(mailbox) = find_mailbox(client, folder)? else {
        println!("Error: Folder '{folder}' not found");
        println!("\nUse 'paramail list-folders' to see available folders");
        return Ok(ExitCode::SUCCESS);
    };

    if !json {
        println!(
            "Fetching {limit} most recent emails from '{}'...\n",
            mailbox.name
        );
    }

    let emails = client.list_emails(&mailbox.id, limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&emails)?);
        return Ok(ExitCode::SUCCESS);
    }

    display_emails(&emails, &mailbox.name, show_ids);
    Ok(ExitCode::SUCCESS)
}

fn find_mailbox<T: JmapTransport>(
    client: &JmapClient<T>,
    folder: &str,
) -> Result<Option<Mailbox>, JmapError> {
    if let Some(mailbox) = client.mailbox_by_name(folder)? {
        return Ok(Some(mailbox));
    }
    let lowered = folder.to_lowercase();
    match ROLE_FALLBACK.iter().find(|(name, _)| *name == lowered) {
        Some((_, role)) => client.mailbox_by_role(role),
        None => Ok(None),
    }
}

fn display_emails(emails: &[EmailSummary], folder_name: &str, show_ids: bool) {
    if emails.is_empty() {
        println!("No emails found in {folder_name}.");
        return;
    }

    println!("{}", banner());
    println!("Folder: {folder_name}");
    println!("Found {} email(s)", emails.len());
    println!("{}\n", banner());

    for (idx, email) in emails.iter().enumerate() {
        let subject = email.subject.as_deref().unwrap_or("(No subject)");
        let from = email
            .from
            .iter()
            .map(|addr| addr.display())
            .collect::<Vec<_>>()
            .join(", ");

        println!("[{}] {subject}", idx + 1);
        if show_ids {
            println!("    ID: {}", email.id);
        }
        println!("    From: {from}");
        println!(
            "    Date: {}",
            format_datetime(email.received_at.as_deref().unwrap_or(""))
        );
        println!(
            "    Status: {}",
            status_line(&email.keywords, email.has_attachment)
        );
        if let Some(preview) = email.preview.as_deref().filter(|p| !p.is_empty()) {
            println!("    Preview: {}", truncate(preview, PREVIEW_CHARS));
        }
        if let Some(body) = email.body_values.values().next() {
            let text = body.value.trim();
            if !text.is_empty() {
                println!("    Body: {}", truncate(text, BODY_CHARS));
            }
        }
        println!("{}\n", rule());
    }
}
