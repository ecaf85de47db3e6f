use std::collections::HashMap;
use std::process::ExitCode;

use crate::error::JmapError;
use crate::jmap::client::JmapClient;
use crate::jmap::transport::JmapTransport;
use crate::jmap::types::Mailbox;
use crate::output::banner;
use crate::para::children_map;

pub fn run<T: JmapTransport>(
    client: &JmapClient<T>,
    start: Option<&str>,
    max_depth: Option<u32>,
) -> Result<ExitCode, JmapError> {
    let mailboxes = client.list_mailboxes()?;
    if mailboxes.is_empty() {
        println!("No folders found.");
        return Ok(ExitCode::SUCCESS);
    }

    let children = children_map(&mailboxes);

    if let Some(start_name) = start {
        let wanted = start_name.to_lowercase();
        let Some(start_mailbox) = mailboxes.iter().find(|mb| mb.name.to_lowercase() == wanted)
        else {
            // A display miss is a normal result, not a failure.
            println!("Error: Folder '{start_name}' not found");
            return Ok(ExitCode::SUCCESS);
        };

        println!("{}", banner());
        println!("Folder Hierarchy starting from: {}", start_mailbox.name);
        if let Some(depth) = max_depth {
            println!("Maximum depth: {depth}");
        }
        println!("{}\n", banner());

        display_folder(start_mailbox, &children, 0, max_depth, 0);
    } else {
        println!("{}", banner());
        println!("Folder Hierarchy");
        println!("Found {} folder(s)", mailboxes.len());
        if let Some(depth) = max_depth {
            println!("Maximum depth: {depth}");
        }
        println!("{}\n", banner());

        for root in sorted_for_display(children.get(&None)) {
            display_folder(root, &children, 0, max_depth, 0);
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Siblings are ordered by `sortOrder` for display only; search order is
/// independent of it.
fn sorted_for_display<'a>(group: Option<&Vec<&'a Mailbox>>) -> Vec<&'a Mailbox> {
    let mut sorted: Vec<&Mailbox> = group.map(|g| g.to_vec()).unwrap_or_default();
    sorted.sort_by_key(|mb| mb.sort_order);
    sorted
}

fn display_folder(
    mailbox: &Mailbox,
    children: &HashMap<Option<&str>, Vec<&Mailbox>>,
    indent: usize,
    max_depth: Option<u32>,
    current_depth: u32,
) {
    if matches!(max_depth, Some(max) if current_depth >= max) {
        return;
    }

    let pad = "  ".repeat(indent);
    let role = mailbox
        .role
        .as_deref()
        .map(|r| format!(" [{r}]"))
        .unwrap_or_default();

    println!("{pad}{}{role}", mailbox.name);
    println!("{pad}  ID: {}", mailbox.id);
    println!(
        "{pad}  Emails: {} unread / {} total",
        mailbox.unread_emails, mailbox.total_emails
    );
    if mailbox.total_threads > 0 {
        println!(
            "{pad}  Threads: {} unread / {} total",
            mailbox.unread_threads, mailbox.total_threads
        );
    }
    println!();

    for child in sorted_for_display(children.get(&Some(mailbox.id.as_str()))) {
        display_folder(child, children, indent + 1, max_depth, current_depth + 1);
    }
}
