use std::io::BufRead;
use std::process::ExitCode;

use crate::error::JmapError;
use crate::jmap::client::JmapClient;
use crate::jmap::transport::JmapTransport;
use crate::output::{banner, confirm, truncate};
use crate::para::{find_para_folder, PARA_ROOTS};

pub struct FileEmailArgs<'a> {
    pub email_id: &'a str,
    pub folder_name: &'a str,
    pub copy: bool,
    pub yes: bool,
    pub max_depth: Option<u32>,
}

pub fn run<T: JmapTransport>(
    client: &JmapClient<T>,
    args: &FileEmailArgs<'_>,
    input: &mut impl BufRead,
) -> Result<ExitCode, JmapError> {
    println!("Retrieving email {}...", args.email_id);
    let Some(email) = client.email_filing_info(args.email_id)? else {
        println!("Error: Email '{}' not found", args.email_id);
        return Ok(ExitCode::FAILURE);
    };

    let subject = email.subject.as_deref().unwrap_or("(No subject)");
    println!("✓ Found email");
    println!("  Subject: {subject}");
    if let Some(from) = email.from.first() {
        println!("  From: {}", from.display());
    }
    println!(
        "  Received: {}",
        email.received_at.as_deref().unwrap_or("unknown")
    );

    // One mailbox fetch serves both the current-location display and the
    // PARA search.
    let mailboxes = client.list_mailboxes()?;
    if !email.mailbox_ids.is_empty() {
        println!("  Current location(s):");
        for mailbox_id in email.mailbox_ids.keys() {
            let name = mailboxes
                .iter()
                .find(|mb| &mb.id == mailbox_id)
                .map(|mb| mb.name.as_str())
                .unwrap_or(mailbox_id.as_str());
            println!("    - {name}");
        }
    }
    println!();

    println!(
        "Searching for folder '{}' in PARA structure...",
        args.folder_name
    );
    let depth_msg = match args.max_depth {
        Some(depth) => format!("max depth: {depth}"),
        None => "unlimited depth".to_string(),
    };
    println!("  Searching: {} ({depth_msg})\n", PARA_ROOTS.join(", "));

    let Some(target) = find_para_folder(&mailboxes, args.folder_name, args.max_depth) else {
        println!("Error: Folder '{}' not found", args.folder_name);
        if let Some(depth) = args.max_depth {
            println!("\nSearched up to {depth} level(s) deep in:");
        } else {
            println!("\nSearched all descendants of:");
        }
        for root in PARA_ROOTS {
            println!("  - {root}");
        }
        println!("\nUse 'paramail list-folders' to see available folders");
        if args.max_depth.is_some() {
            println!("Or try without --max-depth to search the entire hierarchy");
        }
        return Ok(ExitCode::FAILURE);
    };

    println!("✓ Found target folder: {}", args.folder_name);
    println!("  ID: {}", target.mailbox.id);
    println!("  Location: {}\n", target.para_parent);

    let operation = if args.copy { "copy" } else { "move" };
    println!("Ready to {operation} email");
    println!("  Email: {}", truncate(subject, 60));
    println!("  To: {}/{}", target.para_parent, args.folder_name);
    if args.copy {
        println!("  Note: Email will remain in current location(s)");
    } else {
        println!("  Note: Email will be removed from current location(s)");
    }
    println!();

    if args.yes {
        println!("Auto-confirming (--yes flag provided)\n");
    } else if !confirm(input)? {
        println!("Cancelled.");
        return Ok(ExitCode::SUCCESS);
    }

    println!("\nFiling email...");
    client.file_email(args.email_id, &target.mailbox.id, args.copy)?;

    let operation_past = if args.copy { "copied" } else { "moved" };
    println!("\n{}", banner());
    println!("SUCCESS: Email {operation_past}");
    println!("{}", banner());
    println!("Email: {}", truncate(subject, 60));
    println!("Filed to: {}/{}", target.para_parent, args.folder_name);
    if args.copy {
        println!("Operation: Copied (kept in original location)");
    } else {
        println!("Operation: Moved (removed from original location)");
    }
    println!("{}", banner());

    Ok(ExitCode::SUCCESS)
}
