use std::io::BufRead;
use std::process::ExitCode;

use crate::error::JmapError;
use crate::jmap::client::JmapClient;
use crate::jmap::transport::JmapTransport;
use crate::output::{banner, confirm};
use crate::para::{find_para_folder, ARCHIVE_ROOT, PARA_ROOTS};

pub struct ArchiveFolderArgs<'a> {
    pub folder_name: &'a str,
    pub dry_run: bool,
    pub yes: bool,
}

pub fn run<T: JmapTransport>(
    client: &JmapClient<T>,
    args: &ArchiveFolderArgs<'_>,
    input: &mut impl BufRead,
) -> Result<ExitCode, JmapError> {
    println!("Looking for archive folder '{ARCHIVE_ROOT}'...");
    let Some(archive) = client.mailbox_by_name(ARCHIVE_ROOT)? else {
        println!("Error: Archive folder '{ARCHIVE_ROOT}' not found");
        println!("\nThe PARA structure requires a folder named '{ARCHIVE_ROOT}' to exist.");
        println!("Use 'paramail list-folders' to see available folders");
        return Ok(ExitCode::FAILURE);
    };
    println!("✓ Found archive folder (ID: {})\n", archive.id);

    println!(
        "Searching for folder '{}' in PARA structure...",
        args.folder_name
    );
    println!("  Searching: {} (one level deep)\n", PARA_ROOTS.join(", "));

    let mailboxes = client.list_mailboxes()?;
    // Archiving only considers immediate children of the PARA roots.
    let Some(found) = find_para_folder(&mailboxes, args.folder_name, Some(1)) else {
        println!("Error: Folder '{}' not found", args.folder_name);
        println!("\nSearched in immediate subfolders of:");
        for root in PARA_ROOTS {
            println!("  - {root}");
        }
        println!("\nUse 'paramail list-folders' to see available folders");
        return Ok(ExitCode::FAILURE);
    };

    println!("✓ Found folder: {}", args.folder_name);
    println!("  ID: {}", found.mailbox.id);
    println!("  Current location: {}", found.para_parent);
    println!("  Total emails: {}", found.mailbox.total_emails);
    println!("  Unread emails: {}\n", found.mailbox.unread_emails);

    if args.dry_run {
        println!("DRY RUN MODE - No changes will be made");
        println!(
            "\nWould move '{}' from '{}' to '{ARCHIVE_ROOT}'",
            args.folder_name, found.para_parent
        );
        println!("Run without --dry-run to perform the actual move");
        return Ok(ExitCode::SUCCESS);
    }

    println!("Ready to archive '{}'", args.folder_name);
    println!("  From: {}", found.para_parent);
    println!("  To: {ARCHIVE_ROOT}\n");

    if args.yes {
        println!("Auto-confirming (--yes flag provided)\n");
    } else if !confirm(input)? {
        println!("Cancelled.");
        return Ok(ExitCode::SUCCESS);
    }

    println!("\nArchiving folder...");
    client.move_mailbox(&found.mailbox.id, &archive.id)?;

    println!("\n{}", banner());
    println!("SUCCESS: Folder archived");
    println!("{}", banner());
    println!("Folder: {}", args.folder_name);
    println!("Moved from: {}", found.para_parent);
    println!("Moved to: {ARCHIVE_ROOT}");
    println!("{}", banner());

    Ok(ExitCode::SUCCESS)
}
