use std::process::ExitCode;

use crate::error::JmapError;
use crate::jmap::client::JmapClient;
use crate::jmap::transport::JmapTransport;
use crate::output::banner;

pub fn run<T: JmapTransport>(
    client: &JmapClient<T>,
    parent: &str,
    name: &str,
) -> Result<ExitCode, JmapError> {
    println!("Looking for parent folder '{parent}'...");
    let Some(parent_mailbox) = client.mailbox_by_name(parent)? else {
        println!("Error: Parent folder '{parent}' not found");
        println!("\nUse 'paramail list-folders' to see available folders");
        return Ok(ExitCode::FAILURE);
    };
    println!(
        "Found parent folder: {parent} (ID: {})",
        parent_mailbox.id
    );

    println!("\nCreating subfolder '{name}' in '{parent}'...");
    let created = client.create_mailbox(&parent_mailbox.id, name)?;

    println!("\n{}", banner());
    println!("SUCCESS: Folder created");
    println!("{}", banner());
    println!("Name: {}", created.name);
    println!("ID: {}", created.id);
    println!("Parent: {parent} ({})", created.parent_id);
    println!("{}", banner());

    Ok(ExitCode::SUCCESS)
}
