use clap::{Parser, Subcommand};

use crate::config::TokenScope;
use crate::para::PARA_ROOTS;

#[derive(Debug, Parser)]
#[command(
    name = "paramail",
    version,
    about = "Organize email on a JMAP server with the PARA folder convention"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the folder hierarchy
    ListFolders {
        /// Starting folder name (default: all folders from the root)
        #[arg(long)]
        start: Option<String>,
        /// Maximum depth to display (default: unlimited)
        #[arg(long)]
        max_depth: Option<u32>,
    },

    /// List emails from a folder
    ListEmails {
        /// Folder name to list emails from
        #[arg(long, default_value = "Inbox")]
        folder: String,
        /// Maximum number of emails to retrieve
        #[arg(long, default_value_t = 10)]
        limit: u32,
        /// Show email IDs in the output
        #[arg(long)]
        show_ids: bool,
        /// Output JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Show full details of one email
    GetEmail {
        /// JMAP email id to retrieve
        email_id: String,
        /// Output JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Create a subfolder under a PARA parent folder
    CreateFolder {
        /// Parent PARA folder
        #[arg(long, required = true, value_parser = clap::builder::PossibleValuesParser::new(PARA_ROOTS))]
        parent: String,
        /// Name of the new subfolder
        #[arg(long, required = true)]
        name: String,
    },

    /// Move or copy an email into a PARA subfolder
    FileEmail {
        /// Id of the email to file
        email_id: String,
        /// Name of the target folder (exact match)
        folder_name: String,
        /// Copy instead of move (keeps the email in its current folders)
        #[arg(long)]
        copy: bool,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
        /// Maximum search depth in the PARA folders (default: unlimited)
        #[arg(long)]
        max_depth: Option<u32>,
    },

    /// Move a PARA folder into 400_archives
    ArchiveFolder {
        /// Name of the folder to archive (exact match)
        folder_name: String,
        /// Show what would be archived without moving anything
        #[arg(long)]
        dry_run: bool,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

impl Command {
    /// Mutating commands need the read-write token; everything else runs
    /// read-only.
    pub fn token_scope(&self) -> TokenScope {
        match self {
            Command::ListFolders { .. } | Command::ListEmails { .. } | Command::GetEmail { .. } => {
                TokenScope::ReadOnly
            }
            Command::CreateFolder { .. }
            | Command::FileEmail { .. }
            | Command::ArchiveFolder { .. } => TokenScope::ReadWrite,
        }
    }
}
