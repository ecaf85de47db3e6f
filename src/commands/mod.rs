//! One module per subcommand; each owns its control flow, messages, and
//! exit-code policy.

pub mod archive_folder;
pub mod create_folder;
pub mod file_email;
pub mod get_email;
pub mod list_emails;
pub mod list_folders;
