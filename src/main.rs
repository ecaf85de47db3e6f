use std::io;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;

use paramail::cli::{Cli, Command};
use paramail::commands;
use paramail::commands::archive_folder::ArchiveFolderArgs;
use paramail::commands::file_email::FileEmailArgs;
use paramail::config::Credentials;
use paramail::error::JmapError;
use paramail::jmap::client::JmapClient;

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, JmapError> {
    // Credentials are validated before any network attempt.
    let credentials = Credentials::from_env(cli.command.token_scope())?;

    println!("Connecting to JMAP server at {}...", credentials.host);
    let client = JmapClient::connect(&credentials)?;
    println!("✓ Connected successfully");
    println!("  API URL: https://{}\n", credentials.host);

    let mut stdin = io::stdin().lock();
    match &cli.command {
        Command::ListFolders { start, max_depth } => {
            commands::list_folders::run(&client, start.as_deref(), *max_depth)
        }
        Command::ListEmails {
            folder,
            limit,
            show_ids,
            json,
        } => commands::list_emails::run(&client, folder, *limit, *show_ids, *json),
        Command::GetEmail { email_id, json } => {
            commands::get_email::run(&client, email_id, *json)
        }
        Command::CreateFolder { parent, name } => {
            commands::create_folder::run(&client, parent, name)
        }
        Command::FileEmail {
            email_id,
            folder_name,
            copy,
            yes,
            max_depth,
        } => commands::file_email::run(
            &client,
            &FileEmailArgs {
                email_id,
                folder_name,
                copy: *copy,
                yes: *yes,
                max_depth: *max_depth,
            },
            &mut stdin,
        ),
        Command::ArchiveFolder {
            folder_name,
            dry_run,
            yes,
        } => commands::archive_folder::run(
            &client,
            &ArchiveFolderArgs {
                folder_name,
                dry_run: *dry_run,
                yes: *yes,
            },
            &mut stdin,
        ),
    }
}
