use std::process::ExitCode;

use crate::error::JmapError;
use crate::jmap::client::JmapClient;
use crate::jmap::transport::JmapTransport;
use crate::jmap::types::{status_line, BodyPart, EmailAddress, EmailDetail};
use crate::output::{banner, format_datetime, format_size, rule};

pub fn run<T: JmapTransport>(
    client: &JmapClient<T>,
    email_id: &str,
    json: bool,
) -> Result<ExitCode, JmapError> {
    let Some(email) = client.email_by_id(email_id)? else {
        println!("Error: Email with ID '{email_id}' not found");
        return Ok(ExitCode::SUCCESS);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&email)?);
    } else {
        display_email_detail(&email);
    }
    Ok(ExitCode::SUCCESS)
}

fn display_email_detail(email: &EmailDetail) {
    println!("{}", banner());
    println!("EMAIL DETAILS");
    println!("{}\n", banner());

    println!("ID: {}", email.id);
    println!(
        "Subject: {}",
        email.subject.as_deref().unwrap_or("(No subject)")
    );
    println!();

    address_block("From", &email.from);
    address_block("To", &email.to);
    address_block("Cc", &email.cc);
    address_block("Bcc", &email.bcc);

    if let Some(received) = email.received_at.as_deref() {
        println!("Received: {}", format_datetime(received));
    }
    if let Some(sent) = email.sent_at.as_deref() {
        println!("Sent: {}", format_datetime(sent));
    }
    println!();

    if let Some(thread_id) = email.thread_id.as_deref() {
        println!("Thread ID: {thread_id}");
    }
    if !email.mailbox_ids.is_empty() {
        let ids: Vec<&str> = email.mailbox_ids.keys().map(String::as_str).collect();
        println!("Mailboxes: {}", ids.join(", "));
    }
    println!();

    if !email.keywords.is_empty() {
        println!("Keywords:");
        for keyword in email.keywords.keys() {
            println!("  {keyword}");
        }
        println!();
    }

    println!("Status: {}", status_line(&email.keywords, false));
    println!();

    if let Some(size) = email.size {
        println!("Size: {}", format_size(size));
        println!();
    }

    if email.has_attachment || !email.attachments.is_empty() {
        println!("{}", banner());
        println!("ATTACHMENTS");
        println!("{}\n", banner());

        if email.attachments.is_empty() {
            println!("(Attachment flag set but no attachments listed)\n");
        } else {
            for (idx, att) in email.attachments.iter().enumerate() {
                println!("[{}] {}", idx + 1, att.name.as_deref().unwrap_or("Unnamed"));
                println!(
                    "    Type: {}",
                    att.content_type.as_deref().unwrap_or("unknown")
                );
                println!("    Size: {}", format_size(att.size.unwrap_or(0)));
                println!(
                    "    Disposition: {}",
                    att.disposition.as_deref().unwrap_or("attachment")
                );
                if let Some(cid) = att.cid.as_deref() {
                    println!("    Content-ID: {cid}");
                }
                println!();
            }
        }
    }

    if !email.headers.is_empty() {
        println!("{}", banner());
        println!("HEADERS");
        println!("{}\n", banner());
        for header in &email.headers {
            println!("{}: {}", header.name, header.value);
        }
        println!();
    }

    if let Some(preview) = email.preview.as_deref().filter(|p| !p.is_empty()) {
        println!("{}", banner());
        println!("PREVIEW");
        println!("{}\n", banner());
        println!("{preview}\n");
    }

    if !email.body_values.is_empty() {
        println!("{}", banner());
        println!("BODY CONTENT");
        println!("{}\n", banner());

        for (part_id, body) in &email.body_values {
            println!("Part ID: {part_id}");
            if body.is_truncated {
                println!("(Truncated)");
            }
            println!("{}", rule());
            println!("{}\n", body.value);
        }
    }

    body_structure_block("HTML BODY STRUCTURE", &email.html_body);
    body_structure_block("TEXT BODY STRUCTURE", &email.text_body);
}

fn address_block(label: &str, addresses: &[EmailAddress]) {
    if addresses.is_empty() {
        return;
    }
    println!("{label}:");
    for addr in addresses {
        println!("  {}", addr.display());
    }
    println!();
}

fn body_structure_block(title: &str, parts: &[BodyPart]) {
    if parts.is_empty() {
        return;
    }
    println!("{}", banner());
    println!("{title}");
    println!("{}\n", banner());
    for part in parts {
        println!(
            "partId: {}, blobId: {}, size: {}, type: {}",
            part.part_id.as_deref().unwrap_or("-"),
            part.blob_id.as_deref().unwrap_or("-"),
            part.size.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string()),
            part.content_type.as_deref().unwrap_or("-"),
        );
    }
    println!();
}
