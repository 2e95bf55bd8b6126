//! Console commands: credential management and the plain-table listings.
//!
//! `thecloud login`     — store an API key
//! `thecloud logout`    — clear the stored key
//! `thecloud instances|vpcs|storage|events|stats` — one authenticated GET,
//! rendered as a table (or raw JSON with --json)

use std::io::{self, Write};

use serde::Serialize;

use thecloud_api_client::{
    api_base_from_env, save_api_key, ApiClient, Summary,
};

use crate::exit_codes::{EXIT_API_NOT_AUTH, EXIT_ERROR};
use crate::format::{
    format_date_time, format_percent, format_short_id, format_size, format_storage_gb,
};
use crate::util;
use crate::{api_error, CliError};

// ── Login / logout ──────────────────────────────────────────────────

pub fn cmd_login(key: Option<String>, demo: Option<String>) -> Result<(), CliError> {
    // Resolve key: --demo request > arg > THECLOUD_API_KEY env > prompt
    let key = if let Some(name) = demo {
        let client = ApiClient::new(api_base_from_env(), "");
        let key = client.create_key(&name).map_err(api_error)?;
        eprintln!("Generated key for '{}'", name);
        key
    } else if let Some(k) = key {
        k
    } else if let Ok(k) = std::env::var("THECLOUD_API_KEY") {
        k
    } else if atty::is(atty::Stream::Stdin) {
        eprint!("The Cloud API key: ");
        io::stderr().flush().ok();
        let mut buf = String::new();
        io::stdin().read_line(&mut buf).map_err(|e| CliError {
            code: EXIT_ERROR,
            message: e.to_string(),
            hint: None,
        })?;
        buf
    } else {
        return Err(CliError {
            code: crate::exit_codes::EXIT_USAGE,
            message: "No API key provided and stdin is not a TTY".into(),
            hint: Some("pass a key or set THECLOUD_API_KEY".into()),
        });
    };

    let trimmed = key.trim();
    if trimmed.is_empty() {
        return Err(CliError::usage("No API key provided"));
    }

    save_api_key(trimmed).map_err(|e| CliError {
        code: EXIT_ERROR,
        message: e,
        hint: None,
    })?;

    eprintln!("API key saved");
    Ok(())
}

pub fn cmd_logout() -> Result<(), CliError> {
    save_api_key("").map_err(|e| CliError {
        code: EXIT_ERROR,
        message: e,
        hint: None,
    })?;
    eprintln!("API key cleared");
    Ok(())
}

// ── Listings ────────────────────────────────────────────────────────

fn authed_client() -> Result<ApiClient, CliError> {
    let client = ApiClient::from_stored();
    if !client.has_key() {
        return Err(CliError {
            code: EXIT_API_NOT_AUTH,
            message: "API key required".into(),
            hint: Some("run `thecloud login` first".into()),
        });
    }
    Ok(client)
}

pub fn cmd_instances(json: bool) -> Result<(), CliError> {
    let instances = authed_client()?.list_instances().map_err(api_error)?;
    if json {
        return print_json(&instances);
    }

    let rows: Vec<Vec<String>> = instances
        .iter()
        .map(|i| {
            vec![
                i.name.clone(),
                format_short_id(&i.id),
                i.image.clone(),
                i.status.to_lowercase(),
                i.ports.clone().filter(|p| !p.is_empty()).unwrap_or_else(|| "-".into()),
                format_date_time(&i.created_at),
            ]
        })
        .collect();

    print_table(&["NAME", "ID", "IMAGE", "STATUS", "PORTS", "CREATED"], &rows)
}

pub fn cmd_vpcs(json: bool) -> Result<(), CliError> {
    let vpcs = authed_client()?.list_vpcs().map_err(api_error)?;
    if json {
        return print_json(&vpcs);
    }

    let rows: Vec<Vec<String>> = vpcs
        .iter()
        .map(|v| {
            vec![
                v.name.clone(),
                format_short_id(&v.id),
                format_short_id(&v.network_id),
                format_date_time(&v.created_at),
            ]
        })
        .collect();

    print_table(&["NAME", "VPC ID", "NETWORK ID", "CREATED"], &rows)
}

pub fn cmd_storage(bucket: &str, json: bool) -> Result<(), CliError> {
    let bucket = bucket.trim();
    if bucket.is_empty() {
        return Err(CliError::usage("Bucket name is required"));
    }

    let objects = authed_client()?.list_objects(bucket).map_err(api_error)?;
    if json {
        return print_json(&objects);
    }

    let rows: Vec<Vec<String>> = objects
        .iter()
        .map(|o| {
            vec![
                o.key.clone(),
                format_size(o.size_bytes),
                o.content_type.clone(),
                format_date_time(&o.created_at),
            ]
        })
        .collect();

    print_table(&["KEY", "SIZE", "TYPE", "CREATED"], &rows)
}

pub fn cmd_events(json: bool) -> Result<(), CliError> {
    let events = authed_client()?.list_events().map_err(api_error)?;
    if json {
        return print_json(&events);
    }

    let rows: Vec<Vec<String>> = events
        .iter()
        .map(|e| {
            vec![
                e.action.clone(),
                format!("{} {}", e.resource_type, format_short_id(&e.resource_id)),
                format_short_id(&e.user_id),
                format_date_time(&e.created_at),
            ]
        })
        .collect();

    print_table(&["ACTION", "RESOURCE", "USER", "TIMESTAMP"], &rows)
}

pub fn cmd_stats(json: bool) -> Result<(), CliError> {
    let stats = authed_client()?.dashboard_stats().map_err(api_error)?;
    if json {
        return print_json(&stats);
    }

    print_summary(&stats.summary);

    if !stats.recent_events.is_empty() {
        println!();
        println!("Recent activity:");
        for event in &stats.recent_events {
            println!(
                "  {}  {} {}  {}",
                event.action,
                event.resource_type,
                format_short_id(&event.resource_id),
                format_date_time(&event.created_at),
            );
        }
    }

    Ok(())
}

fn print_summary(s: &Summary) {
    println!(
        "  Instances:  {} running / {} total ({}% running)",
        s.running_instances,
        s.total_instances,
        format_percent(s.running_instances, s.total_instances),
    );
    println!("  Stopped:    {}", s.stopped_instances);
    println!(
        "  Volumes:    {} attached / {} total",
        s.attached_volumes, s.total_volumes,
    );
    println!("  VPCs:       {}", s.total_vpcs);
    println!(
        "  Storage:    {} GB provisioned",
        format_storage_gb(s.total_storage_mb),
    );
}

// ── Output helpers ──────────────────────────────────────────────────

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| CliError {
        code: EXIT_ERROR,
        message: format!("JSON encode error: {}", e),
        hint: None,
    })?;
    println!("{}", text);
    Ok(())
}

/// Print a fixed-width text table: header, dash separator, rows.
fn print_table(headers: &[&str], rows: &[Vec<String>]) -> Result<(), CliError> {
    let widths = util::column_widths(headers, rows);
    let out = io::stdout();
    let mut w = out.lock();

    let write_err = |e: io::Error| CliError {
        code: EXIT_ERROR,
        message: e.to_string(),
        hint: None,
    };

    for (c, header) in headers.iter().enumerate() {
        write!(w, "{}  ", util::pad_right(header, widths[c])).map_err(write_err)?;
    }
    writeln!(w).map_err(write_err)?;

    for (c, _) in headers.iter().enumerate() {
        write!(w, "{}  ", "-".repeat(widths[c])).map_err(write_err)?;
    }
    writeln!(w).map_err(write_err)?;

    for row in rows {
        for (c, cell) in row.iter().enumerate() {
            write!(w, "{}  ", util::pad_right(cell, widths[c])).map_err(write_err)?;
        }
        writeln!(w).map_err(write_err)?;
    }

    if rows.is_empty() {
        writeln!(w, "(none)").map_err(write_err)?;
    }

    Ok(())
}
