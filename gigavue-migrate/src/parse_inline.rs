//! Inline network and inline tool block parsing.
//!
//! Both blocks echo running-config style records: an
//! `inline-network alias <name>` (or `inline-tool alias <name>`) line
//! opens a record, followed by indented attribute lines until the next
//! opener. Attribute values are raw tokens (aliases, port ids, or
//! ranges) resolved later by the inventory builder.
//!
//! ```text
//! inline-network alias in-net-1
//!   net-a 1/1/x1
//!   net-b 1/1/x2
//! inline-tool alias ips-1
//!   side-a 1/2/x1
//!   side-b 1/2/x2
//!   enable
//! ```
//!
//! A one-line form (`inline-network alias n net-a P net-b Q`) appears
//! in some captures and is accepted too.

use showdiag_core::columns;

use crate::model::Warning;

/// An inline network before reference resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInlineNetwork {
    pub alias: String,
    pub net_a: Option<String>,
    pub net_b: Option<String>,
}

/// An inline tool before reference resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInlineTool {
    pub alias: String,
    pub side_a: Option<String>,
    pub side_b: Option<String>,
    pub enabled: bool,
}

pub fn parse_inline_networks(lines: &[String]) -> (Vec<RawInlineNetwork>, Vec<Warning>) {
    let mut records: Vec<RawInlineNetwork> = Vec::new();
    let mut warnings = Vec::new();

    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let cols = columns(trimmed);
        if let Some(alias) = opener_alias(&cols, "inline-network") {
            let mut record = RawInlineNetwork {
                alias,
                ..RawInlineNetwork::default()
            };
            // One-line form carries attributes after the alias.
            apply_net_attrs(&cols[3..], &mut record);
            records.push(record);
            continue;
        }
        if let Some(record) = records.last_mut() {
            if !apply_net_attrs(&cols, record) {
                warnings.push(Warning::new(
                    "unparsed_inline_line",
                    format!("inline-network line skipped: {trimmed}"),
                ));
            }
        } else {
            warnings.push(Warning::new(
                "unparsed_inline_line",
                format!("inline-network attribute outside a record: {trimmed}"),
            ));
        }
    }

    (records, warnings)
}

pub fn parse_inline_tools(lines: &[String]) -> (Vec<RawInlineTool>, Vec<Warning>) {
    let mut records: Vec<RawInlineTool> = Vec::new();
    let mut warnings = Vec::new();

    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let cols = columns(trimmed);
        if let Some(alias) = opener_alias(&cols, "inline-tool") {
            records.push(RawInlineTool {
                alias,
                side_a: None,
                side_b: None,
                enabled: true,
            });
            continue;
        }
        if let Some(record) = records.last_mut() {
            if !apply_tool_attr(&cols, record) {
                warnings.push(Warning::new(
                    "unparsed_inline_line",
                    format!("inline-tool line skipped: {trimmed}"),
                ));
            }
        } else {
            warnings.push(Warning::new(
                "unparsed_inline_line",
                format!("inline-tool attribute outside a record: {trimmed}"),
            ));
        }
    }

    (records, warnings)
}

fn opener_alias(cols: &[&str], keyword: &str) -> Option<String> {
    if cols.len() >= 3
        && cols[0].eq_ignore_ascii_case(keyword)
        && cols[1].eq_ignore_ascii_case("alias")
    {
        Some(cols[2].to_string())
    } else {
        None
    }
}

/// Apply `net-a <token>` / `net-b <token>` pairs from a column slice.
/// Returns false when nothing in the slice was recognized.
fn apply_net_attrs(cols: &[&str], record: &mut RawInlineNetwork) -> bool {
    if cols.is_empty() {
        return true;
    }
    let mut applied = false;
    let mut iter = cols.iter();
    while let Some(key) = iter.next() {
        let key = key.to_ascii_lowercase();
        match key.as_str() {
            "net-a" | "net_a" => {
                record.net_a = iter.next().map(|s| s.to_string());
                applied = true;
            }
            "net-b" | "net_b" => {
                record.net_b = iter.next().map(|s| s.to_string());
                applied = true;
            }
            _ => {}
        }
    }
    applied
}

fn apply_tool_attr(cols: &[&str], record: &mut RawInlineTool) -> bool {
    match cols[0].to_ascii_lowercase().as_str() {
        "side-a" | "side_a" => {
            record.side_a = cols.get(1).map(|s| s.to_string());
            true
        }
        "side-b" | "side_b" => {
            record.side_b = cols.get(1).map(|s| s.to_string());
            true
        }
        "enable" => {
            record.enabled = true;
            true
        }
        "shutdown" | "disable" => {
            record.enabled = false;
            true
        }
        _ => false,
    }
}
