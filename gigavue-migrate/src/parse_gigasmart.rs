//! GigaSMART operation and group block parsing.
//!
//! ```text
//! gsop alias dedup-1 dedup set port-group gs-grp-1
//! gsgroup alias gs-grp-1 port-list 1/3/e1
//! ```
//!
//! An appliance without GigaSMART prints `No gsops configured.` /
//! `No gsgroups configured.`; both yield empty record sets. Presence of
//! any record marks the device as requiring special-processing
//! capability on the target platform.

use showdiag_core::columns;

use crate::model::{Gsop, Warning};

/// A GigaSMART group before reference resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawGsGroup {
    pub alias: String,
    pub ports: Vec<String>,
}

pub fn parse_gsops(lines: &[String]) -> (Vec<Gsop>, Vec<Warning>) {
    let mut records = Vec::new();
    let mut warnings = Vec::new();

    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() || is_none_marker(trimmed, "gsops") {
            continue;
        }
        let cols = columns(trimmed);
        if cols.len() < 3
            || !cols[0].eq_ignore_ascii_case("gsop")
            || !cols[1].eq_ignore_ascii_case("alias")
        {
            warnings.push(Warning::new(
                "unparsed_gsop_line",
                format!("gsop line skipped: {trimmed}"),
            ));
            continue;
        }
        let (operation, gsgroup) = split_operation(&cols[3..]);
        records.push(Gsop {
            alias: cols[2].to_string(),
            operation,
            gsgroup,
        });
    }

    (records, warnings)
}

pub fn parse_gsgroups(lines: &[String]) -> (Vec<RawGsGroup>, Vec<Warning>) {
    let mut records = Vec::new();
    let mut warnings = Vec::new();

    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() || is_none_marker(trimmed, "gsgroups") {
            continue;
        }
        let cols = columns(trimmed);
        if cols.len() < 3
            || !cols[0].eq_ignore_ascii_case("gsgroup")
            || !cols[1].eq_ignore_ascii_case("alias")
        {
            warnings.push(Warning::new(
                "unparsed_gsgroup_line",
                format!("gsgroup line skipped: {trimmed}"),
            ));
            continue;
        }
        let ports = match cols.iter().position(|c| c.eq_ignore_ascii_case("port-list")) {
            Some(idx) => cols[idx + 1..]
                .iter()
                .flat_map(|c| c.split(','))
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(ToOwned::to_owned)
                .collect(),
            None => Vec::new(),
        };
        records.push(RawGsGroup {
            alias: cols[2].to_string(),
            ports,
        });
    }

    (records, warnings)
}

/// Everything after the alias up to `port-group` is the operation
/// chain (`dedup`, `masking`, ...); an optional trailing
/// `port-group <name>` binds the gsop to a group.
fn split_operation(cols: &[&str]) -> (String, Option<String>) {
    let mut operation = Vec::new();
    let mut gsgroup = None;
    let mut iter = cols.iter().peekable();
    while let Some(col) = iter.next() {
        if col.eq_ignore_ascii_case("port-group") {
            gsgroup = iter.next().map(|s| s.to_string());
            break;
        }
        if col.eq_ignore_ascii_case("set") {
            continue;
        }
        operation.push(*col);
    }
    (operation.join(" "), gsgroup)
}

fn is_none_marker(line: &str, noun: &str) -> bool {
    let lowered = line.to_ascii_lowercase();
    lowered.starts_with("no ") && lowered.contains(noun) && lowered.contains("configured")
}
