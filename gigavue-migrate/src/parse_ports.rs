//! Port table and port alias block parsing.
//!
//! `show port` lists every configured port, identifier first:
//!
//! ```text
//! Port     Type     Alias         Admin     Speed  Media
//! ----     ----     -----         -----     -----  -----
//! 1/1/x1   network  fw-a-net      enabled   10G    SFP+
//! 1/1/x2   network  -             enabled   10G    SFP+
//! 1/2/g1   network  lan-tap       enabled
//! ```
//!
//! `show port alias` carries the same columns alias-first, or degrades
//! to a bare two-column `Alias Port` binding table on older releases:
//!
//! ```text
//! Alias         Port
//! ------        ----
//! fw-a-net      1/1/x1
//! ```
//!
//! `-` marks an absent alias. Speed and media are optional trailing
//! columns; a missing speed is inferred later from the identifier
//! prefix or the owning card's module type. Multiple rows may bind
//! different aliases to the same port; the first full row wins for the
//! port record, later ones only add alias bindings.

use showdiag_core::{columns, is_separator_line};

use crate::model::{PortType, Warning};
use crate::ports::{PortId, SpeedClass};

/// One parsed row, before speed inference and merging. A binding-only
/// row (bare `Alias Port` form) contributes an alias but never defines
/// a port record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortRow {
    pub alias: Option<String>,
    pub id: PortId,
    pub port_type: PortType,
    pub enabled: bool,
    pub speed: Option<SpeedClass>,
    pub media: Option<String>,
    pub binding_only: bool,
}

/// Parse `show port` output, identifier-first columns.
pub fn parse_port_table(lines: &[String]) -> (Vec<PortRow>, Vec<Warning>) {
    let mut rows = Vec::new();
    let mut warnings = Vec::new();

    for line in lines {
        if line.trim().is_empty() || is_separator_line(line) || is_header(line, "port") {
            continue;
        }
        let cols = columns(line);
        if cols.len() < 4 {
            warnings.push(Warning::new(
                "unparsed_port_line",
                format!("port line skipped: {}", line.trim()),
            ));
            continue;
        }
        let Some(id) = PortId::parse(cols[0]) else {
            warnings.push(Warning::new(
                "unparsed_port_line",
                format!("port line has no valid port id: {}", line.trim()),
            ));
            continue;
        };
        rows.push(build_row(
            id,
            cols[1],
            dash_is_none(cols[2]),
            cols[3],
            cols.get(4).copied(),
            cols.get(5).copied(),
            &mut warnings,
        ));
    }

    (rows, warnings)
}

/// Parse `show port alias` output, alias-first columns. A bare
/// two-column row becomes a binding-only row.
pub fn parse_port_rows(lines: &[String]) -> (Vec<PortRow>, Vec<Warning>) {
    let mut rows = Vec::new();
    let mut warnings = Vec::new();

    for line in lines {
        if line.trim().is_empty() || is_separator_line(line) || is_header(line, "alias") {
            continue;
        }
        let cols = columns(line);
        if cols.len() != 2 && cols.len() < 4 {
            warnings.push(Warning::new(
                "unparsed_port_line",
                format!("port line skipped: {}", line.trim()),
            ));
            continue;
        }
        let Some(id) = PortId::parse(cols[1]) else {
            warnings.push(Warning::new(
                "unparsed_port_line",
                format!("port line has no valid port id: {}", line.trim()),
            ));
            continue;
        };
        if cols.len() == 2 {
            rows.push(PortRow {
                alias: dash_is_none(cols[0]),
                id,
                port_type: PortType::Unknown,
                enabled: false,
                speed: None,
                media: None,
                binding_only: true,
            });
            continue;
        }
        rows.push(build_row(
            id,
            cols[2],
            dash_is_none(cols[0]),
            cols[3],
            cols.get(4).copied(),
            cols.get(5).copied(),
            &mut warnings,
        ));
    }

    (rows, warnings)
}

fn build_row(
    id: PortId,
    type_token: &str,
    alias: Option<String>,
    admin: &str,
    speed: Option<&str>,
    media: Option<&str>,
    warnings: &mut Vec<Warning>,
) -> PortRow {
    let port_type = PortType::parse(type_token);
    if port_type == PortType::Unknown {
        warnings.push(Warning::new(
            "unknown_port_type",
            format!("port {id} has unknown type '{type_token}'"),
        ));
    }
    PortRow {
        alias,
        id,
        port_type,
        enabled: parse_admin(admin),
        speed: speed.and_then(SpeedClass::parse),
        media: media.and_then(dash_is_none),
        binding_only: false,
    }
}

fn is_header(line: &str, first_column: &str) -> bool {
    line.trim_start()
        .to_ascii_lowercase()
        .starts_with(first_column)
}

fn dash_is_none(token: &str) -> Option<String> {
    let token = token.trim();
    if token.is_empty() || token == "-" {
        None
    } else {
        Some(token.to_string())
    }
}

/// Unrecognized admin tokens read as disabled; a disabled default keeps
/// a mangled row from inflating the active-port count.
fn parse_admin(token: &str) -> bool {
    matches!(
        token.to_ascii_lowercase().as_str(),
        "enabled" | "enable" | "up"
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{parse_port_rows, parse_port_table};
    use crate::model::PortType;
    use crate::ports::SpeedClass;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_full_and_partial_alias_rows() {
        let input = lines(&[
            "Alias         Port     Type     Admin     Speed  Media",
            "------        ----     ----     -----     -----  -----",
            "fw-a-net      1/1/x1   network  enabled   10G    SFP+",
            "-             1/1/x2   network  disabled  10G    SFP+",
            "lan-tap       1/2/g1   network  enabled",
        ]);
        let (rows, warnings) = parse_port_rows(&input);
        assert!(warnings.is_empty());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].alias.as_deref(), Some("fw-a-net"));
        assert_eq!(rows[0].speed, Some(SpeedClass::TenG));
        assert!(!rows[0].binding_only);
        assert_eq!(rows[1].alias, None);
        assert!(!rows[1].enabled);
        assert_eq!(rows[2].speed, None);
        assert_eq!(rows[2].media, None);
    }

    #[test]
    fn parses_port_first_table() {
        let input = lines(&[
            "Port     Type     Alias     Admin     Speed  Media",
            "----     ----     -----     -----     -----  -----",
            "1/1/x1   network  fw-a-net  enabled   10G    SFP+",
            "1/1/x2   tool     -         disabled  10G    SFP+",
            "1/2/g1   network  lan-tap   enabled",
        ]);
        let (rows, warnings) = parse_port_table(&input);
        assert!(warnings.is_empty());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].id.to_string(), "1/1/x1");
        assert_eq!(rows[0].alias.as_deref(), Some("fw-a-net"));
        assert!(rows[0].enabled);
        assert_eq!(rows[1].port_type, PortType::Tool);
        assert_eq!(rows[1].alias, None);
        assert!(!rows[1].enabled);
        assert_eq!(rows[2].speed, None);
    }

    #[test]
    fn two_column_alias_rows_are_binding_only() {
        let input = lines(&[
            "Alias     Port",
            "------    ----",
            "fw-a-net  1/1/x1",
        ]);
        let (rows, warnings) = parse_port_rows(&input);
        assert!(warnings.is_empty());
        assert_eq!(rows.len(), 1);
        assert!(rows[0].binding_only);
        assert_eq!(rows[0].alias.as_deref(), Some("fw-a-net"));
        assert_eq!(rows[0].id.to_string(), "1/1/x1");
    }

    #[test]
    fn bad_port_id_is_skipped_with_warning() {
        let input = lines(&["alias-x  not-a-port  network  enabled"]);
        let (rows, warnings) = parse_port_rows(&input);
        assert!(rows.is_empty());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, "unparsed_port_line");
    }

    #[test]
    fn unknown_type_keeps_row_but_warns() {
        let input = lines(&["-  1/1/x1  mystery  enabled  10G"]);
        let (rows, warnings) = parse_port_rows(&input);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].port_type, PortType::Unknown);
        assert_eq!(warnings[0].code, "unknown_port_type");
    }

    #[test]
    fn engine_ports_parse_without_speed() {
        let input = lines(&["-  1/3/e1  engine  disabled"]);
        let (rows, warnings) = parse_port_rows(&input);
        assert!(warnings.is_empty());
        assert_eq!(rows[0].port_type, PortType::Engine);
        assert_eq!(rows[0].speed, None);
    }
}
