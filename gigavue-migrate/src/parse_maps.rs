//! Map block parsing.
//!
//! ```text
//! map alias web-traffic
//!   from in-net-1
//!   to ips-1,ips-2
//!   use gsop dedup-1
//! ```
//!
//! `from`/`to` values are comma-separated raw tokens (aliases, port
//! ids, or ranges), resolved later by the inventory builder.

use showdiag_core::columns;

use crate::model::Warning;

/// A map before reference resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMap {
    pub alias: String,
    pub from: Vec<String>,
    pub to: Vec<String>,
    pub gsop: Option<String>,
}

pub fn parse_maps(lines: &[String]) -> (Vec<RawMap>, Vec<Warning>) {
    let mut records: Vec<RawMap> = Vec::new();
    let mut warnings = Vec::new();

    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() || no_records_line(trimmed) {
            continue;
        }
        let cols = columns(trimmed);
        if cols.len() >= 3
            && cols[0].eq_ignore_ascii_case("map")
            && cols[1].eq_ignore_ascii_case("alias")
        {
            records.push(RawMap {
                alias: cols[2].to_string(),
                ..RawMap::default()
            });
            continue;
        }
        let Some(record) = records.last_mut() else {
            warnings.push(Warning::new(
                "unparsed_map_line",
                format!("map attribute outside a record: {trimmed}"),
            ));
            continue;
        };
        match cols[0].to_ascii_lowercase().as_str() {
            "from" => record.from.extend(split_tokens(&cols[1..])),
            "to" => record.to.extend(split_tokens(&cols[1..])),
            "use" if cols.get(1).is_some_and(|c| c.eq_ignore_ascii_case("gsop")) => {
                record.gsop = cols.get(2).map(|s| s.to_string());
            }
            _ => warnings.push(Warning::new(
                "unparsed_map_line",
                format!("map line skipped: {trimmed}"),
            )),
        }
    }

    (records, warnings)
}

fn split_tokens(cols: &[&str]) -> Vec<String> {
    cols.iter()
        .flat_map(|c| c.split(','))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn no_records_line(line: &str) -> bool {
    line.to_ascii_lowercase().starts_with("no maps configured")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::parse_maps;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_map_with_gsop() {
        let input = lines(&[
            "map alias web-traffic",
            "  from in-net-1",
            "  to ips-1,ips-2",
            "  use gsop dedup-1",
        ]);
        let (maps, warnings) = parse_maps(&input);
        assert!(warnings.is_empty());
        assert_eq!(maps.len(), 1);
        assert_eq!(maps[0].from, vec!["in-net-1"]);
        assert_eq!(maps[0].to, vec!["ips-1", "ips-2"]);
        assert_eq!(maps[0].gsop.as_deref(), Some("dedup-1"));
    }

    #[test]
    fn from_accepts_ranges_and_multiple_tokens() {
        let input = lines(&["map alias agg", "  from 1/1/x1..x4, 1/2/x1", "  to tool-1"]);
        let (maps, _) = parse_maps(&input);
        assert_eq!(maps[0].from, vec!["1/1/x1..x4", "1/2/x1"]);
    }

    #[test]
    fn empty_marker_yields_no_records() {
        let input = lines(&["No maps configured."]);
        let (maps, warnings) = parse_maps(&input);
        assert!(maps.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn unknown_attribute_warns() {
        let input = lines(&["map alias m1", "  priority 5"]);
        let (maps, warnings) = parse_maps(&input);
        assert_eq!(maps.len(), 1);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, "unparsed_map_line");
    }
}
