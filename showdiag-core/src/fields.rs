//! Field extraction helpers for the two layouts `show` commands emit:
//! whitespace-aligned columns and `Key : value` pairs. Column widths in
//! real captures drift with content, so everything here splits on runs
//! of whitespace instead of fixed offsets.

/// Split a row into columns on runs of whitespace.
pub fn columns(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Parse a `Key : value` or `Key: value` line. The key keeps interior
/// spaces (`HW Type`); both sides are trimmed. Returns `None` when the
/// line has no colon or an empty key.
pub fn key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}

/// True for horizontal rules made of `-` or `=` that commands print
/// under their column headers.
pub fn is_separator_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c == '-' || c == '=' || c == ' ')
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{columns, is_separator_line, key_value};

    #[test]
    fn columns_tolerate_variable_whitespace() {
        assert_eq!(
            columns("1     yes \t up    PRT-HC0-X24"),
            vec!["1", "yes", "up", "PRT-HC0-X24"]
        );
    }

    #[test]
    fn key_value_keeps_interior_key_spaces() {
        assert_eq!(key_value("HW Type : CHS-HC2"), Some(("HW Type", "CHS-HC2")));
        assert_eq!(key_value("Hostname: gv-hc2-01"), Some(("Hostname", "gv-hc2-01")));
    }

    #[test]
    fn key_value_rejects_non_pairs() {
        assert_eq!(key_value("no colon here"), None);
        assert_eq!(key_value(": orphan value"), None);
    }

    #[test]
    fn value_with_colons_keeps_remainder() {
        assert_eq!(
            key_value("Software Version: GigaVUE-OS 5.14.02"),
            Some(("Software Version", "GigaVUE-OS 5.14.02"))
        );
    }

    #[test]
    fn separator_lines_detected() {
        assert!(is_separator_line("-------- ----"));
        assert!(is_separator_line("===="));
        assert!(!is_separator_line("1/1/x1  network"));
        assert!(!is_separator_line(""));
    }
}
