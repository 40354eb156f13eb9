//! Card block parsing.
//!
//! `show card` prints one columnar row per slot:
//!
//! ```text
//! Slot  Config  Oper Status  HW Type         Product Code
//! ----  ------  -----------  -------         ------------
//! 1     yes     up           PRT-HC0-X24     132-00AW
//! cc1   yes     up           CTL-HC0-002     132-00BD
//! ```
//!
//! The product-code column is optional in older software. Rows that do
//! not fit the shape are skipped with a warning rather than aborting
//! the section.

use showdiag_core::{columns, is_separator_line};

use crate::model::{Card, Warning};
use crate::ports::SpeedClass;

pub fn parse_cards(lines: &[String]) -> (Vec<Card>, Vec<Warning>) {
    let mut cards = Vec::new();
    let mut warnings = Vec::new();

    for line in lines {
        if line.trim().is_empty() || is_separator_line(line) || is_header_row(line) {
            continue;
        }
        let cols = columns(line);
        if cols.len() < 4 {
            warnings.push(Warning::new(
                "unparsed_card_line",
                format!("card line skipped: {}", line.trim()),
            ));
            continue;
        }
        if !is_slot_token(cols[0]) {
            warnings.push(Warning::new(
                "unparsed_card_line",
                format!("card line has no slot column: {}", line.trim()),
            ));
            continue;
        }
        cards.push(Card {
            slot: cols[0].to_string(),
            configured: cols[1].eq_ignore_ascii_case("yes"),
            oper_up: cols[2].eq_ignore_ascii_case("up"),
            hw_type: cols[3].to_string(),
            product_code: cols.get(4).map(|s| s.to_string()),
        });
    }

    (cards, warnings)
}

/// Speed class implied by a card's module type, used as the fallback
/// for ports whose row carries no explicit speed and whose identifier
/// prefix implies none.
pub fn module_speed(hw_type: &str) -> Option<SpeedClass> {
    let hw = hw_type.to_ascii_uppercase();
    if hw.starts_with("TAP-") {
        Some(SpeedClass::OneG)
    } else if hw.starts_with("PRT-") && hw.contains("-Q") {
        Some(SpeedClass::FortyG)
    } else if hw.starts_with("PRT-") && hw.contains("-C") {
        Some(SpeedClass::HundredG)
    } else if hw.starts_with("PRT-") || hw.starts_with("SMT-") || hw.starts_with("BPS-") {
        Some(SpeedClass::TenG)
    } else {
        None
    }
}

fn is_header_row(line: &str) -> bool {
    line.trim_start().to_ascii_lowercase().starts_with("slot")
}

fn is_slot_token(token: &str) -> bool {
    token.parse::<u16>().is_ok()
        || (token.to_ascii_lowercase().starts_with("cc")
            && token[2..].parse::<u16>().is_ok())
}
