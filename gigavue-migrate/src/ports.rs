//! Port identifiers and speed classes.
//!
//! GigaVUE ports are addressed as `box/slot/<prefix><index>`, for
//! example `1/2/x4`. The prefix letter encodes the physical port class
//! on HC2 hardware:
//!
//! - `x` — 10G SFP+
//! - `g` — 1G SFP/RJ45
//! - `q` — 40G QSFP+
//! - `c` — 100G QSFP28
//! - `e` — GigaSMART engine port (no wire speed of its own)
//!
//! Range syntax (`1/1/x1..x4` or `1/1/x1..1/1/x4`) is normalized to
//! explicit identifier sequences before anything downstream sees it.

use std::fmt;

use serde::{Serialize, Serializer};

/// Physical speed class of a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SpeedClass {
    #[serde(rename = "1G")]
    OneG,
    #[serde(rename = "10G")]
    TenG,
    #[serde(rename = "25G")]
    TwentyFiveG,
    #[serde(rename = "40G")]
    FortyG,
    #[serde(rename = "100G")]
    HundredG,
}

impl SpeedClass {
    pub fn parse(token: &str) -> Option<SpeedClass> {
        match token.trim().to_ascii_uppercase().as_str() {
            "1G" => Some(SpeedClass::OneG),
            "10G" => Some(SpeedClass::TenG),
            "25G" => Some(SpeedClass::TwentyFiveG),
            "40G" => Some(SpeedClass::FortyG),
            "100G" => Some(SpeedClass::HundredG),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedClass::OneG => "1G",
            SpeedClass::TenG => "10G",
            SpeedClass::TwentyFiveG => "25G",
            SpeedClass::FortyG => "40G",
            SpeedClass::HundredG => "100G",
        }
    }
}

impl fmt::Display for SpeedClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed `box/slot/<prefix><index>` port identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PortId {
    pub box_id: u16,
    pub slot: u16,
    pub prefix: char,
    pub index: u16,
}

impl PortId {
    /// Parse a single port identifier token. Returns `None` for
    /// anything that does not match the `box/slot/<letter><digits>`
    /// shape.
    pub fn parse(token: &str) -> Option<PortId> {
        let mut parts = token.trim().split('/');
        let box_id = parts.next()?.parse::<u16>().ok()?;
        let slot = parts.next()?.parse::<u16>().ok()?;
        let tail = parts.next()?;
        if parts.next().is_some() {
            return None;
        }
        let mut chars = tail.chars();
        let prefix = chars.next()?.to_ascii_lowercase();
        if !prefix.is_ascii_alphabetic() {
            return None;
        }
        let index = chars.as_str().parse::<u16>().ok()?;
        Some(PortId {
            box_id,
            slot,
            prefix,
            index,
        })
    }

    /// Speed class implied by the prefix letter, when it implies one.
    pub fn speed_hint(&self) -> Option<SpeedClass> {
        match self.prefix {
            'g' => Some(SpeedClass::OneG),
            'x' => Some(SpeedClass::TenG),
            'q' => Some(SpeedClass::FortyG),
            'c' => Some(SpeedClass::HundredG),
            _ => None,
        }
    }
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}{}", self.box_id, self.slot, self.prefix, self.index)
    }
}

impl Serialize for PortId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Expand a port token that may be a single identifier or a range into
/// explicit identifiers.
///
/// Accepted range forms: `1/1/x1..x4` and `1/1/x1..1/1/x4`. The long
/// form must stay within one box, slot, and prefix. Returns `None` when
/// the token is neither a valid identifier nor a valid range.
pub fn expand_port_token(token: &str) -> Option<Vec<PortId>> {
    let token = token.trim();
    let Some((start_tok, end_tok)) = token.split_once("..") else {
        return PortId::parse(token).map(|id| vec![id]);
    };

    let start = PortId::parse(start_tok)?;
    let end = if end_tok.contains('/') {
        let end = PortId::parse(end_tok)?;
        if end.box_id != start.box_id || end.slot != start.slot || end.prefix != start.prefix {
            return None;
        }
        end
    } else {
        let mut chars = end_tok.chars();
        let prefix = chars.next()?.to_ascii_lowercase();
        if prefix != start.prefix {
            return None;
        }
        PortId {
            index: chars.as_str().parse::<u16>().ok()?,
            ..start
        }
    };

    if end.index < start.index {
        return None;
    }
    Some(
        (start.index..=end.index)
            .map(|index| PortId { index, ..start })
            .collect(),
    )
}
