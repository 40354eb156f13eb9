//! Entity model built from a capture.
//!
//! Everything here is constructed once per input document by the block
//! parsers and the inventory builder and is immutable afterwards. Port
//! references between entities are weak: entities hold a [`PortRef`],
//! resolved to a canonical [`PortId`] where possible and retained as
//! the original token where not, so a partially malformed capture still
//! produces a usable inventory.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::ports::{PortId, SpeedClass};

/// Identity of the source device, from the chassis block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Device {
    pub hostname: String,
    pub hw_type: String,
    pub software_version: String,
}

/// A card occupying a chassis slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub slot: String,
    pub configured: bool,
    pub oper_up: bool,
    pub hw_type: String,
    pub product_code: Option<String>,
}

/// Role a port plays in the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PortType {
    Network,
    Tool,
    InlineNetwork,
    InlineTool,
    Engine,
    Stack,
    Unknown,
}

impl PortType {
    pub fn parse(token: &str) -> PortType {
        match token.trim().to_ascii_lowercase().as_str() {
            "network" => PortType::Network,
            "tool" => PortType::Tool,
            "inline-network" | "inline-net" => PortType::InlineNetwork,
            "inline-tool" => PortType::InlineTool,
            "engine" | "gs" => PortType::Engine,
            "stack" => PortType::Stack,
            _ => PortType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PortType::Network => "network",
            PortType::Tool => "tool",
            PortType::InlineNetwork => "inline-network",
            PortType::InlineTool => "inline-tool",
            PortType::Engine => "engine",
            PortType::Stack => "stack",
            PortType::Unknown => "unknown",
        }
    }
}

/// A configured physical port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Port {
    pub id: PortId,
    pub port_type: PortType,
    pub alias: Option<String>,
    pub enabled: bool,
    pub speed: SpeedClass,
    pub media: Option<String>,
}

/// A symbolic port reference after the resolution pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PortRef {
    Resolved(PortId),
    Unresolved(String),
}

impl PortRef {
    pub fn resolved(&self) -> Option<PortId> {
        match self {
            PortRef::Resolved(id) => Some(*id),
            PortRef::Unresolved(_) => None,
        }
    }

    /// Rendering used in warnings and degraded-group listings.
    pub fn display_token(&self) -> String {
        match self {
            PortRef::Resolved(id) => id.to_string(),
            PortRef::Unresolved(token) => format!("unresolved:{token}"),
        }
    }
}

/// A bypass segment: two network-facing ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineNetwork {
    pub alias: String,
    pub net_a: PortRef,
    pub net_b: PortRef,
}

/// A tool-facing segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineTool {
    pub alias: String,
    pub side_a: PortRef,
    pub side_b: PortRef,
    pub enabled: bool,
    pub spare: bool,
}

/// A traffic-steering rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrafficMap {
    pub alias: String,
    pub from: Vec<PortRef>,
    pub to: Vec<PortRef>,
    pub gsop: Option<String>,
}

/// A GigaSMART operation. Presence of any marks the device as needing
/// special-processing capability on the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Gsop {
    pub alias: String,
    pub operation: String,
    pub gsgroup: Option<String>,
}

/// A GigaSMART engine group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GsGroup {
    pub alias: String,
    pub ports: Vec<PortRef>,
}

/// A non-fatal condition accumulated while parsing or building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub code: String,
    pub message: String,
}

impl Warning {
    pub fn new(code: &str, message: impl Into<String>) -> Warning {
        Warning {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

/// The merged entity graph for one capture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Inventory {
    pub device: Device,
    pub cards: Vec<Card>,
    pub ports: Vec<Port>,
    pub aliases: BTreeMap<String, PortId>,
    pub inline_networks: Vec<InlineNetwork>,
    pub inline_tools: Vec<InlineTool>,
    pub maps: Vec<TrafficMap>,
    pub gsops: Vec<Gsop>,
    pub gsgroups: Vec<GsGroup>,
}

impl Inventory {
    pub fn port(&self, id: PortId) -> Option<&Port> {
        self.ports.iter().find(|p| p.id == id)
    }

    /// Enabled ports in discovery order.
    pub fn enabled_ports(&self) -> impl Iterator<Item = &Port> {
        self.ports.iter().filter(|p| p.enabled)
    }

    /// Ports that need a home on the target platform: enabled, and not
    /// a GigaSMART engine port. Engine capacity comes from the target's
    /// own modules, not from front-panel slots.
    pub fn migratable_ports(&self) -> impl Iterator<Item = &Port> {
        self.ports
            .iter()
            .filter(|p| p.enabled && p.port_type != PortType::Engine)
    }
}
