//! Terminal rendering for inspect and analyze output.

use colored::Colorize;

use crate::classify::RecommendationFact;
use crate::model::{Inventory, PortRef, Warning};

/// Render the parsed inventory for terminal output.
pub fn render_inventory_text(inventory: &Inventory) -> String {
    let mut out = Vec::new();

    out.push("[device]".to_string());
    out.push(format!("hostname={}", or_dash(&inventory.device.hostname)));
    out.push(format!("hw_type={}", or_dash(&inventory.device.hw_type)));
    out.push(format!(
        "software_version={}",
        or_dash(&inventory.device.software_version)
    ));

    out.push(String::new());
    out.push(format!("cards={}", inventory.cards.len()));
    for card in &inventory.cards {
        out.push(format!(
            "- slot {}: {} config={} oper_up={}",
            card.slot,
            card.hw_type,
            if card.configured { "yes" } else { "no" },
            if card.oper_up { "yes" } else { "no" }
        ));
    }

    out.push(String::new());
    out.push(format!("ports={}", inventory.ports.len()));
    for port in &inventory.ports {
        out.push(format!(
            "- {} type={} admin={} speed={} alias={}",
            port.id,
            port.port_type.as_str(),
            if port.enabled { "enabled" } else { "disabled" },
            port.speed.as_str(),
            port.alias.as_deref().unwrap_or("-")
        ));
    }

    if !inventory.inline_networks.is_empty() || !inventory.inline_tools.is_empty() {
        out.push(String::new());
        for net in &inventory.inline_networks {
            out.push(format!(
                "- inline-network {}: net-a={} net-b={}",
                net.alias,
                net.net_a.display_token(),
                net.net_b.display_token()
            ));
        }
        for tool in &inventory.inline_tools {
            out.push(format!(
                "- inline-tool {}: side-a={} side-b={}{}",
                tool.alias,
                tool.side_a.display_token(),
                tool.side_b.display_token(),
                if tool.spare { " (spare)" } else { "" }
            ));
        }
    }

    if !inventory.maps.is_empty() {
        out.push(String::new());
        for map in &inventory.maps {
            out.push(format!(
                "- map {}: from=[{}] to=[{}]{}",
                map.alias,
                join_refs(&map.from),
                join_refs(&map.to),
                map.gsop
                    .as_ref()
                    .map(|g| format!(" gsop={g}"))
                    .unwrap_or_default()
            ));
        }
    }

    for gsop in &inventory.gsops {
        out.push(format!("- gsop {}: {}", gsop.alias, gsop.operation));
    }
    for group in &inventory.gsgroups {
        out.push(format!(
            "- gsgroup {}: ports=[{}]",
            group.alias,
            join_refs(&group.ports)
        ));
    }

    out.join("\n")
}

/// Render the fact snapshot the recommender sees.
pub fn render_facts_text(facts: &RecommendationFact) -> String {
    let mut out = Vec::new();
    out.push(format!("active_ports={}", facts.total_active_ports));
    out.push(format!(
        "gigasmart={}",
        if facts.requires_special_processing { "yes" } else { "no" }
    ));
    out.push(format!("inline={}", if facts.has_inline { "yes" } else { "no" }));
    out.push(format!("has_1g={}", if facts.has_1g_ports { "yes" } else { "no" }));
    for (class, count) in &facts.port_class_counts {
        out.push(format!("ports_{}={count}", class.as_str()));
    }
    out.join("\n")
}

/// Render warnings with the code highlighted.
pub fn render_warnings(warnings: &[Warning]) -> String {
    let mut out = Vec::new();
    for warning in warnings {
        out.push(format!(
            "{} {}: {}",
            "WARN".yellow(),
            warning.code.yellow(),
            warning.message
        ));
    }
    out.join("\n")
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

fn join_refs(refs: &[PortRef]) -> String {
    refs.iter()
        .map(|r| r.display_token())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use showdiag_core::split_capture;

    use super::{render_facts_text, render_inventory_text};
    use crate::classify::build_facts;
    use crate::inventory::build_inventory;

    const RAW: &str = "\
show chassis\n\
Hostname: gv-hc2-01\n\
show port alias\n\
Alias   Port    Type     Admin    Speed\n\
fw-net  1/1/x1  network  enabled  10G\n";

    #[test]
    fn inventory_rendering_names_device_and_ports() {
        let (inventory, _) = build_inventory(&split_capture(RAW));
        let text = render_inventory_text(&inventory);
        assert!(text.contains("hostname=gv-hc2-01"));
        assert!(text.contains("ports=1"));
        assert!(text.contains("- 1/1/x1 type=network admin=enabled speed=10G alias=fw-net"));
    }

    #[test]
    fn facts_rendering_is_key_value() {
        let (inventory, _) = build_inventory(&split_capture(RAW));
        let text = render_facts_text(&build_facts(&inventory));
        assert!(text.contains("active_ports=1"));
        assert!(text.contains("gigasmart=no"));
        assert!(text.contains("ports_10G=1"));
    }
}
