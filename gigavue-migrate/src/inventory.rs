//! Merging block-parser records into one entity graph.
//!
//! Parsers hand over raw tokens; this pass owns the canonical port
//! identifier space. It merges port rows from the port table and the
//! alias block (first row wins, later rows add alias bindings), infers
//! missing speed classes, then rewrites every symbolic reference
//! (port alias, inline-network or inline-tool alias, port id, or
//! range) to [`PortRef`] values. An inline entity alias expands to its
//! member ports. A reference that cannot be resolved is retained as
//! `Unresolved` on the owning entity and surfaced as a warning; the
//! build itself never fails.

use std::collections::{BTreeMap, BTreeSet};

use showdiag_core::{Capture, SectionKind};

use crate::model::{
    GsGroup, InlineNetwork, InlineTool, Inventory, Port, PortRef, TrafficMap, Warning,
};
use crate::parse_cards::{module_speed, parse_cards};
use crate::parse_chassis::parse_device;
use crate::parse_gigasmart::{parse_gsgroups, parse_gsops};
use crate::parse_inline::{parse_inline_networks, parse_inline_tools};
use crate::parse_maps::parse_maps;
use crate::parse_ports::{parse_port_rows, parse_port_table, PortRow};
use crate::ports::{expand_port_token, PortId, SpeedClass};

/// Build the inventory for one capture. Always succeeds; every
/// recoverable problem becomes a warning.
pub fn build_inventory(capture: &Capture) -> (Inventory, Vec<Warning>) {
    let mut warnings = Vec::new();

    let (device, w) = parse_device(
        capture.section(SectionKind::Chassis),
        capture.section(SectionKind::Version),
    );
    warnings.extend(w);

    let (cards, w) = parse_cards(capture.section(SectionKind::Card));
    warnings.extend(w);

    let (mut rows, w) = parse_port_table(capture.section(SectionKind::Port));
    warnings.extend(w);
    let (alias_rows, w) = parse_port_rows(capture.section(SectionKind::PortAlias));
    warnings.extend(w);
    rows.extend(alias_rows);
    let (ports, aliases) = merge_port_rows(rows, &cards, &mut warnings);

    let mut resolver = Resolver {
        known: ports.iter().map(|p| p.id).collect(),
        aliases: &aliases,
        entities: BTreeMap::new(),
    };

    let (raw_nets, w) = parse_inline_networks(capture.section(SectionKind::InlineNetwork));
    warnings.extend(w);
    let inline_networks: Vec<InlineNetwork> = raw_nets
        .into_iter()
        .map(|raw| {
            let owner = format!("inline-network '{}'", raw.alias);
            InlineNetwork {
                net_a: resolver.resolve_side(&owner, "net-a", raw.net_a, &mut warnings),
                net_b: resolver.resolve_side(&owner, "net-b", raw.net_b, &mut warnings),
                alias: raw.alias,
            }
        })
        .collect();

    let (raw_tools, w) = parse_inline_tools(capture.section(SectionKind::InlineTool));
    warnings.extend(w);
    let inline_tools: Vec<InlineTool> = raw_tools
        .into_iter()
        .map(|raw| {
            let owner = format!("inline-tool '{}'", raw.alias);
            InlineTool {
                side_a: resolver.resolve_side(&owner, "side-a", raw.side_a, &mut warnings),
                side_b: resolver.resolve_side(&owner, "side-b", raw.side_b, &mut warnings),
                enabled: raw.enabled,
                spare: raw.alias.to_ascii_lowercase().contains("spare"),
                alias: raw.alias,
            }
        })
        .collect();

    // Maps and gsgroups may name inline entities by alias; those
    // expand to the entity's member ports.
    for net in &inline_networks {
        resolver.register_entity(&net.alias, vec![net.net_a.clone(), net.net_b.clone()]);
    }
    for tool in &inline_tools {
        resolver.register_entity(&tool.alias, vec![tool.side_a.clone(), tool.side_b.clone()]);
    }

    let (raw_maps, w) = parse_maps(capture.section(SectionKind::Map));
    warnings.extend(w);
    let maps = raw_maps
        .into_iter()
        .map(|raw| {
            let owner = format!("map '{}'", raw.alias);
            TrafficMap {
                from: resolver.resolve_list(&owner, &raw.from, &mut warnings),
                to: resolver.resolve_list(&owner, &raw.to, &mut warnings),
                gsop: raw.gsop,
                alias: raw.alias,
            }
        })
        .collect();

    let (gsops, w) = parse_gsops(capture.section(SectionKind::Gsop));
    warnings.extend(w);

    let (raw_groups, w) = parse_gsgroups(capture.section(SectionKind::GsGroup));
    warnings.extend(w);
    let gsgroups = raw_groups
        .into_iter()
        .map(|raw| {
            let owner = format!("gsgroup '{}'", raw.alias);
            GsGroup {
                ports: resolver.resolve_list(&owner, &raw.ports, &mut warnings),
                alias: raw.alias,
            }
        })
        .collect();

    let inventory = Inventory {
        device,
        cards,
        ports,
        aliases,
        inline_networks,
        inline_tools,
        maps,
        gsops,
        gsgroups,
    };
    (inventory, warnings)
}

/// Merge rows into port records and alias bindings. The first row for a
/// port defines the record; later rows only contribute bindings.
fn merge_port_rows(
    rows: Vec<PortRow>,
    cards: &[crate::model::Card],
    warnings: &mut Vec<Warning>,
) -> (Vec<Port>, BTreeMap<String, PortId>) {
    let mut ports: Vec<Port> = Vec::new();
    let mut seen: BTreeSet<PortId> = BTreeSet::new();
    let mut aliases: BTreeMap<String, PortId> = BTreeMap::new();

    for row in rows {
        if let Some(alias) = &row.alias {
            match aliases.get(alias) {
                Some(existing) if *existing != row.id => warnings.push(Warning::new(
                    "duplicate_alias",
                    format!("alias '{alias}' bound to both {existing} and {}", row.id),
                )),
                Some(_) => {}
                None => {
                    aliases.insert(alias.clone(), row.id);
                }
            }
        }
        if row.binding_only || !seen.insert(row.id) {
            continue;
        }
        let speed = row
            .speed
            .or_else(|| row.id.speed_hint())
            .or_else(|| card_speed(cards, row.id))
            .unwrap_or(SpeedClass::TenG);
        ports.push(Port {
            id: row.id,
            port_type: row.port_type,
            alias: row.alias,
            enabled: row.enabled,
            speed,
            media: row.media,
        });
    }

    (ports, aliases)
}

fn card_speed(cards: &[crate::model::Card], id: PortId) -> Option<SpeedClass> {
    let slot = id.slot.to_string();
    cards
        .iter()
        .find(|c| c.slot == slot)
        .and_then(|c| module_speed(&c.hw_type))
}

struct Resolver<'a> {
    known: BTreeSet<PortId>,
    aliases: &'a BTreeMap<String, PortId>,
    entities: BTreeMap<String, Vec<PortRef>>,
}

impl Resolver<'_> {
    /// Register an inline entity alias as expanding to its member
    /// ports.
    fn register_entity(&mut self, alias: &str, members: Vec<PortRef>) {
        self.entities.insert(alias.to_string(), members);
    }

    /// Resolve one raw token into port references, warning for each
    /// member that does not name a known port.
    fn resolve_token(&self, owner: &str, token: &str, warnings: &mut Vec<Warning>) -> Vec<PortRef> {
        if let Some(id) = self.aliases.get(token) {
            return vec![PortRef::Resolved(*id)];
        }
        if let Some(members) = self.entities.get(token) {
            return members.clone();
        }
        match expand_port_token(token) {
            Some(ids) => ids
                .into_iter()
                .map(|id| {
                    if self.known.contains(&id) {
                        PortRef::Resolved(id)
                    } else {
                        warnings.push(Warning::new(
                            "unresolved_reference",
                            format!("{owner} references '{id}' which is not a known port"),
                        ));
                        PortRef::Unresolved(id.to_string())
                    }
                })
                .collect(),
            None => {
                warnings.push(Warning::new(
                    "unresolved_reference",
                    format!("{owner} references '{token}' which is neither an alias nor a port"),
                ));
                vec![PortRef::Unresolved(token.to_string())]
            }
        }
    }

    fn resolve_list(
        &self,
        owner: &str,
        tokens: &[String],
        warnings: &mut Vec<Warning>,
    ) -> Vec<PortRef> {
        tokens
            .iter()
            .flat_map(|token| self.resolve_token(owner, token, warnings))
            .collect()
    }

    /// Resolve a single-port attribute such as `net-a`. A missing or
    /// multi-port value degrades to the first member or an unresolved
    /// marker, with a warning either way.
    fn resolve_side(
        &self,
        owner: &str,
        attr: &str,
        token: Option<String>,
        warnings: &mut Vec<Warning>,
    ) -> PortRef {
        let Some(token) = token else {
            warnings.push(Warning::new(
                "incomplete_record",
                format!("{owner} has no {attr} port"),
            ));
            return PortRef::Unresolved(format!("missing {attr}"));
        };
        let mut refs = self.resolve_token(owner, &token, warnings);
        if refs.len() > 1 {
            warnings.push(Warning::new(
                "incomplete_record",
                format!("{owner} {attr} names {} ports, expected one", refs.len()),
            ));
        }
        refs.swap_remove(0)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use showdiag_core::split_capture;

    use super::build_inventory;
    use crate::model::PortRef;
    use crate::ports::SpeedClass;

    const SMALL: &str = "\
show chassis\n\
Hostname: gv-hc2-01\n\
HW Type : CHS-HC2\n\
show card\n\
Slot  Config  Oper  HW Type\n\
1     yes     up    PRT-HC0-X24\n\
2     yes     up    TAP-HC0-G100C0\n\
show port alias\n\
Alias     Port     Type     Admin     Speed  Media\n\
fw-a-net  1/1/x1   network  enabled   10G    SFP+\n\
fw-b-net  1/1/x2   network  enabled   10G    SFP+\n\
-         1/2/p1   network  enabled\n\
show inline-network\n\
inline-network alias in-net-1\n\
  net-a fw-a-net\n\
  net-b fw-b-net\n";

    #[test]
    fn resolves_aliases_to_port_ids() {
        let capture = split_capture(SMALL);
        let (inventory, warnings) = build_inventory(&capture);
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        let net = &inventory.inline_networks[0];
        assert_eq!(net.net_a, PortRef::Resolved(inventory.ports[0].id));
        assert_eq!(net.net_b, PortRef::Resolved(inventory.ports[1].id));
    }

    #[test]
    fn falls_back_to_card_module_for_speed() {
        // 1/2/p1 has no speed column and prefix 'p' implies none, so
        // the TAP module in slot 2 decides.
        let capture = split_capture(SMALL);
        let (inventory, _) = build_inventory(&capture);
        let port = inventory
            .ports
            .iter()
            .find(|p| p.id.to_string() == "1/2/p1")
            .expect("port");
        assert_eq!(port.speed, SpeedClass::OneG);
    }

    #[test]
    fn unknown_alias_reference_is_flagged_not_dropped() {
        let raw = format!("{SMALL}inline-network alias broken\n  net-a ghost-alias\n  net-b 1/1/x2\n");
        let capture = split_capture(&raw);
        let (inventory, warnings) = build_inventory(&capture);
        let broken = &inventory.inline_networks[1];
        assert_eq!(broken.net_a, PortRef::Unresolved("ghost-alias".to_string()));
        assert!(broken.net_b.resolved().is_some());
        assert!(warnings.iter().any(|w| w.code == "unresolved_reference"));
    }

    #[test]
    fn range_reference_resolves_member_by_member() {
        let raw = format!("{SMALL}show map\nmap alias agg\n  from 1/1/x1..x3\n  to fw-b-net\n");
        let capture = split_capture(&raw);
        let (inventory, warnings) = build_inventory(&capture);
        let map = &inventory.maps[0];
        assert_eq!(map.from.len(), 3);
        assert!(map.from[0].resolved().is_some());
        assert!(map.from[1].resolved().is_some());
        // 1/1/x3 is not a configured port.
        assert_eq!(map.from[2], PortRef::Unresolved("1/1/x3".to_string()));
        assert!(warnings.iter().any(|w| w.code == "unresolved_reference"));
    }

    #[test]
    fn missing_side_is_recorded_as_incomplete() {
        let raw = format!("{SMALL}inline-network alias half\n  net-a fw-a-net\n");
        let capture = split_capture(&raw);
        let (inventory, warnings) = build_inventory(&capture);
        let half = &inventory.inline_networks[1];
        assert_eq!(half.net_b, PortRef::Unresolved("missing net-b".to_string()));
        assert!(warnings.iter().any(|w| w.code == "incomplete_record"));
    }

    #[test]
    fn building_twice_yields_identical_inventories() {
        let capture = split_capture(SMALL);
        assert_eq!(build_inventory(&capture), build_inventory(&capture));
    }

    #[test]
    fn port_first_table_with_bare_alias_block_builds_ports() {
        let raw = "\
show chassis\n\
Hostname: gv-hc2-05\n\
HW Type : CHS-HC2\n\
show port\n\
Port     Type     Alias     Admin     Speed  Media\n\
----     ----     -----     -----     -----  -----\n\
1/1/x1   network  -         enabled   10G    SFP+\n\
1/1/x2   network  -         enabled   10G    SFP+\n\
1/1/x3   tool     -         disabled  10G    SFP+\n\
show port alias\n\
Alias     Port\n\
------    ----\n\
fw-a-net  1/1/x1\n";
        let capture = split_capture(raw);
        let (inventory, warnings) = build_inventory(&capture);
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(inventory.ports.len(), 3);
        assert_eq!(inventory.aliases.get("fw-a-net"), Some(&inventory.ports[0].id));
        assert_eq!(inventory.enabled_ports().count(), 2);
    }

    #[test]
    fn map_endpoints_resolve_inline_entity_aliases_to_members() {
        let raw = format!(
            "{SMALL}\
show inline-tool\n\
inline-tool alias ips-1\n\
  side-a 1/1/x1\n\
  side-b 1/1/x2\n\
show map\n\
map alias fw-to-ips\n\
  from in-net-1\n\
  to ips-1\n"
        );
        let capture = split_capture(&raw);
        let (inventory, warnings) = build_inventory(&capture);
        assert!(
            !warnings.iter().any(|w| w.code == "unresolved_reference"),
            "unexpected warnings: {warnings:?}"
        );
        let map = &inventory.maps[0];
        assert_eq!(map.from.len(), 2);
        assert_eq!(map.from[0], PortRef::Resolved(inventory.ports[0].id));
        assert_eq!(map.from[1], PortRef::Resolved(inventory.ports[1].id));
        assert_eq!(map.to.len(), 2);
        assert!(map.to.iter().all(|r| r.resolved().is_some()));
    }
}
