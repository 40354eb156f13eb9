//! Allocation of source ports onto a target platform's port layout.
//!
//! Assignment is first-fit, stable, and order-preserving: enabled
//! source ports are visited in discovery order and take the
//! lowest-index free target slot whose class accepts their speed. A
//! port that cannot be placed is recorded with a reason, never dropped.
//! Inline constructs map as a unit: if any member port failed, the
//! whole construct is flagged degraded with the failing members.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{Inventory, PortRef, Warning};
use crate::ports::{PortId, SpeedClass};

/// What a physical target slot can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotClass {
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
    #[serde(rename = "multi")]
    MultiRate,
}

impl SlotClass {
    /// Compatibility table: identical class always fits; SFP cages take
    /// slower SFP optics (1G in a 10G/25G slot needs a conversion
    /// module but is supported); QSFP28 cages take 40G; multi-rate
    /// takes everything.
    pub fn accepts(self, port: SpeedClass) -> bool {
        match self {
            SlotClass::OneG => port == SpeedClass::OneG,
            SlotClass::TenG => matches!(port, SpeedClass::TenG | SpeedClass::OneG),
            SlotClass::TwentyFiveG => matches!(
                port,
                SpeedClass::TwentyFiveG | SpeedClass::TenG | SpeedClass::OneG
            ),
            SlotClass::FortyG => port == SpeedClass::FortyG,
            SlotClass::HundredG => matches!(port, SpeedClass::HundredG | SpeedClass::FortyG),
            SlotClass::MultiRate => true,
        }
    }
}

/// One assignable port position on the target platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetSlot {
    pub id: String,
    pub class: SlotClass,
}

/// The ordered slot layout of a target platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CapacityProfile {
    pub slots: Vec<TargetSlot>,
}

/// Why a source port could not be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmappedReason {
    CapacityExhausted,
    NoCompatibleSpeedClass,
}

impl UnmappedReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnmappedReason::CapacityExhausted => "capacity exhausted",
            UnmappedReason::NoCompatibleSpeedClass => "no compatible speed class",
        }
    }
}

/// Outcome for one source port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MapOutcome {
    Mapped { target: String },
    Unmapped { reason: UnmappedReason },
}

/// One line of the port-by-port migration table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortMapping {
    pub source: PortId,
    pub alias: Option<String>,
    pub speed: SpeedClass,
    pub outcome: MapOutcome,
}

/// An inline construct whose members did not all map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegradedGroup {
    pub kind: String,
    pub alias: String,
    pub failed_members: Vec<String>,
}

/// Full result of the mapping pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PortMapResult {
    pub mappings: Vec<PortMapping>,
    pub degraded: Vec<DegradedGroup>,
}

impl PortMapResult {
    pub fn mapped_count(&self) -> usize {
        self.mappings
            .iter()
            .filter(|m| matches!(m.outcome, MapOutcome::Mapped { .. }))
            .count()
    }

    pub fn unmapped_count(&self) -> usize {
        self.mappings.len() - self.mapped_count()
    }

    /// Mapped port count per source speed class, the quantity basis for
    /// transceiver lines.
    pub fn mapped_counts_by_class(&self) -> BTreeMap<SpeedClass, usize> {
        let mut counts = BTreeMap::new();
        for mapping in &self.mappings {
            if matches!(mapping.outcome, MapOutcome::Mapped { .. }) {
                *counts.entry(mapping.speed).or_insert(0) += 1;
            }
        }
        counts
    }
}

/// Map every enabled source port onto the profile and derive degraded
/// inline constructs. GigaSMART engine ports are not candidates: they
/// never take a front-panel slot and never appear among the unmapped.
pub fn map_ports(
    inventory: &Inventory,
    profile: &CapacityProfile,
    warnings: &mut Vec<Warning>,
) -> PortMapResult {
    let mut taken = vec![false; profile.slots.len()];
    let mut mappings = Vec::new();
    let mut assigned: BTreeMap<PortId, bool> = BTreeMap::new();

    for port in inventory.migratable_ports() {
        let compatible_exists = profile.slots.iter().any(|s| s.class.accepts(port.speed));
        let outcome = if !compatible_exists {
            MapOutcome::Unmapped {
                reason: UnmappedReason::NoCompatibleSpeedClass,
            }
        } else {
            match profile
                .slots
                .iter()
                .enumerate()
                .find(|(idx, slot)| !taken[*idx] && slot.class.accepts(port.speed))
            {
                Some((idx, slot)) => {
                    taken[idx] = true;
                    MapOutcome::Mapped {
                        target: slot.id.clone(),
                    }
                }
                None => MapOutcome::Unmapped {
                    reason: UnmappedReason::CapacityExhausted,
                },
            }
        };
        if let MapOutcome::Unmapped { reason } = &outcome {
            warnings.push(Warning::new(
                "unmapped_port",
                format!("source port {} could not be placed: {}", port.id, reason.as_str()),
            ));
        }
        assigned.insert(port.id, matches!(outcome, MapOutcome::Mapped { .. }));
        mappings.push(PortMapping {
            source: port.id,
            alias: port.alias.clone(),
            speed: port.speed,
            outcome,
        });
    }

    let mut degraded = Vec::new();
    for net in &inventory.inline_networks {
        let failed = failed_members(&[&net.net_a, &net.net_b], &assigned);
        if !failed.is_empty() {
            degraded.push(DegradedGroup {
                kind: "inline-network".to_string(),
                alias: net.alias.clone(),
                failed_members: failed,
            });
        }
    }
    for tool in &inventory.inline_tools {
        let failed = failed_members(&[&tool.side_a, &tool.side_b], &assigned);
        if !failed.is_empty() {
            degraded.push(DegradedGroup {
                kind: "inline-tool".to_string(),
                alias: tool.alias.clone(),
                failed_members: failed,
            });
        }
    }
    for group in &degraded {
        warnings.push(Warning::new(
            "degraded_group",
            format!(
                "{} '{}' did not map as a unit: {}",
                group.kind,
                group.alias,
                group.failed_members.join(", ")
            ),
        ));
    }

    PortMapResult { mappings, degraded }
}

/// A member fails when its reference never resolved, its port is not
/// enabled (so it was never a mapping candidate), or its mapping came
/// back unmapped.
fn failed_members(members: &[&PortRef], assigned: &BTreeMap<PortId, bool>) -> Vec<String> {
    let mut failed = Vec::new();
    for member in members {
        match member {
            PortRef::Resolved(id) => {
                if !assigned.get(id).copied().unwrap_or(false) {
                    failed.push(id.to_string());
                }
            }
            PortRef::Unresolved(token) => failed.push(format!("unresolved:{token}")),
        }
    }
    failed
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use showdiag_core::split_capture;

    use super::{map_ports, CapacityProfile, MapOutcome, SlotClass, TargetSlot, UnmappedReason};
    use crate::inventory::build_inventory;
    use crate::ports::SpeedClass;

    fn profile(classes: &[(SlotClass, usize)]) -> CapacityProfile {
        let mut slots = Vec::new();
        for (class, count) in classes {
            for i in 0..*count {
                slots.push(TargetSlot {
                    id: format!("{:?}{}", class, i + 1).to_ascii_lowercase(),
                    class: *class,
                });
            }
        }
        CapacityProfile { slots }
    }

    fn ports_capture(rows: &[&str]) -> String {
        let mut raw = String::from("show port alias\nAlias  Port  Type  Admin  Speed\n");
        for row in rows {
            raw.push_str(row);
            raw.push('\n');
        }
        raw
    }

    #[test]
    fn assignment_is_first_fit_and_order_preserving() {
        let raw = ports_capture(&[
            "-  1/1/x1  network  enabled  10G",
            "-  1/1/x2  network  enabled  10G",
        ]);
        let (inventory, _) = build_inventory(&split_capture(&raw));
        let mut warnings = Vec::new();
        let result = map_ports(&inventory, &profile(&[(SlotClass::TwentyFiveG, 4)]), &mut warnings);
        assert_eq!(
            result.mappings[0].outcome,
            MapOutcome::Mapped { target: "twentyfiveg1".to_string() }
        );
        assert_eq!(
            result.mappings[1].outcome,
            MapOutcome::Mapped { target: "twentyfiveg2".to_string() }
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn conservation_mapped_plus_unmapped_equals_enabled() {
        let raw = ports_capture(&[
            "-  1/1/x1  network  enabled  10G",
            "-  1/1/x2  network  enabled  10G",
            "-  1/1/x3  network  enabled  10G",
            "-  1/1/x4  network  disabled 10G",
        ]);
        let (inventory, _) = build_inventory(&split_capture(&raw));
        let mut warnings = Vec::new();
        let result = map_ports(&inventory, &profile(&[(SlotClass::TenG, 2)]), &mut warnings);
        let enabled = inventory.enabled_ports().count();
        assert_eq!(result.mapped_count() + result.unmapped_count(), enabled);
        assert_eq!(result.mapped_count(), 2);
        assert_eq!(result.unmapped_count(), 1);
    }

    #[test]
    fn enabled_engine_ports_are_not_mapping_candidates() {
        let raw = ports_capture(&[
            "-  1/1/x1  network  enabled  10G",
            "-  1/1/x2  network  enabled  10G",
            "-  1/3/e1  engine   enabled",
        ]);
        let (inventory, _) = build_inventory(&split_capture(&raw));
        let mut warnings = Vec::new();
        let result = map_ports(&inventory, &profile(&[(SlotClass::TenG, 2)]), &mut warnings);
        assert!(result.mappings.iter().all(|m| m.source.to_string() != "1/3/e1"));
        let candidates = inventory.migratable_ports().count();
        assert_eq!(result.mapped_count() + result.unmapped_count(), candidates);
        assert_eq!(candidates, 2);
        assert!(warnings.is_empty());
    }

    #[test]
    fn no_slot_is_assigned_twice() {
        let raw = ports_capture(&[
            "-  1/1/x1  network  enabled  10G",
            "-  1/1/x2  network  enabled  10G",
        ]);
        let (inventory, _) = build_inventory(&split_capture(&raw));
        let mut warnings = Vec::new();
        let result = map_ports(&inventory, &profile(&[(SlotClass::TenG, 2)]), &mut warnings);
        let mut targets: Vec<String> = result
            .mappings
            .iter()
            .filter_map(|m| match &m.outcome {
                MapOutcome::Mapped { target } => Some(target.clone()),
                MapOutcome::Unmapped { .. } => None,
            })
            .collect();
        targets.sort();
        targets.dedup();
        assert_eq!(targets.len(), result.mapped_count());
    }

    #[test]
    fn reasons_distinguish_exhaustion_from_incompatibility() {
        let raw = ports_capture(&[
            "-  1/1/x1  network  enabled  10G",
            "-  1/1/x2  network  enabled  10G",
            "-  1/1/c1  network  enabled  100G",
        ]);
        let (inventory, _) = build_inventory(&split_capture(&raw));
        let mut warnings = Vec::new();
        let result = map_ports(&inventory, &profile(&[(SlotClass::TenG, 1)]), &mut warnings);
        assert_eq!(
            result.mappings[1].outcome,
            MapOutcome::Unmapped { reason: UnmappedReason::CapacityExhausted }
        );
        assert_eq!(
            result.mappings[2].outcome,
            MapOutcome::Unmapped { reason: UnmappedReason::NoCompatibleSpeedClass }
        );
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn one_gig_ports_fit_sfp_slots_via_conversion() {
        let raw = ports_capture(&["-  1/1/g1  network  enabled  1G"]);
        let (inventory, _) = build_inventory(&split_capture(&raw));
        let mut warnings = Vec::new();
        let result = map_ports(&inventory, &profile(&[(SlotClass::TwentyFiveG, 1)]), &mut warnings);
        assert_eq!(result.unmapped_count(), 0);
        assert!(SlotClass::TenG.accepts(SpeedClass::OneG));
        assert!(!SlotClass::HundredG.accepts(SpeedClass::TenG));
        assert!(SlotClass::MultiRate.accepts(SpeedClass::HundredG));
    }

    #[test]
    fn inline_construct_with_failed_member_is_degraded() {
        let raw = format!(
            "{}show inline-network\ninline-network alias seg-1\n  net-a 1/1/x1\n  net-b 1/1/x2\n",
            ports_capture(&[
                "-  1/1/x1  inline-network  enabled  10G",
                "-  1/1/x2  inline-network  enabled  10G",
            ])
        );
        let (inventory, _) = build_inventory(&split_capture(&raw));
        let mut warnings = Vec::new();
        let result = map_ports(&inventory, &profile(&[(SlotClass::TenG, 1)]), &mut warnings);
        assert_eq!(result.degraded.len(), 1);
        assert_eq!(result.degraded[0].alias, "seg-1");
        assert_eq!(result.degraded[0].failed_members, vec!["1/1/x2".to_string()]);
        assert!(warnings.iter().any(|w| w.code == "degraded_group"));
    }

    #[test]
    fn unresolved_member_marks_group_degraded() {
        let raw = format!(
            "{}show inline-network\ninline-network alias seg-1\n  net-a 1/1/x1\n  net-b ghost\n",
            ports_capture(&["-  1/1/x1  inline-network  enabled  10G"])
        );
        let (inventory, _) = build_inventory(&split_capture(&raw));
        let mut warnings = Vec::new();
        let result = map_ports(&inventory, &profile(&[(SlotClass::TenG, 4)]), &mut warnings);
        assert_eq!(result.degraded[0].failed_members, vec!["unresolved:ghost".to_string()]);
    }
}
