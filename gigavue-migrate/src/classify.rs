//! Derived facts over a finalized inventory.
//!
//! Total function: an empty inventory yields an all-zero fact, and
//! nothing here can fail. The fact snapshot is what the recommender
//! rules evaluate, so it is computed once and never mutated.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::Inventory;
use crate::ports::SpeedClass;

/// Read-only snapshot of the facts the recommendation rules consume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecommendationFact {
    pub total_active_ports: usize,
    pub requires_special_processing: bool,
    pub has_1g_ports: bool,
    pub has_inline: bool,
    pub port_class_counts: BTreeMap<SpeedClass, usize>,
}

/// Compute the fact snapshot. Counts cover enabled front-panel ports;
/// GigaSMART engine ports are excluded, their capacity comes from the
/// target's own modules.
pub fn build_facts(inventory: &Inventory) -> RecommendationFact {
    let mut port_class_counts: BTreeMap<SpeedClass, usize> = BTreeMap::new();
    let mut total_active_ports = 0usize;
    let mut has_1g_ports = false;

    for port in inventory.migratable_ports() {
        total_active_ports += 1;
        has_1g_ports |= port.speed == SpeedClass::OneG;
        *port_class_counts.entry(port.speed).or_insert(0) += 1;
    }

    RecommendationFact {
        total_active_ports,
        requires_special_processing: !inventory.gsops.is_empty()
            || !inventory.gsgroups.is_empty(),
        has_1g_ports,
        has_inline: !inventory.inline_networks.is_empty(),
        port_class_counts,
    }
}
