//! Bill-of-materials resolution for a selected platform.
//!
//! Quantities come from the port-mapping result, never from raw
//! inventory counts, so a port the mapper could not place does not buy
//! an optic. Resolution is the one late stage that can fail: a platform
//! that needs a capability license the catalog does not list is a hard
//! [`CatalogError`], because silently omitting the line would ship an
//! unusable quote.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::{Catalog, CatalogError};
use crate::ports::SpeedClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BomCategory {
    Chassis,
    Module,
    License,
    Transceiver,
    Power,
}

impl BomCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BomCategory::Chassis => "chassis",
            BomCategory::Module => "module",
            BomCategory::License => "license",
            BomCategory::Transceiver => "transceiver",
            BomCategory::Power => "power",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BomLine {
    pub category: BomCategory,
    pub sku: String,
    pub description: String,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Inputs the resolver needs beyond the platform itself.
#[derive(Debug, Clone, Default)]
pub struct MaterialNeeds {
    /// Mapped port counts keyed by source speed class.
    pub mapped_counts: BTreeMap<SpeedClass, usize>,
    pub total_mapped: usize,
    pub requires_gigasmart: bool,
    pub requires_inline_bypass: bool,
    pub has_1g_ports: bool,
}

/// Resolve the ordered bill of materials for `platform_id`.
pub fn resolve_materials(
    catalog: &Catalog,
    platform_id: &str,
    needs: &MaterialNeeds,
) -> Result<Vec<BomLine>, CatalogError> {
    let platform = catalog.platform(platform_id)?;
    let mut lines = Vec::new();

    lines.push(BomLine {
        category: BomCategory::Chassis,
        sku: platform.chassis_sku.clone(),
        description: platform.description.clone(),
        quantity: 1,
        note: None,
    });

    if let Some(module) = &platform.modules.port_module {
        let per = module.ports_per_module.max(1) as usize;
        let count = needs.total_mapped.div_ceil(per).max(1) as u32;
        lines.push(BomLine {
            category: BomCategory::Module,
            sku: module.sku.clone(),
            description: module.description.clone(),
            quantity: count,
            note: Some(format!(
                "{} mapped ports at {} per module",
                needs.total_mapped, module.ports_per_module
            )),
        });
    }
    if needs.requires_inline_bypass {
        if let Some(bypass) = &platform.modules.bypass {
            lines.push(BomLine {
                category: BomCategory::Module,
                sku: bypass.sku.clone(),
                description: bypass.description.clone(),
                quantity: 1,
                note: Some("inline bypass protection".to_string()),
            });
        }
    }
    if needs.has_1g_ports {
        if let Some(tap) = &platform.modules.tap_1g {
            lines.push(BomLine {
                category: BomCategory::Module,
                sku: tap.sku.clone(),
                description: tap.description.clone(),
                quantity: 1,
                note: Some("native 1G copper access".to_string()),
            });
        }
    }

    if needs.requires_gigasmart {
        let license = platform.licenses.get("gigasmart").ok_or_else(|| {
            CatalogError::MissingEntry {
                platform: platform_id.to_string(),
                what: "gigasmart license".to_string(),
            }
        })?;
        lines.push(BomLine {
            category: BomCategory::License,
            sku: license.sku.clone(),
            description: license.description.clone(),
            quantity: 1,
            note: Some("GigaSMART constructs in source configuration".to_string()),
        });
    }
    if needs.requires_inline_bypass {
        if let Some(license) = platform.licenses.get("inline_bypass") {
            lines.push(BomLine {
                category: BomCategory::License,
                sku: license.sku.clone(),
                description: license.description.clone(),
                quantity: 1,
                note: Some("inline networks in source configuration".to_string()),
            });
        }
    }

    for (class, count) in &needs.mapped_counts {
        if *count == 0 {
            continue;
        }
        let key = class.as_str();
        let Some(transceiver) = catalog.transceivers.get(key) else {
            return Err(CatalogError::MissingEntry {
                platform: platform_id.to_string(),
                what: format!("{key} transceiver"),
            });
        };
        let quantity = (*count as u32).max(transceiver.min_order);
        lines.push(BomLine {
            category: BomCategory::Transceiver,
            sku: transceiver.sku.clone(),
            description: transceiver.description.clone(),
            quantity,
            note: (quantity as usize > *count)
                .then(|| format!("rounded up from {count} to minimum order")),
        });
    }

    lines.push(BomLine {
        category: BomCategory::Power,
        sku: platform.power_supply_sku.clone(),
        description: format!("{} power supply", platform.name),
        quantity: platform.power_supply_quantity,
        note: Some("redundant pair".to_string()).filter(|_| platform.power_supply_quantity == 2),
    });

    Ok(lines)
}
