//! The product catalog: the one piece of this tool that must track
//! vendor releases.
//!
//! The catalog is TOML, embedded at build time and overridable at run
//! time with `--catalog-dir <dir>` (expects `<dir>/platforms.toml`), so
//! SKU updates do not require a rebuild. The core only depends on the
//! lookup shape defined here, never on the data.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::port_map::{CapacityProfile, SlotClass, TargetSlot};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("catalog entry missing: platform '{0}'")]
    UnknownPlatform(String),
    #[error("catalog entry missing: {what} for platform '{platform}'")]
    MissingEntry { platform: String, what: String },
    #[error("catalog selection lists no fixed-port tiers")]
    NoFixedTiers,
}

/// Which platforms the selection rules draw from, in capacity order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Selection {
    /// Fixed-port tiers, smallest first.
    pub fixed_tiers: Vec<String>,
    /// The modular fallback and special-processing platform.
    pub modular: String,
    /// The small modular platform offered as an alternative.
    pub compact_modular: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SkuEntry {
    pub sku: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TransceiverEntry {
    pub sku: String,
    pub description: String,
    #[serde(default = "one")]
    pub min_order: u32,
}

fn one() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SlotGroup {
    pub prefix: String,
    pub count: u32,
    pub class: SlotClass,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PortModule {
    pub sku: String,
    pub description: String,
    pub ports_per_module: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Modules {
    pub port_module: Option<PortModule>,
    pub bypass: Option<SkuEntry>,
    pub tap_1g: Option<SkuEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlatformEntry {
    pub name: String,
    pub chassis_sku: String,
    pub description: String,
    /// Sizing threshold the selection rules compare port counts to.
    pub capacity: u32,
    pub power_supply_sku: String,
    pub power_supply_quantity: u32,
    pub slots: Vec<SlotGroup>,
    /// License SKUs keyed by capability (`gigasmart`, `inline_bypass`).
    #[serde(default)]
    pub licenses: BTreeMap<String, SkuEntry>,
    #[serde(default)]
    pub modules: Modules,
}

impl PlatformEntry {
    /// Expand slot groups into the ordered assignable layout.
    pub fn capacity_profile(&self) -> CapacityProfile {
        let mut slots = Vec::new();
        for group in &self.slots {
            for i in 1..=group.count {
                slots.push(TargetSlot {
                    id: format!("{}{}", group.prefix, i),
                    class: group.class,
                });
            }
        }
        CapacityProfile { slots }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Catalog {
    pub selection: Selection,
    pub platforms: BTreeMap<String, PlatformEntry>,
    /// Transceiver SKUs keyed by speed class (`1G`, `10G`, ...).
    pub transceivers: BTreeMap<String, TransceiverEntry>,
}

impl Catalog {
    pub fn platform(&self, id: &str) -> Result<&PlatformEntry, CatalogError> {
        self.platforms
            .get(id)
            .ok_or_else(|| CatalogError::UnknownPlatform(id.to_string()))
    }
}

/// Load the catalog compiled into the binary.
pub fn load_embedded() -> Result<Catalog, CatalogError> {
    parse_catalog(include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/catalog/platforms.toml"
    )))
}

/// Load `platforms.toml` from an override directory.
pub fn load_from_dir(dir: &Path) -> Result<Catalog, CatalogError> {
    let raw = std::fs::read_to_string(dir.join("platforms.toml"))?;
    parse_catalog(&raw)
}

fn parse_catalog(raw: &str) -> Result<Catalog, CatalogError> {
    let catalog: Catalog = toml::from_str(raw)?;
    validate(&catalog)?;
    Ok(catalog)
}

/// Every platform the selection rules can name must exist, otherwise a
/// recommendation could point at a platform the mapper and materials
/// resolver cannot look up.
fn validate(catalog: &Catalog) -> Result<(), CatalogError> {
    if catalog.selection.fixed_tiers.is_empty() {
        return Err(CatalogError::NoFixedTiers);
    }
    let mut referenced = catalog.selection.fixed_tiers.clone();
    referenced.push(catalog.selection.modular.clone());
    referenced.push(catalog.selection.compact_modular.clone());
    for id in referenced {
        if !catalog.platforms.contains_key(&id) {
            return Err(CatalogError::UnknownPlatform(id));
        }
    }
    Ok(())
}
