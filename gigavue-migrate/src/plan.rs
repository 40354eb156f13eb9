//! End-to-end plan assembly.
//!
//! One pass from a split capture to a [`MigrationPlan`]: inventory,
//! facts, recommendation, port map for the primary platform, bill of
//! materials. Warnings from every stage accumulate into the plan. The
//! only early failure is a capture with no recognizable hardware at
//! all; everything after that point degrades into warnings or the
//! `bom_error` field so the rest of the plan still comes out.

use serde::Serialize;
use showdiag_core::Capture;
use thiserror::Error;

use crate::catalog::{Catalog, CatalogError};
use crate::classify::{build_facts, RecommendationFact};
use crate::inventory::build_inventory;
use crate::materials::{resolve_materials, BomLine, MaterialNeeds};
use crate::model::{Device, Warning};
use crate::port_map::{map_ports, MapOutcome, PortMapResult};
use crate::recommend::{recommend_with_fallback, Recommend, Recommendation, RuleRecommender};

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("capture contains no cards and no ports; nothing to migrate")]
    EmptyCapture,
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationPlan {
    pub device: Device,
    pub facts: RecommendationFact,
    pub recommendation: Recommendation,
    pub port_map: PortMapResult,
    pub bom: Vec<BomLine>,
    /// Set when the bill of materials could not be resolved; the rest
    /// of the plan is still valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bom_error: Option<String>,
    pub warnings: Vec<Warning>,
}

/// Build the full migration plan for one capture.
pub fn build_migration_plan(
    capture: &Capture,
    catalog: &Catalog,
    alternate: Option<&dyn Recommend>,
) -> Result<MigrationPlan, PlanError> {
    let (inventory, mut warnings) = build_inventory(capture);
    if inventory.cards.is_empty() && inventory.ports.is_empty() {
        return Err(PlanError::EmptyCapture);
    }

    let facts = build_facts(&inventory);
    let rules = RuleRecommender::new(catalog);
    let mut recommendation =
        recommend_with_fallback(alternate, &rules, &facts, &inventory, &mut warnings);

    // An alternate recommender may name a platform the catalog does not
    // carry; the rule table only picks from validated selection ids.
    let platform = match catalog.platform(&recommendation.primary.platform) {
        Ok(platform) => platform,
        Err(err) => {
            warnings.push(Warning::new(
                "unknown_platform_choice",
                format!("{err}; using rule-based result"),
            ));
            recommendation = rules.evaluate(&facts);
            catalog.platform(&recommendation.primary.platform)?
        }
    };
    let port_map = map_ports(&inventory, &platform.capacity_profile(), &mut warnings);

    let needs = MaterialNeeds {
        mapped_counts: port_map.mapped_counts_by_class(),
        total_mapped: port_map.mapped_count(),
        requires_gigasmart: facts.requires_special_processing,
        requires_inline_bypass: facts.has_inline,
        has_1g_ports: facts.has_1g_ports,
    };
    let (bom, bom_error) =
        match resolve_materials(catalog, &recommendation.primary.platform, &needs) {
            Ok(bom) => (bom, None),
            Err(err) => (Vec::new(), Some(err.to_string())),
        };

    Ok(MigrationPlan {
        device: inventory.device.clone(),
        facts,
        recommendation,
        port_map,
        bom,
        bom_error,
        warnings,
    })
}

/// Human-readable plan rendering.
pub fn render_plan_text(plan: &MigrationPlan) -> String {
    let mut out = String::new();

    out.push_str("[device]\n");
    push_kv(&mut out, "hostname", or_dash(&plan.device.hostname));
    push_kv(&mut out, "hw_type", or_dash(&plan.device.hw_type));
    push_kv(
        &mut out,
        "software_version",
        or_dash(&plan.device.software_version),
    );

    out.push_str("\n[facts]\n");
    push_kv(&mut out, "active_ports", &plan.facts.total_active_ports.to_string());
    push_kv(
        &mut out,
        "gigasmart",
        bool_str(plan.facts.requires_special_processing),
    );
    push_kv(&mut out, "inline", bool_str(plan.facts.has_inline));
    push_kv(&mut out, "has_1g", bool_str(plan.facts.has_1g_ports));
    for (class, count) in &plan.facts.port_class_counts {
        push_kv(&mut out, &format!("ports_{}", class.as_str()), &count.to_string());
    }

    out.push_str("\n[recommendation]\n");
    push_kv(&mut out, "primary", &plan.recommendation.primary.platform);
    push_kv(&mut out, "rationale", &plan.recommendation.primary.rationale);
    for alt in &plan.recommendation.alternatives {
        out.push_str(&format!("- alternative {}: {}\n", alt.platform, alt.rationale));
    }

    out.push_str("\n[port-map]\n");
    push_kv(&mut out, "mapped", &plan.port_map.mapped_count().to_string());
    push_kv(&mut out, "unmapped", &plan.port_map.unmapped_count().to_string());
    for mapping in &plan.port_map.mappings {
        let alias = mapping.alias.as_deref().unwrap_or("-");
        match &mapping.outcome {
            MapOutcome::Mapped { target } => out.push_str(&format!(
                "- {} ({alias}, {}) -> {target}\n",
                mapping.source,
                mapping.speed.as_str()
            )),
            MapOutcome::Unmapped { reason } => out.push_str(&format!(
                "- {} ({alias}, {}) !! {}\n",
                mapping.source,
                mapping.speed.as_str(),
                reason.as_str()
            )),
        }
    }
    for group in &plan.port_map.degraded {
        out.push_str(&format!(
            "- degraded {} '{}': {}\n",
            group.kind,
            group.alias,
            group.failed_members.join(", ")
        ));
    }

    out.push_str("\n[bill-of-materials]\n");
    if let Some(err) = &plan.bom_error {
        push_kv(&mut out, "error", err);
    }
    for line in &plan.bom {
        let note = line
            .note
            .as_ref()
            .map(|n| format!(" ({n})"))
            .unwrap_or_default();
        out.push_str(&format!(
            "- {:<12} {} x{} {}{note}\n",
            line.category.as_str(),
            line.sku,
            line.quantity,
            line.description
        ));
    }

    if !plan.warnings.is_empty() {
        out.push_str("\n[warnings]\n");
        for warning in &plan.warnings {
            out.push_str(&format!("- {}: {}\n", warning.code, warning.message));
        }
    }

    out
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

fn push_kv(out: &mut String, key: &str, value: &str) {
    out.push_str(&format!("{key}={value}\n"));
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
