//! Target platform selection.
//!
//! The rule-based recommender evaluates ordered guards over the fact
//! snapshot; the first matching guard picks the primary platform and
//! later applicable guards contribute alternatives. The guards are
//! collectively exhaustive, so exactly one primary always comes out.
//! That property is pinned by tests so a new rule cannot silently open
//! a gap.
//!
//! [`Recommend`] is the seam for swapping in a different strategy (for
//! example a remote reasoning service). [`recommend_with_fallback`]
//! keeps such a strategy honest: on any failure the deterministic rule
//! result is used instead, so a run never ends without a
//! recommendation.

use anyhow::Result;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::classify::RecommendationFact;
use crate::model::{Inventory, Warning};

/// One selected platform with the facts that argued for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformChoice {
    pub platform: String,
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub primary: PlatformChoice,
    pub alternatives: Vec<PlatformChoice>,
}

/// Strategy seam for platform selection.
pub trait Recommend {
    fn recommend(&self, facts: &RecommendationFact, inventory: &Inventory)
        -> Result<Recommendation>;
}

/// The deterministic rule table over the catalog's selection set.
pub struct RuleRecommender<'a> {
    catalog: &'a Catalog,
}

impl<'a> RuleRecommender<'a> {
    pub fn new(catalog: &'a Catalog) -> RuleRecommender<'a> {
        RuleRecommender { catalog }
    }

    /// Infallible form; the trait wraps this in `Ok`.
    pub fn evaluate(&self, facts: &RecommendationFact) -> Recommendation {
        let selection = &self.catalog.selection;
        let total = facts.total_active_ports;

        if facts.requires_special_processing {
            return self.special_processing(facts);
        }

        let compact = &selection.fixed_tiers[0];
        let compact_cap = self.capacity(compact);
        if total <= compact_cap {
            if facts.has_1g_ports {
                return Recommendation {
                    primary: PlatformChoice {
                        platform: compact.clone(),
                        rationale: format!(
                            "{total} active ports fit {compact} ({compact_cap} ports); 1G ports \
                             present and need external media converters or 1G TAPs"
                        ),
                    },
                    alternatives: vec![PlatformChoice {
                        platform: selection.compact_modular.clone(),
                        rationale: format!(
                            "{} supports native 1G via a copper TAP module",
                            selection.compact_modular
                        ),
                    }],
                };
            }
            return Recommendation {
                primary: PlatformChoice {
                    platform: compact.clone(),
                    rationale: format!(
                        "{total} active ports, no GigaSMART, no 1G; fits {compact} \
                         ({compact_cap} ports)"
                    ),
                },
                alternatives: Vec::new(),
            };
        }

        // Above the compact tier: fall through progressively larger
        // fixed tiers before giving up and going modular.
        for tier in &selection.fixed_tiers[1..] {
            let cap = self.capacity(tier);
            if total <= cap {
                return Recommendation {
                    primary: PlatformChoice {
                        platform: tier.clone(),
                        rationale: format!(
                            "{total} active ports exceed {compact} ({compact_cap}) but fit \
                             {tier} ({cap} ports)"
                        ),
                    },
                    alternatives: Vec::new(),
                };
            }
        }

        let modular = &selection.modular;
        let per_module = self
            .catalog
            .platforms
            .get(modular)
            .and_then(|p| p.modules.port_module.as_ref())
            .map(|m| m.ports_per_module as usize)
            .unwrap_or(16);
        let modules_needed = total.div_ceil(per_module).max(1);
        Recommendation {
            primary: PlatformChoice {
                platform: modular.clone(),
                rationale: format!(
                    "{total} active ports exceed every fixed-port tier; {modular} with \
                     {modules_needed} port modules"
                ),
            },
            alternatives: Vec::new(),
        }
    }

    fn special_processing(&self, facts: &RecommendationFact) -> Recommendation {
        let selection = &self.catalog.selection;
        let total = facts.total_active_ports;
        let modular = &selection.modular;
        let compact_modular = &selection.compact_modular;

        let mut alternatives = Vec::new();
        let compact_cap = self.capacity(compact_modular);
        if total <= compact_cap {
            alternatives.push(PlatformChoice {
                platform: compact_modular.clone(),
                rationale: format!(
                    "{total} active ports also fit {compact_modular} ({compact_cap} ports) \
                     with a GigaSMART license"
                ),
            });
        }
        Recommendation {
            primary: PlatformChoice {
                platform: modular.clone(),
                rationale: format!(
                    "GigaSMART constructs present; {modular} with a GigaSMART license \
                     ({total} active ports)"
                ),
            },
            alternatives,
        }
    }

    fn capacity(&self, platform: &str) -> usize {
        // Selection ids are validated against the platform table at
        // catalog load, so the lookup cannot miss.
        self.catalog
            .platforms
            .get(platform)
            .map(|p| p.capacity as usize)
            .unwrap_or(0)
    }
}

impl Recommend for RuleRecommender<'_> {
    fn recommend(
        &self,
        facts: &RecommendationFact,
        _inventory: &Inventory,
    ) -> Result<Recommendation> {
        Ok(self.evaluate(facts))
    }
}

/// Run an alternate strategy with the rule table as the deterministic
/// fallback. A failure is downgraded to a warning; the run always ends
/// with a recommendation.
pub fn recommend_with_fallback(
    alternate: Option<&dyn Recommend>,
    rules: &RuleRecommender<'_>,
    facts: &RecommendationFact,
    inventory: &Inventory,
    warnings: &mut Vec<Warning>,
) -> Recommendation {
    if let Some(alternate) = alternate {
        match alternate.recommend(facts, inventory) {
            Ok(recommendation) => return recommendation,
            Err(err) => warnings.push(Warning::new(
                "alternate_recommender_failed",
                format!("alternate recommender failed ({err}); using rule-based result"),
            )),
        }
    }
    rules.evaluate(facts)
}
