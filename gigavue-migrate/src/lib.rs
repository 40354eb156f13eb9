//! GigaVUE-HC2 migration planning from captured show-command output.
//!
//! The HC2 series is end-of-sale; this library turns a raw capture of
//! `show` command output from a live unit into a structured inventory,
//! recommends a current-generation replacement platform, maps every
//! active port onto the target, and resolves an orderable bill of
//! materials. Captures are messy by nature, so every stage degrades
//! into warnings instead of failing: a partially garbled capture still
//! produces a usable plan.
//!
//! # Architecture
//!
//! ## Parsing
//!
//! - [`ports`] — Canonical port identifiers, speed classes, range expansion
//! - [`parse_chassis`] — Device identity from the chassis and version blocks
//! - [`parse_cards`] — Slot occupancy and module speed inference
//! - [`parse_ports`] — The columnar port/alias table
//! - [`parse_inline`] — Inline network and inline tool records
//! - [`parse_maps`] — Traffic map records
//! - [`parse_gigasmart`] — GigaSMART operations and engine groups
//! - [`inventory`] — Merging raw records and resolving port references
//!
//! ## Planning
//!
//! - [`classify`] — Derived facts the recommendation rules consume
//! - [`recommend`] — Ordered platform selection rules with a strategy seam
//! - [`port_map`] — First-fit allocation onto the target slot layout
//! - [`catalog`] — The TOML product catalog, embedded and overridable
//! - [`materials`] — Bill-of-materials resolution
//! - [`plan`] — End-to-end orchestration into one [`plan::MigrationPlan`]
//!
//! ## Reporting
//!
//! - [`report`] — Terminal rendering for inventory, facts, and warnings
//!
//! # Workflow
//!
//! 1. **Split** the capture into command sections (`showdiag-core`)
//! 2. **Build** the inventory, accumulating warnings
//! 3. **Classify** into the fact snapshot
//! 4. **Recommend** a target platform through the rule table
//! 5. **Map** active ports onto the target's slot layout
//! 6. **Resolve** the bill of materials from the catalog
//!
//! # Examples
//!
//! ```ignore
//! use gigavue_migrate::catalog::load_embedded;
//! use gigavue_migrate::plan::build_migration_plan;
//! use showdiag_core::split_capture_file;
//!
//! let capture = split_capture_file("hc2-show.log")?;
//! let catalog = load_embedded()?;
//! let plan = build_migration_plan(&capture, &catalog, None)?;
//! println!("{} -> {}", plan.device.hostname, plan.recommendation.primary.platform);
//! ```
//!
//! # Built on showdiag-core
//!
//! `showdiag-core` handles the generic mechanics of CLI captures,
//! splitting on command echoes and tokenizing columnar and key/value
//! lines. Everything GigaVUE-specific lives in this crate.

pub mod catalog;
pub mod classify;
pub mod inventory;
pub mod materials;
pub mod model;
pub mod parse_cards;
pub mod parse_chassis;
pub mod parse_gigasmart;
pub mod parse_inline;
pub mod parse_maps;
pub mod parse_ports;
pub mod plan;
pub mod port_map;
pub mod ports;
pub mod recommend;
pub mod report;
