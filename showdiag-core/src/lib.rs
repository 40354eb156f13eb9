//! Generic primitives for working with captured GigaVUE-OS CLI output.
//!
//! A "show diag" capture is the concatenated output of many unrelated
//! `show` commands, each with its own ad-hoc layout, possibly missing,
//! repeated, or reordered. This crate recovers structure from that blob
//! without knowing anything about what the sections mean: it splits the
//! capture into labeled sections keyed by command echo and provides
//! whitespace-tolerant field helpers for the tabular and key-value
//! layouts the individual commands emit. All appliance-specific logic
//! lives in higher-level tools.

pub mod fields;
pub mod section;

pub use fields::{columns, is_separator_line, key_value};
pub use section::{
    capture_to_json, split_capture, split_capture_file, Capture, CaptureError, SectionKind,
};
