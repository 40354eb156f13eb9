//! Splitting a raw capture into labeled command sections.
//!
//! Detection is deliberately loose: a line opens a new section when the
//! text after any leading prompt (`host (config) # `) matches a known
//! command echo, case-insensitively. Lines before the first recognized
//! command and the bodies of unrecognized `show` commands are retained
//! in an unparsed bucket rather than failing the run. A section kind
//! that appears more than once has its line runs concatenated in order
//! of appearance.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

/// The command sections a capture can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum SectionKind {
    Version,
    Chassis,
    Card,
    Diag,
    RunningConfig,
    InlineNetwork,
    InlineTool,
    Port,
    PortAlias,
    Map,
    Gsop,
    GsGroup,
}

impl SectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Version => "version",
            SectionKind::Chassis => "chassis",
            SectionKind::Card => "card",
            SectionKind::Diag => "diag",
            SectionKind::RunningConfig => "running-config",
            SectionKind::InlineNetwork => "inline-network",
            SectionKind::InlineTool => "inline-tool",
            SectionKind::Port => "port",
            SectionKind::PortAlias => "port-alias",
            SectionKind::Map => "map",
            SectionKind::Gsop => "gsop",
            SectionKind::GsGroup => "gsgroup",
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command echoes, most specific first so `show port alias` wins over
/// `show port` and `show inline-network` is not eaten by a shorter
/// prefix.
const COMMAND_ECHOES: &[(&str, SectionKind)] = &[
    ("show version", SectionKind::Version),
    ("show chassis", SectionKind::Chassis),
    ("show card", SectionKind::Card),
    ("show diag", SectionKind::Diag),
    ("show running-config", SectionKind::RunningConfig),
    ("show inline-network", SectionKind::InlineNetwork),
    ("show inline-tool", SectionKind::InlineTool),
    ("show port alias", SectionKind::PortAlias),
    ("show port", SectionKind::Port),
    ("show map", SectionKind::Map),
    ("show gsop", SectionKind::Gsop),
    ("show gsgroup", SectionKind::GsGroup),
];

/// A capture split into per-kind line runs plus an unparsed bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Capture {
    pub sections: BTreeMap<SectionKind, Vec<String>>,
    pub unparsed: Vec<String>,
}

impl Capture {
    /// Lines belonging to a section kind; empty when the command never
    /// appeared in the capture.
    pub fn section(&self, kind: SectionKind) -> &[String] {
        self.sections.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Errors reading a capture file from disk.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("failed to read capture file: {0}")]
    Io(#[from] std::io::Error),
}

/// Split raw capture text into labeled sections.
///
/// Never fails: anything that is not inside a recognized command block
/// ends up in [`Capture::unparsed`]. The result is deterministic for a
/// given input.
pub fn split_capture(raw: &str) -> Capture {
    let mut capture = Capture::default();
    let mut current: Option<SectionKind> = None;

    for line in raw.lines() {
        match classify_echo(line) {
            Echo::Known(kind) => {
                current = Some(kind);
                capture.sections.entry(kind).or_default();
            }
            Echo::Unknown => {
                current = None;
                capture.unparsed.push(line.to_string());
            }
            Echo::NotAnEcho => match current {
                Some(kind) => capture
                    .sections
                    .entry(kind)
                    .or_default()
                    .push(line.to_string()),
                None => capture.unparsed.push(line.to_string()),
            },
        }
    }

    capture
}

/// Read and split a capture file.
pub fn split_capture_file(path: &Path) -> Result<Capture, CaptureError> {
    let raw = fs::read_to_string(path)?;
    Ok(split_capture(&raw))
}

/// Serialize a capture as pretty JSON.
pub fn capture_to_json(capture: &Capture) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(capture)
}

enum Echo {
    Known(SectionKind),
    Unknown,
    NotAnEcho,
}

fn classify_echo(line: &str) -> Echo {
    let Some(command) = command_text(line) else {
        return Echo::NotAnEcho;
    };
    for (echo, kind) in COMMAND_ECHOES {
        if command.starts_with(echo) {
            return Echo::Known(*kind);
        }
    }
    Echo::Unknown
}

/// Extract the command text from a possible echo line: the part after
/// the last prompt terminator, lowercased. Returns `None` for lines
/// that do not look like a `show` command at all.
fn command_text(line: &str) -> Option<String> {
    let trimmed = line.trim();
    let after_prompt = match trimmed.rfind(" # ") {
        Some(idx) => &trimmed[idx + 3..],
        None => match trimmed.rfind(" > ") {
            Some(idx) => &trimmed[idx + 3..],
            None => trimmed,
        },
    };
    let lowered = after_prompt.trim().to_ascii_lowercase();
    if lowered.starts_with("show ") {
        Some(lowered)
    } else {
        None
    }
}
