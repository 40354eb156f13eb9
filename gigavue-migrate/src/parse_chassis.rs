//! Chassis and version block parsing.
//!
//! Both blocks are loose `Key : value` listings. The chassis block
//! carries hostname and hardware type; the software version usually
//! appears in the version block as `Software Version: GigaVUE-OS 5.x`,
//! but some captures repeat it in the chassis block, so both sections
//! feed the same [`Device`].

use showdiag_core::key_value;

use crate::model::{Device, Warning};

/// Extract device identity from chassis and version block lines.
///
/// Unknown keys are ignored; a device with every field empty is still
/// returned so downstream stages can report the gap instead of failing
/// here.
pub fn parse_device(chassis_lines: &[String], version_lines: &[String]) -> (Device, Vec<Warning>) {
    let mut device = Device::default();
    let mut warnings = Vec::new();

    for line in chassis_lines.iter().chain(version_lines) {
        let Some((key, value)) = key_value(line) else {
            continue;
        };
        match key.to_ascii_lowercase().as_str() {
            "hostname" => device.hostname = value.to_string(),
            "hw type" | "hardware type" => device.hw_type = value.to_string(),
            "software version" | "version" => {
                device.software_version = strip_os_prefix(value).to_string();
            }
            _ => {}
        }
    }

    if device.hostname.is_empty() && !chassis_lines.is_empty() {
        warnings.push(Warning::new(
            "missing_hostname",
            "chassis block present but no hostname found",
        ));
    }

    (device, warnings)
}

fn strip_os_prefix(value: &str) -> &str {
    value
        .strip_prefix("GigaVUE-OS")
        .map(str::trim)
        .unwrap_or(value)
}
