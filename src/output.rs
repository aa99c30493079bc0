//! Rendering resolved versions as output lines for CI consumption.

use crate::version::VersionInfo;
use anyhow::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// The `key=value` pairs for a resolved version, in output order.
fn output_pairs(info: &VersionInfo) -> [(&'static str, String); 5] {
    [
        ("version", info.version.clone()),
        ("tag", info.tag.clone()),
        ("major", info.major.to_string()),
        ("minor", info.minor.to_string()),
        ("patch", info.patch.to_string()),
    ]
}

/// Render the output lines as a string.
pub fn render_outputs(info: &VersionInfo) -> String {
    let mut output = String::new();
    for (key, value) in output_pairs(info) {
        output.push_str(&format!("{}={}\n", key, value));
    }
    output
}

/// Append the output lines to a sink file, creating it if needed.
///
/// The sink is shared with other steps of a CI run, so lines are
/// appended rather than the file truncated.
pub fn append_outputs(path: &Path, info: &VersionInfo) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(render_outputs(info).as_bytes())?;
    Ok(())
}

/// Render the resolved version as a JSON object.
pub fn render_json(info: &VersionInfo) -> Result<String> {
    Ok(serde_json::to_string_pretty(info)?)
}
