//! Incident event input.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use bulwark_responder::IncidentRequest;

/// Read and parse an incident event from a file, or stdin for `-`.
pub fn read_request(path: &Path) -> anyhow::Result<IncidentRequest> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read event from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read event file {}", path.display()))?
    };

    IncidentRequest::from_json(&raw).context("event is not a valid incident request")
}
