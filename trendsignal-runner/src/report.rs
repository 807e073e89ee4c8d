//! Report emission: one JSON document to stdout and to the artifact path.
//!
//! Emission never fails from the caller's point of view. Write problems are
//! logged and surfaced through `Emission` so the binary can choose its exit code.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::error;

use crate::metrics::MetricsReport;

/// Render a report as JSON with 4-space indentation, no trailing newline.
pub fn render(report: &MetricsReport) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    report.serialize(&mut ser)?;
    Ok(buf)
}

/// What actually reached its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Emission {
    pub printed: bool,
    pub persisted: bool,
}

/// Write `report` to `stdout` (newline-terminated) and overwrite `artifact`
/// with the same bytes.
pub fn emit<W: Write>(report: &MetricsReport, artifact: &Path, stdout: &mut W) -> Emission {
    let body = match render(report) {
        Ok(body) => body,
        Err(e) => {
            error!("Report serialization failed: {e}");
            return Emission {
                printed: false,
                persisted: false,
            };
        }
    };

    let printed = match stdout
        .write_all(&body)
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        Ok(()) => true,
        Err(e) => {
            error!("Writing report to stdout failed: {e}");
            false
        }
    };

    let persisted = match std::fs::write(artifact, &body) {
        Ok(()) => true,
        Err(e) => {
            error!("Writing report to {} failed: {e}", artifact.display());
            false
        }
    };

    Emission { printed, persisted }
}
