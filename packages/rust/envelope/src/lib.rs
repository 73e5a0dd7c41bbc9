//! Scenario export envelope deserialization.
//!
//! The export file is a JSON envelope carrying scenario metadata, the flat
//! step record set, the step blob side-table, CSV rows, and pass-through
//! related-resource lists. Everything downstream works on the deserialized
//! [`ExportEnvelope`]; this crate owns the one user-facing failure mode of
//! the import ("not a valid scenario export file").

use std::io::Read;
use std::path::Path;

use tracing::{debug, error, instrument};

use scenport_shared::{ExportEnvelope, Result, ScenportError};

/// Parse an export envelope from a reader.
///
/// Malformed JSON, a JSON `null` body, and an envelope carrying neither
/// scenarios nor steps all surface as the same user-facing invalid-file
/// error; the underlying cause is logged, not exposed.
#[instrument(skip_all)]
pub fn parse_export(reader: impl Read) -> Result<ExportEnvelope> {
    let envelope: Option<ExportEnvelope> = serde_json::from_reader(reader).map_err(|e| {
        error!(cause = %e, "export envelope deserialization failed");
        ScenportError::invalid_file("malformed export envelope")
    })?;

    validate(envelope)
}

/// Parse an export envelope from an in-memory string.
pub fn parse_export_str(content: &str) -> Result<ExportEnvelope> {
    let envelope: Option<ExportEnvelope> = serde_json::from_str(content).map_err(|e| {
        error!(cause = %e, "export envelope deserialization failed");
        ScenportError::invalid_file("malformed export envelope")
    })?;

    validate(envelope)
}

/// Read and parse an export file from disk.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn parse_export_file(path: &Path) -> Result<ExportEnvelope> {
    let file = std::fs::File::open(path).map_err(|e| ScenportError::io(path, e))?;
    parse_export(std::io::BufReader::new(file))
}

/// Reject null and empty envelopes; everything else imports whatever is
/// reconstructable (partial/older exports are deliberately tolerated).
fn validate(envelope: Option<ExportEnvelope>) -> Result<ExportEnvelope> {
    let envelope = envelope.ok_or_else(|| {
        error!("export envelope is null");
        ScenportError::invalid_file("empty export envelope")
    })?;

    if envelope.is_empty() {
        error!("export envelope carries no scenarios and no steps");
        return Err(ScenportError::invalid_file("empty export envelope"));
    }

    debug!(
        scenarios = envelope.scenarios.len(),
        related_scenarios = envelope.related_scenarios.len(),
        steps = envelope.steps.len(),
        blobs = envelope.step_blobs.len(),
        has_related_data = envelope.has_related_data,
        "export envelope parsed"
    );

    Ok(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_fixture() {
        let content = std::fs::read_to_string("../../../fixtures/json/export.fixture.json")
            .expect("read fixture");
        let envelope = parse_export_str(&content).unwrap();

        assert_eq!(envelope.scenarios.len(), 1);
        assert_eq!(envelope.scenarios[0].name, "Login flow");
        assert_eq!(envelope.steps.len(), 3);
        assert_eq!(
            envelope.step_blobs.get("step-2").map(String::as_str),
            Some("{\"body\":\"user=admin\"}")
        );
        assert!(!envelope.has_related_data);
    }

    #[test]
    fn parse_garbage_is_invalid_file() {
        let err = parse_export_str("not json at all").unwrap_err();
        assert!(matches!(err, ScenportError::InvalidFile { .. }));
        // The cause stays in the log, not in the user-facing message.
        assert!(!err.to_string().contains("line"));
    }

    #[test]
    fn parse_null_is_invalid_file() {
        let err = parse_export_str("null").unwrap_err();
        assert!(matches!(err, ScenportError::InvalidFile { .. }));
    }

    #[test]
    fn parse_empty_envelope_is_invalid_file() {
        let err = parse_export_str("{}").unwrap_err();
        assert!(matches!(err, ScenportError::InvalidFile { .. }));
    }

    #[test]
    fn parse_steps_without_scenarios_is_accepted() {
        // Partial exports still import whatever is reconstructable.
        let content = r#"{
            "steps": [
                {"id": "s1", "scenarioId": "scn-1", "stepType": "API", "sort": 1}
            ]
        }"#;
        let envelope = parse_export_str(content).unwrap();
        assert!(envelope.scenarios.is_empty());
        assert_eq!(envelope.steps.len(), 1);
    }

    #[test]
    fn parse_from_reader_matches_str() {
        let content = std::fs::read_to_string("../../../fixtures/json/export.fixture.json")
            .expect("read fixture");
        let envelope = parse_export(content.as_bytes()).unwrap();
        assert_eq!(envelope.csv_files.len(), 1);
    }
}
