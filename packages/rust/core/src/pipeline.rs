//! End-to-end import analysis: export envelope → [`ImportAnalysis`].
//!
//! A single synchronous pass over the envelope: build the record index and
//! the per-scenario CSV map once, assemble every exported scenario, then
//! every related scenario when the export carries relational closure.

use std::collections::HashMap;

use chrono::Utc;
use tracing::{info, instrument};

use scenport_shared::{ExportEnvelope, IdGenerator, ImportAnalysis, Result, ScenarioCsv};

use crate::assembler::assemble_scenario;
use crate::index::RecordIndex;

/// Parameters of one import request.
#[derive(Debug, Clone)]
pub struct ImportRequest {
    /// Destination project for every imported scenario.
    pub project_id: String,
}

/// Analyze a parsed export envelope into an import-ready result.
///
/// Purely functional over its inputs apart from the injected id generator;
/// each request builds its own index and accumulators, so concurrent
/// requests share nothing but the generator.
#[instrument(skip_all, fields(project = %request.project_id, scenarios = envelope.scenarios.len()))]
pub fn analyze(
    envelope: &ExportEnvelope,
    request: &ImportRequest,
    ids: &dyn IdGenerator,
) -> Result<ImportAnalysis> {
    let index = RecordIndex::new(&envelope.steps);
    let csv_map = group_csv_by_scenario(&envelope.csv_files);

    let mut scenarios = Vec::with_capacity(envelope.scenarios.len());
    for detail in &envelope.scenarios {
        scenarios.push(assemble_scenario(
            &request.project_id,
            envelope.has_related_data,
            detail,
            &index,
            &envelope.step_blobs,
            &csv_map,
            ids,
        )?);
    }

    // Dependency scenarios exist as importable units only when the export
    // carried full relational closure.
    let mut related_scenarios = Vec::new();
    if envelope.has_related_data {
        for detail in &envelope.related_scenarios {
            related_scenarios.push(assemble_scenario(
                &request.project_id,
                true,
                detail,
                &index,
                &envelope.step_blobs,
                &csv_map,
                ids,
            )?);
        }
    }

    info!(
        scenarios = scenarios.len(),
        related_scenarios = related_scenarios.len(),
        "import analysis complete"
    );

    Ok(ImportAnalysis {
        analyzed_at: Utc::now(),
        scenarios,
        related_scenarios,
        related_api_definitions: envelope.related_api_definitions.clone(),
        related_api_test_cases: envelope.related_api_test_cases.clone(),
        csv_files: envelope.csv_files.clone(),
    })
}

/// Group CSV rows by owning scenario.
fn group_csv_by_scenario(rows: &[ScenarioCsv]) -> HashMap<String, Vec<ScenarioCsv>> {
    let mut map: HashMap<String, Vec<ScenarioCsv>> = HashMap::new();
    for row in rows {
        map.entry(row.scenario_id.clone()).or_default().push(row.clone());
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenport_shared::{ScenarioDetail, SequenceIdGenerator, StepRecord};

    fn detail(id: &str) -> ScenarioDetail {
        ScenarioDetail {
            id: id.into(),
            name: format!("scenario {id}"),
            project_id: "proj-src".into(),
            module_id: None,
            environment_id: Some("env-9".into()),
            priority: None,
            status: None,
            tags: Vec::new(),
            description: None,
            csv_ids: Vec::new(),
        }
    }

    fn record(id: &str, scenario: &str, parent: &str, sort: i64) -> StepRecord {
        StepRecord {
            id: id.into(),
            scenario_id: scenario.into(),
            parent_id: if parent.is_empty() {
                None
            } else {
                Some(parent.into())
            },
            name: id.into(),
            step_type: "API".into(),
            ref_type: None,
            sort,
            enable: true,
            resource_id: None,
            project_id: None,
            version_id: None,
        }
    }

    #[test]
    fn fixture_end_to_end() {
        let content = std::fs::read_to_string("../../../fixtures/json/export.fixture.json")
            .expect("read fixture");
        let envelope = scenport_envelope::parse_export_str(&content).expect("parse fixture");

        let ids = SequenceIdGenerator::new("new");
        let request = ImportRequest {
            project_id: "proj-dst".into(),
        };
        let analysis = analyze(&envelope, &request, &ids).unwrap();

        assert_eq!(analysis.scenarios.len(), 1);
        assert!(analysis.related_scenarios.is_empty());

        let imported = &analysis.scenarios[0];
        assert_eq!(imported.project_id, "proj-dst");
        assert_eq!(imported.environment_id, None);
        assert_eq!(imported.csv_files.len(), 1);

        // One root with two children, all under fresh ids.
        assert_eq!(imported.steps.len(), 1);
        let root = &imported.steps[0];
        assert_eq!(root.name, "Open session");
        assert_eq!(root.children.len(), 2);
        assert!(!root.id.starts_with("step-"));

        // step-2's blob rehomed under its new id.
        assert_eq!(imported.step_details.len(), 1);
        let blob_key = imported.step_details.keys().next().unwrap();
        assert_eq!(blob_key, &root.children[0].id);
        assert_ne!(blob_key, "step-2");
    }

    #[test]
    fn related_scenarios_need_relational_closure() {
        let mut envelope = ExportEnvelope {
            scenarios: vec![detail("s1")],
            related_scenarios: vec![detail("s2")],
            steps: vec![record("a", "s1", "", 1), record("b", "s2", "", 1)],
            ..Default::default()
        };
        let ids = SequenceIdGenerator::new("new");
        let request = ImportRequest {
            project_id: "proj-dst".into(),
        };

        let analysis = analyze(&envelope, &request, &ids).unwrap();
        assert!(analysis.related_scenarios.is_empty());

        envelope.has_related_data = true;
        let analysis = analyze(&envelope, &request, &ids).unwrap();
        assert_eq!(analysis.related_scenarios.len(), 1);
        assert_eq!(analysis.related_scenarios[0].id, "s2");
        assert_eq!(analysis.related_scenarios[0].steps.len(), 1);
    }

    #[test]
    fn pass_through_lists_are_carried() {
        let envelope = ExportEnvelope {
            scenarios: vec![detail("s1")],
            steps: vec![record("a", "s1", "", 1)],
            related_api_definitions: vec![serde_json::json!({"id": "api-1"})],
            related_api_test_cases: vec![serde_json::json!({"id": "case-1"})],
            ..Default::default()
        };
        let ids = SequenceIdGenerator::new("new");
        let request = ImportRequest {
            project_id: "proj-dst".into(),
        };

        let analysis = analyze(&envelope, &request, &ids).unwrap();
        assert_eq!(analysis.related_api_definitions.len(), 1);
        assert_eq!(analysis.related_api_test_cases.len(), 1);
    }

    #[test]
    fn dependency_scenario_roots_inferred_from_sort() {
        // s2's own root reference was stripped during export; both of its
        // records share the synthetic parent "ref-step".
        let envelope = ExportEnvelope {
            scenarios: vec![detail("s2")],
            steps: vec![
                record("x", "s2", "ref-step", 1),
                record("y", "s2", "ref-step", 2),
            ],
            ..Default::default()
        };
        let ids = SequenceIdGenerator::new("new");
        let request = ImportRequest {
            project_id: "proj-dst".into(),
        };

        let analysis = analyze(&envelope, &request, &ids).unwrap();
        let names: Vec<_> = analysis.scenarios[0]
            .steps
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["x", "y"]);
    }
}
