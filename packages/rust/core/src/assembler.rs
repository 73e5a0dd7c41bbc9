//! Scenario assembler: one exported scenario into an import-ready detail.
//!
//! Orchestrates root selection and tree building for a single scenario,
//! rehomes its metadata to the destination project, and attaches its CSV
//! dataset rows.

use std::collections::HashMap;

use tracing::{debug, instrument};

use scenport_shared::{IdGenerator, ImportDetail, Result, ScenarioCsv, ScenarioDetail};

use crate::builder::build_forest;
use crate::index::RecordIndex;
use crate::roots::select_roots;

/// Assemble one scenario's import detail.
///
/// The destination project id replaces the source one; the source
/// environment binding and CSV config bindings never survive the import. A
/// scenario with no discoverable roots still assembles, with empty steps.
#[instrument(skip_all, fields(scenario = %detail.id, name = %detail.name))]
pub fn assemble_scenario(
    project_id: &str,
    has_related_data: bool,
    detail: &ScenarioDetail,
    index: &RecordIndex,
    blobs: &HashMap<String, String>,
    csv_map: &HashMap<String, Vec<ScenarioCsv>>,
    ids: &dyn IdGenerator,
) -> Result<ImportDetail> {
    let roots = select_roots(index.records_of(&detail.id));
    if roots.is_empty() {
        debug!("scenario has no discoverable root steps");
    }

    let parsed = build_forest(&roots, index, blobs, has_related_data, ids)?;

    debug!(
        steps = parsed.step_count(),
        blobs = parsed.step_details.len(),
        "scenario assembled"
    );

    Ok(ImportDetail {
        id: detail.id.clone(),
        name: detail.name.clone(),
        project_id: project_id.to_string(),
        module_id: detail.module_id.clone(),
        environment_id: None,
        priority: detail.priority.clone(),
        status: detail.status.clone(),
        tags: detail.tags.clone(),
        description: detail.description.clone(),
        steps: parsed.steps,
        step_details: parsed.step_details,
        csv_files: csv_map.get(&detail.id).cloned().unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenport_shared::{SequenceIdGenerator, StepRecord};

    fn detail(id: &str) -> ScenarioDetail {
        ScenarioDetail {
            id: id.into(),
            name: format!("scenario {id}"),
            project_id: "proj-src".into(),
            module_id: Some("mod-1".into()),
            environment_id: Some("env-9".into()),
            priority: Some("P1".into()),
            status: None,
            tags: vec!["smoke".into()],
            description: None,
            csv_ids: vec!["csv-1".into()],
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

    fn csv(id: &str, scenario: &str) -> ScenarioCsv {
        ScenarioCsv {
            id: id.into(),
            scenario_id: scenario.into(),
            file_id: "file-1".into(),
            name: "data.csv".into(),
            scope: None,
            enable: true,
        }
    }

    #[test]
    fn metadata_is_rehomed_to_destination_project() {
        let index = RecordIndex::new(&[record("a", "s1", "", 1)]);
        let csv_map = HashMap::from([("s1".to_string(), vec![csv("c1", "s1")])]);
        let ids = SequenceIdGenerator::new("new");

        let imported = assemble_scenario(
            "proj-dst",
            false,
            &detail("s1"),
            &index,
            &HashMap::new(),
            &csv_map,
            &ids,
        )
        .unwrap();

        assert_eq!(imported.project_id, "proj-dst");
        assert_eq!(imported.environment_id, None);
        assert_eq!(imported.name, "scenario s1");
        assert_eq!(imported.priority.as_deref(), Some("P1"));
        assert_eq!(imported.steps.len(), 1);
        assert_eq!(imported.csv_files.len(), 1);
    }

    #[test]
    fn scenario_without_steps_assembles_empty() {
        let index = RecordIndex::new(&[]);
        let ids = SequenceIdGenerator::new("new");

        let imported = assemble_scenario(
            "proj-dst",
            false,
            &detail("s1"),
            &index,
            &HashMap::new(),
            &HashMap::new(),
            &ids,
        )
        .unwrap();

        assert!(imported.steps.is_empty());
        assert!(imported.step_details.is_empty());
        assert!(imported.csv_files.is_empty());
    }

    #[test]
    fn csv_rows_default_to_empty_for_unknown_scenario() {
        let index = RecordIndex::new(&[record("a", "s1", "", 1)]);
        let csv_map = HashMap::from([("other".to_string(), vec![csv("c1", "other")])]);
        let ids = SequenceIdGenerator::new("new");

        let imported = assemble_scenario(
            "proj-dst",
            false,
            &detail("s1"),
            &index,
            &HashMap::new(),
            &csv_map,
            &ids,
        )
        .unwrap();

        assert!(imported.csv_files.is_empty());
    }
}
