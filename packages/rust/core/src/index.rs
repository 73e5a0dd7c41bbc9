//! Record index: flat step records grouped by owning scenario.
//!
//! Built once per import request from the export's full flat record list.
//! Group membership and in-group order mirror the export; group iteration
//! follows first-seen scenario order so the cross-scenario fallback search
//! is deterministic.

use std::collections::HashMap;

use tracing::debug;

use scenport_shared::StepRecord;

/// Step records grouped by `scenario_id`, order-preserving.
#[derive(Debug, Default)]
pub struct RecordIndex {
    /// Scenario ids in first-seen order.
    order: Vec<String>,
    groups: HashMap<String, Vec<StepRecord>>,
}

impl RecordIndex {
    /// Group the export's flat record list by owning scenario.
    pub fn new(records: &[StepRecord]) -> Self {
        let mut index = Self::default();
        for record in records {
            if !index.groups.contains_key(&record.scenario_id) {
                index.order.push(record.scenario_id.clone());
            }
            index
                .groups
                .entry(record.scenario_id.clone())
                .or_default()
                .push(record.clone());
        }

        debug!(
            scenarios = index.order.len(),
            records = records.len(),
            "record index built"
        );
        index
    }

    /// All records owned by a scenario, in export order. Unknown scenario
    /// ids yield an empty slice.
    pub fn records_of(&self, scenario_id: &str) -> &[StepRecord] {
        self.groups
            .get(scenario_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Cross-scenario search: records declaring `parent_id`, found in any
    /// group except `excluded_scenario_id`, in index order.
    ///
    /// Kept distinct from the primary lookup: it runs only when a
    /// scenario-reference step has no children of its own and the export
    /// lacks relational closure (see the step resolver).
    pub fn children_elsewhere(
        &self,
        parent_id: &str,
        excluded_scenario_id: &str,
    ) -> Vec<&StepRecord> {
        let mut matches = Vec::new();
        for scenario_id in &self.order {
            if scenario_id == excluded_scenario_id {
                continue;
            }
            for record in &self.groups[scenario_id] {
                if record.parent_id.as_deref() == Some(parent_id) {
                    matches.push(record);
                }
            }
        }
        matches
    }

    /// Scenario ids in first-seen order.
    pub fn scenario_ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Number of scenario groups.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the index holds no records at all.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
