//! Step resolution: direct children of a parent step.
//!
//! The primary lookup searches the parent's own scenario group. When a
//! scenario-reference step has no children there and the export lacks
//! relational closure, the referenced scenario's steps may have been
//! exported flattened into some other scenario's group; only then does a
//! cross-scenario search run.

use tracing::debug;

use scenport_shared::{SCENARIO_REF_STEP_TYPE, StepRecord};

use crate::index::RecordIndex;

/// Ordered direct children of `parent_id`.
///
/// Searches `scenario_id`'s own records first. Falls back to the
/// cross-scenario search only if the direct result is empty, the parent is
/// a scenario-reference step, and `has_related_data` is false. With
/// `has_related_data` set, absence of children is final: the export is
/// expected to be relationally complete.
pub fn resolve_children(
    index: &RecordIndex,
    parent_id: &str,
    parent_step_type: &str,
    scenario_id: &str,
    has_related_data: bool,
) -> Vec<StepRecord> {
    let direct: Vec<StepRecord> = index
        .records_of(scenario_id)
        .iter()
        .filter(|r| r.parent_id.as_deref() == Some(parent_id))
        .cloned()
        .collect();

    if !direct.is_empty() {
        return direct;
    }

    let is_scenario_ref = parent_step_type.eq_ignore_ascii_case(SCENARIO_REF_STEP_TYPE);
    if !is_scenario_ref || has_related_data {
        return direct;
    }

    // A referenced scenario whose steps were exported without clear
    // ownership: recover them from the other scenario groups.
    let recovered: Vec<StepRecord> = index
        .children_elsewhere(parent_id, scenario_id)
        .into_iter()
        .cloned()
        .collect();

    if !recovered.is_empty() {
        debug!(
            parent = parent_id,
            recovered = recovered.len(),
            "children recovered by cross-scenario search"
        );
    }
    recovered
}
