//! Tree builder: flat sibling records into freshly-identified step trees.
//!
//! Each record becomes a [`StepNode`] under a newly generated id; blob
//! payloads keyed by the original id move to the new id. Every recursive
//! call returns its own nodes and blob additions, merged by the caller, so
//! the builder stays pure over its inputs.

use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument};

use scenport_shared::{IdGenerator, Result, ScenportError, StepNode, StepParseResult, StepRecord};

use crate::index::RecordIndex;
use crate::resolver::resolve_children;

/// Expand root records into the full step forest for one scenario.
///
/// Fails with [`ScenportError::Cycle`] if a record's parent chain loops
/// back onto a record already on the active recursion path; well-formed
/// exports never trigger this.
#[instrument(skip_all, fields(roots = roots.len()))]
pub fn build_forest(
    roots: &[StepRecord],
    index: &RecordIndex,
    blobs: &HashMap<String, String>,
    has_related_data: bool,
    ids: &dyn IdGenerator,
) -> Result<StepParseResult> {
    let mut path = HashSet::new();
    let (steps, step_details) =
        build_siblings(roots, index, blobs, has_related_data, ids, &mut path)?;

    let result = StepParseResult {
        steps,
        step_details,
    };
    debug!(
        steps = result.step_count(),
        blobs = result.step_details.len(),
        "step forest built"
    );
    Ok(result)
}

/// Convert one sibling record list, depth-first.
///
/// `path` holds the original ids of every ancestor currently being
/// expanded; revisiting one means the parent links form a cycle.
fn build_siblings(
    siblings: &[StepRecord],
    index: &RecordIndex,
    blobs: &HashMap<String, String>,
    has_related_data: bool,
    ids: &dyn IdGenerator,
    path: &mut HashSet<String>,
) -> Result<(Vec<StepNode>, HashMap<String, Vec<u8>>)> {
    let mut nodes = Vec::with_capacity(siblings.len());
    let mut details = HashMap::new();

    for record in siblings {
        if !path.insert(record.id.clone()) {
            return Err(ScenportError::cycle(&record.id));
        }

        let mut node = StepNode::from_record(record, ids.next_id());

        // Rehome the blob payload onto the new id.
        if let Some(blob) = blobs.get(&record.id) {
            details.insert(node.id.clone(), blob.clone().into_bytes());
        }

        let children = resolve_children(
            index,
            &record.id,
            &record.step_type,
            &record.scenario_id,
            has_related_data,
        );
        let (child_nodes, child_details) =
            build_siblings(&children, index, blobs, has_related_data, ids, path)?;
        node.children = child_nodes;
        details.extend(child_details);

        path.remove(&record.id);
        nodes.push(node);
    }

    Ok((nodes, details))
}
