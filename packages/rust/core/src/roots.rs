//! Root selection: which records of a scenario are top-level steps.
//!
//! Exports do not always mark roots explicitly. A scenario supplied only as
//! a dependency of another scenario may have had its root reference
//! stripped, leaving every record with some parent id. Sort order is the
//! only remaining signal in that case.

use tracing::debug;

use scenport_shared::StepRecord;

/// Select the top-level step records of one scenario.
///
/// 1. Records with an empty/absent parent id, in export order.
/// 2. Failing that, the `sort == 1` record's parent id is taken as the
///    synthetic top-level marker; every record sharing it is a root.
/// 3. Failing both, the scenario contributes no steps.
pub fn select_roots(records: &[StepRecord]) -> Vec<StepRecord> {
    let explicit: Vec<StepRecord> = records
        .iter()
        .filter(|r| !r.has_parent())
        .cloned()
        .collect();
    if !explicit.is_empty() {
        return explicit;
    }

    // No explicit roots: the step most likely to be first anchors the
    // synthetic parent id shared by the true roots.
    let Some(anchor) = records.iter().find(|r| r.sort == 1) else {
        debug!("no explicit roots and no sort==1 anchor; scenario contributes no steps");
        return Vec::new();
    };

    let roots: Vec<StepRecord> = records
        .iter()
        .filter(|r| r.parent_id == anchor.parent_id)
        .cloned()
        .collect();

    debug!(
        anchor = %anchor.id,
        roots = roots.len(),
        "roots inferred from sort order"
    );
    roots
}
