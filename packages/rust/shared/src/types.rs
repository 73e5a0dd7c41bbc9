//! Core domain types for scenario import analysis.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Step type marking a reference to another scenario (matched case-insensitively).
pub const SCENARIO_REF_STEP_TYPE: &str = "API_SCENARIO";

// ---------------------------------------------------------------------------
// StepRecord
// ---------------------------------------------------------------------------

/// One step as it appears in the flat export record set, pre-import.
///
/// `id` is only meaningful within the export; every imported step receives a
/// freshly generated identifier (see [`StepNode`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRecord {
    /// Original step identifier, unique within the export.
    pub id: String,
    /// Owning scenario.
    pub scenario_id: String,
    /// Reference to another step's id. May be absent, empty, or point to a
    /// record outside this scenario's own record set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Step kind (e.g. a plain request vs. a nested scenario reference).
    pub step_type: String,
    /// Reference kind (COPY / REF / PARTIAL_REF in the source system).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_type: Option<String>,
    /// Ordering key within a sibling group. Value 1 marks the step most
    /// likely to be first, used by root inference.
    #[serde(default)]
    pub sort: i64,
    /// Whether the step is enabled for execution.
    #[serde(default = "default_true")]
    pub enable: bool,
    /// Resource the step executes against (API, case, scenario id).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    /// Project the step originated from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Version of the referenced resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
}

impl StepRecord {
    /// Whether this record declares a parent (absent and empty both mean no).
    pub fn has_parent(&self) -> bool {
        self.parent_id.as_deref().is_some_and(|p| !p.is_empty())
    }

    /// Whether this step delegates to another scenario's steps.
    pub fn is_scenario_ref(&self) -> bool {
        self.step_type.eq_ignore_ascii_case(SCENARIO_REF_STEP_TYPE)
    }
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// StepNode
// ---------------------------------------------------------------------------

/// One reconstructed step in the import tree.
///
/// Carries every [`StepRecord`] field verbatim except `id`, which is freshly
/// generated so the import cannot collide with pre-existing data in the
/// destination store. Children are owned exclusively (a tree, not a graph).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepNode {
    /// Freshly generated identifier.
    pub id: String,
    pub scenario_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub name: String,
    pub step_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_type: Option<String>,
    #[serde(default)]
    pub sort: i64,
    #[serde(default = "default_true")]
    pub enable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
    /// Direct children, in discovery order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<StepNode>,
}

impl StepNode {
    /// Copy a record's fields onto a new node under a fresh identifier.
    pub fn from_record(record: &StepRecord, new_id: String) -> Self {
        Self {
            id: new_id,
            scenario_id: record.scenario_id.clone(),
            parent_id: record.parent_id.clone(),
            name: record.name.clone(),
            step_type: record.step_type.clone(),
            ref_type: record.ref_type.clone(),
            sort: record.sort,
            enable: record.enable,
            resource_id: record.resource_id.clone(),
            project_id: record.project_id.clone(),
            version_id: record.version_id.clone(),
            children: Vec::new(),
        }
    }

    /// Total number of nodes in this subtree, including self.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(StepNode::subtree_len).sum::<usize>()
    }
}

// ---------------------------------------------------------------------------
// StepParseResult
// ---------------------------------------------------------------------------

/// Reconstructed step forest for one scenario: ordered roots plus the blob
/// side-table rehomed onto the freshly generated identifiers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepParseResult {
    /// Root-level steps, in discovery order.
    pub steps: Vec<StepNode>,
    /// New step id → out-of-line config payload.
    pub step_details: HashMap<String, Vec<u8>>,
}

impl StepParseResult {
    /// Total number of reconstructed steps across all roots.
    pub fn step_count(&self) -> usize {
        self.steps.iter().map(StepNode::subtree_len).sum()
    }
}

// ---------------------------------------------------------------------------
// ScenarioDetail / ImportDetail
// ---------------------------------------------------------------------------

/// One scenario's metadata as exported.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioDetail {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_id: Option<String>,
    /// Source environment binding. Never survives an import.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// CSV dataset bindings in the scenario config. Cleared on import; the
    /// persistence layer re-binds datasets from [`ScenarioCsv`] rows.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub csv_ids: Vec<String>,
}

/// One scenario prepared for import: metadata rehomed to the destination
/// project plus the reconstructed step forest and its blob side-table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDetail {
    pub id: String,
    pub name: String,
    /// Destination project (substituted during analysis).
    pub project_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_id: Option<String>,
    /// Always `None` after analysis; imported scenarios never retain the
    /// source environment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Reconstructed root steps.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<StepNode>,
    /// New step id → blob payload.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub step_details: HashMap<String, Vec<u8>>,
    /// Associated CSV dataset rows (pass-through, keyed by scenario id).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub csv_files: Vec<ScenarioCsv>,
}

// ---------------------------------------------------------------------------
// ScenarioCsv
// ---------------------------------------------------------------------------

/// One CSV dataset row associated with a scenario (opaque pass-through).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioCsv {
    pub id: String,
    pub scenario_id: String,
    #[serde(default)]
    pub file_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default = "default_true")]
    pub enable: bool,
}

// ---------------------------------------------------------------------------
// ExportEnvelope
// ---------------------------------------------------------------------------

/// The deserialized scenario export file.
///
/// `has_related_data` indicates whether the export includes full relational
/// closure for referenced scenarios; without it, a referenced scenario's
/// steps may have been flattened into another scenario's record group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEnvelope {
    /// Scenarios explicitly selected for export.
    #[serde(default)]
    pub scenarios: Vec<ScenarioDetail>,
    /// Scenarios pulled in transitively as dependencies.
    #[serde(default)]
    pub related_scenarios: Vec<ScenarioDetail>,
    /// Flat step records across all scenarios in the export.
    #[serde(default)]
    pub steps: Vec<StepRecord>,
    /// Original step id → out-of-line config body.
    #[serde(default)]
    pub step_blobs: HashMap<String, String>,
    /// CSV dataset rows across all scenarios.
    #[serde(default)]
    pub csv_files: Vec<ScenarioCsv>,
    /// Related API definitions (opaque; merged downstream, not here).
    #[serde(default)]
    pub related_api_definitions: Vec<serde_json::Value>,
    /// Related API test cases (opaque; merged downstream, not here).
    #[serde(default)]
    pub related_api_test_cases: Vec<serde_json::Value>,
    /// Whether the export carries full relational closure.
    #[serde(default)]
    pub has_related_data: bool,
}

impl ExportEnvelope {
    /// An envelope with neither scenarios nor steps has nothing to import.
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty() && self.related_scenarios.is_empty() && self.steps.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ImportAnalysis
// ---------------------------------------------------------------------------

/// Output of a full import analysis, handed to the persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportAnalysis {
    /// When the analysis ran.
    pub analyzed_at: DateTime<Utc>,
    /// Scenarios to import.
    pub scenarios: Vec<ImportDetail>,
    /// Dependency scenarios (populated only when the export had full
    /// relational closure).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_scenarios: Vec<ImportDetail>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_api_definitions: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_api_test_cases: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub csv_files: Vec<ScenarioCsv>,
}
