//! Event and script schema introspection for automation and authoring.

use serde::Serialize;

use crate::{Algorithm, CONTROL_STEP_TYPES, CURRENT_TRACE_VERSION, EVENT_KINDS, TRACE_FORMAT};

#[derive(Debug, Clone, Serialize)]
pub struct SchemaDoc {
    #[serde(rename = "schemaVersion")]
    pub schema_version: String,
    pub algorithms: Vec<&'static str>,
    #[serde(rename = "eventKinds")]
    pub event_kinds: Vec<&'static str>,
    #[serde(rename = "scriptStepTypes")]
    pub script_step_types: Vec<&'static str>,
    #[serde(rename = "traceFormat")]
    pub trace_format: &'static str,
    #[serde(rename = "traceVersion")]
    pub trace_version: u32,
    #[serde(rename = "minimalScript")]
    pub minimal_script: serde_json::Value,
}

pub fn schema_doc() -> SchemaDoc {
    SchemaDoc {
        schema_version: "sortreel.schema_doc.v1".to_string(),
        algorithms: Algorithm::ALL.iter().map(|a| a.as_str()).collect(),
        event_kinds: EVENT_KINDS.to_vec(),
        script_step_types: CONTROL_STEP_TYPES.to_vec(),
        trace_format: TRACE_FORMAT,
        trace_version: CURRENT_TRACE_VERSION,
        minimal_script: serde_json::json!({
            "version": 1,
            "name": "example",
            "steps": [
                { "type": "load", "values": [5, 3, 1] },
                { "type": "select_algorithm", "algorithm": "selection" },
                { "type": "run_to_end" },
                { "type": "assert_sorted" }
            ]
        }),
    }
}
