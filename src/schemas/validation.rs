use crate::schemas::schema::plan_details_schema;
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

const MAX_SCHEMA_ERRORS: usize = 3;

/// Describe how a decoded `detailedPlan` payload deviates from the expected
/// shape. Returns `None` when the payload conforms.
///
/// Diagnostics only: the repair parser is deliberately more tolerant than the
/// schema, so a `Some` result is logged, never used to reject a plan.
pub fn schema_violations(payload: &Value) -> Option<String> {
    let handle = plan_details_schema();
    let validator = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(handle.schema_json())
        .ok()?;

    let result = validator.validate(payload);
    let errors = match result {
        Ok(()) => return None,
        Err(errors) => errors,
    };

    let mut details = Vec::new();
    let mut truncated = false;

    for (idx, error) in errors.enumerate() {
        if idx < MAX_SCHEMA_ERRORS {
            let mut path = error.instance_path.to_string();
            if path.is_empty() {
                path = "<root>".to_string();
            }
            details.push(format!("{}: {}", path, error));
        } else {
            truncated = true;
            break;
        }
    }

    if details.is_empty() {
        return Some("payload failed schema validation".to_string());
    }

    let mut detail_str = details.join("; ");
    if truncated {
        detail_str.push_str("; additional errors truncated");
    }

    Some(detail_str)
}
