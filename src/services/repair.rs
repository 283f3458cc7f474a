//! Defensive decoding of the generation backend's reply.
//!
//! The backend is asked for a bare JSON object but routinely wraps it in
//! markdown fences, double-encodes it as a string, drops required keys, or
//! answers in prose (which is also how clarifying questions arrive). Repair
//! recovers a [`RawTripPlan`] when it can and otherwise returns a tagged
//! error that keeps the original text, because that text doubles as the
//! fallback conversational reply.

use serde_json::Value;
use tracing::debug;

use crate::error::{PlannerError, Result};
use crate::schemas::schema_violations;
use crate::types::raw::RawTripPlan;

/// Extract a structured plan from raw backend text.
///
/// Never panics; every failure path returns a variant carrying `raw_text`.
pub fn repair(raw_text: &str) -> Result<RawTripPlan> {
    let trimmed = raw_text.trim();
    let unfenced = strip_code_fences(trimmed);

    let mut value: Value = match serde_json::from_str(unfenced) {
        Ok(value) => value,
        Err(err) => {
            debug!(target: "tripplanner::repair", error = %err, "backend text is not JSON");
            return Err(PlannerError::MalformedOutput {
                raw: raw_text.to_string(),
            });
        }
    };

    // Double-encoded reply: the JSON object arrived as a JSON string
    if let Value::String(inner) = value {
        value = match serde_json::from_str(&inner) {
            Ok(value) => value,
            Err(err) => {
                debug!(target: "tripplanner::repair", error = %err, "inner string is not JSON");
                return Err(PlannerError::MalformedOutput {
                    raw: raw_text.to_string(),
                });
            }
        };
    }

    if !has_required_keys(&value) {
        if let Some(details) = value.get("detailedPlan") {
            if let Some(violations) = schema_violations(details) {
                debug!(target: "tripplanner::repair", %violations, "plan shape deviates");
            }
        }
        return Err(PlannerError::SchemaMismatch {
            raw: raw_text.to_string(),
        });
    }

    if let Some(details) = value.get("detailedPlan") {
        if let Some(violations) = schema_violations(details) {
            debug!(target: "tripplanner::repair", %violations, "plan accepted with shape deviations");
        }
    }

    serde_path_to_error::deserialize::<_, RawTripPlan>(value).map_err(|err| {
        let path = err.path().to_string();
        let location = if path.is_empty() {
            "<root>".to_string()
        } else {
            path
        };
        debug!(target: "tripplanner::repair", %location, error = %err, "typed decode failed");
        PlannerError::SchemaMismatch {
            raw: raw_text.to_string(),
        }
    })
}

/// A usable reply has non-empty `content`, a non-empty `detailedPlan` object,
/// and at least one day in `detailedPlan.dailyPlan`.
fn has_required_keys(value: &Value) -> bool {
    let has_content = value
        .get("content")
        .and_then(|v| v.as_str())
        .map(|s| !s.trim().is_empty())
        .unwrap_or(false);

    let details = value.get("detailedPlan");
    let has_details = details
        .and_then(|d| d.as_object())
        .map(|obj| !obj.is_empty())
        .unwrap_or(false);

    let has_days = details
        .and_then(|d| d.get("dailyPlan"))
        .and_then(|v| v.as_array())
        .map(|days| !days.is_empty())
        .unwrap_or(false);

    has_content && has_details && has_days
}

/// Strip a leading markdown fence (with or without a language tag) and the
/// matching trailing fence.
fn strip_code_fences(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };

    let body = match rest.find('\n') {
        Some(idx) if rest[..idx].trim().chars().all(|c| c.is_ascii_alphanumeric()) => {
            &rest[idx + 1..]
        }
        _ => rest,
    };

    let body = body.trim();
    match body.strip_suffix("```") {
        Some(stripped) => stripped.trim_end(),
        None => body,
    }
}
