use crate::types::raw::RawPlanDetails;
use schemars::schema_for;
use serde_json::Value;
use std::sync::{Arc, OnceLock};

/// Cached JSON schema handle for a response shape.
#[derive(Clone, Debug)]
pub struct SchemaHandle {
    schema_name: &'static str,
    schema_json: Arc<Value>,
}

impl SchemaHandle {
    pub fn schema_name(&self) -> &'static str {
        self.schema_name
    }

    pub fn schema_json(&self) -> &Value {
        self.schema_json.as_ref()
    }

    pub fn schema_json_arc(&self) -> Arc<Value> {
        Arc::clone(&self.schema_json)
    }
}

/// Schema for the `detailedPlan` body of a backend reply, generated once from
/// the untrusted decode type.
pub fn plan_details_schema() -> &'static SchemaHandle {
    static HANDLE: OnceLock<SchemaHandle> = OnceLock::new();
    HANDLE.get_or_init(|| {
        let root = schema_for!(RawPlanDetails);
        let schema_json = serde_json::to_value(root)
            .unwrap_or_else(|err| panic!("failed to serialize RawPlanDetails schema: {}", err));
        SchemaHandle {
            schema_name: "RawPlanDetails",
            schema_json: Arc::new(schema_json),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_is_cached_and_named() {
        let first = plan_details_schema();
        let second = plan_details_schema();
        assert_eq!(first.schema_name(), "RawPlanDetails");
        assert!(Arc::ptr_eq(&first.schema_json_arc(), &second.schema_json_arc()));
    }

    #[test]
    fn test_schema_describes_daily_plan() {
        let schema = plan_details_schema().schema_json();
        let properties = schema.get("properties").expect("object schema");
        assert!(properties.get("dailyPlan").is_some());
        assert!(properties.get("destination").is_some());
    }
}
