pub mod schema;
pub mod validation;

pub use schema::{plan_details_schema, SchemaHandle};
pub use validation::schema_violations;
