// src/llm/schema.rs
// JSON schema handed to the model as the required response format

use schemars::JsonSchema;
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSchema {
    pub name: String,
    pub schema: Value,
}

impl ResponseSchema {
    /// Derive the schema for `T` from its `JsonSchema` impl
    pub fn for_type<T: JsonSchema>(name: impl Into<String>) -> Self {
        let mut schema = serde_json::to_value(schemars::schema_for!(T))
            .unwrap_or_else(|_| json!({"type": "object", "properties": {}}));
        // Providers reject or ignore the meta-schema key
        if let Some(obj) = schema.as_object_mut() {
            obj.remove("$schema");
        }

        Self {
            name: name.into(),
            schema,
        }
    }

    /// `response_format` payload for the chat completions API
    pub fn response_format(&self) -> Value {
        json!({
            "type": "json_schema",
            "json_schema": {
                "name": self.name,
                "schema": self.schema,
            }
        })
    }
}
