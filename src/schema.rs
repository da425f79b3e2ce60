//! Response-schema generation for structured provider calls.
//!
//! The provider constrains structured responses with an OpenAPI-style schema
//! (`generationConfig.responseSchema`). Rather than hand-maintaining those
//! schemas next to the artifact types, they are derived from the types'
//! `JsonSchema` impls and pruned down to the subset of keywords the provider
//! accepts: `type`, `properties`, `required`, `items`, `enum`, `description`.
//! `$ref` definitions are inlined, and `type` values are uppercased to the
//! provider's `Type` enum spelling (`OBJECT`, `ARRAY`, `STRING`, ...).

use schemars::{schema_for, JsonSchema};
use serde_json::Value;

/// Keywords the provider rejects or ignores; stripped during pruning.
const DROPPED_KEYS: &[&str] = &[
    "$schema",
    "$ref",
    "title",
    "format",
    "additionalProperties",
    "definitions",
    "examples",
];

/// Derive the provider response schema for `T`.
pub fn response_schema_for<T: JsonSchema>() -> Value {
    let root = schema_for!(T);
    let definitions = serde_json::to_value(&root.definitions).unwrap_or(Value::Null);
    let mut schema = serde_json::to_value(&root.schema).unwrap_or(Value::Null);
    inline_refs(&mut schema, &definitions);
    prune(&mut schema);
    schema
}

/// Replace `{"$ref": "#/definitions/X"}` nodes with the referenced schema.
///
/// Artifact types are plain trees (no recursive types), so inlining always
/// terminates.
fn inline_refs(value: &mut Value, definitions: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(reference)) = map.get("$ref") {
                if let Some(name) = reference.strip_prefix("#/definitions/") {
                    if let Some(definition) = definitions.get(name) {
                        let mut resolved = definition.clone();
                        inline_refs(&mut resolved, definitions);
                        *value = resolved;
                        return;
                    }
                }
            }
            for child in map.values_mut() {
                inline_refs(child, definitions);
            }
        }
        Value::Array(items) => {
            for item in items {
                inline_refs(item, definitions);
            }
        }
        _ => {}
    }
}

/// Strip unsupported keywords and uppercase `type` values.
fn prune(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in DROPPED_KEYS {
                map.remove(*key);
            }
            if let Some(Value::String(ty)) = map.get_mut("type") {
                *ty = ty.to_uppercase();
            }
            for child in map.values_mut() {
                prune(child);
            }
        }
        Value::Array(items) => {
            for item in items {
                prune(item);
            }
        }
        _ => {}
    }
}
