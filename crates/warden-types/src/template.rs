//! Template documents and their resources
//!
//! Templates are JSON documents keyed by logical resource id. Only the shape
//! this system inspects is modeled; unknown top-level fields and resource
//! attributes are captured in flattened maps and written back unchanged.
//! `BTreeMap`-backed keys keep serialization deterministic and diffable.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Type tag marking a resource as a serverless function
pub const FUNCTION_RESOURCE_TYPE: &str = "AWS::Lambda::Function";

/// Runtime identifier prefix of the managed language family
pub const RUNTIME_FAMILY_PREFIX: &str = "nodejs";

/// A stack template: format version, resource tree, and pass-through metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(
        rename = "AWSTemplateFormatVersion",
        skip_serializing_if = "Option::is_none"
    )]
    pub format_version: Option<String>,

    /// Resources keyed by logical id
    #[serde(rename = "Resources", default)]
    pub resources: BTreeMap<String, Resource>,

    /// Top-level fields this system does not interpret (Description,
    /// Parameters, Outputs, ...), carried through verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// One declared resource: a type tag plus an arbitrary property bag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "Type")]
    pub resource_type: String,

    #[serde(rename = "Properties", default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub properties: serde_json::Map<String, Value>,

    /// Non-property attributes (DependsOn, Condition, ...), pass-through.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Resource {
    /// Whether this resource's type tag marks it as a function resource
    pub fn is_function(&self) -> bool {
        self.resource_type == FUNCTION_RESOURCE_TYPE
    }

    /// Declared runtime identifier, if present and a string
    pub fn runtime(&self) -> Option<&str> {
        self.properties.get("Runtime").and_then(Value::as_str)
    }

    /// Display name: the `FunctionName` property when declared
    pub fn function_name(&self) -> Option<&str> {
        self.properties.get("FunctionName").and_then(Value::as_str)
    }

    /// Rewrite the runtime property in place
    pub fn set_runtime(&mut self, runtime: &str) {
        self.properties
            .insert("Runtime".to_string(), Value::String(runtime.to_string()));
    }
}
