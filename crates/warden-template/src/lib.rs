//! Template mutation engine
//!
//! Parses a raw template body, walks its declared resources, and rewrites the
//! runtime of every function resource the policy flags as out of date. The
//! mutated body serializes deterministically (sorted keys, 2-space indent) so
//! backups and submitted bodies stay human-diffable.

#![deny(unsafe_code)]

use thiserror::Error;
use tracing::info;
use warden_policy::RuntimePolicy;
use warden_types::Template;

/// Errors raised while mutating a template; each is fatal for the stack being
/// processed, never for the batch.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template body is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("template declares no resources")]
    NoResources,

    /// A function resource without a runtime property violates the template
    /// contract; failing loudly here beats silently skipping it.
    #[error("function resource {0} has no Runtime property")]
    MissingRuntime(String),
}

/// Result type for template operations
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Outcome of one mutation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationResult {
    /// Serialized template, mutated or not
    pub body: String,
    /// Whether any resource was rewritten
    pub dirty: bool,
}

/// Apply the runtime policy to every function resource in `raw`.
///
/// Non-function resources and conforming function resources pass through
/// unmodified; only the runtime field of non-conforming functions changes.
pub fn mutate(raw: &str, policy: &RuntimePolicy) -> Result<MutationResult> {
    let mut template: Template = serde_json::from_str(raw)?;
    if template.resources.is_empty() {
        return Err(TemplateError::NoResources);
    }

    let mut dirty = false;
    for (logical_id, resource) in template.resources.iter_mut() {
        if !resource.is_function() {
            continue;
        }
        let runtime = resource
            .runtime()
            .ok_or_else(|| TemplateError::MissingRuntime(logical_id.clone()))?
            .to_string();
        let name = resource
            .function_name()
            .unwrap_or(logical_id.as_str())
            .to_string();

        if policy.needs_upgrade(&runtime) {
            resource.set_runtime(policy.target());
            dirty = true;
            info!(function = %name, from = %runtime, to = %policy.target(), "updating runtime");
        } else if policy.is_family(&runtime) {
            info!(function = %name, runtime = %runtime, "already up to date");
        }
        // Other language families are out of scope: no rewrite, no log line.
    }

    Ok(MutationResult {
        body: serde_json::to_string_pretty(&template)?,
        dirty,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn policy() -> RuntimePolicy {
        RuntimePolicy::new("nodejs14.x", ["nodejs16.x"])
    }

    fn two_function_template() -> String {
        json!({
            "AWSTemplateFormatVersion": "2010-09-09",
            "Resources": {
                "Worker": {
                    "Type": "AWS::Lambda::Function",
                    "Properties": { "FunctionName": "worker", "Runtime": "nodejs12.x" }
                },
                "Api": {
                    "Type": "AWS::Lambda::Function",
                    "Properties": { "FunctionName": "api", "Runtime": "nodejs16.x" }
                }
            }
        })
        .to_string()
    }

    #[test]
    fn rewrites_only_stale_functions() {
        let result = mutate(&two_function_template(), &policy()).unwrap();
        assert!(result.dirty);

        let template: Template = serde_json::from_str(&result.body).unwrap();
        assert_eq!(template.resources["Worker"].runtime(), Some("nodejs14.x"));
        assert_eq!(template.resources["Api"].runtime(), Some("nodejs16.x"));
    }

    #[test]
    fn conforming_template_is_clean() {
        let first = mutate(&two_function_template(), &policy()).unwrap();
        let second = mutate(&first.body, &policy()).unwrap();
        assert!(!second.dirty);
        assert_eq!(second.body, first.body);
    }

    #[test]
    fn non_function_resources_pass_through() {
        let raw = json!({
            "Resources": {
                "Bucket": {
                    "Type": "AWS::S3::Bucket",
                    "Properties": { "BucketName": "artifacts" }
                }
            }
        })
        .to_string();
        let result = mutate(&raw, &policy()).unwrap();
        assert!(!result.dirty);

        let template: Template = serde_json::from_str(&result.body).unwrap();
        assert_eq!(
            template.resources["Bucket"].properties["BucketName"],
            json!("artifacts")
        );
    }

    #[test]
    fn other_families_are_untouched() {
        let raw = json!({
            "Resources": {
                "Py": {
                    "Type": "AWS::Lambda::Function",
                    "Properties": { "Runtime": "python3.9" }
                }
            }
        })
        .to_string();
        let result = mutate(&raw, &policy()).unwrap();
        assert!(!result.dirty);

        let template: Template = serde_json::from_str(&result.body).unwrap();
        assert_eq!(template.resources["Py"].runtime(), Some("python3.9"));
    }

    #[test]
    fn empty_resource_map_is_an_error() {
        let raw = json!({ "Resources": {} }).to_string();
        let err = mutate(&raw, &policy()).unwrap_err();
        assert!(matches!(err, TemplateError::NoResources));

        // A template with no Resources key at all is the same failure.
        let err = mutate("{}", &policy()).unwrap_err();
        assert!(matches!(err, TemplateError::NoResources));
    }

    #[test]
    fn missing_runtime_fails_loudly() {
        let raw = json!({
            "Resources": {
                "Broken": {
                    "Type": "AWS::Lambda::Function",
                    "Properties": { "Handler": "index.handler" }
                }
            }
        })
        .to_string();
        let err = mutate(&raw, &policy()).unwrap_err();
        assert!(matches!(err, TemplateError::MissingRuntime(ref id) if id == "Broken"));
    }

    #[test]
    fn serialization_is_deterministic() {
        let a = mutate(&two_function_template(), &policy()).unwrap();
        let b = mutate(&two_function_template(), &policy()).unwrap();
        assert_eq!(a.body, b.body);
    }

    #[test]
    fn non_json_body_is_a_parse_error() {
        let err = mutate("Resources: {}", &policy()).unwrap_err();
        assert!(matches!(err, TemplateError::Parse(_)));
    }
}
