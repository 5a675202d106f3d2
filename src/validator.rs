//! Typedef validation
//!
//! Walks a [`SchemaNode`] tree in lock-step with a JSON value tree. Every
//! node first overlays its own `define` block on the inherited scope, then
//! dispatches on its kind. A node whose value has the wrong shape is reported
//! once and its children are not visited; siblings are always visited.

use serde_json::Value;

use crate::diagnostics::{DiagnosticSink, ValidationFinding, ValidationReport};
use crate::schema::{SchemaKind, SchemaNode};
use crate::scope::DefinitionScope;

/// Default bound on consecutive alias dereferences at one data location
pub const DEFAULT_MAX_ALIAS_DEPTH: usize = 64;

/// Tuning knobs for a [`Validator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// How many aliases may be followed without descending into the data
    /// before the branch is abandoned with a recursion finding
    pub max_alias_depth: usize,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            max_alias_depth: DEFAULT_MAX_ALIAS_DEPTH,
        }
    }
}

/// Stateless typedef validator. One instance may be shared across runs.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    options: ValidatorOptions,
}

impl Validator {
    pub fn new(options: ValidatorOptions) -> Self {
        Self { options }
    }

    /// Validate a whole document from the root with an empty scope
    pub fn validate(&self, schema: &SchemaNode, value: &Value) -> ValidationReport {
        let mut sink = DiagnosticSink::new();
        self.validate_at(schema, value, "", &DefinitionScope::root(), &mut sink);
        sink.into_report()
    }

    /// Validate `value` at `path` with aliases from `scope` already visible
    pub fn validate_at<'a>(
        &self,
        schema: &'a SchemaNode,
        value: &Value,
        path: &str,
        scope: &DefinitionScope<'_, 'a>,
        sink: &mut DiagnosticSink,
    ) {
        self.visit(schema, value, path, scope, 0, sink);
    }

    fn visit<'a>(
        &self,
        node: &'a SchemaNode,
        value: &Value,
        path: &str,
        inherited: &DefinitionScope<'_, 'a>,
        alias_hops: usize,
        sink: &mut DiagnosticSink,
    ) {
        let scope = inherited.merge(node.definitions());

        match node.kind() {
            SchemaKind::String => {
                if !value.is_string() {
                    sink.record(ValidationFinding::expected("string", path));
                }
            }
            SchemaKind::Number => {
                if !is_integer(value) {
                    sink.record(ValidationFinding::expected("number", path));
                }
            }
            SchemaKind::Object => self.visit_object(node, value, path, &scope, sink),
            SchemaKind::List => {
                let Some(items) = value.as_array() else {
                    sink.record(ValidationFinding::expected("list", path));
                    return;
                };
                // Parsing guarantees every list node has an element schema
                if let Some(element) = node.element() {
                    for (i, item) in items.iter().enumerate() {
                        let item_path = format!("{}[{}]", path, i);
                        self.visit(element, item, &item_path, &scope, 0, sink);
                    }
                }
            }
            SchemaKind::Alias(name) => {
                let Some(target) = scope.lookup(name) else {
                    tracing::debug!(alias = %name, path, visible = ?scope.names(), "unknown alias");
                    sink.record(ValidationFinding::unknown_type(path));
                    return;
                };
                if alias_hops >= self.options.max_alias_depth {
                    tracing::debug!(alias = %name, path, "alias recursion limit reached");
                    sink.record(ValidationFinding::recursion_limit(path));
                    return;
                }
                self.visit(target, value, path, &scope, alias_hops + 1, sink);
            }
        }
    }

    fn visit_object<'a>(
        &self,
        node: &'a SchemaNode,
        value: &Value,
        path: &str,
        scope: &DefinitionScope<'_, 'a>,
        sink: &mut DiagnosticSink,
    ) {
        let Some(object) = value.as_object() else {
            sink.record(ValidationFinding::expected("object", path));
            return;
        };

        // Unknown keys are only looked for when the document has more keys
        // than the typedef declares.
        if object.len() > node.properties().len() {
            for key in object.keys() {
                if !node.properties().contains_key(key) {
                    sink.record(ValidationFinding::unexpected_field(key, path));
                }
            }
        }

        for (name, property) in node.properties() {
            match object.get(name) {
                Some(child) => {
                    let child_path = format!("{}.{}", path, name);
                    self.visit(&property.schema, child, &child_path, scope, 0, sink);
                }
                None if property.optional => {}
                None => sink.record(ValidationFinding::missing_key(name, path)),
            }
        }
    }
}

/// Integral numbers that fit an i64. serde_json reads `-0` as a float, so
/// negative zero is accepted as well.
fn is_integer(value: &Value) -> bool {
    value.as_i64().is_some()
        || value
            .as_f64()
            .is_some_and(|f| f == 0.0 && f.is_sign_negative())
}

/// Validate with default options
pub fn validate(schema: &SchemaNode, value: &Value) -> ValidationReport {
    Validator::default().validate(schema, value)
}
