//! Structured-document flattener
//!
//! Walks a parsed `serde_json::Value` tree depth-first, pushing a path
//! segment per object member or array index, and records every scalar
//! leaf at its dotted path. TOML documents are converted to the same
//! tree shape first, so both formats flatten identically.

use serde_json::Value;

use crate::mapping::FlatMapping;
use crate::path::PathContext;

/// Flatten a parsed document tree into path -> raw string entries.
///
/// Scalar renderings are stable: booleans as `true`/`false`, numbers
/// via serde_json's display form, strings verbatim. The renderings are
/// re-parsed later according to the *target* type, not the source
/// type. `null` leaves contribute no entry, so an optional target
/// member observes them as absent. An empty object or array at the
/// root yields an empty mapping; a bare root scalar yields a single
/// entry at the empty path.
pub fn flatten_document(root: &Value) -> FlatMapping {
    let mut out = FlatMapping::new();
    let mut ctx = PathContext::new();
    visit(root, &mut ctx, &mut out);
    debug_assert_eq!(ctx.depth(), 0);
    out
}

fn visit(node: &Value, ctx: &mut PathContext, out: &mut FlatMapping) {
    match node {
        Value::Object(members) => {
            for (name, value) in members {
                ctx.push(name.as_str());
                visit(value, ctx, out);
                ctx.pop();
            }
        }
        Value::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                ctx.push(index.to_string());
                visit(value, ctx, out);
                ctx.pop();
            }
        }
        Value::Null => {}
        Value::Bool(b) => out.set(ctx.current(), b.to_string()),
        Value::Number(n) => out.set(ctx.current(), n.to_string()),
        Value::String(s) => out.set(ctx.current(), s.as_str()),
    }
}

/// Convert a TOML value into the JSON tree shape the flattener walks.
pub fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => {
            Value::Array(items.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => {
            let members: serde_json::Map<String, Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            Value::Object(members)
        }
    }
}
