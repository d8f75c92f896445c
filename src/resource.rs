//! Generic JSON-to-object mapping and resource addressing.
//!
//! Every JIRA response is JSON whose shape is owned by the server. The
//! [`Resource`] wrapper makes such a value navigable without a schema:
//! nested field lookup by key or dotted path, ordered array access, and
//! typed scalar accessors. Wrapping is loss-free; re-serializing a
//! `Resource` reproduces the JSON it was built from.
//!
//! Addressable REST resources are located by path templates of the form
//! `issue/{0}/comment/{1}`, filled in from positional ids by
//! [`expand_path`].

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// A mapped JSON value exposing its fields through lookup methods.
///
/// Objects answer [`get`](Resource::get) and dotted-path
/// [`field`](Resource::field) lookups, arrays preserve element order and
/// count through [`items`](Resource::items), scalars pass through the
/// typed accessors unchanged. Unknown and extra fields are never dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Resource {
    raw: Value,
}

impl Resource {
    /// Wrap a JSON value.
    pub fn wrap(value: Value) -> Self {
        Self { raw: value }
    }

    /// The underlying JSON value.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Unwrap back into the underlying JSON value.
    pub fn into_inner(self) -> Value {
        self.raw
    }

    /// Look up a direct field of an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.raw.get(key)
    }

    /// Look up a nested field by dotted path.
    ///
    /// Path segments name object keys; numeric segments index into arrays.
    /// `issue.field("fields.project.key")` resolves the same JSON node as
    /// `issue["fields"]["project"]["key"]` would.
    pub fn field(&self, path: &str) -> Option<&Value> {
        let mut current = &self.raw;
        for segment in path.split('.') {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// A nested field as an owned sub-resource.
    pub fn sub(&self, path: &str) -> Option<Resource> {
        self.field(path).cloned().map(Resource::wrap)
    }

    /// A nested string field.
    pub fn str_field(&self, path: &str) -> Option<&str> {
        self.field(path).and_then(Value::as_str)
    }

    /// A nested unsigned integer field.
    pub fn u64_field(&self, path: &str) -> Option<u64> {
        self.field(path).and_then(Value::as_u64)
    }

    /// A nested signed integer field.
    pub fn i64_field(&self, path: &str) -> Option<i64> {
        self.field(path).and_then(Value::as_i64)
    }

    /// A nested floating point field.
    pub fn f64_field(&self, path: &str) -> Option<f64> {
        self.field(path).and_then(Value::as_f64)
    }

    /// A nested boolean field.
    pub fn bool_field(&self, path: &str) -> Option<bool> {
        self.field(path).and_then(Value::as_bool)
    }

    /// The elements of an array resource, wrapped, in server order.
    ///
    /// Returns `None` when the wrapped value is not an array.
    pub fn items(&self) -> Option<Vec<Resource>> {
        self.raw
            .as_array()
            .map(|items| items.iter().cloned().map(Resource::wrap).collect())
    }

    /// The keys of an object resource, in server order.
    pub fn keys(&self) -> Option<Vec<&str>> {
        self.raw
            .as_object()
            .map(|map| map.keys().map(String::as_str).collect())
    }

    /// The resource's own URL on the server, from its `self` link.
    pub fn self_url(&self) -> Option<&str> {
        self.get("self").and_then(Value::as_str)
    }

    /// Whether the wrapped value is a JSON object.
    pub fn is_object(&self) -> bool {
        self.raw.is_object()
    }

    /// Whether the wrapped value is a JSON array.
    pub fn is_array(&self) -> bool {
        self.raw.is_array()
    }
}

impl From<Value> for Resource {
    fn from(value: Value) -> Self {
        Resource::wrap(value)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Fill the positional placeholders of a resource path template.
///
/// Templates address any RESTful resource on the server: `issue/{0}`,
/// `issue/{0}/comment/{1}`, `project/{0}/role/{1}`. Placeholders are
/// replaced left to right from `ids`.
///
/// # Errors
///
/// Returns a configuration error when the template references an id that
/// was not supplied.
pub fn expand_path(template: &str, ids: &[&str]) -> Result<String> {
    let mut expanded = template.to_string();
    for (index, id) in ids.iter().enumerate() {
        expanded = expanded.replace(&format!("{{{}}}", index), id);
    }

    if expanded.contains('{') {
        return Err(Error::Config(format!(
            "path template '{}' has unfilled placeholders (got {} ids)",
            template,
            ids.len()
        )));
    }

    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wrap_round_trips_objects() {
        let value = json!({
            "key": "JRA-9",
            "fields": {
                "summary": "Test",
                "labels": ["a", "b"],
                "customfield_10000": null,
                "votes": {"votes": 3, "hasVoted": false}
            }
        });

        let resource = Resource::wrap(value.clone());
        let reserialized = serde_json::to_value(&resource).unwrap();
        assert_eq!(reserialized, value);
    }

    #[test]
    fn test_wrap_round_trips_through_text() {
        let value = json!({"a": [1, 2, {"b": "c"}], "d": {"e": true}});
        let resource = Resource::wrap(value.clone());

        let text = serde_json::to_string(&resource).unwrap();
        let back: Resource = serde_json::from_str(&text).unwrap();
        assert_eq!(back.raw(), &value);
    }

    #[test]
    fn test_arrays_preserve_order_and_count() {
        let value = json!(["z", "a", "m", "a"]);
        let resource = Resource::wrap(value);

        let items = resource.items().unwrap();
        assert_eq!(items.len(), 4);
        let collected: Vec<&str> =
            items.iter().map(|r| r.raw().as_str().unwrap()).collect();
        assert_eq!(collected, vec!["z", "a", "m", "a"]);
    }

    #[test]
    fn test_get_direct_field() {
        let resource = Resource::wrap(json!({"key": "JRA-9"}));
        assert_eq!(resource.get("key").and_then(Value::as_str), Some("JRA-9"));
        assert!(resource.get("missing").is_none());
    }

    #[test]
    fn test_field_dotted_path() {
        let resource = Resource::wrap(json!({
            "key": "JRA-9",
            "fields": {"project": {"key": "JRA"}}
        }));

        assert_eq!(resource.str_field("fields.project.key"), Some("JRA"));
        assert_eq!(resource.str_field("key"), Some("JRA-9"));
        assert!(resource.field("fields.project.missing").is_none());
        assert!(resource.field("fields.key.too.deep").is_none());
    }

    #[test]
    fn test_field_indexes_arrays() {
        let resource = Resource::wrap(json!({
            "issues": [
                {"key": "JRA-1"},
                {"key": "JRA-2"}
            ]
        }));

        assert_eq!(resource.str_field("issues.0.key"), Some("JRA-1"));
        assert_eq!(resource.str_field("issues.1.key"), Some("JRA-2"));
        assert!(resource.field("issues.2.key").is_none());
        assert!(resource.field("issues.notanumber").is_none());
    }

    #[test]
    fn test_scalar_accessors() {
        let resource = Resource::wrap(json!({
            "votes": 3,
            "ratio": 0.5,
            "active": true,
            "offset": -2
        }));

        assert_eq!(resource.u64_field("votes"), Some(3));
        assert_eq!(resource.f64_field("ratio"), Some(0.5));
        assert_eq!(resource.bool_field("active"), Some(true));
        assert_eq!(resource.i64_field("offset"), Some(-2));
        assert!(resource.str_field("votes").is_none());
    }

    #[test]
    fn test_sub_resource() {
        let resource = Resource::wrap(json!({
            "fields": {"status": {"name": "Open"}}
        }));

        let status = resource.sub("fields.status").unwrap();
        assert_eq!(status.str_field("name"), Some("Open"));
    }

    #[test]
    fn test_self_url() {
        let resource = Resource::wrap(json!({
            "self": "https://jira.example.com/rest/api/2/issue/10001",
            "key": "JRA-9"
        }));
        assert_eq!(
            resource.self_url(),
            Some("https://jira.example.com/rest/api/2/issue/10001")
        );

        let without = Resource::wrap(json!({"key": "JRA-9"}));
        assert!(without.self_url().is_none());
    }

    #[test]
    fn test_keys_in_server_order() {
        let resource = Resource::wrap(json!({"zebra": 1, "alpha": 2}));
        assert_eq!(resource.keys().unwrap(), vec!["zebra", "alpha"]);
    }

    #[test]
    fn test_unknown_fields_survive() {
        let value = json!({
            "key": "JRA-9",
            "fieldAddedInFutureJira": {"nested": [1, 2, 3]}
        });
        let resource = Resource::wrap(value.clone());
        assert_eq!(serde_json::to_value(&resource).unwrap(), value);
        assert_eq!(resource.u64_field("fieldAddedInFutureJira.nested.2"), Some(3));
    }

    #[test]
    fn test_expand_path() {
        assert_eq!(expand_path("issue/{0}", &["JRA-9"]).unwrap(), "issue/JRA-9");
        assert_eq!(
            expand_path("issue/{0}/comment/{1}", &["JRA-9", "10001"]).unwrap(),
            "issue/JRA-9/comment/10001"
        );
    }

    #[test]
    fn test_expand_path_without_placeholders() {
        assert_eq!(expand_path("serverInfo", &[]).unwrap(), "serverInfo");
    }

    #[test]
    fn test_expand_path_missing_id() {
        let result = expand_path("issue/{0}/comment/{1}", &["JRA-9"]);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_display_is_json() {
        let resource = Resource::wrap(json!({"key": "JRA-9"}));
        assert_eq!(resource.to_string(), r#"{"key":"JRA-9"}"#);
    }
}
