//! Rendering of attribute values into template parameters.
//!
//! Plain parameters follow the template language's truthiness rule: absent,
//! `null`, `false`, `0` and `""` all render as an empty value. Structured
//! attributes (`params`, `pageparams`, `columns`, `validate`, `alert`) are
//! validated here and reported as malformed when their shape is wrong.

use crate::error::{CompileError, CompileResult};
use protypo_tree::ProtypoNode;
use serde_json::{Map, Value};

/// Key renames applied inside `.Validate(...)`
const VALIDATION_RENAMES: &[(&str, &str)] = &[("minlength", "minLength"), ("maxlength", "maxLength")];

/// Alert keys in emission order
const ALERT_FIELDS: &[(&str, &str)] = &[
    ("text", "Text"),
    ("confirmbutton", "ConfirmButton"),
    ("cancelbutton", "CancelButton"),
    ("icon", "Icon"),
];

pub(crate) fn malformed(node: &ProtypoNode, attribute: &str, reason: impl Into<String>) -> CompileError {
    CompileError::MalformedAttribute {
        tag: node.tag.clone(),
        node_id: node.id().unwrap_or("<no id>").to_string(),
        attribute: attribute.to_string(),
        reason: reason.into(),
    }
}

pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Attribute value if present and truthy
pub(crate) fn truthy_attr<'a>(node: &'a ProtypoNode, key: &str) -> Option<&'a Value> {
    node.attr(key).filter(|value| is_truthy(value))
}

/// Scalar as parameter text; `None` for objects and arrays
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Array(_) | Value::Object(_) => None,
        value if !is_truthy(value) => Some(String::new()),
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Literal text of a value used inside a structured attribute (no truthiness)
fn literal_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(_) | Value::Bool(_) | Value::Null => Some(value.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn expect_object<'a>(node: &ProtypoNode, attribute: &str, value: &'a Value) -> CompileResult<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| malformed(node, attribute, "expected an object"))
}

/// Value of a declared plain parameter, empty when missing or falsy
pub(crate) fn param_value(node: &ProtypoNode, key: &str) -> CompileResult<String> {
    match node.attr(key) {
        None => Ok(String::new()),
        Some(value) => scalar_text(value)
            .ok_or_else(|| malformed(node, key, "expected a plain value, found an object or array")),
    }
}

/// `Name: value` for every declared attribute, in declaration order
pub(crate) fn declared_params(node: &ProtypoNode, declared: &[(&str, &str)]) -> CompileResult<Vec<String>> {
    declared
        .iter()
        .map(|(key, name)| Ok(format!("{}: {}", name, param_value(node, key)?)))
        .collect()
}

/// `.Style(...)` when the node carries a style
pub(crate) fn style_suffix(node: &ProtypoNode) -> CompileResult<String> {
    match truthy_attr(node, "style") {
        None => Ok(String::new()),
        Some(value) => {
            let style = value
                .as_str()
                .ok_or_else(|| malformed(node, "style", "expected a style string"))?;
            Ok(format!(".Style({})", style))
        }
    }
}

/// `Name: "key=text,..."` built from an object of `{ text }` entries
pub(crate) fn params_string(node: &ProtypoNode, attribute: &str, name: &str) -> CompileResult<Option<String>> {
    let Some(value) = truthy_attr(node, attribute) else {
        return Ok(None);
    };
    let entries = expect_object(node, attribute, value)?;

    let parts: Vec<String> = entries
        .iter()
        .map(|(key, entry)| {
            let text = entry
                .get("text")
                .and_then(scalar_text)
                .unwrap_or_default();
            format!("{}={}", key, text)
        })
        .collect();

    Ok(Some(format!("{}: \"{}\"", name, parts.join(","))))
}

/// `Columns: "Name=Title,..."` from an array of `{ Name, Title }`
pub(crate) fn columns_string(node: &ProtypoNode) -> CompileResult<Option<String>> {
    let Some(value) = truthy_attr(node, "columns") else {
        return Ok(None);
    };
    let columns = value
        .as_array()
        .ok_or_else(|| malformed(node, "columns", "expected an array of { Name, Title }"))?;

    let mut parts = Vec::with_capacity(columns.len());
    for column in columns {
        let field = |key: &str| column.get(key).filter(|v| !v.is_null()).and_then(literal_text);
        match (field("Name"), field("Title")) {
            (Some(name), Some(title)) => parts.push(format!("{}={}", name, title)),
            _ => {
                return Err(malformed(
                    node,
                    "columns",
                    "every column needs a plain Name and Title",
                ))
            }
        }
    }

    Ok(Some(format!("Columns: \"{}\"", parts.join(","))))
}

/// `.Validate(key: value,...)`, empty when there is nothing to validate
pub(crate) fn validation_suffix(node: &ProtypoNode) -> CompileResult<String> {
    let Some(value) = truthy_attr(node, "validate") else {
        return Ok(String::new());
    };
    let rules = expect_object(node, "validate", value)?;

    let mut parts = Vec::with_capacity(rules.len());
    for (key, rule) in rules {
        let name = VALIDATION_RENAMES
            .iter()
            .find(|(from, _)| *from == key.as_str())
            .map(|(_, to)| *to)
            .unwrap_or(key.as_str());
        let rule = literal_text(rule)
            .ok_or_else(|| malformed(node, "validate", format!("rule '{}' must be a plain value", key)))?;
        parts.push(format!("{}: {}", name, rule));
    }

    if parts.is_empty() {
        Ok(String::new())
    } else {
        Ok(format!(".Validate({})", parts.join(",")))
    }
}

/// `.Alert(...)` built from the alert fields that are present
pub(crate) fn alert_suffix(node: &ProtypoNode) -> CompileResult<String> {
    let Some(value) = truthy_attr(node, "alert") else {
        return Ok(String::new());
    };
    let alert = expect_object(node, "alert", value)?;

    let mut parts = Vec::new();
    for (key, label) in ALERT_FIELDS {
        let Some(field) = alert.get(*key) else {
            continue;
        };
        let text = scalar_text(field)
            .ok_or_else(|| malformed(node, "alert", format!("'{}' must be a plain value", key)))?;
        if !text.is_empty() {
            parts.push(format!("{}: {}", label, text));
        }
    }

    Ok(format!(".Alert({})", parts.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node_with(key: &str, value: Value) -> ProtypoNode {
        ProtypoNode::new("button").with_id("tag_10000000").with_attr(key, value)
    }

    #[test]
    fn test_param_value_truthiness() {
        assert_eq!(param_value(&node_with("width", json!(100)), "width").unwrap(), "100");
        assert_eq!(param_value(&node_with("width", json!(0)), "width").unwrap(), "");
        assert_eq!(param_value(&node_with("width", json!(false)), "width").unwrap(), "");
        assert_eq!(param_value(&node_with("width", json!(null)), "width").unwrap(), "");
        assert_eq!(param_value(&node_with("width", json!(true)), "width").unwrap(), "true");
        assert_eq!(param_value(&ProtypoNode::new("div"), "width").unwrap(), "");
    }

    #[test]
    fn test_param_value_rejects_objects() {
        let err = param_value(&node_with("class", json!({ "a": 1 })), "class").unwrap_err();
        assert!(matches!(err, CompileError::MalformedAttribute { attribute, .. } if attribute == "class"));
    }

    #[test]
    fn test_params_string_uses_text_field() {
        let node = node_with(
            "pageparams",
            json!({
                "isSearch": { "text": "1", "type": "text" },
                "v_Search": { "params": ["Search"], "type": "Val" }
            }),
        );
        assert_eq!(
            params_string(&node, "pageparams", "PageParams").unwrap(),
            Some("PageParams: \"isSearch=1,v_Search=\"".to_string())
        );
    }

    #[test]
    fn test_columns_string() {
        let node = node_with(
            "columns",
            json!([{ "Name": "id", "Title": "KEY_ID" }, { "Name": "amount", "Title": "MONEY" }]),
        );
        assert_eq!(
            columns_string(&node).unwrap(),
            Some("Columns: \"id=KEY_ID,amount=MONEY\"".to_string())
        );
    }

    #[test]
    fn test_columns_string_rejects_bad_shapes() {
        assert!(columns_string(&node_with("columns", json!("id=KEY_ID"))).is_err());
        assert!(columns_string(&node_with("columns", json!([{ "Name": "id" }]))).is_err());
    }

    #[test]
    fn test_validation_suffix_renames_lengths() {
        let node = node_with("validate", json!({ "minlength": 3, "maxlength": "10", "required": "true" }));
        assert_eq!(
            validation_suffix(&node).unwrap(),
            ".Validate(minLength: 3,maxLength: 10,required: true)"
        );
    }

    #[test]
    fn test_validation_suffix_empty_object() {
        assert_eq!(validation_suffix(&node_with("validate", json!({}))).unwrap(), "");
    }

    #[test]
    fn test_alert_suffix_only_present_fields() {
        let node = node_with("alert", json!({ "icon": "warning", "text": "Sure?" }));
        assert_eq!(alert_suffix(&node).unwrap(), ".Alert(Text: Sure?, Icon: warning)");
    }

    #[test]
    fn test_alert_suffix_rejects_string() {
        assert!(alert_suffix(&node_with("alert", json!("Sure?"))).is_err());
    }
}
