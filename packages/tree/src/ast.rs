use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Attribute map of a node. Key order is preserved as loaded.
pub type Attributes = Map<String, Value>;

/// Tag name of literal text nodes
pub const TEXT_TAG: &str = "text";

/// A single node of a Protypo page tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtypoNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub tag: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attr: Option<Attributes>,

    /// Only meaningful on `text` nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_children"
    )]
    pub children: Option<Vec<ProtypoNode>>,
}

/// `null` entries in a children array are dropped rather than rejected
fn deserialize_children<'de, D>(deserializer: D) -> Result<Option<Vec<ProtypoNode>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Option<ProtypoNode>>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|children| children.into_iter().flatten().collect()))
}

impl ProtypoNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            id: None,
            tag: tag.into(),
            attr: None,
            text: None,
            children: None,
        }
    }

    pub fn text_node(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new(TEXT_TAG)
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attr
            .get_or_insert_with(Attributes::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: ProtypoNode) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child);
        self
    }

    pub fn with_children(mut self, children: Vec<ProtypoNode>) -> Self {
        self.children = Some(children);
        self
    }

    /// The node id, treating an empty string as absent
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn has_id(&self) -> bool {
        self.id().is_some()
    }

    pub fn is_text(&self) -> bool {
        self.tag == TEXT_TAG
    }

    /// Text payload of a text node, empty when missing
    pub fn text_content(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    pub fn children(&self) -> &[ProtypoNode] {
        self.children.as_deref().unwrap_or_default()
    }

    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }

    /// Mutable children, creating the list if the node had none
    pub fn children_mut(&mut self) -> &mut Vec<ProtypoNode> {
        self.children.get_or_insert_with(Vec::new)
    }

    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attr.as_ref().and_then(|attr| attr.get(key))
    }

    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attr(key).and_then(Value::as_str)
    }

    /// Set (`Some`) or remove (`None`) an attribute, returning the previous value
    pub fn set_attr(&mut self, key: &str, value: Option<Value>) -> Option<Value> {
        match value {
            Some(value) => self
                .attr
                .get_or_insert_with(Attributes::new)
                .insert(key.to_string(), value),
            None => {
                let previous = self.attr.as_mut().and_then(|attr| attr.remove(key));
                if self.attr.as_ref().is_some_and(Map::is_empty) {
                    self.attr = None;
                }
                previous
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_skips_null_children() {
        let node: ProtypoNode = serde_json::from_value(json!({
            "tag": "div",
            "children": [null, { "tag": "text", "text": "hi" }, null]
        }))
        .unwrap();

        assert_eq!(node.children().len(), 1);
        assert_eq!(node.children()[0].text_content(), "hi");
    }

    #[test]
    fn test_empty_id_counts_as_absent() {
        let node = ProtypoNode::new("div").with_id("");
        assert!(!node.has_id());
        assert_eq!(node.id(), None);
    }

    #[test]
    fn test_attribute_order_preserved() {
        let node: ProtypoNode = serde_json::from_str(
            r#"{"tag":"input","attr":{"validate":{"zeta":"1","alpha":"2","maxlength":"3"}}}"#,
        )
        .unwrap();

        let keys: Vec<&String> = node.attr("validate").unwrap().as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "maxlength"]);
    }

    #[test]
    fn test_set_attr_removes_empty_map() {
        let mut node = ProtypoNode::new("div").with_attr("class", "row");
        let previous = node.set_attr("class", None);

        assert_eq!(previous, Some(json!("row")));
        assert!(node.attr.is_none());
    }

    #[test]
    fn test_serialize_omits_absent_fields() {
        let node = ProtypoNode::text_node("Send").with_id("tag_10000001");
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json, json!({ "id": "tag_10000001", "tag": "text", "text": "Send" }));
    }
}
