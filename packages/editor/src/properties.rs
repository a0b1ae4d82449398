//! Text-styling properties backed by utility classes in a tag's `class` list.

use protypo_tree::ProtypoNode;
use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassProperty {
    Align,
    Transform,
    Wrap,
    Color,
}

impl ClassProperty {
    pub const ALL: [ClassProperty; 4] = [
        ClassProperty::Align,
        ClassProperty::Transform,
        ClassProperty::Wrap,
        ClassProperty::Color,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "align" => Some(ClassProperty::Align),
            "transform" => Some(ClassProperty::Transform),
            "wrap" => Some(ClassProperty::Wrap),
            "color" => Some(ClassProperty::Color),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ClassProperty::Align => "align",
            ClassProperty::Transform => "transform",
            ClassProperty::Wrap => "wrap",
            ClassProperty::Color => "color",
        }
    }

    /// `(value, class)` pairs in menu order
    pub fn values(self) -> &'static [(&'static str, &'static str)] {
        match self {
            ClassProperty::Align => &[
                ("left", "text-left"),
                ("center", "text-center"),
                ("right", "text-right"),
            ],
            ClassProperty::Transform => &[
                ("lowercase", "text-lowercase"),
                ("uppercase", "text-uppercase"),
            ],
            ClassProperty::Wrap => &[("nowrap", "text-nowrap")],
            ClassProperty::Color => &[
                ("muted", "text-muted"),
                ("primary", "text-primary"),
                ("success", "text-success"),
                ("info", "text-info"),
                ("warning", "text-warning"),
                ("danger", "text-danger"),
            ],
        }
    }

    pub fn class_for(self, value: &str) -> Option<&'static str> {
        self.values()
            .iter()
            .find(|(name, _)| *name == value)
            .map(|(_, class)| *class)
    }
}

/// Current value of `property` on `node`, read from its `class` attribute
pub fn initial_value(property: ClassProperty, node: &ProtypoNode) -> Option<&'static str> {
    let classes = node.attr_str("class").filter(|classes| !classes.is_empty())?;
    property
        .values()
        .iter()
        .find(|(_, class)| classes.contains(class))
        .map(|(value, _)| *value)
}

/// Replace whichever class of `property` is present with the one for `value`.
/// An unknown `value` just clears the property.
pub fn update_class_list(classes: &str, property: ClassProperty, value: &str) -> String {
    let mut classes = classes.to_string();
    for (_, class) in property.values() {
        classes = classes.replacen(class, "", 1);
    }
    if let Some(class) = property.class_for(value) {
        classes.push(' ');
        classes.push_str(class);
    }
    WHITESPACE.replace_all(&classes, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_value() {
        let node = ProtypoNode::new("div").with_attr("class", "col-md-3 mt-sm text-right");
        assert_eq!(initial_value(ClassProperty::Align, &node), Some("right"));
        assert_eq!(initial_value(ClassProperty::Color, &node), None);
        assert_eq!(initial_value(ClassProperty::Align, &ProtypoNode::new("div")), None);
    }

    #[test]
    fn test_update_replaces_existing_class() {
        assert_eq!(
            update_class_list("panel  text-left bold", ClassProperty::Align, "center"),
            "panel bold text-center"
        );
    }

    #[test]
    fn test_update_with_unknown_value_clears() {
        assert_eq!(update_class_list("text-muted x", ClassProperty::Color, ""), "x");
    }

    #[test]
    fn test_update_empty_list() {
        assert_eq!(update_class_list("", ClassProperty::Wrap, "nowrap"), "text-nowrap");
    }

    #[test]
    fn test_from_name() {
        for property in ClassProperty::ALL {
            assert_eq!(ClassProperty::from_name(property.name()), Some(property));
        }
        assert_eq!(ClassProperty::from_name("size"), None);
    }
}
