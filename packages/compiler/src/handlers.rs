//! # Tag handler registry
//!
//! Every supported Protypo tag maps to one [`TagHandler`] variant. A handler
//! knows which attributes it turns into parameters, whether it accepts
//! children, how to render itself as template source, and what a freshly
//! created node of its kind looks like.
//!
//! Div, Span, Strong, Em, P, Form and Label share the generic rendering
//! strategy; the others specialise it.

use crate::attributes::{
    alert_suffix, columns_string, declared_params, params_string, style_suffix, validation_suffix,
};
use crate::compiler::render_children;
use crate::context::CompilerContext;
use crate::error::CompileResult;
use protypo_tree::{IdSource, ProtypoNode, RandomIds};
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagHandler {
    Button,
    Div,
    Em,
    Form,
    Image,
    ImageInput,
    Input,
    Label,
    P,
    RadioGroup,
    Span,
    Strong,
    Table,
}

/// How a handler lays out its call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    /// Params, Body, `.Style`
    Generic,
    /// Params, Body, Params/PageParams, `.Style`, `.Alert`
    Button,
    /// Params, Columns, `.Style`; never a Body
    Table,
    /// Body, Params, `.Validate`, `.Style`
    Field,
}

/// Every handler, in registry order
pub const ALL_HANDLERS: [TagHandler; 13] = [
    TagHandler::Button,
    TagHandler::Div,
    TagHandler::Em,
    TagHandler::Form,
    TagHandler::Image,
    TagHandler::ImageInput,
    TagHandler::Input,
    TagHandler::Label,
    TagHandler::P,
    TagHandler::RadioGroup,
    TagHandler::Span,
    TagHandler::Strong,
    TagHandler::Table,
];

const CLASS_ONLY: &[(&str, &str)] = &[("class", "Class")];
const BUTTON_ATTRS: &[(&str, &str)] = &[("class", "Class"), ("page", "Page"), ("contract", "Contract")];
const TABLE_ATTRS: &[(&str, &str)] = &[("source", "Source")];
const IMAGE_ATTRS: &[(&str, &str)] = &[("source", "Source"), ("src", "Src"), ("alt", "Alt")];
const IMAGE_INPUT_ATTRS: &[(&str, &str)] = &[
    ("class", "Class"),
    ("format", "Format"),
    ("name", "Name"),
    ("ratio", "Ratio"),
    ("width", "Width"),
];
const INPUT_ATTRS: &[(&str, &str)] = &[
    ("class", "Class"),
    ("name", "Name"),
    ("placeholder", "Placeholder"),
    ("type", "Type"),
    ("value", "Value"),
];
const RADIO_GROUP_ATTRS: &[(&str, &str)] = &[
    ("name", "Name"),
    ("source", "Source"),
    ("namecolumn", "NameColumn"),
    ("valuecolumn", "ValueColumn"),
    ("value", "Value"),
    ("class", "Class"),
];

/// Look up the handler for a tag name. Matching is exact and lower-case;
/// unknown tags (and `text`) have no handler.
pub fn resolve(tag: &str) -> Option<TagHandler> {
    let handler = match tag {
        "button" => TagHandler::Button,
        "div" => TagHandler::Div,
        "em" => TagHandler::Em,
        "form" => TagHandler::Form,
        "image" => TagHandler::Image,
        "imageinput" => TagHandler::ImageInput,
        "input" => TagHandler::Input,
        "label" => TagHandler::Label,
        "p" => TagHandler::P,
        "radiogroup" => TagHandler::RadioGroup,
        "span" => TagHandler::Span,
        "strong" => TagHandler::Strong,
        "table" => TagHandler::Table,
        _ => return None,
    };
    Some(handler)
}

impl TagHandler {
    /// Function name used in generated source
    pub fn name(self) -> &'static str {
        match self {
            TagHandler::Button => "Button",
            TagHandler::Div => "Div",
            TagHandler::Em => "Em",
            TagHandler::Form => "Form",
            TagHandler::Image => "Image",
            TagHandler::ImageInput => "ImageInput",
            TagHandler::Input => "Input",
            TagHandler::Label => "Label",
            TagHandler::P => "P",
            TagHandler::RadioGroup => "RadioGroup",
            TagHandler::Span => "Span",
            TagHandler::Strong => "Strong",
            TagHandler::Table => "Table",
        }
    }

    /// Protypo tag name this handler is registered under
    pub fn tag(self) -> &'static str {
        match self {
            TagHandler::Button => "button",
            TagHandler::Div => "div",
            TagHandler::Em => "em",
            TagHandler::Form => "form",
            TagHandler::Image => "image",
            TagHandler::ImageInput => "imageinput",
            TagHandler::Input => "input",
            TagHandler::Label => "label",
            TagHandler::P => "p",
            TagHandler::RadioGroup => "radiogroup",
            TagHandler::Span => "span",
            TagHandler::Strong => "strong",
            TagHandler::Table => "table",
        }
    }

    /// Accepted attribute keys and the parameter names they render as, in
    /// emission order
    pub fn attributes(self) -> &'static [(&'static str, &'static str)] {
        match self {
            TagHandler::Button => BUTTON_ATTRS,
            TagHandler::Table => TABLE_ATTRS,
            TagHandler::Image => IMAGE_ATTRS,
            TagHandler::ImageInput => IMAGE_INPUT_ATTRS,
            TagHandler::Input => INPUT_ATTRS,
            TagHandler::RadioGroup => RADIO_GROUP_ATTRS,
            TagHandler::Div
            | TagHandler::Em
            | TagHandler::Form
            | TagHandler::Label
            | TagHandler::P
            | TagHandler::Span
            | TagHandler::Strong => CLASS_ONLY,
        }
    }

    /// Whether nodes of this kind accept dropped children
    pub fn can_have_children(self) -> bool {
        !matches!(
            self,
            TagHandler::Table
                | TagHandler::Image
                | TagHandler::ImageInput
                | TagHandler::Input
                | TagHandler::RadioGroup
        )
    }

    fn strategy(self) -> Strategy {
        match self {
            TagHandler::Button => Strategy::Button,
            TagHandler::Table => Strategy::Table,
            TagHandler::Input | TagHandler::RadioGroup => Strategy::Field,
            _ => Strategy::Generic,
        }
    }

    /// Render `node` as a template call, including its children.
    ///
    /// Failures in children are isolated inside [`render_children`]; an
    /// error returned here concerns this node's own attributes.
    pub fn render_code(self, node: &ProtypoNode, ctx: &CompilerContext) -> CompileResult<String> {
        let mut params = Vec::new();
        let mut suffix = String::new();

        match self.strategy() {
            Strategy::Generic => {
                params.extend(declared_params(node, self.attributes())?);
                push_body(&mut params, render_children(node, ctx));
                suffix.push_str(&style_suffix(node)?);
            }
            Strategy::Button => {
                params.extend(declared_params(node, self.attributes())?);
                push_body(&mut params, render_children(node, ctx));
                params.extend(params_string(node, "params", "Params")?);
                params.extend(params_string(node, "pageparams", "PageParams")?);
                suffix.push_str(&style_suffix(node)?);
                suffix.push_str(&alert_suffix(node)?);
            }
            Strategy::Table => {
                params.extend(declared_params(node, self.attributes())?);
                params.extend(columns_string(node)?);
                suffix.push_str(&style_suffix(node)?);
            }
            Strategy::Field => {
                push_body(&mut params, render_children(node, ctx));
                params.extend(declared_params(node, self.attributes())?);
                suffix.push_str(&validation_suffix(node)?);
                suffix.push_str(&style_suffix(node)?);
            }
        }

        Ok(format!("{}({}){} ", self.name(), params.join(", "), suffix))
    }

    /// A minimal fragment of this kind for the element palette, with fresh ids
    pub fn sample_fragment(self, text: Option<&str>) -> ProtypoNode {
        self.sample_fragment_with(text, &mut RandomIds)
    }

    pub fn sample_fragment_with<S: IdSource + ?Sized>(self, text: Option<&str>, ids: &mut S) -> ProtypoNode {
        let node = ProtypoNode::new(self.tag()).with_id(ids.next_id());

        match self {
            TagHandler::Table => node.with_attr("source", "keysStr").with_attr(
                "columns",
                json!([
                    { "Name": "id", "Title": "KEY_ID" },
                    { "Name": "amount", "Title": "MONEY" }
                ]),
            ),
            TagHandler::Image => node
                .with_attr("alt", "Image")
                .with_attr("src", "/img/dummy.png"),
            TagHandler::ImageInput => node
                .with_attr("format", "jpg")
                .with_attr("name", "sample image")
                .with_attr("ratio", "2/1")
                .with_attr("width", "100"),
            TagHandler::Input => node.with_attr("name", "sample input"),
            TagHandler::RadioGroup => node.with_attr("name", "sample radio"),
            _ => node.with_child(ProtypoNode::text_node(text.unwrap_or_default()).with_id(ids.next_id())),
        }
    }
}

fn push_body(params: &mut Vec<String>, body: String) {
    if !body.is_empty() {
        params.push(format!("Body: {}", body));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protypo_tree::SequentialIds;

    #[test]
    fn test_resolve_is_exact() {
        assert_eq!(resolve("button"), Some(TagHandler::Button));
        assert_eq!(resolve("imageinput"), Some(TagHandler::ImageInput));
        assert_eq!(resolve("Button"), None);
        assert_eq!(resolve("text"), None);
        assert_eq!(resolve("unknownwidget"), None);
    }

    #[test]
    fn test_registry_round_trips_tag_names() {
        for handler in ALL_HANDLERS {
            assert_eq!(resolve(handler.tag()), Some(handler));
            assert_eq!(handler.name().to_lowercase(), handler.tag());
        }
    }

    #[test]
    fn test_void_elements() {
        let void: Vec<_> = ALL_HANDLERS
            .iter()
            .filter(|h| !h.can_have_children())
            .map(|h| h.tag())
            .collect();
        assert_eq!(void, vec!["image", "imageinput", "input", "radiogroup", "table"]);
    }

    #[test]
    fn test_sample_fragment_containers_wrap_text() {
        let mut ids = SequentialIds::new();
        let node = TagHandler::Div.sample_fragment_with(Some("Hello"), &mut ids);

        assert_eq!(node.tag, "div");
        assert_eq!(node.id(), Some("tag_10000000"));
        assert_eq!(node.children().len(), 1);
        assert_eq!(node.children()[0].text_content(), "Hello");
        assert_eq!(node.children()[0].id(), Some("tag_10000001"));
    }

    #[test]
    fn test_sample_fragment_void_elements_have_attributes() {
        let table = TagHandler::Table.sample_fragment(None);
        assert_eq!(table.attr_str("source"), Some("keysStr"));
        assert!(table.children.is_none());
        assert!(table.has_id());

        let image = TagHandler::Image.sample_fragment(Some("ignored"));
        assert_eq!(image.attr_str("src"), Some("/img/dummy.png"));
        assert!(image.children.is_none());
    }

    #[test]
    fn test_sample_fragments_render() {
        let ctx = CompilerContext::default();
        for handler in ALL_HANDLERS {
            let node = handler.sample_fragment(Some("x"));
            let code = handler.render_code(&node, &ctx).unwrap();
            assert!(code.starts_with(&format!("{}(", handler.name())), "{}", code);
        }
        assert!(ctx.diagnostics().is_empty());
    }
}
