//! Starter templates: prebuilt page blocks that can be dropped in from the palette.
//!
//! Every instance is a fresh deep copy with newly generated ids on every node,
//! so two instances never share an id.

use protypo_tree::{assign_ids_with, IdSource, ProtypoNode, RandomIds};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateError {
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StarterTemplate {
    FormWithHeader,
    TableWithHeader,
    SearchForm,
    RadioPanel,
}

impl StarterTemplate {
    pub const ALL: [StarterTemplate; 4] = [
        StarterTemplate::FormWithHeader,
        StarterTemplate::TableWithHeader,
        StarterTemplate::SearchForm,
        StarterTemplate::RadioPanel,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StarterTemplate::FormWithHeader => "formWithHeader",
            StarterTemplate::TableWithHeader => "tableWithHeader",
            StarterTemplate::SearchForm => "searchForm",
            StarterTemplate::RadioPanel => "radioPanel",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, TemplateError> {
        Self::ALL
            .into_iter()
            .find(|template| template.name() == name)
            .ok_or_else(|| TemplateError::UnknownTemplate(name.to_string()))
    }

    pub fn instantiate(self) -> ProtypoNode {
        self.instantiate_with(&mut RandomIds)
    }

    pub fn instantiate_with<S: IdSource + ?Sized>(self, ids: &mut S) -> ProtypoNode {
        let mut root = [self.build()];
        assign_ids_with(&mut root, true, ids);
        let [root] = root;
        root
    }

    fn build(self) -> ProtypoNode {
        match self {
            StarterTemplate::FormWithHeader => form_with_header(),
            StarterTemplate::TableWithHeader => table_with_header(),
            StarterTemplate::SearchForm => search_form(),
            StarterTemplate::RadioPanel => radio_panel(),
        }
    }
}

/// Instantiate a starter template by its palette name
pub fn instantiate_template(name: &str) -> Result<ProtypoNode, TemplateError> {
    StarterTemplate::from_name(name).map(StarterTemplate::instantiate)
}

fn text(value: &str) -> ProtypoNode {
    ProtypoNode::text_node(value)
}

fn div(class: &str) -> ProtypoNode {
    ProtypoNode::new("div").with_attr("class", class)
}

fn primary_button(label: &str) -> ProtypoNode {
    ProtypoNode::new("button")
        .with_attr("class", "btn btn-primary")
        .with_attr("contract", "ContractName")
        .with_child(text(label))
}

fn panel_heading(title: &str) -> ProtypoNode {
    div("panel-heading").with_child(text(title))
}

fn labelled_input(label: &str) -> ProtypoNode {
    div("list-group-item").with_child(
        div("row df f-valign")
            .with_child(
                div("col-md-3 mt-sm text-right").with_child(ProtypoNode::new("label").with_child(text(label))),
            )
            .with_child(
                div("col-md-9 mc-sm text-left").with_child(
                    ProtypoNode::new("input")
                        .with_attr("name", label)
                        .with_attr("type", "text"),
                ),
            ),
    )
}

fn form_with_header() -> ProtypoNode {
    div("panel panel-primary")
        .with_child(panel_heading("Money transfer"))
        .with_child(
            ProtypoNode::new("form")
                .with_child(labelled_input("Input1"))
                .with_child(labelled_input("Input2"))
                .with_child(labelled_input("Input3"))
                .with_child(div("panel-footer text-right").with_child(primary_button("Send"))),
        )
}

fn table_with_header() -> ProtypoNode {
    div("panel panel-primary")
        .with_child(panel_heading("Table block"))
        .with_child(ProtypoNode::new("table").with_attr("source", "test_key"))
        .with_child(div("panel-footer text-right").with_child(primary_button("More")))
}

fn search_form() -> ProtypoNode {
    let search_button = ProtypoNode::new("button")
        .with_attr("class", "btn btn-default")
        .with_attr("page", "roles_list")
        .with_attr(
            "pageparams",
            json!({
                "isSearch": { "text": "1", "type": "text" },
                "v_Search": { "params": ["Search"], "type": "Val" }
            }),
        )
        .with_child(ProtypoNode::new("em").with_attr("class", "fa fa-search"));

    let search_row = div("list-group-item").with_child(
        div("row df f-valign")
            .with_child(
                div("col-md-1 mt-sm text-right").with_child(
                    ProtypoNode::new("label")
                        .with_attr("for", "Search")
                        .with_child(ProtypoNode::new("span").with_child(text("name"))),
                ),
            )
            .with_child(
                div("col-md-11 mc-sm").with_child(
                    div("input-group")
                        .with_child(
                            ProtypoNode::new("input")
                                .with_attr("class", "form-control")
                                .with_attr("name", "Search")
                                .with_attr("type", "text")
                                .with_attr("value", "#v_Search#"),
                        )
                        .with_child(div("input-group-btn").with_child(search_button)),
                ),
            ),
    );

    let results = div("list-group-item").with_child(
        ProtypoNode::new("table")
            .with_attr(
                "columns",
                json!([
                    { "Name": "custom_id", "Title": "$id$" },
                    { "Name": "custom_name", "Title": "$name$" },
                    { "Name": "custom_type", "Title": "$type$" },
                    { "Name": "custom_date", "Title": "$created$ / $deleted$" },
                    { "Name": "custom_status", "Title": "$status$" },
                    { "Name": "custom_creator", "Title": "$creator$" },
                    { "Name": "actions", "Title": "$actions$" }
                ]),
            )
            .with_attr("source", "src_roles_list"),
    );

    let footer = div("panel-footer clearfix").with_child(
        div("pull-right").with_child(
            ProtypoNode::new("button")
                .with_attr("class", "btn btn-primary")
                .with_attr("page", "roles_create")
                .with_child(text("create")),
        ),
    );

    div("panel panel-primary").with_child(
        ProtypoNode::new("form")
            .with_child(search_row)
            .with_child(results)
            .with_child(footer),
    )
}

fn radio_panel() -> ProtypoNode {
    let body = div("panel-body").with_child(
        div("form-group")
            .with_child(ProtypoNode::new("label").with_child(text("Payment methods")))
            .with_child(
                ProtypoNode::new("radiogroup")
                    .with_attr("name", "Payments")
                    .with_attr("namecolumn", "type")
                    .with_attr("source", "payment")
                    .with_attr("value", "#value_payment_method#")
                    .with_attr("valuecolumn", "id"),
            ),
    );

    let footer = div("panel-footer text-center")
        .with_child(
            ProtypoNode::new("button")
                .with_attr("alert", json!({ "text": "Select the payment method" }))
                .with_attr("class", "btn btn-default mr-lg")
                .with_attr("contract", "ContractName")
                .with_child(text("Cancel")),
        )
        .with_child(
            ProtypoNode::new("button")
                .with_attr("class", "btn btn-primary")
                .with_attr("contract", "ContractName")
                .with_attr("page", "proof_payment")
                .with_child(text("Payment")),
        );

    ProtypoNode::new("form")
        .with_attr("class", "panel panel-primary")
        .with_child(div("panel-heading").with_child(div("panel-title").with_child(text("Payment"))))
        .with_child(body)
        .with_child(footer)
}
