use criterion::{black_box, criterion_group, criterion_main, Criterion};
use protypo_compiler::generate;
use protypo_tree::{parse, ProtypoNode};

const SEARCH_FORM: &str = r#"[{
    "tag": "div", "attr": { "class": "panel panel-primary" }, "children": [
        { "tag": "form", "children": [
            { "tag": "div", "attr": { "class": "list-group-item" }, "children": [
                { "tag": "label", "attr": { "for": "Search" }, "children": [
                    { "tag": "span", "children": [ { "tag": "text", "text": "name" } ] }
                ] },
                { "tag": "input", "attr": { "class": "form-control", "name": "Search", "type": "text", "value": "#v_Search#" } },
                { "tag": "button", "attr": {
                    "class": "btn btn-default", "page": "roles_list",
                    "pageparams": { "isSearch": { "text": "1", "type": "text" } }
                  }, "children": [ { "tag": "em", "attr": { "class": "fa fa-search" } } ] }
            ] },
            { "tag": "table", "attr": {
                "source": "src_roles_list",
                "columns": [ { "Name": "custom_id", "Title": "$id$" }, { "Name": "custom_name", "Title": "$name$" } ]
            } }
        ] }
    ]
}]"#;

fn generate_search_form(c: &mut Criterion) {
    let nodes = parse(SEARCH_FORM).expect("benchmark tree should parse");

    c.bench_function("generate_search_form", |b| b.iter(|| generate(black_box(&nodes))));
}

fn generate_wide_page(c: &mut Criterion) {
    let rows: Vec<ProtypoNode> = (0..500)
        .map(|i| {
            ProtypoNode::new("div")
                .with_attr("class", "row")
                .with_child(ProtypoNode::text_node(format!("Row {}", i)))
                .with_child(ProtypoNode::new("input").with_attr("name", format!("field_{}", i)))
        })
        .collect();

    c.bench_function("generate_wide_page", |b| b.iter(|| generate(black_box(&rows))));
}

criterion_group!(benches, generate_search_form, generate_wide_page);
criterion_main!(benches);
