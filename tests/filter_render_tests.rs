use pretty_assertions::assert_eq;
use regex::Regex;
use serde_json::json;
use workbench_inspect::filter::filter_tree;
use workbench_inspect::render::{render_json, render_text};
use workbench_inspect::{inspect_sample, BuildOptions, OutputFormat, Sink, Tree, TreeBuilder};

mod common;
use common::*;

fn trip_tree() -> Tree {
    let trip = Trip {
        name: "ICE 1004".to_string(),
        legs: vec![
            leg("Berlin", "Hamburg", Some(7)),
            leg("Hamburg", "Kiel", None),
        ],
        stops: vec!["Berlin".to_string(), "Kiel".to_string()],
    };
    TreeBuilder::default().build(&trip)
}

fn labels(tree: &Tree) -> Vec<(usize, String)> {
    tree.walk()
        .into_iter()
        .map(|(depth, id)| (depth, tree[id].label.clone()))
        .collect()
}

#[test]
fn test_filter_keeps_ancestors_of_matches() {
    setup();
    let filtered = filter_tree(&trip_tree(), &Regex::new("^Kiel$").unwrap());

    assert_eq!(
        labels(&filtered),
        vec![
            (0, "legs".to_string()),
            (1, "1".to_string()),
            (2, "to".to_string()),
            (0, "stops".to_string()),
            (1, "1".to_string()),
        ]
    );
}

#[test]
fn test_filter_keeps_subtree_of_matching_row() {
    setup();
    let filtered = filter_tree(&trip_tree(), &Regex::new("^carriage$").unwrap());

    let carriage = filtered.find_path(&["legs", "0", "carriage"]).unwrap();
    assert_eq!(rows_of(&filtered, carriage), vec![row("number", "7", true)]);
    let absent = filtered.find_path(&["legs", "1", "carriage"]).unwrap();
    assert_eq!(filtered[absent].value, "Carriage");
    assert!(filtered.find_path(&["legs", "0", "from"]).is_none());
}

#[test]
fn test_filter_preserves_disabled_rows() {
    setup();
    let tree = TreeBuilder::default().build(&booking(false));
    let filtered = filter_tree(&tree, &Regex::new("Ada").unwrap());

    assert_eq!(top_rows(&filtered), vec![row("passenger", "", false)]);
    let passenger = filtered.find_path(&["passenger"]).unwrap();
    assert_eq!(rows_of(&filtered, passenger), vec![row("name", "Ada", false)]);
}

#[test]
fn test_filter_without_matches_is_empty() {
    setup();
    let filtered = filter_tree(&trip_tree(), &Regex::new("Munich").unwrap());
    assert!(filtered.is_empty());
}

#[test]
fn test_render_text_aligns_values() {
    let mut tree = Tree::new();
    let root = tree.root();
    tree.add_entry("number", "42", root).unwrap();
    let seat = tree.add_entry("seat", "12A", root).unwrap();
    tree.set_enabled_recursive(seat, false);
    let legs = tree.add_entry("legs", "", root).unwrap();
    let first = tree.add_entry("0", "", legs).unwrap();
    tree.add_entry("from", "Berlin", first).unwrap();

    assert_eq!(
        render_text(&tree),
        "number    42\nseat      12A (not set)\nlegs\n  0\n    from  Berlin\n"
    );
}

#[test]
fn test_render_text_of_empty_tree() {
    assert_eq!(render_text(&Tree::new()), "");
}

#[test]
fn test_render_json_nests_children() {
    let mut tree = Tree::new();
    let root = tree.root();
    let seat = tree.add_entry("seat", "12A", root).unwrap();
    tree.set_enabled_recursive(seat, false);
    let legs = tree.add_entry("legs", "", root).unwrap();
    tree.add_entry("0", "Berlin", legs).unwrap();

    let rendered: serde_json::Value =
        serde_json::from_str(&render_json(&tree, false).unwrap()).unwrap();
    assert_eq!(
        rendered,
        json!([
            {"label": "seat", "value": "12A", "enabled": false, "children": []},
            {"label": "legs", "value": "", "enabled": true, "children": [
                {"label": "0", "value": "Berlin", "enabled": true, "children": []}
            ]}
        ])
    );

    let pretty = render_json(&tree, true).unwrap();
    assert!(pretty.contains('\n'));
    assert_eq!(serde_json::from_str::<serde_json::Value>(&pretty).unwrap(), rendered);
}

#[test]
fn test_inspect_sample_end_to_end() {
    setup();
    let sample = r#"{"seat": "12A", "seatIsSet": false, "legs": [{"from": "Berlin"}]}"#;

    let text = inspect_sample(sample, &BuildOptions::default(), None, OutputFormat::Text).unwrap();
    assert_eq!(text, "seat      12A (not set)\nlegs\n  0\n    from  Berlin\n");

    let filtered = inspect_sample(
        sample,
        &BuildOptions::default(),
        Some("Berlin"),
        OutputFormat::Json { pretty: false },
    )
    .unwrap();
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&filtered).unwrap(),
        json!([
            {"label": "legs", "value": "", "enabled": true, "children": [
                {"label": "0", "value": "", "enabled": true, "children": [
                    {"label": "from", "value": "Berlin", "enabled": true, "children": []}
                ]}
            ]}
        ])
    );
}

#[test]
fn test_inspect_sample_rejects_bad_filter() {
    setup();
    let err = inspect_sample("{}", &BuildOptions::default(), Some("("), OutputFormat::Text)
        .unwrap_err();
    assert!(err.to_string().contains("Invalid filter"));
}
