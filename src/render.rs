use crate::tree::Tree;

const INDENT: usize = 2;
const DISABLED_SUFFIX: &str = " (not set)";

/// Plain-text dump of a tree: indented labels, an aligned value column, and a
/// marker on disabled rows. Used for clipboard copies and CLI output.
pub fn render_text(tree: &Tree) -> String {
    let rows = tree.walk();
    let label_width = rows
        .iter()
        .map(|&(depth, id)| depth * INDENT + tree[id].label.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (depth, id) in rows {
        let node = &tree[id];
        let indented = format!("{:indent$}{}", "", node.label, indent = depth * INDENT);
        let mut line = if node.value.is_empty() {
            indented
        } else {
            format!("{:<width$}  {}", indented, node.value, width = label_width)
        };
        if !node.enabled {
            line.push_str(DISABLED_SUFFIX);
        }
        out.push_str(&line);
        out.push('\n');
    }
    out
}

pub fn render_json(tree: &Tree, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(tree)
    } else {
        serde_json::to_string(tree)
    }
}
