//! Materializes self-describing composite values into label/value trees.

pub mod builder;
pub mod config;
pub mod filter;
pub mod format;
pub mod json;
pub mod logging;
pub mod optional;
pub mod render;
pub mod schema;
pub mod ticket_layout;
pub mod tree;

pub use builder::TreeBuilder;
pub use config::BuildOptions;
pub use json::inspect_json;
pub use optional::OptionalPolicy;
pub use schema::{
    EnumTable, FieldDescriptor, FieldKind, Reflect, ReflectSequence, Reflected, Schema, Value,
};
pub use tree::{Node, NodeId, Sink, Tree};

use anyhow::{Context, Result};
use regex::Regex;

/// Output format of [`inspect_sample`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json { pretty: bool },
}

/// Materialize a JSON sample and render it, optionally keeping only rows
/// matching `filter`.
///
/// # Arguments
/// * `sample` - JSON document whose top level is an object
/// * `options` - Build settings
/// * `filter` - Regular expression applied to labels and values
/// * `format` - Rendering of the resulting tree
pub fn inspect_sample(
    sample: &str,
    options: &BuildOptions,
    filter: Option<&str>,
    format: OutputFormat,
) -> Result<String> {
    let mut tree = inspect_json(sample, options)?;

    if let Some(pattern) = filter {
        let regex = Regex::new(pattern).with_context(|| format!("Invalid filter {:?}", pattern))?;
        tree = filter::filter_tree(&tree, &regex);
    }

    match format {
        OutputFormat::Text => Ok(render::render_text(&tree)),
        OutputFormat::Json { pretty } => {
            render::render_json(&tree, pretty).context("Failed to serialize tree")
        }
    }
}
