use crate::config::BuildOptions;
use crate::format::format_value;
use crate::logging::{OPTIONAL_FIELDS, TREE_BUILD};
use crate::optional::{resolve_roles, FieldRole};
use crate::schema::{Reflect, ReflectSequence, Value};
use crate::tree::{NodeId, Sink, Tree};
use tracing::{debug, trace, warn};

/// Expands reflected composites into label/value rows.
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    options: BuildOptions,
}

impl TreeBuilder {
    pub fn new(options: BuildOptions) -> Self {
        TreeBuilder { options }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Builds a fresh tree whose top-level rows are the fields of `gadget`.
    pub fn build(&self, gadget: &dyn Reflect) -> Tree {
        let mut tree = Tree::new();
        let span = tracing::debug_span!(target: TREE_BUILD, "build", build_id = %tree.id());
        let _enter = span.enter();
        let root = tree.root();
        self.fill(gadget, &mut tree, root);
        tree
    }

    /// Clears `tree` and fills it again from `gadget`.
    pub fn rebuild(&self, gadget: &dyn Reflect, tree: &mut Tree) {
        tree.clear_content();
        let span = tracing::debug_span!(target: TREE_BUILD, "rebuild", build_id = %tree.id());
        let _enter = span.enter();
        let root = tree.root();
        self.fill(gadget, tree, root);
    }

    /// Appends the fields of `gadget` below `parent`. Nothing is added when
    /// `parent` was issued before the sink's content was last cleared.
    pub fn fill<S: Sink + ?Sized>(&self, gadget: &dyn Reflect, sink: &mut S, parent: NodeId) {
        let span = tracing::debug_span!(
            target: TREE_BUILD,
            "fill",
            type_name = %gadget.type_name()
        );
        let _enter = span.enter();
        match self.fill_gadget(gadget, sink, parent, 0) {
            Some(()) => debug!(target: TREE_BUILD, "filled rows"),
            None => warn!(target: TREE_BUILD, "fill stopped, parent row is not part of the sink"),
        }
    }

    fn fill_gadget<S: Sink + ?Sized>(
        &self,
        gadget: &dyn Reflect,
        sink: &mut S,
        parent: NodeId,
        depth: usize,
    ) -> Option<()> {
        let fields = gadget.fields();
        let values = gadget.read_all();
        let roles = resolve_roles(&fields, self.options.optional_policy);

        for ((field, role), value) in fields.iter().zip(&roles).zip(&values) {
            if !role.is_rendered() {
                continue;
            }
            let item = self.add_field(sink, &field.name, value, parent, depth)?;

            if let FieldRole::Optional { flag } = *role {
                if !is_set(values.get(flag), &field.name) {
                    trace!(target: OPTIONAL_FIELDS, field = %field.name, "optional field not set");
                    sink.set_enabled_recursive(item, false);
                }
            }
        }
        Some(())
    }

    fn add_field<S: Sink + ?Sized>(
        &self,
        sink: &mut S,
        label: &str,
        value: &Value<'_>,
        parent: NodeId,
        depth: usize,
    ) -> Option<NodeId> {
        match value {
            Value::Composite(child) => self.add_composite(sink, label, *child, parent, depth),
            Value::Sequence(seq) => {
                let item = sink.add_entry(label, "", parent)?;
                self.add_elements(sink, *seq, item, depth)?;
                Some(item)
            }
            other => sink.add_entry(label, &format_value(other), parent),
        }
    }

    fn add_composite<S: Sink + ?Sized>(
        &self,
        sink: &mut S,
        label: &str,
        gadget: &dyn Reflect,
        parent: NodeId,
        depth: usize,
    ) -> Option<NodeId> {
        if depth >= self.options.max_depth {
            trace!(
                target: TREE_BUILD,
                label,
                type_name = %gadget.type_name(),
                max_depth = self.options.max_depth,
                "depth limit reached"
            );
            return sink.add_entry(label, &self.options.truncation_marker, parent);
        }
        let item = sink.add_entry(label, "", parent)?;
        self.fill_gadget(gadget, sink, item, depth + 1)?;
        Some(item)
    }

    fn add_elements<S: Sink + ?Sized>(
        &self,
        sink: &mut S,
        seq: &dyn ReflectSequence,
        item: NodeId,
        depth: usize,
    ) -> Option<()> {
        for index in 0..seq.len() {
            let label = index.to_string();
            match seq.element_at(index) {
                Value::Composite(child) => {
                    self.add_composite(sink, &label, child, item, depth)?;
                }
                element => {
                    sink.add_entry(&label, &format_value(&element), item)?;
                }
            }
        }
        Some(())
    }
}

fn is_set(flag: Option<&Value<'_>>, field: &str) -> bool {
    match flag {
        Some(Value::Bool(set)) => *set,
        other => {
            warn!(
                target: OPTIONAL_FIELDS,
                field,
                flag = ?other,
                "presence flag did not read as a boolean, treating as set"
            );
            true
        }
    }
}
