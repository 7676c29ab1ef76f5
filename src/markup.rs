//! Building node trees from JSON descriptions.
//!
//! ```json
//! { "kind": "vertical", "attributes": { "padding": 4 },
//!   "children": [ { "kind": "leaf", "attributes": { "height": 20 } } ] }
//! ```
//!
//! Attribute values may be strings, numbers or booleans; they go through the
//! same `set_attribute` chain as hand-built nodes.

use std::collections::BTreeMap;
use std::rc::Rc;

use serde::Deserialize;
use serde_json::Value;

use crate::container::{Canvas, Container};
use crate::error::{Result, TrellisError};
use crate::host::Context;
use crate::layout::{Dialog, Layout, Stack, StretchFlags, Tile};
use crate::node::{Leaf, Node, NodeRef, node_ref};

#[derive(Debug, Clone, Deserialize)]
pub struct NodeSpec {
    pub kind: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, Value>,
    #[serde(default)]
    pub children: Vec<NodeSpec>,
    /// Stretch flags such as `"size-x"`; only read when the parent is a
    /// dialog.
    #[serde(default)]
    pub stretch: Vec<String>,
}

impl NodeSpec {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Parse and build in one step.
pub fn load(raw: &str, cx: &Context<'_>) -> Result<NodeRef> {
    build(&NodeSpec::from_json(raw)?, cx)
}

pub fn build(spec: &NodeSpec, cx: &Context<'_>) -> Result<NodeRef> {
    match spec.kind.as_str() {
        "vertical" => container(Container::new(Stack::vertical()), spec, cx),
        "horizontal" => container(Container::new(Stack::horizontal()), spec, cx),
        "tile" => container(Container::<Tile>::tiled(2), spec, cx),
        "container" => container(Container::default(), spec, cx),
        "dialog" => dialog(spec, cx),
        "canvas" => canvas(spec, cx),
        "leaf" => {
            if !spec.children.is_empty() {
                return Err(TrellisError::invalid("children", "leaf nodes have none"));
            }
            let mut leaf = Leaf::default();
            apply_attributes(&mut leaf, spec, cx)?;
            Ok(node_ref(leaf))
        }
        other => Err(TrellisError::UnknownKind(other.to_string())),
    }
}

fn container<L: Layout + 'static>(
    mut node: Container<L>,
    spec: &NodeSpec,
    cx: &Context<'_>,
) -> Result<NodeRef> {
    apply_attributes(&mut node, spec, cx)?;
    add_children(&mut node, spec, cx)?;
    Ok(node_ref(node))
}

fn dialog(spec: &NodeSpec, cx: &Context<'_>) -> Result<NodeRef> {
    let mut node = Container::<Dialog>::dialog();
    apply_attributes(&mut node, spec, cx)?;
    let children = add_children(&mut node, spec, cx)?;
    for (child, child_spec) in children.iter().zip(&spec.children) {
        if child_spec.stretch.is_empty() {
            continue;
        }
        node.set_stretch_mode(child, parse_stretch(&child_spec.stretch)?);
    }
    Ok(node_ref(node))
}

fn canvas(spec: &NodeSpec, cx: &Context<'_>) -> Result<NodeRef> {
    let mut node = Canvas::default();
    apply_attributes(&mut node, spec, cx)?;
    add_children(node.container_mut(), spec, cx)?;
    Ok(node_ref(node))
}

fn add_children<L: Layout>(
    parent: &mut Container<L>,
    spec: &NodeSpec,
    cx: &Context<'_>,
) -> Result<Vec<NodeRef>> {
    spec.children
        .iter()
        .map(|child| {
            let node = build(child, cx)?;
            parent.add(Rc::clone(&node), cx);
            Ok(node)
        })
        .collect()
}

fn apply_attributes(node: &mut dyn Node, spec: &NodeSpec, cx: &Context<'_>) -> Result<()> {
    for (name, value) in &spec.attributes {
        let text = match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        node.set_attribute(name, &text, cx)?;
    }
    Ok(())
}

fn parse_stretch(names: &[String]) -> Result<StretchFlags> {
    names.iter().try_fold(StretchFlags::empty(), |flags, name| {
        StretchFlags::from_markup(name)
            .map(|flag| flags | flag)
            .ok_or_else(|| TrellisError::invalid("stretch", name))
    })
}
