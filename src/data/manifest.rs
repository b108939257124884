//! Helpers for walking the XML documents of a dataset.

use crate::error::{QesError, Result};
use glam::Vec3;
use roxmltree::Node;
use std::str::FromStr;

/// Element children of `node`, skipping text, comments and processing instructions.
pub(crate) fn elements<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|n| n.is_element())
}

/// Fail unless `node` is an element named `expected`.
pub(crate) fn expect_tag(node: Node<'_, '_>, expected: &str) -> Result<()> {
    let found = node.tag_name().name();
    if found != expected {
        return Err(QesError::format(format!(
            "Expected {} node, found {} instead",
            expected, found
        )));
    }
    Ok(())
}

/// First element child of `node` named `name`.
pub(crate) fn section<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Result<Node<'a, 'input>> {
    elements(node)
        .find(|n| n.tag_name().name() == name)
        .ok_or_else(|| QesError::format(format!("Missing {} section", name)))
}

/// Raw value of attribute `name`.
pub(crate) fn attr_str<'a>(node: Node<'a, '_>, name: &str) -> Result<&'a str> {
    node.attribute(name).ok_or_else(|| {
        QesError::format(format!(
            "{} node is missing attribute {}",
            node.tag_name().name(),
            name
        ))
    })
}

/// Attribute `name` parsed as `T`.
pub(crate) fn attr<T: FromStr>(node: Node<'_, '_>, name: &str) -> Result<T> {
    let raw = attr_str(node, name)?;
    raw.trim().parse().map_err(|_| {
        QesError::format(format!(
            "{} node has invalid {} value {:?}",
            node.tag_name().name(),
            name,
            raw
        ))
    })
}

/// Read the child element `name` carrying `x`, `y` and `z` attributes.
pub(crate) fn read_vec3(node: Node<'_, '_>, name: &str) -> Result<Vec3> {
    let child = elements(node)
        .find(|n| n.tag_name().name() == name)
        .ok_or_else(|| QesError::format(format!("Vector with name {} not found", name)))?;

    Ok(Vec3::new(
        attr(child, "x")?,
        attr(child, "y")?,
        attr(child, "z")?,
    ))
}
