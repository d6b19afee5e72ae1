//! Class-path derivation.
//!
//! A class path names the clicked element and up to `max_depth - 1` of its
//! ancestors, outermost first, e.g. `div.container > div.row > section#hero`.
//! The walk stops at `<body>`, which is never part of the path.

use crate::dom::ElementTree;
use std::fmt;

pub const DEFAULT_MAX_DEPTH: usize = 3;

const SEPARATOR: &str = " > ";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorPath {
    segments: Vec<String>,
}

impl SelectorPath {
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    fn prepend(&mut self, segment: String) {
        self.segments.insert(0, segment);
    }
}

impl fmt::Display for SelectorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join(SEPARATOR))
    }
}

/// Build the segment for a single element: `tag#id`, `tag.a.b` or `tag`.
///
/// An id always wins over classes.
pub fn segment_for<T: ElementTree + ?Sized>(tree: &T, node: &T::Node) -> String {
    let mut segment = tree.tag_name(node).to_lowercase();

    let id = tree.id(node);
    if !id.is_empty() {
        segment.push('#');
        segment.push_str(&id);
        return segment;
    }

    let class_name = tree.class_name(node);
    let classes = class_name.tokens();
    if !classes.is_empty() {
        segment.push('.');
        segment.push_str(&classes.join("."));
    }
    segment
}

/// Walk from `target` towards `<body>`, collecting at most `max_depth` segments.
///
/// The target always contributes its own segment, even when it is `<body>`
/// itself or `max_depth` is zero.
pub fn derive_class_path<T: ElementTree + ?Sized>(
    tree: &T,
    target: &T::Node,
    max_depth: usize,
) -> SelectorPath {
    let mut path = SelectorPath::default();
    path.prepend(segment_for(tree, target));

    let mut current = tree.parent(target);
    while let Some(node) = current {
        if path.len() >= max_depth || tree.is_body(&node) {
            break;
        }
        path.prepend(segment_for(tree, &node));
        current = tree.parent(&node);
    }
    path
}
