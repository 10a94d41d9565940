//! A recursive subset of positions within a value tree (§4.10), used by
//! client code to prune traversals. The decoder's `topLevelKeys` parameter
//! is a flat, single-level specialization of the same idea.

use crate::byte_string::ByteString;
use std::collections::BTreeMap;

/// One step into a value tree: a dictionary key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Component {
    Key(ByteString),
    Index(usize),
}

impl From<&str> for Component {
    fn from(value: &str) -> Self {
        Component::Key(ByteString::new(value))
    }
}

impl From<ByteString> for Component {
    fn from(value: ByteString) -> Self {
        Component::Key(value)
    }
}

impl From<usize> for Component {
    fn from(value: usize) -> Self {
        Component::Index(value)
    }
}

/// A finite set of paths through a value tree, represented as a mapping
/// from each top-level [`Component`] present to the `PathSet` describing
/// what is selected beneath it. An empty `PathSet` selects nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSet {
    children: BTreeMap<Component, PathSet>,
}

impl PathSet {
    /// The empty path set, selecting nothing.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// The `PathSet` reachable under `component`, if any.
    pub fn get(&self, component: &Component) -> Option<&PathSet> {
        self.children.get(component)
    }

    /// Convenience lookup for a key component.
    pub fn get_key(&self, key: &str) -> Option<&PathSet> {
        self.get(&Component::Key(ByteString::new(key)))
    }

    /// Convenience lookup for an index component.
    pub fn get_index(&self, index: usize) -> Option<&PathSet> {
        self.get(&Component::Index(index))
    }

    /// Inserts `component` into this set, mapped to `nested` (which may
    /// itself be empty, meaning "select this position but nothing below
    /// it"). Returns the replaced subtree, if any.
    pub fn insert(&mut self, component: impl Into<Component>, nested: PathSet) -> Option<PathSet> {
        self.children.insert(component.into(), nested)
    }

    /// Inserts a leaf selection: `component` is selected with nothing
    /// beneath it.
    pub fn insert_leaf(&mut self, component: impl Into<Component>) {
        self.children.entry(component.into()).or_default();
    }

    /// Builds a flat `PathSet` of leaf keys, the shape the decoder's
    /// `topLevelKeys` is specialized from.
    pub fn from_keys(keys: impl IntoIterator<Item = ByteString>) -> Self {
        let mut set = Self::new();
        for key in keys {
            set.insert_leaf(Component::Key(key));
        }
        set
    }

    /// The components present at this level, in sorted order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.children.keys()
    }

    /// The `(component, subset)` pairs present at this level, in sorted
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (&Component, &PathSet)> {
        self.children.iter()
    }

    /// A flat view of the top-level key components only, for feeding
    /// [`crate::decoder::decode_subtree`], which only understands a
    /// single-level key set.
    pub fn top_level_keys(&self) -> std::collections::HashSet<ByteString> {
        self.children
            .keys()
            .filter_map(|c| match c {
                Component::Key(k) => Some(k.clone()),
                Component::Index(_) => None,
            })
            .collect()
    }
}
