// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The option-list model for dropdown panels.
//!
//! Options arrive from application code in four shapes: bare primitives
//! (strings and numbers), renderable nodes the embedder draws itself, keyed
//! nodes (a renderable plus the stable key that stands in for its label), and
//! named groups of further options. [`OptionItem`] makes the shape explicit
//! with one tag per element, decided when the list is built; rendering and
//! selection code dispatch on the tag and never probe values at runtime, and
//! a list may freely mix shapes.
//!
//! Positions within the (possibly nested) list are index paths: `[2, 0]` is
//! the first child of the third top-level entry. [`flatten`] walks the tree
//! into render order with the path of every entry; [`resolve`] maps a path
//! back to its item. [`Highlight`] tracks the keyboard-highlighted path and
//! steps it through the selectable entries, skipping group headers.
//!
//! ## Example
//!
//! ```
//! use overstory_disclosure::options::{flatten, resolve, OptionItem};
//!
//! // A list mixing a bare primitive with a named group.
//! let items: Vec<OptionItem<()>> = vec![
//!     OptionItem::text("Today"),
//!     OptionItem::group("Earlier", vec![
//!         OptionItem::text("Yesterday"),
//!         OptionItem::number(2024.0),
//!     ]),
//! ];
//!
//! let flat = flatten(&items);
//! assert_eq!(flat.len(), 4); // group headers are entries too
//! assert_eq!(flat[2].path, vec![1, 0]);
//! assert_eq!(flat[2].item.label().as_deref(), Some("Yesterday"));
//!
//! assert_eq!(resolve(&items, &[1, 1]).unwrap().label().as_deref(), Some("2024"));
//! assert!(resolve(&items, &[1, 2]).is_none());
//! ```

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

/// A primitive option payload: the values that label themselves.
#[derive(Clone, Debug, PartialEq)]
pub enum OptionValue {
    /// A string option.
    Text(String),
    /// A numeric option.
    Number(f64),
}

impl OptionValue {
    /// The display label.
    ///
    /// Integral numbers print without a fractional part (`3`, not `3.0`),
    /// matching how loosely typed front ends stringify them.
    pub fn label(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => {
                // `f64::fract` is not available in core; for finite values
                // below 1e15 an exact i64 round trip is the same integral test.
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "The finiteness/magnitude guard keeps the value exact in i64."
                )]
                let integral = n.is_finite() && n.abs() < 1e15 && *n == (*n as i64 as f64);
                if integral {
                    #[allow(
                        clippy::cast_possible_truncation,
                        reason = "The integral/magnitude guard above keeps the value exact in i64."
                    )]
                    let i = *n as i64;
                    format!("{i}")
                } else {
                    format!("{n}")
                }
            }
        }
    }
}

/// The shape of an [`OptionItem`], one tag per element.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum OptionKind {
    /// Self-labelling primitive.
    Primitive,
    /// Renderable node without an intrinsic label.
    Node,
    /// Renderable node carrying a stable key.
    Keyed,
    /// Named group of child options.
    Group,
}

/// One entry in an option list.
///
/// `R` is the embedder's renderable type: a widget id, a virtual-DOM node,
/// whatever it draws options with. This crate never inspects it.
#[derive(Clone, Debug, PartialEq)]
pub enum OptionItem<R> {
    /// A bare primitive; its value is also its label.
    Primitive(OptionValue),
    /// A renderable the embedder draws; has no label of its own.
    Node(R),
    /// A renderable plus the key that identifies and labels it. Every
    /// non-primitive, non-renderable input must carry its key at
    /// construction; there is no fallback probing later.
    Keyed {
        /// Stable identity and display label.
        key: String,
        /// The renderable payload.
        node: R,
    },
    /// A named group. The header renders but cannot be selected; its
    /// children are ordinary entries.
    Group {
        /// Header text.
        name: String,
        /// The options inside the group.
        children: Vec<OptionItem<R>>,
    },
}

impl<R> OptionItem<R> {
    /// A string option.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Primitive(OptionValue::Text(s.into()))
    }

    /// A numeric option.
    pub fn number(n: f64) -> Self {
        Self::Primitive(OptionValue::Number(n))
    }

    /// A renderable option without a label.
    pub fn node(node: R) -> Self {
        Self::Node(node)
    }

    /// A renderable option labelled by `key`.
    pub fn keyed(key: impl Into<String>, node: R) -> Self {
        Self::Keyed {
            key: key.into(),
            node,
        }
    }

    /// A named group.
    pub fn group(name: impl Into<String>, children: Vec<Self>) -> Self {
        Self::Group {
            name: name.into(),
            children,
        }
    }

    /// This element's shape. Classification is per element; sibling entries
    /// may differ.
    pub fn kind(&self) -> OptionKind {
        match self {
            Self::Primitive(_) => OptionKind::Primitive,
            Self::Node(_) => OptionKind::Node,
            Self::Keyed { .. } => OptionKind::Keyed,
            Self::Group { .. } => OptionKind::Group,
        }
    }

    /// The display label: the primitive's value, the keyed node's key, or
    /// the group's header. `None` for bare renderables.
    pub fn label(&self) -> Option<String> {
        match self {
            Self::Primitive(v) => Some(v.label()),
            Self::Node(_) => None,
            Self::Keyed { key, .. } => Some(key.clone()),
            Self::Group { name, .. } => Some(name.clone()),
        }
    }

    /// Whether this entry can be chosen. Group headers cannot.
    pub fn is_selectable(&self) -> bool {
        !matches!(self, Self::Group { .. })
    }
}

/// One entry of a flattened option list, in render order.
#[derive(Clone, Debug, PartialEq)]
pub struct FlatEntry<'a, R> {
    /// Index path from the list root to this entry.
    pub path: Vec<usize>,
    /// Nesting depth; top-level entries are 0.
    pub depth: usize,
    /// The entry itself.
    pub item: &'a OptionItem<R>,
}

/// Flatten a nested option list into render order.
///
/// Group headers appear before their children. Paths index into the original
/// nested list, so `resolve(items, &entry.path)` returns `entry.item`.
pub fn flatten<R>(items: &[OptionItem<R>]) -> Vec<FlatEntry<'_, R>> {
    let mut out = Vec::new();
    let mut prefix = Vec::new();
    flatten_into(items, &mut prefix, &mut out);
    out
}

fn flatten_into<'a, R>(
    items: &'a [OptionItem<R>],
    prefix: &mut Vec<usize>,
    out: &mut Vec<FlatEntry<'a, R>>,
) {
    for (i, item) in items.iter().enumerate() {
        prefix.push(i);
        out.push(FlatEntry {
            path: prefix.clone(),
            depth: prefix.len() - 1,
            item,
        });
        if let OptionItem::Group { children, .. } = item {
            flatten_into(children, prefix, out);
        }
        prefix.pop();
    }
}

/// Look up the item at an index path.
///
/// Returns `None` for the empty path, out-of-range indices, and paths that
/// try to descend through a non-group entry.
pub fn resolve<'a, R>(items: &'a [OptionItem<R>], path: &[usize]) -> Option<&'a OptionItem<R>> {
    let (&first, rest) = path.split_first()?;
    let item = items.get(first)?;
    if rest.is_empty() {
        return Some(item);
    }
    match item {
        OptionItem::Group { children, .. } => resolve(children, rest),
        _ => None,
    }
}

/// The keyboard-highlighted position in an option list.
///
/// Stores a path rather than a flat index so the highlight survives list
/// edits that do not touch the highlighted entry. Navigation skips group
/// headers and wraps at the ends. Cleared when the panel closes or a
/// selection is made.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Highlight {
    path: Option<Vec<usize>>,
}

impl Highlight {
    /// No entry highlighted.
    pub fn new() -> Self {
        Self::default()
    }

    /// The highlighted path, if any.
    pub fn current(&self) -> Option<&[usize]> {
        self.path.as_deref()
    }

    /// Highlight a specific path (e.g. on pointer hover over an entry).
    pub fn set(&mut self, path: Vec<usize>) {
        self.path = Some(path);
    }

    /// Remove the highlight.
    pub fn clear(&mut self) {
        self.path = None;
    }

    /// Move to the next selectable entry, wrapping past the end.
    ///
    /// With no current highlight (or a stale one no longer in the list) this
    /// starts at the first selectable entry. Returns the new path, or `None`
    /// when the list has no selectable entries.
    pub fn next<R>(&mut self, items: &[OptionItem<R>]) -> Option<&[usize]> {
        self.step(items, true)
    }

    /// Move to the previous selectable entry, wrapping past the start.
    ///
    /// With no current highlight this starts at the last selectable entry.
    pub fn prev<R>(&mut self, items: &[OptionItem<R>]) -> Option<&[usize]> {
        self.step(items, false)
    }

    fn step<R>(&mut self, items: &[OptionItem<R>], forward: bool) -> Option<&[usize]> {
        let flat = flatten(items);
        let selectable: Vec<&FlatEntry<'_, R>> =
            flat.iter().filter(|e| e.item.is_selectable()).collect();
        if selectable.is_empty() {
            self.path = None;
            return None;
        }
        let here = self
            .path
            .as_deref()
            .and_then(|p| selectable.iter().position(|e| e.path == p));
        let last = selectable.len() - 1;
        let at = match (here, forward) {
            (Some(i), true) => {
                if i == last {
                    0
                } else {
                    i + 1
                }
            }
            (Some(i), false) => {
                if i == 0 {
                    last
                } else {
                    i - 1
                }
            }
            // No (or stale) highlight: enter from the matching end.
            (None, true) => 0,
            (None, false) => last,
        };
        self.path = Some(selectable[at].path.clone());
        self.path.as_deref()
    }
}
