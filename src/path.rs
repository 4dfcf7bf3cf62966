//! Path and ancestor bookkeeping that the traversal engine hands to every
//! enter/leave callback.
//!
//! A [`Path`] alternates between node-level and sequence-level keys exactly
//! the way the reference GraphQL visitor's `path` array does: descending
//! into a sequence slot pushes the slot name once, then an index per
//! element. [`Ancestor`] mirrors that shape one level up, but trails one
//! entry behind: the outermost frame is never exposed to a callback, so
//! `ancestors.len() == path.len() - 1` holds at every event below the root
//! (where both are empty). See `traversal::visible_ancestors` for where
//! that frame gets dropped.

use smallvec::SmallVec;

use crate::node::Node;

/// One step of a [`Path`]: either the name of a single-child or
/// sequence-bearing slot, or the index of an element within a sequence
/// that's currently being walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
  Slot(&'static str),
  Index(usize),
}

/// An ordered list of [`Key`]s from the root to the node a callback was
/// just invoked for. Kept as a `SmallVec` since most GraphQL documents
/// nest only a handful of levels deep and a heap allocation per step would
/// dominate traversal cost otherwise.
pub type Path = SmallVec<[Key; 8]>;

/// One entry of the `ancestors` list passed to every callback: either a
/// node proper, or the sequence it currently sits inside of (before the
/// index key that selects one of its elements). Snapshots are taken before
/// any edit at that level is applied, so a callback always sees the tree
/// as it existed on the way down, never a partially materialized rewrite.
#[derive(Debug, Clone, PartialEq)]
pub enum Ancestor {
  Node(Node),
  Sequence(Vec<Node>),
}
