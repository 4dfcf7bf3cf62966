//! Error taxonomy for this crate. Each module that can fail gets its own
//! small `thiserror` enum rather than one crate-wide catch-all — the same
//! shape `ast-grep-core` uses for `KindMatcherError`, `PatternError`, and
//! friends (see `matcher/kind.rs`, `matcher/pattern.rs`).

use thiserror::Error;

use crate::path::Path;

/// Errors the traversal engine and node registry can produce.
///
/// `MalformedNode` is reachable through ordinary traversal: deleting the
/// sole child backing a required slot (e.g. a `Field`'s `name`) makes
/// [`crate::node::Node::with_slot`] fail when `visit_children` rebuilds the
/// parent, and that failure surfaces here with the path of the node being
/// rebuilt.
///
/// `InvalidEdit` is unreachable through this crate's public API today: the
/// only way to hand the engine an edit is [`crate::command::Command`],
/// whose `Replace` variant carries an already-constructed [`crate::node::Node`],
/// so there is no way to smuggle in a malformed one at that point. It stays
/// part of the taxonomy because [`crate::node::Node::from_slots`] can
/// still be asked (directly, outside a visit) to build a node whose required
/// slot is missing, which a future public constructor could route through
/// an edit — removing the variant now would be a breaking change for no
/// present benefit.
#[derive(Debug, Error, PartialEq, Clone)]
pub enum VisitError {
  #[error("malformed node at {path:?}: {reason}")]
  MalformedNode { path: Path, reason: String },

  #[error("invalid edit at {path:?}")]
  InvalidEdit { path: Path },
}
