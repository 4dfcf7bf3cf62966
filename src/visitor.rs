//! The callback registry that the traversal engine drives.
//!
//! `ast-grep-core`'s `Visitor<M, A>` (see `traversal.rs` there) is a fluent
//! builder around a single matcher plus a couple of boolean knobs
//! (`reentrant`, `named_only`). This crate's `NodeVisitor` is the same kind
//! of builder, generalized to a table of per-kind callbacks instead of one
//! matcher, since a GraphQL AST visitor needs different behavior for
//! `Field` than for `Directive`.

use std::collections::HashMap;

use crate::command::Command;
use crate::node::{Node, NodeKind};
use crate::path::{Ancestor, Key, Path};

/// Everything an enter/leave callback is given about where it is in the
/// tree. Borrowed rather than owned: callbacks decide what to keep (most
/// don't need to keep anything).
pub struct VisitContext<'a> {
  pub node: &'a Node,
  pub key: Option<Key>,
  pub parent: Option<&'a Ancestor>,
  pub path: &'a Path,
  pub ancestors: &'a [Ancestor],
}

/// The trait the traversal engine is generic over. [`NodeVisitor`],
/// [`crate::parallel::ParallelVisitor`], and [`crate::type_info::TypedVisitor`]
/// all implement it, so `visit` can drive any of them identically and the
/// two combinators can wrap a plain `NodeVisitor` or one another.
pub trait EventSink {
  fn enter(&mut self, ctx: &VisitContext<'_>) -> Command;
  fn leave(&mut self, ctx: &VisitContext<'_>) -> Command;
}

type Callback<'v> = Box<dyn FnMut(&VisitContext<'_>) -> Command + 'v>;

/// A table of enter/leave callbacks, keyed by node kind, with an optional
/// wildcard fallback for kinds that have no specific entry.
#[derive(Default)]
pub struct NodeVisitor<'v> {
  enter_by_kind: HashMap<NodeKind, Callback<'v>>,
  leave_by_kind: HashMap<NodeKind, Callback<'v>>,
  enter_any: Option<Callback<'v>>,
  leave_any: Option<Callback<'v>>,
}

impl<'v> NodeVisitor<'v> {
  pub fn new() -> Self {
    Self {
      enter_by_kind: HashMap::new(),
      leave_by_kind: HashMap::new(),
      enter_any: None,
      leave_any: None,
    }
  }

  /// Register a callback run on `enter` for exactly one node kind. A
  /// kind-specific callback always takes precedence over the wildcard
  /// registered with [`NodeVisitor::on_enter_any`], and the last call for
  /// a given kind wins, the same "last registration wins" rule
  /// `ast-grep-core`'s builder methods follow for its own knobs.
  pub fn on_enter<F>(mut self, kind: NodeKind, f: F) -> Self
  where
    F: FnMut(&VisitContext<'_>) -> Command + 'v,
  {
    self.enter_by_kind.insert(kind, Box::new(f));
    self
  }

  pub fn on_leave<F>(mut self, kind: NodeKind, f: F) -> Self
  where
    F: FnMut(&VisitContext<'_>) -> Command + 'v,
  {
    self.leave_by_kind.insert(kind, Box::new(f));
    self
  }

  /// Register a fallback run on `enter` for any kind without its own
  /// callback.
  pub fn on_enter_any<F>(mut self, f: F) -> Self
  where
    F: FnMut(&VisitContext<'_>) -> Command + 'v,
  {
    self.enter_any = Some(Box::new(f));
    self
  }

  pub fn on_leave_any<F>(mut self, f: F) -> Self
  where
    F: FnMut(&VisitContext<'_>) -> Command + 'v,
  {
    self.leave_any = Some(Box::new(f));
    self
  }
}

impl<'v> EventSink for NodeVisitor<'v> {
  fn enter(&mut self, ctx: &VisitContext<'_>) -> Command {
    if let Some(f) = self.enter_by_kind.get_mut(&ctx.node.kind()) {
      return f(ctx);
    }
    if let Some(f) = &mut self.enter_any {
      return f(ctx);
    }
    Command::Continue
  }

  fn leave(&mut self, ctx: &VisitContext<'_>) -> Command {
    if let Some(f) = self.leave_by_kind.get_mut(&ctx.node.kind()) {
      return f(ctx);
    }
    if let Some(f) = &mut self.leave_any {
      return f(ctx);
    }
    Command::Continue
  }
}
