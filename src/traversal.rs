//! The visitor driver: walks a [`Node`] tree, dispatching enter/leave
//! events through an [`EventSink`], and rebuilds only the spine from root
//! to each edit site.
//!
//! `ast-grep-core`'s `traversal.rs` drives an iterative, `TreeCursor`-based
//! walk because `tree_sitter::Node` has no owned recursive form to
//! recurse over directly. This crate's `Node` is a plain owned enum, so a
//! straightforward recursive walk is both simpler and the more idiomatic
//! choice here — the same way the reference GraphQL visitor itself walks
//! recursively over a parsed document. Path/ancestors bookkeeping,
//! skip/stop/delete/replace handling, and copy-on-write materialization are
//! this crate's own addition on top of that shape.

use crate::command::Command;
use crate::error::VisitError;
use crate::node::{Node, SlotArity, SlotValue};
use crate::path::{Ancestor, Key, Path};
use crate::visitor::{EventSink, VisitContext};

/// Walk `root`, depth-first, dispatching `enter`/`leave` through `sink`.
///
/// Returns the edited tree. `None` only if the root itself was deleted
/// (implementation-defined per node construction rules; see
/// [`Node::from_slots`] for why a root
/// `Delete` has no parent slot to vanish from and is instead surfaced this
/// way rather than as an error). On `Stop`, returns a clone of the
/// original, untouched `root` — no edit made before the stop survives.
///
/// `root` is borrowed, never consumed: the caller keeps their original
/// tree and can compare it against the return value afterward.
pub fn visit<S: EventSink>(root: &Node, sink: &mut S) -> Result<Option<Node>, VisitError> {
  let mut state = State {
    sink,
    path: Path::new(),
    ancestors: Vec::new(),
    stopped: false,
  };
  let outcome = visit_node(&mut state, root, None)?;
  if state.stopped {
    return Ok(Some(root.clone()));
  }
  Ok(match outcome {
    Outcome::Kept(n) => Some(n),
    Outcome::Deleted => None,
  })
}

struct State<'s, S> {
  sink: &'s mut S,
  path: Path,
  ancestors: Vec<Ancestor>,
  stopped: bool,
}

enum Outcome {
  Kept(Node),
  Deleted,
}

/// `state.ancestors` is pushed to in lockstep with `state.path` (one entry
/// per key, so the two grow and shrink together internally) — but the
/// outermost frame, the one recorded on the way out of the root's own
/// slots, never gets shown to a callback: it would otherwise put an
/// ancestor on the stack that has no path key of its own pointing back to
/// it (the root's path is `[]`). Dropping it is what makes
/// `ancestors.len() == path.len() - 1` hold at every non-root event.
fn visible_ancestors(ancestors: &[Ancestor]) -> &[Ancestor] {
  ancestors.get(1..).unwrap_or(&[])
}

fn visit_node<S: EventSink>(
  state: &mut State<'_, S>,
  node: &Node,
  key: Option<Key>,
) -> Result<Outcome, VisitError> {
  if state.stopped {
    return Ok(Outcome::Kept(node.clone()));
  }

  let ctx = VisitContext {
    node,
    key,
    parent: state.ancestors.last(),
    path: &state.path,
    ancestors: visible_ancestors(&state.ancestors),
  };
  let command = state.sink.enter(&ctx);

  let current = match command {
    Command::Continue => node.clone(),
    Command::Skip => return Ok(Outcome::Kept(node.clone())),
    Command::Delete => return Ok(Outcome::Deleted),
    Command::Stop => {
      state.stopped = true;
      return Ok(Outcome::Kept(node.clone()));
    }
    Command::Replace(replacement) => replacement,
  };

  let descended = visit_children(state, &current)?;
  if state.stopped {
    return Ok(Outcome::Kept(descended));
  }

  let ctx = VisitContext {
    node: &descended,
    key,
    parent: state.ancestors.last(),
    path: &state.path,
    ancestors: visible_ancestors(&state.ancestors),
  };
  match state.sink.leave(&ctx) {
    Command::Continue | Command::Skip => Ok(Outcome::Kept(descended)),
    Command::Delete => Ok(Outcome::Deleted),
    Command::Stop => {
      state.stopped = true;
      Ok(Outcome::Kept(descended))
    }
    Command::Replace(replacement) => Ok(Outcome::Kept(replacement)),
  }
}

/// Walk every child slot of `node` in its advertised visit order, and
/// rebuild `node` only if at least one slot came back changed — a sparse
/// "edit buffer, materialize at the end" discipline, expressed here as a
/// patch list rather than a map (slot names are already unique per node
/// kind).
fn visit_children<S: EventSink>(
  state: &mut State<'_, S>,
  node: &Node,
) -> Result<Node, VisitError> {
  let mut patches: Vec<(&'static str, SlotValue)> = Vec::new();

  for slot in node.visit_order() {
    match slot.arity {
      SlotArity::Single => {
        let SlotValue::Single(original) = node.slot(slot.name) else {
          unreachable!("registry arity mismatch for `{}`", slot.name)
        };
        let Some(child) = original.clone() else {
          continue;
        };

        state.path.push(Key::Slot(slot.name));
        state.ancestors.push(Ancestor::Node(node.clone()));
        let outcome = visit_node(state, &child, Some(Key::Slot(slot.name)))?;
        state.ancestors.pop();
        state.path.pop();

        let new_value = match outcome {
          Outcome::Kept(n) => Some(n),
          Outcome::Deleted => None,
        };
        if new_value != original {
          patches.push((slot.name, SlotValue::Single(new_value)));
        }
      }
      SlotArity::Sequence => {
        let SlotValue::Sequence(original) = node.slot(slot.name) else {
          unreachable!("registry arity mismatch for `{}`", slot.name)
        };

        state.path.push(Key::Slot(slot.name));
        state.ancestors.push(Ancestor::Node(node.clone()));

        let mut rebuilt = Vec::with_capacity(original.len());
        for (index, child) in original.iter().enumerate() {
          state.path.push(Key::Index(index));
          state.ancestors.push(Ancestor::Sequence(original.clone()));
          let outcome = visit_node(state, child, Some(Key::Index(index)))?;
          state.ancestors.pop();
          state.path.pop();

          match outcome {
            Outcome::Kept(n) => rebuilt.push(n),
            Outcome::Deleted => {}
          }
          if state.stopped {
            break;
          }
        }

        state.ancestors.pop();
        state.path.pop();

        if rebuilt != original {
          patches.push((slot.name, SlotValue::Sequence(rebuilt)));
        }
      }
    }
    if state.stopped {
      break;
    }
  }

  if patches.is_empty() {
    return Ok(node.clone());
  }
  let mut rebuilt = node.clone();
  for (name, value) in patches {
    rebuilt = rebuilt
      .with_slot(name, value)
      .map_err(|reason| VisitError::MalformedNode {
        path: state.path.clone(),
        reason,
      })?;
  }
  Ok(rebuilt)
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::command::Command;
  use crate::node::doc;
  use crate::node::NodeKind;
  use crate::visitor::NodeVisitor;
  use pretty_assertions::assert_eq;

  fn names_seen(tree: &Node) -> Vec<String> {
    let mut seen = Vec::new();
    let mut visitor = NodeVisitor::new().on_enter(NodeKind::Name, |ctx| {
      if let Node::Name { value } = ctx.node {
        seen.push(value.clone());
      }
      Command::Continue
    });
    visit(tree, &mut visitor).unwrap();
    seen
  }

  #[test]
  fn untouched_tree_round_trips_structurally() {
    let tree = doc::document(vec![doc::anonymous_query(vec![
      doc::field("a", None),
      doc::field("b", None),
    ])]);
    let mut visitor = NodeVisitor::new();
    let result = visit(&tree, &mut visitor).unwrap().unwrap();
    assert_eq!(result, tree);
  }

  #[test]
  fn enter_order_matches_visit_order() {
    let tree = doc::document(vec![doc::anonymous_query(vec![
      doc::field("a", None),
      doc::field("b", None),
    ])]);
    assert_eq!(names_seen(&tree), vec!["a".to_string(), "b".to_string()]);
  }

  #[test]
  fn replace_at_enter_substitutes_subtree_and_descends_into_it() {
    let tree = doc::document(vec![doc::anonymous_query(vec![doc::field("a", None)])]);
    let mut entered_replacement = false;
    let mut visitor = NodeVisitor::new().on_enter(NodeKind::Field, |ctx| {
      if let Node::Field { name, .. } = ctx.node {
        if let Node::Name { value } = name.as_ref() {
          if value == "a" {
            return Command::Replace(doc::field("renamed", None));
          }
        }
      }
      Command::Continue
    });
    let mut seen_names = Vec::new();
    // second pass shows the replacement's own children were walked
    let result = visit(&tree, &mut visitor).unwrap().unwrap();
    let mut check = NodeVisitor::new().on_enter(NodeKind::Name, |ctx| {
      if let Node::Name { value } = ctx.node {
        seen_names.push(value.clone());
        if value == "renamed" {
          entered_replacement = true;
        }
      }
      Command::Continue
    });
    visit(&result, &mut check).unwrap();
    assert!(entered_replacement);
    assert_eq!(seen_names, vec!["renamed".to_string()]);
  }

  #[test]
  fn delete_removes_node_from_sequence() {
    let tree = doc::document(vec![doc::anonymous_query(vec![
      doc::field("a", None),
      doc::field("b", None),
    ])]);
    let mut visitor = NodeVisitor::new().on_enter(NodeKind::Field, |ctx| {
      if let Node::Field { name, .. } = ctx.node {
        if let Node::Name { value } = name.as_ref() {
          if value == "b" {
            return Command::Delete;
          }
        }
      }
      Command::Continue
    });
    let result = visit(&tree, &mut visitor).unwrap().unwrap();
    assert_eq!(names_seen(&result), vec!["a".to_string()]);
  }

  #[test]
  fn skip_does_not_descend_and_does_not_fire_leave() {
    let tree = doc::document(vec![doc::anonymous_query(vec![doc::field(
      "a",
      Some(doc::selection_set(vec![doc::field("nested", None)])),
    )])]);
    let mut left_field = false;
    let mut visitor = NodeVisitor::new()
      .on_enter(NodeKind::Field, |_ctx| Command::Skip)
      .on_leave(NodeKind::Field, |_ctx| {
        left_field = true;
        Command::Continue
      });
    assert_eq!(names_seen(&tree), vec!["a".to_string(), "nested".to_string()]);
    visit(&tree, &mut visitor).unwrap();
    assert!(!left_field);
  }

  #[test]
  fn stop_discards_edits_and_returns_original_tree() {
    let tree = doc::document(vec![doc::anonymous_query(vec![
      doc::field("a", None),
      doc::field("b", None),
    ])]);
    let mut visitor = NodeVisitor::new().on_enter(NodeKind::Field, |ctx| {
      if let Node::Field { name, .. } = ctx.node {
        if let Node::Name { value } = name.as_ref() {
          if value == "a" {
            return Command::Replace(doc::field("should-not-appear", None));
          }
          if value == "b" {
            return Command::Stop;
          }
        }
      }
      Command::Continue
    });
    let result = visit(&tree, &mut visitor).unwrap().unwrap();
    assert_eq!(result, tree);
  }

  #[test]
  fn path_and_ancestors_invariant_holds_at_every_event() {
    // `ancestors` trails `path` by exactly one entry at every event: the
    // root's own event sees both empty, and every event below it sees one
    // fewer ancestor than path key, since the outermost frame never gets a
    // path key pointing back to it.
    let tree = doc::document(vec![doc::anonymous_query(vec![doc::field("a", None)])]);
    let mut violations = 0;
    let mut visitor = NodeVisitor::new().on_enter_any(|ctx| {
      if ctx.ancestors.len() != ctx.path.len().saturating_sub(1) {
        violations += 1;
      }
      if let (Some(last), Some(key)) = (ctx.path.last(), ctx.key.as_ref()) {
        if last != key {
          violations += 1;
        }
      }
      Command::Continue
    });
    visit(&tree, &mut visitor).unwrap();
    assert_eq!(violations, 0);
  }

  #[test]
  fn delete_at_root_returns_none() {
    let tree = doc::document(vec![]);
    let mut visitor = NodeVisitor::new().on_enter(NodeKind::Document, |_ctx| Command::Delete);
    assert_eq!(visit(&tree, &mut visitor).unwrap(), None);
  }

  #[test]
  fn empty_visitor_is_the_identity() {
    let tree = doc::document(vec![doc::anonymous_query(vec![
      doc::field("a", Some(doc::selection_set(vec![doc::field("nested", None)]))),
      doc::field("b", None),
    ])]);
    let mut visitor = NodeVisitor::new();
    let result = visit(&tree, &mut visitor).unwrap().unwrap();
    assert_eq!(result, tree);
  }
}
