//! Combinator that runs several visitors in lock-step over one traversal,
//! each with its own independent skip/stop state.
//!
//! Grounded the way `ast-grep-core` grounds its own traversal knobs: a
//! small per-item state scalar (`SubVisitorState`) stored in a plain `Vec`
//! rather than anything shared or locked, since the whole engine is
//! single-threaded — there is nothing to lock.

use crate::command::Command;
use crate::path::Path;
use crate::visitor::{EventSink, VisitContext};

/// One sub-visitor's progress through the walk.
#[derive(Debug, Clone, PartialEq)]
enum SubVisitorState {
  Active,
  /// Suspended for the subtree rooted at the node whose full path is
  /// recorded here. A bare depth isn't enough to identify the node: two
  /// siblings can sit at the same depth, and only the exact path tells
  /// them apart.
  SuspendedAt(Path),
  Stopped,
}

/// A visitor that multiplexes `k` independently-stateful sub-visitors over
/// a single traversal. Implements [`EventSink`] so the traversal engine
/// drives it exactly like any other visitor.
pub struct ParallelVisitor<'v> {
  sub_visitors: Vec<Box<dyn EventSink + 'v>>,
  states: Vec<SubVisitorState>,
}

/// Combine a vector of visitors into one that advances them all in
/// lock-step, honoring each sub-visitor's own skip/stop decisions
/// independently of the others.
pub fn visit_in_parallel<'v>(visitors: Vec<Box<dyn EventSink + 'v>>) -> ParallelVisitor<'v> {
  let states = vec![SubVisitorState::Active; visitors.len()];
  ParallelVisitor {
    sub_visitors: visitors,
    states,
  }
}

#[derive(Clone, Copy, PartialEq)]
enum Phase {
  Enter,
  Leave,
}

impl<'v> ParallelVisitor<'v> {
  fn dispatch<F>(&mut self, ctx: &VisitContext<'_>, phase: Phase, mut call: F) -> Command
  where
    F: FnMut(&mut dyn EventSink, &VisitContext<'_>) -> Command,
  {
    // Resume pass: every suspended sub-visitor whose suspension matches
    // this node gets reactivated here, regardless of what any other
    // sub-visitor does below. Folding this into the call loop instead
    // would let an earlier sub-visitor's Delete/Replace return before a
    // later one's matching resume ever runs, stranding it in
    // `SuspendedAt` for the rest of the walk. The resuming event itself
    // is still not delivered — `just_resumed` keeps it out of the call
    // loop for this one event, same as the old inline check did.
    let mut just_resumed = vec![false; self.states.len()];
    for (i, state) in self.states.iter_mut().enumerate() {
      if let SubVisitorState::SuspendedAt(suspended_path) = state {
        if *suspended_path == *ctx.path {
          *state = SubVisitorState::Active;
          just_resumed[i] = true;
        }
      }
    }

    for i in 0..self.sub_visitors.len() {
      if just_resumed[i] || !matches!(self.states[i], SubVisitorState::Active) {
        continue;
      }

      let command = call(self.sub_visitors[i].as_mut(), ctx);
      match command {
        // `Skip` has no effect when returned from `leave`: the node is
        // already past, so suspending on its (about-to-be-popped) path
        // would never find a matching leave to resume on.
        Command::Continue | Command::Skip if phase == Phase::Leave => {}
        Command::Continue => {}
        Command::Skip => {
          self.states[i] = SubVisitorState::SuspendedAt(ctx.path.clone());
        }
        Command::Stop => {
          self.states[i] = SubVisitorState::Stopped;
        }
        Command::Delete | Command::Replace(_) => {
          // first winner: suspend every later sub-visitor for this node
          // so it receives neither this event's descendants nor the
          // matching leave, the same treatment a Skip gets.
          if phase == Phase::Enter {
            for later in &mut self.states[(i + 1)..] {
              if matches!(later, SubVisitorState::Active) {
                *later = SubVisitorState::SuspendedAt(ctx.path.clone());
              }
            }
          }
          return command;
        }
      }
    }

    if self
      .states
      .iter()
      .all(|s| matches!(s, SubVisitorState::Stopped))
    {
      Command::Stop
    } else {
      Command::Continue
    }
  }
}

impl<'v> EventSink for ParallelVisitor<'v> {
  fn enter(&mut self, ctx: &VisitContext<'_>) -> Command {
    self.dispatch(ctx, Phase::Enter, |sink, ctx| sink.enter(ctx))
  }

  fn leave(&mut self, ctx: &VisitContext<'_>) -> Command {
    self.dispatch(ctx, Phase::Leave, |sink, ctx| sink.leave(ctx))
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::node::{doc, Node, NodeKind};
  use crate::traversal::visit;
  use crate::visitor::NodeVisitor;
  use pretty_assertions::assert_eq;
  use std::cell::RefCell;
  use std::rc::Rc;

  fn field_name(ctx: &VisitContext<'_>) -> Option<String> {
    if let Node::Field { name, .. } = ctx.node {
      if let Node::Name { value } = name.as_ref() {
        return Some(value.clone());
      }
    }
    None
  }

  #[test]
  fn independent_skips_do_not_affect_the_other_visitor() {
    let tree = doc::document(vec![doc::anonymous_query(vec![
      doc::field("a", Some(doc::selection_set(vec![doc::field("x", None)]))),
      doc::field("b", Some(doc::selection_set(vec![doc::field("y", None)]))),
    ])]);

    let seen1 = Rc::new(RefCell::new(Vec::new()));
    let seen2 = Rc::new(RefCell::new(Vec::new()));
    let s1 = seen1.clone();
    let s2 = seen2.clone();

    let v1 = NodeVisitor::new().on_enter(NodeKind::Field, move |ctx| {
      if let Some(n) = field_name(ctx) {
        s1.borrow_mut().push(n.clone());
        if n == "a" {
          return Command::Skip;
        }
      }
      Command::Continue
    });
    let v2 = NodeVisitor::new().on_enter(NodeKind::Field, move |ctx| {
      if let Some(n) = field_name(ctx) {
        s2.borrow_mut().push(n.clone());
        if n == "b" {
          return Command::Skip;
        }
      }
      Command::Continue
    });

    let mut combined = visit_in_parallel(vec![Box::new(v1), Box::new(v2)]);
    visit(&tree, &mut combined).unwrap();

    assert_eq!(*seen1.borrow(), vec!["a", "b"]);
    assert_eq!(*seen2.borrow(), vec!["a", "b"]);
  }

  #[test]
  fn stopped_visitor_is_retired_but_others_continue() {
    let tree = doc::document(vec![doc::anonymous_query(vec![
      doc::field("a", None),
      doc::field("b", None),
    ])]);

    let seen1 = Rc::new(RefCell::new(Vec::new()));
    let seen2 = Rc::new(RefCell::new(Vec::new()));
    let s1 = seen1.clone();
    let s2 = seen2.clone();

    let v1 = NodeVisitor::new().on_enter(NodeKind::Field, move |ctx| {
      if let Some(n) = field_name(ctx) {
        s1.borrow_mut().push(n.clone());
        if n == "a" {
          return Command::Stop;
        }
      }
      Command::Continue
    });
    let v2 = NodeVisitor::new().on_enter(NodeKind::Field, move |ctx| {
      if let Some(n) = field_name(ctx) {
        s2.borrow_mut().push(n);
      }
      Command::Continue
    });

    let mut combined = visit_in_parallel(vec![Box::new(v1), Box::new(v2)]);
    let result = visit(&tree, &mut combined).unwrap().unwrap();

    assert_eq!(*seen1.borrow(), vec!["a"]);
    assert_eq!(*seen2.borrow(), vec!["a", "b"]);
    // the combined command is only Stop once every sub-visitor has
    // stopped, so v2 kept the walk going and nothing was discarded.
    assert_eq!(result, tree);
  }

  #[test]
  fn first_delete_or_replace_wins_and_later_visitors_are_skipped_for_that_node() {
    let tree = doc::document(vec![doc::anonymous_query(vec![doc::field(
      "a",
      Some(doc::selection_set(vec![doc::field("inner", None)])),
    )])]);

    let seen2 = Rc::new(RefCell::new(Vec::new()));
    let s2 = seen2.clone();

    // v1 deletes Field `a` outright; v2 would replace it if it ever saw it.
    let v1 = NodeVisitor::new().on_enter(NodeKind::Field, |ctx| {
      if field_name(ctx).as_deref() == Some("a") {
        return Command::Delete;
      }
      Command::Continue
    });
    let v2 = NodeVisitor::new().on_enter(NodeKind::Field, move |ctx| {
      if let Some(n) = field_name(ctx) {
        s2.borrow_mut().push(n);
      }
      Command::Continue
    });

    let mut combined = visit_in_parallel(vec![Box::new(v1), Box::new(v2)]);
    let result = visit(&tree, &mut combined).unwrap().unwrap();

    // v1's Delete won the race: the field and its subtree are gone, and
    // v2 never got a chance to see `a` or descend into it.
    assert!(seen2.borrow().is_empty());
    assert_eq!(result, doc::document(vec![doc::anonymous_query(vec![])]));
  }

  #[test]
  fn suspended_visitor_resumes_even_when_an_earlier_visitor_wins_the_same_leave() {
    // v2 (later index) skips field `a` on enter, so it's
    // SuspendedAt(path of `a`) through the rest of that field's subtree.
    // v1 (earlier index) is untouched on enter but deletes field `a` on
    // leave — exactly the event at which v2's suspension should resolve.
    // If the resume check only ran for sub-visitors the dispatch loop
    // reaches before a winner short-circuits, v2 would stay
    // SuspendedAt(path of `a`) forever and never see field `b`.
    let tree = doc::document(vec![doc::anonymous_query(vec![
      doc::field("a", None),
      doc::field("b", None),
    ])]);

    let seen2 = Rc::new(RefCell::new(Vec::new()));
    let s2 = seen2.clone();

    let v1 = NodeVisitor::new().on_leave(NodeKind::Field, |ctx| {
      if field_name(ctx).as_deref() == Some("a") {
        return Command::Delete;
      }
      Command::Continue
    });
    let v2 = NodeVisitor::new()
      .on_enter(NodeKind::Field, move |ctx| {
        if field_name(ctx).as_deref() == Some("a") {
          return Command::Skip;
        }
        Command::Continue
      })
      .on_leave(NodeKind::Field, move |ctx| {
        if let Some(n) = field_name(ctx) {
          s2.borrow_mut().push(n);
        }
        Command::Continue
      });

    let mut combined = visit_in_parallel(vec![Box::new(v1), Box::new(v2)]);
    let result = visit(&tree, &mut combined).unwrap().unwrap();

    assert_eq!(*seen2.borrow(), vec!["b"]);
    assert_eq!(
      result,
      doc::document(vec![doc::anonymous_query(vec![doc::field("b", None)])])
    );
  }
}
