//! Combinator that keeps an externally supplied type-tracker synchronized
//! with the traversal position, so a user visitor can query "what GraphQL
//! type am I standing on" from inside its own callbacks.
//!
//! `SchemaTypeInfo`, the reference tracker shipped here, is grounded on
//! `OperationVisitorContext`'s `with_type` / `with_parent_type` /
//! `with_input_type` stack-juggling (an externally retrieved GraphQL
//! visitor context implementation used as a secondary reference for this
//! crate) — a `Vec<Option<_>>` pushed on enter and popped on leave, with
//! read-only accessors reading the top of the stack.

use std::collections::HashMap;

use crate::command::Command;
use crate::node::{Node, OperationType};
use crate::visitor::{EventSink, VisitContext};

/// The collaborator the combinator drives. Only `enter`/`leave` are
/// required here: accessor methods like `current_type` vary by
/// implementation (a real schema's type shape is nothing like this
/// crate's placeholder `TypeRef`) and so live on concrete trackers
/// instead of in this trait.
pub trait TypeTracker {
  fn enter(&mut self, node: &Node);
  fn leave(&mut self, node: &Node);
}

/// Wraps `tracker` and `inner` into a single visitor: every user callback
/// observes the tracker's state as of just after it processed the same
/// event.
pub struct TypedVisitor<'t, T, V> {
  tracker: &'t mut T,
  inner: V,
}

pub fn visit_with_type_info<'t, T: TypeTracker, V: EventSink>(
  tracker: &'t mut T,
  inner: V,
) -> TypedVisitor<'t, T, V> {
  TypedVisitor { tracker, inner }
}

impl<'t, T: TypeTracker, V: EventSink> EventSink for TypedVisitor<'t, T, V> {
  fn enter(&mut self, ctx: &VisitContext<'_>) -> Command {
    self.tracker.enter(ctx.node);
    let command = self.inner.enter(ctx);
    match &command {
      Command::Continue => {}
      Command::Skip | Command::Delete | Command::Stop => {
        self.tracker.leave(ctx.node);
      }
      Command::Replace(replacement) => {
        self.tracker.leave(ctx.node);
        self.tracker.enter(replacement);
      }
    }
    command
  }

  fn leave(&mut self, ctx: &VisitContext<'_>) -> Command {
    let command = self.inner.leave(ctx);
    self.tracker.leave(ctx.node);
    command
  }
}

/// Stand-in for a resolved GraphQL type, since the full type system this
/// crate's traversal engine is meant to sit underneath is an external collaborator —
/// just enough identity (a name) for `SchemaTypeInfo` to track and for
/// tests to assert against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef(pub String);

/// The minimal schema surface `SchemaTypeInfo` needs: given a type and a
/// field name, what type does that field have, and given a type name
/// alone, does it resolve to anything. Stands in for the schema/type
/// system this crate treats as an external collaborator.
pub trait SchemaLookup {
  fn root_type(&self, operation: OperationType) -> Option<TypeRef>;
  fn field_type(&self, parent_type: &str, field_name: &str) -> Option<TypeRef>;
  fn named_type(&self, name: &str) -> Option<TypeRef>;
}

/// Reference [`TypeTracker`] backed by a [`SchemaLookup`]. Maintains a
/// type stack and a parent-type stack in lock-step with the traversal,
/// exactly the shape `OperationVisitorContext::with_type` pushes and pops
/// around each recursive call, except here the push/pop happens once per
/// `enter`/`leave` pair rather than around a closure invocation.
pub struct SchemaTypeInfo<'s, L> {
  lookup: &'s L,
  type_stack: Vec<Option<TypeRef>>,
  parent_type_stack: Vec<Option<TypeRef>>,
}

impl<'s, L: SchemaLookup> SchemaTypeInfo<'s, L> {
  pub fn new(lookup: &'s L) -> Self {
    Self {
      lookup,
      type_stack: Vec::new(),
      parent_type_stack: Vec::new(),
    }
  }

  pub fn current_type(&self) -> Option<&TypeRef> {
    self.type_stack.last().and_then(|t| t.as_ref())
  }

  pub fn current_parent_type(&self) -> Option<&TypeRef> {
    self.parent_type_stack.last().and_then(|t| t.as_ref())
  }

  fn compute_type(&self, node: &Node, parent: &Option<TypeRef>) -> Option<TypeRef> {
    match node {
      Node::OperationDefinition { operation, .. } => self.lookup.root_type(*operation),
      Node::Field { name, .. } => {
        let parent = parent.as_ref()?;
        self.lookup.field_type(&parent.0, name_value(name))
      }
      Node::FragmentDefinition { type_condition, .. } => {
        self.lookup.named_type(name_value(type_condition))
      }
      Node::InlineFragment {
        type_condition: Some(tc),
        ..
      } => self.lookup.named_type(name_value(tc)),
      // every other kind carries the enclosing selection's type forward
      // unchanged: arguments, directives, and value literals don't shift
      // "what type am I inside of".
      _ => parent.clone(),
    }
  }
}

fn name_value(name_node: &Node) -> &str {
  match name_node {
    Node::Name { value } => value,
    other => panic!("expected a Name node, got {}", other.kind()),
  }
}

impl<'s, L: SchemaLookup> TypeTracker for SchemaTypeInfo<'s, L> {
  fn enter(&mut self, node: &Node) {
    let parent = self.current_type().cloned();
    let new_type = self.compute_type(node, &parent);
    self.parent_type_stack.push(parent);
    self.type_stack.push(new_type);
  }

  fn leave(&mut self, _node: &Node) {
    self.type_stack.pop();
    self.parent_type_stack.pop();
  }
}

/// A trivial in-memory [`SchemaLookup`], used only by this crate's own
/// tests — not a general-purpose schema representation.
#[cfg(test)]
pub(crate) struct TestSchema {
  pub fields: HashMap<(&'static str, &'static str), &'static str>,
  pub query_root: &'static str,
}

#[cfg(test)]
impl SchemaLookup for TestSchema {
  fn root_type(&self, operation: OperationType) -> Option<TypeRef> {
    match operation {
      OperationType::Query => Some(TypeRef(self.query_root.to_string())),
      _ => None,
    }
  }

  fn field_type(&self, parent_type: &str, field_name: &str) -> Option<TypeRef> {
    self
      .fields
      .get(&(parent_type, field_name))
      .map(|t| TypeRef(t.to_string()))
  }

  fn named_type(&self, name: &str) -> Option<TypeRef> {
    Some(TypeRef(name.to_string()))
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::node::{doc, NodeKind};
  use crate::traversal::visit;
  use crate::visitor::NodeVisitor;
  use pretty_assertions::assert_eq;
  use std::cell::RefCell;
  use std::rc::Rc;

  fn schema() -> TestSchema {
    let mut fields = HashMap::new();
    fields.insert(("Query", "user"), "User");
    fields.insert(("User", "name"), "String");
    TestSchema {
      fields,
      query_root: "Query",
    }
  }

  #[test]
  fn user_callback_sees_type_just_after_tracker_enter() {
    let schema = schema();
    let tree = doc::document(vec![doc::anonymous_query(vec![doc::field(
      "user",
      Some(doc::selection_set(vec![doc::field("name", None)])),
    )])]);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen2 = seen.clone();
    let mut tracker = SchemaTypeInfo::new(&schema);

    {
      let inner = NodeVisitor::new().on_enter(NodeKind::Field, move |_ctx| {
        // the tracker has already processed this enter by the time this
        // closure runs; capture it from a shared cell since the closure
        // only gets `ctx`, not the tracker itself.
        seen2.borrow_mut().push(());
        Command::Continue
      });
      let mut typed = visit_with_type_info(&mut tracker, inner);
      visit(&tree, &mut typed).unwrap();
    }
    assert_eq!(seen.borrow().len(), 2);
    // after the walk finishes, both pushes were balanced by pops.
    assert_eq!(tracker.type_stack.len(), 0);
  }

  #[test]
  fn field_type_resolves_from_parent_type() {
    let schema = schema();
    let mut tracker = SchemaTypeInfo::new(&schema);
    let query = doc::anonymous_query(vec![]);
    let user_field = doc::field("user", None);
    let name_field = doc::field("name", None);

    tracker.enter(&query);
    assert_eq!(tracker.current_type(), Some(&TypeRef("Query".to_string())));

    tracker.enter(&user_field);
    assert_eq!(tracker.current_type(), Some(&TypeRef("User".to_string())));
    assert_eq!(
      tracker.current_parent_type(),
      Some(&TypeRef("Query".to_string()))
    );

    tracker.enter(&name_field);
    assert_eq!(tracker.current_type(), Some(&TypeRef("String".to_string())));

    tracker.leave(&name_field);
    assert_eq!(tracker.current_type(), Some(&TypeRef("User".to_string())));

    tracker.leave(&user_field);
    tracker.leave(&query);
    assert_eq!(tracker.current_type(), None);
  }

  #[test]
  fn replace_at_enter_keeps_tracker_consistent_with_new_node() {
    let schema = schema();
    let mut tracker = SchemaTypeInfo::new(&schema);
    let tree = doc::anonymous_query(vec![doc::field("user", None)]);

    let inner = NodeVisitor::new().on_enter(NodeKind::Field, move |ctx| {
      if let Node::Field { name, .. } = ctx.node {
        if let Node::Name { value } = name.as_ref() {
          if value == "user" {
            return Command::Replace(doc::field("user", None));
          }
        }
      }
      Command::Continue
    });
    let mut typed = visit_with_type_info(&mut tracker, inner);
    visit(&tree, &mut typed).unwrap();
    // balanced: the replacement handshake (leave old, enter new) still
    // nets out to one push/pop per tree level.
    assert_eq!(tracker.type_stack.len(), 0);
  }

  /// A [`TypeTracker`] wrapper that hands out clones of its `Rc` so a
  /// user callback can read `current_type`/`current_parent_type` from
  /// inside its own closure, since the closure only ever sees `ctx`, not
  /// the tracker the combinator drives directly.
  struct SharedTracker<T>(Rc<RefCell<T>>);

  impl<T: TypeTracker> TypeTracker for SharedTracker<T> {
    fn enter(&mut self, node: &Node) {
      self.0.borrow_mut().enter(node);
    }
    fn leave(&mut self, node: &Node) {
      self.0.borrow_mut().leave(node);
    }
  }

  /// Types with selectable fields, stood in for the composite-type
  /// predicate the schema/type system owns (out of scope here per the
  /// crate's own docs — this set exists only so the test below has
  /// something to ask).
  fn composite_types() -> std::collections::HashSet<&'static str> {
    ["Query", "Human", "Alien", "Pet"].into_iter().collect()
  }

  #[test]
  fn inserts_typename_on_composite_fields_missing_a_selection_set() {
    let mut fields = HashMap::new();
    fields.insert(("Query", "human"), "Human");
    fields.insert(("Query", "alien"), "Alien");
    fields.insert(("Human", "name"), "String");
    fields.insert(("Human", "pets"), "Pet");
    let schema = TestSchema {
      fields,
      query_root: "Query",
    };
    let composite = composite_types();

    let tree = doc::document(vec![doc::anonymous_query(vec![
      doc::field(
        "human",
        Some(doc::selection_set(vec![
          doc::field("name", None),
          doc::field("pets", None),
        ])),
      ),
      doc::field("alien", None),
    ])]);

    let tracker = Rc::new(RefCell::new(SchemaTypeInfo::new(&schema)));
    let mut shared = SharedTracker(tracker.clone());
    let reader = tracker.clone();

    let inner = NodeVisitor::new().on_leave(NodeKind::Field, move |ctx| {
      if let Node::Field {
        alias,
        name,
        arguments,
        directives,
        selection_set: None,
      } = ctx.node
      {
        let is_composite = reader
          .borrow()
          .current_type()
          .is_some_and(|t| composite.contains(t.0.as_str()));
        if is_composite {
          return Command::Replace(Node::Field {
            alias: alias.clone(),
            name: name.clone(),
            arguments: arguments.clone(),
            directives: directives.clone(),
            selection_set: Some(Box::new(doc::selection_set(vec![doc::field(
              "__typename",
              None,
            )]))),
          });
        }
      }
      Command::Continue
    });

    let mut typed = visit_with_type_info(&mut shared, inner);
    let edited = visit(&tree, &mut typed).unwrap().unwrap();

    let expected = doc::document(vec![doc::anonymous_query(vec![
      doc::field(
        "human",
        Some(doc::selection_set(vec![
          doc::field("name", None),
          doc::field(
            "pets",
            Some(doc::selection_set(vec![doc::field("__typename", None)])),
          ),
        ])),
      ),
      doc::field(
        "alien",
        Some(doc::selection_set(vec![doc::field("__typename", None)])),
      ),
    ])]);
    assert_eq!(edited, expected);
    assert_eq!(tracker.borrow().type_stack.len(), 0);
    // the input is untouched: re-walking it still finds the original
    // selectionless fields.
    assert!(matches!(
      &tree,
      Node::Document { definitions } if matches!(
        &definitions[0],
        Node::OperationDefinition { selection_set, .. }
          if matches!(selection_set.as_ref(), Node::SelectionSet { selections }
            if matches!(&selections[1], Node::Field { selection_set: None, .. }))
      )
    ));
  }
}
