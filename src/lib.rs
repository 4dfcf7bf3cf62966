/*!
A copy-on-write AST visitor engine for a GraphQL-like document tree.

[`Node`] is a closed enum covering every kind a parsed GraphQL document or
schema-definition-language file can produce. [`traversal::visit`] walks a
tree depth-first, invoking a [`visitor::EventSink`] at the entry and exit
of every node, and rebuilds only the spine from the root down to wherever
a callback asked for an edit — everything else comes back unchanged. Two
combinators compose with the same trait: [`parallel::visit_in_parallel`]
multiplexes several visitors over one walk, each with independent
skip/stop state, and [`type_info::visit_with_type_info`] keeps a
schema-derived type tracker synchronized with the traversal position.

```
use graphql_visit::command::Command;
use graphql_visit::node::{Node, NodeKind, OperationType};
use graphql_visit::traversal::visit;
use graphql_visit::visitor::NodeVisitor;

let tree = Node::Document {
    definitions: vec![Node::OperationDefinition {
        operation: OperationType::Query,
        name: None,
        variable_definitions: vec![],
        directives: vec![],
        selection_set: Box::new(Node::SelectionSet {
            selections: vec![Node::Field {
                alias: None,
                name: Box::new(Node::Name { value: "a".into() }),
                arguments: vec![],
                directives: vec![],
                selection_set: None,
            }],
        }),
    }],
};

let mut renamed = Vec::new();
let mut visitor = NodeVisitor::new().on_enter(NodeKind::Name, |ctx| {
    renamed.push(ctx.node.clone());
    Command::Continue
});
let edited = visit(&tree, &mut visitor).unwrap().unwrap();
assert_eq!(edited, tree);
assert_eq!(renamed.len(), 1);
```
*/

pub mod command;
pub mod error;
pub mod node;
pub mod parallel;
pub mod path;
pub mod traversal;
pub mod type_info;
pub mod visitor;

pub use command::Command;
pub use error::VisitError;
pub use node::{Node, NodeKind};
pub use parallel::{visit_in_parallel, ParallelVisitor};
pub use path::{Ancestor, Key, Path};
pub use traversal::visit;
pub use type_info::{visit_with_type_info, SchemaLookup, SchemaTypeInfo, TypeTracker};
pub use visitor::{EventSink, NodeVisitor, VisitContext};
