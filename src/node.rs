//! The closed set of GraphQL-like AST node kinds and the slot registry that
//! the traversal engine consults to enumerate children and rebuild edited
//! nodes of the same kind.
//!
//! Unlike a tree-sitter-backed tree, `Node` is a plain owned Rust enum: there
//! is no external parser or arena here (see crate docs), so every child is
//! either a boxed single node, an optional boxed single node, or a `Vec` of
//! nodes. `Node` is `Clone` so the traversal engine can snapshot ancestor
//! frames without aliasing the caller's tree.

use std::collections::HashMap;
use std::fmt;

use crate::error::VisitError;
use crate::path::Path;

/// Which of the three operation shapes an [`Node::OperationDefinition`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
  Query,
  Mutation,
  Subscription,
}

impl OperationType {
  pub fn as_str(&self) -> &'static str {
    match self {
      OperationType::Query => "query",
      OperationType::Mutation => "mutation",
      OperationType::Subscription => "subscription",
    }
  }
}

/// The closed set of node variants this engine knows how to walk.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
  Document {
    definitions: Vec<Node>,
  },
  OperationDefinition {
    operation: OperationType,
    name: Option<Box<Node>>,
    variable_definitions: Vec<Node>,
    directives: Vec<Node>,
    selection_set: Box<Node>,
  },
  SelectionSet {
    selections: Vec<Node>,
  },
  Field {
    alias: Option<Box<Node>>,
    name: Box<Node>,
    arguments: Vec<Node>,
    directives: Vec<Node>,
    selection_set: Option<Box<Node>>,
  },
  Argument {
    name: Box<Node>,
    value: Box<Node>,
  },
  FragmentDefinition {
    name: Box<Node>,
    type_condition: Box<Node>,
    directives: Vec<Node>,
    selection_set: Box<Node>,
  },
  FragmentSpread {
    name: Box<Node>,
    directives: Vec<Node>,
  },
  InlineFragment {
    type_condition: Option<Box<Node>>,
    directives: Vec<Node>,
    selection_set: Box<Node>,
  },
  VariableDefinition {
    variable: Box<Node>,
    of_type: Box<Node>,
    default_value: Option<Box<Node>>,
    directives: Vec<Node>,
  },
  Variable {
    name: Box<Node>,
  },
  NamedType {
    name: Box<Node>,
  },
  ListType {
    of_type: Box<Node>,
  },
  NonNullType {
    of_type: Box<Node>,
  },
  Directive {
    name: Box<Node>,
    arguments: Vec<Node>,
  },
  Name {
    value: String,
  },
  IntValue {
    value: String,
  },
  FloatValue {
    value: String,
  },
  StringValue {
    value: String,
    block: bool,
  },
  BooleanValue {
    value: bool,
  },
  NullValue,
  EnumValue {
    value: String,
  },
  ListValue {
    values: Vec<Node>,
  },
  ObjectValue {
    fields: Vec<Node>,
  },
  ObjectField {
    name: Box<Node>,
    value: Box<Node>,
  },
  SchemaDefinition {
    directives: Vec<Node>,
    operation_types: Vec<Node>,
  },
  OperationTypeDefinition {
    operation: OperationType,
    named_type: Box<Node>,
  },
  ScalarTypeDefinition {
    name: Box<Node>,
    directives: Vec<Node>,
  },
  ObjectTypeDefinition {
    name: Box<Node>,
    interfaces: Vec<Node>,
    directives: Vec<Node>,
    fields: Vec<Node>,
  },
  FieldDefinition {
    name: Box<Node>,
    arguments: Vec<Node>,
    of_type: Box<Node>,
    directives: Vec<Node>,
  },
  InputValueDefinition {
    name: Box<Node>,
    of_type: Box<Node>,
    default_value: Option<Box<Node>>,
    directives: Vec<Node>,
  },
  InterfaceTypeDefinition {
    name: Box<Node>,
    interfaces: Vec<Node>,
    directives: Vec<Node>,
    fields: Vec<Node>,
  },
  UnionTypeDefinition {
    name: Box<Node>,
    directives: Vec<Node>,
    types: Vec<Node>,
  },
  EnumTypeDefinition {
    name: Box<Node>,
    directives: Vec<Node>,
    values: Vec<Node>,
  },
  EnumValueDefinition {
    name: Box<Node>,
    directives: Vec<Node>,
  },
  InputObjectTypeDefinition {
    name: Box<Node>,
    directives: Vec<Node>,
    fields: Vec<Node>,
  },
  DirectiveDefinition {
    name: Box<Node>,
    arguments: Vec<Node>,
    repeatable: bool,
    locations: Vec<Node>,
  },
}

/// The string-tag side of the `kind` discriminator ("every variant
/// carries a `kind` discriminator, exposed as a string").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
  Document,
  OperationDefinition,
  SelectionSet,
  Field,
  Argument,
  FragmentDefinition,
  FragmentSpread,
  InlineFragment,
  VariableDefinition,
  Variable,
  NamedType,
  ListType,
  NonNullType,
  Directive,
  Name,
  IntValue,
  FloatValue,
  StringValue,
  BooleanValue,
  NullValue,
  EnumValue,
  ListValue,
  ObjectValue,
  ObjectField,
  SchemaDefinition,
  OperationTypeDefinition,
  ScalarTypeDefinition,
  ObjectTypeDefinition,
  FieldDefinition,
  InputValueDefinition,
  InterfaceTypeDefinition,
  UnionTypeDefinition,
  EnumTypeDefinition,
  EnumValueDefinition,
  InputObjectTypeDefinition,
  DirectiveDefinition,
}

impl NodeKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      NodeKind::Document => "Document",
      NodeKind::OperationDefinition => "OperationDefinition",
      NodeKind::SelectionSet => "SelectionSet",
      NodeKind::Field => "Field",
      NodeKind::Argument => "Argument",
      NodeKind::FragmentDefinition => "FragmentDefinition",
      NodeKind::FragmentSpread => "FragmentSpread",
      NodeKind::InlineFragment => "InlineFragment",
      NodeKind::VariableDefinition => "VariableDefinition",
      NodeKind::Variable => "Variable",
      NodeKind::NamedType => "NamedType",
      NodeKind::ListType => "ListType",
      NodeKind::NonNullType => "NonNullType",
      NodeKind::Directive => "Directive",
      NodeKind::Name => "Name",
      NodeKind::IntValue => "IntValue",
      NodeKind::FloatValue => "FloatValue",
      NodeKind::StringValue => "StringValue",
      NodeKind::BooleanValue => "BooleanValue",
      NodeKind::NullValue => "NullValue",
      NodeKind::EnumValue => "EnumValue",
      NodeKind::ListValue => "ListValue",
      NodeKind::ObjectValue => "ObjectValue",
      NodeKind::ObjectField => "ObjectField",
      NodeKind::SchemaDefinition => "SchemaDefinition",
      NodeKind::OperationTypeDefinition => "OperationTypeDefinition",
      NodeKind::ScalarTypeDefinition => "ScalarTypeDefinition",
      NodeKind::ObjectTypeDefinition => "ObjectTypeDefinition",
      NodeKind::FieldDefinition => "FieldDefinition",
      NodeKind::InputValueDefinition => "InputValueDefinition",
      NodeKind::InterfaceTypeDefinition => "InterfaceTypeDefinition",
      NodeKind::UnionTypeDefinition => "UnionTypeDefinition",
      NodeKind::EnumTypeDefinition => "EnumTypeDefinition",
      NodeKind::EnumValueDefinition => "EnumValueDefinition",
      NodeKind::InputObjectTypeDefinition => "InputObjectTypeDefinition",
      NodeKind::DirectiveDefinition => "DirectiveDefinition",
    }
  }
}

impl fmt::Display for NodeKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Whether a named slot holds an optional single child or an ordered
/// sequence of children. Leaf scalars (`String`, `bool`) are not slots and
/// never appear in [`Node::visit_order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotArity {
  Single,
  Sequence,
}

/// One entry in a node kind's registry: a child-bearing slot name plus its
/// arity. `ast-grep-core` keeps this kind of per-kind metadata as inherent
/// methods on `Node` rather than an external side table (see `node.rs`
/// there); this crate follows the same shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSpec {
  pub name: &'static str,
  pub arity: SlotArity,
}

const fn single(name: &'static str) -> SlotSpec {
  SlotSpec {
    name,
    arity: SlotArity::Single,
  }
}

const fn seq(name: &'static str) -> SlotSpec {
  SlotSpec {
    name,
    arity: SlotArity::Sequence,
  }
}

/// The current value of a slot, read from or written back into a [`Node`].
#[derive(Debug, Clone, PartialEq)]
pub enum SlotValue {
  Single(Option<Node>),
  Sequence(Vec<Node>),
}

impl Node {
  pub fn kind(&self) -> NodeKind {
    match self {
      Node::Document { .. } => NodeKind::Document,
      Node::OperationDefinition { .. } => NodeKind::OperationDefinition,
      Node::SelectionSet { .. } => NodeKind::SelectionSet,
      Node::Field { .. } => NodeKind::Field,
      Node::Argument { .. } => NodeKind::Argument,
      Node::FragmentDefinition { .. } => NodeKind::FragmentDefinition,
      Node::FragmentSpread { .. } => NodeKind::FragmentSpread,
      Node::InlineFragment { .. } => NodeKind::InlineFragment,
      Node::VariableDefinition { .. } => NodeKind::VariableDefinition,
      Node::Variable { .. } => NodeKind::Variable,
      Node::NamedType { .. } => NodeKind::NamedType,
      Node::ListType { .. } => NodeKind::ListType,
      Node::NonNullType { .. } => NodeKind::NonNullType,
      Node::Directive { .. } => NodeKind::Directive,
      Node::Name { .. } => NodeKind::Name,
      Node::IntValue { .. } => NodeKind::IntValue,
      Node::FloatValue { .. } => NodeKind::FloatValue,
      Node::StringValue { .. } => NodeKind::StringValue,
      Node::BooleanValue { .. } => NodeKind::BooleanValue,
      Node::NullValue => NodeKind::NullValue,
      Node::EnumValue { .. } => NodeKind::EnumValue,
      Node::ListValue { .. } => NodeKind::ListValue,
      Node::ObjectValue { .. } => NodeKind::ObjectValue,
      Node::ObjectField { .. } => NodeKind::ObjectField,
      Node::SchemaDefinition { .. } => NodeKind::SchemaDefinition,
      Node::OperationTypeDefinition { .. } => NodeKind::OperationTypeDefinition,
      Node::ScalarTypeDefinition { .. } => NodeKind::ScalarTypeDefinition,
      Node::ObjectTypeDefinition { .. } => NodeKind::ObjectTypeDefinition,
      Node::FieldDefinition { .. } => NodeKind::FieldDefinition,
      Node::InputValueDefinition { .. } => NodeKind::InputValueDefinition,
      Node::InterfaceTypeDefinition { .. } => NodeKind::InterfaceTypeDefinition,
      Node::UnionTypeDefinition { .. } => NodeKind::UnionTypeDefinition,
      Node::EnumTypeDefinition { .. } => NodeKind::EnumTypeDefinition,
      Node::EnumValueDefinition { .. } => NodeKind::EnumValueDefinition,
      Node::InputObjectTypeDefinition { .. } => NodeKind::InputObjectTypeDefinition,
      Node::DirectiveDefinition { .. } => NodeKind::DirectiveDefinition,
    }
  }

  /// The ordered list of child-bearing slots for this node's kind. Leaf
  /// scalars do not participate in traversal and are omitted.
  pub fn visit_order(&self) -> &'static [SlotSpec] {
    use Node::*;
    match self {
      Document { .. } => &[seq("definitions")],
      OperationDefinition { .. } => &[
        single("name"),
        seq("variable_definitions"),
        seq("directives"),
        single("selection_set"),
      ],
      SelectionSet { .. } => &[seq("selections")],
      Field { .. } => &[
        single("alias"),
        single("name"),
        seq("arguments"),
        seq("directives"),
        single("selection_set"),
      ],
      Argument { .. } => &[single("name"), single("value")],
      FragmentDefinition { .. } => &[
        single("name"),
        single("type_condition"),
        seq("directives"),
        single("selection_set"),
      ],
      FragmentSpread { .. } => &[single("name"), seq("directives")],
      InlineFragment { .. } => &[
        single("type_condition"),
        seq("directives"),
        single("selection_set"),
      ],
      VariableDefinition { .. } => &[
        single("variable"),
        single("of_type"),
        single("default_value"),
        seq("directives"),
      ],
      Variable { .. } => &[single("name")],
      NamedType { .. } => &[single("name")],
      ListType { .. } => &[single("of_type")],
      NonNullType { .. } => &[single("of_type")],
      Directive { .. } => &[single("name"), seq("arguments")],
      Name { .. } => &[],
      IntValue { .. } => &[],
      FloatValue { .. } => &[],
      StringValue { .. } => &[],
      BooleanValue { .. } => &[],
      NullValue => &[],
      EnumValue { .. } => &[],
      ListValue { .. } => &[seq("values")],
      ObjectValue { .. } => &[seq("fields")],
      ObjectField { .. } => &[single("name"), single("value")],
      SchemaDefinition { .. } => &[seq("directives"), seq("operation_types")],
      OperationTypeDefinition { .. } => &[single("named_type")],
      ScalarTypeDefinition { .. } => &[single("name"), seq("directives")],
      ObjectTypeDefinition { .. } => &[
        single("name"),
        seq("interfaces"),
        seq("directives"),
        seq("fields"),
      ],
      FieldDefinition { .. } => &[
        single("name"),
        seq("arguments"),
        single("of_type"),
        seq("directives"),
      ],
      InputValueDefinition { .. } => &[
        single("name"),
        single("of_type"),
        single("default_value"),
        seq("directives"),
      ],
      InterfaceTypeDefinition { .. } => &[
        single("name"),
        seq("interfaces"),
        seq("directives"),
        seq("fields"),
      ],
      UnionTypeDefinition { .. } => &[single("name"), seq("directives"), seq("types")],
      EnumTypeDefinition { .. } => &[single("name"), seq("directives"), seq("values")],
      EnumValueDefinition { .. } => &[single("name"), seq("directives")],
      InputObjectTypeDefinition { .. } => &[single("name"), seq("directives"), seq("fields")],
      DirectiveDefinition { .. } => &[single("name"), seq("arguments"), seq("locations")],
    }
  }

  /// Read the current value of a named slot. Panics if `name` is not a slot
  /// of this node's kind — callers are expected to only pass names drawn
  /// from [`Node::visit_order`].
  pub fn slot(&self, name: &str) -> SlotValue {
    use Node::*;
    match (self, name) {
      (Document { definitions }, "definitions") => SlotValue::Sequence(definitions.clone()),
      (OperationDefinition { name, .. }, "name") => {
        SlotValue::Single(name.as_deref().cloned())
      }
      (OperationDefinition { variable_definitions, .. }, "variable_definitions") => {
        SlotValue::Sequence(variable_definitions.clone())
      }
      (OperationDefinition { directives, .. }, "directives") => {
        SlotValue::Sequence(directives.clone())
      }
      (OperationDefinition { selection_set, .. }, "selection_set") => {
        SlotValue::Single(Some((**selection_set).clone()))
      }
      (SelectionSet { selections }, "selections") => SlotValue::Sequence(selections.clone()),
      (Field { alias, .. }, "alias") => SlotValue::Single(alias.as_deref().cloned()),
      (Field { name, .. }, "name") => SlotValue::Single(Some((**name).clone())),
      (Field { arguments, .. }, "arguments") => SlotValue::Sequence(arguments.clone()),
      (Field { directives, .. }, "directives") => SlotValue::Sequence(directives.clone()),
      (Field { selection_set, .. }, "selection_set") => {
        SlotValue::Single(selection_set.as_deref().cloned())
      }
      (Argument { name, .. }, "name") => SlotValue::Single(Some((**name).clone())),
      (Argument { value, .. }, "value") => SlotValue::Single(Some((**value).clone())),
      (FragmentDefinition { name, .. }, "name") => SlotValue::Single(Some((**name).clone())),
      (FragmentDefinition { type_condition, .. }, "type_condition") => {
        SlotValue::Single(Some((**type_condition).clone()))
      }
      (FragmentDefinition { directives, .. }, "directives") => {
        SlotValue::Sequence(directives.clone())
      }
      (FragmentDefinition { selection_set, .. }, "selection_set") => {
        SlotValue::Single(Some((**selection_set).clone()))
      }
      (FragmentSpread { name, .. }, "name") => SlotValue::Single(Some((**name).clone())),
      (FragmentSpread { directives, .. }, "directives") => SlotValue::Sequence(directives.clone()),
      (InlineFragment { type_condition, .. }, "type_condition") => {
        SlotValue::Single(type_condition.as_deref().cloned())
      }
      (InlineFragment { directives, .. }, "directives") => SlotValue::Sequence(directives.clone()),
      (InlineFragment { selection_set, .. }, "selection_set") => {
        SlotValue::Single(Some((**selection_set).clone()))
      }
      (VariableDefinition { variable, .. }, "variable") => {
        SlotValue::Single(Some((**variable).clone()))
      }
      (VariableDefinition { of_type, .. }, "of_type") => {
        SlotValue::Single(Some((**of_type).clone()))
      }
      (VariableDefinition { default_value, .. }, "default_value") => {
        SlotValue::Single(default_value.as_deref().cloned())
      }
      (VariableDefinition { directives, .. }, "directives") => {
        SlotValue::Sequence(directives.clone())
      }
      (Variable { name }, "name") => SlotValue::Single(Some((**name).clone())),
      (NamedType { name }, "name") => SlotValue::Single(Some((**name).clone())),
      (ListType { of_type }, "of_type") => SlotValue::Single(Some((**of_type).clone())),
      (NonNullType { of_type }, "of_type") => SlotValue::Single(Some((**of_type).clone())),
      (Directive { name, .. }, "name") => SlotValue::Single(Some((**name).clone())),
      (Directive { arguments, .. }, "arguments") => SlotValue::Sequence(arguments.clone()),
      (ListValue { values }, "values") => SlotValue::Sequence(values.clone()),
      (ObjectValue { fields }, "fields") => SlotValue::Sequence(fields.clone()),
      (ObjectField { name, .. }, "name") => SlotValue::Single(Some((**name).clone())),
      (ObjectField { value, .. }, "value") => SlotValue::Single(Some((**value).clone())),
      (SchemaDefinition { directives, .. }, "directives") => {
        SlotValue::Sequence(directives.clone())
      }
      (SchemaDefinition { operation_types, .. }, "operation_types") => {
        SlotValue::Sequence(operation_types.clone())
      }
      (OperationTypeDefinition { named_type, .. }, "named_type") => {
        SlotValue::Single(Some((**named_type).clone()))
      }
      (ScalarTypeDefinition { name, .. }, "name") => SlotValue::Single(Some((**name).clone())),
      (ScalarTypeDefinition { directives, .. }, "directives") => {
        SlotValue::Sequence(directives.clone())
      }
      (ObjectTypeDefinition { name, .. }, "name") => SlotValue::Single(Some((**name).clone())),
      (ObjectTypeDefinition { interfaces, .. }, "interfaces") => {
        SlotValue::Sequence(interfaces.clone())
      }
      (ObjectTypeDefinition { directives, .. }, "directives") => {
        SlotValue::Sequence(directives.clone())
      }
      (ObjectTypeDefinition { fields, .. }, "fields") => SlotValue::Sequence(fields.clone()),
      (FieldDefinition { name, .. }, "name") => SlotValue::Single(Some((**name).clone())),
      (FieldDefinition { arguments, .. }, "arguments") => SlotValue::Sequence(arguments.clone()),
      (FieldDefinition { of_type, .. }, "of_type") => SlotValue::Single(Some((**of_type).clone())),
      (FieldDefinition { directives, .. }, "directives") => {
        SlotValue::Sequence(directives.clone())
      }
      (InputValueDefinition { name, .. }, "name") => SlotValue::Single(Some((**name).clone())),
      (InputValueDefinition { of_type, .. }, "of_type") => {
        SlotValue::Single(Some((**of_type).clone()))
      }
      (InputValueDefinition { default_value, .. }, "default_value") => {
        SlotValue::Single(default_value.as_deref().cloned())
      }
      (InputValueDefinition { directives, .. }, "directives") => {
        SlotValue::Sequence(directives.clone())
      }
      (InterfaceTypeDefinition { name, .. }, "name") => SlotValue::Single(Some((**name).clone())),
      (InterfaceTypeDefinition { interfaces, .. }, "interfaces") => {
        SlotValue::Sequence(interfaces.clone())
      }
      (InterfaceTypeDefinition { directives, .. }, "directives") => {
        SlotValue::Sequence(directives.clone())
      }
      (InterfaceTypeDefinition { fields, .. }, "fields") => SlotValue::Sequence(fields.clone()),
      (UnionTypeDefinition { name, .. }, "name") => SlotValue::Single(Some((**name).clone())),
      (UnionTypeDefinition { directives, .. }, "directives") => {
        SlotValue::Sequence(directives.clone())
      }
      (UnionTypeDefinition { types, .. }, "types") => SlotValue::Sequence(types.clone()),
      (EnumTypeDefinition { name, .. }, "name") => SlotValue::Single(Some((**name).clone())),
      (EnumTypeDefinition { directives, .. }, "directives") => {
        SlotValue::Sequence(directives.clone())
      }
      (EnumTypeDefinition { values, .. }, "values") => SlotValue::Sequence(values.clone()),
      (EnumValueDefinition { name, .. }, "name") => SlotValue::Single(Some((**name).clone())),
      (EnumValueDefinition { directives, .. }, "directives") => {
        SlotValue::Sequence(directives.clone())
      }
      (InputObjectTypeDefinition { name, .. }, "name") => {
        SlotValue::Single(Some((**name).clone()))
      }
      (InputObjectTypeDefinition { directives, .. }, "directives") => {
        SlotValue::Sequence(directives.clone())
      }
      (InputObjectTypeDefinition { fields, .. }, "fields") => {
        SlotValue::Sequence(fields.clone())
      }
      (DirectiveDefinition { name, .. }, "name") => SlotValue::Single(Some((**name).clone())),
      (DirectiveDefinition { arguments, .. }, "arguments") => {
        SlotValue::Sequence(arguments.clone())
      }
      (DirectiveDefinition { locations, .. }, "locations") => {
        SlotValue::Sequence(locations.clone())
      }
      (node, name) => {
        unreachable!("registry/slot mismatch: {} has no slot named `{name}`", node.kind())
      }
    }
  }

  /// Construct a new node of the same kind with one slot replaced,
  /// leaving every other slot and leaf untouched. This is the
  /// materialization primitive the traversal engine uses to rebuild a
  /// parent whose edit buffer is non-empty.
  ///
  /// Returns `Err` (rather than panicking) when `value` doesn't fit the
  /// named slot — most commonly because an edit deleted the sole child
  /// backing a slot that isn't optional (e.g. `Field.name`). The caller
  /// (`traversal::visit_children`) turns that into a
  /// [`crate::error::VisitError::MalformedNode`] carrying the path of the
  /// node being rebuilt.
  pub fn with_slot(&self, name: &'static str, value: SlotValue) -> Result<Node, String> {
    use Node::*;
    match (self.clone(), value) {
      (Document { .. }, SlotValue::Sequence(definitions)) if name == "definitions" => {
        Ok(Document { definitions })
      }
      (
        OperationDefinition {
          operation,
          name: old_name,
          variable_definitions,
          directives,
          selection_set,
        },
        value,
      ) => match (name, value) {
        ("name", SlotValue::Single(n)) => Ok(OperationDefinition {
          operation,
          name: n.map(Box::new),
          variable_definitions,
          directives,
          selection_set,
        }),
        ("variable_definitions", SlotValue::Sequence(v)) => Ok(OperationDefinition {
          operation,
          name: old_name,
          variable_definitions: v,
          directives,
          selection_set,
        }),
        ("directives", SlotValue::Sequence(v)) => Ok(OperationDefinition {
          operation,
          name: old_name,
          variable_definitions,
          directives: v,
          selection_set,
        }),
        ("selection_set", SlotValue::Single(Some(s))) => Ok(OperationDefinition {
          operation,
          name: old_name,
          variable_definitions,
          directives,
          selection_set: Box::new(s),
        }),
        _ => Err(format!(
          "OperationDefinition has no slot named `{name}` with that shape"
        )),
      },
      (SelectionSet { .. }, SlotValue::Sequence(selections)) if name == "selections" => {
        Ok(SelectionSet { selections })
      }
      (
        Field {
          alias,
          name: old_name,
          arguments,
          directives,
          selection_set,
        },
        value,
      ) => match (name, value) {
        ("alias", SlotValue::Single(a)) => Ok(Field {
          alias: a.map(Box::new),
          name: old_name,
          arguments,
          directives,
          selection_set,
        }),
        ("name", SlotValue::Single(Some(n))) => Ok(Field {
          alias,
          name: Box::new(n),
          arguments,
          directives,
          selection_set,
        }),
        ("arguments", SlotValue::Sequence(v)) => Ok(Field {
          alias,
          name: old_name,
          arguments: v,
          directives,
          selection_set,
        }),
        ("directives", SlotValue::Sequence(v)) => Ok(Field {
          alias,
          name: old_name,
          arguments,
          directives: v,
          selection_set,
        }),
        ("selection_set", SlotValue::Single(s)) => Ok(Field {
          alias,
          name: old_name,
          arguments,
          directives,
          selection_set: s.map(Box::new),
        }),
        ("name", SlotValue::Single(None)) => Err(format!(
          "Field.name is required but the edit would leave it empty"
        )),
        _ => Err(format!("Field has no slot named `{name}` with that shape")),
      },
      (Argument { name: n, value: v }, value) => match (name, value) {
        ("name", SlotValue::Single(Some(x))) => Ok(Argument {
          name: Box::new(x),
          value: v,
        }),
        ("value", SlotValue::Single(Some(x))) => Ok(Argument {
          name: n,
          value: Box::new(x),
        }),
        ("name", SlotValue::Single(None)) => Err(format!(
          "Argument.name is required but the edit would leave it empty"
        )),
        ("value", SlotValue::Single(None)) => Err(format!(
          "Argument.value is required but the edit would leave it empty"
        )),
        _ => Err(format!("Argument has no slot named `{name}` with that shape")),
      },
      (
        FragmentDefinition {
          name: n,
          type_condition,
          directives,
          selection_set,
        },
        value,
      ) => match (name, value) {
        ("name", SlotValue::Single(Some(x))) => Ok(FragmentDefinition {
          name: Box::new(x),
          type_condition,
          directives,
          selection_set,
        }),
        ("type_condition", SlotValue::Single(Some(x))) => Ok(FragmentDefinition {
          name: n,
          type_condition: Box::new(x),
          directives,
          selection_set,
        }),
        ("directives", SlotValue::Sequence(v)) => Ok(FragmentDefinition {
          name: n,
          type_condition,
          directives: v,
          selection_set,
        }),
        ("selection_set", SlotValue::Single(Some(x))) => Ok(FragmentDefinition {
          name: n,
          type_condition,
          directives,
          selection_set: Box::new(x),
        }),
        _ => Err(format!(
          "FragmentDefinition has no slot named `{name}` with that shape"
        )),
      },
      (FragmentSpread { name: n, directives }, value) => match (name, value) {
        ("name", SlotValue::Single(Some(x))) => Ok(FragmentSpread {
          name: Box::new(x),
          directives,
        }),
        ("directives", SlotValue::Sequence(v)) => Ok(FragmentSpread {
          name: n,
          directives: v,
        }),
        _ => Err(format!("FragmentSpread has no slot named `{name}` with that shape")),
      },
      (
        InlineFragment {
          type_condition,
          directives,
          selection_set,
        },
        value,
      ) => match (name, value) {
        ("type_condition", SlotValue::Single(t)) => Ok(InlineFragment {
          type_condition: t.map(Box::new),
          directives,
          selection_set,
        }),
        ("directives", SlotValue::Sequence(v)) => Ok(InlineFragment {
          type_condition,
          directives: v,
          selection_set,
        }),
        ("selection_set", SlotValue::Single(Some(x))) => Ok(InlineFragment {
          type_condition,
          directives,
          selection_set: Box::new(x),
        }),
        _ => Err(format!("InlineFragment has no slot named `{name}` with that shape")),
      },
      (
        VariableDefinition {
          variable,
          of_type,
          default_value,
          directives,
        },
        value,
      ) => match (name, value) {
        ("variable", SlotValue::Single(Some(x))) => Ok(VariableDefinition {
          variable: Box::new(x),
          of_type,
          default_value,
          directives,
        }),
        ("of_type", SlotValue::Single(Some(x))) => Ok(VariableDefinition {
          variable,
          of_type: Box::new(x),
          default_value,
          directives,
        }),
        ("default_value", SlotValue::Single(d)) => Ok(VariableDefinition {
          variable,
          of_type,
          default_value: d.map(Box::new),
          directives,
        }),
        ("directives", SlotValue::Sequence(v)) => Ok(VariableDefinition {
          variable,
          of_type,
          default_value,
          directives: v,
        }),
        _ => Err(format!(
          "VariableDefinition has no slot named `{name}` with that shape"
        )),
      },
      (Variable { .. }, SlotValue::Single(Some(n))) if name == "name" => {
        Ok(Variable { name: Box::new(n) })
      }
      (NamedType { .. }, SlotValue::Single(Some(n))) if name == "name" => {
        Ok(NamedType { name: Box::new(n) })
      }
      (ListType { .. }, SlotValue::Single(Some(t))) if name == "of_type" => {
        Ok(ListType { of_type: Box::new(t) })
      }
      (NonNullType { .. }, SlotValue::Single(Some(t))) if name == "of_type" => {
        Ok(NonNullType { of_type: Box::new(t) })
      }
      (Directive { name: n, arguments }, value) => match (name, value) {
        ("name", SlotValue::Single(Some(x))) => Ok(Directive {
          name: Box::new(x),
          arguments,
        }),
        ("arguments", SlotValue::Sequence(v)) => Ok(Directive {
          name: n,
          arguments: v,
        }),
        _ => Err(format!("Directive has no slot named `{name}` with that shape")),
      },
      (ListValue { .. }, SlotValue::Sequence(values)) if name == "values" => {
        Ok(ListValue { values })
      }
      (ObjectValue { .. }, SlotValue::Sequence(fields)) if name == "fields" => {
        Ok(ObjectValue { fields })
      }
      (ObjectField { name: n, value: v }, value) => match (name, value) {
        ("name", SlotValue::Single(Some(x))) => Ok(ObjectField {
          name: Box::new(x),
          value: v,
        }),
        ("value", SlotValue::Single(Some(x))) => Ok(ObjectField {
          name: n,
          value: Box::new(x),
        }),
        _ => Err(format!("ObjectField has no slot named `{name}` with that shape")),
      },
      (
        SchemaDefinition {
          directives,
          operation_types,
        },
        value,
      ) => match (name, value) {
        ("directives", SlotValue::Sequence(v)) => Ok(SchemaDefinition {
          directives: v,
          operation_types,
        }),
        ("operation_types", SlotValue::Sequence(v)) => Ok(SchemaDefinition {
          directives,
          operation_types: v,
        }),
        _ => Err(format!(
          "SchemaDefinition has no slot named `{name}` with that shape"
        )),
      },
      (OperationTypeDefinition { operation, .. }, SlotValue::Single(Some(t)))
        if name == "named_type" =>
      {
        Ok(OperationTypeDefinition {
          operation,
          named_type: Box::new(t),
        })
      }
      (ScalarTypeDefinition { name: n, directives }, value) => match (name, value) {
        ("name", SlotValue::Single(Some(x))) => Ok(ScalarTypeDefinition {
          name: Box::new(x),
          directives,
        }),
        ("directives", SlotValue::Sequence(v)) => Ok(ScalarTypeDefinition {
          name: n,
          directives: v,
        }),
        _ => Err(format!(
          "ScalarTypeDefinition has no slot named `{name}` with that shape"
        )),
      },
      (
        ObjectTypeDefinition {
          name: n,
          interfaces,
          directives,
          fields,
        },
        value,
      ) => match (name, value) {
        ("name", SlotValue::Single(Some(x))) => Ok(ObjectTypeDefinition {
          name: Box::new(x),
          interfaces,
          directives,
          fields,
        }),
        ("interfaces", SlotValue::Sequence(v)) => Ok(ObjectTypeDefinition {
          name: n,
          interfaces: v,
          directives,
          fields,
        }),
        ("directives", SlotValue::Sequence(v)) => Ok(ObjectTypeDefinition {
          name: n,
          interfaces,
          directives: v,
          fields,
        }),
        ("fields", SlotValue::Sequence(v)) => Ok(ObjectTypeDefinition {
          name: n,
          interfaces,
          directives,
          fields: v,
        }),
        _ => Err(format!(
          "ObjectTypeDefinition has no slot named `{name}` with that shape"
        )),
      },
      (
        FieldDefinition {
          name: n,
          arguments,
          of_type,
          directives,
        },
        value,
      ) => match (name, value) {
        ("name", SlotValue::Single(Some(x))) => Ok(FieldDefinition {
          name: Box::new(x),
          arguments,
          of_type,
          directives,
        }),
        ("arguments", SlotValue::Sequence(v)) => Ok(FieldDefinition {
          name: n,
          arguments: v,
          of_type,
          directives,
        }),
        ("of_type", SlotValue::Single(Some(x))) => Ok(FieldDefinition {
          name: n,
          arguments,
          of_type: Box::new(x),
          directives,
        }),
        ("directives", SlotValue::Sequence(v)) => Ok(FieldDefinition {
          name: n,
          arguments,
          of_type,
          directives: v,
        }),
        _ => Err(format!(
          "FieldDefinition has no slot named `{name}` with that shape"
        )),
      },
      (
        InputValueDefinition {
          name: n,
          of_type,
          default_value,
          directives,
        },
        value,
      ) => match (name, value) {
        ("name", SlotValue::Single(Some(x))) => Ok(InputValueDefinition {
          name: Box::new(x),
          of_type,
          default_value,
          directives,
        }),
        ("of_type", SlotValue::Single(Some(x))) => Ok(InputValueDefinition {
          name: n,
          of_type: Box::new(x),
          default_value,
          directives,
        }),
        ("default_value", SlotValue::Single(d)) => Ok(InputValueDefinition {
          name: n,
          of_type,
          default_value: d.map(Box::new),
          directives,
        }),
        ("directives", SlotValue::Sequence(v)) => Ok(InputValueDefinition {
          name: n,
          of_type,
          default_value,
          directives: v,
        }),
        _ => Err(format!(
          "InputValueDefinition has no slot named `{name}` with that shape"
        )),
      },
      (
        InterfaceTypeDefinition {
          name: n,
          interfaces,
          directives,
          fields,
        },
        value,
      ) => match (name, value) {
        ("name", SlotValue::Single(Some(x))) => Ok(InterfaceTypeDefinition {
          name: Box::new(x),
          interfaces,
          directives,
          fields,
        }),
        ("interfaces", SlotValue::Sequence(v)) => Ok(InterfaceTypeDefinition {
          name: n,
          interfaces: v,
          directives,
          fields,
        }),
        ("directives", SlotValue::Sequence(v)) => Ok(InterfaceTypeDefinition {
          name: n,
          interfaces,
          directives: v,
          fields,
        }),
        ("fields", SlotValue::Sequence(v)) => Ok(InterfaceTypeDefinition {
          name: n,
          interfaces,
          directives,
          fields: v,
        }),
        _ => Err(format!(
          "InterfaceTypeDefinition has no slot named `{name}` with that shape"
        )),
      },
      (
        UnionTypeDefinition {
          name: n,
          directives,
          types,
        },
        value,
      ) => match (name, value) {
        ("name", SlotValue::Single(Some(x))) => Ok(UnionTypeDefinition {
          name: Box::new(x),
          directives,
          types,
        }),
        ("directives", SlotValue::Sequence(v)) => Ok(UnionTypeDefinition {
          name: n,
          directives: v,
          types,
        }),
        ("types", SlotValue::Sequence(v)) => Ok(UnionTypeDefinition {
          name: n,
          directives,
          types: v,
        }),
        _ => Err(format!(
          "UnionTypeDefinition has no slot named `{name}` with that shape"
        )),
      },
      (
        EnumTypeDefinition {
          name: n,
          directives,
          values,
        },
        value,
      ) => match (name, value) {
        ("name", SlotValue::Single(Some(x))) => Ok(EnumTypeDefinition {
          name: Box::new(x),
          directives,
          values,
        }),
        ("directives", SlotValue::Sequence(v)) => Ok(EnumTypeDefinition {
          name: n,
          directives: v,
          values,
        }),
        ("values", SlotValue::Sequence(v)) => Ok(EnumTypeDefinition {
          name: n,
          directives,
          values: v,
        }),
        _ => Err(format!(
          "EnumTypeDefinition has no slot named `{name}` with that shape"
        )),
      },
      (EnumValueDefinition { name: n, directives }, value) => match (name, value) {
        ("name", SlotValue::Single(Some(x))) => Ok(EnumValueDefinition {
          name: Box::new(x),
          directives,
        }),
        ("directives", SlotValue::Sequence(v)) => Ok(EnumValueDefinition {
          name: n,
          directives: v,
        }),
        _ => Err(format!(
          "EnumValueDefinition has no slot named `{name}` with that shape"
        )),
      },
      (
        InputObjectTypeDefinition {
          name: n,
          directives,
          fields,
        },
        value,
      ) => match (name, value) {
        ("name", SlotValue::Single(Some(x))) => Ok(InputObjectTypeDefinition {
          name: Box::new(x),
          directives,
          fields,
        }),
        ("directives", SlotValue::Sequence(v)) => Ok(InputObjectTypeDefinition {
          name: n,
          directives: v,
          fields,
        }),
        ("fields", SlotValue::Sequence(v)) => Ok(InputObjectTypeDefinition {
          name: n,
          directives,
          fields: v,
        }),
        _ => Err(format!(
          "InputObjectTypeDefinition has no slot named `{name}` with that shape"
        )),
      },
      (
        DirectiveDefinition {
          name: n,
          arguments,
          repeatable,
          locations,
        },
        value,
      ) => match (name, value) {
        ("name", SlotValue::Single(Some(x))) => Ok(DirectiveDefinition {
          name: Box::new(x),
          arguments,
          repeatable,
          locations,
        }),
        ("arguments", SlotValue::Sequence(v)) => Ok(DirectiveDefinition {
          name: n,
          arguments: v,
          repeatable,
          locations,
        }),
        ("locations", SlotValue::Sequence(v)) => Ok(DirectiveDefinition {
          name: n,
          arguments,
          repeatable,
          locations: v,
        }),
        _ => Err(format!(
          "DirectiveDefinition has no slot named `{name}` with that shape"
        )),
      },
      (node, _) => Err(format!("{} has no slot named `{name}`", node.kind())),
    }
  }

  /// Recursively copy a subtree. Since `Node` owns all of its data there is
  /// no identity to preserve by default; this exists so visitors that want
  /// to stash and later restore an original subtree have a
  /// named, documented way to say so, mirroring `ast-grep-core`'s
  /// `clone-deep` primitive used only where identity preservation matters.
  pub fn clone_deep(&self) -> Node {
    self.clone()
  }

  /// Build a brand-new node of `kind` from a slot map, defaulting any slot
  /// absent from `slots` to "absent" (`None` / empty sequence). Returns
  /// [`VisitError::MalformedNode`] if a required single slot is missing or
  /// the map names a slot unknown to `kind`'s registry.
  pub fn from_slots(
    kind: NodeKind,
    mut slots: HashMap<&'static str, SlotValue>,
    leaves: Leaves,
  ) -> Result<Node, VisitError> {
    macro_rules! take_single {
      ($name:literal) => {
        match slots.remove($name) {
          Some(SlotValue::Single(v)) => v,
          Some(SlotValue::Sequence(_)) => {
            return Err(VisitError::MalformedNode {
              path: Path::new(),
              reason: format!("slot `{}` of {kind} must be a single child, not a sequence", $name),
            })
          }
          None => None,
        }
      };
    }
    macro_rules! take_seq {
      ($name:literal) => {
        match slots.remove($name) {
          Some(SlotValue::Sequence(v)) => v,
          Some(SlotValue::Single(_)) => {
            return Err(VisitError::MalformedNode {
              path: Path::new(),
              reason: format!("slot `{}` of {kind} must be a sequence, not a single child", $name),
            })
          }
          None => Vec::new(),
        }
      };
    }
    macro_rules! require_single {
      ($name:literal) => {
        take_single!($name).ok_or_else(|| VisitError::MalformedNode {
          path: Path::new(),
          reason: format!("required slot `{}` of {kind} is missing", $name),
        })?
      };
    }

    let node = match kind {
      NodeKind::Document => Node::Document {
        definitions: take_seq!("definitions"),
      },
      NodeKind::OperationDefinition => Node::OperationDefinition {
        operation: leaves.operation_type(kind)?,
        name: take_single!("name").map(Box::new),
        variable_definitions: take_seq!("variable_definitions"),
        directives: take_seq!("directives"),
        selection_set: Box::new(require_single!("selection_set")),
      },
      NodeKind::SelectionSet => Node::SelectionSet {
        selections: take_seq!("selections"),
      },
      NodeKind::Field => Node::Field {
        alias: take_single!("alias").map(Box::new),
        name: Box::new(require_single!("name")),
        arguments: take_seq!("arguments"),
        directives: take_seq!("directives"),
        selection_set: take_single!("selection_set").map(Box::new),
      },
      NodeKind::Argument => Node::Argument {
        name: Box::new(require_single!("name")),
        value: Box::new(require_single!("value")),
      },
      NodeKind::FragmentDefinition => Node::FragmentDefinition {
        name: Box::new(require_single!("name")),
        type_condition: Box::new(require_single!("type_condition")),
        directives: take_seq!("directives"),
        selection_set: Box::new(require_single!("selection_set")),
      },
      NodeKind::FragmentSpread => Node::FragmentSpread {
        name: Box::new(require_single!("name")),
        directives: take_seq!("directives"),
      },
      NodeKind::InlineFragment => Node::InlineFragment {
        type_condition: take_single!("type_condition").map(Box::new),
        directives: take_seq!("directives"),
        selection_set: Box::new(require_single!("selection_set")),
      },
      NodeKind::VariableDefinition => Node::VariableDefinition {
        variable: Box::new(require_single!("variable")),
        of_type: Box::new(require_single!("of_type")),
        default_value: take_single!("default_value").map(Box::new),
        directives: take_seq!("directives"),
      },
      NodeKind::Variable => Node::Variable {
        name: Box::new(require_single!("name")),
      },
      NodeKind::NamedType => Node::NamedType {
        name: Box::new(require_single!("name")),
      },
      NodeKind::ListType => Node::ListType {
        of_type: Box::new(require_single!("of_type")),
      },
      NodeKind::NonNullType => Node::NonNullType {
        of_type: Box::new(require_single!("of_type")),
      },
      NodeKind::Directive => Node::Directive {
        name: Box::new(require_single!("name")),
        arguments: take_seq!("arguments"),
      },
      NodeKind::Name => Node::Name {
        value: leaves.string("value")?,
      },
      NodeKind::IntValue => Node::IntValue {
        value: leaves.string("value")?,
      },
      NodeKind::FloatValue => Node::FloatValue {
        value: leaves.string("value")?,
      },
      NodeKind::StringValue => Node::StringValue {
        value: leaves.string("value")?,
        block: leaves.boolean("block").unwrap_or(false),
      },
      NodeKind::BooleanValue => Node::BooleanValue {
        value: leaves.boolean("value")?,
      },
      NodeKind::NullValue => Node::NullValue,
      NodeKind::EnumValue => Node::EnumValue {
        value: leaves.string("value")?,
      },
      NodeKind::ListValue => Node::ListValue {
        values: take_seq!("values"),
      },
      NodeKind::ObjectValue => Node::ObjectValue {
        fields: take_seq!("fields"),
      },
      NodeKind::ObjectField => Node::ObjectField {
        name: Box::new(require_single!("name")),
        value: Box::new(require_single!("value")),
      },
      NodeKind::SchemaDefinition => Node::SchemaDefinition {
        directives: take_seq!("directives"),
        operation_types: take_seq!("operation_types"),
      },
      NodeKind::OperationTypeDefinition => Node::OperationTypeDefinition {
        operation: leaves.operation_type(kind)?,
        named_type: Box::new(require_single!("named_type")),
      },
      NodeKind::ScalarTypeDefinition => Node::ScalarTypeDefinition {
        name: Box::new(require_single!("name")),
        directives: take_seq!("directives"),
      },
      NodeKind::ObjectTypeDefinition => Node::ObjectTypeDefinition {
        name: Box::new(require_single!("name")),
        interfaces: take_seq!("interfaces"),
        directives: take_seq!("directives"),
        fields: take_seq!("fields"),
      },
      NodeKind::FieldDefinition => Node::FieldDefinition {
        name: Box::new(require_single!("name")),
        arguments: take_seq!("arguments"),
        of_type: Box::new(require_single!("of_type")),
        directives: take_seq!("directives"),
      },
      NodeKind::InputValueDefinition => Node::InputValueDefinition {
        name: Box::new(require_single!("name")),
        of_type: Box::new(require_single!("of_type")),
        default_value: take_single!("default_value").map(Box::new),
        directives: take_seq!("directives"),
      },
      NodeKind::InterfaceTypeDefinition => Node::InterfaceTypeDefinition {
        name: Box::new(require_single!("name")),
        interfaces: take_seq!("interfaces"),
        directives: take_seq!("directives"),
        fields: take_seq!("fields"),
      },
      NodeKind::UnionTypeDefinition => Node::UnionTypeDefinition {
        name: Box::new(require_single!("name")),
        directives: take_seq!("directives"),
        types: take_seq!("types"),
      },
      NodeKind::EnumTypeDefinition => Node::EnumTypeDefinition {
        name: Box::new(require_single!("name")),
        directives: take_seq!("directives"),
        values: take_seq!("values"),
      },
      NodeKind::EnumValueDefinition => Node::EnumValueDefinition {
        name: Box::new(require_single!("name")),
        directives: take_seq!("directives"),
      },
      NodeKind::InputObjectTypeDefinition => Node::InputObjectTypeDefinition {
        name: Box::new(require_single!("name")),
        directives: take_seq!("directives"),
        fields: take_seq!("fields"),
      },
      NodeKind::DirectiveDefinition => Node::DirectiveDefinition {
        name: Box::new(require_single!("name")),
        arguments: take_seq!("arguments"),
        repeatable: leaves.boolean("repeatable").unwrap_or(false),
        locations: take_seq!("locations"),
      },
    };

    if let Some(unknown) = slots.keys().next() {
      return Err(VisitError::MalformedNode {
        path: Path::new(),
        reason: format!("{kind} has no slot named `{unknown}`"),
      });
    }
    Ok(node)
  }
}

/// Leaf scalar values threaded alongside the slot map into
/// [`Node::from_slots`], since leaves (strings, bools, the `OperationType`
/// tag) are not `Node`s and so cannot live in the generic `SlotValue` map.
#[derive(Debug, Clone, Default)]
pub struct Leaves {
  pub strings: HashMap<&'static str, String>,
  pub booleans: HashMap<&'static str, bool>,
  pub operation: Option<OperationType>,
}

impl Leaves {
  fn string(&self, name: &'static str) -> Result<String, VisitError> {
    self
      .strings
      .get(name)
      .cloned()
      .ok_or_else(|| VisitError::MalformedNode {
        path: Path::new(),
        reason: format!("required leaf `{name}` is missing"),
      })
  }

  fn boolean(&self, name: &'static str) -> Result<bool, VisitError> {
    self
      .booleans
      .get(name)
      .copied()
      .ok_or_else(|| VisitError::MalformedNode {
        path: Path::new(),
        reason: format!("required leaf `{name}` is missing"),
      })
  }

  fn operation_type(&self, kind: NodeKind) -> Result<OperationType, VisitError> {
    self.operation.ok_or_else(|| VisitError::MalformedNode {
      path: Path::new(),
      reason: format!("{kind} requires an `operation` leaf"),
    })
  }
}

// Terse constructors used throughout the test suites of every module in
// this crate, the way `ast-grep-core`'s traversal tests build fixtures with
// `Tsx.ast_grep(case)` rather than a fixture-file loader.
#[cfg(test)]
pub(crate) mod doc {
  use super::*;

  pub fn name(s: &str) -> Node {
    Node::Name { value: s.into() }
  }

  pub fn field(name: &str, selection_set: Option<Node>) -> Node {
    Node::Field {
      alias: None,
      name: Box::new(self::name(name)),
      arguments: Vec::new(),
      directives: Vec::new(),
      selection_set: selection_set.map(Box::new),
    }
  }

  pub fn selection_set(selections: Vec<Node>) -> Node {
    Node::SelectionSet { selections }
  }

  pub fn anonymous_query(selections: Vec<Node>) -> Node {
    Node::OperationDefinition {
      operation: OperationType::Query,
      name: None,
      variable_definitions: Vec::new(),
      directives: Vec::new(),
      selection_set: Box::new(selection_set(selections)),
    }
  }

  pub fn document(definitions: Vec<Node>) -> Node {
    Node::Document { definitions }
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn visit_order_matches_slot() {
    let field = doc::field("a", None);
    for spec in field.visit_order() {
      // every advertised slot must be readable without panicking
      let _ = field.slot(spec.name);
    }
  }

  #[test]
  fn with_slot_rebuilds_same_kind() {
    let field = doc::field("a", None);
    let renamed = field
      .with_slot("name", SlotValue::Single(Some(doc::name("b"))))
      .unwrap();
    assert_eq!(renamed.kind(), NodeKind::Field);
    match renamed.slot("name") {
      SlotValue::Single(Some(Node::Name { value })) => assert_eq!(value, "b"),
      _ => panic!("expected renamed Name slot"),
    }
  }

  #[test]
  fn with_slot_rejects_empty_required_slot() {
    let field = doc::field("a", None);
    let err = field.with_slot("name", SlotValue::Single(None)).unwrap_err();
    assert!(err.contains("Field"));
  }

  #[test]
  fn from_slots_rejects_missing_required_slot() {
    let mut slots = HashMap::new();
    slots.insert("arguments", SlotValue::Sequence(vec![]));
    let err = Node::from_slots(NodeKind::Field, slots, Leaves::default()).unwrap_err();
    assert!(matches!(err, VisitError::MalformedNode { .. }));
  }

  #[test]
  fn from_slots_rejects_unknown_slot() {
    let mut slots = HashMap::new();
    slots.insert("name", SlotValue::Single(Some(doc::name("a"))));
    slots.insert("bogus", SlotValue::Sequence(vec![]));
    let err = Node::from_slots(NodeKind::Variable, slots, Leaves::default()).unwrap_err();
    assert!(matches!(err, VisitError::MalformedNode { .. }));
  }

  #[test]
  fn clone_deep_produces_equal_but_independent_tree() {
    let original = doc::anonymous_query(vec![doc::field("a", None)]);
    let copy = original.clone_deep();
    assert_eq!(original, copy);
  }
}
