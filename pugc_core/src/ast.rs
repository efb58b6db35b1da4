/// A node in the parsed document tree.
///
/// The tree is produced by [`parse`](crate::parse) and owns all of its
/// children, so it is always finite and acyclic. Children are stored in
/// document order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Node {
	/// The document root or the content of a tag: an ordered list of nodes.
	Block { nodes: Vec<Node> },
	/// `block name`: a named region with its own children.
	NamedBlock { name: String, nodes: Vec<Node> },
	/// An element with its attributes and optional content block.
	Tag {
		name: String,
		attributes: Vec<Attribute>,
		block: Option<Box<Node>>,
	},
	/// `doctype html`
	Doctype { value: String },
	/// Literal text. May contain `_(...)` locale markers.
	Text { value: String },
	/// An expression. Only `buffered` code writes to the output.
	Code {
		value: String,
		buffered: bool,
		/// `=` and `#{}` set this, `!=` and `!{}` clear it. Informational
		/// only: generated code inserts the value of both forms unchanged.
		escaped: bool,
	},
	/// A `//` or `//-` comment. Never written to the output.
	Comment { value: String, buffered: bool },
}

/// A single `name=value` pair in a tag's attribute list.
///
/// `value` is the raw source text of the value, quotes included, so
/// `a(href="/home")` has the value `"/home"` with the double quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
	pub name: String,
	pub value: String,
}

impl Node {
	pub fn block(nodes: Vec<Node>) -> Self {
		Self::Block { nodes }
	}

	pub fn text(value: impl Into<String>) -> Self {
		Self::Text {
			value: value.into(),
		}
	}

	/// A buffered, escaped expression such as `= name` or `#{name}`.
	pub fn code(value: impl Into<String>) -> Self {
		Self::Code {
			value: value.into(),
			buffered: true,
			escaped: true,
		}
	}

	/// A tag with no attributes. An empty `children` list leaves the content
	/// block unset.
	pub fn tag(name: impl Into<String>, children: Vec<Node>) -> Self {
		Self::Tag {
			name: name.into(),
			attributes: vec![],
			block: (!children.is_empty()).then(|| Box::new(Self::block(children))),
		}
	}

	/// The direct children of a container node.
	pub fn children(&self) -> Option<&[Node]> {
		match self {
			Self::Block { nodes } | Self::NamedBlock { nodes, .. } => Some(nodes),
			Self::Tag { block, .. } => block.as_deref().and_then(Node::children),
			_ => None,
		}
	}
}

impl Attribute {
	pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			value: value.into(),
		}
	}
}
