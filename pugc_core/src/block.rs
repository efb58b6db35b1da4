use derive_more::Deref;
use derive_more::DerefMut;
use serde::Deserialize;
use serde::Serialize;

/// The kind of content a [`Block`] contributes to the rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
	/// Literal output, inserted verbatim.
	Text,
	/// An expression evaluated when the page is rendered.
	Variable,
	/// A translation call wrapping a literal string.
	Locale,
}

/// The atomic unit of the intermediate representation.
///
/// Serializes as `{"value": "...", "type": "text"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
	pub value: String,
	#[serde(rename = "type")]
	pub kind: BlockKind,
}

impl Block {
	pub fn text(value: impl Into<String>) -> Self {
		Self {
			value: value.into(),
			kind: BlockKind::Text,
		}
	}

	pub fn variable(value: impl Into<String>) -> Self {
		Self {
			value: value.into(),
			kind: BlockKind::Variable,
		}
	}

	pub fn locale(value: impl Into<String>) -> Self {
		Self {
			value: value.into(),
			kind: BlockKind::Locale,
		}
	}

	pub fn is_text(&self) -> bool {
		self.kind == BlockKind::Text
	}
}

/// An ordered sequence of blocks in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Deref, DerefMut)]
#[serde(transparent)]
pub struct Blocks(
	#[deref]
	#[deref_mut]
	Vec<Block>,
);

impl Blocks {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn into_inner(self) -> Vec<Block> {
		self.0
	}

	/// Concatenate the values of all text blocks, skipping everything else.
	pub fn static_text(&self) -> String {
		self.iter()
			.filter(|block| block.is_text())
			.map(|block| block.value.as_str())
			.collect()
	}
}

impl From<Vec<Block>> for Blocks {
	fn from(blocks: Vec<Block>) -> Self {
		Self(blocks)
	}
}

impl FromIterator<Block> for Blocks {
	fn from_iter<I: IntoIterator<Item = Block>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl IntoIterator for Blocks {
	type IntoIter = std::vec::IntoIter<Block>;
	type Item = Block;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

impl<'a> IntoIterator for &'a Blocks {
	type IntoIter = std::slice::Iter<'a, Block>;
	type Item = &'a Block;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}
