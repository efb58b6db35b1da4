use tracing::trace;

use crate::Block;
use crate::Blocks;
use crate::LocaleScanner;
use crate::Node;

/// Flatten a document tree into blocks using the default locale scanner.
pub fn extract(node: &Node) -> Blocks {
	extract_with(node, &LocaleScanner::default())
}

/// Flatten a document tree into blocks in depth-first, left-to-right order.
///
/// Text and attribute values are split at locale markers by `scanner`.
/// Buffered code becomes a variable block. Node kinds that produce no output
/// (comments, unbuffered code) contribute nothing.
pub fn extract_with(node: &Node, scanner: &LocaleScanner) -> Blocks {
	let mut extractor = Extractor {
		scanner,
		blocks: Blocks::new(),
	};
	extractor.visit(node);
	extractor.blocks
}

struct Extractor<'s> {
	scanner: &'s LocaleScanner,
	blocks: Blocks,
}

impl Extractor<'_> {
	fn visit(&mut self, node: &Node) {
		match node {
			Node::Block { nodes } | Node::NamedBlock { nodes, .. } => {
				for child in nodes {
					self.visit(child);
				}
			}
			Node::Tag {
				name,
				attributes,
				block,
			} => {
				self.text(format!("<{name}"));
				for attribute in attributes {
					self.text(format!(" {}=", attribute.name));
					self.scanner.scan_into(&attribute.value, &mut *self.blocks);
				}
				self.text(">");

				if let Some(block) = block {
					self.visit(block);
				}

				self.text(format!("</{name}>"));
			}
			Node::Doctype { value } => self.text(format!("<!DOCTYPE {value}>")),
			Node::Text { value } => self.scanner.scan_into(value, &mut *self.blocks),
			Node::Code {
				value,
				buffered: true,
				..
			} => self.blocks.push(Block::variable(value.as_str())),
			other => trace!(?other, "node contributes no blocks"),
		}
	}

	fn text(&mut self, value: impl Into<String>) {
		self.blocks.push(Block::text(value));
	}
}
