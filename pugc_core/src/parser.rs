use tracing::debug;

use crate::Node;
use crate::PugcError;
use crate::PugcResult;
use crate::lexer::LineKind;
use crate::lexer::SourceLine;
use crate::lexer::TagBody;
use crate::lexer::TagHead;
use crate::lexer::lex_line;
use crate::lexer::opens_attribute_list;
use crate::lexer::split_lines;

/// Parse a pug document into a tree rooted at a [`Node::Block`].
///
/// Nesting is decided by indentation: a line indented deeper than the line
/// before it belongs to that line, which must be a tag, a named block or a
/// comment. Blank lines are ignored outside of block text. An attribute
/// list may continue over several lines until its closing `)`.
pub fn parse(source: impl AsRef<str>) -> PugcResult<Node> {
	let lines = split_lines(source.as_ref());
	let mut parser = Parser { lines, cursor: 0 };
	let nodes = parser.children(None)?;

	debug!(lines = parser.lines.len(), nodes = nodes.len(), "parsed document");

	Ok(Node::block(nodes))
}

struct Parser<'a> {
	lines: Vec<SourceLine<'a>>,
	cursor: usize,
}

impl<'a> Parser<'a> {
	/// Move past blank lines and return the next line with content.
	fn next_content_line(&mut self) -> Option<SourceLine<'a>> {
		while let Some(line) = self.lines.get(self.cursor) {
			if !line.is_blank() {
				return Some(*line);
			}
			self.cursor += 1;
		}

		None
	}

	/// Parse sibling lines nested deeper than `parent_indent`.
	fn children(&mut self, parent_indent: Option<usize>) -> PugcResult<Vec<Node>> {
		let mut nodes = vec![];
		let mut level: Option<usize> = None;
		let mut previous_piped = false;

		while let Some(line) = self.next_content_line() {
			if parent_indent.is_some_and(|parent| line.indent <= parent) {
				break;
			}

			match level {
				None => level = Some(line.indent),
				Some(level) if line.indent > level => {
					return Err(PugcError::malformed(
						line.number,
						line.indent + 1,
						"unexpected indentation",
					));
				}
				Some(level) if line.indent < level => {
					return Err(PugcError::malformed(
						line.number,
						line.indent + 1,
						"inconsistent indentation",
					));
				}
				Some(_) => {}
			}

			self.cursor += 1;
			let joined;
			let line = if opens_attribute_list(line.content) {
				joined = self.attribute_continuation(line.content);
				SourceLine {
					content: joined.as_str(),
					..line
				}
			} else {
				line
			};
			let kind = lex_line(&line)?;
			let piped = matches!(kind, LineKind::PipedText(_));

			match kind {
				LineKind::Doctype(value) => nodes.push(Node::Doctype { value }),
				LineKind::Comment { value, buffered } => {
					self.skip_nested(line.indent);
					nodes.push(Node::Comment { value, buffered });
				}
				LineKind::PipedText(text) => {
					if previous_piped {
						nodes.push(Node::text("\n"));
					}
					nodes.extend(interpolate(&text, &line)?);
				}
				LineKind::Code {
					value,
					buffered,
					escaped,
				} => {
					nodes.push(Node::Code {
						value,
						buffered,
						escaped,
					});
				}
				LineKind::NamedBlock(name) => {
					let children = self.children(Some(line.indent))?;
					nodes.push(Node::NamedBlock {
						name,
						nodes: children,
					});
				}
				LineKind::Tag(head) => nodes.push(self.tag(head, &line)?),
			}

			previous_piped = piped;
		}

		Ok(nodes)
	}

	fn tag(&mut self, head: TagHead, line: &SourceLine<'_>) -> PugcResult<Node> {
		let TagHead {
			name,
			attributes,
			body,
		} = head;
		let mut children = vec![];

		match body {
			TagBody::Empty => {}
			TagBody::Text(text) => children.extend(interpolate(&text, line)?),
			TagBody::Code { value, escaped } => {
				children.push(Node::Code {
					value,
					buffered: true,
					escaped,
				});
			}
			TagBody::BlockText => {
				let text = self.block_text(line.indent);
				children.extend(interpolate(&text, line)?);
			}
			TagBody::Expansion(inner) => children.push(self.tag(*inner, line)?),
		}

		// After an expansion the innermost tag has already taken the nested
		// lines, so this finds nothing.
		children.extend(self.children(Some(line.indent))?);

		Ok(Node::Tag {
			name,
			attributes,
			block: (!children.is_empty()).then(|| Box::new(Node::block(children))),
		})
	}

	/// Collect the raw text of every line nested deeper than `parent_indent`,
	/// with the shallowest indentation removed. Interior blank lines are kept.
	fn block_text(&mut self, parent_indent: usize) -> String {
		let start = self.cursor;
		let mut end = start;

		while let Some(line) = self.lines.get(self.cursor) {
			self.cursor += 1;
			if line.is_blank() {
				continue;
			}
			if line.indent <= parent_indent {
				self.cursor -= 1;
				break;
			}
			end = self.cursor;
		}
		self.cursor = end;

		let body = &self.lines[start..end];
		let base = body
			.iter()
			.filter(|line| !line.is_blank())
			.map(|line| line.indent)
			.min()
			.unwrap_or(0);

		body.iter()
			.map(|line| line.raw.get(base..).unwrap_or_default())
			.collect::<Vec<_>>()
			.join("\n")
	}

	/// Append the following lines to a tag line until its attribute list is
	/// closed or the document ends.
	fn attribute_continuation(&mut self, content: &str) -> String {
		let mut joined = content.to_string();

		while opens_attribute_list(&joined) {
			let Some(next) = self.lines.get(self.cursor) else {
				break;
			};
			joined.push(' ');
			joined.push_str(next.content.trim_end());
			self.cursor += 1;
		}

		joined
	}

	/// Skip every line nested deeper than `parent_indent`.
	fn skip_nested(&mut self, parent_indent: usize) {
		while let Some(line) = self.lines.get(self.cursor) {
			if !line.is_blank() && line.indent <= parent_indent {
				break;
			}
			self.cursor += 1;
		}
	}
}

/// Split text at `#{expr}` and `!{expr}` interpolations. Each interpolation
/// becomes a buffered [`Node::Code`]; `\#{` and `\!{` stay literal.
fn interpolate(text: &str, line: &SourceLine<'_>) -> PugcResult<Vec<Node>> {
	let bytes = text.as_bytes();
	let mut nodes = vec![];
	let mut literal = String::new();
	let mut start = 0;
	let mut index = 0;

	while index < bytes.len() {
		match bytes[index] {
			b'\\'
				if matches!(bytes.get(index + 1), Some(b'#' | b'!'))
					&& bytes.get(index + 2) == Some(&b'{') =>
			{
				literal.push_str(&text[start..index]);
				start = index + 1;
				index += 3;
			}
			sigil @ (b'#' | b'!') if bytes.get(index + 1) == Some(&b'{') => {
				let Some(close) = closing_brace(bytes, index + 2) else {
					return Err(PugcError::malformed(
						line.number,
						line.indent + 1,
						"unterminated interpolation",
					));
				};

				literal.push_str(&text[start..index]);
				if !literal.is_empty() {
					nodes.push(Node::text(std::mem::take(&mut literal)));
				}
				nodes.push(Node::Code {
					value: text[index + 2..close].trim().to_string(),
					buffered: true,
					escaped: sigil == b'#',
				});

				index = close + 1;
				start = index;
			}
			_ => index += 1,
		}
	}

	literal.push_str(&text[start..]);
	if !literal.is_empty() {
		nodes.push(Node::text(literal));
	}

	Ok(nodes)
}

/// Index of the `}` closing a brace opened just before `from`.
fn closing_brace(bytes: &[u8], from: usize) -> Option<usize> {
	let mut depth = 0usize;

	for (offset, byte) in bytes.iter().enumerate().skip(from) {
		match byte {
			b'{' => depth += 1,
			b'}' if depth == 0 => return Some(offset),
			b'}' => depth -= 1,
			_ => {}
		}
	}

	None
}
