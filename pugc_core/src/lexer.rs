use std::ops::Range;

use logos::Logos;

use crate::Attribute;
use crate::PugcError;
use crate::PugcResult;

/// Tag used when a line starts with a `.class` or `#id` shorthand.
pub(crate) const DEFAULT_TAG: &str = "div";

/// Keywords for control flow and composition. Each of them changes what is
/// rendered at runtime, which a flat block sequence cannot express.
const UNSUPPORTED_KEYWORDS: [&str; 11] = [
	"if", "else", "unless", "each", "for", "while", "case", "when", "mixin", "include", "extends",
];

/// Raw tokens produced by logos for the head of a single line.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
	#[token("//-")]
	UnbufferedComment,
	#[token("//")]
	Comment,
	#[token("|")]
	Pipe,
	#[token("!=")]
	BangEquals,
	#[token("=")]
	Equals,
	#[token("-")]
	Minus,
	#[token("+")]
	Plus,
	#[token(".")]
	Dot,
	#[token("#")]
	Hash,
	#[token(":")]
	Colon,
	#[token("(")]
	ParenOpen,
	#[token(")")]
	ParenClose,
	#[token(",")]
	Comma,
	#[regex(r"[ \t]+")]
	Whitespace,
	#[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*")]
	Ident,
	#[regex(r#""([^"\\]|\\.)*""#)]
	DoubleQuotedString,
	#[regex(r"'([^'\\]|\\.)*'")]
	SingleQuotedString,
}

/// One physical line of the source document.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SourceLine<'a> {
	/// 1-indexed line number.
	pub number: usize,
	/// Count of leading space and tab characters.
	pub indent: usize,
	/// The full line without its terminator.
	pub raw: &'a str,
	/// The line with its indentation removed.
	pub content: &'a str,
}

impl SourceLine<'_> {
	pub fn is_blank(&self) -> bool {
		self.content.trim().is_empty()
	}
}

pub(crate) fn split_lines(source: &str) -> Vec<SourceLine<'_>> {
	source
		.lines()
		.enumerate()
		.map(|(index, raw)| {
			let content = raw.trim_start_matches([' ', '\t']);
			SourceLine {
				number: index + 1,
				indent: raw.len() - content.len(),
				raw,
				content,
			}
		})
		.collect()
}

/// What a single line declares, before indentation is taken into account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LineKind {
	Doctype(String),
	Comment {
		value: String,
		buffered: bool,
	},
	PipedText(String),
	Code {
		value: String,
		buffered: bool,
		escaped: bool,
	},
	NamedBlock(String),
	Tag(TagHead),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TagHead {
	pub name: String,
	pub attributes: Vec<Attribute>,
	pub body: TagBody,
}

/// Whatever follows the tag name, shorthands, and attribute list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TagBody {
	Empty,
	/// `p Hello`
	Text(String),
	/// `p= expr` or `p!= expr`
	Code { value: String, escaped: bool },
	/// `p.` followed by indented raw text lines.
	BlockText,
	/// `li: a Home`
	Expansion(Box<TagHead>),
}

/// Classify a non-blank line.
pub(crate) fn lex_line(line: &SourceLine<'_>) -> PugcResult<LineKind> {
	LineWalker::new(line.content, line.number, line.indent).line_kind()
}

/// Whether `content` starts with a tag head whose attribute list is still
/// open at the end of the line, as in `a(` followed by one attribute per
/// line.
pub(crate) fn opens_attribute_list(content: &str) -> bool {
	let mut depth = 0usize;

	for token in RawToken::lexer(content) {
		match token {
			Ok(RawToken::ParenOpen) => depth += 1,
			Ok(RawToken::ParenClose) if depth > 0 => {
				depth -= 1;
				if depth == 0 {
					return false;
				}
			}
			Ok(RawToken::Ident | RawToken::Dot | RawToken::Hash) if depth == 0 => {}
			_ if depth > 0 => {}
			_ => return false,
		}
	}

	depth > 0
}

/// Walks the logos token stream of one line. Text bodies are taken verbatim
/// from the source rather than reassembled from tokens.
struct LineWalker<'a> {
	/// The line content after indentation.
	source: &'a str,
	/// The collected raw tokens and their byte spans.
	tokens: Vec<(Result<RawToken, ()>, Range<usize>)>,
	/// Current index into `tokens`.
	cursor: usize,
	line: usize,
	indent: usize,
}

impl<'a> LineWalker<'a> {
	fn new(source: &'a str, line: usize, indent: usize) -> Self {
		let tokens = RawToken::lexer(source).spanned().collect();

		Self {
			source,
			tokens,
			cursor: 0,
			line,
			indent,
		}
	}

	fn peek(&self) -> Option<Result<RawToken, ()>> {
		self.tokens.get(self.cursor).map(|(token, _)| *token)
	}

	fn span(&self) -> Range<usize> {
		self.tokens
			.get(self.cursor)
			.map_or(self.source.len()..self.source.len(), |(_, span)| {
				span.clone()
			})
	}

	/// The text of the current token.
	fn slice(&self) -> &'a str {
		self.source.get(self.span()).unwrap_or_default()
	}

	/// Everything from the start of the current token to the end of the line.
	fn rest(&self) -> &'a str {
		self.source.get(self.span().start..).unwrap_or_default()
	}

	fn advance(&mut self) {
		self.cursor += 1;
	}

	fn skip_whitespace(&mut self) {
		while matches!(self.peek(), Some(Ok(RawToken::Whitespace))) {
			self.advance();
		}
	}

	fn error(&self, reason: impl Into<String>) -> PugcError {
		PugcError::malformed(self.line, self.indent + self.span().start + 1, reason)
	}

	fn line_kind(&mut self) -> PugcResult<LineKind> {
		let Some(token) = self.peek() else {
			return Err(self.error("expected content"));
		};

		match token {
			Ok(RawToken::UnbufferedComment) => {
				self.advance();
				Ok(LineKind::Comment {
					value: self.rest().to_string(),
					buffered: false,
				})
			}
			Ok(RawToken::Comment) => {
				self.advance();
				Ok(LineKind::Comment {
					value: self.rest().to_string(),
					buffered: true,
				})
			}
			Ok(RawToken::Pipe) => {
				self.advance();
				Ok(LineKind::PipedText(strip_separator(self.rest()).to_string()))
			}
			Ok(RawToken::Equals) => {
				self.advance();
				Ok(LineKind::Code {
					value: self.expression()?,
					buffered: true,
					escaped: true,
				})
			}
			Ok(RawToken::BangEquals) => {
				self.advance();
				Ok(LineKind::Code {
					value: self.expression()?,
					buffered: true,
					escaped: false,
				})
			}
			Ok(RawToken::Minus) => {
				self.advance();
				Ok(LineKind::Code {
					value: self.expression()?,
					buffered: false,
					escaped: false,
				})
			}
			Ok(RawToken::Plus) => Err(self.error("mixin calls are not supported")),
			Ok(RawToken::Ident) => self.keyword_or_tag(),
			Ok(RawToken::Dot | RawToken::Hash) => self.tag_head().map(LineKind::Tag),
			_ => Err(self.error(format!("unexpected `{}`", self.slice()))),
		}
	}

	/// The remainder of the line as a trimmed, non-empty expression.
	fn expression(&mut self) -> PugcResult<String> {
		let value = self.rest().trim();
		if value.is_empty() {
			return Err(self.error("expected an expression"));
		}

		Ok(value.to_string())
	}

	fn keyword_or_tag(&mut self) -> PugcResult<LineKind> {
		let ident = self.slice();
		let standalone = matches!(
			self.tokens.get(self.cursor + 1),
			None | Some((Ok(RawToken::Whitespace), _))
		);

		if standalone {
			match ident {
				"doctype" => {
					self.advance();
					let value = self.rest().trim();
					let value = if value.is_empty() { "html" } else { value };
					return Ok(LineKind::Doctype(value.to_string()));
				}
				"block" => {
					self.advance();
					let name = self.rest().trim();
					if name.is_empty() {
						return Err(self.error("expected a block name"));
					}
					return Ok(LineKind::NamedBlock(name.to_string()));
				}
				keyword if UNSUPPORTED_KEYWORDS.contains(&keyword) => {
					return Err(self.error(format!("`{keyword}` is not supported")));
				}
				_ => {}
			}
		}

		self.tag_head().map(LineKind::Tag)
	}

	fn tag_head(&mut self) -> PugcResult<TagHead> {
		let name = if matches!(self.peek(), Some(Ok(RawToken::Ident))) {
			let name = self.slice().to_string();
			self.advance();
			name
		} else {
			DEFAULT_TAG.to_string()
		};
		let mut attributes = vec![];

		loop {
			match self.peek() {
				Some(Ok(RawToken::Dot)) => {
					self.advance();
					match self.peek() {
						Some(Ok(RawToken::Ident)) => {
							attributes.push(Attribute::new("class", format!("'{}'", self.slice())));
							self.advance();
						}
						None => {
							return Ok(TagHead {
								name,
								attributes,
								body: TagBody::BlockText,
							});
						}
						Some(Ok(RawToken::Whitespace)) if self.rest().trim().is_empty() => {
							return Ok(TagHead {
								name,
								attributes,
								body: TagBody::BlockText,
							});
						}
						_ => return Err(self.error("expected a class name")),
					}
				}
				Some(Ok(RawToken::Hash)) => {
					self.advance();
					if !matches!(self.peek(), Some(Ok(RawToken::Ident))) {
						return Err(self.error("expected an id"));
					}
					attributes.push(Attribute::new("id", format!("'{}'", self.slice())));
					self.advance();
				}
				Some(Ok(RawToken::ParenOpen)) => {
					self.advance();
					self.attributes(&mut attributes)?;
				}
				_ => break,
			}
		}

		let body = self.tag_body()?;

		Ok(TagHead {
			name,
			attributes,
			body,
		})
	}

	fn tag_body(&mut self) -> PugcResult<TagBody> {
		match self.peek() {
			None => Ok(TagBody::Empty),
			Some(Ok(RawToken::Whitespace)) => {
				let text = strip_separator(self.rest());
				if text.trim().is_empty() {
					Ok(TagBody::Empty)
				} else {
					Ok(TagBody::Text(text.to_string()))
				}
			}
			Some(Ok(RawToken::Equals)) => {
				self.advance();
				Ok(TagBody::Code {
					value: self.expression()?,
					escaped: true,
				})
			}
			Some(Ok(RawToken::BangEquals)) => {
				self.advance();
				Ok(TagBody::Code {
					value: self.expression()?,
					escaped: false,
				})
			}
			Some(Ok(RawToken::Colon)) => {
				self.advance();
				self.skip_whitespace();
				let error = self.error("expected a tag after `:`");
				if self.peek().is_none() {
					return Err(error);
				}
				match self.line_kind()? {
					LineKind::Tag(head) => Ok(TagBody::Expansion(Box::new(head))),
					_ => Err(error),
				}
			}
			_ => Err(self.error(format!("unexpected `{}` after tag", self.slice()))),
		}
	}

	/// Parse `name=value` pairs up to and including the closing `)`.
	fn attributes(&mut self, attributes: &mut Vec<Attribute>) -> PugcResult<()> {
		loop {
			while matches!(
				self.peek(),
				Some(Ok(RawToken::Whitespace | RawToken::Comma))
			) {
				self.advance();
			}

			let name = match self.peek() {
				Some(Ok(RawToken::ParenClose)) => {
					self.advance();
					return Ok(());
				}
				Some(Ok(RawToken::Ident)) => self.slice().to_string(),
				Some(Ok(RawToken::DoubleQuotedString | RawToken::SingleQuotedString)) => {
					let quoted = self.slice();
					quoted[1..quoted.len() - 1].to_string()
				}
				None => return Err(self.error("unterminated attribute list")),
				_ => {
					return Err(self.error(format!(
						"unexpected `{}` in attribute list",
						self.slice()
					)));
				}
			};
			self.advance();
			self.skip_whitespace();

			let value = if matches!(
				self.peek(),
				Some(Ok(RawToken::Equals | RawToken::BangEquals))
			) {
				self.advance();
				self.skip_whitespace();
				self.attribute_value()?
			} else {
				"true".to_string()
			};

			attributes.push(Attribute { name, value });
		}
	}

	/// Collect the raw text of one attribute value. The value ends at the
	/// first `,` or `)` that is not nested inside brackets, or at whitespace
	/// that is not next to an operator such as the `+` in `base + "/x"`.
	fn attribute_value(&mut self) -> PugcResult<String> {
		let start = self.span().start;
		let mut end = start;
		let mut depth = 0usize;
		let mut after_operator = false;

		loop {
			let Some(token) = self.peek() else {
				return Err(self.error("unterminated attribute list"));
			};

			match token {
				Ok(RawToken::Comma | RawToken::ParenClose) if depth == 0 => break,
				Ok(RawToken::Whitespace) if depth == 0 => {
					if !after_operator && !self.operator_at(self.cursor + 1) {
						break;
					}
					self.advance();
					continue;
				}
				Ok(RawToken::ParenOpen) => depth += 1,
				Ok(RawToken::ParenClose) => depth -= 1,
				Err(()) => {
					match self.source.as_bytes().get(self.span().start) {
						Some(b'[' | b'{') => depth += 1,
						Some(b']' | b'}') => depth = depth.saturating_sub(1),
						Some(b'"' | b'\'') => return Err(self.error("unterminated string")),
						_ => {}
					}
				}
				Ok(_) => {}
			}

			after_operator = self.operator_at(self.cursor);
			end = self.span().end;
			self.advance();
		}

		let value = self.source.get(start..end).unwrap_or_default();
		if value.is_empty() {
			return Err(self.error("expected an attribute value"));
		}

		Ok(value.to_string())
	}

	/// Whether the token at `index` is a binary or ternary operator.
	fn operator_at(&self, index: usize) -> bool {
		match self.tokens.get(index) {
			Some((
				Ok(
					RawToken::Plus
					| RawToken::Minus
					| RawToken::Pipe
					| RawToken::Colon
					| RawToken::Equals
					| RawToken::BangEquals,
				),
				_,
			)) => true,
			Some((Err(()), span)) => matches!(
				self.source.as_bytes().get(span.start),
				Some(b'*' | b'/' | b'%' | b'<' | b'>' | b'&' | b'?')
			),
			_ => false,
		}
	}
}

/// Drop the single space or tab that separates a sigil or tag from its text.
fn strip_separator(text: &str) -> &str {
	text.strip_prefix([' ', '\t']).unwrap_or(text)
}
