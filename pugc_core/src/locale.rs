use std::sync::LazyLock;

use regex::Regex;

use crate::Block;
use crate::c_string_literal;

/// Default name of the translation function called by locale blocks.
pub const DEFAULT_LOCALE_FUNCTION: &str = "_";

/// `_(` up to the first `)`. Parentheses are not balanced, so
/// `_(a (b) c)` matches only `_(a (b)`.
static LOCALE_MARKER: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"_\(([^)]+)\)").expect("locale marker pattern is valid"));

/// Splits text at inline `_(...)` locale markers.
///
/// Literal text between markers becomes [`BlockKind::Text`](crate::BlockKind)
/// blocks. Each marker becomes a locale block holding a call expression, e.g.
/// `_(world)` becomes `_("world")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleScanner {
	function: String,
}

impl Default for LocaleScanner {
	fn default() -> Self {
		Self::new(DEFAULT_LOCALE_FUNCTION)
	}
}

impl LocaleScanner {
	/// Create a scanner whose locale blocks call `function`.
	pub fn new(function: impl Into<String>) -> Self {
		Self {
			function: function.into(),
		}
	}

	pub fn function(&self) -> &str {
		&self.function
	}

	/// Scan `input` and return its blocks. Input without markers yields a
	/// single text block; empty input yields no blocks.
	pub fn scan(&self, input: &str) -> Vec<Block> {
		let mut blocks = vec![];
		self.scan_into(input, &mut blocks);
		blocks
	}

	/// Like [`scan`](Self::scan), appending to an existing sequence.
	pub fn scan_into(&self, input: &str, blocks: &mut impl Extend<Block>) {
		let mut last = 0;

		for captures in LOCALE_MARKER.captures_iter(input) {
			let (Some(marker), Some(argument)) = (captures.get(0), captures.get(1)) else {
				continue;
			};

			if marker.start() > last {
				blocks.extend([Block::text(&input[last..marker.start()])]);
			}
			blocks.extend([Block::locale(self.call(argument.as_str()))]);
			last = marker.end();
		}

		if last < input.len() {
			blocks.extend([Block::text(&input[last..])]);
		}
	}

	/// Build the translation call for a marker argument. The argument may
	/// span lines inside block text.
	fn call(&self, argument: &str) -> String {
		format!("{}(\"{}\")", self.function, c_string_literal(argument.trim()))
	}
}

/// Scan `input` with the default `_` translation function.
pub fn scan(input: &str) -> Vec<Block> {
	LocaleScanner::default().scan(input)
}
