use crate::Block;
use crate::Blocks;

/// Merge every run of adjacent text blocks into one block.
///
/// The result concatenates to the same output as the input, keeps all other
/// blocks in place, never has two text blocks next to each other and never
/// contains an empty text block. Applying it twice changes nothing.
pub fn optimize(blocks: impl IntoIterator<Item = Block>) -> Blocks {
	let mut optimized = Blocks::new();
	let mut buffer = String::new();

	for block in blocks {
		if block.is_text() {
			buffer.push_str(&block.value);
			continue;
		}

		if !buffer.is_empty() {
			optimized.push(Block::text(std::mem::take(&mut buffer)));
		}
		optimized.push(block);
	}

	if !buffer.is_empty() {
		optimized.push(Block::text(buffer));
	}

	optimized
}
