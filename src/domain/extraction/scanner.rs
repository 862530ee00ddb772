//! Literal-delimiter scanner for fenced ```json blocks.

/// Opening fence of a structured block.
pub const JSON_FENCE: &str = "```json";

/// Closing fence.
pub const FENCE: &str = "```";

/// A fenced block located in a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FencedBlock<'a> {
    /// Trimmed text between the fences.
    pub body: &'a str,
    /// Byte offset of the opening fence.
    pub start: usize,
    /// Byte offset just past the closing fence.
    pub end: usize,
}

/// Iterator over the complete ```json blocks of a text, in order.
///
/// An opening fence with no closing fence ends the iteration.
#[derive(Debug, Clone)]
pub struct FencedBlocks<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for FencedBlocks<'a> {
    type Item = FencedBlock<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.text.get(self.pos..)?;
        let start = self.pos + rest.find(JSON_FENCE)?;
        let body_start = start + JSON_FENCE.len();
        let body_len = self.text[body_start..].find(FENCE)?;
        let end = body_start + body_len + FENCE.len();
        self.pos = end;

        Some(FencedBlock {
            body: self.text[body_start..body_start + body_len].trim(),
            start,
            end,
        })
    }
}

/// Scans `text` for ```json blocks.
pub fn fenced_blocks(text: &str) -> FencedBlocks<'_> {
    FencedBlocks { text, pos: 0 }
}

/// The first complete ```json block, if any.
pub fn first_json_block(text: &str) -> Option<FencedBlock<'_>> {
    fenced_blocks(text).next()
}
