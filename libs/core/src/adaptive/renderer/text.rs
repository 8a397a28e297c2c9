use crate::adaptive::model::TextBlock;

use super::visual::{TextView, View};

const SUBTLE_OPACITY: f32 = 0.6;

pub(super) fn render_text_block(block: &TextBlock) -> View {
    // Unwrapped text is a single ellipsized line regardless of maxLines.
    let max_lines = if block.wrap { block.max_lines } else { Some(1) };
    View::Text(TextView {
        text: block.text.clone(),
        color: block.color.hex(),
        font_size: block.size.font_size(),
        font_weight: block.weight.font_weight(),
        opacity: if block.subtle { SUBTLE_OPACITY } else { 1.0 },
        align: block.horizontal_alignment.text_align(),
        max_lines,
        ellipsize: max_lines.is_some(),
    })
}
