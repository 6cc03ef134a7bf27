pub mod fdx_constants;

use unicode_segmentation::UnicodeSegmentation;
pub use fdx_constants::FdxConstants;
use fdx_constants::{CHARACTER_EXTENSION, WHITESPACE_RUN};

/// 默认展示截断宽度
pub const DEFAULT_DISPLAY_WIDTH: usize = 50;

/// 截断展示文本
///
/// 按字形（grapheme）计数，超过 `width` 时保留前 `width` 个并追加 `...`
pub fn truncate_for_display(text: &str, width: usize) -> String {
    let mut graphemes = text.graphemes(true);
    let head: String = graphemes.by_ref().take(width).collect();
    if graphemes.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

/// 规范化角色名，用于统计
///
/// 去掉 (V.O.)、(CONT'D) 之类的后缀，合并空白并转为大写
pub fn normalize_character_name(name: &str) -> String {
    let stripped = CHARACTER_EXTENSION.replace(name, "");
    WHITESPACE_RUN
        .replace_all(stripped.trim(), " ")
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_graphemes() {
        assert_eq!(truncate_for_display("hello", 5), "hello");
        assert_eq!(truncate_for_display("hello!", 5), "hello...");
        // 中文与组合字符按字形计数
        assert_eq!(truncate_for_display("你好世界", 2), "你好...");
        assert_eq!(truncate_for_display("e\u{301}e\u{301}", 1), "e\u{301}...");
    }

    #[test]
    fn character_extensions_are_removed() {
        assert_eq!(normalize_character_name("BOB (V.O.)"), "BOB");
        assert_eq!(normalize_character_name("  mary  jane (CONT'D) (O.S.)"), "MARY JANE");
        assert_eq!(normalize_character_name("顾清（画外音）"), "顾清");
        assert_eq!(normalize_character_name("ALICE"), "ALICE");
    }
}
