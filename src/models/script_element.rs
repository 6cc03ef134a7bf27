use serde::{Deserialize, Serialize};
use std::fmt;
use crate::utils::truncate_for_display;

/// 元素类型及其内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementKind {
    SceneHeading { text: String },
    Character { name: String },
    Parenthetical { text: String },
    /// 对白，character 一定是之前出现过的角色名
    Dialogue { character: String, text: String },
    Action { text: String },
    Transition { text: String },
}

impl ElementKind {
    /// 类型名称，与 JSON 中的 type 字段一致
    pub fn type_name(&self) -> &'static str {
        match self {
            ElementKind::SceneHeading { .. } => "scene_heading",
            ElementKind::Character { .. } => "character",
            ElementKind::Parenthetical { .. } => "parenthetical",
            ElementKind::Dialogue { .. } => "dialogue",
            ElementKind::Action { .. } => "action",
            ElementKind::Transition { .. } => "transition",
        }
    }

    /// 元素的主要文本（角色元素返回角色名）
    pub fn text(&self) -> &str {
        match self {
            ElementKind::SceneHeading { text }
            | ElementKind::Parenthetical { text }
            | ElementKind::Dialogue { text, .. }
            | ElementKind::Action { text }
            | ElementKind::Transition { text } => text,
            ElementKind::Character { name } => name,
        }
    }
}

/// 剧本元素
///
/// 解析的输出单元，构造后不再修改。`line` 为源文档中段落的序号（从 1 开始），
/// 用于回溯定位。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptElement {
    #[serde(flatten)]
    pub kind: ElementKind,
    pub line: Option<usize>,
}

impl ScriptElement {
    pub fn new(kind: ElementKind, line: Option<usize>) -> Self {
        ScriptElement { kind, line }
    }

    pub fn scene_heading(text: impl Into<String>, line: Option<usize>) -> Self {
        Self::new(ElementKind::SceneHeading { text: text.into() }, line)
    }

    pub fn character(name: impl Into<String>, line: Option<usize>) -> Self {
        Self::new(ElementKind::Character { name: name.into() }, line)
    }

    pub fn parenthetical(text: impl Into<String>, line: Option<usize>) -> Self {
        Self::new(ElementKind::Parenthetical { text: text.into() }, line)
    }

    pub fn dialogue(character: impl Into<String>, text: impl Into<String>, line: Option<usize>) -> Self {
        Self::new(
            ElementKind::Dialogue {
                character: character.into(),
                text: text.into(),
            },
            line,
        )
    }

    pub fn action(text: impl Into<String>, line: Option<usize>) -> Self {
        Self::new(ElementKind::Action { text: text.into() }, line)
    }

    pub fn transition(text: impl Into<String>, line: Option<usize>) -> Self {
        Self::new(ElementKind::Transition { text: text.into() }, line)
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    pub fn text(&self) -> &str {
        self.kind.text()
    }

    /// 角色元素的角色名或对白所属角色，其他元素返回 None
    pub fn character_name(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Character { name } => Some(name),
            ElementKind::Dialogue { character, .. } => Some(character),
            _ => None,
        }
    }

    /// 生成简短的展示文本，文本超过 `width` 个字形时截断
    pub fn display_with_width(&self, width: usize) -> String {
        let type_name = self.type_name();
        match &self.kind {
            ElementKind::Character { name } if !name.is_empty() => {
                format!("<{}: {}>", type_name, name)
            }
            _ if !self.text().is_empty() => {
                format!("<{}: '{}'>", type_name, truncate_for_display(self.text(), width))
            }
            _ => format!("<{}>", type_name),
        }
    }
}

impl fmt::Display for ScriptElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_with_width(crate::utils::DEFAULT_DISPLAY_WIDTH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_element_type() {
        assert_eq!(ScriptElement::character("BOB", Some(2)).to_string(), "<character: BOB>");
        assert_eq!(ScriptElement::dialogue("BOB", "Hi.", Some(3)).to_string(), "<dialogue: 'Hi.'>");
        assert_eq!(ScriptElement::action("", None).to_string(), "<action>");
    }

    #[test]
    fn display_truncates_long_text() {
        let text = "A".repeat(60);
        let shown = ScriptElement::action(text, Some(1)).to_string();
        assert_eq!(shown, format!("<action: '{}...'>", "A".repeat(50)));
    }

    #[test]
    fn character_name_for_cues_and_dialogue() {
        assert_eq!(ScriptElement::character("BOB", Some(1)).character_name(), Some("BOB"));
        assert_eq!(ScriptElement::dialogue("BOB", "Hi.", Some(2)).character_name(), Some("BOB"));
        assert_eq!(ScriptElement::parenthetical("(smiling)", Some(3)).character_name(), None);
        assert_eq!(ScriptElement::action("BOB waves.", Some(4)).character_name(), None);
    }

    #[test]
    fn serializes_with_type_tag() {
        let element = ScriptElement::dialogue("BOB", "Hi.", Some(3));
        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json["type"], "dialogue");
        assert_eq!(json["character"], "BOB");
        assert_eq!(json["text"], "Hi.");
        assert_eq!(json["line"], 3);
    }
}
