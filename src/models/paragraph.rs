use serde::{Deserialize, Serialize};
use crate::utils::fdx_constants::FdxConstants;

/// FDX 段落类型
///
/// 对应 `<Paragraph Type="...">` 属性，无法识别的类型保留原始标签。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParagraphKind {
    SceneHeading,
    Character,
    Parenthetical,
    Dialogue,
    Action,
    Transition,
    Other(String),
}

impl ParagraphKind {
    pub fn from_label(label: &str) -> Self {
        match label {
            FdxConstants::SCENE_HEADING => ParagraphKind::SceneHeading,
            FdxConstants::CHARACTER => ParagraphKind::Character,
            FdxConstants::PARENTHETICAL => ParagraphKind::Parenthetical,
            FdxConstants::DIALOGUE => ParagraphKind::Dialogue,
            FdxConstants::ACTION => ParagraphKind::Action,
            FdxConstants::TRANSITION => ParagraphKind::Transition,
            other => ParagraphKind::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ParagraphKind::SceneHeading => FdxConstants::SCENE_HEADING,
            ParagraphKind::Character => FdxConstants::CHARACTER,
            ParagraphKind::Parenthetical => FdxConstants::PARENTHETICAL,
            ParagraphKind::Dialogue => FdxConstants::DIALOGUE,
            ParagraphKind::Action => FdxConstants::ACTION,
            ParagraphKind::Transition => FdxConstants::TRANSITION,
            ParagraphKind::Other(label) => label,
        }
    }
}

/// 解码后的段落：类型标签 + 纯文本
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub kind: ParagraphKind,
    pub text: String,
    /// 段落序号，从 1 开始
    pub line: usize,
}

impl Paragraph {
    pub fn new(kind: ParagraphKind, text: impl Into<String>, line: usize) -> Self {
        Paragraph {
            kind,
            text: text.into(),
            line,
        }
    }

    /// 按标签创建段落，测试和 API 中使用
    pub fn from_label(label: &str, text: impl Into<String>, line: usize) -> Self {
        Self::new(ParagraphKind::from_label(label), text, line)
    }
}
