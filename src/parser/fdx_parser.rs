use std::fmt;
use std::path::Path;
use chrono::Local;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use crate::fdx::{FdxDecoder, FdxError, FdxResult, XmlFdxDecoder};
use crate::models::{Conf, Paragraph, ParagraphKind, ScreenplayProperties, ScriptElement};
use crate::parser::properties::record_element;

/// 解析失败类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseFailure {
    DocumentNotFound,
    DocumentDecodeError,
    MalformedStructure,
}

impl From<&FdxError> for ParseFailure {
    fn from(err: &FdxError) -> Self {
        match err {
            FdxError::DocumentNotFound(_) => ParseFailure::DocumentNotFound,
            FdxError::DocumentDecodeError(_) => ParseFailure::DocumentDecodeError,
            FdxError::MalformedStructure(_) => ParseFailure::MalformedStructure,
        }
    }
}

/// 警告类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// 对白前没有角色，已按动作处理
    OrphanDialogue,
}

/// 解析过程中可恢复的异常
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseWarning {
    pub kind: WarningKind,
    pub line: usize,
    pub text: String,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            WarningKind::OrphanDialogue => write!(
                f,
                "第 {} 段对白前没有角色，已按动作处理: '{}'",
                self.line, self.text
            ),
        }
    }
}

/// 解析结果
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParseOutput {
    pub elements: Vec<ScriptElement>,
    pub warnings: Vec<ParseWarning>,
    pub properties: ScreenplayProperties,
    pub title_page: Vec<String>,
    /// 失败类型，成功时为 None
    pub failure: Option<ParseFailure>,
    /// 失败诊断信息
    pub diagnostic: Option<String>,
    /// 解析耗时(毫秒)
    pub parse_time: u64,
    /// 解析开始时间，RFC 3339
    pub parsed_at: String,
}

impl ParseOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// 失败时的空结果
    pub fn from_error(err: &FdxError) -> Self {
        ParseOutput {
            failure: Some(ParseFailure::from(err)),
            diagnostic: Some(err.to_string()),
            parsed_at: Local::now().to_rfc3339(),
            ..Self::default()
        }
    }

    pub fn is_ok(&self) -> bool {
        self.failure.is_none()
    }
}

/// 单个段落的分类结果
#[derive(Debug, Clone, PartialEq)]
pub struct Classified {
    pub element: ScriptElement,
    /// 分类后的当前角色
    pub speaker: Option<String>,
    pub warning: Option<ParseWarning>,
}

/// 段落分类
///
/// `speaker` 为当前说话角色。只有角色段落设置角色，括号注释保持不变，
/// 其余段落都会清空角色。没有角色的对白降级为动作并附带警告。
pub fn classify_paragraph(speaker: Option<String>, kind: &ParagraphKind, text: String, line: usize) -> Classified {
    let at = Some(line);
    let (element, speaker, warning) = match kind {
        ParagraphKind::SceneHeading => (ScriptElement::scene_heading(text, at), None, None),
        ParagraphKind::Character => {
            let name = text.clone();
            (ScriptElement::character(text, at), Some(name), None)
        }
        ParagraphKind::Parenthetical => (ScriptElement::parenthetical(text, at), speaker, None),
        ParagraphKind::Dialogue => match speaker {
            Some(character) => (ScriptElement::dialogue(character, text, at), None, None),
            None => {
                let warning = ParseWarning {
                    kind: WarningKind::OrphanDialogue,
                    line,
                    text: text.clone(),
                };
                (ScriptElement::action(text, at), None, Some(warning))
            }
        },
        ParagraphKind::Action => (ScriptElement::action(text, at), None, None),
        ParagraphKind::Transition => (ScriptElement::transition(text, at), None, None),
        // 未知类型按动作处理
        ParagraphKind::Other(_) => (ScriptElement::action(text, at), None, None),
    };
    Classified { element, speaker, warning }
}

/// FDX 剧本解析器
pub struct FdxParser<D: FdxDecoder = XmlFdxDecoder> {
    decoder: D,
    conf: Conf,
}

impl FdxParser<XmlFdxDecoder> {
    pub fn new() -> Self {
        Self::with_conf(Conf::default())
    }

    pub fn with_conf(conf: Conf) -> Self {
        FdxParser {
            decoder: XmlFdxDecoder::new(),
            conf,
        }
    }
}

impl Default for FdxParser<XmlFdxDecoder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: FdxDecoder> FdxParser<D> {
    pub fn with_decoder(decoder: D, conf: Conf) -> Self {
        FdxParser { decoder, conf }
    }

    pub fn conf(&self) -> &Conf {
        &self.conf
    }

    /// 解析 FDX 文件
    ///
    /// 不会返回错误：文件不存在或无法解码时返回空结果，
    /// 并在 `failure` 与 `diagnostic` 中说明原因。
    pub fn parse_file(&self, path: impl AsRef<Path>) -> ParseOutput {
        let path = path.as_ref();
        self.try_parse_file(path).unwrap_or_else(|e| {
            warn!("FDX 剧本解析失败 {}: {}", path.display(), e);
            ParseOutput::from_error(&e)
        })
    }

    /// 解析 FDX 文件，错误向上传递
    pub fn try_parse_file(&self, path: impl AsRef<Path>) -> FdxResult<ParseOutput> {
        let started = Local::now();
        let document = self.decoder.decode_file(path.as_ref())?;
        let (paragraphs, title_page) = document.into_paragraphs()?;
        Ok(self.finish(started, &paragraphs, title_page))
    }

    /// 解析内存中的 FDX 文本，失败语义同 [`FdxParser::parse_file`]
    pub fn parse_str(&self, xml: &str) -> ParseOutput {
        self.try_parse_str(xml).unwrap_or_else(|e| {
            warn!("FDX 文本解析失败: {}", e);
            ParseOutput::from_error(&e)
        })
    }

    pub fn try_parse_str(&self, xml: &str) -> FdxResult<ParseOutput> {
        let started = Local::now();
        let (paragraphs, title_page) = self.decoder.decode_str(xml)?.into_paragraphs()?;
        Ok(self.finish(started, &paragraphs, title_page))
    }

    /// 对已解码的段落进行分类
    pub fn parse_paragraphs(&self, paragraphs: &[Paragraph]) -> ParseOutput {
        self.finish(Local::now(), paragraphs, Vec::new())
    }

    fn finish(&self, started: chrono::DateTime<Local>, paragraphs: &[Paragraph], title_page: Vec<String>) -> ParseOutput {
        let mut result = self.classify_all(paragraphs);
        result.title_page = title_page;
        result.parsed_at = started.to_rfc3339();
        result.parse_time = (Local::now() - started).num_milliseconds().max(0) as u64;
        debug!(
            "解析完成: {} 个段落 -> {} 个元素, {} 条警告, 耗时 {}ms",
            paragraphs.len(),
            result.elements.len(),
            result.warnings.len(),
            result.parse_time
        );
        result
    }

    // 主分类循环，当前角色作为循环变量传递
    fn classify_all(&self, paragraphs: &[Paragraph]) -> ParseOutput {
        let mut result = ParseOutput::new();
        result.elements.reserve(paragraphs.len());
        let mut speaker: Option<String> = None;

        for paragraph in paragraphs {
            let text = if self.conf.trim_text {
                paragraph.text.trim().to_string()
            } else {
                paragraph.text.clone()
            };

            if self.conf.skip_empty_paragraphs && text.trim().is_empty() {
                continue;
            }

            let step = classify_paragraph(speaker, &paragraph.kind, text, paragraph.line);
            speaker = step.speaker;

            if let Some(warning) = step.warning {
                warn!("{}", warning);
                result.warnings.push(warning);
            }
            if self.conf.collect_properties {
                record_element(&mut result.properties, &step.element);
            }
            result.elements.push(step.element);
        }

        result
    }
}
