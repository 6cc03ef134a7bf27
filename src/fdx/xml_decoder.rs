use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use crate::fdx::{FdxDecoder, FdxDocument, FdxError, FdxResult};
use crate::models::{Paragraph, ParagraphKind};
use crate::utils::FdxConstants;

/// 段落所在区域
#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    Body,
    TitlePage,
}

/// 尚未闭合的段落
#[derive(Debug)]
struct OpenParagraph {
    kind: ParagraphKind,
    text: String,
    section: Section,
    /// 段落开始时的元素深度
    depth: usize,
    /// 是否包含子段落（如 DualDialogue 包装）
    has_children: bool,
    /// 是否已在子段落之前输出
    emitted: bool,
}

/// 基于 quick-xml 的 FDX 解码器
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlFdxDecoder;

impl XmlFdxDecoder {
    pub fn new() -> Self {
        XmlFdxDecoder
    }
}

// 判断段落所在区域：只接受 Content 的直接子段落，以及 DualDialogue 中的段落。
// SceneProperties/Summary 等容器中的段落不属于正文。
fn section_of(path: &[Vec<u8>]) -> Option<Section> {
    let is = |name: &Vec<u8>, expected: &[u8]| name.as_slice() == expected;
    match path {
        [root, content] if is(root, FdxConstants::ROOT) && is(content, FdxConstants::CONTENT) => {
            Some(Section::Body)
        }
        [root, content, paragraph, dual]
            if is(root, FdxConstants::ROOT)
                && is(content, FdxConstants::CONTENT)
                && is(paragraph, FdxConstants::PARAGRAPH)
                && is(dual, FdxConstants::DUAL_DIALOGUE) =>
        {
            Some(Section::Body)
        }
        [root, title, content]
            if is(root, FdxConstants::ROOT)
                && is(title, FdxConstants::TITLE_PAGE)
                && is(content, FdxConstants::CONTENT) =>
        {
            Some(Section::TitlePage)
        }
        _ => None,
    }
}

fn paragraph_kind(element: &BytesStart) -> FdxResult<ParagraphKind> {
    let attr = element
        .try_get_attribute(FdxConstants::TYPE_ATTR)
        .map_err(|e| FdxError::DocumentDecodeError(format!("段落属性无效: {}", e)))?;
    match attr {
        Some(attr) => {
            let label = attr
                .unescape_value()
                .map_err(|e| FdxError::DocumentDecodeError(format!("段落类型无效: {}", e)))?;
            Ok(ParagraphKind::from_label(&label))
        }
        None => Ok(ParagraphKind::Other(String::new())),
    }
}

/// 解码过程中的状态
#[derive(Default)]
struct DecodeState {
    path: Vec<Vec<u8>>,
    open: Vec<OpenParagraph>,
    body: Option<Vec<Paragraph>>,
    title_page: Vec<String>,
    in_text: bool,
    saw_root: bool,
}

impl DecodeState {
    fn check_root(&mut self, name: &[u8]) -> FdxResult<()> {
        if self.path.is_empty() {
            if self.saw_root || name != FdxConstants::ROOT {
                return Err(FdxError::DocumentDecodeError(format!(
                    "根元素应为 FinalDraft，实际为 {}",
                    String::from_utf8_lossy(name)
                )));
            }
            self.saw_root = true;
        }
        Ok(())
    }

    fn mark_content(&mut self, name: &[u8]) {
        if name == FdxConstants::CONTENT && self.path.len() == 1 {
            self.body.get_or_insert_with(Vec::new);
        }
    }

    fn open_paragraph(&mut self, element: &BytesStart) -> FdxResult<bool> {
        let section = match section_of(&self.path) {
            Some(section) => section,
            None => return Ok(false),
        };
        let kind = paragraph_kind(element)?;
        // 包装段落自身的文本先于子段落输出，保持文档顺序
        let pending = match self.open.last_mut() {
            Some(parent) => {
                parent.has_children = true;
                if !parent.emitted && !parent.text.is_empty() {
                    parent.emitted = true;
                    Some((parent.section, parent.kind.clone(), parent.text.clone()))
                } else {
                    None
                }
            }
            None => None,
        };
        if let Some((parent_section, parent_kind, parent_text)) = pending {
            self.emit(parent_section, parent_kind, parent_text);
        }
        self.open.push(OpenParagraph {
            kind,
            text: String::new(),
            section,
            depth: self.path.len(),
            has_children: false,
            emitted: false,
        });
        Ok(true)
    }

    fn close_paragraph(&mut self) {
        let paragraph = match self.open.pop() {
            Some(paragraph) => paragraph,
            None => return,
        };
        // 已输出的包装段落，以及仅作为容器的段落
        if paragraph.emitted || (paragraph.has_children && paragraph.text.is_empty()) {
            return;
        }
        self.emit(paragraph.section, paragraph.kind, paragraph.text);
    }

    fn emit(&mut self, section: Section, kind: ParagraphKind, text: String) {
        match section {
            Section::Body => {
                let body = self.body.get_or_insert_with(Vec::new);
                let line = body.len() + 1;
                body.push(Paragraph::new(kind, text, line));
            }
            Section::TitlePage => {
                let text = text.trim();
                if !text.is_empty() {
                    self.title_page.push(text.to_string());
                }
            }
        }
    }

    // Text 元素必须直接属于当前段落
    fn owns_text(&self) -> bool {
        self.open
            .last()
            .map(|paragraph| paragraph.depth + 1 == self.path.len())
            .unwrap_or(false)
    }

    fn push_text(&mut self, text: &str) {
        if let Some(paragraph) = self.open.last_mut() {
            paragraph.text.push_str(text);
        }
    }
}

impl FdxDecoder for XmlFdxDecoder {
    fn decode_str(&self, xml: &str) -> FdxResult<FdxDocument> {
        let mut reader = Reader::from_str(xml.trim_start_matches('\u{feff}'));
        let mut state = DecodeState::default();

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    let name = e.name().as_ref().to_vec();
                    state.check_root(&name)?;
                    state.mark_content(&name);
                    if name == FdxConstants::PARAGRAPH {
                        state.open_paragraph(&e)?;
                    } else if name == FdxConstants::TEXT && state.owns_text() {
                        state.in_text = true;
                    }
                    state.path.push(name);
                }
                Ok(Event::Empty(e)) => {
                    let name = e.name().as_ref().to_vec();
                    state.check_root(&name)?;
                    state.mark_content(&name);
                    if name == FdxConstants::PARAGRAPH && state.open_paragraph(&e)? {
                        state.close_paragraph();
                    }
                }
                Ok(Event::End(_)) => {
                    let name = state.path.pop().unwrap_or_default();
                    if name == FdxConstants::TEXT {
                        state.in_text = false;
                    } else if name == FdxConstants::PARAGRAPH
                        && state.open.last().map(|p| p.depth) == Some(state.path.len())
                    {
                        state.close_paragraph();
                    }
                }
                Ok(Event::Text(e)) => {
                    if state.in_text {
                        let text = e
                            .unescape()
                            .map_err(|err| FdxError::DocumentDecodeError(format!("文本无效: {}", err)))?;
                        state.push_text(&text);
                    }
                }
                Ok(Event::CData(e)) => {
                    if state.in_text {
                        let bytes = e.into_inner();
                        let text = std::str::from_utf8(&bytes)
                            .map_err(|err| FdxError::DocumentDecodeError(format!("CDATA 无效: {}", err)))?;
                        state.push_text(text);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(FdxError::DocumentDecodeError(format!(
                        "XML 解析失败（位置 {}）: {}",
                        reader.buffer_position(),
                        e
                    )));
                }
                _ => {}
            }
        }

        if !state.saw_root {
            return Err(FdxError::DocumentDecodeError("文档中没有任何元素".to_string()));
        }
        if let Some(name) = state.path.last() {
            return Err(FdxError::DocumentDecodeError(format!(
                "文档不完整，元素 {} 未闭合",
                String::from_utf8_lossy(name)
            )));
        }

        debug!(
            "FDX 解码完成: {} 个正文段落, {} 行标题页",
            state.body.as_ref().map(|b| b.len()).unwrap_or(0),
            state.title_page.len()
        );

        Ok(FdxDocument {
            paragraphs: state.body,
            title_page: state.title_page,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(xml: &str) -> FdxResult<FdxDocument> {
        XmlFdxDecoder::new().decode_str(xml)
    }

    #[test]
    fn decodes_body_paragraphs_in_order() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="no" ?>
<FinalDraft DocumentType="Script" Template="No" Version="5">
  <Content>
    <Paragraph Type="Scene Heading">
      <SceneProperties Length="1/8" Page="1" Title=""/>
      <Text>INT. ROOM - DAY</Text>
    </Paragraph>
    <Paragraph Type="Character"><Text>BOB</Text></Paragraph>
    <Paragraph Type="Dialogue"><Text>Hi </Text><Text Style="Bold">there</Text><Text> &amp; bye.</Text></Paragraph>
  </Content>
</FinalDraft>"#;
        let doc = decode(xml).unwrap();
        let paragraphs = doc.paragraphs.unwrap();
        assert_eq!(paragraphs.len(), 3);
        assert_eq!(paragraphs[0], Paragraph::new(ParagraphKind::SceneHeading, "INT. ROOM - DAY", 1));
        assert_eq!(paragraphs[1], Paragraph::new(ParagraphKind::Character, "BOB", 2));
        assert_eq!(paragraphs[2], Paragraph::new(ParagraphKind::Dialogue, "Hi there & bye.", 3));
    }

    #[test]
    fn dual_dialogue_wrapper_is_flattened() {
        let xml = r#"<FinalDraft><Content>
  <Paragraph>
    <DualDialogue>
      <Paragraph Type="Character"><Text>BOB</Text></Paragraph>
      <Paragraph Type="Dialogue"><Text>Left.</Text></Paragraph>
      <Paragraph Type="Character"><Text>ALICE</Text></Paragraph>
      <Paragraph Type="Dialogue"><Text>Right.</Text></Paragraph>
    </DualDialogue>
  </Paragraph>
  <Paragraph Type="Action"><Text>They stop.</Text></Paragraph>
</Content></FinalDraft>"#;
        let paragraphs = decode(xml).unwrap().paragraphs.unwrap();
        let texts: Vec<&str> = paragraphs.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["BOB", "Left.", "ALICE", "Right.", "They stop."]);
        let lines: Vec<usize> = paragraphs.iter().map(|p| p.line).collect();
        assert_eq!(lines, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn title_page_is_separate_from_body() {
        let xml = r#"<FinalDraft>
  <Content><Paragraph Type="Action"><Text>Body.</Text></Paragraph></Content>
  <TitlePage><Content>
    <Paragraph Type="Action"><Text>THE MILLSTONE</Text></Paragraph>
    <Paragraph Type="Action"><Text></Text></Paragraph>
    <Paragraph Type="Action"><Text>Written by</Text></Paragraph>
  </Content></TitlePage>
</FinalDraft>"#;
        let doc = decode(xml).unwrap();
        assert_eq!(doc.paragraphs.unwrap().len(), 1);
        assert_eq!(doc.title_page, vec!["THE MILLSTONE", "Written by"]);
    }

    #[test]
    fn empty_and_untyped_paragraphs() {
        let xml = r#"<FinalDraft><Content><Paragraph Type="Action"/><Paragraph><Text>x</Text></Paragraph></Content></FinalDraft>"#;
        let paragraphs = decode(xml).unwrap().paragraphs.unwrap();
        assert_eq!(paragraphs[0], Paragraph::new(ParagraphKind::Action, "", 1));
        assert_eq!(paragraphs[1].kind, ParagraphKind::Other(String::new()));
    }

    #[test]
    fn cdata_text_is_kept() {
        let xml = r#"<FinalDraft><Content><Paragraph Type="Action"><Text><![CDATA[A <b> C]]></Text></Paragraph></Content></FinalDraft>"#;
        let paragraphs = decode(xml).unwrap().paragraphs.unwrap();
        assert_eq!(paragraphs[0].text, "A <b> C");
    }

    #[test]
    fn missing_content_yields_no_paragraphs() {
        let doc = decode(r#"<FinalDraft Version="5"><TitlePage/></FinalDraft>"#).unwrap();
        assert!(doc.paragraphs.is_none());
    }

    #[test]
    fn wrong_root_is_decode_error() {
        let err = decode("<html><body/></html>").unwrap_err();
        assert!(matches!(err, FdxError::DocumentDecodeError(_)));
    }

    #[test]
    fn broken_xml_is_decode_error() {
        let err = decode("<FinalDraft><Content><Paragraph></Content></FinalDraft>").unwrap_err();
        assert!(matches!(err, FdxError::DocumentDecodeError(_)));
        assert!(matches!(decode("not xml at all"), Err(FdxError::DocumentDecodeError(_))));
        assert!(matches!(decode(""), Err(FdxError::DocumentDecodeError(_))));
        assert!(matches!(decode("<FinalDraft><Content>"), Err(FdxError::DocumentDecodeError(_))));
    }

    #[test]
    fn scene_summary_paragraphs_are_not_body() {
        let xml = r#"<FinalDraft><Content>
  <Paragraph Type="Scene Heading">
    <SceneProperties Length="1/8" Page="1" Title="">
      <Summary>
        <Paragraph Alignment="Left"><Text>Bob arrives.</Text></Paragraph>
      </Summary>
      <SceneArcBeats>
        <CharacterArcBeat Name="BOB"><Paragraph Type="Action"/></CharacterArcBeat>
      </SceneArcBeats>
    </SceneProperties>
    <Text>INT. ROOM - DAY</Text>
  </Paragraph>
  <Paragraph Type="Character"><Text>BOB</Text></Paragraph>
  <Paragraph Type="Dialogue"><Text>Hi.</Text></Paragraph>
</Content></FinalDraft>"#;
        let paragraphs = decode(xml).unwrap().paragraphs.unwrap();
        assert_eq!(
            paragraphs,
            vec![
                Paragraph::new(ParagraphKind::SceneHeading, "INT. ROOM - DAY", 1),
                Paragraph::new(ParagraphKind::Character, "BOB", 2),
                Paragraph::new(ParagraphKind::Dialogue, "Hi.", 3),
            ]
        );
    }

    #[test]
    fn text_nested_below_paragraph_is_not_owned() {
        let xml = r#"<FinalDraft><Content>
  <Paragraph Type="Action">
    <SceneProperties><Text>hidden</Text></SceneProperties>
    <Text>shown</Text>
  </Paragraph>
</Content></FinalDraft>"#;
        let paragraphs = decode(xml).unwrap().paragraphs.unwrap();
        assert_eq!(paragraphs, vec![Paragraph::new(ParagraphKind::Action, "shown", 1)]);
    }

    #[test]
    fn wrapper_text_comes_before_dual_dialogue() {
        let xml = r#"<FinalDraft><Content>
  <Paragraph Type="Action">
    <Text>Both at once.</Text>
    <DualDialogue>
      <Paragraph Type="Character"><Text>BOB</Text></Paragraph>
      <Paragraph Type="Dialogue"><Text>Left.</Text></Paragraph>
    </DualDialogue>
  </Paragraph>
</Content></FinalDraft>"#;
        let paragraphs = decode(xml).unwrap().paragraphs.unwrap();
        assert_eq!(
            paragraphs,
            vec![
                Paragraph::new(ParagraphKind::Action, "Both at once.", 1),
                Paragraph::new(ParagraphKind::Character, "BOB", 2),
                Paragraph::new(ParagraphKind::Dialogue, "Left.", 3),
            ]
        );
    }
}
