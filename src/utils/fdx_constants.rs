use lazy_static::lazy_static;
use regex::Regex;

pub struct FdxConstants;

impl FdxConstants {
    // 段落类型标签
    pub const SCENE_HEADING: &'static str = "Scene Heading";
    pub const CHARACTER: &'static str = "Character";
    pub const PARENTHETICAL: &'static str = "Parenthetical";
    pub const DIALOGUE: &'static str = "Dialogue";
    pub const ACTION: &'static str = "Action";
    pub const TRANSITION: &'static str = "Transition";

    // XML 元素与属性名
    pub const ROOT: &'static [u8] = b"FinalDraft";
    pub const CONTENT: &'static [u8] = b"Content";
    pub const TITLE_PAGE: &'static [u8] = b"TitlePage";
    pub const PARAGRAPH: &'static [u8] = b"Paragraph";
    pub const TEXT: &'static [u8] = b"Text";
    pub const DUAL_DIALOGUE: &'static [u8] = b"DualDialogue";
    pub const TYPE_ATTR: &'static [u8] = b"Type";
}

lazy_static! {
    // 场景标题：group 1 为内外景标记，group 2 为地点与时间
    pub static ref SCENE_HEADING_REGEX: Regex = Regex::new(
        r"^[ \t]*(?i:(int[.]?\s*/\s*ext|i[.]?/e|int|ext|est)[.]?)[ \t]+(.*?)\s*$"
    ).unwrap();

    // 中文场景标题：（内景）地点 - 时间
    pub static ref CN_SCENE_HEADING_REGEX: Regex = Regex::new(
        r"^[ \t]*[(（](内外景|内景|外景)[)）]\s*(.*?)\s*$"
    ).unwrap();

    // 地点与时间分隔，破折号前可以没有地点
    pub static ref LOCATION_TIME_SPLIT: Regex = Regex::new(r"^(?:(.*)\s+)?[\-–—−]+\s*(.*)$").unwrap();

    // 角色名后缀，如 (V.O.)、(CONT'D)
    pub static ref CHARACTER_EXTENSION: Regex = Regex::new(r"(?:\s*[(（][^)）]*[)）])+\s*$").unwrap();

    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}
