pub mod models;
pub mod utils;
pub mod fdx;
pub mod parser;
pub mod api;

use std::path::Path;

pub use models::{
    ScriptElement,
    ElementKind,
    Paragraph,
    ParagraphKind,
    Location,
    ScreenplayProperties,
    Conf
};

pub use fdx::{
    FdxDecoder,
    FdxDocument,
    FdxError,
    FdxResult,
    XmlFdxDecoder
};

pub use parser::{
    FdxParser,
    ParseOutput,
    ParseFailure,
    ParseWarning,
    WarningKind
};

pub use api::{
    parse_fdx_text,
    parse_fdx_file_to_json,
    test_connection
};

/// 解析FDX剧本文件
///
/// # Arguments
///
/// * `path` - FDX 文件路径
/// * `config` - 配置对象
///
/// # Returns
///
/// 解析结果对象。文件不存在或无法解码时返回空结果，失败原因见 `failure` 字段
pub fn parse_file(path: impl AsRef<Path>, config: &Conf) -> ParseOutput {
    let parser = FdxParser::with_conf(config.clone());
    parser.parse_file(path)
}

/// 对已解码的段落列表进行分类
pub fn parse_paragraphs(paragraphs: &[Paragraph], config: &Conf) -> ParseOutput {
    let parser = FdxParser::with_conf(config.clone());
    parser.parse_paragraphs(paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        let config = Conf::default();
        let paragraphs = vec![
            Paragraph::from_label("Scene Heading", "INT. ROOM - DAY", 1),
            Paragraph::from_label("Action", "Hello, world!", 2),
        ];
        let result = parse_paragraphs(&paragraphs, &config);
        assert_eq!(result.elements.len(), 2);
    }
}
