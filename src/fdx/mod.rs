//! FDX 文档解码
//!
//! 将 Final Draft 的 `.fdx` 文档解码为有序的段落列表（类型标签 + 纯文本）。
//! 解析器只依赖 [`FdxDecoder`]，默认实现为基于 quick-xml 的 [`XmlFdxDecoder`]。

pub mod xml_decoder;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use crate::models::Paragraph;

pub use xml_decoder::XmlFdxDecoder;

/// FDX 解码错误
#[derive(Error, Debug)]
pub enum FdxError {
    #[error("找不到剧本文件: {}", .0.display())]
    DocumentNotFound(PathBuf),

    #[error("FDX 解码失败: {0}")]
    DocumentDecodeError(String),

    #[error("FDX 文档结构不完整: {0}")]
    MalformedStructure(String),
}

/// FDX 解码结果
pub type FdxResult<T> = Result<T, FdxError>;

/// 解码后的 FDX 文档
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FdxDocument {
    /// 正文段落，文档缺少 `<Content>` 时为 None
    pub paragraphs: Option<Vec<Paragraph>>,
    /// 标题页中的非空文本行
    pub title_page: Vec<String>,
}

impl FdxDocument {
    /// 取出正文段落，缺失时返回 MalformedStructure
    pub fn into_paragraphs(self) -> FdxResult<(Vec<Paragraph>, Vec<String>)> {
        match self.paragraphs {
            Some(paragraphs) => Ok((paragraphs, self.title_page)),
            None => Err(FdxError::MalformedStructure("缺少正文段落集合 <Content>".to_string())),
        }
    }
}

/// FDX 解码器
pub trait FdxDecoder {
    /// 解码内存中的 FDX 文本
    fn decode_str(&self, xml: &str) -> FdxResult<FdxDocument>;

    /// 读取并解码指定路径的 FDX 文档
    fn decode_file(&self, path: &Path) -> FdxResult<FdxDocument> {
        let xml = read_document(path)?;
        self.decode_str(&xml)
    }
}

/// 读取文档内容，文件句柄在返回前释放
pub fn read_document(path: &Path) -> FdxResult<String> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => FdxError::DocumentNotFound(path.to_path_buf()),
        _ => FdxError::DocumentDecodeError(format!("读取 {} 失败: {}", path.display(), e)),
    })?;
    String::from_utf8(bytes)
        .map_err(|e| FdxError::DocumentDecodeError(format!("文件不是有效的 UTF-8: {}", e)))
}
