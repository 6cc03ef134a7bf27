//! 嵌入调用 API
//!
//! 字符串输入、JSON 输出，便于其他语言或前端调用

use crate::models::Conf;
use crate::parser::{FdxParser, ParseOutput};

fn to_json(result: &ParseOutput) -> String {
    serde_json::to_string(result).unwrap_or_else(|_| "{}".to_string())
}

/// 解析FDX文本，返回 JSON
pub fn parse_fdx_text(text: &str, config: Option<Conf>) -> String {
    let parser = FdxParser::with_conf(config.unwrap_or_default());
    to_json(&parser.parse_str(text))
}

/// 解析FDX文件，返回 JSON。失败信息包含在 failure 与 diagnostic 字段中
pub fn parse_fdx_file_to_json(path: &str, config: Option<Conf>) -> String {
    let parser = FdxParser::with_conf(config.unwrap_or_default());
    to_json(&parser.parse_file(path))
}

/// 测试函数
pub fn test_connection() -> String {
    "Rust bridge connection successful!".to_string()
}
