use serde::{Deserialize, Serialize};
use crate::utils::DEFAULT_DISPLAY_WIDTH;

/// 解析配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conf {
    /// 是否去除段落文本首尾空白
    pub trim_text: bool,
    /// 是否跳过空段落（跳过的段落不影响当前角色状态）
    pub skip_empty_paragraphs: bool,
    /// 是否统计场景、角色等属性
    pub collect_properties: bool,
    /// 展示文本时的截断宽度（字形数）
    pub display_width: usize,
}

impl Default for Conf {
    fn default() -> Self {
        Conf {
            trim_text: false,
            skip_empty_paragraphs: false,
            collect_properties: true,
            display_width: DEFAULT_DISPLAY_WIDTH,
        }
    }
}

impl Conf {
    /// 从 JSON 读取配置，缺失字段使用默认值
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let conf = Conf::from_json(r#"{ "trim_text": true }"#).unwrap();
        assert!(conf.trim_text);
        assert!(!conf.skip_empty_paragraphs);
        assert!(conf.collect_properties);
        assert_eq!(conf.display_width, 50);
    }

    #[test]
    fn invalid_json_is_rejected() {
        assert!(Conf::from_json("{ trim_text: yes").is_err());
    }
}
