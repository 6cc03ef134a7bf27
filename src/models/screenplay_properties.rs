use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::models::location::Location;

/// 剧本统计属性
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenplayProperties {
    pub scene_lines: Vec<usize>,
    pub scene_names: Vec<String>,
    /// 角色名（已规范化）-> 出场行号
    pub characters: HashMap<String, Vec<usize>>,
    pub locations: HashMap<String, Vec<Location>>,
    pub dialogue_count: usize,
    pub action_count: usize,
}

impl ScreenplayProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按出场行号排序的角色名列表
    pub fn character_names(&self) -> Vec<&str> {
        let mut names: Vec<(&str, usize)> = self
            .characters
            .iter()
            .map(|(name, lines)| (name.as_str(), lines.first().copied().unwrap_or(0)))
            .collect();
        names.sort_by_key(|(name, first)| (*first, *name));
        names.into_iter().map(|(name, _)| name).collect()
    }
}
