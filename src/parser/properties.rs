use crate::models::{ElementKind, Location, ScreenplayProperties, ScriptElement};
use crate::utils::fdx_constants::{CN_SCENE_HEADING_REGEX, LOCATION_TIME_SPLIT, SCENE_HEADING_REGEX, WHITESPACE_RUN};
use crate::utils::normalize_character_name;

// 统一大小写与空白
fn normalize_part(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").to_uppercase()
}

/// 解析场景位置信息
///
/// 支持 INT./EXT./EST./INT./EXT./I/E 以及（内景）（外景）（内外景）开头的场景标题，
/// 地点与时间以最后一个破折号分隔。无法识别时返回 None。
pub fn parse_location(scene_heading: &str, line: usize) -> Option<Location> {
    let (interior, exterior, rest) = if let Some(caps) = SCENE_HEADING_REGEX.captures(scene_heading) {
        let marker = caps.get(1)?.as_str().to_uppercase();
        // EST. 为外景建立镜头，同样记为外景
        let interior = marker.starts_with('I');
        let exterior = marker.contains('E');
        (interior, exterior, caps.get(2)?.as_str().to_string())
    } else if let Some(caps) = CN_SCENE_HEADING_REGEX.captures(scene_heading) {
        let marker = caps.get(1)?.as_str();
        let interior = marker.contains('内');
        let exterior = marker.contains('外');
        (interior, exterior, caps.get(2)?.as_str().to_string())
    } else {
        return None;
    };

    let (name, time_of_day) = match LOCATION_TIME_SPLIT.captures(&rest) {
        Some(split) => (
            normalize_part(split.get(1).map(|m| m.as_str()).unwrap_or("")),
            normalize_part(split.get(2).map(|m| m.as_str()).unwrap_or("")),
        ),
        None => (normalize_part(&rest), String::new()),
    };

    if name.is_empty() {
        return None;
    }

    let mut location = Location::new(name, interior, exterior, time_of_day);
    location.line = line;
    Some(location)
}

/// 将一个元素计入统计属性
pub fn record_element(properties: &mut ScreenplayProperties, element: &ScriptElement) {
    let line = element.line.unwrap_or(0);
    match &element.kind {
        ElementKind::SceneHeading { text } => {
            properties.scene_lines.push(line);
            properties.scene_names.push(text.trim().to_string());
            if let Some(location) = parse_location(text, line) {
                properties
                    .locations
                    .entry(location.name.clone())
                    .or_default()
                    .push(location);
            }
        }
        ElementKind::Character { name } => {
            let name = normalize_character_name(name);
            if !name.is_empty() {
                properties.characters.entry(name).or_default().push(line);
            }
        }
        ElementKind::Dialogue { .. } => properties.dialogue_count += 1,
        ElementKind::Action { .. } => properties.action_count += 1,
        ElementKind::Parenthetical { .. } | ElementKind::Transition { .. } => {}
    }
}
