use serde::{Deserialize, Serialize};

/// 场景位置信息，由场景标题解析而来
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub interior: bool,
    pub exterior: bool,
    pub time_of_day: String,
    pub line: usize,
}

impl Location {
    pub fn new(
        name: String,
        interior: bool,
        exterior: bool,
        time_of_day: String
    ) -> Self {
        Location {
            name,
            interior,
            exterior,
            time_of_day,
            line: 0,
        }
    }
}
