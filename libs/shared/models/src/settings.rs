use serde::{Deserialize, Serialize};

pub const BLOCK_DURATION_SETTING_KEY: &str = "appointment_block_duration_minutes";
pub const DEFAULT_BLOCK_DURATION_MINUTES: u32 = 60;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SystemSetting {
    pub id: i64,
    #[serde(alias = "settingKey")]
    pub setting_key: String,
    #[serde(alias = "settingValue")]
    pub setting_value: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SystemSettingUpdateRequest {
    pub setting_value: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockDurationConfig {
    #[serde(
        alias = "blockDurationMinutes",
        default = "default_block_duration"
    )]
    pub block_duration_minutes: u32,
}

impl Default for BlockDurationConfig {
    fn default() -> Self {
        Self {
            block_duration_minutes: DEFAULT_BLOCK_DURATION_MINUTES,
        }
    }
}

fn default_block_duration() -> u32 {
    DEFAULT_BLOCK_DURATION_MINUTES
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn block_duration_accepts_both_spellings() {
        let snake: BlockDurationConfig =
            serde_json::from_value(json!({ "block_duration_minutes": 30 })).unwrap();
        let camel: BlockDurationConfig =
            serde_json::from_value(json!({ "blockDurationMinutes": 45 })).unwrap();
        let missing: BlockDurationConfig = serde_json::from_value(json!({})).unwrap();

        assert_eq!(snake.block_duration_minutes, 30);
        assert_eq!(camel.block_duration_minutes, 45);
        assert_eq!(missing, BlockDurationConfig::default());
    }
}
