//! 对局元数据（标签头）
//!
//! 格式：`[Event "Casual local Classical infinite chess game"] [Site "https://www.infinitechess.org/"]`

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::METADATA_KEY_ORDERING;
use crate::gamerules::is_excluded_gamerule;

lazy_static! {
    static ref METADATA_TAG_RE: Regex =
        Regex::new(r#"\[(?P<key>[^\s\[\]"]+)\s+"(?P<value>[^"]*)"\]"#).unwrap();
}

/// 对局元数据：有序的键值对
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMetadata {
    entries: Vec<(String, String)>,
}

impl GameMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置标签，已存在的键原地覆盖，否则追加
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按插入顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// 按规范顺序输出：先是规范键，再是其余键（保持插入顺序）。
    /// 有专门编码的游戏规则键会被跳过。
    pub fn ordered(&self) -> Vec<(&str, &str)> {
        let mut ordered: Vec<(&str, &str)> = METADATA_KEY_ORDERING
            .iter()
            .filter_map(|&key| self.get(key).map(|value| (key, value)))
            .collect();

        for (key, value) in self.iter() {
            if METADATA_KEY_ORDERING.contains(&key) {
                continue;
            }
            if is_excluded_gamerule(key) {
                warn!("跳过元数据中的游戏规则键 {}，它有专门的编码", key);
                continue;
            }
            ordered.push((key, value));
        }
        ordered
    }

    /// 生成标签头，标签之间用换行或空格分隔
    pub fn to_header(&self, make_new_lines: bool) -> String {
        let delimiter = if make_new_lines { "\n" } else { " " };
        self.ordered()
            .into_iter()
            .map(|(key, value)| format!("[{} \"{}\"]", key, value))
            .collect::<Vec<_>>()
            .join(delimiter)
    }

    /// 从文本中提取所有标签
    pub fn parse_header(text: &str) -> Self {
        let mut metadata = Self::new();
        for captures in METADATA_TAG_RE.captures_iter(text) {
            metadata.set(&captures["key"], &captures["value"]);
        }
        debug!("解析元数据: {} 个标签", metadata.len());
        metadata
    }

    /// 写入 UTC 日期（`YYYY.MM.DD`）与时间（`HH:MM:SS`）
    pub fn stamp_utc(&mut self, time: DateTime<Utc>) {
        self.set("UTCDate", time.format("%Y.%m.%d").to_string());
        self.set("UTCTime", time.format("%H:%M:%S").to_string());
    }

    /// 转换为 JSON 字符串
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_set_overwrites_in_place() {
        let mut metadata = GameMetadata::new();
        metadata.set("White", "Alice");
        metadata.set("Black", "Bob");
        metadata.set("White", "Carol");

        assert_eq!(metadata.len(), 2);
        assert_eq!(metadata.get("White"), Some("Carol"));
        let keys: Vec<&str> = metadata.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["White", "Black"]);
    }

    #[test]
    fn test_canonical_order() {
        let mut metadata = GameMetadata::new();
        metadata.set("Opening", "Fairy");
        metadata.set("Result", "1-0");
        metadata.set("Event", "Casual game");
        metadata.set("Annotator", "nobody");
        metadata.set("Variant", "Classical");

        let keys: Vec<&str> = metadata.ordered().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Event", "Variant", "Result", "Opening", "Annotator"]);
    }

    #[test]
    fn test_excluded_gamerules_dropped() {
        let mut metadata = GameMetadata::new();
        metadata.set("Event", "Casual game");
        metadata.set("turnOrder", "w:b");
        metadata.set("moveRule", "0/100");

        assert_eq!(metadata.to_header(false), r#"[Event "Casual game"]"#);
    }

    #[test]
    fn test_header_roundtrip() {
        let mut metadata = GameMetadata::new();
        metadata.set("Event", "Casual local Classical infinite chess game");
        metadata.set("Site", "https://www.infinitechess.org/");
        metadata.set("TimeControl", "600+5");

        let header = metadata.to_header(true);
        assert_eq!(
            header,
            "[Event \"Casual local Classical infinite chess game\"]\n\
             [Site \"https://www.infinitechess.org/\"]\n\
             [TimeControl \"600+5\"]"
        );
        assert_eq!(GameMetadata::parse_header(&header), metadata);

        let inline = metadata.to_header(false);
        assert_eq!(GameMetadata::parse_header(&inline), metadata);
    }

    #[test]
    fn test_parse_ignores_other_text() {
        let parsed =
            GameMetadata::parse_header("[Event \"x\"] w 0/100 1 (8|1) P1,2+|K5,1+ [Result \"0-1\"]");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.get("Result"), Some("0-1"));
    }

    #[test]
    fn test_stamp_utc() {
        let mut metadata = GameMetadata::new();
        let time = Utc.with_ymd_and_hms(2025, 3, 7, 9, 5, 2).unwrap();
        metadata.stamp_utc(time);
        assert_eq!(metadata.get("UTCDate"), Some("2025.03.07"));
        assert_eq!(metadata.get("UTCTime"), Some("09:05:02"));
    }

    #[test]
    fn test_metadata_json() {
        let mut metadata = GameMetadata::new();
        metadata.set("White", "玩家1");
        metadata.set("Black", "玩家2");

        let json = metadata.to_json().unwrap();
        let parsed = GameMetadata::from_json(&json).unwrap();
        assert_eq!(parsed, metadata);
    }

    #[test]
    fn test_remove() {
        let mut metadata = GameMetadata::parse_header(r#"[White "a"] [Black "b"]"#);
        assert_eq!(metadata.remove("White"), Some("a".to_string()));
        assert_eq!(metadata.remove("White"), None);
        assert_eq!(metadata.to_header(false), r#"[Black "b"]"#);
    }
}
