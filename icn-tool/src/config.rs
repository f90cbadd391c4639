//! 工具配置
//!
//! JSON 格式，默认位于 `<config_dir>/icn-tool/config.json`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use icn::{MoveListStyle, SpecialRightsRules};
use serde::{Deserialize, Serialize};

/// 默认日志过滤指令
pub const DEFAULT_LOG_FILTER: &str = "icn_tool=info";

/// 工具配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// 追加在 RUST_LOG 之后的默认日志指令
    pub log_filter: String,
    /// 输出走法列表的样式
    pub style: MoveListStyle,
    /// 推导特殊权利的规则
    pub rules: SpecialRightsRules,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            style: MoveListStyle::default(),
            rules: SpecialRightsRules::default(),
        }
    }
}

/// 配置的来源，日志初始化之后再输出
#[derive(Debug)]
pub enum ConfigSource {
    /// 命令行指定的文件
    Explicit(PathBuf),
    /// 默认位置的文件
    DefaultFile(PathBuf),
    /// 默认位置没有文件
    Missing,
    /// 无法获取配置目录
    NoConfigDir,
    /// 默认位置的文件无效，已回退到默认配置
    Invalid(PathBuf, String),
}

impl ConfigSource {
    pub fn report(&self) {
        match self {
            ConfigSource::Explicit(path) | ConfigSource::DefaultFile(path) => {
                tracing::info!("已加载配置: {:?}", path);
            }
            ConfigSource::Missing => tracing::info!("配置文件不存在，使用默认配置"),
            ConfigSource::NoConfigDir => tracing::warn!("无法获取配置目录，使用默认配置"),
            ConfigSource::Invalid(path, e) => {
                tracing::warn!("配置文件 {:?} 无效: {}，使用默认配置", path, e);
            }
        }
    }
}

impl ToolConfig {
    /// 默认配置文件路径
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("icn-tool");
            path.push("config.json");
            path
        })
    }

    /// 加载配置
    ///
    /// 显式指定的文件必须存在且有效；默认位置的文件缺失或无效时回退到默认配置。
    pub fn load(explicit: Option<&Path>) -> Result<(Self, ConfigSource)> {
        if let Some(path) = explicit {
            let config = Self::read(path)?;
            return Ok((config, ConfigSource::Explicit(path.to_path_buf())));
        }

        let Some(path) = Self::config_path() else {
            return Ok((Self::default(), ConfigSource::NoConfigDir));
        };
        Ok(Self::load_default(path))
    }

    fn load_default(path: PathBuf) -> (Self, ConfigSource) {
        if !path.exists() {
            return (Self::default(), ConfigSource::Missing);
        }
        match Self::read(&path) {
            Ok(config) => (config, ConfigSource::DefaultFile(path)),
            Err(e) => (Self::default(), ConfigSource::Invalid(path, format!("{:#}", e))),
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {:?}", path))?;
        serde_json::from_str(&content).with_context(|| format!("解析配置文件失败: {:?}", path))
    }

    /// 保存配置
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("无法创建配置目录: {:?}", parent))?;
        }
        let content = serde_json::to_string_pretty(self).context("序列化配置失败")?;
        fs::write(path, content).with_context(|| format!("写入配置文件失败: {:?}", path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icn::{RawType, ShortFormOptions};
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = ToolConfig {
            log_filter: "icn=debug".to_string(),
            style: MoveListStyle::most_compact(),
            rules: SpecialRightsRules {
                pawn_double_push: false,
                castle_with: Some(RawType::Guard),
            },
        };
        config.save(&path).unwrap();

        let (loaded, source) = ToolConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded, config);
        assert!(matches!(source, ConfigSource::Explicit(_)));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"style":{"kind":"plain","options":{"compact":true}}}"#,
        )
        .unwrap();

        let (loaded, _) = ToolConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded.log_filter, DEFAULT_LOG_FILTER);
        assert_eq!(loaded.rules, SpecialRightsRules::default());
        assert_eq!(
            loaded.style,
            MoveListStyle::Plain {
                options: ShortFormOptions {
                    compact: true,
                    spaces: false,
                    comments: true,
                }
            }
        );
    }

    #[test]
    fn test_explicit_errors() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(ToolConfig::load(Some(&missing)).is_err());

        let invalid = dir.path().join("invalid.json");
        fs::write(&invalid, "{ not json").unwrap();
        assert!(ToolConfig::load(Some(&invalid)).is_err());
    }

    #[test]
    fn test_default_location_fallback() {
        let dir = TempDir::new().unwrap();

        let (config, source) = ToolConfig::load_default(dir.path().join("config.json"));
        assert_eq!(config, ToolConfig::default());
        assert!(matches!(source, ConfigSource::Missing));

        let invalid = dir.path().join("invalid.json");
        fs::write(&invalid, r#"{"rules": 5}"#).unwrap();
        let (config, source) = ToolConfig::load_default(invalid);
        assert_eq!(config, ToolConfig::default());
        assert!(matches!(source, ConfigSource::Invalid(..)));
    }
}
