use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// 程序配置
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// 出题服务地址
    pub service_base_url: String,
    /// 每个主题的默认题目数量
    pub default_question_count: u32,
    /// 上传超时（秒），服务端解析文档可能需要数分钟
    pub upload_timeout_secs: u64,
    /// 获取题目超时（秒）
    pub generate_timeout_secs: u64,
    /// 连接超时（秒）
    pub connect_timeout_secs: u64,
    /// 导出文档目录
    pub output_dir: PathBuf,
    /// 是否按上传得到的主题顺序展示题目（默认按服务响应顺序）
    pub pin_topic_order: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_base_url: "http://localhost:8000".to_string(),
            default_question_count: 5,
            upload_timeout_secs: 600,
            generate_timeout_secs: 120,
            connect_timeout_secs: 10,
            output_dir: PathBuf::from("."),
            pin_topic_order: false,
            verbose_logging: false,
        }
    }
}

/// TOML 配置文件，所有字段可选
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    service_base_url: Option<String>,
    default_question_count: Option<u32>,
    upload_timeout_secs: Option<u64>,
    generate_timeout_secs: Option<u64>,
    connect_timeout_secs: Option<u64>,
    output_dir: Option<PathBuf>,
    pin_topic_order: Option<bool>,
    verbose_logging: Option<bool>,
}

impl Config {
    /// 从环境变量加载，未设置或无法解析时使用默认值
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 先读取 TOML 配置文件，再叠加环境变量
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigError::FileReadFailed {
                path: path.display().to_string(),
                source,
            })?;
        Ok(Self::from_toml_str(&content, path)?.with_env_overrides())
    }

    fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let file: FileConfig =
            toml::from_str(content).map_err(|source| ConfigError::TomlParseFailed {
                path: path.display().to_string(),
                source,
            })?;
        let default = Self::default();
        Ok(Self {
            service_base_url: file.service_base_url.unwrap_or(default.service_base_url),
            default_question_count: file
                .default_question_count
                .filter(|&n| n >= 1)
                .unwrap_or(default.default_question_count),
            upload_timeout_secs: file.upload_timeout_secs.unwrap_or(default.upload_timeout_secs),
            generate_timeout_secs: file
                .generate_timeout_secs
                .unwrap_or(default.generate_timeout_secs),
            connect_timeout_secs: file
                .connect_timeout_secs
                .unwrap_or(default.connect_timeout_secs),
            output_dir: file.output_dir.unwrap_or(default.output_dir),
            pin_topic_order: file.pin_topic_order.unwrap_or(default.pin_topic_order),
            verbose_logging: file.verbose_logging.unwrap_or(default.verbose_logging),
        })
    }

    fn with_env_overrides(self) -> Self {
        Self {
            service_base_url: std::env::var("QG_SERVICE_BASE_URL").unwrap_or(self.service_base_url),
            default_question_count: env_parse("QG_DEFAULT_QUESTION_COUNT")
                .filter(|&n: &u32| n >= 1)
                .unwrap_or(self.default_question_count),
            upload_timeout_secs: env_parse("QG_UPLOAD_TIMEOUT_SECS").unwrap_or(self.upload_timeout_secs),
            generate_timeout_secs: env_parse("QG_GENERATE_TIMEOUT_SECS")
                .unwrap_or(self.generate_timeout_secs),
            connect_timeout_secs: env_parse("QG_CONNECT_TIMEOUT_SECS")
                .unwrap_or(self.connect_timeout_secs),
            output_dir: std::env::var("QG_OUTPUT_DIR").map(PathBuf::from).unwrap_or(self.output_dir),
            pin_topic_order: env_parse("QG_PIN_TOPIC_ORDER").unwrap_or(self.pin_topic_order),
            verbose_logging: env_parse("QG_VERBOSE_LOGGING").unwrap_or(self.verbose_logging),
        }
    }

    pub fn upload_timeout(&self) -> Duration {
        Duration::from_secs(self.upload_timeout_secs)
    }

    pub fn generate_timeout(&self) -> Duration {
        Duration::from_secs(self.generate_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_local_service() {
        let config = Config::default();
        assert_eq!(config.service_base_url, "http://localhost:8000");
        assert_eq!(config.default_question_count, 5);
        assert!(!config.pin_topic_order);
        assert_eq!(config.upload_timeout(), Duration::from_secs(600));
    }

    #[test]
    fn toml_fields_override_defaults() {
        let content = r#"
            service_base_url = "http://qgen.internal:9000"
            generate_timeout_secs = 30
            pin_topic_order = true
        "#;
        let config = Config::from_toml_str(content, Path::new("qg.toml")).unwrap();
        assert_eq!(config.service_base_url, "http://qgen.internal:9000");
        assert_eq!(config.generate_timeout_secs, 30);
        assert!(config.pin_topic_order);
        assert_eq!(config.upload_timeout_secs, 600);
    }

    #[test]
    fn zero_default_count_in_file_is_ignored() {
        let config =
            Config::from_toml_str("default_question_count = 0", Path::new("qg.toml")).unwrap();
        assert_eq!(config.default_question_count, 5);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let err = Config::from_toml_str("pin_topic_order = \"maybe\"", Path::new("bad.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::TomlParseFailed { .. }));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = Config::from_file(Path::new("/definitely/not/here/qg.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileReadFailed { .. }));
    }
}
