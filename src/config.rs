use crate::error::{AppResult, ConfigError};
use serde::Deserialize;
use std::path::Path;

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 评分服务地址（协议 + 主机 + 端口）
    pub service_base_url: String,
    /// 评分接口路径
    pub process_endpoint: String,
    /// 音频文件在 multipart 请求中的字段名（每个文件一个 part）
    pub files_field: String,
    /// 参考答案字段名
    pub answer_field: String,
    /// 接受的音频媒体类型
    pub accepted_mime: String,
    /// 接受的文件扩展名（区分大小写，后缀匹配）
    pub accepted_extension: String,
    /// 提交按钮的常规文案
    pub submit_label: String,
    /// 提交中的按钮文案
    pub busy_label: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_base_url: "http://localhost:5000".to_string(),
            process_endpoint: "/api/process".to_string(),
            files_field: "files".to_string(),
            answer_field: "standard_answer".to_string(),
            accepted_mime: "audio/mp3".to_string(),
            accepted_extension: ".mp3".to_string(),
            submit_label: "提交评分".to_string(),
            busy_label: "评分中...".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 默认配置 + 环境变量覆盖
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 先读取 `SCORE_CONFIG` 指向的 TOML 文件（如果有），再叠加环境变量
    pub fn load() -> AppResult<Self> {
        let base = match std::env::var("SCORE_CONFIG") {
            Ok(path) => Self::from_toml_file(path)?,
            Err(_) => Self::default(),
        };
        Ok(base.with_env_overrides())
    }

    /// 从 TOML 文件加载配置，缺失的字段使用默认值
    pub fn from_toml_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source: e,
        })?;
        let config = Self::from_toml_str(&content).map_err(|e| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(config)
    }

    /// 解析 TOML 文本
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn with_env_overrides(self) -> Self {
        Self {
            service_base_url: env_override("SCORE_SERVICE_URL").unwrap_or(self.service_base_url),
            process_endpoint: env_override("SCORE_ENDPOINT").unwrap_or(self.process_endpoint),
            files_field: env_override("SCORE_FILES_FIELD").unwrap_or(self.files_field),
            answer_field: env_override("SCORE_ANSWER_FIELD").unwrap_or(self.answer_field),
            accepted_mime: env_override("SCORE_ACCEPTED_MIME").unwrap_or(self.accepted_mime),
            accepted_extension: env_override("SCORE_ACCEPTED_EXTENSION").unwrap_or(self.accepted_extension),
            submit_label: self.submit_label,
            busy_label: self.busy_label,
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
        }
    }

    /// 完整的评分接口地址
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/{}",
            self.service_base_url.trim_end_matches('/'),
            self.process_endpoint.trim_start_matches('/')
        )
    }
}

/// 读取环境变量覆盖值，空白值视为未设置
fn env_override(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint_url() {
        let config = Config::default();
        assert_eq!(config.endpoint_url(), "http://localhost:5000/api/process");
    }

    #[test]
    fn test_endpoint_url_joins_slashes() {
        let config = Config {
            service_base_url: "http://127.0.0.1:8080/".to_string(),
            process_endpoint: "api/process".to_string(),
            ..Default::default()
        };
        assert_eq!(config.endpoint_url(), "http://127.0.0.1:8080/api/process");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            service_base_url = "http://scoring.local:9000"
            verbose_logging = true
            "#,
        )
        .unwrap();

        assert_eq!(config.service_base_url, "http://scoring.local:9000");
        assert!(config.verbose_logging);
        assert_eq!(config.files_field, "files");
        assert_eq!(config.accepted_extension, ".mp3");
    }

    #[test]
    fn test_empty_env_override_is_ignored() {
        std::env::set_var("SCORE_TEST_EMPTY_OVERRIDE", "");
        assert_eq!(env_override("SCORE_TEST_EMPTY_OVERRIDE"), None);

        std::env::set_var("SCORE_TEST_EMPTY_OVERRIDE", "  ");
        assert_eq!(env_override("SCORE_TEST_EMPTY_OVERRIDE"), None);

        std::env::set_var("SCORE_TEST_EMPTY_OVERRIDE", ".wav");
        assert_eq!(env_override("SCORE_TEST_EMPTY_OVERRIDE").as_deref(), Some(".wav"));

        std::env::remove_var("SCORE_TEST_EMPTY_OVERRIDE");
        assert_eq!(env_override("SCORE_TEST_EMPTY_OVERRIDE"), None);
    }

    #[test]
    fn test_missing_toml_file_is_config_error() {
        let err = Config::from_toml_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, crate::AppError::Config(ConfigError::ReadFailed { .. })));
    }
}
