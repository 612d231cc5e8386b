use crate::config::{
    DEFAULT_OUTPUT_FILE, INPUT_EXTENSIONS, MAX_PREVIEW_ROWS, MAX_SAMPLE_SIZE, MIN_SAMPLE_SIZE,
};
use crate::core::sniffer::DEFAULT_SAMPLE_SIZE;
use crate::core::ConfigProvider;
use crate::utils::error::{ConvertError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_path, validate_range, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    #[serde(default)]
    pub load: LoadConfig,
    pub preview: Option<PreviewConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub path: String,
    pub sample_bytes: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            output_path: DEFAULT_OUTPUT_FILE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PreviewFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    pub rows: usize,
    #[serde(default)]
    pub format: PreviewFormat,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ConvertError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CONTACTS_DIR})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ConvertError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn preview_format(&self) -> PreviewFormat {
        self.preview.as_ref().map(|p| p.format).unwrap_or_default()
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.source.path
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn sample_size(&self) -> usize {
        self.source.sample_bytes.unwrap_or(DEFAULT_SAMPLE_SIZE)
    }

    fn preview_rows(&self) -> usize {
        self.preview.as_ref().map(|p| p.rows).unwrap_or(0)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_path("source.path", &self.source.path)?;
        validate_file_extension("source.path", &self.source.path, &INPUT_EXTENSIONS)?;
        validate_path("load.output_path", &self.load.output_path)?;
        validate_range(
            "source.sample_bytes",
            self.sample_size(),
            MIN_SAMPLE_SIZE,
            MAX_SAMPLE_SIZE,
        )?;
        validate_range("preview.rows", self.preview_rows(), 0, MAX_PREVIEW_ROWS)?;
        Ok(())
    }
}
