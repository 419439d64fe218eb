use crate::core::alternatives::SuggestionSettings;
use crate::core::conflict::BlockingPolicy;
use crate::core::scoring::ScoringWeights;
use crate::core::selector::DEFAULT_MAX_ALTERNATIVES;
use crate::domain::request::DEFAULT_DURATION_MINUTES;
use crate::utils::error::{AssignError, Result};
use crate::utils::validation::{validate_one_of, validate_positive_number, validate_range, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// 引擎設定，所有區段皆可省略並套用預設值
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub assignment: AssignmentSettings,
    pub scoring: ScoringWeights,
    pub suggestions: SuggestionSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignmentSettings {
    pub default_duration_minutes: u32,
    pub max_alternatives: usize,
    pub blocking_policy: BlockingPolicy,
}

impl Default for AssignmentSettings {
    fn default() -> Self {
        Self {
            default_duration_minutes: DEFAULT_DURATION_MINUTES,
            max_alternatives: DEFAULT_MAX_ALTERNATIVES,
            blocking_policy: BlockingPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl EngineConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AssignError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AssignError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MAX_SUGGESTIONS})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AssignError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        // 用餐時長：至少 1 分鐘，最多一整天
        validate_range(
            "assignment.default_duration_minutes",
            self.assignment.default_duration_minutes,
            1,
            24 * 60,
        )?;

        self.scoring.validate()?;

        if self.suggestions.offsets_minutes.is_empty() {
            return Err(AssignError::ConfigValidationError {
                field: "suggestions.offsets_minutes".to_string(),
                message: "at least one offset is required".to_string(),
            });
        }
        for &offset in &self.suggestions.offsets_minutes {
            if offset == 0 {
                return Err(AssignError::InvalidConfigValueError {
                    field: "suggestions.offsets_minutes".to_string(),
                    value: offset.to_string(),
                    reason: "offset 0 is the requested slot itself".to_string(),
                });
            }
            validate_range("suggestions.offsets_minutes", offset, -24 * 60, 24 * 60)?;
        }

        validate_positive_number("suggestions.max_suggestions", self.suggestions.max_suggestions, 1)?;
        validate_one_of("logging.level", &self.logging.level, &LOG_LEVELS)?;

        Ok(())
    }

    pub fn log_level(&self) -> &str {
        &self.logging.level
    }

    pub fn json_logs(&self) -> bool {
        self.logging.json
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
