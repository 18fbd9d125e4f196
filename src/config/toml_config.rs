use crate::core::report::DEFAULT_REPORT_DAYS;
use crate::core::roster::RosterSettings;
use crate::domain::model::RECEPTIONIST_ROLE;
use crate::utils::error::{Result, SalonError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalonConfig {
    pub store: StoreConfig,
    #[serde(default)]
    pub ordering: OrderingConfig,
    #[serde(default)]
    pub report: ReportConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub data_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderingConfig {
    #[serde(default = "default_receptionist_role")]
    pub receptionist_role: String,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            receptionist_role: default_receptionist_role(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_window_days")]
    pub window_days: i64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    #[serde(default)]
    pub json: bool,
}

fn default_receptionist_role() -> String {
    RECEPTIONIST_ROLE.to_string()
}

fn default_window_days() -> i64 {
    DEFAULT_REPORT_DAYS
}

impl SalonConfig {
    /// 只指定資料檔，其餘設定使用預設值
    pub fn for_data_file(data_file: impl Into<String>) -> Self {
        Self {
            store: StoreConfig {
                data_file: data_file.into(),
            },
            ordering: OrderingConfig::default(),
            report: ReportConfig::default(),
            logging: None,
        }
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SalonError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SalonError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SALON_DATA})，未設定的變數保留原文
    fn substitute_env_vars(content: &str) -> Result<String> {
        // 使用正規表達式匹配 ${VAR_NAME} 格式
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SalonError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 取得日誌等級
    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    /// 是否輸出 JSON 格式日誌
    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().map(|l| l.json).unwrap_or(false)
    }

    /// 取得排班設定 (櫃台角色、報表天數)
    pub fn roster_settings(&self) -> RosterSettings {
        RosterSettings {
            receptionist_role: self.ordering.receptionist_role.clone(),
            report_days: self.report.window_days,
        }
    }
}

impl Validate for SalonConfig {
    /// 驗證配置的合理性
    fn validate(&self) -> Result<()> {
        // 驗證資料檔路徑
        validation::validate_path("store.data_file", &self.store.data_file)?;
        // 驗證櫃台角色代碼
        validation::validate_non_empty_string("ordering.receptionist_role", &self.ordering.receptionist_role)?;
        // 驗證報表天數
        validation::validate_range("report.window_days", self.report.window_days, 1, 366)?;

        // 驗證日誌等級
        if let Some(level) = self.log_level() {
            let valid_levels = ["trace", "debug", "info", "warn", "error"];
            if !valid_levels.contains(&level) {
                return Err(SalonError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.to_string(),
                    reason: format!("Valid levels: {}", valid_levels.join(", ")),
                });
            }
        }
        Ok(())
    }
}
