//! 编译器配置
//!
//! 配置来自 RON 文件（默认 `luoyan.ron`），每个字段都有默认值，
//! 文件中只需写出要改动的部分：
//!
//! ```ron
//! (
//!     parser: (enumeration: modern_only),
//!     analyzer: (warn_unused: false),
//!     emitter: (use_colors: false),
//!     format: json,
//! )
//! ```
//!
//! 优先级（高 → 低）：命令行参数、`--config` 指定的文件、当前目录的
//! `luoyan.ron`、默认值。

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::frontend::parser::ParserOptions;
use crate::frontend::semantic::AnalyzerOptions;
use crate::util::diagnostic::{EmitterConfig, OutputFormat};

/// 默认配置文件名
pub const CONFIG_FILE_NAME: &str = "luoyan.ron";

/// Compiler configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    pub parser: ParserOptions,
    pub analyzer: AnalyzerOptions,
    pub emitter: EmitterConfig,
    /// 诊断输出格式
    pub format: OutputFormat,
}

impl CompilerConfig {
    /// Parse a configuration from RON text
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        ron::from_str(text).map_err(|source| ConfigError::Parse {
            path: None,
            source,
        })
    }

    /// Serialize to pretty RON
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new().struct_names(false);
        ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = ron::from_str(&text).map_err(|source| ConfigError::Parse {
            path: Some(path.to_path_buf()),
            source,
        })?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Load a configuration file, falling back to defaults when it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Load `luoyan.ron` from `dir` if present
    pub fn discover(dir: &Path) -> Result<Self, ConfigError> {
        Self::load_or_default(&dir.join(CONFIG_FILE_NAME))
    }

    /// Write the configuration as RON
    pub fn save(
        &self,
        path: &Path,
    ) -> Result<(), ConfigError> {
        let text = self.to_ron_string()?;
        fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration{}: {source}", location(.path))]
    Parse {
        path: Option<PathBuf>,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("cannot serialize configuration: {0}")]
    Serialize(#[source] ron::Error),
}

fn location(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" in {}", path.display()),
        None => String::new(),
    }
}
