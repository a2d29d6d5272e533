//! 诊断渲染器

pub mod json;
pub mod text;

pub use json::{JsonEmitter, JsonReport};
pub use text::{display_width, DiagnosticEmitter, EmitterConfig, TextEmitter};

use serde::{Deserialize, Serialize};

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// 按格式选择渲染器
pub fn emitter_for(
    format: OutputFormat,
    config: &EmitterConfig,
) -> Box<dyn DiagnosticEmitter + Send + Sync> {
    match format {
        OutputFormat::Text => Box::new(TextEmitter::with_config(config.clone())),
        OutputFormat::Json => Box::new(JsonEmitter),
    }
}
