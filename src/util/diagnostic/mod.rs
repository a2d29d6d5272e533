//! 统一诊断系统
//!
//! - [`error`] - 诊断数据结构 (Diagnostic, Severity)
//! - [`codes`] - 错误码注册表
//! - [`collect`] - 诊断收集器
//! - [`suggest`] - 拼写建议
//! - [`emitter`] - 文本 / JSON 渲染

pub mod codes;
pub mod collect;
pub mod emitter;
pub mod error;
pub mod suggest;

pub use codes::{ErrorCategory, ErrorCodeDefinition};
pub use collect::{sort_by_position, DiagnosticCollector};
pub use emitter::{emitter_for, DiagnosticEmitter, EmitterConfig, JsonEmitter, OutputFormat, TextEmitter};
pub use error::{Diagnostic, Severity};
pub use suggest::SuggestionEngine;
