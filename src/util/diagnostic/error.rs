//! 诊断数据结构
//!
//! 词法、语法、语义三个阶段的错误都以 [`Diagnostic`] 的形式返回，
//! 从不中断编译流程。

use serde::Serialize;

use crate::util::span::{Position, Span};

/// 诊断严重级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    /// 检查是否为错误级别
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// 诊断信息
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// 严重级别
    pub severity: Severity,
    /// 错误码，如 `E0003`
    pub code: String,
    /// 完整消息
    pub message: String,
    /// 位置信息
    pub span: Span,
    /// 修复建议
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Diagnostic {
    pub fn error(
        code: impl Into<String>,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            severity: Severity::Error,
            code: code.into(),
            message: message.into(),
            span,
            suggestion: None,
        }
    }

    pub fn warning(
        code: impl Into<String>,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            code: code.into(),
            message: message.into(),
            span,
            suggestion: None,
        }
    }

    /// 附加修复建议
    pub fn with_suggestion(
        mut self,
        suggestion: impl Into<String>,
    ) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// 诊断的报告位置（span 起点）
    pub fn position(&self) -> Position {
        self.span.start
    }

    pub fn is_error(&self) -> bool {
        self.severity.is_error()
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(
            f,
            "{}[{}] {}: {}",
            self.severity, self.code, self.span.start, self.message
        )
    }
}
