//! 诊断收集器
//!
//! 各阶段按发现顺序追加诊断；最终输出前按源码位置稳定排序。

use super::{Diagnostic, Severity};

#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        diagnostic: impl Into<Diagnostic>,
    ) {
        self.diagnostics.push(diagnostic.into());
    }

    pub fn extend(
        &mut self,
        diagnostics: impl IntoIterator<Item = Diagnostic>,
    ) {
        self.diagnostics.extend(diagnostics);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(
        &self,
        severity: Severity,
    ) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// 按收集顺序取出
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// 按字节偏移稳定排序后取出
    pub fn into_sorted(self) -> Vec<Diagnostic> {
        let mut diagnostics = self.diagnostics;
        sort_by_position(&mut diagnostics);
        diagnostics
    }
}

/// 按源码位置稳定排序（同一位置保持发现顺序）
pub fn sort_by_position(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by_key(|d| d.span.start.offset);
}
