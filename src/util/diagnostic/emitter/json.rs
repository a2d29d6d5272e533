//! JSON 诊断渲染器

use serde::Serialize;
use serde_json::to_string_pretty;

use super::DiagnosticEmitter;
use crate::util::diagnostic::Diagnostic;
use crate::util::span::SourceFile;

/// 单个文件的诊断报告
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub file: &'a str,
    pub errors: usize,
    pub warnings: usize,
    pub diagnostics: &'a [Diagnostic],
}

impl<'a> JsonReport<'a> {
    pub fn new(
        file: &'a str,
        diagnostics: &'a [Diagnostic],
    ) -> Self {
        let errors = diagnostics.iter().filter(|d| d.is_error()).count();
        Self {
            file,
            errors,
            warnings: diagnostics.len() - errors,
            diagnostics,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct JsonEmitter;

impl JsonEmitter {
    /// 渲染单个诊断为 JSON 字符串
    pub fn render(diagnostic: &Diagnostic) -> String {
        to_string_pretty(diagnostic).unwrap_or_else(|_| "{}".to_string())
    }
}

impl DiagnosticEmitter for JsonEmitter {
    fn emit(
        &self,
        diagnostics: &[Diagnostic],
        source_file: Option<&SourceFile>,
    ) -> String {
        let file = source_file.map(|sf| sf.name.as_str()).unwrap_or("<unknown>");
        to_string_pretty(&JsonReport::new(file, diagnostics)).unwrap_or_else(|_| "{}".to_string())
    }
}
