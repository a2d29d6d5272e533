//! 文本诊断渲染器

use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};

use crate::util::diagnostic::{Diagnostic, Severity};
use crate::util::span::SourceFile;

/// 渲染器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// 是否启用颜色输出
    pub use_colors: bool,
    /// 是否显示源码片段
    pub show_source: bool,
    /// 是否显示修复建议
    pub show_help: bool,
    /// 是否显示行号
    pub show_line_numbers: bool,
    /// 指示字符
    pub indicator: char,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            use_colors: true,
            show_source: true,
            show_help: true,
            show_line_numbers: true,
            indicator: '^',
        }
    }
}

/// 诊断渲染器 trait
pub trait DiagnosticEmitter {
    fn emit(
        &self,
        diagnostics: &[Diagnostic],
        source_file: Option<&SourceFile>,
    ) -> String;
}

/// 文本诊断渲染器
#[derive(Debug, Clone, Default)]
pub struct TextEmitter {
    config: EmitterConfig,
}

impl TextEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EmitterConfig) -> Self {
        Self { config }
    }

    /// 渲染单个诊断（无源码）
    pub fn render(
        &self,
        diagnostic: &Diagnostic,
    ) -> String {
        self.render_with_source(diagnostic, None)
    }

    pub fn render_with_source(
        &self,
        diagnostic: &Diagnostic,
        source_file: Option<&SourceFile>,
    ) -> String {
        let mut output = String::new();

        output.push_str(&self.render_header(diagnostic));
        output.push_str(&self.render_location(diagnostic, source_file));

        if self.config.show_source {
            if let Some(snippet) = self.render_source_snippet(diagnostic, source_file) {
                output.push_str(&snippet);
            }
        }

        if self.config.show_help {
            if let Some(suggestion) = &diagnostic.suggestion {
                output.push_str(&format!("{}: {}\n", self.paint_help("help"), suggestion));
            }
        }

        output
    }

    fn render_header(
        &self,
        diagnostic: &Diagnostic,
    ) -> String {
        let severity = diagnostic.severity.to_string();
        let severity = if self.config.use_colors {
            match diagnostic.severity {
                Severity::Error => severity.red().bold().to_string(),
                Severity::Warning => severity.yellow().bold().to_string(),
            }
        } else {
            severity
        };
        let code = if self.config.use_colors {
            diagnostic.code.bold().to_string()
        } else {
            diagnostic.code.clone()
        };
        format!("{}[{}]: {}\n", severity, code, diagnostic.message)
    }

    fn render_location(
        &self,
        diagnostic: &Diagnostic,
        source_file: Option<&SourceFile>,
    ) -> String {
        if diagnostic.span.is_dummy() {
            return String::new();
        }
        let file_name = source_file
            .map(|sf| sf.name.as_str())
            .unwrap_or("<unknown>");
        format!(
            " --> {}:{}:{}\n",
            file_name, diagnostic.span.start.line, diagnostic.span.start.column
        )
    }

    fn render_source_snippet(
        &self,
        diagnostic: &Diagnostic,
        source_file: Option<&SourceFile>,
    ) -> Option<String> {
        let span = diagnostic.span;
        if span.is_dummy() {
            return None;
        }
        let line = source_file?.line_text(span.start.line)?;

        let gutter = if self.config.show_line_numbers {
            format!("{:>4} | ", span.start.line)
        } else {
            "     | ".to_string()
        };

        // 宽字符占两列，指示符需要按显示宽度对齐
        let prefix: String = line.chars().take(span.start.column - 1).collect();
        let underlined: String = if span.start.line == span.end.line {
            line.chars()
                .skip(span.start.column - 1)
                .take(span.end.column.saturating_sub(span.start.column))
                .collect()
        } else {
            line.chars().skip(span.start.column - 1).collect()
        };
        let indicator = self
            .config
            .indicator
            .to_string()
            .repeat(display_width(&underlined).max(1));
        let indicator = if self.config.use_colors {
            match diagnostic.severity {
                Severity::Error => indicator.red().to_string(),
                Severity::Warning => indicator.yellow().to_string(),
            }
        } else {
            indicator
        };

        Some(format!(
            "{}{}\n     | {}{}\n",
            gutter,
            line,
            " ".repeat(display_width(&prefix)),
            indicator
        ))
    }

    fn paint_help(
        &self,
        text: &str,
    ) -> String {
        if self.config.use_colors {
            text.cyan().bold().to_string()
        } else {
            text.to_string()
        }
    }
}

impl DiagnosticEmitter for TextEmitter {
    fn emit(
        &self,
        diagnostics: &[Diagnostic],
        source_file: Option<&SourceFile>,
    ) -> String {
        diagnostics
            .iter()
            .map(|d| self.render_with_source(d, source_file))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// 终端显示宽度：CJK 与全角字符占两列
pub fn display_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

fn char_width(ch: char) -> usize {
    match ch as u32 {
        0x1100..=0x115F
        | 0x2E80..=0x303E
        | 0x3040..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6 => 2,
        _ => 1,
    }
}
