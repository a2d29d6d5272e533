//! 编译流水线
//!
//! 词法 → 语法 → 语义。每个阶段都会完整执行，诊断作为数据在阶段间传递，
//! 最终按源码位置排序后一并返回。

use std::fmt;
use std::time::{Duration, Instant};

use rayon::prelude::*;

use super::lexer::{self, LexOutput, Token};
use super::parser::{self, ast::Module};
use super::semantic::{self, AnalyzedModule};
use crate::util::config::CompilerConfig;
use crate::util::diagnostic::{Diagnostic, DiagnosticCollector, Severity};

/// 流水线状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Lexing,
    Parsing,
    Analyzing,
    /// 完成且没有错误级诊断
    Completed,
    /// 完成但报告了错误
    Failed,
}

impl fmt::Display for PipelineState {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            PipelineState::Idle => write!(f, "idle"),
            PipelineState::Lexing => write!(f, "lexing"),
            PipelineState::Parsing => write!(f, "parsing"),
            PipelineState::Analyzing => write!(f, "analyzing"),
            PipelineState::Completed => write!(f, "completed"),
            PipelineState::Failed => write!(f, "failed"),
        }
    }
}

/// 编译阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompilationPhase {
    Lexing,
    Parsing,
    Analysis,
}

impl fmt::Display for CompilationPhase {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            CompilationPhase::Lexing => write!(f, "lexing"),
            CompilationPhase::Parsing => write!(f, "parsing"),
            CompilationPhase::Analysis => write!(f, "analysis"),
        }
    }
}

/// 一个编译单元的全部产出
#[derive(Debug, Clone)]
pub struct CompileOutput {
    /// 单元名（通常是文件路径）
    pub name: String,
    pub tokens: Vec<Token>,
    /// 语法分析没有得到模块时为 `None`
    pub analysis: Option<AnalyzedModule>,
    /// 三个阶段的诊断，按位置排序
    pub diagnostics: Vec<Diagnostic>,
    pub phase_durations: Vec<(CompilationPhase, Duration)>,
}

impl CompileOutput {
    pub fn module(&self) -> Option<&Module> {
        self.analysis.as_ref().map(|analysis| &analysis.module)
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

    /// 各阶段耗时之和
    pub fn total_duration(&self) -> Duration {
        self.phase_durations.iter().map(|(_, d)| *d).sum()
    }
}

/// 编译失败
#[derive(Debug, Clone, thiserror::Error)]
pub enum CompileError {
    #[error("{name}: {errors} error(s) reported")]
    Failed {
        name: String,
        errors: usize,
        /// 全部诊断（包括警告），按位置排序
        diagnostics: Vec<Diagnostic>,
    },
}

impl CompileError {
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            CompileError::Failed { diagnostics, .. } => diagnostics,
        }
    }
}

/// 编译器
#[derive(Debug, Clone)]
pub struct Compiler {
    config: CompilerConfig,
    state: PipelineState,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(CompilerConfig::default())
    }
}

impl Compiler {
    pub fn new(config: CompilerConfig) -> Self {
        Self {
            config,
            state: PipelineState::Idle,
        }
    }

    #[inline]
    pub fn state(&self) -> PipelineState {
        self.state
    }

    #[inline]
    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// 编译源码文本
    ///
    /// # Example
    /// ```
    /// use luoyan::frontend::Compiler;
    ///
    /// let output = Compiler::default().compile("demo.ly", "让 甲 = 1\n打印 乙");
    /// assert_eq!(output.error_count(), 1);
    /// assert_eq!(output.diagnostics[0].code, "E1001");
    /// ```
    pub fn compile(
        &mut self,
        name: &str,
        source: &str,
    ) -> CompileOutput {
        self.compile_bytes(name, source.as_bytes())
    }

    /// 编译原始字节；无法解码的字节作为词法错误报告
    pub fn compile_bytes(
        &mut self,
        name: &str,
        source: &[u8],
    ) -> CompileOutput {
        tracing::debug!(unit = name, bytes = source.len(), "compilation started");
        let mut durations = Vec::with_capacity(3);
        let mut collector = DiagnosticCollector::new();

        self.state = PipelineState::Lexing;
        let start = Instant::now();
        let LexOutput { tokens, errors } = lexer::tokenize_bytes(source);
        durations.push((CompilationPhase::Lexing, start.elapsed()));
        collector.extend(errors.into_iter().map(Diagnostic::from));

        self.state = PipelineState::Parsing;
        let start = Instant::now();
        let parsed = parser::parse_with_options(&tokens, &self.config.parser);
        durations.push((CompilationPhase::Parsing, start.elapsed()));
        collector.extend(parsed.diagnostics());

        let analysis = parsed.module.map(|module| {
            self.state = PipelineState::Analyzing;
            let start = Instant::now();
            let output = semantic::analyze_with_options(module, &self.config.analyzer);
            durations.push((CompilationPhase::Analysis, start.elapsed()));
            collector.extend(output.diagnostics());
            output.module
        });

        self.state = if collector.has_errors() {
            PipelineState::Failed
        } else {
            PipelineState::Completed
        };
        tracing::debug!(
            unit = name,
            errors = collector.error_count(),
            warnings = collector.warning_count(),
            state = %self.state,
            "compilation finished"
        );

        CompileOutput {
            name: name.to_string(),
            tokens,
            analysis,
            diagnostics: collector.into_sorted(),
            phase_durations: durations,
        }
    }

    /// 编译源码；有错误级诊断时返回 `Err`
    pub fn compile_strict(
        &mut self,
        name: &str,
        source: &str,
    ) -> Result<CompileOutput, CompileError> {
        let output = self.compile(name, source);
        if output.has_errors() {
            return Err(CompileError::Failed {
                name: output.name.clone(),
                errors: output.error_count(),
                diagnostics: output.diagnostics,
            });
        }
        Ok(output)
    }
}

/// 并行编译互相独立的单元，结果顺序与输入一致
pub fn compile_all<N, S>(
    units: &[(N, S)],
    config: &CompilerConfig,
) -> Vec<CompileOutput>
where
    N: AsRef<str> + Sync,
    S: AsRef<[u8]> + Sync,
{
    tracing::debug!(units = units.len(), "parallel compilation started");
    units
        .par_iter()
        .map(|(name, source)| {
            Compiler::new(config.clone()).compile_bytes(name.as_ref(), source.as_ref())
        })
        .collect()
}
