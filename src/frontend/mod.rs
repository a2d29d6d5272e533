//! Frontend compilation pipeline
//!
//! Source bytes → [`lexer`] → [`parser`] → [`semantic`], driven by
//! [`pipeline::Compiler`]. Every stage runs to completion and reports its
//! errors as data.

pub mod lexer;
pub mod parser;
pub mod pipeline;
pub mod semantic;

pub use pipeline::{
    compile_all, CompilationPhase, CompileError, CompileOutput, Compiler, PipelineState,
};
