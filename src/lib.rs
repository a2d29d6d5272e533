//! LuoYan (骆言) compiler front-end
//!
//! A lexer, parser and semantic analyzer for a Chinese-native programming
//! language with two surface dialects: a modern one with Chinese keywords and
//! a classical 文言 one. Both produce the same AST.
//!
//! # Example
//!
//! ```
//! let output = luoyan::compile("demo.ly", "夫「阶乘」者受「n」焉算法乃\n  如果 n 小于等于 1 那么 1 否则 n 乘 阶乘 (n 减 1)\n也\n打印 (阶乘 5)");
//! assert!(output.diagnostics.is_empty());
//! ```
//!
//! The stages can also be driven one at a time:
//!
//! ```
//! use luoyan::frontend::{lexer, parser, semantic};
//!
//! let lexed = lexer::tokenize("设 甲 为 列开始 1 其一 2 其二 列结束");
//! let parsed = parser::parse(&lexed.tokens);
//! let analyzed = semantic::analyze(parsed.module.unwrap());
//! assert!(analyzed.errors.is_empty());
//! ```

#![doc(html_root_url = "https://docs.rs/luoyan")]
#![warn(rust_2018_idioms)]

pub mod frontend;
pub mod util;

pub use frontend::{compile_all, CompileError, CompileOutput, Compiler};
pub use util::config::CompilerConfig;
pub use util::diagnostic::{Diagnostic, Severity};

/// Language version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Language name
pub const NAME: &str = "LuoYan (骆言)";

/// Source file extension
pub const FILE_EXTENSION: &str = "ly";

/// Compile one unit with the default configuration
pub fn compile(
    name: &str,
    source: &str,
) -> CompileOutput {
    Compiler::default().compile(name, source)
}
