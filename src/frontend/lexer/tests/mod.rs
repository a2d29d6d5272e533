//! Lexer tests module
//!
//! - basic: 基础测试（标识符、空白符、位置）
//! - keywords: 关键字与最长匹配
//! - literals: 字面量测试（整数、浮点、字符串、引号标识符）
//! - operators: 运算符与分隔符
//! - classical: 古雅体标记
//! - errors: 错误恢复
//! - properties: 属性测试

mod errors;
mod literals;
