//! 错误码注册表
//!
//! - E00xx: 词法分析
//! - E001x: 语法分析
//! - E1xxx: 语义分析
//! - W1xxx: 警告

use once_cell::sync::Lazy;

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lexer,
    Parser,
    Semantic,
    Lint,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            ErrorCategory::Lexer => write!(f, "Lexer"),
            ErrorCategory::Parser => write!(f, "Parser"),
            ErrorCategory::Semantic => write!(f, "Semantic"),
            ErrorCategory::Lint => write!(f, "Lint"),
        }
    }
}

/// 错误码定义
#[derive(Debug, Clone, Copy)]
pub struct ErrorCodeDefinition {
    /// 错误码，如 "E1001"
    pub code: &'static str,
    pub category: ErrorCategory,
    /// 简短标题
    pub title: &'static str,
}

pub const INVALID_BYTE_SEQUENCE: &str = "E0000";
pub const UNSUPPORTED_CHARACTER: &str = "E0001";
pub const INVALID_NUMERIC_LITERAL: &str = "E0002";
pub const UNTERMINATED_STRING: &str = "E0003";
pub const UNTERMINATED_QUOTED_IDENTIFIER: &str = "E0004";
pub const EMPTY_QUOTED_IDENTIFIER: &str = "E0005";
pub const INVALID_ESCAPE: &str = "E0006";
pub const UNTERMINATED_COMMENT: &str = "E0007";

pub const EXPECTED_TOKEN: &str = "E0010";
pub const UNEXPECTED_TOKEN: &str = "E0011";
pub const INVALID_SYNTAX: &str = "E0012";
pub const MISMATCHED_BRACKET: &str = "E0013";

pub const UNBOUND_VARIABLE: &str = "E1001";
pub const TYPE_MISMATCH: &str = "E1002";
pub const UNKNOWN_TYPE: &str = "E1003";
pub const UNKNOWN_CONSTRUCTOR: &str = "E1004";
pub const UNKNOWN_MODULE_MEMBER: &str = "E1005";
pub const DUPLICATE_BINDING: &str = "E1006";
pub const ARITY_MISMATCH: &str = "E1010";
pub const INVALID_ASSIGNMENT_TARGET: &str = "E1011";

pub const UNUSED_BINDING: &str = "W1001";

static ERROR_CODES: Lazy<Vec<ErrorCodeDefinition>> = Lazy::new(|| {
    use ErrorCategory::*;

    let def = |code, category, title| ErrorCodeDefinition {
        code,
        category,
        title,
    };

    vec![
        def(INVALID_BYTE_SEQUENCE, Lexer, "invalid UTF-8 byte sequence"),
        def(UNSUPPORTED_CHARACTER, Lexer, "unsupported character"),
        def(INVALID_NUMERIC_LITERAL, Lexer, "invalid numeric literal"),
        def(UNTERMINATED_STRING, Lexer, "unterminated string literal"),
        def(
            UNTERMINATED_QUOTED_IDENTIFIER,
            Lexer,
            "unterminated quoted identifier",
        ),
        def(EMPTY_QUOTED_IDENTIFIER, Lexer, "empty quoted identifier"),
        def(INVALID_ESCAPE, Lexer, "invalid escape sequence"),
        def(UNTERMINATED_COMMENT, Lexer, "unterminated comment"),
        def(EXPECTED_TOKEN, Parser, "expected token not found"),
        def(UNEXPECTED_TOKEN, Parser, "unexpected token"),
        def(INVALID_SYNTAX, Parser, "invalid syntax"),
        def(MISMATCHED_BRACKET, Parser, "mismatched bracket"),
        def(UNBOUND_VARIABLE, Semantic, "unbound variable"),
        def(TYPE_MISMATCH, Semantic, "type mismatch"),
        def(UNKNOWN_TYPE, Semantic, "unknown type"),
        def(UNKNOWN_CONSTRUCTOR, Semantic, "unknown constructor"),
        def(UNKNOWN_MODULE_MEMBER, Semantic, "unknown module member"),
        def(DUPLICATE_BINDING, Semantic, "duplicate binding"),
        def(ARITY_MISMATCH, Semantic, "arity mismatch"),
        def(INVALID_ASSIGNMENT_TARGET, Semantic, "invalid assignment target"),
        def(UNUSED_BINDING, Lint, "unused binding"),
    ]
});

impl ErrorCodeDefinition {
    /// 根据代码查找错误码定义
    pub fn find(code: &str) -> Option<&'static Self> {
        ERROR_CODES.iter().find(|c| c.code == code)
    }

    /// 获取所有错误码
    pub fn all() -> &'static [Self] {
        &ERROR_CODES
    }

    /// 按类别获取错误码
    pub fn by_category(category: ErrorCategory) -> impl Iterator<Item = &'static Self> {
        ERROR_CODES.iter().filter(move |c| c.category == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_error_code() {
        let code = ErrorCodeDefinition::find("E0003").unwrap();
        assert_eq!(code.category, ErrorCategory::Lexer);
        assert_eq!(code.title, "unterminated string literal");
    }

    #[test]
    fn test_find_unknown_code() {
        assert!(ErrorCodeDefinition::find("E9999").is_none());
    }

    #[test]
    fn test_codes_are_unique() {
        let all = ErrorCodeDefinition::all();
        for (i, a) in all.iter().enumerate() {
            assert!(all[i + 1..].iter().all(|b| b.code != a.code), "{}", a.code);
        }
    }

    #[test]
    fn test_by_category() {
        assert_eq!(ErrorCodeDefinition::by_category(ErrorCategory::Lint).count(), 1);
        assert!(ErrorCodeDefinition::by_category(ErrorCategory::Parser)
            .all(|c| c.code.starts_with("E001")));
    }
}
