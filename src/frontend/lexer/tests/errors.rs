//! 错误处理测试 - 诊断与恢复

use crate::frontend::lexer::{tokenize, tokenize_bytes, LexicalError, TokenKind};
use crate::util::diagnostic::{codes, Diagnostic};

#[cfg(test)]
mod lexer_error_tests {
    use super::*;

    #[test]
    fn test_unterminated_string_at_eof() {
        let out = tokenize("让 x = \"未完");
        assert_eq!(out.errors.len(), 1);
        assert!(matches!(
            out.errors[0],
            LexicalError::UnterminatedStringLiteral { .. }
        ));
        // 报告位置为起始引号
        assert_eq!(out.errors[0].span().start.column, 7);
        // 紧随其后的是 EOF
        let last_two: Vec<_> = out.tokens.iter().rev().take(2).collect();
        assert!(last_two[0].is_eof());
        assert_eq!(last_two[1].text, "=");
    }

    #[test]
    fn test_unterminated_corner_string() {
        let out = tokenize("『甲乙");
        assert_eq!(out.tokens.len(), 1);
        assert!(matches!(
            out.errors.as_slice(),
            [LexicalError::UnterminatedStringLiteral { .. }]
        ));
    }

    #[test]
    fn test_unterminated_quoted_identifier_reports_opening() {
        let out = tokenize("甲 「乙丙\n丁");
        assert_eq!(out.errors.len(), 1);
        match &out.errors[0] {
            LexicalError::UnterminatedQuotedIdentifier { span } => {
                assert_eq!(span.start.column, 3);
                assert_eq!(span.start.line, 1);
            }
            other => panic!("unexpected {:?}", other),
        }
        // 扫描在下一行继续
        assert_eq!(out.kinds(), vec![TokenKind::ident("甲"), TokenKind::ident("丁")]);
    }

    #[test]
    fn test_empty_quoted_identifier() {
        let out = tokenize("「」");
        assert!(matches!(
            out.errors.as_slice(),
            [LexicalError::EmptyQuotedIdentifier { .. }]
        ));
    }

    #[test]
    fn test_unsupported_characters_are_reported_and_skipped() {
        let out = tokenize("a @ b § c & d");
        assert_eq!(
            out.kinds(),
            vec![
                TokenKind::ident("a"),
                TokenKind::ident("b"),
                TokenKind::ident("c"),
                TokenKind::ident("d"),
            ]
        );
        let chars: Vec<char> = out
            .errors
            .iter()
            .filter_map(|e| match e {
                LexicalError::UnsupportedCharacter { ch, .. } => Some(*ch),
                _ => None,
            })
            .collect();
        assert_eq!(chars, ['@', '§', '&']);
    }

    #[test]
    fn test_stray_closing_quote_is_rejected() {
        let out = tokenize("甲」");
        assert!(matches!(
            out.errors.as_slice(),
            [LexicalError::UnsupportedCharacter { ch: '」', .. }]
        ));
    }

    #[test]
    fn test_unterminated_comment() {
        let out = tokenize("x 「：没有结束");
        assert_eq!(out.kinds(), vec![TokenKind::ident("x")]);
        assert!(matches!(
            out.errors.as_slice(),
            [LexicalError::UnterminatedComment { .. }]
        ));
    }

    #[test]
    fn test_all_errors_in_one_pass() {
        let out = tokenize("@ 1.2.3 \"x\\q\" # 「」");
        assert_eq!(out.errors.len(), 5);
        assert_eq!(out.tokens.len(), 2);
    }

    #[test]
    fn test_invalid_utf8() {
        let out = tokenize_bytes(&[b'a', b' ', 0xFF, 0xFE, b' ', b'b']);
        assert_eq!(out.kinds(), vec![TokenKind::ident("a"), TokenKind::ident("b")]);
        let offsets: Vec<usize> = out
            .errors
            .iter()
            .map(|e| match e {
                LexicalError::InvalidByteSequence { span } => span.start.offset,
                _ => usize::MAX,
            })
            .collect();
        assert_eq!(offsets, [2, 3]);
    }

    #[test]
    fn test_diagnostic_conversion() {
        let out = tokenize("\"abc");
        let diagnostics: Vec<Diagnostic> = out.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, codes::UNTERMINATED_STRING);
        assert!(diagnostics[0].is_error());
        assert!(diagnostics[0].suggestion.is_some());
    }
}
