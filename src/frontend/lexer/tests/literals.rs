//! 字面量测试 - 整数、浮点、字符串

use crate::frontend::lexer::{tokenize, LexicalError, Operator, TokenKind, Delimiter};

#[cfg(test)]
mod lexer_literal_tests {
    use super::*;

    #[test]
    fn test_integers() {
        assert_eq!(
            tokenize("0 42 007").kinds(),
            vec![
                TokenKind::IntLiteral(0),
                TokenKind::IntLiteral(42),
                TokenKind::IntLiteral(7)
            ]
        );
    }

    #[test]
    fn test_floats() {
        assert_eq!(
            tokenize("3.14 1e3 2.5E-2 6e+1").kinds(),
            vec![
                TokenKind::FloatLiteral(3.14),
                TokenKind::FloatLiteral(1000.0),
                TokenKind::FloatLiteral(0.025),
                TokenKind::FloatLiteral(60.0),
            ]
        );
    }

    #[test]
    fn test_trailing_dot_is_not_fraction() {
        assert_eq!(
            tokenize("1.x").kinds(),
            vec![
                TokenKind::IntLiteral(1),
                TokenKind::Delimiter(Delimiter::Dot),
                TokenKind::ident("x"),
            ]
        );
    }

    #[test]
    fn test_number_followed_by_chinese_operator() {
        assert_eq!(
            tokenize("1 加 2").kinds(),
            vec![
                TokenKind::IntLiteral(1),
                TokenKind::Operator(Operator::Add),
                TokenKind::IntLiteral(2),
            ]
        );
    }

    #[test]
    fn test_two_decimal_points() {
        let out = tokenize("1.2.3 x");
        assert_eq!(out.kinds(), vec![TokenKind::ident("x")]);
        assert_eq!(out.errors.len(), 1);
        match &out.errors[0] {
            LexicalError::InvalidNumericLiteral { lexeme, span } => {
                assert_eq!(lexeme, "1.2.3");
                assert_eq!(span.start.offset, 0);
                assert_eq!(span.end.offset, 5);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_dangling_exponent_and_suffix() {
        let out = tokenize("1e 12abc 3.0e+");
        let lexemes: Vec<_> = out
            .errors
            .iter()
            .map(|e| match e {
                LexicalError::InvalidNumericLiteral { lexeme, .. } => lexeme.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(lexemes, ["1e", "12abc", "3.0e+"]);
        assert_eq!(out.tokens.len(), 1);
    }

    #[test]
    fn test_integer_overflow() {
        let out = tokenize("99999999999999999999");
        assert!(matches!(
            out.errors.as_slice(),
            [LexicalError::InvalidNumericLiteral { .. }]
        ));
    }

    #[test]
    fn test_ascii_string() {
        let out = tokenize(r#""你好\n世界\t\"引\"\\""#);
        assert_eq!(
            out.kinds(),
            vec![TokenKind::StringLiteral("你好\n世界\t\"引\"\\".to_string())]
        );
        assert!(out.errors.is_empty());
    }

    #[test]
    fn test_corner_bracket_string() {
        let out = tokenize(r"『问曰\』然』");
        assert_eq!(
            out.kinds(),
            vec![TokenKind::StringLiteral("问曰』然".to_string())]
        );
    }

    #[test]
    fn test_keywords_inside_strings_are_text() {
        let out = tokenize("『让 如果 「：』");
        assert_eq!(
            out.kinds(),
            vec![TokenKind::StringLiteral("让 如果 「：".to_string())]
        );
    }

    #[test]
    fn test_invalid_escape_keeps_char() {
        let out = tokenize(r#""a\qb""#);
        assert_eq!(out.kinds(), vec![TokenKind::StringLiteral("aqb".to_string())]);
        assert!(matches!(
            out.errors.as_slice(),
            [LexicalError::InvalidEscape { sequence: 'q', .. }]
        ));
    }

    #[test]
    fn test_multiline_string() {
        let out = tokenize("\"一\n二\" x");
        assert_eq!(out.tokens[1].span.start.line, 2);
    }
}
