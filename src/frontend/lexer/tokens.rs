//! Token types

use std::fmt;

use crate::util::diagnostic::{codes, Diagnostic};
use crate::util::span::Span;

/// Lexical error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexicalError {
    #[error("invalid UTF-8 byte sequence at offset {}", span.start.offset)]
    InvalidByteSequence { span: Span },
    #[error("unsupported character '{ch}'")]
    UnsupportedCharacter { ch: char, span: Span },
    #[error("invalid numeric literal `{lexeme}`")]
    InvalidNumericLiteral { lexeme: String, span: Span },
    #[error("unterminated string literal")]
    UnterminatedStringLiteral { span: Span },
    #[error("unterminated quoted identifier")]
    UnterminatedQuotedIdentifier { span: Span },
    #[error("empty quoted identifier")]
    EmptyQuotedIdentifier { span: Span },
    #[error("invalid escape sequence `\\{sequence}`")]
    InvalidEscape { sequence: char, span: Span },
    #[error("unterminated comment")]
    UnterminatedComment { span: Span },
}

impl LexicalError {
    pub fn span(&self) -> Span {
        match self {
            LexicalError::InvalidByteSequence { span }
            | LexicalError::UnsupportedCharacter { span, .. }
            | LexicalError::InvalidNumericLiteral { span, .. }
            | LexicalError::UnterminatedStringLiteral { span }
            | LexicalError::UnterminatedQuotedIdentifier { span }
            | LexicalError::EmptyQuotedIdentifier { span }
            | LexicalError::InvalidEscape { span, .. }
            | LexicalError::UnterminatedComment { span } => *span,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            LexicalError::InvalidByteSequence { .. } => codes::INVALID_BYTE_SEQUENCE,
            LexicalError::UnsupportedCharacter { .. } => codes::UNSUPPORTED_CHARACTER,
            LexicalError::InvalidNumericLiteral { .. } => codes::INVALID_NUMERIC_LITERAL,
            LexicalError::UnterminatedStringLiteral { .. } => codes::UNTERMINATED_STRING,
            LexicalError::UnterminatedQuotedIdentifier { .. } => {
                codes::UNTERMINATED_QUOTED_IDENTIFIER
            }
            LexicalError::EmptyQuotedIdentifier { .. } => codes::EMPTY_QUOTED_IDENTIFIER,
            LexicalError::InvalidEscape { .. } => codes::INVALID_ESCAPE,
            LexicalError::UnterminatedComment { .. } => codes::UNTERMINATED_COMMENT,
        }
    }

    fn suggestion(&self) -> Option<&'static str> {
        match self {
            LexicalError::UnterminatedStringLiteral { .. } => {
                Some("add the closing `\"` or `』` delimiter")
            }
            LexicalError::UnterminatedQuotedIdentifier { .. } => {
                Some("quoted identifiers must be closed with `」` on the same line")
            }
            LexicalError::UnterminatedComment { .. } => Some("close the comment with `：」`"),
            _ => None,
        }
    }
}

impl From<LexicalError> for Diagnostic {
    fn from(error: LexicalError) -> Self {
        let diagnostic = Diagnostic::error(error.code(), error.to_string(), error.span());
        match error.suggestion() {
            Some(help) => diagnostic.with_suggestion(help),
            None => diagnostic,
        }
    }
}

/// Reserved words, in their canonical Chinese spelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// 让 / let
    Let,
    /// 递归 / rec
    Rec,
    /// 在 / in
    In,
    /// 函数 / fun
    Fun,
    /// 如果 / if
    If,
    /// 那么 / then
    Then,
    /// 否则 / else
    Else,
    /// 匹配 / match
    Match,
    /// 与 / with
    With,
    /// 当 / when
    When,
    /// 类型 / type
    Type,
    /// 之 / of
    Of,
    /// 模块 / module
    Module,
    /// 结构 / struct
    Struct,
    /// 结束 / end
    End,
    /// 真 / true
    True,
    /// 假 / false
    False,
    /// `_`
    Wildcard,

    // 古雅体
    /// 设
    Set,
    /// 为
    As,
    /// 夫
    FuncIntro,
    /// 者
    Subject,
    /// 受
    Receives,
    /// 焉
    ParamsEnd,
    /// 算法
    Algorithm,
    /// 乃
    BodyIntro,
    /// 也
    FuncEnd,
    /// 观
    Observe,
    /// 之性
    NatureOf,
    /// 若
    Case,
    /// 则
    Yields,
    /// 余者
    Otherwise,
    /// 观毕
    ObserveEnd,
    /// 定义
    Define,
    /// 接受
    Accepts,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Let => "让",
            Keyword::Rec => "递归",
            Keyword::In => "在",
            Keyword::Fun => "函数",
            Keyword::If => "如果",
            Keyword::Then => "那么",
            Keyword::Else => "否则",
            Keyword::Match => "匹配",
            Keyword::With => "与",
            Keyword::When => "当",
            Keyword::Type => "类型",
            Keyword::Of => "之",
            Keyword::Module => "模块",
            Keyword::Struct => "结构",
            Keyword::End => "结束",
            Keyword::True => "真",
            Keyword::False => "假",
            Keyword::Wildcard => "_",
            Keyword::Set => "设",
            Keyword::As => "为",
            Keyword::FuncIntro => "夫",
            Keyword::Subject => "者",
            Keyword::Receives => "受",
            Keyword::ParamsEnd => "焉",
            Keyword::Algorithm => "算法",
            Keyword::BodyIntro => "乃",
            Keyword::FuncEnd => "也",
            Keyword::Observe => "观",
            Keyword::NatureOf => "之性",
            Keyword::Case => "若",
            Keyword::Yields => "则",
            Keyword::Otherwise => "余者",
            Keyword::ObserveEnd => "观毕",
            Keyword::Define => "定义",
            Keyword::Accepts => "接受",
        }
    }
}

/// Operators; ASCII, symbol and word spellings of the same operator share a kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `+` 加
    Add,
    /// `-` 减
    Sub,
    /// `*` 乘
    Mul,
    /// `/` 除
    Div,
    /// `%` 除余
    Mod,
    /// `==` 等于
    EqEq,
    /// `!=` `<>` 不等于
    NotEq,
    /// `<` 小于
    Lt,
    /// `<=` 小于等于
    Le,
    /// `>` 大于
    Gt,
    /// `>=` 大于等于
    Ge,
    /// `&&` 且
    And,
    /// `||` 或
    Or,
    /// `!` 非
    Not,
    /// `<-` `←` `:=`
    Assign,
    /// `->` `→`
    Arrow,
    /// `=>` `⇒`
    FatArrow,
    /// `::`
    Cons,
    /// `...`
    Ellipsis,
    /// `=`
    Equals,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Mod => "%",
            Operator::EqEq => "==",
            Operator::NotEq => "!=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::And => "&&",
            Operator::Or => "||",
            Operator::Not => "!",
            Operator::Assign => "<-",
            Operator::Arrow => "->",
            Operator::FatArrow => "=>",
            Operator::Cons => "::",
            Operator::Ellipsis => "...",
            Operator::Equals => "=",
        }
    }
}

/// Delimiters; ASCII and full-width forms are distinct kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `（`
    FullLParen,
    /// `）`
    FullRParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `【`
    LLenticular,
    /// `】`
    RLenticular,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `,`
    Comma,
    /// `，`
    FullComma,
    /// `、`
    EnumComma,
    /// `;`
    Semicolon,
    /// `；`
    FullSemicolon,
    /// `:`
    Colon,
    /// `：`
    FullColon,
    /// `。`
    FullStop,
    /// `.`
    Dot,
    /// `|`
    Pipe,
    /// `｜`
    FullPipe,
}

impl Delimiter {
    pub fn as_str(self) -> &'static str {
        match self {
            Delimiter::LParen => "(",
            Delimiter::RParen => ")",
            Delimiter::FullLParen => "（",
            Delimiter::FullRParen => "）",
            Delimiter::LBracket => "[",
            Delimiter::RBracket => "]",
            Delimiter::LLenticular => "【",
            Delimiter::RLenticular => "】",
            Delimiter::LBrace => "{",
            Delimiter::RBrace => "}",
            Delimiter::Comma => ",",
            Delimiter::FullComma => "，",
            Delimiter::EnumComma => "、",
            Delimiter::Semicolon => ";",
            Delimiter::FullSemicolon => "；",
            Delimiter::Colon => ":",
            Delimiter::FullColon => "：",
            Delimiter::FullStop => "。",
            Delimiter::Dot => ".",
            Delimiter::Pipe => "|",
            Delimiter::FullPipe => "｜",
        }
    }

    /// The closing partner of an opening bracket
    pub fn closing(self) -> Option<Delimiter> {
        match self {
            Delimiter::LParen => Some(Delimiter::RParen),
            Delimiter::FullLParen => Some(Delimiter::FullRParen),
            Delimiter::LBracket => Some(Delimiter::RBracket),
            Delimiter::LLenticular => Some(Delimiter::RLenticular),
            Delimiter::LBrace => Some(Delimiter::RBrace),
            _ => None,
        }
    }

    pub fn is_closing(self) -> bool {
        matches!(
            self,
            Delimiter::RParen
                | Delimiter::FullRParen
                | Delimiter::RBracket
                | Delimiter::RLenticular
                | Delimiter::RBrace
        )
    }

    /// `,` `，` `、`
    pub fn is_comma(self) -> bool {
        matches!(
            self,
            Delimiter::Comma | Delimiter::FullComma | Delimiter::EnumComma
        )
    }

    /// Statement separators: `;` `；` `。`
    pub fn is_separator(self) -> bool {
        matches!(
            self,
            Delimiter::Semicolon | Delimiter::FullSemicolon | Delimiter::FullStop
        )
    }

    pub fn is_colon(self) -> bool {
        matches!(self, Delimiter::Colon | Delimiter::FullColon)
    }

    pub fn is_pipe(self) -> bool {
        matches!(self, Delimiter::Pipe | Delimiter::FullPipe)
    }
}

/// Markers of the classical list dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassicalMarker {
    /// 列开始
    ListStart,
    /// 列结束
    ListEnd,
    /// 其 + 数词，如 其一、其十二
    Ordinal(u32),
    /// 空空如也
    EmptyList,
    /// 有首有尾
    HeadTail,
    /// 首名为
    HeadNamed,
    /// 尾名为
    TailNamed,
}

impl fmt::Display for ClassicalMarker {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            ClassicalMarker::ListStart => write!(f, "列开始"),
            ClassicalMarker::ListEnd => write!(f, "列结束"),
            ClassicalMarker::Ordinal(n) => write!(
                f,
                "其{}",
                super::keywords::to_chinese_numeral(*n).unwrap_or_default()
            ),
            ClassicalMarker::EmptyList => write!(f, "空空如也"),
            ClassicalMarker::HeadTail => write!(f, "有首有尾"),
            ClassicalMarker::HeadNamed => write!(f, "首名为"),
            ClassicalMarker::TailNamed => write!(f, "尾名为"),
        }
    }
}

/// Token kind
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Keyword(Keyword),
    Identifier { name: String, quoted: bool },
    IntLiteral(i64),
    FloatLiteral(f64),
    StringLiteral(String),
    Operator(Operator),
    Delimiter(Delimiter),
    Classical(ClassicalMarker),
    Eof,
}

impl TokenKind {
    pub fn ident(name: impl Into<String>) -> Self {
        TokenKind::Identifier {
            name: name.into(),
            quoted: false,
        }
    }

    /// Short category name used in diagnostics
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Keyword(kw) => format!("keyword `{}`", kw.as_str()),
            TokenKind::Identifier { name, .. } => format!("identifier `{}`", name),
            TokenKind::IntLiteral(n) => format!("integer `{}`", n),
            TokenKind::FloatLiteral(n) => format!("float `{}`", n),
            TokenKind::StringLiteral(_) => "string literal".to_string(),
            TokenKind::Operator(op) => format!("`{}`", op.as_str()),
            TokenKind::Delimiter(delim) => format!("`{}`", delim.as_str()),
            TokenKind::Classical(marker) => format!("`{}`", marker),
            TokenKind::Eof => "end of file".to_string(),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// Token with source text and location
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text exactly as written
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        text: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    pub fn eof(span: Span) -> Self {
        Self::new(TokenKind::Eof, "", span)
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}
