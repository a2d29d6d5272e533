//! 关键字表与数词
//!
//! 关键字表在首次使用时初始化，之后只读，可被并发的词法分析实例共享。

use hashbrown::HashMap;
use once_cell::sync::Lazy;
use smallvec::SmallVec;

use super::tokens::{ClassicalMarker, Delimiter, Keyword, Operator, TokenKind};

/// 词形表项：关键字、文字运算符、古雅体标记
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Word {
    Keyword(Keyword),
    Operator(Operator),
    Classical(ClassicalMarker),
}

impl Word {
    pub fn to_token_kind(self) -> TokenKind {
        match self {
            Word::Keyword(kw) => TokenKind::Keyword(kw),
            Word::Operator(op) => TokenKind::Operator(op),
            Word::Classical(marker) => TokenKind::Classical(marker),
        }
    }
}

const CHINESE_WORDS: &[(&str, Word)] = &[
    ("让", Word::Keyword(Keyword::Let)),
    ("递归", Word::Keyword(Keyword::Rec)),
    ("在", Word::Keyword(Keyword::In)),
    ("函数", Word::Keyword(Keyword::Fun)),
    ("如果", Word::Keyword(Keyword::If)),
    ("那么", Word::Keyword(Keyword::Then)),
    ("否则", Word::Keyword(Keyword::Else)),
    ("匹配", Word::Keyword(Keyword::Match)),
    ("与", Word::Keyword(Keyword::With)),
    ("当", Word::Keyword(Keyword::When)),
    ("类型", Word::Keyword(Keyword::Type)),
    ("之", Word::Keyword(Keyword::Of)),
    ("模块", Word::Keyword(Keyword::Module)),
    ("结构", Word::Keyword(Keyword::Struct)),
    ("结束", Word::Keyword(Keyword::End)),
    ("真", Word::Keyword(Keyword::True)),
    ("假", Word::Keyword(Keyword::False)),
    ("设", Word::Keyword(Keyword::Set)),
    ("为", Word::Keyword(Keyword::As)),
    ("夫", Word::Keyword(Keyword::FuncIntro)),
    ("者", Word::Keyword(Keyword::Subject)),
    ("受", Word::Keyword(Keyword::Receives)),
    ("焉", Word::Keyword(Keyword::ParamsEnd)),
    ("算法", Word::Keyword(Keyword::Algorithm)),
    ("乃", Word::Keyword(Keyword::BodyIntro)),
    ("也", Word::Keyword(Keyword::FuncEnd)),
    ("观", Word::Keyword(Keyword::Observe)),
    ("之性", Word::Keyword(Keyword::NatureOf)),
    ("若", Word::Keyword(Keyword::Case)),
    ("则", Word::Keyword(Keyword::Yields)),
    ("余者", Word::Keyword(Keyword::Otherwise)),
    ("观毕", Word::Keyword(Keyword::ObserveEnd)),
    ("定义", Word::Keyword(Keyword::Define)),
    ("接受", Word::Keyword(Keyword::Accepts)),
    ("加", Word::Operator(Operator::Add)),
    ("减", Word::Operator(Operator::Sub)),
    ("乘", Word::Operator(Operator::Mul)),
    ("除", Word::Operator(Operator::Div)),
    ("除余", Word::Operator(Operator::Mod)),
    ("等于", Word::Operator(Operator::EqEq)),
    ("不等于", Word::Operator(Operator::NotEq)),
    ("小于", Word::Operator(Operator::Lt)),
    ("小于等于", Word::Operator(Operator::Le)),
    ("大于", Word::Operator(Operator::Gt)),
    ("大于等于", Word::Operator(Operator::Ge)),
    ("且", Word::Operator(Operator::And)),
    ("或", Word::Operator(Operator::Or)),
    ("非", Word::Operator(Operator::Not)),
    ("列开始", Word::Classical(ClassicalMarker::ListStart)),
    ("列结束", Word::Classical(ClassicalMarker::ListEnd)),
    ("空空如也", Word::Classical(ClassicalMarker::EmptyList)),
    ("有首有尾", Word::Classical(ClassicalMarker::HeadTail)),
    ("首名为", Word::Classical(ClassicalMarker::HeadNamed)),
    ("尾名为", Word::Classical(ClassicalMarker::TailNamed)),
];

const ENGLISH_WORDS: &[(&str, Word)] = &[
    ("let", Word::Keyword(Keyword::Let)),
    ("rec", Word::Keyword(Keyword::Rec)),
    ("in", Word::Keyword(Keyword::In)),
    ("fun", Word::Keyword(Keyword::Fun)),
    ("if", Word::Keyword(Keyword::If)),
    ("then", Word::Keyword(Keyword::Then)),
    ("else", Word::Keyword(Keyword::Else)),
    ("match", Word::Keyword(Keyword::Match)),
    ("with", Word::Keyword(Keyword::With)),
    ("when", Word::Keyword(Keyword::When)),
    ("type", Word::Keyword(Keyword::Type)),
    ("of", Word::Keyword(Keyword::Of)),
    ("module", Word::Keyword(Keyword::Module)),
    ("struct", Word::Keyword(Keyword::Struct)),
    ("end", Word::Keyword(Keyword::End)),
    ("true", Word::Keyword(Keyword::True)),
    ("false", Word::Keyword(Keyword::False)),
    ("_", Word::Keyword(Keyword::Wildcard)),
    ("mod", Word::Operator(Operator::Mod)),
];

/// 中文词形表
static CHINESE_TABLE: Lazy<HashMap<&'static str, Word>> =
    Lazy::new(|| CHINESE_WORDS.iter().copied().collect());

/// 完整词形表（中文与英文别名）
static KEYWORD_TABLE: Lazy<HashMap<&'static str, Word>> = Lazy::new(|| {
    CHINESE_WORDS
        .iter()
        .chain(ENGLISH_WORDS.iter())
        .copied()
        .collect()
});

/// 中文词形的最大字符数，用于最长匹配
static MAX_WORD_CHARS: Lazy<usize> = Lazy::new(|| {
    CHINESE_WORDS
        .iter()
        .map(|(w, _)| w.chars().count())
        .max()
        .unwrap_or(1)
});

/// 单字符标点到词法类别的映射
pub static PUNCTUATION: Lazy<HashMap<char, TokenKind>> = Lazy::new(|| {
    let delimiters = [
        ('(', Delimiter::LParen),
        (')', Delimiter::RParen),
        ('（', Delimiter::FullLParen),
        ('）', Delimiter::FullRParen),
        ('[', Delimiter::LBracket),
        (']', Delimiter::RBracket),
        ('【', Delimiter::LLenticular),
        ('】', Delimiter::RLenticular),
        ('{', Delimiter::LBrace),
        ('}', Delimiter::RBrace),
        (',', Delimiter::Comma),
        ('，', Delimiter::FullComma),
        ('、', Delimiter::EnumComma),
        (';', Delimiter::Semicolon),
        ('；', Delimiter::FullSemicolon),
        ('：', Delimiter::FullColon),
        ('。', Delimiter::FullStop),
        ('｜', Delimiter::FullPipe),
    ];
    let operators = [
        ('+', Operator::Add),
        ('*', Operator::Mul),
        ('%', Operator::Mod),
        ('→', Operator::Arrow),
        ('⇒', Operator::FatArrow),
        ('←', Operator::Assign),
    ];
    delimiters
        .into_iter()
        .map(|(c, d)| (c, TokenKind::Delimiter(d)))
        .chain(operators.into_iter().map(|(c, o)| (c, TokenKind::Operator(o))))
        .collect()
});

/// 精确查表
pub fn lookup(word: &str) -> Option<Word> {
    KEYWORD_TABLE.get(word).copied()
}

/// 解析 `其` 加数词形式的序数，如 `其三` → 3
pub fn parse_ordinal(word: &str) -> Option<u32> {
    word.strip_prefix('其').and_then(parse_chinese_numeral)
}

/// 解析 1 到 99 的中文数词
pub fn parse_chinese_numeral(text: &str) -> Option<u32> {
    let digits: SmallVec<[u32; 3]> = text.chars().map(digit_value).collect::<Option<_>>()?;
    match digits.as_slice() {
        [d] if *d > 0 && *d < 10 => Some(*d),
        [10] => Some(10),
        [10, d] if *d > 0 && *d < 10 => Some(10 + d),
        [t, 10] if *t > 1 && *t < 10 => Some(t * 10),
        [t, 10, d] if *t > 1 && *t < 10 && *d > 0 && *d < 10 => Some(t * 10 + d),
        _ => None,
    }
}

/// 1 到 99 的中文数词
pub fn to_chinese_numeral(n: u32) -> Option<String> {
    const DIGITS: [&str; 10] = ["", "一", "二", "三", "四", "五", "六", "七", "八", "九"];
    let (tens, ones) = (n / 10, n % 10);
    match (tens, ones) {
        (0, 0) => None,
        (0, d) => Some(DIGITS[d as usize].to_string()),
        (1, d) => Some(format!("十{}", DIGITS[d as usize])),
        (t, d) if t < 10 => Some(format!("{}十{}", DIGITS[t as usize], DIGITS[d as usize])),
        _ => None,
    }
}

fn digit_value(ch: char) -> Option<u32> {
    Some(match ch {
        '一' => 1,
        '二' => 2,
        '三' => 3,
        '四' => 4,
        '五' => 5,
        '六' => 6,
        '七' => 7,
        '八' => 8,
        '九' => 9,
        '十' => 10,
        _ => return None,
    })
}

/// 把一段无空白的中文字符串完整切分为词形序列（最长匹配优先）
///
/// 返回每段的词法类别与字节长度；只要有一段无法识别就返回 `None`，
/// 该段落整体作为标识符处理。
pub fn segment(run: &str) -> Option<SmallVec<[(TokenKind, usize); 4]>> {
    if run.is_ascii() {
        return None;
    }

    let mut pieces = SmallVec::new();
    let mut rest = run;
    while !rest.is_empty() {
        let (kind, len) = longest_prefix(rest)?;
        pieces.push((kind, len));
        rest = &rest[len..];
    }
    Some(pieces)
}

fn longest_prefix(text: &str) -> Option<(TokenKind, usize)> {
    let boundaries: SmallVec<[usize; 8]> = text
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .take(*MAX_WORD_CHARS)
        .collect();

    for &end in boundaries.iter().rev() {
        let prefix = &text[..end];
        if let Some(word) = CHINESE_TABLE.get(prefix) {
            return Some((word.to_token_kind(), end));
        }
        if let Some(n) = parse_ordinal(prefix) {
            return Some((TokenKind::Classical(ClassicalMarker::Ordinal(n)), end));
        }
    }
    None
}
