//! Unicode 字符分类
//!
//! 在 UTF-8 字节缓冲区的任意偏移处解码一个字符并给出其类别。纯函数，无副作用。

use thiserror::Error;

/// 字符类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharCategory {
    /// `a-z`、`A-Z`、`_`
    AsciiLetter,
    /// `0-9`
    Digit,
    /// CJK 统一表意文字（含扩展 A 区）
    Ideograph,
    /// 其他可作标识符的字母（XID）
    OtherLetter,
    /// 空白与换行，含全角空格 U+3000
    Whitespace,
    /// ASCII 运算符与分隔符
    AsciiPunct,
    /// 全角标点与箭头
    FullWidthPunct,
    /// `「」『』"`
    QuoteDelimiter,
    /// 语言字母表之外的字符
    Other,
}

impl CharCategory {
    /// 可作为标识符首字符
    pub fn is_identifier_start(self) -> bool {
        matches!(
            self,
            CharCategory::AsciiLetter | CharCategory::Ideograph | CharCategory::OtherLetter
        )
    }

    /// 可作为标识符后续字符
    pub fn is_identifier_continue(self) -> bool {
        self.is_identifier_start() || self == CharCategory::Digit
    }
}

/// 一次分类的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified {
    pub ch: char,
    pub category: CharCategory,
    /// 消耗的字节数（1..=4）
    pub len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid UTF-8 byte sequence at offset {offset}")]
pub struct InvalidByteSequence {
    pub offset: usize,
}

/// 语言使用的 ASCII 标点
const ASCII_PUNCT: &str = "+-*/%=<>!&|()[]{},;:.";

/// 语言使用的全角标点
const FULL_WIDTH_PUNCT: &str = "（）【】，、；：。｜→⇒←";

/// 引号类定界符
const QUOTE_DELIMITERS: &str = "「」『』\"";

/// 解码 `offset` 处的字符并分类
///
/// `offset` 越界时返回 `InvalidByteSequence`。
pub fn classify(
    bytes: &[u8],
    offset: usize,
) -> Result<Classified, InvalidByteSequence> {
    let invalid = InvalidByteSequence { offset };
    let lead = *bytes.get(offset).ok_or(invalid)?;
    let len = match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => return Err(invalid),
    };
    let slice = bytes.get(offset..offset + len).ok_or(invalid)?;
    let ch = std::str::from_utf8(slice)
        .ok()
        .and_then(|s| s.chars().next())
        .ok_or(invalid)?;

    Ok(Classified {
        ch,
        category: category_of(ch),
        len,
    })
}

/// 单个字符的类别
pub fn category_of(ch: char) -> CharCategory {
    match ch {
        'a'..='z' | 'A'..='Z' | '_' => CharCategory::AsciiLetter,
        '0'..='9' => CharCategory::Digit,
        ' ' | '\t' | '\r' | '\n' | '\u{3000}' => CharCategory::Whitespace,
        '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' => CharCategory::Ideograph,
        c if ASCII_PUNCT.contains(c) => CharCategory::AsciiPunct,
        c if FULL_WIDTH_PUNCT.contains(c) => CharCategory::FullWidthPunct,
        c if QUOTE_DELIMITERS.contains(c) => CharCategory::QuoteDelimiter,
        c if !c.is_ascii() && unicode_ident::is_xid_start(c) => CharCategory::OtherLetter,
        _ => CharCategory::Other,
    }
}
