//! 拼写建议
//!
//! 为未绑定的名字在可见名字中寻找最相近的候选。

use std::cmp::Ordering;

/// 相似度阈值
const SIMILARITY_THRESHOLD: f64 = 0.5;

/// 最多返回的候选数
const MAX_SUGGESTIONS: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct SuggestionEngine {
    defined_names: Vec<String>,
}

impl SuggestionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut engine = Self::new();
        for name in names {
            engine.add_defined_name(name);
        }
        engine
    }

    pub fn add_defined_name(
        &mut self,
        name: &str,
    ) {
        if !self.defined_names.iter().any(|n| n == name) {
            self.defined_names.push(name.to_string());
        }
    }

    /// 查找相似的名字，按相似度降序
    pub fn find_similar(
        &self,
        name: &str,
    ) -> Vec<(String, f64)> {
        let mut suggestions: Vec<(String, f64)> = self
            .defined_names
            .iter()
            .filter(|def_name| def_name.as_str() != name)
            .map(|def_name| (def_name.clone(), similarity(name, def_name)))
            .filter(|(_, score)| *score >= SIMILARITY_THRESHOLD)
            .collect();

        suggestions.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        suggestions.truncate(MAX_SUGGESTIONS);
        suggestions
    }

    /// 最相近的名字
    pub fn best_match(
        &self,
        name: &str,
    ) -> Option<String> {
        self.find_similar(name).into_iter().next().map(|(n, _)| n)
    }

    pub fn len(&self) -> usize {
        self.defined_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defined_names.is_empty()
    }
}

/// 基于字符编辑距离的相似度，范围 [0, 1]
pub fn similarity(
    a: &str,
    b: &str,
) -> f64 {
    if a == b {
        return 1.0;
    }
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein_distance(a, b) as f64 / max_len as f64
}

/// Levenshtein 编辑距离（按 Unicode 标量值计）
pub fn levenshtein_distance(
    a: &str,
    b: &str,
) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut prev_row: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr_row: Vec<usize> = Vec::with_capacity(b_chars.len() + 1);

    for (i, ca) in a_chars.iter().enumerate() {
        curr_row.clear();
        curr_row.push(i + 1);
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            let value = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
            curr_row.push(value);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_chars.len()]
}
