//! 属性测试 - 列表方言等价、运算符写法等价、解析不崩溃

use proptest::prelude::*;

use super::build::*;
use super::*;
use crate::frontend::lexer::keywords::to_chinese_numeral;

fn element() -> impl Strategy<Value = (String, Expr)> {
    prop_oneof![
        (0i64..1000).prop_map(|n| (n.to_string(), int(n))),
        prop::sample::select(vec!["甲", "乙", "丙", "x", "y"])
            .prop_map(|name| (name.to_string(), var(name))),
    ]
}

fn ordinal(index: usize) -> String {
    let numeral = u32::try_from(index + 1)
        .ok()
        .and_then(to_chinese_numeral)
        .unwrap_or_default();
    format!("其{}", numeral)
}

/// Every surface spelling of one list
fn spellings(items: &[String]) -> Vec<String> {
    let classical: String = items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{} {} ", item, ordinal(i)))
        .collect();
    let enumeration: String = items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{} {} ", ordinal(i), item))
        .collect();
    let mut forms = vec![
        format!("[{}]", items.join(", ")),
        format!("【{}】", items.join("、")),
        format!("[{}]", items.join("; ")),
        format!("列开始 {}列结束", classical),
    ];
    if !items.is_empty() {
        forms.push(format!("【{}】", enumeration.trim_end()));
    }
    forms
}

#[derive(Debug, Clone)]
struct Arith {
    symbols: String,
    words: String,
    tree: Expr,
}

fn arith() -> impl Strategy<Value = Arith> {
    let leaf = (0i64..100).prop_map(|n| Arith {
        symbols: n.to_string(),
        words: n.to_string(),
        tree: int(n),
    });
    leaf.prop_recursive(4, 24, 2, |inner| {
        (
            inner.clone(),
            prop::sample::select(vec![
                (BinOp::Add, "+", "加"),
                (BinOp::Sub, "-", "减"),
                (BinOp::Mul, "*", "乘"),
            ]),
            inner,
        )
            .prop_map(|(left, (op, symbol, word), right)| Arith {
                symbols: format!("({} {} {})", left.symbols, symbol, right.symbols),
                words: format!("({} {} {})", left.words, word, right.words),
                tree: bin(op, left.tree, right.tree),
            })
    })
}

fn token_soup() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec![
            "让", "设", "为", "=", "在", "如果", "那么", "否则", "匹配", "与", "|", "->", "观",
            "之性", "若", "则", "观毕", "[", "]", "【", "】", "（", "）", "(", ")", "其一", "列开始",
            "列结束", "、", ",", ";", "甲", "乙", "1", "2", "+", "::", "\n", "夫", "者", "受",
            "焉", "算法", "乃", "也", "模块", "结构", "结束",
        ]),
        0..30,
    )
    .prop_map(|parts| parts.join(" "))
}

proptest! {
    #[test]
    fn prop_list_spellings_agree(elements in prop::collection::vec(element(), 0..8)) {
        let (texts, trees): (Vec<String>, Vec<Expr>) = elements.into_iter().unzip();
        let expected = list(trees);
        for source in spellings(&texts) {
            prop_assert_eq!(expr(&source), expected.clone(), "source: {}", source);
        }
    }

    #[test]
    fn prop_word_operators_agree(input in arith()) {
        prop_assert_eq!(expr(&input.symbols), input.tree.clone());
        prop_assert_eq!(expr(&input.words), input.tree);
    }

    #[test]
    fn prop_parser_never_panics(source in token_soup()) {
        let output = parse(&tokenize(&source).tokens);
        if output.errors.is_empty() && output.module.is_none() {
            prop_assert!(source.trim().is_empty());
        }
        for error in &output.errors {
            prop_assert!(error.span().start.offset <= source.len());
        }
    }
}
