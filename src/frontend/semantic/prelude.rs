//! 预置环境：内置函数与内置类型名

use once_cell::sync::Lazy;

use super::scope::{Binding, BindingKind, ScopeId, ScopeTree, TypeInfo};
use super::types::Ty;
use crate::util::span::Span;

/// 内置函数
#[derive(Debug, Clone)]
pub struct Builtin {
    pub names: &'static [&'static str],
    pub arity: usize,
    pub returns: Ty,
}

pub static BUILTINS: Lazy<Vec<Builtin>> = Lazy::new(|| {
    let builtin = |names: &'static [&'static str], arity, returns| Builtin {
        names,
        arity,
        returns,
    };
    vec![
        builtin(&["打印", "print"], 1, Ty::Unit),
        builtin(&["打印行", "print_endline"], 1, Ty::Unit),
        builtin(&["打印整数", "print_int"], 1, Ty::Unit),
        builtin(&["打印浮点", "print_float"], 1, Ty::Unit),
        builtin(&["读取", "读取行", "read_line"], 0, Ty::String),
        builtin(&["读取整数", "read_int"], 0, Ty::Int),
        builtin(&["读取浮点", "read_float"], 0, Ty::Float),
        builtin(&["长度", "length"], 1, Ty::Int),
        builtin(&["连接", "concat"], 2, Ty::String),
        builtin(&["子串", "sub"], 3, Ty::String),
        builtin(&["转为字符串", "to_string"], 1, Ty::String),
        builtin(&["列表头", "head"], 1, Ty::Unknown),
        builtin(&["列表尾", "tail"], 1, Ty::List(Box::new(Ty::Unknown))),
        builtin(&["映射", "map"], 2, Ty::List(Box::new(Ty::Unknown))),
        builtin(&["迭代", "iter"], 2, Ty::Unit),
        builtin(&["左折叠", "fold_left"], 3, Ty::Unknown),
        builtin(&["右折叠", "fold_right"], 3, Ty::Unknown),
    ]
});

/// 内置类型名；`列表` 是接受一个参数的类型构造器
pub const BUILTIN_TYPES: &[&str] = &[
    "整数", "浮点", "字符串", "布尔", "单元", "列表", "int", "float", "string", "bool", "unit",
    "list",
];

/// Fill `scope` with the built-in functions and type names
pub fn install(
    tree: &mut ScopeTree,
    scope: ScopeId,
) {
    for builtin in BUILTINS.iter() {
        for name in builtin.names {
            let binding = Binding::new(
                BindingKind::Builtin {
                    arity: builtin.arity,
                },
                Span::dummy(),
                builtin.returns.clone(),
            );
            tree.define_value(scope, name, binding);
        }
    }
    for name in BUILTIN_TYPES {
        tree.define_type(
            scope,
            name,
            TypeInfo {
                defined_at: Span::dummy(),
                builtin: true,
                alias: None,
            },
        );
    }
    tracing::trace!(
        functions = BUILTINS.len(),
        types = BUILTIN_TYPES.len(),
        "prelude installed"
    );
}
