//! 基础类型
//!
//! 语义分析只做字面量层面的类型一致性检查，不做完整的类型推断：
//! 无法确定的类型记为 [`Ty::Unknown`]，与任何类型都相容。

use std::fmt;

use crate::frontend::parser::ast::Literal;

/// 已知程度不同的类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ty {
    Int,
    Float,
    String,
    Bool,
    Unit,
    List(Box<Ty>),
    Tuple(Vec<Ty>),
    /// 用户定义的变体或记录类型；别名在降级时展开
    Named(String),
    Unknown,
}

impl Ty {
    pub fn of_literal(literal: &Literal) -> Ty {
        match literal {
            Literal::Int(_) => Ty::Int,
            Literal::Float(_) => Ty::Float,
            Literal::String(_) => Ty::String,
            Literal::Bool(_) => Ty::Bool,
            Literal::Unit => Ty::Unit,
        }
    }

    /// 内置类型名，中英文两套写法
    pub fn builtin(name: &str) -> Option<Ty> {
        Some(match name {
            "整数" | "int" => Ty::Int,
            "浮点" | "float" => Ty::Float,
            "字符串" | "string" => Ty::String,
            "布尔" | "bool" => Ty::Bool,
            "单元" | "unit" => Ty::Unit,
            _ => return None,
        })
    }

    pub fn is_list_constructor(name: &str) -> bool {
        matches!(name, "列表" | "list")
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Ty::Unknown)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Ty::Int | Ty::Float)
    }

    /// 两个类型是否可能相同；未知部分视为相容
    pub fn compatible(
        &self,
        other: &Ty,
    ) -> bool {
        match (self, other) {
            (Ty::Unknown, _) | (_, Ty::Unknown) => true,
            (Ty::List(a), Ty::List(b)) => a.compatible(b),
            (Ty::Tuple(a), Ty::Tuple(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.compatible(y))
            }
            (a, b) => a == b,
        }
    }

    /// 合并两个相容的类型，保留更具体的一方
    pub fn join(
        &self,
        other: &Ty,
    ) -> Ty {
        match (self, other) {
            (Ty::Unknown, ty) | (ty, Ty::Unknown) => ty.clone(),
            (Ty::List(a), Ty::List(b)) => Ty::List(Box::new(a.join(b))),
            (Ty::Tuple(a), Ty::Tuple(b)) if a.len() == b.len() => {
                Ty::Tuple(a.iter().zip(b).map(|(x, y)| x.join(y)).collect())
            }
            (ty, _) => ty.clone(),
        }
    }
}

impl fmt::Display for Ty {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Ty::Int => write!(f, "整数"),
            Ty::Float => write!(f, "浮点"),
            Ty::String => write!(f, "字符串"),
            Ty::Bool => write!(f, "布尔"),
            Ty::Unit => write!(f, "单元"),
            Ty::List(elem) => write!(f, "{} 列表", elem),
            Ty::Tuple(items) => {
                let parts: Vec<String> = items.iter().map(Ty::to_string).collect();
                write!(f, "({})", parts.join(" * "))
            }
            Ty::Named(name) => write!(f, "{}", name),
            Ty::Unknown => write!(f, "?"),
        }
    }
}
