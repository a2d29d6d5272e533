//! Abstract Syntax Tree types
//!
//! Every wrapper node (`Expr`, `Stmt`, `Pattern`, `TypeExpr`, …) carries a
//! [`NodeId`] unique within one parse and the [`Span`] it covers. Equality is
//! structural: ids and spans are ignored, so `[1, 2]` and `列开始 1 其一 2 其二
//! 列结束` compare equal.

use std::fmt;

use serde::Serialize;

use crate::util::span::Span;

/// Identity of an AST node, allocated by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Compilation unit
#[derive(Debug, Clone, Serialize)]
pub struct Module {
    pub id: NodeId,
    pub items: Vec<Stmt>,
    pub span: Span,
}

/// Statement
#[derive(Debug, Clone, Serialize)]
pub struct Stmt {
    pub id: NodeId,
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StmtKind {
    /// `让 x = e`, `设 x 为 e`
    Let(LetBinding),
    /// `让 f x = e`, `夫 … 也`, `定义 … 接受 …：e`
    Function(FunctionDef),
    TypeDef(TypeDef),
    Module(ModuleDef),
    Expr(Expr),
}

/// Name occurrence with its own id and span
#[derive(Debug, Clone, Serialize)]
pub struct Ident {
    pub id: NodeId,
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LetBinding {
    pub name: Ident,
    pub ty: Option<TypeExpr>,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDef {
    pub name: Ident,
    pub params: Vec<Param>,
    pub return_type: Option<TypeExpr>,
    pub body: Expr,
    /// The function may refer to itself
    pub recursive: bool,
}

impl FunctionDef {
    /// Number of arguments a call must supply
    ///
    /// A parameterless definition whose body is a lambda takes the lambda's
    /// parameters.
    pub fn arity(&self) -> usize {
        match (&self.params[..], &self.body.kind) {
            ([], ExprKind::Lambda { params, .. }) => params.len(),
            (params, _) => params.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    pub name: Ident,
    pub ty: Option<TypeExpr>,
}

/// Local definition introduced by `让 … 在 e`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Definition {
    Let(LetBinding),
    Function(FunctionDef),
}

impl Definition {
    pub fn name(&self) -> &Ident {
        match self {
            Definition::Let(binding) => &binding.name,
            Definition::Function(def) => &def.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeDef {
    pub name: Ident,
    pub body: TypeDefBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypeDefBody {
    /// `类型 甲 = 整数 列表`
    Alias(TypeExpr),
    /// `类型 选项 = 无 | 有 之 整数`
    Variants(Vec<Variant>),
    /// `类型 人 = { 名 : 字符串; 龄 : 整数 }`
    Record(Vec<FieldDecl>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variant {
    pub name: Ident,
    pub payload: Option<TypeExpr>,
}

impl Variant {
    /// Constructor arity: a tuple payload counts each component
    pub fn arity(&self) -> usize {
        match &self.payload {
            None => 0,
            Some(TypeExpr {
                kind: TypeExprKind::Tuple(items),
                ..
            }) => items.len(),
            Some(_) => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDecl {
    pub name: Ident,
    pub ty: TypeExpr,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleDef {
    pub name: Ident,
    pub items: Vec<Stmt>,
}

/// Expression
#[derive(Debug, Clone, Serialize)]
pub struct Expr {
    pub id: NodeId,
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExprKind {
    Literal(Literal),
    Identifier(String),
    BinaryOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    UnaryOp {
        op: UnOp,
        operand: Box<Expr>,
    },
    /// `f x y` and `f(x, y)`; consecutive arguments are merged
    FunctionCall {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Lambda {
        params: Vec<Param>,
        body: Box<Expr>,
    },
    Conditional {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Option<Box<Expr>>,
    },
    Match {
        scrutinee: Box<Expr>,
        branches: Vec<MatchBranch>,
    },
    /// Every list surface form, modern or classical
    List(Vec<Expr>),
    Tuple(Vec<Expr>),
    Record(Vec<FieldInit>),
    FieldAccess {
        target: Box<Expr>,
        field: Ident,
    },
    LetIn {
        binding: Box<Definition>,
        body: Box<Expr>,
    },
    TypeAnnotation {
        expr: Box<Expr>,
        ty: TypeExpr,
    },
    /// `x <- e`
    Assign {
        target: Box<Expr>,
        value: Box<Expr>,
    },
}

impl Expr {
    pub fn as_identifier(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Identifier(name) => Some(name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldInit {
    pub name: Ident,
    pub value: Expr,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchBranch {
    pub id: NodeId,
    pub pattern: Pattern,
    pub body: Expr,
    pub span: Span,
}

/// Literal value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Literal {
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
    Unit,
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    Cons,
}

impl BinOp {
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod
        )
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinOp::Eq | BinOp::NotEq | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge
        )
    }

    pub fn is_logical(self) -> bool {
        matches!(self, BinOp::And | BinOp::Or)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Eq => "==",
            BinOp::NotEq => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
            BinOp::Cons => "::",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnOp {
    Neg,
    Plus,
    Not,
}

/// Pattern
#[derive(Debug, Clone, Serialize)]
pub struct Pattern {
    pub id: NodeId,
    pub kind: PatternKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PatternKind {
    Wildcard,
    Literal(Literal),
    Binding(String),
    /// `h :: t`, `[h, ...t]`, `有首有尾 首名为 h 尾名为 t`
    HeadTail {
        head: Box<Pattern>,
        tail: Box<Pattern>,
    },
    List(Vec<Pattern>),
    Tuple(Vec<Pattern>),
    Constructor {
        name: Ident,
        args: Vec<Pattern>,
    },
    /// `p 当 cond`
    Guard {
        pattern: Box<Pattern>,
        condition: Box<Expr>,
    },
}

/// Type expression
#[derive(Debug, Clone, Serialize)]
pub struct TypeExpr {
    pub id: NodeId,
    pub kind: TypeExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypeExprKind {
    Named(String),
    /// `整数 列表`, `(甲, 乙) 映射`
    App {
        base: Ident,
        args: Vec<TypeExpr>,
    },
    Function {
        param: Box<TypeExpr>,
        ret: Box<TypeExpr>,
    },
    Tuple(Vec<TypeExpr>),
}

/// `PartialEq` over the listed fields only; ids and spans never take part
macro_rules! structural_eq {
    ($($ty:ident => $($field:ident),+;)+) => {
        $(
            impl PartialEq for $ty {
                fn eq(
                    &self,
                    other: &Self,
                ) -> bool {
                    $(self.$field == other.$field)&&+
                }
            }
        )+
    };
}

structural_eq! {
    Module => items;
    Stmt => kind;
    Ident => name;
    Expr => kind;
    MatchBranch => pattern, body;
    Pattern => kind;
    TypeExpr => kind;
}
