//! 作用域树
//!
//! 作用域存放在一个数组里，以 [`ScopeId`] 相互引用。值与类型分属两个命名空间，
//! 各自按定义顺序保存（`IndexMap`），这样诊断与候选名字的顺序是确定的。

use std::fmt;

use indexmap::IndexMap;

use super::types::Ty;
use crate::util::span::Span;

/// 作用域在树中的下标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u32);

impl ScopeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ScopeId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "scope{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Prelude,
    Module,
    Function,
    Lambda,
    LetIn,
    Branch,
}

/// 名字绑定到了什么
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingKind {
    Builtin { arity: usize },
    Value,
    Function { arity: usize },
    Parameter,
    PatternVar,
    Constructor { arity: usize, type_name: String },
    Module { scope: ScopeId },
}

impl BindingKind {
    /// Arity of things that can be called with a fixed argument count
    pub fn arity(&self) -> Option<usize> {
        match self {
            BindingKind::Builtin { arity }
            | BindingKind::Function { arity }
            | BindingKind::Constructor { arity, .. } => Some(*arity),
            _ => None,
        }
    }

    pub fn is_constructor(&self) -> bool {
        matches!(self, BindingKind::Constructor { .. })
    }
}

#[derive(Debug, Clone)]
pub struct Binding {
    pub kind: BindingKind,
    /// 定义位置；内置名字为哑位置
    pub defined_at: Span,
    /// 已知的值类型；函数记录其返回类型
    pub ty: Ty,
    pub used: bool,
    /// 离开作用域时若未使用则报告
    pub warn_unused: bool,
}

impl Binding {
    pub fn new(
        kind: BindingKind,
        defined_at: Span,
        ty: Ty,
    ) -> Self {
        Self {
            kind,
            defined_at,
            ty,
            used: false,
            warn_unused: false,
        }
    }

    pub fn warn_if_unused(mut self) -> Self {
        self.warn_unused = true;
        self
    }
}

/// 类型命名空间中的条目
#[derive(Debug, Clone)]
pub struct TypeInfo {
    pub defined_at: Span,
    pub builtin: bool,
    /// 别名展开后的类型；变体与记录类型为 `None`
    pub alias: Option<Ty>,
}

#[derive(Debug, Clone)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    pub kind: ScopeKind,
    values: IndexMap<String, Binding>,
    types: IndexMap<String, TypeInfo>,
}

impl Scope {
    pub fn values(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.values.iter().map(|(name, binding)| (name.as_str(), binding))
    }

    pub fn value(
        &self,
        name: &str,
    ) -> Option<&Binding> {
        self.values.get(name)
    }

    pub fn types(&self) -> impl Iterator<Item = (&str, &TypeInfo)> {
        self.types.iter().map(|(name, info)| (name.as_str(), info))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
}

impl ScopeTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新建作用域；`parent` 为 `None` 时是根
    pub fn push(
        &mut self,
        parent: Option<ScopeId>,
        kind: ScopeKind,
    ) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            parent,
            kind,
            values: IndexMap::new(),
            types: IndexMap::new(),
        });
        id
    }

    pub fn get(
        &self,
        id: ScopeId,
    ) -> &Scope {
        &self.scopes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScopeId, &Scope)> {
        self.scopes
            .iter()
            .enumerate()
            .map(|(i, scope)| (ScopeId(i as u32), scope))
    }

    /// Define a value, returning the binding it replaced in the same scope
    pub fn define_value(
        &mut self,
        scope: ScopeId,
        name: &str,
        binding: Binding,
    ) -> Option<Binding> {
        self.scopes[scope.index()]
            .values
            .insert(name.to_string(), binding)
    }

    pub fn define_type(
        &mut self,
        scope: ScopeId,
        name: &str,
        info: TypeInfo,
    ) -> Option<TypeInfo> {
        self.scopes[scope.index()]
            .types
            .insert(name.to_string(), info)
    }

    /// 由内向外查找值，返回所在作用域
    pub fn resolve_value(
        &self,
        from: ScopeId,
        name: &str,
    ) -> Option<(ScopeId, &Binding)> {
        self.ancestors(from)
            .find_map(|id| self.get(id).values.get(name).map(|binding| (id, binding)))
    }

    pub fn resolve_type(
        &self,
        from: ScopeId,
        name: &str,
    ) -> Option<(ScopeId, &TypeInfo)> {
        self.ancestors(from)
            .find_map(|id| self.get(id).types.get(name).map(|info| (id, info)))
    }

    pub fn mark_used(
        &mut self,
        scope: ScopeId,
        name: &str,
    ) {
        if let Some(binding) = self.scopes[scope.index()].values.get_mut(name) {
            binding.used = true;
        }
    }

    /// `from` 及其所有祖先，由内向外
    pub fn ancestors(
        &self,
        from: ScopeId,
    ) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(Some(from), move |id| self.get(*id).parent)
    }

    /// 从 `from` 可见的全部值名字，内层优先，不重复
    pub fn visible_values(
        &self,
        from: ScopeId,
    ) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for id in self.ancestors(from) {
            for name in self.get(id).values.keys() {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }

    pub fn visible_types(
        &self,
        from: ScopeId,
    ) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for id in self.ancestors(from) {
            for name in self.get(id).types.keys() {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }
}
