//! Scope building and checking walk over the AST

use hashbrown::HashMap;

use super::prelude;
use super::scope::{Binding, BindingKind, ScopeId, ScopeKind, ScopeTree, TypeInfo};
use super::types::Ty;
use super::{AnalyzerOptions, Annotations, Resolution, SemanticError};
use crate::frontend::parser::ast::*;
use crate::util::diagnostic::SuggestionEngine;
use crate::util::span::Span;

pub(super) struct Analyzer {
    options: AnalyzerOptions,
    scopes: ScopeTree,
    annotations: Annotations,
    errors: Vec<SemanticError>,
    current: ScopeId,
}

impl Analyzer {
    pub(super) fn new(options: AnalyzerOptions) -> Self {
        let mut scopes = ScopeTree::new();
        let prelude_scope = scopes.push(None, ScopeKind::Prelude);
        if options.prelude {
            prelude::install(&mut scopes, prelude_scope);
        }

        Self {
            options,
            scopes,
            annotations: Annotations::default(),
            errors: Vec::new(),
            current: prelude_scope,
        }
    }

    /// Analyze the top level of `module`, returning its scope
    pub(super) fn enter_module(
        &mut self,
        module: &Module,
    ) -> ScopeId {
        let root = self.push_scope(ScopeKind::Module);
        self.check_items(&module.items);
        self.pop_scope();
        root
    }

    pub(super) fn finish(self) -> (ScopeTree, Annotations, Vec<SemanticError>) {
        (self.scopes, self.annotations, self.errors)
    }

    // ------------------------------------------------------------------
    // Scopes and bindings
    // ------------------------------------------------------------------

    fn push_scope(
        &mut self,
        kind: ScopeKind,
    ) -> ScopeId {
        let scope = self.scopes.push(Some(self.current), kind);
        tracing::trace!(%scope, ?kind, "scope entered");
        self.current = scope;
        scope
    }

    /// Leave the current scope, reporting bindings that were never read
    fn pop_scope(&mut self) {
        let scope = self.scopes.get(self.current);
        if self.options.warn_unused {
            let unused: Vec<SemanticError> = scope
                .values()
                .filter(|(name, b)| b.warn_unused && !b.used && !name.starts_with('_'))
                .map(|(name, b)| SemanticError::UnusedBinding {
                    name: name.to_string(),
                    span: b.defined_at,
                })
                .collect();
            self.errors.extend(unused);
        }
        if let Some(parent) = scope.parent {
            self.current = parent;
        }
    }

    fn report(
        &mut self,
        error: SemanticError,
    ) {
        tracing::trace!(code = error.code(), %error, "semantic error");
        self.errors.push(error);
    }

    fn mismatch(
        &mut self,
        expected: Ty,
        found: Ty,
        span: Span,
    ) {
        self.report(SemanticError::TypeMismatch {
            expected,
            found,
            span,
        });
    }

    /// Report unless `found` could be `expected`
    fn expect_ty(
        &mut self,
        expected: &Ty,
        found: &Ty,
        span: Span,
    ) -> bool {
        if expected.compatible(found) {
            true
        } else {
            self.mismatch(expected.clone(), found.clone(), span);
            false
        }
    }

    fn define(
        &mut self,
        name: &Ident,
        binding: Binding,
    ) {
        tracing::trace!(name = %name.name, kind = ?binding.kind, scope = %self.current, "defined");
        self.scopes.define_value(self.current, &name.name, binding);
    }

    /// Resolve a value name, recording the resolution under `id`
    fn lookup(
        &mut self,
        name: &str,
        id: NodeId,
        span: Span,
    ) -> Option<(BindingKind, Ty)> {
        let Some((scope, binding)) = self.scopes.resolve_value(self.current, name) else {
            let suggestion = SuggestionEngine::from_names(self.scopes.visible_values(self.current))
                .best_match(name);
            self.report(SemanticError::UnboundVariable {
                name: name.to_string(),
                suggestion,
                span,
            });
            return None;
        };

        let found = (binding.kind.clone(), binding.ty.clone());
        self.annotations.resolutions.insert(
            id,
            Resolution {
                scope,
                kind: binding.kind.clone(),
                defined_at: binding.defined_at,
            },
        );
        self.scopes.mark_used(scope, name);
        Some(found)
    }

    /// Type a name has when used as a value
    fn value_ty(
        kind: &BindingKind,
        ty: Ty,
    ) -> Ty {
        match kind {
            BindingKind::Value | BindingKind::Parameter | BindingKind::PatternVar => ty,
            BindingKind::Constructor {
                arity: 0,
                type_name,
            } => Ty::Named(type_name.clone()),
            _ => Ty::Unknown,
        }
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    fn check_items(
        &mut self,
        items: &[Stmt],
    ) {
        for stmt in items {
            self.check_stmt(stmt);
        }
    }

    fn check_stmt(
        &mut self,
        stmt: &Stmt,
    ) {
        match &stmt.kind {
            StmtKind::Let(binding) => self.define_let(binding, false),
            StmtKind::Function(def) => self.define_function(def, false),
            StmtKind::TypeDef(def) => self.define_type(def),
            StmtKind::Module(def) => self.define_module(def),
            StmtKind::Expr(expr) => {
                self.check_expr(expr);
            }
        }
    }

    fn define_let(
        &mut self,
        binding: &LetBinding,
        local: bool,
    ) {
        let value_ty = self.check_expr(&binding.value);
        let ty = match &binding.ty {
            Some(annotation) => {
                let declared = self.check_type(annotation);
                self.expect_ty(&declared, &value_ty, binding.value.span);
                declared.join(&value_ty)
            }
            None => value_ty,
        };

        let kind = match &binding.value.kind {
            ExprKind::Lambda { params, .. } => BindingKind::Function {
                arity: params.len(),
            },
            _ => BindingKind::Value,
        };
        let mut new = Binding::new(kind, binding.name.span, ty);
        if local {
            new = new.warn_if_unused();
        }
        self.define(&binding.name, new);
    }

    fn define_function(
        &mut self,
        def: &FunctionDef,
        local: bool,
    ) {
        let returns = match &def.return_type {
            Some(ty) => self.check_type(ty),
            None => Ty::Unknown,
        };
        let kind = BindingKind::Function { arity: def.arity() };

        if def.recursive {
            let binding = Binding::new(kind.clone(), def.name.span, returns.clone());
            self.define(&def.name, binding);
        }

        self.push_scope(ScopeKind::Function);
        self.bind_params(&def.params);
        let body_ty = self.check_expr(&def.body);
        self.pop_scope();
        self.expect_ty(&returns, &body_ty, def.body.span);

        // Redefining resets the use flag: self-calls do not count as uses
        let mut binding = Binding::new(kind, def.name.span, returns.join(&body_ty));
        if local {
            binding = binding.warn_if_unused();
        }
        self.define(&def.name, binding);
    }

    fn bind_params(
        &mut self,
        params: &[Param],
    ) {
        let mut seen: HashMap<&str, Span> = HashMap::new();
        for param in params {
            let ty = match &param.ty {
                Some(ty) => self.check_type(ty),
                None => Ty::Unknown,
            };
            let name = &param.name;
            if name.name == "_" {
                continue;
            }
            if let Some(first) = seen.insert(&name.name, name.span) {
                self.report(SemanticError::DuplicateBinding {
                    name: name.name.clone(),
                    first,
                    span: name.span,
                });
                continue;
            }
            self.define(name, Binding::new(BindingKind::Parameter, name.span, ty));
        }
    }

    fn define_type(
        &mut self,
        def: &TypeDef,
    ) {
        // Defined first so the body may refer to the type itself
        let info = TypeInfo {
            defined_at: def.name.span,
            builtin: false,
            alias: None,
        };
        self.scopes.define_type(self.current, &def.name.name, info.clone());

        match &def.body {
            TypeDefBody::Alias(ty) => {
                let target = self.check_type(ty);
                let alias = TypeInfo {
                    alias: Some(target),
                    ..info
                };
                self.scopes.define_type(self.current, &def.name.name, alias);
            }
            TypeDefBody::Variants(variants) => {
                let mut seen: HashMap<&str, Span> = HashMap::new();
                for variant in variants {
                    if let Some(ty) = &variant.payload {
                        self.check_type(ty);
                    }
                    if let Some(first) = seen.insert(&variant.name.name, variant.name.span) {
                        self.report(SemanticError::DuplicateBinding {
                            name: variant.name.name.clone(),
                            first,
                            span: variant.name.span,
                        });
                        continue;
                    }
                    let kind = BindingKind::Constructor {
                        arity: variant.arity(),
                        type_name: def.name.name.clone(),
                    };
                    let binding = Binding::new(
                        kind,
                        variant.name.span,
                        Ty::Named(def.name.name.clone()),
                    );
                    self.define(&variant.name, binding);
                }
            }
            TypeDefBody::Record(fields) => {
                let mut seen: HashMap<&str, Span> = HashMap::new();
                for field in fields {
                    self.check_type(&field.ty);
                    if let Some(first) = seen.insert(&field.name.name, field.name.span) {
                        self.report(SemanticError::DuplicateBinding {
                            name: field.name.name.clone(),
                            first,
                            span: field.name.span,
                        });
                    }
                }
            }
        }
    }

    fn define_module(
        &mut self,
        def: &ModuleDef,
    ) {
        let scope = self.push_scope(ScopeKind::Module);
        self.check_items(&def.items);
        self.pop_scope();
        let binding = Binding::new(BindingKind::Module { scope }, def.name.span, Ty::Unknown);
        self.define(&def.name, binding);
    }

    // ------------------------------------------------------------------
    // Types
    // ------------------------------------------------------------------

    /// Check that every name in `ty` is a known type and lower it
    ///
    /// Aliases are expanded; names that do not resolve lower to
    /// `Ty::Unknown` so one bad annotation yields one diagnostic.
    fn check_type(
        &mut self,
        ty: &TypeExpr,
    ) -> Ty {
        match &ty.kind {
            TypeExprKind::Named(name) => self.require_type(name, ty.span).unwrap_or(Ty::Unknown),
            TypeExprKind::App { base, args } => {
                let base_ty = self.require_type(&base.name, base.span);
                let args: Vec<Ty> = args.iter().map(|arg| self.check_type(arg)).collect();
                match (base_ty, args.as_slice()) {
                    (Some(_), [elem]) if Ty::is_list_constructor(&base.name) => {
                        Ty::List(Box::new(elem.clone()))
                    }
                    (Some(named @ Ty::Named(_)), _) => named,
                    _ => Ty::Unknown,
                }
            }
            TypeExprKind::Function { param, ret } => {
                self.check_type(param);
                self.check_type(ret);
                Ty::Unknown
            }
            TypeExprKind::Tuple(items) => {
                Ty::Tuple(items.iter().map(|item| self.check_type(item)).collect())
            }
        }
    }

    /// Resolve a type name, reporting it when unknown
    fn require_type(
        &mut self,
        name: &str,
        span: Span,
    ) -> Option<Ty> {
        if let Some((_, info)) = self.scopes.resolve_type(self.current, name) {
            return Some(match &info.alias {
                Some(target) => target.clone(),
                None if info.builtin => Ty::builtin(name).unwrap_or(Ty::Unknown),
                None => Ty::Named(name.to_string()),
            });
        }
        let suggestion =
            SuggestionEngine::from_names(self.scopes.visible_types(self.current)).best_match(name);
        self.report(SemanticError::UnknownType {
            name: name.to_string(),
            suggestion,
            span,
        });
        None
    }

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------

    /// Check an expression and return what is known of its type
    fn check_expr(
        &mut self,
        expr: &Expr,
    ) -> Ty {
        let ty = match &expr.kind {
            ExprKind::Literal(literal) => Ty::of_literal(literal),
            ExprKind::Identifier(name) => match self.lookup(name, expr.id, expr.span) {
                Some((kind, ty)) => Self::value_ty(&kind, ty),
                None => Ty::Unknown,
            },
            ExprKind::BinaryOp { op, left, right } => self.check_binary(*op, left, right),
            ExprKind::UnaryOp { op, operand } => self.check_unary(*op, operand),
            ExprKind::FunctionCall { callee, args } => self.check_call(expr, callee, args),
            ExprKind::Lambda { params, body } => {
                self.push_scope(ScopeKind::Lambda);
                self.bind_params(params);
                self.check_expr(body);
                self.pop_scope();
                Ty::Unknown
            }
            ExprKind::Conditional {
                condition,
                then_branch,
                else_branch,
            } => {
                let condition_ty = self.check_expr(condition);
                self.expect_ty(&Ty::Bool, &condition_ty, condition.span);
                let then_ty = self.check_expr(then_branch);
                match else_branch {
                    Some(else_branch) => {
                        let else_ty = self.check_expr(else_branch);
                        if self.expect_ty(&then_ty, &else_ty, else_branch.span) {
                            then_ty.join(&else_ty)
                        } else {
                            Ty::Unknown
                        }
                    }
                    None => Ty::Unknown,
                }
            }
            ExprKind::Match { scrutinee, branches } => self.check_match(scrutinee, branches),
            ExprKind::List(items) => {
                let mut elem = Ty::Unknown;
                for item in items {
                    let ty = self.check_expr(item);
                    if self.expect_ty(&elem, &ty, item.span) {
                        elem = elem.join(&ty);
                    }
                }
                Ty::List(Box::new(elem))
            }
            ExprKind::Tuple(items) => Ty::Tuple(items.iter().map(|item| self.check_expr(item)).collect()),
            ExprKind::Record(fields) => {
                let mut seen: HashMap<&str, Span> = HashMap::new();
                for field in fields {
                    if let Some(first) = seen.insert(&field.name.name, field.name.span) {
                        self.report(SemanticError::DuplicateBinding {
                            name: field.name.name.clone(),
                            first,
                            span: field.name.span,
                        });
                    }
                    self.check_expr(&field.value);
                }
                Ty::Unknown
            }
            ExprKind::FieldAccess { target, field } => self.check_field(expr, target, field),
            ExprKind::LetIn { binding, body } => {
                self.push_scope(ScopeKind::LetIn);
                match binding.as_ref() {
                    Definition::Let(binding) => self.define_let(binding, true),
                    Definition::Function(def) => self.define_function(def, true),
                }
                let ty = self.check_expr(body);
                self.pop_scope();
                ty
            }
            ExprKind::TypeAnnotation { expr: inner, ty } => {
                let found = self.check_expr(inner);
                let declared = self.check_type(ty);
                self.expect_ty(&declared, &found, inner.span);
                declared.join(&found)
            }
            ExprKind::Assign { target, value } => {
                self.check_assign(target, value);
                Ty::Unit
            }
        };

        if !ty.is_unknown() {
            self.annotations.types.insert(expr.id, ty.clone());
        }
        ty
    }

    fn check_binary(
        &mut self,
        op: BinOp,
        left: &Expr,
        right: &Expr,
    ) -> Ty {
        let left_ty = self.check_expr(left);
        let right_ty = self.check_expr(right);

        if op.is_arithmetic() {
            let mut numeric = true;
            for (ty, operand) in [(&left_ty, left), (&right_ty, right)] {
                if !ty.is_unknown() && !ty.is_numeric() {
                    self.mismatch(Ty::Int, ty.clone(), operand.span);
                    numeric = false;
                }
            }
            if !numeric {
                return Ty::Unknown;
            }
            // 整数与浮点不混用
            self.expect_ty(&left_ty, &right_ty, right.span);
            left_ty.join(&right_ty)
        } else if op.is_comparison() {
            self.expect_ty(&left_ty, &right_ty, right.span);
            Ty::Bool
        } else if op.is_logical() {
            self.expect_ty(&Ty::Bool, &left_ty, left.span);
            self.expect_ty(&Ty::Bool, &right_ty, right.span);
            Ty::Bool
        } else {
            // Cons: element :: list
            match right_ty {
                Ty::Unknown => Ty::List(Box::new(left_ty)),
                Ty::List(elem) => {
                    self.expect_ty(&elem, &left_ty, left.span);
                    Ty::List(Box::new(elem.join(&left_ty)))
                }
                other => {
                    self.mismatch(Ty::List(Box::new(left_ty)), other, right.span);
                    Ty::Unknown
                }
            }
        }
    }

    fn check_unary(
        &mut self,
        op: UnOp,
        operand: &Expr,
    ) -> Ty {
        let ty = self.check_expr(operand);
        match op {
            UnOp::Neg | UnOp::Plus => {
                if ty.is_unknown() || ty.is_numeric() {
                    ty
                } else {
                    self.mismatch(Ty::Int, ty, operand.span);
                    Ty::Unknown
                }
            }
            UnOp::Not => {
                self.expect_ty(&Ty::Bool, &ty, operand.span);
                Ty::Bool
            }
        }
    }

    fn check_call(
        &mut self,
        call: &Expr,
        callee: &Expr,
        args: &[Expr],
    ) -> Ty {
        self.check_expr(callee);
        for arg in args {
            self.check_expr(arg);
        }

        let name = match &callee.kind {
            ExprKind::Identifier(name) => name,
            ExprKind::FieldAccess { field, .. } => &field.name,
            _ => return Ty::Unknown,
        };
        let Some(resolution) = self.annotations.resolution(callee.id).cloned() else {
            return Ty::Unknown;
        };

        if let Some(expected) = resolution.kind.arity() {
            // `读取 ()` passes no argument
            let found = match args {
                [Expr {
                    kind: ExprKind::Literal(Literal::Unit),
                    ..
                }] if expected == 0 => 0,
                _ => args.len(),
            };
            if found != expected {
                self.report(SemanticError::ArityMismatch {
                    name: name.clone(),
                    expected,
                    found,
                    span: call.span,
                });
            }
        }

        match &resolution.kind {
            BindingKind::Constructor { type_name, .. } => Ty::Named(type_name.clone()),
            BindingKind::Builtin { .. } | BindingKind::Function { .. } => self
                .scopes
                .get(resolution.scope)
                .value(name)
                .map_or(Ty::Unknown, |binding| binding.ty.clone()),
            _ => Ty::Unknown,
        }
    }

    /// The module a path expression names, if it names one
    fn module_path(
        &mut self,
        expr: &Expr,
    ) -> Option<(String, ScopeId)> {
        let (name, scope, binding) = match &expr.kind {
            ExprKind::Identifier(name) => {
                let (scope, binding) = self.scopes.resolve_value(self.current, name)?;
                (name.clone(), scope, binding)
            }
            ExprKind::FieldAccess { target, field } => {
                let (_, outer) = self.module_path(target)?;
                let binding = self.scopes.get(outer).value(&field.name)?;
                (field.name.clone(), outer, binding)
            }
            _ => return None,
        };

        let BindingKind::Module { scope: inner } = &binding.kind else {
            return None;
        };
        let inner = *inner;
        let resolution = Resolution {
            scope,
            kind: binding.kind.clone(),
            defined_at: binding.defined_at,
        };
        self.annotations.resolutions.insert(expr.id, resolution);
        self.scopes.mark_used(scope, &name);
        Some((name, inner))
    }

    fn check_field(
        &mut self,
        access: &Expr,
        target: &Expr,
        field: &Ident,
    ) -> Ty {
        let Some((module, scope)) = self.module_path(target) else {
            self.check_expr(target);
            return Ty::Unknown;
        };

        let Some(binding) = self.scopes.get(scope).value(&field.name) else {
            self.report(SemanticError::UnknownModuleMember {
                module,
                name: field.name.clone(),
                span: field.span,
            });
            return Ty::Unknown;
        };

        let (kind, ty) = (binding.kind.clone(), binding.ty.clone());
        self.annotations.resolutions.insert(
            access.id,
            Resolution {
                scope,
                kind: kind.clone(),
                defined_at: binding.defined_at,
            },
        );
        self.scopes.mark_used(scope, &field.name);
        Self::value_ty(&kind, ty)
    }

    fn check_assign(
        &mut self,
        target: &Expr,
        value: &Expr,
    ) {
        let value_ty = self.check_expr(value);
        match &target.kind {
            ExprKind::Identifier(name) => {
                let Some((kind, ty)) = self.lookup(name, target.id, target.span) else {
                    return;
                };
                match kind {
                    BindingKind::Value | BindingKind::Parameter | BindingKind::PatternVar => {
                        self.expect_ty(&ty, &value_ty, value.span);
                    }
                    _ => self.report(SemanticError::InvalidAssignmentTarget { span: target.span }),
                }
            }
            ExprKind::FieldAccess { .. } => {
                self.check_expr(target);
            }
            _ => {
                self.check_expr(target);
                self.report(SemanticError::InvalidAssignmentTarget { span: target.span });
            }
        }
    }

    fn check_match(
        &mut self,
        scrutinee: &Expr,
        branches: &[MatchBranch],
    ) -> Ty {
        let scrutinee_ty = self.check_expr(scrutinee);

        let mut result: Option<Ty> = None;
        for branch in branches {
            self.push_scope(ScopeKind::Branch);
            self.bind_pattern(&branch.pattern, &scrutinee_ty);
            let ty = self.check_expr(&branch.body);
            self.pop_scope();

            result = Some(match result {
                None => ty,
                Some(prev) if prev.compatible(&ty) => prev.join(&ty),
                Some(_) => Ty::Unknown,
            });
        }
        result.unwrap_or(Ty::Unknown)
    }

    // ------------------------------------------------------------------
    // Patterns
    // ------------------------------------------------------------------

    /// Bind the variables of `pattern` in the current scope
    fn bind_pattern(
        &mut self,
        pattern: &Pattern,
        expected: &Ty,
    ) {
        match &pattern.kind {
            PatternKind::Wildcard => {}
            PatternKind::Literal(literal) => {
                self.expect_ty(expected, &Ty::of_literal(literal), pattern.span);
            }
            PatternKind::Binding(name) => {
                if self.nullary_constructor(name, pattern.id) {
                    return;
                }
                self.bind_pattern_var(name, pattern.span, expected.clone());
            }
            PatternKind::HeadTail { head, tail } => {
                let elem = Self::element_of(expected);
                self.bind_pattern(head, &elem);
                self.bind_pattern(tail, &Ty::List(Box::new(elem)));
            }
            PatternKind::List(items) => {
                let elem = Self::element_of(expected);
                for item in items {
                    self.bind_pattern(item, &elem);
                }
            }
            PatternKind::Tuple(items) => {
                let components = match expected {
                    Ty::Tuple(tys) if tys.len() == items.len() => tys.clone(),
                    _ => vec![Ty::Unknown; items.len()],
                };
                for (item, ty) in items.iter().zip(&components) {
                    self.bind_pattern(item, ty);
                }
            }
            PatternKind::Constructor { name, args } => {
                self.check_constructor(pattern, name, args.len());
                for arg in args {
                    self.bind_pattern(arg, &Ty::Unknown);
                }
            }
            PatternKind::Guard { pattern, condition } => {
                self.bind_pattern(pattern, expected);
                let ty = self.check_expr(condition);
                self.expect_ty(&Ty::Bool, &ty, condition.span);
            }
        }
    }

    fn element_of(ty: &Ty) -> Ty {
        match ty {
            Ty::List(elem) => elem.as_ref().clone(),
            _ => Ty::Unknown,
        }
    }

    /// A bare name in a pattern that refers to a constant constructor
    fn nullary_constructor(
        &mut self,
        name: &str,
        id: NodeId,
    ) -> bool {
        let Some((scope, binding)) = self.scopes.resolve_value(self.current, name) else {
            return false;
        };
        if !matches!(binding.kind, BindingKind::Constructor { arity: 0, .. }) {
            return false;
        }
        let resolution = Resolution {
            scope,
            kind: binding.kind.clone(),
            defined_at: binding.defined_at,
        };
        self.annotations.resolutions.insert(id, resolution);
        self.scopes.mark_used(scope, name);
        true
    }

    fn check_constructor(
        &mut self,
        pattern: &Pattern,
        name: &Ident,
        found: usize,
    ) {
        let resolved = self
            .scopes
            .resolve_value(self.current, &name.name)
            .filter(|(_, binding)| binding.kind.is_constructor())
            .map(|(scope, binding)| Resolution {
                scope,
                kind: binding.kind.clone(),
                defined_at: binding.defined_at,
            });

        let Some(resolution) = resolved else {
            self.report(SemanticError::UnknownConstructor {
                name: name.name.clone(),
                span: name.span,
            });
            return;
        };

        if let Some(expected) = resolution.kind.arity() {
            if expected != found {
                self.report(SemanticError::ArityMismatch {
                    name: name.name.clone(),
                    expected,
                    found,
                    span: pattern.span,
                });
            }
        }
        self.scopes.mark_used(resolution.scope, &name.name);
        self.annotations.resolutions.insert(pattern.id, resolution);
    }

    fn bind_pattern_var(
        &mut self,
        name: &str,
        span: Span,
        ty: Ty,
    ) {
        if let Some(first) = self.scopes.get(self.current).value(name) {
            let first = first.defined_at;
            self.report(SemanticError::DuplicateBinding {
                name: name.to_string(),
                first,
                span,
            });
            return;
        }
        let binding = Binding::new(BindingKind::PatternVar, span, ty).warn_if_unused();
        self.scopes.define_value(self.current, name, binding);
    }
}
