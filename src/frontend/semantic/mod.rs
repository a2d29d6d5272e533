//! Semantic analyzer
//!
//! Resolves every name against a tree of scopes, checks call arities and the
//! literal-level type consistency of expressions, and records what it found
//! in side tables keyed by [`NodeId`]. The AST itself is never modified.
//!
//! - [`scope`]: scope arena with separate value and type namespaces
//! - [`types`]: the small type language used for consistency checks
//! - [`prelude`]: built-in functions and type names

mod analyzer;
pub mod prelude;
pub mod scope;
pub mod types;

#[cfg(test)]
mod tests;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::frontend::parser::ast::{Module, NodeId};
use crate::util::diagnostic::{codes, Diagnostic};
use crate::util::span::Span;
pub use scope::{Binding, BindingKind, ScopeId, ScopeKind, ScopeTree};
pub use types::Ty;

/// Analyzer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerOptions {
    /// Report unused let-in and pattern bindings
    pub warn_unused: bool,
    /// Bind the built-in functions and type names
    pub prelude: bool,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            warn_unused: true,
            prelude: true,
        }
    }
}

/// Semantic error or warning
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SemanticError {
    #[error("unbound variable `{name}`")]
    UnboundVariable {
        name: String,
        suggestion: Option<String>,
        span: Span,
    },

    #[error("unknown type `{name}`")]
    UnknownType {
        name: String,
        suggestion: Option<String>,
        span: Span,
    },

    #[error("unknown constructor `{name}`")]
    UnknownConstructor { name: String, span: Span },

    #[error("module `{module}` has no member `{name}`")]
    UnknownModuleMember {
        module: String,
        name: String,
        span: Span,
    },

    #[error("`{name}` is bound more than once")]
    DuplicateBinding {
        name: String,
        first: Span,
        span: Span,
    },

    #[error("`{name}` expects {expected} argument(s), found {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
        span: Span,
    },

    #[error("invalid assignment target")]
    InvalidAssignmentTarget { span: Span },

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: Ty, found: Ty, span: Span },

    #[error("unused binding `{name}`")]
    UnusedBinding { name: String, span: Span },
}

impl SemanticError {
    pub fn span(&self) -> Span {
        match self {
            SemanticError::UnboundVariable { span, .. }
            | SemanticError::UnknownType { span, .. }
            | SemanticError::UnknownConstructor { span, .. }
            | SemanticError::UnknownModuleMember { span, .. }
            | SemanticError::DuplicateBinding { span, .. }
            | SemanticError::ArityMismatch { span, .. }
            | SemanticError::InvalidAssignmentTarget { span }
            | SemanticError::TypeMismatch { span, .. }
            | SemanticError::UnusedBinding { span, .. } => *span,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            SemanticError::UnboundVariable { .. } => codes::UNBOUND_VARIABLE,
            SemanticError::UnknownType { .. } => codes::UNKNOWN_TYPE,
            SemanticError::UnknownConstructor { .. } => codes::UNKNOWN_CONSTRUCTOR,
            SemanticError::UnknownModuleMember { .. } => codes::UNKNOWN_MODULE_MEMBER,
            SemanticError::DuplicateBinding { .. } => codes::DUPLICATE_BINDING,
            SemanticError::ArityMismatch { .. } => codes::ARITY_MISMATCH,
            SemanticError::InvalidAssignmentTarget { .. } => codes::INVALID_ASSIGNMENT_TARGET,
            SemanticError::TypeMismatch { .. } => codes::TYPE_MISMATCH,
            SemanticError::UnusedBinding { .. } => codes::UNUSED_BINDING,
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, SemanticError::UnusedBinding { .. })
    }
}

impl From<SemanticError> for Diagnostic {
    fn from(error: SemanticError) -> Self {
        let suggestion = match &error {
            SemanticError::UnboundVariable {
                suggestion: Some(name),
                ..
            }
            | SemanticError::UnknownType {
                suggestion: Some(name),
                ..
            } => Some(format!("did you mean `{}`?", name)),
            SemanticError::UnusedBinding { name, .. } => {
                Some(format!("rename it to `_{}` if this is intentional", name))
            }
            SemanticError::InvalidAssignmentTarget { .. } => {
                Some("only variables and fields can be assigned".to_string())
            }
            _ => None,
        };

        let diagnostic = if error.is_warning() {
            Diagnostic::warning(error.code(), error.to_string(), error.span())
        } else {
            Diagnostic::error(error.code(), error.to_string(), error.span())
        };
        match suggestion {
            Some(help) => diagnostic.with_suggestion(help),
            None => diagnostic,
        }
    }
}

/// What a name occurrence resolved to
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub scope: ScopeId,
    pub kind: BindingKind,
    pub defined_at: Span,
}

/// Side tables keyed by node id
#[derive(Debug, Clone, Default)]
pub struct Annotations {
    /// Identifier expressions, constructor patterns and module member accesses
    pub resolutions: HashMap<NodeId, Resolution>,
    /// Types of expressions whose type is known
    pub types: HashMap<NodeId, Ty>,
}

impl Annotations {
    pub fn resolution(
        &self,
        id: NodeId,
    ) -> Option<&Resolution> {
        self.resolutions.get(&id)
    }

    pub fn type_of(
        &self,
        id: NodeId,
    ) -> Option<&Ty> {
        self.types.get(&id)
    }
}

/// A module together with everything analysis learned about it
#[derive(Debug, Clone)]
pub struct AnalyzedModule {
    pub module: Module,
    pub annotations: Annotations,
    pub scopes: ScopeTree,
    /// Scope holding the module's top-level bindings
    pub root: ScopeId,
}

#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    pub module: AnalyzedModule,
    /// Errors and warnings, in the order they were found
    pub errors: Vec<SemanticError>,
}

impl AnalysisOutput {
    pub fn has_errors(&self) -> bool {
        self.errors.iter().any(|e| !e.is_warning())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &SemanticError> {
        self.errors.iter().filter(|e| e.is_warning())
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.errors.iter().cloned().map(Diagnostic::from).collect()
    }
}

/// Analyze a module with default options
pub fn analyze(module: Module) -> AnalysisOutput {
    analyze_with_options(module, &AnalyzerOptions::default())
}

/// Analyze a module
///
/// # Example
/// ```
/// use luoyan::frontend::lexer::tokenize;
/// use luoyan::frontend::parser::parse;
/// use luoyan::frontend::semantic::{analyze, SemanticError};
///
/// let module = parse(&tokenize("让 甲 = 1\n打印 乙").tokens).module.unwrap();
/// let output = analyze(module);
/// assert!(matches!(
///     output.errors.as_slice(),
///     [SemanticError::UnboundVariable { name, .. }] if name == "乙"
/// ));
/// ```
pub fn analyze_with_options(
    module: Module,
    options: &AnalyzerOptions,
) -> AnalysisOutput {
    tracing::debug!(items = module.items.len(), ?options, "analysis started");

    let mut analyzer = analyzer::Analyzer::new(*options);
    let root = analyzer.enter_module(&module);
    let (scopes, annotations, errors) = analyzer.finish();

    tracing::debug!(
        scopes = scopes.len(),
        errors = errors.len(),
        "analysis finished"
    );
    AnalysisOutput {
        module: AnalyzedModule {
            module,
            annotations,
            scopes,
            root,
        },
        errors,
    }
}
