//! Errors and warnings of the semantic analysis.
use failure::Fail;
use span::{MaybeSpanned, Span, Spanned};
use std::fmt;

/// Every way a program can be rejected by the semantic analysis.
///
/// Fields named `hint` hold an already formatted suggestion (possibly empty)
/// that is appended to the message.
#[derive(Debug, Clone, PartialEq, Fail)]
pub enum SemanticError {
    #[fail(display = "Duplicate class: {}", name)]
    DuplicateClass { name: String },
    #[fail(display = "Missing required Main class")]
    MissingMain,
    #[fail(display = "Main class cannot extend another class")]
    InvalidMainInheritance,
    #[fail(display = "Class {} cannot inherit from String", class_name)]
    InheritFromString { class_name: String },
    #[fail(display = "Undefined superclass: {}{}", name, hint)]
    UndefinedSuperclass { name: String, hint: String },
    #[fail(display = "Cycle in inheritance: {}", class_name)]
    InheritanceCycle { class_name: String },

    #[fail(display = "Duplicate attribute: {}", name)]
    DuplicateAttribute { name: String },
    #[fail(display = "Duplicate parameter: {}", name)]
    DuplicateParameter { name: String },
    #[fail(display = "Class {} declares more than one constructor", class_name)]
    DuplicateConstructor { class_name: String },
    #[fail(
        display = "Method '{}' of class {} does not match the signature of the method it overrides in {}",
        method_name, class_name, ancestor
    )]
    IncompatibleOverride {
        method_name: String,
        class_name: String,
        ancestor: String,
    },

    #[fail(display = "Type mismatch: expected {}, found {}", expected, actual)]
    TypeMismatch { expected: String, actual: String },
    #[fail(display = "Unexpected return value: no return value is expected here")]
    UnexpectedReturnValue,
    #[fail(display = "Missing return value: expected a value of type {}", expected)]
    MissingReturnValue { expected: String },
    #[fail(
        display = "Return type mismatch: cannot return {} from a method returning {}",
        actual, expected
    )]
    ReturnTypeMismatch { expected: String, actual: String },
    #[fail(display = "Operator '{}' cannot be applied to {}", op, operands)]
    OperatorTypeMismatch { op: String, operands: String },
    #[fail(display = "Unknown variable or field: {}{}", name, hint)]
    UnresolvedIdentifier { name: String, hint: String },
    #[fail(display = "Reserved name cannot be declared: {}", name)]
    ReservedName { name: String },
    #[fail(display = "Unsupported construct: {}", kind)]
    UnsupportedConstruct { kind: String },
    #[fail(display = "Unknown class type: {}{}", name, hint)]
    UnknownType { name: String, hint: String },

    #[fail(display = "Attribute '{}' does not exist on type {}{}", name, ty, hint)]
    UndefinedAttribute {
        name: String,
        ty: String,
        hint: String,
    },
    #[fail(display = "Method '{}' does not exist on type {}{}", name, ty, hint)]
    UndefinedMethod {
        name: String,
        ty: String,
        hint: String,
    },
    #[fail(display = "Not an object: cannot access a member of type {}", ty)]
    NotAnObject { ty: String },
    #[fail(
        display = "Wrong number of arguments for '{}': expected {}, found {}",
        name, expected, actual
    )]
    ArgumentCountMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[fail(display = "Invalid assignment target")]
    InvalidAssignmentTarget,
    #[fail(display = "Invalid cast from {} to {}", from, to)]
    InvalidCast { from: String, to: String },

    #[fail(display = "Main class must have a main() method")]
    MissingMainMethod,
    #[fail(display = "Method main() must return void, not {}", actual)]
    WrongMainReturnType { actual: String },
    #[fail(display = "Method main() must have exactly 1 parameter, found {}", actual)]
    WrongMainArity { actual: usize },
}

impl SemanticError {
    pub fn at(self, span: Span) -> TypingError {
        TypingError(MaybeSpanned::WithSpan(Spanned::new(span, self)))
    }

    pub fn without_span(self) -> TypingError {
        TypingError(MaybeSpanned::WithoutSpan(self))
    }

    pub fn maybe_at(self, span: Option<Span>) -> TypingError {
        TypingError(MaybeSpanned::from((span, self)))
    }
}

/// The error that aborts a semantic analysis: a `SemanticError` together with
/// the location of the offending syntax node, if there is one.
#[derive(Debug, Clone, PartialEq)]
pub struct TypingError(MaybeSpanned<SemanticError>);

impl TypingError {
    pub fn kind(&self) -> &SemanticError {
        &self.0
    }

    pub fn span(&self) -> Option<Span> {
        self.0.span()
    }

    pub fn into_kind(self) -> SemanticError {
        self.0.into_inner()
    }

    /// The error as a message for a `Diagnostics` sink, which adds the
    /// location itself.
    pub fn as_diagnostic(&self) -> MaybeSpanned<&dyn fmt::Display> {
        MaybeSpanned::from((self.span(), &*self.0 as &dyn fmt::Display))
    }
}

impl From<SemanticError> for TypingError {
    fn from(error: SemanticError) -> Self {
        error.without_span()
    }
}

impl fmt::Display for TypingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.span() {
            Some(span) => write!(f, "{}: Typing Error: {}", span.start_position(), *self.0),
            None => write!(f, "Typing Error: {}", *self.0),
        }
    }
}

impl Fail for TypingError {}

/// Findings that do not stop the analysis. They are reported through the
/// `Diagnostics` sink.
#[derive(Debug, Fail)]
pub enum SemanticWarning {
    #[fail(
        display = "Method '{}' is declared more than once in class {}, the last declaration is used",
        method_name, class_name
    )]
    DuplicateMethod {
        method_name: String,
        class_name: String,
    },
}
