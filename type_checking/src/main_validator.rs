use super::{
    checker::SemanticContext,
    declaration::MAIN_CLASS,
    semantics::{SemanticError, TypingError},
    type_system::CheckedType,
};

pub const MAIN_METHOD: &str = "main";

/// `Main` must have a method `main` returning `void` that takes exactly one
/// parameter. Only methods declared in `Main` itself are considered.
pub fn check_main_class(context: &SemanticContext<'_>) -> Result<(), TypingError> {
    let type_system = &context.class_table;
    let main_class = type_system
        .lookup_class(MAIN_CLASS)
        .map(|id| type_system.class(id))
        .ok_or_else(|| TypingError::from(SemanticError::MissingMain))?;

    let main_method = main_class
        .method(MAIN_METHOD)
        .ok_or_else(|| SemanticError::MissingMainMethod.maybe_at(main_class.span))?;

    if main_method.return_ty != CheckedType::Void {
        return Err(SemanticError::WrongMainReturnType {
            actual: main_method.return_ty.display(type_system).to_string(),
        }
        .maybe_at(main_method.span));
    }

    if main_method.params.len() != 1 {
        return Err(SemanticError::WrongMainArity {
            actual: main_method.params.len(),
        }
        .maybe_at(main_method.span));
    }

    log::debug!("found {}.{}", MAIN_CLASS, MAIN_METHOD);
    Ok(())
}
