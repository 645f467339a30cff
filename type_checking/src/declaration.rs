use super::{
    checker::SemanticContext,
    semantics::{SemanticError, TypingError},
    type_system::{ClassDef, ClassDefId},
};

pub const MAIN_CLASS: &str = "Main";

/// Enters every class of `program` into the class table, in source order.
///
/// Returns the ids of the declared classes in the order of
/// `program.classes`. `Main` may not declare a superclass; this is checked as
/// soon as `Main` is declared, whereas a missing `Main` can only be detected
/// after all declarations are processed.
pub fn declare_classes(
    context: &mut SemanticContext<'_>,
    program: &ast::Program,
) -> Result<Vec<ClassDefId>, TypingError> {
    let mut class_ids = Vec::with_capacity(program.classes.len());

    for class_decl in &program.classes {
        let name = &class_decl.name;
        let class_id = context
            .class_table
            .add_class_def(ClassDef::new(&name.data, Some(class_decl.span)))
            .map_err(|_| {
                SemanticError::DuplicateClass {
                    name: name.data.clone(),
                }
                .at(name.span)
            })?;

        if name.data == MAIN_CLASS {
            context.seen_main = true;
            if let Some(superclass) = &class_decl.superclass {
                return Err(SemanticError::InvalidMainInheritance.at(superclass.span));
            }
        }

        log::debug!("declared class {} as {:?}", name.data, class_id);
        class_ids.push(class_id);
    }

    if !context.seen_main {
        return Err(SemanticError::MissingMain.into());
    }

    Ok(class_ids)
}
