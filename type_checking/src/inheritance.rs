use super::{
    builtin_types::BuiltinTypes,
    checker::lookup_declarable_class,
    semantics::{SemanticError, TypingError},
    suggest,
    type_system::{ClassDefId, ClassTable},
};

/// Sets the superclass of every declared class, in declaration order.
///
/// Classes without an explicit superclass extend `Object`. Classes named
/// `Object` or `String` are roots and keep no superclass. Links are
/// committed one class at a time and a link that would close a cycle is
/// rejected, so the graph seen by every chain walk is acyclic.
pub fn resolve_inheritance(
    type_system: &mut ClassTable,
    builtin_types: &BuiltinTypes,
    program: &ast::Program,
    class_ids: &[ClassDefId],
) -> Result<(), TypingError> {
    for (class_decl, &class_id) in program.classes.iter().zip(class_ids) {
        let name = &class_decl.name.data;
        if name == "Object" || name == "String" {
            continue;
        }

        let superclass = match &class_decl.superclass {
            Some(superclass) => resolve_superclass(type_system, class_id, superclass)?,
            None => builtin_types.object,
        };

        type_system.class_mut(class_id).superclass = Some(superclass);
        log::debug!(
            "class {} extends {}",
            name,
            type_system.class(superclass).name
        );
    }

    Ok(())
}

/// Resolves the superclass named by `superclass` for `class_id` without
/// committing the link.
pub fn resolve_superclass(
    type_system: &ClassTable,
    class_id: ClassDefId,
    superclass: &ast::Ident,
) -> Result<ClassDefId, TypingError> {
    let class_name = &type_system.class(class_id).name;

    if superclass.data == "String" {
        return Err(SemanticError::InheritFromString {
            class_name: class_name.clone(),
        }
        .at(superclass.span));
    }

    let parent = lookup_declarable_class(&superclass.data, type_system).ok_or_else(|| {
        SemanticError::UndefinedSuperclass {
            name: superclass.data.clone(),
            hint: suggest::hint(&superclass.data, type_system.class_names()),
        }
        .at(superclass.span)
    })?;

    if type_system.superclass_chain(parent).any(|id| id == class_id) {
        return Err(SemanticError::InheritanceCycle {
            class_name: class_name.clone(),
        }
        .at(superclass.span));
    }

    Ok(parent)
}
