use super::{
    builtin_types::BuiltinTypes,
    class_checker, declaration, inheritance, main_validator,
    method_body_type_checker::THIS,
    semantics::{SemanticError, SemanticWarning, TypingError},
    suggest,
    type_system::*,
    typed::TypedProgram,
};
use diagnostics::Diagnostics;
use span::{MaybeSpanned, Span, Spanned};
use std::collections::{HashMap, HashSet};

/// Runs the semantic analysis on `program`.
///
/// The passes run strictly one after the other: declaration, inheritance,
/// member signatures of all classes, member bodies of all classes and finally
/// the validation of `Main`. The first error aborts the analysis. Warnings go
/// to `diagnostics`.
pub fn check(program: &ast::Program, diagnostics: &Diagnostics) -> Result<TypedProgram, TypingError> {
    let mut context = SemanticContext::new(diagnostics);

    let class_ids = declaration::declare_classes(&mut context, program)?;
    let builtin_types = BuiltinTypes::add_to(&mut context);
    inheritance::resolve_inheritance(&mut context.class_table, &builtin_types, program, &class_ids)?;

    for (class_decl, &class_id) in program.classes.iter().zip(&class_ids) {
        add_member_signatures(&mut context, class_id, class_decl)?;
    }
    for (class_decl, &class_id) in program.classes.iter().zip(&class_ids) {
        check_overrides(&context.class_table, class_id, class_decl)?;
    }
    log::debug!("member signatures of {} classes recorded", class_ids.len());

    let classes = program
        .classes
        .iter()
        .zip(&class_ids)
        .map(|(class_decl, &class_id)| {
            class_checker::check_class(&context, &builtin_types, class_id, class_decl)
        })
        .collect::<Result<Vec<_>, _>>()?;

    main_validator::check_main_class(&context)?;

    Ok(TypedProgram {
        classes,
        class_table: context.class_table,
    })
}

/// All state of one analysis. A fresh context is created for every call to
/// `check`, so analyses never observe each other.
pub struct SemanticContext<'ctx> {
    pub diagnostics: &'ctx Diagnostics,
    pub class_table: ClassTable,
    pub global_vars: HashMap<String, CheckedType>,
    pub seen_main: bool,
}

impl<'ctx> SemanticContext<'ctx> {
    pub fn new(diagnostics: &'ctx Diagnostics) -> SemanticContext<'ctx> {
        SemanticContext {
            diagnostics,
            class_table: ClassTable::default(),
            global_vars: HashMap::new(),
            seen_main: false,
        }
    }

    pub fn report_warning(&self, span: Span, warning: SemanticWarning) {
        let warning = Spanned::new(span, warning);
        self.diagnostics.warning(MaybeSpanned::from(&warning));
    }
}

fn add_member_signatures(
    context: &mut SemanticContext<'_>,
    class_id: ClassDefId,
    class_decl: &Spanned<ast::ClassDeclaration>,
) -> Result<(), TypingError> {
    for member in &class_decl.members {
        use ast::ClassMemberKind::*;
        match &member.kind {
            Attribute(ty) => {
                let attribute_ty = checked_type_from_ty(ty, &context.class_table)?;

                context
                    .class_table
                    .class_mut(class_id)
                    .add_attribute(ClassAttributeDef {
                        name: member.name.data.clone(),
                        ty: attribute_ty,
                        can_write: true,
                        span: Some(member.name.span),
                    })
                    .map_err(|_| {
                        SemanticError::DuplicateAttribute {
                            name: member.name.data.clone(),
                        }
                        .at(member.name.span)
                    })?;
            }
            Constructor(params, _) => {
                let constructor = constructor_def(params, member.span, &context.class_table)?;

                context
                    .class_table
                    .class_mut(class_id)
                    .set_constructor(constructor)
                    .map_err(|_| {
                        SemanticError::DuplicateConstructor {
                            class_name: class_decl.name.data.clone(),
                        }
                        .at(member.span)
                    })?;
            }
            Method(return_ty, params, _) => {
                let method = method_def(
                    &member.name,
                    return_ty.as_ref(),
                    params,
                    member.span,
                    &context.class_table,
                )?;

                let replaced = context.class_table.class_mut(class_id).add_method(method);
                if replaced.is_some() {
                    context.report_warning(
                        member.name.span,
                        SemanticWarning::DuplicateMethod {
                            method_name: member.name.data.clone(),
                            class_name: class_decl.name.data.clone(),
                        },
                    );
                }
            }
        }
        log::trace!(
            "recorded {} {}.{}",
            ast::ClassMemberKindDiscriminants::from(&member.kind),
            class_decl.name.data,
            member.name.data
        );
    }

    Ok(())
}

/// A method that redefines a method of an ancestor must take the same
/// parameter types and return a type assignable to the ancestor's return type.
fn check_overrides(
    type_system: &ClassTable,
    class_id: ClassDefId,
    class_decl: &Spanned<ast::ClassDeclaration>,
) -> Result<(), TypingError> {
    let superclass = match type_system.class(class_id).superclass {
        Some(superclass) => superclass,
        None => return Ok(()),
    };

    for member in class_decl.members.iter().filter(|member| member.kind.is_method()) {
        let method = match type_system.class(class_id).method(&member.name.data) {
            Some(method) => method,
            None => continue,
        };

        if let Some((ancestor, overridden)) = type_system.lookup_method(superclass, &method.name) {
            let same_params = method.param_types().eq(overridden.param_types());
            let compatible_return = overridden
                .return_ty
                .is_assignable_from(method.return_ty, type_system);

            if !same_params || !compatible_return {
                return Err(SemanticError::IncompatibleOverride {
                    method_name: method.name.clone(),
                    class_name: class_decl.name.data.clone(),
                    ancestor: type_system.class(ancestor).name.clone(),
                }
                .at(member.name.span));
            }
        }
    }

    Ok(())
}

/// Maps a syntactic type to a `CheckedType`. Class names must be declared.
pub fn checked_type_from_ty(
    ty: &Spanned<ast::Type>,
    type_system: &ClassTable,
) -> Result<CheckedType, TypingError> {
    use ast::Type::*;
    match &ty.data {
        Int => Ok(CheckedType::Int),
        Boolean => Ok(CheckedType::Boolean),
        Class(name) => lookup_declarable_class(name, type_system)
            .map(CheckedType::ClassRef)
            .ok_or_else(|| {
                SemanticError::UnknownType {
                    name: name.clone(),
                    hint: suggest::hint(name, type_system.class_names()),
                }
                .at(ty.span)
            }),
    }
}

/// A class that can be named in source code.
pub fn lookup_declarable_class(name: &str, type_system: &ClassTable) -> Option<ClassDefId> {
    type_system
        .lookup_class(name)
        .filter(|id| !type_system.class(*id).builtin)
}

/// A missing return type means `void`.
pub fn checked_return_type(
    ty: Option<&Spanned<ast::Type>>,
    type_system: &ClassTable,
) -> Result<CheckedType, TypingError> {
    match ty {
        Some(ty) => checked_type_from_ty(ty, type_system),
        None => Ok(CheckedType::Void),
    }
}

fn checked_params(
    params: &Spanned<ast::ParameterList>,
    type_system: &ClassTable,
) -> Result<Vec<Variable>, TypingError> {
    let mut previous_params = HashSet::new();
    params
        .iter()
        .map(|param| {
            if param.name.data == THIS {
                return Err(SemanticError::ReservedName {
                    name: param.name.data.clone(),
                }
                .at(param.name.span));
            }
            if !previous_params.insert(param.name.data.as_str()) {
                return Err(SemanticError::DuplicateParameter {
                    name: param.name.data.clone(),
                }
                .at(param.name.span));
            }
            let ty = checked_type_from_ty(&param.ty, type_system)?;
            Ok(Variable::new(&param.name.data, ty))
        })
        .collect()
}

pub fn method_def(
    name: &ast::Ident,
    return_ty: Option<&Spanned<ast::Type>>,
    params: &Spanned<ast::ParameterList>,
    span: Span,
    type_system: &ClassTable,
) -> Result<ClassMethodDef, TypingError> {
    let return_ty = checked_return_type(return_ty, type_system)?;
    let params = checked_params(params, type_system)?;

    Ok(ClassMethodDef {
        name: name.data.clone(),
        return_ty,
        params,
        span: Some(span),
    })
}

pub fn constructor_def(
    params: &Spanned<ast::ParameterList>,
    span: Span,
    type_system: &ClassTable,
) -> Result<ConstructorDef, TypingError> {
    Ok(ConstructorDef {
        params: checked_params(params, type_system)?,
        span: Some(span),
    })
}
