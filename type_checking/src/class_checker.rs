use super::{
    builtin_types::BuiltinTypes,
    checker::{constructor_def, method_def, SemanticContext},
    method_body_type_checker::MethodBodyTypeChecker,
    semantics::TypingError,
    type_system::ClassDefId,
    typed::*,
};
use span::Spanned;

/// Checks the bodies of all constructors and methods of one class.
///
/// Signatures are computed again from the syntax tree, so the body of a
/// method that was replaced by a later declaration of the same name is still
/// checked against its own signature.
pub fn check_class(
    context: &SemanticContext<'_>,
    builtin_types: &BuiltinTypes,
    class_id: ClassDefId,
    class_decl: &Spanned<ast::ClassDeclaration>,
) -> Result<TypedClass, TypingError> {
    let type_system = &context.class_table;
    let mut members = Vec::new();

    for member in &class_decl.members {
        use ast::ClassMemberKind::*;
        match &member.kind {
            Attribute(_) => {}
            Constructor(params, body) => {
                let constructor = constructor_def(params, member.span, type_system)?;
                let checker = MethodBodyTypeChecker::new(context, builtin_types, class_id, None);
                let body = checker.check_body(&constructor.params, body)?;

                members.push(TypedMember::Constructor(TypedConstructor {
                    params: constructor.params,
                    body,
                }));
            }
            Method(return_ty, params, body) => {
                let method = method_def(
                    &member.name,
                    return_ty.as_ref(),
                    params,
                    member.span,
                    type_system,
                )?;
                let checker = MethodBodyTypeChecker::new(
                    context,
                    builtin_types,
                    class_id,
                    Some(method.return_ty),
                );
                let body = checker.check_body(&method.params, body)?;

                members.push(TypedMember::Method(TypedMethod {
                    name: method.name,
                    return_ty: method.return_ty,
                    params: method.params,
                    body,
                }));
            }
        }
    }

    log::debug!(
        "checked {} member bodies of class {}",
        members.len(),
        class_decl.name.data
    );

    Ok(TypedClass {
        id: class_id,
        name: class_decl.name.data.clone(),
        members,
    })
}
