use super::{
    checker::{checked_type_from_ty, lookup_declarable_class},
    method_body_type_checker::{LocalScope, MethodBodyTypeChecker, THIS},
    semantics::{SemanticError, TypingError},
    suggest,
    type_system::*,
    typed::*,
};
use ast::{BinaryOp, UnaryOp};
use span::{Span, Spanned};

impl<'ctx, 'src> MethodBodyTypeChecker<'ctx, 'src> {
    pub fn type_expr(
        &self,
        expr: &Spanned<ast::Expr>,
        scope: &LocalScope,
    ) -> Result<TypedExpr, TypingError> {
        use ast::Expr::*;
        let span = expr.span;
        match &expr.data {
            Binary(op, lhs, rhs) => self.check_binary_expr(span, *op, lhs, rhs, scope),
            Unary(op, operand) => {
                let typed = self.type_expr(operand, scope)?;
                let expected = match op {
                    UnaryOp::Not => CheckedType::Boolean,
                    UnaryOp::Neg => CheckedType::Int,
                };
                if typed.ty != expected {
                    return Err(SemanticError::OperatorTypeMismatch {
                        op: op.to_string(),
                        operands: self.describe(typed.ty),
                    }
                    .at(span));
                }

                Ok(TypedExpr::new(
                    TypedExprKind::Unary(*op, Box::new(typed)),
                    expected,
                    span,
                ))
            }
            FieldAccess(target_expr, name) => {
                let target = self.type_expr(target_expr, scope)?;
                self.check_attribute_access(span, target, name)
            }
            MethodInvocation(target_expr, name, args) => {
                // e.g. "target_expr.name(arg1, arg2)"
                let target = self.type_expr(target_expr, scope)?;
                self.check_method_invocation(span, target, name, args, scope)
            }
            ThisMethodInvocation(name, args) => {
                // e.g. "name(arg1, arg2);"
                let target = self.this_expr(name.span);
                self.check_method_invocation(span, target, name, args, scope)
            }
            InstanceOf(target_expr, class_name) => {
                let target = self.type_expr(target_expr, scope)?;
                if !target.ty.is_reference() {
                    return Err(SemanticError::NotAnObject {
                        ty: self.describe(target.ty),
                    }
                    .at(target_expr.span));
                }
                let class_id = self.lookup_class(class_name)?;

                Ok(TypedExpr::new(
                    TypedExprKind::InstanceOf(Box::new(target), class_id),
                    CheckedType::Boolean,
                    span,
                ))
            }
            Cast(ty, target_expr) => {
                let to = checked_type_from_ty(ty, self.type_system)?;
                let target = self.type_expr(target_expr, scope)?;
                if !self.is_valid_cast(target.ty, to) {
                    return Err(SemanticError::InvalidCast {
                        from: self.describe(target.ty),
                        to: self.describe(to),
                    }
                    .at(span));
                }

                Ok(TypedExpr::new(
                    TypedExprKind::Cast(to, Box::new(target)),
                    to,
                    span,
                ))
            }
            Null => Ok(TypedExpr::new(TypedExprKind::Null, CheckedType::Null, span)),
            Boolean(value) => Ok(TypedExpr::new(
                TypedExprKind::Boolean(*value),
                CheckedType::Boolean,
                span,
            )),
            Int(value) => Ok(TypedExpr::new(
                TypedExprKind::Int(*value),
                CheckedType::Int,
                span,
            )),
            String(value) => Ok(TypedExpr::new(
                TypedExprKind::String(value.clone()),
                self.builtin_types.string.into(),
                span,
            )),
            Var(name) => self.check_var(name, scope),
            This => Ok(self.this_expr(span)),
            NewObject(class_name, args) => {
                let class_id = self.lookup_class(class_name)?;
                let class_def = self.type_system.class(class_id);
                let params = class_def
                    .constructor()
                    .map(|constructor| constructor.params.as_slice())
                    .unwrap_or(&[]);
                let args = self.check_args(&class_def.name, params, args, scope)?;

                Ok(TypedExpr::new(
                    TypedExprKind::NewObject(class_id, args),
                    class_id.into(),
                    span,
                ))
            }
        }
    }

    fn check_binary_expr(
        &self,
        span: Span,
        op: BinaryOp,
        lhs: &Spanned<ast::Expr>,
        rhs: &Spanned<ast::Expr>,
        scope: &LocalScope,
    ) -> Result<TypedExpr, TypingError> {
        if op == BinaryOp::Assign {
            return self.check_assignment(span, lhs, rhs, scope);
        }

        let lhs = self.type_expr(lhs, scope)?;
        let rhs = self.type_expr(rhs, scope)?;

        let result_ty = self
            .binary_result_type(op, lhs.ty, rhs.ty)
            .ok_or_else(|| {
                SemanticError::OperatorTypeMismatch {
                    op: op.to_string(),
                    operands: format!("{} and {}", self.describe(lhs.ty), self.describe(rhs.ty)),
                }
                .at(span)
            })?;

        Ok(TypedExpr::new(
            TypedExprKind::Binary(op, Box::new(lhs), Box::new(rhs)),
            result_ty,
            span,
        ))
    }

    /// `None` if `op` cannot be applied to operands of the given types.
    fn binary_result_type(
        &self,
        op: BinaryOp,
        lhs: CheckedType,
        rhs: CheckedType,
    ) -> Option<CheckedType> {
        use CheckedType::{Boolean, Int};
        let string = CheckedType::from(self.builtin_types.string);

        match op {
            BinaryOp::Add if lhs == Int && rhs == Int => Some(Int),
            // string concatenation
            BinaryOp::Add
                if (lhs == string && (rhs == Int || rhs == string))
                    || (rhs == string && lhs == Int) =>
            {
                Some(string)
            }
            _ if op.is_arithmetic() => None,
            _ if op.is_ordering() => {
                if lhs == Int && rhs == Int {
                    Some(Boolean)
                } else {
                    None
                }
            }
            _ if op.is_equality() => {
                let comparable = match (lhs, rhs) {
                    (Int, Int) | (Boolean, Boolean) => true,
                    _ if lhs.is_reference() && rhs.is_reference() => {
                        lhs.is_assignable_from(rhs, self.type_system)
                            || rhs.is_assignable_from(lhs, self.type_system)
                    }
                    _ => false,
                };
                if comparable {
                    Some(Boolean)
                } else {
                    None
                }
            }
            _ if op.is_logical() => {
                if lhs == Boolean && rhs == Boolean {
                    Some(Boolean)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn check_assignment(
        &self,
        span: Span,
        lhs: &Spanned<ast::Expr>,
        rhs: &Spanned<ast::Expr>,
        scope: &LocalScope,
    ) -> Result<TypedExpr, TypingError> {
        let target = self.type_expr(lhs, scope)?;

        let writable = match &target.kind {
            TypedExprKind::Var(_) => true,
            TypedExprKind::Attribute { class, name, .. } => self
                .type_system
                .class(*class)
                .attribute(name)
                .map_or(false, |attribute| attribute.can_write),
            _ => false,
        };
        if !writable {
            return Err(SemanticError::InvalidAssignmentTarget.at(lhs.span));
        }

        let value = self.check_type(rhs, target.ty, scope)?;
        let ty = target.ty;

        Ok(TypedExpr::new(
            TypedExprKind::Assign(Box::new(target), Box::new(value)),
            ty,
            span,
        ))
    }

    /// Class casts must go up or down the hierarchy, primitive casts are only
    /// allowed to the same type.
    fn is_valid_cast(&self, from: CheckedType, to: CheckedType) -> bool {
        if from.is_reference() && to.is_reference() {
            to.is_assignable_from(from, self.type_system) || from.is_assignable_from(to, self.type_system)
        } else {
            from == to
        }
    }

    fn check_attribute_access(
        &self,
        span: Span,
        target: TypedExpr,
        name: &ast::Ident,
    ) -> Result<TypedExpr, TypingError> {
        let class_id = self.resolve_to_class(&target)?;
        match self.type_system.lookup_attribute(class_id, &name.data) {
            Some((declaring_class, attribute)) => Ok(TypedExpr::new(
                TypedExprKind::Attribute {
                    target: Box::new(target),
                    class: declaring_class,
                    name: attribute.name.clone(),
                },
                attribute.ty,
                span,
            )),
            None => Err(SemanticError::UndefinedAttribute {
                name: name.data.clone(),
                ty: self.describe(target.ty),
                hint: suggest::hint(
                    &name.data,
                    self.type_system.visible_attribute_names(class_id),
                ),
            }
            .at(name.span)),
        }
    }

    fn check_method_invocation(
        &self,
        span: Span,
        target: TypedExpr,
        method_name: &ast::Ident,
        args: &Spanned<ast::ArgumentList>,
        scope: &LocalScope,
    ) -> Result<TypedExpr, TypingError> {
        let class_id = self.resolve_to_class(&target)?;
        let (declaring_class, method) = self
            .type_system
            .lookup_method(class_id, &method_name.data)
            .ok_or_else(|| {
                SemanticError::UndefinedMethod {
                    name: method_name.data.clone(),
                    ty: self.describe(target.ty),
                    hint: suggest::hint(
                        &method_name.data,
                        self.type_system.visible_method_names(class_id),
                    ),
                }
                .at(method_name.span)
            })?;

        let args = self.check_args(&method.name, &method.params, args, scope)?;

        Ok(TypedExpr::new(
            TypedExprKind::MethodInvocation {
                target: Box::new(target),
                class: declaring_class,
                name: method.name.clone(),
                args,
            },
            method.return_ty,
            span,
        ))
    }

    fn check_args(
        &self,
        callee: &str,
        params: &[Variable],
        args: &Spanned<ast::ArgumentList>,
        scope: &LocalScope,
    ) -> Result<Vec<TypedExpr>, TypingError> {
        if params.len() != args.len() {
            return Err(SemanticError::ArgumentCountMismatch {
                name: callee.to_string(),
                expected: params.len(),
                actual: args.len(),
            }
            .at(args.span));
        }

        args.iter()
            .zip(params)
            .map(|(arg, param)| self.check_type(arg, param.ty, scope))
            .collect()
    }

    fn resolve_to_class(&self, target: &TypedExpr) -> Result<ClassDefId, TypingError> {
        target.ty.class_id().ok_or_else(|| {
            SemanticError::NotAnObject {
                ty: self.describe(target.ty),
            }
            .at(target.span)
        })
    }

    fn lookup_class(&self, class_name: &ast::Ident) -> Result<ClassDefId, TypingError> {
        lookup_declarable_class(&class_name.data, self.type_system).ok_or_else(|| {
            SemanticError::UnknownType {
                name: class_name.data.clone(),
                hint: suggest::hint(&class_name.data, self.type_system.class_names()),
            }
            .at(class_name.span)
        })
    }

    fn this_expr(&self, span: Span) -> TypedExpr {
        TypedExpr::new(TypedExprKind::This, self.current_class_id.into(), span)
    }

    /// Local variables and parameters shadow attributes, attributes (also
    /// inherited ones) shadow global variables.
    fn check_var(&self, var_name: &ast::Ident, scope: &LocalScope) -> Result<TypedExpr, TypingError> {
        let span = var_name.span;
        let name = var_name.data.as_str();

        if name == THIS {
            return Ok(self.this_expr(span));
        }

        if let Some(var) = scope.lookup(name) {
            return Ok(TypedExpr::new(TypedExprKind::Var(var.clone()), var.ty, span));
        }

        if let Some((declaring_class, attribute)) =
            self.type_system.lookup_attribute(self.current_class_id, name)
        {
            let this = self.this_expr(span);
            return Ok(TypedExpr::new(
                TypedExprKind::Attribute {
                    target: Box::new(this),
                    class: declaring_class,
                    name: attribute.name.clone(),
                },
                attribute.ty,
                span,
            ));
        }

        if let Some(ty) = self.context.global_vars.get(name) {
            return Ok(TypedExpr::new(
                TypedExprKind::GlobalVar(name.to_string()),
                *ty,
                span,
            ));
        }

        let mut candidates: Vec<&str> = scope.symbols().map(String::as_str).collect();
        candidates.extend(self.type_system.visible_attribute_names(self.current_class_id));
        candidates.extend(self.context.global_vars.keys().map(String::as_str));

        Err(SemanticError::UnresolvedIdentifier {
            name: name.to_string(),
            hint: suggest::hint(name, candidates),
        }
        .at(span))
    }
}
