use super::{
    builtin_types::BuiltinTypes,
    checker::{checked_type_from_ty, SemanticContext},
    semantics::{SemanticError, TypingError},
    type_system::*,
    typed::*,
};
use span::Spanned;
use symtab::Environment;

pub type LocalScope = Environment<String, Variable>;

pub const THIS: &str = "this";

/// Checks the body of one constructor or method of `current_class_id`.
pub struct MethodBodyTypeChecker<'ctx, 'src> {
    pub context: &'ctx SemanticContext<'src>,
    pub type_system: &'ctx ClassTable,
    pub builtin_types: &'ctx BuiltinTypes,
    pub current_class_id: ClassDefId,
    /// The declared return type, `None` inside a constructor.
    pub return_ty: Option<CheckedType>,
}

impl<'ctx, 'src> MethodBodyTypeChecker<'ctx, 'src> {
    pub fn new(
        context: &'ctx SemanticContext<'src>,
        builtin_types: &'ctx BuiltinTypes,
        current_class_id: ClassDefId,
        return_ty: Option<CheckedType>,
    ) -> Self {
        MethodBodyTypeChecker {
            context,
            type_system: &context.class_table,
            builtin_types,
            current_class_id,
            return_ty,
        }
    }

    /// The body is checked in a scope holding the parameters. `this` is not
    /// part of the scope, it always refers to an instance of
    /// `current_class_id`.
    pub fn check_body(
        &self,
        params: &[Variable],
        body: &Spanned<ast::Block>,
    ) -> Result<TypedBlock, TypingError> {
        let mut scope = LocalScope::new();
        for param in params {
            scope.define(param.name.clone(), param.clone());
        }

        self.check_type_block(body, &scope)
    }

    /// Declarations inside the block are not visible after it.
    fn check_type_block(
        &self,
        block: &Spanned<ast::Block>,
        scope: &LocalScope,
    ) -> Result<TypedBlock, TypingError> {
        let mut block_scope = scope.nested();
        let statements = block
            .statements
            .iter()
            .map(|stmt| self.check_type_stmt(stmt, &mut block_scope))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TypedBlock { statements })
    }

    /// A statement that is not part of a block, such as a branch of an `if`,
    /// gets a scope of its own.
    fn check_type_nested_stmt(
        &self,
        stmt: &Spanned<ast::Stmt>,
        scope: &LocalScope,
    ) -> Result<TypedStmt, TypingError> {
        self.check_type_stmt(stmt, &mut scope.nested())
    }

    pub fn check_type_stmt(
        &self,
        stmt: &Spanned<ast::Stmt>,
        scope: &mut LocalScope,
    ) -> Result<TypedStmt, TypingError> {
        use ast::Stmt::*;
        match &stmt.data {
            Block(block) => Ok(TypedStmt::Block(self.check_type_block(block, scope)?)),
            Empty => Ok(TypedStmt::Empty),
            If(cond, then_arm, opt_else) => {
                let cond = self.check_condition(cond, scope)?;
                let then_arm = self.check_type_nested_stmt(then_arm, scope)?;
                let else_arm = match opt_else {
                    Some(els) => Some(Box::new(self.check_type_nested_stmt(els, scope)?)),
                    None => None,
                };

                Ok(TypedStmt::If(cond, Box::new(then_arm), else_arm))
            }
            While(cond, body) => {
                let cond = self.check_condition(cond, scope)?;
                let body = self.check_type_nested_stmt(body, scope)?;

                Ok(TypedStmt::While(cond, Box::new(body)))
            }
            For {
                init,
                cond,
                step,
                body,
            } => {
                // bindings of the initializer are visible in the whole loop, but
                // not after it
                let mut loop_scope = scope.nested();

                let init = match init {
                    Some(init) => Some(Box::new(self.check_for_init(init, &mut loop_scope)?)),
                    None => None,
                };
                let cond = match cond {
                    Some(cond) => Some(self.check_condition(cond, &loop_scope)?),
                    None => None,
                };
                let step = match step {
                    Some(step) => Some(Box::new(self.check_for_step(step, &mut loop_scope)?)),
                    None => None,
                };
                let body = match body {
                    Some(body) => Some(Box::new(self.check_type_nested_stmt(body, &loop_scope)?)),
                    None => None,
                };

                Ok(TypedStmt::For {
                    init,
                    cond,
                    step,
                    body,
                })
            }
            Expression(expr) => Ok(TypedStmt::Expression(self.type_expr(expr, scope)?)),
            Return(expr_opt) => self.check_return(stmt, expr_opt.as_ref().map(|expr| &**expr), scope),
            LocalVariableDeclaration(ty, name, opt_init) => {
                if name.data == THIS {
                    return Err(SemanticError::ReservedName {
                        name: name.data.clone(),
                    }
                    .at(name.span));
                }
                let def_ty = checked_type_from_ty(ty, self.type_system)?;

                // the initializer does not see the new binding
                let init = match opt_init {
                    Some(init) => Some(self.check_type(init, def_ty, scope)?),
                    None => None,
                };

                let var = Variable::new(&name.data, def_ty);
                scope.define(name.data.clone(), var.clone());
                log::trace!("local {}: {}", name.data, def_ty.display(self.type_system));

                Ok(TypedStmt::LocalVariableDeclaration(var, init))
            }
        }
    }

    fn check_return(
        &self,
        stmt: &Spanned<ast::Stmt>,
        expr_opt: Option<&Spanned<ast::Expr>>,
        scope: &LocalScope,
    ) -> Result<TypedStmt, TypingError> {
        match (expr_opt, self.return_ty) {
            (None, None) | (None, Some(CheckedType::Void)) => Ok(TypedStmt::Return(None)),
            (None, Some(expected)) => Err(SemanticError::MissingReturnValue {
                expected: self.describe(expected),
            }
            .at(stmt.span)),
            (Some(_), None) | (Some(_), Some(CheckedType::Void)) => {
                Err(SemanticError::UnexpectedReturnValue.at(stmt.span))
            }
            (Some(expr), Some(expected)) => {
                let typed = self.type_expr(expr, scope)?;
                if !expected.is_assignable_from(typed.ty, self.type_system) {
                    return Err(SemanticError::ReturnTypeMismatch {
                        expected: self.describe(expected),
                        actual: self.describe(typed.ty),
                    }
                    .at(expr.span));
                }

                Ok(TypedStmt::Return(Some(typed)))
            }
        }
    }

    fn check_for_init(
        &self,
        init: &Spanned<ast::Stmt>,
        loop_scope: &mut LocalScope,
    ) -> Result<TypedStmt, TypingError> {
        use ast::Stmt::*;
        match &init.data {
            Expression(_) | LocalVariableDeclaration(..) | Empty => {
                self.check_type_stmt(init, loop_scope)
            }
            _ => Err(SemanticError::UnsupportedConstruct {
                kind: format!(
                    "{} statement as for loop initializer",
                    ast::StmtDiscriminants::from(&init.data)
                ),
            }
            .at(init.span)),
        }
    }

    fn check_for_step(
        &self,
        step: &Spanned<ast::Stmt>,
        loop_scope: &mut LocalScope,
    ) -> Result<TypedStmt, TypingError> {
        use ast::Stmt::*;
        match &step.data {
            Expression(_) | Empty => self.check_type_stmt(step, loop_scope),
            _ => Err(SemanticError::UnsupportedConstruct {
                kind: format!(
                    "{} statement as for loop update",
                    ast::StmtDiscriminants::from(&step.data)
                ),
            }
            .at(step.span)),
        }
    }

    fn check_condition(
        &self,
        cond: &Spanned<ast::Expr>,
        scope: &LocalScope,
    ) -> Result<TypedExpr, TypingError> {
        self.check_type(cond, CheckedType::Boolean, scope)
    }

    /// Types `expr` and checks that the result is assignable to `expected_ty`.
    pub fn check_type(
        &self,
        expr: &Spanned<ast::Expr>,
        expected_ty: CheckedType,
        scope: &LocalScope,
    ) -> Result<TypedExpr, TypingError> {
        let typed = self.type_expr(expr, scope)?;
        if !expected_ty.is_assignable_from(typed.ty, self.type_system) {
            return Err(SemanticError::TypeMismatch {
                expected: self.describe(expected_ty),
                actual: self.describe(typed.ty),
            }
            .at(expr.span));
        }
        Ok(typed)
    }

    pub fn describe(&self, ty: CheckedType) -> String {
        ty.display(self.type_system).to_string()
    }
}
