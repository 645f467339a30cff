//! Human-readable listing of a typed program.
//!
//! Binary and unary expressions are fully parenthesized, names are printed
//! as resolved: implicit `this` receivers become explicit.
use super::{
    type_system::{ClassTable, Variable},
    typed::*,
};
use itertools::Itertools;
use std::io;

struct IndentPrinter<'w> {
    writer: &'w mut dyn io::Write,
    indent: usize,
    indent_on_next_write: bool,
}

impl<'w> IndentPrinter<'w> {
    fn new(writer: &'w mut dyn io::Write) -> IndentPrinter<'w> {
        IndentPrinter {
            writer,
            indent: 0,
            indent_on_next_write: false,
        }
    }

    fn print(&mut self, args: std::fmt::Arguments<'_>) -> io::Result<()> {
        self.indent_if_required()?;
        self.writer.write_fmt(args)
    }

    fn newline(&mut self) -> io::Result<()> {
        writeln!(self.writer)?;
        self.indent_on_next_write = true;
        Ok(())
    }

    fn println(&mut self, args: std::fmt::Arguments<'_>) -> io::Result<()> {
        self.print(args)?;
        self.newline()
    }

    fn indent_if_required(&mut self) -> io::Result<()> {
        if self.indent_on_next_write {
            write!(self.writer, "{}", "\t".repeat(self.indent))?;
            self.indent_on_next_write = false;
        }
        Ok(())
    }

    fn indent(&mut self) {
        self.indent += 1;
    }

    fn outdent(&mut self) {
        assert!(self.indent > 0, "setting indent below 0");
        self.indent -= 1;
    }
}

pub fn print(program: &TypedProgram, out: &mut dyn io::Write) -> io::Result<()> {
    let mut printer = IndentPrinter::new(out);
    let table = &program.class_table;

    for class in &program.classes {
        print_class(class, table, &mut printer)?;
    }
    Ok(())
}

fn print_class(
    class: &TypedClass,
    table: &ClassTable,
    printer: &mut IndentPrinter<'_>,
) -> io::Result<()> {
    let class_def = table.class(class.id);
    match class_def.superclass {
        Some(superclass) => printer.println(format_args!(
            "class {} extends {} {{",
            class.name,
            table.class(superclass).name
        ))?,
        None => printer.println(format_args!("class {} {{", class.name))?,
    }
    printer.indent();

    for attribute in class_def.iter_attributes() {
        printer.println(format_args!(
            "{} {};",
            attribute.ty.display(table),
            attribute.name
        ))?;
    }

    for member in &class.members {
        match member {
            TypedMember::Constructor(constructor) => {
                printer.print(format_args!(
                    "{}({}) ",
                    class.name,
                    params_to_string(&constructor.params, table)
                ))?;
                print_block(&constructor.body, table, printer)?;
            }
            TypedMember::Method(method) => {
                printer.print(format_args!(
                    "{} {}({}) ",
                    method.return_ty.display(table),
                    method.name,
                    params_to_string(&method.params, table)
                ))?;
                print_block(&method.body, table, printer)?;
            }
        }
        printer.newline()?;
    }

    printer.outdent();
    printer.println(format_args!("}}"))
}

fn params_to_string(params: &[Variable], table: &ClassTable) -> String {
    params
        .iter()
        .map(|param| format!("{} {}", param.ty.display(table), param.name))
        .join(", ")
}

fn print_block(
    block: &TypedBlock,
    table: &ClassTable,
    printer: &mut IndentPrinter<'_>,
) -> io::Result<()> {
    if block.statements.is_empty() {
        return printer.print(format_args!("{{ }}"));
    }

    printer.println(format_args!("{{"))?;
    printer.indent();
    for stmt in &block.statements {
        print_stmt(stmt, table, printer)?;
        printer.newline()?;
    }
    printer.outdent();
    printer.print(format_args!("}}"))
}

/// Blocks stay on the line of their parent statement, other statements are
/// put on a line of their own.
fn print_nested_stmt(
    stmt: &TypedStmt,
    table: &ClassTable,
    printer: &mut IndentPrinter<'_>,
) -> io::Result<()> {
    match stmt {
        TypedStmt::Block(block) => {
            printer.print(format_args!(" "))?;
            print_block(block, table, printer)
        }
        _ => {
            printer.newline()?;
            printer.indent();
            print_stmt(stmt, table, printer)?;
            printer.outdent();
            Ok(())
        }
    }
}

fn print_stmt(
    stmt: &TypedStmt,
    table: &ClassTable,
    printer: &mut IndentPrinter<'_>,
) -> io::Result<()> {
    match stmt {
        TypedStmt::Block(block) => print_block(block, table, printer),
        TypedStmt::If(cond, then_arm, else_arm) => {
            printer.print(format_args!("if ({})", expr_to_string(cond, table)))?;
            let else_arm = match else_arm {
                Some(else_arm) => else_arm,
                None => return print_nested_stmt(then_arm, table, printer),
            };

            // the else would bind to the inner if otherwise
            if ends_with_if_without_else(then_arm) {
                printer.println(format_args!(" {{"))?;
                printer.indent();
                print_stmt(then_arm, table, printer)?;
                printer.newline()?;
                printer.outdent();
                printer.print(format_args!("}} else"))?;
            } else {
                print_nested_stmt(then_arm, table, printer)?;
                match **then_arm {
                    TypedStmt::Block(_) => printer.print(format_args!(" else"))?,
                    _ => {
                        printer.newline()?;
                        printer.print(format_args!("else"))?;
                    }
                }
            }
            print_nested_stmt(else_arm, table, printer)
        }
        TypedStmt::While(cond, body) => {
            printer.print(format_args!("while ({})", expr_to_string(cond, table)))?;
            print_nested_stmt(body, table, printer)
        }
        TypedStmt::For {
            init,
            cond,
            step,
            body,
        } => {
            let init = init
                .as_ref()
                .map(|init| simple_stmt_to_string(init, table))
                .unwrap_or_default();
            let cond = cond
                .as_ref()
                .map(|cond| expr_to_string(cond, table))
                .unwrap_or_default();
            let step = step
                .as_ref()
                .map(|step| simple_stmt_to_string(step, table))
                .unwrap_or_default();
            printer.print(format_args!("for ({}; {}; {})", init, cond, step))?;
            match body {
                Some(body) => print_nested_stmt(body, table, printer),
                None => printer.print(format_args!(";")),
            }
        }
        _ => printer.print(format_args!("{};", simple_stmt_to_string(stmt, table))),
    }
}

/// Whether an `else` printed right after `stmt` would be taken as part of
/// `stmt` when the listing is read back.
fn ends_with_if_without_else(stmt: &TypedStmt) -> bool {
    match stmt {
        TypedStmt::If(_, _, None) => true,
        TypedStmt::If(_, _, Some(else_arm)) => ends_with_if_without_else(else_arm),
        TypedStmt::While(_, body) => ends_with_if_without_else(body),
        TypedStmt::For {
            body: Some(body), ..
        } => ends_with_if_without_else(body),
        _ => false,
    }
}

/// Statements that fit on one line, without the terminating semicolon.
fn simple_stmt_to_string(stmt: &TypedStmt, table: &ClassTable) -> String {
    match stmt {
        TypedStmt::Empty => String::new(),
        TypedStmt::Expression(expr) => expr_to_string(expr, table),
        TypedStmt::Return(None) => "return".to_string(),
        TypedStmt::Return(Some(expr)) => format!("return {}", expr_to_string(expr, table)),
        TypedStmt::LocalVariableDeclaration(var, None) => {
            format!("{} {}", var.ty.display(table), var.name)
        }
        TypedStmt::LocalVariableDeclaration(var, Some(init)) => format!(
            "{} {} = {}",
            var.ty.display(table),
            var.name,
            expr_to_string(init, table)
        ),
        TypedStmt::Block(_) | TypedStmt::If(..) | TypedStmt::While(..) | TypedStmt::For { .. } => {
            unreachable!("compound statements are printed by print_stmt")
        }
    }
}

fn args_to_string(args: &[TypedExpr], table: &ClassTable) -> String {
    args.iter().map(|arg| expr_to_string(arg, table)).join(", ")
}

pub fn expr_to_string(expr: &TypedExpr, table: &ClassTable) -> String {
    use TypedExprKind::*;
    match &expr.kind {
        Binary(op, lhs, rhs) => format!(
            "({} {} {})",
            expr_to_string(lhs, table),
            op,
            expr_to_string(rhs, table)
        ),
        Unary(op, operand) => format!("({}{})", op, expr_to_string(operand, table)),
        Assign(target, value) => format!(
            "{} = {}",
            expr_to_string(target, table),
            expr_to_string(value, table)
        ),
        Attribute { target, name, .. } => format!("{}.{}", expr_to_string(target, table), name),
        MethodInvocation {
            target, name, args, ..
        } => format!(
            "{}.{}({})",
            expr_to_string(target, table),
            name,
            args_to_string(args, table)
        ),
        NewObject(class, args) => format!(
            "new {}({})",
            table.class(*class).name,
            args_to_string(args, table)
        ),
        InstanceOf(target, class) => format!(
            "({} instanceof {})",
            expr_to_string(target, table),
            table.class(*class).name
        ),
        Cast(ty, target) => format!(
            "(({}) {})",
            ty.display(table),
            expr_to_string(target, table)
        ),
        Null => "null".to_string(),
        Boolean(value) => value.to_string(),
        Int(value) => value.to_string(),
        String(value) => string_literal(value),
        Var(var) => var.name.clone(),
        GlobalVar(name) => name.clone(),
        This => "this".to_string(),
    }
}

/// A Java string literal denoting `value`.
fn string_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');
    for c in value.chars() {
        match c {
            '"' => literal.push_str("\\\""),
            '\\' => literal.push_str("\\\\"),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            '\u{8}' => literal.push_str("\\b"),
            '\u{c}' => literal.push_str("\\f"),
            c if c.is_control() => literal.push_str(&format!("\\u{:04x}", c as u32)),
            c => literal.push(c),
        }
    }
    literal.push('"');
    literal
}
