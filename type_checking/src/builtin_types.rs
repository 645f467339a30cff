use super::{checker::SemanticContext, type_system::*};

/// Ids of the classes every program can rely on.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinTypes {
    pub object: ClassDefId,
    pub string: ClassDefId,
}

impl BuiltinTypes {
    /// Inserts the root sentinels `Object` and `String` (unless the program
    /// declares classes of that name) and the output primitive reachable
    /// through the global `System`, i.e. `System.out.print(String)` and
    /// `System.out.println(String)`.
    pub fn add_to(context: &mut SemanticContext<'_>) -> BuiltinTypes {
        let type_system = &mut context.class_table;

        let object = lookup_or_insert(type_system, "Object");
        let string = lookup_or_insert(type_system, "String");

        let print_stream_id = {
            let mut print_stream_def = ClassDef::new_builtin("$PrintStream");
            print_stream_def.superclass = Some(object);
            for name in &["print", "println"] {
                print_stream_def.add_method(ClassMethodDef {
                    name: name.to_string(),
                    return_ty: CheckedType::Void,
                    params: vec![Variable::new("s", string.into())],
                    span: None,
                });
            }
            type_system.add_builtin_class_def(print_stream_def)
        };

        let system_id = {
            let mut system_def = ClassDef::new_builtin("$System").with_attribute(ClassAttributeDef {
                name: "out".to_string(),
                ty: print_stream_id.into(),
                can_write: false,
                span: None,
            });
            system_def.superclass = Some(object);
            type_system.add_builtin_class_def(system_def)
        };

        context
            .global_vars
            .insert("System".to_string(), system_id.into());

        log::debug!(
            "built-in types ready: Object={:?}, String={:?}, System={:?}",
            object,
            string,
            system_id
        );

        BuiltinTypes { object, string }
    }
}

fn lookup_or_insert(type_system: &mut ClassTable, name: &str) -> ClassDefId {
    match type_system.lookup_class(name) {
        Some(id) => id,
        None => match type_system.add_class_def(ClassDef::new(name, None)) {
            Ok(id) => id,
            Err(ClassAlreadyDeclared) => unreachable!("{} was looked up before", name),
        },
    }
}
