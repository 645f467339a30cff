use span::Span;
use std::{
    collections::{btree_map::Entry, BTreeMap, HashMap},
    fmt,
};

#[derive(Debug)]
pub struct ClassAlreadyDeclared;
#[derive(Debug)]
pub struct AttributeAlreadyDeclared;
#[derive(Debug)]
pub struct ConstructorAlreadyDeclared;

/// The whole-program class table.
///
/// Classes are stored in declaration order and refer to each other through
/// `ClassDefId`s, which makes the inheritance relation an explicit indexed
/// graph.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ClassTable {
    classes: Vec<ClassDef>,
    by_name: HashMap<String, ClassDefId>,
}

impl ClassTable {
    pub fn is_type_defined(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn add_class_def(&mut self, class_def: ClassDef) -> Result<ClassDefId, ClassAlreadyDeclared> {
        if self.is_type_defined(&class_def.name) {
            return Err(ClassAlreadyDeclared);
        }

        let id = ClassDefId(self.classes.len());
        self.by_name.insert(class_def.name.clone(), id);
        self.classes.push(class_def);
        Ok(id)
    }

    /// Adds a class that is not registered by name. Built-in helper classes
    /// are added this way, so a program may declare a class of the same name.
    pub fn add_builtin_class_def(&mut self, class_def: ClassDef) -> ClassDefId {
        let id = ClassDefId(self.classes.len());
        self.classes.push(class_def);
        id
    }

    pub fn class(&self, id: ClassDefId) -> &ClassDef {
        &self.classes[id.0]
    }

    pub fn class_mut(&mut self, id: ClassDefId) -> &mut ClassDef {
        &mut self.classes[id.0]
    }

    pub fn lookup_class(&self, name: &str) -> Option<ClassDefId> {
        self.by_name.get(name).cloned()
    }

    /// All classes in table order.
    pub fn iter(&self) -> impl Iterator<Item = (ClassDefId, &ClassDef)> {
        self.classes
            .iter()
            .enumerate()
            .map(|(idx, class)| (ClassDefId(idx), class))
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(|class| class.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// `start` followed by its ancestors, up to the root or the first class
    /// whose superclass is not resolved (yet).
    pub fn superclass_chain(&self, start: ClassDefId) -> impl Iterator<Item = ClassDefId> + '_ {
        std::iter::successors(Some(start), move |id| self.class(*id).superclass)
    }

    /// True if `ancestor` is `class` itself or on its superclass chain.
    pub fn is_subclass_of(&self, class: ClassDefId, ancestor: ClassDefId) -> bool {
        self.superclass_chain(class).any(|id| id == ancestor)
    }

    /// Looks up an attribute in `class` and its ancestors. Returns the
    /// declaring class along with the attribute.
    pub fn lookup_attribute(
        &self,
        class: ClassDefId,
        name: &str,
    ) -> Option<(ClassDefId, &ClassAttributeDef)> {
        self.superclass_chain(class)
            .find_map(|id| self.class(id).attribute(name).map(|attr| (id, attr)))
    }

    /// Looks up a method in `class` and its ancestors. Returns the declaring
    /// class along with the method.
    pub fn lookup_method(&self, class: ClassDefId, name: &str) -> Option<(ClassDefId, &ClassMethodDef)> {
        self.superclass_chain(class)
            .find_map(|id| self.class(id).method(name).map(|method| (id, method)))
    }

    /// Names of all attributes visible in `class`.
    pub fn visible_attribute_names(&self, class: ClassDefId) -> Vec<&str> {
        self.superclass_chain(class)
            .flat_map(|id| self.class(id).attribute_names())
            .collect()
    }

    /// Names of all methods callable on `class`.
    pub fn visible_method_names(&self, class: ClassDefId) -> Vec<&str> {
        self.superclass_chain(class)
            .flat_map(|id| self.class(id).method_names())
            .collect()
    }
}

/// A `ClassDefId` refers to a class definition.
///
/// Having an instance of this struct ensures that
/// the class table that issued this instance can
/// provide the definition of that class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassDefId(usize);

impl From<ClassDefId> for CheckedType {
    fn from(id: ClassDefId) -> CheckedType {
        CheckedType::ClassRef(id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    pub name: String,
    /// `None` for the root and before inheritance resolution.
    pub superclass: Option<ClassDefId>,
    pub span: Option<Span>,
    /// Built-in classes cannot be named in source code.
    pub builtin: bool,
    attributes: BTreeMap<String, ClassAttributeDef>,
    methods: BTreeMap<String, ClassMethodDef>,
    constructor: Option<ConstructorDef>,
}

impl ClassDef {
    pub fn new(name: &str, span: Option<Span>) -> ClassDef {
        ClassDef {
            name: name.to_string(),
            superclass: None,
            span,
            builtin: false,
            attributes: BTreeMap::new(),
            methods: BTreeMap::new(),
            constructor: None,
        }
    }

    pub fn new_builtin(name: &str) -> ClassDef {
        ClassDef {
            builtin: true,
            ..ClassDef::new(name, None)
        }
    }

    /// Adds the attributes of a built-in class while it is set up. A later
    /// attribute replaces an earlier one of the same name.
    pub fn with_attribute(mut self, attribute: ClassAttributeDef) -> ClassDef {
        self.attributes.insert(attribute.name.clone(), attribute);
        self
    }

    pub fn add_attribute(&mut self, attribute: ClassAttributeDef) -> Result<(), AttributeAlreadyDeclared> {
        match self.attributes.entry(attribute.name.clone()) {
            Entry::Occupied(_) => return Err(AttributeAlreadyDeclared),
            Entry::Vacant(e) => e.insert(attribute),
        };
        Ok(())
    }

    pub fn attribute(&self, name: &str) -> Option<&ClassAttributeDef> {
        self.attributes.get(name)
    }

    pub fn iter_attributes(&self) -> impl Iterator<Item = &ClassAttributeDef> {
        self.attributes.values()
    }

    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    /// There is no overloading, a method replaces an earlier one of the same
    /// name. The replaced method is returned.
    pub fn add_method(&mut self, method: ClassMethodDef) -> Option<ClassMethodDef> {
        self.methods.insert(method.name.clone(), method)
    }

    pub fn method(&self, name: &str) -> Option<&ClassMethodDef> {
        self.methods.get(name)
    }

    pub fn iter_methods(&self) -> impl Iterator<Item = &ClassMethodDef> {
        self.methods.values()
    }

    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    pub fn set_constructor(&mut self, constructor: ConstructorDef) -> Result<(), ConstructorAlreadyDeclared> {
        if self.constructor.is_some() {
            return Err(ConstructorAlreadyDeclared);
        }
        self.constructor = Some(constructor);
        Ok(())
    }

    pub fn constructor(&self) -> Option<&ConstructorDef> {
        self.constructor.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassAttributeDef {
    pub name: String,
    pub ty: CheckedType,
    pub can_write: bool,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassMethodDef {
    pub name: String,
    pub return_ty: CheckedType,
    /// does not include `this`
    pub params: Vec<Variable>,
    pub span: Option<Span>,
}

impl ClassMethodDef {
    pub fn param_types(&self) -> impl Iterator<Item = &CheckedType> {
        self.params.iter().map(|param| &param.ty)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorDef {
    pub params: Vec<Variable>,
    pub span: Option<Span>,
}

/// A local variable, a parameter or `this`.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub ty: CheckedType,
}

impl Variable {
    pub fn new(name: &str, ty: CheckedType) -> Self {
        Variable {
            name: name.to_string(),
            ty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckedType {
    Int,
    Boolean,
    Void,
    /// type of the `null` literal
    Null,
    ClassRef(ClassDefId),
}

impl CheckedType {
    pub fn is_reference(self) -> bool {
        match self {
            CheckedType::Null | CheckedType::ClassRef(_) => true,
            CheckedType::Int | CheckedType::Boolean | CheckedType::Void => false,
        }
    }

    pub fn class_id(self) -> Option<ClassDefId> {
        match self {
            CheckedType::ClassRef(id) => Some(id),
            _ => None,
        }
    }

    /// Nominal assignability: primitives are only assignable to themselves,
    /// `null` to every class type and a class to itself and its ancestors.
    pub fn is_assignable_from(self, other: CheckedType, table: &ClassTable) -> bool {
        use self::CheckedType::*;

        match self {
            Int | Boolean | Void | Null => self == other,
            ClassRef(target) => match other {
                Null => true,
                ClassRef(source) => table.is_subclass_of(source, target),
                Int | Boolean | Void => false,
            },
        }
    }

    pub fn display(self, table: &ClassTable) -> DisplayType<'_> {
        DisplayType { ty: self, table }
    }
}

pub struct DisplayType<'t> {
    ty: CheckedType,
    table: &'t ClassTable,
}

impl fmt::Display for DisplayType<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use self::CheckedType::*;
        match self.ty {
            Int => write!(f, "int"),
            Boolean => write!(f, "boolean"),
            Void => write!(f, "void"),
            Null => write!(f, "null"),
            ClassRef(id) => write!(f, "{}", self.table.class(id).name),
        }
    }
}
