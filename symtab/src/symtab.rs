use std::{collections::HashMap, hash::Hash};

/// SymbolTable associates a Symbol `S` with a stored value `T`.
pub type SymbolTable<S, T> = HashMap<S, T>;

/// One lexical scope.
///
/// Entering a nested scope copies the enclosing bindings, so definitions made
/// inside the nested scope are invisible once it is dropped, while the outer
/// bindings stay visible (as they were at the time of nesting). A definition
/// may shadow a binding of an enclosing scope or an earlier one of the same
/// scope.
#[derive(Debug, Clone)]
pub struct Environment<S, T>
where
    S: Hash + Eq,
{
    defs: SymbolTable<S, T>,
}

impl<S, T> Default for Environment<S, T>
where
    S: Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S, T> Environment<S, T>
where
    S: Hash + Eq,
{
    pub fn new() -> Self {
        Environment {
            defs: SymbolTable::new(),
        }
    }

    /// A copy of this scope to check a nested construct in.
    pub fn nested(&self) -> Self
    where
        S: Clone,
        T: Clone,
    {
        self.clone()
    }

    /// Returns the shadowed value, if there was one.
    pub fn define(&mut self, sym: S, val: T) -> Option<T> {
        self.defs.insert(sym, val)
    }

    pub fn lookup<Q>(&self, sym: &Q) -> Option<&T>
    where
        S: std::borrow::Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.defs.get(sym)
    }

    /// All visible symbols, in no particular order.
    pub fn symbols(&self) -> impl Iterator<Item = &S> {
        self.defs.keys()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}
