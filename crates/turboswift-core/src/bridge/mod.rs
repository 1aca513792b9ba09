//! Host bridge - the capability contract between interpreted code and a host toolkit
//!
//! A host module is a set of [`HostClass`]es. Constructing one yields a
//! [`HostObject`] that declares its members up front, so the interpreter
//! never has to guess whether a name is a property or a method.
//!
//! The [`BridgeRegistry`] is built once by the embedder and handed to the
//! run; each `import MODULE aka ALIAS;` in the entry contract whose module is
//! registered becomes a namespace object bound under `ALIAS`.

pub mod grey;

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::value::{Fields, ObjectRef, TurboObject, Value};
use crate::Result;

/// What a host object exposes under a given name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Member {
    /// Readable and writable attribute
    Property,
    /// Callable with zero or more arguments
    Method,
}

/// A live object owned by the host toolkit
pub trait HostObject: fmt::Debug {
    fn class_name(&self) -> &str;

    fn member(&self, name: &str) -> Option<Member>;

    /// Read an attribute; `None` when the host has no such name
    fn get(&self, name: &str) -> Option<Value>;

    fn set(&mut self, name: &str, value: Value) -> Result<()>;

    fn invoke(&mut self, name: &str, args: Vec<Value>) -> Result<Value>;
}

/// A host class constructible with no arguments
pub trait HostClass: fmt::Debug {
    fn name(&self) -> &str;

    fn construct(&self) -> Result<Box<dyn HostObject>>;
}

/// Host modules available to a run, keyed by module name
#[derive(Debug, Default, Clone)]
pub struct BridgeRegistry {
    modules: BTreeMap<String, Vec<Rc<dyn HostClass>>>,
}

impl BridgeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the headless `grey` toolkit installed
    pub fn with_grey() -> Self {
        let mut registry = Self::new();
        registry.register_module(grey::MODULE, grey::classes());
        registry
    }

    pub fn register(&mut self, module: &str, class: Rc<dyn HostClass>) {
        self.modules.entry(module.to_string()).or_default().push(class);
    }

    pub fn register_module(&mut self, module: &str, classes: Vec<Rc<dyn HostClass>>) {
        for class in classes {
            self.register(module, class);
        }
    }

    /// A fresh namespace object whose fields are the module's classes
    pub fn namespace(&self, module: &str) -> Option<ObjectRef> {
        let classes = self.modules.get(module)?;
        let fields: Fields = classes
            .iter()
            .map(|class| (class.name().to_string(), Value::Class(Rc::clone(class))))
            .collect();
        Some(TurboObject::namespace(fields).into_ref())
    }
}
