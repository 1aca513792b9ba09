//! Runtime values and objects
//!
//! A [`TurboObject`] is either interpreted state owned by a contract instance
//! (or a contract-less namespace of host classes), or a handle to a host
//! object with a local mirror of written fields. Objects are shared by
//! reference through [`ObjectRef`]; the interpreter is single-threaded.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::bridge::{HostClass, HostObject, Member};
use crate::parser::ast::Contract;
use crate::{Error, Result};

pub type ObjectRef = Rc<RefCell<TurboObject>>;

/// Field storage, ordered for deterministic inspection
pub type Fields = BTreeMap<String, Value>;

/// A runtime value
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Integer(i64),
    Str(String),
    Object(ObjectRef),
    Class(Rc<dyn HostClass>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Integer(_) => "Integer",
            Value::Str(_) => "String",
            Value::Object(_) => "Object",
            Value::Class(_) => "Class",
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

/// Objects and classes compare by identity
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Class(a), Value::Class(b)) => {
                Rc::as_ptr(a).cast::<()>() == Rc::as_ptr(b).cast::<()>()
            }
            _ => false,
        }
    }
}

/// How `print` renders a value
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Str(s) => f.write_str(s),
            Value::Object(obj) => match obj.try_borrow() {
                Ok(obj) => f.write_str(&obj.describe()),
                Err(_) => write!(f, "<object>"),
            },
            Value::Class(class) => write!(f, "<class {}>", class.name()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

// ── Objects ───────────────────────────────────────────────

#[derive(Debug)]
pub enum TurboObject {
    /// Interpreted state; without a contract the object is a namespace
    Interpreted {
        contract: Option<Rc<Contract>>,
        fields: Fields,
    },
    /// A host handle plus the fields written through this object
    HostBound {
        handle: Box<dyn HostObject>,
        mirror: Fields,
    },
}

impl TurboObject {
    /// A fresh contract instance with every declared field set to null
    pub fn instance(contract: Rc<Contract>) -> Self {
        let fields = contract
            .vars
            .keys()
            .map(|name| (name.clone(), Value::Null))
            .collect();
        TurboObject::Interpreted {
            contract: Some(contract),
            fields,
        }
    }

    pub fn namespace(fields: Fields) -> Self {
        TurboObject::Interpreted {
            contract: None,
            fields,
        }
    }

    pub fn host(handle: Box<dyn HostObject>) -> Self {
        TurboObject::HostBound {
            handle,
            mirror: Fields::new(),
        }
    }

    pub fn into_ref(self) -> ObjectRef {
        Rc::new(RefCell::new(self))
    }

    pub fn is_host(&self) -> bool {
        matches!(self, TurboObject::HostBound { .. })
    }

    pub fn contract(&self) -> Option<&Rc<Contract>> {
        match self {
            TurboObject::Interpreted { contract, .. } => contract.as_ref(),
            TurboObject::HostBound { .. } => None,
        }
    }

    /// Local fields (or the host mirror)
    pub fn fields(&self) -> &Fields {
        match self {
            TurboObject::Interpreted { fields, .. } => fields,
            TurboObject::HostBound { mirror, .. } => mirror,
        }
    }

    /// Local fields win; a host handle answers for names it exposes
    pub fn get_attr(&self, name: &str) -> Option<Value> {
        match self {
            TurboObject::Interpreted { fields, .. } => fields.get(name).cloned(),
            TurboObject::HostBound { handle, mirror } => {
                mirror.get(name).cloned().or_else(|| handle.get(name))
            }
        }
    }

    /// Write a field. Host-bound objects write the mirror, then the host.
    /// A host rejection is returned after the mirror was already updated.
    pub fn set_attr(&mut self, name: &str, value: Value) -> Result<()> {
        match self {
            TurboObject::Interpreted { fields, .. } => {
                fields.insert(name.to_string(), value);
                Ok(())
            }
            TurboObject::HostBound { handle, mirror } => {
                mirror.insert(name.to_string(), value.clone());
                handle.set(name, value)
            }
        }
    }

    /// Dispatch a call on a host-bound object: a property called with exactly
    /// one argument is a setter, a method is invoked
    pub fn call_host(&mut self, method: &str, args: Vec<Value>) -> Result<Value> {
        let TurboObject::HostBound { handle, .. } = self else {
            return Err(Error::NoContract(method.to_string()));
        };
        match handle.member(method) {
            Some(Member::Property) if args.len() == 1 => {
                let value = args.into_iter().next().unwrap_or(Value::Null);
                handle.set(method, value)?;
                Ok(Value::Null)
            }
            Some(Member::Method) => handle.invoke(method, args),
            _ => Err(Error::MethodNotFound {
                method: method.to_string(),
                target: handle.class_name().to_string(),
            }),
        }
    }

    /// Short label used when the object is printed
    pub fn describe(&self) -> String {
        match self {
            TurboObject::Interpreted {
                contract: Some(c), ..
            } => format!("<{} instance>", c.name),
            TurboObject::Interpreted { contract: None, .. } => "<namespace>".to_string(),
            TurboObject::HostBound { handle, .. } => format!("<{} object>", handle.class_name()),
        }
    }
}
