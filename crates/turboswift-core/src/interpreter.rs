//! Interpreter - executes method bodies against runtime objects
//!
//! Each method body is compiled into [`Stmt`]s first, then run in order
//! against the receiver. Interpreted calls re-enter [`Interpreter::execute`]
//! with the callee's receiver; host calls go through the bridge.
//!
//! Failures abort immediately and propagate to the caller. Fields written
//! by statements that already ran stay written.

use std::io::Write;
use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::parser::ast::{Func, Program};
use crate::statement::{self, Operand, Stmt};
use crate::value::{ObjectRef, TurboObject, Value};
use crate::{BridgeRegistry, Error, Result, RunConfig};

/// Result of a completed run
#[derive(Debug)]
pub struct RunSummary {
    /// The entry contract's instance after `main` returned
    pub entry: ObjectRef,
    pub statements_executed: u64,
}

pub struct Interpreter<W: Write> {
    config: RunConfig,
    out: W,
    depth: usize,
    statements_executed: u64,
}

impl<W: Write> Interpreter<W> {
    pub fn new(config: RunConfig, out: W) -> Self {
        Interpreter {
            config,
            out,
            depth: 0,
            statements_executed: 0,
        }
    }

    pub fn statements_executed(&self) -> u64 {
        self.statements_executed
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run `func` with `receiver` as the current object
    pub fn execute(&mut self, receiver: &ObjectRef, func: &Func, args: Vec<Value>) -> Result<()> {
        if self.depth >= self.config.max_call_depth {
            return Err(Error::CallDepthExceeded(self.config.max_call_depth));
        }
        if args.len() > func.params.len() {
            warn!(
                method = %func.name,
                params = func.params.len(),
                args = args.len(),
                "extra arguments ignored"
            );
        }

        let stmts = statement::compile(func, self.config.mode)?;
        debug!(method = %func.name, statements = stmts.len(), depth = self.depth, "executing method");

        // No local scopes: parameters live in the receiver's fields.
        // Parameters without an argument are bound to null.
        let mut args = args.into_iter();
        for param in &func.params {
            let arg = args.next().unwrap_or(Value::Null);
            receiver.borrow_mut().set_attr(param, arg)?;
        }

        self.depth += 1;
        let result = stmts.iter().try_for_each(|stmt| self.run(receiver, stmt));
        self.depth -= 1;
        result
    }

    /// Dispatch `method` on `receiver`: host objects go through the bridge,
    /// interpreted objects run the contract's method
    pub fn call(&mut self, receiver: &ObjectRef, method: &str, args: Vec<Value>) -> Result<Value> {
        if receiver.borrow().is_host() {
            return receiver.borrow_mut().call_host(method, args);
        }

        let contract = receiver
            .borrow()
            .contract()
            .cloned()
            .ok_or_else(|| Error::NoContract(method.to_string()))?;
        let func = contract
            .method(method)
            .ok_or_else(|| Error::MethodNotFoundInContract {
                method: method.to_string(),
                contract: contract.name.clone(),
            })?;

        self.execute(receiver, func, args)?;
        Ok(Value::Null)
    }

    fn run(&mut self, receiver: &ObjectRef, stmt: &Stmt) -> Result<()> {
        trace!(?stmt, "statement");
        self.statements_executed += 1;

        match stmt {
            Stmt::Construct { var, alias, class } => {
                let object = Self::construct(receiver, alias, class)?;
                receiver.borrow_mut().set_attr(var, Value::Object(object))
            }
            Stmt::Call {
                target,
                method,
                args,
            } => {
                let target = Self::resolve_object(receiver, target)?;
                let args = args.iter().map(|arg| Self::eval(receiver, arg)).collect();
                self.call(&target, method, args).map(|_| ())
            }
            Stmt::Print(arg) => {
                let value = Self::eval(receiver, arg);
                writeln!(self.out, "{}", value).map_err(|e| Error::Output(e.to_string()))
            }
            Stmt::Let { var, value } => {
                let value = Self::eval(receiver, value);
                receiver.borrow_mut().set_attr(var, value)
            }
        }
    }

    fn construct(receiver: &ObjectRef, alias: &str, class: &str) -> Result<ObjectRef> {
        let namespace = Self::resolve_object(receiver, alias)?;
        let entry = namespace.borrow().get_attr(class);
        let Some(Value::Class(host_class)) = entry else {
            return Err(Error::NotCallable(class.to_string()));
        };
        let handle = host_class.construct()?;
        debug!(class = %host_class.name(), "constructed host object");
        Ok(TurboObject::host(handle).into_ref())
    }

    /// A field that must hold an object
    fn resolve_object(receiver: &ObjectRef, name: &str) -> Result<ObjectRef> {
        match receiver.borrow().get_attr(name) {
            None | Some(Value::Null) => Err(Error::UndefinedReference(name.to_string())),
            Some(Value::Object(object)) => Ok(object),
            Some(_) => Err(Error::NotAnObject(name.to_string())),
        }
    }

    /// Literals unwrap; unknown names read as null
    fn eval(receiver: &ObjectRef, operand: &Operand) -> Value {
        match operand {
            Operand::Str(s) => Value::Str(s.clone()),
            Operand::Int(i) => Value::Integer(*i),
            Operand::Name(name) => receiver.borrow().get_attr(name).unwrap_or(Value::Null),
        }
    }
}

/// Instantiate the entry contract, bind its registered imports and call the entry method
pub fn run_program<W: Write>(
    program: &Program,
    config: &RunConfig,
    bridges: &BridgeRegistry,
    out: W,
) -> Result<RunSummary> {
    let (contract, _) = program.entry(config)?;
    let entry = TurboObject::instance(Rc::new(contract.clone())).into_ref();

    for (alias, module) in &contract.imports {
        match bridges.namespace(module) {
            Some(namespace) => entry
                .borrow_mut()
                .set_attr(alias, Value::Object(namespace))?,
            None => warn!(%alias, %module, contract = %contract.name, "no host bridge registered for import"),
        }
    }

    let mut interpreter = Interpreter::new(config.clone(), out);
    interpreter.call(&entry, &config.entry_method, Vec::new())?;

    Ok(RunSummary {
        statements_executed: interpreter.statements_executed(),
        entry,
    })
}
