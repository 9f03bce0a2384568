//! Member access and the call shapes. The receiver a body observes is a
//! function of how the callable is invoked, never of where it was found:
//!
//! - `call_method`: fetch-and-invoke, receiver is the bag fetched from;
//! - `call_value`: detached invocation, receiver is absent;
//! - reattach-and-`call_method`: receiver is the new bag;
//! - a fixed-capture closure ignores all of the above and keeps the
//!   receiver it captured at creation.

use crate::error::Fault;
use crate::runtime::Runtime;
use crate::types::{CallContext, Completion, Function, Key, Value};

impl Runtime {
    /// Property read through a value. Own properties win over class
    /// methods; absent entries on an object read as `Undefined`; reading
    /// through `Undefined` itself is a fault.
    pub fn get_member(&self, target: &Value, key: impl Into<Key>) -> Completion {
        let key = key.into();
        match target {
            Value::Object(obj) => {
                if obj.has(&key) {
                    return Completion::Normal(obj.get(key));
                }
                if let Some(class) = obj.class()
                    && let Key::Str(name) = &key
                    && let Some(method) = self.resolve_method(class, name)
                {
                    return Completion::Normal(Value::Function(method));
                }
                Completion::Normal(Value::Undefined)
            }
            Value::Undefined => Completion::Throw(Fault::UndefinedAccess(key.to_string())),
            _ => Completion::Normal(Value::Undefined),
        }
    }

    /// Property write through a value. Any object accepts dynamic adds,
    /// class instances included; writing through `Undefined` is a fault.
    pub fn set_member(&self, target: &Value, key: impl Into<Key>, value: Value) -> Completion {
        let key = key.into();
        match target {
            Value::Object(obj) => {
                obj.set(key, value);
                Completion::Normal(Value::Undefined)
            }
            Value::Undefined => Completion::Throw(Fault::UndefinedAccess(key.to_string())),
            _ => Completion::Normal(Value::Undefined),
        }
    }

    /// Property removal; reports whether the key was present.
    pub fn delete_member(&self, target: &Value, key: impl Into<Key>) -> Completion {
        let key = key.into();
        match target {
            Value::Object(obj) => Completion::Normal(Value::Boolean(obj.delete(key))),
            Value::Undefined => Completion::Throw(Fault::UndefinedAccess(key.to_string())),
            _ => Completion::Normal(Value::Boolean(false)),
        }
    }

    /// `target.key(args)`: fetch and invoke in one step, with `target` as
    /// the receiver.
    pub fn call_method(
        &mut self,
        target: &Value,
        key: impl Into<Key>,
        args: &[Value],
    ) -> Completion {
        let key = key.into();
        let callee = match self.get_member(target, key.clone()) {
            Completion::Normal(v) => v,
            throw => return throw,
        };
        match callee {
            Value::Function(func) => self.call_function(&func, target.clone(), args),
            _ => Completion::Throw(Fault::NotCallable(key.to_string())),
        }
    }

    /// Invocation of a detached callable value: no receiver. A plain
    /// function that goes on to dereference its receiver faults at that
    /// point, not here.
    pub fn call_value(&mut self, callee: &Value, args: &[Value]) -> Completion {
        match callee {
            Value::Function(func) => self.call_function(func, Value::Undefined, args),
            _ => Completion::Throw(Fault::NotCallable(callee.type_name().to_string())),
        }
    }

    /// The single binding point: a captured receiver always wins, otherwise
    /// the caller-supplied one is used as-is.
    pub fn call_function(&mut self, func: &Function, receiver: Value, args: &[Value]) -> Completion {
        let this = match &func.captured_this {
            Some(captured) => (**captured).clone(),
            None => receiver,
        };
        let ctx = CallContext {
            this,
            home: func.home,
        };
        let body = func.body.clone();
        body(self, &ctx, args)
    }

    /// `super.name(args)` inside a method body: resolution starts above the
    /// *declaring* class carried by `ctx`, not the instance's own class,
    /// and runs with the current instance as receiver.
    pub fn call_super_method(&mut self, ctx: &CallContext, name: &str, args: &[Value]) -> Completion {
        let method = ctx.home.and_then(|home| self.resolve_super_method(home, name));
        match method {
            Some(func) => self.call_function(&func, ctx.this.clone(), args),
            None => Completion::Throw(Fault::NoSuperMethod(name.to_string())),
        }
    }
}
