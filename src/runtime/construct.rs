//! Instance construction: field initializers run along the ancestor chain
//! from the root down, then the constructor chain runs. Parent constructor
//! *bodies* only run when a derived constructor explicitly asks for them.

use crate::error::Fault;
use crate::runtime::Runtime;
use crate::runtime::class::ClassId;
use crate::types::{CallContext, Completion, Key, NativeFn, ObjRef, Value};

impl Runtime {
    /// Builds a new instance of `class`.
    ///
    /// Field initializers run root-first with the fresh instance as
    /// receiver, so a derived initializer may read ancestor-initialized
    /// fields and may overwrite same-named ones. Afterwards the nearest
    /// constructor found from `class` upward runs with `args`; a class with
    /// no constructor anywhere in its chain still gets its fields.
    pub fn construct(&mut self, class: ClassId, args: &[Value]) -> Completion {
        let obj = ObjRef::instance_of(class);
        let instance = Value::Object(obj.clone());

        let mut chain = Vec::new();
        let mut cur = Some(class);
        while let Some(id) = cur {
            chain.push(id);
            cur = self.descriptor(id).parent;
        }

        for &level in chain.iter().rev() {
            let fields: Vec<(Key, NativeFn)> = self
                .descriptor(level)
                .fields
                .iter()
                .map(|(key, init)| (key.clone(), init.clone()))
                .collect();
            for (key, init) in fields {
                let ctx = CallContext {
                    this: instance.clone(),
                    home: Some(level),
                };
                match init(self, &ctx, &[]) {
                    Completion::Normal(value) => obj.set(key, value),
                    throw => return throw,
                }
            }
        }

        if let Some((level, ctor)) = self.nearest_constructor(class) {
            let ctx = CallContext {
                this: instance.clone(),
                home: Some(level),
            };
            if let Completion::Throw(fault) = ctor(self, &ctx, args) {
                return Completion::Throw(fault);
            }
        }

        Completion::Normal(instance)
    }

    /// Runs the nearest ancestor constructor body above the declaring class
    /// of `ctx`, with the current instance as receiver. With no ancestor
    /// constructor this is a no-op, mirroring an implicit empty parent
    /// constructor.
    pub fn call_super_constructor(&mut self, ctx: &CallContext, args: &[Value]) -> Completion {
        let Some(home) = ctx.home else {
            return Completion::Throw(Fault::NoSuperMethod("constructor".to_string()));
        };
        let Some(parent) = self.descriptor(home).parent else {
            return Completion::Throw(Fault::NoSuperMethod("constructor".to_string()));
        };
        match self.nearest_constructor(parent) {
            Some((level, ctor)) => {
                let parent_ctx = CallContext {
                    this: ctx.this.clone(),
                    home: Some(level),
                };
                match ctor(self, &parent_ctx, args) {
                    Completion::Normal(_) => Completion::Normal(Value::Undefined),
                    throw => throw,
                }
            }
            None => Completion::Normal(Value::Undefined),
        }
    }

    /// First constructor found walking from `from` to the root, together
    /// with the class that declares it (so its own super calls resolve from
    /// the right level).
    fn nearest_constructor(&self, from: ClassId) -> Option<(ClassId, NativeFn)> {
        let mut cur = Some(from);
        while let Some(id) = cur {
            let desc = self.descriptor(id);
            if let Some(ctor) = &desc.constructor {
                return Some((id, ctor.clone()));
            }
            cur = desc.parent;
        }
        None
    }
}
