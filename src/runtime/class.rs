use crate::error::DefineError;
use crate::runtime::Runtime;
use crate::types::{CallContext, Completion, Function, Key, NativeFn, Value};
use rustc_hash::FxHashMap;
use std::rc::Rc;

/// Handle to a registered (or forward-declared) class. Copyable and usable
/// as an ordinary value: pass it around, store it, construct from it later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClassId(u32);

/// One slot in the runtime's class table. Forward declarations reserve a
/// slot with no descriptor; resolving through such a slot is a programmer
/// error and panics.
pub(crate) struct ClassSlot {
    pub(crate) name: String,
    pub(crate) desc: Option<ClassDescriptor>,
}

pub(crate) struct ClassDescriptor {
    pub(crate) fields: Vec<(Key, NativeFn)>,
    pub(crate) methods: FxHashMap<String, Function>,
    pub(crate) constructor: Option<NativeFn>,
    pub(crate) parent: Option<ClassId>,
}

/// Builder for a class definition: ordered field initializers, a method
/// table, an optional constructor and an optional single parent.
pub struct ClassDef {
    name: String,
    parent: Option<ClassId>,
    fields: Vec<(Key, NativeFn)>,
    methods: Vec<(String, NativeFn)>,
    constructor: Option<NativeFn>,
}

impl ClassDef {
    pub fn new(name: &str) -> ClassDef {
        ClassDef {
            name: name.to_string(),
            parent: None,
            fields: Vec::new(),
            methods: Vec::new(),
            constructor: None,
        }
    }

    pub fn extends(mut self, parent: ClassId) -> ClassDef {
        self.parent = Some(parent);
        self
    }

    /// Field initializer, run at construction time with the new instance as
    /// receiver. Initializers run in declaration order, ancestors first.
    pub fn field<F>(mut self, key: impl Into<Key>, init: F) -> ClassDef
    where
        F: Fn(&mut Runtime, &CallContext, &[Value]) -> Completion + 'static,
    {
        self.fields.push((key.into(), Rc::new(init)));
        self
    }

    pub fn method<F>(mut self, name: &str, body: F) -> ClassDef
    where
        F: Fn(&mut Runtime, &CallContext, &[Value]) -> Completion + 'static,
    {
        self.methods.push((name.to_string(), Rc::new(body)));
        self
    }

    pub fn constructor<F>(mut self, body: F) -> ClassDef
    where
        F: Fn(&mut Runtime, &CallContext, &[Value]) -> Completion + 'static,
    {
        self.constructor = Some(Rc::new(body));
        self
    }
}

impl Runtime {
    /// Reserves a class handle without defining it yet, so definitions may
    /// reference classes that are filled in later.
    pub fn declare(&mut self, name: &str) -> ClassId {
        let id = ClassId(self.classes.len() as u32);
        self.classes.push(ClassSlot {
            name: name.to_string(),
            desc: None,
        });
        id
    }

    /// Declares and defines in one step.
    pub fn define(&mut self, def: ClassDef) -> Result<ClassId, DefineError> {
        let id = self.declare(&def.name);
        match self.define_declared(id, def) {
            Ok(()) => Ok(id),
            Err(e) => {
                self.classes.pop();
                Err(e)
            }
        }
    }

    /// Completes a forward declaration. Fails if the slot is already defined
    /// or if the parent chain would loop back through the class being
    /// defined; a failed definition is never stored.
    pub fn define_declared(&mut self, id: ClassId, def: ClassDef) -> Result<(), DefineError> {
        if self.slot(id).desc.is_some() {
            return Err(DefineError::AlreadyDefined(self.slot(id).name.clone()));
        }
        self.check_ancestry(id, def.parent, &def.name)?;

        let mut methods = FxHashMap::default();
        for (name, body) in def.methods {
            methods.insert(name.clone(), Function::with_home(body, &name, id));
        }
        let slot = &mut self.classes[id.0 as usize];
        slot.name = def.name;
        slot.desc = Some(ClassDescriptor {
            fields: def.fields,
            methods,
            constructor: def.constructor,
            parent: def.parent,
        });
        Ok(())
    }

    /// Walks the prospective parent chain. The walk stops at a
    /// not-yet-defined ancestor; a loop that would close through such a slot
    /// is caught when that slot itself is defined.
    fn check_ancestry(
        &self,
        id: ClassId,
        parent: Option<ClassId>,
        name: &str,
    ) -> Result<(), DefineError> {
        let mut seen = Vec::new();
        let mut cur = parent;
        while let Some(ancestor) = cur {
            if ancestor == id || seen.contains(&ancestor) {
                return Err(DefineError::CyclicInheritance(name.to_string()));
            }
            seen.push(ancestor);
            cur = match &self.slot(ancestor).desc {
                Some(desc) => desc.parent,
                None => None,
            };
        }
        Ok(())
    }

    pub fn class_name(&self, id: ClassId) -> &str {
        &self.slot(id).name
    }

    /// Dynamic dispatch: first match walking from `class` to the root. The
    /// returned function remembers its declaring class for super dispatch.
    pub fn resolve_method(&self, class: ClassId, name: &str) -> Option<Function> {
        let mut cur = Some(class);
        while let Some(id) = cur {
            let desc = self.descriptor(id);
            if let Some(method) = desc.methods.get(name) {
                return Some(method.clone());
            }
            cur = desc.parent;
        }
        None
    }

    /// Explicit parent dispatch: same walk, but starting above `declaring`.
    /// Looking up from the declaring class rather than the instance's class
    /// is what lets an override chain compose instead of re-dispatching to
    /// itself.
    pub fn resolve_super_method(&self, declaring: ClassId, name: &str) -> Option<Function> {
        self.descriptor(declaring)
            .parent
            .and_then(|parent| self.resolve_method(parent, name))
    }

    /// True iff `value` is an object constructed from `class` or one of its
    /// descendants.
    pub fn is_instance(&self, value: &Value, class: ClassId) -> bool {
        let Some(obj) = value.as_object() else {
            return false;
        };
        let mut cur = obj.class();
        while let Some(id) = cur {
            if id == class {
                return true;
            }
            cur = self.descriptor(id).parent;
        }
        false
    }

    fn slot(&self, id: ClassId) -> &ClassSlot {
        &self.classes[id.0 as usize]
    }

    pub(crate) fn descriptor(&self, id: ClassId) -> &ClassDescriptor {
        let slot = self.slot(id);
        slot.desc
            .as_ref()
            .unwrap_or_else(|| panic!("class '{}' was declared but never defined", slot.name))
    }
}
