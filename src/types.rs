use crate::error::Fault;
use crate::runtime::{ClassId, PropertyStore, Runtime};
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

/// Any runtime value. Objects and functions are handles; comparing them
/// compares identity, everything else compares by value.
#[derive(Clone)]
pub enum Value {
    Undefined,
    Boolean(bool),
    Number(f64),
    String(String),
    Symbol(Symbol),
    Object(ObjRef),
    Function(Function),
}

impl Value {
    pub fn str(s: &str) -> Value {
        Value::String(s.to_string())
    }

    /// A fresh empty property bag, not tied to any class.
    pub fn object() -> Value {
        Value::Object(ObjRef::new())
    }

    pub fn object_from(entries: impl IntoIterator<Item = (Key, Value)>) -> Value {
        Value::Object(ObjRef::from_store(PropertyStore::from_entries(entries)))
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn as_object(&self) -> Option<&ObjRef> {
        if let Value::Object(obj) = self { Some(obj) } else { None }
    }

    pub fn as_function(&self) -> Option<&Function> {
        if let Value::Function(f) = self { Some(f) } else { None }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{}", number_to_string(*n)),
            Value::String(s) => write!(f, "{s}"),
            Value::Symbol(sym) => write!(f, "{sym}"),
            Value::Object(_) => write!(f, "[object Object]"),
            Value::Function(func) => write!(f, "[function {}]", func.name()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "Undefined"),
            Value::Boolean(b) => f.debug_tuple("Boolean").field(b).finish(),
            Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Symbol(sym) => f.debug_tuple("Symbol").field(&sym.to_string()).finish(),
            Value::Object(obj) => obj.fmt(f),
            Value::Function(func) => f.debug_tuple("Function").field(&func.name()).finish(),
        }
    }
}

/// Shortest round-trippable decimal form, with the usual special cases.
pub(crate) fn number_to_string(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x == 0.0 {
        return "0".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let mut buf = ryu_js::Buffer::new();
    buf.format(x).to_string()
}

/// Unique token usable as a property key. Identity is the id; the
/// description is diagnostic only. Minted by [`Runtime::symbol`].
#[derive(Clone, Debug)]
pub struct Symbol {
    id: u64,
    description: Option<String>,
}

impl Symbol {
    pub(crate) fn new(id: u64, description: Option<&str>) -> Symbol {
        Symbol {
            id,
            description: description.map(str::to_string),
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl std::hash::Hash for Symbol {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description.as_deref().unwrap_or(""))
    }
}

/// Property key: a string or a symbol token.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Str(String),
    Sym(Symbol),
}

impl From<&str> for Key {
    fn from(s: &str) -> Key {
        Key::Str(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Key {
        Key::Str(s)
    }
}

impl From<Symbol> for Key {
    fn from(sym: Symbol) -> Key {
        Key::Sym(sym)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Str(s) => write!(f, "{s}"),
            Key::Sym(sym) => write!(f, "{sym}"),
        }
    }
}

/// Backing state of one object: its property store plus, for class
/// instances, the class that constructed it. The class reference never
/// changes after construction.
#[derive(Debug)]
pub struct ObjectData {
    pub(crate) properties: PropertyStore,
    pub(crate) class: Option<ClassId>,
}

/// Shared handle to one object. Cloning the handle aliases the same bag;
/// copying the contents is what [`crate::runtime::merge`] is for.
#[derive(Clone)]
pub struct ObjRef(Rc<RefCell<ObjectData>>);

impl ObjRef {
    pub fn new() -> ObjRef {
        ObjRef::from_store(PropertyStore::new())
    }

    pub fn from_store(store: PropertyStore) -> ObjRef {
        ObjRef(Rc::new(RefCell::new(ObjectData {
            properties: store,
            class: None,
        })))
    }

    pub(crate) fn instance_of(class: ClassId) -> ObjRef {
        ObjRef(Rc::new(RefCell::new(ObjectData {
            properties: PropertyStore::new(),
            class: Some(class),
        })))
    }

    pub fn class(&self) -> Option<ClassId> {
        self.0.borrow().class
    }

    pub fn get(&self, key: impl Into<Key>) -> Value {
        self.0.borrow().properties.get(&key.into())
    }

    pub fn set(&self, key: impl Into<Key>, value: Value) {
        self.0.borrow_mut().properties.set(key.into(), value);
    }

    pub fn delete(&self, key: impl Into<Key>) -> bool {
        self.0.borrow_mut().properties.delete(&key.into())
    }

    pub fn has(&self, key: &Key) -> bool {
        self.0.borrow().properties.has(key)
    }

    pub fn len(&self) -> usize {
        self.0.borrow().properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().properties.is_empty()
    }

    pub fn keys(&self) -> Vec<Key> {
        self.0.borrow().properties.keys().cloned().collect()
    }

    pub fn values(&self) -> Vec<Value> {
        self.0.borrow().properties.values().cloned().collect()
    }

    pub fn borrow_store(&self) -> Ref<'_, PropertyStore> {
        Ref::map(self.0.borrow(), |data| &data.properties)
    }
}

impl Default for ObjRef {
    fn default() -> Self {
        ObjRef::new()
    }
}

impl PartialEq for ObjRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ObjRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(data) => f
                .debug_struct("ObjRef")
                .field("class", &data.class)
                .field("properties", &data.properties)
                .finish(),
            Err(_) => write!(f, "ObjRef(<borrowed>)"),
        }
    }
}

/// Body of every callable: field initializers, constructors and methods all
/// share this shape. The receiver arrives through the [`CallContext`], never
/// through the body's own captures, except for fixed-capture closures.
pub type NativeFn = Rc<dyn Fn(&mut Runtime, &CallContext, &[Value]) -> Completion>;

/// A callable value.
///
/// A plain function has no receiver of its own; whoever invokes it decides
/// what `this` is (see the call shapes on [`Runtime`]). A bound function
/// fixed its receiver when it was created and keeps it forever, no matter
/// how it is later detached or reattached.
#[derive(Clone)]
pub struct Function {
    name: String,
    pub(crate) body: NativeFn,
    pub(crate) captured_this: Option<Box<Value>>,
    pub(crate) home: Option<ClassId>,
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Function").field(&self.name).finish()
    }
}

impl Function {
    pub fn new<F>(name: &str, body: F) -> Function
    where
        F: Fn(&mut Runtime, &CallContext, &[Value]) -> Completion + 'static,
    {
        Function {
            name: name.to_string(),
            body: Rc::new(body),
            captured_this: None,
            home: None,
        }
    }

    /// Fixed-capture closure: `receiver` is the receiver at every future
    /// invocation, regardless of call shape.
    pub fn bound<F>(name: &str, receiver: Value, body: F) -> Function
    where
        F: Fn(&mut Runtime, &CallContext, &[Value]) -> Completion + 'static,
    {
        Function {
            name: name.to_string(),
            body: Rc::new(body),
            captured_this: Some(Box::new(receiver)),
            home: None,
        }
    }

    pub(crate) fn with_home(body: NativeFn, name: &str, home: ClassId) -> Function {
        Function {
            name: name.to_string(),
            body,
            captured_this: None,
            home: Some(home),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.body, &other.body)
            && self.home == other.home
            && self.captured_this == other.captured_this
    }
}

/// Per-invocation binding handed to every callable body: the resolved
/// receiver and, for class members, the declaring class (what `super`
/// dispatch starts from).
#[derive(Clone, Debug)]
pub struct CallContext {
    pub this: Value,
    pub home: Option<ClassId>,
}

/// Outcome of one evaluation step.
#[derive(Debug, PartialEq)]
pub enum Completion {
    Normal(Value),
    Throw(Fault),
}

impl Completion {
    pub fn into_result(self) -> Result<Value, Fault> {
        match self {
            Completion::Normal(v) => Ok(v),
            Completion::Throw(fault) => Err(fault),
        }
    }
}
