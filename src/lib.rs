//! dynobj - a minimal embeddable dynamic object/class runtime
//!
//! The crate models ordered, mutable property bags, structural merge and
//! destructuring over them, single-inheritance classes with field
//! initializers and explicit super dispatch, and receiver ("this")
//! resolution that depends on how a callable is invoked rather than where
//! it was defined.
//!
//! # Example
//! ```
//! use dynobj::{ClassDef, Completion, Runtime, Value};
//!
//! let mut rt = Runtime::new();
//! let animal = rt
//!     .define(ClassDef::new("Animal").method("speak", |rt, ctx, _args| {
//!         let name = match rt.get_member(&ctx.this, "name") {
//!             Completion::Normal(v) => v,
//!             throw => return throw,
//!         };
//!         Completion::Normal(Value::String(format!("{name} makes noise")))
//!     }))
//!     .unwrap();
//!
//! let pet = rt.construct(animal, &[]).into_result().unwrap();
//! rt.set_member(&pet, "name", Value::str("skipper"));
//! let said = rt.call_method(&pet, "speak", &[]).into_result().unwrap();
//! assert_eq!(said, Value::str("skipper makes noise"));
//! ```

pub mod error;
pub mod runtime;
pub mod types;

pub use error::{DefineError, Fault};
pub use runtime::{
    ClassDef, ClassId, PropertyStore, Runtime, computed_entry, destructure, destructure_store,
    merge, merge_stores,
};
pub use types::{CallContext, Completion, Function, Key, NativeFn, ObjRef, Symbol, Value};
