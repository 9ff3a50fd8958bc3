//! Recursive tree-transform engine
//!
//! Flattening, deep transformation and array projection over nested
//! `serde_json` values. Every operation is a pure function of its input:
//! nothing is mutated except an explicit merge target, and no state
//! survives a call.
//!
//! Input is assumed to be a tree. Recursion depth follows input nesting.

pub mod walker;
pub mod flatten;
pub mod transform;
pub mod project;
pub mod extend;

pub use walker::{reparse_json, Budget, KeyPath, TreeWalker};
pub use flatten::{deep_flatten_object, flatten_value};
pub use transform::{
    deep_transform_object, deep_transform_object_with, transform_object, try_deep_transform_object,
    try_deep_transform_object_with, try_transform_object,
};
pub use project::{is_kept, transform_as_array, try_transform_as_array};
pub use extend::deep_extend;
