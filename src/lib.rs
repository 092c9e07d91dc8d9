//! Bind annotated fields of nested configuration records from a flat
//! key/value mapping, e.g. the payload of a secret-store read.
//!
//! See [`bind()`] for the full walkthrough.

mod bind;
mod error;
mod field;
mod value;

pub use bind::{bind, bind_with, BindOptions, DEFAULT_ANNOTATION};
pub use error::BindError;
pub use field::{Annotation, Bindable, Field, Slot, Visibility};
pub use value::{SourceMap, Value};
