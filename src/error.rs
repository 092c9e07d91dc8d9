use thiserror::Error;

/// Errors surfaced by [`bind()`](crate::bind()) and [`bind_with()`](crate::bind_with()).
///
/// Both variants are terminal for the call: fields assigned before the
/// failure keep their new values.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BindError {
    /// The top-level target was not a writable record reference. The payload
    /// describes what was passed instead.
    #[error("bind target must be a mutable record reference, got {0}")]
    InvalidTarget(&'static str),

    /// An annotated leaf field's declared type cannot hold the looked-up
    /// value.
    #[error("field '{field}' has unsupported type {type_name}")]
    UnsupportedFieldType {
        field: &'static str,
        type_name: &'static str,
    },
}
