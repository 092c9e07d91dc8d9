//! The binder: walks a record's field descriptors and assigns values looked
//! up from a source mapping.

use crate::error::BindError;
use crate::field::{Bindable, Slot, Visibility};
use crate::value::{SourceMap, Value};

/// Annotation name consulted when [`BindOptions::annotation`] is left empty.
pub const DEFAULT_ANNOTATION: &str = "vault";

/// Options for a single [`bind_with`] call.
#[derive(Debug, Clone)]
pub struct BindOptions {
    /// Annotation name that marks bindable leaf fields. An empty string
    /// falls back to [`DEFAULT_ANNOTATION`].
    pub annotation: String,
}

impl Default for BindOptions {
    fn default() -> Self {
        Self {
            annotation: DEFAULT_ANNOTATION.to_string(),
        }
    }
}

impl BindOptions {
    fn annotation_name(&self) -> &str {
        if self.annotation.is_empty() {
            DEFAULT_ANNOTATION
        } else {
            &self.annotation
        }
    }
}

/// Binds annotated fields of `target` from `source` with default options.
///
/// Walks the record's fields in declared order: private fields are skipped,
/// nested records are recursed into (by-reference ones only when present),
/// and each string leaf carrying a `"vault"` annotation is assigned the value
/// looked up at its key. Keys that are absent from `source`, or present with
/// an explicit null, leave the field unchanged — sparse mappings can fill a
/// record progressively across several calls. Non-string looked-up values
/// are assigned their textual rendition.
///
/// The walk mutates the record directly with no internal locking; concurrent
/// binds against the same record must be synchronized by the caller.
///
/// ## Example
///
/// ```
/// use vaultbind::{bind, Bindable, Field, SourceMap};
///
/// #[derive(Default)]
/// struct Credentials {
///     username: String,
///     password: String,
/// }
///
/// impl Bindable for Credentials {
///     fn fields(&mut self) -> Vec<Field<'_>> {
///         vec![
///             Field::string("username", &mut self.username).annotated("vault", "username"),
///             Field::string("password", &mut self.password).annotated("vault", "password"),
///         ]
///     }
/// }
///
/// let mut creds = Credentials::default();
/// let mut source = SourceMap::new();
/// source.insert("username", "admin");
/// source.insert("password", "secret123");
///
/// bind(&mut creds, &source)?;
///
/// assert_eq!(creds.username, "admin");
/// assert_eq!(creds.password, "secret123");
/// # Ok::<(), vaultbind::BindError>(())
/// ```
pub fn bind<'a>(target: impl Into<Slot<'a>>, source: &SourceMap) -> Result<(), BindError> {
    bind_with(target, source, &BindOptions::default())
}

/// Binds annotated fields of `target` from `source`.
///
/// Like [`bind`], but the annotation name consulted on each field is taken
/// from `options`, so the same record can be bound from differently tagged
/// annotation sets:
///
/// ```
/// use vaultbind::{bind_with, Bindable, BindOptions, Field, SourceMap};
///
/// #[derive(Default)]
/// struct Service {
///     endpoint: String,
/// }
///
/// impl Bindable for Service {
///     fn fields(&mut self) -> Vec<Field<'_>> {
///         vec![Field::string("endpoint", &mut self.endpoint).annotated("secret", "svc_endpoint")]
///     }
/// }
///
/// let mut service = Service::default();
/// let mut source = SourceMap::new();
/// source.insert("svc_endpoint", "https://internal.example");
///
/// let options = BindOptions {
///     annotation: "secret".into(),
/// };
/// bind_with(&mut service, &source, &options)?;
///
/// assert_eq!(service.endpoint, "https://internal.example");
/// # Ok::<(), vaultbind::BindError>(())
/// ```
///
/// ## Errors
///
/// [`BindError::InvalidTarget`] if `target` is not a record or a present
/// record reference; nothing is mutated. [`BindError::UnsupportedFieldType`]
/// if an annotated non-string leaf's key resolves to a non-null value; the
/// walk halts there and fields already assigned keep their new values.
pub fn bind_with<'a>(
    target: impl Into<Slot<'a>>,
    source: &SourceMap,
    options: &BindOptions,
) -> Result<(), BindError> {
    let record = match target.into() {
        Slot::Record(record) => record,
        Slot::RecordRef(Some(record)) => record,
        slot => return Err(BindError::InvalidTarget(slot.describe())),
    };
    bind_record(record, source, options.annotation_name())
}

fn bind_record(
    record: &mut dyn Bindable,
    source: &SourceMap,
    annotation: &str,
) -> Result<(), BindError> {
    for field in record.fields() {
        if field.visibility() == Visibility::Private {
            continue;
        }

        let name = field.name();
        let key = field.annotation_key(annotation);

        match field.slot {
            Slot::Record(nested) => bind_record(nested, source, annotation)?,
            Slot::RecordRef(Some(nested)) => bind_record(nested, source, annotation)?,
            Slot::RecordRef(None) => {}
            Slot::Str(value) => {
                if let Some(found) = key.and_then(|k| lookup(source, k)) {
                    assign(value, found);
                }
            }
            Slot::Opaque { type_name } => {
                if key.and_then(|k| lookup(source, k)).is_some() {
                    return Err(BindError::UnsupportedFieldType { field: name, type_name });
                }
            }
        }
    }

    Ok(())
}

/// Absent keys and explicit nulls are the designed no-op path; both leave
/// the field untouched.
fn lookup<'v>(source: &'v SourceMap, key: &str) -> Option<&'v Value> {
    source.get(key).filter(|value| !value.is_null())
}

fn assign(slot: &mut String, value: &Value) {
    match value {
        Value::String(s) => *slot = s.clone(),
        other => *slot = other.to_string(),
    }
}
