//! Field descriptors for bindable records.
//!
//! Records describe their own fields through [`Bindable`]; the binder walks
//! the resulting descriptor list instead of reflecting over the type at
//! runtime.

use std::fmt;

/// A record whose fields can be bound from a source mapping.
///
/// Implemented by hand per record type:
///
/// ```
/// use vaultbind::{Bindable, Field};
///
/// #[derive(Default)]
/// struct DbConfig {
///     host: String,
///     port: u16,
/// }
///
/// impl Bindable for DbConfig {
///     fn fields(&mut self) -> Vec<Field<'_>> {
///         vec![
///             Field::string("host", &mut self.host).annotated("vault", "db_host"),
///             Field::opaque("port", "u16"),
///         ]
///     }
/// }
/// ```
pub trait Bindable {
    /// Describes the record's fields, in declared order.
    ///
    /// Descriptors borrow the record mutably; each call rebuilds the list.
    fn fields(&mut self) -> Vec<Field<'_>>;
}

/// Where a field's value lives, and what kind of value it is.
///
/// Also serves as the dynamic handle passed to [`bind()`](crate::bind()): the
/// top-level target must be a [`Slot::Record`] or a present
/// [`Slot::RecordRef`], anything else is rejected as an invalid target.
pub enum Slot<'a> {
    /// A string leaf, directly assignable.
    Str(&'a mut String),
    /// A nested record held by value; always walked.
    Record(&'a mut dyn Bindable),
    /// A nested record behind an optional indirection; walked only when
    /// present. The binder never allocates an absent one.
    RecordRef(Option<&'a mut dyn Bindable>),
    /// A leaf of a type the binder cannot assign to.
    Opaque {
        /// Declared type name, reported when an annotated opaque leaf's key
        /// resolves to a value.
        type_name: &'static str,
    },
}

impl Slot<'_> {
    pub(crate) fn describe(&self) -> &'static str {
        match self {
            Slot::Str(_) => "a plain string value",
            Slot::Record(_) => "a record",
            Slot::RecordRef(Some(_)) => "a record reference",
            Slot::RecordRef(None) => "an absent record reference",
            Slot::Opaque { type_name } => type_name,
        }
    }
}

impl fmt::Debug for Slot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Str(value) => f.debug_tuple("Str").field(value).finish(),
            Slot::Opaque { type_name } => {
                f.debug_struct("Opaque").field("type_name", type_name).finish()
            }
            other => f.write_str(other.describe()),
        }
    }
}

impl<'a, T: Bindable> From<&'a mut T> for Slot<'a> {
    fn from(record: &'a mut T) -> Self {
        Slot::Record(record)
    }
}

impl<'a> From<&'a mut dyn Bindable> for Slot<'a> {
    fn from(record: &'a mut dyn Bindable) -> Self {
        Slot::Record(record)
    }
}

/// Whether a field is part of the record's public surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    /// Never touched by the binder, annotated or not.
    Private,
}

/// A named annotation on a field, pairing an annotation name (e.g. `"vault"`)
/// with the lookup key consulted in the source mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Annotation {
    pub name: &'static str,
    pub key: &'static str,
}

/// A single field descriptor: name, visibility, annotations, and the slot
/// holding the field's value.
#[derive(Debug)]
pub struct Field<'a> {
    name: &'static str,
    visibility: Visibility,
    annotations: Vec<Annotation>,
    pub(crate) slot: Slot<'a>,
}

impl<'a> Field<'a> {
    fn new(name: &'static str, slot: Slot<'a>) -> Self {
        Self {
            name,
            visibility: Visibility::Public,
            annotations: Vec::new(),
            slot,
        }
    }

    /// A string leaf field.
    pub fn string(name: &'static str, value: &'a mut String) -> Self {
        Self::new(name, Slot::Str(value))
    }

    /// A nested record held by value.
    pub fn record<T: Bindable>(name: &'static str, value: &'a mut T) -> Self {
        Self::new(name, Slot::Record(value))
    }

    /// A nested record behind an optional indirection, e.g. an
    /// `Option<Box<T>>` field registered via `as_deref_mut()`.
    pub fn record_ref<T: Bindable>(name: &'static str, value: Option<&'a mut T>) -> Self {
        Self::new(
            name,
            Slot::RecordRef(value.map(|record| record as &mut dyn Bindable)),
        )
    }

    /// A leaf of a type the binder cannot assign to. `type_name` is the
    /// declared type, used in error reporting.
    pub fn opaque(name: &'static str, type_name: &'static str) -> Self {
        Self::new(name, Slot::Opaque { type_name })
    }

    /// Attaches an annotation. An empty `key` marks the field not bindable
    /// under that annotation name.
    pub fn annotated(mut self, name: &'static str, key: &'static str) -> Self {
        self.annotations.push(Annotation { name, key });
        self
    }

    /// Marks the field private.
    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// The lookup key declared under `annotation`, if any. Empty keys count
    /// as no annotation.
    pub fn annotation_key(&self, annotation: &str) -> Option<&'static str> {
        self.annotations
            .iter()
            .find(|a| a.name == annotation)
            .map(|a| a.key)
            .filter(|key| !key.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_key_selects_by_name() {
        let mut value = String::new();
        let field = Field::string("endpoint", &mut value)
            .annotated("vault", "svc_endpoint")
            .annotated("secret", "endpoint");

        assert_eq!(field.annotation_key("vault"), Some("svc_endpoint"));
        assert_eq!(field.annotation_key("secret"), Some("endpoint"));
        assert_eq!(field.annotation_key("env"), None);
    }

    #[test]
    fn test_empty_annotation_key_counts_as_unannotated() {
        let mut value = String::new();
        let field = Field::string("endpoint", &mut value).annotated("vault", "");

        assert_eq!(field.annotation_key("vault"), None);
    }

    #[test]
    fn test_fields_default_to_public() {
        let mut value = String::new();
        assert_eq!(
            Field::string("endpoint", &mut value).visibility(),
            Visibility::Public
        );

        let mut value = String::new();
        assert_eq!(
            Field::string("endpoint", &mut value).private().visibility(),
            Visibility::Private
        );
    }
}
