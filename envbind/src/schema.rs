//! Explicit record schemas
//!
//! A record describes its fields with a static table of [`FieldDescriptor`]s
//! and hands out a typed [`Slot`] for each of them. `#[derive(EnvBind)]`
//! generates both; hand-written implementations are possible as well.

use std::time::Duration;

/// Name, type and annotation metadata of one record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field identifier
    pub name: &'static str,
    /// Static type of the field, as written in the record
    pub type_name: &'static str,
    /// Raw annotation key: `NAME[,option...]`
    pub key: &'static str,
    /// Default source value, empty for none
    pub default: &'static str,
    /// Separator for sequence fields, empty for `,`
    pub separator: &'static str,
    /// Whether the binder may write the field's own value
    pub settable: bool,
}

impl FieldDescriptor {
    /// Descriptor for a settable field without annotations.
    pub const fn new(name: &'static str, type_name: &'static str) -> Self {
        Self {
            name,
            type_name,
            key: "",
            default: "",
            separator: "",
            settable: true,
        }
    }

    /// Set the raw annotation key.
    pub const fn key(mut self, key: &'static str) -> Self {
        self.key = key;
        self
    }

    /// Set the default source value.
    pub const fn default_value(mut self, default: &'static str) -> Self {
        self.default = default;
        self
    }

    /// Set the sequence separator.
    pub const fn separator(mut self, separator: &'static str) -> Self {
        self.separator = separator;
        self
    }

    /// Mark the field as not settable.
    pub const fn skipped(mut self) -> Self {
        self.settable = false;
        self
    }

    /// Environment variable name, i.e. the key without its options.
    pub fn env_name(&self) -> &'static str {
        self.split_key().0
    }

    /// Split the raw key into the variable name and its option tokens.
    pub fn split_key(&self) -> (&'static str, impl Iterator<Item = &'static str>) {
        let mut parts = self.key.split(',');
        let name = parts.next().unwrap_or_default();
        (name, parts)
    }

    /// Separator used for sequence fields.
    pub fn effective_separator(&self) -> &'static str {
        if self.separator.is_empty() {
            ","
        } else {
            self.separator
        }
    }
}

/// A structured value whose fields can be bound.
pub trait Record {
    /// Field descriptors in declaration order.
    fn fields(&self) -> &'static [FieldDescriptor];

    /// Storage slot of the field at `index` in [`Record::fields`].
    fn field_slot(&mut self, index: usize) -> Slot<'_>;

    /// Build `Self::default()` and bind it from the process environment.
    ///
    /// # Errors
    ///
    /// - Required environment variables are not set
    /// - Environment variable values cannot be converted into field types
    /// - Annotation keys carry unsupported options
    fn from_env() -> anyhow::Result<Self>
    where
        Self: Default + Sized,
    {
        let mut record = Self::default();
        crate::Binder::new().bind_record(&mut record)?;
        Ok(record)
    }
}

/// Mutable handle to one field's storage, tagged by conversion kind.
pub enum Slot<'a> {
    Str(&'a mut String),
    Bool(&'a mut bool),
    Int(&'a mut i32),
    Uint(&'a mut u32),
    Int64(&'a mut i64),
    Float32(&'a mut f32),
    Float64(&'a mut f64),
    Duration(&'a mut Duration),
    Seq(SeqSlot<'a>),
    /// Nested record held by value
    Record(&'a mut dyn Record),
    /// Nested record behind an owning pointer; `None` when the pointer is null
    Owned(Option<&'a mut dyn Record>),
    /// A type without a conversion rule
    Unsupported,
}

impl Slot<'_> {
    /// Whether the slot holds a nested record by value.
    pub fn is_record(&self) -> bool {
        matches!(self, Slot::Record(_))
    }
}

/// Mutable handle to a sequence field, tagged by element kind.
pub enum SeqSlot<'a> {
    Str(&'a mut Vec<String>),
    Int(&'a mut Vec<i32>),
    Int64(&'a mut Vec<i64>),
    Float32(&'a mut Vec<f32>),
    Float64(&'a mut Vec<f64>),
    Bool(&'a mut Vec<bool>),
    Unsupported,
}

/// A type that can be stored in a record field.
pub trait Field {
    fn slot(&mut self) -> Slot<'_>;
}

/// A type that can be an element of a sequence field.
pub trait SeqElement: Sized {
    fn seq_slot(items: &mut Vec<Self>) -> SeqSlot<'_>;
}

macro_rules! impl_field {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Field for $ty {
                fn slot(&mut self) -> Slot<'_> {
                    Slot::$variant(self)
                }
            }
        )*
    };
}

impl_field! {
    String => Str,
    bool => Bool,
    i32 => Int,
    u32 => Uint,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
    Duration => Duration,
}

macro_rules! impl_unsupported_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Field for $ty {
                fn slot(&mut self) -> Slot<'_> {
                    Slot::Unsupported
                }
            }
        )*
    };
}

impl_unsupported_field!(i8, i16, isize, u8, u16, u64, usize, char);

macro_rules! impl_seq_element {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl SeqElement for $ty {
                fn seq_slot(items: &mut Vec<Self>) -> SeqSlot<'_> {
                    SeqSlot::$variant(items)
                }
            }
        )*
    };
}

impl_seq_element! {
    String => Str,
    i32 => Int,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
    bool => Bool,
}

macro_rules! impl_unsupported_seq_element {
    ($($ty:ty),* $(,)?) => {
        $(
            impl SeqElement for $ty {
                fn seq_slot(_: &mut Vec<Self>) -> SeqSlot<'_> {
                    SeqSlot::Unsupported
                }
            }
        )*
    };
}

impl_unsupported_seq_element!(i8, i16, isize, u8, u16, u32, u64, usize, char, Duration);

impl<T: SeqElement> Field for Vec<T> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Seq(T::seq_slot(self))
    }
}

impl<R: Record> Field for Box<R> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Owned(Some(&mut **self as &mut dyn Record))
    }
}

impl<R: Record> Field for Option<Box<R>> {
    fn slot(&mut self) -> Slot<'_> {
        match self {
            Some(record) => Slot::Owned(Some(&mut **record as &mut dyn Record)),
            None => Slot::Owned(None),
        }
    }
}
