//! Reflection contract consumed by the tree builder.
//!
//! Composite types describe themselves through [`Reflect`]: an ordered list of
//! [`FieldDescriptor`]s plus an accessor per field. Static types register a
//! [`Schema`] once (see [`reflect_gadget!`](crate::reflect_gadget)); dynamic
//! documents such as JSON implement [`Reflect`] directly.

use indexmap::IndexMap;
use std::borrow::Cow;
use std::fmt;

/// Declared kind of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Scalar,
    Bool,
    Enum,
    Composite,
    Sequence,
    Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: Cow<'static, str>,
    /// Computed or internal fields are not stored and never shown.
    pub stored: bool,
    pub kind: FieldKind,
    /// Name of the boolean field telling whether this one is meaningful.
    pub presence: Option<Cow<'static, str>>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<Cow<'static, str>>, kind: FieldKind) -> Self {
        FieldDescriptor {
            name: name.into(),
            stored: true,
            kind,
            presence: None,
        }
    }

    pub fn computed(mut self) -> Self {
        self.stored = false;
        self
    }

    pub fn with_presence(mut self, flag: impl Into<Cow<'static, str>>) -> Self {
        self.presence = Some(flag.into());
        self
    }
}

/// Symbolic names of an enumerated type, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumTable {
    type_name: Cow<'static, str>,
    names: IndexMap<i64, Cow<'static, str>>,
}

impl EnumTable {
    pub fn new(type_name: impl Into<Cow<'static, str>>) -> Self {
        EnumTable {
            type_name: type_name.into(),
            names: IndexMap::new(),
        }
    }

    pub fn variant(mut self, raw: i64, name: impl Into<Cow<'static, str>>) -> Self {
        self.names.insert(raw, name.into());
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn name_of(&self, raw: i64) -> Option<&str> {
        self.names.get(&raw).map(|name| &**name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// One reflected value, as read through a field accessor or a sequence.
#[derive(Clone)]
pub enum Value<'a> {
    Scalar(Cow<'a, str>),
    Bool(bool),
    Enum(i64, &'a EnumTable),
    Bytes(Cow<'a, [u8]>),
    Composite(&'a dyn Reflect),
    Sequence(&'a dyn ReflectSequence),
    /// A null composite or missing optional value, carrying its type name.
    Absent(Cow<'a, str>),
    /// A value without a string conversion, carrying its type name.
    Opaque(Cow<'a, str>),
}

impl<'a> Value<'a> {
    pub fn scalar(text: impl Into<Cow<'a, str>>) -> Self {
        Value::Scalar(text.into())
    }

    pub fn bytes(data: &'a [u8]) -> Self {
        Value::Bytes(Cow::Borrowed(data))
    }

    /// Kind of this value, as the builder sees it.
    pub fn kind(&self) -> FieldKind {
        match self {
            Value::Scalar(_) | Value::Absent(_) | Value::Opaque(_) => FieldKind::Scalar,
            Value::Bool(_) => FieldKind::Bool,
            Value::Enum(..) => FieldKind::Enum,
            Value::Bytes(_) => FieldKind::Bytes,
            Value::Composite(_) => FieldKind::Composite,
            Value::Sequence(_) => FieldKind::Sequence,
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(text) => f.debug_tuple("Scalar").field(text).finish(),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Enum(raw, table) => f
                .debug_tuple("Enum")
                .field(raw)
                .field(&table.type_name())
                .finish(),
            Value::Bytes(data) => f.debug_tuple("Bytes").field(&data.len()).finish(),
            Value::Composite(gadget) => f
                .debug_tuple("Composite")
                .field(&gadget.type_name())
                .finish(),
            Value::Sequence(seq) => f
                .debug_struct("Sequence")
                .field("type_name", &seq.type_name())
                .field("len", &seq.len())
                .finish(),
            Value::Absent(type_name) => f.debug_tuple("Absent").field(type_name).finish(),
            Value::Opaque(type_name) => f.debug_tuple("Opaque").field(type_name).finish(),
        }
    }
}

/// A composite value that can enumerate and read its own fields.
pub trait Reflect {
    fn type_name(&self) -> Cow<'_, str>;

    /// Field descriptors in declaration order.
    fn fields(&self) -> Cow<'_, [FieldDescriptor]>;

    /// Reads the field at `index` of [`Reflect::fields`].
    fn read(&self, index: usize) -> Value<'_>;

    /// Reads every field, index for index with [`Reflect::fields`].
    fn read_all(&self) -> Vec<Value<'_>> {
        (0..self.fields().len()).map(|index| self.read(index)).collect()
    }
}

/// A repeated value whose elements are read by index.
pub trait ReflectSequence {
    fn type_name(&self) -> Cow<'_, str>;

    fn len(&self) -> usize;

    fn element_at(&self, index: usize) -> Value<'_>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Conversion of a sequence element (or any field type) into a [`Value`].
pub trait Reflected {
    fn reflected_type_name() -> Cow<'static, str>
    where
        Self: Sized;

    fn to_value(&self) -> Value<'_>;
}

macro_rules! reflected_display {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Reflected for $ty {
                fn reflected_type_name() -> Cow<'static, str> {
                    Cow::Borrowed($name)
                }

                fn to_value(&self) -> Value<'_> {
                    Value::Scalar(Cow::Owned(self.to_string()))
                }
            }
        )*
    };
}

reflected_display! {
    i8 => "i8", i16 => "i16", i32 => "i32", i64 => "i64",
    u16 => "u16", u32 => "u32", u64 => "u64", usize => "usize",
    f32 => "f32", f64 => "f64", char => "char",
}

impl Reflected for bool {
    fn reflected_type_name() -> Cow<'static, str> {
        Cow::Borrowed("bool")
    }

    fn to_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl Reflected for String {
    fn reflected_type_name() -> Cow<'static, str> {
        Cow::Borrowed("String")
    }

    fn to_value(&self) -> Value<'_> {
        Value::Scalar(Cow::Borrowed(self))
    }
}

impl<T: Reflected> Reflected for Option<T> {
    fn reflected_type_name() -> Cow<'static, str> {
        T::reflected_type_name()
    }

    fn to_value(&self) -> Value<'_> {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Absent(T::reflected_type_name()),
        }
    }
}

impl<T: Reflected> Reflected for Vec<T> {
    fn reflected_type_name() -> Cow<'static, str> {
        Cow::Owned(format!("Vec<{}>", T::reflected_type_name()))
    }

    fn to_value(&self) -> Value<'_> {
        Value::Sequence(self)
    }
}

impl<T: Reflected> ReflectSequence for Vec<T> {
    fn type_name(&self) -> Cow<'_, str> {
        <Vec<T> as Reflected>::reflected_type_name()
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn element_at(&self, index: usize) -> Value<'_> {
        match self.get(index) {
            Some(element) => element.to_value(),
            None => Value::Absent(T::reflected_type_name()),
        }
    }
}

type Accessor<T> = for<'a> fn(&'a T) -> Value<'a>;

/// Ordered field table of a static composite type.
pub struct Schema<T> {
    type_name: &'static str,
    descriptors: Vec<FieldDescriptor>,
    accessors: Vec<Accessor<T>>,
}

impl<T> Schema<T> {
    /// Starts a schema for `T`. Name `T` up front so the accessor closures
    /// can be typed:
    ///
    /// ```
    /// use workbench_inspect::schema::{Schema, Value};
    ///
    /// struct Seat {
    ///     number: String,
    ///     reserved: bool,
    /// }
    ///
    /// let schema = Schema::<Seat>::builder("Seat")
    ///     .scalar("number", |seat| Value::scalar(seat.number.as_str()))
    ///     .boolean("reserved", |seat| Value::Bool(seat.reserved))
    ///     .build();
    ///
    /// assert_eq!(schema.descriptors().len(), 2);
    /// ```
    pub fn builder(type_name: &'static str) -> SchemaBuilder<T> {
        SchemaBuilder {
            schema: Schema {
                type_name,
                descriptors: Vec::new(),
                accessors: Vec::new(),
            },
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn descriptors(&self) -> &[FieldDescriptor] {
        &self.descriptors
    }

    pub fn read<'a>(&self, gadget: &'a T, index: usize) -> Value<'a> {
        match self.accessors.get(index) {
            Some(accessor) => accessor(gadget),
            None => Value::Opaque(Cow::Borrowed(self.type_name)),
        }
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("type_name", &self.type_name)
            .field("descriptors", &self.descriptors)
            .finish()
    }
}

pub struct SchemaBuilder<T> {
    schema: Schema<T>,
}

impl<T> SchemaBuilder<T> {
    pub fn field(mut self, descriptor: FieldDescriptor, accessor: Accessor<T>) -> Self {
        self.schema.descriptors.push(descriptor);
        self.schema.accessors.push(accessor);
        self
    }

    pub fn scalar(self, name: &'static str, accessor: Accessor<T>) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::Scalar), accessor)
    }

    pub fn boolean(self, name: &'static str, accessor: Accessor<T>) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::Bool), accessor)
    }

    pub fn enumeration(self, name: &'static str, accessor: Accessor<T>) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::Enum), accessor)
    }

    pub fn composite(self, name: &'static str, accessor: Accessor<T>) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::Composite), accessor)
    }

    pub fn sequence(self, name: &'static str, accessor: Accessor<T>) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::Sequence), accessor)
    }

    pub fn bytes(self, name: &'static str, accessor: Accessor<T>) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::Bytes), accessor)
    }

    pub fn build(self) -> Schema<T> {
        self.schema
    }
}

/// Implements [`Reflect`] and [`Reflected`] for a type backed by a static
/// [`Schema`], usually a `once_cell::sync::Lazy`.
#[macro_export]
macro_rules! reflect_gadget {
    ($ty:ty, $schema:expr) => {
        impl $crate::schema::Reflect for $ty {
            fn type_name(&self) -> ::std::borrow::Cow<'_, str> {
                ::std::borrow::Cow::Borrowed($schema.type_name())
            }

            fn fields(&self) -> ::std::borrow::Cow<'_, [$crate::schema::FieldDescriptor]> {
                ::std::borrow::Cow::Borrowed($schema.descriptors())
            }

            fn read(&self, index: usize) -> $crate::schema::Value<'_> {
                $schema.read(self, index)
            }
        }

        impl $crate::schema::Reflected for $ty {
            fn reflected_type_name() -> ::std::borrow::Cow<'static, str> {
                ::std::borrow::Cow::Borrowed($schema.type_name())
            }

            fn to_value(&self) -> $crate::schema::Value<'_> {
                $crate::schema::Value::Composite(self)
            }
        }
    };
}
