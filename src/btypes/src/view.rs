//! Typed memory views
//!
//! A [`View`] overlays a [`ResolvedLayout`] on an address in host memory.
//! Views never own or copy the memory they describe: every read goes to the
//! [`MemorySource`] and every write lands immediately. Several views may
//! alias the same address.

use crate::error::{Error, MemoryError, Result};
use crate::layout::{ConcreteType, LayoutTable, Pointee, ResolvedField, ResolvedLayout};
use crate::listbase::ListBase;
use crate::memory::MemorySource;
use crate::registry;
use crate::schema::Scalar;
use crate::value::{self, Value};

use std::fmt;

/// Longest string read through a `char*` field
pub const MAX_CSTRING_LEN: usize = 4096;

/// 2^64, the first integral `f64` past `u64::MAX`
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// An object of the host's scripting layer that can expose a raw address
pub trait HostHandle {
    /// Address of the underlying host struct, if the object has one
    fn as_pointer(&self) -> Option<usize>;

    /// Name used in error messages
    fn kind(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl HostHandle for usize {
    fn as_pointer(&self) -> Option<usize> {
        Some(*self)
    }

    fn kind(&self) -> &str {
        "address"
    }
}

impl HostHandle for Option<usize> {
    fn as_pointer(&self) -> Option<usize> {
        *self
    }

    fn kind(&self) -> &str {
        "optional address"
    }
}

/// A typed wrapper bound to one schema
pub trait HostStruct<'m>: Sized {
    const SCHEMA: &'static str;

    fn from_view(view: View<'m>) -> Self;

    fn view(&self) -> &View<'m>;
}

/// Memory source and layout table that views are created against
#[derive(Clone, Copy)]
pub struct Binding<'m> {
    memory: &'m dyn MemorySource,
    layouts: &'m LayoutTable,
}

impl<'m> Binding<'m> {
    pub fn new(memory: &'m dyn MemorySource, layouts: &'m LayoutTable) -> Self {
        Self { memory, layouts }
    }

    /// Bind `memory` to the process-wide layouts
    pub fn global(memory: &'m dyn MemorySource) -> Result<Self> {
        Ok(Self::new(memory, registry::layouts()?))
    }

    pub fn memory(&self) -> &'m dyn MemorySource {
        self.memory
    }

    pub fn layouts(&self) -> &'m LayoutTable {
        self.layouts
    }

    /// View `schema` at `address`; the address is not validated
    pub fn from_address(&self, schema: &str, address: usize) -> Result<View<'m>> {
        let layout = self.layouts.layout(schema)?;
        Ok(View::at(*self, layout, address))
    }

    /// View `schema` at the address exposed by a host handle
    pub fn from_handle(&self, schema: &str, handle: &dyn HostHandle) -> Result<View<'m>> {
        let address = handle.as_pointer().ok_or_else(|| Error::InvalidHandle {
            schema: schema.to_string(),
            handle: handle.kind().to_string(),
        })?;
        if address == 0 {
            return Err(Error::NullPointer {
                schema: schema.to_string(),
                field: handle.kind().to_string(),
            });
        }
        self.from_address(schema, address)
    }

    pub fn cast<T: HostStruct<'m>>(&self, address: usize) -> Result<T> {
        self.from_address(T::SCHEMA, address).map(T::from_view)
    }

    pub fn bind<T: HostStruct<'m>>(&self, handle: &dyn HostHandle) -> Result<T> {
        self.from_handle(T::SCHEMA, handle).map(T::from_view)
    }

    /// Read the list head stored at `address`
    pub fn list_at(&self, address: usize, node: Option<&str>) -> Result<ListBase<'m>> {
        let node = node.map(|name| self.layouts.layout(name)).transpose()?;
        ListBase::read(*self, address, node)
    }
}

impl fmt::Debug for Binding<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("version", &self.layouts.version())
            .field("live", &self.memory.is_live())
            .finish()
    }
}

/// A field read through a view
#[derive(Debug, Clone)]
pub enum FieldValue<'m> {
    Value(Value),
    Struct(View<'m>),
    Pointer(Pointer<'m>),
    List(ListBase<'m>),
}

/// A non-owning typed view of one struct in host memory
#[derive(Clone, Copy)]
pub struct View<'m> {
    binding: Binding<'m>,
    layout: &'m ResolvedLayout,
    address: usize,
}

impl<'m> View<'m> {
    pub(crate) fn at(binding: Binding<'m>, layout: &'m ResolvedLayout, address: usize) -> Self {
        Self {
            binding,
            layout,
            address,
        }
    }

    pub fn address(&self) -> usize {
        self.address
    }

    pub fn layout(&self) -> &'m ResolvedLayout {
        self.layout
    }

    pub fn schema(&self) -> &'m str {
        self.layout.name()
    }

    pub fn binding(&self) -> Binding<'m> {
        self.binding
    }

    pub fn size(&self) -> usize {
        self.layout.size()
    }

    /// Reinterpret the same address as another schema
    pub fn cast(&self, schema: &str) -> Result<View<'m>> {
        self.binding.from_address(schema, self.address)
    }

    fn member(&self, name: &str) -> Result<(usize, &'m ResolvedField)> {
        let (offset, field) = self.layout.lookup(name).ok_or_else(|| self.unknown(name))?;
        let address = self
            .address
            .checked_add(offset)
            .ok_or(MemoryError::OutOfBounds {
                address: self.address,
                size: offset + field.size,
            })?;
        Ok((address, field))
    }

    fn unknown(&self, field: &str) -> Error {
        Error::UnknownField {
            schema: self.schema().to_string(),
            field: field.to_string(),
        }
    }

    fn mismatch(&self, field: &str, expected: impl Into<String>, actual: impl Into<String>) -> Error {
        Error::TypeMismatch {
            schema: self.schema().to_string(),
            field: field.to_string(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Offset of a field from the start of the struct
    pub fn offset_of(&self, name: &str) -> Result<usize> {
        self.layout.offset_of(name).ok_or_else(|| self.unknown(name))
    }

    /// Raw bytes of a field
    pub fn get_bytes(&self, name: &str) -> Result<Vec<u8>> {
        let (address, field) = self.member(name)?;
        Ok(self.binding.memory.read_bytes(address, field.size)?)
    }

    /// Read a field, wrapping aggregates in views, pointers and list heads
    pub fn get(&self, name: &str) -> Result<FieldValue<'m>> {
        let (address, field) = self.member(name)?;
        Ok(match &field.ty {
            ConcreteType::Struct { name: schema, .. } => {
                FieldValue::Struct(self.binding.from_address(schema, address)?)
            }
            ConcreteType::Pointer(target) => FieldValue::Pointer(Pointer {
                binding: self.binding,
                address: self.binding.memory.read_ptr(address)?,
                target: target.clone(),
            }),
            ConcreteType::ListBase { node } => {
                FieldValue::List(self.binding.list_at(address, node.as_deref())?)
            }
            ty => {
                let bytes = self.binding.memory.read_bytes(address, field.size)?;
                FieldValue::Value(value::decode(ty, &bytes))
            }
        })
    }

    /// Decode a field as a plain value
    pub fn read_value(&self, name: &str) -> Result<Value> {
        let (address, field) = self.member(name)?;
        let bytes = self.binding.memory.read_bytes(address, field.size)?;
        Ok(value::decode(&field.ty, &bytes))
    }

    /// Write a field; the write reaches host memory immediately
    pub fn set(&self, name: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let (address, field) = self.member(name)?;
        let bytes = value::encode(&field.ty, &value)
            .ok_or_else(|| self.mismatch(name, field.ty.describe(), value.describe()))?;
        self.binding.memory.write_bytes(address, &bytes)?;
        Ok(())
    }

    pub fn get_int(&self, name: &str) -> Result<i64> {
        let value = self.read_value(name)?;
        match value {
            Value::Int(_) | Value::UInt(_) | Value::Char(_) => value
                .as_i64()
                .ok_or_else(|| self.mismatch(name, "i64", value.describe())),
            other => Err(self.mismatch(name, "integer", other.describe())),
        }
    }

    pub fn get_float(&self, name: &str) -> Result<f64> {
        match self.read_value(name)? {
            Value::Float(v) => Ok(v),
            other => Err(self.mismatch(name, "float", other.describe())),
        }
    }

    /// Read an integer or float field as `f64`
    pub fn get_number(&self, name: &str) -> Result<f64> {
        let value = self.read_value(name)?;
        value
            .as_f64()
            .ok_or_else(|| self.mismatch(name, "number", value.describe()))
    }

    /// Write an integer or float field from `f64`
    ///
    /// Integer fields only accept integral values within their range.
    pub fn set_number(&self, name: &str, number: f64) -> Result<()> {
        let (address, bytes) = self.encode_number(name, number)?;
        self.binding.memory.write_bytes(address, &bytes)?;
        Ok(())
    }

    fn encode_number(&self, name: &str, number: f64) -> Result<(usize, Vec<u8>)> {
        let (address, field) = self.member(name)?;
        let rejected = || self.mismatch(name, field.ty.describe(), format!("number {}", number));
        let value = match &field.ty {
            ConcreteType::Scalar(s) if s.is_float() => Value::Float(number),
            ConcreteType::Scalar(Scalar::Bool | Scalar::Char) => return Err(rejected()),
            ConcreteType::Scalar(_) if number.fract() == 0.0 => {
                if number < 0.0 && number >= i64::MIN as f64 {
                    Value::Int(number as i64)
                } else if number >= 0.0 && number < U64_LIMIT {
                    Value::UInt(number as u64)
                } else {
                    return Err(rejected());
                }
            }
            _ => return Err(rejected()),
        };
        let bytes = value::encode(&field.ty, &value).ok_or_else(rejected)?;
        Ok((address, bytes))
    }

    pub fn get_bool(&self, name: &str) -> Result<bool> {
        match self.read_value(name)? {
            Value::Bool(b) => Ok(b),
            other => Err(self.mismatch(name, "bool", other.describe())),
        }
    }

    /// Raw address stored in a pointer field
    pub fn get_ptr(&self, name: &str) -> Result<usize> {
        let (address, field) = self.member(name)?;
        match field.ty {
            ConcreteType::Pointer(_) => Ok(self.binding.memory.read_ptr(address)?),
            _ => Err(self.mismatch(name, "pointer", field.ty.describe())),
        }
    }

    pub fn set_ptr(&self, name: &str, target: usize) -> Result<()> {
        self.set(name, Value::Pointer(target))
    }

    /// Read a `char` array up to its first NUL
    pub fn get_str(&self, name: &str) -> Result<String> {
        let (_, field) = self.member(name)?;
        if !is_char_array(&field.ty) {
            return Err(self.mismatch(name, "char array", field.ty.describe()));
        }
        let bytes = self.get_bytes(name)?;
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        Ok(String::from_utf8_lossy(&bytes[..end]).into_owned())
    }

    /// Write a `char` array, NUL-terminated and zero-padded
    pub fn set_str(&self, name: &str, text: &str) -> Result<()> {
        let (address, field) = self.member(name)?;
        if !is_char_array(&field.ty) {
            return Err(self.mismatch(name, "char array", field.ty.describe()));
        }
        if text.len() >= field.size {
            return Err(self.mismatch(
                name,
                field.ty.describe(),
                format!("string of {} bytes", text.len()),
            ));
        }
        let mut bytes = vec![0u8; field.size];
        bytes[..text.len()].copy_from_slice(text.as_bytes());
        self.binding.memory.write_bytes(address, &bytes)?;
        Ok(())
    }

    /// Nested struct stored by value
    pub fn view(&self, name: &str) -> Result<View<'m>> {
        match self.get(name)? {
            FieldValue::Struct(view) => Ok(view),
            _ => Err(self.mismatch(name, "struct", self.describe(name))),
        }
    }

    /// Follow a pointer field to the struct it points to
    pub fn deref(&self, name: &str) -> Result<Option<View<'m>>> {
        match self.get(name)? {
            FieldValue::Pointer(ptr) => ptr.deref(),
            _ => Err(self.mismatch(name, "pointer", self.describe(name))),
        }
    }

    /// Read the string a `char*` field points to
    pub fn cstring(&self, name: &str) -> Result<Option<String>> {
        match self.get(name)? {
            FieldValue::Pointer(ptr) => ptr.read_cstring(),
            _ => Err(self.mismatch(name, "char*", self.describe(name))),
        }
    }

    /// List head stored in this struct
    pub fn list(&self, name: &str) -> Result<ListBase<'m>> {
        match self.get(name)? {
            FieldValue::List(list) => Ok(list),
            _ => Err(self.mismatch(name, "ListBase", self.describe(name))),
        }
    }

    /// Element `index` of an array of structs
    pub fn element(&self, name: &str, index: usize) -> Result<View<'m>> {
        let (address, field) = self.member(name)?;
        let (schema, size, len) = match &field.ty {
            ConcreteType::Array { element, len } => match element.as_ref() {
                ConcreteType::Struct { name: schema, size } => (schema, *size, *len),
                _ => return Err(self.mismatch(name, "struct array", field.ty.describe())),
            },
            _ => return Err(self.mismatch(name, "struct array", field.ty.describe())),
        };
        if index >= len {
            return Err(Error::IndexOutOfBounds { index, len });
        }
        self.binding.from_address(schema, address + index * size)
    }

    pub fn vec2(&self, name: &str) -> Result<Vec2<'m>> {
        Vec2::new(self.view(name)?)
    }

    pub fn rect(&self, name: &str) -> Result<Rect<'m>> {
        Rect::new(self.view(name)?)
    }

    fn describe(&self, name: &str) -> String {
        self.layout
            .lookup(name)
            .map(|(_, f)| f.ty.describe())
            .unwrap_or_default()
    }
}

impl fmt::Debug for View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:#x}", self.schema(), self.address)
    }
}

impl PartialEq for View<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address && self.layout.name() == other.layout.name()
    }
}

fn is_char_array(ty: &ConcreteType) -> bool {
    matches!(ty, ConcreteType::Array { element, .. } if **element == ConcreteType::Scalar(Scalar::Char))
}

/// A pointer field's value, dereferenced on demand
#[derive(Clone)]
pub struct Pointer<'m> {
    binding: Binding<'m>,
    address: usize,
    target: Pointee,
}

impl<'m> Pointer<'m> {
    pub fn address(&self) -> usize {
        self.address
    }

    pub fn is_null(&self) -> bool {
        self.address == 0
    }

    pub fn target(&self) -> &Pointee {
        &self.target
    }

    /// View of the pointed-to struct, or `None` for a null pointer
    pub fn deref(&self) -> Result<Option<View<'m>>> {
        match &self.target {
            Pointee::Struct(schema) if self.is_null() => {
                self.binding.layouts.layout(schema)?;
                Ok(None)
            }
            Pointee::Struct(schema) => self.binding.from_address(schema, self.address).map(Some),
            other => Err(Error::TypeMismatch {
                schema: "pointer".to_string(),
                field: format!("{:#x}", self.address),
                expected: "struct pointer".to_string(),
                actual: ConcreteType::Pointer(other.clone()).describe(),
            }),
        }
    }

    /// View of the pointed-to struct, reinterpreted as `schema`
    pub fn cast(&self, schema: &str) -> Result<Option<View<'m>>> {
        if self.is_null() {
            return Ok(None);
        }
        self.binding.from_address(schema, self.address).map(Some)
    }

    /// Read the pointed-to string, or `None` for a null pointer
    pub fn read_cstring(&self) -> Result<Option<String>> {
        if self.is_null() {
            return Ok(None);
        }
        Ok(Some(
            self.binding
                .memory
                .read_cstring(self.address, MAX_CSTRING_LEN)?,
        ))
    }

    /// Read the `index`-th element of a scalar pointer
    pub fn read_scalar(&self, index: usize) -> Result<Value> {
        match self.target {
            Pointee::Scalar(scalar) => {
                let address = self.address + index * scalar.size();
                let bytes = self.binding.memory.read_bytes(address, scalar.size())?;
                Ok(value::decode_scalar(scalar, &bytes))
            }
            _ => Err(Error::TypeMismatch {
                schema: "pointer".to_string(),
                field: format!("{:#x}", self.address),
                expected: "scalar pointer".to_string(),
                actual: ConcreteType::Pointer(self.target.clone()).describe(),
            }),
        }
    }
}

impl fmt::Debug for Pointer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({:#x})",
            ConcreteType::Pointer(self.target.clone()).describe(),
            self.address
        )
    }
}

const AXES: [&str; 2] = ["x", "y"];

/// Two-component vector (`vec2i`, `vec2s`, `vec2f`)
#[derive(Debug, Clone, Copy)]
pub struct Vec2<'m> {
    view: View<'m>,
}

impl<'m> Vec2<'m> {
    pub fn new(view: View<'m>) -> Result<Self> {
        for axis in AXES {
            view.offset_of(axis)?;
        }
        Ok(Self { view })
    }

    pub fn view(&self) -> &View<'m> {
        &self.view
    }

    pub fn get(&self, index: usize) -> Result<f64> {
        self.view.get_number(axis(index)?)
    }

    pub fn set(&self, index: usize, value: f64) -> Result<()> {
        self.view.set_number(axis(index)?, value)
    }

    pub fn x(&self) -> Result<f64> {
        self.get(0)
    }

    pub fn y(&self) -> Result<f64> {
        self.get(1)
    }

    pub fn to_array(&self) -> Result<[f64; 2]> {
        Ok([self.x()?, self.y()?])
    }
}

fn axis(index: usize) -> Result<&'static str> {
    AXES.get(index).copied().ok_or(Error::IndexOutOfBounds {
        index,
        len: AXES.len(),
    })
}

const EDGES: [&str; 4] = ["xmin", "xmax", "ymin", "ymax"];

/// Axis-aligned rectangle (`rcti`, `rctf`)
#[derive(Debug, Clone, Copy)]
pub struct Rect<'m> {
    view: View<'m>,
}

impl<'m> Rect<'m> {
    pub fn new(view: View<'m>) -> Result<Self> {
        for edge in EDGES {
            view.offset_of(edge)?;
        }
        Ok(Self { view })
    }

    pub fn view(&self) -> &View<'m> {
        &self.view
    }

    /// Edge by index, in `xmin, xmax, ymin, ymax` order
    pub fn get(&self, index: usize) -> Result<f64> {
        let edge = EDGES.get(index).ok_or(Error::IndexOutOfBounds {
            index,
            len: EDGES.len(),
        })?;
        self.view.get_number(edge)
    }

    pub fn xmin(&self) -> Result<f64> {
        self.view.get_number("xmin")
    }

    pub fn xmax(&self) -> Result<f64> {
        self.view.get_number("xmax")
    }

    pub fn ymin(&self) -> Result<f64> {
        self.view.get_number("ymin")
    }

    pub fn ymax(&self) -> Result<f64> {
        self.view.get_number("ymax")
    }

    pub fn width(&self) -> Result<f64> {
        Ok(self.xmax()? - self.xmin()?)
    }

    pub fn height(&self) -> Result<f64> {
        Ok(self.ymax()? - self.ymin()?)
    }

    /// Lower-left corner
    pub fn position(&self) -> Result<(f64, f64)> {
        Ok((self.xmin()?, self.ymin()?))
    }

    /// Move the lower-left corner, keeping width and height
    ///
    /// All four edges are encoded before any is written, so a rejected
    /// value leaves the rect untouched.
    pub fn set_position(&self, x: f64, y: f64) -> Result<()> {
        let (xmin, ymin) = self.position()?;
        let (xmax, ymax) = (self.xmax()?, self.ymax()?);
        let writes = [
            ("xmin", x),
            ("xmax", xmax + (x - xmin)),
            ("ymin", y),
            ("ymax", ymax + (y - ymin)),
        ]
        .into_iter()
        .map(|(edge, number)| self.view.encode_number(edge, number))
        .collect::<Result<Vec<_>>>()?;

        for (address, bytes) in writes {
            self.view.binding.memory.write_bytes(address, &bytes)?;
        }
        Ok(())
    }

    /// Point containment, edges included
    pub fn contains(&self, x: f64, y: f64) -> Result<bool> {
        Ok(self.xmin()? <= x && x <= self.xmax()? && self.ymin()? <= y && y <= self.ymax()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{LocalMemory, MockMemorySource};
    use crate::schema::{FieldType, Schema, POINTER_SIZE};

    const BASE: usize = 0x1000;

    fn schemas() -> Vec<Schema> {
        vec![
            Schema::new("rcti")
                .field("xmin", Scalar::I32)
                .field("xmax", Scalar::I32)
                .field("ymin", Scalar::I32)
                .field("ymax", Scalar::I32),
            Schema::new("rctf")
                .field("xmin", Scalar::F32)
                .field("xmax", Scalar::F32)
                .field("ymin", Scalar::F32)
                .field("ymax", Scalar::F32),
            Schema::new("vec2s").field("x", Scalar::I16).field("y", Scalar::I16),
            Schema::new("Counters")
                .field("big", Scalar::I64)
                .field("ubig", Scalar::U64)
                .field("small", Scalar::I8),
            Schema::new("Panel")
                .field("count", Scalar::I32)
                .field("slots", FieldType::array(FieldType::schema("vec2s"), 3)),
            Schema::new("Item")
                .field("next", FieldType::SelfPointer)
                .field("flag", Scalar::I16)
                .field("count", Scalar::U8)
                .field("enabled", Scalar::Bool)
                .field("_pad0", FieldType::chars(4))
                .field("name", FieldType::chars(8))
                .field("scale", Scalar::F32)
                .field("size", FieldType::schema("vec2s"))
                .field("bounds", FieldType::schema("rcti"))
                .field("label", FieldType::cstring())
                .union(
                    "data",
                    [
                        ("as_int", FieldType::Scalar(Scalar::I32)),
                        ("as_float", FieldType::Scalar(Scalar::F32)),
                    ],
                )
                .field("values", FieldType::array(Scalar::I16, 2)),
        ]
    }

    fn table() -> LayoutTable {
        LayoutTable::resolve(&schemas(), (3, 3)).unwrap()
    }

    struct Handle(Option<usize>);

    impl HostHandle for Handle {
        fn as_pointer(&self) -> Option<usize> {
            self.0
        }

        fn kind(&self) -> &str {
            "Handle"
        }
    }

    #[test]
    fn test_scalar_fields_round_trip() {
        let table = table();
        let memory = MockMemorySource::new(256, BASE);
        let item = Binding::new(&memory, &table).from_address("Item", BASE).unwrap();

        item.set("flag", -3).unwrap();
        item.set("count", 200u32).unwrap();
        item.set("enabled", true).unwrap();
        item.set("scale", 0.5f32).unwrap();

        assert_eq!(item.get_int("flag").unwrap(), -3);
        assert_eq!(item.read_value("count").unwrap(), Value::UInt(200));
        assert!(item.get_bool("enabled").unwrap());
        assert_eq!(item.get_float("scale").unwrap(), 0.5);
        assert_eq!(item.get_number("flag").unwrap(), -3.0);
    }

    #[test]
    fn test_writes_land_at_resolved_offsets() {
        let table = table();
        let memory = MockMemorySource::new(256, BASE);
        let item = Binding::new(&memory, &table).from_address("Item", BASE).unwrap();

        item.set("flag", 0x0102).unwrap();
        let offset = item.offset_of("flag").unwrap();
        assert_eq!(offset, POINTER_SIZE);
        assert_eq!(memory.snapshot()[offset..offset + 2], [0x02, 0x01]);
    }

    #[test]
    fn test_type_mismatch_never_truncates() {
        let table = table();
        let memory = MockMemorySource::new(256, BASE);
        let item = Binding::new(&memory, &table).from_address("Item", BASE).unwrap();

        assert!(matches!(
            item.set("flag", 70000),
            Err(Error::TypeMismatch { ref field, .. }) if field == "flag"
        ));
        assert!(matches!(item.set("scale", 1), Err(Error::TypeMismatch { .. })));
        assert!(matches!(
            item.set("flag", vec![1u8, 2, 3]),
            Err(Error::TypeMismatch { .. })
        ));
        assert!(matches!(item.set_number("flag", 1.5), Err(Error::TypeMismatch { .. })));
        assert_eq!(item.get_int("flag").unwrap(), 0);

        // Raw bytes of the exact width are accepted
        item.set("flag", vec![0xff, 0x7f]).unwrap();
        assert_eq!(item.get_int("flag").unwrap(), 0x7fff);
    }

    #[test]
    fn test_unknown_field() {
        let table = table();
        let memory = MockMemorySource::new(256, BASE);
        let item = Binding::new(&memory, &table).from_address("Item", BASE).unwrap();

        assert_eq!(
            item.get("nope").unwrap_err(),
            Error::UnknownField {
                schema: "Item".into(),
                field: "nope".into()
            }
        );
        assert!(matches!(
            Binding::new(&memory, &table).from_address("Nope", BASE),
            Err(Error::UnknownSchema(_))
        ));
    }

    #[test]
    fn test_strings() {
        let table = table();
        let memory = MockMemorySource::new(256, BASE);
        let item = Binding::new(&memory, &table).from_address("Item", BASE).unwrap();

        item.set_str("name", "abc").unwrap();
        assert_eq!(item.get_str("name").unwrap(), "abc");
        assert_eq!(item.get_bytes("name").unwrap(), b"abc\0\0\0\0\0");
        assert!(matches!(
            item.set_str("name", "12345678"),
            Err(Error::TypeMismatch { .. })
        ));
        item.set_str("name", "1234567").unwrap();
        assert_eq!(item.get_str("name").unwrap(), "1234567");

        assert!(item.cstring("label").unwrap().is_none());
        memory.write_bytes(BASE + 200, b"hello\0").unwrap();
        item.set_ptr("label", BASE + 200).unwrap();
        assert_eq!(item.cstring("label").unwrap().as_deref(), Some("hello"));
    }

    #[test]
    fn test_nested_views_and_pointers() {
        let table = table();
        let memory = MockMemorySource::new(256, BASE);
        let binding = Binding::new(&memory, &table);
        let item = binding.from_address("Item", BASE).unwrap();
        let other = binding.from_address("Item", BASE + 128).unwrap();

        let bounds = item.view("bounds").unwrap();
        assert_eq!(bounds.schema(), "rcti");
        assert_eq!(bounds.address(), BASE + item.offset_of("bounds").unwrap());

        assert_eq!(item.deref("next").unwrap(), None);
        item.set_ptr("next", other.address()).unwrap();
        assert_eq!(item.deref("next").unwrap(), Some(other));
        assert_eq!(item.get_ptr("next").unwrap(), BASE + 128);

        match item.get("next").unwrap() {
            FieldValue::Pointer(ptr) => assert!(!ptr.is_null()),
            other => panic!("expected pointer, got {:?}", other),
        }
        assert!(matches!(item.deref("flag"), Err(Error::TypeMismatch { .. })));
    }

    #[test]
    fn test_anonymous_union_members() {
        let table = table();
        let memory = MockMemorySource::new(256, BASE);
        let item = Binding::new(&memory, &table).from_address("Item", BASE).unwrap();

        assert_eq!(item.offset_of("as_int").unwrap(), item.offset_of("as_float").unwrap());
        item.set("as_float", 1.0f32).unwrap();
        assert_eq!(item.get_int("as_int").unwrap(), 0x3f80_0000);
        assert_eq!(
            item.read_value("data").unwrap(),
            Value::Bytes(vec![0, 0, 0x80, 0x3f])
        );
    }

    #[test]
    fn test_arrays() {
        let table = table();
        let memory = MockMemorySource::new(256, BASE);
        let item = Binding::new(&memory, &table).from_address("Item", BASE).unwrap();

        let values = Value::Array(vec![Value::Int(-1), Value::Int(2)]);
        item.set("values", values.clone()).unwrap();
        assert_eq!(item.read_value("values").unwrap(), values);
    }

    #[test]
    fn test_vec2() {
        let table = table();
        let memory = MockMemorySource::new(256, BASE);
        let item = Binding::new(&memory, &table).from_address("Item", BASE).unwrap();

        let size = item.vec2("size").unwrap();
        size.set(0, 640.0).unwrap();
        size.set(1, 480.0).unwrap();
        assert_eq!(size.to_array().unwrap(), [640.0, 480.0]);
        assert_eq!(size.y().unwrap(), 480.0);
        assert_eq!(
            size.get(2).unwrap_err(),
            Error::IndexOutOfBounds { index: 2, len: 2 }
        );
        assert!(item.vec2("bounds").is_err());
    }

    #[test]
    fn test_rect_set_position_preserves_size() {
        let table = table();
        let memory = MockMemorySource::new(64, BASE);
        let rect = Binding::new(&memory, &table)
            .from_address("rcti", BASE)
            .and_then(Rect::new)
            .unwrap();
        rect.view().set("xmax", 10).unwrap();
        rect.view().set("ymax", 5).unwrap();

        rect.set_position(3.0, 2.0).unwrap();
        assert_eq!(rect.xmin().unwrap(), 3.0);
        assert_eq!(rect.xmax().unwrap(), 13.0);
        assert_eq!(rect.ymin().unwrap(), 2.0);
        assert_eq!(rect.ymax().unwrap(), 7.0);
        assert_eq!(rect.position().unwrap(), (3.0, 2.0));
        assert_eq!((rect.width().unwrap(), rect.height().unwrap()), (10.0, 5.0));
        assert_eq!(rect.get(1).unwrap(), 13.0);
    }

    #[test]
    fn test_rect_contains_is_inclusive() {
        let table = table();
        let memory = MockMemorySource::new(64, BASE);
        let rect = Binding::new(&memory, &table)
            .from_address("rctf", BASE)
            .and_then(Rect::new)
            .unwrap();
        rect.view().set("xmax", 10.0f32).unwrap();
        rect.view().set("ymax", 10.0f32).unwrap();

        assert!(rect.contains(5.0, 5.0).unwrap());
        assert!(rect.contains(10.0, 0.0).unwrap());
        assert!(!rect.contains(11.0, 5.0).unwrap());
        assert!(!rect.contains(5.0, -0.5).unwrap());
    }

    #[test]
    fn test_handles() {
        let table = table();
        let memory = MockMemorySource::new(64, BASE);
        let binding = Binding::new(&memory, &table);

        assert_eq!(
            binding.from_handle("rcti", &Handle(None)).unwrap_err(),
            Error::InvalidHandle {
                schema: "rcti".into(),
                handle: "Handle".into()
            }
        );
        assert!(matches!(
            binding.from_handle("rcti", &Handle(Some(0))),
            Err(Error::NullPointer { .. })
        ));
        let view = binding.from_handle("rcti", &Handle(Some(BASE + 16))).unwrap();
        assert_eq!(view.address(), BASE + 16);
        assert_eq!(binding.from_handle("rcti", &BASE).unwrap().address(), BASE);
    }

    #[test]
    fn test_views_alias_the_same_memory() {
        let table = table();
        let memory = MockMemorySource::new(64, BASE);
        let binding = Binding::new(&memory, &table);
        let a = binding.from_address("rcti", BASE).unwrap();
        let b = binding.from_address("rcti", BASE).unwrap();

        a.set("ymin", 42).unwrap();
        assert_eq!(b.get_int("ymin").unwrap(), 42);
    }

    #[test]
    fn test_set_number_respects_integer_range() {
        let table = table();
        let memory = MockMemorySource::new(64, BASE);
        let counters = Binding::new(&memory, &table).from_address("Counters", BASE).unwrap();

        counters.set("big", 7).unwrap();
        for number in [-1.0e19, 9.3e18, f64::NAN, f64::NEG_INFINITY] {
            assert!(
                matches!(counters.set_number("big", number), Err(Error::TypeMismatch { .. })),
                "{}",
                number
            );
        }
        assert_eq!(counters.get_int("big").unwrap(), 7);
        counters.set_number("big", i64::MIN as f64).unwrap();
        assert_eq!(counters.get_int("big").unwrap(), i64::MIN);

        assert!(counters.set_number("ubig", 18_446_744_073_709_551_616.0).is_err());
        assert!(counters.set_number("ubig", -1.0).is_err());
        counters.set_number("ubig", 1.0e19).unwrap();
        assert_eq!(
            counters.read_value("ubig").unwrap(),
            Value::UInt(10_000_000_000_000_000_000)
        );

        counters.set_number("small", -128.0).unwrap();
        counters.set_number("small", 127.0).unwrap();
        assert!(counters.set_number("small", 128.0).is_err());
        assert!(counters.set_number("small", -129.0).is_err());
        assert_eq!(counters.get_int("small").unwrap(), 127);
    }

    #[test]
    fn test_failed_set_position_leaves_rect_untouched() {
        let table = table();
        let memory = MockMemorySource::new(64, BASE);
        let rect = Binding::new(&memory, &table)
            .from_address("rcti", BASE)
            .and_then(Rect::new)
            .unwrap();
        rect.view().set("xmax", 10).unwrap();
        rect.view().set("ymax", 5).unwrap();
        let before = memory.snapshot();

        assert!(matches!(
            rect.set_position(3.0, 2.5),
            Err(Error::TypeMismatch { ref field, .. }) if field == "ymin"
        ));
        assert_eq!(memory.snapshot(), before);
        assert_eq!((rect.width().unwrap(), rect.height().unwrap()), (10.0, 5.0));

        // The far edge would overflow the field
        rect.view().set("ymax", i32::MAX).unwrap();
        let before = memory.snapshot();
        assert!(rect.set_position(0.0, 1.0).is_err());
        assert_eq!(memory.snapshot(), before);
    }

    #[test]
    fn test_struct_array_elements() {
        let table = table();
        let memory = MockMemorySource::new(64, BASE);
        let panel = Binding::new(&memory, &table).from_address("Panel", BASE).unwrap();

        let slot = panel.element("slots", 1).unwrap();
        assert_eq!(slot.schema(), "vec2s");
        assert_eq!(slot.address(), BASE + 4 + 4);
        slot.set("x", 7).unwrap();
        slot.set("y", -2).unwrap();
        assert_eq!(
            Vec2::new(panel.element("slots", 1).unwrap()).unwrap().to_array().unwrap(),
            [7.0, -2.0]
        );
        assert_eq!(
            panel.read_value("slots").unwrap(),
            Value::Array(vec![
                Value::Bytes(vec![0; 4]),
                Value::Bytes(vec![7, 0, 0xfe, 0xff]),
                Value::Bytes(vec![0; 4]),
            ])
        );

        assert_eq!(
            panel.element("slots", 3).unwrap_err(),
            Error::IndexOutOfBounds { index: 3, len: 3 }
        );
        assert!(matches!(panel.element("count", 0), Err(Error::TypeMismatch { .. })));
        let item = Binding::new(&memory, &table).from_address("Item", BASE).unwrap();
        assert!(matches!(item.element("values", 0), Err(Error::TypeMismatch { .. })));
    }

    #[test]
    fn test_field_address_past_end_of_address_space() {
        let table = table();
        let memory = MockMemorySource::new(64, BASE);
        let rect = Binding::new(&memory, &table)
            .from_address("rcti", usize::MAX - 2)
            .unwrap();

        assert_eq!(rect.offset_of("xmax").unwrap(), 4);
        assert_eq!(
            rect.get_int("xmax").unwrap_err(),
            Error::Memory(MemoryError::OutOfBounds {
                address: usize::MAX - 2,
                size: 8
            })
        );
        assert!(rect.set("ymax", 1).is_err());
    }

    #[test]
    fn test_live_memory_write_through() {
        let table = table();
        let mut block = Box::new([0i32; 4]);
        block[1] = 10;
        let memory = unsafe { LocalMemory::new() };
        let rect = Binding::new(&memory, &table)
            .from_address("rcti", block.as_mut_ptr() as usize)
            .and_then(Rect::new)
            .unwrap();

        assert_eq!(rect.width().unwrap(), 10.0);
        rect.set_position(1.0, 1.0).unwrap();
        assert_eq!(*block, [1, 11, 1, 1]);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn set_then_read_returns_the_value(
                flag in any::<i16>(),
                count in any::<u8>(),
                scale in -1.0e6f32..1.0e6,
                as_int in any::<i32>(),
            ) {
                let table = table();
                let memory = MockMemorySource::new(256, BASE);
                let item = Binding::new(&memory, &table).from_address("Item", BASE).unwrap();

                item.set("flag", flag as i64).unwrap();
                item.set("count", count as u64).unwrap();
                item.set("scale", scale).unwrap();
                item.set("as_int", as_int).unwrap();

                prop_assert_eq!(item.read_value("flag").unwrap(), Value::Int(flag as i64));
                prop_assert_eq!(item.read_value("count").unwrap(), Value::UInt(count as u64));
                prop_assert_eq!(item.read_value("scale").unwrap(), Value::Float(scale as f64));
                prop_assert_eq!(item.read_value("as_int").unwrap(), Value::Int(as_int as i64));
            }
        }
    }
}
