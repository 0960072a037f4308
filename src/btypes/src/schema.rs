//! Versioned schema declarations
//!
//! A [`Schema`] is an ordered list of field declarations. Each declaration
//! carries a [`Predicate`] over the host version; the layout resolver keeps
//! the declarations whose predicate holds for the running version.
//!
//! ```
//! use btypes::schema::{FieldType, Predicate, Scalar, Schema};
//!
//! let schema = Schema::new("TextLine")
//!     .field("next", FieldType::SelfPointer)
//!     .field("prev", FieldType::SelfPointer)
//!     .field("line", FieldType::cstring())
//!     .when(Predicate::before((2, 90)), |f| f.field("nlines", Scalar::I32))
//!     .variant(
//!         "emboss",
//!         [
//!             (Predicate::before((2, 93)), FieldType::Scalar(Scalar::Char)),
//!             (Predicate::Always, FieldType::Scalar(Scalar::I32)),
//!         ],
//!     );
//! assert_eq!(schema.name(), "TextLine");
//! ```

use crate::version::HostVersion;
use serde::Serialize;

/// Size of a host pointer in bytes
pub const POINTER_SIZE: usize = std::mem::size_of::<usize>();

/// Fixed-width scalar types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scalar {
    Bool,
    Char,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
}

impl Scalar {
    pub const fn size(&self) -> usize {
        match self {
            Self::Bool | Self::Char | Self::I8 | Self::U8 => 1,
            Self::I16 | Self::U16 => 2,
            Self::I32 | Self::U32 | Self::F32 => 4,
            Self::I64 | Self::U64 | Self::F64 => 8,
        }
    }

    pub const fn is_float(&self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    pub const fn is_signed(&self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    /// Name of the equivalent C type
    pub const fn c_name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::I8 => "int8_t",
            Self::U8 => "uint8_t",
            Self::I16 => "short",
            Self::U16 => "ushort",
            Self::I32 => "int",
            Self::U32 => "uint",
            Self::I64 => "int64_t",
            Self::U64 => "uint64_t",
            Self::F32 => "float",
            Self::F64 => "double",
        }
    }
}

/// What a pointer field points at
#[derive(Debug, Clone, PartialEq)]
pub enum PointerTarget {
    /// `void *` or a type the declarations do not model
    Opaque,
    /// NUL-terminated `char *`
    CString,
    /// Function pointer
    Function,
    Scalar(Scalar),
    /// Pointer to a named schema, looked up during resolution
    Struct(String),
}

/// Field type descriptor
///
/// Deferred descriptors never compare equal, not even to themselves.
#[derive(Debug, Clone)]
pub enum FieldType {
    Scalar(Scalar),
    Array(Box<FieldType>, usize),
    /// Nested schema stored by value, looked up by name during resolution
    Struct(String),
    Pointer(PointerTarget),
    /// Pointer to the schema that owns the field
    SelfPointer,
    /// `ListBase` head (`first`/`last` pointers), optionally typed by node schema
    ListBase(Option<String>),
    /// Anonymous union; members alias the same bytes
    Union(Vec<(String, FieldType)>),
    /// Descriptor produced on demand during resolution
    Deferred(fn() -> FieldType),
}

impl FieldType {
    pub fn array(element: impl Into<FieldType>, len: usize) -> Self {
        Self::Array(Box::new(element.into()), len)
    }

    /// `char name[len]`
    pub fn chars(len: usize) -> Self {
        Self::array(Scalar::Char, len)
    }

    pub fn schema(name: impl Into<String>) -> Self {
        Self::Struct(name.into())
    }

    /// `void *`
    pub fn ptr() -> Self {
        Self::Pointer(PointerTarget::Opaque)
    }

    pub fn ptr_to(name: impl Into<String>) -> Self {
        Self::Pointer(PointerTarget::Struct(name.into()))
    }

    pub fn scalar_ptr(scalar: Scalar) -> Self {
        Self::Pointer(PointerTarget::Scalar(scalar))
    }

    pub fn cstring() -> Self {
        Self::Pointer(PointerTarget::CString)
    }

    pub fn function() -> Self {
        Self::Pointer(PointerTarget::Function)
    }

    /// Untyped `ListBase`
    pub fn list() -> Self {
        Self::ListBase(None)
    }

    pub fn list_of(node: impl Into<String>) -> Self {
        Self::ListBase(Some(node.into()))
    }
}

impl PartialEq for FieldType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Scalar(a), Self::Scalar(b)) => a == b,
            (Self::Array(a, n), Self::Array(b, m)) => n == m && a == b,
            (Self::Struct(a), Self::Struct(b)) => a == b,
            (Self::Pointer(a), Self::Pointer(b)) => a == b,
            (Self::SelfPointer, Self::SelfPointer) => true,
            (Self::ListBase(a), Self::ListBase(b)) => a == b,
            (Self::Union(a), Self::Union(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Scalar> for FieldType {
    fn from(scalar: Scalar) -> Self {
        Self::Scalar(scalar)
    }
}

/// Version predicate governing whether a declaration is included
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Always,
    /// `version >= v`
    Since(HostVersion),
    /// `version > v`
    After(HostVersion),
    /// `version < v`
    Before(HostVersion),
    /// `version <= v`
    Until(HostVersion),
    /// `lo <= version < hi`
    Between(HostVersion, HostVersion),
    All(Vec<Predicate>),
    Any(Vec<Predicate>),
    Not(Box<Predicate>),
}

impl Predicate {
    pub fn since(v: impl Into<HostVersion>) -> Self {
        Self::Since(v.into())
    }

    pub fn after(v: impl Into<HostVersion>) -> Self {
        Self::After(v.into())
    }

    pub fn before(v: impl Into<HostVersion>) -> Self {
        Self::Before(v.into())
    }

    pub fn until(v: impl Into<HostVersion>) -> Self {
        Self::Until(v.into())
    }

    pub fn between(lo: impl Into<HostVersion>, hi: impl Into<HostVersion>) -> Self {
        Self::Between(lo.into(), hi.into())
    }

    pub fn matches(&self, version: HostVersion) -> bool {
        match self {
            Self::Always => true,
            Self::Since(v) => version >= *v,
            Self::After(v) => version > *v,
            Self::Before(v) => version < *v,
            Self::Until(v) => version <= *v,
            Self::Between(lo, hi) => version >= *lo && version < *hi,
            Self::All(preds) => preds.iter().all(|p| p.matches(version)),
            Self::Any(preds) => preds.iter().any(|p| p.matches(version)),
            Self::Not(p) => !p.matches(version),
        }
    }

    pub fn is_always(&self) -> bool {
        matches!(self, Self::Always)
    }

    /// Conjunction that keeps `Always` out of the tree
    pub fn and(self, other: Predicate) -> Predicate {
        match (self, other) {
            (Self::Always, p) | (p, Self::Always) => p,
            (Self::All(mut preds), p) => {
                preds.push(p);
                Self::All(preds)
            }
            (a, b) => Self::All(vec![a, b]),
        }
    }

    pub fn negate(self) -> Predicate {
        match self {
            Self::Not(p) => *p,
            p => Self::Not(Box::new(p)),
        }
    }
}

/// Shape of a declaration: one type, or version-dependent alternatives
#[derive(Debug, Clone, PartialEq)]
pub enum FieldShape {
    Single(FieldType),
    /// First arm whose predicate matches is chosen; no match is an error
    Variant(Vec<(Predicate, FieldType)>),
}

/// One declared field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub name: String,
    pub shape: FieldShape,
    pub when: Predicate,
    /// Anonymous union members alias each other
    pub anonymous: bool,
}

/// Ordered list of declarations scoped under a predicate
///
/// Used both as the body of a [`Schema`] and as the body of conditional
/// groups, so nested `when` blocks combine their predicates.
#[derive(Debug, Clone)]
pub struct Fields {
    scope: Predicate,
    decls: Vec<FieldDecl>,
}

impl Fields {
    fn scoped(scope: Predicate) -> Self {
        Self {
            scope,
            decls: Vec::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, ty: impl Into<FieldType>) -> Self {
        self.decls.push(FieldDecl {
            name: name.into(),
            shape: FieldShape::Single(ty.into()),
            when: self.scope.clone(),
            anonymous: false,
        });
        self
    }

    /// Fields included only when `pred` holds
    pub fn when(mut self, pred: Predicate, body: impl FnOnce(Fields) -> Fields) -> Self {
        let group = body(Fields::scoped(self.scope.clone().and(pred)));
        self.decls.extend(group.decls);
        self
    }

    /// if / elif / else chain; at most one arm is included
    pub fn select(mut self, body: impl FnOnce(Chain) -> Chain) -> Self {
        let chain = body(Chain::new(self.scope.clone()));
        self.decls.extend(chain.decls);
        self
    }

    /// A field whose type depends on the version
    pub fn variant<I>(mut self, name: impl Into<String>, arms: I) -> Self
    where
        I: IntoIterator<Item = (Predicate, FieldType)>,
    {
        self.decls.push(FieldDecl {
            name: name.into(),
            shape: FieldShape::Variant(arms.into_iter().collect()),
            when: self.scope.clone(),
            anonymous: false,
        });
        self
    }

    /// Anonymous union whose members are addressable by their own names
    pub fn union(
        mut self,
        name: impl Into<String>,
        members: impl IntoIterator<Item = (&'static str, FieldType)>,
    ) -> Self {
        let members = members
            .into_iter()
            .map(|(n, ty)| (n.to_string(), ty))
            .collect();
        self.decls.push(FieldDecl {
            name: name.into(),
            shape: FieldShape::Single(FieldType::Union(members)),
            when: self.scope.clone(),
            anonymous: true,
        });
        self
    }
}

/// Builder for if / elif / else chains
#[derive(Debug, Clone)]
pub struct Chain {
    scope: Predicate,
    taken: Vec<Predicate>,
    decls: Vec<FieldDecl>,
}

impl Chain {
    fn new(scope: Predicate) -> Self {
        Self {
            scope,
            taken: Vec::new(),
            decls: Vec::new(),
        }
    }

    fn arm_scope(&self, pred: Predicate) -> Predicate {
        let mut scope = self.scope.clone().and(pred);
        if !self.taken.is_empty() {
            scope = scope.and(Predicate::Any(self.taken.clone()).negate());
        }
        scope
    }

    pub fn when(mut self, pred: Predicate, body: impl FnOnce(Fields) -> Fields) -> Self {
        let group = body(Fields::scoped(self.arm_scope(pred.clone())));
        self.decls.extend(group.decls);
        self.taken.push(pred);
        self
    }

    pub fn otherwise(self, body: impl FnOnce(Fields) -> Fields) -> Self {
        self.when(Predicate::Always, body)
    }
}

/// A named, versioned structure declaration
#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    body: Fields,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: Fields::scoped(Predicate::Always),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn decls(&self) -> &[FieldDecl] {
        &self.body.decls
    }

    pub fn field(self, name: impl Into<String>, ty: impl Into<FieldType>) -> Self {
        self.map(|f| f.field(name, ty))
    }

    pub fn when(self, pred: Predicate, body: impl FnOnce(Fields) -> Fields) -> Self {
        self.map(|f| f.when(pred, body))
    }

    pub fn select(self, body: impl FnOnce(Chain) -> Chain) -> Self {
        self.map(|f| f.select(body))
    }

    pub fn variant<I>(self, name: impl Into<String>, arms: I) -> Self
    where
        I: IntoIterator<Item = (Predicate, FieldType)>,
    {
        self.map(|f| f.variant(name, arms))
    }

    pub fn union(
        self,
        name: impl Into<String>,
        members: impl IntoIterator<Item = (&'static str, FieldType)>,
    ) -> Self {
        self.map(|f| f.union(name, members))
    }

    fn map(mut self, f: impl FnOnce(Fields) -> Fields) -> Self {
        self.body = f(self.body);
        self
    }
}
