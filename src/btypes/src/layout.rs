//! Layout resolution
//!
//! Freezes a set of [`Schema`] declarations into concrete layouts for one
//! host version. Offsets are the running sum of the preceding field sizes:
//! no alignment is inferred, so any padding the host compiler inserts must
//! be declared as an explicit `_pad` field.
//!
//! Resolution is a pure function of the declarations and the version.
//! Named references (nested schemas, typed pointers, list heads) and
//! deferred descriptors are looked up only here, after every schema is
//! known, so declarations may reference schemas declared later or
//! themselves.

use crate::error::{Error, ResolutionError};
use crate::schema::{FieldShape, FieldType, PointerTarget, Scalar, Schema, POINTER_SIZE};
use crate::version::HostVersion;

use serde::{Serialize, Serializer};
use std::collections::{HashMap, HashSet};

/// Upper bound on chained deferred descriptors
const MAX_DEFERRED_DEPTH: usize = 16;

/// Resolved pointer target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pointee {
    Opaque,
    CString,
    Function,
    Scalar(Scalar),
    Struct(String),
}

/// Field type after resolution
#[derive(Debug, Clone, PartialEq)]
pub enum ConcreteType {
    Scalar(Scalar),
    Array {
        element: Box<ConcreteType>,
        len: usize,
    },
    Struct {
        name: String,
        size: usize,
    },
    Pointer(Pointee),
    ListBase {
        node: Option<String>,
    },
    /// Members all start at the union's offset
    Union(Vec<ResolvedField>),
}

impl ConcreteType {
    pub fn size(&self) -> usize {
        match self {
            Self::Scalar(s) => s.size(),
            Self::Array { element, len } => element.size() * len,
            Self::Struct { size, .. } => *size,
            Self::Pointer(_) => POINTER_SIZE,
            Self::ListBase { .. } => 2 * POINTER_SIZE,
            Self::Union(members) => members.iter().map(|m| m.size).max().unwrap_or(0),
        }
    }

    /// C-like description, e.g. `char[66]`, `float[4][4]`, `ListBase<TextLine>`
    pub fn describe(&self) -> String {
        match self {
            Self::Scalar(s) => s.c_name().to_string(),
            Self::Array { .. } => {
                let mut dims = Vec::new();
                let mut base = self;
                while let Self::Array { element, len } = base {
                    dims.push(*len);
                    base = element;
                }
                let mut out = base.describe();
                for len in dims {
                    out.push_str(&format!("[{}]", len));
                }
                out
            }
            Self::Struct { name, .. } => name.clone(),
            Self::Pointer(target) => match target {
                Pointee::Opaque => "void*".to_string(),
                Pointee::CString => "char*".to_string(),
                Pointee::Function => "fn*".to_string(),
                Pointee::Scalar(s) => format!("{}*", s.c_name()),
                Pointee::Struct(name) => format!("{}*", name),
            },
            Self::ListBase { node: None } => "ListBase".to_string(),
            Self::ListBase { node: Some(node) } => format!("ListBase<{}>", node),
            Self::Union(members) => {
                let inner: Vec<String> = members
                    .iter()
                    .map(|m| format!("{}: {}", m.name, m.ty.describe()))
                    .collect();
                format!("union {{ {} }}", inner.join(", "))
            }
        }
    }
}

fn serialize_type<S: Serializer>(ty: &ConcreteType, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ty.describe())
}

/// One field of a resolved layout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedField {
    pub name: String,
    #[serde(rename = "type", serialize_with = "serialize_type")]
    pub ty: ConcreteType,
    pub offset: usize,
    pub size: usize,
}

/// A schema frozen for one host version
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedLayout {
    name: String,
    size: usize,
    fields: Vec<ResolvedField>,
    anonymous: Vec<String>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl ResolvedLayout {
    fn new(name: String, fields: Vec<ResolvedField>, anonymous: Vec<String>) -> Self {
        let size = fields.iter().map(|f| f.size).sum();
        let index = fields
            .iter()
            .enumerate()
            .map(|(i, f)| (f.name.clone(), i))
            .collect();
        Self {
            name,
            size,
            fields,
            anonymous,
            index,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total size in bytes
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn fields(&self) -> &[ResolvedField] {
        &self.fields
    }

    /// Names of anonymous union fields, whose members overlap
    pub fn anonymous(&self) -> &[String] {
        &self.anonymous
    }

    pub fn field(&self, name: &str) -> Option<&ResolvedField> {
        self.index.get(name).map(|&i| &self.fields[i])
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn offset_of(&self, name: &str) -> Option<usize> {
        self.lookup(name).map(|(offset, _)| offset)
    }

    /// Find a field or anonymous union member by name
    ///
    /// Returns the absolute offset within this layout along with the field.
    pub fn lookup(&self, name: &str) -> Option<(usize, &ResolvedField)> {
        if let Some(field) = self.field(name) {
            return Some((field.offset, field));
        }

        self.anonymous
            .iter()
            .filter_map(|anon| self.field(anon))
            .find_map(|union| match &union.ty {
                ConcreteType::Union(members) => members
                    .iter()
                    .find(|m| m.name == name)
                    .map(|m| (union.offset + m.offset, m)),
                _ => None,
            })
    }
}

/// Every schema resolved for one host version
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutTable {
    version: HostVersion,
    order: Vec<String>,
    layouts: HashMap<String, ResolvedLayout>,
}

impl LayoutTable {
    /// Resolve all `schemas` for `version`
    ///
    /// Fails on the first unresolvable declaration; nothing is returned
    /// for the other schemas in that case.
    pub fn resolve(
        schemas: &[Schema],
        version: impl Into<HostVersion>,
    ) -> Result<Self, ResolutionError> {
        let version = version.into();
        let mut by_name = HashMap::with_capacity(schemas.len());
        for schema in schemas {
            if by_name.insert(schema.name(), schema).is_some() {
                return Err(ResolutionError::DuplicateSchema(schema.name().to_string()));
            }
        }

        let mut resolver = Resolver {
            version,
            schemas: by_name,
            done: HashMap::new(),
            stack: Vec::new(),
        };
        for schema in schemas {
            resolver.resolve_schema(schema.name())?;
        }

        tracing::debug!(
            "Resolved {} schemas for host version {}",
            schemas.len(),
            version
        );

        Ok(Self {
            version,
            order: schemas.iter().map(|s| s.name().to_string()).collect(),
            layouts: resolver.done,
        })
    }

    pub fn version(&self) -> HostVersion {
        self.version
    }

    pub fn get(&self, name: &str) -> Option<&ResolvedLayout> {
        self.layouts.get(name)
    }

    pub fn layout(&self, name: &str) -> Result<&ResolvedLayout, Error> {
        self.get(name)
            .ok_or_else(|| Error::UnknownSchema(name.to_string()))
    }

    /// Layouts in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedLayout> {
        self.order.iter().filter_map(|name| self.layouts.get(name))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

struct Resolver<'a> {
    version: HostVersion,
    schemas: HashMap<&'a str, &'a Schema>,
    done: HashMap<String, ResolvedLayout>,
    /// Schemas currently being resolved (by-value nesting chain)
    stack: Vec<String>,
}

impl<'a> Resolver<'a> {
    fn resolve_schema(&mut self, name: &str) -> Result<(), ResolutionError> {
        if self.done.contains_key(name) {
            return Ok(());
        }
        let schema: &'a Schema = self.schemas[name];
        check_duplicates(schema)?;

        self.stack.push(name.to_string());
        let mut fields = Vec::new();
        let mut anonymous = Vec::new();
        let mut placed = HashSet::new();
        let mut offset = 0;

        for decl in schema.decls() {
            if !decl.when.matches(self.version) || placed.contains(decl.name.as_str()) {
                continue;
            }

            let ty = match &decl.shape {
                FieldShape::Single(ty) => ty,
                FieldShape::Variant(arms) => arms
                    .iter()
                    .find(|(pred, _)| pred.matches(self.version))
                    .map(|(_, ty)| ty)
                    .ok_or_else(|| ResolutionError::NoMatchingBranch {
                        schema: name.to_string(),
                        field: decl.name.clone(),
                        version: self.version.to_string(),
                    })?,
            };

            let ty = self.concrete(name, &decl.name, ty)?;
            let size = ty.size();
            if decl.anonymous {
                anonymous.push(decl.name.clone());
            }
            fields.push(ResolvedField {
                name: decl.name.clone(),
                ty,
                offset,
                size,
            });
            placed.insert(decl.name.as_str());
            offset += size;
        }

        self.stack.pop();
        let layout = ResolvedLayout::new(name.to_string(), fields, anonymous);
        tracing::trace!(
            "{}: {} fields, {} bytes",
            name,
            layout.fields().len(),
            layout.size()
        );
        self.done.insert(name.to_string(), layout);
        Ok(())
    }

    fn require(&self, owner: &str, field: &str, target: &str) -> Result<(), ResolutionError> {
        if self.schemas.contains_key(target) {
            Ok(())
        } else {
            Err(ResolutionError::UnknownSchema {
                schema: owner.to_string(),
                field: field.to_string(),
                target: target.to_string(),
            })
        }
    }

    fn concrete(
        &mut self,
        owner: &str,
        field: &str,
        ty: &FieldType,
    ) -> Result<ConcreteType, ResolutionError> {
        Ok(match ty {
            FieldType::Scalar(s) => ConcreteType::Scalar(*s),
            FieldType::Array(element, len) => ConcreteType::Array {
                element: Box::new(self.concrete(owner, field, element)?),
                len: *len,
            },
            FieldType::Struct(target) => {
                self.require(owner, field, target)?;
                if self.stack.iter().any(|s| s == target) {
                    return Err(ResolutionError::RecursiveValue {
                        schema: owner.to_string(),
                        field: field.to_string(),
                        target: target.clone(),
                    });
                }
                self.resolve_schema(target)?;
                ConcreteType::Struct {
                    name: target.clone(),
                    size: self.done[target.as_str()].size(),
                }
            }
            FieldType::Pointer(target) => ConcreteType::Pointer(match target {
                PointerTarget::Opaque => Pointee::Opaque,
                PointerTarget::CString => Pointee::CString,
                PointerTarget::Function => Pointee::Function,
                PointerTarget::Scalar(s) => Pointee::Scalar(*s),
                PointerTarget::Struct(name) => {
                    self.require(owner, field, name)?;
                    Pointee::Struct(name.clone())
                }
            }),
            FieldType::SelfPointer => ConcreteType::Pointer(Pointee::Struct(owner.to_string())),
            FieldType::ListBase(node) => {
                if let Some(node) = node {
                    self.require(owner, field, node)?;
                }
                ConcreteType::ListBase { node: node.clone() }
            }
            FieldType::Union(members) => {
                if members.is_empty() {
                    return Err(ResolutionError::EmptyUnion {
                        schema: owner.to_string(),
                        field: field.to_string(),
                    });
                }
                let mut resolved = Vec::with_capacity(members.len());
                for (name, member) in members {
                    let ty = self.concrete(owner, field, member)?;
                    resolved.push(ResolvedField {
                        name: name.clone(),
                        size: ty.size(),
                        ty,
                        offset: 0,
                    });
                }
                ConcreteType::Union(resolved)
            }
            FieldType::Deferred(thunk) => {
                let mut ty = thunk();
                let mut depth = 1;
                while let FieldType::Deferred(next) = ty {
                    depth += 1;
                    if depth > MAX_DEFERRED_DEPTH {
                        return Err(ResolutionError::UnresolvedDeferred {
                            schema: owner.to_string(),
                            field: field.to_string(),
                        });
                    }
                    ty = next();
                }
                self.concrete(owner, field, &ty)?
            }
        })
    }
}

/// Two unconditional declarations of one name can never be told apart
fn check_duplicates(schema: &Schema) -> Result<(), ResolutionError> {
    let mut unconditional = HashSet::new();
    for decl in schema.decls() {
        if decl.when.is_always() && !unconditional.insert(decl.name.as_str()) {
            return Err(ResolutionError::DuplicateField {
                schema: schema.name().to_string(),
                field: decl.name.clone(),
            });
        }
    }
    Ok(())
}
