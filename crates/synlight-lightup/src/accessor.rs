//! Accessor synthesis.
//!
//! For every property a wrapper kind exposes, the synthesizer inspects the
//! resolved type's metadata once and produces a closure that reads (or
//! replaces) the property on any node of that type. When the type is
//! absent, the property is missing, or its declared type does not fit the
//! requested Rust type, the closure it returns is a sentinel that reports
//! `FeatureUnavailable` when called. Synthesis itself never fails.
//!
//! Accessors are cached per (type, property, direction, value type), so
//! asking twice returns the same closure.

use crate::error::{LightupError, Result};
use crate::resolver::TypeHandle;
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use synlight_syntax::{
    NodeKind, SeparatedSyntaxList, SyntaxLibrary, SyntaxNode, SyntaxToken, SyntaxTokenList,
    SyntaxType, SyntaxValue, TypedNode, TypedNodeList, TypedSeparatedList, ValueType,
};
use tracing::{debug, trace};

/// Reads one property of an owner node.
pub type PropertyAccessor<T> = Arc<dyn Fn(&SyntaxNode) -> Result<T> + Send + Sync>;

/// Produces a copy of an owner node with one property replaced.
pub type WithPropertyAccessor<T> = Arc<dyn Fn(&SyntaxNode, T) -> Result<SyntaxNode> + Send + Sync>;

// =============================================================================
// Value conversion
// =============================================================================

/// A Rust type that can stand for a property value.
///
/// `value_type` is the declared type the accessor is synthesized against.
pub trait LightupValue: Sized + Send + Sync + 'static {
    fn value_type() -> ValueType;

    /// Convert a slot value; `None` when the shapes do not match.
    fn from_syntax(value: SyntaxValue) -> Option<Self>;

    fn into_syntax(self) -> SyntaxValue;
}

impl LightupValue for SyntaxToken {
    fn value_type() -> ValueType {
        ValueType::Token
    }

    fn from_syntax(value: SyntaxValue) -> Option<Self> {
        match value {
            SyntaxValue::Token(token) => Some(token),
            _ => None,
        }
    }

    fn into_syntax(self) -> SyntaxValue {
        SyntaxValue::Token(self)
    }
}

impl LightupValue for SyntaxTokenList {
    fn value_type() -> ValueType {
        ValueType::TokenList
    }

    fn from_syntax(value: SyntaxValue) -> Option<Self> {
        match value {
            SyntaxValue::TokenList(tokens) => Some(tokens),
            _ => None,
        }
    }

    fn into_syntax(self) -> SyntaxValue {
        SyntaxValue::TokenList(self)
    }
}

/// A nullable child node. `None` is a present property holding no node.
impl<K: NodeKind> LightupValue for Option<TypedNode<K>> {
    fn value_type() -> ValueType {
        ValueType::node(K::TYPE_NAME)
    }

    fn from_syntax(value: SyntaxValue) -> Option<Self> {
        match value {
            SyntaxValue::Node(None) => Some(None),
            SyntaxValue::Node(Some(node)) => TypedNode::cast(node).map(Some),
            _ => None,
        }
    }

    fn into_syntax(self) -> SyntaxValue {
        SyntaxValue::Node(self.map(TypedNode::into_node))
    }
}

impl<K: NodeKind> LightupValue for TypedNodeList<K> {
    fn value_type() -> ValueType {
        ValueType::node_list(K::TYPE_NAME)
    }

    fn from_syntax(value: SyntaxValue) -> Option<Self> {
        match value {
            SyntaxValue::NodeList(list) => TypedNodeList::cast(list),
            _ => None,
        }
    }

    fn into_syntax(self) -> SyntaxValue {
        SyntaxValue::NodeList(self.into_list())
    }
}

impl<K: NodeKind> LightupValue for TypedSeparatedList<K> {
    fn value_type() -> ValueType {
        ValueType::separated_list(K::TYPE_NAME)
    }

    fn from_syntax(value: SyntaxValue) -> Option<Self> {
        match value {
            SyntaxValue::SeparatedList(list) => TypedSeparatedList::cast(list),
            _ => None,
        }
    }

    fn into_syntax(self) -> SyntaxValue {
        SyntaxValue::SeparatedList(self.into_list())
    }
}

fn separated_from_syntax(value: SyntaxValue) -> Option<SeparatedSyntaxList> {
    match value {
        SyntaxValue::SeparatedList(list) => Some(list),
        _ => None,
    }
}

// =============================================================================
// Cache bookkeeping
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AccessorDirection {
    Get,
    With,
}

impl fmt::Display for AccessorDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessorDirection::Get => f.write_str("get"),
            AccessorDirection::With => f.write_str("with"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct AccessorKey {
    type_name: Arc<str>,
    property: Arc<str>,
    direction: AccessorDirection,
    value_type: ValueType,
    /// Absent handles never share an entry with a resolved handle of the
    /// same name.
    absent: bool,
    /// `TypeId` of the accessor closure type; keeps downcasts infallible.
    accessor_type: TypeId,
}

struct CachedAccessor {
    accessor: Arc<dyn Any + Send + Sync>,
    available: bool,
}

/// Counters describing the work the synthesizer has done.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SynthesisStats {
    /// Accessors built, sentinels included.
    pub synthesized: usize,
    /// Accessors that report `FeatureUnavailable`.
    pub sentinels: usize,
    /// Requests answered from the cache.
    pub cache_hits: usize,
}

/// Availability of one synthesized accessor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureStatus {
    pub type_name: Arc<str>,
    pub property: Arc<str>,
    pub direction: AccessorDirection,
    pub value_type: ValueType,
    pub available: bool,
}

impl fmt::Display for FeatureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}.{}: {} ({})",
            self.direction,
            self.type_name,
            self.property,
            self.value_type,
            if self.available { "available" } else { "unavailable" }
        )
    }
}

// =============================================================================
// AccessorSynthesizer
// =============================================================================

/// Builds and caches property accessors for one library.
pub struct AccessorSynthesizer {
    library: Arc<SyntaxLibrary>,
    cache: DashMap<AccessorKey, CachedAccessor, FxBuildHasher>,
    synthesized: AtomicUsize,
    sentinels: AtomicUsize,
    cache_hits: AtomicUsize,
}

impl AccessorSynthesizer {
    pub fn new(library: Arc<SyntaxLibrary>) -> Self {
        Self {
            library,
            cache: DashMap::with_hasher(FxBuildHasher),
            synthesized: AtomicUsize::new(0),
            sentinels: AtomicUsize::new(0),
            cache_hits: AtomicUsize::new(0),
        }
    }

    pub fn library(&self) -> &Arc<SyntaxLibrary> {
        &self.library
    }

    /// Getter for `property` on the type behind `handle`.
    ///
    /// Available when the property exists and its declared type may be read
    /// as `T`: the same shape, and for single nodes a declared type equal to
    /// or derived from `T`'s node type.
    pub fn property_accessor<T: LightupValue>(
        &self,
        handle: &TypeHandle,
        property: &str,
    ) -> PropertyAccessor<T> {
        self.getter(handle, property, T::value_type(), T::from_syntax)
    }

    /// With-accessor for `property` on the type behind `handle`.
    ///
    /// Available when the library offers a `with` operation for the property
    /// and a `T` may be stored in it.
    pub fn with_property_accessor<T: LightupValue>(
        &self,
        handle: &TypeHandle,
        property: &str,
    ) -> WithPropertyAccessor<T> {
        self.setter(handle, property, T::value_type(), T::into_syntax)
    }

    /// Getter for a separated list whose elements are `element_type` nodes.
    pub fn separated_list_accessor(
        &self,
        handle: &TypeHandle,
        property: &str,
        element_type: &str,
    ) -> PropertyAccessor<SeparatedSyntaxList> {
        self.getter(
            handle,
            property,
            ValueType::separated_list(element_type),
            separated_from_syntax,
        )
    }

    pub fn with_separated_list_accessor(
        &self,
        handle: &TypeHandle,
        property: &str,
        element_type: &str,
    ) -> WithPropertyAccessor<SeparatedSyntaxList> {
        self.setter(
            handle,
            property,
            ValueType::separated_list(element_type),
            SyntaxValue::SeparatedList,
        )
    }

    pub fn stats(&self) -> SynthesisStats {
        SynthesisStats {
            synthesized: self.synthesized.load(Ordering::Relaxed),
            sentinels: self.sentinels.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
        }
    }

    /// Every accessor synthesized so far with its availability, sorted.
    pub fn feature_report(&self) -> Vec<FeatureStatus> {
        let mut report: Vec<FeatureStatus> = self
            .cache
            .iter()
            .map(|entry| FeatureStatus {
                type_name: entry.key().type_name.clone(),
                property: entry.key().property.clone(),
                direction: entry.key().direction,
                value_type: entry.key().value_type.clone(),
                available: entry.value().available,
            })
            .collect();
        report.sort_by(|a, b| {
            (&a.type_name, &a.property, a.direction)
                .cmp(&(&b.type_name, &b.property, b.direction))
                .then_with(|| a.value_type.to_string().cmp(&b.value_type.to_string()))
                .then_with(|| a.available.cmp(&b.available))
        });
        report.dedup();
        report
    }

    fn getter<T: Send + Sync + 'static>(
        &self,
        handle: &TypeHandle,
        property: &str,
        expected: ValueType,
        convert: fn(SyntaxValue) -> Option<T>,
    ) -> PropertyAccessor<T> {
        let key = AccessorKey {
            type_name: Arc::from(handle.name()),
            property: Arc::from(property),
            direction: AccessorDirection::Get,
            value_type: expected.clone(),
            absent: handle.is_absent(),
            accessor_type: TypeId::of::<PropertyAccessor<T>>(),
        };
        self.cached(key, || self.synthesize_getter(handle, property, &expected, convert))
    }

    fn setter<T: Send + Sync + 'static>(
        &self,
        handle: &TypeHandle,
        property: &str,
        expected: ValueType,
        convert: fn(T) -> SyntaxValue,
    ) -> WithPropertyAccessor<T> {
        let key = AccessorKey {
            type_name: Arc::from(handle.name()),
            property: Arc::from(property),
            direction: AccessorDirection::With,
            value_type: expected.clone(),
            absent: handle.is_absent(),
            accessor_type: TypeId::of::<WithPropertyAccessor<T>>(),
        };
        self.cached(key, || self.synthesize_setter(handle, property, &expected, convert))
    }

    /// Look `key` up, building and inserting on a miss.
    ///
    /// Concurrent misses on one key race on the entry; the first insert wins
    /// and every caller gets that accessor.
    fn cached<A>(&self, key: AccessorKey, build: impl Fn() -> (A, bool)) -> A
    where
        A: Clone + Send + Sync + 'static,
    {
        if let Some(entry) = self.cache.get(&key) {
            if let Some(accessor) = entry.accessor.downcast_ref::<A>() {
                self.cache_hits.fetch_add(1, Ordering::Relaxed);
                trace!(
                    type_name = %key.type_name,
                    property = %key.property,
                    direction = %key.direction,
                    "accessor cache hit"
                );
                return accessor.clone();
            }
        }

        let stored = self
            .cache
            .entry(key)
            .or_insert_with(|| {
                let (accessor, available) = build();
                self.synthesized.fetch_add(1, Ordering::Relaxed);
                if !available {
                    self.sentinels.fetch_add(1, Ordering::Relaxed);
                }
                CachedAccessor {
                    accessor: Arc::new(accessor),
                    available,
                }
            })
            .accessor
            .clone();
        match stored.downcast_ref::<A>() {
            Some(accessor) => accessor.clone(),
            None => build().0,
        }
    }

    fn synthesize_getter<T: Send + Sync + 'static>(
        &self,
        handle: &TypeHandle,
        property: &str,
        expected: &ValueType,
        convert: fn(SyntaxValue) -> Option<T>,
    ) -> (PropertyAccessor<T>, bool) {
        let Some(owner) = self.resolve_property(handle, property, AccessorDirection::Get) else {
            return (unavailable_getter(handle.name(), property), false);
        };
        let Some(descriptor) = owner.find_property(property) else {
            return (unavailable_getter(handle.name(), property), false);
        };
        if !self
            .library
            .is_value_assignable(&descriptor.value_type, expected)
        {
            debug!(
                type_name = handle.name(),
                property,
                declared = %descriptor.value_type,
                expected = %expected,
                "property type does not fit getter"
            );
            return (unavailable_getter(handle.name(), property), false);
        }

        let slot = descriptor.slot;
        let property: Arc<str> = Arc::from(property);
        let expected_name = expected.to_string();
        let accessor: PropertyAccessor<T> = Arc::new(move |node: &SyntaxNode| {
            check_owner(&owner, node)?;
            let value = node.slot(slot).ok_or_else(|| {
                LightupError::feature_unavailable(node.type_name(), &*property)
            })?;
            convert(value.clone())
                .ok_or_else(|| LightupError::invalid_cast(value.describe(), expected_name.as_str()))
        });
        (accessor, true)
    }

    fn synthesize_setter<T: Send + Sync + 'static>(
        &self,
        handle: &TypeHandle,
        property: &str,
        expected: &ValueType,
        convert: fn(T) -> SyntaxValue,
    ) -> (WithPropertyAccessor<T>, bool) {
        let Some(owner) = self.resolve_property(handle, property, AccessorDirection::With) else {
            return (unavailable_setter(handle.name(), property), false);
        };
        let Some(descriptor) = owner.find_property(property) else {
            return (unavailable_setter(handle.name(), property), false);
        };
        if !descriptor.has_with {
            debug!(
                type_name = handle.name(),
                property,
                "library has no with operation for property"
            );
            return (unavailable_setter(handle.name(), property), false);
        }
        if !self
            .library
            .is_value_assignable(expected, &descriptor.value_type)
        {
            debug!(
                type_name = handle.name(),
                property,
                declared = %descriptor.value_type,
                expected = %expected,
                "property type does not fit with-accessor"
            );
            return (unavailable_setter(handle.name(), property), false);
        }

        let property: Arc<str> = Arc::from(property);
        let accessor: WithPropertyAccessor<T> = Arc::new(move |node: &SyntaxNode, value: T| {
            check_owner(&owner, node)?;
            Ok(node.with_property(&property, convert(value))?)
        });
        (accessor, true)
    }

    /// The resolved owner type, if it declares or inherits `property`.
    fn resolve_property(
        &self,
        handle: &TypeHandle,
        property: &str,
        direction: AccessorDirection,
    ) -> Option<Arc<SyntaxType>> {
        let Some(owner) = handle.syntax_type() else {
            debug!(
                type_name = handle.name(),
                property,
                %direction,
                "accessor against absent type"
            );
            return None;
        };
        if owner.find_property(property).is_none() {
            debug!(
                type_name = handle.name(),
                property,
                %direction,
                version = %self.library.version(),
                "property absent from loaded library"
            );
            return None;
        }
        Some(owner.clone())
    }
}

impl fmt::Debug for AccessorSynthesizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessorSynthesizer")
            .field("library", &self.library)
            .field("cached", &self.cache.len())
            .field("stats", &self.stats())
            .finish()
    }
}

fn check_owner(owner: &SyntaxType, node: &SyntaxNode) -> Result<()> {
    if node.syntax_type().is_subtype_of(owner) {
        Ok(())
    } else {
        Err(LightupError::invalid_cast(node.type_name(), owner.name()))
    }
}

fn unavailable_getter<T: 'static>(type_name: &str, property: &str) -> PropertyAccessor<T> {
    let error = LightupError::feature_unavailable(type_name, property);
    Arc::new(move |_: &SyntaxNode| Err(error.clone()))
}

fn unavailable_setter<T: 'static>(type_name: &str, property: &str) -> WithPropertyAccessor<T> {
    let error = LightupError::feature_unavailable(type_name, property);
    Arc::new(move |_: &SyntaxNode, _: T| Err(error.clone()))
}
