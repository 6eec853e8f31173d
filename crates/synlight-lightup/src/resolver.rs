//! Resolving wrapper target types against the loaded library.
//!
//! A wrapper kind names its target type by fully-qualified name. The
//! resolver looks the name up once per registry and remembers the outcome,
//! present or absent, for the registry's lifetime.

use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use synlight_syntax::{SyntaxLibrary, SyntaxNode, SyntaxType};
use tracing::{debug, trace};

/// Outcome of resolving one type name.
///
/// Cheap to clone. Immutable after resolution.
#[derive(Clone)]
pub struct TypeHandle {
    name: Arc<str>,
    resolved: Option<Arc<SyntaxType>>,
}

impl TypeHandle {
    /// A handle that resolved to nothing.
    pub fn absent(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            resolved: None,
        }
    }

    pub(crate) fn present(ty: Arc<SyntaxType>) -> Self {
        Self {
            name: Arc::from(ty.name()),
            resolved: Some(ty),
        }
    }

    /// The name that was looked up.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn is_absent(&self) -> bool {
        self.resolved.is_none()
    }

    pub fn syntax_type(&self) -> Option<&Arc<SyntaxType>> {
        self.resolved.as_ref()
    }

    /// Whether `node` is an instance of the resolved type or a type derived
    /// from it. Always false for an absent handle.
    pub fn can_wrap(&self, node: &SyntaxNode) -> bool {
        self.resolved
            .as_ref()
            .is_some_and(|ty| node.syntax_type().is_subtype_of(ty))
    }
}

impl PartialEq for TypeHandle {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && match (&self.resolved, &other.resolved) {
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            }
    }
}

impl fmt::Debug for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeHandle")
            .field("name", &self.name)
            .field("absent", &self.is_absent())
            .finish()
    }
}

/// Name-keyed cache of [`TypeHandle`]s for one library.
pub struct TypeResolver {
    library: Arc<SyntaxLibrary>,
    handles: DashMap<Arc<str>, TypeHandle, FxBuildHasher>,
    resolutions: AtomicUsize,
}

impl TypeResolver {
    pub fn new(library: Arc<SyntaxLibrary>) -> Self {
        Self {
            library,
            handles: DashMap::with_hasher(FxBuildHasher),
            resolutions: AtomicUsize::new(0),
        }
    }

    pub fn library(&self) -> &Arc<SyntaxLibrary> {
        &self.library
    }

    /// Resolve `name`. Never fails; an unknown name yields an absent handle.
    ///
    /// The lookup runs at most once per name, even under concurrent callers.
    pub fn resolve(&self, name: &str) -> TypeHandle {
        if let Some(handle) = self.handles.get(name) {
            trace!(name, "type handle cache hit");
            return handle.value().clone();
        }
        self.handles
            .entry(Arc::from(name))
            .or_insert_with(|| self.lookup(name))
            .value()
            .clone()
    }

    /// How many distinct names have been looked up in the library.
    pub fn resolution_count(&self) -> usize {
        self.resolutions.load(Ordering::Relaxed)
    }

    /// Every handle resolved so far, sorted by name.
    pub fn handles(&self) -> Vec<TypeHandle> {
        let mut handles: Vec<TypeHandle> = self.handles.iter().map(|e| e.value().clone()).collect();
        handles.sort_by(|a, b| a.name.cmp(&b.name));
        handles
    }

    fn lookup(&self, name: &str) -> TypeHandle {
        self.resolutions.fetch_add(1, Ordering::Relaxed);
        match self.library.find_type(name) {
            Some(ty) => {
                trace!(name, "resolved syntax type");
                TypeHandle::present(ty.clone())
            }
            None => {
                debug!(
                    name,
                    library = self.library.name(),
                    version = %self.library.version(),
                    "syntax type absent from loaded library"
                );
                TypeHandle::absent(name)
            }
        }
    }
}

impl fmt::Debug for TypeResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeResolver")
            .field("library", &self.library)
            .field("handles", &self.handles.len())
            .finish()
    }
}
