//! The lightup registry.
//!
//! One registry serves one loaded library. It owns the type resolver, the
//! accessor synthesizer and the per-kind state of every wrapper kind used so
//! far. Handles are cheap to clone and shared between threads.
//!
//! Most processes load exactly one library; [`LightupRegistry::install`] and
//! [`LightupRegistry::global`] give them a process-wide instance.

use crate::accessor::{AccessorSynthesizer, FeatureStatus, SynthesisStats};
use crate::resolver::{TypeHandle, TypeResolver};
use crate::wrapper::{SyntaxWrapper, WrapperKind};
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::{Arc, OnceLock};
use synlight_syntax::{LibraryConfig, SyntaxLibrary};
use tracing::trace;

static GLOBAL: OnceLock<LightupRegistry> = OnceLock::new();

struct RegistryInner {
    library: Arc<SyntaxLibrary>,
    resolver: TypeResolver,
    synthesizer: AccessorSynthesizer,
    /// `TypeId` of the wrapper -> `Arc<WrapperKind<W>>`.
    kinds: DashMap<TypeId, Arc<dyn Any + Send + Sync>, FxBuildHasher>,
}

/// Shared handle to the lightup state of one library.
#[derive(Clone)]
pub struct LightupRegistry {
    inner: Arc<RegistryInner>,
}

impl LightupRegistry {
    pub fn new(library: Arc<SyntaxLibrary>) -> Self {
        trace!(
            library = library.name(),
            version = %library.version(),
            "creating lightup registry"
        );
        Self {
            inner: Arc::new(RegistryInner {
                resolver: TypeResolver::new(library.clone()),
                synthesizer: AccessorSynthesizer::new(library.clone()),
                kinds: DashMap::with_hasher(FxBuildHasher),
                library,
            }),
        }
    }

    pub fn from_library(library: SyntaxLibrary) -> Self {
        Self::new(Arc::new(library))
    }

    /// Load the configured library and build a registry over it.
    pub fn from_config(config: &LibraryConfig) -> synlight_syntax::Result<Self> {
        Ok(Self::from_library(config.load()?))
    }

    #[inline]
    pub fn library(&self) -> &Arc<SyntaxLibrary> {
        &self.inner.library
    }

    pub fn resolver(&self) -> &TypeResolver {
        &self.inner.resolver
    }

    pub fn synthesizer(&self) -> &AccessorSynthesizer {
        &self.inner.synthesizer
    }

    pub fn resolve_type(&self, name: &str) -> TypeHandle {
        self.inner.resolver.resolve(name)
    }

    /// Lazily initialized state of wrapper kind `W`.
    ///
    /// The first call resolves `W`'s target type and synthesizes its
    /// accessors. Concurrent first calls may each build a candidate; only one
    /// is stored and every caller receives the stored one.
    pub fn kind<W: SyntaxWrapper>(&self) -> Arc<WrapperKind<W>> {
        let key = TypeId::of::<W>();
        if let Some(existing) = self.inner.kinds.get(&key) {
            if let Ok(kind) = existing.value().clone().downcast::<WrapperKind<W>>() {
                return kind;
            }
        }

        // Built outside the map: synthesis touches the resolver and
        // synthesizer caches, never `kinds`.
        let built = Arc::new(WrapperKind::<W>::build(self));
        let stored = self
            .inner
            .kinds
            .entry(key)
            .or_insert_with(|| built.clone() as Arc<dyn Any + Send + Sync>)
            .value()
            .clone();
        stored.downcast::<WrapperKind<W>>().unwrap_or(built)
    }

    /// Whether the loaded library has the target type of wrapper kind `W`.
    pub fn supports<W: SyntaxWrapper>(&self) -> bool {
        !self.kind::<W>().handle().is_absent()
    }

    pub fn stats(&self) -> SynthesisStats {
        self.inner.synthesizer.stats()
    }

    pub fn feature_report(&self) -> Vec<FeatureStatus> {
        self.inner.synthesizer.feature_report()
    }

    /// Whether both handles share the same state.
    pub fn ptr_eq(&self, other: &LightupRegistry) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Make `registry` the process-wide instance.
    ///
    /// Fails, handing the registry back, when one is already installed.
    pub fn install(registry: LightupRegistry) -> Result<(), LightupRegistry> {
        GLOBAL.set(registry)
    }

    /// The process-wide instance, if one has been installed.
    pub fn global() -> Option<&'static LightupRegistry> {
        GLOBAL.get()
    }

    /// The process-wide instance, installing one built from `config` first
    /// when none exists yet.
    pub fn global_or_init(config: &LibraryConfig) -> synlight_syntax::Result<&'static Self> {
        if let Some(registry) = GLOBAL.get() {
            return Ok(registry);
        }
        let registry = Self::from_config(config)?;
        Ok(GLOBAL.get_or_init(move || registry))
    }
}

impl fmt::Debug for LightupRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LightupRegistry")
            .field("library", &self.inner.library)
            .field("kinds", &self.inner.kinds.len())
            .field("stats", &self.stats())
            .finish()
    }
}
