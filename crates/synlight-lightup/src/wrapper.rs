//! The wrapper contract.
//!
//! A wrapper kind targets one library node type that may or may not exist in
//! the loaded version. A wrapper value holds one node of that type, or
//! nothing when default-constructed, and exposes its properties through the
//! accessors synthesized for the kind.
//!
//! Construction from a general node is checked (`cast`). Widening back to a
//! plain node is always allowed. Kinds are not related by inheritance;
//! sibling conversions go through [`Wrapped::upcast`] and
//! [`Wrapped::downcast`].

use crate::accessor::AccessorSynthesizer;
use crate::error::{LightupError, Result};
use crate::registry::LightupRegistry;
use crate::resolver::TypeHandle;
use std::fmt;
use std::sync::Arc;
use synlight_syntax::{NodeKind, SyntaxNode, TypedNode};
use tracing::{trace, warn};

/// Name reported for the missing node of a default wrapper or a null cast.
pub const NULL_NODE: &str = "<null>";

/// A wrapper kind.
///
/// Implementations are generated by `syntax_wrapper!`.
pub trait SyntaxWrapper: Sized + Clone + Default + Send + Sync + 'static {
    /// Fully-qualified name of the target type.
    const WRAPPED_TYPE_NAME: &'static str;

    /// Stable type every target node derives from, in every library version.
    type Base: NodeKind;

    /// Accessors synthesized once per registry.
    type Accessors: Send + Sync + 'static;

    fn synthesize_accessors(
        handle: &TypeHandle,
        synthesizer: &AccessorSynthesizer,
    ) -> Self::Accessors;

    fn from_wrapped(wrapped: Wrapped<Self>) -> Self;

    fn wrapped(&self) -> &Wrapped<Self>;

    fn into_wrapped(self) -> Wrapped<Self>;

    /// Whether `node` can be wrapped: non-null and of the target type or a
    /// type derived from it. False whenever the target type is absent.
    fn is_instance(registry: &LightupRegistry, node: Option<&SyntaxNode>) -> bool {
        node.is_some_and(|node| registry.kind::<Self>().is_instance(node))
    }

    /// Checked construction from a general node.
    fn cast(registry: &LightupRegistry, node: Option<SyntaxNode>) -> Result<Self> {
        let Some(node) = node else {
            return Err(LightupError::invalid_cast(NULL_NODE, Self::WRAPPED_TYPE_NAME));
        };
        let kind = registry.kind::<Self>();
        if !kind.is_instance(&node) {
            return Err(LightupError::invalid_cast(
                node.type_name(),
                Self::WRAPPED_TYPE_NAME,
            ));
        }
        Ok(Self::from_wrapped(Wrapped::bind(node, registry.clone(), kind)))
    }

    /// The wrapped node; `None` for a default wrapper.
    fn syntax_node(&self) -> Option<&SyntaxNode> {
        self.wrapped().node()
    }

    /// Widen to the wrapped node.
    fn into_node(self) -> Option<SyntaxNode> {
        self.into_wrapped().into_node()
    }

    /// Widen to the stable base type.
    fn into_base(self) -> Option<TypedNode<Self::Base>> {
        self.into_node().and_then(TypedNode::cast)
    }

    fn registry(&self) -> Option<&LightupRegistry> {
        self.wrapped().registry()
    }

    fn is_default(&self) -> bool {
        self.wrapped().is_default()
    }
}

/// Per-registry state of one wrapper kind.
pub struct WrapperKind<W: SyntaxWrapper> {
    handle: TypeHandle,
    accessors: W::Accessors,
}

impl<W: SyntaxWrapper> WrapperKind<W> {
    pub(crate) fn build(registry: &LightupRegistry) -> Self {
        let mut handle = registry.resolve_type(W::WRAPPED_TYPE_NAME);
        let foreign_base = handle
            .syntax_type()
            .is_some_and(|ty| !ty.derives_from_name(<W::Base as NodeKind>::TYPE_NAME));
        if foreign_base {
            warn!(
                wrapper = W::WRAPPED_TYPE_NAME,
                base = <W::Base as NodeKind>::TYPE_NAME,
                "wrapped type does not derive from its base; treating it as absent"
            );
            handle = TypeHandle::absent(W::WRAPPED_TYPE_NAME);
        }
        let accessors = W::synthesize_accessors(&handle, registry.synthesizer());
        trace!(
            wrapper = W::WRAPPED_TYPE_NAME,
            absent = handle.is_absent(),
            "initialized wrapper kind"
        );
        Self { handle, accessors }
    }

    pub fn handle(&self) -> &TypeHandle {
        &self.handle
    }

    pub fn accessors(&self) -> &W::Accessors {
        &self.accessors
    }

    #[inline]
    pub fn is_instance(&self, node: &SyntaxNode) -> bool {
        self.handle.can_wrap(node)
    }
}

impl<W: SyntaxWrapper> fmt::Debug for WrapperKind<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrapperKind")
            .field("wrapper", &W::WRAPPED_TYPE_NAME)
            .field("handle", &self.handle)
            .finish()
    }
}

struct Bound<W: SyntaxWrapper> {
    node: SyntaxNode,
    registry: LightupRegistry,
    kind: Arc<WrapperKind<W>>,
}

/// Storage shared by every wrapper kind: a bound node or nothing.
pub struct Wrapped<W: SyntaxWrapper> {
    inner: Option<Bound<W>>,
}

impl<W: SyntaxWrapper> Wrapped<W> {
    pub(crate) fn bind(node: SyntaxNode, registry: LightupRegistry, kind: Arc<WrapperKind<W>>) -> Self {
        Self {
            inner: Some(Bound {
                node,
                registry,
                kind,
            }),
        }
    }

    /// Bind without an instance check. Callers guarantee the node's type.
    pub(crate) fn bind_unchecked(registry: &LightupRegistry, node: SyntaxNode) -> Self {
        Self::bind(node, registry.clone(), registry.kind::<W>())
    }

    pub fn node(&self) -> Option<&SyntaxNode> {
        self.inner.as_ref().map(|b| &b.node)
    }

    pub fn into_node(self) -> Option<SyntaxNode> {
        self.inner.map(|b| b.node)
    }

    pub fn registry(&self) -> Option<&LightupRegistry> {
        self.inner.as_ref().map(|b| &b.registry)
    }

    pub fn is_default(&self) -> bool {
        self.inner.is_none()
    }

    /// The node and the kind's accessors.
    ///
    /// A default wrapper holds no node, so every accessor on it fails with
    /// `InvalidCast`.
    pub fn parts(&self) -> Result<(&SyntaxNode, &W::Accessors)> {
        match &self.inner {
            Some(bound) => Ok((&bound.node, bound.kind.accessors())),
            None => Err(LightupError::invalid_cast(NULL_NODE, W::WRAPPED_TYPE_NAME)),
        }
    }

    /// A wrapper of the same kind around `node`, which a with-accessor of
    /// this kind produced.
    pub(crate) fn rewrap(&self, node: SyntaxNode) -> W {
        match &self.inner {
            Some(bound) => W::from_wrapped(Self::bind(
                node,
                bound.registry.clone(),
                bound.kind.clone(),
            )),
            None => W::default(),
        }
    }

    /// Unchecked conversion to a less specific sibling kind.
    pub fn upcast<U: SyntaxWrapper>(&self) -> U {
        match &self.inner {
            Some(bound) => U::from_wrapped(Wrapped::bind_unchecked(
                &bound.registry,
                bound.node.clone(),
            )),
            None => U::default(),
        }
    }

    /// Checked conversion to a more specific sibling kind.
    pub fn downcast<U: SyntaxWrapper>(&self) -> Result<U> {
        match &self.inner {
            Some(bound) => U::cast(&bound.registry, Some(bound.node.clone())),
            None => Err(LightupError::invalid_cast(NULL_NODE, U::WRAPPED_TYPE_NAME)),
        }
    }
}

impl<W: SyntaxWrapper> Default for Wrapped<W> {
    fn default() -> Self {
        Self { inner: None }
    }
}

impl<W: SyntaxWrapper> Clone for Wrapped<W> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.as_ref().map(|b| Bound {
                node: b.node.clone(),
                registry: b.registry.clone(),
                kind: b.kind.clone(),
            }),
        }
    }
}

/// Wrappers compare by their nodes.
impl<W: SyntaxWrapper> PartialEq for Wrapped<W> {
    fn eq(&self, other: &Self) -> bool {
        self.node() == other.node()
    }
}

impl<W: SyntaxWrapper> fmt::Debug for Wrapped<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node() {
            Some(node) => fmt::Debug::fmt(node, f),
            None => f.write_str(NULL_NODE),
        }
    }
}

/// Declares a wrapper kind.
///
/// ```ignore
/// syntax_wrapper! {
///     pub struct DiscardDesignationSyntaxWrapper {
///         wraps: "CSharp.Syntax.DiscardDesignationSyntax",
///         base: CSharpSyntaxNode,
///         accessors: DiscardDesignationAccessors,
///         properties {
///             underscore_token, with_underscore_token: SyntaxToken = "UnderscoreToken";
///         }
///         separated {}
///     }
/// }
/// ```
///
/// `properties` entries get a getter and a with-setter. `separated` entries
/// are separated lists of another wrapper kind and surface as
/// [`crate::SeparatedSyntaxListWrapper`].
macro_rules! syntax_wrapper {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            wraps: $type_name:literal,
            base: $base:ty,
            accessors: $accessors:ident,
            properties {
                $(
                    $(#[$pmeta:meta])*
                    $getter:ident, $setter:ident : $pty:ty = $prop:literal;
                )*
            }
            separated {
                $(
                    $(#[$smeta:meta])*
                    $sgetter:ident, $ssetter:ident : $sel:ty = $sprop:literal;
                )*
            }
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Default, PartialEq, Debug)]
        $vis struct $name {
            wrapped: $crate::wrapper::Wrapped<$name>,
        }

        #[doc = concat!("Synthesized accessors of [`", stringify!($name), "`].")]
        $vis struct $accessors {
            $(
                $getter: $crate::accessor::PropertyAccessor<$pty>,
                $setter: $crate::accessor::WithPropertyAccessor<$pty>,
            )*
            $(
                $sgetter: $crate::accessor::PropertyAccessor<::synlight_syntax::SeparatedSyntaxList>,
                $ssetter: $crate::accessor::WithPropertyAccessor<::synlight_syntax::SeparatedSyntaxList>,
            )*
        }

        impl $crate::wrapper::SyntaxWrapper for $name {
            const WRAPPED_TYPE_NAME: &'static str = $type_name;
            type Base = $base;
            type Accessors = $accessors;

            #[allow(unused_variables)]
            fn synthesize_accessors(
                handle: &$crate::resolver::TypeHandle,
                synthesizer: &$crate::accessor::AccessorSynthesizer,
            ) -> $accessors {
                $accessors {
                    $(
                        $getter: synthesizer.property_accessor::<$pty>(handle, $prop),
                        $setter: synthesizer.with_property_accessor::<$pty>(handle, $prop),
                    )*
                    $(
                        $sgetter: synthesizer.separated_list_accessor(
                            handle,
                            $sprop,
                            <$sel as $crate::wrapper::SyntaxWrapper>::WRAPPED_TYPE_NAME,
                        ),
                        $ssetter: synthesizer.with_separated_list_accessor(
                            handle,
                            $sprop,
                            <$sel as $crate::wrapper::SyntaxWrapper>::WRAPPED_TYPE_NAME,
                        ),
                    )*
                }
            }

            fn from_wrapped(wrapped: $crate::wrapper::Wrapped<Self>) -> Self {
                Self { wrapped }
            }

            fn wrapped(&self) -> &$crate::wrapper::Wrapped<Self> {
                &self.wrapped
            }

            fn into_wrapped(self) -> $crate::wrapper::Wrapped<Self> {
                self.wrapped
            }
        }

        impl $name {
            $(
                $(#[$pmeta])*
                pub fn $getter(&self) -> $crate::error::Result<$pty> {
                    let (node, accessors) = self.wrapped.parts()?;
                    (accessors.$getter)(node)
                }

                #[doc = concat!("Copy with `", $prop, "` replaced.")]
                pub fn $setter(&self, value: $pty) -> $crate::error::Result<Self> {
                    let (node, accessors) = self.wrapped.parts()?;
                    let node = (accessors.$setter)(node, value)?;
                    Ok(self.wrapped.rewrap(node))
                }
            )*
            $(
                $(#[$smeta])*
                pub fn $sgetter(
                    &self,
                ) -> $crate::error::Result<$crate::separated_list::SeparatedSyntaxListWrapper<$sel>> {
                    let (node, accessors) = self.wrapped.parts()?;
                    let list = (accessors.$sgetter)(node)?;
                    Ok($crate::separated_list::SeparatedSyntaxListWrapper::from_list(
                        self.wrapped.registry().cloned(),
                        list,
                    ))
                }

                #[doc = concat!("Copy with `", $sprop, "` replaced.")]
                pub fn $ssetter(
                    &self,
                    value: $crate::separated_list::SeparatedSyntaxListWrapper<$sel>,
                ) -> $crate::error::Result<Self> {
                    let (node, accessors) = self.wrapped.parts()?;
                    let node = (accessors.$ssetter)(node, value.into_list())?;
                    Ok(self.wrapped.rewrap(node))
                }
            )*
        }

        impl From<$name> for Option<::synlight_syntax::SyntaxNode> {
            fn from(wrapper: $name) -> Self {
                <$name as $crate::wrapper::SyntaxWrapper>::into_node(wrapper)
            }
        }
    };
}

pub(crate) use syntax_wrapper;
