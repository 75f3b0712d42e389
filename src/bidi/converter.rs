//! The [`BiConverter`] handle and its composition rules.

use std::any::{Any, TypeId};
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::iter::ConvertAll;
use crate::error::{ConversionError, Direction, Result};

/// A forward/backward mapping between `A` and `B`.
///
/// Transforms fail with [`ConversionError`] for out-of-domain input. They are
/// never retried or caught by the converter that wraps them.
pub trait Transform<A, B>: Send + Sync {
    /// Map `A → B`.
    fn forward(&self, a: A) -> Result<B>;

    /// Map `B → A`.
    fn backward(&self, b: B) -> Result<A>;

    /// Whether `other` (another transform's concrete value) has the same
    /// configuration as `self`.
    ///
    /// Default: no equivalence beyond reference identity.
    fn equivalent(&self, other: &dyn Any) -> bool {
        let _ = other;
        false
    }
}

/// Shared transform plus a type-erased handle to the same allocation.
struct Node<A, B> {
    transform: Arc<dyn Transform<A, B>>,
    any: Arc<dyn Any + Send + Sync>,
}

impl<A, B> Clone for Node<A, B> {
    fn clone(&self) -> Self {
        Self {
            transform: Arc::clone(&self.transform),
            any: Arc::clone(&self.any),
        }
    }
}

impl<A, B> Node<A, B> {
    fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.any, &other.any)
    }
}

enum Repr<A, B> {
    Forward(Node<A, B>),
    Reverse(Node<B, A>),
}

/// A composable, reversible converter from `A` to `B`.
///
/// Cloning is cheap and yields the same converter: clones compare equal
/// and [`same_as`](Self::same_as) each other.
///
/// # Example
///
/// ```
/// use convert_kit::BiConverter;
///
/// let celsius = BiConverter::<f64, f64>::try_from_fns(
///     |c| Ok(c * 9.0 / 5.0 + 32.0),
///     |f| Ok((f - 32.0) * 5.0 / 9.0),
/// );
/// assert_eq!(celsius.convert(100.0).unwrap(), 212.0);
/// assert_eq!(celsius.reverse().convert(32.0).unwrap(), 0.0);
/// assert!(celsius.reverse().reverse().same_as(&celsius));
/// ```
pub struct BiConverter<A, B> {
    repr: Repr<A, B>,
}

impl<A, B> Clone for BiConverter<A, B> {
    fn clone(&self) -> Self {
        let repr = match &self.repr {
            Repr::Forward(node) => Repr::Forward(node.clone()),
            Repr::Reverse(node) => Repr::Reverse(node.clone()),
        };
        Self { repr }
    }
}

impl<A: 'static, B: 'static> BiConverter<A, B> {
    /// Wrap a transform.
    pub fn new<T>(transform: T) -> Self
    where
        T: Transform<A, B> + 'static,
    {
        let shared = Arc::new(transform);
        let any: Arc<dyn Any + Send + Sync> = shared.clone();
        Self {
            repr: Repr::Forward(Node {
                transform: shared,
                any,
            }),
        }
    }

    /// Build from closures that must return `Some` for every input.
    ///
    /// A `None` result is reported as [`ConversionError::ContractViolation`].
    pub fn from_fns<F, G>(forward: F, backward: G) -> Self
    where
        F: Fn(A) -> Option<B> + Send + Sync + 'static,
        G: Fn(B) -> Option<A> + Send + Sync + 'static,
    {
        Self::new(FnTransform {
            forward: move |a: A| {
                forward(a).ok_or(ConversionError::ContractViolation {
                    converter: FN_CONVERTER,
                    direction: Direction::Forward,
                })
            },
            backward: move |b: B| {
                backward(b).ok_or(ConversionError::ContractViolation {
                    converter: FN_CONVERTER,
                    direction: Direction::Backward,
                })
            },
            _types: PhantomData,
        })
    }

    /// Build from fallible closures.
    pub fn try_from_fns<F, G>(forward: F, backward: G) -> Self
    where
        F: Fn(A) -> Result<B> + Send + Sync + 'static,
        G: Fn(B) -> Result<A> + Send + Sync + 'static,
    {
        Self::new(FnTransform {
            forward,
            backward,
            _types: PhantomData,
        })
    }

    /// Convert `a` forward.
    pub fn convert(&self, a: A) -> Result<B> {
        match &self.repr {
            Repr::Forward(node) => node.transform.forward(a),
            Repr::Reverse(node) => node.transform.backward(a),
        }
    }

    /// Convert `b` backward.
    pub fn convert_back(&self, b: B) -> Result<A> {
        match &self.repr {
            Repr::Forward(node) => node.transform.backward(b),
            Repr::Reverse(node) => node.transform.forward(b),
        }
    }

    /// Absent in, absent out; otherwise [`convert`](Self::convert).
    pub fn convert_nullable(&self, a: Option<A>) -> Result<Option<B>> {
        a.map(|a| self.convert(a)).transpose()
    }

    /// Lazily convert every item of `items`.
    pub fn convert_all<I>(&self, items: I) -> ConvertAll<I::IntoIter, A, B>
    where
        I: IntoIterator<Item = A>,
    {
        ConvertAll::new(items.into_iter(), self.clone())
    }

    /// The backward view `B → A`.
    ///
    /// The view shares this converter's transform, so
    /// `c.reverse().reverse()` is `c` itself.
    pub fn reverse(&self) -> BiConverter<B, A> {
        let repr = match &self.repr {
            Repr::Forward(node) => Repr::Reverse(node.clone()),
            Repr::Reverse(node) => Repr::Forward(node.clone()),
        };
        BiConverter { repr }
    }

    /// Chain `self` then `next`.
    ///
    /// Forward applies `self` then `next`; backward applies `next` then
    /// `self`. Chaining with [`identity`](Self::identity) on either side
    /// returns the other converter unchanged.
    pub fn and_then<C: 'static>(&self, next: &BiConverter<B, C>) -> BiConverter<A, C> {
        if self.is_identity() {
            // A == B here, so `next` already has the requested type.
            let any: Box<dyn Any> = Box::new(next.clone());
            if let Ok(same) = any.downcast::<BiConverter<A, C>>() {
                return *same;
            }
        }
        if next.is_identity() {
            let any: Box<dyn Any> = Box::new(self.clone());
            if let Ok(same) = any.downcast::<BiConverter<A, C>>() {
                return *same;
            }
        }
        BiConverter::new(Chain {
            first: self.clone(),
            second: next.clone(),
        })
    }

    /// Whether `self` and `other` are the same converter instance in the
    /// same orientation.
    pub fn same_as(&self, other: &Self) -> bool {
        match (&self.repr, &other.repr) {
            (Repr::Forward(a), Repr::Forward(b)) => a.ptr_eq(b),
            (Repr::Reverse(a), Repr::Reverse(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Whether this is the pass-through converter.
    pub fn is_identity(&self) -> bool {
        match &self.repr {
            Repr::Forward(node) => node.any.is::<Identity<A>>(),
            Repr::Reverse(node) => node.any.is::<Identity<B>>(),
        }
    }
}

impl<A: 'static> BiConverter<A, A> {
    /// The shared pass-through converter for `A`.
    ///
    /// Every call for the same `A` returns the same instance.
    pub fn identity() -> Self {
        let key = TypeId::of::<A>();
        if let Some(cached) = IDENTITIES.read().get(&key) {
            if let Some(conv) = cached.downcast_ref::<Self>() {
                return conv.clone();
            }
        }
        IDENTITIES
            .write()
            .entry(key)
            .or_insert_with(|| {
                Box::new(Self::new(Identity::<A>(PhantomData))) as Box<dyn Any + Send + Sync>
            })
            .downcast_ref::<Self>()
            .cloned()
            .unwrap_or_else(|| Self::new(Identity::<A>(PhantomData)))
    }
}

impl<A: 'static, B: 'static> PartialEq for BiConverter<A, B> {
    fn eq(&self, other: &Self) -> bool {
        if self.same_as(other) {
            return true;
        }
        match (&self.repr, &other.repr) {
            (Repr::Forward(a), Repr::Forward(b)) => a.transform.equivalent(&*b.any),
            (Repr::Reverse(a), Repr::Reverse(b)) => a.transform.equivalent(&*b.any),
            _ => false,
        }
    }
}

impl<A, B> fmt::Debug for BiConverter<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (orientation, ptr) = match &self.repr {
            Repr::Forward(node) => ("forward", Arc::as_ptr(&node.any) as *const ()),
            Repr::Reverse(node) => ("reverse", Arc::as_ptr(&node.any) as *const ()),
        };
        f.debug_struct("BiConverter")
            .field("orientation", &orientation)
            .field("transform", &ptr)
            .finish()
    }
}

// =============================================================================
// Transforms
// =============================================================================

/// Per-type cache backing [`BiConverter::identity`].
static IDENTITIES: LazyLock<RwLock<FxHashMap<TypeId, Box<dyn Any + Send + Sync>>>> =
    LazyLock::new(|| RwLock::new(FxHashMap::default()));

const FN_CONVERTER: &str = "FnConverter";

struct Identity<A>(PhantomData<fn(A) -> A>);

impl<A> Transform<A, A> for Identity<A> {
    fn forward(&self, a: A) -> Result<A> {
        Ok(a)
    }

    fn backward(&self, a: A) -> Result<A> {
        Ok(a)
    }
}

struct FnTransform<F, G, A, B> {
    forward: F,
    backward: G,
    _types: PhantomData<fn(A, B)>,
}

impl<F, G, A, B> Transform<A, B> for FnTransform<F, G, A, B>
where
    F: Fn(A) -> Result<B> + Send + Sync,
    G: Fn(B) -> Result<A> + Send + Sync,
{
    fn forward(&self, a: A) -> Result<B> {
        (self.forward)(a)
    }

    fn backward(&self, b: B) -> Result<A> {
        (self.backward)(b)
    }
}

/// `A → B → C`, built by [`BiConverter::and_then`].
struct Chain<A, B, C> {
    first: BiConverter<A, B>,
    second: BiConverter<B, C>,
}

impl<A: 'static, B: 'static, C: 'static> Transform<A, C> for Chain<A, B, C> {
    fn forward(&self, a: A) -> Result<C> {
        self.second.convert(self.first.convert(a)?)
    }

    fn backward(&self, c: C) -> Result<A> {
        self.first.convert_back(self.second.convert_back(c)?)
    }

    fn equivalent(&self, other: &dyn Any) -> bool {
        other
            .downcast_ref::<Self>()
            .is_some_and(|o| self.first == o.first && self.second == o.second)
    }
}
