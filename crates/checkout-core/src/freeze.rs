//! # Freeze Proxy
//!
//! Read-only views over values handed out by selectors and services.
//!
//! A [`FreezeProxy`] borrows a target and forwards method calls to it. Every
//! result goes through [`Freeze`] before it reaches the caller:
//!
//! - primitives (`bool`, numbers, `char`, `String`, `()`) come back unchanged
//! - records, collections and JSON values come back as [`Frozen`] /
//!   [`FrozenValue`], which only ever expose shared references
//!
//! The target itself is never touched; values are frozen per call.
//!
//! ```text
//! caller ──► FreezeProxy::checkout() ──► CheckoutStoreSelector::checkout(&target)
//!    ▲                                                 │
//!    └────────── Freeze::freeze(result) ◄──────────────┘
//! ```
//!
//! Capabilities are declared with [`freeze_proxy!`](crate::freeze_proxy),
//! which generates a companion trait implemented for `FreezeProxy<T>` whenever
//! `T` implements the capability. Supertraits get their own declaration, and
//! the proxy then answers both.

use serde::{Serialize, Serializer};
use serde_json::{Number, Value};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::ops::Deref;
use std::sync::Arc;

// =============================================================================
// Frozen values
// =============================================================================

/// Shared, read-only view over a value.
///
/// There is no `DerefMut` and no way to get the inner value back by value, so
/// nothing reachable through a `Frozen<T>` can be added, removed or
/// reassigned. Types with interior mutability should not be frozen.
pub struct Frozen<T: ?Sized>(Arc<T>);

impl<T> Frozen<T> {
    pub fn new(value: T) -> Self {
        Frozen(Arc::new(value))
    }
}

impl<T: ?Sized> Frozen<T> {
    /// True if both views share the same allocation
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.0, &other.0)
    }
}

impl<T: ?Sized> Deref for Frozen<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized> AsRef<T> for Frozen<T> {
    fn as_ref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized> Clone for Frozen<T> {
    fn clone(&self) -> Self {
        Frozen(Arc::clone(&self.0))
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Frozen<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl<T: ?Sized + fmt::Display> fmt::Display for Frozen<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&**self, f)
    }
}

impl<T: ?Sized + PartialEq> PartialEq for Frozen<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: ?Sized + Serialize> Serialize for Frozen<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (**self).serialize(serializer)
    }
}

/// Deep-immutable mirror of [`serde_json::Value`].
#[derive(Debug, Clone, PartialEq)]
pub enum FrozenValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Frozen<Vec<FrozenValue>>),
    Object(Frozen<BTreeMap<String, FrozenValue>>),
}

impl FrozenValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FrozenValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FrozenValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FrozenValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FrozenValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FrozenValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[FrozenValue]> {
        match self {
            FrozenValue::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, FrozenValue>> {
        match self {
            FrozenValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a property of an object value
    pub fn get(&self, key: &str) -> Option<&FrozenValue> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Look up an element of an array value
    pub fn get_index(&self, index: usize) -> Option<&FrozenValue> {
        self.as_array().and_then(|items| items.get(index))
    }

    /// Mutable copy of this value. The frozen value is left as it is.
    pub fn to_value(&self) -> Value {
        match self {
            FrozenValue::Null => Value::Null,
            FrozenValue::Bool(b) => Value::Bool(*b),
            FrozenValue::Number(n) => Value::Number(n.clone()),
            FrozenValue::String(s) => Value::String(s.clone()),
            FrozenValue::Array(items) => Value::Array(items.iter().map(Self::to_value).collect()),
            FrozenValue::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_value()))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for FrozenValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FrozenValue::Null,
            Value::Bool(b) => FrozenValue::Bool(b),
            Value::Number(n) => FrozenValue::Number(n),
            Value::String(s) => FrozenValue::String(s),
            Value::Array(items) => {
                FrozenValue::Array(Frozen::new(items.into_iter().map(Self::from).collect()))
            }
            Value::Object(map) => FrozenValue::Object(Frozen::new(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            )),
        }
    }
}

impl PartialEq<Value> for FrozenValue {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (FrozenValue::Null, Value::Null) => true,
            (FrozenValue::Bool(a), Value::Bool(b)) => a == b,
            (FrozenValue::Number(a), Value::Number(b)) => a == b,
            (FrozenValue::String(a), Value::String(b)) => a == b,
            (FrozenValue::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y)
            }
            (FrozenValue::Object(a), Value::Object(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(key, x)| b.get(key).map(|y| x == y).unwrap_or(false))
            }
            _ => false,
        }
    }
}

impl Serialize for FrozenValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FrozenValue::Null => serializer.serialize_unit(),
            FrozenValue::Bool(b) => serializer.serialize_bool(*b),
            FrozenValue::Number(n) => n.serialize(serializer),
            FrozenValue::String(s) => serializer.serialize_str(s),
            FrozenValue::Array(items) => items.serialize(serializer),
            FrozenValue::Object(map) => map.serialize(serializer),
        }
    }
}

// =============================================================================
// Freeze
// =============================================================================

/// Marker for values that cannot be mutated through any reachable path.
pub trait DeepFrozen {}

impl<T: ?Sized> DeepFrozen for Frozen<T> {}
impl DeepFrozen for FrozenValue {}
impl<T: DeepFrozen> DeepFrozen for Option<T> {}
impl<T: DeepFrozen, E: DeepFrozen> DeepFrozen for Result<T, E> {}

/// Conversion of a returned value into its deep-frozen form.
pub trait Freeze {
    type Frozen: DeepFrozen;

    fn freeze(self) -> Self::Frozen;
}

macro_rules! freeze_primitive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl DeepFrozen for $ty {}

            impl Freeze for $ty {
                type Frozen = $ty;

                #[inline]
                fn freeze(self) -> $ty {
                    self
                }
            }
        )*
    };
}

freeze_primitive!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    String, (),
);

impl<T: ?Sized> Freeze for Frozen<T> {
    type Frozen = Frozen<T>;

    fn freeze(self) -> Self::Frozen {
        self
    }
}

impl Freeze for FrozenValue {
    type Frozen = FrozenValue;

    fn freeze(self) -> Self::Frozen {
        self
    }
}

impl Freeze for Value {
    type Frozen = FrozenValue;

    fn freeze(self) -> Self::Frozen {
        FrozenValue::from(self)
    }
}

impl<T: Freeze> Freeze for Option<T> {
    type Frozen = Option<T::Frozen>;

    fn freeze(self) -> Self::Frozen {
        self.map(Freeze::freeze)
    }
}

impl<T: Freeze, E: Freeze> Freeze for Result<T, E> {
    type Frozen = Result<T::Frozen, E::Frozen>;

    fn freeze(self) -> Self::Frozen {
        self.map(Freeze::freeze).map_err(Freeze::freeze)
    }
}

impl<T: Freeze> Freeze for Vec<T> {
    type Frozen = Frozen<Vec<T::Frozen>>;

    fn freeze(self) -> Self::Frozen {
        Frozen::new(self.into_iter().map(Freeze::freeze).collect())
    }
}

impl<K: Ord, V: Freeze> Freeze for BTreeMap<K, V> {
    type Frozen = Frozen<BTreeMap<K, V::Frozen>>;

    fn freeze(self) -> Self::Frozen {
        Frozen::new(self.into_iter().map(|(k, v)| (k, v.freeze())).collect())
    }
}

impl<K: Eq + Hash, V: Freeze> Freeze for HashMap<K, V> {
    type Frozen = Frozen<HashMap<K, V::Frozen>>;

    fn freeze(self) -> Self::Frozen {
        Frozen::new(self.into_iter().map(|(k, v)| (k, v.freeze())).collect())
    }
}

/// Borrowed results are frozen from a copy; the owner keeps its own value.
impl<T: Freeze + Clone> Freeze for &T {
    type Frozen = T::Frozen;

    fn freeze(self) -> Self::Frozen {
        self.clone().freeze()
    }
}

/// Implement [`Freeze`] for record types by wrapping them in [`Frozen`].
///
/// ```rust,ignore
/// checkout_core::frozen_record!(Address, Consignment);
/// ```
#[macro_export]
macro_rules! frozen_record {
    ($($record:ty),+ $(,)?) => {
        $(
            impl $crate::freeze::Freeze for $record {
                type Frozen = $crate::freeze::Frozen<$record>;

                fn freeze(self) -> Self::Frozen {
                    $crate::freeze::Frozen::new(self)
                }
            }
        )+
    };
}

// =============================================================================
// Proxy
// =============================================================================

/// Forwarding handle that freezes every value returned by the target.
pub struct FreezeProxy<'a, T: ?Sized> {
    target: &'a T,
}

impl<'a, T: ?Sized> FreezeProxy<'a, T> {
    pub fn new(target: &'a T) -> Self {
        Self { target }
    }

    /// The wrapped target. Used by code generated with `freeze_proxy!`.
    #[doc(hidden)]
    pub fn target(&self) -> &'a T {
        self.target
    }

    /// Forward an arbitrary call and freeze its result
    pub fn call<R, F>(&self, method: F) -> R::Frozen
    where
        F: FnOnce(&'a T) -> R,
        R: Freeze,
    {
        method(self.target).freeze()
    }

    /// Forward an async call and freeze its result once it resolves
    pub async fn call_async<R, F, Fut>(&self, method: F) -> R::Frozen
    where
        F: FnOnce(&'a T) -> Fut,
        Fut: Future<Output = R>,
        R: Freeze,
    {
        method(self.target).await.freeze()
    }
}

impl<T: ?Sized> Clone for FreezeProxy<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for FreezeProxy<'_, T> {}

impl<T: ?Sized + fmt::Debug> fmt::Debug for FreezeProxy<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FreezeProxy").field(&self.target).finish()
    }
}

/// Wrap `target` so that values returned from its methods are frozen.
pub fn create_freeze_proxy<T: ?Sized>(target: &T) -> FreezeProxy<'_, T> {
    FreezeProxy::new(target)
}

/// Declare the frozen face of a capability trait.
///
/// Generates a trait with the same methods whose return types are frozen, and
/// implements it for every `FreezeProxy<T>` where `T` implements the
/// capability.
///
/// ```rust,ignore
/// freeze_proxy! {
///     pub trait FrozenCartSelector for CartSelector {
///         fn cart(&self) -> Option<Cart>;
///         fn line_item(&self, id: &str) -> Option<LineItem>;
///     }
/// }
///
/// let cart = create_freeze_proxy(&state).cart(); // Option<Frozen<Cart>>
/// ```
#[macro_export]
macro_rules! freeze_proxy {
    (
        $(#[$attr:meta])*
        $vis:vis trait $frozen:ident for $capability:path {
            $(
                $(#[$method_attr:meta])*
                fn $method:ident(&self $(, $arg:ident : $arg_ty:ty)* $(,)?) -> $ret:ty;
            )*
        }
    ) => {
        $(#[$attr])*
        $vis trait $frozen {
            $(
                $(#[$method_attr])*
                fn $method(&self $(, $arg: $arg_ty)*) -> <$ret as $crate::freeze::Freeze>::Frozen;
            )*
        }

        impl<'a, T> $frozen for $crate::freeze::FreezeProxy<'a, T>
        where
            T: $capability + ?Sized,
        {
            $(
                fn $method(&self $(, $arg: $arg_ty)*) -> <$ret as $crate::freeze::Freeze>::Frozen {
                    $crate::freeze::Freeze::freeze(
                        <T as $capability>::$method(self.target() $(, $arg)*),
                    )
                }
            )*
        }
    };
}
