//! Closed symbol sets for provider unit fields.
//!
//! A symbol set is a fixed vocabulary of named constants, each carrying a
//! unique string identifier. Sets are declared with [`symbol_def!`], which
//! expands to a plain Rust enum implementing [`Symbol`]. Raw strings coming
//! from unit records are normalized once at the boundary through
//! [`Symbolic`], so the rest of the code compares typed values.
//!
//! ```rust
//! use pxu_symbol::{Symbol, symbol_def};
//!
//! symbol_def! {
//!     /// Traffic light colors.
//!     pub enum Light {
//!         Red = "red",
//!         Green = "green",
//!     }
//! }
//!
//! assert!(Light::is_member("red"));
//! assert!(!Light::is_member("blue"));
//! assert_eq!(Light::sorted(), vec![Light::Green, Light::Red]);
//! assert_eq!(Light::Red.to_string(), "red");
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[doc(hidden)]
pub use serde as __serde;

/// Errors from symbol lookup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SymbolError {
    /// The identifier is not declared in the symbol set.
    #[error("unknown {set} symbol '{value}'")]
    Unknown {
        /// Name of the symbol set that was searched.
        set: &'static str,
        /// The raw identifier that did not match.
        value: String,
    },
}

/// A member of a closed symbol set.
///
/// Equality, hashing and ordering all follow the identifier string, so two
/// values with the same identifier are interchangeable regardless of where
/// they came from.
pub trait Symbol:
    Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Name of the set, used in diagnostics.
    const SET_NAME: &'static str;

    /// Every symbol of the set, in declaration order.
    const ALL: &'static [Self];

    /// The identifier string of this symbol.
    fn as_str(self) -> &'static str;

    /// Look up a symbol by its identifier.
    #[must_use]
    fn from_identifier(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|sym| sym.as_str() == raw)
    }

    /// Whether `raw` is the identifier of one of the symbols in this set.
    #[must_use]
    fn is_member(raw: &str) -> bool {
        Self::from_identifier(raw).is_some()
    }

    /// All symbols sorted by identifier.
    #[must_use]
    fn sorted() -> Vec<Self> {
        let mut all = Self::ALL.to_vec();
        all.sort_unstable();
        all
    }

    /// All identifiers sorted, for reproducible diagnostics.
    #[must_use]
    fn sorted_identifiers() -> Vec<&'static str> {
        Self::sorted().into_iter().map(Self::as_str).collect()
    }
}

/// A raw field value coerced through a symbol set.
///
/// Values that match an identifier become [`Symbolic::Known`]; anything else
/// is kept verbatim as [`Symbolic::Unknown`] so validators can still report
/// it.
#[derive(Debug, Clone)]
pub enum Symbolic<S: Symbol> {
    /// The raw value names a member of the set.
    Known(S),
    /// The raw value is not a member of the set.
    Unknown(String),
}

impl<S: Symbol> Symbolic<S> {
    /// Coerce a raw string through the symbol set.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match S::from_identifier(raw) {
            Some(sym) => Self::Known(sym),
            None => Self::Unknown(raw.to_owned()),
        }
    }

    /// The raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(sym) => sym.as_str(),
            Self::Unknown(raw) => raw,
        }
    }

    /// The typed symbol, if the value is a member of the set.
    #[must_use]
    pub fn known(&self) -> Option<S> {
        match self {
            Self::Known(sym) => Some(*sym),
            Self::Unknown(_) => None,
        }
    }

    #[must_use]
    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

impl<S: Symbol> From<S> for Symbolic<S> {
    fn from(sym: S) -> Self {
        Self::Known(sym)
    }
}

impl<S: Symbol> fmt::Display for Symbolic<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<S: Symbol> PartialEq for Symbolic<S> {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl<S: Symbol> Eq for Symbolic<S> {}

impl<S: Symbol> PartialEq<S> for Symbolic<S> {
    fn eq(&self, other: &S) -> bool {
        self.as_str() == other.as_str()
    }
}

impl<S: Symbol> PartialEq<str> for Symbolic<S> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl<S: Symbol> PartialOrd for Symbolic<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S: Symbol> Ord for Symbolic<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl<S: Symbol> Hash for Symbolic<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl<S: Symbol> Serialize for Symbolic<S> {
    fn serialize<Z: Serializer>(&self, serializer: Z) -> Result<Z::Ok, Z::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de, S: Symbol> Deserialize<'de> for Symbolic<S> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Returns `true` when no identifier appears twice.
///
/// Evaluated in a const context by [`symbol_def!`], so a duplicate
/// identifier fails the build of the crate declaring the set.
#[doc(hidden)]
#[must_use]
pub const fn identifiers_distinct(identifiers: &[&str]) -> bool {
    let mut i = 0;
    while i < identifiers.len() {
        let mut j = i + 1;
        while j < identifiers.len() {
            if const_str_eq(identifiers[i], identifiers[j]) {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const fn const_str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// Declare a closed symbol set.
///
/// Each variant is bound to its identifier string with `Variant = "id"`.
/// The generated enum is `Copy`, ordered and hashed by identifier, prints
/// its identifier, parses from it, compares equal to a matching `str`, and
/// (de)serializes as the identifier string.
///
/// Declaring the same identifier twice is rejected at compile time:
///
/// ```compile_fail
/// pxu_symbol::symbol_def! {
///     pub enum Shade {
///         Dark = "dark",
///         Night = "dark",
///     }
/// }
/// ```
///
/// Distinct identifiers are accepted:
///
/// ```
/// pxu_symbol::symbol_def! {
///     pub enum Shade {
///         Dark = "dark",
///         Light = "light",
///     }
/// }
///
/// assert_eq!(Shade::Dark.to_string(), "dark");
/// ```
#[macro_export]
macro_rules! symbol_def {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $ident:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )+
        }

        const _: () = ::core::assert!(
            $crate::identifiers_distinct(&[$($ident),+]),
            "duplicate identifier in symbol set"
        );

        impl $crate::Symbol for $name {
            const SET_NAME: &'static str = ::core::stringify!($name);
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $ident,)+
                }
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str($crate::Symbol::as_str(*self))
            }
        }

        impl ::core::cmp::PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> ::core::option::Option<::core::cmp::Ordering> {
                ::core::option::Option::Some(::core::cmp::Ord::cmp(self, other))
            }
        }

        impl ::core::cmp::Ord for $name {
            fn cmp(&self, other: &Self) -> ::core::cmp::Ordering {
                $crate::Symbol::as_str(*self).cmp($crate::Symbol::as_str(*other))
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::SymbolError;

            fn from_str(raw: &str) -> ::core::result::Result<Self, Self::Err> {
                <Self as $crate::Symbol>::from_identifier(raw).ok_or_else(|| {
                    $crate::SymbolError::Unknown {
                        set: <Self as $crate::Symbol>::SET_NAME,
                        value: ::std::borrow::ToOwned::to_owned(raw),
                    }
                })
            }
        }

        impl ::core::cmp::PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                $crate::Symbol::as_str(*self) == other
            }
        }

        impl ::core::cmp::PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                $crate::Symbol::as_str(*self) == *other
            }
        }

        impl ::core::cmp::PartialEq<$name> for str {
            fn eq(&self, other: &$name) -> bool {
                self == $crate::Symbol::as_str(*other)
            }
        }

        impl ::core::cmp::PartialEq<$name> for &str {
            fn eq(&self, other: &$name) -> bool {
                *self == $crate::Symbol::as_str(*other)
            }
        }

        impl $crate::__serde::Serialize for $name {
            fn serialize<Z>(&self, serializer: Z) -> ::core::result::Result<Z::Ok, Z::Error>
            where
                Z: $crate::__serde::Serializer,
            {
                serializer.serialize_str($crate::Symbol::as_str(*self))
            }
        }

        impl<'de> $crate::__serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: $crate::__serde::Deserializer<'de>,
            {
                let raw = <::std::string::String as $crate::__serde::Deserialize>::deserialize(
                    deserializer,
                )?;
                <Self as ::core::str::FromStr>::from_str(&raw)
                    .map_err(<D::Error as $crate::__serde::de::Error>::custom)
            }
        }
    };
}
