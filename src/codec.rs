//! XML codec helpers shared by every record type.
//!
//! Xero models most of its domain vocabulary (account types, statuses, phone
//! types, ...) as closed sets of upper-case strings. [`closed_enum!`] declares
//! such a family as a plain Rust enum whose variants round-trip through their
//! exact wire text, and rejects anything outside the declared set with an
//! [`UnsupportedValue`].

use serde::{Serialize, de::DeserializeOwned};

use crate::entities::Collection;
use crate::error::{Error, Result};

/// A well-formed wire value that is not a member of a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported {family}: {value}")]
pub struct UnsupportedValue {
    /// Human readable family label, e.g. `account type`.
    pub family: &'static str,
    /// The rejected text, verbatim.
    pub value: String,
}

/// Declares a closed string enumeration.
///
/// ```
/// xero_xml::closed_enum! {
///     /// Colours we know about
///     pub enum Colour("colour") {
///         Red => "RED",
///         Blue => "BLUE",
///     }
/// }
///
/// assert_eq!(Colour::Red.as_str(), "RED");
/// assert_eq!("BLUE".parse::<Colour>(), Ok(Colour::Blue));
/// assert_eq!(
///     Colour::parse("red").unwrap_err().to_string(),
///     "unsupported colour: red"
/// );
/// ```
#[macro_export]
macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($family:literal) {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $wire:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Every permitted value, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Label used when reporting unsupported values.
            pub const FAMILY: &'static str = $family;

            /// The exact wire text of this value.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }

            /// Matches `raw` case-sensitively against the permitted set.
            pub fn parse(
                raw: &str,
            ) -> ::std::result::Result<Self, $crate::codec::UnsupportedValue> {
                Self::ALL
                    .iter()
                    .find(|candidate| candidate.as_str() == raw)
                    .copied()
                    .ok_or_else(|| $crate::codec::UnsupportedValue {
                        family: $family,
                        value: raw.to_owned(),
                    })
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::codec::UnsupportedValue;

            fn from_str(raw: &str) -> ::std::result::Result<Self, Self::Err> {
                Self::parse(raw)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let raw =
                    <::std::string::String as ::serde::Deserialize>::deserialize(deserializer)?;
                Self::parse(&raw).map_err(<D::Error as ::serde::de::Error>::custom)
            }
        }
    };
}

/// Declares a wrapper element holding a repeated child element, e.g.
/// `<Phones><Phone/>...</Phones>`.
macro_rules! wrapped_list {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident($item:ty) as $element:literal;
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        $vis struct $name {
            #[serde(rename = $element, default)]
            pub items: Vec<$item>,
        }

        impl $name {
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.items.is_empty()
            }

            #[must_use]
            pub fn len(&self) -> usize {
                self.items.len()
            }

            pub fn iter(&self) -> ::std::slice::Iter<'_, $item> {
                self.items.iter()
            }
        }

        impl From<Vec<$item>> for $name {
            fn from(items: Vec<$item>) -> Self {
                Self { items }
            }
        }

        impl FromIterator<$item> for $name {
            fn from_iter<I: IntoIterator<Item = $item>>(iter: I) -> Self {
                Self {
                    items: iter.into_iter().collect(),
                }
            }
        }
    };
}

/// Declares a top-level record collection: a [`wrapped_list!`] that is also
/// the payload of a response envelope and the body of PUT/POST requests.
macro_rules! collection {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident($item:ty) as $root:literal / $element:literal;
    ) => {
        $crate::codec::wrapped_list! {
            $(#[$meta])*
            $vis struct $name($item) as $element;
        }

        impl $crate::entities::Collection for $name {
            const ELEMENT: &'static str = $root;
            type Item = $item;

            fn items(&self) -> &[$item] {
                &self.items
            }

            fn into_items(self) -> Vec<$item> {
                self.items
            }
        }
    };
}

pub(crate) use collection;
pub(crate) use wrapped_list;

/// A request payload that can be written as an XML document.
pub trait Encode {
    /// Serializes the payload into its XML request body.
    fn encode(&self) -> Result<String>;
}

impl<C> Encode for C
where
    C: Collection + Serialize,
{
    fn encode(&self) -> Result<String> {
        quick_xml::se::to_string_with_root(C::ELEMENT, self).map_err(Error::Encode)
    }
}

/// Decodes an XML document into `T`.
///
/// Malformed XML surfaces as [`Error::Xml`]; well-formed documents whose
/// content is rejected (unknown enum members, bad dates) as
/// [`Error::InvalidData`].
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    quick_xml::de::from_reader(body).map_err(Error::from)
}
