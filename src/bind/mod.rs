//! Type-directed binding
//!
//! Reconstructs arbitrary target shapes from the merged flat view.
//! Rust has no runtime reflection, so targets describe themselves
//! through the [`FromConfig`] trait: primitives, `Option`, `Vec`,
//! string-keyed maps, and tuples are covered by the impls here;
//! records write a short impl with [`Section`]; enums use the
//! [`config_enum!`](crate::config_enum) macro; polymorphic targets go
//! through [`DiscriminatorResolver`].
//!
//! Leaf text is parsed according to the *target* type with
//! locale-independent rules, regardless of which source format
//! produced it.

mod discriminator;
mod enums;
mod record;

pub use discriminator::{DiscriminatorResolver, Variant};
pub use enums::bind_enum;
pub use record::Section;

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::ConfigError;
use crate::mapping::FlatMapping;
use crate::path::Path;

/// A type that can be reconstructed from a flat configuration view.
pub trait FromConfig: Sized {
    /// Bind `Self` from the entries at and under `prefix`.
    ///
    /// Binding fully succeeds or returns the first error encountered;
    /// it never yields a partially populated value.
    fn from_config(view: &FlatMapping, prefix: &Path) -> Result<Self, ConfigError>;
}

/// Read the scalar text for a primitive target at `prefix`.
///
/// Command-line flattening numbers every occurrence, so a lone flag
/// lands at `prefix.0` rather than `prefix`; a single indexed child at
/// index 0 is collapsed back into the scalar read. Two or more indexed
/// children cannot satisfy a scalar target and are rejected.
pub(crate) fn scalar_text<'a>(
    view: &'a FlatMapping,
    prefix: &Path,
    target: &'static str,
) -> Result<&'a str, ConfigError> {
    if let Some(text) = view.get(prefix) {
        return Ok(text);
    }
    let indices = indexed_children(view, prefix);
    if indices.len() == 1 && indices.contains(&0) {
        if let Some(text) = view.get(&prefix.index(0)) {
            return Ok(text);
        }
    }
    if !indices.is_empty() {
        return Err(ConfigError::Parse {
            path: prefix.clone(),
            text: format!("[{} indexed values]", indices.len()),
            target,
        });
    }
    Err(ConfigError::MissingValue {
        path: prefix.clone(),
        target,
    })
}

/// Numeric first segments directly below `prefix`.
///
/// Only canonical decimal renderings count as indices; `01` is a map
/// key, not index 1.
pub(crate) fn indexed_children(view: &FlatMapping, prefix: &Path) -> BTreeSet<usize> {
    let mut indices = BTreeSet::new();
    for segment in view.children(prefix) {
        if is_index(segment) {
            if let Ok(index) = segment.parse() {
                indices.insert(index);
            }
        }
    }
    indices
}

fn is_index(segment: &str) -> bool {
    !segment.is_empty()
        && segment.bytes().all(|b| b.is_ascii_digit())
        && (segment == "0" || !segment.starts_with('0'))
}

macro_rules! primitive_from_config {
    ($($ty:ty),+ $(,)?) => {$(
        impl FromConfig for $ty {
            fn from_config(view: &FlatMapping, prefix: &Path) -> Result<Self, ConfigError> {
                let text = scalar_text(view, prefix, stringify!($ty))?;
                text.trim().parse().map_err(|_| ConfigError::Parse {
                    path: prefix.clone(),
                    text: text.to_string(),
                    target: stringify!($ty),
                })
            }
        }
    )+};
}

primitive_from_config!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl FromConfig for bool {
    fn from_config(view: &FlatMapping, prefix: &Path) -> Result<Self, ConfigError> {
        let text = scalar_text(view, prefix, "bool")?;
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if trimmed.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(ConfigError::Parse {
                path: prefix.clone(),
                text: text.to_string(),
                target: "bool",
            })
        }
    }
}

impl FromConfig for String {
    fn from_config(view: &FlatMapping, prefix: &Path) -> Result<Self, ConfigError> {
        scalar_text(view, prefix, "String").map(str::to_string)
    }
}

impl<T: FromConfig> FromConfig for Option<T> {
    fn from_config(view: &FlatMapping, prefix: &Path) -> Result<Self, ConfigError> {
        if !view.contains_at_or_under(prefix) {
            return Ok(None);
        }
        T::from_config(view, prefix).map(Some)
    }
}

impl<T: FromConfig> FromConfig for Vec<T> {
    fn from_config(view: &FlatMapping, prefix: &Path) -> Result<Self, ConfigError> {
        let target = std::any::type_name::<Self>();
        let indices = indexed_children(view, prefix);
        let Some(&max) = indices.iter().next_back() else {
            if let Some(text) = view.get(prefix) {
                // Sequences require the indexed form; a bare scalar at
                // the prefix is not coerced into a one-element run.
                return Err(ConfigError::Parse {
                    path: prefix.clone(),
                    text: text.to_string(),
                    target,
                });
            }
            return Ok(Vec::new());
        };
        for expected in 0..=max {
            if !indices.contains(&expected) {
                return Err(ConfigError::SequenceGap {
                    path: prefix.clone(),
                    missing: expected,
                    target,
                });
            }
        }
        (0..=max)
            .map(|index| T::from_config(view, &prefix.index(index)))
            .collect()
    }
}

impl<V: FromConfig> FromConfig for HashMap<String, V> {
    fn from_config(view: &FlatMapping, prefix: &Path) -> Result<Self, ConfigError> {
        let mut out = HashMap::new();
        for key in view.children(prefix) {
            out.insert(key.to_string(), V::from_config(view, &prefix.child(key))?);
        }
        Ok(out)
    }
}

impl<V: FromConfig> FromConfig for BTreeMap<String, V> {
    fn from_config(view: &FlatMapping, prefix: &Path) -> Result<Self, ConfigError> {
        let mut out = BTreeMap::new();
        for key in view.children(prefix) {
            out.insert(key.to_string(), V::from_config(view, &prefix.child(key))?);
        }
        Ok(out)
    }
}

macro_rules! tuple_from_config {
    ($(($($ty:ident => $idx:tt),+)),+ $(,)?) => {$(
        impl<$($ty: FromConfig),+> FromConfig for ($($ty,)+) {
            fn from_config(view: &FlatMapping, prefix: &Path) -> Result<Self, ConfigError> {
                Ok(($($ty::from_config(view, &prefix.index($idx))?,)+))
            }
        }
    )+};
}

tuple_from_config!(
    (A => 0),
    (A => 0, B => 1),
    (A => 0, B => 1, C => 2),
    (A => 0, B => 1, C => 2, D => 3),
);
