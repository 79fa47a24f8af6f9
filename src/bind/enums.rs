//! Enumeration binding
//!
//! Unit-variant enums bind by matching the leaf text against variant
//! names, ASCII case-insensitively. A target may declare an explicit
//! fallback variant for unmatched text; without one, unmatched text is
//! a parse error.

use crate::bind::scalar_text;
use crate::error::ConfigError;
use crate::mapping::FlatMapping;
use crate::path::Path;

/// Match the leaf at `prefix` against `(name, value)` pairs.
///
/// Used by the [`config_enum!`](crate::config_enum) macro; callers
/// with unusual naming can use it directly.
pub fn bind_enum<T: Clone>(
    view: &FlatMapping,
    prefix: &Path,
    target: &'static str,
    variants: &[(&'static str, T)],
    fallback: Option<T>,
) -> Result<T, ConfigError> {
    let text = scalar_text(view, prefix, target)?;
    let trimmed = text.trim();
    for (name, value) in variants {
        if name.eq_ignore_ascii_case(trimmed) {
            return Ok(value.clone());
        }
    }
    match fallback {
        Some(value) => Ok(value),
        None => Err(ConfigError::Parse {
            path: prefix.clone(),
            text: text.to_string(),
            target,
        }),
    }
}

/// Generate a [`FromConfig`](crate::FromConfig) impl for a
/// unit-variant enum.
///
/// ```
/// use flatconf::config_enum;
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum CacheMode {
///     Off,
///     ReadOnly,
///     ReadWrite,
/// }
///
/// config_enum!(CacheMode { Off, ReadOnly, ReadWrite });
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum LogLevel {
///     Error,
///     Info,
///     Debug,
/// }
///
/// // Unmatched text falls back to Info instead of erroring.
/// config_enum!(LogLevel { Error, Info, Debug }, fallback = Info);
/// ```
#[macro_export]
macro_rules! config_enum {
    ($ty:ident { $($variant:ident),+ $(,)? }) => {
        $crate::config_enum!(@impl $ty, None, $($variant),+);
    };
    ($ty:ident { $($variant:ident),+ $(,)? }, fallback = $fallback:ident) => {
        $crate::config_enum!(@impl $ty, Some(<$ty>::$fallback), $($variant),+);
    };
    (@impl $ty:ident, $fallback:expr, $($variant:ident),+) => {
        impl $crate::FromConfig for $ty {
            fn from_config(
                view: &$crate::FlatMapping,
                prefix: &$crate::Path,
            ) -> Result<Self, $crate::ConfigError> {
                $crate::bind_enum(
                    view,
                    prefix,
                    stringify!($ty),
                    &[$((stringify!($variant), <$ty>::$variant)),+],
                    $fallback,
                )
            }
        }
    };
}
