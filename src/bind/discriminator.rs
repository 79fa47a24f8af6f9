//! Tagged-variant resolution for polymorphic targets
//!
//! An abstract target declares one member as its resolution key; each
//! concrete variant declares the literal tag that selects it. The
//! resolver is a registry of tag -> bind function, built once per
//! abstract type. Duplicate tags are a declaration error and are
//! rejected when the registry is built, before any input data is
//! consulted.

use crate::bind::scalar_text;
use crate::error::ConfigError;
use crate::mapping::FlatMapping;
use crate::path::Path;

/// One concrete variant of an abstract target: the tag that selects
/// it and the function that binds its member set.
pub struct Variant<T> {
    tag: &'static str,
    bind: fn(&FlatMapping, &Path) -> Result<T, ConfigError>,
}

impl<T> Variant<T> {
    pub fn new(tag: &'static str, bind: fn(&FlatMapping, &Path) -> Result<T, ConfigError>) -> Self {
        Self { tag, bind }
    }
}

/// Registry that picks a concrete variant by discriminator value.
pub struct DiscriminatorResolver<T> {
    key: &'static str,
    target: &'static str,
    variants: Vec<Variant<T>>,
}

impl<T> DiscriminatorResolver<T> {
    /// Build the registry for an abstract target.
    ///
    /// `key` is the member holding the discriminator. Fails with
    /// [`ConfigError::AmbiguousVariant`] if two variants declare the
    /// same tag.
    pub fn new(key: &'static str, variants: Vec<Variant<T>>) -> Result<Self, ConfigError> {
        let target = std::any::type_name::<T>();
        for (position, variant) in variants.iter().enumerate() {
            if variants[..position].iter().any(|v| v.tag == variant.tag) {
                return Err(ConfigError::AmbiguousVariant {
                    tag: variant.tag.to_string(),
                    target,
                });
            }
        }
        Ok(Self {
            key,
            target,
            variants,
        })
    }

    /// The discriminator member name.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Read the discriminator at `prefix.key` and bind the selected
    /// variant's members at `prefix`.
    ///
    /// The discriminator entry itself is consumed here and is not
    /// re-bound as a regular member.
    pub fn resolve(&self, view: &FlatMapping, prefix: &Path) -> Result<T, ConfigError> {
        let tag_path = prefix.child(self.key);
        let tag = scalar_text(view, &tag_path, self.target)?;
        match self.variants.iter().find(|v| v.tag == tag) {
            Some(variant) => (variant.bind)(view, prefix),
            None => Err(ConfigError::UnknownVariant {
                path: tag_path,
                tag: tag.to_string(),
                expected: self
                    .variants
                    .iter()
                    .map(|v| v.tag)
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bind::{FromConfig, Section};

    #[derive(Debug, PartialEq)]
    enum Threshold {
        Narrow { value: u32 },
        Wide { value: i64 },
    }

    fn resolver() -> Result<DiscriminatorResolver<Threshold>, ConfigError> {
        DiscriminatorResolver::new(
            "type",
            vec![
                Variant::new("Narrow", |view, prefix| {
                    let section = Section::new(view, prefix);
                    Ok(Threshold::Narrow {
                        value: section.member("value")?,
                    })
                }),
                Variant::new("Wide", |view, prefix| {
                    let section = Section::new(view, prefix);
                    Ok(Threshold::Wide {
                        value: section.member("value")?,
                    })
                }),
            ],
        )
    }

    fn view(entries: &[(&str, &str)]) -> FlatMapping {
        let mut mapping = FlatMapping::new();
        for (path, value) in entries {
            mapping.set(Path::from_dotted(path), *value);
        }
        mapping
    }

    #[test]
    fn test_resolves_declared_variant() {
        let v = view(&[("abstract.type", "Narrow"), ("abstract.value", "7")]);
        let bound = resolver()
            .unwrap()
            .resolve(&v, &Path::from_dotted("abstract"))
            .unwrap();
        assert_eq!(bound, Threshold::Narrow { value: 7 });
    }

    #[test]
    fn test_same_data_selects_other_variant_by_tag() {
        let v = view(&[("abstract.type", "Wide"), ("abstract.value", "7")]);
        let bound = resolver()
            .unwrap()
            .resolve(&v, &Path::from_dotted("abstract"))
            .unwrap();
        assert_eq!(bound, Threshold::Wide { value: 7 });
    }

    #[test]
    fn test_unknown_tag() {
        let v = view(&[("abstract.type", "Elastic"), ("abstract.value", "7")]);
        match resolver()
            .unwrap()
            .resolve(&v, &Path::from_dotted("abstract"))
        {
            Err(ConfigError::UnknownVariant { tag, expected, .. }) => {
                assert_eq!(tag, "Elastic");
                assert_eq!(expected, "Narrow, Wide");
            }
            other => panic!("expected UnknownVariant, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_discriminator() {
        let v = view(&[("abstract.value", "7")]);
        match resolver()
            .unwrap()
            .resolve(&v, &Path::from_dotted("abstract"))
        {
            Err(ConfigError::MissingValue { path, .. }) => {
                assert_eq!(path.to_string(), "abstract.type");
            }
            other => panic!("expected MissingValue, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_tags_fail_at_build_time() {
        let result = DiscriminatorResolver::<Threshold>::new(
            "type",
            vec![
                Variant::new("Narrow", |_, _| Ok(Threshold::Narrow { value: 0 })),
                Variant::new("Narrow", |_, _| Ok(Threshold::Narrow { value: 1 })),
            ],
        );
        match result {
            Err(ConfigError::AmbiguousVariant { tag, .. }) => assert_eq!(tag, "Narrow"),
            _ => panic!("expected AmbiguousVariant"),
        }
    }

    #[test]
    fn test_discriminator_from_numbered_cli_entry() {
        // Command-line sources number every occurrence; the tag read
        // collapses a lone `type.0` the same way scalars do.
        let v = view(&[("abstract.type.0", "Narrow"), ("abstract.value.0", "9")]);
        let bound = resolver()
            .unwrap()
            .resolve(&v, &Path::from_dotted("abstract"))
            .unwrap();
        assert_eq!(bound, Threshold::Narrow { value: 9 });
    }

    #[test]
    fn test_usable_inside_from_config() {
        impl FromConfig for Threshold {
            fn from_config(view: &FlatMapping, prefix: &Path) -> Result<Self, ConfigError> {
                resolver()?.resolve(view, prefix)
            }
        }

        let v = view(&[("t.type", "Wide"), ("t.value", "-3")]);
        let bound: Option<Threshold> =
            FromConfig::from_config(&v, &Path::from_dotted("t")).unwrap();
        assert_eq!(bound, Some(Threshold::Wide { value: -3 }));
    }
}
