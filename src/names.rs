//! Line Names
//!
//! Configured products are stored in the cart under a composite name made of
//! the product name, the variant label and an optional flavor list:
//!
//! ```text
//! Assorted cookies – Half-dozen (6) [Grinch cookie, S'mores cookie]
//! ```
//!
//! The base name is everything before the first [`VARIANT_SEPARATOR`].

use std::fmt;

use crate::packs::PackSize;

/// Separator between a product name and its variant label.
///
/// Names are split at the first occurrence, so a product whose own name
/// contains the separator can't be recovered from its line name and is never
/// matched when the cart is resynced with the catalog.
pub const VARIANT_SEPARATOR: &str = " – ";

/// A parsed cart line name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineName {
    base: String,
    variant: Option<String>,
    flavors: Vec<String>,
}

impl LineName {
    /// Plain product name with no variant.
    pub fn plain(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            variant: None,
            flavors: Vec::new(),
        }
    }

    /// Product name with a pack size variant and selected flavors.
    pub fn configured<I, S>(base: impl Into<String>, pack: PackSize, flavors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            base: base.into(),
            variant: Some(pack.label().to_string()),
            flavors: flavors.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a stored line name into its parts.
    ///
    /// Names without a separator are treated as plain product names. Known
    /// pack labels are normalized; anything else is kept verbatim.
    pub fn parse(name: &str) -> Self {
        let Some((base, rest)) = name.split_once(VARIANT_SEPARATOR) else {
            return Self::plain(name);
        };

        let (variant, flavors) = match rest
            .strip_suffix(']')
            .and_then(|inner| inner.split_once(" ["))
        {
            Some((variant, list)) => (
                variant,
                list.split(", ")
                    .map(str::trim)
                    .filter(|flavor| !flavor.is_empty())
                    .map(ToString::to_string)
                    .collect(),
            ),
            None => (rest, Vec::new()),
        };

        let variant = PackSize::from_label(variant)
            .map_or_else(|| variant.to_string(), |pack| pack.label().to_string());

        Self {
            base: base.to_string(),
            variant: Some(variant),
            flavors,
        }
    }

    /// Product name the line was created from.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Raw variant label, if any.
    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    /// Pack size named by the variant label.
    ///
    /// Plain names are single items. Unknown labels yield `None`.
    pub fn pack(&self) -> Option<PackSize> {
        match &self.variant {
            None => Some(PackSize::Single),
            Some(label) => PackSize::from_label(label),
        }
    }

    /// Selected flavors.
    pub fn flavors(&self) -> &[String] {
        &self.flavors
    }

    /// Replace the base name, keeping the variant and flavors.
    #[must_use]
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }
}

impl fmt::Display for LineName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)?;

        if let Some(variant) = &self.variant {
            write!(f, "{VARIANT_SEPARATOR}{variant}")?;
        }

        if !self.flavors.is_empty() {
            write!(f, " [{}]", self.flavors.join(", "))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_name_renders_variant_and_flavors() {
        let name = LineName::configured(
            "Assorted cookies",
            PackSize::HalfDozen,
            ["Red velvet cookie", "Grinch cookie"],
        );

        assert_eq!(
            name.to_string(),
            "Assorted cookies – Half-dozen (6) [Red velvet cookie, Grinch cookie]"
        );
    }

    #[test]
    fn configured_name_without_flavors_has_no_brackets() {
        let name = LineName::configured("Brownies", PackSize::Dozen, Vec::<String>::new());

        assert_eq!(name.to_string(), "Brownies – Dozen (12)");
    }

    #[test]
    fn parse_plain_name() {
        let name = LineName::parse("Lemon tart");

        assert_eq!(name.base(), "Lemon tart");
        assert_eq!(name.variant(), None);
        assert_eq!(name.pack(), Some(PackSize::Single));
    }

    #[test]
    fn parse_extracts_base_variant_and_flavors() {
        let name =
            LineName::parse("Assorted cookies – Dozen (12) [S'mores cookie, Grinch cookie]");

        assert_eq!(name.base(), "Assorted cookies");
        assert_eq!(name.pack(), Some(PackSize::Dozen));
        assert_eq!(name.flavors(), ["S'mores cookie", "Grinch cookie"]);
    }

    #[test]
    fn parse_keeps_unknown_variant_verbatim() {
        let name = LineName::parse("Cookies – Family tin");

        assert_eq!(name.variant(), Some("Family tin"));
        assert_eq!(name.pack(), None);
        assert_eq!(name.to_string(), "Cookies – Family tin");
    }

    #[test]
    fn separator_in_product_name_splits_early() {
        let name = LineName::parse("Tea – Earl Grey – Dozen (12)");

        assert_eq!(name.base(), "Tea");
        assert_eq!(name.variant(), Some("Earl Grey – Dozen (12)"));
        assert_eq!(name.pack(), None);
    }

    #[test]
    fn base_name_does_not_prefix_match() {
        let name = LineName::parse("Cookies and cream cake – Single");

        assert_ne!(name.base(), "Cookies");
    }
}
