//! Pack Sizes
//!
//! Products are sold in a handful of fixed groupings. Which groupings a product
//! offers, and whether it comes with a flavor picker, is decided by a small rule
//! table keyed on words in the product name.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

/// Pack options offered by a single product.
pub type PackOptions = SmallVec<[PackSize; 4]>;

/// A pack size that isn't one of the known groupings.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown pack size: {0}")]
pub struct UnknownPackSize(pub u8);

/// Number of pieces a product is sold in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PackSize {
    /// A single piece
    Single,

    /// Three pieces
    Three,

    /// Four pieces
    Four,

    /// Six pieces
    HalfDozen,

    /// Twelve pieces
    Dozen,
}

impl PackSize {
    /// Every known pack size, smallest first.
    pub const ALL: [PackSize; 5] = [
        PackSize::Single,
        PackSize::Three,
        PackSize::Four,
        PackSize::HalfDozen,
        PackSize::Dozen,
    ];

    /// Number of pieces in the pack.
    #[must_use]
    pub const fn pieces(self) -> u8 {
        match self {
            PackSize::Single => 1,
            PackSize::Three => 3,
            PackSize::Four => 4,
            PackSize::HalfDozen => 6,
            PackSize::Dozen => 12,
        }
    }

    /// Human readable variant label, as it appears in cart line names.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            PackSize::Single => "Single",
            PackSize::Three => "Three pieces (3)",
            PackSize::Four => "Four pieces (4)",
            PackSize::HalfDozen => "Half-dozen (6)",
            PackSize::Dozen => "Dozen (12)",
        }
    }

    /// Recover a pack size from its variant label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|pack| pack.label() == label.trim())
    }
}

impl TryFrom<u8> for PackSize {
    type Error = UnknownPackSize;

    fn try_from(pieces: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|pack| pack.pieces() == pieces)
            .ok_or(UnknownPackSize(pieces))
    }
}

impl From<PackSize> for u8 {
    fn from(pack: PackSize) -> Self {
        pack.pieces()
    }
}

impl fmt::Display for PackSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Flavors offered by the assorted cookie box, in menu order.
pub const COOKIE_FLAVORS: [&str; 7] = [
    "Red velvet cookie",
    "S'mores cookie",
    "Chocolate chip cookie",
    "Cookies n cream cookie",
    "Cookie monster cookie",
    "Strawberry crunch cookie",
    "Grinch cookie",
];

/// Pack options and flavor picker for products matching a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackRule {
    keyword: Option<&'static str>,
    options: &'static [PackSize],
    flavors: &'static [&'static str],
}

/// Keyword rules, checked in order. The first match wins.
pub static PACK_RULES: [PackRule; 2] = [
    PackRule {
        keyword: Some("assorted cupcakes"),
        options: &[PackSize::Four, PackSize::HalfDozen, PackSize::Dozen],
        flavors: &[],
    },
    PackRule {
        keyword: Some("assorted cookies"),
        options: &[PackSize::HalfDozen, PackSize::Dozen],
        flavors: &COOKIE_FLAVORS,
    },
];

/// Rule for every product that matches no keyword.
pub static DEFAULT_PACK_RULE: PackRule = PackRule {
    keyword: None,
    options: &[
        PackSize::Single,
        PackSize::Three,
        PackSize::HalfDozen,
        PackSize::Dozen,
    ],
    flavors: &[],
};

/// Find the pack rule for a product name (case-insensitive).
pub fn rule_for(product_name: &str) -> &'static PackRule {
    let name = product_name.to_lowercase();

    PACK_RULES
        .iter()
        .find(|rule| rule.keyword.is_some_and(|keyword| name.contains(keyword)))
        .unwrap_or(&DEFAULT_PACK_RULE)
}

impl PackRule {
    /// Keyword this rule matches, `None` for the fallback rule.
    pub fn keyword(&self) -> Option<&'static str> {
        self.keyword
    }

    /// Pack sizes offered, smallest first.
    pub fn options(&self) -> PackOptions {
        self.options.iter().copied().collect()
    }

    /// Pack size selected when the configurator opens.
    pub fn default_pack(&self) -> PackSize {
        self.options.first().copied().unwrap_or(PackSize::Single)
    }

    /// Whether the given pack size is offered.
    pub fn offers(&self, pack: PackSize) -> bool {
        self.options.contains(&pack)
    }

    /// Flavors offered by the picker, in menu order.
    pub fn flavors(&self) -> &'static [&'static str] {
        self.flavors
    }

    /// Whether the flavor picker is shown for this rule.
    pub fn has_flavor_picker(&self) -> bool {
        !self.flavors.is_empty()
    }
}
