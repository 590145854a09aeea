//! The fixed catalog category set.
//!
//! Categories are a closed enumeration mirrored from the storefront's
//! `product_type` values. They are never fetched from the upstream API.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Marine Locks")]
    MarineLocks,
    #[serde(rename = "Hinges")]
    Hinges,
    #[serde(rename = "Hardware")]
    Hardware,
    #[serde(rename = "Ajar Hooks")]
    AjarHooks,
    #[serde(rename = "Deck Hardware")]
    DeckHardware,
    #[serde(rename = "Hatch Hardware")]
    HatchHardware,
    #[serde(rename = "Fasteners")]
    Fasteners,
}

impl Category {
    /// Every category, in sidebar order.
    pub const ALL: [Category; 7] = [
        Category::MarineLocks,
        Category::Hinges,
        Category::Hardware,
        Category::AjarHooks,
        Category::DeckHardware,
        Category::HatchHardware,
        Category::Fasteners,
    ];

    /// Human-readable name, identical to the storefront `product_type`.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Category::MarineLocks => "Marine Locks",
            Category::Hinges => "Hinges",
            Category::Hardware => "Hardware",
            Category::AjarHooks => "Ajar Hooks",
            Category::DeckHardware => "Deck Hardware",
            Category::HatchHardware => "Hatch Hardware",
            Category::Fasteners => "Fasteners",
        }
    }

    /// Kebab-case slug, e.g. `"deck-hardware"`.
    #[must_use]
    pub fn slug(self) -> String {
        self.display_name().to_lowercase().replace(' ', "-")
    }

    /// Returns `true` when `category_name` names this category (case-insensitive).
    #[must_use]
    pub fn matches(self, category_name: &str) -> bool {
        category_name.trim().eq_ignore_ascii_case(self.display_name())
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    /// Accepts the display name or the slug, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.matches(wanted) || c.slug().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::UnknownCategory(s.to_owned()))
    }
}

/// Category selection: every category, or exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    #[must_use]
    pub fn category(self) -> Option<Category> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Only(c) => Some(c),
        }
    }

    #[must_use]
    pub fn is_all(self) -> bool {
        matches!(self, CategoryFilter::All)
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("All Categories"),
            CategoryFilter::Only(c) => std::fmt::Display::fmt(c, f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("all")
            || trimmed.eq_ignore_ascii_case("all categories")
        {
            return Ok(CategoryFilter::All);
        }
        trimmed.parse().map(CategoryFilter::Only)
    }
}
