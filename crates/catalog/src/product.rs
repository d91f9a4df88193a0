use core::str::FromStr;

use serde::{Deserialize, Serialize};

use fastchow_core::{DomainError, Entity, ProductId, Xlm};

/// Market tier partitioning the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Budget,
    Middle,
    Bulk,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 3] = [Category::Budget, Category::Middle, Category::Bulk];

    /// URL/JSON key for the category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Budget => "budget",
            Category::Middle => "middle",
            Category::Bulk => "bulk",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    /// Keys are matched exactly; `"Budget"` is not a category key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DomainError::not_found(format!("category '{s}'")))
    }
}

/// Display metadata for a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    pub category: Category,
    pub title: &'static str,
    pub description: &'static str,
    /// Free-form label such as `"100-300 XLM"`.
    pub price_range: &'static str,
}

/// A snack package: a bundle of items sold at one price.
///
/// Immutable static record; carts refer to it by reference and never own it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: &'static str,
    pub description: &'static str,
    pub price: Xlm,
    pub category: Category,
    /// Items included in the package.
    pub items: &'static [&'static str],
    /// Image path served by the front-end.
    pub image: &'static str,
}

impl Product {
    /// `price × quantity`, exact for any quantity.
    pub const fn line_total(&self, quantity: u64) -> Xlm {
        self.price.saturating_mul(quantity)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
