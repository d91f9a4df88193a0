//! The fixed snack-package catalog and lookups over it.

use fastchow_core::{ProductId, Xlm};

use crate::product::{Category, CategoryInfo, Product};

/// Every package on sale, in declaration order (three per category).
pub static PRODUCTS: [Product; 9] = [
    // Budget-friendly
    Product {
        id: ProductId::new("budget-a"),
        name: "Quick Refresh Package",
        description: "Perfect for a quick snack break",
        price: Xlm::from_xlm(100),
        category: Category::Budget,
        items: &["Sachet water", "Packet of biscuits (Shortcake/Digestive)"],
        image: "/images/packages/budget-a.jpg",
    },
    Product {
        id: ProductId::new("budget-b"),
        name: "Energy Boost Package",
        description: "Get energized with this combo",
        price: Xlm::from_xlm(200),
        category: Category::Budget,
        items: &["Gala (beef roll)", "Soft drink (Coke/Pepsi/Fanta)"],
        image: "/images/packages/budget-b.jpg",
    },
    Product {
        id: ProductId::new("budget-c"),
        name: "Morning Starter Package",
        description: "Start your day right",
        price: Xlm::from_xlm(250),
        category: Category::Budget,
        items: &["Small loaf of bread", "Sachet water", "Small butter spread"],
        image: "/images/packages/budget-c.jpg",
    },
    // Middle-class
    Product {
        id: ProductId::new("middle-d"),
        name: "Premium Snack Package",
        description: "Quality snacks for your break",
        price: Xlm::from_xlm(400),
        category: Category::Middle,
        items: &["Vega milk", "Meat pie", "Bottled water"],
        image: "/images/packages/middle-d.jpg",
    },
    Product {
        id: ProductId::new("middle-e"),
        name: "Nutritious Combo",
        description: "Healthy and delicious",
        price: Xlm::from_xlm(600),
        category: Category::Middle,
        items: &["Nutri milk", "Sausage roll", "Juice box"],
        image: "/images/packages/middle-e.jpg",
    },
    Product {
        id: ProductId::new("middle-f"),
        name: "Complete Meal Package",
        description: "Everything you need",
        price: Xlm::from_xlm(750),
        category: Category::Middle,
        items: &["Yogurt drink", "Chicken roll", "Fresh fruit (banana/apple)"],
        image: "/images/packages/middle-f.jpg",
    },
    // Bulk / event
    Product {
        id: ProductId::new("bulk-g"),
        name: "Drinks Party Package",
        description: "Perfect for your party",
        price: Xlm::from_xlm(5_000),
        category: Category::Bulk,
        items: &["50 bottles of soft drinks (mixed flavors)"],
        image: "/images/packages/bulk-g.jpg",
    },
    Product {
        id: ProductId::new("bulk-h"),
        name: "Mega Snacks Package",
        description: "Feed your entire event",
        price: Xlm::from_xlm(8_000),
        category: Category::Bulk,
        items: &["100 meat pies", "100 small chops"],
        image: "/images/packages/bulk-h.jpg",
    },
    Product {
        id: ProductId::new("bulk-i"),
        name: "Complete Event Package",
        description: "Everything for your event",
        price: Xlm::from_xlm(15_000),
        category: Category::Bulk,
        items: &["Cake", "200 drinks", "200 assorted snacks"],
        image: "/images/packages/bulk-i.jpg",
    },
];

/// Category metadata, indexed in [`Category::ALL`] order.
pub static CATEGORIES: [CategoryInfo; 3] = [
    CategoryInfo {
        category: Category::Budget,
        title: "Budget-Friendly Packages",
        description: "For students and quick, affordable snacks",
        price_range: "100-300 XLM",
    },
    CategoryInfo {
        category: Category::Middle,
        title: "Middle-Class Packages",
        description: "Better quality snacks and drinks",
        price_range: "400-800 XLM",
    },
    CategoryInfo {
        category: Category::Bulk,
        title: "Bulk/Event Packages",
        description: "For parties, meetings, and events",
        price_range: "5,000+ XLM",
    },
];

/// Lazy view over the products of one category, in declaration order.
///
/// A clone continues from the same position; call [`Catalog::filter_by_category`]
/// again to start over.
#[derive(Debug, Clone)]
pub struct ByCategory {
    inner: core::slice::Iter<'static, Product>,
    category: Option<Category>,
}

impl Iterator for ByCategory {
    type Item = &'static Product;

    fn next(&mut self) -> Option<Self::Item> {
        let category = self.category?;
        self.inner.by_ref().find(|p| p.category == category)
    }
}

/// Outcome of resolving a category page from a raw URL key.
///
/// A known category with no products is `Found` with an empty list; only an
/// unknown key is `NotFound`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryPage {
    Found {
        info: &'static CategoryInfo,
        products: Vec<&'static Product>,
    },
    NotFound {
        key: String,
    },
}

/// Read-only handle on a product list.
///
/// The storefront uses [`Catalog::standard`]; tests can point a catalog at any
/// static slice.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    products: &'static [Product],
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl Catalog {
    /// The storefront's fixed catalog.
    pub const fn standard() -> Self {
        Self { products: &PRODUCTS }
    }

    pub const fn from_static(products: &'static [Product]) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &'static [Product] {
        self.products
    }

    pub fn find(&self, product_id: &str) -> Option<&'static Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    pub fn info(&self, category: Category) -> &'static CategoryInfo {
        match category {
            Category::Budget => &CATEGORIES[0],
            Category::Middle => &CATEGORIES[1],
            Category::Bulk => &CATEGORIES[2],
        }
    }

    pub fn filter_by_category(&self, category: Category) -> ByCategory {
        ByCategory {
            inner: self.products.iter(),
            category: Some(category),
        }
    }

    /// Filter by a raw key. Unknown keys yield an empty sequence.
    pub fn filter_by_key(&self, key: &str) -> ByCategory {
        ByCategory {
            inner: self.products.iter(),
            category: key.parse().ok(),
        }
    }

    pub fn resolve_category_page(&self, key: &str) -> CategoryPage {
        match key.parse::<Category>() {
            Ok(category) => CategoryPage::Found {
                info: self.info(category),
                products: self.filter_by_category(category).collect(),
            },
            Err(_) => CategoryPage::NotFound {
                key: key.to_string(),
            },
        }
    }

    /// First `per_category` products of each category, categories in display order.
    pub fn featured(&self, per_category: usize) -> Vec<&'static Product> {
        Category::ALL
            .into_iter()
            .flat_map(|c| self.filter_by_category(c).take(per_category))
            .collect()
    }
}
