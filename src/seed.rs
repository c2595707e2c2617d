//! Seed
//!
//! The initial catalogue, bonus list and shopper profile consumed once at
//! store construction. A built-in set ships with the crate; hosts can also
//! supply their own YAML document in the same shape.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    products::{Availability, Category, Product, SubCategory},
    profile::Profile,
    rewards::{Bonus, BonusKind},
};

/// Seed parsing errors.
#[derive(Debug, Error)]
pub enum SeedError {
    /// YAML parsing error.
    #[error("failed to parse seed document: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// Initial data the store is constructed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seed {
    /// Initial product catalogue.
    pub products: Vec<Product>,

    /// Bonus catalogue; static for the lifetime of the store.
    pub bonuses: Vec<Bonus>,

    /// Shopper profile, including the starting miles balance.
    pub profile: Profile,
}

impl Seed {
    /// Parse a seed from a YAML document in the same shape as the built-in
    /// set.
    ///
    /// # Errors
    ///
    /// Returns a [`SeedError`] if the document does not parse.
    pub fn from_yaml(document: &str) -> Result<Self, SeedError> {
        Ok(serde_norway::from_str(document)?)
    }
}

impl Default for Seed {
    fn default() -> Self {
        Self {
            products: default_products(),
            bonuses: default_bonuses(),
            profile: Profile {
                id: "traveller-1".into(),
                name: "Alex Carter".into(),
                miles: 1250,
            },
        }
    }
}

fn product(
    id: &str,
    name: &str,
    amount: Decimal,
    rating: f32,
    status: Availability,
    miles: u64,
    description: &str,
    kind: &str,
    category: Category,
    subcategory: SubCategory,
) -> Product {
    Product {
        id: id.into(),
        name: name.into(),
        amount,
        rating,
        status,
        miles,
        description: description.into(),
        order_count: 0,
        kind: kind.into(),
        category,
        subcategory: Some(subcategory),
        image: None,
    }
}

fn default_products() -> Vec<Product> {
    vec![
        product(
            "prod-1001",
            "Aurora Wireless Earbuds",
            Decimal::new(12_900, 2),
            4.6,
            Availability::Available,
            120,
            "True wireless earbuds with active noise cancelling.",
            "featured",
            Category::Electronics,
            SubCategory::Audio,
        ),
        product(
            "prod-1002",
            "Meridian 14\" Ultrabook",
            Decimal::new(104_900, 2),
            4.8,
            Availability::Limited,
            950,
            "Thin and light laptop with all-day battery.",
            "featured",
            Category::Electronics,
            SubCategory::Laptops,
        ),
        product(
            "prod-1003",
            "Voyager Merino Jumper",
            Decimal::new(8_500, 2),
            4.3,
            Availability::Available,
            80,
            "Midweight merino wool jumper for year-round wear.",
            "standard",
            Category::Fashion,
            SubCategory::Menswear,
        ),
        product(
            "prod-1004",
            "Trailline Running Shoes",
            Decimal::new(11_200, 2),
            4.5,
            Availability::Available,
            100,
            "Cushioned trail shoes with a grippy outsole.",
            "standard",
            Category::Fashion,
            SubCategory::Footwear,
        ),
        product(
            "prod-1005",
            "Calme Hydrating Serum",
            Decimal::new(4_200, 2),
            4.1,
            Availability::OutOfStock,
            40,
            "Lightweight hyaluronic serum, fragrance free.",
            "standard",
            Category::Beauty,
            SubCategory::Skincare,
        ),
        product(
            "prod-1006",
            "Summit 2-Person Tent",
            Decimal::new(24_900, 2),
            4.7,
            Availability::Available,
            220,
            "Three-season backpacking tent under two kilograms.",
            "featured",
            Category::Sports,
            SubCategory::Outdoor,
        ),
    ]
}

fn default_bonuses() -> Vec<Bonus> {
    vec![
        Bonus {
            id: "bonus-10".into(),
            name: "Short Haul".into(),
            description: "10% off your next purchase or checkout.".into(),
            miles_required: 250,
            discount: Decimal::from(10),
            kind: BonusKind::Discount,
        },
        Bonus {
            id: "bonus-20".into(),
            name: "Long Haul".into(),
            description: "20% off your next purchase or checkout.".into(),
            miles_required: 500,
            discount: Decimal::from(20),
            kind: BonusKind::Discount,
        },
        Bonus {
            id: "bonus-30".into(),
            name: "Round The World".into(),
            description: "30% off your next purchase or checkout.".into(),
            miles_required: 1000,
            discount: Decimal::from(30),
            kind: BonusKind::Discount,
        },
        Bonus {
            id: "bonus-gift".into(),
            name: "Surprise Gift".into(),
            description: "A free item with your next order.".into(),
            miles_required: 750,
            discount: Decimal::ZERO,
            kind: BonusKind::FreeItem,
        },
    ]
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn default_seed_has_products_and_bonuses() {
        let seed = Seed::default();

        assert!(!seed.products.is_empty(), "catalogue seeded");
        assert!(!seed.bonuses.is_empty(), "bonuses seeded");
        assert_eq!(seed.profile.miles, 1250);
    }

    #[test]
    fn default_product_ids_are_unique() {
        let seed = Seed::default();
        let mut ids: Vec<&str> = seed.products.iter().map(|p| p.id.as_str()).collect();

        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), seed.products.len(), "no duplicate product ids");
    }

    #[test]
    fn seed_round_trips_through_yaml() -> TestResult {
        let seed = Seed::default();
        let document = serde_norway::to_string(&seed)?;

        let parsed = Seed::from_yaml(&document)?;

        assert_eq!(parsed, seed);

        Ok(())
    }

    #[test]
    fn seed_parses_a_handwritten_document() -> TestResult {
        let document = r#"
products:
  - id: p1
    name: Sample
    amount: "100"
    rating: 4.0
    status: available
    miles: 10
    description: A sample product
    kind: standard
    category: electronics
    subcategory: audio
bonuses:
  - id: b1
    name: Sample Bonus
    description: 20% off
    miles_required: 500
    discount: "20"
    kind: discount
profile:
  id: u1
  name: Alex Carter
  miles: 1250
"#;

        let seed = Seed::from_yaml(document)?;

        assert_eq!(seed.products.len(), 1);
        assert_eq!(seed.bonuses.len(), 1);
        assert_eq!(
            seed.products.first().map(|p| p.order_count),
            Some(0),
            "order count defaults to zero"
        );

        Ok(())
    }

    #[test]
    fn seed_rejects_a_malformed_document() {
        let result = Seed::from_yaml("products: 12");

        assert!(matches!(result, Err(SeedError::Yaml(_))));
    }
}
