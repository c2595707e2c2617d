//! Products

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stock availability of a catalogue product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Availability {
    /// In stock and purchasable.
    Available,
    /// Low stock, still purchasable.
    Limited,
    /// Cannot be added to the cart or purchased.
    OutOfStock,
}

/// Top-level product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Phones, laptops, audio gear.
    Electronics,
    /// Clothing and footwear.
    Fashion,
    /// Skincare and fragrance.
    Beauty,
    /// Fitness and outdoor equipment.
    Sports,
}

/// Second-level category, each belonging to exactly one [`Category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubCategory {
    /// Electronics / phones
    Phones,
    /// Electronics / laptops
    Laptops,
    /// Electronics / audio
    Audio,
    /// Fashion / menswear
    Menswear,
    /// Fashion / womenswear
    Womenswear,
    /// Fashion / footwear
    Footwear,
    /// Beauty / skincare
    Skincare,
    /// Beauty / fragrance
    Fragrance,
    /// Sports / fitness
    Fitness,
    /// Sports / outdoor
    Outdoor,
}

impl SubCategory {
    /// The category this subcategory belongs to.
    ///
    /// The store does not enforce the pairing on writes; callers building
    /// forms should filter subcategories through this mapping.
    #[must_use]
    pub fn category(self) -> Category {
        match self {
            Self::Phones | Self::Laptops | Self::Audio => Category::Electronics,
            Self::Menswear | Self::Womenswear | Self::Footwear => Category::Fashion,
            Self::Skincare | Self::Fragrance => Category::Beauty,
            Self::Fitness | Self::Outdoor => Category::Sports,
        }
    }
}

/// Catalogue entry.
///
/// The id is assigned at creation time and never changes; every other field
/// is mutable through [`ProductPatch`] with last-write-wins semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier, generated when the product is added.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Unit price.
    pub amount: Decimal,

    /// Average rating, expected in `1.0..=5.0`.
    pub rating: f32,

    /// Stock availability.
    pub status: Availability,

    /// Miles awarded per unit purchased.
    pub miles: u64,

    /// Free-text description.
    pub description: String,

    /// Cumulative number of units purchased across all checkouts.
    #[serde(default)]
    pub order_count: u64,

    /// Free-form type tag, e.g. `"featured"`.
    pub kind: String,

    /// Top-level category.
    pub category: Category,

    /// Optional second-level category.
    #[serde(default)]
    pub subcategory: Option<SubCategory>,

    /// Optional image reference.
    #[serde(default)]
    pub image: Option<String>,
}

/// A product as supplied to the add operation, before an id exists.
///
/// Fields are trusted to be well-formed; range validation belongs to the
/// caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    /// Display name.
    pub name: String,

    /// Unit price.
    pub amount: Decimal,

    /// Average rating, expected in `1.0..=5.0`.
    pub rating: f32,

    /// Stock availability.
    pub status: Availability,

    /// Miles awarded per unit purchased.
    pub miles: u64,

    /// Free-text description.
    pub description: String,

    /// Free-form type tag.
    pub kind: String,

    /// Top-level category.
    pub category: Category,

    /// Optional second-level category.
    #[serde(default)]
    pub subcategory: Option<SubCategory>,

    /// Optional image reference.
    #[serde(default)]
    pub image: Option<String>,
}

impl NewProduct {
    /// Promote to a full catalogue entry under the given id, with the
    /// cumulative order count starting at zero.
    #[must_use]
    pub fn into_product(self, id: String) -> Product {
        Product {
            id,
            name: self.name,
            amount: self.amount,
            rating: self.rating,
            status: self.status,
            miles: self.miles,
            description: self.description,
            order_count: 0,
            kind: self.kind,
            category: self.category,
            subcategory: self.subcategory,
            image: self.image,
        }
    }
}

/// Partial update for a catalogue entry; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    /// New display name.
    pub name: Option<String>,

    /// New unit price.
    pub amount: Option<Decimal>,

    /// New rating.
    pub rating: Option<f32>,

    /// New availability.
    pub status: Option<Availability>,

    /// New per-unit miles award.
    pub miles: Option<u64>,

    /// New description.
    pub description: Option<String>,

    /// New type tag.
    pub kind: Option<String>,

    /// New category.
    pub category: Option<Category>,

    /// New subcategory.
    pub subcategory: Option<SubCategory>,

    /// New image reference.
    pub image: Option<String>,
}

impl Product {
    /// Merge a partial update into this entry, field by field.
    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(rating) = patch.rating {
            self.rating = rating;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(miles) = patch.miles {
            self.miles = miles;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(subcategory) = patch.subcategory {
            self.subcategory = Some(subcategory);
        }
        if let Some(image) = patch.image {
            self.image = Some(image);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headphones() -> Product {
        NewProduct {
            name: "Noise-Cancelling Headphones".into(),
            amount: Decimal::new(19_900, 2),
            rating: 4.5,
            status: Availability::Available,
            miles: 20,
            description: "Over-ear, 30h battery".into(),
            kind: "featured".into(),
            category: Category::Electronics,
            subcategory: Some(SubCategory::Audio),
            image: None,
        }
        .into_product("p-test".into())
    }

    #[test]
    fn into_product_starts_with_zero_order_count() {
        let product = headphones();

        assert_eq!(product.id, "p-test");
        assert_eq!(product.order_count, 0);
    }

    #[test]
    fn apply_merges_only_provided_fields() {
        let mut product = headphones();

        product.apply(ProductPatch {
            amount: Some(Decimal::new(14_900, 2)),
            status: Some(Availability::Limited),
            ..ProductPatch::default()
        });

        assert_eq!(product.amount, Decimal::new(14_900, 2));
        assert_eq!(product.status, Availability::Limited);
        assert_eq!(product.name, "Noise-Cancelling Headphones");
        assert_eq!(product.miles, 20);
    }

    #[test]
    fn apply_with_empty_patch_is_a_no_op() {
        let mut product = headphones();
        let before = product.clone();

        product.apply(ProductPatch::default());

        assert_eq!(product, before);
    }

    #[test]
    fn subcategories_map_to_their_category() {
        assert_eq!(SubCategory::Audio.category(), Category::Electronics);
        assert_eq!(SubCategory::Footwear.category(), Category::Fashion);
        assert_eq!(SubCategory::Fragrance.category(), Category::Beauty);
        assert_eq!(SubCategory::Outdoor.category(), Category::Sports);
    }
}
