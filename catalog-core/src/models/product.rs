use super::Review;
use thiserror::Error;

const MAX_NAME_LENGTH: usize = 100;
const MAX_PRICE: f64 = 100_000_000.0;
const MAX_STOCK: u32 = 9999;

/// The reasons a product may be rejected before it is written.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required text field was empty or whitespace
    #[error("please enter product {0}")]
    Missing(&'static str),

    /// The name exceeds the maximum length
    #[error("name cannot exceed 100 characters")]
    NameTooLong,

    /// The price is negative, too large, or not a number
    #[error("price must be at least 0 and less than 100000000")]
    Price,

    /// The stock exceeds the maximum
    #[error("stock cannot exceed 9999")]
    Stock,

    /// A review rating is infinite or not a number
    #[error("rating must be a finite number")]
    Rating,
}

/// An image attached to a product.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductImage {
    /// The identifier of the image at the hosting service
    pub public_id: String,
    /// Where the image can be fetched from
    pub url: String,
}

/// The user-settable description of a product.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductData {
    /// Display name
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    /// Long-form description
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Unit price
    pub price: f64,
    /// The category the product is listed under
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: String,
    /// Units in stock
    #[cfg_attr(feature = "serde", serde(default = "default_stock"))]
    pub stock: u32,
    /// Product images
    #[cfg_attr(feature = "serde", serde(default))]
    pub images: Vec<ProductImage>,
}

#[cfg(feature = "serde")]
fn default_stock() -> u32 {
    1
}

impl ProductData {
    /// Check the invariants a stored product must satisfy.
    ///
    /// Surrounding whitespace on the name is not significant and is trimmed.
    pub fn validate(mut self) -> Result<Self, ValidationError> {
        self.name = self.name.trim().to_owned();

        if self.name.is_empty() {
            return Err(ValidationError::Missing("name"));
        }
        if self.name.chars().count() > MAX_NAME_LENGTH {
            return Err(ValidationError::NameTooLong);
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::Missing("description"));
        }
        if self.category.trim().is_empty() {
            return Err(ValidationError::Missing("category"));
        }
        // written this way so that NaN is rejected too
        if !(self.price >= 0.0 && self.price < MAX_PRICE) {
            return Err(ValidationError::Price);
        }
        if self.stock > MAX_STOCK {
            return Err(ValidationError::Stock);
        }

        Ok(self)
    }
}

/// A partial update to a product. Absent fields are left unchanged.
///
/// The review-derived fields cannot be set through a patch.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProductPatch {
    /// New display name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New price
    pub price: Option<f64>,
    /// New category
    pub category: Option<String>,
    /// New stock level
    pub stock: Option<u32>,
    /// Replacement images
    pub images: Option<Vec<ProductImage>>,
}

impl ProductPatch {
    /// Apply the patch on top of `data`.
    pub fn apply(self, mut data: ProductData) -> ProductData {
        if let Some(name) = self.name {
            data.name = name;
        }
        if let Some(description) = self.description {
            data.description = description;
        }
        if let Some(price) = self.price {
            data.price = price;
        }
        if let Some(category) = self.category {
            data.category = category;
        }
        if let Some(stock) = self.stock {
            data.stock = stock;
        }
        if let Some(images) = self.images {
            data.images = images;
        }
        data
    }
}

/// A stored product, as returned by a repository.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductRecord<DateTime, UserId, ProductId, ReviewId> {
    /// The product's identifier
    pub id: ProductId,
    /// The user-settable fields
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub data: ProductData,
    /// Mean review rating, 0 if there are no reviews
    pub ratings: f64,
    /// Number of reviews
    pub num_of_reviews: u32,
    /// The reviews themselves
    pub reviews: Vec<Review<UserId, ReviewId>>,
    /// The administrator who created the product
    pub created_by: UserId,
    /// When the product was created
    pub created_at: DateTime,
    /// When the product or its reviews last changed
    pub updated_at: DateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> ProductData {
        ProductData {
            name: "  Kettle ".to_owned(),
            description: "Boils water".to_owned(),
            price: 25.0,
            category: "Kitchen".to_owned(),
            stock: 3,
            images: Vec::new(),
        }
    }

    #[test]
    fn test_validate_trims_name() {
        let data = data().validate().unwrap();
        assert_eq!(data.name, "Kettle");
    }

    #[test]
    fn test_validate_rejects() {
        let cases = [
            (
                ProductData {
                    name: "   ".to_owned(),
                    ..data()
                },
                ValidationError::Missing("name"),
            ),
            (
                ProductData {
                    name: "x".repeat(101),
                    ..data()
                },
                ValidationError::NameTooLong,
            ),
            (
                ProductData {
                    description: String::new(),
                    ..data()
                },
                ValidationError::Missing("description"),
            ),
            (
                ProductData {
                    category: String::new(),
                    ..data()
                },
                ValidationError::Missing("category"),
            ),
            (
                ProductData {
                    price: -1.0,
                    ..data()
                },
                ValidationError::Price,
            ),
            (
                ProductData {
                    price: f64::NAN,
                    ..data()
                },
                ValidationError::Price,
            ),
            (
                ProductData {
                    stock: 10_000,
                    ..data()
                },
                ValidationError::Stock,
            ),
        ];

        for (data, expected) in cases {
            assert_eq!(data.validate(), Err(expected));
        }
    }

    #[test]
    fn test_patch_applies_present_fields() {
        let patch = ProductPatch {
            price: Some(30.0),
            stock: Some(0),
            ..Default::default()
        };
        let patched = patch.apply(data());
        assert_eq!(patched.price, 30.0);
        assert_eq!(patched.stock, 0);
        assert_eq!(patched.description, "Boils water");
    }

    #[test]
    fn test_data_defaults() {
        let data: ProductData = serde_json::from_str(
            r#"{"name": "Mug", "description": "Holds tea", "price": 4.5, "category": "Kitchen"}"#,
        )
        .unwrap();
        assert_eq!(data.stock, 1);
        assert!(data.images.is_empty());
    }

    #[test]
    fn test_patch_ignores_derived_fields() {
        let patch: ProductPatch =
            serde_json::from_str(r#"{"ratings": 5, "num_of_reviews": 100, "stock": 2}"#).unwrap();
        assert_eq!(
            patch,
            ProductPatch {
                stock: Some(2),
                ..Default::default()
            }
        );
    }
}
