// Card request form: product name plus a category from a fixed list

use thiserror::Error;

use crate::types::GenerationRequest;

pub const CATEGORIES: [&str; 21] = [
    "Art & Crafts",
    "Automotive",
    "Baby & Kids",
    "Beauty & Personal Care",
    "Books",
    "Clothing & Fashion",
    "Food & Beverages",
    "Furniture",
    "Garden & Outdoor",
    "Health & Wellness",
    "Home Appliances",
    "Jewelry & Accessories",
    "Kitchenware",
    "Music & Instruments",
    "Office Supplies",
    "Pet Supplies",
    "Sports & Outdoors",
    "Toys & Games",
    "Travel & Luggage",
    "Wearable Electronics",
    "Others",
];

pub const MIN_PRODUCT_NAME_CHARS: usize = 2;
pub const PRODUCT_NAME_TOO_SHORT: &str = "Product name must be at least 2 characters.";
pub const CATEGORY_REQUIRED: &str = "Please select a category.";

/// Inline messages for the fields that failed validation.
#[derive(Error, Debug, Clone, Default, PartialEq, Eq)]
#[error("form has invalid fields")]
pub struct FormErrors {
    pub product_name: Option<&'static str>,
    pub category: Option<&'static str>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.product_name.is_none() && self.category.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardForm {
    product_name: String,
    category: Option<&'static str>,
}

impl CardForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn category(&self) -> Option<&'static str> {
        self.category
    }

    pub fn set_product_name(&mut self, product_name: impl Into<String>) {
        self.product_name = product_name.into();
    }

    /// Select a category by name. Names outside `CATEGORIES` leave the
    /// current selection untouched and return `false`.
    pub fn select_category(&mut self, category: &str) -> bool {
        match CATEGORIES.iter().find(|known| **known == category) {
            Some(known) => {
                self.category = Some(*known);
                true
            }
            None => false,
        }
    }

    /// Select a category by its position in `CATEGORIES` (zero-based).
    pub fn select_category_index(&mut self, index: usize) -> bool {
        match CATEGORIES.get(index) {
            Some(known) => {
                self.category = Some(*known);
                true
            }
            None => false,
        }
    }

    pub fn clear_category(&mut self) {
        self.category = None;
    }

    pub fn validate(&self) -> Result<GenerationRequest, FormErrors> {
        let mut errors = FormErrors::default();
        if self.product_name.chars().count() < MIN_PRODUCT_NAME_CHARS {
            errors.product_name = Some(PRODUCT_NAME_TOO_SHORT);
        }
        if self.category.is_none() {
            errors.category = Some(CATEGORY_REQUIRED);
        }

        match self.category {
            Some(category) if errors.is_empty() => {
                Ok(GenerationRequest::new(self.product_name.clone(), category))
            }
            _ => Err(errors),
        }
    }
}
