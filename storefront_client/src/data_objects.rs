use serde::{Deserialize, Serialize};

use crate::catalog::CategoryId;

/// A product as returned by `GET products/` and `GET products/<id>/`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub sku: String,
    #[serde(default)]
    pub model_number: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub old_price: Option<f64>,
    pub quantity: i64,
    /// Warranty period in months.
    #[serde(default)]
    pub warranty: Option<i64>,
    #[serde(default)]
    pub delivery_available: bool,
    /// Rich-text (HTML) description.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<CategoryId>,
    #[serde(default)]
    pub subcategory: Option<CategoryId>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Product {
    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }

    /// The discount relative to the old price, in percent, when the product is marked down.
    pub fn discount_percent(&self) -> Option<f64> {
        match self.old_price {
            Some(old) if old > self.price && old > 0.0 => Some((old - self.price) / old * 100.0),
            _ => None,
        }
    }
}

/// The payload for `POST products/` and `PUT products/<id>/`. Optional numeric fields are
/// serialized as explicit nulls, which is what the backend form handler expects.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProductUpdate {
    pub name: String,
    pub sku: String,
    #[serde(default)]
    pub model_number: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub old_price: Option<f64>,
    pub quantity: i64,
    #[serde(default)]
    pub warranty: Option<i64>,
    #[serde(default)]
    pub delivery_available: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<CategoryId>,
    #[serde(default)]
    pub subcategory: Option<CategoryId>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// One page of product listing results.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProductPage {
    pub count: u64,
    pub total_pages: u32,
    pub current_page: u32,
    pub limit: u32,
    pub results: Vec<Product>,
}

/// Query parameters for `GET products/`. All values are passed through to the API untouched.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category: Option<CategoryId>,
    pub subcategory: Option<CategoryId>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ProductFilter {
    pub fn by_category(id: CategoryId) -> Self {
        Self { category: Some(id), ..Self::default() }
    }

    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(category) = &self.category {
            params.push(("category", category.to_string()));
        }
        if let Some(subcategory) = &self.subcategory {
            params.push(("subcategory", subcategory.to_string()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        params
    }
}

/// Response of the multipart image upload endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadResponse {
    pub filename: String,
    #[serde(default)]
    pub status: Option<String>,
}
