mod api;
mod catalog;
mod config;
mod error;

pub mod data_objects;

pub use api::StorefrontApi;
pub use catalog::{nest_categories, Category, CategoryId, CategoryNode};
pub use config::StorefrontConfig;
pub use data_objects::{Product, ProductFilter, ProductPage, ProductUpdate, UploadResponse};
pub use error::ApiError;
