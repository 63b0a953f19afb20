use std::sync::Arc;

use log::*;
use reqwest::{
    header::HeaderMap,
    multipart::{Form, Part},
    Client,
    Method,
    Response,
    StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::{
    catalog::{nest_categories, Category, CategoryNode},
    config::StorefrontConfig,
    data_objects::{Product, ProductFilter, ProductPage, ProductUpdate, UploadResponse},
    error::ApiError,
};

/// Client for the storefront REST API.
///
/// Stateless beyond the connection pool: no retries, no caching, no request deduplication.
/// Every failure is surfaced as an [`ApiError`] carrying a status code and a JSON payload.
#[derive(Clone)]
pub struct StorefrontApi {
    config: StorefrontConfig,
    client: Arc<Client>,
}

impl StorefrontApi {
    pub fn new(config: StorefrontConfig) -> Result<Self, ApiError> {
        let client = Client::builder().build().map_err(|e| ApiError::no_response(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    /// The full URL for a request path. Plain concatenation; the path carries any query string
    /// or trailing slash the endpoint requires.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<T, ApiError> {
        self.request(Method::GET, path, params, None::<&()>, None).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        headers: Option<HeaderMap>,
    ) -> Result<T, ApiError> {
        self.request(Method::POST, path, &[], Some(body), headers).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        self.request(Method::PUT, path, &[], Some(body), None).await
    }

    /// Sends a DELETE with an optional JSON body. A `204 No Content` response resolves to the
    /// empty JSON object rather than attempting to parse a body.
    pub async fn delete<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        self.request(Method::DELETE, path, &[], body, None).await
    }

    /// Sends a multipart form as-is. No content type is injected and the caller-supplied
    /// headers are applied verbatim, so the transport can set a correct multipart boundary.
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
        headers: Option<HeaderMap>,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        trace!("Sending multipart POST {url}");
        let mut req = self.client.post(url).multipart(form);
        if let Some(headers) = headers {
            req = req.headers(headers);
        }
        let response = req.send().await.map_err(|e| ApiError::no_response(e.to_string()))?;
        read_response(response).await
    }

    async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
        body: Option<&B>,
        headers: Option<HeaderMap>,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        trace!("Sending request: {method} {url}");
        let mut req = self.client.request(method, url);
        if !params.is_empty() {
            req = req.query(params);
        }
        if let Some(body) = body {
            req = req.json(body);
        }
        // Caller headers come last so they win over the serialization defaults.
        if let Some(headers) = headers {
            req = req.headers(headers);
        }
        let response = req.send().await.map_err(|e| ApiError::no_response(e.to_string()))?;
        read_response(response).await
    }

    pub async fn products(&self, filter: &ProductFilter) -> Result<ProductPage, ApiError> {
        let params = filter.to_params();
        let params = params.iter().map(|(k, v)| (*k, v.as_str())).collect::<Vec<_>>();
        debug!("Fetching products");
        let page = self.get::<ProductPage>("products/", &params).await?;
        debug!(
            "Fetched {} of {} products (page {} of {})",
            page.results.len(),
            page.count,
            page.current_page,
            page.total_pages
        );
        Ok(page)
    }

    pub async fn product(&self, id: u64) -> Result<Product, ApiError> {
        let path = format!("products/{id}/");
        debug!("Fetching product #{id}");
        self.get(&path, &[]).await
    }

    pub async fn create_product(&self, product: &ProductUpdate) -> Result<Product, ApiError> {
        debug!("Creating product '{}'", product.name);
        let created = self.post::<Product, ProductUpdate>("products/", product, None).await?;
        info!("Created product #{} ({})", created.id, created.name);
        Ok(created)
    }

    pub async fn update_product(&self, id: u64, product: &ProductUpdate) -> Result<Product, ApiError> {
        let path = format!("products/{id}/");
        debug!("Updating product #{id}");
        let updated = self.put::<Product, ProductUpdate>(&path, product).await?;
        info!("Updated product #{id} ({})", updated.name);
        Ok(updated)
    }

    pub async fn delete_product(&self, id: u64) -> Result<(), ApiError> {
        let path = format!("products/{id}/");
        debug!("Deleting product #{id}");
        let _ = self.delete::<Value, ()>(&path, None).await?;
        info!("Deleted product #{id}");
        Ok(())
    }

    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        debug!("Fetching categories");
        let categories = self.get::<Vec<Category>>("categories/", &[]).await?;
        debug!("Fetched {} categories", categories.len());
        Ok(categories)
    }

    /// Fetches the flat category list and nests it into a forest of root categories.
    pub async fn category_tree(&self) -> Result<Vec<CategoryNode>, ApiError> {
        let categories = self.categories().await?;
        Ok(nest_categories(&categories))
    }

    pub async fn upload_image(&self, filename: &str, bytes: Vec<u8>) -> Result<UploadResponse, ApiError> {
        let part = Part::bytes(bytes).file_name(filename.to_string());
        let form = Form::new().part("file", part);
        debug!("Uploading image {filename}");
        let response = self.post_form::<UploadResponse>("upload/", form, None).await?;
        info!("Uploaded image {filename} as {}", response.filename);
        Ok(response)
    }
}

async fn read_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        if status == StatusCode::NO_CONTENT {
            trace!("Request successful with no content");
            return empty_object();
        }
        trace!("Request successful. {status}");
        response.json::<T>().await.map_err(|e| ApiError::no_response(e.to_string()))
    } else {
        let status_text = status.canonical_reason().unwrap_or("Unknown error");
        let body = response.text().await.map_err(|e| ApiError::no_response(e.to_string()))?;
        Err(ApiError::from_error_body(status.as_u16(), status_text, &body))
    }
}

fn empty_object<T: DeserializeOwned>() -> Result<T, ApiError> {
    serde_json::from_value(Value::Object(Map::new())).map_err(|e| ApiError::no_response(e.to_string()))
}
