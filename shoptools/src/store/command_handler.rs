use std::{io::Read, path::PathBuf};

use anyhow::{anyhow, Context, Result};
use prettytable::{row, Table};
use storefront_client::{
    CategoryId,
    CategoryNode,
    ProductFilter,
    ProductUpdate,
    StorefrontApi,
    StorefrontConfig,
};

use crate::store::{CategoriesCommand, ImagesCommand, ProductsCommand, StoreCommand};

pub async fn handle_store_command(command: StoreCommand) {
    use StoreCommand::*;
    match command {
        Products(cmd) => match cmd {
            ProductsCommand::List { category, subcategory, page, limit } => {
                list_products(category, subcategory, page, limit).await
            },
            ProductsCommand::Get { id } => fetch_product(id).await,
            ProductsCommand::Add { file } => add_product(file).await,
            ProductsCommand::Update { id, file } => update_product(id, file).await,
            ProductsCommand::Delete { id } => delete_product(id).await,
        },
        Categories(cmd) => match cmd {
            CategoriesCommand::List => list_categories().await,
            CategoriesCommand::Tree => print_category_tree().await,
        },
        Images(cmd) => match cmd {
            ImagesCommand::Upload { path } => upload_image(path).await,
        },
    }
}

fn new_storefront_api() -> StorefrontApi {
    let config = StorefrontConfig::new_from_env_or_default();
    match StorefrontApi::new(config) {
        Ok(api) => api,
        Err(e) => {
            eprintln!("Error creating storefront API client: {e}");
            std::process::exit(1);
        },
    }
}

async fn list_products(category: Option<i64>, subcategory: Option<i64>, page: Option<u32>, limit: Option<u32>) {
    let api = new_storefront_api();
    let filter = ProductFilter {
        category: category.map(CategoryId::Number),
        subcategory: subcategory.map(CategoryId::Number),
        page,
        limit,
    };
    match api.products(&filter).await {
        Ok(page) => {
            let mut table = Table::new();
            table.set_titles(row!["ID", "Name", "SKU", "Price", "Qty", "In stock"]);
            for product in &page.results {
                table.add_row(row![
                    product.id,
                    product.name,
                    product.sku,
                    format!("{:.2}", product.price),
                    product.quantity,
                    if product.in_stock() { "yes" } else { "no" }
                ]);
            }
            table.printstd();
            println!("Page {} of {} ({} products in total)", page.current_page, page.total_pages, page.count);
        },
        Err(e) => eprintln!("Error fetching products: {e}"),
    }
}

async fn fetch_product(id: u64) {
    let api = new_storefront_api();
    match api.product(id).await {
        Ok(product) => {
            let json = serde_json::to_string_pretty(&product)
                .unwrap_or_else(|e| format!("Could not represent product as JSON. {e}"));
            println!("Product #{id}\n{json}");
        },
        Err(e) => eprintln!("Error fetching product #{id}: {e}"),
    }
}

async fn add_product(file: Option<PathBuf>) {
    let payload = match read_payload(file) {
        Ok(payload) => payload,
        Err(e) => {
            eprintln!("Error reading product payload: {e}");
            return;
        },
    };
    let api = new_storefront_api();
    match api.create_product(&payload).await {
        Ok(product) => {
            let json = serde_json::to_string_pretty(&product)
                .unwrap_or_else(|e| format!("Could not represent product as JSON. {e}"));
            println!("Created product #{}\n{json}", product.id);
        },
        Err(e) => eprintln!("Error creating product: {e}"),
    }
}

async fn update_product(id: u64, file: Option<PathBuf>) {
    let payload = match read_payload(file) {
        Ok(payload) => payload,
        Err(e) => {
            eprintln!("Error reading product payload: {e}");
            return;
        },
    };
    let api = new_storefront_api();
    match api.update_product(id, &payload).await {
        Ok(product) => {
            let json = serde_json::to_string_pretty(&product)
                .unwrap_or_else(|e| format!("Could not represent product as JSON. {e}"));
            println!("Updated product #{id}\n{json}");
        },
        Err(e) => eprintln!("Error updating product #{id}: {e}"),
    }
}

async fn delete_product(id: u64) {
    let api = new_storefront_api();
    match api.delete_product(id).await {
        Ok(()) => println!("Deleted product #{id}"),
        Err(e) => eprintln!("Error deleting product #{id}: {e}"),
    }
}

async fn list_categories() {
    let api = new_storefront_api();
    match api.categories().await {
        Ok(categories) => {
            let json = serde_json::to_string_pretty(&categories)
                .unwrap_or_else(|e| format!("Could not represent categories as JSON. {e}"));
            println!("Categories\n{json}");
        },
        Err(e) => eprintln!("Error fetching categories: {e}"),
    }
}

async fn print_category_tree() {
    let api = new_storefront_api();
    match api.category_tree().await {
        Ok(forest) => print_nodes(&forest, 0),
        Err(e) => eprintln!("Error fetching categories: {e}"),
    }
}

fn print_nodes(nodes: &[CategoryNode], level: usize) {
    let indent = "   ".repeat(level);
    for node in nodes {
        println!("{indent}{} ({})", node.category.name, node.category.id);
        print_nodes(&node.subcategories, level + 1);
    }
}

async fn upload_image(path: PathBuf) {
    let filename = match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name.to_string(),
        None => {
            eprintln!("Error uploading image: {} has no usable file name", path.display());
            return;
        },
    };
    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error reading {}: {e}", path.display());
            return;
        },
    };
    let api = new_storefront_api();
    match api.upload_image(&filename, bytes).await {
        Ok(response) => {
            println!("Uploaded {} as {}", path.display(), response.filename);
            if let Some(status) = response.status {
                println!("Status: {status}");
            }
        },
        Err(e) => eprintln!("Error uploading {}: {e}", path.display()),
    }
}

fn read_payload(file: Option<PathBuf>) -> Result<ProductUpdate> {
    let raw = match file {
        Some(path) => std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("reading stdin")?;
            buf
        },
    };
    if raw.trim().is_empty() {
        return Err(anyhow!("the product payload is empty"));
    }
    serde_json::from_str(&raw).context("parsing the product JSON document")
}
