use std::path::PathBuf;

use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum StoreCommand {
    #[command(subcommand)]
    /// Retrieve or modify products
    Products(ProductsCommand),
    #[command(subcommand)]
    /// Browse the category catalogue
    Categories(CategoriesCommand),
    #[command(subcommand)]
    /// Upload product images
    Images(ImagesCommand),
}

#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    /// List products, optionally filtered by category and/or subcategory
    List {
        #[arg(short, long)]
        category: Option<i64>,
        #[arg(short, long)]
        subcategory: Option<i64>,
        #[arg(short, long)]
        page: Option<u32>,
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Fetch the product with the given ID
    Get {
        #[arg(required = true, index = 1)]
        id: u64,
    },
    /// Create a new product from a JSON document. Reads stdin when no file is given.
    Add {
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Update the product with the given ID from a JSON document. Reads stdin when no file is
    /// given.
    Update {
        #[arg(required = true, index = 1)]
        id: u64,
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Delete the product with the given ID
    Delete {
        #[arg(required = true, index = 1)]
        id: u64,
    },
}

#[derive(Debug, Subcommand)]
pub enum CategoriesCommand {
    /// List the flat category records as returned by the API
    List,
    /// Print the categories as a nested tree
    Tree,
}

#[derive(Debug, Subcommand)]
pub enum ImagesCommand {
    /// Upload an image file
    Upload {
        #[arg(required = true, index = 1)]
        path: PathBuf,
    },
}
