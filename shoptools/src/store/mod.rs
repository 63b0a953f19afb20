mod command_def;
mod command_handler;

pub use command_def::{CategoriesCommand, ImagesCommand, ProductsCommand, StoreCommand};
pub use command_handler::handle_store_command;
