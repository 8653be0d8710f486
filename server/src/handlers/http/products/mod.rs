pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

pub use create::handle_create_product;
pub use delete::handle_delete_product;
pub use get::handle_get_product;
pub use list::handle_list_products;
pub use update::handle_update_product;
