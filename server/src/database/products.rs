use tokio_rusqlite::{Connection, Result, rusqlite};
use tracing::debug;

use shared::types::Product;

use crate::database::utils::get_timestamp;

/// Optional equality filters for [`list_products`]. An empty filter lists
/// everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub name: Option<String>,
    pub category: Option<String>,
    pub available: Option<bool>,
}

/// Insert a product and return its store-assigned id.
pub async fn insert_product(conn: &Connection, product: &Product) -> Result<i64> {
    let product = product.clone();
    conn.call(move |conn: &mut rusqlite::Connection| {
        let now = get_timestamp();
        conn.execute(
            "INSERT INTO products (name, description, price, available, category, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
            rusqlite::params![
                product.name,
                product.description,
                product.price,
                product.available,
                product.category,
                now,
            ],
        )?;
        Ok::<_, rusqlite::Error>(conn.last_insert_rowid())
    })
    .await
}

/// Fetch one product by id.
pub async fn get_product(conn: &Connection, id: i64) -> Result<Option<Product>> {
    conn.call(move |conn: &mut rusqlite::Connection| {
        let mut stmt = conn.prepare(
            "SELECT id, name, description, price, available, category
             FROM products WHERE id = ?1",
        )?;
        let mut rows = stmt.query_map([id], row_to_product)?;
        rows.next().transpose()
    })
    .await
}

/// List products matching the filter, ordered by id.
pub async fn list_products(conn: &Connection, filter: ProductFilter) -> Result<Vec<Product>> {
    debug!("Listing products with filter: {:?}", filter);

    conn.call(move |conn: &mut rusqlite::Connection| {
        let mut sql = String::from(
            "SELECT id, name, description, price, available, category FROM products",
        );
        let mut clauses: Vec<&str> = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(name) = &filter.name {
            clauses.push("name = ?");
            params.push(Box::new(name.clone()));
        }
        if let Some(category) = &filter.category {
            clauses.push("category = ?");
            params.push(Box::new(category.clone()));
        }
        if let Some(available) = filter.available {
            clauses.push("available = ?");
            params.push(Box::new(available));
        }

        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY id");

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(
            rusqlite::params_from_iter(params.iter().map(|p| p.as_ref())),
            row_to_product,
        )?;
        rows.collect::<rusqlite::Result<Vec<Product>>>()
    })
    .await
}

/// Replace a product's fields. Returns false when the id does not exist.
pub async fn update_product(conn: &Connection, id: i64, product: &Product) -> Result<bool> {
    let product = product.clone();
    conn.call(move |conn: &mut rusqlite::Connection| {
        let changed = conn.execute(
            "UPDATE products
             SET name = ?1, description = ?2, price = ?3, available = ?4,
                 category = ?5, updated_at = ?6
             WHERE id = ?7",
            rusqlite::params![
                product.name,
                product.description,
                product.price,
                product.available,
                product.category,
                get_timestamp(),
                id,
            ],
        )?;
        Ok::<_, rusqlite::Error>(changed > 0)
    })
    .await
}

/// Delete a product. Returns false when the id did not exist.
pub async fn delete_product(conn: &Connection, id: i64) -> Result<bool> {
    conn.call(move |conn: &mut rusqlite::Connection| {
        let deleted = conn.execute("DELETE FROM products WHERE id = ?1", [id])?;
        Ok::<_, rusqlite::Error>(deleted > 0)
    })
    .await
}

fn row_to_product(row: &rusqlite::Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
        available: row.get(4)?,
        category: row.get(5)?,
    })
}
