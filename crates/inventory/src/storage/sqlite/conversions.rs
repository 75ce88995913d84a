//! SQLite row conversion functions.

use inventory_core::product::Product;
use rusqlite::Row;

/// Convert a SQLite row to a Product.
///
/// Expected columns: institution_code, product_id, product_name, in_stocked, created, updated
pub fn row_to_product(row: &Row) -> rusqlite::Result<Product> {
    Ok(Product {
        institution_code: row.get(0)?,
        product_id: row.get(1)?,
        product_name: row.get(2)?,
        in_stocked: row.get(3)?,
        created: row.get(4)?,
        updated: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::*;
    use crate::storage::sqlite::schema;

    #[test]
    fn test_row_to_product_keeps_nulls() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(schema::CREATE_TABLES).unwrap();
        conn.execute(
            schema::INSERT_PRODUCT,
            rusqlite::params![
                "9900000001",
                "P001",
                "Widget",
                None::<i32>,
                "20240115103000",
                None::<String>
            ],
        )
        .unwrap();

        let product = conn
            .query_row(schema::SELECT_PRODUCTS_BY_INSTITUTION, ["9900000001"], row_to_product)
            .unwrap();

        assert_eq!(
            product,
            Product::new("9900000001", "P001", "Widget").with_created("20240115103000")
        );
    }
}
