//! SQLite schema definitions and SQL query constants.
//!
//! This module contains all SQL statements used by the SQLite repository,
//! following the Functional Core pattern - pure data, no I/O.
//!
//! Prefix matching uses `substr(column, 1, length(?)) = ?` rather than `LIKE`
//! so it stays case-sensitive and treats `%` and `_` literally. An empty
//! prefix matches every row; a NULL column never matches an active prefix.

/// SQL statement to create the products table and its indexes.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    institution_code TEXT NOT NULL,
    product_id TEXT NOT NULL,
    product_name TEXT NOT NULL,
    in_stocked INTEGER,
    created TEXT,
    updated TEXT,
    PRIMARY KEY (institution_code, product_id)
);

CREATE INDEX IF NOT EXISTS idx_products_name ON products(institution_code, product_name);
"#;

pub const INSERT_PRODUCT: &str = r#"
INSERT INTO products (institution_code, product_id, product_name, in_stocked, created, updated)
VALUES (?1, ?2, ?3, ?4, ?5, ?6)
"#;

/// Merges supplied fields: an empty name or a NULL stock count keeps the
/// stored value. `created` is never touched.
pub const UPDATE_PRODUCT: &str = r#"
UPDATE products
SET product_name = COALESCE(NULLIF(?3, ''), product_name),
    in_stocked = COALESCE(?4, in_stocked),
    updated = ?5
WHERE institution_code = ?1 AND product_id = ?2
"#;

pub const SELECT_PRODUCTS_PAGE: &str = r#"
SELECT institution_code, product_id, product_name, in_stocked, created, updated
FROM products
ORDER BY institution_code, product_id
LIMIT ?1 OFFSET ?2
"#;

pub const SELECT_PRODUCTS_BY_INSTITUTION: &str = r#"
SELECT institution_code, product_id, product_name, in_stocked, created, updated
FROM products
WHERE institution_code = ?1
ORDER BY product_id
"#;

pub const SELECT_PRODUCTS_MATCHING: &str = r#"
SELECT institution_code, product_id, product_name, in_stocked, created, updated
FROM products
WHERE institution_code = ?1
  AND substr(product_id, 1, length(?2)) = ?2
  AND substr(product_name, 1, length(?3)) = ?3
  AND (?4 IS NULL OR in_stocked = ?4)
  AND (?5 IS NULL OR substr(created, 1, length(?5)) = ?5)
  AND (?6 IS NULL OR substr(updated, 1, length(?6)) = ?6)
ORDER BY product_id
"#;
