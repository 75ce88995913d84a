//! Attribute names and expression placeholders for the products table.
//!
//! Items are stored with their domain attribute names; the table key is
//! `InstitutionCode` (partition) + `ProductId` (sort), and the name index is
//! keyed by `InstitutionCode` + `ProductName`.

// ============================================================================
// Attribute names
// ============================================================================

pub const INSTITUTION_CODE: &str = "InstitutionCode";
pub const PRODUCT_ID: &str = "ProductId";
pub const PRODUCT_NAME: &str = "ProductName";
pub const IN_STOCKED: &str = "InStocked";
pub const CREATED: &str = "Created";
pub const UPDATED: &str = "Updated";

// ============================================================================
// Placeholders
// ============================================================================

/// Expression attribute name placeholder.
///
/// Pattern: `#<attribute>`
pub fn name_placeholder(attribute: &str) -> String {
    format!("#{attribute}")
}

/// Expression attribute value placeholder.
///
/// Pattern: `:<attribute>`
pub fn value_placeholder(attribute: &str) -> String {
    format!(":{attribute}")
}
