//! Table configuration types (Functional Core - pure data).

/// Table schema configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub table_name: String,
    pub partition_key: KeyAttribute,
    pub sort_key: Option<KeyAttribute>,
    pub gsis: Vec<GsiConfig>,
}

/// A string key attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
}

impl KeyAttribute {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

/// Global Secondary Index configuration. Every index projects all attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GsiConfig {
    pub name: String,
    pub partition_key: KeyAttribute,
    pub sort_key: Option<KeyAttribute>,
}

impl TableConfig {
    /// Every distinct key attribute across the table and its indexes.
    pub fn key_attributes(&self) -> Vec<&KeyAttribute> {
        let mut keys: Vec<&KeyAttribute> = Vec::new();
        let candidates = std::iter::once(&self.partition_key)
            .chain(self.sort_key.iter())
            .chain(
                self.gsis
                    .iter()
                    .flat_map(|gsi| std::iter::once(&gsi.partition_key).chain(gsi.sort_key.iter())),
            );
        for key in candidates {
            if !keys.iter().any(|k| k.name == key.name) {
                keys.push(key);
            }
        }
        keys
    }
}

/// The products table: keyed by institution and product, with a name index
/// for prefix searches by product name within an institution.
pub fn products_table_config(table_name: &str, name_index: &str) -> TableConfig {
    TableConfig {
        table_name: table_name.to_string(),
        partition_key: KeyAttribute::new("InstitutionCode"),
        sort_key: Some(KeyAttribute::new("ProductId")),
        gsis: vec![GsiConfig {
            name: name_index.to_string(),
            partition_key: KeyAttribute::new("InstitutionCode"),
            sort_key: Some(KeyAttribute::new("ProductName")),
        }],
    }
}
