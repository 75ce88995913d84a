//! Pure functions for calculating deployment plans (Functional Core).

use super::config::{GsiConfig, TableConfig};

/// Observed state of an existing table.
#[derive(Debug, Clone)]
pub struct TableState {
    pub status: TableStatus,
    pub gsis: Vec<GsiState>,
}

impl TableState {
    /// Table and every index are usable.
    pub fn is_ready(&self) -> bool {
        self.status == TableStatus::Active && self.gsis.iter().all(|g| g.ready)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    Active,
    Creating,
    Updating,
    Deleting,
}

#[derive(Debug, Clone)]
pub struct GsiState {
    pub name: String,
    /// False while the index is being created, updated or deleted.
    pub ready: bool,
}

/// Planned changes for deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployPlan {
    CreateTable { config: TableConfig },
    AddGsis {
        table_name: String,
        gsis_to_add: Vec<GsiConfig>,
    },
    NoChanges { table_name: String },
}

/// Plan for destroying a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestroyPlan {
    DeleteTable { table_name: String },
    AlreadyGone { table_name: String },
}

/// Calculate what changes are needed to reach the desired state.
pub fn calculate_deploy_plan(current: Option<&TableState>, desired: &TableConfig) -> DeployPlan {
    let Some(state) = current else {
        return DeployPlan::CreateTable {
            config: desired.clone(),
        };
    };

    let gsis_to_add: Vec<GsiConfig> = desired
        .gsis
        .iter()
        .filter(|gsi| !state.gsis.iter().any(|g| g.name == gsi.name))
        .cloned()
        .collect();

    let table_name = desired.table_name.clone();
    if gsis_to_add.is_empty() {
        DeployPlan::NoChanges { table_name }
    } else {
        DeployPlan::AddGsis {
            table_name,
            gsis_to_add,
        }
    }
}

pub fn calculate_destroy_plan(current: Option<&TableState>, table_name: &str) -> DestroyPlan {
    let table_name = table_name.to_string();
    match current {
        Some(_) => DestroyPlan::DeleteTable { table_name },
        None => DestroyPlan::AlreadyGone { table_name },
    }
}

fn format_gsi(gsi: &GsiConfig, prefix: &str) -> Vec<String> {
    let mut lines = vec![
        format!("  {prefix} GSI: {} (projection ALL)", gsi.name),
        format!("    Partition key: {} (S)", gsi.partition_key.name),
    ];
    if let Some(sk) = &gsi.sort_key {
        lines.push(format!("    Sort key: {} (S)", sk.name));
    }
    lines
}

/// Render a deploy plan. Lines start with `+`, `~` or `=`.
pub fn format_deploy_plan(plan: &DeployPlan) -> Vec<String> {
    match plan {
        DeployPlan::CreateTable { config } => {
            let mut lines = vec![
                format!("+ Create table: {}", config.table_name),
                format!("  Partition key: {} (S)", config.partition_key.name),
            ];
            if let Some(sk) = &config.sort_key {
                lines.push(format!("  Sort key: {} (S)", sk.name));
            }
            lines.extend(config.gsis.iter().flat_map(|gsi| format_gsi(gsi, "+")));
            lines.push("  Billing: PAY_PER_REQUEST".to_string());
            lines
        }
        DeployPlan::AddGsis {
            table_name,
            gsis_to_add,
        } => std::iter::once(format!("~ Update table: {table_name}"))
            .chain(gsis_to_add.iter().flat_map(|gsi| format_gsi(gsi, "+ Add")))
            .collect(),
        DeployPlan::NoChanges { table_name } => {
            vec![format!("= Table '{table_name}' is up to date")]
        }
    }
}

pub fn format_destroy_plan(plan: &DestroyPlan) -> Vec<String> {
    match plan {
        DestroyPlan::DeleteTable { table_name } => {
            vec![format!("- Delete table: {table_name} (ALL DATA WILL BE LOST)")]
        }
        DestroyPlan::AlreadyGone { table_name } => {
            vec![format!("= Table '{table_name}' does not exist")]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamodb::config::{products_table_config, TableConfig};

    fn products() -> TableConfig {
        products_table_config("Products", "ProductName-Index")
    }

    fn existing(gsis: &[&str]) -> TableState {
        TableState {
            status: TableStatus::Active,
            gsis: gsis
                .iter()
                .map(|name| GsiState {
                    name: name.to_string(),
                    ready: true,
                })
                .collect(),
        }
    }

    #[test]
    fn test_missing_table_is_created() {
        let config = products();
        let plan = calculate_deploy_plan(None, &config);

        assert_eq!(plan, DeployPlan::CreateTable { config });
    }

    #[test]
    fn test_missing_index_is_added() {
        let plan = calculate_deploy_plan(Some(&existing(&[])), &products());

        match plan {
            DeployPlan::AddGsis { gsis_to_add, .. } => {
                assert_eq!(gsis_to_add.len(), 1);
                assert_eq!(gsis_to_add[0].name, "ProductName-Index");
            }
            other => panic!("expected AddGsis, got {other:?}"),
        }
    }

    #[test]
    fn test_complete_table_needs_no_changes() {
        let plan = calculate_deploy_plan(
            Some(&existing(&["ProductName-Index"])),
            &products(),
        );

        assert_eq!(
            plan,
            DeployPlan::NoChanges {
                table_name: "Products".to_string()
            }
        );
    }

    #[test]
    fn test_destroy_plan() {
        assert_eq!(
            calculate_destroy_plan(None, "Products"),
            DestroyPlan::AlreadyGone {
                table_name: "Products".to_string()
            }
        );
        assert!(matches!(
            calculate_destroy_plan(Some(&existing(&[])), "Products"),
            DestroyPlan::DeleteTable { .. }
        ));
    }

    #[test]
    fn test_create_plan_lists_keys_and_index() {
        let lines = format_deploy_plan(&DeployPlan::CreateTable {
            config: products(),
        });

        assert_eq!(lines[0], "+ Create table: Products");
        assert!(lines.contains(&"  Sort key: ProductId (S)".to_string()));
        assert!(lines.contains(&"  + GSI: ProductName-Index (projection ALL)".to_string()));
        assert!(lines.contains(&"    Sort key: ProductName (S)".to_string()));
    }

    #[test]
    fn test_table_with_index_in_progress_is_not_ready() {
        let mut state = existing(&["ProductName-Index"]);
        assert!(state.is_ready());

        state.gsis[0].ready = false;
        assert!(!state.is_ready());
    }
}
