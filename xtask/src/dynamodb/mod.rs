//! DynamoDB infrastructure management commands.

mod client;
mod config;
mod deploy;
mod error;
mod planning;
mod seed;

pub use error::{DynamodbError, Result};

use crate::prelude::*;
use dialoguer::Confirm;

#[derive(Debug, clap::Parser)]
pub struct DynamodbCommand {
    #[command(subcommand)]
    pub action: DynamodbAction,
}

#[derive(Debug, clap::Subcommand)]
pub enum DynamodbAction {
    /// Deploy or destroy the products table.
    Deploy(DeployCommand),

    /// Insert demo products for an institution.
    Seed(SeedCommand),
}

/// Deploy or update DynamoDB infrastructure.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Deploy or destroy the products table.

By default, this command creates the products table keyed by
InstitutionCode (partition) and ProductId (sort), together with the
name index used for product name searches. An existing table only gets
missing indexes added.

The command shows a plan of changes before applying and asks for confirmation.

Environment variables:
  AWS_ENDPOINT_URL    - Use local DynamoDB (e.g., http://localhost:8000)
  AWS_REGION          - AWS region (defaults to us-east-1)
  AWS_PROFILE         - AWS profile to use for credentials")]
pub struct DeployCommand {
    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,

    /// Destroy the table instead of creating/updating.
    #[arg(long)]
    pub destroy: bool,

    #[arg(long, default_value = "Products", env = "PRODUCTS_TABLE_NAME")]
    pub table_name: String,

    #[arg(long, default_value = "ProductName-Index", env = "PRODUCTS_NAME_INDEX")]
    pub name_index: String,
}

/// Insert demo products.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Generate and insert demo products into DynamoDB.

Products are written with the same insert-only condition the service
uses, so running the command twice never overwrites existing products.
Keys that already exist are counted and skipped.")]
pub struct SeedCommand {
    /// Institution to seed, exactly 10 digits.
    #[arg(long, value_name = "CODE")]
    pub institution_code: String,

    /// Number of products to generate.
    #[arg(long, default_value = "20")]
    pub count: u32,

    #[arg(long, default_value = "Products", env = "PRODUCTS_TABLE_NAME")]
    pub table_name: String,

    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,
}

pub async fn run(command: DynamodbCommand, global: crate::Global) -> Result<()> {
    match command.action {
        DynamodbAction::Deploy(deploy_cmd) => run_deploy(deploy_cmd, &global).await,
        DynamodbAction::Seed(seed_cmd) => run_seed(seed_cmd, &global).await,
    }
}

fn confirm(prompt: &str, default: bool) -> Result<()> {
    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(DynamodbError::sdk)?;

    if confirmed {
        Ok(())
    } else {
        Err(DynamodbError::UserCancelled)
    }
}

fn print_plan(title: String, lines: Vec<String>) {
    aprintln!("{}", title);
    for line in lines {
        match line.chars().next() {
            Some('+') => aprintln!("  {}", p_g(&line)),
            Some('-') => aprintln!("  {}", p_r(&line)),
            Some('~') => aprintln!("  {}", p_y(&line)),
            _ => aprintln!("  {}", line),
        }
    }
    aprintln!();
}

async fn run_deploy(cmd: DeployCommand, global: &crate::Global) -> Result<()> {
    let aws_config = client::AwsConfig::default();

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), aws_config.target_display());
        aprintln!();
    }

    let dynamo_client = aws_config.connect().await;
    let current_state = client::get_table_state(&dynamo_client, &cmd.table_name).await?;

    if cmd.destroy {
        let plan = planning::calculate_destroy_plan(current_state.as_ref(), &cmd.table_name);

        if !global.is_silent() {
            print_plan(p_y("Destroy Plan:"), planning::format_destroy_plan(&plan));
        }

        if matches!(plan, planning::DestroyPlan::AlreadyGone { .. }) {
            if !global.is_silent() {
                aprintln!("{}", p_g("Nothing to destroy."));
            }
            return Ok(());
        }

        if !cmd.force {
            confirm(
                "Are you sure you want to delete this table? ALL DATA WILL BE LOST",
                false,
            )?;
        }

        deploy::execute_destroy_plan(&dynamo_client, &plan).await?;

        if !global.is_silent() {
            aprintln!("{}", p_g("Table destroyed successfully."));
        }
        return Ok(());
    }

    let table_config = config::products_table_config(&cmd.table_name, &cmd.name_index);
    let plan = planning::calculate_deploy_plan(current_state.as_ref(), &table_config);

    if !global.is_silent() {
        print_plan(p_c("Deploy Plan:"), planning::format_deploy_plan(&plan));
    }

    if matches!(plan, planning::DeployPlan::NoChanges { .. }) {
        if !global.is_silent() {
            aprintln!("{}", p_g("Infrastructure is up to date."));
        }
        return Ok(());
    }

    if !cmd.force {
        confirm("Apply these changes?", true)?;
    }

    if !global.is_silent() {
        aprintln!("{}", p_b("Applying changes..."));
    }

    deploy::execute_deploy_plan(&dynamo_client, &plan).await?;

    if !global.is_silent() {
        aprintln!("{}", p_g("Infrastructure deployed successfully."));
    }

    Ok(())
}

async fn run_seed(cmd: SeedCommand, global: &crate::Global) -> Result<()> {
    seed::validate_institution_code(&cmd.institution_code)?;

    let aws_config = client::AwsConfig::default();

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), aws_config.target_display());
        aprintln!("{} {}", p_b("Table:"), cmd.table_name);
        aprintln!("{} {}", p_b("Institution:"), cmd.institution_code);
        aprintln!("{} {}", p_b("Product count:"), cmd.count);
        aprintln!();
    }

    let dynamo_client = aws_config.connect().await;

    if client::get_table_state(&dynamo_client, &cmd.table_name)
        .await?
        .is_none()
    {
        return Err(DynamodbError::TableNotFound {
            table_name: cmd.table_name,
        });
    }

    let products = seed::generate_products(&cmd.institution_code, cmd.count, chrono::Utc::now());

    if !global.is_silent() {
        let shown = if global.is_verbose() { products.len() } else { 5 };
        aprintln!("{}", p_c("Products to create:"));
        for product in products.iter().take(shown) {
            aprintln!(
                "  {} - {} ({} in stock)",
                product.product_id,
                product.product_name,
                product.in_stocked.unwrap_or_default()
            );
        }
        if products.len() > shown {
            aprintln!("  ... and {} more", products.len() - shown);
        }
        aprintln!();
    }

    if !cmd.force {
        confirm(&format!("Insert {} products?", products.len()), true)?;
    }

    let report = seed::seed_products(&dynamo_client, &cmd.table_name, &products).await?;

    if !global.is_silent() {
        aprintln!(
            "{} {} inserted, {} already present.",
            p_g("Success:"),
            report.inserted,
            report.already_present
        );
    }

    Ok(())
}
