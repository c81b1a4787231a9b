//! Sample data tool for the geospatial demo.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use geodemo_core::schema::{all_ddl, ORDERS_TABLE, ZONES_TABLE};
use geodemo_core::types::Timestamp;
use geodemo_core::zones::{seed_zones, ZoneSchema};
use geodemo_datagen::export::{write_orders, write_zones};
use geodemo_datagen::generator::{default_customer_pool, generate_orders, DEFAULT_ORDER_COUNT};
use geodemo_datagen::GeneratorConfig;
use geodemo_db::loader::{create_tables, existing_counts, insert_orders, insert_zones, TableCounts};
use geodemo_db::{FireboltClient, FireboltConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "geodemo-datagen")]
#[command(version, about = "Generate and load sample orders and zones for the geospatial demo")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write generated orders and zones as CSV files
    Generate {
        #[command(flatten)]
        data: DataArgs,
        /// Directory the CSV files are written to
        #[arg(short, long, default_value = "data")]
        out_dir: PathBuf,
    },
    /// Print the DDL for both tables
    Schema {
        #[arg(long, env = "ZONE_SCHEMA", default_value = "polygon")]
        zone_schema: ZoneSchema,
    },
    /// Create the tables in Firebolt and insert generated data
    Load {
        #[command(flatten)]
        data: DataArgs,
        /// Append without asking when the tables already hold data
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args)]
struct DataArgs {
    /// Number of orders to generate
    #[arg(short = 'n', long, default_value_t = DEFAULT_ORDER_COUNT)]
    orders: usize,
    /// Size of the customer pool (default: one customer per five orders)
    #[arg(long)]
    customers: Option<usize>,
    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
    /// Layout of the geo_zones table: polygon or radius
    #[arg(long, env = "ZONE_SCHEMA", default_value = "polygon")]
    zone_schema: ZoneSchema,
}

impl DataArgs {
    fn generator_config(&self) -> GeneratorConfig {
        let now: Timestamp = chrono::Local::now().naive_local();
        GeneratorConfig {
            orders: self.orders,
            customers: self
                .customers
                .unwrap_or_else(|| default_customer_pool(self.orders)),
            seed: self.seed,
            now,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geodemo_datagen=info,geodemo_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate { data, out_dir } => generate(&data, &out_dir),
        Commands::Schema { zone_schema } => {
            for ddl in all_ddl(zone_schema) {
                println!("{}", ddl.trim_end());
                println!();
            }
            Ok(())
        }
        Commands::Load { data, yes } => load(&data, yes).await,
    }
}

fn generate(data: &DataArgs, out_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let orders = generate_orders(data.generator_config())?;
    let orders_path = out_dir.join(format!("{ORDERS_TABLE}.csv"));
    let file = File::create(&orders_path)
        .with_context(|| format!("Failed to create {}", orders_path.display()))?;
    write_orders(BufWriter::new(file), &orders)?;
    tracing::info!(path = %orders_path.display(), rows = orders.len(), "Wrote orders");

    let zones = seed_zones();
    let zones_path = out_dir.join(format!("{ZONES_TABLE}.csv"));
    let file = File::create(&zones_path)
        .with_context(|| format!("Failed to create {}", zones_path.display()))?;
    write_zones(BufWriter::new(file), &zones, data.zone_schema)?;
    tracing::info!(path = %zones_path.display(), rows = zones.len(), "Wrote zones");

    Ok(())
}

async fn load(data: &DataArgs, yes: bool) -> Result<()> {
    let config = FireboltConfig::from_env();
    tracing::info!(
        account = %config.account,
        database = %config.database,
        engine = %config.engine,
        "Connecting to Firebolt"
    );
    let client = FireboltClient::new(config)?;

    let existing = existing_counts(&client)
        .await
        .context("Failed to connect to Firebolt. Please check your .env configuration")?;
    tracing::info!("Connected to Firebolt");

    if !existing.is_empty() {
        report_counts("Existing data found", existing);
        if !yes && !confirm("Do you want to add more sample data?")? {
            tracing::info!("Skipping data generation");
            return Ok(());
        }
    }

    create_tables(&client, data.zone_schema).await?;

    let mut failed = false;

    let orders = generate_orders(data.generator_config())?;
    if let Err(e) = insert_orders(&client, &orders).await {
        tracing::error!(error = %e, table = ORDERS_TABLE, "Insert stopped");
        failed = true;
    }

    if let Err(e) = insert_zones(&client, &seed_zones(), data.zone_schema).await {
        tracing::error!(error = %e, table = ZONES_TABLE, "Insert stopped");
        failed = true;
    }

    let final_counts = existing_counts(&client).await?;
    report_counts("Final data counts", final_counts);

    if failed {
        anyhow::bail!("Sample data load finished with errors");
    }
    tracing::info!("Sample data load complete. Start the dashboard with `geodemo-api`");
    Ok(())
}

fn report_counts(message: &str, counts: TableCounts) {
    tracing::info!(
        customer_orders = counts.orders,
        geo_zones = counts.zones,
        "{message}"
    );
}

/// Ask a yes/no question on stdin; anything but `y` declines.
fn confirm(question: &str) -> Result<bool> {
    print!("{question} (y/n): ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}
