use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Serialize;

use oims::{
    config::{self, AppConfig},
    db::{self, DbPool},
    entities::item,
    handlers::AppServices,
    repositories::OrderView,
    services::reports::MonthlySalesReport,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let context = CliContext::initialize(&cli.command).await?;

    match cli.command {
        Commands::Init(args) => handle_init(&context, args, cli.json).await?,
        Commands::Register(args) => handle_register(&context, args, cli.json).await?,
        Commands::Stock => handle_stock(&context, cli.json).await?,
        Commands::LowStock => handle_low_stock(&context, cli.json).await?,
        Commands::Order(args) => handle_order(&context, args, cli.json).await?,
        Commands::Report(args) => handle_report(&context, args, cli.json).await?,
    }

    Ok(())
}

#[derive(Parser)]
#[command(name = "oims-cli", version, about = "Administer the inventory store")]
struct Cli {
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render command output as pretty JSON when available"
    )]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the schema, optionally resetting it and seeding sample rows
    Init(InitArgs),
    /// Register an operator account
    Register(RegisterArgs),
    /// Show current stock levels with low-stock alerts
    Stock,
    /// List items below their reorder threshold
    LowStock,
    /// Place an order against current stock
    Order(OrderArgs),
    /// Monthly sales report for one item
    Report(ReportArgs),
}

#[derive(Args)]
struct InitArgs {
    #[arg(long, help = "Drop every table before recreating the schema (discards data)")]
    reset: bool,
    #[arg(long, help = "Insert the fixed sample suppliers and items")]
    seed: bool,
}

#[derive(Args)]
struct RegisterArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    password: String,
}

#[derive(Args)]
struct OrderArgs {
    #[arg(long, help = "Item name")]
    item: String,
    #[arg(long)]
    quantity: i32,
}

#[derive(Args)]
struct ReportArgs {
    #[arg(long, help = "Item name")]
    item: String,
    #[arg(long, help = "Month of year, e.g. 05")]
    month: String,
}

struct CliContext {
    db: Arc<DbPool>,
    services: AppServices,
}

impl CliContext {
    async fn initialize(command: &Commands) -> Result<Self> {
        let config: AppConfig =
            config::load_config().context("failed to load application config")?;
        config::init_tracing(config.log_level(), config.log_json);

        let db_pool = db::establish_connection_from_app_config(&config)
            .await
            .context("failed to connect to database")?;

        // `init` manages the schema itself
        if config.auto_migrate && !matches!(command, Commands::Init(_)) {
            db::run_migrations(&db_pool)
                .await
                .context("failed to run migrations")?;
        }

        let db = Arc::new(db_pool);
        let services = AppServices::new(db.clone(), config.password_scheme());
        Ok(Self { db, services })
    }
}

async fn handle_init(context: &CliContext, args: InitArgs, json: bool) -> Result<()> {
    db::init_schema(&context.db, args.reset, args.seed)
        .await
        .context("failed to initialize schema")?;

    if json {
        print_json(&serde_json::json!({ "reset": args.reset, "seeded": args.seed }))?;
    } else {
        println!(
            "Schema ready{}{}.",
            if args.reset { " (reset)" } else { "" },
            if args.seed { " with sample data" } else { "" }
        );
    }
    Ok(())
}

async fn handle_register(context: &CliContext, args: RegisterArgs, json: bool) -> Result<()> {
    context
        .services
        .auth
        .register(&args.username, &args.password)
        .await
        .context("failed to register user")?;

    if json {
        print_json(&serde_json::json!({ "username": args.username }))?;
    } else {
        println!("User registered successfully.");
    }
    Ok(())
}

async fn handle_stock(context: &CliContext, json: bool) -> Result<()> {
    let status = context
        .services
        .inventory
        .stock_status()
        .await
        .context("failed to load inventory")?;

    if json {
        return print_json(&status);
    }

    if status.items.is_empty() {
        println!("No items found in inventory.");
    }
    for item in &status.items {
        render_item(item);
    }
    for alert in &status.alerts {
        println!("{}", alert);
    }
    Ok(())
}

async fn handle_low_stock(context: &CliContext, json: bool) -> Result<()> {
    let items = context
        .services
        .inventory
        .low_stock()
        .await
        .context("failed to load inventory")?;

    if json {
        return print_json(&items);
    }
    if items.is_empty() {
        println!("All items are at or above their threshold.");
    }
    items.iter().for_each(render_item);
    Ok(())
}

async fn handle_order(context: &CliContext, args: OrderArgs, json: bool) -> Result<()> {
    let order = context
        .services
        .orders
        .place_order(&args.item, args.quantity)
        .await
        .context("failed to place order")?;

    if json {
        print_json(&order)
    } else {
        println!("Order placed for {} of {}.", order.quantity, order.item_name);
        render_order(&order);
        Ok(())
    }
}

async fn handle_report(context: &CliContext, args: ReportArgs, json: bool) -> Result<()> {
    let report = context
        .services
        .reports
        .monthly_sales(&args.item, &args.month)
        .await
        .context("failed to build monthly sales report")?;

    if json {
        print_json(&report)
    } else {
        render_report(&report);
        Ok(())
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn render_item(item: &item::Model) {
    println!(
        "- Item {} • {} • stock {} • threshold {} • price {:.2}",
        item.item_id, item.item_name, item.stock, item.threshold, item.price
    );
}

fn render_order(order: &OrderView) {
    println!(
        "- Order {} • {} x {} • {} • {}",
        order.order_id, order.quantity, order.item_name, order.order_date, order.order_status
    );
}

fn render_report(report: &MonthlySalesReport) {
    println!("Sales for {} in month {}:", report.item_name, report.month);
    if report.rows.is_empty() {
        println!("No orders found.");
    }
    for row in &report.rows {
        println!(
            "  • order {} on {} • {} @ {:.2} = {:.2}",
            row.order_id, row.order_date, row.quantity, row.price, row.sales
        );
    }
    println!(
        "Total quantity: {} • Total sales: {:.2}",
        report.total_quantity, report.total_sales
    );
}
