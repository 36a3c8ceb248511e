mod fetch;
mod views;

use clap::{Parser, Subcommand};

use crate::fetch::DashboardApi;
use invdash_core::paging::{page_slice, total_pages};

/// Rows per chart page on the dashboard view.
const DASHBOARD_PAGE_SIZE: usize = 10;

#[derive(Debug, Parser)]
#[command(name = "invdash")]
#[command(about = "Inventory dashboard views over the invdash proxy API")]
struct Cli {
    /// Base URL of the invdash server.
    #[arg(long, env = "INVDASH_API_URL", default_value = "http://127.0.0.1:3000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Product catalog table.
    Productos {
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = 10)]
        page_size: usize,
    },
    /// Stock and price table with per-warehouse breakdown.
    Stocks {
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = 10)]
        page_size: usize,
    },
    /// The three dashboard chart datasets.
    Dashboard {
        /// Page of the product-cost chart.
        #[arg(long, default_value_t = 1)]
        costos_page: usize,
        /// Page of the stock-per-product chart.
        #[arg(long, default_value_t = 1)]
        stock_page: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let api = DashboardApi::new(&cli.api_url)?;

    // The fetch is tied to the view's lifetime: abandoning the view cancels
    // the in-flight request instead of leaving a dangling task.
    tokio::select! {
        result = run(&api, cli.command) => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("view cancelled, dropping in-flight request");
            Ok(())
        }
    }
}

async fn run(api: &DashboardApi, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Productos { page, page_size } => run_productos(api, page, page_size).await,
        Commands::Stocks { page, page_size } => run_stocks(api, page, page_size).await,
        Commands::Dashboard {
            costos_page,
            stock_page,
        } => run_dashboard(api, costos_page, stock_page).await,
    }
}

/// Renders the product catalog table for one page.
async fn run_productos(api: &DashboardApi, page: usize, page_size: usize) -> anyhow::Result<()> {
    let entries = api.fetch_productos().await?;
    let rows = views::product_rows(&entries);
    let total = total_pages(rows.len(), page_size);
    let visible = page_slice(&rows, page, page_size);

    if visible.is_empty() {
        println!("No hay productos para mostrar.");
    } else {
        println!(
            "{:<16}{:<30}{:<16}{:<14}{:<16}{:<16}{:<16}{:<14}SUBCATEGORIA",
            "REFERENCIA", "NOMBRE", "SKU", "COSTO", "GTIN", "MARCA", "CATEGORIA", "GRUPO"
        );
        for row in visible {
            println!(
                "{:<16}{:<30}{:<16}{:<14}{:<16}{:<16}{:<16}{:<14}{}",
                row.referencia,
                truncate(&row.nombre, 28),
                row.sku,
                row.costo,
                row.gtin,
                row.marca,
                row.categoria,
                row.grupo,
                row.subcategoria
            );
        }
    }

    println!("Página {page} de {total}");
    Ok(())
}

/// Renders the stock/price table for one page, with the warehouse
/// breakdown indented under each product.
async fn run_stocks(api: &DashboardApi, page: usize, page_size: usize) -> anyhow::Result<()> {
    let entries = api.fetch_stocksprecios().await?;
    let rows = views::stock_rows(&entries);
    let total = total_pages(rows.len(), page_size);
    let visible = page_slice(&rows, page, page_size);

    if visible.is_empty() {
        println!("No hay productos para mostrar.");
    } else {
        println!(
            "{:<16}{:<12}{:<14}OFERTA",
            "REFERENCIA", "EXISTENCIA", "COSTO"
        );
        for row in visible {
            println!(
                "{:<16}{:<12}{:<14}{}",
                row.referencia, row.existencia, row.costo, row.oferta
            );
            for (clave, almacen) in &row.almacenes {
                let nombre = almacen.nombre.as_deref().unwrap_or("");
                println!("    Nombre: {nombre} | Clave: {clave} | Stock: {}", almacen.stock);
            }
        }
    }

    println!("Página {page} de {total}");
    Ok(())
}

/// Renders the three dashboard datasets: cost per product, stock per
/// product, and total stock per warehouse.
async fn run_dashboard(
    api: &DashboardApi,
    costos_page: usize,
    stock_page: usize,
) -> anyhow::Result<()> {
    let productos = api.fetch_productos().await?;
    let stocks = api.fetch_stocksprecios().await?;

    let costos = views::cost_points(&productos);
    let costos_total = total_pages(costos.len(), DASHBOARD_PAGE_SIZE);
    println!("Costo de Productos");
    for point in page_slice(&costos, costos_page, DASHBOARD_PAGE_SIZE) {
        println!("  {:<16}{:.2}", point.referencia, point.costo);
    }
    println!("  Página {costos_page} de {costos_total}");

    let existencias = views::stock_points(&stocks);
    let stock_total = total_pages(existencias.len(), DASHBOARD_PAGE_SIZE);
    println!("Stock por Producto");
    for point in page_slice(&existencias, stock_page, DASHBOARD_PAGE_SIZE) {
        println!("  {:<16}{}", point.referencia, point.existencia);
    }
    println!("  Página {stock_page} de {stock_total}");

    println!("Stock Total por Almacén");
    for total in views::warehouse_totals(&stocks) {
        println!("  {:<24}{}", total.nombre, total.stock);
    }

    Ok(())
}

/// Truncates a display value with an ellipsis past `max` characters.
fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() > max {
        format!("{}...", value.chars().take(max).collect::<String>())
    } else {
        value.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_leaves_short_values_alone() {
        assert_eq!(truncate("Martillo", 28), "Martillo");
    }

    #[test]
    fn truncate_appends_ellipsis() {
        let long = "x".repeat(40);
        let out = truncate(&long, 28);
        assert_eq!(out.chars().count(), 31);
        assert!(out.ends_with("..."));
    }
}
