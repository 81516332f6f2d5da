use anyhow::Result;
use chrono::Local;
use yume_admin_core::dashboard::{earnings_by_month, DashboardStats};

use crate::cli::globals::GlobalArgs;
use crate::cli::render;

/// # Errors
/// Returns an error if the orders cannot be loaded.
pub async fn execute(globals: &GlobalArgs) -> Result<()> {
    let client = globals.client()?;
    let orders = client.fetch_orders().await?;

    let stats = DashboardStats::from_orders(&orders);
    println!("{}\n", render::stats_summary(&stats));

    println!("Earnings, last six months");
    let months = earnings_by_month(&orders, Local::now().date_naive());
    println!("{}", render::earnings_chart(&months));
    Ok(())
}
