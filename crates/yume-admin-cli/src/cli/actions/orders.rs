use std::time::Duration;

use anyhow::{Context, Result};
use tracing::warn;
use yume_admin_core::dashboard::{OrderBoard, OrderFilter, OrderSort};
use yume_admin_core::models::{Order, OrderStatus, UserDirectory};
use yume_admin_core::SessionClient;

use crate::cli::globals::GlobalArgs;
use crate::cli::render;

#[derive(Debug)]
pub struct ListArgs {
    pub active_filter: OrderFilter,
    pub active_sort: OrderSort,
    pub completed_filter: OrderFilter,
    pub completed_sort: OrderSort,
}

#[derive(Debug)]
pub enum OrdersAction {
    List(ListArgs),
    Show { id: i64 },
    SetStatus { id: i64, status: OrderStatus },
    Watch { interval_secs: Option<u64> },
}

/// # Errors
/// Returns an error if the backend call fails or the session has expired.
pub async fn execute(action: OrdersAction, globals: &GlobalArgs) -> Result<()> {
    let client = globals.client()?;
    match action {
        OrdersAction::List(args) => list(&client, &args).await,
        OrdersAction::Show { id } => show(&client, id).await,
        OrdersAction::SetStatus { id, status } => set_status(&client, id, status).await,
        OrdersAction::Watch { interval_secs } => {
            let secs = interval_secs.unwrap_or(globals.config.auto_refresh_secs).max(1);
            watch(&client, Duration::from_secs(secs)).await
        }
    }
}

fn print_section(title: &str, orders: &[&Order], board: &OrderBoard) {
    println!("== {} ({}) ==", title, orders.len());
    if orders.is_empty() {
        println!("  No orders");
    }
    for order in orders {
        println!("{}\n", render::order_card(order, &board.customer_name(order)));
    }
}

async fn list(client: &SessionClient, args: &ListArgs) -> Result<()> {
    let board = client.fetch_board().await?;
    let active = board.active(&args.active_filter, args.active_sort);
    let completed = board.completed(&args.completed_filter, args.completed_sort);

    print_section("Active orders", &active, &board);
    print_section("Completed orders", &completed, &board);
    Ok(())
}

async fn show(client: &SessionClient, id: i64) -> Result<()> {
    let order = client.fetch_order(id).await?;
    let users = match order.user_id {
        Some(_) => match client.fetch_users().await {
            Ok(users) => UserDirectory::from_users(&users),
            Err(e) => {
                warn!(error = %e, "Failed to load users");
                UserDirectory::default()
            }
        },
        None => UserDirectory::default(),
    };
    let customer = users.name_for(order.user_id);
    println!("{}", render::order_detail(&order, &customer));
    Ok(())
}

async fn set_status(client: &SessionClient, id: i64, status: OrderStatus) -> Result<()> {
    // Current order is needed so the update keeps its paid flag
    let order = client
        .fetch_order(id)
        .await
        .with_context(|| format!("Failed to load order #{}", id))?;
    client.update_order_status(&order, status.clone()).await?;
    println!("Order #{} is now {}", id, status);
    Ok(())
}

async fn watch(client: &SessionClient, period: Duration) -> Result<()> {
    let mut ticker = tokio::time::interval(period);
    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => return Ok(()),
        }

        let board = match client.fetch_board().await {
            Ok(board) => board,
            // The session is gone; nothing further will succeed
            Err(e) if e.is_auth_expired() => return Err(e.into()),
            Err(e) => {
                eprintln!("Refresh failed: {}", e.user_message());
                continue;
            }
        };

        let active = board.active(&OrderFilter::default(), OrderSort::default());
        println!(
            "---- {} - {} active ----",
            chrono::Local::now().format("%H:%M:%S"),
            active.len()
        );
        print_section("Active orders", &active, &board);
        println!("{}", render::stats_summary(&board.stats()));
    }
}
