//! Plain-text rendering of orders, dishes and dashboard figures.

use std::fmt::Write;

use yume_admin_core::dashboard::{DashboardStats, MonthlyEarnings};
use yume_admin_core::models::{Dish, Order};
use yume_admin_core::utils::{format_currency, format_order_time, truncate_string};

const PROGRESS_WIDTH: usize = 10;
const CHART_WIDTH: usize = 30;
const ITEM_NAME_WIDTH: usize = 28;

pub fn progress_bar(percent: u8, width: usize) -> String {
    let filled = (usize::from(percent.min(100)) * width + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

pub fn order_card(order: &Order, customer: &str) -> String {
    let mut out = String::new();
    let paid = if order.paid { "PAID" } else { "UNPAID" };
    let _ = writeln!(
        out,
        "#{:<5} {:<11} {} {:>3}%  {}",
        order.id,
        order.status.as_str(),
        progress_bar(order.status.progress_percent(), PROGRESS_WIDTH),
        order.status.progress_percent(),
        paid
    );
    let _ = writeln!(out, "  Customer: {}", customer);
    let _ = writeln!(out, "  Placed:   {}", format_order_time(order.ordered_at.as_deref()));
    let _ = writeln!(out, "  Address:  {}", order.delivery_address());
    for item in &order.items {
        let _ = writeln!(
            out,
            "    {:>2} x {:<width$} {:>9}",
            item.quantity,
            truncate_string(item.display_name(), ITEM_NAME_WIDTH),
            format_currency(item.line_total()),
            width = ITEM_NAME_WIDTH
        );
    }
    let _ = write!(out, "  Total:    {}", format_currency(order.total()));
    out
}

/// Order card plus the status transition timestamps.
pub fn order_detail(order: &Order, customer: &str) -> String {
    let mut out = order_card(order, customer);
    let stamps = [
        ("Processing", order.processing_at.as_deref()),
        ("Delivering", order.delivering_at.as_deref()),
        ("Completed", order.completed_at.as_deref()),
    ];
    for (label, stamp) in stamps {
        if stamp.is_some() {
            let _ = write!(out, "\n  {:<10}{}", format!("{}:", label), format_order_time(stamp));
        }
    }
    for item in order.items.iter().filter(|i| i.ingredients.is_some()) {
        let _ = write!(
            out,
            "\n  {}: {}",
            item.display_name(),
            item.ingredients.as_deref().unwrap_or_default()
        );
    }
    out
}

pub fn dish_line(dish: &Dish, server_root: &str) -> String {
    let mut line = format!(
        "#{:<4} {:<28} {:>9}",
        dish.id,
        truncate_string(&dish.display_name(), 28),
        format_currency(dish.price)
    );
    if let Some(ingredients) = dish.ingredients.as_deref().filter(|i| !i.is_empty()) {
        let _ = write!(line, "  {}", truncate_string(ingredients, 40));
    }
    if let Some(url) = dish.image_url(server_root) {
        let _ = write!(line, "\n      {}", url);
    }
    line
}

pub fn stats_summary(stats: &DashboardStats) -> String {
    format!(
        "Active orders:    {}\nCompleted orders: {}\nTotal profit:     {}",
        stats.active,
        stats.completed,
        format_currency(stats.total_profit)
    )
}

/// Horizontal bar chart, bars scaled to the best month.
pub fn earnings_chart(months: &[MonthlyEarnings]) -> String {
    let max = months.iter().map(|m| m.total).fold(0.0_f64, f64::max);
    months
        .iter()
        .map(|m| {
            let width = if max > 0.0 {
                ((m.total / max) * CHART_WIDTH as f64).round() as usize
            } else {
                0
            };
            format!(
                "{:<9} {} {:<width$} {:>10}",
                m.label,
                m.year,
                "#".repeat(width),
                format_currency(m.total),
                width = CHART_WIDTH
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
