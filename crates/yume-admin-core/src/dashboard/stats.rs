use chrono::{Datelike, NaiveDate};

use crate::models::Order;

/// Number of months shown in the earnings chart, including the current one.
pub const EARNINGS_MONTHS: u32 = 6;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Headline figures computed over every order, regardless of filters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DashboardStats {
    pub active: usize,
    pub completed: usize,
    /// Sum of order totals over paid orders only
    pub total_profit: f64,
}

impl DashboardStats {
    pub fn from_orders(orders: &[Order]) -> Self {
        let completed = orders.iter().filter(|o| o.is_completed()).count();
        let total_profit = orders.iter().filter(|o| o.paid).map(Order::total).sum();
        Self {
            active: orders.len() - completed,
            completed,
            total_profit,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyEarnings {
    pub year: i32,
    /// 1-based calendar month
    pub month: u32,
    pub label: &'static str,
    pub total: f64,
}

/// Paid order totals for the last six calendar months ending with the
/// month of `today`, oldest first. Orders without a parseable timestamp or
/// outside the window are ignored.
pub fn earnings_by_month(orders: &[Order], today: NaiveDate) -> Vec<MonthlyEarnings> {
    let current = today.year() * 12 + today.month0() as i32;
    let mut months: Vec<MonthlyEarnings> = (0..EARNINGS_MONTHS as i32)
        .rev()
        .map(|back| {
            let index = current - back;
            let month0 = index.rem_euclid(12) as u32;
            MonthlyEarnings {
                year: index.div_euclid(12),
                month: month0 + 1,
                label: MONTH_NAMES[month0 as usize],
                total: 0.0,
            }
        })
        .collect();

    for order in orders.iter().filter(|o| o.paid) {
        let Some(placed) = order.ordered_time() else {
            continue;
        };
        if let Some(bucket) = months
            .iter_mut()
            .find(|m| m.year == placed.year() && m.month == placed.month())
        {
            bucket.total += order.total();
        }
    }

    months
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order(id: i64, status: &str, paid: bool, ordered_at: &str, total: f64) -> Order {
        serde_json::from_value(json!({
            "OrderID": id,
            "Status": status,
            "Paid": paid,
            "Ordered_at": ordered_at,
            "TotalAmount": total,
        }))
        .unwrap()
    }

    #[test]
    fn test_stats_count_all_orders_and_paid_profit() {
        let orders = vec![
            order(1, "ordered", true, "2025-03-01 12:00:00", 10.0),
            order(2, "completed", true, "2025-03-01 12:00:00", 20.5),
            order(3, "completed", false, "2025-03-01 12:00:00", 99.0),
        ];
        let stats = DashboardStats::from_orders(&orders);
        assert_eq!(stats.active, 1);
        assert_eq!(stats.completed, 2);
        assert!((stats.total_profit - 30.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_stats() {
        assert_eq!(DashboardStats::from_orders(&[]), DashboardStats::default());
    }

    #[test]
    fn test_earnings_window_crosses_year() {
        let today = NaiveDate::from_ymd_opt(2025, 2, 14).unwrap();
        let orders = vec![
            order(1, "completed", true, "2025-02-01 10:00:00", 12.0),
            order(2, "completed", true, "2024-09-30 23:00:00", 8.0),
            order(3, "completed", false, "2025-01-10 10:00:00", 50.0),
            order(4, "completed", true, "2024-08-31 10:00:00", 70.0),
            order(5, "completed", true, "not a date", 5.0),
        ];

        let months = earnings_by_month(&orders, today);
        let labels: Vec<&str> = months.iter().map(|m| m.label).collect();
        assert_eq!(
            labels,
            vec!["September", "October", "November", "December", "January", "February"]
        );
        assert_eq!((months[0].year, months[0].month), (2024, 9));
        assert_eq!((months[5].year, months[5].month), (2025, 2));
        assert_eq!(months[0].total, 8.0);
        assert_eq!(months[4].total, 0.0);
        assert_eq!(months[5].total, 12.0);
        let total: f64 = months.iter().map(|m| m.total).sum();
        assert_eq!(total, 20.0);
    }
}
