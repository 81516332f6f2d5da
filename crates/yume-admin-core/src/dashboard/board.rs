use std::cmp::Ordering;

use crate::models::{Order, OrderStatus, UserDirectory};

use super::stats::DashboardStats;

/// Sort order for an order list, written as `date-desc`, `price-asc`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderSort {
    #[default]
    DateDesc,
    DateAsc,
    IdDesc,
    IdAsc,
    PriceDesc,
    PriceAsc,
}

impl OrderSort {
    pub const ALL: [OrderSort; 6] = [
        OrderSort::DateDesc,
        OrderSort::DateAsc,
        OrderSort::IdDesc,
        OrderSort::IdAsc,
        OrderSort::PriceDesc,
        OrderSort::PriceAsc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSort::DateDesc => "date-desc",
            OrderSort::DateAsc => "date-asc",
            OrderSort::IdDesc => "id-desc",
            OrderSort::IdAsc => "id-asc",
            OrderSort::PriceDesc => "price-desc",
            OrderSort::PriceAsc => "price-asc",
        }
    }

    fn compare(&self, a: &Order, b: &Order) -> Ordering {
        match self {
            // Orders without a timestamp sort as the oldest
            OrderSort::DateDesc => b.ordered_time().cmp(&a.ordered_time()),
            OrderSort::DateAsc => a.ordered_time().cmp(&b.ordered_time()),
            OrderSort::IdDesc => b.id.cmp(&a.id),
            OrderSort::IdAsc => a.id.cmp(&b.id),
            OrderSort::PriceDesc => b.total().total_cmp(&a.total()),
            OrderSort::PriceAsc => a.total().total_cmp(&b.total()),
        }
    }
}

impl std::fmt::Display for OrderSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        OrderSort::ALL
            .into_iter()
            .find(|sort| sort.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "unknown sort '{}', expected one of: date-desc, date-asc, id-desc, id-asc, price-desc, price-asc",
                    s
                )
            })
    }
}

/// Narrowing applied to an order list. Empty fields match everything.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Substring of the order id
    pub id_query: String,
    pub status: Option<OrderStatus>,
    pub paid: Option<bool>,
}

impl OrderFilter {
    pub fn matches(&self, order: &Order) -> bool {
        let query = self.id_query.trim();
        if !query.is_empty() && !order.id.to_string().contains(query) {
            return false;
        }
        if let Some(ref status) = self.status {
            if &order.status != status {
                return false;
            }
        }
        if let Some(paid) = self.paid {
            if order.paid != paid {
                return false;
            }
        }
        true
    }
}

/// Partition into (active, completed).
pub fn split_orders(orders: &[Order]) -> (Vec<&Order>, Vec<&Order>) {
    orders.iter().partition(|o| !o.is_completed())
}

/// Filter then sort. Ties keep their original relative order.
pub fn apply<'a, I>(orders: I, filter: &OrderFilter, sort: OrderSort) -> Vec<&'a Order>
where
    I: IntoIterator<Item = &'a Order>,
{
    let mut result: Vec<&Order> = orders.into_iter().filter(|o| filter.matches(o)).collect();
    result.sort_by(|a, b| sort.compare(a, b));
    result
}

/// Orders plus the customer names needed to label them.
#[derive(Debug, Clone, Default)]
pub struct OrderBoard {
    pub orders: Vec<Order>,
    pub users: UserDirectory,
}

impl OrderBoard {
    pub fn new(orders: Vec<Order>, users: UserDirectory) -> Self {
        Self { orders, users }
    }

    pub fn active(&self, filter: &OrderFilter, sort: OrderSort) -> Vec<&Order> {
        let (active, _) = split_orders(&self.orders);
        apply(active, filter, sort)
    }

    pub fn completed(&self, filter: &OrderFilter, sort: OrderSort) -> Vec<&Order> {
        let (_, completed) = split_orders(&self.orders);
        apply(completed, filter, sort)
    }

    pub fn customer_name(&self, order: &Order) -> String {
        self.users.name_for(order.user_id)
    }

    pub fn stats(&self) -> DashboardStats {
        DashboardStats::from_orders(&self.orders)
    }
}
