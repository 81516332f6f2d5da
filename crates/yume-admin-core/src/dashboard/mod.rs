//! Order board: filtering, sorting and the figures shown above it.
//!
//! Everything here is pure; [`SessionClient::fetch_board`](crate::api::SessionClient::fetch_board)
//! loads the data and these functions shape it for display.

pub mod board;
pub mod stats;

pub use board::{apply, split_orders, OrderBoard, OrderFilter, OrderSort};
pub use stats::{earnings_by_month, DashboardStats, MonthlyEarnings};
