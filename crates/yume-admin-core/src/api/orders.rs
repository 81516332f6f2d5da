use chrono::Utc;
use tracing::{debug, warn};

use crate::dashboard::OrderBoard;
use crate::models::{OneOrMany, Order, OrderStatus, StatusUpdate, UserDirectory};

use super::{ApiError, RequestDescriptor, SessionClient};

const ORDERS_PATH: &str = "orders";

fn order_path(id: i64) -> String {
    format!("{}/{}", ORDERS_PATH, id)
}

impl SessionClient {
    /// Fetch every order.
    ///
    /// A timestamp query parameter keeps intermediaries from serving a cached list.
    pub async fn fetch_orders(&self) -> Result<Vec<Order>, ApiError> {
        let request = RequestDescriptor::get(ORDERS_PATH)
            .query("t", Utc::now().timestamp_millis().to_string());
        let orders: OneOrMany<Order> = self.send(&request).await.into_json()?;
        let orders = orders.into_vec();
        debug!(count = orders.len(), "Fetched orders");
        Ok(orders)
    }

    /// Fetch one order. Some backends answer with a one-element array.
    pub async fn fetch_order(&self, id: i64) -> Result<Order, ApiError> {
        let request = RequestDescriptor::get(order_path(id));
        let orders: OneOrMany<Order> = self.send(&request).await.into_json()?;
        orders
            .into_vec()
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::InvalidResponse(format!("Order {} not found in response", id)))
    }

    /// Move `order` to `status`, stamping the time the new state was entered.
    pub async fn update_order_status(
        &self,
        order: &Order,
        status: OrderStatus,
    ) -> Result<(), ApiError> {
        let update = StatusUpdate::now(status, order.paid);
        let request = RequestDescriptor::put(order_path(order.id)).json(&update)?;
        self.send(&request).await.into_empty()?;
        debug!(order = order.id, status = %update.status, "Order status updated");
        Ok(())
    }

    /// Fetch orders and users together.
    ///
    /// Customer names are cosmetic: if the user list cannot be loaded the
    /// board is still returned with an empty directory.
    pub async fn fetch_board(&self) -> Result<OrderBoard, ApiError> {
        let (orders, users) = futures::join!(self.fetch_orders(), self.fetch_users());
        let orders = orders?;
        let users = match users {
            Ok(users) => UserDirectory::from_users(&users),
            Err(e) => {
                warn!(error = %e, "Failed to load users, showing ids instead of names");
                UserDirectory::default()
            }
        };
        Ok(OrderBoard::new(orders, users))
    }
}
