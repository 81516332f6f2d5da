use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::de;

/// Timestamp format the backend stores for status transitions.
pub const STATUS_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Lifecycle of an order, in the order the kitchen moves it along.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OrderStatus {
    #[default]
    Ordered,
    Processing,
    Delivering,
    Completed,
    /// Anything else the backend reports, kept verbatim (lowercased)
    Other(String),
}

impl OrderStatus {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "" | "ordered" => OrderStatus::Ordered,
            "processing" => OrderStatus::Processing,
            "delivering" => OrderStatus::Delivering,
            "completed" => OrderStatus::Completed,
            other => OrderStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Ordered => "ordered",
            OrderStatus::Processing => "processing",
            OrderStatus::Delivering => "delivering",
            OrderStatus::Completed => "completed",
            OrderStatus::Other(s) => s.as_str(),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, OrderStatus::Completed)
    }

    /// Progress bar fill for an order card.
    pub fn progress_percent(&self) -> u8 {
        match self {
            OrderStatus::Ordered | OrderStatus::Other(_) => 10,
            OrderStatus::Processing => 50,
            OrderStatus::Delivering => 80,
            OrderStatus::Completed => 100,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    /// Strict parse for user input: only assignable statuses are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match OrderStatus::parse(s) {
            OrderStatus::Other(other) => Err(format!(
                "unknown status '{}', expected one of: ordered, processing, delivering, completed",
                other
            )),
            status => Ok(status),
        }
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(d)?;
        Ok(match value {
            Value::String(s) => OrderStatus::parse(&s),
            _ => OrderStatus::Ordered,
        })
    }
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(
        rename = "dishID",
        alias = "DishID",
        default,
        deserialize_with = "de::opt_i64_from_any"
    )]
    pub dish_id: Option<i64>,
    #[serde(rename = "name", alias = "Name", alias = "DishName", default)]
    pub name: Option<String>,
    #[serde(
        rename = "price",
        alias = "Price",
        alias = "DishPrice",
        default,
        deserialize_with = "de::f64_from_any"
    )]
    pub price: f64,
    #[serde(
        rename = "quantity",
        alias = "Quantity",
        alias = "aantal",
        default = "default_quantity",
        deserialize_with = "de::quantity_from_any"
    )]
    pub quantity: u32,
    #[serde(rename = "ingredients", alias = "Ingredients", default)]
    pub ingredients: Option<String>,
}

impl OrderItem {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().filter(|n| !n.is_empty()).unwrap_or("Unknown Item")
    }

    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "OrderID", alias = "orderID", deserialize_with = "de::i64_from_any")]
    pub id: i64,
    #[serde(
        rename = "UserID",
        alias = "userID",
        default,
        deserialize_with = "de::opt_i64_from_any"
    )]
    pub user_id: Option<i64>,
    #[serde(rename = "Status", alias = "status", default)]
    pub status: OrderStatus,
    #[serde(rename = "Ordered_at", alias = "ordered_at", default)]
    pub ordered_at: Option<String>,
    #[serde(rename = "Paid", alias = "paid", default, deserialize_with = "de::bool_from_any")]
    pub paid: bool,
    #[serde(rename = "items", alias = "Items", default)]
    pub items: Vec<OrderItem>,
    #[serde(
        rename = "TotalAmount",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::opt_f64_from_any"
    )]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub delivery_address: Option<String>,
    #[serde(default)]
    pub processing_at: Option<String>,
    #[serde(rename = "Delivering_at", alias = "delivering_at", default)]
    pub delivering_at: Option<String>,
    #[serde(rename = "Completed_at", alias = "completed_at", default)]
    pub completed_at: Option<String>,
}

impl Order {
    /// Server-side total when present, otherwise the sum of the line items.
    pub fn total(&self) -> f64 {
        self.total_amount
            .unwrap_or_else(|| self.items.iter().map(OrderItem::line_total).sum())
    }

    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    /// When the order was placed, in local time.
    pub fn ordered_time(&self) -> Option<NaiveDateTime> {
        self.ordered_at.as_deref().and_then(parse_timestamp)
    }

    pub fn delivery_address(&self) -> &str {
        self.delivery_address
            .as_deref()
            .filter(|a| !a.trim().is_empty())
            .unwrap_or("No address provided")
    }
}

/// Parse the timestamp shapes the backend emits: RFC 3339 (converted to
/// local time) or naive `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM:SS`.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    NaiveDateTime::parse_from_str(raw, STATUS_TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
}

/// Body of `PUT orders/:id`.
///
/// The timestamp field for the state being entered is set; `Paid` is carried
/// over from the current order so the update does not clear it.
#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate {
    #[serde(rename = "Status")]
    pub status: OrderStatus,
    #[serde(rename = "Paid")]
    pub paid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_at: Option<String>,
    #[serde(rename = "Delivering_at", skip_serializing_if = "Option::is_none")]
    pub delivering_at: Option<String>,
    #[serde(rename = "Completed_at", skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

impl StatusUpdate {
    pub fn new(status: OrderStatus, paid: bool, now: NaiveDateTime) -> Self {
        let stamp = Some(now.format(STATUS_TIMESTAMP_FORMAT).to_string());
        let mut update = Self {
            status,
            paid,
            processing_at: None,
            delivering_at: None,
            completed_at: None,
        };
        match update.status {
            OrderStatus::Processing => update.processing_at = stamp,
            OrderStatus::Delivering => update.delivering_at = stamp,
            OrderStatus::Completed => update.completed_at = stamp,
            OrderStatus::Ordered | OrderStatus::Other(_) => {}
        }
        update
    }

    /// Update stamped with the current local time.
    pub fn now(status: OrderStatus, paid: bool) -> Self {
        Self::new(status, paid, Local::now().naive_local())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn sample_order_json() -> Value {
        json!({
            "OrderID": 2,
            "UserID": 456,
            "Status": "Processing",
            "Ordered_at": "2025-03-01 18:30:00",
            "Paid": 1,
            "items": [
                {"dishID": 2, "name": "Miso Ramen", "price": 13.0, "quantity": 1},
                {"dishID": 3, "name": "Gyoza", "price": "6.00", "quantity": 2},
                {"Name": "Green Tea", "Price": 3.0}
            ]
        })
    }

    #[test]
    fn test_parse_order_with_mixed_casing() {
        let order: Order = serde_json::from_value(sample_order_json()).unwrap();
        assert_eq!(order.id, 2);
        assert_eq!(order.user_id, Some(456));
        assert_eq!(order.status, OrderStatus::Processing);
        assert!(order.paid);
        assert_eq!(order.items.len(), 3);
        assert_eq!(order.items[2].display_name(), "Green Tea");
        assert_eq!(order.items[2].quantity, 1);
    }

    #[test]
    fn test_total_sums_items_without_total_amount() {
        let order: Order = serde_json::from_value(sample_order_json()).unwrap();
        assert!((order.total() - 28.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_total_prefers_total_amount() {
        let order: Order =
            serde_json::from_value(json!({"OrderID": 1, "TotalAmount": "19.5", "items": []})).unwrap();
        assert_eq!(order.total(), 19.5);
    }

    #[test]
    fn test_missing_status_defaults_to_ordered() {
        let order: Order = serde_json::from_value(json!({"OrderID": 5, "Status": null})).unwrap();
        assert_eq!(order.status, OrderStatus::Ordered);
        assert!(!order.paid);
        assert_eq!(order.delivery_address(), "No address provided");
    }

    #[test]
    fn test_status_from_str_is_strict() {
        assert_eq!("Delivering".parse::<OrderStatus>(), Ok(OrderStatus::Delivering));
        assert!("cancelled".parse::<OrderStatus>().is_err());
        assert_eq!(OrderStatus::parse("cancelled"), OrderStatus::Other("cancelled".to_string()));
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(OrderStatus::Ordered.progress_percent(), 10);
        assert_eq!(OrderStatus::Processing.progress_percent(), 50);
        assert_eq!(OrderStatus::Delivering.progress_percent(), 80);
        assert_eq!(OrderStatus::Completed.progress_percent(), 100);
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(18, 30, 0)
            .unwrap();
        assert_eq!(parse_timestamp("2025-03-01 18:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-03-01T18:30:00"), Some(expected));
        assert!(parse_timestamp("2025-03-01T18:30:00Z").is_some());
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_status_update_stamps_entered_state() {
        let now = NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(9, 5, 7)
            .unwrap();

        let body = serde_json::to_value(StatusUpdate::new(OrderStatus::Delivering, true, now)).unwrap();
        assert_eq!(
            body,
            json!({"Status": "delivering", "Paid": true, "Delivering_at": "2025-03-01 09:05:07"})
        );

        let body = serde_json::to_value(StatusUpdate::new(OrderStatus::Ordered, false, now)).unwrap();
        assert_eq!(body, json!({"Status": "ordered", "Paid": false}));
    }
}
