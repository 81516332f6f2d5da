//! Data models for the Yume backend.
//!
//! This module contains the records the admin console reads and writes:
//!
//! - `Order`, `OrderItem`, `OrderStatus`, `StatusUpdate`: the order queue
//! - `Dish`, `DishForm`, `ImageUpload`: the menu
//! - `User`, `UserDirectory`: customers, for labelling orders
//!
//! Field casing on the wire is inconsistent between endpoints, so most
//! fields accept several spellings.

pub mod de;
pub mod dish;
pub mod order;
pub mod user;

pub use de::OneOrMany;
pub use dish::{Dish, DishForm, ImageUpload};
pub use order::{parse_timestamp, Order, OrderItem, OrderStatus, StatusUpdate};
pub use user::{User, UserDirectory};
