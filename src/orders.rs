//! # Order Store
//!
//! In-memory order records and the status aggregation behind the admin
//! dashboard. Seeded with one demonstration order so the dashboard and
//! "My Orders" views render something on a fresh deployment.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Order lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    InProduction,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn emoji(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "⏳",
            OrderStatus::Confirmed => "✅",
            OrderStatus::InProduction => "🏭",
            OrderStatus::Shipped => "🚚",
            OrderStatus::Delivered => "📦",
            OrderStatus::Cancelled => "❌",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::InProduction => "In Production",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Orders still moving through the pipeline
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            OrderStatus::Confirmed | OrderStatus::InProduction | OrderStatus::Shipped
        )
    }
}

/// One line of an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub quantity: u32,
    /// Unit price in USD
    pub unit_price: f64,
}

/// A placed order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub user_id: i64,
    pub supplier: String,
    pub items: Vec<OrderItem>,
    /// Total in USD
    pub total_amount: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub estimated_delivery: DateTime<Utc>,
    /// Set once the order ships
    pub tracking_number: Option<String>,
    pub notes: String,
}

/// Dashboard aggregation over all orders
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrderStats {
    pub total: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub in_production: usize,
    pub shipped: usize,
    pub delivered: usize,
    pub cancelled: usize,
    pub total_amount: f64,
}

/// Shared, process-local order store
pub struct OrderBook {
    orders: RwLock<HashMap<String, Order>>,
    sequence: AtomicU64,
}

impl OrderBook {
    /// Empty store, no seed data
    pub fn new() -> Self {
        Self {
            orders: RwLock::new(HashMap::new()),
            sequence: AtomicU64::new(1),
        }
    }

    /// Store preloaded with the demonstration order
    pub fn with_seed_data() -> Self {
        let book = Self::new();
        let now = Utc::now();
        let seeded = Order {
            id: "ORD-2024-001".to_string(),
            user_id: 123456789,
            supplier: "Shenzhen Audio Tech Co.".to_string(),
            items: vec![
                OrderItem {
                    name: "Wireless Bluetooth Headphones".to_string(),
                    quantity: 500,
                    unit_price: 10.50,
                },
                OrderItem {
                    name: "USB-C Cable 1m".to_string(),
                    quantity: 1000,
                    unit_price: 1.00,
                },
            ],
            total_amount: 6250.0,
            status: OrderStatus::InProduction,
            created_at: now - chrono::Duration::days(5),
            estimated_delivery: now + chrono::Duration::days(10),
            tracking_number: Some("SF1234567890".to_string()),
            notes: "Rush order for electronics store".to_string(),
        };
        book.orders.write().insert(seeded.id.clone(), seeded);
        book
    }

    /// Create a pending order and return the stored copy. New orders get a
    /// 15-day delivery estimate until logistics refines it.
    pub fn create(&self, user_id: i64, supplier: &str, items: Vec<OrderItem>, notes: &str) -> Order {
        let created_at = Utc::now();
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        let total_amount = items
            .iter()
            .map(|item| item.unit_price * f64::from(item.quantity))
            .sum();
        let order = Order {
            id: format!("ORD-{}-{:03}", created_at.format("%Y%m%d"), seq),
            user_id,
            supplier: supplier.to_string(),
            items,
            total_amount,
            status: OrderStatus::Pending,
            created_at,
            estimated_delivery: created_at + chrono::Duration::days(15),
            tracking_number: None,
            notes: notes.to_string(),
        };
        self.orders.write().insert(order.id.clone(), order.clone());
        order
    }

    pub fn get(&self, id: &str) -> Option<Order> {
        self.orders.read().get(id).cloned()
    }

    /// All orders for a user, newest first
    pub fn by_user(&self, user_id: i64) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .orders
            .read()
            .values()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders
    }

    /// Every order, newest first
    pub fn all(&self) -> Vec<Order> {
        let mut orders: Vec<Order> = self.orders.read().values().cloned().collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders
    }

    /// Orders currently in a given status, newest first
    pub fn by_status(&self, status: OrderStatus) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .orders
            .read()
            .values()
            .filter(|o| o.status == status)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders
    }

    /// Orders still moving through the pipeline, newest first
    pub fn active(&self) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .orders
            .read()
            .values()
            .filter(|o| o.status.is_active())
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders
    }

    /// Move an order to a new status, optionally attaching a tracking
    /// number; returns false if the id is unknown
    pub fn update_status(
        &self,
        id: &str,
        status: OrderStatus,
        tracking_number: Option<&str>,
    ) -> bool {
        match self.orders.write().get_mut(id) {
            Some(order) => {
                order.status = status;
                if let Some(tracking) = tracking_number {
                    order.tracking_number = Some(tracking.to_string());
                }
                true
            }
            None => false,
        }
    }

    /// Aggregate counts and the dollar total for the dashboard
    pub fn stats(&self) -> OrderStats {
        let orders = self.orders.read();
        let mut stats = OrderStats {
            total: orders.len(),
            ..OrderStats::default()
        };
        for order in orders.values() {
            match order.status {
                OrderStatus::Pending => stats.pending += 1,
                OrderStatus::Confirmed => stats.confirmed += 1,
                OrderStatus::InProduction => stats.in_production += 1,
                OrderStatus::Shipped => stats.shipped += 1,
                OrderStatus::Delivered => stats.delivered += 1,
                OrderStatus::Cancelled => stats.cancelled += 1,
            }
            stats.total_amount += order.total_amount;
        }
        stats
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_items() -> Vec<OrderItem> {
        vec![OrderItem {
            name: "USB-C Cable 2m".to_string(),
            quantity: 500,
            unit_price: 0.80,
        }]
    }

    #[test]
    fn create_computes_total_from_items() {
        let book = OrderBook::new();
        let order = book.create(1, "Guangzhou Cable Manufacturing", sample_items(), "");

        assert!(order.id.starts_with("ORD-"));
        assert_eq!(order.status, OrderStatus::Pending);
        assert!((order.total_amount - 400.0).abs() < f64::EPSILON);
        assert!(order.tracking_number.is_none());
        assert_eq!(
            order.estimated_delivery - order.created_at,
            chrono::Duration::days(15)
        );
    }

    #[test]
    fn stats_aggregate_by_status() {
        let book = OrderBook::new();
        let a = book.create(1, "Supplier A", sample_items(), "");
        let _b = book.create(1, "Supplier B", sample_items(), "");
        let c = book.create(2, "Supplier C", sample_items(), "");

        assert!(book.update_status(&a.id, OrderStatus::Pending, None));
        assert!(book.update_status(&c.id, OrderStatus::Shipped, None));

        let stats = book.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.shipped, 1);
        assert_eq!(stats.confirmed, 0);
        assert_eq!(stats.in_production, 0);
        assert_eq!(stats.delivered, 0);
        assert_eq!(stats.cancelled, 0);
        assert!((stats.total_amount - 1200.0).abs() < 0.001);
    }

    #[test]
    fn seed_data_contains_demo_order() {
        let book = OrderBook::with_seed_data();
        let order = book.get("ORD-2024-001").expect("seed order present");
        assert_eq!(order.status, OrderStatus::InProduction);
        assert!(order.status.is_active());
        assert_eq!(order.tracking_number.as_deref(), Some("SF1234567890"));
        assert!((order.total_amount - 6250.0).abs() < f64::EPSILON);
        assert!(order.estimated_delivery > order.created_at);
    }

    #[test]
    fn update_can_attach_tracking_number() {
        let book = OrderBook::new();
        let order = book.create(1, "Supplier A", sample_items(), "");
        assert!(book.update_status(&order.id, OrderStatus::Shipped, Some("DHL9876543210")));

        let updated = book.get(&order.id).expect("order present");
        assert_eq!(updated.status, OrderStatus::Shipped);
        assert_eq!(updated.tracking_number.as_deref(), Some("DHL9876543210"));

        // A later status change without tracking keeps the number.
        assert!(book.update_status(&order.id, OrderStatus::Delivered, None));
        let delivered = book.get(&order.id).expect("order present");
        assert_eq!(delivered.tracking_number.as_deref(), Some("DHL9876543210"));
    }

    #[test]
    fn unknown_order_update_is_rejected() {
        let book = OrderBook::new();
        assert!(!book.update_status("ORD-00000000-999", OrderStatus::Confirmed, None));
    }
}
