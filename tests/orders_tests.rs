//! Integration tests for the order store, dashboard aggregation, and the
//! "My Orders" rendering

use buyerchina_bot::bot::ui_builder::format_user_orders;
use buyerchina_bot::localization::create_localization_manager;
use buyerchina_bot::orders::{OrderBook, OrderItem, OrderStatus};

fn items(quantity: u32, unit_price: f64) -> Vec<OrderItem> {
    vec![OrderItem {
        name: "Sample Product".to_string(),
        quantity,
        unit_price,
    }]
}

#[test]
fn test_dashboard_aggregation_counts_per_status() {
    let book = OrderBook::new();
    let first = book.create(1, "Supplier A", items(10, 5.0), "");
    let second = book.create(2, "Supplier B", items(20, 2.5), "");
    let third = book.create(3, "Supplier C", items(1, 100.0), "");

    // Two pending, one shipped.
    assert!(book.update_status(&first.id, OrderStatus::Pending, None));
    assert!(book.update_status(&second.id, OrderStatus::Pending, None));
    assert!(book.update_status(&third.id, OrderStatus::Shipped, Some("SF0001112223")));

    let stats = book.stats();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.pending, 2);
    assert_eq!(stats.shipped, 1);
    assert_eq!(stats.confirmed, 0);
    assert_eq!(stats.in_production, 0);
    assert_eq!(stats.delivered, 0);
    assert_eq!(stats.cancelled, 0);
    assert!((stats.total_amount - 200.0).abs() < 0.001);
}

#[test]
fn test_orders_filtered_by_user() {
    let book = OrderBook::new();
    book.create(1, "Supplier A", items(1, 1.0), "");
    book.create(1, "Supplier B", items(1, 1.0), "");
    book.create(2, "Supplier C", items(1, 1.0), "");

    assert_eq!(book.by_user(1).len(), 2);
    assert_eq!(book.by_user(2).len(), 1);
    assert!(book.by_user(3).is_empty());
}

#[test]
fn test_active_orders_exclude_terminal_statuses() {
    let book = OrderBook::new();
    let confirmed = book.create(1, "Supplier A", items(1, 1.0), "");
    let delivered = book.create(1, "Supplier B", items(1, 1.0), "");
    let cancelled = book.create(1, "Supplier C", items(1, 1.0), "");

    book.update_status(&confirmed.id, OrderStatus::Confirmed, None);
    book.update_status(&delivered.id, OrderStatus::Delivered, None);
    book.update_status(&cancelled.id, OrderStatus::Cancelled, None);

    let active = book.active();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, confirmed.id);
}

#[test]
fn test_seeded_book_starts_in_production() {
    let book = OrderBook::with_seed_data();
    let stats = book.stats();
    assert_eq!(stats.total, 1);
    assert_eq!(stats.in_production, 1);
    assert!((stats.total_amount - 6250.0).abs() < 0.001);
}

#[test]
fn test_shipping_an_order_records_the_tracking_number() {
    let book = OrderBook::new();
    let order = book.create(5, "Supplier A", items(2, 3.0), "fragile, double-box");
    assert!(order.tracking_number.is_none());
    assert_eq!(order.notes, "fragile, double-box");

    assert!(book.update_status(&order.id, OrderStatus::Shipped, Some("SF1234567890")));
    let shipped = book.get(&order.id).expect("order present");
    assert_eq!(shipped.tracking_number.as_deref(), Some("SF1234567890"));
    assert_eq!(shipped.notes, "fragile, double-box");
}

#[test]
fn test_my_orders_view_shows_five_most_recent() {
    let book = OrderBook::new();
    for n in 0..7 {
        book.create(9, &format!("Supplier {}", n), items(1, 1.0), "");
    }
    let orders = book.by_user(9);
    assert_eq!(orders.len(), 7);

    let localization = create_localization_manager().expect("bundles load");
    let text = format_user_orders(&localization, Some("en"), &orders);

    // Header counts everything, the list stops at five.
    assert!(text.contains("(7 total)"));
    assert_eq!(text.matches("ORD-").count(), 5);
}

#[test]
fn test_my_orders_view_shows_tracking_and_delivery_estimate() {
    let book = OrderBook::with_seed_data();
    let orders = book.by_user(123456789);

    let localization = create_localization_manager().expect("bundles load");
    let text = format_user_orders(&localization, Some("en"), &orders);

    assert!(text.contains("Est. Delivery:"));
    assert!(text.contains("Tracking #:"));
    assert!(text.contains("SF1234567890"));
}

#[test]
fn test_status_emojis_are_distinct() {
    let statuses = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::InProduction,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];
    let emojis: std::collections::HashSet<&str> =
        statuses.iter().map(|s| s.emoji()).collect();
    assert_eq!(emojis.len(), statuses.len());
}
