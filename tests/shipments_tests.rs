//! Integration tests for shipment tracking lookups

use buyerchina_bot::shipments::{ShipmentLog, ShipmentStatus};

#[test]
fn test_seeded_shipments_resolve() {
    let log = ShipmentLog::with_seed_data();

    let sf = log.track("SF1234567890").expect("SF shipment seeded");
    assert_eq!(sf.carrier, "SF Express");
    assert_eq!(sf.current_status, ShipmentStatus::Customs);

    let dhl = log.track("DHL9876543210").expect("DHL shipment seeded");
    assert_eq!(dhl.current_status, ShipmentStatus::OutForDelivery);
}

#[test]
fn test_lookup_normalizes_case_and_whitespace() {
    let log = ShipmentLog::with_seed_data();
    assert!(log.track("sf1234567890").is_some());
    assert!(log.track("  dhl9876543210  ").is_some());
}

#[test]
fn test_unknown_number_not_found() {
    let log = ShipmentLog::with_seed_data();
    assert!(log.track("UPS0000000000").is_none());
}

#[test]
fn test_delivery_estimate_prose() {
    let log = ShipmentLog::with_seed_data();

    // Seeded DHL shipment is due in about a day.
    let estimate = log.delivery_estimate("DHL9876543210").expect("estimate");
    assert!(estimate.starts_with("📦 Delivery expected"));

    assert!(log.delivery_estimate("UPS0000000000").is_none());
}

#[test]
fn test_history_ordered_newest_first() {
    let log = ShipmentLog::with_seed_data();
    let shipment = log.track("SF1234567890").expect("seeded shipment");

    let events = shipment.events_newest_first();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].status, ShipmentStatus::Customs);
    assert_eq!(events[2].status, ShipmentStatus::PickedUp);
}

#[test]
fn test_active_shipments_exclude_delivered() {
    let log = ShipmentLog::with_seed_data();
    // Neither seeded shipment is delivered yet.
    assert_eq!(log.active_shipments().len(), 2);
}
