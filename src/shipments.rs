//! # Shipment Tracking
//!
//! Seeded shipment directory standing in for carrier integrations. Lookup is
//! by tracking number, normalized to uppercase.

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Where a shipment currently is in the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipmentStatus {
    Preparing,
    PickedUp,
    InTransit,
    Customs,
    OutForDelivery,
    Delivered,
    Exception,
}

impl ShipmentStatus {
    pub fn emoji(&self) -> &'static str {
        match self {
            ShipmentStatus::Preparing => "📋",
            ShipmentStatus::PickedUp => "📦",
            ShipmentStatus::InTransit => "🚛",
            ShipmentStatus::Customs => "🛃",
            ShipmentStatus::OutForDelivery => "🚚",
            ShipmentStatus::Delivered => "✅",
            ShipmentStatus::Exception => "⚠️",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShipmentStatus::Preparing => "Preparing",
            ShipmentStatus::PickedUp => "Picked Up",
            ShipmentStatus::InTransit => "In Transit",
            ShipmentStatus::Customs => "Customs",
            ShipmentStatus::OutForDelivery => "Out For Delivery",
            ShipmentStatus::Delivered => "Delivered",
            ShipmentStatus::Exception => "Exception",
        }
    }
}

/// One scan event in a shipment's history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingEvent {
    pub timestamp: DateTime<Utc>,
    pub location: String,
    pub status: ShipmentStatus,
    pub description: String,
}

/// A tracked shipment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shipment {
    pub tracking_number: String,
    pub carrier: String,
    pub origin: String,
    pub destination: String,
    pub current_status: ShipmentStatus,
    pub events: Vec<TrackingEvent>,
    pub estimated_delivery: DateTime<Utc>,
    pub weight: Option<String>,
    pub dimensions: Option<String>,
}

impl Shipment {
    /// Scan history, newest first
    pub fn events_newest_first(&self) -> Vec<&TrackingEvent> {
        let mut events: Vec<&TrackingEvent> = self.events.iter().collect();
        events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        events
    }
}

/// Shared, process-local shipment directory
pub struct ShipmentLog {
    shipments: RwLock<HashMap<String, Shipment>>,
}

impl ShipmentLog {
    pub fn new() -> Self {
        Self {
            shipments: RwLock::new(HashMap::new()),
        }
    }

    /// Directory preloaded with two demonstration shipments
    pub fn with_seed_data() -> Self {
        let log = Self::new();
        let now = Utc::now();

        log.insert(Shipment {
            tracking_number: "SF1234567890".to_string(),
            carrier: "SF Express".to_string(),
            origin: "Shenzhen, China".to_string(),
            destination: "New York, USA".to_string(),
            current_status: ShipmentStatus::Customs,
            events: vec![
                TrackingEvent {
                    timestamp: now - Duration::days(3),
                    location: "Shenzhen, China".to_string(),
                    status: ShipmentStatus::PickedUp,
                    description: "Package picked up from supplier".to_string(),
                },
                TrackingEvent {
                    timestamp: now - Duration::days(2),
                    location: "Guangzhou, China".to_string(),
                    status: ShipmentStatus::InTransit,
                    description: "In transit to international hub".to_string(),
                },
                TrackingEvent {
                    timestamp: now - Duration::days(1),
                    location: "Hong Kong".to_string(),
                    status: ShipmentStatus::Customs,
                    description: "Customs clearance in progress".to_string(),
                },
            ],
            estimated_delivery: now + Duration::days(5),
            weight: Some("2.5 kg".to_string()),
            dimensions: Some("30x20x15 cm".to_string()),
        });

        log.insert(Shipment {
            tracking_number: "DHL9876543210".to_string(),
            carrier: "DHL Express".to_string(),
            origin: "Guangzhou, China".to_string(),
            destination: "Los Angeles, USA".to_string(),
            current_status: ShipmentStatus::OutForDelivery,
            events: vec![
                TrackingEvent {
                    timestamp: now - Duration::days(7),
                    location: "Guangzhou, China".to_string(),
                    status: ShipmentStatus::PickedUp,
                    description: "Package collected from warehouse".to_string(),
                },
                TrackingEvent {
                    timestamp: now - Duration::days(5),
                    location: "Shanghai, China".to_string(),
                    status: ShipmentStatus::InTransit,
                    description: "Departed from sorting facility".to_string(),
                },
                TrackingEvent {
                    timestamp: now - Duration::days(3),
                    location: "Los Angeles, USA".to_string(),
                    status: ShipmentStatus::Customs,
                    description: "Arrived at destination country".to_string(),
                },
                TrackingEvent {
                    timestamp: now - Duration::days(1),
                    location: "Los Angeles, USA".to_string(),
                    status: ShipmentStatus::OutForDelivery,
                    description: "Out for delivery".to_string(),
                },
            ],
            estimated_delivery: now + Duration::days(1),
            weight: Some("5.2 kg".to_string()),
            dimensions: Some("40x30x25 cm".to_string()),
        });

        log
    }

    fn insert(&self, shipment: Shipment) {
        self.shipments
            .write()
            .insert(shipment.tracking_number.clone(), shipment);
    }

    /// Look up a shipment; tracking numbers are matched case-insensitively
    pub fn track(&self, tracking_number: &str) -> Option<Shipment> {
        let key = tracking_number.trim().to_uppercase();
        self.shipments.read().get(&key).cloned()
    }

    /// Human-readable delivery estimate, or `None` for unknown numbers
    pub fn delivery_estimate(&self, tracking_number: &str) -> Option<String> {
        let shipment = self.track(tracking_number)?;
        let days_remaining = (shipment.estimated_delivery - Utc::now()).num_days();

        let estimate = if days_remaining < 0 {
            "📦 Package should have been delivered".to_string()
        } else if days_remaining == 0 {
            "📦 Delivery expected today".to_string()
        } else if days_remaining == 1 {
            "📦 Delivery expected tomorrow".to_string()
        } else {
            format!("📦 Delivery expected in {} days", days_remaining)
        };
        Some(estimate)
    }

    /// Shipments not yet delivered
    pub fn active_shipments(&self) -> Vec<Shipment> {
        self.shipments
            .read()
            .values()
            .filter(|s| s.current_status != ShipmentStatus::Delivered)
            .cloned()
            .collect()
    }
}

impl Default for ShipmentLog {
    fn default() -> Self {
        Self::new()
    }
}
