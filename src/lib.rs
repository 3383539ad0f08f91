//! # BuyerChina Telegram Bot
//!
//! A Telegram customer-intake bot for a China-sourcing business. Users send
//! text descriptions or photos of products they want sourced; the bot records
//! the request, notifies a human manager, and optionally mirrors activity to
//! a Google Sheets ledger. Supplier verification and shipment tracking run
//! against small seeded directories.

pub mod admin;
pub mod bot;
pub mod classifier;
pub mod config;
pub mod dialogue;
pub mod errors;
pub mod language;
pub mod localization;
pub mod notifier;
pub mod orders;
pub mod requests;
pub mod sheets;
pub mod shipments;
pub mod suppliers;

// Re-export types for easier access
pub use classifier::is_real_order;
pub use notifier::{ManagerNotifier, MessageSender, SendError, SendErrorKind};
