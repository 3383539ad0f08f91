//! Bot module for handling Telegram interactions
//!
//! Split into submodules:
//! - `command_handlers`: /start, /help, /cancel
//! - `message_handler`: incoming text, photo, and document messages
//! - `callback_handler`: inline keyboard callbacks
//! - `ui_builder`: keyboards and message formatting

pub mod callback_handler;
pub mod command_handlers;
pub mod message_handler;
pub mod ui_builder;

use std::sync::Arc;
use teloxide::types::User;
use teloxide::Bot;

use crate::admin::AdminRoster;
use crate::config::AppConfig;
use crate::language::UserLanguages;
use crate::localization::{create_localization_manager, LocalizationManager};
use crate::notifier::ManagerNotifier;
use crate::orders::OrderBook;
use crate::requests::RequestBook;
use crate::sheets::SheetsLedger;
use crate::shipments::ShipmentLog;
use crate::suppliers::SupplierDirectory;

/// Shared application state handed to every handler.
///
/// All stores are in-memory and reset on restart; the ledger is the only
/// thing that outlives the process. Handlers receive this by `Arc` so tests
/// can assemble a state around fakes.
pub struct AppState {
    pub config: AppConfig,
    pub localization: Arc<LocalizationManager>,
    pub languages: UserLanguages,
    pub requests: RequestBook,
    pub orders: OrderBook,
    pub shipments: ShipmentLog,
    pub suppliers: SupplierDirectory,
    pub admins: AdminRoster,
    pub notifier: Option<ManagerNotifier<Bot>>,
    pub ledger: SheetsLedger,
}

impl AppState {
    /// Assemble the runtime state from validated configuration
    pub fn from_config(
        config: AppConfig,
        bot: Bot,
        http_client: reqwest::Client,
    ) -> anyhow::Result<Self> {
        let localization = create_localization_manager()?;
        let notifier = config
            .manager
            .chat_id
            .map(|chat_id| ManagerNotifier::new(bot, chat_id));
        let ledger = SheetsLedger::new(http_client, config.sheets.clone());
        let admins = AdminRoster::new(config.admin_ids.clone());

        Ok(Self {
            config,
            localization,
            languages: UserLanguages::new(),
            requests: RequestBook::new(),
            orders: OrderBook::with_seed_data(),
            shipments: ShipmentLog::with_seed_data(),
            suppliers: SupplierDirectory::with_seed_data(),
            admins,
            notifier,
            ledger,
        })
    }

    /// Resolve the language to answer a user in
    pub fn user_language(&self, user: &User) -> String {
        self.languages.resolve(
            user.id.0 as i64,
            user.language_code.as_deref(),
            &self.localization,
        )
    }
}

pub use callback_handler::callback_handler;
pub use message_handler::message_handler;
