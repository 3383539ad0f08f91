//! # Google Sheets Ledger
//!
//! Best-effort mirror of intake activity into a spreadsheet via the Sheets
//! REST API. Every append is fire-and-forget: a failed write is logged and
//! surfaced on the admin dashboard, but never blocks or fails the intake
//! flow. The in-memory stores remain the source of truth for the process
//! lifetime.

use chrono::Utc;
use serde_json::json;
use tracing::{debug, warn};

use crate::config::SheetsConfig;
use crate::errors::{AppError, AppResult};
use crate::requests::ProductRequest;

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Worksheet receiving one row per intake request
const REQUESTS_SHEET: &str = "Product Requests";

/// Worksheet holding one row per user, keyed by user id in column A
const USERS_SHEET: &str = "Users";

fn append_url(spreadsheet_id: &str, sheet: &str) -> String {
    format!(
        "{}/{}/values/{}!A1:append?valueInputOption=RAW",
        SHEETS_API_BASE, spreadsheet_id, sheet
    )
}

fn update_url(spreadsheet_id: &str, range: &str) -> String {
    format!(
        "{}/{}/values/{}?valueInputOption=RAW",
        SHEETS_API_BASE, spreadsheet_id, range
    )
}

fn key_column_url(spreadsheet_id: &str, sheet: &str) -> String {
    format!("{}/{}/values/{}!A:A", SHEETS_API_BASE, spreadsheet_id, sheet)
}

/// 1-based row index of the first column-A cell equal to `key` in a
/// `values.get` response body
fn find_key_row(body: &serde_json::Value, key: &str) -> Option<usize> {
    body.get("values")?
        .as_array()?
        .iter()
        .position(|row| row.get(0).and_then(|cell| cell.as_str()) == Some(key))
        .map(|index| index + 1)
}

/// Spreadsheet ledger; disabled entirely when no config is present
pub struct SheetsLedger {
    client: reqwest::Client,
    config: Option<SheetsConfig>,
}

impl SheetsLedger {
    pub fn new(client: reqwest::Client, config: Option<SheetsConfig>) -> Self {
        Self { client, config }
    }

    /// Ledger that never writes anywhere
    pub fn disabled() -> Self {
        Self {
            client: reqwest::Client::new(),
            config: None,
        }
    }

    /// Whether a spreadsheet is configured
    pub fn is_connected(&self) -> bool {
        self.config.is_some()
    }

    pub fn spreadsheet_url(&self) -> Option<String> {
        self.config.as_ref().map(|config| {
            format!(
                "https://docs.google.com/spreadsheets/d/{}",
                config.spreadsheet_id
            )
        })
    }

    /// Append an intake request to the Product Requests sheet. Returns
    /// whether the row landed; failures are logged and swallowed by callers.
    pub async fn append_request(&self, request: &ProductRequest, language: &str) -> bool {
        let row = vec![
            json!(request.id),
            json!(request.user_id.to_string()),
            json!(request.username.clone().unwrap_or_default()),
            json!(request.first_name),
            json!(request.kind.label()),
            json!(request.description),
            json!(request.status.label()),
            json!(request.created_at.format("%Y-%m-%d %H:%M:%S").to_string()),
            json!(language),
        ];

        match self.append_row(REQUESTS_SHEET, row).await {
            Ok(()) => {
                debug!(request_id = %request.id, "Request mirrored to ledger");
                true
            }
            Err(err) => {
                warn!(request_id = %request.id, error = %err, "Ledger append failed");
                false
            }
        }
    }

    /// Record a user touchpoint on the Users sheet. The sheet keeps one row
    /// per user: an existing row (matched by user id in column A) is updated
    /// in place, otherwise a new row is appended.
    pub async fn record_user_activity(
        &self,
        user_id: i64,
        username: Option<&str>,
        first_name: &str,
        language: &str,
    ) -> bool {
        let row = vec![
            json!(user_id.to_string()),
            json!(username.unwrap_or_default()),
            json!(first_name),
            json!(language),
            json!(Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()),
        ];

        match self.upsert_user_row(user_id, row).await {
            Ok(()) => true,
            Err(err) => {
                warn!(user_id, error = %err, "Ledger user-activity write failed");
                false
            }
        }
    }

    async fn upsert_user_row(&self, user_id: i64, row: Vec<serde_json::Value>) -> AppResult<()> {
        let config = match &self.config {
            Some(config) => config,
            None => return Err(AppError::Ledger("ledger is not configured".to_string())),
        };

        // A failed scan falls back to a plain append rather than dropping
        // the touchpoint.
        let existing_row = match self.find_user_row(config, user_id).await {
            Ok(found) => found,
            Err(err) => {
                warn!(user_id, error = %err, "Users sheet scan failed, appending instead");
                None
            }
        };

        match existing_row {
            Some(index) => {
                let range = format!("{}!A{}:E{}", USERS_SHEET, index, index);
                let url = update_url(&config.spreadsheet_id, &range);
                let response = self
                    .client
                    .put(&url)
                    .bearer_auth(&config.access_token)
                    .timeout(std::time::Duration::from_secs(config.timeout_secs))
                    .json(&json!({ "values": [row] }))
                    .send()
                    .await?;

                if !response.status().is_success() {
                    return Err(AppError::Ledger(format!(
                        "Sheets API returned {} updating '{}'",
                        response.status(),
                        range
                    )));
                }
                debug!(user_id, row = index, "User row updated in ledger");
                Ok(())
            }
            None => self.append_row(USERS_SHEET, row).await,
        }
    }

    async fn find_user_row(
        &self,
        config: &SheetsConfig,
        user_id: i64,
    ) -> AppResult<Option<usize>> {
        let url = key_column_url(&config.spreadsheet_id, USERS_SHEET);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&config.access_token)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Ledger(format!(
                "Sheets API returned {} reading '{}' key column",
                response.status(),
                USERS_SHEET
            )));
        }

        let body: serde_json::Value = response.json().await?;
        Ok(find_key_row(&body, &user_id.to_string()))
    }

    async fn append_row(&self, sheet: &str, row: Vec<serde_json::Value>) -> AppResult<()> {
        let config = match &self.config {
            Some(config) => config,
            None => return Err(AppError::Ledger("ledger is not configured".to_string())),
        };

        let url = append_url(&config.spreadsheet_id, sheet);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&config.access_token)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .json(&json!({ "values": [row] }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Ledger(format!(
                "Sheets API returned {} for sheet '{}'",
                response.status(),
                sheet
            )));
        }

        Ok(())
    }
}
