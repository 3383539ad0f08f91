//! Message Handler module for processing incoming Telegram messages
//!
//! Every inbound message produces exactly one reply. Commands are handled
//! first, then the dialogue state decides how free text is interpreted, and
//! finally idle messages go through the intake classifier.

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{ParseMode, User};
use tracing::{debug, info, warn};

use crate::classifier::is_real_order;
use crate::dialogue::{IntakeDialogue, IntakeState};
use crate::localization::{t_args_lang, t_lang};
use crate::requests::{ProductRequest, RequestKind};

use super::command_handlers::{handle_cancel_command, handle_help_command, handle_start_command};
use super::ui_builder::{
    create_back_keyboard, create_post_tracking_keyboard, create_post_verify_keyboard,
    create_request_confirmation_keyboard, format_manager_notification,
    format_request_confirmation, format_risk_assessment, format_tracking_report,
    format_verification_report,
};
use super::AppState;

/// Document extensions the intake flow accepts
const SUPPORTED_DOCUMENT_EXTENSIONS: &[&str] =
    &["xlsx", "xls", "pdf", "docx", "doc", "jpg", "jpeg", "png", "gif"];

/// Entry point for all non-callback updates
pub async fn message_handler(
    bot: Bot,
    msg: Message,
    state: Arc<AppState>,
    dialogue: IntakeDialogue,
) -> Result<()> {
    if let Some(command) = msg.text().and_then(parse_command) {
        match command {
            "/start" => return handle_start_command(&bot, &msg, &state, &dialogue).await,
            "/help" => return handle_help_command(&bot, &msg, &state).await,
            "/cancel" => return handle_cancel_command(&bot, &msg, &state, &dialogue).await,
            _ => {}
        }
    }

    let user = match msg.from.as_ref() {
        Some(user) => user.clone(),
        None => {
            debug!(chat_id = %msg.chat.id, "Ignoring message without a sender");
            return Ok(());
        }
    };
    let language = state.user_language(&user);

    let current_state = dialogue.get().await?.unwrap_or_default();

    match current_state {
        IntakeState::AwaitingSearchText => {
            if let Some(text) = msg.text() {
                dialogue.update(IntakeState::Idle).await?;
                // An explicit search skips the classifier entirely.
                intake_request(
                    &bot,
                    &msg,
                    &state,
                    &user,
                    &language,
                    RequestKind::Text,
                    text,
                    None,
                )
                .await
            } else {
                handle_intake_message(&bot, &msg, &state, &user, &language, &dialogue).await
            }
        }
        IntakeState::AwaitingSupplierName => {
            if let Some(text) = msg.text() {
                dialogue.update(IntakeState::Idle).await?;
                handle_supplier_verification(&bot, &msg, &state, &language, text).await
            } else {
                handle_intake_message(&bot, &msg, &state, &user, &language, &dialogue).await
            }
        }
        IntakeState::AwaitingTrackingNumber => {
            if let Some(text) = msg.text() {
                dialogue.update(IntakeState::Idle).await?;
                handle_shipment_tracking(&bot, &msg, &state, &language, text).await
            } else {
                handle_intake_message(&bot, &msg, &state, &user, &language, &dialogue).await
            }
        }
        IntakeState::AwaitingProductImage => {
            if msg.photo().is_some() {
                dialogue.update(IntakeState::Idle).await?;
            }
            handle_intake_message(&bot, &msg, &state, &user, &language, &dialogue).await
        }
        IntakeState::Idle | IntakeState::AdminMenu => {
            handle_intake_message(&bot, &msg, &state, &user, &language, &dialogue).await
        }
    }
}

/// Free intake: classify text, accept photos and supported documents
async fn handle_intake_message(
    bot: &Bot,
    msg: &Message,
    state: &Arc<AppState>,
    user: &User,
    language: &str,
    _dialogue: &IntakeDialogue,
) -> Result<()> {
    if let Some(photos) = msg.photo() {
        // Telegram sends several resolutions; the last one is the largest.
        let file_id = photos.last().map(|p| p.file.id.0.clone());
        let description = msg.caption().unwrap_or("").to_string();
        return intake_request(
            bot,
            msg,
            state,
            user,
            language,
            RequestKind::Photo,
            &description,
            file_id.as_deref(),
        )
        .await;
    }

    if let Some(doc) = msg.document() {
        let file_name = doc.file_name.as_deref().unwrap_or("");
        if !is_supported_document(file_name) {
            warn!(chat_id = %msg.chat.id, file_name = %file_name, "Unsupported document rejected");
            bot.send_message(
                msg.chat.id,
                t_lang(&state.localization, "unsupported-document", Some(language)),
            )
            .await?;
            return Ok(());
        }
        let description = msg
            .caption()
            .map(str::to_string)
            .unwrap_or_else(|| file_name.to_string());
        return intake_request(
            bot,
            msg,
            state,
            user,
            language,
            RequestKind::Document,
            &description,
            Some(&doc.file.id.0),
        )
        .await;
    }

    if let Some(text) = msg.text() {
        if is_real_order(text) {
            return intake_request(
                bot,
                msg,
                state,
                user,
                language,
                RequestKind::Text,
                text,
                None,
            )
            .await;
        }

        debug!(chat_id = %msg.chat.id, "Message classified as chatter, nudging user");
        bot.send_message(
            msg.chat.id,
            t_lang(&state.localization, "not-a-request", Some(language)),
        )
        .await?;
        return Ok(());
    }

    bot.send_message(
        msg.chat.id,
        t_lang(&state.localization, "unsupported-message", Some(language)),
    )
    .await?;
    Ok(())
}

/// Record a request, page the manager, mirror to the ledger, confirm to the
/// user. Notification and ledger failures only change the reply copy.
#[allow(clippy::too_many_arguments)]
async fn intake_request(
    bot: &Bot,
    msg: &Message,
    state: &Arc<AppState>,
    user: &User,
    language: &str,
    kind: RequestKind,
    description: &str,
    image_file_id: Option<&str>,
) -> Result<()> {
    let request = state.requests.create(
        user.id.0 as i64,
        &user.first_name,
        user.username.as_deref(),
        kind,
        description,
        image_file_id,
    );

    info!(
        request_id = %request.id,
        user_id = request.user_id,
        kind = %kind.label(),
        "Intake request recorded"
    );

    let manager_notified = notify_manager(state, &request).await;

    state.ledger.append_request(&request, language).await;

    let confirmation = format_request_confirmation(
        &state.localization,
        Some(language),
        &request,
        manager_notified,
    );
    let keyboard =
        create_request_confirmation_keyboard(&state.localization, Some(language), &request.id);

    bot.send_message(msg.chat.id, confirmation)
        .parse_mode(ParseMode::Markdown)
        .reply_markup(keyboard)
        .await?;

    Ok(())
}

/// Page the manager if a manager chat is configured
async fn notify_manager(state: &Arc<AppState>, request: &ProductRequest) -> bool {
    match &state.notifier {
        Some(notifier) => {
            let notification = format_manager_notification(request);
            notifier.notify(&notification).await
        }
        None => {
            debug!(request_id = %request.id, "No manager chat configured, skipping notification");
            false
        }
    }
}

/// Look up a supplier and reply with the verification report and risk
/// assessment, or a not-found message
async fn handle_supplier_verification(
    bot: &Bot,
    msg: &Message,
    state: &Arc<AppState>,
    language: &str,
    company_name: &str,
) -> Result<()> {
    match state.suppliers.verify(company_name) {
        Some(supplier) => {
            info!(chat_id = %msg.chat.id, company = %supplier.company_name, "Supplier verified");
            let report = format!(
                "{}\n{}",
                format_verification_report(&state.localization, Some(language), &supplier),
                format_risk_assessment(&state.localization, Some(language), &supplier)
            );
            bot.send_message(msg.chat.id, report)
                .parse_mode(ParseMode::Markdown)
                .reply_markup(create_post_verify_keyboard(
                    &state.localization,
                    Some(language),
                ))
                .await?;
        }
        None => {
            debug!(chat_id = %msg.chat.id, query = %company_name, "Supplier not found");
            bot.send_message(
                msg.chat.id,
                t_args_lang(
                    &state.localization,
                    "supplier-not-found",
                    &[("name", company_name)],
                    Some(language),
                ),
            )
            .reply_markup(create_post_verify_keyboard(
                &state.localization,
                Some(language),
            ))
            .await?;
        }
    }
    Ok(())
}

/// Look up a tracking number and reply with the shipment report or a
/// not-found message
async fn handle_shipment_tracking(
    bot: &Bot,
    msg: &Message,
    state: &Arc<AppState>,
    language: &str,
    tracking_number: &str,
) -> Result<()> {
    match state.shipments.track(tracking_number) {
        Some(shipment) => {
            let estimate = state.shipments.delivery_estimate(tracking_number);
            let report = format_tracking_report(
                &state.localization,
                Some(language),
                &shipment,
                estimate.as_deref(),
            );
            bot.send_message(msg.chat.id, report)
                .parse_mode(ParseMode::Markdown)
                .reply_markup(create_post_tracking_keyboard(
                    &state.localization,
                    Some(language),
                ))
                .await?;
        }
        None => {
            bot.send_message(
                msg.chat.id,
                t_args_lang(
                    &state.localization,
                    "tracking-not-found",
                    &[("number", tracking_number)],
                    Some(language),
                ),
            )
            .reply_markup(create_back_keyboard(&state.localization, Some(language)))
            .await?;
        }
    }
    Ok(())
}

/// Leading bot command, if any. Group chats address commands as
/// `/start@BotName`, so the mention suffix is stripped before matching.
fn parse_command(text: &str) -> Option<&str> {
    let token = text.trim().split_whitespace().next()?;
    if !token.starts_with('/') {
        return None;
    }
    token.split('@').next()
}

fn is_supported_document(file_name: &str) -> bool {
    file_name
        .rsplit('.')
        .next()
        .map(|ext| {
            SUPPORTED_DOCUMENT_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_extension_check_is_case_insensitive() {
        assert!(is_supported_document("specs.PDF"));
        assert!(is_supported_document("catalog.xlsx"));
        assert!(!is_supported_document("archive.zip"));
        assert!(!is_supported_document("no_extension"));
    }

    #[test]
    fn commands_match_with_bot_mention_suffix() {
        assert_eq!(parse_command("/start"), Some("/start"));
        assert_eq!(parse_command("/start@BuyerChinaBot"), Some("/start"));
        assert_eq!(parse_command("  /cancel@BuyerChinaBot  "), Some("/cancel"));
        assert_eq!(parse_command("/help extra words"), Some("/help"));
    }

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(parse_command("hello"), None);
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("email@example.com"), None);
    }
}
