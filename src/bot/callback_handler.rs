//! Callback Handler module for inline keyboard interactions

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardMarkup, MaybeInaccessibleMessage, MessageId, ParseMode};
use tracing::{debug, info, warn};

use crate::dialogue::{IntakeDialogue, IntakeState};
use crate::localization::{t_args_lang, t_lang};
use crate::orders::OrderStatus;
use crate::requests::RequestStatus;

use super::ui_builder::{
    create_admin_keyboard, create_back_keyboard, create_language_keyboard,
    create_main_menu_keyboard, create_search_mode_keyboard, format_admin_dashboard,
    format_orders_list, format_user_orders,
};
use super::AppState;

/// Where the reply to a callback goes: edit the message carrying the
/// keyboard when it is still accessible, otherwise send a fresh one.
struct ReplyTarget {
    chat_id: ChatId,
    message_id: Option<MessageId>,
}

impl ReplyTarget {
    fn from_query(q: &CallbackQuery) -> Self {
        match &q.message {
            Some(MaybeInaccessibleMessage::Regular(msg)) => Self {
                chat_id: msg.chat.id,
                message_id: Some(msg.id),
            },
            _ => Self {
                chat_id: ChatId::from(q.from.id),
                message_id: None,
            },
        }
    }
}

async fn reply(
    bot: &Bot,
    target: &ReplyTarget,
    text: String,
    keyboard: InlineKeyboardMarkup,
) -> Result<()> {
    match target.message_id {
        Some(message_id) => {
            bot.edit_message_text(target.chat_id, message_id, text)
                .parse_mode(ParseMode::Markdown)
                .reply_markup(keyboard)
                .await?;
        }
        None => {
            bot.send_message(target.chat_id, text)
                .parse_mode(ParseMode::Markdown)
                .reply_markup(keyboard)
                .await?;
        }
    }
    Ok(())
}

/// Entry point for all callback queries
pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
    dialogue: IntakeDialogue,
) -> Result<()> {
    // Stop the client-side spinner before doing any work.
    bot.answer_callback_query(q.id.clone()).await?;

    let data = match q.data.as_deref() {
        Some(data) => data.to_string(),
        None => {
            debug!(user_id = %q.from.id, "Callback without data ignored");
            return Ok(());
        }
    };

    let user_id = q.from.id.0 as i64;
    let language = state.user_language(&q.from);
    let target = ReplyTarget::from_query(&q);
    let localization = &state.localization;

    debug!(user_id, data = %data, "Handling callback");

    match data.as_str() {
        "back" => {
            dialogue.update(IntakeState::Idle).await?;
            let welcome = t_args_lang(
                localization,
                "welcome",
                &[("name", q.from.first_name.as_str())],
                Some(&language),
            );
            let keyboard = create_main_menu_keyboard(
                localization,
                Some(&language),
                state.admins.is_admin(user_id),
            );
            reply(&bot, &target, welcome, keyboard).await?;
        }
        "search" => {
            // Typing works right away; the keyboard only offers the photo
            // alternative.
            dialogue.update(IntakeState::AwaitingSearchText).await?;
            reply(
                &bot,
                &target,
                t_lang(localization, "search-title", Some(&language)),
                create_search_mode_keyboard(localization, Some(&language)),
            )
            .await?;
        }
        "search_text" => {
            dialogue.update(IntakeState::AwaitingSearchText).await?;
            reply(
                &bot,
                &target,
                t_lang(localization, "search-title", Some(&language)),
                create_back_keyboard(localization, Some(&language)),
            )
            .await?;
        }
        "search_image" => {
            dialogue.update(IntakeState::AwaitingProductImage).await?;
            reply(
                &bot,
                &target,
                t_lang(localization, "search-image-title", Some(&language)),
                create_back_keyboard(localization, Some(&language)),
            )
            .await?;
        }
        "verify" => {
            dialogue.update(IntakeState::AwaitingSupplierName).await?;
            reply(
                &bot,
                &target,
                t_lang(localization, "verify-title", Some(&language)),
                create_back_keyboard(localization, Some(&language)),
            )
            .await?;
        }
        "tracking" => {
            dialogue.update(IntakeState::AwaitingTrackingNumber).await?;
            reply(
                &bot,
                &target,
                t_lang(localization, "tracking-title", Some(&language)),
                create_back_keyboard(localization, Some(&language)),
            )
            .await?;
        }
        "orders" => {
            let orders = state.orders.by_user(user_id);
            let text = format_user_orders(localization, Some(&language), &orders);
            reply(
                &bot,
                &target,
                text,
                create_back_keyboard(localization, Some(&language)),
            )
            .await?;
        }
        "language" => {
            reply(
                &bot,
                &target,
                t_lang(localization, "select-language", Some(&language)),
                create_language_keyboard(localization, Some(&language)),
            )
            .await?;
        }
        "lang_en" | "lang_ru" => {
            let chosen = data.trim_start_matches("lang_");
            state.languages.set(user_id, chosen, localization);
            info!(user_id, language = %chosen, "User language changed");

            let keyboard = create_main_menu_keyboard(
                localization,
                Some(chosen),
                state.admins.is_admin(user_id),
            );
            reply(
                &bot,
                &target,
                t_lang(localization, "language-changed", Some(chosen)),
                keyboard,
            )
            .await?;
        }
        "help" => {
            reply(
                &bot,
                &target,
                t_lang(localization, "help-text", Some(&language)),
                create_back_keyboard(localization, Some(&language)),
            )
            .await?;
        }
        "admin" => {
            if !state.admins.is_admin(user_id) {
                warn!(user_id, "Admin panel access denied");
                reply(
                    &bot,
                    &target,
                    t_lang(localization, "access-denied", Some(&language)),
                    create_back_keyboard(localization, Some(&language)),
                )
                .await?;
                return Ok(());
            }
            dialogue.update(IntakeState::AdminMenu).await?;
            let dashboard = format_admin_dashboard(
                localization,
                Some(&language),
                &state.orders.stats(),
                state.ledger.is_connected(),
            );
            reply(
                &bot,
                &target,
                dashboard,
                create_admin_keyboard(localization, Some(&language)),
            )
            .await?;
        }
        "admin_all" | "admin_pending" | "admin_active" => {
            if !state.admins.is_admin(user_id) {
                warn!(user_id, data = %data, "Admin order view denied");
                reply(
                    &bot,
                    &target,
                    t_lang(localization, "access-denied", Some(&language)),
                    create_back_keyboard(localization, Some(&language)),
                )
                .await?;
                return Ok(());
            }
            let orders = match data.as_str() {
                "admin_pending" => state.orders.by_status(OrderStatus::Pending),
                "admin_active" => state.orders.active(),
                _ => state.orders.all(),
            };
            let text = format_orders_list(localization, Some(&language), &orders);
            reply(
                &bot,
                &target,
                text,
                create_admin_keyboard(localization, Some(&language)),
            )
            .await?;
        }
        other if other.starts_with("order_") => {
            let request_id = other.trim_start_matches("order_");
            handle_order_confirmation(&bot, &state, &target, &language, user_id, request_id)
                .await?;
        }
        other => {
            warn!(user_id, data = %other, "Unknown callback data ignored");
        }
    }

    Ok(())
}

/// A user pressed "Confirm Order" under their intake confirmation: move the
/// request to processing and describe the next steps.
async fn handle_order_confirmation(
    bot: &Bot,
    state: &Arc<AppState>,
    target: &ReplyTarget,
    language: &str,
    user_id: i64,
    request_id: &str,
) -> Result<()> {
    let localization = &state.localization;

    // Only the request's owner can confirm it; stale or forged callbacks
    // just get an error notice.
    let owned = state
        .requests
        .get(request_id)
        .map(|r| r.user_id == user_id)
        .unwrap_or(false);

    if !owned || !state.requests.set_status(request_id, RequestStatus::Processing) {
        warn!(user_id, request_id = %request_id, "Order confirmation for unknown request");
        reply(
            bot,
            target,
            t_lang(localization, "error-occurred", Some(language)),
            create_back_keyboard(localization, Some(language)),
        )
        .await?;
        return Ok(());
    }

    info!(user_id, request_id = %request_id, "Request confirmed by user");

    let text = format!(
        "{}\n\n{}",
        t_args_lang(
            localization,
            "order-confirmed",
            &[("id", request_id)],
            Some(language)
        ),
        t_lang(localization, "order-next-steps", Some(language))
    );
    reply(
        bot,
        target,
        text,
        create_back_keyboard(localization, Some(language)),
    )
    .await?;

    Ok(())
}
