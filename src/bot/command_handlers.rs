//! Command Handlers module for processing bot commands

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::debug;

use crate::dialogue::{IntakeDialogue, IntakeState};
use crate::localization::{t_args_lang, t_lang};

use super::ui_builder::create_main_menu_keyboard;
use super::AppState;

/// Handle the /start command: greet, show the main menu, reset any
/// half-finished conversation.
pub async fn handle_start_command(
    bot: &Bot,
    msg: &Message,
    state: &Arc<AppState>,
    dialogue: &IntakeDialogue,
) -> Result<()> {
    let user = msg.from.as_ref();
    let first_name = user.map(|u| u.first_name.as_str()).unwrap_or("there");
    let language = user
        .map(|u| state.user_language(u))
        .unwrap_or_else(|| "en".to_string());
    let is_admin = user
        .map(|u| state.admins.is_admin(u.id.0 as i64))
        .unwrap_or(false);

    debug!(chat_id = %msg.chat.id, language = %language, "Handling /start command");

    dialogue.update(IntakeState::Idle).await?;

    let welcome = t_args_lang(
        &state.localization,
        "welcome",
        &[("name", first_name)],
        Some(&language),
    );
    let keyboard = create_main_menu_keyboard(&state.localization, Some(&language), is_admin);

    bot.send_message(msg.chat.id, welcome)
        .reply_markup(keyboard)
        .await?;

    if let Some(user) = user {
        // Best-effort user touchpoint in the ledger
        state
            .ledger
            .record_user_activity(
                user.id.0 as i64,
                user.username.as_deref(),
                &user.first_name,
                &language,
            )
            .await;
    }

    Ok(())
}

/// Handle the /help command
pub async fn handle_help_command(bot: &Bot, msg: &Message, state: &Arc<AppState>) -> Result<()> {
    let language = msg
        .from
        .as_ref()
        .map(|u| state.user_language(u))
        .unwrap_or_else(|| "en".to_string());

    bot.send_message(
        msg.chat.id,
        t_lang(&state.localization, "help-text", Some(&language)),
    )
    .await?;
    Ok(())
}

/// Handle the /cancel command: reset the dialogue to idle
pub async fn handle_cancel_command(
    bot: &Bot,
    msg: &Message,
    state: &Arc<AppState>,
    dialogue: &IntakeDialogue,
) -> Result<()> {
    let language = msg
        .from
        .as_ref()
        .map(|u| state.user_language(u))
        .unwrap_or_else(|| "en".to_string());

    dialogue.update(IntakeState::Idle).await?;

    bot.send_message(
        msg.chat.id,
        t_lang(&state.localization, "cancel-done", Some(&language)),
    )
    .await?;
    Ok(())
}
