//! UI Builder module for creating keyboards and formatting messages

use std::sync::Arc;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::localization::{t_args_lang, t_lang, LocalizationManager};
use crate::orders::{Order, OrderStats};
use crate::requests::{ProductRequest, RequestKind};
use crate::shipments::Shipment;
use crate::suppliers::{RiskBand, SupplierRecord};

/// Most orders shown in one admin list message
const ORDER_LIST_LIMIT: usize = 10;

/// Most recent orders shown in the "My Orders" view
const USER_ORDER_LIMIT: usize = 5;

/// Longest excerpt of a request forwarded to the manager
const NOTIFICATION_EXCERPT_CHARS: usize = 200;

/// Main menu shown after /start; admins get one extra row
pub fn create_main_menu_keyboard(
    localization: &Arc<LocalizationManager>,
    language_code: Option<&str>,
    is_admin: bool,
) -> InlineKeyboardMarkup {
    let mut buttons = vec![
        vec![
            InlineKeyboardButton::callback(
                t_lang(localization, "search-products", language_code),
                "search".to_string(),
            ),
            InlineKeyboardButton::callback(
                t_lang(localization, "verify-supplier", language_code),
                "verify".to_string(),
            ),
        ],
        vec![
            InlineKeyboardButton::callback(
                t_lang(localization, "my-orders", language_code),
                "orders".to_string(),
            ),
            InlineKeyboardButton::callback(
                t_lang(localization, "track-shipment", language_code),
                "tracking".to_string(),
            ),
        ],
        vec![
            InlineKeyboardButton::callback(
                t_lang(localization, "help-button", language_code),
                "help".to_string(),
            ),
            InlineKeyboardButton::callback(
                t_lang(localization, "language-button", language_code),
                "language".to_string(),
            ),
        ],
    ];

    if is_admin {
        buttons.push(vec![InlineKeyboardButton::callback(
            t_lang(localization, "admin-panel", language_code),
            "admin".to_string(),
        )]);
    }

    InlineKeyboardMarkup::new(buttons)
}

/// Single back-to-menu button
pub fn create_back_keyboard(
    localization: &Arc<LocalizationManager>,
    language_code: Option<&str>,
) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        t_lang(localization, "back-menu", language_code),
        "back".to_string(),
    )]])
}

/// Choice between text and image search
pub fn create_search_mode_keyboard(
    localization: &Arc<LocalizationManager>,
    language_code: Option<&str>,
) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::callback(
                t_lang(localization, "search-by-text", language_code),
                "search_text".to_string(),
            ),
            InlineKeyboardButton::callback(
                t_lang(localization, "search-by-image", language_code),
                "search_image".to_string(),
            ),
        ],
        vec![InlineKeyboardButton::callback(
            t_lang(localization, "back-menu", language_code),
            "back".to_string(),
        )],
    ])
}

/// Follow-up keyboard after a supplier verification report
pub fn create_post_verify_keyboard(
    localization: &Arc<LocalizationManager>,
    language_code: Option<&str>,
) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback(
            t_lang(localization, "verify-another", language_code),
            "verify".to_string(),
        )],
        vec![InlineKeyboardButton::callback(
            t_lang(localization, "back-menu", language_code),
            "back".to_string(),
        )],
    ])
}

/// Follow-up keyboard after a tracking report
pub fn create_post_tracking_keyboard(
    localization: &Arc<LocalizationManager>,
    language_code: Option<&str>,
) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback(
            t_lang(localization, "track-another", language_code),
            "tracking".to_string(),
        )],
        vec![InlineKeyboardButton::callback(
            t_lang(localization, "back-menu", language_code),
            "back".to_string(),
        )],
    ])
}

/// Keyboard under an intake confirmation; lets the user turn the request
/// into a pending order
pub fn create_request_confirmation_keyboard(
    localization: &Arc<LocalizationManager>,
    language_code: Option<&str>,
    request_id: &str,
) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback(
            t_lang(localization, "confirm-order", language_code),
            format!("order_{}", request_id),
        )],
        vec![
            InlineKeyboardButton::callback(
                t_lang(localization, "new-search", language_code),
                "search".to_string(),
            ),
            InlineKeyboardButton::callback(
                t_lang(localization, "back-menu", language_code),
                "back".to_string(),
            ),
        ],
    ])
}

/// Language selection menu
pub fn create_language_keyboard(
    localization: &Arc<LocalizationManager>,
    language_code: Option<&str>,
) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::callback("🇬🇧 English".to_string(), "lang_en".to_string()),
            InlineKeyboardButton::callback("🇷🇺 Русский".to_string(), "lang_ru".to_string()),
        ],
        vec![InlineKeyboardButton::callback(
            t_lang(localization, "back-menu", language_code),
            "back".to_string(),
        )],
    ])
}

/// Admin dashboard actions
pub fn create_admin_keyboard(
    localization: &Arc<LocalizationManager>,
    language_code: Option<&str>,
) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback(
            format!("📋 {}", t_lang(localization, "view-all-orders", language_code)),
            "admin_all".to_string(),
        )],
        vec![InlineKeyboardButton::callback(
            format!("⏳ {}", t_lang(localization, "view-pending", language_code)),
            "admin_pending".to_string(),
        )],
        vec![InlineKeyboardButton::callback(
            format!("🚀 {}", t_lang(localization, "view-active", language_code)),
            "admin_active".to_string(),
        )],
        vec![InlineKeyboardButton::callback(
            t_lang(localization, "back-menu", language_code),
            "back".to_string(),
        )],
    ])
}

/// Confirmation sent back to the user after a request is recorded
pub fn format_request_confirmation(
    localization: &Arc<LocalizationManager>,
    language_code: Option<&str>,
    request: &ProductRequest,
    manager_notified: bool,
) -> String {
    let mut message = format!(
        "{}\n\n📋 {} `{}`\n📝 {} {}\n",
        t_lang(localization, "request-submitted", language_code),
        t_lang(localization, "request-id-label", language_code),
        request.id,
        t_lang(localization, "request-type-label", language_code),
        request.kind.label(),
    );

    if !request.description.is_empty() {
        message.push_str(&format!(
            "💬 {} _{}_\n",
            t_lang(localization, "request-description-label", language_code),
            request.description
        ));
    }

    if request.image_file_id.is_some() {
        message.push_str(&t_lang(localization, "image-attached", language_code));
        message.push('\n');
    }

    let note_key = if manager_notified {
        "manager-note"
    } else {
        "manager-queued-note"
    };
    message.push('\n');
    message.push_str(&t_lang(localization, note_key, language_code));

    message
}

/// Notification delivered to the manager chat. Always in Russian since the
/// manager team works in Russian.
pub fn format_manager_notification(request: &ProductRequest) -> String {
    let username_display = request
        .username
        .as_deref()
        .map(|u| format!("@{}", u))
        .unwrap_or_else(|| "без username".to_string());

    let header = match request.kind {
        RequestKind::Photo => "📸 *НОВЫЙ ЗАПРОС - ФОТО*",
        RequestKind::Document => "📄 *НОВЫЙ ЗАПРОС - ДОКУМЕНТ*",
        RequestKind::Text => "📝 *НОВЫЙ ЗАПРОС - ТЕКСТ*",
    };

    let body = match request.kind {
        RequestKind::Photo => {
            "📝 Пользователь загрузил фото товара для поиска аналогов в Китае.".to_string()
        }
        RequestKind::Document => {
            "📝 Пользователь отправил документ со спецификацией товара.".to_string()
        }
        RequestKind::Text => {
            let excerpt: String = request
                .description
                .chars()
                .take(NOTIFICATION_EXCERPT_CHARS)
                .collect();
            format!("💬 Запрос: _{}_", excerpt)
        }
    };

    format!(
        "{}\n\n👤 Пользователь: {} ({})\n🆔 ID: `{}`\n📋 Заявка: `{}`\n\n{}\n\n⏰ *Требуется связаться в течение 15 минут!*",
        header, request.first_name, username_display, request.user_id, request.id, body
    )
}

/// Supplier verification report
pub fn format_verification_report(
    localization: &Arc<LocalizationManager>,
    language_code: Option<&str>,
    supplier: &SupplierRecord,
) -> String {
    let mut report = format!(
        "{}\n\n",
        t_lang(localization, "verification-report", language_code)
    );

    report.push_str(&format!(
        "*{}* {}\n",
        t_lang(localization, "company-label", language_code),
        supplier.company_name
    ));
    report.push_str(&format!(
        "*{}* {}\n",
        t_lang(localization, "status-label", language_code),
        supplier.registration_status
    ));
    report.push_str(&format!(
        "*{}* {}\n",
        t_lang(localization, "license-label", language_code),
        supplier.business_license
    ));
    report.push_str(&format!(
        "*{}* {} {}\n",
        t_lang(localization, "experience-label", language_code),
        supplier.years_in_business,
        t_lang(localization, "years-suffix", language_code)
    ));
    report.push_str(&format!(
        "*{}* {}\n",
        t_lang(localization, "location-label", language_code),
        supplier.location
    ));
    report.push_str(&format!(
        "*{}* {}\n",
        t_lang(localization, "risk-level-label", language_code),
        supplier.risk_level
    ));
    report.push_str(&format!(
        "*{}* {}/100\n\n",
        t_lang(localization, "score-label", language_code),
        supplier.verification_score
    ));

    report.push_str(&format!(
        "*{}*\n{}\n\n",
        t_lang(localization, "main-products-label", language_code),
        supplier.main_products
    ));

    report.push_str(&format!(
        "*{}*\n",
        t_lang(localization, "certifications-label", language_code)
    ));
    for cert in &supplier.certifications {
        report.push_str(&format!("• {}\n", cert));
    }

    report.push_str(&format!(
        "\n*{}*\n📧 {}\n📞 {}\n🌐 {}\n",
        t_lang(localization, "contact-label", language_code),
        supplier.contact.email,
        supplier.contact.phone,
        supplier.contact.website
    ));

    report
}

/// Risk assessment block appended to the verification report
pub fn format_risk_assessment(
    localization: &Arc<LocalizationManager>,
    language_code: Option<&str>,
    supplier: &SupplierRecord,
) -> String {
    let header = t_args_lang(
        localization,
        "risk-assessment",
        &[("name", supplier.company_name.as_str())],
        language_code,
    );

    let (title_key, details_key) = match supplier.risk_band() {
        RiskBand::Recommended => ("recommended-supplier", "risk-recommended-details"),
        RiskBand::Caution => ("proceed-caution", "risk-caution-details"),
        RiskBand::HighRisk => ("high-risk", "risk-high-details"),
    };

    format!(
        "{}\n\n*{}*\n{}",
        header,
        t_lang(localization, title_key, language_code),
        t_lang(localization, details_key, language_code)
    )
}

/// Shipment tracking report with scan history, newest first
pub fn format_tracking_report(
    localization: &Arc<LocalizationManager>,
    language_code: Option<&str>,
    shipment: &Shipment,
    delivery_estimate: Option<&str>,
) -> String {
    let mut message = format!(
        "{}\n\n",
        t_lang(localization, "shipment-tracking", language_code)
    );

    message.push_str(&format!(
        "*{}* {}\n",
        t_lang(localization, "tracking-label", language_code),
        shipment.tracking_number
    ));
    message.push_str(&format!(
        "*{}* {}\n",
        t_lang(localization, "carrier-label", language_code),
        shipment.carrier
    ));
    message.push_str(&format!(
        "*{}* {} {}\n",
        t_lang(localization, "status-label", language_code),
        shipment.current_status.label(),
        shipment.current_status.emoji()
    ));
    message.push_str(&format!(
        "*{}* {}\n",
        t_lang(localization, "origin-label", language_code),
        shipment.origin
    ));
    message.push_str(&format!(
        "*{}* {}\n",
        t_lang(localization, "destination-label", language_code),
        shipment.destination
    ));
    message.push_str(&format!(
        "*{}* {}\n",
        t_lang(localization, "est-delivery-label", language_code),
        shipment.estimated_delivery.format("%Y-%m-%d")
    ));

    if let Some(weight) = &shipment.weight {
        message.push_str(&format!(
            "*{}* {}\n",
            t_lang(localization, "weight-label", language_code),
            weight
        ));
    }
    if let Some(dimensions) = &shipment.dimensions {
        message.push_str(&format!(
            "*{}* {}\n",
            t_lang(localization, "dimensions-label", language_code),
            dimensions
        ));
    }

    if let Some(estimate) = delivery_estimate {
        message.push_str(&format!("\n{}\n", estimate));
    }

    message.push_str(&format!(
        "\n*{}*\n",
        t_lang(localization, "tracking-history", language_code)
    ));

    for event in shipment.events_newest_first() {
        message.push_str(&format!(
            "\n{} *{}* - {}\n   {}\n",
            event.status.emoji(),
            event.timestamp.format("%m/%d %H:%M"),
            event.location,
            event.description
        ));
    }

    message
}

/// "My Orders" view for one user, limited to the [`USER_ORDER_LIMIT`]
/// most recent orders
pub fn format_user_orders(
    localization: &Arc<LocalizationManager>,
    language_code: Option<&str>,
    orders: &[Order],
) -> String {
    if orders.is_empty() {
        return t_lang(localization, "no-orders", language_code);
    }

    let count = orders.len().to_string();
    let mut message = format!(
        "{}\n",
        t_args_lang(
            localization,
            "your-orders",
            &[("count", count.as_str())],
            language_code
        )
    );

    for order in orders.iter().take(USER_ORDER_LIMIT) {
        message.push_str(&format!(
            "\n{} *{}* - {}\n🏢 {} {}\n💰 {} ${:.2}\n📅 {} {}\n⏰ {} {}\n",
            order.status.emoji(),
            order.id,
            order.status.label(),
            t_lang(localization, "supplier-label", language_code),
            order.supplier,
            t_lang(localization, "total-label", language_code),
            order.total_amount,
            t_lang(localization, "created-label", language_code),
            order.created_at.format("%Y-%m-%d"),
            t_lang(localization, "est-delivery-label", language_code),
            order.estimated_delivery.format("%Y-%m-%d")
        ));
        if let Some(tracking) = &order.tracking_number {
            message.push_str(&format!(
                "🚚 {} `{}`\n",
                t_lang(localization, "tracking-label", language_code),
                tracking
            ));
        }
    }

    message
}

/// Admin list of orders, truncated after [`ORDER_LIST_LIMIT`] entries
pub fn format_orders_list(
    localization: &Arc<LocalizationManager>,
    language_code: Option<&str>,
    orders: &[Order],
) -> String {
    if orders.is_empty() {
        return t_lang(localization, "no-orders-found", language_code);
    }

    let count = orders.len().to_string();
    let mut message = format!(
        "{}\n",
        t_args_lang(
            localization,
            "orders-list",
            &[("count", count.as_str())],
            language_code
        )
    );

    for order in orders.iter().take(ORDER_LIST_LIMIT) {
        message.push_str(&format!(
            "\n{} *{}* - {}\n👤 {} {}\n💰 ${:.2}\n",
            order.status.emoji(),
            order.id,
            order.status.label(),
            t_lang(localization, "user-id-label", language_code),
            order.user_id,
            order.total_amount
        ));
    }

    if orders.len() > ORDER_LIST_LIMIT {
        let remaining = (orders.len() - ORDER_LIST_LIMIT).to_string();
        message.push('\n');
        message.push_str(&t_args_lang(
            localization,
            "more-orders",
            &[("count", remaining.as_str())],
            language_code,
        ));
    }

    message
}

/// Admin dashboard with status counts, the dollar total, and ledger health
pub fn format_admin_dashboard(
    localization: &Arc<LocalizationManager>,
    language_code: Option<&str>,
    stats: &OrderStats,
    sheets_connected: bool,
) -> String {
    let sheets_status = if sheets_connected {
        t_lang(localization, "sheets-connected", language_code)
    } else {
        t_lang(localization, "sheets-disconnected", language_code)
    };

    format!(
        "{}\n\n{}\n{} {}\n⏳ {} {}\n✅ {} {}\n🏭 {} {}\n🚚 {} {}\n📦 {} {}\n❌ {} {}\n\n{} ${:.2}\n{} {}\n\n{}",
        t_lang(localization, "admin-dashboard", language_code),
        t_lang(localization, "order-statistics", language_code),
        t_lang(localization, "total-orders", language_code),
        stats.total,
        t_lang(localization, "pending-orders", language_code),
        stats.pending,
        t_lang(localization, "confirmed-orders", language_code),
        stats.confirmed,
        t_lang(localization, "production-orders", language_code),
        stats.in_production,
        t_lang(localization, "shipped-orders", language_code),
        stats.shipped,
        t_lang(localization, "delivered-orders", language_code),
        stats.delivered,
        t_lang(localization, "cancelled-orders", language_code),
        stats.cancelled,
        t_lang(localization, "total-amount", language_code),
        stats.total_amount,
        t_lang(localization, "sheets-status-label", language_code),
        sheets_status,
        t_lang(localization, "select-action", language_code)
    )
}
