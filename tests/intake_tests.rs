//! End-to-end tests for the intake flow: classify, record, format the
//! manager notification and the user confirmation.

use buyerchina_bot::bot::ui_builder::{
    format_manager_notification, format_request_confirmation,
};
use buyerchina_bot::is_real_order;
use buyerchina_bot::localization::create_localization_manager;
use buyerchina_bot::requests::{RequestBook, RequestKind, RequestStatus};

#[test]
fn test_text_intake_classifies_records_and_notifies() {
    let text = "Хочу купить часы";
    assert!(is_real_order(text));

    let book = RequestBook::new();
    let request = book.create(1, "Ann", Some("ann_w"), RequestKind::Text, text, None);

    assert_eq!(request.status, RequestStatus::Pending);
    assert!(request.id.starts_with("REQ-1-"));

    // The manager sees who asked and what for.
    let notification = format_manager_notification(&request);
    assert!(notification.contains("НОВЫЙ ЗАПРОС - ТЕКСТ"));
    assert!(notification.contains("Ann"));
    assert!(notification.contains("@ann_w"));
    assert!(notification.contains("часы"));
    assert!(notification.contains(&request.id));
    assert!(notification.contains("15 минут"));
}

#[test]
fn test_photo_notification_without_username() {
    let book = RequestBook::new();
    let request = book.create(2, "Boris", None, RequestKind::Photo, "", Some("file-123"));

    let notification = format_manager_notification(&request);
    assert!(notification.contains("НОВЫЙ ЗАПРОС - ФОТО"));
    assert!(notification.contains("без username"));
    assert!(notification.contains("фото товара"));
    // No free text, so no excerpt line.
    assert!(!notification.contains("Запрос: _"));
}

#[test]
fn test_long_descriptions_are_excerpted() {
    let book = RequestBook::new();
    let description = "купить ".repeat(100);
    let request = book.create(3, "Ann", None, RequestKind::Text, &description, None);

    let notification = format_manager_notification(&request);
    // Excerpt is capped well below the full 700-character description.
    assert!(notification.chars().count() < 500);
}

#[test]
fn test_user_confirmation_is_localized() {
    let localization = create_localization_manager().expect("bundles load");
    let book = RequestBook::new();
    let request = book.create(
        1,
        "Ann",
        None,
        RequestKind::Text,
        "Хочу купить часы",
        None,
    );

    let ru = format_request_confirmation(&localization, Some("ru"), &request, true);
    assert!(ru.contains("Запрос на поиск товара отправлен"));
    assert!(ru.contains(&request.id));
    assert!(ru.contains("Хочу купить часы"));
    assert!(ru.contains("передан менеджеру"));

    let en = format_request_confirmation(&localization, Some("en"), &request, true);
    assert!(en.contains("Request Submitted"));
}

#[test]
fn test_confirmation_copy_reflects_notification_outcome() {
    let localization = create_localization_manager().expect("bundles load");
    let book = RequestBook::new();
    let request = book.create(1, "Ann", None, RequestKind::Text, "хочу купить часы", None);

    let notified = format_request_confirmation(&localization, Some("en"), &request, true);
    let queued = format_request_confirmation(&localization, Some("en"), &request, false);

    assert!(notified.contains("sent to our manager"));
    assert!(queued.contains("has been recorded"));
    assert_ne!(notified, queued);
}

#[test]
fn test_photo_confirmation_mentions_attachment() {
    let localization = create_localization_manager().expect("bundles load");
    let book = RequestBook::new();
    let request = book.create(1, "Ann", None, RequestKind::Photo, "", Some("file-1"));

    let message = format_request_confirmation(&localization, Some("en"), &request, true);
    assert!(message.contains("Image: attached"));
}
