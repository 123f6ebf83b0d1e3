// Board moves against a scripted backend

use http::Method;
use serde_json::json;
use shared::models::RequestStatus;
use shop_client::ClientError;
use shop_client::mock::MockTransport;
use shop_console::board::{BoardController, BoardTab, RequestEdit};
use shop_console::events::{drain, notices};
use shop_console::{App, AppConfig, AppError, NoticeLevel};
use std::sync::Arc;
use tempfile::TempDir;

fn app(dir: &TempDir, mock: &Arc<MockTransport>) -> App {
    let config = AppConfig::default().with_data_dir(dir.path());
    App::with_transport(config, mock.clone()).unwrap()
}

fn ids(controller: &BoardController<'_>, status: RequestStatus) -> Vec<i64> {
    controller.board().column(status).iter().map(|r| r.id).collect()
}

#[tokio::test]
async fn test_failed_save_puts_card_back() {
    let dir = TempDir::new().unwrap();
    let mock = Arc::new(MockTransport::new());
    mock.reply(
        Method::GET,
        "/api/requests",
        json!([
            {"id": 1, "type": "repair", "name": "An", "status": "new"},
            {"id": 2, "type": "repair", "name": "Bình", "status": "new"}
        ]),
    );
    mock.fail(Method::PATCH, "/api/requests/1", || {
        ClientError::Internal("500: database unavailable".into())
    });
    let app = app(&dir, &mock);
    let mut rx = app.bus.subscribe();

    let mut controller = BoardController::load(&app.api, app.bus.clone(), BoardTab::Repairs)
        .await
        .unwrap();
    let result = controller.move_card(1, RequestStatus::InProgress).await;

    assert!(matches!(result, Err(AppError::Client(_))));
    assert_eq!(ids(&controller, RequestStatus::New), vec![1, 2]);
    assert!(ids(&controller, RequestStatus::InProgress).is_empty());
    assert_eq!(mock.calls_to(Method::PATCH, "/api/requests/1").len(), 1);

    let events = drain(&mut rx);
    assert!(
        notices(&events)
            .iter()
            .any(|n| n.level == NoticeLevel::Error)
    );
}

#[tokio::test]
async fn test_completed_card_cannot_move() {
    let dir = TempDir::new().unwrap();
    let mock = Arc::new(MockTransport::new());
    mock.reply(
        Method::GET,
        "/api/requests",
        json!([{"id": 4, "type": "repair", "name": "Chi", "status": "completed"}]),
    );
    let app = app(&dir, &mock);

    let mut controller = BoardController::load(&app.api, app.bus.clone(), BoardTab::Repairs)
        .await
        .unwrap();
    let result = controller.move_card(4, RequestStatus::New).await;

    assert!(matches!(
        result,
        Err(AppError::InvalidTransition {
            id: 4,
            from: RequestStatus::Completed,
            to: RequestStatus::New
        })
    ));
    assert_eq!(ids(&controller, RequestStatus::Completed), vec![4]);
    assert!(mock.calls_to(Method::PATCH, "/api/requests/4").is_empty());
}

#[tokio::test]
async fn test_completing_order_adjusts_stock_and_mails() {
    let dir = TempDir::new().unwrap();
    let mock = Arc::new(MockTransport::new());
    mock.reply(
        Method::GET,
        "/api/requests",
        json!([{
            "id": 5,
            "type": "order",
            "name": "Dũng",
            "email": "dung@example.com",
            "phone": "0901234567",
            "address": "12 Lê Lợi",
            "status": "in_progress",
            "items": [
                {"product_id": 3, "name": "Pin", "price": 250000, "quantity": 2},
                {"product_id": 4, "name": "Ốp lưng", "price": 50000, "quantity": 1}
            ]
        }]),
    );
    mock.reply(Method::PATCH, "/api/requests/5", json!({"ok": true}));
    mock.reply(
        Method::GET,
        "/api/info",
        json!({"name": "Sửa Nhanh", "email": "shop@example.com"}),
    );
    mock.reply(Method::POST, "/api/products/3/decrement-stock", json!({"stock": 0}));
    mock.reply(Method::POST, "/api/products/4/decrement-stock", json!({"stock": 7}));
    mock.reply(Method::PATCH, "/api/products/3", json!({"ok": true}));
    mock.reply(Method::POST, "/api/mail/send", json!({"ok": true}));
    let app = app(&dir, &mock);

    let mut controller = BoardController::load(&app.api, app.bus.clone(), BoardTab::Orders)
        .await
        .unwrap();
    let outcome = controller
        .move_card(5, RequestStatus::Completed)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(outcome.from, RequestStatus::InProgress);
    let report = outcome.completion.unwrap();
    assert!(report.is_clean(), "failures: {:?}", report.failures);
    assert_eq!(report.stock, vec![(3, 0), (4, 7)]);
    assert_eq!(report.out_of_stock, vec![3]);
    assert_eq!(report.mailed, vec!["dung@example.com", "shop@example.com"]);

    assert!(mock.calls_to(Method::PATCH, "/api/products/4").is_empty());
    assert_eq!(mock.calls_to(Method::POST, "/api/mail/send").len(), 2);
    assert_eq!(ids(&controller, RequestStatus::Completed), vec![5]);
}

#[tokio::test]
async fn test_mail_failure_does_not_undo_completion() {
    let dir = TempDir::new().unwrap();
    let mock = Arc::new(MockTransport::new());
    mock.reply(
        Method::GET,
        "/api/requests",
        json!([{"id": 8, "type": "repair", "name": "Hà", "email": "ha@example.com", "status": "new"}]),
    );
    mock.reply(Method::PATCH, "/api/requests/8", json!({"ok": true}));
    mock.reply(Method::GET, "/api/info", json!(null));
    mock.fail(Method::POST, "/api/mail/send", || {
        ClientError::Internal("502: smtp down".into())
    });
    let app = app(&dir, &mock);

    let mut controller = BoardController::load(&app.api, app.bus.clone(), BoardTab::Repairs)
        .await
        .unwrap();
    let outcome = controller
        .move_card(8, RequestStatus::Completed)
        .await
        .unwrap()
        .unwrap();

    let report = outcome.completion.unwrap();
    assert!(report.mailed.is_empty());
    assert!(!report.is_clean());
    assert!(report.stock.is_empty());
    assert_eq!(ids(&controller, RequestStatus::Completed), vec![8]);
}

#[tokio::test]
async fn test_archive_takes_card_off_board() {
    let dir = TempDir::new().unwrap();
    let mock = Arc::new(MockTransport::new());
    mock.reply(
        Method::GET,
        "/api/requests",
        json!([{"id": 6, "type": "repair", "name": "Khoa", "status": "completed"}]),
    );
    mock.reply(Method::PATCH, "/api/requests/6", json!({"ok": true}));
    let app = app(&dir, &mock);

    let mut controller = BoardController::load(&app.api, app.bus.clone(), BoardTab::Repairs)
        .await
        .unwrap();
    controller.archive(6).await.unwrap();

    assert!(controller.board().is_empty());
    let calls = mock.calls_to(Method::PATCH, "/api/requests/6");
    assert_eq!(
        calls[0].body,
        shop_client::RequestBody::Json(json!({"hidden": true}))
    );
}

#[tokio::test]
async fn test_edit_cancels_open_request() {
    let dir = TempDir::new().unwrap();
    let mock = Arc::new(MockTransport::new());
    mock.reply(
        Method::GET,
        "/api/requests",
        json!([{"id": 11, "type": "repair", "name": "Lan", "status": "new"}]),
    );
    mock.reply(
        Method::PUT,
        "/api/requests/11",
        json!({"id": 11, "type": "repair", "name": "Lan", "status": "cancelled"}),
    );
    let app = app(&dir, &mock);

    let mut controller = BoardController::load(&app.api, app.bus.clone(), BoardTab::Repairs)
        .await
        .unwrap();
    let completion = controller
        .edit(
            11,
            RequestEdit {
                status: Some(RequestStatus::Cancelled),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(completion.is_none());
    assert!(ids(&controller, RequestStatus::New).is_empty());
    assert_eq!(
        controller.board().cancelled().iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![11]
    );
    let calls = mock.calls_to(Method::PUT, "/api/requests/11");
    assert_eq!(
        calls[0].body,
        shop_client::RequestBody::Json(json!({"status": "cancelled"}))
    );
    assert!(mock.calls_to(Method::POST, "/api/mail/send").is_empty());
}

#[tokio::test]
async fn test_edit_cannot_reopen_completed_request() {
    let dir = TempDir::new().unwrap();
    let mock = Arc::new(MockTransport::new());
    mock.reply(
        Method::GET,
        "/api/requests",
        json!([{"id": 12, "type": "repair", "name": "Minh", "status": "completed"}]),
    );
    let app = app(&dir, &mock);
    let mut rx = app.bus.subscribe();

    let mut controller = BoardController::load(&app.api, app.bus.clone(), BoardTab::Repairs)
        .await
        .unwrap();
    let result = controller
        .edit(
            12,
            RequestEdit {
                name: Some("Minh Anh".into()),
                status: Some(RequestStatus::InProgress),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::InvalidTransition {
            id: 12,
            from: RequestStatus::Completed,
            to: RequestStatus::InProgress
        })
    ));
    assert!(mock.calls_to(Method::PUT, "/api/requests/12").is_empty());
    assert_eq!(ids(&controller, RequestStatus::Completed), vec![12]);
    assert_eq!(controller.board().get(12).unwrap().contact.name, "Minh");

    let events = drain(&mut rx);
    assert!(
        notices(&events)
            .iter()
            .any(|n| n.level == NoticeLevel::Warning)
    );
}

#[tokio::test]
async fn test_edit_to_completed_runs_completion() {
    let dir = TempDir::new().unwrap();
    let mock = Arc::new(MockTransport::new());
    mock.reply(
        Method::GET,
        "/api/requests",
        json!([{"id": 13, "type": "repair", "name": "Phúc", "email": "phuc@example.com", "status": "in_progress"}]),
    );
    mock.reply(
        Method::PUT,
        "/api/requests/13",
        json!({"id": 13, "type": "repair", "name": "Phúc", "email": "phuc@example.com", "status": "completed"}),
    );
    mock.reply(
        Method::GET,
        "/api/info",
        json!({"name": "Sửa Nhanh", "email": "shop@example.com"}),
    );
    mock.reply(Method::POST, "/api/mail/send", json!({"ok": true}));
    let app = app(&dir, &mock);

    let mut controller = BoardController::load(&app.api, app.bus.clone(), BoardTab::Repairs)
        .await
        .unwrap();
    let report = controller
        .edit(
            13,
            RequestEdit {
                status: Some(RequestStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert!(report.is_clean(), "failures: {:?}", report.failures);
    assert!(report.mailed.contains(&"phuc@example.com".to_string()));
    assert!(!mock.calls_to(Method::POST, "/api/mail/send").is_empty());
    assert_eq!(ids(&controller, RequestStatus::Completed), vec![13]);
}

#[tokio::test]
async fn test_restore_from_history() {
    let dir = TempDir::new().unwrap();
    let mock = Arc::new(MockTransport::new());
    mock.reply(
        Method::GET,
        "/api/requests",
        json!([{"id": 14, "type": "order", "name": "Quân", "status": "completed", "hidden": 1}]),
    );
    mock.reply(Method::PATCH, "/api/requests/14", json!({"ok": true}));
    let app = app(&dir, &mock);

    let mut controller = BoardController::load(&app.api, app.bus.clone(), BoardTab::History)
        .await
        .unwrap();
    assert!(!controller.board().is_empty());
    controller.restore(14).await.unwrap();

    assert!(controller.board().is_empty());
    let calls = mock.calls_to(Method::PATCH, "/api/requests/14");
    assert_eq!(
        calls[0].body,
        shop_client::RequestBody::Json(json!({"hidden": false}))
    );
    assert_eq!(
        mock.calls_to(Method::GET, "/api/requests")[0].query,
        vec![("hidden".to_string(), "1".to_string())]
    );
}
