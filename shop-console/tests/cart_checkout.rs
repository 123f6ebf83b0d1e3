// Cart persistence and checkout against a scripted backend

use chrono::Utc;
use http::Method;
use rust_decimal::Decimal;
use serde_json::json;
use shop_client::ClientError;
use shop_client::mock::MockTransport;
use shop_console::cart::CartStore;
use shop_console::flows::{CheckoutForm, checkout};
use shop_console::storage::LocalStore;
use shop_console::{App, AppConfig, AppError, AppEvent, EventBus};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn app(dir: &TempDir, mock: &Arc<MockTransport>) -> App {
    let config = AppConfig::default().with_data_dir(dir.path());
    App::with_transport(config, mock.clone()).unwrap()
}

fn form() -> CheckoutForm {
    CheckoutForm {
        name: "Nguyễn Văn A".into(),
        email: "a@example.com".into(),
        phone: "0901234567".into(),
        address: "12 Lê Lợi, Quận 1".into(),
        note: None,
    }
}

async fn fill_cart(app: &App, mock: &MockTransport) {
    mock.reply(
        Method::GET,
        "/api/products/3",
        json!({"id": 3, "name": "Pin", "price": "250000", "stock": 5}),
    );
    let product = app.api.products().get(3).await.unwrap();
    app.cart.add_product(&product, 2, &[], Utc::now()).unwrap();
}

#[tokio::test]
async fn test_checkout_submits_order_and_clears_cart() {
    let dir = TempDir::new().unwrap();
    let mock = Arc::new(MockTransport::new());
    let app = app(&dir, &mock);
    fill_cart(&app, &mock).await;
    assert_eq!(app.cart.total_price(), Decimal::from(500_000));

    mock.reply(
        Method::POST,
        "/api/requests",
        json!({
            "id": 77,
            "type": "order",
            "name": "Nguyễn Văn A",
            "status": "new",
            "items": [{"product_id": 3, "name": "Pin", "price": 250000, "quantity": 2}]
        }),
    );

    let request = checkout(&app.api, &app.cart, &app.bus, &form()).await.unwrap();
    assert_eq!(request.id, 77);
    assert!(app.cart.is_empty());

    let calls = mock.calls_to(Method::POST, "/api/requests");
    let shop_client::RequestBody::Json(body) = &calls[0].body else {
        panic!("expected a JSON body");
    };
    assert_eq!(body["type"], "order");
    assert_eq!(body["items"][0]["quantity"], 2);
    assert_eq!(body["total"].as_f64(), Some(500_000.0));

    let reopened = App::with_transport(
        AppConfig::default().with_data_dir(dir.path()),
        mock.clone(),
    )
    .unwrap();
    assert!(reopened.cart.is_empty());
}

#[tokio::test]
async fn test_failed_checkout_keeps_cart() {
    let dir = TempDir::new().unwrap();
    let mock = Arc::new(MockTransport::new());
    let app = app(&dir, &mock);
    fill_cart(&app, &mock).await;
    mock.fail(Method::POST, "/api/requests", || {
        ClientError::Internal("500: boom".into())
    });

    let result = checkout(&app.api, &app.cart, &app.bus, &form()).await;
    assert!(result.is_err());
    assert_eq!(app.cart.count(), 2);
}

#[tokio::test]
async fn test_empty_cart_is_not_submitted() {
    let dir = TempDir::new().unwrap();
    let mock = Arc::new(MockTransport::new());
    let app = app(&dir, &mock);

    let result = checkout(&app.api, &app.cart, &app.bus, &form()).await;
    assert!(matches!(result, Err(AppError::EmptyCart)));
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_cart_survives_restart() {
    let dir = TempDir::new().unwrap();
    let mock = Arc::new(MockTransport::new());
    {
        let app = app(&dir, &mock);
        fill_cart(&app, &mock).await;
    }

    let app = app(&dir, &mock);
    assert_eq!(app.cart.count(), 2);
    assert_eq!(app.cart.items()[0].name, "Pin");
}

#[tokio::test]
async fn test_other_handle_picks_up_cart_changes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");
    let bus = EventBus::new();
    let mut rx = bus.subscribe();

    let first = CartStore::load(Arc::new(LocalStore::open(&path, bus.clone()).unwrap())).unwrap();
    let second = Arc::new(
        CartStore::load(Arc::new(LocalStore::open(&path, bus.clone()).unwrap())).unwrap(),
    );
    let sync = second.clone().spawn_sync();

    first
        .add(shared::models::CartItem {
            product_id: 9,
            name: "Cáp sạc".into(),
            price: Decimal::from(90_000),
            quantity: 1,
            image: None,
        })
        .unwrap();

    tokio::time::timeout(Duration::from_secs(2), async {
        while second.is_empty() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("second handle never reloaded");
    assert_eq!(second.total_price(), Decimal::from(90_000));

    let saw_cart_update = std::iter::from_fn(|| rx.try_recv().ok())
        .any(|e| matches!(e, AppEvent::CartUpdated { count: 1, .. }));
    assert!(saw_cart_update);
    sync.abort();
}
