use async_trait::async_trait;
use axum::Router;
use axum_prometheus::{metrics_exporter_prometheus::PrometheusHandle, PrometheusMetricLayer};
use secrecy::SecretString;
use std::sync::{Arc, Mutex, Once, OnceLock};

use tourpay_core::app_state::AppState;
use tourpay_core::clients::Notifier;
use tourpay_core::repositories::booking_repository::InMemoryBookingStore;
use tourpay_primitives::error::ApiError;
use tourpay_primitives::models::app_state::{AppConfig, StripeInfo};
use tourpay_primitives::models::dtos::notification_dto::Notification;

pub const WEBHOOK_SECRET: &str = "whsec_test123secret456";

/// Notifier double that records instead of sending.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<Notification>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: Notification) -> Result<(), ApiError> {
        self.sent.lock().unwrap().push(notification);
        Ok(())
    }
}

pub struct TestContext {
    pub state: Arc<AppState>,
    pub store: Arc<InMemoryBookingStore>,
    pub notifier: Arc<RecordingNotifier>,
}

static INIT: Once = Once::new();

fn init_test_env() {
    INIT.call_once(|| {
        std::env::set_var("APP_ENV", "test");
        tourpay::utility::logging::setup_logging();
    });
}

/// Create a test AppState wired to a mock Stripe base URL, keeping
/// handles on the store and notifier doubles for assertions.
pub fn create_test_state(stripe_api_url: &str) -> TestContext {
    init_test_env();

    let config = AppConfig {
        app_url: "http://localhost:8080".to_string(),
        admin_email: "admin@example.com".to_string(),
        stripe_details: StripeInfo {
            stripe_secret_key: SecretString::from("sk_test_fake_key_for_testing_only"),
            stripe_api_url: stripe_api_url.to_string(),
            stripe_webhook_secret: SecretString::from(WEBHOOK_SECRET),
        },
    };

    let store = Arc::new(InMemoryBookingStore::new());
    let notifier = Arc::new(RecordingNotifier::default());

    let state = AppState::with_collaborators(config, store.clone(), notifier.clone())
        .expect("failed to build test state");

    TestContext {
        state,
        store,
        notifier,
    }
}

// The prometheus recorder is process-global; install it once and hand
// out fresh layers per router.
static METRIC_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Create a test application Router (with the CORS layer applied, as
/// in production).
pub fn create_test_app(state: Arc<AppState>) -> Router {
    let metric_handle = METRIC_HANDLE
        .get_or_init(|| PrometheusMetricLayer::pair().1)
        .clone();
    let metric_layer = PrometheusMetricLayer::new();

    tourpay::utility::tasks::build_router(state, metric_layer, metric_handle)
        .expect("failed to build test router")
}

/// Sign a payload the way the provider does: HMAC-SHA256 over
/// `"{t}.{payload}"`, sent as `t=<unix>,v1=<hex>`.
#[allow(dead_code)]
pub fn stripe_signature(secret: &str, payload: &str, timestamp: i64) -> String {
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    type HmacSha256 = Hmac<Sha256>;

    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key size");
    mac.update(format!("{}.{}", timestamp, payload).as_bytes());
    format!("t={},v1={}", timestamp, hex::encode(mac.finalize().into_bytes()))
}

#[allow(dead_code)]
pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

#[allow(dead_code)]
pub fn checkout_completed_event(session_id: &str, payment_intent: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "evt_checkout_completed",
        "type": "checkout.session.completed",
        "data": {
            "object": {
                "id": session_id,
                "metadata": {
                    "tourId": "7-day-baobab-safari",
                    "tourName": "7-Day Baobab Safari"
                },
                "customer_details": {"email": "traveler@example.com"},
                "amount_total": 285000,
                "currency": "usd",
                "payment_intent": payment_intent,
                "payment_status": "paid"
            }
        }
    })
}

#[allow(dead_code)]
pub fn payment_intent_event(kind: &str, intent_id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "evt_payment_intent",
        "type": kind,
        "data": {
            "object": {
                "id": intent_id,
                "last_payment_error": {"message": "Your card was declined."}
            }
        }
    })
}
