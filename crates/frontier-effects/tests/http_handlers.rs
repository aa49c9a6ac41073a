//! Wire-format tests for the production handlers against an in-process
//! HTTP server.

use assert_matches::assert_matches;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use frontier_core::config::{BackendConfig, ConfirmationConfig};
use frontier_core::effects::{
    BackendEffects, BackendError, GameProgramEffects, LedgerEffects, LedgerError,
};
use frontier_core::{ActorAddress, Commitment, Lamports};
use frontier_effects::{
    HttpBackendHandler, PresignedTransactionSource, RpcGameProgramHandler, RpcLedgerHandler,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const ACTOR: &str = "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin";
const SESSION: &str = "So11111111111111111111111111111111111111112";

#[derive(Clone, Default)]
struct Recorded {
    requests: Arc<Mutex<Vec<Value>>>,
    status_polls: Arc<Mutex<u32>>,
}

impl Recorded {
    fn methods(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r["method"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    fn params_of(&self, method: &str) -> Value {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .find(|r| r["method"] == method)
            .map(|r| r["params"].clone())
            .unwrap_or(Value::Null)
    }
}

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn reply(id: &Value, result: Value) -> Json<Value> {
    Json(json!({"jsonrpc": "2.0", "id": id, "result": result}))
}

async fn ledger_rpc(State(recorded): State<Recorded>, Json(request): Json<Value>) -> Json<Value> {
    recorded.requests.lock().unwrap().push(request.clone());
    let id = &request["id"];
    match request["method"].as_str().unwrap_or_default() {
        "getBalance" => reply(id, json!({"context": {"slot": 1}, "value": 100_000_000u64})),
        "requestAirdrop" => reply(id, json!("airdrop-signature")),
        "sendTransaction" => reply(id, json!("init-signature")),
        "getAccountInfo" => reply(id, json!({"context": {"slot": 1}, "value": null})),
        "getSignatureStatuses" => {
            let mut polls = recorded.status_polls.lock().unwrap();
            *polls += 1;
            if *polls == 1 {
                reply(id, json!({"context": {"slot": 1}, "value": [null]}))
            } else {
                reply(
                    id,
                    json!({"context": {"slot": 2}, "value": [
                        {"slot": 2, "confirmations": 1, "err": null, "confirmationStatus": "confirmed"}
                    ]}),
                )
            }
        }
        _ => Json(json!({"jsonrpc": "2.0", "id": id, "error": {"code": -32601, "message": "Method not found"}})),
    }
}

async fn failing_rpc(Json(request): Json<Value>) -> Json<Value> {
    let id = &request["id"];
    match request["method"].as_str().unwrap_or_default() {
        "getSignatureStatuses" => reply(
            id,
            json!({"context": {"slot": 2}, "value": [
                {"slot": 2, "err": {"InstructionError": [0, "Custom"]}, "confirmationStatus": "processed"}
            ]}),
        ),
        _ => Json(json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": {"code": 429, "message": "airdrop request limit reached"}
        })),
    }
}

async fn pending_rpc(State(recorded): State<Recorded>, Json(request): Json<Value>) -> Json<Value> {
    recorded.requests.lock().unwrap().push(request.clone());
    reply(&request["id"], json!({"context": {"slot": 1}, "value": [null]}))
}

fn confirmation() -> ConfirmationConfig {
    ConfirmationConfig {
        poll_interval_ms: 5,
        max_polls: 3,
    }
}

fn ledger(url: &str) -> RpcLedgerHandler {
    RpcLedgerHandler::new(url, Commitment::Confirmed, confirmation(), Duration::from_secs(5)).unwrap()
}

fn actor() -> ActorAddress {
    ActorAddress::new(ACTOR).unwrap()
}

#[tokio::test]
async fn balance_and_airdrop_speak_jsonrpc() {
    let recorded = Recorded::default();
    let url = spawn(
        Router::new()
            .route("/", post(ledger_rpc))
            .with_state(recorded.clone()),
    )
    .await;
    let handler = ledger(&url);

    assert_eq!(handler.get_balance(&actor()).await.unwrap(), Lamports::new(100_000_000));

    let signature = handler
        .request_airdrop(&actor(), Lamports::new(1_000_000_000))
        .await
        .unwrap();
    assert_eq!(signature.as_str(), "airdrop-signature");
    handler.confirm_transaction(&signature).await.unwrap();

    assert_eq!(
        recorded.methods(),
        vec![
            "getBalance",
            "requestAirdrop",
            "getSignatureStatuses",
            "getSignatureStatuses"
        ]
    );
    assert_eq!(
        recorded.params_of("requestAirdrop"),
        json!([ACTOR, 1_000_000_000u64, {"commitment": "confirmed"}])
    );
}

#[tokio::test]
async fn rpc_error_and_failed_transaction_are_reported() {
    let url = spawn(Router::new().route("/", post(failing_rpc))).await;
    let handler = ledger(&url);

    assert_matches!(
        handler.request_airdrop(&actor(), Lamports::new(1)).await,
        Err(LedgerError::Rpc { code: 429, .. })
    );

    let signature = frontier_core::TransactionSignature::new("doomed");
    assert_matches!(
        handler.confirm_transaction(&signature).await,
        Err(LedgerError::TransactionFailed { .. })
    );
}

#[tokio::test]
async fn unknown_signature_is_not_confirmed_after_every_poll() {
    let recorded = Recorded::default();
    let url = spawn(
        Router::new()
            .route("/", post(pending_rpc))
            .with_state(recorded.clone()),
    )
    .await;
    let handler = ledger(&url);
    assert_eq!(handler.commitment(), Commitment::Confirmed);

    let signature = frontier_core::TransactionSignature::new("never-landed");
    let result = handler.confirm_transaction(&signature).await;

    assert_matches!(
        result,
        Err(LedgerError::NotConfirmed { signature, polls: 3 }) if signature.as_str() == "never-landed"
    );
    assert_eq!(recorded.methods(), vec!["getSignatureStatuses"; 3]);
    assert_eq!(
        recorded.params_of("getSignatureStatuses"),
        json!([["never-landed"], {"searchTransactionHistory": true}])
    );
}

#[tokio::test]
async fn unreachable_endpoint_is_transport_error() {
    let handler = ledger("http://127.0.0.1:1");
    assert_matches!(
        handler.get_balance(&actor()).await,
        Err(LedgerError::Transport { .. })
    );
}

#[tokio::test]
async fn program_handler_submits_presigned_transaction() {
    let recorded = Recorded::default();
    let url = spawn(
        Router::new()
            .route("/", post(ledger_rpc))
            .with_state(recorded.clone()),
    )
    .await;
    let source = PresignedTransactionSource::from_base64(
        actor(),
        ActorAddress::new(SESSION).unwrap(),
        "AQID",
    )
    .unwrap();
    let program = RpcGameProgramHandler::new(Arc::new(ledger(&url)), source);

    assert!(!program.session_exists(&actor()).await.unwrap());
    let signature = program.initialize_session(&actor()).await.unwrap();
    assert_eq!(signature.as_str(), "init-signature");

    assert_eq!(recorded.params_of("getAccountInfo")[0], json!(SESSION));
    assert_eq!(recorded.params_of("sendTransaction")[0], json!("AQID"));
}

async fn grant(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({"success": body["address"] == ACTOR}))
}

async fn register(Json(_body): Json<Value>) -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

#[tokio::test]
async fn backend_grant_and_registration() {
    let url = spawn(
        Router::new()
            .route("/airdrop", post(grant))
            .route("/players", post(register)),
    )
    .await;
    let handler = HttpBackendHandler::new(&BackendConfig {
        base_url: url,
        ..BackendConfig::default()
    })
    .unwrap();

    assert!(handler.request_grant(&actor()).await.unwrap());
    assert_matches!(
        handler.register_player(&actor()).await,
        Err(BackendError::Status { status: 500, .. })
    );
}
