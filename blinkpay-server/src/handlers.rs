//! Axum route handlers for the payment action.
//!
//! Endpoints:
//! - `GET|OPTIONS /actions.json` - discovery manifest
//! - `GET|OPTIONS /api/actions/payments` - action metadata
//! - `POST /api/actions/payments` - unsigned transfer transaction
//!
//! `OPTIONS` answers with the same body as `GET` so that cross-origin
//! preflights from blink clients succeed.

use std::fmt;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{RawQuery, State};
use axum::http::HeaderMap;
use axum::http::header::HOST;
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router, middleware};
use blinkpay::proto::ActionType;
use blinkpay::{
    ActionGetResponse, ActionLinks, ActionPostRequest, ActionPostResponse, ActionsJson, CoinAmount,
    LinkedAction,
};
use blinkpay_svm::{
    BlockhashProvider, NativeTransfer, Pubkey, parse_address, resolve_recipient, sol_to_lamports,
};
use url::Url;

use crate::config::PaymentCampaign;
use crate::error::ActionError;

/// Path of the discovery manifest.
pub const ACTIONS_JSON_PATH: &str = "/actions.json";

/// Path of the payment action.
pub const PAYMENTS_PATH: &str = "/api/actions/payments";

/// Everything a payment request needs, built once at startup.
pub struct PaymentAction {
    blockhash: Arc<dyn BlockhashProvider>,
    default_recipient: Pubkey,
    campaign: PaymentCampaign,
    public_url: Option<Url>,
}

impl fmt::Debug for PaymentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentAction")
            .field("default_recipient", &self.default_recipient)
            .field("campaign", &self.campaign.title)
            .field("public_url", &self.public_url)
            .finish_non_exhaustive()
    }
}

impl PaymentAction {
    /// Creates the action state.
    #[must_use]
    pub fn new(
        blockhash: Arc<dyn BlockhashProvider>,
        default_recipient: Pubkey,
        campaign: PaymentCampaign,
    ) -> Self {
        Self {
            blockhash,
            default_recipient,
            campaign,
            public_url: None,
        }
    }

    /// Uses `public_url` as the origin for icon and link URLs instead of the
    /// request's host headers.
    #[must_use]
    pub fn with_public_url(mut self, public_url: Option<Url>) -> Self {
        self.public_url = public_url;
        self
    }
}

/// Shared application state for the action routes.
pub type ActionState = Arc<PaymentAction>;

/// The `to` and `amount` query parameters. Only the first occurrence of
/// each key counts.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct PaymentQuery {
    to: Option<String>,
    amount: Option<String>,
}

impl PaymentQuery {
    fn parse(raw: Option<&str>) -> Self {
        let mut query = Self::default();
        for (key, value) in url::form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
            let slot = match &*key {
                "to" => &mut query.to,
                "amount" => &mut query.amount,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        query
    }

    fn recipient(&self, default: Pubkey) -> Result<Pubkey, ActionError> {
        resolve_recipient(self.to.as_deref(), default).map_err(|_| ActionError::InvalidRecipient)
    }
}

/// `GET /actions.json` - Returns the fixed routing manifest.
pub async fn get_actions_json() -> Json<ActionsJson> {
    Json(ActionsJson::payments())
}

/// `GET /api/actions/payments` - Describes the payment for a recipient.
///
/// # Errors
///
/// Returns 400 if `to` is not a public key.
pub async fn get_payment(
    State(action): State<ActionState>,
    RawQuery(raw): RawQuery,
    headers: HeaderMap,
) -> Result<Json<ActionGetResponse>, ActionError> {
    let recipient = PaymentQuery::parse(raw.as_deref()).recipient(action.default_recipient)?;
    let origin = request_origin(&headers, action.public_url.as_ref())?;
    let metadata = action_metadata(&action.campaign, &origin, &recipient)?;
    tracing::debug!(%recipient, %origin, "Served payment action");
    Ok(Json(metadata))
}

/// `POST /api/actions/payments` - Builds an unsigned transfer from the
/// caller's `account` to the recipient.
///
/// # Errors
///
/// Returns 400 on invalid `to`, `amount` or `account`, or when the RPC node
/// cannot supply a recent blockhash.
pub async fn post_payment(
    State(action): State<ActionState>,
    RawQuery(raw): RawQuery,
    body: Bytes,
) -> Result<Json<ActionPostResponse>, ActionError> {
    let query = PaymentQuery::parse(raw.as_deref());
    let recipient = query.recipient(action.default_recipient)?;
    let amount = CoinAmount::from_query(query.amount.as_deref())?;
    let account = parse_account(&body)?;
    let lamports = sol_to_lamports(&amount)?;
    tracing::debug!(%recipient, %account, %amount, lamports, "Validated payment request");

    let recent = action.blockhash.latest_blockhash().await?;
    let unsigned = NativeTransfer::new(account, recipient, lamports).build_unsigned(&recent);
    let transaction = unsigned.as_base64()?;

    tracing::info!(
        %recipient,
        %account,
        lamports,
        blockhash = %recent.blockhash,
        last_valid_block_height = unsigned.last_valid_block_height(),
        "Built unsigned payment transaction"
    );
    Ok(Json(ActionPostResponse::transaction(
        transaction.into_string(),
        Some(action.campaign.message.clone()),
    )))
}

/// Extracts the payer from the POST body.
fn parse_account(body: &[u8]) -> Result<Pubkey, ActionError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|_| ActionError::InvalidBody)?;
    // derived struct impls also accept the sequence form `["..."]`
    if !value.is_object() {
        return Err(ActionError::InvalidAccount);
    }
    let request: ActionPostRequest =
        serde_json::from_value(value).map_err(|_| ActionError::InvalidAccount)?;
    parse_address(&request.account).map_err(|_| ActionError::InvalidAccount)
}

/// Resolves the origin that icon and link URLs are built against.
fn request_origin(headers: &HeaderMap, public_url: Option<&Url>) -> Result<Url, ActionError> {
    if let Some(url) = public_url {
        return Ok(url.clone());
    }
    let host = first_header_value(headers, "x-forwarded-host")
        .or_else(|| first_header_value(headers, HOST.as_str()));
    let Some(host) = host else {
        return Ok(Url::parse("http://localhost/")?);
    };
    let scheme = match first_header_value(headers, "x-forwarded-proto") {
        Some(proto) if proto.eq_ignore_ascii_case("https") => "https",
        _ => "http",
    };
    Ok(Url::parse(&format!("{scheme}://{host}/"))?)
}

/// First comma-separated element of a header, as proxies may append.
fn first_header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn action_metadata(
    campaign: &PaymentCampaign,
    origin: &Url,
    recipient: &Pubkey,
) -> Result<ActionGetResponse, ActionError> {
    let icon = origin.join(&campaign.icon)?;
    let mut href = origin.join(PAYMENTS_PATH)?;
    href.query_pairs_mut()
        .append_pair("to", &recipient.to_string())
        .append_pair("amount", &campaign.amount.to_string());

    Ok(ActionGetResponse {
        kind: ActionType::Action,
        icon: icon.into(),
        title: campaign.title.clone(),
        description: campaign.description.clone(),
        label: campaign.label.clone(),
        links: ActionLinks {
            actions: vec![LinkedAction {
                label: campaign.link_label.clone(),
                href: href.into(),
            }],
        },
    })
}

/// Copies the action headers onto every response, errors included.
async fn apply_action_headers(
    State(headers): State<Arc<HeaderMap>>,
    mut response: Response,
) -> Response {
    for (name, value) in headers.iter() {
        response.headers_mut().insert(name.clone(), value.clone());
    }
    response
}

/// Creates an Axum [`Router`] with the discovery and payment endpoints.
///
/// `headers` (see [`blinkpay::headers::ActionHeaders`]) are attached to
/// every response produced by these routes.
pub fn action_router(state: ActionState, headers: HeaderMap) -> Router {
    Router::new()
        .route(
            ACTIONS_JSON_PATH,
            get(get_actions_json).options(get_actions_json),
        )
        .route(
            PAYMENTS_PATH,
            get(get_payment).options(get_payment).post(post_payment),
        )
        .with_state(state)
        .layer(middleware::map_response_with_state(
            Arc::new(headers),
            apply_action_headers,
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
    use axum::http::{Method, Request, StatusCode};
    use blinkpay::headers::{ActionHeaders, X_ACTION_ERROR_KIND, X_BLOCKCHAIN_IDS};
    use blinkpay_svm::{BlockhashError, Hash, RecentBlockhash, SolanaCluster};
    use serde_json::{Value, json};
    use solana_transaction::Transaction;
    use tower::ServiceExt;

    use crate::config::DEFAULT_RECIPIENT;
    use crate::error::UNKNOWN_ERROR_MESSAGE;

    const ACCOUNT: &str = "HromzhPsDS9SzfQBX94h6tBkFXkwzwWzkMPoEoyYFPwK";
    const RECIPIENT: &str = "CMPQdsT2esvz7nzqYBjasTQUr2QbG5aDie6xpGDz3Wgi";
    const HOST_NAME: &str = "blinks.example";

    struct StubBlockhash {
        result: Result<RecentBlockhash, String>,
        calls: AtomicUsize,
    }

    impl StubBlockhash {
        fn ok() -> Self {
            Self {
                result: Ok(RecentBlockhash {
                    blockhash: Hash::new_from_array([5; 32]),
                    last_valid_block_height: 250,
                }),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                result: Err(message.to_owned()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl BlockhashProvider for StubBlockhash {
        async fn latest_blockhash(&self) -> Result<RecentBlockhash, BlockhashError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone().map_err(BlockhashError::Rpc)
        }
    }

    fn app_with(stub: Arc<StubBlockhash>, public_url: Option<Url>) -> Router {
        let action = PaymentAction::new(
            stub,
            parse_address(DEFAULT_RECIPIENT).unwrap(),
            PaymentCampaign::default(),
        )
        .with_public_url(public_url);
        let headers = ActionHeaders::for_chain(SolanaCluster::Devnet.caip2())
            .to_header_map()
            .unwrap();
        action_router(Arc::new(action), headers)
    }

    fn app() -> Router {
        app_with(Arc::new(StubBlockhash::ok()), None)
    }

    fn request(method: Method, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(HOST, HOST_NAME)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
        let response = app.oneshot(req).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, body)
    }

    fn json_body(body: &Bytes) -> Value {
        serde_json::from_slice(body).unwrap()
    }

    fn text_body(body: &Bytes) -> String {
        String::from_utf8(body.to_vec()).unwrap()
    }

    fn decode_transaction(body: &Bytes) -> Transaction {
        let payload = json_body(body);
        let encoded = blinkpay::encoding::Base64Payload::from(
            payload["transaction"].as_str().unwrap().to_owned(),
        );
        bincode::deserialize(&encoded.decode().unwrap()).unwrap()
    }

    fn transfer_lamports(data: &[u8]) -> u64 {
        assert_eq!(u32::from_le_bytes(data[..4].try_into().unwrap()), 2);
        u64::from_le_bytes(data[4..12].try_into().unwrap())
    }

    #[test]
    fn test_query_takes_first_occurrence() {
        let query = PaymentQuery::parse(Some("amount=1&to=a%2Bb&amount=2&other=x"));
        assert_eq!(query.amount.as_deref(), Some("1"));
        assert_eq!(query.to.as_deref(), Some("a+b"));
        assert_eq!(PaymentQuery::parse(None), PaymentQuery::default());
    }

    #[test]
    fn test_request_origin_sources() {
        let mut headers = HeaderMap::new();
        assert_eq!(
            request_origin(&headers, None).unwrap().as_str(),
            "http://localhost/"
        );

        headers.insert(HOST, "internal:3000".parse().unwrap());
        assert_eq!(
            request_origin(&headers, None).unwrap().as_str(),
            "http://internal:3000/"
        );

        headers.insert("x-forwarded-host", "pay.example.com".parse().unwrap());
        headers.insert("x-forwarded-proto", "https, http".parse().unwrap());
        assert_eq!(
            request_origin(&headers, None).unwrap().as_str(),
            "https://pay.example.com/"
        );

        let public = Url::parse("https://cdn.example.org/").unwrap();
        assert_eq!(
            request_origin(&headers, Some(&public)).unwrap(),
            public
        );
    }

    #[test]
    fn test_request_origin_ignores_non_web_schemes() {
        for proto in ["javascript", "file", "ftp", ""] {
            let mut headers = HeaderMap::new();
            headers.insert(HOST, HOST_NAME.parse().unwrap());
            headers.insert("x-forwarded-proto", proto.parse().unwrap());
            assert_eq!(
                request_origin(&headers, None).unwrap().as_str(),
                "http://blinks.example/",
                "proto={proto}"
            );
        }
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HOST_NAME.parse().unwrap());
        headers.insert("x-forwarded-proto", "HTTPS".parse().unwrap());
        assert_eq!(
            request_origin(&headers, None).unwrap().as_str(),
            "https://blinks.example/"
        );
    }

    #[test]
    fn test_request_origin_rejects_unusable_host() {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, "bad host".parse().unwrap());
        let err = request_origin(&headers, None).unwrap_err();
        assert_eq!(err.kind(), "invalid_origin");
    }

    #[tokio::test]
    async fn test_actions_json_get_and_options_match() {
        let (status, headers, get_body) =
            send(app(), request(Method::GET, ACTIONS_JSON_PATH, "")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            json_body(&get_body),
            json!({
                "rules": [
                    { "pathPattern": "/*", "apiPath": "/api/actions/*" },
                    { "pathPattern": "/api/actions/**", "apiPath": "/api/actions/**" },
                ]
            })
        );

        let (status, _, options_body) = send(
            app(),
            request(Method::OPTIONS, "/actions.json?ignored=1", ""),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(options_body, get_body);
    }

    #[tokio::test]
    async fn test_get_payment_defaults() {
        let (status, headers, body) = send(app(), request(Method::GET, PAYMENTS_PATH, "")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            headers[X_BLOCKCHAIN_IDS],
            "solana:EtWTRABZaYq6iMfeYKouRu166VU2xqa1"
        );

        let payload = json_body(&body);
        assert_eq!(payload["type"], "action");
        assert_eq!(payload["title"], "100xdevs Super30");
        assert_eq!(payload["icon"], "http://blinks.example/logo.png");
        assert!(payload["description"].as_str().unwrap().contains('\n'));

        let actions = payload["links"]["actions"].as_array().unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0]["label"], "7.6SOL(1181.80$)");
        assert_eq!(
            actions[0]["href"],
            format!("http://blinks.example/api/actions/payments?to={DEFAULT_RECIPIENT}&amount=7.6")
        );
    }

    #[tokio::test]
    async fn test_get_payment_embeds_requested_recipient() {
        let uri = format!("{PAYMENTS_PATH}?to={RECIPIENT}");
        let (status, _, body) = send(app(), request(Method::GET, &uri, "")).await;
        assert_eq!(status, StatusCode::OK);
        let href = json_body(&body)["links"]["actions"][0]["href"]
            .as_str()
            .unwrap()
            .to_owned();
        let href = Url::parse(&href).unwrap();
        let to = href
            .query_pairs()
            .find(|(k, _)| k == "to")
            .map(|(_, v)| v.into_owned());
        assert_eq!(to.as_deref(), Some(RECIPIENT));
    }

    #[tokio::test]
    async fn test_get_payment_options_matches_get() {
        let uri = format!("{PAYMENTS_PATH}?to={RECIPIENT}");
        let (_, _, get_body) = send(app(), request(Method::GET, &uri, "")).await;
        let (status, _, options_body) = send(app(), request(Method::OPTIONS, &uri, "")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(options_body, get_body);
    }

    #[tokio::test]
    async fn test_get_payment_rejects_non_key_recipients() {
        for to in ["nope", "0000", "abc%20def", "11111"] {
            let uri = format!("{PAYMENTS_PATH}?to={to}");
            let (status, headers, body) = send(app(), request(Method::GET, &uri, "")).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "to={to}");
            assert_eq!(text_body(&body), "Invalid input query parameter: to");
            assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
            assert_eq!(headers[X_ACTION_ERROR_KIND], "invalid_recipient");
        }
    }

    #[tokio::test]
    async fn test_get_payment_uses_public_url() {
        let app = app_with(
            Arc::new(StubBlockhash::ok()),
            Some(Url::parse("https://pay.example.com/").unwrap()),
        );
        let (_, _, body) = send(app, request(Method::GET, PAYMENTS_PATH, "")).await;
        assert_eq!(json_body(&body)["icon"], "https://pay.example.com/logo.png");
    }

    #[tokio::test]
    async fn test_post_payment_builds_transfer_from_account() {
        let stub = Arc::new(StubBlockhash::ok());
        let uri = format!("{PAYMENTS_PATH}?to={RECIPIENT}&amount=1");
        let body = json!({ "account": ACCOUNT }).to_string();
        let (status, headers, body) = send(
            app_with(Arc::clone(&stub), None),
            request(Method::POST, &uri, &body),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);

        let payload = json_body(&body);
        assert_eq!(payload["type"], "transaction");
        assert!(
            payload["message"]
                .as_str()
                .unwrap()
                .contains("100xdevs@gmail.com")
        );

        let tx = decode_transaction(&body);
        let keys = &tx.message.account_keys;
        assert_eq!(keys[0].to_string(), ACCOUNT, "fee payer");
        assert_eq!(tx.message.recent_blockhash, Hash::new_from_array([5; 32]));
        assert_eq!(tx.message.instructions.len(), 1);
        let ix = &tx.message.instructions[0];
        assert_eq!(keys[ix.accounts[0] as usize].to_string(), ACCOUNT);
        assert_eq!(keys[ix.accounts[1] as usize].to_string(), RECIPIENT);
        assert_eq!(transfer_lamports(&ix.data), 1_000_000_000);
    }

    #[tokio::test]
    async fn test_post_payment_preset_amount_is_exact() {
        let uri = format!("{PAYMENTS_PATH}?amount=7.6");
        let body = json!({ "account": ACCOUNT }).to_string();
        let (status, _, body) = send(app(), request(Method::POST, &uri, &body)).await;
        assert_eq!(status, StatusCode::OK);

        let tx = decode_transaction(&body);
        let ix = &tx.message.instructions[0];
        assert_eq!(transfer_lamports(&ix.data), 7_600_000_000);
        assert_eq!(
            tx.message.account_keys[ix.accounts[1] as usize].to_string(),
            DEFAULT_RECIPIENT
        );
    }

    #[tokio::test]
    async fn test_post_payment_rejects_bad_amounts() {
        let body = json!({ "account": ACCOUNT }).to_string();
        for amount in ["-1", "0", "abc", "NaN", "Infinity"] {
            let stub = Arc::new(StubBlockhash::ok());
            let uri = format!("{PAYMENTS_PATH}?amount={amount}");
            let (status, headers, response) = send(
                app_with(Arc::clone(&stub), None),
                request(Method::POST, &uri, &body),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "amount={amount}");
            assert!(text_body(&response).starts_with("Invalid 'amount' parameter"));
            assert_eq!(headers[X_ACTION_ERROR_KIND], "invalid_amount");
            assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn test_post_payment_requires_amount() {
        let body = json!({ "account": ACCOUNT }).to_string();
        for uri in [PAYMENTS_PATH.to_owned(), format!("{PAYMENTS_PATH}?amount=")] {
            let (status, _, response) = send(app(), request(Method::POST, &uri, &body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(text_body(&response), "Missing 'amount' parameter");
        }
    }

    #[tokio::test]
    async fn test_post_payment_rejects_malformed_account() {
        let uri = format!("{PAYMENTS_PATH}?amount=1");
        for body in [
            json!({ "account": "not-a-key" }),
            json!({ "account": 42 }),
            json!({ "account": null }),
            json!({}),
            json!([ACCOUNT]),
        ] {
            let (status, headers, response) =
                send(app(), request(Method::POST, &uri, &body.to_string())).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body={body}");
            assert_eq!(text_body(&response), r#"Invalid "account" provided"#);
            assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        }
    }

    #[tokio::test]
    async fn test_post_payment_rejects_array_body_without_rpc_call() {
        let stub = Arc::new(StubBlockhash::ok());
        let uri = format!("{PAYMENTS_PATH}?amount=1");
        let body = json!([ACCOUNT]).to_string();
        let (status, headers, response) = send(
            app_with(Arc::clone(&stub), None),
            request(Method::POST, &uri, &body),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(text_body(&response), r#"Invalid "account" provided"#);
        assert_eq!(headers[X_ACTION_ERROR_KIND], "invalid_account");
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_post_payment_rejects_non_json_body() {
        let uri = format!("{PAYMENTS_PATH}?amount=1");
        let (status, headers, response) =
            send(app(), request(Method::POST, &uri, "account=abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(text_body(&response), "Invalid request body");
        assert_eq!(headers[X_ACTION_ERROR_KIND], "invalid_body");
    }

    #[tokio::test]
    async fn test_post_payment_checks_recipient_before_amount() {
        let uri = format!("{PAYMENTS_PATH}?to=bogus&amount=-1");
        let body = json!({ "account": ACCOUNT }).to_string();
        let (status, _, response) = send(app(), request(Method::POST, &uri, &body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(text_body(&response), "Invalid input query parameter: to");
    }

    #[tokio::test]
    async fn test_post_payment_surfaces_rpc_failure() {
        let uri = format!("{PAYMENTS_PATH}?amount=1");
        let body = json!({ "account": ACCOUNT }).to_string();

        let app = app_with(Arc::new(StubBlockhash::failing("connection refused")), None);
        let (status, headers, response) = send(app, request(Method::POST, &uri, &body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(text_body(&response), "connection refused");
        assert_eq!(headers[X_ACTION_ERROR_KIND], "upstream_failure");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");

        let app = app_with(Arc::new(StubBlockhash::failing("")), None);
        let (status, _, response) = send(app, request(Method::POST, &uri, &body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(text_body(&response), UNKNOWN_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_method_not_allowed_keeps_action_headers() {
        let (status, headers, _) = send(app(), request(Method::DELETE, PAYMENTS_PATH, "")).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}
