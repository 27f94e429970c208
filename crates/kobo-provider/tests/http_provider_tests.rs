use axum::Json;
use axum::Router;
use axum::extract::RawQuery;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post, put};
use kobo_core::provider::error::ProviderError;
use kobo_core::provider::port::{self, ProviderPort};
use kobo_provider::http::HttpProvider;
use serde_json::{Value, json};
use tokio::net::TcpListener;

fn header(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

async fn echo(headers: HeaderMap, body: String) -> Json<Value> {
    Json(json!({
        "authorization": header(&headers, "authorization"),
        "contentType": header(&headers, "content-type"),
        "body": serde_json::from_str::<Value>(&body).unwrap_or(Value::Null),
    }))
}

async fn reject() -> (StatusCode, &'static str) {
    (StatusCode::UNPROCESSABLE_ENTITY, r#"{"message":"invalid quote"}"#)
}

async fn list(headers: HeaderMap, RawQuery(query): RawQuery) -> Json<Value> {
    Json(json!({
        "authorization": header(&headers, "authorization"),
        "query": query.unwrap_or_default(),
    }))
}

// 帮助函数：在随机端口启动服务商桩
async fn spawn_stub() -> String {
    let app = Router::new()
        .route("/echo", post(echo))
        .route("/reject", post(reject))
        .route("/list", get(list))
        .route("/users/{id}", put(echo));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn test_post_sends_bearer_and_json() {
    let base = spawn_stub().await;
    let provider = HttpProvider::new(None).unwrap();

    let raw = port::post(
        &provider,
        &format!("{}/echo", base),
        "sk_test_123",
        &json!({"quoteId": "Q1"}),
    )
    .await
    .unwrap();

    let echoed: Value = serde_json::from_slice(&raw).unwrap();
    assert_eq!(echoed["authorization"], "Bearer sk_test_123");
    assert_eq!(echoed["contentType"], "application/json");
    assert_eq!(echoed["body"], json!({"quoteId": "Q1"}));
}

#[tokio::test]
async fn test_put_sends_bearer_and_json() {
    let base = spawn_stub().await;
    let provider = HttpProvider::new(None).unwrap();

    let raw = provider
        .put_json(
            &format!("{}/users/U-1", base),
            "sk_put",
            &json!({"phone": "+2348000000000"}),
        )
        .await
        .unwrap();

    let echoed: Value = serde_json::from_slice(&raw).unwrap();
    assert_eq!(echoed["authorization"], "Bearer sk_put");
    assert_eq!(echoed["contentType"], "application/json");
    assert_eq!(echoed["body"], json!({"phone": "+2348000000000"}));

    // PUT 命中仅注册 POST 的路由时同样按上游错误处理
    let err = provider
        .put_json(&format!("{}/echo", base), "sk_put", &json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Upstream { status: 405, .. }));
}

#[tokio::test]
async fn test_error_status_preserves_body() {
    let base = spawn_stub().await;
    let provider = HttpProvider::new(None).unwrap();

    let err = provider
        .post_json(&format!("{}/reject", base), "sk", &json!({}))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ProviderError::Upstream {
            status: 422,
            body: r#"{"message":"invalid quote"}"#.to_string(),
        }
    );
    assert_eq!(
        err.to_string(),
        r#"API error (422): {"message":"invalid quote"}"#
    );
}

#[tokio::test]
async fn test_unknown_route_maps_to_upstream_404() {
    let base = spawn_stub().await;
    let provider = HttpProvider::new(None).unwrap();

    let err = provider
        .post_json(&format!("{}/missing", base), "sk", &json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Upstream { status: 404, .. }));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // 绑定后立即释放端口，确保没有服务监听
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let provider = HttpProvider::new(Some(std::time::Duration::from_secs(2))).unwrap();
    let err = provider
        .post_json(&format!("http://{}/echo", addr), "sk", &json!({}))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Transport(_)), "got {:?}", err);
    assert!(err.to_string().starts_with("failed to make request:"));
}

#[tokio::test]
async fn test_get_forwards_query() {
    let base = spawn_stub().await;
    let provider = HttpProvider::new(None).unwrap();

    let raw = provider
        .get_json(
            &format!("{}/list", base),
            "sk_live",
            &[
                ("page".to_string(), "2".to_string()),
                ("limit".to_string(), "5".to_string()),
            ],
        )
        .await
        .unwrap();

    let echoed: Value = serde_json::from_slice(&raw).unwrap();
    assert_eq!(echoed["authorization"], "Bearer sk_live");
    assert_eq!(echoed["query"], "page=2&limit=5");
}
