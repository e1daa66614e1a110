use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use axum::Json;
use axum::Router;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use bzalpha_client::AuthToken;
use bzalpha_client::ClientError;
use bzalpha_client::OrderService;
use bzalpha_client::RestOrderService;
use bzalpha_contracts::BulkOrderRequest;
use bzalpha_contracts::Currency;
use bzalpha_contracts::DeleteOrderRequest;
use bzalpha_contracts::ListOrdersQuery;
use bzalpha_contracts::OrderId;
use bzalpha_contracts::PrincipalId;
use bzalpha_contracts::Rank;
use bzalpha_contracts::VesselId;
use serde_json::Value;
use serde_json::json;

const TOKEN: &str = "secret";

#[derive(Debug, Clone)]
struct RecordedRequest {
    route: String,
    query: HashMap<String, String>,
    body: Option<Value>,
}

type Recorder = Arc<Mutex<Vec<RecordedRequest>>>;

fn authorized(headers: &HeaderMap) -> Result<(), StatusCode> {
    match headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok()) {
        Some(value) if value == format!("Bearer {TOKEN}") => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

fn record(recorder: &Recorder, route: &str, query: HashMap<String, String>, body: Option<Value>) {
    recorder.lock().unwrap().push(RecordedRequest {
        route: route.to_string(),
        query,
        body,
    });
}

async fn list_orders(
    State(recorder): State<Recorder>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    authorized(&headers)?;
    record(&recorder, "GET bz-order", query.clone(), None);

    match query.get("vessel").map(String::as_str) {
        Some("12") => Ok(Json(json!({
            "101": { "id": 101, "order_status": "pending", "position": "C/O", "wage": "4200" },
            "102": { "id": "102", "order_status": "completed", "position": "AB", "seaman": false }
        }))),
        _ => Ok(Json(json!([]))),
    }
}

async fn create_orders(
    State(recorder): State<Recorder>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    authorized(&headers).map_err(|status| (status, Json(json!({ "code": "rest_forbidden" }))))?;
    record(&recorder, "POST bz-order/bulk", HashMap::new(), Some(body.clone()));

    let positions = body["positions"].as_array().map(Vec::len).unwrap_or_default();
    if positions == 0 {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "code": "rest_invalid_param" })),
        ));
    }
    Ok(StatusCode::CREATED)
}

async fn delete_order(
    Path(id): Path<u64>,
    State(recorder): State<Recorder>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    authorized(&headers)?;
    record(&recorder, &format!("DELETE bz-order/{id}"), HashMap::new(), Some(body));

    if id == 404 {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(json!({ "deleted": true })))
}

async fn list_principals(
    State(recorder): State<Recorder>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    authorized(&headers)?;
    record(&recorder, "GET principal", query, None);

    Ok(Json(json!([
        { "id": 3, "name": "Nordic Tankers" },
        { "id": "4", "name": "Pacific Bulk" }
    ])))
}

async fn list_vessels(
    State(recorder): State<Recorder>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    authorized(&headers)?;
    record(&recorder, "GET vessel", query, None);

    Ok(Json(json!([
        { "id": 12, "name": "MV Northern Star", "principal": 3 }
    ])))
}

async fn spawn_backend() -> (RestOrderService, Recorder) {
    let recorder = Recorder::default();
    let app = Router::new()
        .route("/wp-json/bzalpha/v1/bz-order", get(list_orders))
        .route("/wp-json/bzalpha/v1/bz-order/bulk", post(create_orders))
        .route("/wp-json/bzalpha/v1/bz-order/{id}", delete(delete_order))
        .route("/wp-json/bzalpha/v1/principal", get(list_principals))
        .route("/wp-json/bzalpha/v1/vessel", get(list_vessels))
        .with_state(recorder.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let service = RestOrderService::new(&format!("http://{address}/wp-json/bzalpha/v1/")).unwrap();
    (service, recorder)
}

fn bulk_request(positions: Vec<Rank>) -> BulkOrderRequest {
    BulkOrderRequest {
        vessel: VesselId(12),
        positions,
        wage: Some(960.0),
        currency: Currency::Usd,
        port: Some("Manila".to_string()),
        uniform: true,
        sign_on: None,
        deadline: None,
        contract_plus: Some(2),
        contract_minus: Some(1),
        remark: None,
    }
}

#[tokio::test]
async fn test_list_orders_sends_vessel_and_unbounded_page_size() {
    let (service, recorder) = spawn_backend().await;

    let orders = service
        .list_orders(&AuthToken::new(TOKEN), &ListOrdersQuery::all_for(VesselId(12)))
        .await
        .unwrap();

    assert_eq!(
        orders.0.keys().copied().collect::<Vec<_>>(),
        vec![OrderId(101), OrderId(102)]
    );
    assert!(orders.0[&OrderId(101)].status.is_pending());
    assert_eq!(orders.0[&OrderId(101)].wage, Some(4200.0));

    let requests = recorder.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].query.get("vessel").map(String::as_str), Some("12"));
    assert_eq!(
        requests[0].query.get("posts_per_page").map(String::as_str),
        Some("-1")
    );
}

#[tokio::test]
async fn test_list_orders_for_empty_vessel() {
    let (service, _) = spawn_backend().await;

    let orders = service
        .list_orders(&AuthToken::new(TOKEN), &ListOrdersQuery::all_for(VesselId(99)))
        .await
        .unwrap();

    assert!(orders.0.is_empty());
}

#[tokio::test]
async fn test_create_orders_posts_the_form_values() {
    let (service, recorder) = spawn_backend().await;

    service
        .create_orders(
            &AuthToken::new(TOKEN),
            &bulk_request(vec![Rank::Master, Rank::ChiefEngineer]),
        )
        .await
        .unwrap();

    let requests = recorder.lock().unwrap().clone();
    assert_eq!(requests[0].route, "POST bz-order/bulk");
    assert_eq!(
        requests[0].body,
        Some(json!({
            "vessel": 12,
            "positions": ["MSTR", "C/E"],
            "wage": 960.0,
            "currency": "USD",
            "port": "Manila",
            "uniform": true,
            "contract_plus": 2,
            "contract_minus": 1
        }))
    );
}

#[tokio::test]
async fn test_rejected_create_is_a_status_error() {
    let (service, _) = spawn_backend().await;

    let error = service
        .create_orders(&AuthToken::new(TOKEN), &bulk_request(Vec::new()))
        .await
        .unwrap_err();

    match error {
        ClientError::Status { status, body } => {
            assert_eq!(status.as_u16(), 400);
            assert!(body.contains("rest_invalid_param"));
        }
        other => panic!("expected a status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_wrong_token_is_unauthorized() {
    let (service, recorder) = spawn_backend().await;

    let error = service
        .list_orders(&AuthToken::new("stale"), &ListOrdersQuery::all_for(VesselId(12)))
        .await
        .unwrap_err();

    assert!(matches!(error, ClientError::Status { status, .. } if status.as_u16() == 401));
    assert!(recorder.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_order_is_forced() {
    let (service, recorder) = spawn_backend().await;

    service
        .delete_order(&AuthToken::new(TOKEN), &DeleteOrderRequest::forced(OrderId(101)))
        .await
        .unwrap();

    let requests = recorder.lock().unwrap().clone();
    assert_eq!(requests[0].route, "DELETE bz-order/101");
    assert_eq!(requests[0].body, Some(json!({ "id": 101, "force": "true" })));
}

#[tokio::test]
async fn test_delete_of_unknown_order_fails() {
    let (service, _) = spawn_backend().await;

    let result = service
        .delete_order(&AuthToken::new(TOKEN), &DeleteOrderRequest::forced(OrderId(404)))
        .await;

    assert!(matches!(result, Err(ClientError::Status { status, .. }) if status.as_u16() == 404));
}

#[tokio::test]
async fn test_directory_routes() {
    let (service, recorder) = spawn_backend().await;
    let token = AuthToken::new(TOKEN);

    let principals = service.list_principals(&token, Some("nor")).await.unwrap();
    let vessels = service
        .list_vessels(&token, Some(PrincipalId(3)), None)
        .await
        .unwrap();

    assert_eq!(principals.len(), 2);
    assert_eq!(principals[1].id, PrincipalId(4));
    assert_eq!(vessels[0].id, VesselId(12));
    assert_eq!(vessels[0].principal, Some(PrincipalId(3)));

    let requests = recorder.lock().unwrap().clone();
    assert_eq!(requests[0].query.get("search").map(String::as_str), Some("nor"));
    assert_eq!(requests[1].route, "GET vessel");
    assert_eq!(requests[1].query.get("principal").map(String::as_str), Some("3"));
}
