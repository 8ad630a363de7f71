//! HTTP server for the trading app.
//!
//! Exposes user lookup and rename plus trade listing and ingestion over two
//! in-memory stores. Every input is validated before it reaches a store;
//! validation failures answer `422 {"detail": [...]}` and unknown users on
//! rename answer `404`.

pub mod config;
pub mod error;
pub mod extract;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::Envelope;
pub use server::TappServer;
pub use state::AppState;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    fn app() -> (AppState, Router) {
        let state = AppState::from_config(ServerConfig::default()).unwrap();
        let router = TappServer::with_state(state.clone()).router();
        (state, router)
    }

    async fn call(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let body = match body {
            Some(v) => Body::from(v.to_string()),
            None => Body::empty(),
        };
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(body)
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn call_raw(router: &Router, method: Method, uri: &str, body: &'static str) -> (StatusCode, Value) {
        let response = router
            .clone()
            .oneshot(Request::builder().method(method).uri(uri).body(Body::from(body)).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn trade(id: i64, price: f64) -> Value {
        json!({"id": id, "user_id": 2, "currency": "ETH", "side": "sell", "price": price, "amount": 0.5})
    }

    fn ids(trades: &Value) -> Vec<i64> {
        trades
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_i64().unwrap())
            .collect()
    }

    // -----------------------------------------------------------------------
    // GET /users/:user_id
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn get_seeded_user() {
        let (_, router) = app();
        let (status, body) = call(&router, Method::GET, "/users/2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{
                "id": 2,
                "role": "investor",
                "name": "Rob",
                "degree": [{"id": 2, "created_at": "2018-03-01T00:00:00", "type_degree": "expert"}]
            }])
        );
    }

    #[tokio::test]
    async fn get_user_without_degree() {
        let (_, router) = app();
        let (_, body) = call(&router, Method::GET, "/users/6", None).await;
        assert_eq!(body[0]["name"], "Rich");
        assert_eq!(body[0]["degree"], Value::Null);
    }

    #[tokio::test]
    async fn get_unknown_user_is_empty_list() {
        let (_, router) = app();
        let (status, body) = call(&router, Method::GET, "/users/999", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn non_integer_user_id_is_422() {
        let (_, router) = app();
        let (status, body) = call(&router, Method::GET, "/users/abc", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body,
            json!({"detail": [{
                "type": "int_parsing",
                "loc": ["path", "user_id"],
                "msg": "Input should be a valid integer, unable to parse string as an integer",
                "input": "abc",
            }]})
        );
    }

    #[tokio::test]
    async fn non_utf8_user_id_is_422() {
        let (_, router) = app();
        let (status, body) = call(&router, Method::GET, "/users/%FF", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body,
            json!({"detail": [{
                "type": "int_parsing",
                "loc": ["path", "user_id"],
                "msg": "Input should be a valid integer, unable to parse string as an integer",
                "input": "\u{FFFD}",
            }]})
        );
    }

    // -----------------------------------------------------------------------
    // GET /trades
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn default_page_is_first_three() {
        let (_, router) = app();
        let (status, body) = call(&router, Method::GET, "/trades", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), vec![1, 3, 2]);
        assert_eq!(body[1]["price"], json!(144.4));
    }

    #[tokio::test]
    async fn offset_page_is_truncated() {
        let (_, router) = app();
        let (_, body) = call(&router, Method::GET, "/trades?offset=2&limit=3", None).await;
        assert_eq!(ids(&body), vec![2, 1]);
        assert_eq!(body[1]["amount"], json!(2.54));
    }

    #[tokio::test]
    async fn out_of_range_pages_are_empty_not_errors() {
        let (_, router) = app();
        for uri in ["/trades?offset=4", "/trades?offset=100", "/trades?limit=0", "/trades?limit=-2"] {
            let (status, body) = call(&router, Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert_eq!(body, json!([]), "{uri}");
        }
        let (_, body) = call(&router, Method::GET, "/trades?offset=-3&limit=1", None).await;
        assert_eq!(ids(&body), vec![1]);
    }

    #[tokio::test]
    async fn bad_query_params_report_every_error() {
        let (_, router) = app();
        let (status, body) = call(&router, Method::GET, "/trades?limit=x&offset=1.5", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let detail = body["detail"].as_array().unwrap();
        assert_eq!(detail.len(), 2);
        assert_eq!(detail[0]["loc"], json!(["query", "limit"]));
        assert_eq!(detail[1]["loc"], json!(["query", "offset"]));
    }

    // -----------------------------------------------------------------------
    // POST /trades
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn add_trades_appends_in_order() {
        let (state, router) = app();
        let before = state.trades.len().unwrap();
        let batch = json!([trade(10, 1.0), trade(11, 0.0), trade(1, 99.5)]);
        let (status, body) = call(&router, Method::POST, "/trades", Some(batch)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], 200);
        assert_eq!(ids(&body["data"]), vec![1, 3, 2, 1, 10, 11, 1]);
        assert_eq!(state.trades.len().unwrap(), before + 3);

        let (_, page) = call(&router, Method::GET, "/trades?offset=4&limit=10", None).await;
        assert_eq!(ids(&page), vec![10, 11, 1]);
    }

    #[tokio::test]
    async fn negative_price_rejects_whole_batch() {
        let (state, router) = app();
        let batch = json!([trade(10, 1.0), trade(11, -0.5)]);
        let (status, body) = call(&router, Method::POST, "/trades", Some(batch)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body,
            json!({"detail": [{
                "type": "greater_than_equal",
                "loc": ["body", 1, "price"],
                "msg": "Input should be greater than or equal to 0",
                "input": -0.5,
                "ctx": {"ge": 0},
            }]})
        );
        assert_eq!(state.trades.len().unwrap(), 4);
    }

    #[tokio::test]
    async fn missing_fields_are_all_listed() {
        let (state, router) = app();
        let (status, body) = call(&router, Method::POST, "/trades", Some(json!([{"id": 1, "price": "abc"}]))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let kinds: Vec<&str> = body["detail"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["type"].as_str().unwrap())
            .collect();
        assert_eq!(kinds, vec!["missing", "missing", "missing", "float_parsing", "missing"]);
        assert_eq!(state.trades.len().unwrap(), 4);
    }

    #[tokio::test]
    async fn body_must_be_a_list() {
        let (_, router) = app();
        let (status, body) = call(&router, Method::POST, "/trades", Some(trade(1, 1.0))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["type"], "list_type");
        assert_eq!(body["detail"][0]["loc"], json!(["body"]));
    }

    #[tokio::test]
    async fn malformed_json_is_422() {
        let (_, router) = app();
        let (status, body) = call_raw(&router, Method::POST, "/trades", "[{\"id\": ").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["type"], "json_invalid");
        assert_eq!(body["detail"][0]["loc"][0], "body");
    }

    #[tokio::test]
    async fn empty_body_is_missing() {
        let (_, router) = app();
        let (status, body) = call(&router, Method::POST, "/trades", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["type"], "missing");
    }

    #[tokio::test]
    async fn oversized_batch_is_rejected() {
        let config = ServerConfig {
            max_batch_size: 2,
            ..Default::default()
        };
        let state = AppState::from_config(config).unwrap();
        let router = router::build_router(state.clone());
        let batch = json!([trade(1, 1.0), trade(2, 1.0), trade(3, 1.0)]);
        let (status, body) = call(&router, Method::POST, "/trades", Some(batch)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["type"], "too_long");
        assert_eq!(state.trades.len().unwrap(), 4);
    }

    #[tokio::test]
    async fn strict_side_is_opt_in() {
        let mut odd = trade(20, 1.0);
        odd["side"] = json!("hold");

        let (_, router) = app();
        let (status, _) = call(&router, Method::POST, "/trades", Some(json!([odd.clone()]))).await;
        assert_eq!(status, StatusCode::OK);

        let mut config = ServerConfig::default();
        config.schema.strict_side = true;
        let router = router::build_router(AppState::from_config(config).unwrap());
        let (status, body) = call(&router, Method::POST, "/trades", Some(json!([odd]))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["msg"], "Input should be 'buy' or 'sell'");
    }

    // -----------------------------------------------------------------------
    // POST /user/:user_id
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn rename_is_visible_to_lookup() {
        let (_, router) = app();
        let (status, body) = call(&router, Method::POST, "/user/3?new_name=Ivanka", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], 200);
        assert_eq!(body["data"]["id"], 3);
        assert_eq!(body["data"]["name"], "Ivanka");
        assert_eq!(body["data"]["role"], "investor");

        let (_, users) = call(&router, Method::GET, "/users/3", None).await;
        assert_eq!(users[0]["name"], "Ivanka");
    }

    #[tokio::test]
    async fn rename_accepts_json_body() {
        let (_, router) = app();
        let (status, body) =
            call(&router, Method::POST, "/user/1", Some(json!({"new_name": "Robert"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "Robert");
    }

    #[tokio::test]
    async fn rename_unknown_user_is_404() {
        let (_, router) = app();
        let (status, body) = call(&router, Method::POST, "/user/999?new_name=Ghost", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"detail": "User 999 not found"}));
    }

    #[tokio::test]
    async fn rename_without_name_is_422() {
        let (_, router) = app();
        let (status, body) = call(&router, Method::POST, "/user/1", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body,
            json!({"detail": [{
                "type": "missing",
                "loc": ["query", "new_name"],
                "msg": "Field required",
                "input": null,
            }]})
        );
    }

    #[tokio::test]
    async fn rename_reports_path_and_query_errors_together() {
        let (_, router) = app();
        let (status, body) = call(&router, Method::POST, "/user/x", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let detail = body["detail"].as_array().unwrap();
        assert_eq!(detail.len(), 2);
        assert_eq!(detail[0]["loc"], json!(["path", "user_id"]));
        assert_eq!(detail[1]["loc"], json!(["query", "new_name"]));
    }

    #[tokio::test]
    async fn rename_with_non_utf8_user_id_is_422() {
        let (state, router) = app();
        let (status, body) = call(&router, Method::POST, "/user/%FF?new_name=x", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let detail = body["detail"].as_array().unwrap();
        assert_eq!(detail.len(), 1);
        assert_eq!(detail[0]["type"], "int_parsing");
        assert_eq!(detail[0]["loc"], json!(["path", "user_id"]));
        assert!(state.users.all().unwrap().iter().all(|u| u.name != "x"));

        let (status, body) = call(&router, Method::POST, "/user/%FF", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let detail = body["detail"].as_array().unwrap();
        assert_eq!(detail.len(), 2);
        assert_eq!(detail[0]["loc"], json!(["path", "user_id"]));
        assert_eq!(detail[1]["loc"], json!(["query", "new_name"]));
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let (_, router) = app();
        let (status, _) = call(&router, Method::GET, "/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
