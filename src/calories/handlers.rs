use axum::{
    extract::{rejection::JsonRejection, Query},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{MessageResponse, MonthlyReport, NewCalorieEntry, ReportQuery},
    extractors::ConnectedStore,
    services::{generate_monthly_report, record_entry},
};
use crate::{error::ApiError, state::AppState};

pub fn write_routes() -> Router<AppState> {
    Router::new().route("/addcalories", post(add_calories))
}

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/report", get(report))
}

#[instrument(skip(store, payload))]
pub async fn add_calories(
    ConnectedStore(store): ConnectedStore,
    payload: Result<Json<NewCalorieEntry>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(body) = payload.map_err(|e| ApiError::Validation(e.body_text()))?;
    let entry = body.validate()?;
    record_entry(store.as_ref(), entry).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Calorie consumption added successfully.".into(),
        }),
    ))
}

#[instrument(skip(store))]
pub async fn report(
    ConnectedStore(store): ConnectedStore,
    Query(q): Query<ReportQuery>,
) -> Result<Json<MonthlyReport>, ApiError> {
    let report = generate_monthly_report(store.as_ref(), &q).await?;
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::{app::build_app, state::AppState, store::memory::MemoryCalorieStore};

    fn post_json(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/addcalories")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn eggs() -> Value {
        json!({
            "user_id": 1, "year": 2024, "month": 3, "day": 5,
            "description": "eggs", "category": "breakfast", "amount": 200
        })
    }

    #[tokio::test]
    async fn add_then_report() {
        let app = build_app(AppState::fake());

        let (status, body) = send(&app, post_json(eggs())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Calorie consumption added successfully.");

        let (status, body) = send(&app, get("/report?user_id=1&year=2024&month=3")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "breakfast": [{"day": 5, "description": "eggs", "amount": 200}],
                "lunch": [],
                "dinner": [],
                "other": []
            })
        );
    }

    #[tokio::test]
    async fn same_category_accumulates() {
        let app = build_app(AppState::fake());
        send(&app, post_json(eggs())).await;
        send(&app, post_json(eggs())).await;

        let (_, body) = send(&app, get("/report?user_id=1&year=2024&month=3")).await;
        assert_eq!(body["breakfast"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unknown_and_missing_categories_land_in_other() {
        let app = build_app(AppState::fake());
        let mut snack = eggs();
        snack["category"] = json!("snack");
        let mut bare = eggs();
        bare.as_object_mut().unwrap().remove("category");
        let mut other = eggs();
        other["category"] = json!("other");

        for b in [snack, bare, other] {
            let (status, _) = send(&app, post_json(b)).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (_, body) = send(&app, get("/report?user_id=1&year=2024&month=3")).await;
        assert_eq!(body["other"].as_array().unwrap().len(), 3);
        assert_eq!(body["breakfast"], json!([]));
    }

    #[tokio::test]
    async fn empty_month_has_four_empty_keys() {
        let app = build_app(AppState::fake());
        send(&app, post_json(eggs())).await;

        let (status, body) = send(&app, get("/report?user_id=1&year=2024&month=4")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"breakfast": [], "lunch": [], "dinner": [], "other": []})
        );
    }

    #[tokio::test]
    async fn unparsable_query_matches_nothing() {
        let app = build_app(AppState::fake());
        send(&app, post_json(eggs())).await;

        for uri in [
            "/report?user_id=abc&year=2024&month=3",
            "/report?user_id=1&year=twenty&month=3",
            "/report?user_id=1&year=2024",
        ] {
            let (status, body) = send(&app, get(uri)).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert_eq!(body["breakfast"], json!([]), "{uri}");
        }
    }

    #[tokio::test]
    async fn query_numbers_with_trailing_text_use_leading_digits() {
        let app = build_app(AppState::fake());
        send(&app, post_json(eggs())).await;

        for uri in [
            "/report?user_id=1&year=2024&month=3abc",
            "/report?user_id=1&year=2024&month=3.0",
            "/report?user_id=1e3&year=2024&month=3",
        ] {
            let (status, body) = send(&app, get(uri)).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert_eq!(
                body["breakfast"],
                json!([{"day": 5, "description": "eggs", "amount": 200}]),
                "{uri}"
            );
        }
    }

    #[tokio::test]
    async fn float_amounts_stay_floats() {
        let app = build_app(AppState::fake());
        let mut half = eggs();
        half["amount"] = json!(150.5);
        send(&app, post_json(half)).await;

        let (_, body) = send(&app, get("/report?user_id=1&year=2024&month=3")).await;
        assert_eq!(body["breakfast"][0]["amount"], json!(150.5));
    }

    #[tokio::test]
    async fn invalid_body_is_rejected_without_insert() {
        let store = Arc::new(MemoryCalorieStore::default());
        let app = build_app(AppState::with_store(store.clone()));

        let mut wrong_type = eggs();
        wrong_type["user_id"] = json!("one");
        let mut bad_month = eggs();
        bad_month["month"] = json!(13);
        let mut negative = eggs();
        negative["amount"] = json!(-5);

        for b in [wrong_type, bad_month, negative] {
            let (status, body) = send(&app, post_json(b)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(body["error"].is_string());
        }
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn unreachable_store_gives_generic_500() {
        let app = build_app(AppState::with_store(Arc::new(MemoryCalorieStore::unreachable())));

        let (status, body) = send(&app, post_json(eggs())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Internal Server Error"}));

        let (status, body) = send(&app, get("/report?user_id=1&year=2024&month=3")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Internal Server Error"}));
    }
}
