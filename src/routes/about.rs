use axum::Json;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Developer {
    pub firstname: &'static str,
    pub lastname: &'static str,
    pub id: u64,
    pub email: &'static str,
}

pub const DEVELOPERS: [Developer; 3] = [
    Developer {
        firstname: "Eyal",
        lastname: "Chachmishvily",
        id: 209786094,
        email: "eyalchachmi@gmail.com",
    },
    Developer {
        firstname: "Idan",
        lastname: "Eliyahu",
        id: 204174155,
        email: "idaneliyahu93@gmail.com",
    },
    Developer {
        firstname: "Shahar",
        lastname: "Sivilia",
        id: 206375180,
        email: "Shahars71@gmail.com",
    },
];

/// Static; never touches the store.
pub async fn about() -> Json<[Developer; 3]> {
    Json(DEVELOPERS)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{body::Body, http::{Request, StatusCode}};
    use tower::ServiceExt;

    use crate::{app::build_app, state::AppState, store::memory::MemoryCalorieStore};

    #[tokio::test]
    async fn about_lists_three_developers_even_when_store_is_down() {
        let app = build_app(AppState::with_store(Arc::new(MemoryCalorieStore::unreachable())));

        let res = app
            .oneshot(Request::builder().uri("/about").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let devs = json.as_array().unwrap();
        assert_eq!(devs.len(), 3);
        for d in devs {
            for key in ["firstname", "lastname", "id", "email"] {
                assert!(d.get(key).is_some(), "missing {key}");
            }
        }
    }
}
