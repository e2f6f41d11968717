use std::sync::Arc;

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{error::ApiError, state::AppState, store::CalorieStore};

/// Hands the handler a store that answered `ensure_connected`.
/// Fails the request with a generic 500 when the store is unreachable.
pub struct ConnectedStore(pub Arc<dyn CalorieStore>);

#[async_trait]
impl FromRequestParts<AppState> for ConnectedStore {
    type Rejection = ApiError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        state.store.ensure_connected().await?;
        Ok(ConnectedStore(state.store.clone()))
    }
}
