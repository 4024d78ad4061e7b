use std::sync::Arc;

use axum::{Json, Router};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::put;
use bevy::prelude::{ResMut, Resource};
use tokio::sync::mpsc;

use holistic_api::{ApiError, SetLandmarksRequest};
use holistic_rig::TrackingInput;

use crate::tracking::PendingLandmarks;

pub enum Command {
    SetLandmarks(TrackingInput),
}

pub struct ApiState {
    tx: mpsc::UnboundedSender<Command>,
}

impl ApiState {
    pub fn new() -> (Arc<Self>, ApiResource) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Arc::new(Self {
            tx,
        }), ApiResource {
            rx
        })
    }

    pub fn submit(&self, request: SetLandmarksRequest) -> Result<(), ApiError> {
        request.validate()?;
        let input = TrackingInput::try_from(request)
            .map_err(|err| ApiError::invalid_argument(err.to_string()))?;
        if input.is_empty() {
            return Ok(());
        }

        self.tx.send(Command::SetLandmarks(input))
            .map_err(|_| ApiError::unavailable())
    }
}

async fn put_landmarks(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<SetLandmarksRequest>,
) -> Result<StatusCode, ApiError> {
    state.submit(request)?;
    Ok(StatusCode::OK)
}

pub fn new_api() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/v1/landmarks", put(put_landmarks))
}

#[derive(Resource)]
pub struct ApiResource {
    rx: mpsc::UnboundedReceiver<Command>,
}

pub fn update_api(
    mut api: ResMut<ApiResource>,
    mut pending: ResMut<PendingLandmarks>,
) {
    while let Ok(command) = api.rx.try_recv() {
        match command {
            Command::SetLandmarks(input) => pending.input.merge(input),
        }
    }
}
