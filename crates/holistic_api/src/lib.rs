use std::borrow::Cow;

use axum::http::StatusCode;
use axum::Json;
use axum::response::{IntoResponse, Response};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Number of landmarks in a pose frame.
pub const POSE_LANDMARK_COUNT: usize = 33;

/// Number of landmarks in a single hand frame.
pub const HAND_LANDMARK_COUNT: usize = 21;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorCategory {
    Cancelled,
    InvalidArgument,
}

impl ErrorCategory {
    pub fn to_status_code(self) -> StatusCode {
        match self {
            ErrorCategory::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCategory::InvalidArgument => StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub category: ErrorCategory,
    pub error_code: Cow<'static, str>,
    pub instance_id: String,
    pub message: Cow<'static, str>,
}

impl ApiError {
    pub fn with_message(
        category: ErrorCategory,
        code: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            category,
            error_code: code.into(),
            instance_id: nanoid::nanoid!(),
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<Cow<'static, str>>) -> Self {
        Self::with_message(ErrorCategory::InvalidArgument, "invalid_argument", message)
    }

    pub fn unavailable() -> Self {
        Self::with_message(ErrorCategory::Cancelled, "unavailable", "service unavailable")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.category.to_status_code();
        (status_code, Json(self)).into_response()
    }
}

/// A single tracked point as produced by the perception pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub position: Vec3,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence: Option<f32>,
}

impl Landmark {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            visibility: None,
            presence: None,
        }
    }
}

impl From<Vec3> for Landmark {
    fn from(position: Vec3) -> Self {
        Self::new(position)
    }
}

/// One tick of holistic tracking. Any stream may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetLandmarksRequest {
    #[serde(default)]
    pub pose: Option<Vec<Landmark>>,
    #[serde(default)]
    pub left_hand: Option<Vec<Landmark>>,
    #[serde(default)]
    pub right_hand: Option<Vec<Landmark>>,
}

impl SetLandmarksRequest {
    /// Checks that every present stream carries a complete frame.
    pub fn validate(&self) -> Result<(), ApiError> {
        let streams = [
            ("pose", &self.pose, POSE_LANDMARK_COUNT),
            ("leftHand", &self.left_hand, HAND_LANDMARK_COUNT),
            ("rightHand", &self.right_hand, HAND_LANDMARK_COUNT),
        ];

        for (name, landmarks, expected) in streams {
            let Some(landmarks) = landmarks else {
                continue;
            };

            if landmarks.len() != expected {
                return Err(ApiError::invalid_argument(format!(
                    "{} has {} landmarks, expected {}",
                    name,
                    landmarks.len(),
                    expected,
                )));
            }
        }

        Ok(())
    }
}
