//! Custom JSON extractor that returns rejections in the API error format

use axum::{
    Json as AxumJson,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

use super::error::{ApiErrorDetail, ApiErrorResponse, ApiErrorType};

/// Wrapper around `axum::Json` so deserialization failures come back as
/// JSON bodies matching [`ApiErrorResponse`] instead of plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match AxumJson::<T>::from_request(req, state).await {
            Ok(AxumJson(value)) => Ok(Json(value)),
            Err(rejection) => {
                let response = ApiErrorResponse {
                    error: ApiErrorDetail {
                        message: rejection.body_text(),
                        error_type: ApiErrorType::InvalidRequestError,
                        param: None,
                    },
                };
                Err((rejection.status(), AxumJson(response)).into_response())
            }
        }
    }
}

impl<T> IntoResponse for Json<T>
where
    T: serde::Serialize,
{
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}
