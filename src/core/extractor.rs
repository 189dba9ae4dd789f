use axum::{
    body::Body,
    extract::{
        rejection::{FormRejection, PathRejection},
        FromRequest, FromRequestParts, Path, Request,
    },
    http::request::Parts,
    response::{IntoResponse, Response},
    Form,
};
use serde::de::DeserializeOwned;

use crate::core::error::{AppError, PageError};

/// Custom form extractor that provides consistent error responses
pub struct AppForm<T>(pub T);

impl<T, S> FromRequest<S> for AppForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppFormRejection;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match Form::<T>::from_request(req, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => Err(AppFormRejection(rejection)),
        }
    }
}

pub struct AppFormRejection(FormRejection);

impl IntoResponse for AppFormRejection {
    fn into_response(self) -> Response {
        let message = match self.0 {
            FormRejection::FailedToDeserializeForm(err) => format!("Invalid form data: {}", err),
            FormRejection::FailedToDeserializeFormBody(err) => {
                format!("Invalid form data: {}", err)
            }
            FormRejection::InvalidFormContentType(err) => {
                format!("Invalid form content type: {}", err)
            }
            // Body errors (e.g. over the size limit) keep their own status
            other => return other.into_response(),
        };

        PageError(AppError::BadRequest(message)).into_response()
    }
}

/// Path extractor whose parse failures render the HTML error page
pub struct AppPath<T>(pub T);

impl<T, S> FromRequestParts<S> for AppPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppPathRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => Err(AppPathRejection(rejection)),
        }
    }
}

pub struct AppPathRejection(PathRejection);

impl IntoResponse for AppPathRejection {
    fn into_response(self) -> Response {
        match self.0 {
            PathRejection::FailedToDeserializePathParams(err) => {
                PageError(AppError::BadRequest(err.body_text())).into_response()
            }
            other => other.into_response(),
        }
    }
}
