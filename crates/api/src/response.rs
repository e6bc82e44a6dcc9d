//! Response envelopes.
//!
//! Every successful body is `{ "data": ... }`. Handlers build it through
//! [`DataResponse`] rather than ad-hoc `json!` values.

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `201 Created` with the enveloped resource.
pub type Created<T> = (StatusCode, Json<DataResponse<T>>);

pub fn created<T: Serialize>(data: T) -> Created<T> {
    (StatusCode::CREATED, Json(DataResponse { data }))
}
