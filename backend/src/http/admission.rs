//! Admission middleware: every request spends a token before reaching a handler.

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;
use std::sync::Arc;

use super::error::AppError;
use crate::services::admission::AdmissionController;

/// Identity used when the connection address is not available.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Client identity: the peer socket address as `ip:port`, unnormalized.
pub fn client_identity(request: &Request) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

pub async fn admit_request(
    State(admission): State<Arc<AdmissionController>>,
    request: Request,
    next: Next,
) -> Response {
    let identity = client_identity(&request);
    if !admission.admit(&identity) {
        tracing::warn!(client = %identity, path = %request.uri().path(), "request denied by admission control");
        return AppError::TooManyRequests.into_response();
    }

    next.run(request).await
}
