//! HTTP handlers for the payment token endpoint.

use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::error_response;
use crate::services::payments::{CheckoutItem, CheckoutRequest};
use crate::services::PaymentService;

use super::dto::{PaymentTokenHttpRequest, PaymentTokenResponse};

#[derive(Clone)]
pub struct PaymentsState {
    pub payments: Arc<PaymentService>,
}

/// POST /api/paytr/token
pub async fn issue_payment_token(
    State(state): State<PaymentsState>,
    headers: HeaderMap,
    Json(req): Json<PaymentTokenHttpRequest>,
) -> Response {
    let request = CheckoutRequest {
        merchant_oid: req.merchant_oid,
        email: req.email,
        amount: req.amount,
        user_ip: client_ip(&headers),
        user_name: req.user_name,
        user_address: req.user_address,
        user_phone: req.user_phone,
        basket: req
            .basket
            .into_iter()
            .map(|item| CheckoutItem {
                name: item.name,
                price: item.price,
                quantity: item.quantity,
            })
            .collect(),
        no_installment: req.no_installment,
        max_installment: req.max_installment,
        currency: req.currency,
    };

    match state.payments.issue_token(request).await {
        Ok(token) => Json(PaymentTokenResponse {
            status: "success",
            token,
        })
        .into_response(),
        Err(err) => error_response(err),
    }
}

/// First address in X-Forwarded-For, set by the fronting proxy. The gateway
/// requires an IP; a local fallback keeps direct calls working.
fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.split(',').next())
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
        .unwrap_or_else(|| "127.0.0.1".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn forwarded_header_takes_the_first_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        assert_eq!(client_ip(&headers), "203.0.113.7");
    }

    #[test]
    fn missing_header_falls_back_to_localhost() {
        assert_eq!(client_ip(&HeaderMap::new()), "127.0.0.1");
    }
}
