//! PayTR token-endpoint client.
//!
//! The gateway authenticates a token request with an HMAC-SHA256 signature
//! over a single concatenation of the request fields. The concatenation
//! order is a bit-exact external contract: merchant id, client IP, merchant
//! order id, email, payment amount, serialized basket, no-installment flag,
//! max-installment flag, currency, test-mode flag. Reordering anything
//! silently invalidates every signature, which the gateway reports only as a
//! generic hash mismatch. The fixed-vector test at the bottom of this file
//! pins the order.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use secrecy::ExposeSecret;
use serde::Deserialize;
use sha2::Sha256;

use crate::config::PaymentConfig;
use crate::ports::{
    BasketLine, GatewayError, MerchantCredentials, PaymentGateway, PaymentTokenRequest,
};

type HmacSha256 = Hmac<Sha256>;

/// HTTP client for the gateway's token endpoint.
pub struct PaytrGateway {
    gateway_url: String,
    ok_url: String,
    fail_url: String,
    timeout_limit: u32,
    http_client: reqwest::Client,
}

/// Wire format of the gateway's reply.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    status: String,
    token: Option<String>,
    reason: Option<String>,
}

impl PaytrGateway {
    pub fn new(config: &PaymentConfig) -> Self {
        Self {
            gateway_url: config.gateway_url.clone(),
            ok_url: config.ok_url.clone(),
            fail_url: config.fail_url.clone(),
            timeout_limit: config.timeout_limit,
            http_client: reqwest::Client::new(),
        }
    }
}

/// Canonical basket serialization: a JSON array of `[name, price, quantity]`
/// arrays, no whitespace. This exact string participates in the signature.
pub(crate) fn serialize_basket(basket: &[BasketLine]) -> String {
    let lines: Vec<serde_json::Value> = basket
        .iter()
        .map(|line| serde_json::json!([line.name, line.price, line.quantity]))
        .collect();
    serde_json::Value::Array(lines).to_string()
}

/// Compute the base64 HMAC-SHA256 signature for a token request.
///
/// Field order in the concatenation is fixed by the gateway; see the module
/// docs.
pub(crate) fn build_signature(
    credentials: &MerchantCredentials,
    request: &PaymentTokenRequest,
    basket_json: &str,
) -> String {
    let test_mode = if credentials.test_mode { "1" } else { "0" };
    let concatenation = format!(
        "{}{}{}{}{}{}{}{}{}{}",
        credentials.merchant_id,
        request.user_ip,
        request.merchant_oid,
        request.email,
        request.payment_amount,
        basket_json,
        request.no_installment,
        request.max_installment,
        request.currency,
        test_mode,
    );

    let mut mac = HmacSha256::new_from_slice(
        credentials.merchant_key.expose_secret().as_bytes(),
    )
    .expect("HMAC can take key of any size");
    mac.update(concatenation.as_bytes());
    mac.update(credentials.merchant_salt.expose_secret().as_bytes());

    BASE64.encode(mac.finalize().into_bytes())
}

#[async_trait]
impl PaymentGateway for PaytrGateway {
    async fn issue_token(
        &self,
        credentials: &MerchantCredentials,
        request: &PaymentTokenRequest,
    ) -> Result<String, GatewayError> {
        let basket_json = serialize_basket(&request.basket);
        let paytr_token = build_signature(credentials, request, &basket_json);
        let test_mode = if credentials.test_mode { "1" } else { "0" };

        let form: Vec<(&str, String)> = vec![
            ("merchant_id", credentials.merchant_id.clone()),
            ("user_ip", request.user_ip.clone()),
            ("merchant_oid", request.merchant_oid.clone()),
            ("email", request.email.clone()),
            ("payment_amount", request.payment_amount.clone()),
            ("paytr_token", paytr_token),
            ("user_basket", basket_json),
            ("no_installment", request.no_installment.to_string()),
            ("max_installment", request.max_installment.to_string()),
            ("currency", request.currency.clone()),
            ("test_mode", test_mode.to_string()),
            ("user_name", request.user_name.clone()),
            ("user_address", request.user_address.clone()),
            ("user_phone", request.user_phone.clone()),
            ("merchant_ok_url", self.ok_url.clone()),
            ("merchant_fail_url", self.fail_url.clone()),
            ("timeout_limit", self.timeout_limit.to_string()),
        ];

        let response = self
            .http_client
            .post(&self.gateway_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let reply: TokenResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        if reply.status == "success" {
            reply.token.ok_or_else(|| {
                GatewayError::InvalidResponse("success reply without a token".to_string())
            })
        } else {
            let reason = reply
                .reason
                .unwrap_or_else(|| "no reason given".to_string());
            tracing::warn!(reason = %reason, "Gateway rejected token request");
            Err(GatewayError::Rejected(reason))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn fixed_credentials() -> MerchantCredentials {
        MerchantCredentials {
            merchant_id: "123".to_string(),
            merchant_key: SecretString::new("test-merchant-key".to_string()),
            merchant_salt: SecretString::new("test-merchant-salt".to_string()),
            test_mode: true,
        }
    }

    fn fixed_request() -> PaymentTokenRequest {
        PaymentTokenRequest {
            merchant_oid: "ORD-1".to_string(),
            email: "a@b.com".to_string(),
            payment_amount: "1000".to_string(),
            user_ip: "1.2.3.4".to_string(),
            user_name: "Test User".to_string(),
            user_address: "Test Address".to_string(),
            user_phone: "5550000000".to_string(),
            basket: vec![BasketLine {
                name: "X".to_string(),
                price: "10".to_string(),
                quantity: 1,
            }],
            no_installment: 0,
            max_installment: 0,
            currency: "TL".to_string(),
        }
    }

    #[test]
    fn basket_serialization_is_canonical() {
        assert_eq!(serialize_basket(&fixed_request().basket), r#"[["X","10",1]]"#);
        assert_eq!(serialize_basket(&[]), "[]");
    }

    #[test]
    fn basket_serialization_multiple_lines() {
        let basket = vec![
            BasketLine {
                name: "Kulaklık".to_string(),
                price: "149.90".to_string(),
                quantity: 2,
            },
            BasketLine {
                name: "Kılıf".to_string(),
                price: "39.90".to_string(),
                quantity: 1,
            },
        ];
        assert_eq!(
            serialize_basket(&basket),
            r#"[["Kulaklık","149.90",2],["Kılıf","39.90",1]]"#
        );
    }

    /// Precomputed vector for the exact concatenation order. Any refactor
    /// that reorders the fields fails here instead of in production against
    /// the live gateway.
    #[test]
    fn signature_matches_fixed_vector() {
        let request = fixed_request();
        let basket_json = serialize_basket(&request.basket);
        let signature = build_signature(&fixed_credentials(), &request, &basket_json);
        assert_eq!(signature, "0MRR3TYBYpUIFv3OAMogYuSt4THJEnbNHnyIRoPoPJM=");
    }

    #[test]
    fn signature_depends_on_test_mode_flag() {
        let request = fixed_request();
        let basket_json = serialize_basket(&request.basket);
        let live = MerchantCredentials {
            test_mode: false,
            ..fixed_credentials()
        };
        assert_ne!(
            build_signature(&live, &request, &basket_json),
            build_signature(&fixed_credentials(), &request, &basket_json),
        );
    }

    #[test]
    fn signature_depends_on_the_salt() {
        let request = fixed_request();
        let basket_json = serialize_basket(&request.basket);
        let other_salt = MerchantCredentials {
            merchant_salt: SecretString::new("another-salt".to_string()),
            ..fixed_credentials()
        };
        assert_ne!(
            build_signature(&other_salt, &request, &basket_json),
            build_signature(&fixed_credentials(), &request, &basket_json),
        );
    }
}
