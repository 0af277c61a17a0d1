//! HTTP handlers for account endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::adapters::http::error::error_response;
use crate::adapters::http::middleware::RequireAuth;
use crate::domain::user::Address;
use crate::services::auth::{ProfileUpdate, RegisterRequest as RegisterInput};
use crate::services::AuthService;

use super::dto::{
    AuthResponse, LoginRequest, OkResponse, ProfileResponse, RegisterRequest, UpdateUserRequest,
};

#[derive(Clone)]
pub struct UsersState {
    pub auth: Arc<AuthService>,
}

/// POST /api/users/register
pub async fn register(
    State(state): State<UsersState>,
    Json(req): Json<RegisterRequest>,
) -> Response {
    let address = fold_address(&req);
    let input = RegisterInput {
        email: req.email,
        password: req.password,
        name: req.name,
        phone: req.phone,
        address,
    };

    match state.auth.register(input).await {
        Ok(success) => (
            StatusCode::CREATED,
            Json(AuthResponse {
                success: true,
                token: success.token,
                user: success.user,
            }),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

/// POST /api/users/login
pub async fn login(State(state): State<UsersState>, Json(req): Json<LoginRequest>) -> Response {
    match state.auth.login(&req.email, &req.password).await {
        Ok(success) => Json(AuthResponse {
            success: true,
            token: success.token,
            user: success.user,
        })
        .into_response(),
        Err(err) => error_response(err),
    }
}

/// GET /api/users/profile
pub async fn profile(State(state): State<UsersState>, RequireAuth(claims): RequireAuth) -> Response {
    match state.auth.profile(&claims).await {
        Ok(user) => Json(ProfileResponse {
            success: true,
            user,
        })
        .into_response(),
        Err(err) => error_response(err),
    }
}

/// PUT /api/users
pub async fn update(
    State(state): State<UsersState>,
    RequireAuth(claims): RequireAuth,
    Json(req): Json<UpdateUserRequest>,
) -> Response {
    let update = ProfileUpdate {
        name: req.name,
        favorites: req.favorites,
        addresses: req.addresses,
        orders: req.orders,
        password: req.password,
    };

    match state.auth.update(&claims, update).await {
        Ok(()) => Json(OkResponse::ok()).into_response(),
        Err(err) => error_response(err),
    }
}

/// Fold the flattened registration address fields into one saved address.
fn fold_address(req: &RegisterRequest) -> Option<Address> {
    let content = req.address.as_deref().unwrap_or("").trim();
    let city = req.city.as_deref().unwrap_or("").trim();
    if content.is_empty() && city.is_empty() {
        return None;
    }
    Some(Address {
        id: Uuid::new_v4().to_string(),
        title: "Ev".to_string(),
        city: city.to_string(),
        district: req.district.as_deref().unwrap_or("").trim().to_string(),
        content: content.to_string(),
        zip_code: req.zip_code.as_deref().unwrap_or("").trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_request() -> RegisterRequest {
        RegisterRequest {
            email: "a@b.com".to_string(),
            password: "secret".to_string(),
            name: "Ayşe".to_string(),
            phone: None,
            address: None,
            city: None,
            district: None,
            zip_code: None,
        }
    }

    #[test]
    fn no_address_fields_fold_to_none() {
        assert!(fold_address(&bare_request()).is_none());
    }

    #[test]
    fn flattened_fields_fold_to_one_address() {
        let request = RegisterRequest {
            address: Some("Atatürk Cad. No:1".to_string()),
            city: Some("İstanbul".to_string()),
            district: Some("Kadıköy".to_string()),
            zip_code: Some("34710".to_string()),
            ..bare_request()
        };
        let address = fold_address(&request).unwrap();
        assert_eq!(address.city, "İstanbul");
        assert_eq!(address.content, "Atatürk Cad. No:1");
        assert!(!address.id.is_empty());
    }

    #[test]
    fn city_alone_still_folds() {
        let request = RegisterRequest {
            city: Some("Ankara".to_string()),
            ..bare_request()
        };
        assert!(fold_address(&request).is_some());
    }
}
