//! HTTP handlers for order endpoints.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::error_response;
use crate::adapters::http::middleware::{OptionalAuth, RequireAdmin, RequireAuth};
use crate::domain::user::Role;
use crate::services::orders::CreateOrder;
use crate::services::OrderService;

use super::dto::{
    CreateOrderRequest, ListOrdersQuery, OrderDataResponse, OrderListResponse, TrackOrderRequest,
    TrackedOrderResponse, UpdateOrderRequest,
};

#[derive(Clone)]
pub struct OrdersState {
    pub orders: Arc<OrderService>,
}

/// GET /api/orders?userId=
///
/// Admins may list everything or filter by any user; customers always get
/// their own orders regardless of the query.
pub async fn list_orders(
    State(state): State<OrdersState>,
    RequireAuth(claims): RequireAuth,
    Query(query): Query<ListOrdersQuery>,
) -> Response {
    let user_id = match claims.role {
        Role::Admin => query.user_id,
        Role::Customer => Some(claims.user_id),
    };

    match state.orders.list(user_id.as_deref()).await {
        Ok(orders) => Json(OrderListResponse {
            success: true,
            data: orders.into_iter().map(Into::into).collect(),
        })
        .into_response(),
        Err(err) => error_response(err),
    }
}

/// POST /api/orders
///
/// Guest checkout is allowed; an authenticated caller gets the order linked
/// to their account.
pub async fn create_order(
    State(state): State<OrdersState>,
    OptionalAuth(claims): OptionalAuth,
    Json(req): Json<CreateOrderRequest>,
) -> Response {
    let request = CreateOrder {
        user_id: claims.map(|c| c.user_id),
        customer_name: req.customer_name,
        customer_email: req.customer_email,
        items: req.items,
        amount: req.amount,
        order_no: req.order_no,
        status: req.status,
    };

    match state.orders.create(request).await {
        Ok(order) => (
            StatusCode::CREATED,
            Json(OrderDataResponse {
                success: true,
                data: order.into(),
            }),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

/// PUT /api/orders
pub async fn update_order(
    State(state): State<OrdersState>,
    RequireAdmin(_claims): RequireAdmin,
    Json(req): Json<UpdateOrderRequest>,
) -> Response {
    match state
        .orders
        .update_status(&req.order_id, &req.status, req.tracking_number)
        .await
    {
        Ok(order) => Json(OrderDataResponse {
            success: true,
            data: order.into(),
        })
        .into_response(),
        Err(err) => error_response(err),
    }
}

/// POST /api/orders/track (public)
pub async fn track_order(
    State(state): State<OrdersState>,
    Json(req): Json<TrackOrderRequest>,
) -> Response {
    match state.orders.track(&req.order_no).await {
        Ok(tracked) => Json(TrackedOrderResponse {
            success: true,
            data: tracked,
        })
        .into_response(),
        Err(err) => error_response(err),
    }
}
