//! Shopfront - e-commerce storefront service layer
//!
//! Accounts, orders with public tracking, admin-managed settings documents,
//! hosted-payment token issuance and transactional email, exposed as a
//! JSON/HTTP API over Postgres.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;
