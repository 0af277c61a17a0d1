//! PayTR payment gateway adapter.

mod client;

pub use client::PaytrGateway;
