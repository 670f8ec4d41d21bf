//! Outbound mail delivery.

pub mod email;
