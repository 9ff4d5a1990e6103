//! Agent Factory HTTP surface: resource handlers, error mapping, and state.

pub mod http;
pub mod service;

mod ids;
