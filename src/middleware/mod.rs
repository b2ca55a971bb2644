//! HTTP middleware layers.

pub mod access_log;
