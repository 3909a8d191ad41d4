#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod map_view;
pub mod menu;
pub mod model;
pub mod restaurant_filter;
pub mod session;
pub mod session_store;
pub mod test_util;
pub mod ui;
