//! Travel information API: countries, attractions, foods, culture and more,
//! looked up by loosely written country names.

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod resolver;
pub mod server;
pub mod services;
pub mod storage;

pub use error::{GuideError, Result};
