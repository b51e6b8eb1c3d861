//! Async client for the Shinobi video-surveillance REST API.
//!
//! Endpoint methods on [`ShinobiClient`] return the raw response body;
//! [`models`] offers an optional typed view of the monitor and video listings.

pub mod client;
pub mod config;
pub mod models;
pub mod shinobi;

pub use client::{ApiError, DEFAULT_TIMEOUT, HttpClient};
pub use config::{Camera, ConfigError, ShinobiConfig};
pub use models::{Monitor, Video, VideoList, decode};
pub use shinobi::{MotionEvent, MotionOutcome, ShinobiClient};
