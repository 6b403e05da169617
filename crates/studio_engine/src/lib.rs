//! Studio engine: API configuration, HTTP IO, and effect execution.
mod client;
mod config;
mod engine;
mod resources;
mod types;

pub use client::{
    ApiCall, HttpClient, HttpMethod, Payload, RawResponse, ReqwestTransport, Transport, UploadFile,
};
pub use config::{ApiConfig, BASE_URL_ENV, DEFAULT_BASE_URL, ORIGIN_ENV};
pub use engine::EngineHandle;
pub use resources::ResourceClients;
pub use types::{ApiError, EngineEvent};
