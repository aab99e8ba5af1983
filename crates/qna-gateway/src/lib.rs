//! QnA Gateway - HTTP surface for the question/answer procedures
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                     QnA Gateway                      │
//! ├──────────────────────────────────────────────────────┤
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────┐  │
//! │  │  UI pages    │   │  /rpc/{name} │   │ /health  │  │
//! │  │  (forms)     │   │  JSON RPC    │   │ /status  │  │
//! │  └──────┬───────┘   └──────┬───────┘   └──────────┘  │
//! │         │                  │                         │
//! │         └────────┬─────────┘                         │
//! │                  │                                   │
//! │       ┌──────────▼──────────┐                        │
//! │       │  qna_core           │                        │
//! │       │  Procedures + store │                        │
//! │       └─────────────────────┘                        │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! # Features
//!
//! - **RPC**: every `questions.*` procedure over `POST /rpc/{name}`, queries over GET too
//! - **UI**: server-rendered pages that refetch after every successful mutation
//! - **Client**: [`RpcClient`] speaks the same RPC to a remote gateway

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod rpc;
pub mod ui;

pub use api::QuestionsApi;
pub use client::RpcClient;
pub use config::GatewayConfig;
pub use error::{GatewayError, Result};
pub use gateway::{Gateway, GatewayState};

/// Gateway version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 18790;

/// Default host
pub const DEFAULT_HOST: &str = "127.0.0.1";
