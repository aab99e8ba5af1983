//! JSON RPC transport for the procedure set
//!
//! `POST /rpc/{procedure}` takes the input as the JSON body. Queries may also
//! be sent as `GET /rpc/{procedure}?input=<json>`. Responses are wrapped in
//! `{"result":{"data":..}}` or `{"error":{"code","message","issues"}}`.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::Json;
use qna_core::{ErrorCode, Issue, Procedure};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::gateway::GatewayState;
use crate::{GatewayError, Result};

/// Successful call envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcSuccess<T> {
    pub result: RpcData<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcData<T> {
    pub data: T,
}

impl<T> RpcSuccess<T> {
    pub fn new(data: T) -> Self {
        Self {
            result: RpcData { data },
        }
    }
}

/// Failed call envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcFailure {
    pub error: RpcErrorBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcErrorBody {
    pub code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<Issue>,
}

impl RpcFailure {
    pub fn new(code: ErrorCode, message: impl Into<String>, issues: Vec<Issue>) -> Self {
        Self {
            error: RpcErrorBody {
                code,
                message: message.into(),
                issues,
            },
        }
    }
}

impl From<RpcFailure> for GatewayError {
    fn from(failure: RpcFailure) -> Self {
        GatewayError::Rpc {
            code: failure.error.code,
            message: failure.error.message,
            issues: failure.error.issues,
        }
    }
}

/// `?input=` parameter of a GET call
#[derive(Debug, Deserialize)]
pub struct RpcQuery {
    pub input: Option<String>,
}

fn parse_input(raw: &[u8]) -> Result<Value> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(raw).map_err(|e| GatewayError::BadInput(e.to_string()))
}

fn dispatch(state: &GatewayState, procedure: Procedure, input: Value) -> Result<Json<RpcSuccess<Value>>> {
    let data = state.procedures.call(procedure, input)?;
    Ok(Json(RpcSuccess::new(data)))
}

pub(crate) async fn handle_rpc_post(
    State(state): State<Arc<GatewayState>>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<RpcSuccess<Value>>> {
    let procedure: Procedure = name.parse()?;
    let input = parse_input(&body)?;
    tracing::debug!(%procedure, "rpc call");
    dispatch(&state, procedure, input)
}

pub(crate) async fn handle_rpc_get(
    State(state): State<Arc<GatewayState>>,
    Path(name): Path<String>,
    Query(query): Query<RpcQuery>,
) -> Result<Json<RpcSuccess<Value>>> {
    let procedure: Procedure = name.parse()?;
    if !procedure.is_query() {
        return Err(GatewayError::MethodNotSupported(name));
    }
    let input = parse_input(query.input.as_deref().unwrap_or_default().as_bytes())?;
    tracing::debug!(%procedure, "rpc query");
    dispatch(&state, procedure, input)
}
