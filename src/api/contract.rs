use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequestParts, Path, State},
    Json,
};
use http::{request::Parts, HeaderMap};
use serde::Serialize;

use super::{ApiError, ApiResult, AppState};
use crate::host::{AuthError, PublicCall, ReadOnlyCall, ReadOnlyValue};
use crate::ledger::Principal;

pub const CALLER_HEADER: &str = "x-caller";
pub const CALLER_TOKEN_HEADER: &str = "x-caller-token";

/// Longest metadata URI accepted by `set-token-uri`, in characters.
pub const TOKEN_URI_MAX_LEN: usize = 256;

/// Successful function result, `{"ok": <value>}`.
#[derive(Debug, Serialize)]
pub struct OkResponse<T> {
    pub ok: T,
}

/// Principal on whose behalf the request runs, established from the caller
/// headers.
#[derive(Debug, Clone)]
pub struct AuthenticatedCaller(pub Principal);

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedCaller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let caller = header(&parts.headers, CALLER_HEADER);
        let token = header(&parts.headers, CALLER_TOKEN_HEADER);

        match (caller, token) {
            (Some(caller), Some(token)) => Ok(Self(state.auth.authenticate(caller, token)?)),
            _ => Err(AuthError::MissingCredentials.into()),
        }
    }
}

pub async fn call_public(
    State(state): State<AppState>,
    AuthenticatedCaller(caller): AuthenticatedCaller,
    body: Result<Json<PublicCall>, JsonRejection>,
) -> ApiResult<Json<OkResponse<bool>>> {
    let Json(call) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;

    if let PublicCall::SetTokenUri { value } = &call {
        let len = value.chars().count();
        if len > TOKEN_URI_MAX_LEN {
            return Err(ApiError::bad_request(format!(
                "token URI is {} characters, limit is {}",
                len, TOKEN_URI_MAX_LEN
            )));
        }
    }

    let ok = state.host.call(&caller, call).await?;
    Ok(Json(OkResponse { ok }))
}

async fn read(state: &AppState, query: ReadOnlyCall) -> Json<OkResponse<ReadOnlyValue>> {
    Json(OkResponse {
        ok: state.host.read(query).await,
    })
}

pub async fn get_total_supply(State(state): State<AppState>) -> Json<OkResponse<ReadOnlyValue>> {
    read(&state, ReadOnlyCall::GetTotalSupply).await
}

pub async fn get_name(State(state): State<AppState>) -> Json<OkResponse<ReadOnlyValue>> {
    read(&state, ReadOnlyCall::GetName).await
}

pub async fn get_symbol(State(state): State<AppState>) -> Json<OkResponse<ReadOnlyValue>> {
    read(&state, ReadOnlyCall::GetSymbol).await
}

pub async fn get_decimals(State(state): State<AppState>) -> Json<OkResponse<ReadOnlyValue>> {
    read(&state, ReadOnlyCall::GetDecimals).await
}

pub async fn get_owner(State(state): State<AppState>) -> Json<OkResponse<ReadOnlyValue>> {
    read(&state, ReadOnlyCall::GetOwner).await
}

pub async fn get_token_uri(State(state): State<AppState>) -> Json<OkResponse<ReadOnlyValue>> {
    read(&state, ReadOnlyCall::GetTokenUri).await
}

pub async fn get_balance(
    State(state): State<AppState>,
    Path(holder): Path<String>,
) -> ApiResult<Json<OkResponse<ReadOnlyValue>>> {
    let holder = Principal::new(holder).map_err(|e| ApiError::bad_request(e.to_string()))?;
    Ok(read(&state, ReadOnlyCall::GetBalance(holder)).await)
}
