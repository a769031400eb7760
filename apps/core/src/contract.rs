use serde::{Deserialize, Serialize};

/// Stable identity of a result across the query → context → action round
/// trip. Start time must still match before any action touches the pid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContextPayload {
    pub pid: u32,
    pub start_time: u64,
    pub match_path: String,
}

/// Deferred action handed to the host. Carries only primitive data so it can
/// cross the serialization boundary and be dispatched later.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "method", content = "parameters", rename_all = "snake_case")]
pub enum ActionToken {
    Copy { text: String },
    OpenWorkingDirectory { path: String },
    TerminateProcess { pid: u32, start_time: u64 },
    KillProcess { pid: u32, start_time: u64 },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultDto {
    pub title: String,
    pub subtitle: String,
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionToken>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ContextPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryRequest {
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContextRequest {
    pub context: ContextPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionRequest {
    pub token: ActionToken,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryResponse {
    pub results: Vec<ResultDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContextResponse {
    pub results: Vec<ResultDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionResponse {
    pub performed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum CoreRequest {
    Query(QueryRequest),
    Context(ContextRequest),
    Action(ActionRequest),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum CoreResponse {
    Query(QueryResponse),
    Context(ContextResponse),
    Action(ActionResponse),
}
