use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;

use crate::api::state::AppState;
use crate::application::services::DEFAULT_SESSION_ID;
use crate::domain::DomainError;

#[derive(Debug, Deserialize)]
pub struct ChatForm {
    pub msg: String,
    pub session_id: Option<String>,
}

pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../../static/index.html"))
}

/// Accepts the chat form, runs the pipeline and returns the answer as
/// plain text. Failures get a distinct status code with a textual body;
/// the empty string passes through to the pipeline unchanged.
pub async fn get_response(State(state): State<AppState>, Form(form): Form<ChatForm>) -> Response {
    let session_id = form
        .session_id
        .unwrap_or_else(|| DEFAULT_SESSION_ID.to_string());

    match state.pipeline.invoke(&form.msg, &session_id).await {
        Ok(answer) => (StatusCode::OK, answer).into_response(),
        Err(e) => {
            tracing::error!(error = %e, session_id = %session_id, "pipeline invocation failed");
            (status_for(&e), format!("Error processing request: {e}")).into_response()
        }
    }
}

fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::BackendUnavailable(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
