use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
};
use serde::Deserialize;

use crate::{management::SharedSession, spotify, types::Token, warning};

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

pub async fn callback(
    Query(params): Query<CallbackParams>,
    State(shared_session): State<SharedSession>,
) -> (StatusCode, Html<String>) {
    let Some(code) = params.code else {
        warning!(
            "Unauthorized: {}",
            params.error.as_deref().unwrap_or("missing authorization code")
        );
        return unauthorized();
    };

    let settings = {
        let mut session = shared_session.lock().await;
        if !session.accept_state(params.state.as_deref()) {
            warning!("Unauthorized: state mismatch");
            return unauthorized();
        }
        session.settings().clone()
    };

    match spotify::auth::exchange_code(&settings, &code).await {
        Ok(token) => {
            let page = token_page(&token);
            shared_session.lock().await.store_token(token);
            (StatusCode::OK, Html(page))
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            unauthorized()
        }
    }
}

fn unauthorized() -> (StatusCode, Html<String>) {
    (
        StatusCode::UNAUTHORIZED,
        Html("<h4>Unauthorized</h4>".to_string()),
    )
}

fn token_page(token: &Token) -> String {
    // serde_json yields a quoted, escaped JS string literal; `</` must not close the script
    let literal = serde_json::to_string(&token.access_token)
        .unwrap_or_else(|_| "\"\"".into())
        .replace("</", "<\\/");
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <script>
    const accessToken = {literal};
    function copyToClipboard() {{
      navigator.clipboard.writeText(accessToken)
        .catch(err => alert("Failed to copy token: " + err));
    }}
  </script>
</head>
<body>
  <div>
    <pre>{token}</pre>
    <button onclick="copyToClipboard()">Copy Access Token</button>
  </div>
</body>
</html>"#,
        literal = literal,
        token = escape_html(&token.access_token),
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
