use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use solver_core::families::builtin_registry;
use solver_core::{rewrite_script, solve, QuickButton};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

mod config;

use config::ServerConfig;

/// Format a solver error as a JSON message for the frontend
fn format_error(code: &str, message: &str, severity: &str) -> String {
    format!("ERROR_UPDATE:{}", json!({
        "code": code,
        "message": message,
        "severity": severity
    }))
}

#[derive(Debug, Deserialize)]
struct SolveRequest {
    script: String,
}

#[derive(Debug, Deserialize)]
struct RewriteRequest {
    script: String,
    button: QuickButton,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env()?;
    info!("Loaded {} families", builtin_registry().names().len());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("listening on {}", config.bind_addr);
    axum::serve(listener, app()).await?;
    Ok(())
}

fn app() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/families", get(families))
        .route("/solve", post(solve_script))
        .route("/rewrite", post(rewrite))
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
}

fn banner() -> String {
    format!("Hello from Solver Backend! (solver-core v{})", solver_core::version())
}

async fn root() -> String {
    banner()
}

async fn families() -> Json<Vec<&'static str>> {
    Json(builtin_registry().names())
}

async fn solve_script(Json(request): Json<SolveRequest>) -> Response {
    info!("Solving: {}", request.script);
    match solve(&request.script) {
        Ok(steps) => Json(json!({ "steps": steps })).into_response(),
        Err(e) => {
            warn!("Solve failed: {}", e);
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

async fn rewrite(Json(request): Json<RewriteRequest>) -> Json<serde_json::Value> {
    let script = rewrite_script(&request.script, &request.button);
    info!("Rewrote session via \"{}\": {}", request.button.text, script);
    Json(json!({ "script": script }))
}

async fn ws_handler(ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(handle_socket)
}

async fn handle_socket(mut socket: WebSocket) {
    info!("Client connected");

    while let Some(msg) = socket.recv().await {
        let msg = if let Ok(msg) = msg {
            msg
        } else {
            return;
        };

        if let Message::Text(text) = msg {
            info!("Received message: {}", text);
            let reply = handle_command(&text);
            if socket.send(Message::Text(reply)).await.is_err() {
                return;
            }
        }
    }

    info!("Client disconnected");
}

/// Answer one text command from the WebSocket protocol.
///
/// `SOLVE:<script>` replies `STEPS_UPDATE:<steps json>`.
/// `REWRITE:{"script": ..., "button": ...}` replies `SCRIPT_UPDATE:<script>`.
fn handle_command(text: &str) -> String {
    if let Some(script) = text.strip_prefix("SOLVE:") {
        match solve(script) {
            Ok(steps) => {
                let json = serde_json::to_string(&steps).unwrap_or("[]".into());
                info!("Sent STEPS_UPDATE with {} steps", steps.len());
                format!("STEPS_UPDATE:{}", json)
            }
            Err(e) => {
                warn!("Solve failed: {}", e);
                format_error("SOLVE_FAILED", &format!("Solve failed: {}", e), "error")
            }
        }
    } else if let Some(json_str) = text.strip_prefix("REWRITE:") {
        match serde_json::from_str::<RewriteRequest>(json_str) {
            Ok(cmd) => format!("SCRIPT_UPDATE:{}", rewrite_script(&cmd.script, &cmd.button)),
            Err(e) => {
                warn!("Failed to parse REWRITE command: {}", json_str);
                format_error("BAD_COMMAND", &format!("Invalid REWRITE payload: {}", e), "warning")
            }
        }
    } else {
        warn!("Unknown command: {}", text);
        format_error("UNKNOWN_COMMAND", &format!("Unknown command: {}", text), "warning")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(reply: &str, prefix: &str) -> serde_json::Value {
        let body = reply.strip_prefix(prefix).expect("reply prefix");
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_banner_reports_core_version() {
        let text = banner();
        assert!(text.starts_with("Hello from Solver Backend!"));
        assert!(text.contains(solver_core::version()));
    }

    #[test]
    fn test_solve_command() {
        let reply = handle_command("SOLVE:!slopes xi=0 yi=0 xf=4 yf=8");
        let steps = payload(&reply, "STEPS_UPDATE:");
        assert_eq!(steps[0]["kind"], "solved");
        assert_eq!(steps[0]["unknown"]["name"], "Dx");
    }

    #[test]
    fn test_rewrite_command() {
        let request = json!({
            "script": "!kinematics t=1",
            "button": { "text": "Disable implicit variables", "hints": ["no-implicit"] }
        });
        let reply = handle_command(&format!("REWRITE:{}", request));
        assert_eq!(reply, "SCRIPT_UPDATE:!kinematics @no-implicit t=1");
    }

    #[test]
    fn test_bad_rewrite_payload() {
        let reply = handle_command("REWRITE:{not json");
        let error = payload(&reply, "ERROR_UPDATE:");
        assert_eq!(error["code"], "BAD_COMMAND");
    }

    #[test]
    fn test_unknown_command() {
        let reply = handle_command("REGEN");
        let error = payload(&reply, "ERROR_UPDATE:");
        assert_eq!(error["code"], "UNKNOWN_COMMAND");
        assert_eq!(error["severity"], "warning");
    }
}
