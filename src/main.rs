use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use medcrm_core::config::{flag_from_env_value, id_scheme_from_env_value};
use medcrm_core::constants::{ID_SCHEME_ENV, SEED_DEMO_DATA_ENV};
use medcrm_core::{CalendarState, CoreConfig, CrmStore};
use medcrm_tools::{Bridge, ToolResponse, Toolkit, mount_calendar, mount_store};

/// Print the tool catalogue before serving calls.
const PRINT_CATALOGUE_ENV: &str = "MEDCRM_PRINT_CATALOGUE";

/// One request line: `{"tool": "addPatient", "args": {...}}`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ToolCall {
    tool: String,
    #[serde(default)]
    args: Value,
}

/// Main entry point for the MedCRM tool host
///
/// Seeds the in-memory store, mounts the store and calendar onto a bridge and then serves tool
/// calls: one JSON request per stdin line, one JSON response per stdout line. Logs go to stderr.
///
/// # Environment Variables
/// - `MEDCRM_SEED_DEMO_DATA`: load the demo data set (default: true)
/// - `MEDCRM_ID_SCHEME`: `sequential` (default) or `uuid`
/// - `MEDCRM_PRINT_CATALOGUE`: print the tool catalogue as the first output line (default: false)
/// - `RUST_LOG`: tracing filter
///
/// # Returns
/// * `Ok(())` - When stdin is closed
/// * `Err(anyhow::Error)` - If configuration is invalid or stdout cannot be written
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("medcrm=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cfg = Arc::new(CoreConfig::new(
        flag_from_env_value(std::env::var(SEED_DEMO_DATA_ENV).ok(), true)?,
        id_scheme_from_env_value(std::env::var(ID_SCHEME_ENV).ok())?,
    ));
    let print_catalogue = flag_from_env_value(std::env::var(PRINT_CATALOGUE_ENV).ok(), false)?;

    tracing::info!(
        seed_demo_data = cfg.seed_demo_data(),
        id_scheme = %cfg.id_scheme(),
        "++ Starting MedCRM tool host"
    );

    let store = CrmStore::new(cfg).into_shared();
    let calendar = CalendarState::new(chrono::Local::now().date_naive()).into_shared();

    let bridge = Bridge::new();
    let _store_mount = mount_store(&bridge, store);
    let _calendar_mount = mount_calendar(&bridge, calendar);
    let toolkit = Toolkit::new(bridge);

    let mut stdout = tokio::io::stdout();
    if print_catalogue {
        write_line(&mut stdout, &serde_json::to_value(toolkit.definitions())?).await?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let response = handle_line(&toolkit, line);
        write_line(&mut stdout, &response.to_json()).await?;
    }

    tracing::info!("stdin closed, shutting down");
    Ok(())
}

/// Runs one request line. Malformed requests become failure responses.
fn handle_line(toolkit: &Toolkit, line: &str) -> ToolResponse {
    match serde_json::from_str::<ToolCall>(line) {
        Ok(call) => toolkit.call(&call.tool, call.args),
        Err(e) => {
            tracing::warn!(error = %e, "malformed request line");
            ToolResponse::failure(format!("malformed request: {e}"))
        }
    }
}

async fn write_line(stdout: &mut Stdout, value: &Value) -> anyhow::Result<()> {
    let mut buf = serde_json::to_vec(value)?;
    buf.push(b'\n');
    stdout.write_all(&buf).await?;
    stdout.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn toolkit_with_store() -> (Toolkit, medcrm_tools::StoreMount) {
        let bridge = Bridge::new();
        let store = CrmStore::new(Arc::new(CoreConfig::default())).into_shared();
        let mount = mount_store(&bridge, store);
        (Toolkit::new(bridge), mount)
    }

    #[test]
    fn test_handle_line_dispatches_tool_call() {
        let (toolkit, _mount) = toolkit_with_store();
        let resp = handle_line(&toolkit, r#"{"tool": "listStaff"}"#);
        assert!(resp.success());
        assert_eq!(resp.get("staff").and_then(Value::as_array).map(Vec::len), Some(6));
    }

    #[test]
    fn test_handle_line_reports_malformed_json() {
        let (toolkit, _mount) = toolkit_with_store();
        let resp = handle_line(&toolkit, "{not json");
        assert!(!resp.success());
        assert!(resp.error().is_some_and(|e| e.starts_with("malformed request")));
    }

    #[test]
    fn test_handle_line_passes_args_through() {
        let (toolkit, _mount) = toolkit_with_store();
        let line = json!({"tool": "deleteStaffMember", "args": {"id": "S006"}}).to_string();
        let resp = handle_line(&toolkit, &line);
        assert_eq!(resp.get("staffMember").map(|m| &m["name"]), Some(&json!("Nurse Joy")));
    }
}
