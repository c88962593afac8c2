//! Gantt replay: run a scripted pointer scenario through the interaction
//! engine and print the resulting state as JSON.
//!
//! ```text
//! gt-replay scenarios/link_and_drag.json
//! RUST_LOG=gt_editor=trace gt-replay scenario.json
//! ```

mod scenario;

use scenario::Scenario;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: gt-replay <scenario.json>");
        return ExitCode::from(2);
    };

    match replay(&path) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{path}: {e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn replay(path: &str) -> Result<String, String> {
    let text = std::fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}"))?;
    let snapshot = Scenario::from_json(&text)?.run()?;
    serde_json::to_string_pretty(&snapshot).map_err(|e| format!("cannot encode snapshot: {e}"))
}
