use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use routemap::server::{all_resources, all_tools, dispatch, AppContext, ServerInfo, Snapshot};

#[derive(Parser, Debug)]
#[command(name = "routemap")]
#[command(about = "API endpoint discovery and analysis for AI-assisted development", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve tools over stdio, one JSON request per line
    Serve {
        /// Application snapshot (routes + type model) to analyze
        snapshot: PathBuf,
    },
    /// Invoke a single tool and print its response
    Call {
        /// Application snapshot (routes + type model) to analyze
        snapshot: PathBuf,

        /// Tool name (e.g. list_api_routes, analyze_endpoint)
        tool: String,

        /// Tool parameters as a JSON object
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// List available tools and resources with their schemas
    Tools,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { snapshot } => {
            let ctx = Snapshot::load(&snapshot)?.into_context();
            serve(&ctx)
        }
        Commands::Call {
            snapshot,
            tool,
            params,
        } => {
            let ctx = Snapshot::load(&snapshot)?.into_context();
            let params: Value = serde_json::from_str(&params)?;
            let response = dispatch(&ctx, &tool, &params);
            println!("{}", serde_json::to_string_pretty(&response.into_json())?);
            Ok(())
        }
        Commands::Tools => print_roster(),
    }
}

/// Line-oriented stdio loop: each request is `{"tool": name, "params": {..}}`
/// or `{"resource": name, "params": {..}}`; each response is one envelope
/// line.
fn serve(ctx: &AppContext) -> Result<()> {
    let info = ServerInfo::default();
    log::info!("{} {} ready", info.name, info.version);

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = handle_line(ctx, &line);
        serde_json::to_writer(&mut stdout, &response)?;
        writeln!(stdout)?;
        stdout.flush()?;
    }

    Ok(())
}

fn handle_line(ctx: &AppContext, line: &str) -> Value {
    let request: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(err) => return json!({ "ok": false, "error": format!("Invalid request: {err}") }),
    };
    let params = request.get("params").cloned().unwrap_or_else(|| json!({}));

    if let Some(tool) = request.get("tool").and_then(Value::as_str) {
        return dispatch(ctx, tool, &params).into_json();
    }

    if let Some(name) = request.get("resource").and_then(Value::as_str) {
        for resource in all_resources() {
            if resource.name() == name {
                return resource.handle(ctx, &params).into_json();
            }
        }
        return json!({ "ok": false, "error": format!("Unknown resource '{name}'.") });
    }

    json!({ "ok": false, "error": "Request must name a 'tool' or a 'resource'." })
}

fn print_roster() -> Result<()> {
    let info = ServerInfo::default();
    let roster = json!({
        "server": info,
        "tools": all_tools().iter().map(|tool| json!({
            "name": tool.name(),
            "description": tool.description(),
            "schema": tool.schema(),
        })).collect::<Vec<_>>(),
        "resources": all_resources().iter().map(|resource| json!({
            "name": resource.name(),
            "description": resource.description(),
            "uri_template": resource.uri_template(),
        })).collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&roster)?);
    Ok(())
}
