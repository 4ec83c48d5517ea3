use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "route-cli")]
#[command(about = "Command-line client for the campus routing service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Request routes between two locations
    Route {
        /// Start: building id, `{"latitude":..,"longitude":..}` or `{"x":..,"y":..}`
        #[arg(long)]
        from: String,
        /// End: building id, GPS object, or a street address
        #[arg(long)]
        to: String,
        #[arg(long, default_value = "walking")]
        mode: String,
    },
    /// Show popup details for a building
    Info { id: i64 },
    /// Check service liveness
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Route { from, to, mode } => {
            let body = json!({
                "start_location": location_arg(&from),
                "end_location": location_arg(&to),
                "mode": mode,
            });
            let res = client.post(format!("{}/api/route/", base)).json(&body).send().await?;
            print_response(res).await?;
        }
        Commands::Info { id } => {
            let res = client.get(format!("{}/api/buildings/{}/info", base, id)).send().await?;
            print_response(res).await?;
        }
        Commands::Health => {
            let res = client.get(format!("{}/health", base)).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

/// JSON literals (ids, objects) pass through; anything else is an address.
fn location_arg(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(value @ (Value::Number(_) | Value::Object(_))) => value,
        _ => Value::String(raw.to_string()),
    }
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => {
            let pretty = serde_json::to_string_pretty(&json)?;
            if status.is_success() {
                println!("{}", pretty);
            } else {
                eprintln!("Error: service returned status {}", status);
                eprintln!("{}", pretty);
            }
        }
        Err(_) => {
            eprintln!("Error: service returned status {}", status);
            eprintln!("Response: {}", text);
        }
    }
    Ok(())
}
