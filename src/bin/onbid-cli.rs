use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "onbid-cli")]
#[command(about = "Query CLI for the Onbid gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check gateway liveness via the debug ping
    Ping,
    /// Issue a proxied query
    Query {
        /// Operation name; omitted means the gateway's default heuristic
        #[arg(short, long)]
        op: Option<String>,

        /// Pass-through parameters as key=value pairs
        #[arg(value_name = "KEY=VALUE")]
        params: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let endpoint = format!("{}/api/onbid/proxy", cli.url.trim_end_matches('/'));

    match cli.command {
        Commands::Ping => {
            let res = client
                .get(&endpoint)
                .query(&[("ping", "1")])
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Query { op, params } => {
            let mut query: Vec<(String, String)> = Vec::new();
            if let Some(op) = op {
                query.push(("op".to_string(), op));
            }
            for pair in params {
                match pair.split_once('=') {
                    Some((key, value)) => query.push((key.to_string(), value.to_string())),
                    None => {
                        eprintln!("Ignoring malformed parameter (expected key=value): {}", pair);
                    }
                }
            }

            let res = client.get(&endpoint).query(&query).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
