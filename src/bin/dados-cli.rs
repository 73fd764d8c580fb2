use clap::{Parser, Subcommand};
use reqwest::StatusCode;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "dados-cli")]
#[command(about = "Query a running dados-api server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the server is up
    Status,
    /// Lightweight connectivity check on the data endpoint
    Ping,
    /// Fetch and print the table rows
    Fetch,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Status => {
            let res = client.get(format!("{}/", base)).send().await?;
            let status = res.status();
            println!("{} {}", status, res.text().await?);
            exit_on_failure(status);
        }
        Commands::Ping => {
            let res = client.head(format!("{}/api/dados", base)).send().await?;
            println!("{}", res.status());
            exit_on_failure(res.status());
        }
        Commands::Fetch => {
            let res = client.get(format!("{}/api/dados", base)).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

fn exit_on_failure(status: StatusCode) {
    if !status.is_success() {
        std::process::exit(1);
    }
}
