use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Smoke-test client for the race gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Shared app secret sent as x-app-token.
    #[arg(short, long, env = "APP_TOKEN", default_value = "")]
    token: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check gateway liveness
    Health,
    /// Fetch normalized odds for a meeting date
    Prices {
        /// Meeting date, YYYY-MM-DD
        #[arg(short, long)]
        date: String,
        /// Only rows for this venue
        #[arg(long)]
        track: Option<String>,
        /// Only rows for this race
        #[arg(long)]
        race: Option<i64>,
    },
    /// Send one prompt to an assistant
    Chat {
        #[arg(short, long)]
        assistant: String,
        #[arg(short, long)]
        prompt: String,
        #[arg(long)]
        project: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let mut headers = HeaderMap::new();
    if !cli.token.is_empty() {
        headers.insert("x-app-token", HeaderValue::from_str(&cli.token)?);
    }

    let res = match cli.command {
        Commands::Health => client.get(format!("{}/health", base)).send().await?,
        Commands::Prices { date, track, race } => {
            client
                .post(format!("{}/odds/prices", base))
                .headers(headers)
                .json(&json!({ "date": date, "track": track, "raceNumber": race }))
                .send()
                .await?
        }
        Commands::Chat { assistant, prompt, project } => {
            client
                .post(format!("{}/ai/chat", base))
                .headers(headers)
                .json(&json!({ "assistantId": assistant, "projectId": project, "prompt": prompt }))
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if !text.is_empty() {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
