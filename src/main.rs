use clap::{Parser, Subcommand};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use fincalc::core::registry::CALCULATORS;

#[derive(Parser, Debug)]
#[command(
    name = "fincalc",
    version,
    about = "Indian personal-finance calculators"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available calculators
    List,
    /// Evaluate one calculator from a JSON payload
    Calc {
        /// Calculator slug, for example `emi` or `nps`
        slug: String,
        /// JSON object with camelCase fields; omitted fields use defaults
        json: Option<String>,
        #[arg(long, help = "Pretty-print the JSON result")]
        pretty: bool,
    },
    /// Serve the calculators over HTTP
    Serve {
        #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
        host: IpAddr,
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

fn calc(slug: &str, json: Option<&str>, pretty: bool) -> fincalc::Result<String> {
    let value = fincalc::api::evaluate_json(slug, json.unwrap_or(""))?;
    let text = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(text)
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::List => {
            for info in CALCULATORS {
                println!("{:<8} {:<38} {}", info.slug, info.title, info.description);
            }
        }
        Command::Calc { slug, json, pretty } => match calc(&slug, json.as_deref(), pretty) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        },
        Command::Serve { host, port } => {
            let addr = SocketAddr::new(host, port);
            if let Err(e) = fincalc::api::run_http_server(addr).await {
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
        }
    }
}
