// ABOUTME: CLI binary for the Instagram media extractor.
// ABOUTME: Extracts from URLs or a saved HTML page and prints the JSON response envelope for each.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use instagrab::{ApiResponse, Client};
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "instagrab")]
#[command(about = "Extract media and captions from Instagram post, reel, and story URLs")]
struct Args {
    /// Pretty-print JSON output
    #[arg(long = "pretty")]
    pretty: bool,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Saved HTML page to extract from (requires --url)
    #[arg(long = "html")]
    html: Option<PathBuf>,

    /// Instagram URL the saved page belongs to (required with --html)
    #[arg(long = "url")]
    url: Option<String>,

    /// Request timeout in seconds
    #[arg(long = "timeout", default_value_t = 30)]
    timeout: u64,

    /// Fetch pages from this origin instead of instagram.com
    #[arg(long = "origin")]
    origin: Option<Url>,

    /// URLs to extract (fetch mode)
    #[arg()]
    urls: Vec<String>,
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("instagrab=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn render(responses: &[ApiResponse], pretty: bool) -> Result<String, serde_json::Error> {
    let mut lines = Vec::with_capacity(responses.len());
    for response in responses {
        let line = if pretty {
            serde_json::to_string_pretty(response)?
        } else {
            serde_json::to_string(response)?
        };
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();

    if args.html.is_some() && args.url.is_none() {
        eprintln!("error: --url is required when using --html");
        return ExitCode::from(1);
    }

    if args.html.is_none() && args.urls.is_empty() {
        eprintln!("error: at least one URL is required, or use --html with --url");
        return ExitCode::from(1);
    }

    if args.html.is_some() && !args.urls.is_empty() {
        eprintln!("error: cannot use both --html and positional URLs");
        return ExitCode::from(1);
    }

    let mut builder = Client::builder().timeout(Duration::from_secs(args.timeout));
    if let Some(origin) = args.origin.clone() {
        builder = builder.upstream_origin(origin);
    }
    let client = builder.build();

    let mut responses: Vec<ApiResponse> = Vec::new();

    match (&args.html, &args.url) {
        (Some(html_path), Some(url)) => match fs::read_to_string(html_path) {
            Ok(html) => responses.push(client.extract_html(&html, url).into()),
            Err(e) => {
                eprintln!("error reading file {:?}: {}", html_path, e);
                return ExitCode::from(1);
            }
        },
        _ => {
            for url in &args.urls {
                let res = client.extract(url).await;
                if let Err(ref e) = res {
                    eprintln!("error extracting {}: {}", url, e);
                }
                responses.push(res.into());
            }
        }
    }

    let had_error = responses.iter().any(|r| !r.success);

    let output = match render(&responses, args.pretty) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error encoding output: {}", e);
            return ExitCode::from(1);
        }
    };

    if let Some(output_path) = &args.output {
        if let Err(e) = fs::write(output_path, &output) {
            eprintln!("error writing to {:?}: {}", output_path, e);
            return ExitCode::from(1);
        }
    } else {
        println!("{}", output);
    }

    if had_error {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
