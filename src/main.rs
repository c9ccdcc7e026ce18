use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use jarscan::{
    cache::Cache,
    checker::{PackageScanner, SnykClient},
    config::Config,
    credentials::load_token,
    identify::Identifier,
    inputs::collect_archives,
    model::{ArchiveAnalysisResult, Severity},
    output::{print_summary, write_json, write_pom},
    search::MavenCentralClient,
    Analyzer,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Exit codes for CI integration
mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const ERROR: u8 = 1;
    pub const CRITICAL_VULN: u8 = 2;
    pub const HIGH_VULN: u8 = 3;
    pub const MEDIUM_VULN: u8 = 4;
    pub const LOW_VULN: u8 = 5;
}

#[derive(Parser, Debug)]
#[command(name = "jarscan")]
#[command(
    author,
    version,
    about = "Identify the Maven packages inside Java archives and test them for vulnerabilities"
)]
struct Cli {
    /// Path to Java jar(s) to test, a directory, or . for jars in the current directory
    #[arg(value_name = "/path/to/package.jar", required = true)]
    jar_paths: Vec<String>,

    /// Snyk organization id. Uses the account's default org if not set
    #[arg(long = "org-id", alias = "orgId")]
    org_id: Option<String>,

    /// Save results to this file in JSON format
    #[arg(long = "json-output", alias = "jsonOutput", value_name = "FILE")]
    json_output: Option<PathBuf>,

    /// Write a pom.xml declaring every identified package. Disables scanning
    #[arg(long = "output-pom", alias = "outputPom", value_name = "FILE")]
    output_pom: Option<PathBuf>,

    /// Credential file holding the API token
    #[arg(long, value_name = "FILE")]
    token_file: Option<PathBuf>,

    /// Identify packages only, skip vulnerability scanning
    #[arg(long)]
    no_scan: bool,

    /// Don't read or write cached search results
    #[arg(long)]
    no_cache: bool,

    /// Clear cached search results before running
    #[arg(long)]
    clear_cache: bool,

    /// Exit with error if vulnerabilities at or above this severity are found
    #[arg(long, value_enum)]
    fail_on: Option<FailLevel>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Scanning is skipped when asked to, or when a pom is requested since
    /// that file is meant for external tooling.
    fn scan_enabled(&self) -> bool {
        !self.no_scan && self.output_pom.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FailLevel {
    Critical,
    High,
    Medium,
    Low,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let outcome = match Config::load() {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("jarscan=debug,info")
        } else {
            EnvFilter::new("jarscan=info,warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli, config: Config) -> Result<u8> {
    let cache = Cache::with_ttl_hours(config.cache_ttl_hours);
    if cli.clear_cache {
        cache.clear()?;
        info!("Cache cleared");
    }

    let scanner = if cli.scan_enabled() {
        let token_path = cli
            .token_file
            .clone()
            .unwrap_or_else(|| config.resolved_token_path());
        let token = load_token(&token_path)?;

        let org_id = cli.org_id.clone().or_else(|| config.org_id.clone());
        let client = SnykClient::new(&token, org_id)?.with_api_url(&config.api_url);

        if !client.is_token_valid().await? {
            eprintln!("Invalid Snyk token in {}", token_path.display());
            eprintln!("Run `snyk auth` to refresh it.");
            return Ok(exit_codes::ERROR);
        }
        Some(client)
    } else {
        info!("Vulnerability scanning disabled for this run");
        None
    };

    let archives = collect_archives(&cli.jar_paths)?;
    if archives.is_empty() {
        warn!("No archives to analyze");
    }

    let mut search = MavenCentralClient::new(&config.search_url)?.with_rows(config.search_rows);
    if config.use_cache && !cli.no_cache {
        search = search.with_cache(cache);
    }
    let identifier = Identifier::standard(Arc::new(search));

    let analyzer = Analyzer::new(
        &identifier,
        scanner.as_ref().map(|s| s as &dyn PackageScanner),
    );
    let results = analyzer.analyze_all(&archives).await?;

    if let Some(path) = &cli.json_output {
        write_json(&results, path)?;
        println!("Results written to: {}", path.display());
    }

    if let Some(path) = &cli.output_pom {
        write_pom(&results, path)
            .with_context(|| format!("Failed to generate {}", path.display()))?;
        println!("pom.xml written to: {}", path.display());
    }

    print_summary(&results, analyzer.scans());
    println!("\ndone");

    Ok(determine_exit_code(&results, cli.fail_on))
}

/// Determine the exit code based on vulnerabilities found and --fail-on setting
fn determine_exit_code(results: &[ArchiveAnalysisResult], fail_on: Option<FailLevel>) -> u8 {
    let fail_on = match fail_on {
        Some(level) => level,
        None => return exit_codes::SUCCESS,
    };

    let worst = results
        .iter()
        .flat_map(|r| r.vulnerability_severities())
        .filter_map(severity_rank)
        .min();

    let threshold = match fail_on {
        FailLevel::Critical => 0,
        FailLevel::High => 1,
        FailLevel::Medium => 2,
        FailLevel::Low => 3,
    };

    match worst {
        Some(rank) if rank <= threshold => match rank {
            0 => exit_codes::CRITICAL_VULN,
            1 => exit_codes::HIGH_VULN,
            2 => exit_codes::MEDIUM_VULN,
            _ => exit_codes::LOW_VULN,
        },
        _ => exit_codes::SUCCESS,
    }
}

fn severity_rank(severity: Severity) -> Option<u8> {
    match severity {
        Severity::Critical => Some(0),
        Severity::High => Some(1),
        Severity::Medium => Some(2),
        Severity::Low => Some(3),
        Severity::Unknown => None,
    }
}
