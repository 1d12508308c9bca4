use aibom_tools::adapters::outbound::console::StderrProgressReporter;
use aibom_tools::adapters::outbound::filesystem::{FileAibomSource, FileSystemReader};
use aibom_tools::adapters::outbound::network::SnykAibomClient;
use aibom_tools::aibom_aggregation::domain::TypeFilter;
use aibom_tools::application::dto::{OutputFormat, ScanRequest, DEFAULT_CONCURRENCY};
use aibom_tools::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use aibom_tools::application::read_models::{ReportReadModel, ReportReadModelBuilder};
use aibom_tools::application::use_cases::RunScanUseCase;
use aibom_tools::cli::{Cli, Command, ScanArgs};
use aibom_tools::config::{
    discover_config, load_config_from_path, validate_concurrency, ApiConfig, ConfigFile,
    CONFIG_FILENAME,
};
use aibom_tools::ports::outbound::PolicyReader;
use aibom_tools::shared::error::ExitCode;
use aibom_tools::shared::Result;
use owo_colors::OwoColorize;
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Existing environment variables always win over .env entries
    dotenvy::dotenv().ok();

    // clap exits with code 2 on invalid arguments
    let cli = Cli::parse_args();
    init_tracing(cli.global.debug);

    match run(cli).await {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

/// `RUST_LOG` overrides; otherwise `debug` with `--debug` and `warn` without
fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let Command::Scan(scan) = cli.command;

    let file_config = load_file_config(cli.global.config.as_deref())?;

    let api_config = ApiConfig::resolve(
        cli.global.api_token,
        cli.global.org_id,
        cli.global.group_id,
        cli.global.api_url,
        cli.global.debug,
        &file_config,
    );
    tracing::debug!(
        api_url = %api_config.api_url,
        org_id = ?api_config.org_id,
        group_id = ?api_config.group_id,
        "resolved API configuration"
    );

    // Every fatal input error surfaces here, before any target is fetched
    let settings = ScanSettings::resolve(&scan, &file_config)?;
    let request = settings.request;

    let progress_reporter = StderrProgressReporter::new();
    let response = match &scan.input {
        Some(path) => {
            let source = FileAibomSource::load(path)?;
            RunScanUseCase::new(source, progress_reporter)
                .execute(request)
                .await?
        }
        None => {
            let client = SnykAibomClient::new(
                &api_config.api_url,
                api_config.api_token()?,
                api_config.scope()?,
            )?;
            RunScanUseCase::new(client, progress_reporter)
                .execute(request)
                .await?
        }
    };

    let model = ReportReadModelBuilder::build(&response);

    let summary = FormatterFactory::create(OutputFormat::ConsoleSummary).format(&model)?;
    eprint!("{}", summary);

    // A grouping key switches the JSON report to the grouped shape
    let json_format = if settings.grouped_json {
        OutputFormat::GroupedJson
    } else {
        OutputFormat::LegacyJson
    };
    if scan.output.is_some() || scan.html.is_none() {
        write_report(
            json_format,
            &model,
            PresenterType::from_path(scan.output.clone()),
        )?;
    }
    if let Some(html_path) = &scan.html {
        write_report(OutputFormat::Html, &model, PresenterType::File(html_path.clone()))?;
    }

    if settings.fail_on_violation && response.has_violations() {
        eprintln!(
            "\n{}",
            format!(
                "🚫 {} forbidden model(s) found, failing as requested",
                response.outcome.summary.violation_count
            )
            .bold()
            .red()
        );
        return Ok(ExitCode::PolicyViolationsDetected);
    }

    Ok(ExitCode::Success)
}

/// Explicit `--config` path, else `aibom-tools.config.yml` in the working directory
fn load_file_config(explicit: Option<&Path>) -> Result<ConfigFile> {
    if let Some(path) = explicit {
        let config = load_config_from_path(path)?;
        eprintln!("📄 Loaded config from: {}", path.display());
        return Ok(config);
    }

    match discover_config(Path::new("."))? {
        Some(config) => {
            eprintln!("📄 Auto-discovered config file: {}", CONFIG_FILENAME);
            Ok(config)
        }
        None => Ok(ConfigFile::default()),
    }
}

/// Scan options after merging flags over the config file
#[derive(Debug)]
struct ScanSettings {
    request: ScanRequest,
    grouped_json: bool,
    fail_on_violation: bool,
}

impl ScanSettings {
    fn resolve(scan: &ScanArgs, file: &ConfigFile) -> Result<Self> {
        let type_filter = match &scan.include {
            Some(list) => Some(TypeFilter::parse(list)?),
            None => file.type_filter()?,
        };

        let group_by = match scan.group_by {
            Some(group_by) => Some(group_by),
            None => file.group_by()?,
        };

        let policy = match scan.policy.as_ref().or(file.policy.as_ref()) {
            Some(path) => Some(FileSystemReader::new().load_policy(path)?),
            None => None,
        };

        let concurrency = match scan.concurrency {
            Some(n) => validate_concurrency(usize::try_from(n)?)?,
            None => match file.concurrency {
                Some(n) => validate_concurrency(n)?,
                None => DEFAULT_CONCURRENCY,
            },
        };

        let fail_on_empty = scan.fail_on_empty || file.fail_on_empty.unwrap_or(false);

        let request = ScanRequest::new(group_by.unwrap_or_default())
            .with_policy(policy)
            .with_type_filter(type_filter)
            .with_concurrency(concurrency)
            .with_fail_on_empty(fail_on_empty);

        Ok(Self {
            request,
            grouped_json: group_by.is_some(),
            fail_on_violation: scan.fail_on_violation
                || file.fail_on_violation.unwrap_or(false),
        })
    }
}

fn write_report(
    format: OutputFormat,
    model: &ReportReadModel,
    destination: PresenterType,
) -> Result<()> {
    eprintln!("{}", FormatterFactory::progress_message(format));
    let formatted_output = FormatterFactory::create(format).format(model)?;
    PresenterFactory::create(destination).present(&formatted_output)
}
