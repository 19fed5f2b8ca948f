use anyhow::Context;
use attendance_etl::domain::ports::ConfigProvider;
use attendance_etl::utils::{logger, validation::Validate};
use attendance_etl::{
    build_source, AttendancePipeline, CliConfig, EtlEngine, EtlError, LocalStorage, RunSummary,
    SourceSpec, TomlConfig,
};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse().resolve_report_date();

    let toml_config = match &cli.config {
        Some(path) => Some(
            TomlConfig::from_file(path)
                .with_context(|| format!("Failed to load config file '{}'", path))?,
        ),
        None => None,
    };

    let json_logs = cli.json_logs || toml_config.as_ref().is_some_and(|c| c.json_logs());
    logger::init_logger(cli.verbose, json_logs);

    tracing::info!("Starting attendance-etl");

    let outcome = match toml_config {
        Some(config) => {
            tracing::info!("Using configuration from {}", cli.config.as_deref().unwrap_or(""));
            let source = config.source.clone();
            run(config, &source).await
        }
        None => match cli.source_spec() {
            Ok(source) => run(cli, &source).await,
            Err(e) => Err(e),
        },
    };

    match outcome {
        Ok(summary) => {
            tracing::info!(
                "✅ Report completed: {} records, {} without working hours",
                summary.records,
                summary.incomplete_records
            );
            for path in &summary.output_paths {
                println!("📁 Output saved to: {}", path);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ Attendance report failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(e.severity().exit_code());
        }
    }
}

async fn run<C>(config: C, source: &SourceSpec) -> Result<RunSummary, EtlError>
where
    C: ConfigProvider + Validate,
{
    config.validate()?;
    tracing::debug!(
        "Report date {}, output path {}",
        config.report_date(),
        config.output_path()
    );

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = AttendancePipeline::new(build_source(source), storage, config);

    EtlEngine::new(pipeline).run().await
}
