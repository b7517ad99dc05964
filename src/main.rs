use accident_etl::domain::ports::ConfigProvider;
use accident_etl::utils::{logger, validation::Validate};
use accident_etl::{AccidentPipeline, CliConfig, EtlEngine, EtlError, LocalStorage, Settings};
use clap::{CommandFactory, Parser};

fn main() {
    let cli = match CliConfig::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                e.exit()
            }
            _ => {
                let _ = e.print();
                std::process::exit(1);
            }
        },
    };

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    if let Err(e) = run(cli) {
        fail(&e);
    }
}

fn run(cli: CliConfig) -> Result<(), EtlError> {
    tracing::info!("Starting accident-etl");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let file_config = cli.load_file_config()?;
    if let Some(path) = &cli.config {
        tracing::info!("📁 Loaded configuration from: {}", path);
    }

    let Some(input) = cli.resolve_input(file_config.as_ref()) else {
        eprintln!("{}", CliConfig::command().render_usage());
        std::process::exit(1);
    };

    let dry_run = cli.dry_run;
    let settings = cli.into_settings(input, file_config.as_ref())?;

    // 驗證配置
    settings.validate()?;
    display_config_summary(&settings, dry_run);

    let storage = LocalStorage::new(settings.output_path.clone());
    let monitor_enabled = settings.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }
    let pipeline = AccidentPipeline::new(storage, settings);

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - No reports will be written");
        return perform_dry_run(&pipeline);
    }

    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);
    let summary = engine.run()?;

    println!(
        "✅ Analysis complete: {} of {} rows accepted ({} batches skipped, {} malformed rows)",
        summary.rows_accepted, summary.rows_read, summary.batches_skipped, summary.rows_malformed
    );
    for artifact in &summary.artifacts {
        println!("📁 {}", artifact.display());
    }

    Ok(())
}

fn fail(e: &EtlError) -> ! {
    tracing::error!(
        "❌ Analysis failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 依錯誤嚴重程度決定結束碼
    std::process::exit(e.exit_code());
}

fn display_config_summary(settings: &Settings, dry_run: bool) {
    println!("📋 Configuration Summary:");
    println!("  Input: {}", settings.input_path());
    println!("  Output: {}", settings.output_path());
    println!("  Batch Size: {}", settings.batch_size());
    println!("  Delimiter: {:?}", settings.delimiter() as char);
    println!(
        "  Schema: positions {:?}, requires {} columns, policy {}",
        settings.schema().positions(),
        settings.schema().required_width(),
        settings.schema_policy()
    );
    let reporters: Vec<String> = settings.reporters().iter().map(|r| r.to_string()).collect();
    println!("  Reporters: {}", reporters.join(", "));

    if dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(pipeline: &AccidentPipeline<LocalStorage, Settings>) -> Result<(), EtlError> {
    println!("🔍 Dry Run Analysis:");

    let schema = pipeline.config().schema();
    match pipeline.preview()? {
        Some(batch) => {
            println!("  First batch: {} rows, {} columns", batch.len(), batch.width);
            if schema.fits(batch.width) {
                println!("  ✅ Schema fits ({} columns required)", schema.required_width());
            } else {
                println!(
                    "  ⚠️ Schema needs {} columns, input has {}; batches would be {}",
                    schema.required_width(),
                    batch.width,
                    match pipeline.config().schema_policy() {
                        accident_etl::SchemaPolicy::Skip => "skipped",
                        accident_etl::SchemaPolicy::Strict => "rejected",
                    }
                );
            }
        }
        None => println!("  ⚠️ Input contains no readable rows"),
    }

    println!();
    println!("✅ Dry run analysis complete.");
    Ok(())
}
