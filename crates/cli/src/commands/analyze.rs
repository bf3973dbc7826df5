//! `analyze` command implementation.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use config_loader::ConfigLoader;
use contracts::SwingAnalysis;
use ingestion::{load_pose_sequence, IngestionMetrics, TrajectoryBuilder};
use swing_engine::SwingAnalyzer;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::cli::AnalyzeArgs;
use crate::error::CliError;
use crate::report::{BatchReport, FailureReport, SwingReport};

type Outcome = (usize, PathBuf, Result<SwingAnalysis, CliError>);

/// Execute the `analyze` command
pub async fn run_analyze(args: &AnalyzeArgs) -> Result<()> {
    let analyzer = Arc::new(SwingAnalyzer::new(load_config(args)?));

    if let Some(port) = args.metrics_port {
        observability::init_metrics_only(port)
            .with_context(|| format!("Failed to expose metrics on port {port}"))?;
    }

    info!(files = args.files.len(), "Analyzing swings");

    let ingest_metrics = Arc::new(IngestionMetrics::new());
    let started = Instant::now();

    let mut workers = JoinSet::new();
    for (index, path) in args.files.iter().cloned().enumerate() {
        let analyzer = analyzer.clone();
        let metrics = ingest_metrics.clone();
        workers.spawn_blocking(move || {
            let result = analyze_file(&analyzer, &path, metrics);
            (index, path, result)
        });
    }

    let mut outcomes: Vec<Outcome> = Vec::with_capacity(args.files.len());
    let mut worker_errors = Vec::new();
    tokio::select! {
        () = collect(&mut workers, &mut outcomes, &mut worker_errors) => {}
        () = crate::shutdown_signal() => {
            warn!(completed = outcomes.len(), "Received shutdown signal, abandoning remaining files");
            workers.abort_all();
        }
    }
    outcomes.sort_by_key(|(index, _, _)| *index);

    let mut report = BatchReport {
        ingestion: ingest_metrics.snapshot(),
        duration: started.elapsed(),
        ..Default::default()
    };
    for (_, path, result) in outcomes {
        match result {
            Ok(analysis) => {
                report.aggregator.update(&analysis);
                report
                    .swings
                    .push(SwingReport::new(&path, analysis, args.full));
            }
            Err(e) => {
                warn!(file = %path.display(), error = %e, "Swing analysis failed");
                report.aggregator.record_failure(e.kind());
                report.failures.push(FailureReport {
                    file: path.display().to_string(),
                    reason: e.kind(),
                    error: e.to_string(),
                });
            }
        }
    }
    for e in worker_errors {
        report.aggregator.record_failure(e.kind());
        report.failures.push(FailureReport {
            file: "<unknown>".to_string(),
            reason: e.kind(),
            error: e.to_string(),
        });
    }

    info!(
        analyzed = report.swings.len(),
        failed = report.failures.len(),
        duration_secs = report.duration.as_secs_f64(),
        "Analysis finished"
    );

    if args.json {
        let json = report.to_json().context("Failed to serialize analysis report")?;
        println!("{}", json);
    } else {
        report.print_summary();
    }

    if report.failures.is_empty() && report.swings.len() == args.files.len() {
        Ok(())
    } else {
        anyhow::bail!(
            "{} of {} swings could not be analyzed",
            args.files.len() - report.swings.len(),
            args.files.len()
        )
    }
}

/// Effective configuration: file (or defaults) plus CLI overrides
fn load_config(args: &AnalyzeArgs) -> Result<contracts::AnalysisConfig> {
    if let Some(path) = &args.config {
        if !path.exists() {
            return Err(CliError::config_not_found(path.display().to_string()).into());
        }
    }

    let mut config = ConfigLoader::load_or_default(args.config.as_deref())
        .context("Failed to load analysis configuration")?;

    if args.smooth {
        config.kinematics.smooth_input = true;
    }
    if let Some(window) = args.smoothing_window {
        info!(window, "Overriding smoothing window from CLI");
        config.kinematics.smoothing_window = window;
    }
    ConfigLoader::validate(&config).context("Invalid configuration after CLI overrides")?;

    debug!(?config, "Effective configuration");
    Ok(config)
}

async fn collect(
    workers: &mut JoinSet<Outcome>,
    outcomes: &mut Vec<Outcome>,
    worker_errors: &mut Vec<CliError>,
) {
    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => {
                warn!(error = %e, "Analysis worker failed");
                worker_errors.push(CliError::worker(e.to_string()));
            }
        }
    }
}

/// Load, build and analyze one pose file. Runs on a blocking worker.
fn analyze_file(
    analyzer: &SwingAnalyzer,
    path: &Path,
    metrics: Arc<IngestionMetrics>,
) -> Result<SwingAnalysis, CliError> {
    let ingestion_error = |source| CliError::Ingestion {
        path: path.to_path_buf(),
        source,
    };

    let sequence = load_pose_sequence(path).map_err(|e| {
        metrics.record_rejected();
        ingestion_error(e)
    })?;
    let built = TrajectoryBuilder::new(&analyzer.config().ingestion)
        .with_metrics(metrics)
        .build(&sequence.frames)
        .map_err(ingestion_error)?;

    analyzer.analyze(&built).map_err(|source| CliError::Analysis {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ingestion::SyntheticSwing;
    use std::io::Write;

    fn write_swing(dir: &Path, name: &str, frames: usize) -> PathBuf {
        let path = dir.join(name);
        let json = serde_json::to_string(&SyntheticSwing::standard(frames).sequence()).unwrap();
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_analyze_file_ok() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_swing(dir.path(), "swing.json", 60);
        let metrics = Arc::new(IngestionMetrics::new());

        let analysis = analyze_file(&SwingAnalyzer::default(), &path, metrics.clone()).unwrap();
        assert_eq!(analysis.frame_count, 60);
        assert_eq!(metrics.snapshot().sequences_built, 1);
    }

    #[test]
    fn test_analyze_file_too_short() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_swing(dir.path(), "short.json", 5);
        let err = analyze_file(
            &SwingAnalyzer::default(),
            &path,
            Arc::new(IngestionMetrics::new()),
        )
        .unwrap_err();
        assert_eq!(err.kind(), "insufficient_data");
    }

    #[test]
    fn test_analyze_file_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let metrics = Arc::new(IngestionMetrics::new());
        let err = analyze_file(&SwingAnalyzer::default(), file.path(), metrics.clone()).unwrap_err();
        assert_eq!(err.kind(), "pose_parse");
        assert_eq!(metrics.snapshot().sequences_rejected, 1);
    }

    #[tokio::test]
    async fn test_run_analyze_mixed_batch() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_swing(dir.path(), "good.json", 60);
        let short = write_swing(dir.path(), "short.json", 4);

        let args = AnalyzeArgs {
            files: vec![good, short],
            config: None,
            json: true,
            full: false,
            smooth: false,
            smoothing_window: None,
            metrics_port: None,
        };
        let err = run_analyze(&args).await.unwrap_err();
        assert!(err.to_string().contains("1 of 2 swings"));
    }

    #[test]
    fn test_override_window_is_validated() {
        let args = AnalyzeArgs {
            files: vec![PathBuf::from("x.json")],
            config: None,
            json: false,
            full: false,
            smooth: true,
            smoothing_window: Some(0),
            metrics_port: None,
        };
        assert!(load_config(&args).is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let args = AnalyzeArgs {
            files: vec![PathBuf::from("x.json")],
            config: Some(PathBuf::from("/nonexistent/swing.toml")),
            json: false,
            full: false,
            smooth: false,
            smoothing_window: None,
            metrics_port: None,
        };
        let err = load_config(&args).unwrap_err();
        assert!(err.to_string().contains("Configuration file not found"));
    }
}
