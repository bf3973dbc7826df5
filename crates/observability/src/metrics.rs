//! Swing analysis metrics
//!
//! Records `SwingAnalysis` outputs through the `metrics` facade and keeps
//! in-memory batch statistics.

use std::collections::BTreeMap;

use contracts::SwingAnalysis;
use metrics::{counter, gauge, histogram};
use serde::Serialize;

/// Record metrics for one completed analysis
///
/// # Example
///
/// ```ignore
/// use observability::metrics::record_analysis_metrics;
///
/// let analysis = analyzer.analyze(&built)?;
/// record_analysis_metrics(&analysis);
/// ```
pub fn record_analysis_metrics(analysis: &SwingAnalysis) {
    counter!("swing_analyzer_analyses_total").increment(1);
    counter!("swing_analyzer_frames_analyzed_total").increment(analysis.frame_count as u64);

    histogram!("swing_analyzer_tempo_ratio").record(analysis.segmentation.tempo_ratio);
    histogram!("swing_analyzer_shoulder_turn_deg")
        .record(analysis.segmentation.rotation.shoulder_turn);
    histogram!("swing_analyzer_hip_turn_deg").record(analysis.segmentation.rotation.hip_turn);
    histogram!("swing_analyzer_clubhead_peak_velocity")
        .record(analysis.clubhead_metrics.max_velocity);
    histogram!("swing_analyzer_path_consistency").record(analysis.path.path_consistency);

    counter!(
        "swing_analyzer_path_class_total",
        "class" => analysis.path.classification()
    )
    .increment(1);

    let diagnostics = &analysis.diagnostics;
    gauge!("swing_analyzer_missing_landmarks").set(diagnostics.missing_landmarks as f64);
    gauge!("swing_analyzer_low_confidence_landmarks")
        .set(diagnostics.low_confidence_landmarks as f64);
    gauge!("swing_analyzer_degenerate_intervals").set(diagnostics.degenerate_intervals as f64);
}

/// Record a failed analysis by error kind
pub fn record_analysis_failure(reason: &'static str) {
    counter!(
        "swing_analyzer_analysis_failures_total",
        "reason" => reason
    )
    .increment(1);
}

/// Batch aggregator
///
/// Aggregates analyses in memory for summary output.
#[derive(Debug, Clone, Default)]
pub struct AnalysisMetricsAggregator {
    /// Successful analyses
    pub total_swings: u64,

    /// Failed analyses
    pub failed_swings: u64,

    /// Total analyzed frames
    pub total_frames: u64,

    /// Swings with at least one recovered anomaly
    pub swings_with_gaps: u64,

    pub tempo_stats: RunningStats,
    pub shoulder_turn_stats: RunningStats,
    pub hip_turn_stats: RunningStats,
    pub peak_velocity_stats: RunningStats,
    pub consistency_stats: RunningStats,

    /// Path classification counts
    pub path_counts: BTreeMap<String, u64>,

    /// Failure counts by error kind
    pub failure_counts: BTreeMap<String, u64>,
}

impl AnalysisMetricsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one analysis into the batch statistics
    pub fn update(&mut self, analysis: &SwingAnalysis) {
        self.total_swings += 1;
        self.total_frames += analysis.frame_count as u64;
        if !analysis.diagnostics.is_clean() {
            self.swings_with_gaps += 1;
        }

        let segmentation = &analysis.segmentation;
        self.tempo_stats.push(segmentation.tempo_ratio);
        self.shoulder_turn_stats
            .push(segmentation.rotation.shoulder_turn);
        self.hip_turn_stats.push(segmentation.rotation.hip_turn);
        self.peak_velocity_stats
            .push(analysis.clubhead_metrics.max_velocity);
        self.consistency_stats.push(analysis.path.path_consistency);

        *self
            .path_counts
            .entry(analysis.path.classification().to_string())
            .or_insert(0) += 1;
    }

    /// Count a failed analysis
    pub fn record_failure(&mut self, reason: &str) {
        self.failed_swings += 1;
        *self.failure_counts.entry(reason.to_string()).or_insert(0) += 1;
    }

    /// Generate summary report
    pub fn summary(&self) -> MetricsSummary {
        let attempted = self.total_swings + self.failed_swings;
        MetricsSummary {
            total_swings: self.total_swings,
            failed_swings: self.failed_swings,
            total_frames: self.total_frames,
            swings_with_gaps: self.swings_with_gaps,
            failure_rate: if attempted > 0 {
                self.failed_swings as f64 / attempted as f64 * 100.0
            } else {
                0.0
            },
            tempo_ratio: StatsSummary::from(&self.tempo_stats),
            shoulder_turn_deg: StatsSummary::from(&self.shoulder_turn_stats),
            hip_turn_deg: StatsSummary::from(&self.hip_turn_stats),
            peak_velocity: StatsSummary::from(&self.peak_velocity_stats),
            path_consistency: StatsSummary::from(&self.consistency_stats),
            path_counts: self.path_counts.clone(),
            failure_counts: self.failure_counts.clone(),
        }
    }

    /// Reset statistics
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Batch summary
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricsSummary {
    pub total_swings: u64,
    pub failed_swings: u64,
    pub total_frames: u64,
    pub swings_with_gaps: u64,
    pub failure_rate: f64,
    pub tempo_ratio: StatsSummary,
    pub shoulder_turn_deg: StatsSummary,
    pub hip_turn_deg: StatsSummary,
    pub peak_velocity: StatsSummary,
    pub path_consistency: StatsSummary,
    pub path_counts: BTreeMap<String, u64>,
    pub failure_counts: BTreeMap<String, u64>,
}

impl std::fmt::Display for MetricsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Swing Batch Summary ===")?;
        writeln!(f, "Swings analyzed: {}", self.total_swings)?;
        writeln!(
            f,
            "Failed: {} ({:.2}%)",
            self.failed_swings, self.failure_rate
        )?;
        writeln!(f, "Frames analyzed: {}", self.total_frames)?;
        writeln!(f, "Swings with landmark gaps: {}", self.swings_with_gaps)?;
        writeln!(f, "Tempo ratio: {}", self.tempo_ratio)?;
        writeln!(f, "Shoulder turn (deg): {}", self.shoulder_turn_deg)?;
        writeln!(f, "Hip turn (deg): {}", self.hip_turn_deg)?;
        writeln!(f, "Clubhead peak velocity: {}", self.peak_velocity)?;
        writeln!(f, "Path consistency: {}", self.path_consistency)?;

        if !self.path_counts.is_empty() {
            writeln!(f, "Path classes:")?;
            for (class, count) in &self.path_counts {
                writeln!(f, "  {}: {}", class, count)?;
            }
        }
        if !self.failure_counts.is_empty() {
            writeln!(f, "Failures:")?;
            for (reason, count) in &self.failure_counts {
                writeln!(f, "  {}: {}", reason, count)?;
            }
        }

        Ok(())
    }
}

/// Statistics summary
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3}, max={:.3}, mean={:.3}, std={:.3} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// Online statistics (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            self.m2 += delta * (value - self.mean);
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// Sample variance
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{
        AnalysisDiagnostics, KeyMoments, PhaseSegmentation, RotationMetrics, SwingPathAnalysis,
        SwingTrajectory, TrajectoryMetrics, VelocityProfile,
    };

    fn analysis(tempo_ratio: f64, missing_landmarks: usize) -> SwingAnalysis {
        SwingAnalysis {
            frame_count: 60,
            trajectory: SwingTrajectory::default(),
            segmentation: PhaseSegmentation {
                phases: Vec::new(),
                impact_frame: 42,
                top_frame: 33,
                tempo_ratio,
                rotation: RotationMetrics {
                    shoulder_turn: 45.0,
                    hip_turn: 20.0,
                },
            },
            clubhead_metrics: TrajectoryMetrics {
                max_velocity: 0.004,
                ..Default::default()
            },
            wrist_metrics: TrajectoryMetrics::default(),
            velocity_profile: VelocityProfile::default(),
            path: SwingPathAnalysis {
                on_plane: true,
                path_consistency: 0.8,
                ..Default::default()
            },
            key_moments: KeyMoments::default(),
            diagnostics: AnalysisDiagnostics {
                missing_landmarks,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_running_stats() {
        let mut stats = RunningStats::default();
        for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
            stats.push(v);
        }

        assert_eq!(stats.count(), 5);
        assert!((stats.mean() - 3.0).abs() < 1e-10);
        assert!((stats.min() - 1.0).abs() < 1e-10);
        assert!((stats.max() - 5.0).abs() < 1e-10);
        assert!((stats.variance() - 2.5).abs() < 1e-10);
    }

    #[test]
    fn test_aggregator_update() {
        let mut aggregator = AnalysisMetricsAggregator::new();
        aggregator.update(&analysis(3.0, 0));
        aggregator.update(&analysis(2.0, 4));
        aggregator.record_failure("insufficient_data");

        let summary = aggregator.summary();
        assert_eq!(summary.total_swings, 2);
        assert_eq!(summary.failed_swings, 1);
        assert_eq!(summary.total_frames, 120);
        assert_eq!(summary.swings_with_gaps, 1);
        assert!((summary.tempo_ratio.mean - 2.5).abs() < 1e-10);
        assert_eq!(summary.failure_counts.get("insufficient_data"), Some(&1));
        assert!((summary.failure_rate - 100.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_summary_display() {
        let mut aggregator = AnalysisMetricsAggregator::new();
        aggregator.update(&analysis(3.0, 0));
        let output = aggregator.summary().to_string();
        assert!(output.contains("Swings analyzed: 1"));
        assert!(output.contains("Tempo ratio: min=3.000"));
        assert!(output.contains("Path classes:"));
    }

    #[test]
    fn test_empty_summary() {
        let summary = AnalysisMetricsAggregator::new().summary();
        assert_eq!(summary.failure_rate, 0.0);
        assert_eq!(summary.tempo_ratio.to_string(), "N/A");
    }
}
