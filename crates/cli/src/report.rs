//! Per-swing and batch reports for the `analyze` command.

use std::path::Path;
use std::time::Duration;

use contracts::{AnalysisDiagnostics, KeyMoments, PhaseName, SwingAnalysis};
use ingestion::MetricsSnapshot;
use observability::{AnalysisMetricsAggregator, MetricsSummary};
use serde::Serialize;

/// Condensed view of one analyzed swing
#[derive(Debug, Serialize)]
pub struct SwingReport {
    pub file: String,
    pub frames: usize,
    pub impact_frame: usize,
    pub top_frame: usize,
    pub tempo_ratio: f64,
    pub shoulder_turn_deg: f64,
    pub hip_turn_deg: f64,
    pub x_factor_deg: f64,
    pub peak_velocity: f64,
    pub smoothness: f64,
    pub swing_plane_deg: f64,
    pub path_consistency: f64,
    pub path: &'static str,
    pub phases: Vec<PhaseReport>,
    pub key_moments: KeyMoments,
    pub diagnostics: AnalysisDiagnostics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<SwingAnalysis>,
}

#[derive(Debug, Serialize)]
pub struct PhaseReport {
    pub name: PhaseName,
    pub start_frame: usize,
    pub end_frame: usize,
    pub duration_ms: f64,
}

impl SwingReport {
    pub fn new(path: &Path, analysis: SwingAnalysis, full: bool) -> Self {
        let seg = &analysis.segmentation;
        Self {
            file: path.display().to_string(),
            frames: analysis.frame_count,
            impact_frame: seg.impact_frame,
            top_frame: seg.top_frame,
            tempo_ratio: seg.tempo_ratio,
            shoulder_turn_deg: seg.rotation.shoulder_turn,
            hip_turn_deg: seg.rotation.hip_turn,
            x_factor_deg: seg.rotation.x_factor(),
            peak_velocity: analysis.clubhead_metrics.max_velocity,
            smoothness: analysis.clubhead_metrics.smoothness,
            swing_plane_deg: analysis.path.swing_plane,
            path_consistency: analysis.path.path_consistency,
            path: analysis.path.classification(),
            phases: seg
                .phases
                .iter()
                .map(|p| PhaseReport {
                    name: p.name,
                    start_frame: p.start_frame,
                    end_frame: p.end_frame,
                    duration_ms: p.duration,
                })
                .collect(),
            key_moments: analysis.key_moments,
            diagnostics: analysis.diagnostics,
            analysis: full.then_some(analysis),
        }
    }

    pub fn print(&self) {
        println!("\n{}", self.file);
        println!("   ├─ Frames: {}", self.frames);
        println!(
            "   ├─ Impact: frame {} | Top: frame {}",
            self.impact_frame, self.top_frame
        );
        println!("   ├─ Tempo ratio: {:.2}", self.tempo_ratio);
        println!(
            "   ├─ Rotation: shoulders {:.1}°, hips {:.1}°, X-factor {:.1}°",
            self.shoulder_turn_deg, self.hip_turn_deg, self.x_factor_deg
        );
        println!(
            "   ├─ Clubhead: peak {:.5}/ms, smoothness {:.3}",
            self.peak_velocity, self.smoothness
        );
        println!(
            "   ├─ Path: {} (plane {:.1}°, consistency {:.3})",
            self.path, self.swing_plane_deg, self.path_consistency
        );
        for phase in &self.phases {
            println!(
                "   │   {:<15} {:>4} → {:<4} {:>8.1} ms",
                phase.name.to_string(),
                phase.start_frame,
                phase.end_frame,
                phase.duration_ms
            );
        }
        let km = &self.key_moments;
        println!(
            "   ├─ Key moments: takeaway {}, top {}, impact {}, finish {}",
            km.takeaway, km.top, km.impact, km.finish
        );
        let d = &self.diagnostics;
        if d.is_clean() {
            println!("   └─ Diagnostics: clean");
        } else {
            println!(
                "   └─ Diagnostics: {} missing, {} low-confidence landmarks, {} zero-length intervals",
                d.missing_landmarks, d.low_confidence_landmarks, d.degenerate_intervals
            );
        }
    }
}

/// Failed input
#[derive(Debug, Serialize)]
pub struct FailureReport {
    pub file: String,
    pub reason: &'static str,
    pub error: String,
}

/// Everything the `analyze` command produced
#[derive(Debug, Default)]
pub struct BatchReport {
    pub swings: Vec<SwingReport>,
    pub failures: Vec<FailureReport>,
    pub aggregator: AnalysisMetricsAggregator,
    pub ingestion: MetricsSnapshot,
    pub duration: Duration,
}

#[derive(Serialize)]
struct BatchJson<'a> {
    swings: &'a [SwingReport],
    failures: &'a [FailureReport],
    summary: MetricsSummary,
    duration_ms: f64,
}

impl BatchReport {
    /// Swings analyzed per second
    pub fn throughput(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            self.swings.len() as f64 / secs
        } else {
            0.0
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&BatchJson {
            swings: &self.swings,
            failures: &self.failures,
            summary: self.aggregator.summary(),
            duration_ms: self.duration.as_secs_f64() * 1000.0,
        })
    }

    pub fn print_summary(&self) {
        for swing in &self.swings {
            swing.print();
        }
        for failure in &self.failures {
            println!("\n✗ {} [{}]", failure.error, failure.reason);
        }

        println!("\n{}", self.aggregator.summary());
        println!(
            "Frames ingested: {} ({} missing, {} low-confidence landmarks)",
            self.ingestion.frames_ingested,
            self.ingestion.missing_landmarks,
            self.ingestion.low_confidence_landmarks
        );
        println!(
            "Duration: {:.3}s ({:.1} swings/s)",
            self.duration.as_secs_f64(),
            self.throughput()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ingestion::SyntheticSwing;
    use swing_engine::SwingAnalyzer;

    fn analysis() -> SwingAnalysis {
        SwingAnalyzer::default()
            .analyze_frames(&SyntheticSwing::standard(60).generate())
            .unwrap()
    }

    #[test]
    fn test_swing_report_condenses_analysis() {
        let report = SwingReport::new(Path::new("swing.json"), analysis(), false);
        assert_eq!(report.frames, 60);
        assert_eq!(report.phases.len(), 5);
        assert!(report.analysis.is_none());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["file"], "swing.json");
        assert_eq!(json["phases"][4]["name"], "follow_through");
        assert!(json.get("analysis").is_none());
    }

    #[test]
    fn test_full_report_embeds_analysis() {
        let report = SwingReport::new(Path::new("swing.json"), analysis(), true);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["analysis"]["frame_count"], 60);
    }

    #[test]
    fn test_batch_json_shape() {
        let mut batch = BatchReport::default();
        let a = analysis();
        batch.aggregator.update(&a);
        batch.swings.push(SwingReport::new(Path::new("a.json"), a, false));
        batch.failures.push(FailureReport {
            file: "b.json".into(),
            reason: "insufficient_data",
            error: "b.json: insufficient data".into(),
        });

        let json: serde_json::Value = serde_json::from_str(&batch.to_json().unwrap()).unwrap();
        assert_eq!(json["swings"].as_array().map(Vec::len), Some(1));
        assert_eq!(json["failures"][0]["reason"], "insufficient_data");
        assert_eq!(json["summary"]["total_swings"], 1);
    }

    #[test]
    fn test_throughput_without_duration() {
        assert_eq!(BatchReport::default().throughput(), 0.0);
    }
}
