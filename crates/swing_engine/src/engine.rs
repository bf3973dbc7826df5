//! Swing analyzer facade.

use contracts::{
    AnalysisConfig, AnalysisDiagnostics, AnalysisError, PoseFrame, SwingAnalysis, SwingTrajectory,
};
use ingestion::{BuiltTrajectory, TrajectoryBuilder};
use tracing::{debug, instrument, warn};

use crate::kinematics::{
    analyze_trajectory, create_velocity_profile, degenerate_intervals, smooth_trajectory,
};
use crate::moments::find_key_moments;
use crate::path::analyze_swing_path;
use crate::phases::segment_phases;

/// Runs the full analysis of one swing.
///
/// Holds only immutable configuration, so one analyzer can serve
/// concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct SwingAnalyzer {
    config: AnalysisConfig,
}

impl SwingAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Build trajectories from raw pose frames and analyze them.
    pub fn analyze_frames(&self, frames: &[PoseFrame]) -> Result<SwingAnalysis, AnalysisError> {
        let built = TrajectoryBuilder::new(&self.config.ingestion)
            .build(frames)
            .map_err(|e| {
                let err = AnalysisError::from(e);
                observability::record_analysis_failure(err.kind());
                err
            })?;
        self.analyze(&built)
    }

    /// Analyze a built trajectory, carrying its landmark counts into the diagnostics.
    pub fn analyze(&self, built: &BuiltTrajectory) -> Result<SwingAnalysis, AnalysisError> {
        let mut analysis = self.evaluate(&built.trajectory)?;
        analysis.diagnostics.missing_landmarks = built.missing_landmarks;
        analysis.diagnostics.low_confidence_landmarks = built.low_confidence_landmarks;

        observability::record_analysis_metrics(&analysis);
        Ok(analysis)
    }

    /// Analyze a swing trajectory.
    ///
    /// # Errors
    /// `InsufficientData` below the minimum frame count. All other anomalies
    /// degrade to defined values and are counted in the diagnostics.
    pub fn analyze_swing(
        &self,
        trajectory: &SwingTrajectory,
    ) -> Result<SwingAnalysis, AnalysisError> {
        let analysis = self.evaluate(trajectory)?;
        observability::record_analysis_metrics(&analysis);
        Ok(analysis)
    }

    /// Runs every stage; failures are recorded here, successes by the caller.
    #[instrument(
        level = "debug",
        name = "swing_analyzer.analyze",
        skip(self, trajectory),
        fields(frames = trajectory.frame_count())
    )]
    fn evaluate(&self, trajectory: &SwingTrajectory) -> Result<SwingAnalysis, AnalysisError> {
        let kinematics = &self.config.kinematics;
        let trajectory = if kinematics.smooth_input {
            debug!(window = kinematics.smoothing_window, "smoothing input trajectories");
            trajectory.map(|t| smooth_trajectory(t, kinematics.smoothing_window))
        } else {
            trajectory.clone()
        };

        let segmentation = segment_phases(&trajectory, &self.config.phases).inspect_err(|e| {
            warn!(error = %e, "phase segmentation failed");
            observability::record_analysis_failure(e.kind());
        })?;

        let clubhead = &trajectory.clubhead;
        let degenerate = degenerate_intervals(clubhead);
        if degenerate > 0 {
            warn!(
                degenerate_intervals = degenerate,
                "zero-duration frame intervals, velocity forced to 0"
            );
        }

        let clubhead_metrics = analyze_trajectory(clubhead);
        let wrist_metrics = analyze_trajectory(&trajectory.right_wrist);
        let velocity_profile = create_velocity_profile(clubhead);
        let path = analyze_swing_path(clubhead, &segmentation.phases, &self.config.path);
        let key_moments = find_key_moments(clubhead, &self.config.key_moments);

        debug!(
            impact = segmentation.impact_frame,
            tempo_ratio = segmentation.tempo_ratio,
            peak_velocity = clubhead_metrics.max_velocity,
            path = path.classification(),
            ?key_moments,
            "swing analyzed"
        );

        Ok(SwingAnalysis {
            frame_count: trajectory.frame_count(),
            diagnostics: AnalysisDiagnostics {
                degenerate_intervals: degenerate,
                ..Default::default()
            },
            trajectory,
            segmentation,
            clubhead_metrics,
            wrist_metrics,
            velocity_profile,
            path,
            key_moments,
        })
    }
}
