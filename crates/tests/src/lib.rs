//! # Integration Tests
//!
//! Cross-crate and end-to-end tests.
//!
//! Covers:
//! - Contract snapshot tests
//! - Reference swing scenarios
//! - Randomized invariant checks
//! - File-to-report e2e flows (pose JSON, config files)

#[cfg(test)]
mod contract_tests {
    use contracts::{AnalysisConfig, PhaseName, TrackedPoint};

    #[test]
    fn test_contracts_compile() {
        assert_eq!(PhaseName::ORDER.len(), 5);
        assert_eq!(TrackedPoint::ALL.len(), 7);
        assert_eq!(contracts::MIN_SWING_FRAMES, 10);
    }

    #[test]
    fn test_default_config_snapshot() {
        let json = serde_json::to_value(AnalysisConfig::default()).unwrap();
        assert_eq!(json["phases"]["setup_fraction"], 0.1);
        assert_eq!(json["phases"]["impact_source"], "clubhead");
        assert_eq!(json["ingestion"]["clubhead"]["mode"], "wrist_midpoint");
        assert_eq!(json["ingestion"]["landmarks"]["right_wrist"], 16);
        assert_eq!(json["kinematics"]["smoothing_window"], 5);
    }
}

#[cfg(test)]
mod test_support {
    use contracts::{SwingTrajectory, Trajectory, TrajectoryPoint};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    pub const FRAME_MS: f64 = 1000.0 / 30.0;

    pub fn trajectory(n: usize, f: impl Fn(f64) -> (f64, f64)) -> Trajectory {
        (0..n)
            .map(|i| {
                let t = if n > 1 { i as f64 / (n - 1) as f64 } else { 0.0 };
                let (x, y) = f(t);
                TrajectoryPoint::new(x, y, 0.0, i as f64 * FRAME_MS, i)
            })
            .collect()
    }

    /// Every tracked point follows the same path.
    pub fn uniform_swing(points: &Trajectory) -> SwingTrajectory {
        SwingTrajectory::from_fn(|_| points.clone())
    }

    /// Random positions with strictly increasing timestamps.
    pub fn random_trajectory(rng: &mut StdRng, n: usize) -> Trajectory {
        let mut timestamp = 0.0;
        (0..n)
            .map(|i| {
                timestamp += rng.random_range(5.0..40.0);
                TrajectoryPoint::new(
                    rng.random(),
                    rng.random(),
                    rng.random_range(-0.2..0.2),
                    timestamp,
                    i,
                )
            })
            .collect()
    }

    pub fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }
}

#[cfg(test)]
mod scenario_tests {
    use super::test_support::*;
    use contracts::{AnalysisError, MIN_SWING_FRAMES};
    use swing_engine::{analyze_trajectory, SwingAnalyzer};

    #[test]
    fn test_scenario_arc() {
        let points = trajectory(60, |t| (0.3 + 0.4 * (t * std::f64::consts::PI).sin(), 0.7 - 0.6 * t));
        let metrics = analyze_trajectory(&points);

        assert!(metrics.total_distance > 0.0);
        assert!(metrics.max_velocity > 0.0);
        assert!((0.0..=1.0).contains(&metrics.smoothness));
        assert!(metrics.peak_frame < 60);

        let analysis = SwingAnalyzer::default()
            .analyze_swing(&uniform_swing(&points))
            .unwrap();
        assert_eq!(analysis.clubhead_metrics, metrics);
        assert_eq!(analysis.frame_count, 60);
    }

    #[test]
    fn test_scenario_too_few_frames() {
        let analyzer = SwingAnalyzer::default();
        for n in 0..MIN_SWING_FRAMES {
            let points = trajectory(n, |t| (t, t));
            let err = analyzer.analyze_swing(&uniform_swing(&points)).unwrap_err();
            assert!(
                matches!(err, AnalysisError::InsufficientData { required: 10, actual } if actual == n),
                "n={n}: {err}"
            );
        }
    }

    #[test]
    fn test_scenario_stationary() {
        let points = trajectory(30, |_| (0.4, 0.6));
        let metrics = analyze_trajectory(&points);
        assert_eq!(metrics.total_distance, 0.0);
        assert_eq!(metrics.max_velocity, 0.0);
        assert_eq!(metrics.smoothness, 1.0);
    }

    #[test]
    fn test_scenario_on_plane() {
        // Straight horizontal path, speed increasing every frame
        let points = trajectory(60, |t| (0.1 + 0.6 * t * t, 0.5));
        let analysis = SwingAnalyzer::default()
            .analyze_swing(&uniform_swing(&points))
            .unwrap();

        assert!(analysis.path.on_plane);
        assert!(!analysis.path.inside_out);
        assert!(!analysis.path.outside_in);
        assert_eq!(analysis.path.classification(), "on-plane");
    }

    #[test]
    fn test_scenario_direction_flags_exclusive() {
        let mut rng = rng(11);
        let analyzer = SwingAnalyzer::default();
        for _ in 0..50 {
            let points = random_trajectory(&mut rng, 60);
            let path = analyzer.analyze_swing(&uniform_swing(&points)).unwrap().path;
            assert!(!(path.inside_out && path.outside_in));
        }
    }
}

#[cfg(test)]
mod property_tests {
    use super::test_support::*;
    use contracts::{AnalysisConfig, PhaseName, TrajectoryPoint};
    use rand::Rng;
    use swing_engine::{
        accelerations, analyze_trajectory, find_key_moments, path_consistency, segment_phases,
        smooth_trajectory, swing_plane, velocities,
    };

    #[test]
    fn test_series_lengths() {
        let mut rng = rng(1);
        for n in 0..30 {
            let points = random_trajectory(&mut rng, n);
            let v = velocities(&points);
            assert_eq!(v.len(), n.saturating_sub(1));
            assert_eq!(accelerations(&points, &v).len(), n.saturating_sub(2));
        }
    }

    #[test]
    fn test_degenerate_inputs() {
        let empty = analyze_trajectory(&[]);
        assert_eq!(empty.total_distance, 0.0);
        assert_eq!(empty.smoothness, 0.0);

        let single = analyze_trajectory(&[TrajectoryPoint::new(0.5, 0.5, 0.0, 0.0, 0)]);
        assert_eq!(single.max_velocity, 0.0);
        assert_eq!(single.smoothness, 1.0);
    }

    #[test]
    fn test_bounded_metrics() {
        let mut rng = rng(2);
        for _ in 0..200 {
            let n = rng.random_range(0..50);
            let points = random_trajectory(&mut rng, n);

            let smoothness = analyze_trajectory(&points).smoothness;
            assert!((0.0..=1.0).contains(&smoothness), "smoothness {smoothness}");

            let consistency = path_consistency(&points);
            assert!((0.0..=1.0).contains(&consistency), "consistency {consistency}");

            let plane = swing_plane(&points);
            assert!((-180.0..=180.0).contains(&plane), "plane {plane}");
        }
    }

    #[test]
    fn test_key_moments_ordered() {
        let config = AnalysisConfig::default().key_moments;
        let mut rng = rng(3);
        for n in 1..60 {
            let points = random_trajectory(&mut rng, n);
            let moments = find_key_moments(&points, &config);
            assert_eq!(moments.finish, n - 1);
            assert!(moments.is_ordered(), "n={n}: {moments:?}");
        }
    }

    #[test]
    fn test_smoothing_preserves_length() {
        let mut rng = rng(4);
        for n in 0..25 {
            let points = random_trajectory(&mut rng, n);
            for window in [1, 3, 5, 9] {
                let smoothed = smooth_trajectory(&points, window);
                assert_eq!(smoothed.len(), n);
                if n < window {
                    assert_eq!(smoothed, points);
                }
            }
        }
    }

    #[test]
    fn test_phases_cover_swing() {
        let config = AnalysisConfig::default().phases;
        let mut rng = rng(5);
        for n in 10..120 {
            let points = random_trajectory(&mut rng, n);
            let seg = segment_phases(&uniform_swing(&points), &config).unwrap();

            let names: Vec<PhaseName> = seg.phases.iter().map(|p| p.name).collect();
            assert_eq!(names, PhaseName::ORDER.to_vec());
            assert_eq!(seg.phases[0].start_frame, 0);
            assert_eq!(seg.phases[4].end_frame, n - 1);
            for pair in seg.phases.windows(2) {
                assert_eq!(pair[0].end_frame, pair[1].start_frame, "n={n}");
                assert!(pair[0].start_frame <= pair[0].end_frame);
            }
            assert!(seg.tempo_ratio >= 0.0);
            assert!((0.0..=180.0).contains(&seg.rotation.shoulder_turn));
        }
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::sync::Arc;

    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{AnalysisError, BodyLandmark, ClubheadEstimate, LandmarkMap};
    use ingestion::{
        parse_pose_sequence, IngestionError, IngestionMetrics, SyntheticSwing, SyntheticSwingConfig,
        TrajectoryBuilder,
    };
    use observability::AnalysisMetricsAggregator;
    use swing_engine::SwingAnalyzer;

    /// End-to-end: pose JSON -> loader -> trajectory builder -> analyzer
    #[test]
    fn test_e2e_pose_json() {
        let swing = SyntheticSwing::standard(75);
        let json = serde_json::to_string(&swing.sequence()).unwrap();

        let sequence = parse_pose_sequence(&json).unwrap();
        assert_eq!(sequence.frames.len(), 75);

        let analyzer = SwingAnalyzer::default();
        let metrics = Arc::new(IngestionMetrics::new());
        let built = TrajectoryBuilder::new(&analyzer.config().ingestion)
            .with_metrics(metrics.clone())
            .build(&sequence.frames)
            .unwrap();
        let analysis = analyzer.analyze(&built).unwrap();

        assert_eq!(analysis.frame_count, 75);
        assert!(analysis.key_moments.is_ordered());
        let impact = analysis.segmentation.impact_frame;
        assert!(impact.abs_diff(swing.impact_frame()) <= 1, "impact at {impact}");

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.sequences_built, 1);
        assert_eq!(snapshot.frames_ingested, 75);
    }

    #[test]
    fn test_e2e_bare_frame_array() {
        let frames = SyntheticSwing::standard(30).generate();
        let json = serde_json::to_string(&frames).unwrap();
        let sequence = parse_pose_sequence(&json).unwrap();
        assert!(SwingAnalyzer::default().analyze_frames(&sequence.frames).is_ok());
    }

    #[test]
    fn test_e2e_config_file() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        std::fs::write(
            file.path(),
            r#"
[ingestion]
min_visibility = 0.5

[ingestion.landmarks]
left_shoulder = 5
right_shoulder = 6
left_elbow = 7
right_elbow = 8
left_wrist = 9
right_wrist = 10
left_hip = 11
right_hip = 12

[ingestion.clubhead]
mode = "forearm_extension"
extension = 1.5

[kinematics]
smooth_input = true
smoothing_window = 3
"#,
        )
        .unwrap();

        let config = ConfigLoader::load_from_path(file.path()).unwrap();
        assert_eq!(config.ingestion.landmarks, LandmarkMap::coco());
        assert_eq!(
            config.ingestion.clubhead,
            ClubheadEstimate::ForearmExtension { extension: 1.5 }
        );

        let frames = SyntheticSwing::new(SyntheticSwingConfig {
            frames: 60,
            landmarks: LandmarkMap::coco(),
            ..Default::default()
        })
        .generate();
        let analysis = SwingAnalyzer::new(config).analyze_frames(&frames).unwrap();
        assert_eq!(analysis.frame_count, 60);
        assert!(analysis.diagnostics.is_clean());
    }

    #[test]
    fn test_e2e_config_roundtrip_toml() {
        let mut config = contracts::AnalysisConfig::default();
        config.path.on_plane_tolerance_deg = 7.5;
        let toml = ConfigLoader::to_toml(&config).unwrap();
        let loaded = ConfigLoader::load_from_str(&toml, ConfigFormat::Toml).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_e2e_rejects_unordered_frames() {
        let mut frames = SyntheticSwing::standard(30).generate();
        frames.swap(10, 11);
        let err = SwingAnalyzer::default().analyze_frames(&frames).unwrap_err();
        assert!(matches!(err, AnalysisError::NonMonotonicTimestamps { frame: 11, .. }));

        let err = TrajectoryBuilder::new(&Default::default())
            .build(&frames)
            .unwrap_err();
        assert!(matches!(err, IngestionError::NonMonotonicTimestamps { frame: 11, .. }));
    }

    #[test]
    fn test_e2e_occluded_swing_still_analyzed() {
        let frames = SyntheticSwing::standard(60)
            .with_occlusion(BodyLandmark::RightWrist, 20..26)
            .generate();
        let analysis = SwingAnalyzer::default().analyze_frames(&frames).unwrap();
        assert_eq!(analysis.diagnostics.missing_landmarks, 6);
        assert!(analysis.key_moments.is_ordered());
    }

    #[test]
    fn test_e2e_batch_summary() {
        let analyzer = SwingAnalyzer::default();
        let mut aggregator = AnalysisMetricsAggregator::new();

        for seed in 0..4 {
            let frames = SyntheticSwing::noisy(60, 0.002, seed).generate();
            let analysis = analyzer.analyze_frames(&frames).unwrap();
            aggregator.update(&analysis);
        }
        let err = analyzer
            .analyze_frames(&SyntheticSwing::standard(5).generate())
            .unwrap_err();
        aggregator.record_failure(err.kind());

        let summary = aggregator.summary();
        assert_eq!(summary.total_swings, 4);
        assert_eq!(summary.failed_swings, 1);
        assert_eq!(summary.failure_counts.get("insufficient_data"), Some(&1));
        assert_eq!(summary.tempo_ratio.count, 4);
    }
}
