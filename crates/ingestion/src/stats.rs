//! Ingestion counters shared across concurrent builds

use std::sync::atomic::{AtomicU64, Ordering};

/// Ingestion metrics
#[derive(Debug, Default)]
pub struct IngestionMetrics {
    /// Pose sequences turned into trajectories
    pub sequences_built: AtomicU64,

    /// Pose sequences rejected (decode or timestamp errors)
    pub sequences_rejected: AtomicU64,

    /// Total frames consumed
    pub frames_ingested: AtomicU64,

    /// Landmarks absent from a frame
    pub missing_landmarks: AtomicU64,

    /// Landmarks below the visibility floor
    pub low_confidence_landmarks: AtomicU64,
}

impl IngestionMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful build
    pub fn record_built(&self, frames: usize, missing: usize, low_confidence: usize) {
        self.sequences_built.fetch_add(1, Ordering::Relaxed);
        self.frames_ingested
            .fetch_add(frames as u64, Ordering::Relaxed);
        self.missing_landmarks
            .fetch_add(missing as u64, Ordering::Relaxed);
        self.low_confidence_landmarks
            .fetch_add(low_confidence as u64, Ordering::Relaxed);
    }

    /// Record a rejected sequence
    pub fn record_rejected(&self) {
        self.sequences_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            sequences_built: self.sequences_built.load(Ordering::Relaxed),
            sequences_rejected: self.sequences_rejected.load(Ordering::Relaxed),
            frames_ingested: self.frames_ingested.load(Ordering::Relaxed),
            missing_landmarks: self.missing_landmarks.load(Ordering::Relaxed),
            low_confidence_landmarks: self.low_confidence_landmarks.load(Ordering::Relaxed),
        }
    }
}

/// Metrics snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub sequences_built: u64,
    pub sequences_rejected: u64,
    pub frames_ingested: u64,
    pub missing_landmarks: u64,
    pub low_confidence_landmarks: u64,
}

impl MetricsSnapshot {
    /// Share of read landmarks that had to be filled in
    pub fn gap_rate(&self, landmarks_per_frame: usize) -> f64 {
        let read = self.frames_ingested * landmarks_per_frame as u64;
        if read == 0 {
            return 0.0;
        }
        (self.missing_landmarks + self.low_confidence_landmarks) as f64 / read as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_accumulates() {
        let metrics = IngestionMetrics::new();
        metrics.record_built(60, 3, 1);
        metrics.record_built(40, 0, 0);
        metrics.record_rejected();

        let snap = metrics.snapshot();
        assert_eq!(snap.sequences_built, 2);
        assert_eq!(snap.sequences_rejected, 1);
        assert_eq!(snap.frames_ingested, 100);
        assert!((snap.gap_rate(6) - 4.0 / 600.0).abs() < 1e-12);
    }

    #[test]
    fn test_gap_rate_empty() {
        assert_eq!(MetricsSnapshot::default().gap_rate(6), 0.0);
    }
}
