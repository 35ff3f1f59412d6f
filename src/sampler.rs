use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use log::{debug, trace, warn};
use thiserror::Error;

use crate::classifier::Classifier;
use crate::config::{ConfigError, NodeConfig, WINDOW_SIZE};
use crate::entropy_table::{EntropyLookup, WindowSize};
use crate::event::{ActivityReport, NodeEvent};
use crate::features::{try_compute_features_into, FeatureError, FeatureVec};
use crate::source::{AccelSource, SourceError};
use crate::window::{Sample, Window};

#[derive(Debug, Error)]
pub enum SamplerError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("window rejected: {0}")]
    OutOfRange(#[from] FeatureError),

    #[error("report channel disconnected")]
    Disconnected,
}

/// Sampler over the window size selected at build time.
pub type NodeSampler<S, C> = Sampler<S, C, WINDOW_SIZE>;

/// Bounded channel carrying reports to the network side.
pub fn report_channel(config: &NodeConfig) -> (Sender<NodeEvent>, Receiver<NodeEvent>) {
    bounded(config.report_channel_capacity)
}

/// Owns the only window, so ingestion and feature extraction never overlap.
pub struct Sampler<S, C, const N: usize> {
    window: Window<N>,
    features: FeatureVec,
    scratch: Vec<Sample>,
    source: S,
    classifier: C,
    reports: Sender<NodeEvent>,
    seqnum: u16,
    windows_completed: u64,
    windows_rejected: u64,
    samples_dropped: u64,
}

impl<S, C, const N: usize> Sampler<S, C, N>
where
    S: AccelSource,
    C: Classifier,
    WindowSize<N>: EntropyLookup,
{
    pub fn new(
        config: &NodeConfig,
        source: S,
        classifier: C,
        reports: Sender<NodeEvent>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            window: Window::new(),
            features: FeatureVec::new(),
            scratch: vec![Sample::default(); config.samples_per_tick],
            source,
            classifier,
            reports,
            seqnum: 0,
            windows_completed: 0,
            windows_rejected: 0,
            samples_dropped: 0,
        })
    }

    /// Runs one tick at `timestamp`.
    ///
    /// Returns the report when this tick completed a window. Samples read
    /// after the window filled are discarded, never carried over. A full
    /// window whose values do not fit the feature histograms is discarded
    /// and reported as [`SamplerError::OutOfRange`]; the next tick starts a
    /// fresh window.
    pub fn tick(&mut self, timestamp: u32) -> Result<Option<ActivityReport>, SamplerError> {
        let read = self.source.read(&mut self.scratch)?;

        let mut used = 0;
        while used < read && !self.window.is_full() {
            self.window.push(self.scratch[used]);
            used += 1;
        }
        let dropped = read - used;
        if dropped > 0 {
            self.samples_dropped += dropped as u64;
            debug!("window full, dropped {} samples at tick {}", dropped, timestamp);
        }

        if !self.window.is_full() {
            trace!("tick {}: window holds {}/{}", timestamp, self.window.len(), N);
            return Ok(None);
        }

        if let Err(err) = try_compute_features_into(&self.window, &mut self.features) {
            self.window.reset();
            self.windows_rejected += 1;
            warn!("tick {}: discarding window: {}", timestamp, err);
            return Err(err.into());
        }
        let activity = self.classifier.classify(&self.features);
        self.window.reset();
        self.windows_completed += 1;

        self.seqnum = self.seqnum.wrapping_add(1);
        let report = ActivityReport {
            timestamp,
            seqnum: self.seqnum,
            activity,
        };
        debug!(
            "window {} classified as {} (seq {})",
            self.windows_completed, activity, self.seqnum
        );

        match self.reports.try_send(NodeEvent::Report(report)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                warn!("report channel full, dropping report seq {}", report.seqnum);
            }
            Err(TrySendError::Disconnected(_)) => return Err(SamplerError::Disconnected),
        }
        Ok(Some(report))
    }

    /// Blocks until the network side has handled every report sent so far.
    pub fn flush(&self) -> Result<(), SamplerError> {
        let (ack_tx, ack_rx) = bounded(1);
        self.reports
            .send(NodeEvent::Flush { ack: ack_tx })
            .map_err(|_| SamplerError::Disconnected)?;
        ack_rx.recv().map_err(|_| SamplerError::Disconnected)
    }

    pub fn window(&self) -> &Window<N> {
        &self.window
    }

    /// Features of the most recently completed window.
    pub fn last_features(&self) -> &FeatureVec {
        &self.features
    }

    pub fn windows_completed(&self) -> u64 {
        self.windows_completed
    }

    pub fn windows_rejected(&self) -> u64 {
        self.windows_rejected
    }

    pub fn samples_dropped(&self) -> u64 {
        self.samples_dropped
    }

    pub fn seqnum(&self) -> u16 {
        self.seqnum
    }
}
