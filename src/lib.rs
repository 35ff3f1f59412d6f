pub mod classifier;
pub mod config;
pub mod entropy_table;
pub mod event;
pub mod extract;
pub mod features;
pub mod sampler;
pub mod source;
pub mod trace;
pub mod transform;
pub mod window;

#[cfg(feature = "python")]
mod python;

pub use classifier::{Activity, Classifier};
pub use config::{NodeConfig, WINDOW_SIZE};
pub use event::{ActivityReport, NodeEvent};
pub use features::{
    compute_features, feature_index, try_compute_features, FeatureError, FeatureVec, FEATURE_NAMES,
    NUM_FEATURES,
};
pub use sampler::{NodeSampler, Sampler, SamplerError};
pub use source::{AccelSource, ReplaySource};
pub use window::{Sample, Window};
