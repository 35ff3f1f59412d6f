use std::env;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use log::{info, warn};
use serde_json::json;

use activity_core::sampler::report_channel;
use activity_core::trace::read_samples;
use activity_core::{
    FeatureVec, NodeConfig, NodeSampler, ReplaySource, SamplerError, FEATURE_NAMES, WINDOW_SIZE,
};

struct ReplayOptions {
    header: bool,
    node_config: Option<PathBuf>,
}

const USAGE: &str = "usage: replay [--header] [--config <node.json>] <trace.jsonl>";

fn parse_args() -> Result<(PathBuf, ReplayOptions)> {
    let mut header = false;
    let mut node_config = None;
    let mut trace_path: Option<PathBuf> = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--header" => header = true,
            "--config" => {
                let path = args.next().ok_or_else(|| anyhow!("--config needs a path"))?;
                node_config = Some(PathBuf::from(path));
            }
            _ => {
                if trace_path.is_some() {
                    bail!(USAGE);
                }
                trace_path = Some(PathBuf::from(arg));
            }
        }
    }

    let trace_path = trace_path.ok_or_else(|| anyhow!(USAGE))?;
    Ok((trace_path, ReplayOptions { header, node_config }))
}

fn main() -> Result<()> {
    env_logger::init();
    let (trace_path, opts) = parse_args()?;

    let config = match &opts.node_config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read node config {:?}", path))?;
            NodeConfig::from_json(&text)?
        }
        None => NodeConfig::default(),
    };

    let file = File::open(&trace_path).with_context(|| format!("cannot open {:?}", trace_path))?;
    let samples = read_samples(BufReader::new(file))
        .with_context(|| format!("bad trace {:?}", trace_path))?;
    let ticks = samples.len().div_ceil(config.samples_per_tick);
    info!(
        "node {}: replaying {} samples from {:?} over {} ticks of {} samples, window size {}",
        config.node_id,
        samples.len(),
        trace_path,
        ticks,
        config.samples_per_tick,
        WINDOW_SIZE
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if opts.header {
        writeln!(out, "{}", json!({ "features": FEATURE_NAMES }))?;
    }

    // No model is loaded; reports only carry timing and sequence numbers.
    let (tx, rx) = report_channel(&config);
    let mut node: NodeSampler<_, _> = NodeSampler::new(
        &config,
        ReplaySource::new(samples),
        |_: &FeatureVec| -> u16 { 0 },
        tx,
    )?;

    let mut emitted = 0usize;
    let mut rejected = 0usize;
    for tick in 0..ticks {
        let timestamp = config.tick_timestamp(tick as u32);
        match node.tick(timestamp) {
            Ok(Some(report)) => {
                writeln!(
                    out,
                    "{}",
                    json!({
                        "window": emitted,
                        "timestamp": report.timestamp,
                        "seqnum": report.seqnum,
                        "features": node.last_features().as_slice(),
                    })
                )?;
                emitted += 1;
            }
            Ok(None) => {}
            Err(SamplerError::OutOfRange(err)) => {
                warn!("tick {} (t={}): skipping window: {}", tick, timestamp, err);
                rejected += 1;
            }
            Err(err) => return Err(err.into()),
        }
        rx.try_iter().for_each(drop);
    }

    if !node.window().is_empty() {
        info!("{} trailing samples do not fill a window", node.window().len());
    }
    if node.samples_dropped() > 0 {
        info!("{} samples arrived after their window filled", node.samples_dropped());
    }
    info!("emitted {} feature vectors, skipped {}", emitted, rejected);
    Ok(())
}
