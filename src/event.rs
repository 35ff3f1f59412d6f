use crossbeam_channel::Receiver;
use serde::{Deserialize, Serialize};

/// Over-the-air record sent to the network root after every window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityReport {
    pub timestamp: u32,
    pub seqnum: u16,
    pub activity: u16,
}

impl ActivityReport {
    pub const WIRE_LEN: usize = 8;

    /// Little-endian layout: timestamp, seqnum, activity.
    pub fn to_le_bytes(&self) -> [u8; Self::WIRE_LEN] {
        let mut out = [0u8; Self::WIRE_LEN];
        out[0..4].copy_from_slice(&self.timestamp.to_le_bytes());
        out[4..6].copy_from_slice(&self.seqnum.to_le_bytes());
        out[6..8].copy_from_slice(&self.activity.to_le_bytes());
        out
    }

    /// Decodes the first [`Self::WIRE_LEN`] bytes; shorter input is ignored.
    pub fn from_le_bytes(buf: &[u8]) -> Option<Self> {
        if buf.len() < Self::WIRE_LEN {
            return None;
        }
        Some(Self {
            timestamp: u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]),
            seqnum: u16::from_le_bytes([buf[4], buf[5]]),
            activity: u16::from_le_bytes([buf[6], buf[7]]),
        })
    }
}

#[derive(Debug)]
pub enum NodeEvent {
    Report(ActivityReport),
    // Acked by the network side once everything queued before it is handled.
    Flush { ack: crossbeam_channel::Sender<()> },
}

/// Network-side loop: hands every report to `on_report` and acknowledges
/// flushes, until all senders are gone. Returns the number of reports seen.
pub fn dispatch<F: FnMut(ActivityReport)>(rx: &Receiver<NodeEvent>, mut on_report: F) -> u64 {
    let mut seen = 0;
    for evt in rx.iter() {
        match evt {
            NodeEvent::Report(report) => {
                seen += 1;
                on_report(report);
            }
            NodeEvent::Flush { ack } => {
                // the flushing side may have given up waiting
                let _ = ack.send(());
            }
        }
    }
    seen
}
