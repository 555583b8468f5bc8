use crate::models::{CaptureChoice, CaptureOption};

/// Decides which capture combination a play takes. Kept as a seam on purpose:
/// the default below stands in for richer selection, nothing in the sequencer
/// depends on its rule.
pub trait CapturePolicy: Send + Sync {
    fn select(&self, options: &[CaptureOption]) -> CaptureChoice;
}

/// Deterministic default: no options means no capture, otherwise the server's
/// first option wins, even when several are legal.
pub struct FirstOption;

impl CapturePolicy for FirstOption {
    fn select(&self, options: &[CaptureOption]) -> CaptureChoice {
        match options.len() {
            0 => CaptureChoice::NoCapture,
            1 => CaptureChoice::At(0),
            n => {
                tracing::info!("{n} capture options available, defaulting to the first");
                CaptureChoice::At(0)
            }
        }
    }
}
