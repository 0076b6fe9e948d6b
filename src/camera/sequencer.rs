//! Hardware exposure sequencer programming.
//!
//! The camera keeps a bank of sequencer sets, each holding an exposure time
//! and transition wiring, and cycles through them on its own frame-start
//! signal with no host involvement per frame. Programming the bank follows
//! a strict protocol: disable the sequencer, open configuration mode, wire
//! the transition topology, save one set per requested exposure, close
//! configuration mode, re-enable.
//!
//! The programming sequence is not atomic with respect to device state. A
//! failure partway through leaves saved sets and possibly an open
//! configuration mode behind; recovery is a fresh
//! [`apply_startup_settings`](super::UsbCamera::apply_startup_settings)
//! pass followed by reprogramming.

use log::error;

use super::UsbCamera;
use crate::error::CamResult;
use crate::genapi::features::{self, entry};
use crate::genapi::NodeMap;

impl<N: NodeMap> UsbCamera<N> {
    /// Program the sequencer set bank with one set per requested exposure
    /// time (in microseconds) and start the sequencer.
    ///
    /// The sets form a closed cycle: each advances to its successor on the
    /// camera's frame-start signal, the last wraps back to the first, and
    /// software signal 1 resets any set to the start of the cycle (see
    /// [`reset_sequencer`](Self::reset_sequencer)).
    ///
    /// Returns the success flag and the exposure times the hardware
    /// actually latched, **in seconds**, one per input entry, in input
    /// order. The hardware clamps and quantizes, so latched values can
    /// differ from requested ones. An empty input is a valid degenerate
    /// cycle: the transition wiring is applied and the sequencer
    /// re-enabled without saving any set.
    ///
    /// On failure the routine stops at the failing register access after
    /// logging it, and the returned list holds only the exposures whose
    /// sets were saved. Nothing is rolled back.
    pub fn configure_sequencer(&self, exposure_times_us: &[f64]) -> (bool, Vec<f64>) {
        let mut reached = Vec::with_capacity(exposure_times_us.len());
        match self.program_sequencer(exposure_times_us, &mut reached) {
            Ok(()) => (true, reached),
            Err(err) => {
                error!("Failed to program the exposure sequencer: {err}");
                (false, reached)
            }
        }
    }

    fn program_sequencer(
        &self,
        exposure_times_us: &[f64],
        reached: &mut Vec<f64>,
    ) -> CamResult<()> {
        let nodes = &self.nodes;

        if nodes.is_writable(features::SEQUENCER_MODE) {
            nodes.set_enum(features::SEQUENCER_MODE, entry::OFF)?;
        } else {
            // Tolerated: the mode may simply be off already and read-only.
            error!("SequencerMode is not writable");
        }

        nodes.set_enum(features::SEQUENCER_CONFIGURATION_MODE, entry::ON)?;

        // Transition topology, valid for all sets: path 0 resets to the
        // initial set on software signal 1, path 1 advances on frame
        // start. Written once; the working registers keep the wiring for
        // every set saved below.
        let (initial_set, _) = nodes.int_bounds(features::SEQUENCER_SET_SELECTOR)?;
        nodes.set_int(features::SEQUENCER_SET_SELECTOR, initial_set)?;
        nodes.set_int(features::SEQUENCER_PATH_SELECTOR, 0)?;
        nodes.set_int(features::SEQUENCER_SET_NEXT, initial_set)?;
        nodes.set_enum(features::SEQUENCER_TRIGGER_SOURCE, entry::SOFTWARE_SIGNAL_1)?;
        nodes.set_int(features::SEQUENCER_PATH_SELECTOR, 1)?;
        nodes.set_enum(features::SEQUENCER_TRIGGER_SOURCE, entry::FRAME_START)?;

        for (i, &requested_us) in exposure_times_us.iter().enumerate() {
            // The initial set is still selected from the wiring above.
            if i > 0 {
                nodes.set_int(features::SEQUENCER_SET_SELECTOR, i as i64)?;
            }

            let next = if i == exposure_times_us.len() - 1 {
                0 // last set closes the cycle
            } else {
                i as i64 + 1
            };
            nodes.set_int(features::SEQUENCER_SET_NEXT, next)?;

            let reached_us = self.set_exposure(requested_us)?;
            nodes.execute(features::SEQUENCER_SET_SAVE)?;
            reached.push(reached_us / 1_000_000.0);
        }

        nodes.set_enum(features::SEQUENCER_CONFIGURATION_MODE, entry::OFF)?;
        nodes.set_enum(features::SEQUENCER_MODE, entry::ON)?;

        Ok(())
    }

    /// Force the running sequencer back to its initial set by firing
    /// software signal 1.
    pub fn reset_sequencer(&self) -> CamResult<()> {
        self.nodes
            .set_enum(features::SOFTWARE_SIGNAL_SELECTOR, entry::SOFTWARE_SIGNAL_1)?;
        self.nodes.execute(features::SOFTWARE_SIGNAL_PULSE)
    }
}
