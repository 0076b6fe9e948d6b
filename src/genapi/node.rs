//! Live parameter handles routed through the device seam.

use log::error;

use super::NodeMap;
use crate::error::CamResult;

/// Handle to a float feature of a camera.
///
/// The handle holds no value of its own: every `get`/`set` is a round-trip
/// to the device, and a write takes effect on hardware immediately. On
/// failure the handle logs the error and re-raises it, so callers must be
/// prepared to handle a device access failure.
#[derive(Clone, Copy)]
pub struct FloatNode<'a> {
    nodes: &'a dyn NodeMap,
    name: &'static str,
}

impl<'a> FloatNode<'a> {
    pub(crate) fn new(nodes: &'a dyn NodeMap, name: &'static str) -> Self {
        Self { nodes, name }
    }

    /// Feature name this handle is bound to.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Read the current value from the device.
    pub fn get(&self) -> CamResult<f64> {
        self.nodes.get_float(self.name).map_err(|err| {
            error!("Failed to read '{}': {}", self.name, err);
            err
        })
    }

    /// Write a value to the device.
    pub fn set(&self, value: f64) -> CamResult<()> {
        self.nodes.set_float(self.name, value).map_err(|err| {
            error!("Failed to write '{}': {}", self.name, err);
            err
        })
    }

    /// Minimum value the device reports for this feature.
    pub fn min(&self) -> CamResult<f64> {
        Ok(self.bounds()?.0)
    }

    /// Maximum value the device reports for this feature.
    pub fn max(&self) -> CamResult<f64> {
        Ok(self.bounds()?.1)
    }

    fn bounds(&self) -> CamResult<(f64, f64)> {
        self.nodes.float_bounds(self.name).map_err(|err| {
            error!("Failed to query bounds of '{}': {}", self.name, err);
            err
        })
    }
}
