//! USB camera driver: startup parameterization and parameter handles.
//!
//! [`UsbCamera`] owns a [`NodeMap`] and drives it synchronously; every
//! operation is a blocking register round-trip on the calling thread. The
//! startup applier and the sequencer programmer (see [`sequencer`]) report
//! failures as boolean results after logging; parameter handles log and
//! re-raise.

pub mod sequencer;

use log::{error, info, warn};

use crate::config::StartupConfig;
use crate::error::CamResult;
use crate::genapi::features::{self, entry};
use crate::genapi::{FloatNode, NodeMap};

/// Driver for the USB variant of the camera family.
pub struct UsbCamera<N: NodeMap> {
    nodes: N,
}

impl<N: NodeMap> UsbCamera<N> {
    /// Take ownership of a device handle.
    pub fn new(nodes: N) -> Self {
        Self { nodes }
    }

    /// The underlying device handle.
    pub fn node_map(&self) -> &N {
        &self.nodes
    }

    /// Transport family of this driver.
    pub fn type_name(&self) -> &'static str {
        "USB"
    }

    /// Convert an 8-bit brightness value to the `[0, 1]` scale used by
    /// this camera family's auto-target-brightness feature.
    pub fn convert_brightness(value: u8) -> f64 {
        f64::from(value) / 255.0
    }

    /// Reset the camera to a known profile at device-open time.
    ///
    /// Loads the factory default parameter bank (clearing any previous
    /// sequencer or custom configuration), restores software-driven
    /// free-running triggering, seeds the auto-exposure and auto-gain
    /// limits from the hardware's own reported bounds, and fixes the gain
    /// at `target_gain` interpolated between the hardware gain bounds.
    ///
    /// Returns `false` after logging if any register access failed; the
    /// camera is then in an indeterminate state and the call should be
    /// repeated once the device is reachable again.
    pub fn apply_startup_settings(&self, startup: &StartupConfig) -> bool {
        match self.try_apply_startup_settings(startup) {
            Ok(()) => true,
            Err(err) => {
                error!("Failed to apply startup settings: {err}");
                false
            }
        }
    }

    fn try_apply_startup_settings(&self, startup: &StartupConfig) -> CamResult<()> {
        let nodes = &self.nodes;

        // Remove all previous settings (sequencer etc.); the default set
        // is free-running.
        nodes.set_enum(features::USER_SET_SELECTOR, entry::DEFAULT)?;
        nodes.execute(features::USER_SET_LOAD)?;
        // Loading the default set reverts the trigger configuration, so
        // the software-trigger override has to come after it.
        nodes.set_enum(features::TRIGGER_SOURCE, entry::SOFTWARE)?;
        nodes.set_enum(features::TRIGGER_MODE, entry::ON)?;

        // Auto-function limits track whatever range this device reports,
        // so the auto loops never chase values the hardware cannot latch.
        let (exposure_min, exposure_max) = nodes.float_bounds(features::EXPOSURE_TIME)?;
        nodes.set_float(features::AUTO_EXPOSURE_TIME_LOWER_LIMIT, exposure_min)?;
        nodes.set_float(features::AUTO_EXPOSURE_TIME_UPPER_LIMIT, exposure_max)?;

        let (gain_min, gain_max) = nodes.float_bounds(features::GAIN)?;
        nodes.set_float(features::AUTO_GAIN_LOWER_LIMIT, gain_min)?;
        nodes.set_float(features::AUTO_GAIN_UPPER_LIMIT, gain_max)?;

        // Gain auto and exposure auto may run together; in that case the
        // profile must be set, and we prefer minimizing gain.
        nodes.set_enum(features::AUTO_FUNCTION_PROFILE, entry::MINIMIZE_GAIN)?;
        nodes.set_enum(features::GAIN_AUTO, entry::OFF)?;
        nodes.set_float(
            features::GAIN,
            gain_min + startup.target_gain * (gain_max - gain_min),
        )?;

        info!(
            "Camera gain range: [{:.2} - {:.2}] dB. Initially set to: {:.2}",
            gain_min,
            gain_max,
            nodes.get_float(features::GAIN)?
        );
        info!(
            "Camera exposure time range: [{:.1} - {:.1}] us. Initially set to: {:.1}",
            exposure_min,
            exposure_max,
            nodes.get_float(features::EXPOSURE_TIME)?
        );

        Ok(())
    }

    /// Apply an exposure time and report what the hardware latched.
    ///
    /// The request is clamped to the device's reported range; the device
    /// may additionally quantize it. The returned value is the device's
    /// own reading after the write, in microseconds. Errors propagate to
    /// the caller.
    pub fn set_exposure(&self, requested_us: f64) -> CamResult<f64> {
        let exposure = self.exposure_time();
        let min = exposure.min()?;
        let max = exposure.max()?;
        let target = requested_us.clamp(min, max);
        if target != requested_us {
            warn!(
                "Requested exposure {requested_us} us is outside [{min}, {max}] us, \
                 setting {target} us"
            );
        }
        exposure.set(target)?;
        exposure.get()
    }

    /// Handle to the sensor exposure time in microseconds.
    pub fn exposure_time(&self) -> FloatNode<'_> {
        FloatNode::new(&self.nodes, features::EXPOSURE_TIME)
    }

    /// Handle to the analog gain in dB.
    pub fn gain(&self) -> FloatNode<'_> {
        FloatNode::new(&self.nodes, features::GAIN)
    }

    /// Handle to the auto-exposure lower limit in microseconds.
    pub fn auto_exposure_time_lower_limit(&self) -> FloatNode<'_> {
        FloatNode::new(&self.nodes, features::AUTO_EXPOSURE_TIME_LOWER_LIMIT)
    }

    /// Handle to the auto-exposure upper limit in microseconds.
    pub fn auto_exposure_time_upper_limit(&self) -> FloatNode<'_> {
        FloatNode::new(&self.nodes, features::AUTO_EXPOSURE_TIME_UPPER_LIMIT)
    }

    /// Handle to the frame rate the camera will achieve with the current
    /// settings.
    pub fn resulting_frame_rate(&self) -> FloatNode<'_> {
        FloatNode::new(&self.nodes, features::RESULTING_FRAME_RATE)
    }

    /// Handle to the auto-function target brightness, normalized to
    /// `[0, 1]`.
    pub fn auto_target_brightness(&self) -> FloatNode<'_> {
        FloatNode::new(&self.nodes, features::AUTO_TARGET_BRIGHTNESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genapi::mock::MockDevice;

    #[test]
    fn brightness_conversion_covers_the_unit_range() {
        assert_eq!(UsbCamera::<MockDevice>::convert_brightness(0), 0.0);
        assert_eq!(UsbCamera::<MockDevice>::convert_brightness(255), 1.0);
        let mid = UsbCamera::<MockDevice>::convert_brightness(128);
        assert!((mid - 128.0 / 255.0).abs() < f64::EPSILON);
    }

    #[test]
    fn type_name_is_usb() {
        let camera = UsbCamera::new(MockDevice::new());
        assert_eq!(camera.type_name(), "USB");
    }

    #[test]
    fn set_exposure_reports_the_latched_value() {
        let camera = UsbCamera::new(MockDevice::new());
        let reached = camera.set_exposure(150.4).unwrap();
        assert_eq!(reached, 150.0);
        // Unreachable request is clamped to the hardware bound.
        let reached = camera.set_exposure(1.0).unwrap();
        assert_eq!(reached, camera.exposure_time().min().unwrap());
    }

    #[test]
    fn parameter_handles_write_through_to_the_device() {
        let camera = UsbCamera::new(MockDevice::new());
        camera.auto_target_brightness().set(0.5).unwrap();
        assert_eq!(camera.auto_target_brightness().get().unwrap(), 0.5);
        assert_eq!(camera.gain().min().unwrap(), 0.0);
    }

    #[test]
    fn read_only_handle_propagates_the_device_error() {
        let camera = UsbCamera::new(MockDevice::new());
        assert!(camera.resulting_frame_rate().get().is_ok());
        assert!(camera.resulting_frame_rate().set(10.0).is_err());
    }
}
