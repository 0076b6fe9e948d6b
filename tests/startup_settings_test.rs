//! Integration tests for the one-shot startup parameterization, run
//! against the emulated device.

use rust_gencam::camera::UsbCamera;
use rust_gencam::config::StartupConfig;
use rust_gencam::genapi::features::{self, entry};
use rust_gencam::genapi::mock::MockDevice;
use rust_gencam::genapi::NodeMap;

fn camera() -> UsbCamera<MockDevice> {
    UsbCamera::new(MockDevice::new())
}

#[test]
fn trigger_override_survives_the_default_set_load() {
    let camera = camera();
    assert!(camera.apply_startup_settings(&StartupConfig::default()));

    // Loading the default set reverts triggering to hardware free-running;
    // the explicit override afterwards must win.
    let device = camera.node_map();
    assert_eq!(
        device.get_enum(features::TRIGGER_SOURCE).unwrap(),
        entry::SOFTWARE
    );
    assert_eq!(device.get_enum(features::TRIGGER_MODE).unwrap(), entry::ON);
}

#[test]
fn auto_limits_are_seeded_from_hardware_bounds() {
    let camera = camera();
    assert!(camera.apply_startup_settings(&StartupConfig::default()));

    let device = camera.node_map();
    let (exposure_min, exposure_max) = device.float_bounds(features::EXPOSURE_TIME).unwrap();
    assert_eq!(
        device
            .get_float(features::AUTO_EXPOSURE_TIME_LOWER_LIMIT)
            .unwrap(),
        exposure_min
    );
    assert_eq!(
        device
            .get_float(features::AUTO_EXPOSURE_TIME_UPPER_LIMIT)
            .unwrap(),
        exposure_max
    );

    let (gain_min, gain_max) = device.float_bounds(features::GAIN).unwrap();
    assert_eq!(
        device.get_float(features::AUTO_GAIN_LOWER_LIMIT).unwrap(),
        gain_min
    );
    assert_eq!(
        device.get_float(features::AUTO_GAIN_UPPER_LIMIT).unwrap(),
        gain_max
    );

    assert_eq!(
        device.get_enum(features::AUTO_FUNCTION_PROFILE).unwrap(),
        entry::MINIMIZE_GAIN
    );
    assert_eq!(device.get_enum(features::GAIN_AUTO).unwrap(), entry::OFF);
}

#[test]
fn gain_interpolates_between_hardware_bounds() {
    for (target, expected_db) in [(0.0, 0.0), (0.5, 18.0), (1.0, 36.0)] {
        let camera = camera();
        let applied = camera.apply_startup_settings(&StartupConfig {
            target_gain: target,
        });
        assert!(applied);
        assert_eq!(camera.gain().get().unwrap(), expected_db);
    }
}

#[test]
fn startup_settings_are_idempotent() {
    let camera = camera();
    let startup = StartupConfig { target_gain: 0.3 };

    assert!(camera.apply_startup_settings(&startup));
    let first_gain = camera.gain().get().unwrap();

    assert!(camera.apply_startup_settings(&startup));
    let second_gain = camera.gain().get().unwrap();

    assert_eq!(first_gain, second_gain);
}

#[test]
fn startup_clears_a_previous_sequencer_configuration() {
    let camera = camera();
    let (ok, _) = camera.configure_sequencer(&[100.0, 200.0]);
    assert!(ok);
    assert!(!camera.node_map().saved_sets().is_empty());

    assert!(camera.apply_startup_settings(&StartupConfig::default()));

    let device = camera.node_map();
    assert!(device.saved_sets().is_empty());
    assert_eq!(
        device.get_enum(features::SEQUENCER_MODE).unwrap(),
        entry::OFF
    );
}

#[test]
fn device_failure_turns_into_a_boolean_result() {
    let device = MockDevice::new();
    // Fail the first access to the gain feature (its bounds query).
    device.fail_after(features::GAIN, 0);
    let camera = UsbCamera::new(device);

    assert!(!camera.apply_startup_settings(&StartupConfig::default()));
}
