//! Feature names of the USB camera family (GenICam Standard Features
//! Naming Convention), plus the enumeration entries the driver selects.

/// Exposure time of the sensor in microseconds.
pub const EXPOSURE_TIME: &str = "ExposureTime";
/// Analog gain in dB.
pub const GAIN: &str = "Gain";
/// Auto-gain control mode.
pub const GAIN_AUTO: &str = "GainAuto";
/// Auto-exposure control mode.
pub const EXPOSURE_AUTO: &str = "ExposureAuto";
/// Lower bound for the auto-gain control loop.
pub const AUTO_GAIN_LOWER_LIMIT: &str = "AutoGainLowerLimit";
/// Upper bound for the auto-gain control loop.
pub const AUTO_GAIN_UPPER_LIMIT: &str = "AutoGainUpperLimit";
/// Lower bound for the auto-exposure control loop in microseconds.
pub const AUTO_EXPOSURE_TIME_LOWER_LIMIT: &str = "AutoExposureTimeLowerLimit";
/// Upper bound for the auto-exposure control loop in microseconds.
pub const AUTO_EXPOSURE_TIME_UPPER_LIMIT: &str = "AutoExposureTimeUpperLimit";
/// Coordination policy when auto-gain and auto-exposure run together.
pub const AUTO_FUNCTION_PROFILE: &str = "AutoFunctionProfile";
/// Target brightness for the auto functions, normalized to `[0, 1]`.
pub const AUTO_TARGET_BRIGHTNESS: &str = "AutoTargetBrightness";
/// Frame rate the camera will actually achieve with the current settings.
pub const RESULTING_FRAME_RATE: &str = "ResultingFrameRate";

/// Source of the acquisition trigger.
pub const TRIGGER_SOURCE: &str = "TriggerSource";
/// Whether acquisition triggering is active.
pub const TRIGGER_MODE: &str = "TriggerMode";

/// Selects the user set addressed by [`USER_SET_LOAD`].
pub const USER_SET_SELECTOR: &str = "UserSetSelector";
/// Loads the selected user set, replacing the active configuration.
pub const USER_SET_LOAD: &str = "UserSetLoad";

/// Whether the sequencer is running.
pub const SEQUENCER_MODE: &str = "SequencerMode";
/// Whether the sequencer set bank is open for editing.
pub const SEQUENCER_CONFIGURATION_MODE: &str = "SequencerConfigurationMode";
/// Selects the sequencer set addressed by the other sequencer features.
pub const SEQUENCER_SET_SELECTOR: &str = "SequencerSetSelector";
/// Set activated when the selected path's trigger fires.
pub const SEQUENCER_SET_NEXT: &str = "SequencerSetNext";
/// Selects which transition path of the current set is being edited.
pub const SEQUENCER_PATH_SELECTOR: &str = "SequencerPathSelector";
/// Device signal that advances the sequencer along the selected path.
pub const SEQUENCER_TRIGGER_SOURCE: &str = "SequencerTriggerSource";
/// Persists the working set configuration into the selected set.
pub const SEQUENCER_SET_SAVE: &str = "SequencerSetSave";
/// Restores the selected set's saved configuration into the working registers.
pub const SEQUENCER_SET_LOAD: &str = "SequencerSetLoad";

/// Selects the software signal fired by [`SOFTWARE_SIGNAL_PULSE`].
pub const SOFTWARE_SIGNAL_SELECTOR: &str = "SoftwareSignalSelector";
/// Fires the selected host-issuable signal.
pub const SOFTWARE_SIGNAL_PULSE: &str = "SoftwareSignalPulse";

/// Enumeration entries selected by the driver.
pub mod entry {
    /// Generic off state.
    pub const OFF: &str = "Off";
    /// Generic on state.
    pub const ON: &str = "On";
    /// Host-issued acquisition trigger.
    pub const SOFTWARE: &str = "Software";
    /// Hardware trigger input line.
    pub const LINE1: &str = "Line1";
    /// Signal fired at the start of each frame capture.
    pub const FRAME_START: &str = "FrameStart";
    /// First host-issuable software signal.
    pub const SOFTWARE_SIGNAL_1: &str = "SoftwareSignal1";
    /// Second host-issuable software signal.
    pub const SOFTWARE_SIGNAL_2: &str = "SoftwareSignal2";
    /// Third host-issuable software signal.
    pub const SOFTWARE_SIGNAL_3: &str = "SoftwareSignal3";
    /// Factory default parameter bank.
    pub const DEFAULT: &str = "Default";
    /// First user-writable parameter bank.
    pub const USER_SET_1: &str = "UserSet1";
    /// Auto-function profile keeping gain as low as possible.
    pub const MINIMIZE_GAIN: &str = "MinimizeGain";
    /// Auto-function profile keeping exposure as short as possible.
    pub const MINIMIZE_EXPOSURE_TIME: &str = "MinimizeExposureTime";
    /// Auto-control loop applying a single correction, then stopping.
    pub const ONCE: &str = "Once";
    /// Auto-control loop running continuously.
    pub const CONTINUOUS: &str = "Continuous";
}
