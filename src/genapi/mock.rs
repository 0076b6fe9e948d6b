//! Emulated camera device for tests and SDK-free development.
//!
//! `MockDevice` models the register space of the USB camera family closely
//! enough to exercise the full startup and sequencer protocol without
//! hardware attached:
//!
//! - typed features with bounds, increments and enforced writability,
//! - exposure clamping and quantization (so a requested value and the value
//!   the device actually latches can differ),
//! - the sequencer set bank with per-path transition wiring, including the
//!   register-state rules around configuration mode,
//! - `UserSetLoad` restoring factory defaults (which also reverts the
//!   trigger configuration and clears the set bank),
//! - simple execution of a programmed cycle: frame-start pulses advance
//!   along path 1, a matching software signal follows path 0.
//!
//! Failure-path tests can inject faults per feature (`fail_after`) and make
//! the writability query lie (`report_not_writable`).

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use log::debug;

use crate::error::{CamError, CamResult};
use crate::genapi::features::{self, entry};
use crate::genapi::NodeMap;

const EXPOSURE_MIN_US: f64 = 28.0;
const EXPOSURE_MAX_US: f64 = 10_000_000.0;
const EXPOSURE_INC_US: f64 = 1.0;
const GAIN_MIN_DB: f64 = 0.0;
const GAIN_MAX_DB: f64 = 36.0;
const SEQUENCER_SET_MAX: i64 = 7;

/// One transition path of a sequencer set.
#[derive(Clone, Debug, PartialEq)]
pub struct SequencerPath {
    /// Set activated when this path's trigger fires.
    pub next_set: i64,
    /// Device signal that fires this path.
    pub trigger_source: String,
}

impl SequencerPath {
    fn idle() -> Self {
        Self {
            next_set: 0,
            trigger_source: entry::OFF.to_string(),
        }
    }
}

/// One saved sequencer set, as persisted by `SequencerSetSave`.
#[derive(Clone, Debug)]
pub struct SequencerSet {
    /// Exposure time latched for this set, in microseconds.
    pub exposure_us: f64,
    /// Transition paths (path 0 and path 1).
    pub paths: [SequencerPath; 2],
}

enum FeatureKind {
    Float { value: f64, min: f64, max: f64, inc: f64 },
    Int { value: i64, min: i64, max: i64 },
    Enum { value: String, entries: &'static [&'static str] },
    Command,
}

struct Feature {
    kind: FeatureKind,
    writable: bool,
}

impl Feature {
    fn float(value: f64, min: f64, max: f64, inc: f64) -> Self {
        Self {
            kind: FeatureKind::Float { value, min, max, inc },
            writable: true,
        }
    }

    fn int(value: i64, min: i64, max: i64) -> Self {
        Self {
            kind: FeatureKind::Int { value, min, max },
            writable: true,
        }
    }

    fn enumeration(value: &'static str, entries: &'static [&'static str]) -> Self {
        Self {
            kind: FeatureKind::Enum {
                value: value.to_string(),
                entries,
            },
            writable: true,
        }
    }

    fn command() -> Self {
        Self {
            kind: FeatureKind::Command,
            writable: true,
        }
    }

    fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }
}

struct DeviceState {
    features: HashMap<&'static str, Feature>,
    /// Working transition-path registers, addressed by `SequencerPathSelector`.
    paths: [SequencerPath; 2],
    saved_sets: BTreeMap<i64, SequencerSet>,
    active_set: i64,
    /// Remaining successful accesses per feature before an injected fault.
    fail_after: HashMap<String, u32>,
    /// Features whose writability query lies (writes still enforced normally).
    unwritable_reports: HashSet<String>,
}

impl DeviceState {
    fn new() -> Self {
        Self {
            features: Self::default_features(),
            paths: [SequencerPath::idle(), SequencerPath::idle()],
            saved_sets: BTreeMap::new(),
            active_set: 0,
            fail_after: HashMap::new(),
            unwritable_reports: HashSet::new(),
        }
    }

    /// Factory defaults, as restored by loading the `Default` user set.
    fn default_features() -> HashMap<&'static str, Feature> {
        let mut map = HashMap::new();
        map.insert(
            features::EXPOSURE_TIME,
            Feature::float(10_000.0, EXPOSURE_MIN_US, EXPOSURE_MAX_US, EXPOSURE_INC_US),
        );
        map.insert(
            features::GAIN,
            Feature::float(0.0, GAIN_MIN_DB, GAIN_MAX_DB, 0.0),
        );
        map.insert(
            features::AUTO_GAIN_LOWER_LIMIT,
            Feature::float(GAIN_MIN_DB, GAIN_MIN_DB, GAIN_MAX_DB, 0.0),
        );
        map.insert(
            features::AUTO_GAIN_UPPER_LIMIT,
            Feature::float(GAIN_MAX_DB, GAIN_MIN_DB, GAIN_MAX_DB, 0.0),
        );
        map.insert(
            features::AUTO_EXPOSURE_TIME_LOWER_LIMIT,
            Feature::float(100.0, EXPOSURE_MIN_US, EXPOSURE_MAX_US, 0.0),
        );
        map.insert(
            features::AUTO_EXPOSURE_TIME_UPPER_LIMIT,
            Feature::float(50_000.0, EXPOSURE_MIN_US, EXPOSURE_MAX_US, 0.0),
        );
        map.insert(
            features::AUTO_TARGET_BRIGHTNESS,
            Feature::float(0.2, 0.0, 1.0, 0.0),
        );
        map.insert(
            features::RESULTING_FRAME_RATE,
            Feature::float(42.5, 0.0, 1_000.0, 0.0).read_only(),
        );
        map.insert(
            features::GAIN_AUTO,
            Feature::enumeration(
                entry::CONTINUOUS,
                &[entry::OFF, entry::ONCE, entry::CONTINUOUS],
            ),
        );
        map.insert(
            features::EXPOSURE_AUTO,
            Feature::enumeration(entry::OFF, &[entry::OFF, entry::ONCE, entry::CONTINUOUS]),
        );
        map.insert(
            features::AUTO_FUNCTION_PROFILE,
            Feature::enumeration(
                entry::MINIMIZE_EXPOSURE_TIME,
                &[entry::MINIMIZE_GAIN, entry::MINIMIZE_EXPOSURE_TIME],
            ),
        );
        map.insert(
            features::TRIGGER_SOURCE,
            Feature::enumeration(entry::LINE1, &[entry::SOFTWARE, entry::LINE1]),
        );
        map.insert(
            features::TRIGGER_MODE,
            Feature::enumeration(entry::OFF, &[entry::OFF, entry::ON]),
        );
        map.insert(
            features::USER_SET_SELECTOR,
            Feature::enumeration(entry::DEFAULT, &[entry::DEFAULT, entry::USER_SET_1]),
        );
        map.insert(features::USER_SET_LOAD, Feature::command());
        map.insert(
            features::SEQUENCER_MODE,
            Feature::enumeration(entry::OFF, &[entry::OFF, entry::ON]),
        );
        map.insert(
            features::SEQUENCER_CONFIGURATION_MODE,
            Feature::enumeration(entry::OFF, &[entry::OFF, entry::ON]),
        );
        map.insert(
            features::SEQUENCER_SET_SELECTOR,
            Feature::int(0, 0, SEQUENCER_SET_MAX),
        );
        map.insert(
            features::SEQUENCER_SET_NEXT,
            Feature::int(0, 0, SEQUENCER_SET_MAX),
        );
        map.insert(features::SEQUENCER_PATH_SELECTOR, Feature::int(0, 0, 1));
        map.insert(
            features::SEQUENCER_TRIGGER_SOURCE,
            Feature::enumeration(
                entry::OFF,
                &[
                    entry::OFF,
                    entry::SOFTWARE_SIGNAL_1,
                    entry::SOFTWARE_SIGNAL_2,
                    entry::SOFTWARE_SIGNAL_3,
                    entry::FRAME_START,
                ],
            ),
        );
        map.insert(features::SEQUENCER_SET_SAVE, Feature::command());
        map.insert(features::SEQUENCER_SET_LOAD, Feature::command());
        map.insert(
            features::SOFTWARE_SIGNAL_SELECTOR,
            Feature::enumeration(
                entry::SOFTWARE_SIGNAL_1,
                &[
                    entry::SOFTWARE_SIGNAL_1,
                    entry::SOFTWARE_SIGNAL_2,
                    entry::SOFTWARE_SIGNAL_3,
                ],
            ),
        );
        map.insert(features::SOFTWARE_SIGNAL_PULSE, Feature::command());
        map
    }

    fn feature(&self, name: &str) -> CamResult<&Feature> {
        self.features
            .get(name)
            .ok_or_else(|| CamError::DeviceAccess(format!("unknown feature '{name}'")))
    }

    fn feature_mut(&mut self, name: &str) -> CamResult<&mut Feature> {
        self.features
            .get_mut(name)
            .ok_or_else(|| CamError::DeviceAccess(format!("unknown feature '{name}'")))
    }

    /// Internal register read, without access bookkeeping.
    fn float_value(&self, name: &str) -> CamResult<f64> {
        match self.feature(name)?.kind {
            FeatureKind::Float { value, .. } => Ok(value),
            _ => Err(CamError::DeviceAccess(format!(
                "'{name}' is not a float feature"
            ))),
        }
    }

    fn store_float(&mut self, name: &str, new: f64) -> CamResult<()> {
        match &mut self.feature_mut(name)?.kind {
            FeatureKind::Float { value, min, max, inc } => {
                let mut latched = new.clamp(*min, *max);
                if *inc > 0.0 {
                    latched = (*min + ((latched - *min) / *inc).round() * *inc).clamp(*min, *max);
                }
                *value = latched;
                Ok(())
            }
            _ => Err(CamError::DeviceAccess(format!(
                "'{name}' is not a float feature"
            ))),
        }
    }

    fn int_value(&self, name: &str) -> CamResult<i64> {
        match self.feature(name)?.kind {
            FeatureKind::Int { value, .. } => Ok(value),
            _ => Err(CamError::DeviceAccess(format!(
                "'{name}' is not an integer feature"
            ))),
        }
    }

    fn enum_value(&self, name: &str) -> CamResult<String> {
        match &self.feature(name)?.kind {
            FeatureKind::Enum { value, .. } => Ok(value.clone()),
            _ => Err(CamError::DeviceAccess(format!(
                "'{name}' is not an enumeration feature"
            ))),
        }
    }

    fn path_index(&self) -> CamResult<usize> {
        Ok(self.int_value(features::SEQUENCER_PATH_SELECTOR)? as usize)
    }

    fn selected_set(&self) -> CamResult<i64> {
        self.int_value(features::SEQUENCER_SET_SELECTOR)
    }

    fn sequencer_running(&self) -> bool {
        matches!(self.enum_value(features::SEQUENCER_MODE).as_deref(), Ok(entry::ON))
    }

    /// Entering a set latches its saved exposure into the working register.
    fn apply_active_set(&mut self) -> CamResult<()> {
        if let Some(set) = self.saved_sets.get(&self.active_set) {
            let exposure = set.exposure_us;
            self.store_float(features::EXPOSURE_TIME, exposure)?;
        }
        Ok(())
    }

    /// Follow the first path of the active set whose trigger matches.
    fn advance_on(&mut self, trigger: &str) -> CamResult<()> {
        let Some(set) = self.saved_sets.get(&self.active_set) else {
            return Ok(());
        };
        if let Some(path) = set.paths.iter().find(|p| p.trigger_source == trigger) {
            self.active_set = path.next_set;
            self.apply_active_set()?;
        }
        Ok(())
    }
}

/// Emulated camera register space implementing [`NodeMap`].
pub struct MockDevice {
    state: Mutex<DeviceState>,
}

impl Default for MockDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDevice {
    /// Create an emulated camera with factory-default registers.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(DeviceState::new()),
        }
    }

    fn state(&self) -> MutexGuard<'_, DeviceState> {
        // Recover from a poisoned lock; device state stays usable for tests.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Consume one access on `name`, failing once the injected budget is spent.
    fn check_access(state: &mut DeviceState, name: &str) -> CamResult<()> {
        match state.fail_after.get(name).copied() {
            Some(0) => {
                state.fail_after.remove(name);
                return Err(CamError::DeviceAccess(format!(
                    "injected fault on '{name}'"
                )));
            }
            Some(remaining) => {
                state.fail_after.insert(name.to_string(), remaining - 1);
            }
            None => {}
        }
        state.feature(name)?;
        Ok(())
    }

    /// Let the next `successful_accesses` operations on `name` succeed, then
    /// fail the following one with a device access error (one-shot).
    pub fn fail_after(&self, name: &str, successful_accesses: u32) {
        self.state()
            .fail_after
            .insert(name.to_string(), successful_accesses);
    }

    /// Make the writability query report `name` as not writable while writes
    /// keep being enforced normally. Models a stale or wrong report.
    pub fn report_not_writable(&self, name: &str) {
        self.state().unwritable_reports.insert(name.to_string());
    }

    /// Saved sequencer sets, keyed by set index.
    pub fn saved_sets(&self) -> BTreeMap<i64, SequencerSet> {
        self.state().saved_sets.clone()
    }

    /// Index of the set the running sequencer is currently in.
    pub fn active_set(&self) -> i64 {
        self.state().active_set
    }

    /// Fire the device-internal frame-start signal.
    ///
    /// With the sequencer running this advances along a frame-start
    /// transition path of the active set; otherwise it is a no-op.
    pub fn pulse_frame_start(&self) -> CamResult<()> {
        let mut state = self.state();
        if state.sequencer_running() {
            state.advance_on(entry::FRAME_START)?;
        }
        Ok(())
    }

    fn execute_command(state: &mut DeviceState, name: &str) -> CamResult<()> {
        match name {
            features::USER_SET_LOAD => {
                let selected = state.enum_value(features::USER_SET_SELECTOR)?;
                if selected != entry::DEFAULT {
                    return Err(CamError::DeviceAccess(format!(
                        "user set '{selected}' has no saved content"
                    )));
                }
                debug!("UserSetLoad: restoring factory defaults");
                state.features = DeviceState::default_features();
                state.paths = [SequencerPath::idle(), SequencerPath::idle()];
                state.saved_sets.clear();
                state.active_set = 0;
                Ok(())
            }
            features::SEQUENCER_SET_SAVE => {
                if state.enum_value(features::SEQUENCER_CONFIGURATION_MODE)? != entry::ON {
                    return Err(CamError::DeviceAccess(
                        "SequencerSetSave is not available while SequencerConfigurationMode \
                         is Off"
                            .to_string(),
                    ));
                }
                let index = state.selected_set()?;
                let set = SequencerSet {
                    exposure_us: state.float_value(features::EXPOSURE_TIME)?,
                    paths: state.paths.clone(),
                };
                debug!(
                    "SequencerSetSave: set {} exposure {} us",
                    index, set.exposure_us
                );
                state.saved_sets.insert(index, set);
                Ok(())
            }
            features::SEQUENCER_SET_LOAD => {
                if state.enum_value(features::SEQUENCER_CONFIGURATION_MODE)? != entry::ON {
                    return Err(CamError::DeviceAccess(
                        "SequencerSetLoad is not available while SequencerConfigurationMode \
                         is Off"
                            .to_string(),
                    ));
                }
                let index = state.selected_set()?;
                let set = state.saved_sets.get(&index).cloned().ok_or_else(|| {
                    CamError::DeviceAccess(format!(
                        "sequencer set {index} has no saved configuration"
                    ))
                })?;
                state.paths = set.paths.clone();
                state.store_float(features::EXPOSURE_TIME, set.exposure_us)?;
                Ok(())
            }
            features::SOFTWARE_SIGNAL_PULSE => {
                let signal = state.enum_value(features::SOFTWARE_SIGNAL_SELECTOR)?;
                if state.sequencer_running() {
                    state.advance_on(&signal)?;
                }
                Ok(())
            }
            _ => match state.feature(name)?.kind {
                FeatureKind::Command => Ok(()),
                _ => Err(CamError::DeviceAccess(format!(
                    "'{name}' is not a command feature"
                ))),
            },
        }
    }
}

impl NodeMap for MockDevice {
    fn get_float(&self, name: &str) -> CamResult<f64> {
        let mut state = self.state();
        Self::check_access(&mut state, name)?;
        state.float_value(name)
    }

    fn set_float(&self, name: &str, value: f64) -> CamResult<()> {
        let mut state = self.state();
        Self::check_access(&mut state, name)?;
        if !state.feature(name)?.writable {
            return Err(CamError::DeviceAccess(format!("'{name}' is not writable")));
        }
        if !value.is_finite() {
            return Err(CamError::DeviceAccess(format!(
                "non-finite value rejected for '{name}'"
            )));
        }
        state.store_float(name, value)
    }

    fn get_int(&self, name: &str) -> CamResult<i64> {
        let mut state = self.state();
        Self::check_access(&mut state, name)?;
        if name == features::SEQUENCER_SET_NEXT {
            let path = state.path_index()?;
            return Ok(state.paths[path].next_set);
        }
        state.int_value(name)
    }

    fn set_int(&self, name: &str, value: i64) -> CamResult<()> {
        let mut state = self.state();
        Self::check_access(&mut state, name)?;
        if !state.feature(name)?.writable {
            return Err(CamError::DeviceAccess(format!("'{name}' is not writable")));
        }
        let (min, max) = match state.feature(name)?.kind {
            FeatureKind::Int { min, max, .. } => (min, max),
            _ => {
                return Err(CamError::DeviceAccess(format!(
                    "'{name}' is not an integer feature"
                )))
            }
        };
        if value < min || value > max {
            return Err(CamError::DeviceAccess(format!(
                "value {value} out of range [{min}, {max}] for '{name}'"
            )));
        }
        if name == features::SEQUENCER_SET_NEXT {
            let path = state.path_index()?;
            state.paths[path].next_set = value;
        }
        match &mut state.feature_mut(name)?.kind {
            FeatureKind::Int { value: stored, .. } => *stored = value,
            _ => unreachable!(),
        }
        Ok(())
    }

    fn get_enum(&self, name: &str) -> CamResult<String> {
        let mut state = self.state();
        Self::check_access(&mut state, name)?;
        if name == features::SEQUENCER_TRIGGER_SOURCE {
            let path = state.path_index()?;
            return Ok(state.paths[path].trigger_source.clone());
        }
        state.enum_value(name)
    }

    fn set_enum(&self, name: &str, entry_name: &str) -> CamResult<()> {
        let mut state = self.state();
        Self::check_access(&mut state, name)?;
        if !state.feature(name)?.writable {
            return Err(CamError::DeviceAccess(format!("'{name}' is not writable")));
        }
        let entries = match &state.feature(name)?.kind {
            FeatureKind::Enum { entries, .. } => *entries,
            _ => {
                return Err(CamError::DeviceAccess(format!(
                    "'{name}' is not an enumeration feature"
                )))
            }
        };
        if !entries.contains(&entry_name) {
            return Err(CamError::DeviceAccess(format!(
                "'{entry_name}' is not a valid entry of '{name}'"
            )));
        }
        if name == features::SEQUENCER_MODE
            && entry_name == entry::ON
            && state.enum_value(features::SEQUENCER_CONFIGURATION_MODE)? == entry::ON
        {
            return Err(CamError::DeviceAccess(
                "SequencerMode cannot be enabled while SequencerConfigurationMode is On"
                    .to_string(),
            ));
        }
        if name == features::SEQUENCER_TRIGGER_SOURCE {
            let path = state.path_index()?;
            state.paths[path].trigger_source = entry_name.to_string();
        }
        match &mut state.feature_mut(name)?.kind {
            FeatureKind::Enum { value, .. } => *value = entry_name.to_string(),
            _ => unreachable!(),
        }
        // Starting the sequencer activates the initial set.
        if name == features::SEQUENCER_MODE && entry_name == entry::ON {
            state.active_set = 0;
            state.apply_active_set()?;
        }
        Ok(())
    }

    fn execute(&self, name: &str) -> CamResult<()> {
        let mut state = self.state();
        Self::check_access(&mut state, name)?;
        Self::execute_command(&mut state, name)
    }

    fn float_bounds(&self, name: &str) -> CamResult<(f64, f64)> {
        let mut state = self.state();
        Self::check_access(&mut state, name)?;
        match state.feature(name)?.kind {
            FeatureKind::Float { min, max, .. } => Ok((min, max)),
            _ => Err(CamError::DeviceAccess(format!(
                "'{name}' is not a float feature"
            ))),
        }
    }

    fn int_bounds(&self, name: &str) -> CamResult<(i64, i64)> {
        let mut state = self.state();
        Self::check_access(&mut state, name)?;
        match state.feature(name)?.kind {
            FeatureKind::Int { min, max, .. } => Ok((min, max)),
            _ => Err(CamError::DeviceAccess(format!(
                "'{name}' is not an integer feature"
            ))),
        }
    }

    fn is_writable(&self, name: &str) -> bool {
        let state = self.state();
        if state.unwritable_reports.contains(name) {
            return false;
        }
        state.features.get(name).map(|f| f.writable).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposure_is_clamped_and_quantized() {
        let device = MockDevice::new();
        device.set_float(features::EXPOSURE_TIME, 150.4).unwrap();
        assert_eq!(device.get_float(features::EXPOSURE_TIME).unwrap(), 150.0);

        device.set_float(features::EXPOSURE_TIME, 5.0).unwrap();
        assert_eq!(
            device.get_float(features::EXPOSURE_TIME).unwrap(),
            EXPOSURE_MIN_US
        );

        device.set_float(features::EXPOSURE_TIME, 2.0e7).unwrap();
        assert_eq!(
            device.get_float(features::EXPOSURE_TIME).unwrap(),
            EXPOSURE_MAX_US
        );
    }

    #[test]
    fn read_only_feature_rejects_writes() {
        let device = MockDevice::new();
        let err = device
            .set_float(features::RESULTING_FRAME_RATE, 10.0)
            .unwrap_err();
        assert!(err.to_string().contains("not writable"));
        assert!(!device.is_writable(features::RESULTING_FRAME_RATE));
    }

    #[test]
    fn unknown_feature_is_rejected() {
        let device = MockDevice::new();
        assert!(device.get_float("NoSuchFeature").is_err());
        assert!(device.execute("NoSuchCommand").is_err());
        assert!(!device.is_writable("NoSuchFeature"));
    }

    #[test]
    fn enum_entry_is_validated() {
        let device = MockDevice::new();
        let err = device
            .set_enum(features::TRIGGER_SOURCE, "Line9")
            .unwrap_err();
        assert!(err.to_string().contains("not a valid entry"));
    }

    #[test]
    fn type_mismatch_is_rejected() {
        let device = MockDevice::new();
        assert!(device.get_float(features::TRIGGER_MODE).is_err());
        assert!(device.get_enum(features::EXPOSURE_TIME).is_err());
        assert!(device.execute(features::GAIN).is_err());
    }

    #[test]
    fn non_finite_float_is_rejected() {
        let device = MockDevice::new();
        assert!(device.set_float(features::EXPOSURE_TIME, f64::NAN).is_err());
        assert!(device
            .set_float(features::EXPOSURE_TIME, f64::INFINITY)
            .is_err());
    }

    #[test]
    fn save_requires_configuration_mode() {
        let device = MockDevice::new();
        let err = device.execute(features::SEQUENCER_SET_SAVE).unwrap_err();
        assert!(err.to_string().contains("SequencerConfigurationMode"));

        device
            .set_enum(features::SEQUENCER_CONFIGURATION_MODE, entry::ON)
            .unwrap();
        device.execute(features::SEQUENCER_SET_SAVE).unwrap();
        assert_eq!(device.saved_sets().len(), 1);
    }

    #[test]
    fn sequencer_set_load_restores_working_registers() {
        let device = MockDevice::new();
        device
            .set_enum(features::SEQUENCER_CONFIGURATION_MODE, entry::ON)
            .unwrap();
        device.set_float(features::EXPOSURE_TIME, 500.0).unwrap();
        device.set_int(features::SEQUENCER_PATH_SELECTOR, 1).unwrap();
        device.set_int(features::SEQUENCER_SET_NEXT, 4).unwrap();
        device.execute(features::SEQUENCER_SET_SAVE).unwrap();

        device.set_float(features::EXPOSURE_TIME, 9_000.0).unwrap();
        device.set_int(features::SEQUENCER_SET_NEXT, 7).unwrap();

        device.execute(features::SEQUENCER_SET_LOAD).unwrap();
        assert_eq!(device.get_float(features::EXPOSURE_TIME).unwrap(), 500.0);
        assert_eq!(device.get_int(features::SEQUENCER_SET_NEXT).unwrap(), 4);

        // A set that was never saved cannot be loaded.
        device.set_int(features::SEQUENCER_SET_SELECTOR, 5).unwrap();
        let err = device.execute(features::SEQUENCER_SET_LOAD).unwrap_err();
        assert!(err.to_string().contains("no saved configuration"));
    }

    #[test]
    fn sequencer_mode_rejected_while_configuring() {
        let device = MockDevice::new();
        device
            .set_enum(features::SEQUENCER_CONFIGURATION_MODE, entry::ON)
            .unwrap();
        let err = device
            .set_enum(features::SEQUENCER_MODE, entry::ON)
            .unwrap_err();
        assert!(err.to_string().contains("SequencerConfigurationMode"));
    }

    #[test]
    fn user_set_load_restores_defaults() {
        let device = MockDevice::new();
        device
            .set_enum(features::TRIGGER_SOURCE, entry::SOFTWARE)
            .unwrap();
        device
            .set_enum(features::SEQUENCER_CONFIGURATION_MODE, entry::ON)
            .unwrap();
        device.execute(features::SEQUENCER_SET_SAVE).unwrap();

        device.execute(features::USER_SET_LOAD).unwrap();

        assert_eq!(
            device.get_enum(features::TRIGGER_SOURCE).unwrap(),
            entry::LINE1
        );
        assert!(device.saved_sets().is_empty());
        assert_eq!(
            device.get_enum(features::SEQUENCER_CONFIGURATION_MODE).unwrap(),
            entry::OFF
        );
    }

    #[test]
    fn injected_fault_fires_once_after_budget() {
        let device = MockDevice::new();
        device.fail_after(features::GAIN, 2);
        assert!(device.get_float(features::GAIN).is_ok());
        assert!(device.get_float(features::GAIN).is_ok());
        assert!(device.get_float(features::GAIN).is_err());
        assert!(device.get_float(features::GAIN).is_ok());
    }

    #[test]
    fn writability_report_can_lie() {
        let device = MockDevice::new();
        device.report_not_writable(features::SEQUENCER_MODE);
        assert!(!device.is_writable(features::SEQUENCER_MODE));
        // Writes still succeed; only the report lies.
        device
            .set_enum(features::SEQUENCER_MODE, entry::OFF)
            .unwrap();
    }

    #[test]
    fn set_next_routes_through_selected_path() {
        let device = MockDevice::new();
        device.set_int(features::SEQUENCER_PATH_SELECTOR, 0).unwrap();
        device.set_int(features::SEQUENCER_SET_NEXT, 3).unwrap();
        device.set_int(features::SEQUENCER_PATH_SELECTOR, 1).unwrap();
        device.set_int(features::SEQUENCER_SET_NEXT, 5).unwrap();

        assert_eq!(device.get_int(features::SEQUENCER_SET_NEXT).unwrap(), 5);
        device.set_int(features::SEQUENCER_PATH_SELECTOR, 0).unwrap();
        assert_eq!(device.get_int(features::SEQUENCER_SET_NEXT).unwrap(), 3);
    }
}
