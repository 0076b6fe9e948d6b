//! Device-handle seam over a GenICam-style feature register space.
//!
//! Everything the driver does to a camera goes through the [`NodeMap`]
//! trait: reading and writing named features, executing command features,
//! and querying per-feature bounds and writability. A vendor transport
//! (USB3 Vision, GigE Vision) binds to this trait out-of-tree; the
//! in-tree [`mock::MockDevice`] emulates a camera register space for tests
//! and SDK-free development.
//!
//! The crate assumes exclusive, serialized use of a node map by a single
//! owning thread. Every operation is a blocking request/response
//! round-trip; there are no transactions, and a failed multi-register
//! protocol leaves whatever partial state the device has already latched.

pub mod features;
pub mod mock;
mod node;

pub use node::FloatNode;

use crate::error::CamResult;

/// Register access on a physical or emulated camera, by feature name.
///
/// All fallible operations report failures as
/// [`CamError::DeviceAccess`](crate::error::CamError::DeviceAccess) with a
/// description of what the device rejected.
pub trait NodeMap {
    /// Read a float feature.
    fn get_float(&self, name: &str) -> CamResult<f64>;

    /// Write a float feature. The device may clamp or quantize the value;
    /// read the feature back to observe what was actually latched.
    fn set_float(&self, name: &str, value: f64) -> CamResult<()>;

    /// Read an integer feature.
    fn get_int(&self, name: &str) -> CamResult<i64>;

    /// Write an integer feature. Out-of-range values are rejected.
    fn set_int(&self, name: &str, value: i64) -> CamResult<()>;

    /// Read the symbolic entry currently selected by an enumeration feature.
    fn get_enum(&self, name: &str) -> CamResult<String>;

    /// Select an enumeration entry by its symbolic name.
    fn set_enum(&self, name: &str, entry: &str) -> CamResult<()>;

    /// Execute a command feature.
    fn execute(&self, name: &str) -> CamResult<()>;

    /// Minimum and maximum of a float feature.
    fn float_bounds(&self, name: &str) -> CamResult<(f64, f64)>;

    /// Minimum and maximum of an integer feature.
    fn int_bounds(&self, name: &str) -> CamResult<(i64, i64)>;

    /// Whether the feature currently reports itself as writable.
    ///
    /// This is a query, not a guarantee: the report may be stale, and the
    /// sequencer programmer tolerates a false negative on the sequencer
    /// mode register.
    fn is_writable(&self, name: &str) -> bool;
}
