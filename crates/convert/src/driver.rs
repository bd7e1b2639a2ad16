//! Driver capability seam
//!
//! The converter never talks to the cluster. The only thing it needs to know
//! about the connected driver is what value types it can carry natively.

/// Capabilities of the connected driver
pub trait Driver: Send + Sync {
    /// Whether the connection supports native GeoJSON values
    fn has_geo(&self) -> bool;
}

/// Fixed capability set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Native GeoJSON support
    pub geo: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Capabilities { geo: true }
    }
}

impl Capabilities {
    /// A driver without native GeoJSON support
    pub fn without_geo() -> Self {
        Capabilities { geo: false }
    }
}

impl Driver for Capabilities {
    fn has_geo(&self) -> bool {
        self.geo
    }
}
