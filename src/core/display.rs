//=========================================================================
// Display Configuration
//=========================================================================
//
// Window and rendering-adjacent flags observed by the backend and the
// application.
//
// Multi-sampling and multi-touch report the ACTUAL state: a request the
// backend cannot honor is ignored and the flag stays off. Width and height
// change only through the resize notification path.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::Capabilities;

//=== DisplayConfig =======================================================

/// Display dimensions and capability flags.
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    width: u32,
    height: u32,
    vsync: bool,
    multi_sampling: bool,
    multi_touch: bool,

    //--- Capability (fixed at construction) ------------------------------
    supports_multi_sampling: bool,
    supports_multi_touch: bool,
}

impl DisplayConfig {
    /// Creates a configuration with the given initial dimensions.
    ///
    /// All flags start off; callers apply initial requests through setters
    /// so capability checks run.
    pub fn new(capabilities: &Capabilities, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            vsync: false,
            multi_sampling: false,
            multi_touch: false,
            supports_multi_sampling: capabilities.multi_sampling,
            supports_multi_touch: capabilities.multi_touch,
        }
    }

    //--- Dimensions -------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Display center in window coordinates.
    pub fn center(&self) -> (i32, i32) {
        ((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// Records new dimensions; returns `true` if they changed.
    pub(crate) fn apply_resize(&mut self, width: u32, height: u32) -> bool {
        let changed = self.width != width || self.height != height;
        self.width = width;
        self.height = height;
        changed
    }

    //--- Flags ------------------------------------------------------------

    pub fn is_vsync(&self) -> bool {
        self.vsync
    }

    pub fn set_vsync(&mut self, enabled: bool) {
        self.vsync = enabled;
    }

    pub fn is_multi_sampling(&self) -> bool {
        self.multi_sampling
    }

    /// Requests multi-sampling; ignored when unsupported.
    pub fn set_multi_sampling(&mut self, enabled: bool) {
        if enabled && !self.supports_multi_sampling {
            debug!(target: "platform", "Multi-sampling not supported, request ignored");
            return;
        }
        self.multi_sampling = enabled;
    }

    pub fn is_multi_touch(&self) -> bool {
        self.multi_touch
    }

    /// Requests multi-touch; ignored when unsupported.
    pub fn set_multi_touch(&mut self, enabled: bool) {
        if enabled && !self.supports_multi_touch {
            debug!(target: "platform", "Multi-touch not supported, request ignored");
            return;
        }
        self.multi_touch = enabled;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
