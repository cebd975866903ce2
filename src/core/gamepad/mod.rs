//=========================================================================
// Gamepad Subsystem
//=========================================================================
//
// Tracks simultaneously connected gamepads with per-device identity and
// incrementally updated state.
//
// Components:
// - `device`: handles, button mappings, descriptors, state, events, polling
// - `manager`: the connected-device map and its lifecycle rules
//
//=========================================================================

//=== Module Declarations =================================================

mod device;
mod manager;

//=== Public API ==========================================================

pub use device::{
    ButtonMapping, Gamepad, GamepadDescriptor, GamepadEvent, GamepadHandle, GamepadPoll,
    GamepadPoller, GamepadState,
};
pub use manager::GamepadManager;
