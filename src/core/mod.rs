//=========================================================================
// Core Systems
//=========================================================================
//
// Backend-independent platform state and routing.
//
// Components:
// - `application`: the `Game` callback surface
// - `time`: monotonic millisecond clock
// - `display`: display dimensions and capability-gated flags
// - `gesture`: gesture vocabulary and registration
// - `input`: input events, mouse capture and the input router
// - `gamepad`: device model, manager and polling
// - `platform_bridge`: backend contract and cross-thread marshaling
//
// Nothing here touches an OS API; backends reach these systems only
// through the runtime's `*_internal` entry points.
//
//=========================================================================

pub mod application;
pub mod display;
pub mod gamepad;
pub mod gesture;
pub mod input;
pub mod platform_bridge;
pub mod time;
