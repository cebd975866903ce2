//=========================================================================
// Platform Backends
//=========================================================================
//
// Concrete `Backend` implementations.
//
// Backends:
// - `headless`: scripted, windowless; every native request is recorded
// - `desktop`: Winit window and input for Windows, macOS and Linux, with
//   gilrs gamepads behind the `gilrs` feature and native file dialogs
//   behind `file-dialog`
//
// Backends only translate OS notifications into `NativeEvent`s and carry
// out native requests. All routing, filtering and state lives in `core`.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod headless;

#[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
pub mod desktop;

#[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
mod input_processor;

#[cfg(feature = "gilrs")]
mod gilrs_gamepads;
