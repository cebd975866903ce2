//=========================================================================
// Aetheric Platform — Library Root
//
// This crate defines the platform abstraction layer of the Aetheric
// engine: one interface over windowing, input, gestures, gamepads and
// the message pump, regardless of the native OS underneath.
//
// Responsibilities:
// - Expose the application binding (`Game`, `PlatformBuilder`, `Platform`)
// - Expose the services an application may call (`PlatformServices`)
// - Keep OS-specific plumbing behind the `Backend` trait
//
// Typical usage:
// ```no_run
// use aetheric_platform::prelude::*;
// use aetheric_platform::platform::desktop::DesktopBackend;
//
// struct MyGame;
//
// impl Game for MyGame {
//     fn frame(&mut self, platform: &mut PlatformServices, _elapsed_ms: f64) {
//         platform.swap_buffers();
//     }
// }
//
// fn main() -> Result<(), PlatformError> {
//     let backend = DesktopBackend::new("My Game")?;
//     let mut platform = PlatformBuilder::new().build(backend, MyGame)?;
//     std::process::exit(platform.enter_message_pump());
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the backend-independent systems (time, display, input
// routing, gestures, gamepads) and the backend contract.
//
// `platform` holds the concrete backends.
//
pub mod core;
pub mod platform;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `runtime` binds an application to a backend and runs the message pump.
//
mod runtime;

//--- Public Exports ------------------------------------------------------

pub use crate::core::application::Game;
pub use crate::core::platform_bridge::PlatformError;
pub use runtime::{Platform, PlatformBuilder, PlatformServices};
