// -- Lint policy ---------------------------------------------------------
// Broad clippy groups and the cast/float allowances live in Cargo.toml
// `[workspace.lints]`; the denials below restate the ones that must never
// be relaxed locally.

// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Unit tests may unwrap freely.
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! Click-to-reveal interaction for 3D showcase scenes.
//!
//! A pointer click is projected into the scene; if the ray crosses the
//! node named by the scene's overlay options, a two-panel overlay (dimmer
//! plus iframe frame) fades in and the orbit camera freezes. A cancel key
//! reverses it. All timing runs on a logical clock, so the whole lifecycle
//! is deterministic and testable without a browser.
//!
//! # Key entry points
//!
//! - [`reveal::PickController`] - the controller and its state machine
//! - [`scene::SceneProvider`] / [`scene::Stage`] - camera, controls, ray
//!   casting
//! - [`overlay::OverlayView`] / [`overlay::OverlayPanels`] - the panels
//! - [`assets::AssetRegistry`] - single-resolution asset handles
//! - [`options::Options`] - scene presets (TOML)
//! - [`session`] - scripted input replay used by the `vitrine` binary
//!
//! With the `web` feature, `web::start` binds everything to the DOM.

pub mod assets;
pub mod camera;
pub mod command;
pub mod error;
pub mod input;
pub mod options;
pub mod overlay;
pub mod reveal;
pub mod scene;
pub mod session;
pub mod util;
#[cfg(feature = "web")]
pub mod web;

pub use command::VitrineCommand;
pub use error::VitrineError;
pub use options::{Options, ScenePreset};
pub use reveal::{PickController, PickOutcome};
