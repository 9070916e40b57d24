//! PrimeTime: a composable, unidirectional state core and the demo app built
//! on it.
//!
//! - [`mvi`] - reducers, optics, combinators and the store
//! - [`app`] - the PrimeTime feature reducers and their composition
//! - [`config`] - TOML configuration
//! - [`driver`] - scripted front end used by the binary
//! - [`telemetry`] - tracing setup

pub mod app;
pub mod config;
pub mod driver;
pub mod mvi;
pub mod telemetry;
