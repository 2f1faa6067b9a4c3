//! Headless dungeon client.
//!
//! Loads engine settings and a map through `game-content`, binds the hero to
//! a scripted provider and every other creature to the wait fallback, then
//! drives the [`runtime::Runtime`] for a fixed number of ticks.
//!
//! - [`config`] reads [`ClientConfig`] from the environment
//! - [`script`] turns `key:argument` lists into provider input
//! - [`session`] assembles and runs the runtime

pub mod config;
pub mod script;
pub mod session;

pub use config::ClientConfig;
pub use session::Session;
