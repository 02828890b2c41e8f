//! SDL Locality Core
//!
//! The two pieces of logic a client of the SDL API needs before it can mount
//! remote accessions:
//!
//! - `locality`: find out which cloud and region the process runs on, and
//!   the identity artifact that proves it
//! - `sdl`: validate an SDL API response and turn it into domain
//!   accessions
//!
//! ## Example
//!
//! ```ignore
//! use sdl_core::{sdl, LocalityResolver, ProbeConfig};
//!
//! let locator = LocalityResolver::new(ProbeConfig::default())?.resolve().await?;
//! let region = locator.region().await?;
//!
//! let envelope = sdl::parse_response(&body)?;
//! let accessions = sdl::transfigure_response(envelope, sdl::SDL_VERSION, &requested)?;
//! ```

pub mod config;
pub mod error;
pub mod locality;
pub mod model;
pub mod sdl;

pub use config::{ProbeConfig, ProbeTimeouts};
pub use error::{DetectionError, Field, PayloadError, ProbeError, ValidationError};
pub use locality::{LocalityResolver, LocalityType, Locator, Provider};
pub use model::{Accession, File};
