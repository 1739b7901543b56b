#![forbid(unsafe_code)]

//! Html embedding and image export of plotwire chart documents.
//!
//! [`Session`] is the entry point: it hands out element ids, emits the visualization library's
//! load tag once, writes standalone pages and captures images through a headless browser that
//! is started on first use and closed when the session is dropped.

pub mod config;
pub mod driver;
pub mod error;
pub mod format;
pub mod html;
pub mod output;
pub mod session;

pub use config::SessionConfig;
pub use driver::{BrowserDriver, DriverLauncher, PlaywrightLauncher};
pub use error::{RenderError, Result};
pub use format::{ImageFormat, OutputFormat};
pub use output::{RenderOptions, Rendered, SaveOptions, Session};
pub use session::{RenderRequest, RenderSession, SessionState};
