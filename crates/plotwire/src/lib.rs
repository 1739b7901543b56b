#![forbid(unsafe_code)]

//! `plotwire` builds plotly-style chart documents and turns them into html or images.
//!
//! # Features
//!
//! - `render`: html embedding, file output and headless-browser image export
//!   (`plotwire::render`)

pub use plotwire_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use plotwire_render::{
        ImageFormat, OutputFormat, RenderError, RenderOptions, Rendered, SaveOptions, Session,
        SessionConfig, SessionState,
    };

    #[derive(Debug, thiserror::Error)]
    pub enum PlotwireError {
        #[error(transparent)]
        Build(#[from] plotwire_core::Error),
        #[error(transparent)]
        Render(#[from] plotwire_render::RenderError),
    }

    pub type Result<T> = std::result::Result<T, PlotwireError>;

    /// Writes `fig` to `path` with default options, using a throwaway session.
    ///
    /// Image formats start (and then close) a browser on every call; keep a [`Session`] around
    /// when exporting several images.
    pub fn save(fig: &crate::Figure, path: impl AsRef<std::path::Path>) -> Result<()> {
        let session = Session::new(SessionConfig::from_env());
        session.save(fig, path, &SaveOptions::default())?;
        Ok(())
    }
}
