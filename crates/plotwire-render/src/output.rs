//! Output dispatch: html embedding, files on disk and images through the render session.

use crate::config::SessionConfig;
use crate::driver::{DriverLauncher, PlaywrightLauncher};
use crate::format::{ImageFormat, OutputFormat};
use crate::html;
use crate::session::{RenderRequest, RenderSession, SessionState};
use crate::Result;
use plotwire_core::{Figure, SeriesChart};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Image height used when none is given.
pub const DEFAULT_IMAGE_HEIGHT: u32 = 525;

/// `height * sqrt(2)`, rounded down.
pub fn landscape_width(height: u32) -> u32 {
    (f64::from(height) * std::f64::consts::SQRT_2).floor() as u32
}

/// Options of [`Session::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOptions {
    /// Default: inferred from the file extension.
    pub format: Option<OutputFormat>,
    /// Page title of html output (and of the page rendered for images).
    pub title: Option<String>,
    /// Image width in pixels; ignored by html. Default: 700.
    pub width: Option<u32>,
    /// Image height in pixels; ignored by html. Default: 500.
    pub height: Option<u32>,
    /// DOM id of the chart element. Default: a fresh UUID.
    pub element_id: Option<String>,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            format: None,
            title: None,
            width: Some(700),
            height: Some(500),
            element_id: None,
        }
    }
}

/// Options of [`Session::render`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderOptions {
    /// Default: html.
    pub format: Option<OutputFormat>,
    pub element_id: Option<String>,
    /// Use the requirejs fragment understood by notebook front-ends.
    pub notebook: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Html(String),
    Image { format: ImageFormat, bytes: Vec<u8> },
}

impl Rendered {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Rendered::Html(_) => "text/html",
            Rendered::Image { format, .. } => format.mime_type(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Rendered::Html(html) => html.as_bytes(),
            Rendered::Image { bytes, .. } => bytes,
        }
    }
}

/// Process-scoped output state: the figure id counter, whether the library tag has been emitted
/// and the lazily started [`RenderSession`].
///
/// Create one per process and share it by reference. Dropping it shuts the render session down,
/// so a session kept alive until `main` returns never leaks a browser.
pub struct Session {
    config: SessionConfig,
    next_figure_id: AtomicU64,
    load_tag_emitted: AtomicBool,
    renderer: Mutex<RenderSession>,
}

impl Session {
    /// A session whose images are captured by Playwright, started with `config.launcher`.
    pub fn new(config: SessionConfig) -> Self {
        let launcher = PlaywrightLauncher::from_config(&config);
        Self::with_launcher(config, launcher)
    }

    pub fn with_launcher(config: SessionConfig, launcher: impl DriverLauncher + 'static) -> Self {
        Self {
            config,
            next_figure_id: AtomicU64::new(0),
            load_tag_emitted: AtomicBool::new(false),
            renderer: Mutex::new(RenderSession::new(launcher)),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn render_state(&self) -> SessionState {
        self.renderer().state()
    }

    fn renderer(&self) -> MutexGuard<'_, RenderSession> {
        self.renderer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Next sequential element id: `plotwire-1`, `plotwire-2`, ...
    pub fn next_element_id(&self) -> String {
        let n = self.next_figure_id.fetch_add(1, Ordering::Relaxed) + 1;
        format!("plotwire-{n}")
    }

    /// The library tag, exactly once per session and only when enabled.
    fn take_load_tag(&self) -> Option<String> {
        if !self.config.with_library_load_tag || self.load_tag_emitted.swap(true, Ordering::AcqRel)
        {
            return None;
        }
        Some(html::load_tag(&self.config.library_src))
    }

    fn fragment_for(&self, fig: &Figure, element_id: &str) -> Result<String> {
        let tag = self.take_load_tag();
        Ok(html::fragment(&fig.document(), element_id, tag.as_deref())?)
    }

    /// Html fragment of a series chart, with a sequential element id.
    pub fn fragment(&self, chart: &SeriesChart) -> Result<String> {
        let fig = Figure::from_series_chart(chart)?;
        let id = self.next_element_id();
        self.fragment_for(&fig, &id)
    }

    /// Writes `fig` to `path` as a standalone html page or as an image.
    pub fn save(&self, fig: &Figure, path: impl AsRef<Path>, options: &SaveOptions) -> Result<()> {
        let path = path.as_ref();
        let format = match options.format {
            Some(format) => format,
            None => OutputFormat::from_path(path)?,
        };
        match format {
            OutputFormat::Html => {
                let element_id = options
                    .element_id
                    .clone()
                    .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
                self.write_standalone(fig, path, options.title.as_deref(), &element_id)
            }
            OutputFormat::Image(image) => {
                self.render_image(
                    fig,
                    image,
                    Some(path),
                    ImageOptions {
                        title: options.title.as_deref(),
                        width: options.width,
                        height: options.height,
                        element_id: options.element_id.as_deref(),
                    },
                )?;
                Ok(())
            }
        }
    }

    /// Html fragment or image bytes of `fig`.
    pub fn render(&self, fig: &Figure, options: &RenderOptions) -> Result<Rendered> {
        match options.format.unwrap_or(OutputFormat::Html) {
            OutputFormat::Html => {
                let element_id = match &options.element_id {
                    Some(id) => id.clone(),
                    None => self.next_element_id(),
                };
                let html = if options.notebook {
                    html::notebook_fragment(&fig.document(), &element_id)?
                } else {
                    self.fragment_for(fig, &element_id)?
                };
                Ok(Rendered::Html(html))
            }
            OutputFormat::Image(format) => {
                let bytes = self.render_image(
                    fig,
                    format,
                    None,
                    ImageOptions {
                        element_id: options.element_id.as_deref(),
                        ..ImageOptions::default()
                    },
                )?;
                Ok(Rendered::Image { format, bytes })
            }
        }
    }

    /// Closes the browser, if one was started. Further image output fails.
    pub fn shutdown(&self) -> Result<()> {
        self.renderer().shutdown()
    }

    fn write_standalone(
        &self,
        fig: &Figure,
        path: &Path,
        title: Option<&str>,
        element_id: &str,
    ) -> Result<()> {
        let page = html::standalone(
            &fig.document(),
            title.unwrap_or(html::DEFAULT_TITLE),
            &self.config.library_src,
            element_id,
        )?;
        std::fs::write(path, page)?;
        Ok(())
    }

    fn render_image(
        &self,
        fig: &Figure,
        format: ImageFormat,
        output: Option<&Path>,
        options: ImageOptions<'_>,
    ) -> Result<Vec<u8>> {
        let height = options.height.unwrap_or(DEFAULT_IMAGE_HEIGHT);
        let width = options.width.unwrap_or_else(|| landscape_width(height));
        let element_id = match options.element_id {
            Some(id) => format!("plotwire-{id}"),
            None => format!("plotwire-{}", uuid::Uuid::new_v4()),
        };

        let tmp = tempfile::TempDir::new()?;
        let input = tmp.path().join(format!("{element_id}.html"));
        self.write_standalone(fig, &input, options.title, &element_id)?;

        self.renderer().render(RenderRequest {
            input,
            output: output.map(Path::to_path_buf),
            format,
            element_id,
            width,
            height,
        })
    }
}

#[derive(Debug, Default)]
struct ImageOptions<'a> {
    title: Option<&'a str>,
    width: Option<u32>,
    height: Option<u32>,
    element_id: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_width_rounds_down() {
        assert_eq!(landscape_width(525), 742);
        assert_eq!(landscape_width(500), 707);
    }

    #[test]
    fn element_ids_count_up() {
        let session = Session::new(SessionConfig::default());
        assert_eq!(session.next_element_id(), "plotwire-1");
        assert_eq!(session.next_element_id(), "plotwire-2");
        assert_eq!(session.render_state(), SessionState::Unstarted);
    }

    #[test]
    fn the_load_tag_is_emitted_once() {
        let session = Session::new(SessionConfig::default());
        assert!(session.take_load_tag().is_some());
        assert!(session.take_load_tag().is_none());

        let quiet = Session::new(SessionConfig {
            with_library_load_tag: false,
            ..SessionConfig::default()
        });
        assert!(quiet.take_load_tag().is_none());
    }

    #[test]
    fn rendered_reports_its_mime_type() {
        let image = Rendered::Image {
            format: ImageFormat::Jpeg,
            bytes: vec![0xff, 0xd8],
        };
        assert_eq!(image.mime_type(), "image/jpeg");
        assert_eq!(image.as_bytes(), &[0xff, 0xd8]);
        assert_eq!(Rendered::Html(String::new()).mime_type(), "text/html");
    }
}
