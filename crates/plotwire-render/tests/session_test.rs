use plotwire_core::{BarSpec, Figure, Series, SeriesChart, SeriesKind};
use plotwire_render::{
    BrowserDriver, DriverLauncher, ImageFormat, OutputFormat, RenderError, RenderOptions,
    RenderRequest, Rendered, SaveOptions, Session, SessionConfig, SessionState,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

const LOAD_TAG: &str = "<script type=\"text/javascript\" src=";

/// Records every request and "captures" an image whose bytes are the element id.
#[derive(Clone, Default)]
struct FakeBrowser {
    requests: Arc<Mutex<Vec<RenderRequest>>>,
    finished: Arc<AtomicBool>,
    in_flight: Arc<AtomicBool>,
    unavailable: bool,
}

struct FakeDriver(FakeBrowser);

impl BrowserDriver for FakeDriver {
    fn render(&mut self, request: &RenderRequest) -> plotwire_render::Result<Vec<u8>> {
        assert!(
            !self.0.in_flight.swap(true, Ordering::SeqCst),
            "overlapping render requests"
        );
        let page = std::fs::read_to_string(&request.input)?;
        assert!(page.contains(&format!("<div id=\"{}\"", request.element_id)));
        let bytes = request.element_id.clone().into_bytes();
        if let Some(output) = &request.output {
            std::fs::write(output, &bytes)?;
        }
        self.0.requests.lock().unwrap().push(request.clone());
        self.0.in_flight.store(false, Ordering::SeqCst);
        Ok(bytes)
    }

    fn finish(&mut self) -> plotwire_render::Result<()> {
        self.0.finished.store(true, Ordering::SeqCst);
        Ok(())
    }
}

impl DriverLauncher for FakeBrowser {
    fn launch(&self) -> plotwire_render::Result<Box<dyn BrowserDriver>> {
        if self.unavailable {
            return Err(RenderError::DriverUnavailable {
                command: "fake".to_string(),
                message: "install playwright".to_string(),
            });
        }
        Ok(Box::new(FakeDriver(self.clone())))
    }
}

impl FakeBrowser {
    fn requests(&self) -> Vec<RenderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

fn session(browser: &FakeBrowser) -> Session {
    Session::with_launcher(SessionConfig::default(), browser.clone())
}

fn figure() -> Figure {
    let mut fig = Figure::new();
    fig.bar(BarSpec::new(vec![0.0, 1.0], vec![10.0, 20.0]))
        .expect("bar");
    fig
}

#[test]
fn save_html_writes_a_standalone_page() {
    let browser = FakeBrowser::default();
    let session = session(&browser);
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("x.html");

    session
        .save(&figure(), &path, &SaveOptions::default())
        .expect("save html");

    let page = std::fs::read_to_string(&path).expect("read html");
    assert_eq!(page.matches(LOAD_TAG).count(), 1);
    assert!(page.contains("<title>plotwire plot</title>"));
    assert!(page.contains("\"y\":[10.0,20.0]"));
    assert_eq!(session.render_state(), SessionState::Unstarted);
}

#[test]
fn unknown_extension_is_an_error_and_writes_nothing() {
    let browser = FakeBrowser::default();
    let session = session(&browser);
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("x.unknown");

    let err = session
        .save(&figure(), &path, &SaveOptions::default())
        .unwrap_err();
    assert!(matches!(err, RenderError::UnknownExtension { .. }));
    assert!(!path.exists());
    assert!(browser.requests().is_empty());
}

#[test]
fn save_png_infers_the_format_and_uses_the_default_size() {
    let browser = FakeBrowser::default();
    let session = session(&browser);
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("x.png");

    session
        .save(&figure(), &path, &SaveOptions::default())
        .expect("save png");

    let requests = browser.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.format, ImageFormat::Png);
    assert_eq!((request.width, request.height), (700, 500));
    assert_eq!(request.output.as_deref(), Some(path.as_path()));
    assert!(request.element_id.starts_with("plotwire-"));
    assert!(!request.input.exists(), "temporary page should be removed");
    assert_eq!(
        std::fs::read(&path).expect("read png"),
        request.element_id.as_bytes()
    );
    assert_eq!(session.render_state(), SessionState::Ready);
}

#[test]
fn missing_dimensions_fall_back_to_a_landscape_page() {
    let browser = FakeBrowser::default();
    let session = session(&browser);
    let tmp = tempfile::tempdir().expect("tempdir");

    let options = SaveOptions {
        format: Some(OutputFormat::JPEG),
        width: None,
        height: None,
        ..SaveOptions::default()
    };
    session
        .save(&figure(), tmp.path().join("plot.bin"), &options)
        .expect("save jpeg");

    let request = &browser.requests()[0];
    assert_eq!(request.format, ImageFormat::Jpeg);
    assert_eq!((request.width, request.height), (742, 525));
}

#[test]
fn render_returns_fragments_then_images() {
    let browser = FakeBrowser::default();
    let session = session(&browser);
    let fig = figure();

    let Rendered::Html(first) = session
        .render(&fig, &RenderOptions::default())
        .expect("first fragment")
    else {
        panic!("expected html");
    };
    assert!(first.starts_with(LOAD_TAG));
    assert!(first.contains("<div id=\"plotwire-1\""));

    let second = session
        .render(&fig, &RenderOptions::default())
        .expect("second fragment");
    assert_eq!(second.mime_type(), "text/html");
    let second = String::from_utf8(second.as_bytes().to_vec()).expect("utf8");
    assert!(!second.contains(LOAD_TAG));
    assert!(second.contains("<div id=\"plotwire-2\""));

    let image = session
        .render(
            &fig,
            &RenderOptions {
                format: Some("image/png".parse().expect("mime")),
                element_id: Some("chart".to_string()),
                notebook: false,
            },
        )
        .expect("png");
    assert_eq!(image.mime_type(), "image/png");
    assert_eq!(image.as_bytes(), b"plotwire-chart");
    let request = &browser.requests()[0];
    assert_eq!((request.width, request.height), (742, 525));
    assert!(request.output.is_none());
}

#[test]
fn notebook_render_uses_requirejs() {
    let browser = FakeBrowser::default();
    let session = session(&browser);
    let rendered = session
        .render(
            &figure(),
            &RenderOptions {
                notebook: true,
                ..RenderOptions::default()
            },
        )
        .expect("notebook");
    let Rendered::Html(html) = rendered else {
        panic!("expected html");
    };
    assert!(html.contains("requirejs([\"plotly\"]"));
    assert!(!html.contains(LOAD_TAG));
}

#[test]
fn series_chart_fragments_share_the_counter() {
    let browser = FakeBrowser::default();
    let session = Session::with_launcher(
        SessionConfig {
            with_library_load_tag: false,
            ..SessionConfig::default()
        },
        browser,
    );
    let chart = SeriesChart {
        kind: SeriesKind::Scatter,
        series: vec![Series {
            xs: vec![1.0.into(), 2.0.into()],
            ys: vec![3.0.into(), 4.0.into()],
            label: Some("points".to_string()),
        }],
        ..SeriesChart::default()
    };

    let first = session.fragment(&chart).expect("fragment");
    let second = session.fragment(&chart).expect("fragment");
    assert!(first.starts_with("<div id=\"plotwire-1\""));
    assert!(second.starts_with("<div id=\"plotwire-2\""));
    assert!(first.contains("\"mode\":\"markers\""));
}

#[test]
fn unavailable_driver_is_reported() {
    let browser = FakeBrowser {
        unavailable: true,
        ..FakeBrowser::default()
    };
    let session = session(&browser);
    let err = session
        .render(
            &figure(),
            &RenderOptions {
                format: Some(OutputFormat::PNG),
                ..RenderOptions::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, RenderError::DriverUnavailable { .. }));
    assert_eq!(session.render_state(), SessionState::Unstarted);
}

#[test]
fn concurrent_renders_are_serialized_and_the_driver_finishes_on_drop() {
    let browser = FakeBrowser::default();
    let session = session(&browser);
    let fig = figure();

    std::thread::scope(|scope| {
        for i in 0..4 {
            let (session, fig) = (&session, &fig);
            scope.spawn(move || {
                let options = RenderOptions {
                    format: Some(OutputFormat::PNG),
                    element_id: Some(format!("t{i}")),
                    notebook: false,
                };
                session.render(fig, &options).expect("render");
            });
        }
    });

    assert_eq!(browser.requests().len(), 4);
    assert!(!browser.finished.load(Ordering::SeqCst));
    drop(session);
    assert!(browser.finished.load(Ordering::SeqCst));
}

#[test]
fn shutdown_ends_image_output() {
    let browser = FakeBrowser::default();
    let session = session(&browser);
    session.shutdown().expect("shutdown");
    assert_eq!(session.render_state(), SessionState::Terminated);
    assert!(!browser.finished.load(Ordering::SeqCst));

    let err = session
        .render(
            &figure(),
            &RenderOptions {
                format: Some(OutputFormat::JPEG),
                ..RenderOptions::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, RenderError::SessionTerminated));
}
