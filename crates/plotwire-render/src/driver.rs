//! Out-of-process browser drivers.
//!
//! [`PlaywrightLauncher`] starts a node process running a small Playwright script and talks to it
//! over stdin/stdout, one JSON object per line:
//!
//! - driver → host, once: `{"ready": true}` or `{"error": "..."}`
//! - host → driver: `{"op": "render", "input", "output", "type", "element_id", "width", "height"}`
//! - driver → host: `{"data": "<base64 image>"}` or `{"error": "..."}`
//! - host → driver: `{"op": "finish"}`, after which the driver closes the browser and exits.

use crate::config::{LAUNCHER_ENV, SessionConfig};
use crate::session::RenderRequest;
use crate::{RenderError, Result};
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

/// A started browser that turns HTML files into element screenshots.
pub trait BrowserDriver: Send {
    fn render(&mut self, request: &RenderRequest) -> Result<Vec<u8>>;

    /// Closes the browser. Called exactly once, by the render worker.
    fn finish(&mut self) -> Result<()>;
}

/// Starts a [`BrowserDriver`]. Launch failures are reported as
/// [`RenderError::DriverUnavailable`].
pub trait DriverLauncher: Send {
    fn launch(&self) -> Result<Box<dyn BrowserDriver>>;
}

const DRIVER_JS: &str = r#"
const path = require('path');
const readline = require('readline');
const { pathToFileURL } = require('url');

// `npx --package=playwright node` only puts the package's bin dir on PATH.
const loadPlaywright = () => {
  try {
    return require('playwright');
  } catch (e) {
    for (const dir of (process.env.PATH || '').split(path.delimiter)) {
      if (path.basename(dir) !== '.bin') continue;
      try {
        return require(path.join(dir, '..', 'playwright'));
      } catch (_) {}
    }
    throw e;
  }
};

const reply = (msg) => process.stdout.write(JSON.stringify(msg) + '\n');
const message = (e) => String((e && e.message) || e);

(async () => {
  let browser;
  try {
    const { chromium } = loadPlaywright();
    browser = await chromium.launch({ headless: true });
  } catch (e) {
    reply({ error: message(e) });
    process.exit(1);
  }
  reply({ ready: true });

  const rl = readline.createInterface({ input: process.stdin });
  for await (const line of rl) {
    if (!line.trim()) continue;
    const req = JSON.parse(line);
    if (req.op === 'finish') break;
    let page;
    try {
      page = await browser.newPage();
      await page.setViewportSize({ width: req.width, height: req.height });
      await page.goto(pathToFileURL(req.input).href);
      const selector = `[id=${JSON.stringify(req.element_id)}]`;
      await page.waitForSelector(`${selector} .main-svg`);
      const element = await page.$(selector);
      const opts = { type: req.type };
      if (req.output) opts.path = req.output;
      const buf = await element.screenshot(opts);
      reply({ data: buf.toString('base64') });
    } catch (e) {
      reply({ error: message(e) });
    } finally {
      if (page) await page.close();
    }
  }
  await browser.close();
})();
"#;

fn remediation(command: &str) -> String {
    format!(
        "install node and playwright (`npm install playwright && npx playwright install chromium`) \
         or point {LAUNCHER_ENV} at a node command that can require('playwright'); tried `{command}`"
    )
}

#[derive(Debug, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
enum DriverCommand<'a> {
    Render {
        input: &'a Path,
        #[serde(skip_serializing_if = "Option::is_none")]
        output: Option<&'a Path>,
        #[serde(rename = "type")]
        kind: &'static str,
        element_id: &'a str,
        width: u32,
        height: u32,
    },
    Finish,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DriverReply {
    ready: bool,
    data: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PlaywrightLauncher {
    command: Vec<String>,
}

impl PlaywrightLauncher {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.launcher.clone())
    }

    fn command_line(&self) -> String {
        self.command.join(" ")
    }
}

impl DriverLauncher for PlaywrightLauncher {
    fn launch(&self) -> Result<Box<dyn BrowserDriver>> {
        Ok(Box::new(self.spawn()?))
    }
}

impl PlaywrightLauncher {
    fn spawn(&self) -> Result<PlaywrightDriver> {
        let command = self.command_line();
        let unavailable = |detail: String| RenderError::DriverUnavailable {
            command: command.clone(),
            message: format!("{detail}; {}", remediation(&command)),
        };

        let Some((program, args)) = self.command.split_first() else {
            return Err(unavailable("empty launcher command".to_string()));
        };
        tracing::debug!(command = %command, "starting browser driver");
        let mut child = Command::new(program)
            .args(args)
            .arg("-e")
            .arg(DRIVER_JS)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|err| unavailable(format!("failed to spawn: {err}")))?;

        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(unavailable("driver pipes unavailable".to_string()));
        };
        let mut driver = PlaywrightDriver {
            child,
            stdin,
            stdout: BufReader::new(stdout),
            finished: false,
        };

        match driver.read_reply() {
            Ok(reply) if reply.ready => Ok(driver),
            Ok(reply) => {
                let detail = reply
                    .error
                    .unwrap_or_else(|| "driver did not report ready".to_string());
                Err(unavailable(detail))
            }
            Err(err) => Err(unavailable(err.to_string())),
        }
    }
}

pub struct PlaywrightDriver {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    finished: bool,
}

impl PlaywrightDriver {
    fn send(&mut self, command: &DriverCommand<'_>) -> Result<()> {
        let mut line = serde_json::to_vec(command)?;
        line.push(b'\n');
        self.stdin.write_all(&line)?;
        self.stdin.flush()?;
        Ok(())
    }

    fn read_reply(&mut self) -> Result<DriverReply> {
        let mut line = String::new();
        if self.stdout.read_line(&mut line)? == 0 {
            return Err(RenderError::Driver("driver exited".to_string()));
        }
        Ok(serde_json::from_str(line.trim_end())?)
    }
}

impl BrowserDriver for PlaywrightDriver {
    fn render(&mut self, request: &RenderRequest) -> Result<Vec<u8>> {
        self.send(&DriverCommand::Render {
            input: &request.input,
            output: request.output.as_deref(),
            kind: request.format.as_str(),
            element_id: &request.element_id,
            width: request.width,
            height: request.height,
        })?;
        let reply = self.read_reply()?;
        if let Some(error) = reply.error {
            return Err(RenderError::Driver(error));
        }
        let data = reply
            .data
            .ok_or_else(|| RenderError::Driver("reply carried no image data".to_string()))?;
        Ok(base64::engine::general_purpose::STANDARD.decode(data)?)
    }

    fn finish(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        // A driver that already exited cannot take the message; it still has to be reaped.
        if let Err(err) = self.send(&DriverCommand::Finish) {
            tracing::debug!(error = %err, "browser driver is already gone");
        }
        let status = self.child.wait()?;
        self.finished = true;
        tracing::debug!(%status, "browser driver exited");
        Ok(())
    }
}

impl Drop for PlaywrightDriver {
    fn drop(&mut self) {
        if !self.finished {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::ImageFormat;
    use std::path::PathBuf;

    #[test]
    fn render_command_wire_shape() {
        let request = RenderRequest {
            input: PathBuf::from("/tmp/plot.html"),
            output: None,
            format: ImageFormat::Jpeg,
            element_id: "plotwire-1".to_string(),
            width: 742,
            height: 525,
        };
        let command = DriverCommand::Render {
            input: &request.input,
            output: request.output.as_deref(),
            kind: request.format.as_str(),
            element_id: &request.element_id,
            width: request.width,
            height: request.height,
        };
        assert_eq!(
            serde_json::to_value(&command).unwrap(),
            serde_json::json!({
                "op": "render",
                "input": "/tmp/plot.html",
                "type": "jpeg",
                "element_id": "plotwire-1",
                "width": 742,
                "height": 525
            })
        );
        assert_eq!(
            serde_json::to_string(&DriverCommand::Finish).unwrap(),
            r#"{"op":"finish"}"#
        );
    }

    #[test]
    fn replies_default_missing_fields() {
        let reply: DriverReply = serde_json::from_str(r#"{"ready": true}"#).unwrap();
        assert!(reply.ready);
        assert!(reply.data.is_none() && reply.error.is_none());
    }

    #[test]
    fn missing_program_is_reported_with_remediation() {
        let launcher = PlaywrightLauncher::new(vec!["plotwire-no-such-node-binary".to_string()]);
        let Err(err) = launcher.launch() else {
            panic!("launch should fail");
        };
        match err {
            RenderError::DriverUnavailable { command, message } => {
                assert_eq!(command, "plotwire-no-such-node-binary");
                assert!(message.contains("npm install playwright"));
                assert!(message.contains(LAUNCHER_ENV));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    /// A launcher running `body` under `sh -c`; the appended `-e <script>` lands in `$0 $1`.
    #[cfg(unix)]
    fn stub(body: &str) -> PlaywrightLauncher {
        PlaywrightLauncher::new(vec!["sh".to_string(), "-c".to_string(), body.to_string()])
    }

    #[cfg(unix)]
    fn request() -> RenderRequest {
        RenderRequest {
            input: PathBuf::from("/tmp/plot.html"),
            output: None,
            format: ImageFormat::Png,
            element_id: "plotwire-1".to_string(),
            width: 700,
            height: 500,
        }
    }

    #[cfg(unix)]
    fn assert_reaped(driver: &mut PlaywrightDriver) {
        assert!(driver.finished);
        assert!(matches!(driver.child.try_wait(), Ok(Some(_))));
    }

    #[cfg(unix)]
    #[test]
    fn stub_driver_round_trips_image_data() {
        let mut driver = stub(
            r#"echo '{"ready":true}'; read req; echo '{"data":"aGVsbG8="}'; read req; exit 0"#,
        )
        .spawn()
        .unwrap();
        assert_eq!(driver.render(&request()).unwrap(), b"hello");
        driver.finish().unwrap();
        assert_reaped(&mut driver);
        driver.finish().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn stub_driver_errors_become_driver_errors() {
        let mut driver = stub(
            r#"echo '{"ready":true}'; read req; echo '{"error":"no such element"}'; read req"#,
        )
        .spawn()
        .unwrap();
        match driver.render(&request()) {
            Err(RenderError::Driver(message)) => assert_eq!(message, "no such element"),
            other => panic!("unexpected result: {other:?}"),
        }
        driver.finish().unwrap();
        assert_reaped(&mut driver);
    }

    #[cfg(unix)]
    #[test]
    fn exited_driver_is_still_reaped_on_finish() {
        let mut driver = stub(r#"echo '{"ready":true}'; exit 0"#).spawn().unwrap();
        let _ = driver.child.wait();
        assert!(matches!(
            driver.render(&request()),
            Err(RenderError::Driver(_) | RenderError::Io(_))
        ));
        driver.finish().unwrap();
        assert_reaped(&mut driver);
    }

    #[cfg(unix)]
    #[test]
    fn driver_reporting_an_error_at_startup_is_unavailable() {
        let launcher = stub(r#"echo '{"error":"chromium missing"}'; exit 1"#);
        match launcher.launch() {
            Err(RenderError::DriverUnavailable { message, .. }) => {
                assert!(message.starts_with("chromium missing; "));
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("launch should fail"),
        }
    }

    /// Runs the real driver script against a stand-in `playwright` package that is only
    /// reachable through a `node_modules/.bin` directory on PATH, the layout `npx --package`
    /// produces. Skipped when node is not installed.
    #[cfg(unix)]
    #[test]
    fn driver_script_finds_playwright_through_the_bin_path() {
        let has_node = Command::new("node")
            .arg("--version")
            .stdout(Stdio::null())
            .status()
            .is_ok_and(|s| s.success());
        if !has_node {
            return;
        }

        let tmp = tempfile::tempdir().unwrap();
        let modules = tmp.path().join("node_modules");
        std::fs::create_dir_all(modules.join(".bin")).unwrap();
        std::fs::create_dir_all(modules.join("playwright")).unwrap();
        std::fs::write(
            modules.join("playwright").join("index.js"),
            r#"
const element = { screenshot: async (opts) => Buffer.from(opts.type) };
const page = {
  setViewportSize: async () => {},
  goto: async () => {},
  waitForSelector: async () => {},
  $: async () => element,
  close: async () => {},
};
exports.chromium = { launch: async () => ({ newPage: async () => page, close: async () => {} }) };
"#,
        )
        .unwrap();

        let path = format!(
            "{}:{}",
            modules.join(".bin").display(),
            std::env::var("PATH").unwrap_or_default()
        );
        let launcher = PlaywrightLauncher::new(vec![
            "env".to_string(),
            format!("PATH={path}"),
            "node".to_string(),
        ]);
        let mut driver = launcher.spawn().unwrap();
        assert_eq!(driver.render(&request()).unwrap(), b"png");
        driver.finish().unwrap();
        assert_reaped(&mut driver);
    }

    #[test]
    fn empty_launcher_is_unavailable() {
        let launcher = PlaywrightLauncher::new(Vec::new());
        assert!(matches!(
            launcher.launch(),
            Err(RenderError::DriverUnavailable { .. })
        ));
    }
}
