use serde::Deserialize;

pub const DEFAULT_LIBRARY_SRC: &str = "https://cdn.plot.ly/plotly-latest.min.js";

/// Environment variable holding the command prefix used to start the browser driver.
pub const LAUNCHER_ENV: &str = "PLOTWIRE_BROWSER_LAUNCHER";

/// Command prefix used when [`LAUNCHER_ENV`] is unset. The driver script is appended as
/// `-e <script>`.
pub const DEFAULT_LAUNCHER: &[&str] = &["npx", "--yes", "--package=playwright", "node"];

/// Process-level options of a [`Session`](crate::Session).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// URL of the visualization library loaded by html output.
    pub library_src: String,
    /// Emit the library `<script src>` tag before the first fragment.
    pub with_library_load_tag: bool,
    /// Program and leading arguments that start the browser driver.
    pub launcher: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            library_src: DEFAULT_LIBRARY_SRC.to_string(),
            with_library_load_tag: true,
            launcher: DEFAULT_LAUNCHER.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SessionConfig {
    /// Defaults, with the launcher taken from [`LAUNCHER_ENV`] when it is set and non-blank.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(launcher) = std::env::var(LAUNCHER_ENV)
            .ok()
            .and_then(|raw| parse_launcher(&raw))
        {
            config.launcher = launcher;
        }
        config
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Splits a whitespace-separated command prefix; `None` when blank.
pub fn parse_launcher(raw: &str) -> Option<Vec<String>> {
    let parts: Vec<String> = raw.split_whitespace().map(str::to_string).collect();
    (!parts.is_empty()).then_some(parts)
}
