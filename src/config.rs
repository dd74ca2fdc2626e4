use serde::{Deserialize, Serialize};

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

// ── Final (merged) config types ──

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub apps: Apps,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Prefix that marks an invocation as unsafe (failures become output).
    #[serde(default = "default_unsafe_prefix")]
    pub unsafe_prefix: String,
    /// REPL prompt; `{cwd}` is substituted with the working directory.
    #[serde(default = "default_prompt")]
    pub prompt: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub history: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            unsafe_prefix: default_unsafe_prefix(),
            prompt: default_prompt(),
            log_level: default_log_level(),
            history: false,
        }
    }
}

fn default_unsafe_prefix() -> String {
    "_".into()
}

fn default_prompt() -> String {
    "{cwd}> ".into()
}

fn default_log_level() -> String {
    "warn".into()
}

/// Built-in applications registered at startup.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Apps {
    #[serde(default)]
    pub enabled: Vec<String>,
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    settings: SettingsOverlay,
    #[serde(default)]
    apps: AppsOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct SettingsOverlay {
    unsafe_prefix: Option<String>,
    prompt: Option<String>,
    log_level: Option<String>,
    history: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
struct AppsOverlay {
    #[serde(default)]
    replace: bool,
    #[serde(default)]
    enabled: Vec<String>,
    #[serde(default)]
    remove_enabled: Vec<String>,
}

// ── Merge logic ──

/// Merge a user list into a default list.
/// In replace mode: user list replaces default entirely.
/// In merge mode: remove items first, then extend with additions (deduped).
fn merge_list(base: &mut Vec<String>, add: Vec<String>, remove: &[String], replace: bool) {
    if replace {
        *base = add;
    } else {
        base.retain(|item| !remove.contains(item));
        for item in add {
            if !base.contains(&item) {
                base.push(item);
            }
        }
    }
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Load configuration with resolution order:
    /// 1. Start with embedded defaults
    /// 2. Merge user overlay from ~/.config/ushell/config.toml (if exists)
    pub fn load() -> Self {
        let mut config = Self::default_config();
        if let Some(overlay) = Self::load_overlay() {
            config.apply_overlay(overlay);
        }
        config
    }

    /// Try to load user overlay from ~/.config/ushell/config.toml.
    fn load_overlay() -> Option<ConfigOverlay> {
        let home = std::env::var_os("HOME")?;
        let path = std::path::Path::new(&home).join(".config/ushell/config.toml");
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(overlay) => Some(overlay),
            Err(e) => {
                log::warn!("config parse error: {e}");
                eprintln!("ushell: config parse error: {e}");
                None
            }
        }
    }

    /// Apply an overlay on top of this config (merge semantics).
    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        let s = overlay.settings;
        if let Some(v) = s.unsafe_prefix {
            self.settings.unsafe_prefix = v;
        }
        if let Some(v) = s.prompt {
            self.settings.prompt = v;
        }
        if let Some(v) = s.log_level {
            self.settings.log_level = v;
        }
        if let Some(v) = s.history {
            self.settings.history = v;
        }

        let a = overlay.apps;
        merge_list(&mut self.apps.enabled, a.enabled, &a.remove_enabled, a.replace);
    }

    /// Render the prompt for the given working directory.
    pub fn prompt_for(&self, cwd: &std::path::Path) -> String {
        self.settings
            .prompt
            .replace("{cwd}", &cwd.display().to_string())
    }

    /// Serialize the merged configuration back to TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Apply an overlay from a TOML string. Used for testing.
    #[cfg(test)]
    fn apply_overlay_str(&mut self, toml_str: &str) {
        let overlay: ConfigOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay);
    }
}
