use crate::document_model::{DEFAULT_MAX_HISTORY, MarkdownDocument};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const RC_FILE_NAME: &str = ".mdnotesrc";
const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RcConfig {
    pub max_history: usize,
    pub smart_update: bool,
    pub log_level: String,
}

impl Default for RcConfig {
    fn default() -> Self {
        Self {
            max_history: DEFAULT_MAX_HISTORY,
            smart_update: true,
            log_level: "warn".to_string(),
        }
    }
}

pub struct RcLoader;

impl RcLoader {
    /// Get the path to the RC file
    /// Looks for .mdnotesrc in:
    /// 1. Current directory
    /// 2. Home directory (~/.mdnotesrc)
    pub fn get_rc_path() -> Option<PathBuf> {
        let current_rc = Path::new(RC_FILE_NAME);
        if current_rc.exists() {
            return Some(current_rc.to_path_buf());
        }

        if let Ok(home) = env::var("HOME") {
            let home_rc = Path::new(&home).join(RC_FILE_NAME);
            if home_rc.exists() {
                return Some(home_rc);
            }
        }

        None
    }

    /// Load and parse the RC file, falling back to defaults
    pub fn load_config() -> RcConfig {
        match Self::get_rc_path() {
            Some(rc_path) => Self::load_config_from(&rc_path),
            None => RcConfig::default(),
        }
    }

    /// Load a specific RC file. Unreadable files yield the defaults.
    pub fn load_config_from(path: &Path) -> RcConfig {
        let mut config = RcConfig::default();
        if let Ok(content) = fs::read_to_string(path) {
            Self::parse_config_content(&content, &mut config);
        }
        config
    }

    pub fn parse_config_content(content: &str, config: &mut RcConfig) {
        for line in content.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') || line.starts_with('"') {
                continue;
            }

            Self::parse_config_line(line, config);
        }
    }

    fn parse_config_line(line: &str, config: &mut RcConfig) {
        let line = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line,
        }
        .trim();

        if let Some(stripped) = line.strip_prefix("set ") {
            let setting = stripped.trim();

            match setting {
                "smartupdate" => config.smart_update = true,
                "nosmartupdate" => config.smart_update = false,
                _ => {
                    if let Some((key, value)) = setting.split_once('=') {
                        Self::apply_setting(key.trim(), value.trim(), config);
                    }
                }
            }
        } else if let Some((key, value)) = line.split_once('=') {
            Self::apply_setting(key.trim(), value.trim(), config);
        }
    }

    fn apply_setting(key: &str, value: &str, config: &mut RcConfig) {
        match key {
            "history" | "max_history" => {
                if let Ok(max_history) = value.parse::<usize>()
                    && (2..=1000).contains(&max_history)
                {
                    config.max_history = max_history;
                }
            }
            "smartupdate" | "smart_update" => {
                config.smart_update = matches!(value, "true" | "1" | "yes");
            }
            "log" | "log_level" => {
                let level = value.to_ascii_lowercase();
                if LOG_LEVELS.contains(&level.as_str()) {
                    config.log_level = level;
                }
            }
            _ => {} // Unknown setting, ignore
        }
    }

    /// Apply the configuration to a document
    pub fn apply_config(document: &mut MarkdownDocument, config: &RcConfig) {
        debug!(max_history = config.max_history, "applying rc config");
        document.set_history_limit(config.max_history);
    }

    /// Generate a sample RC file content
    pub fn generate_sample_rc() -> String {
        r#"# mdnotes configuration file (.mdnotesrc)
# Lines starting with # or " are comments

# Undo history
set history=50         # Number of document states kept for undo (2-1000)

# Editing
set smartupdate        # Keep a block's markdown when plain text is typed (or set nosmartupdate)

# Diagnostics
set log=warn           # error, warn, info, debug or trace (RUST_LOG overrides)

# Alternative key=value syntax:
# max_history=50
# smart_update=true
# log_level=warn
"#
        .to_string()
    }
}
