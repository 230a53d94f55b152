use std::env;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(alias = "sheet_url")]
    pub url: Option<String>,
    pub query: Option<String>,
    pub page: Option<usize>,
    #[serde(alias = "cards_per_page")]
    pub page_size: Option<usize>,
    pub timeout: Option<usize>,
    pub proxy: Option<String>,
    pub output: Option<String>,
    pub output_format: Option<String>,
    pub interactive: Option<bool>,
    pub reveal_all: Option<bool>,
    pub no_color: Option<bool>,
    pub images: Option<Vec<String>>,
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("USERPROFILE").map(PathBuf::from))
        .or_else(|| {
            let drive = env::var_os("HOMEDRIVE")?;
            let path = env::var_os("HOMEPATH")?;
            Some(PathBuf::from(drive).join(path))
        })
}

pub fn default_config_path() -> Option<PathBuf> {
    Some(home_dir()?.join(".cheatdeck").join("config.yml"))
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        if let Some(home) = home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

pub fn load_config(path: &PathBuf, allow_missing: bool) -> Result<ConfigFile, String> {
    match std::fs::read_to_string(path) {
        Ok(contents) if contents.trim().is_empty() => Ok(ConfigFile::default()),
        Ok(contents) => serde_yaml::from_str::<ConfigFile>(&contents)
            .map_err(|e| format!("failed to parse config '{}': {e}", path.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
            Ok(ConfigFile::default())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(format!("config file not found '{}'", path.display()))
        }
        Err(e) => Err(format!("failed to read config '{}': {e}", path.display())),
    }
}

pub fn default_config_yaml() -> String {
    format!(
        r#"# cheatdeck config
#
# Location (default):
#   ~/.cheatdeck/config.yml

# Published sheet (CSV export)
url: "{url}"

# Cards
page_size: {page_size}
# query: gem
# page: 1
reveal_all: false
interactive: false
# images:
#   - ./assets/img1.png
#   - ./assets/img2.png

# HTTP (optional), timeout in seconds, 0 waits forever
timeout: 0
# proxy: http://127.0.0.1:8080

# Output (optional)
# output: ./cheats.html
# output_format: html

# Output styling
no_color: false
"#,
        url = crate::runner::DEFAULT_SHEET_URL,
        page_size = crate::pagination::DEFAULT_PAGE_SIZE,
    )
}

pub fn ensure_default_config_file(path: &PathBuf) -> Result<(), String> {
    if path.exists() {
        return Ok(());
    }
    let parent = path
        .parent()
        .ok_or_else(|| format!("invalid config path '{}'", path.display()))?;
    std::fs::create_dir_all(parent).map_err(|e| {
        format!(
            "failed to create config directory '{}': {e}",
            parent.display()
        )
    })?;
    std::fs::write(path, default_config_yaml())
        .map_err(|e| format!("failed to write config file '{}': {e}", path.display()))?;
    Ok(())
}
