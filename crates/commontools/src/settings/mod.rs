//! Settings files — `appsettings.json` and `app.config` merged into one
//! flat, case-insensitive key/value tree.
//!
//! Keys are `:`-separated paths, e.g. `ConnectionStrings:DefaultConnection`.
//! [`SettingsLoader::build`] reads the files once and returns an immutable
//! [`Settings`] value that callers keep and query.

mod json;
mod xml;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::CommonToolsError;

pub const DEFAULT_JSON_FILE: &str = "appsettings.json";
pub const DEFAULT_XML_FILE: &str = "app.config";
pub const CONNECTION_STRINGS_SECTION: &str = "ConnectionStrings";
pub const DEFAULT_CONNECTION: &str = "DefaultConnection";
pub const KEY_DELIMITER: &str = ":";

/// Join two key path segments with [`KEY_DELIMITER`].
fn join_key(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{parent}{KEY_DELIMITER}{child}")
    }
}

fn normalize(key: &str) -> String {
    key.to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    key: String,
    value: String,
}

/// Flattened settings tree. Lookups ignore key case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    entries: BTreeMap<String, Entry>,
}

impl Settings {
    /// Build settings directly from key/value pairs. Later pairs win.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut settings = Settings::default();
        for (k, v) in pairs {
            settings.insert(k, v);
        }
        settings
    }

    /// Insert a value, returning the one it replaced (if any).
    pub(crate) fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        let key = key.into();
        self.entries
            .insert(
                normalize(&key),
                Entry {
                    key,
                    value: value.into(),
                },
            )
            .map(|old| old.value)
    }

    /// Layer `other` on top of `self`; values from `other` win.
    pub fn merge(&mut self, other: Settings) {
        self.entries.extend(other.entries);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&normalize(key)).map(|e| e.value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&normalize(key))
    }

    /// Look up `ConnectionStrings:<name>`.
    ///
    /// Returns `None` when no such connection string is configured.
    pub fn connection_string(&self, name: &str) -> Option<&str> {
        self.get(&join_key(CONNECTION_STRINGS_SECTION, name))
    }

    /// All entries below `prefix`, with the prefix removed from their keys.
    ///
    /// `section("ConnectionStrings")` on `ConnectionStrings:Main = x` yields
    /// `Main = x`. The entry at `prefix` itself is not included.
    pub fn section(&self, prefix: &str) -> Settings {
        let depth = prefix.split(KEY_DELIMITER).count();
        let wanted = format!("{}{KEY_DELIMITER}", normalize(prefix));
        let mut section = Settings::default();
        for (norm, entry) in &self.entries {
            if !norm.starts_with(&wanted) {
                continue;
            }
            if let Some(rest) = entry.key.splitn(depth + 1, KEY_DELIMITER).nth(depth) {
                section.insert(rest, entry.value.clone());
            }
        }
        section
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(key, value)` pairs in case-insensitive key order, with keys
    /// in the casing they were defined with.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .values()
            .map(|e| (e.key.as_str(), e.value.as_str()))
    }
}

/// Locates and loads the settings files in a base directory.
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    base_dir: PathBuf,
    json_file: String,
    xml_file: String,
}

impl SettingsLoader {
    /// Loader for the default file names in `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        SettingsLoader {
            base_dir: base_dir.into(),
            json_file: DEFAULT_JSON_FILE.into(),
            xml_file: DEFAULT_XML_FILE.into(),
        }
    }

    /// Loader rooted at the directory containing the running executable.
    pub fn from_exe_dir() -> crate::error::Result<Self> {
        let exe = std::env::current_exe()?;
        let dir = exe.parent().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("executable path has no parent: {}", exe.display()),
            )
        })?;
        Ok(Self::new(dir))
    }

    pub fn with_json_file(mut self, name: impl Into<String>) -> Self {
        self.json_file = name.into();
        self
    }

    pub fn with_xml_file(mut self, name: impl Into<String>) -> Self {
        self.xml_file = name.into();
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn json_path(&self) -> PathBuf {
        self.base_dir.join(&self.json_file)
    }

    pub fn xml_path(&self) -> PathBuf {
        self.base_dir.join(&self.xml_file)
    }

    /// True if at least one of the two settings files exists.
    pub fn settings_files_exist(&self) -> bool {
        self.json_path().is_file() || self.xml_path().is_file()
    }

    /// Read whichever settings files exist and merge them, XML over JSON.
    ///
    /// Fails with [`CommonToolsError::ConfigurationFileMissing`] if neither
    /// file exists.
    pub fn build(&self) -> crate::error::Result<Settings> {
        let json_path = self.json_path();
        let xml_path = self.xml_path();
        let has_json = json_path.is_file();
        let has_xml = xml_path.is_file();

        if !has_json && !has_xml {
            return Err(CommonToolsError::ConfigurationFileMissing {
                base_dir: self.base_dir.clone(),
                json_file: self.json_file.clone(),
                xml_file: self.xml_file.clone(),
            });
        }

        let mut settings = Settings::default();
        if has_json {
            settings.merge(load_file(&json_path, json::parse)?);
        }
        if has_xml {
            settings.merge(load_file(&xml_path, xml::parse)?);
        }

        log::debug!(
            "loaded {} setting(s) from {}",
            settings.len(),
            self.base_dir.display()
        );
        Ok(settings)
    }
}

fn load_file(
    path: &Path,
    parse: fn(&str) -> Result<Settings, String>,
) -> crate::error::Result<Settings> {
    let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::InvalidData => CommonToolsError::SettingsParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        },
        _ => CommonToolsError::Io(e),
    })?;
    // Tolerate a leading UTF-8 BOM
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(&contents);
    let settings = parse(contents).map_err(|message| CommonToolsError::SettingsParse {
        path: path.to_path_buf(),
        message,
    })?;
    log::debug!("read {} key(s) from {}", settings.len(), path.display());
    Ok(settings)
}
