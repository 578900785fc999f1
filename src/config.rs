use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;

use crate::ancestor::SearchDepth;
use crate::links::ContainmentScope;

/// Defaults for the command line tool. Every field is optional in
/// `Config.toml` and can be overridden with `DIRTOOLS_<FIELD>`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Marker file names looked for by `ancestor` when none are given.
    #[serde(default = "default_markers")]
    pub markers: Vec<String>,
    /// Ancestor levels to inspect. 0 searches up to the root.
    #[serde(default)]
    pub depth: usize,
    #[serde(default = "default_include_subdirs")]
    pub include_subdirs: bool,
}

fn default_markers() -> Vec<String> {
    vec![".asset".to_string()]
}

fn default_include_subdirs() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            markers: default_markers(),
            depth: 0,
            include_subdirs: default_include_subdirs(),
        }
    }
}

impl AppConfig {
    pub fn search_depth(&self) -> SearchDepth {
        SearchDepth::from(self.depth)
    }

    pub fn containment_scope(&self) -> ContainmentScope {
        ContainmentScope::from(self.include_subdirs)
    }
}

pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .add_source(
            Environment::with_prefix("DIRTOOLS")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("markers"),
        )
        .build()?;
    builder.try_deserialize::<AppConfig>()
}
