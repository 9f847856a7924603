//! Site configuration.
//!
//! Settings come from an optional `cppdoc.toml` and are then overridden by
//! command-line flags via [`CliSettings`]:
//!
//! ```toml
//! [site]
//! title = "My Library"
//! project_name = "mylib"
//! base_url = "/docs/"
//! stylesheets = ["/docs/theme.css"]
//!
//! [visibility]
//! exclude_sources = ["*/__private/*"]
//! exclude_names = ["mylib::detail::*"]
//! ```

use crate::model::Entity;
use glob::Pattern;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration filename looked up in the working directory.
pub const CONFIG_FILENAME: &str = "cppdoc.toml";

/// Stylesheet written into the output root when none are configured.
pub const DEFAULT_STYLESHEET: &str = "cppdoc.css";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid visibility pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    #[error("--output is required (or set `site.output` in {CONFIG_FILENAME})")]
    MissingOutput,
}

/// Command-line values that override the configuration file.
#[derive(Debug, Default)]
pub struct CliSettings {
    pub output: Option<PathBuf>,
    pub title: Option<String>,
    pub project_name: Option<String>,
    pub base_url: Option<String>,
    /// Replaces the configured stylesheets when non-empty.
    pub stylesheets: Vec<String>,
    /// Added to the configured source exclusions.
    pub exclude_sources: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub visibility: VisibilityConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub output: Option<PathBuf>,
    pub title: String,
    pub project_name: String,
    pub base_url: String,
    pub stylesheets: Vec<String>,
    pub favicon: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            output: None,
            title: "Documentation".to_owned(),
            project_name: "Project".to_owned(),
            base_url: "/".to_owned(),
            stylesheets: Vec::new(),
            favicon: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VisibilityConfig {
    /// Glob patterns over a sighting's source file.
    pub exclude_sources: Vec<String>,
    /// Glob patterns over a declaration's qualified name.
    pub exclude_names: Vec<String>,
}

/// Resolved options the page generators read.
#[derive(Debug, Clone)]
pub struct Options {
    pub output_root: PathBuf,
    pub title: String,
    pub project_name: String,
    /// Always ends with `/`.
    pub base_url: String,
    pub stylesheets: Vec<String>,
    pub favicon: Option<String>,
}

impl Options {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        let site = SiteConfig::default();
        Self {
            output_root: output_root.into(),
            title: site.title,
            project_name: site.project_name,
            base_url: site.base_url,
            stylesheets: site.stylesheets,
            favicon: site.favicon,
        }
    }

    /// Stylesheet hrefs for the page head, falling back to the bundled one.
    pub fn stylesheet_urls(&self) -> Vec<String> {
        if self.stylesheets.is_empty() {
            vec![format!("{}{DEFAULT_STYLESHEET}", self.base_url)]
        } else {
            self.stylesheets.clone()
        }
    }

    pub fn uses_default_stylesheet(&self) -> bool {
        self.stylesheets.is_empty()
    }
}

impl Config {
    /// Load `path`, or `cppdoc.toml` from the working directory if present,
    /// or defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let candidate = PathBuf::from(CONFIG_FILENAME);
                if !candidate.is_file() {
                    return Ok(Self::default());
                }
                candidate
            }
        };
        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Apply CLI overrides and produce the generator options and the
    /// visibility policy.
    pub fn resolve(self, cli: CliSettings) -> Result<(Options, Visibility), ConfigError> {
        let site = self.site;
        let output_root = cli
            .output
            .or(site.output)
            .ok_or(ConfigError::MissingOutput)?;

        let mut base_url = cli.base_url.unwrap_or(site.base_url);
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        let stylesheets = if cli.stylesheets.is_empty() {
            site.stylesheets
        } else {
            cli.stylesheets
        };

        let mut exclude_sources = self.visibility.exclude_sources;
        exclude_sources.extend(cli.exclude_sources);
        let visibility = Visibility::new(&exclude_sources, &self.visibility.exclude_names)?;

        let options = Options {
            output_root,
            title: cli.title.unwrap_or(site.title),
            project_name: cli.project_name.unwrap_or(site.project_name),
            base_url,
            stylesheets,
            favicon: site.favicon,
        };
        Ok((options, visibility))
    }
}

/// Visibility policy: which sightings are inserted hidden.
#[derive(Debug, Default)]
pub struct Visibility {
    sources: Vec<Pattern>,
    names: Vec<Pattern>,
}

impl Visibility {
    pub fn new(sources: &[String], names: &[String]) -> Result<Self, ConfigError> {
        Ok(Self {
            sources: compile(sources)?,
            names: compile(names)?,
        })
    }

    pub fn hides(&self, entity: &Entity) -> bool {
        let header = entity.header();
        let by_source = header
            .source
            .as_deref()
            .is_some_and(|source| self.sources.iter().any(|p| p.matches(source)));
        by_source || {
            let name = header.qualified_name();
            self.names.iter().any(|p| p.matches(&name))
        }
    }
}

fn compile(patterns: &[String]) -> Result<Vec<Pattern>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            Pattern::new(pattern).map_err(|source| ConfigError::Pattern {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FunctionElement, Header, Namespace, NamespacePath};
    use pretty_assertions::assert_eq;

    fn function(path: &[&str], name: &str, source: Option<&str>) -> Entity {
        let path = NamespacePath::from(
            path.iter()
                .map(|s| Namespace::Named((*s).to_string()))
                .collect::<Vec<_>>(),
        );
        let mut header = Header::new(name, path);
        header.source = source.map(str::to_string);
        Entity::Function(FunctionElement {
            header,
            overloads: Vec::new(),
        })
    }

    #[test]
    fn parses_toml_sections() {
        let config: Config = toml::from_str(
            r#"
            [site]
            title = "Lib"
            base_url = "/docs"

            [visibility]
            exclude_names = ["lib::detail::*"]
            "#,
        )
        .unwrap();
        assert_eq!(config.site.title, "Lib");
        assert_eq!(config.site.project_name, "Project");
        assert_eq!(config.visibility.exclude_names, vec!["lib::detail::*"]);
    }

    #[test]
    fn cli_overrides_config() {
        let config: Config = toml::from_str(
            r#"
            [site]
            output = "from-file"
            title = "File Title"
            base_url = "/docs"
            stylesheets = ["a.css"]
            "#,
        )
        .unwrap();
        let cli = CliSettings {
            output: Some(PathBuf::from("out")),
            title: Some("Cli Title".into()),
            ..Default::default()
        };
        let (options, _) = config.resolve(cli).unwrap();
        assert_eq!(options.output_root, PathBuf::from("out"));
        assert_eq!(options.title, "Cli Title");
        assert_eq!(options.base_url, "/docs/");
        assert_eq!(options.stylesheet_urls(), vec!["a.css"]);
    }

    #[test]
    fn output_is_required() {
        let err = Config::default().resolve(CliSettings::default()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingOutput));
    }

    #[test]
    fn default_stylesheet_is_site_rooted() {
        let options = Options::new("out");
        assert_eq!(options.stylesheet_urls(), vec!["/cppdoc.css"]);
    }

    #[test]
    fn visibility_matches_sources_and_names() {
        let visibility = Visibility::new(
            &["*/__private/*".to_string()],
            &["lib::detail::*".to_string()],
        )
        .unwrap();
        assert!(visibility.hides(&function(&["lib"], "f", Some("src/__private/x.h"))));
        assert!(visibility.hides(&function(&["lib", "detail"], "g", None)));
        assert!(!visibility.hides(&function(&["lib"], "h", Some("src/lib.h"))));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let err = Visibility::new(&["[".to_string()], &[]).unwrap_err();
        assert!(matches!(err, ConfigError::Pattern { .. }));
    }
}
