use crate::analyzer::{ChangeClassifier, SeverityTable};
use crate::domain::{ChangeType, Template};
use crate::error::{GitBumpError, Result};
use crate::ui::Selection;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const LOCAL_TOML: &str = "gitbump.toml";
const LOCAL_YAML: &str = "gitbump.yml";
const LOCAL_JSON: &str = "gitbump.json";

/// Represents the complete configuration for git-bump.
///
/// Contains the commit message template and the arguments that fill its
/// placeholders, including which argument values imply which kind of change.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    pub templates: Templates,

    #[serde(default)]
    pub args: Vec<ArgConfig>,
}

/// Commit and changelog templates.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Templates {
    /// Commit message template with `{{.Field}}` placeholders
    pub commit: String,

    /// Optional tera template for the changelog command
    #[serde(default)]
    pub changelog: Option<String>,
}

fn default_width() -> usize {
    72
}

/// One message argument: a template placeholder and how to fill it.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ArgConfig {
    pub name: String,

    /// Fixed choices; empty means free text
    #[serde(default)]
    pub options: Vec<ArgOption>,

    #[serde(default)]
    pub required: bool,

    /// Wrap width for free-text input
    #[serde(default = "default_width")]
    pub width: usize,
}

/// A selectable value of an argument.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ArgOption {
    pub value: String,

    #[serde(default)]
    pub description: String,

    /// Change implied when a commit uses this value
    #[serde(default)]
    pub version: Option<ChangeType>,
}

impl Selection for ArgOption {
    fn field(&self) -> &str {
        &self.value
    }

    fn doc(&self) -> &str {
        &self.description
    }
}

impl Config {
    /// Parse a configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| GitBumpError::config(format!("invalid TOML: {}", e)))
    }

    /// Parse a configuration from YAML text
    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|e| GitBumpError::config(format!("invalid YAML: {}", e)))
    }

    /// Parse a configuration from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| GitBumpError::config(format!("invalid JSON: {}", e)))
    }

    /// Check the configuration is usable
    ///
    /// # Returns
    /// * `Ok(())` - Configuration is consistent
    /// * `Err(Config)` - Describing the first problem found
    pub fn validate(&self) -> Result<()> {
        if self.templates.commit.trim().is_empty() {
            return Err(GitBumpError::config("commit template is empty"));
        }
        if self.args.is_empty() {
            return Err(GitBumpError::config("at least one argument must be declared"));
        }

        let mut names = HashSet::new();
        for arg in &self.args {
            if arg.name.trim().is_empty() {
                return Err(GitBumpError::config("argument name is empty"));
            }
            if !names.insert(arg.name.as_str()) {
                return Err(GitBumpError::config(format!(
                    "argument '{}' is declared more than once",
                    arg.name
                )));
            }
            if arg.options.iter().any(|o| o.value.is_empty()) {
                return Err(GitBumpError::config(format!(
                    "argument '{}' has an option with an empty value",
                    arg.name
                )));
            }
        }

        let template = self.commit_template()?;
        let placeholders: HashSet<&str> = template.placeholders().collect();
        for placeholder in &placeholders {
            if !names.contains(placeholder) {
                return Err(GitBumpError::config(format!(
                    "template placeholder '{}' has no matching argument",
                    placeholder
                )));
            }
        }
        for arg in self.args.iter().filter(|a| a.required) {
            if !placeholders.contains(arg.name.as_str()) {
                return Err(GitBumpError::config(format!(
                    "required argument '{}' does not appear in the commit template",
                    arg.name
                )));
            }
        }

        Ok(())
    }

    pub fn commit_template(&self) -> Result<Template> {
        Template::parse(&self.templates.commit)
    }

    /// Names of the arguments that must be present in every message
    pub fn required_args(&self) -> Vec<String> {
        self.args
            .iter()
            .filter(|a| a.required)
            .map(|a| a.name.clone())
            .collect()
    }

    /// Change implied by each argument value
    pub fn severity_table(&self) -> SeverityTable {
        self.args
            .iter()
            .flat_map(|arg| {
                arg.options.iter().filter_map(move |option| {
                    option
                        .version
                        .map(|change| (arg.name.as_str(), option.value.as_str(), change))
                })
            })
            .collect()
    }

    /// Classifier over the commit template and argument severities
    pub fn classifier(&self) -> Result<ChangeClassifier> {
        Ok(ChangeClassifier::new(
            self.commit_template()?,
            self.required_args(),
            self.severity_table(),
        ))
    }
}

/// Loads and validates configuration from file.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitbump.toml` in current directory
/// 3. `gitbump.yml` in current directory
/// 4. `gitbump.json` in current directory
/// 5. `git-bump/config.toml` in the user config directory
///
/// The format follows the file extension: `.json`, `.yaml` or `.yml`, and
/// TOML for anything else.
///
/// # Arguments
/// * `config_path` - Optional path to a custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded configuration
/// * `Err` - If no file is found, or it cannot be read, parsed, or validated
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config().ok_or_else(|| {
            GitBumpError::config(format!(
                "no configuration found; create {} or pass --config",
                LOCAL_TOML
            ))
        })?,
    };
    debug!(path = %path.display(), "loading configuration");

    let text = fs::read_to_string(&path)
        .map_err(|e| GitBumpError::config(format!("cannot read {}: {}", path.display(), e)))?;

    let config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Config::from_json(&text)?,
        Some("yaml") | Some("yml") => Config::from_yaml(&text)?,
        _ => Config::from_toml(&text)?,
    };
    config.validate()?;

    Ok(config)
}

fn find_config() -> Option<PathBuf> {
    let candidates = [
        PathBuf::from(LOCAL_TOML),
        PathBuf::from(LOCAL_YAML),
        PathBuf::from(LOCAL_JSON),
    ];
    candidates
        .into_iter()
        .chain(dirs::config_dir().map(|dir| dir.join("git-bump").join("config.toml")))
        .find(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
[templates]
commit = "{{.Type}}({{.Scope}}): {{.Message}}"

[[args]]
name = "Type"
required = true
options = [
  { value = "feature", description = "new functionality", version = "minor" },
  { value = "fix", description = "bug fix", version = "patch" },
  { value = "docs", description = "documentation" },
]

[[args]]
name = "Scope"

[[args]]
name = "Message"
required = true
width = 50
"#;

    fn config() -> Config {
        Config::from_toml(CONFIG).unwrap()
    }

    #[test]
    fn test_parse_toml() {
        let config = config();
        assert_eq!(config.args.len(), 3);
        assert_eq!(config.args[0].options[0].version, Some(ChangeType::Minor));
        assert_eq!(config.args[0].options[2].version, None);
        assert_eq!(config.args[1].width, 72);
        assert_eq!(config.args[2].width, 50);
        assert!(config.templates.changelog.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_yaml() {
        let text = r#"
templates:
  commit: "{{.Type}}: {{.Message}}"
args:
  - name: Type
    required: true
    options:
      - { value: feature, version: minor }
      - { value: chore }
  - name: Message
    required: true
"#;
        let config = Config::from_yaml(text).unwrap();
        assert_eq!(config.args[0].options[0].version, Some(ChangeType::Minor));
        assert_eq!(config.args[0].options[1].version, None);
        assert_eq!(config.args[1].width, 72);
        config.validate().unwrap();

        let err = Config::from_yaml("templates: [").unwrap_err();
        assert!(err.to_string().contains("invalid YAML"));
    }

    #[test]
    fn test_required_args() {
        assert_eq!(config().required_args(), vec!["Type", "Message"]);
    }

    #[test]
    fn test_severity_table() {
        let table = config().severity_table();
        assert_eq!(table.lookup("Type", "feature"), ChangeType::Minor);
        assert_eq!(table.lookup("Type", "fix"), ChangeType::Patch);
        assert_eq!(table.lookup("Type", "docs"), ChangeType::None);
    }

    #[test]
    fn test_arg_option_selection() {
        let config = config();
        let option = &config.args[0].options[1];
        assert_eq!(option.field(), "fix");
        assert_eq!(option.doc(), "bug fix");
    }

    #[test]
    fn test_validate_undeclared_placeholder() {
        let mut config = config();
        config.templates.commit.push_str(" {{.Ticket}}");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Ticket"));
    }

    #[test]
    fn test_validate_required_arg_missing_from_template() {
        let mut config = config();
        config.templates.commit = "{{.Type}}: {{.Scope}}".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Message"));
    }

    #[test]
    fn test_validate_duplicate_arg() {
        let mut config = config();
        let duplicate = config.args[1].clone();
        config.args.push(duplicate);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_option_value() {
        let mut config = config();
        config.args[0].options[0].value.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_template() {
        let mut config = config();
        config.templates.commit = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_change_type_rejected() {
        let text = CONFIG.replace("\"patch\"", "\"huge\"");
        assert!(Config::from_toml(&text).is_err());
    }

    #[test]
    fn test_classifier_from_config() {
        let classifier = config().classifier().unwrap();
        let messages = vec!["fix(ui): colour".to_string(), "feature(api): x".to_string()];
        assert_eq!(
            classifier
                .classify(&messages, crate::analyzer::MatchMode::Strict)
                .unwrap(),
            ChangeType::Minor
        );
    }
}
