// File: src/config.rs
use crate::core::engine::SessionOptions;
use crate::core::types::OrderMode;
use crate::error::ConfigError;
use crate::speech::{Announcer, CommandSpeech};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_LOG_PATH: &str = "target/vocab_deck.log";

/// Flags that only mean something to the interactive browser.
pub const BROWSER_ONLY_FLAGS: &[&str] = &["--compile", "--theme", "--no-click"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub enabled: bool,
    /// Program and arguments; `{text}`, `{lang}` and `{voice}` are substituted.
    pub command: Vec<String>,
    /// Language tag -> engine voice name.
    pub voices: BTreeMap<String, String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        let mut voices = BTreeMap::new();
        voices.insert("en-US".to_string(), "en-us".to_string());
        voices.insert("id-ID".to_string(), "id".to_string());
        Self {
            enabled: true,
            command: vec!["espeak-ng".into(), "-v".into(), "{voice}".into(), "{text}".into()],
            voices,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub deck: Option<PathBuf>,
    pub title: String,
    pub source_lang: String,
    pub target_lang: String,
    pub source_label: String,
    pub target_label: String,
    pub theme: Theme,
    pub mode: OrderMode,
    pub seed: Option<u64>,
    pub click: bool,
    pub speech: SpeechConfig,
    pub log_path: PathBuf,
    pub log_level: String,
    /// Set by `--compile`: write the deck in binary form and exit.
    #[serde(skip)]
    pub compile: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            deck: None,
            title: "GSL".to_string(),
            source_lang: "en-US".to_string(),
            target_lang: "id-ID".to_string(),
            source_label: "English".to_string(),
            target_label: "Bahasa Indonesia".to_string(),
            theme: Theme::Light,
            mode: OrderMode::Alphabetical,
            seed: None,
            click: true,
            speech: SpeechConfig::default(),
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            log_level: "info".to_string(),
            compile: None,
        }
    }
}

impl BrowserConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Reads `--config` first (if given), then applies the remaining flags on top.
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().collect();
        let mut config = match args.iter().position(|arg| arg == "--config") {
            Some(idx) => {
                let path = args.get(idx + 1).ok_or_else(|| ConfigError::MissingValue("--config".into()))?;
                Self::from_file(Path::new(path))?
            }
            None => Self::default(),
        };
        config.apply_args(&args)?;
        config.log_level()?;
        Ok(config)
    }

    /// Like [`BrowserConfig::from_args`], but rejects the flags in `unsupported`
    /// instead of silently ignoring them.
    pub fn from_args_without<I>(args: I, unsupported: &[&str]) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().collect();
        if let Some(flag) = args.iter().find(|arg| unsupported.contains(&arg.as_str())) {
            return Err(ConfigError::UnsupportedFlag(flag.clone()));
        }
        Self::from_args(args)
    }

    pub fn apply_args(&mut self, args: &[String]) -> Result<(), ConfigError> {
        let mut iter = args.iter();
        while let Some(flag) = iter.next() {
            let mut value = || iter.next().cloned().ok_or_else(|| ConfigError::MissingValue(flag.clone()));
            match flag.as_str() {
                "--config" => {
                    value()?;
                }
                "--deck" => self.deck = Some(PathBuf::from(value()?)),
                "--theme" => {
                    self.theme = match value()?.as_str() {
                        "light" => Theme::Light,
                        "dark" => Theme::Dark,
                        other => return Err(invalid(flag, format!("unknown theme '{}'", other))),
                    }
                }
                "--mode" => self.mode = value()?.parse::<OrderMode>().map_err(|message| invalid(flag, message))?,
                "--seed" => {
                    let raw = value()?;
                    self.seed = Some(raw.parse::<u64>().map_err(|_| invalid(flag, format!("'{}' is not a number", raw)))?);
                }
                "--no-click" => self.click = false,
                "--no-speech" => self.speech.enabled = false,
                "--compile" => self.compile = Some(PathBuf::from(value()?)),
                "--log" => self.log_path = PathBuf::from(value()?),
                other => return Err(ConfigError::UnknownFlag(other.to_string())),
            }
        }
        Ok(())
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            source_lang: self.source_lang.clone(),
            target_lang: self.target_lang.clone(),
            mode: self.mode,
            seed: self.seed,
        }
    }

    pub fn announcer(&self) -> Announcer {
        if !self.speech.enabled || self.speech.command.is_empty() {
            return Announcer::silent();
        }
        Announcer::new(Box::new(CommandSpeech::new(
            self.speech.command.clone(),
            self.speech.voices.clone(),
        )))
    }

    pub fn log_level(&self) -> Result<log::LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| invalid("log_level", format!("unknown log level '{}'", self.log_level)))
    }
}

fn invalid(flag: &str, message: String) -> ConfigError {
    ConfigError::InvalidValue { flag: flag.to_string(), message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_match_the_bundled_deck() {
        let config = BrowserConfig::default();
        assert_eq!(config.source_lang, "en-US");
        assert_eq!(config.target_lang, "id-ID");
        assert_eq!(config.theme, Theme::Light);
        assert!(config.click);
    }

    #[test]
    fn flags_override_defaults() {
        let config = BrowserConfig::from_args(args(&[
            "--theme", "dark", "--mode", "shuffle", "--seed", "12", "--no-click", "--deck", "words.json",
        ]))
        .unwrap();
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.mode, OrderMode::Randomized);
        assert_eq!(config.seed, Some(12));
        assert!(!config.click);
        assert_eq!(config.deck, Some(PathBuf::from("words.json")));
    }

    #[test]
    fn bad_flags_are_reported() {
        assert!(matches!(BrowserConfig::from_args(args(&["--frobnicate"])), Err(ConfigError::UnknownFlag(_))));
        assert!(matches!(BrowserConfig::from_args(args(&["--seed"])), Err(ConfigError::MissingValue(_))));
        assert!(matches!(
            BrowserConfig::from_args(args(&["--seed", "ten"])),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"title": "Core", "mode": "shuffle", "speech": {{"enabled": false}}}}"#).unwrap();
        let path = file.path().to_string_lossy().into_owned();
        let config = BrowserConfig::from_args(args(&["--config", &path, "--theme", "dark"])).unwrap();
        assert_eq!(config.title, "Core");
        assert_eq!(config.mode, OrderMode::Randomized);
        assert_eq!(config.theme, Theme::Dark);
        assert!(!config.speech.enabled);
        assert_eq!(config.speech.voices.get("id-ID").map(String::as_str), Some("id"));
    }

    #[test]
    fn bad_log_level_in_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"log_level": "chatty"}}"#).unwrap();
        let path = file.path().to_string_lossy().into_owned();
        let err = BrowserConfig::from_args(args(&["--config", &path])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref flag, .. } if flag == "log_level"));
    }

    #[test]
    fn known_log_levels_parse() {
        let mut config = BrowserConfig::default();
        assert_eq!(config.log_level().unwrap(), log::LevelFilter::Info);
        config.log_level = "debug".to_string();
        assert_eq!(config.log_level().unwrap(), log::LevelFilter::Debug);
    }

    #[test]
    fn browser_only_flags_can_be_refused() {
        for flag in BROWSER_ONLY_FLAGS {
            let err = BrowserConfig::from_args_without(args(&[*flag, "x"]), BROWSER_ONLY_FLAGS).unwrap_err();
            assert!(matches!(err, ConfigError::UnsupportedFlag(ref f) if f.as_str() == *flag));
        }
        let config = BrowserConfig::from_args_without(args(&["--seed", "4"]), BROWSER_ONLY_FLAGS).unwrap();
        assert_eq!(config.seed, Some(4));
    }

    #[test]
    fn theme_toggles() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }
}
