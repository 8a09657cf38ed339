use std::{collections::HashMap, fs};

use anyhow::Context;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8080".into(),
        }
    }
}

/// Defaults, then `console.toml`, then environment, then the CLI flag.
pub fn load_settings(cli_server_url: Option<String>) -> anyhow::Result<Settings> {
    let file_raw = fs::read_to_string("console.toml").ok();
    let mut settings = resolve(
        file_raw.as_deref(),
        |name| std::env::var(name).ok(),
        cli_server_url,
    );

    settings.server_url = settings.server_url.trim_end_matches('/').to_string();
    Url::parse(&settings.server_url)
        .with_context(|| format!("invalid server url '{}'", settings.server_url))?;

    Ok(settings)
}

fn resolve(
    file_raw: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
    cli_server_url: Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file_raw {
        apply_file(&mut settings, raw);
    }

    if let Some(v) = env("SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = cli_server_url {
        settings.server_url = v;
    }

    settings
}

fn apply_file(settings: &mut Settings, raw: &str) {
    if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
        if let Some(v) = file_cfg.get("server_url") {
            settings.server_url = v.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_from<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            pairs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn file_value_overrides_default() {
        let mut settings = Settings::default();
        apply_file(&mut settings, "server_url = \"http://10.0.0.2:9000\"\n");
        assert_eq!(settings.server_url, "http://10.0.0.2:9000");
    }

    #[test]
    fn unparseable_file_keeps_defaults() {
        let mut settings = Settings::default();
        apply_file(&mut settings, "server_url = [not toml");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn each_layer_overrides_the_previous() {
        let no_env = env_from(&[]);
        assert_eq!(
            resolve(None, &no_env, None).server_url,
            Settings::default().server_url
        );

        let file = "server_url = \"http://from-file:1\"\n";
        assert_eq!(
            resolve(Some(file), &no_env, None).server_url,
            "http://from-file:1"
        );

        let bare_env = env_from(&[("SERVER_URL", "http://from-env:2")]);
        assert_eq!(
            resolve(Some(file), &bare_env, None).server_url,
            "http://from-env:2"
        );

        let both_env = env_from(&[
            ("SERVER_URL", "http://from-env:2"),
            ("APP__SERVER_URL", "http://from-app-env:3"),
        ]);
        assert_eq!(
            resolve(Some(file), &both_env, None).server_url,
            "http://from-app-env:3"
        );

        assert_eq!(
            resolve(Some(file), &both_env, Some("http://from-cli:4".into())).server_url,
            "http://from-cli:4"
        );
    }

    #[test]
    fn trailing_slash_is_trimmed_and_url_validated() {
        let settings =
            load_settings(Some("http://localhost:8080/".into())).expect("valid url");
        assert_eq!(settings.server_url, "http://localhost:8080");

        assert!(load_settings(Some("not a url".into())).is_err());
    }
}
