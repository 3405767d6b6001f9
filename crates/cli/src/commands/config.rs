use secrecy::ExposeSecret;

use stride_core::config::{AppConfig, LlmProvider, LogFormat};

/// Renders the effective configuration with secrets redacted.
pub fn run(config: &AppConfig) -> String {
    let mut lines =
        vec!["effective config (source precedence: overrides > env > file > default):".to_string()];

    lines.push(render("llm.provider", provider_label(config.llm.provider)));
    lines.push(render(
        "llm.api_key",
        &config
            .llm
            .api_key
            .as_ref()
            .map(|key| redact(key.expose_secret()))
            .unwrap_or_else(|| "(unset)".to_string()),
    ));
    lines.push(render("llm.base_url", config.llm.base_url.as_deref().unwrap_or("(unset)")));
    lines.push(render("llm.model", &config.llm.model));
    lines.push(render("llm.timeout_secs", &config.llm.timeout_secs.to_string()));
    lines.push(render("llm.max_tokens", &config.llm.max_tokens.to_string()));
    lines.push(render("llm.temperature", &config.llm.temperature.to_string()));
    lines.push(render("planner.max_tokens", &config.planner.max_tokens.to_string()));
    lines.push(render("planner.temperature", &config.planner.temperature.to_string()));
    lines.push(render("logging.level", &config.logging.level));
    lines.push(render("logging.format", format_label(config.logging.format)));

    lines.join("\n")
}

fn render(key: &str, value: impl AsRef<str>) -> String {
    format!("  {key} = {}", value.as_ref())
}

fn provider_label(provider: LlmProvider) -> &'static str {
    match provider {
        LlmProvider::OpenAi => "openai",
        LlmProvider::Ollama => "ollama",
    }
}

fn format_label(format: LogFormat) -> &'static str {
    match format {
        LogFormat::Compact => "compact",
        LogFormat::Pretty => "pretty",
        LogFormat::Json => "json",
    }
}

fn redact(value: &str) -> String {
    let prefix: String = value.chars().take(4).collect();
    format!("{prefix}****")
}

#[cfg(test)]
mod tests {
    use super::run;
    use stride_core::config::AppConfig;

    #[test]
    fn output_lists_every_section_and_redacts_the_api_key() {
        let mut config = AppConfig::default();
        config.llm.api_key = Some("sk-secret-value".to_string().into());

        let output = run(&config);
        assert!(output.contains("llm.provider = ollama"));
        assert!(output.contains("planner.max_tokens = 800"));
        assert!(output.contains("logging.format = compact"));
        assert!(output.contains("sk-s****"));
        assert!(!output.contains("sk-secret-value"));
    }

    #[test]
    fn unset_api_key_is_reported_as_unset() {
        let output = run(&AppConfig::default());
        assert!(output.contains("llm.api_key = (unset)"));
    }
}
