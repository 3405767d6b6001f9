use serde::Serialize;

use stride_agent::{resolve_model, HttpLlmClient};
use stride_core::config::{AppConfig, LlmProvider};

#[derive(Debug, Serialize)]
struct DoctorReport {
    status: String,
    checks: Vec<DoctorCheck>,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: String,
    status: String,
    detail: String,
}

/// Reports configuration validity and collaborator readiness. Static
/// checks only; no network traffic is generated.
pub fn run(config: &AppConfig, json: bool) -> String {
    let mut checks = Vec::new();

    checks.push(match config.validate() {
        Ok(()) => check("config", "ok", "configuration validates"),
        Err(error) => check("config", "error", error.to_string()),
    });

    checks.push(match config.llm.provider {
        LlmProvider::OpenAi if config.llm.api_key.is_some() => {
            check("llm.credentials", "ok", "api key configured for openai")
        }
        LlmProvider::OpenAi => {
            check("llm.credentials", "error", "openai provider without an api key")
        }
        LlmProvider::Ollama => check(
            "llm.credentials",
            "ok",
            format!(
                "ollama endpoint {}",
                config.llm.base_url.as_deref().unwrap_or("(unset)")
            ),
        ),
    });

    checks.push(check(
        "llm.model",
        "ok",
        format!("`{}` resolves to `{}`", config.llm.model, resolve_model(&config.llm.model)),
    ));

    checks.push(match HttpLlmClient::from_config(&config.llm) {
        Ok(_) => check("llm.client", "ok", "generation client can be constructed"),
        Err(error) => check("llm.client", "error", error.to_string()),
    });

    let status = if checks.iter().any(|entry| entry.status == "error") { "error" } else { "ok" };
    let report = DoctorReport { status: status.to_string(), checks };

    if json {
        serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!("{{\"status\":\"error\",\"detail\":\"serialization failed: {error}\"}}")
        })
    } else {
        render_text(&report)
    }
}

fn check(name: &str, status: &str, detail: impl Into<String>) -> DoctorCheck {
    DoctorCheck { name: name.to_string(), status: status.to_string(), detail: detail.into() }
}

fn render_text(report: &DoctorReport) -> String {
    let mut lines = vec![format!("doctor: {}", report.status)];
    for entry in &report.checks {
        lines.push(format!("  [{}] {} - {}", entry.status, entry.name, entry.detail));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::run;
    use stride_core::config::AppConfig;

    #[test]
    fn default_config_passes_all_checks() {
        let output = run(&AppConfig::default(), false);
        assert!(output.starts_with("doctor: ok"));
        assert!(output.contains("llm.model"));
    }

    #[test]
    fn json_output_is_machine_readable() {
        let output = run(&AppConfig::default(), true);
        let parsed: serde_json::Value =
            serde_json::from_str(&output).expect("doctor json parses");
        assert_eq!(parsed["status"], "ok");
        assert!(parsed["checks"].as_array().map(|checks| !checks.is_empty()).unwrap_or(false));
    }
}
