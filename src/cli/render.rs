//! Plan rendering
//!
//! Prints a resolved container description as text, JSON or YAML.

use goci::client::Container;
use goci::infrastructure::Result;
use std::fmt::Write as _;

/// Output format for rendered plans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human readable, one fact per line
    Text,
    /// Pretty-printed JSON
    Json,
    /// YAML document
    Yaml,
}

/// Renders `container` in the requested format
pub fn render(container: &Container, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(container)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(container)?),
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(container)?;
            Ok(yaml.trim_end().to_string())
        }
    }
}

fn render_text(container: &Container) -> String {
    let mut out = String::new();

    if let Some(image) = container.image() {
        let _ = writeln!(out, "image:   {image}");
    }
    for (path, cache) in container.caches() {
        let _ = writeln!(out, "cache:   {path} <- {cache}");
    }
    for (path, dir) in container.directories() {
        let _ = writeln!(out, "mount:   {path} <- {}", dir.path());
    }
    for (path, file) in container.files() {
        let image = file.image.as_deref().unwrap_or("<none>");
        let _ = writeln!(out, "file:    {path} <- {image}:{}", file.path);
    }
    if let Some(workdir) = container.workdir() {
        let _ = writeln!(out, "workdir: {workdir}");
    }
    for (name, value) in container.env() {
        let _ = writeln!(out, "env:     {name}={value}");
    }
    if !container.exec().is_empty() {
        let _ = writeln!(out, "exec:    {}", container.exec().join(" "));
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use goci::client::BaseClient;
    use goci::golang;

    #[test]
    fn test_render_text_test_plan() {
        let container = golang::test(&BaseClient, [golang::enable_race_detector()]);
        let text = render(&container, OutputFormat::Text).unwrap();

        assert!(text.starts_with("image:   docker.io/library/golang:latest"));
        assert!(text.contains("mount:   /src <- ."));
        assert!(text.contains("workdir: /src"));
        assert!(text.contains("env:     CGO_ENABLED=1"));
        assert!(text.ends_with("exec:    go test -race ./..."));
    }

    #[test]
    fn test_render_text_lint_file() {
        let container = golang::lint(&BaseClient, Vec::<golang::LintOption>::new());
        let text = render(&container, OutputFormat::Text).unwrap();

        assert!(text.contains(
            "file:    /usr/local/bin/golangci-lint <- docker.io/golangci/golangci-lint:latest:/usr/bin/golangci-lint"
        ));
    }

    #[test]
    fn test_render_json_roundtrip() {
        let container = golang::base(&BaseClient, [golang::base_image_tag("1.21")]);
        let json = render(&container, OutputFormat::Json).unwrap();

        let back: Container = serde_json::from_str(&json).unwrap();
        assert_eq!(back, container);
    }

    #[test]
    fn test_render_yaml() {
        let container = golang::base(&BaseClient, [golang::enable_cgo()]);
        let yaml = render(&container, OutputFormat::Yaml).unwrap();

        assert!(yaml.contains("image: docker.io/library/golang:latest"));
        assert!(!yaml.ends_with('\n'));
        let back: Container = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back.env_variable("CGO_ENABLED"), Some("1"));
    }
}
