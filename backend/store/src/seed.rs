//! Seed data: YAML seed files and the sample project set.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use folio_core::{NewCommand, NewProject, ProjectType};

/// Documents to load into a fresh store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedData {
    #[serde(default)]
    pub commands: Vec<NewCommand>,
    #[serde(default)]
    pub projects: Vec<NewProject>,
}

/// Read a YAML seed file.
pub async fn load_seed_file(path: &Path) -> Result<SeedData> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read seed file: {}", path.display()))?;
    let seed: SeedData = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse seed YAML at: {}", path.display()))?;
    info!(
        path = %path.display(),
        commands = seed.commands.len(),
        projects = seed.projects.len(),
        "Read seed file"
    );
    Ok(seed)
}

/// A small showcase used when no seed file is configured.
pub fn sample_projects() -> Vec<NewProject> {
    vec![
        NewProject {
            title: "Terminal Portfolio".into(),
            description: "This website: a portfolio with a scripted terminal, project showcase and contact system.".into(),
            short_description: "Portfolio site with an interactive terminal".into(),
            technologies: vec!["Rust".into(), "Axum".into(), "Next.js".into()],
            project_type: ProjectType::Web,
            github_url: Some("https://github.com/example/portfolio-website".into()),
            demo_url: Some("https://portfolio.example.com".into()),
            featured: true,
            order: 1,
            ..Default::default()
        },
        NewProject {
            title: "Vision Inspector".into(),
            description: "Real-time defect detection for manufacturing lines using object detection models.".into(),
            short_description: "Computer vision for quality control".into(),
            technologies: vec!["PyTorch".into(), "OpenCV".into(), "YOLO".into()],
            project_type: ProjectType::Ai,
            github_url: Some("https://github.com/example/vision-inspector".into()),
            featured: true,
            order: 2,
            ..Default::default()
        },
        NewProject {
            title: "Trail Notes".into(),
            description: "Offline-first hiking journal with map sync.".into(),
            short_description: "Offline hiking journal".into(),
            technologies: vec!["React Native".into(), "SQLite".into()],
            project_type: ProjectType::Mobile,
            order: 3,
            ..Default::default()
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::CommandKind;

    #[test]
    fn parses_yaml_seed() {
        let yaml = r#"
commands:
  - command: hello
    type: static
    response: "Hello there!"
    category: general
  - name: hi
    kind: alias
    aliasTarget: hello
projects:
  - title: Demo
    description: A demo
    shortDescription: Demo
    projectType: Web
"#;
        let seed: SeedData = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(seed.commands.len(), 2);
        assert_eq!(seed.commands[1].kind, CommandKind::Alias);
        assert_eq!(seed.projects[0].project_type, ProjectType::Web);
    }

    #[test]
    fn sample_projects_are_valid() {
        for p in sample_projects() {
            p.into_project().unwrap();
        }
    }
}
