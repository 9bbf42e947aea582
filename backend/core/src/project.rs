//! Portfolio projects.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::document::{Document, DocumentMeta};
use crate::error::{FolioError, FolioResult};

pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_SHORT_DESCRIPTION_LEN: usize = 200;

static NON_SLUG_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9_\s-]").unwrap());
static SLUG_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s_-]+").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectType {
    #[default]
    #[serde(rename = "AI")]
    Ai,
    Web,
    Mobile,
    Other,
}

impl ProjectType {
    pub const ALL: [ProjectType; 4] = [Self::Ai, Self::Web, Self::Mobile, Self::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ai => "AI",
            Self::Web => "Web",
            Self::Mobile => "Mobile",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    pub title: String,
    pub description: String,
    pub short_description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub project_type: ProjectType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub additional_images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub order: i64,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Inactive projects are hidden from every read.
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl Document for Project {
    const COLLECTION: &'static str = "projects";
    const UNIQUE_FIELDS: &'static [&'static str] = &["slug"];

    fn meta(&self) -> &DocumentMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut DocumentMeta {
        &mut self.meta
    }
}

impl Project {
    pub fn validate(&self) -> FolioResult<()> {
        let mut problems = Vec::new();
        if self.title.is_empty() {
            problems.push("Project title is required".to_string());
        } else if self.title.chars().count() > MAX_TITLE_LEN {
            problems.push(format!("Title cannot be more than {MAX_TITLE_LEN} characters"));
        }
        if self.description.is_empty() {
            problems.push("Project description is required".to_string());
        }
        if self.short_description.is_empty() {
            problems.push("Short description is required".to_string());
        } else if self.short_description.chars().count() > MAX_SHORT_DESCRIPTION_LEN {
            problems.push(format!(
                "Short description cannot be more than {MAX_SHORT_DESCRIPTION_LEN} characters"
            ));
        }
        if let Some(url) = self.github_url.as_deref().filter(|u| !u.is_empty()) {
            if !url.starts_with("https://github.com/") {
                problems.push("GitHub URL must start with https://github.com/".to_string());
            }
        }
        if let Some(url) = self.demo_url.as_deref().filter(|u| !u.is_empty()) {
            if !url.starts_with("http") {
                problems.push("Demo URL must be a valid URL".to_string());
            }
        }
        if self.slug.is_empty() {
            problems.push("Project slug is required".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(FolioError::validation(format!("Invalid input data. {}", problems.join(". "))))
        }
    }
}

/// Derive a URL slug from a title: lower-case, strip punctuation, and join words with `-`.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = NON_SLUG_CHARS.replace_all(lowered.trim(), "");
    let joined = SLUG_SEPARATORS.replace_all(&stripped, "-");
    joined.trim_matches('-').to_string()
}

// ---------------------------------------------------------------------------
// Create / update payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub project_type: ProjectType,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub additional_images: Vec<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub demo_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl Default for NewProject {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            short_description: String::new(),
            technologies: Vec::new(),
            project_type: ProjectType::default(),
            image_url: None,
            additional_images: Vec::new(),
            github_url: None,
            demo_url: None,
            featured: false,
            order: 0,
            slug: None,
            content: None,
            active: true,
        }
    }
}

impl NewProject {
    /// Normalize (deriving the slug when absent) and validate.
    pub fn into_project(self) -> FolioResult<Project> {
        let title = self.title.trim().to_string();
        let slug = match self.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => s.to_lowercase(),
            None => slugify(&title),
        };
        let project = Project {
            meta: DocumentMeta::new(),
            title,
            description: self.description.trim().to_string(),
            short_description: self.short_description.trim().to_string(),
            technologies: self.technologies.iter().map(|t| t.trim().to_string()).collect(),
            project_type: self.project_type,
            image_url: self.image_url,
            additional_images: self.additional_images,
            github_url: self.github_url,
            demo_url: self.demo_url,
            featured: self.featured,
            order: self.order,
            slug,
            content: self.content,
            active: self.active,
        };
        project.validate()?;
        Ok(project)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub project_type: Option<ProjectType>,
    pub image_url: Option<String>,
    pub additional_images: Option<Vec<String>>,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    pub featured: Option<bool>,
    pub order: Option<i64>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub active: Option<bool>,
}

impl ProjectPatch {
    /// Apply the patch. A new title without an explicit slug re-derives the slug.
    pub fn apply(self, project: &mut Project) -> FolioResult<()> {
        match (&self.title, &self.slug) {
            (_, Some(slug)) => project.slug = slug.trim().to_lowercase(),
            (Some(title), None) => project.slug = slugify(title),
            (None, None) => {}
        }
        if let Some(t) = self.title {
            project.title = t.trim().to_string();
        }
        if let Some(d) = self.description {
            project.description = d.trim().to_string();
        }
        if let Some(s) = self.short_description {
            project.short_description = s.trim().to_string();
        }
        if let Some(t) = self.technologies {
            project.technologies = t;
        }
        if let Some(p) = self.project_type {
            project.project_type = p;
        }
        if let Some(i) = self.image_url {
            project.image_url = Some(i);
        }
        if let Some(a) = self.additional_images {
            project.additional_images = a;
        }
        if let Some(g) = self.github_url {
            project.github_url = Some(g);
        }
        if let Some(d) = self.demo_url {
            project.demo_url = Some(d);
        }
        if let Some(f) = self.featured {
            project.featured = f;
        }
        if let Some(o) = self.order {
            project.order = o;
        }
        if let Some(c) = self.content {
            project.content = Some(c);
        }
        if let Some(a) = self.active {
            project.active = a;
        }
        project.validate()
    }
}
