//! Project configuration. A `tattle.yaml` at the project root names the
//! site root URL and (optionally) the posts directory; the theme directory
//! next to it carries a `theme.yaml` naming the tag template fragments.

use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use url::Url;

#[derive(Deserialize)]
struct Project {
    /// Absolute base URL of the published site, e.g. `https://example.org/`.
    site_root: Url,

    #[serde(default = "default_posts_directory")]
    posts_directory: PathBuf,
}

fn default_posts_directory() -> PathBuf {
    PathBuf::from("_posts")
}

#[derive(Deserialize)]
struct Theme {
    tag_template: Vec<PathBuf>,
}

pub struct Config {
    pub site_root: Url,
    pub posts_source_directory: PathBuf,
    pub tag_template: Vec<PathBuf>,
}

impl Config {
    /// Finds `tattle.yaml` in `dir` or the nearest parent directory and
    /// loads the configuration from it.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        let path = dir.join("tattle.yaml");
        if path.exists() {
            match Config::from_project_file(&path) {
                Ok(config) => Ok(config),
                Err(e) => Err(anyhow!("Loading configuration: {:?}", e)),
            }
        } else {
            match dir.parent() {
                Some(parent) => Config::from_directory(parent),
                None => Err(anyhow!(
                    "Could not find `tattle.yaml` in any parent directory"
                )),
            }
        }
    }

    pub fn from_project_file(path: &Path) -> Result<Config> {
        let project: Project = serde_yaml::from_reader(open(path, "project")?)?;
        match path.parent() {
            None => Err(anyhow!(
                "Can't get parent directory for provided project file path '{:?}'",
                path
            )),
            Some(project_root) => {
                let theme_dir = project_root.join("theme");
                let theme_file = open(&theme_dir.join("theme.yaml"), "theme")?;
                let theme: Theme = serde_yaml::from_reader(theme_file)?;
                Ok(Config {
                    site_root: project.site_root,
                    posts_source_directory: project_root.join(project.posts_directory),
                    tag_template: theme
                        .tag_template
                        .iter()
                        .map(|relpath| theme_dir.join(relpath))
                        .collect(),
                })
            }
        }
    }
}

fn open(path: &Path, kind: &str) -> Result<File> {
    match File::open(path) {
        Err(e) => Err(anyhow!("Opening {} file `{}`: {}", kind, path.display(), e)),
        Ok(file) => Ok(file),
    }
}
