use std::path::{Path, PathBuf};

use crate::models::Category;

/// Default vault location when neither the CLI flag nor `VAULT_PATH` is set.
pub const DEFAULT_VAULT_ROOT: &str = "./AI_Employee_Vault";

/// Immutable vault configuration, built once at startup and passed into
/// every component. The root is the only tunable; everything else is a
/// fixed layout underneath it.
#[derive(Clone, Debug)]
pub struct VaultConfig {
    root: PathBuf,
}

impl VaultConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the vault root from the `VAULT_PATH` environment variable,
    /// falling back to [`DEFAULT_VAULT_ROOT`].
    pub fn from_env() -> Self {
        let root = std::env::var("VAULT_PATH").unwrap_or_else(|_| DEFAULT_VAULT_ROOT.to_string());
        Self::new(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory backing one workflow category.
    pub fn category_dir(&self, category: Category) -> PathBuf {
        self.root.join(category.rel_dir())
    }

    /// Directory holding the daily action log files.
    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("Logs")
    }

    /// Optional free-form overview document shown on the dashboard.
    pub fn dashboard_file(&self) -> PathBuf {
        self.root.join("Dashboard.md")
    }

    /// Create every category directory and the log directory.
    pub fn ensure_layout(&self) -> std::io::Result<()> {
        for category in Category::ALL {
            std::fs::create_dir_all(self.category_dir(*category))?;
        }
        std::fs::create_dir_all(self.logs_dir())
    }

    /// Lexical containment check: does `path` stay inside the vault root
    /// once both sides are normalized? No filesystem access, `..` and
    /// absolute escapes are rejected outright.
    pub fn contains(&self, path: &Path) -> bool {
        let root = normalize(&self.root);
        let path = normalize(path);
        path.starts_with(&root)
    }
}

/// Normalize a path lexically: drop `.` components, resolve `..` against
/// preceding components where possible. Relative paths are anchored to the
/// current directory so they compare against a relative root.
fn normalize(path: &Path) -> PathBuf {
    use std::path::Component;

    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(Component::ParentDir);
                }
            }
            other => out.push(other),
        }
    }
    out
}
