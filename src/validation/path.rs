use std::path::{Component, Path, PathBuf};

use super::{ValidationError, has_traversal_segment};

/// Roots that user-supplied paths may never point into.
/// The boolean marks prefixes compared ASCII case-insensitively.
const SENSITIVE_ROOTS: [(&str, bool); 5] = [
    ("/etc/", false),
    ("/root/", false),
    ("/home/", false),
    ("C:\\Windows\\", true),
    ("C:\\Users\\", true),
];

fn starts_with_root(path: &str, root: &str, ignore_case: bool) -> bool {
    match path.get(..root.len()) {
        Some(head) if ignore_case => head.eq_ignore_ascii_case(root),
        Some(head) => head == root,
        None => false,
    }
}

/// Syntactic check of a raw path. Does not resolve anything, so it must not
/// be the last gate before a write: use [`PathResolver`] for that.
pub fn check_path(path: &str) -> Result<(), ValidationError> {
    if path.is_empty() {
        return Err(ValidationError::InputType("Path is required".into()));
    }

    if has_traversal_segment(path) {
        return Err(ValidationError::Traversal(format!(
            "Path traversal not allowed: '{}'",
            path
        )));
    }

    if let Some(root) = sensitive_root(path) {
        return Err(ValidationError::ForbiddenCharacter(format!(
            "Path '{}' points into the protected directory {}",
            path, root
        )));
    }

    Ok(())
}

fn sensitive_root(path: &str) -> Option<&'static str> {
    SENSITIVE_ROOTS
        .iter()
        .find(|(root, ignore_case)| starts_with_root(path, root, *ignore_case))
        .map(|(root, _)| *root)
}

/// Sensitive root of a resolved path, if any. A trailing separator is added
/// so the root directory itself matches too.
fn resolved_sensitive_root(path: &Path) -> Option<&'static str> {
    let mut text = path.to_string_lossy().replace('\\', "/");
    text.push('/');
    sensitive_root(&text).or_else(|| sensitive_root(&text.replace('/', "\\")))
}

fn is_absolute_input(raw: &str) -> bool {
    Path::new(raw).is_absolute() || raw.starts_with(['/', '\\']) || raw.get(1..2) == Some(":")
}

/// Resolves raw paths against a fixed base directory.
///
/// Resolution is lexical: `.` components are dropped and `..` pops the
/// previous component, like `path.resolve` in most runtimes. Nothing is
/// read from disk, so symlinks are not followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    base: PathBuf,
}

impl PathResolver {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn from_current_dir() -> std::io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Canonical absolute form of `raw`, rejected if a `..` survives.
    pub fn resolve(&self, raw: &str) -> Result<PathBuf, ValidationError> {
        if raw.is_empty() {
            return Err(ValidationError::InputType("File path is required".into()));
        }

        let resolved = normalize(&self.base.join(raw));
        if has_traversal_segment(&resolved.to_string_lossy()) {
            return Err(ValidationError::Traversal(format!(
                "Path traversal not allowed: '{}'",
                raw
            )));
        }

        Ok(resolved)
    }

    /// Resolves a path that is about to be written or handed to the back end.
    ///
    /// The sensitive-root rule of [`check_path`] is applied again on the
    /// resolved form, so spellings such as `//etc/x` or `/./etc/x` are caught.
    /// Relative input may stay inside a protected root the base already
    /// lives in (a project under `/home/`), absolute input may not.
    pub fn resolve_for_write(&self, raw: &str) -> Result<PathBuf, ValidationError> {
        let resolved = self.resolve(raw)?;
        if let Some(root) = resolved_sensitive_root(&resolved) {
            let base_root = resolved_sensitive_root(&normalize(&self.base));
            if is_absolute_input(raw) || base_root != Some(root) {
                return Err(ValidationError::ForbiddenCharacter(format!(
                    "Path '{}' resolves into the protected directory {}",
                    raw, root
                )));
            }
        }
        Ok(resolved)
    }

    /// Like [`resolve`](Self::resolve), and the result must stay under `root`.
    pub fn resolve_within(&self, raw: &str, root: &Path) -> Result<PathBuf, ValidationError> {
        let resolved = self.resolve(raw)?;
        let root = normalize(&self.base.join(root));
        if !resolved.starts_with(&root) {
            return Err(ValidationError::Traversal(format!(
                "'{}' resolves outside of {}",
                raw,
                root.display()
            )));
        }
        Ok(resolved)
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root; on a relative base it
                // has nothing to pop and is kept, so the caller rejects it.
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_)))
                    && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}
