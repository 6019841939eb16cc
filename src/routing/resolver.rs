//! The ordered routing chain.
//!
//! # Responsibilities
//! - Map a URL path to exactly one `RouteAction`
//! - Check asset existence under the static root per request
//! - Rewrite absent legacy sprite paths to their current-generation form
//!
//! # Design Decisions
//! - First match wins; rules are evaluated in declared order
//! - Legacy script paths 404 even when a file of that name exists, so the
//!   refusal rule runs before any filesystem lookup
//! - The terminal rule never fails: unknown paths get the SPA document so
//!   client-side routing can take over
//! - Traversal segments (`..`) never resolve under the static root; such
//!   paths simply fall through to the SPA fallback

use std::path::{Path, PathBuf};

use tokio::fs;

/// Exact path served with a random banner image.
pub const BANNER_ROUTE: &str = "/lobby-banner";

/// Retired sprite path prefix, kept for links in old replays and chat logs.
pub const LEGACY_SPRITE_PREFIX: &str = "/sprites/afd";

/// Current-generation sprite prefix that absent legacy paths rewrite to.
pub const CURRENT_SPRITE_PREFIX: &str = "/sprites/gen5";

/// Extensions of server-side scripts from the pre-SPA deployment. Requests
/// for these are refused outright regardless of filesystem state.
const LEGACY_SCRIPT_EXTENSIONS: &[&str] = &["php"];

const INDEX_FILE: &str = "index.html";

/// What the chain decided for a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAction {
    /// Unconditional 404 (legacy script path).
    NotFound,
    /// Serve one uniformly random file from the banner directory.
    ServeRandomBanner,
    /// 302 to the given path; the client re-requests through the chain.
    Redirect(String),
    /// Serve this existing regular file from the static root.
    ServeStatic(PathBuf),
    /// Serve the SPA's root `index.html` (terminal catch-all).
    SpaFallback,
}

/// Resolves URL paths to route actions against a fixed static root and
/// banner directory. Holds no mutable state; safe to share across requests.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    static_root: PathBuf,
    banner_dir: PathBuf,
}

impl AssetResolver {
    pub fn new(static_root: impl Into<PathBuf>, banner_dir: impl Into<PathBuf>) -> Self {
        Self {
            static_root: static_root.into(),
            banner_dir: banner_dir.into(),
        }
    }

    /// The banner directory, enumerated fresh on every banner request.
    pub fn banner_dir(&self) -> &Path {
        &self.banner_dir
    }

    /// The SPA root document served by the catch-all rule.
    pub fn spa_index(&self) -> PathBuf {
        self.static_root.join(INDEX_FILE)
    }

    /// Walk the rule chain for `path` and return the first matching action.
    pub async fn resolve(&self, path: &str) -> RouteAction {
        // Rule 1: legacy server-side scripts are gone for good.
        if has_legacy_script_extension(path) {
            return RouteAction::NotFound;
        }

        // Rule 2: the banner route is an exact match.
        if path == BANNER_ROUTE {
            return RouteAction::ServeRandomBanner;
        }

        let local = sanitize_path(path);

        // Rule 3: absent legacy sprites redirect to the current prefix.
        if let Some(rest) = path.strip_prefix(LEGACY_SPRITE_PREFIX) {
            let present = match &local {
                Some(relative) => is_file(&self.static_root.join(relative)).await,
                None => false,
            };
            if !present {
                return RouteAction::Redirect(format!("{CURRENT_SPRITE_PREFIX}{rest}"));
            }
        }

        // Rule 4: existing files under the static root are served directly;
        // directories resolve to their index document.
        if let Some(relative) = local {
            let candidate = self.static_root.join(&relative);
            match fs::metadata(&candidate).await {
                Ok(meta) if meta.is_file() => return RouteAction::ServeStatic(candidate),
                Ok(meta) if meta.is_dir() => {
                    let index = candidate.join(INDEX_FILE);
                    if is_file(&index).await {
                        return RouteAction::ServeStatic(index);
                    }
                }
                _ => {}
            }
        }

        // Rule 5: everything else belongs to the client-side router.
        RouteAction::SpaFallback
    }
}

/// True when the path names a legacy server-side script. Matching is
/// case-insensitive, as the old routing layer's was.
fn has_legacy_script_extension(path: &str) -> bool {
    let Some((_, extension)) = path.rsplit_once('.') else {
        return false;
    };
    LEGACY_SCRIPT_EXTENSIONS
        .iter()
        .any(|legacy| extension.eq_ignore_ascii_case(legacy))
}

/// Turn a URL path into a relative filesystem path confined to the static
/// root. Returns `None` for paths carrying traversal segments; those fall
/// through to the SPA fallback rather than escaping the root.
fn sanitize_path(path: &str) -> Option<PathBuf> {
    let mut clean = PathBuf::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => return None,
            normal => clean.push(normal),
        }
    }
    Some(clean)
}

async fn is_file(path: &Path) -> bool {
    fs::metadata(path).await.map(|m| m.is_file()).unwrap_or(false)
}
