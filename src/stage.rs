//! Build stages of the classic docs pipeline.
//!
//! | Stage  | Make target   | LOC            | Artifact subdirectories |
//! |--------|---------------|----------------|-------------------------|
//! | `pre`  | `alldoc_pre`  | docs directory | `manualpages`           |
//! | `post` | `alldoc_post` | output dir     | `include`, `src`        |
//!
//! `pre` produces the generated manual pages the renderer turns into the
//! website. `post` copies raw pre-rendered html pages verbatim.

use serde::Serialize;

use crate::errors::DocsError;

/// Subdirectories holding generated manual pages (pre stage).
pub const GENERATED_SUBDIRS: &[&str] = &["manualpages"];

/// Source-tree subdirectories whose raw html is copied as-is (post stage).
pub const RAW_HTML_SUBDIRS: &[&str] = &["include", "src"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Pre,
    Post,
}

impl Stage {
    /// Make target invoked for this stage.
    pub fn target(self) -> &'static str {
        match self {
            Stage::Pre => "alldoc_pre",
            Stage::Post => "alldoc_post",
        }
    }

    /// Directories, relative to the artifact location, that hold this stage's output.
    pub fn artifact_subdirs(self) -> &'static [&'static str] {
        match self {
            Stage::Pre => GENERATED_SUBDIRS,
            Stage::Post => RAW_HTML_SUBDIRS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Pre => "pre",
            Stage::Post => "post",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Stage {
    type Err = DocsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pre" => Ok(Stage::Pre),
            "post" => Ok(Stage::Post),
            other => Err(DocsError::UnrecognizedStage(other.to_string())),
        }
    }
}

/// Look up the artifact subdirectories for a raw stage name.
///
/// Fails with [`DocsError::UnrecognizedStage`] for anything but `pre` or `post`.
pub fn classic_docs_subdirs(stage: &str) -> Result<&'static [&'static str], DocsError> {
    stage.parse::<Stage>().map(Stage::artifact_subdirs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_stages() {
        assert_eq!("pre".parse::<Stage>().unwrap(), Stage::Pre);
        assert_eq!("post".parse::<Stage>().unwrap(), Stage::Post);
    }

    #[test]
    fn test_parse_is_exact() {
        for bad in ["", "PRE", "Post", " pre", "post ", "final", "pre,post"] {
            match bad.parse::<Stage>() {
                Err(DocsError::UnrecognizedStage(value)) => assert_eq!(value, bad),
                other => panic!("Expected UnrecognizedStage for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_display_matches_parse() {
        for stage in [Stage::Pre, Stage::Post] {
            assert_eq!(stage.to_string().parse::<Stage>().unwrap(), stage);
        }
    }

    #[test]
    fn test_targets() {
        assert_eq!(Stage::Pre.target(), "alldoc_pre");
        assert_eq!(Stage::Post.target(), "alldoc_post");
    }

    #[test]
    fn test_subdirs_lookup() {
        assert_eq!(classic_docs_subdirs("pre").unwrap(), &["manualpages"]);
        assert_eq!(classic_docs_subdirs("post").unwrap(), &["include", "src"]);
    }

    #[test]
    fn test_subdirs_lookup_rejects_unknown_stage() {
        let err = classic_docs_subdirs("html").unwrap_err();
        assert!(err.to_string().contains("Unrecognized stage html"));
    }

    #[test]
    fn test_stage_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Stage::Pre).unwrap(), "\"pre\"");
        assert_eq!(serde_json::to_string(&Stage::Post).unwrap(), "\"post\"");
    }
}
