//! # Draft Files
//!
//! A draft is the JSON form of a [`RosterDraft`]. It is rewritten whole;
//! a command that fails leaves the previous file in place.
//!
//! A draft remembers the scope it was pulled under. Its officials list was
//! filtered for that scope, so it is only ever reopened under it.

use std::path::Path;

use anyhow::{bail, Context, Result};

use jury_core::Scope;
use jury_roster::{RosterDraft, RosterSession};

/// Read and parse a draft file.
pub fn read_draft(path: &Path) -> Result<RosterDraft> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read draft: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("invalid roster draft JSON in {}", path.display()))
}

/// Read a draft and resume its session.
///
/// `scope` is the operator's `--scope`, if given; a draft pulled under the
/// other scope is refused.
pub fn open_session(path: &Path, scope: Option<Scope>) -> Result<RosterSession> {
    let draft = read_draft(path)?;
    if let Some(scope) = scope {
        if scope != draft.scope {
            bail!(
                "draft {} was pulled under the {} scope, not {}",
                path.display(),
                draft.scope.as_str(),
                scope.as_str()
            );
        }
    }
    Ok(RosterSession::from_draft(draft))
}

/// Write a draft file, replacing any previous content.
pub fn write_draft(path: &Path, draft: &RosterDraft) -> Result<()> {
    let json = render_draft(draft)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write draft: {}", path.display()))?;
    tracing::debug!(path = %path.display(), positions = draft.positions.len(), "draft written");
    Ok(())
}

/// Pretty-printed JSON of a draft, newline terminated.
pub fn render_draft(draft: &RosterDraft) -> Result<String> {
    let mut json = serde_json::to_string_pretty(draft).context("failed to serialize draft")?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jury_core::EventId;
    use jury_roster::Position;

    fn draft(scope: Scope) -> RosterDraft {
        RosterDraft {
            event_id: EventId("e1".to_string()),
            scope,
            baseline: vec![Position::referee()],
            positions: vec![Position::referee()],
            officials: vec![],
        }
    }

    #[test]
    fn draft_survives_write_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.json");
        let draft = draft(Scope::National);

        write_draft(&path, &draft).unwrap();
        assert_eq!(read_draft(&path).unwrap(), draft);
        assert!(render_draft(&draft).unwrap().contains("\"scope\": \"national\""));
    }

    #[test]
    fn session_opens_under_the_pulled_scope() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.json");
        write_draft(&path, &draft(Scope::National)).unwrap();

        assert_eq!(open_session(&path, None).unwrap().scope(), Scope::National);
        assert_eq!(
            open_session(&path, Some(Scope::National)).unwrap().scope(),
            Scope::National
        );
        let err = open_session(&path, Some(Scope::Regional)).unwrap_err();
        assert!(err.to_string().contains("pulled under the national scope, not regional"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = read_draft(Path::new("/nonexistent/jury/draft.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/jury/draft.json"));
    }

    #[test]
    fn garbage_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = read_draft(&path).unwrap_err();
        assert!(err.to_string().starts_with("invalid roster draft JSON"));
    }
}
