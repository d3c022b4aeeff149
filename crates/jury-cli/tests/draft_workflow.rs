//! End-to-end tests of the draft workflow: pull from a mocked roster
//! service, edit and show the draft on disk, push it back.

use std::path::{Path, PathBuf};

use jury_cli::draft::{read_draft, write_draft};
use jury_cli::edit::{run_edit, EditArgs, EditOp};
use jury_cli::pull::{run_pull, PullArgs};
use jury_cli::push::{run_push, PushArgs};
use jury_cli::show::{run_show, ShowArgs};
use jury_client::ClientConfig;
use jury_core::{EventId, Official, OfficialId, Scope};
use jury_roster::{Position, PositionDefaults, RosterDraft};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn assigned(mut p: Position, id: &str, name: &str) -> Position {
    p.assignee_id = Some(OfficialId::from(id));
    p.assignee_name = name.to_string();
    p.original_snapshot = Some(p.snapshot());
    p
}

fn loaded_positions() -> Vec<Position> {
    vec![
        assigned(Position::referee(), "off-1", "Rita Mora"),
        assigned(Position::new(PositionDefaults::default()), "off-2", "Luis Pardo"),
    ]
}

fn write_fixture(dir: &Path) -> PathBuf {
    write_scoped_fixture(dir, Scope::Regional)
}

fn write_scoped_fixture(dir: &Path, scope: Scope) -> PathBuf {
    let file = dir.join("draft.json");
    let draft = RosterDraft {
        event_id: EventId("cup-final".to_string()),
        scope,
        baseline: loaded_positions(),
        positions: loaded_positions(),
        officials: vec![Official::new("off-3", "Marta Gil")],
    };
    write_draft(&file, &draft).unwrap();
    file
}

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig {
        base_url: server.uri().parse().unwrap(),
        api_token: None,
        timeout_secs: 5,
    }
}

// ── edit / show ──────────────────────────────────────────────────────

#[test]
fn edit_applies_ops_and_rewrites_draft() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_fixture(dir.path());

    let args = EditArgs {
        file: file.clone(),
        ops: vec![
            EditOp::Add {
                role: Some("Scorer".to_string()),
            },
            EditOp::Assign {
                index: 2,
                official: OfficialId::from("off-3"),
            },
        ],
    };
    assert_eq!(run_edit(&args, None).unwrap(), 0);

    let draft = read_draft(&file).unwrap();
    assert_eq!(draft.positions.len(), 3);
    assert_eq!(draft.baseline.len(), 2);
    assert_eq!(draft.positions[2].assignee_name, "Marta Gil");

    let show = ShowArgs {
        file,
        eligible: Some(2),
    };
    assert_eq!(run_show(&show, Some(Scope::Regional)).unwrap(), 0);
}

#[test]
fn assign_refuses_official_seated_elsewhere() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_fixture(dir.path());
    let before = std::fs::read(&file).unwrap();

    let args = EditArgs {
        file: file.clone(),
        ops: vec![
            EditOp::Add { role: None },
            EditOp::Assign {
                index: 2,
                official: OfficialId::from("off-2"),
            },
        ],
    };
    assert_eq!(run_edit(&args, None).unwrap(), 1);
    assert_eq!(std::fs::read(&file).unwrap(), before);
}

#[test]
fn scope_mismatch_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_scoped_fixture(dir.path(), Scope::National);
    let before = std::fs::read(&file).unwrap();

    let args = EditArgs {
        file: file.clone(),
        ops: vec![EditOp::Add { role: None }],
    };
    let err = run_edit(&args, Some(Scope::Regional)).unwrap_err();
    assert!(err.to_string().contains("pulled under the national scope"));
    assert_eq!(std::fs::read(&file).unwrap(), before);

    let show = ShowArgs {
        file: file.clone(),
        eligible: None,
    };
    assert!(run_show(&show, Some(Scope::Regional)).is_err());
}

#[test]
fn show_rejects_out_of_range_eligible_index() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_fixture(dir.path());
    let show = ShowArgs {
        file,
        eligible: Some(9),
    };
    assert!(run_show(&show, None).is_err());
}

#[test]
fn rejected_edit_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_fixture(dir.path());
    let before = std::fs::read(&file).unwrap();

    let args = EditArgs {
        file: file.clone(),
        ops: vec![
            EditOp::ToggleErase { index: 1 },
            EditOp::ToggleErase { index: 0 },
        ],
    };
    assert_eq!(run_edit(&args, None).unwrap(), 1);
    assert_eq!(std::fs::read(&file).unwrap(), before);
}

#[test]
fn show_exits_nonzero_while_errors_block_submit() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_fixture(dir.path());

    let args = EditArgs {
        file: file.clone(),
        ops: vec![EditOp::Unassign { index: 1 }],
    };
    assert_eq!(run_edit(&args, None).unwrap(), 0);
    let show = ShowArgs {
        file,
        eligible: None,
    };
    assert_eq!(run_show(&show, None).unwrap(), 1);
}

#[test]
fn national_draft_ignores_regional_rows() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_scoped_fixture(dir.path(), Scope::National);

    let mut draft = read_draft(&file).unwrap();
    draft.positions[1].assignee_id = None;
    draft.positions[1].assignee_name.clear();
    write_draft(&file, &draft).unwrap();

    // The national operator is not responsible for the regional row.
    let show = ShowArgs {
        file,
        eligible: None,
    };
    assert_eq!(run_show(&show, None).unwrap(), 0);
}

// ── pull ─────────────────────────────────────────────────────────────

#[test]
fn pull_writes_fresh_draft() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let server = rt.block_on(MockServer::start());
    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/api/v1/events/cup-final/jury"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::to_value(loaded_positions()).unwrap()),
            )
            .mount(&server),
    );
    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/api/v1/events/cup-final/officials"))
            .and(query_param("scope", "national"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "off-9", "displayName": "Nadia Serra"}
            ])))
            .mount(&server),
    );

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("pulled.json");
    let args = PullArgs {
        event: "cup-final".to_string(),
        output: Some(file.clone()),
    };
    assert_eq!(run_pull(&args, Scope::National, &config_for(&server)).unwrap(), 0);

    let draft = read_draft(&file).unwrap();
    assert_eq!(draft.scope, Scope::National);
    assert_eq!(draft.positions, loaded_positions());
    assert_eq!(draft.baseline, draft.positions);
    assert_eq!(draft.officials, vec![Official::new("off-9", "Nadia Serra")]);
}

#[test]
fn pull_failure_writes_nothing() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let server = rt.block_on(MockServer::start());
    rt.block_on(
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("unknown event"))
            .mount(&server),
    );

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("pulled.json");
    let args = PullArgs {
        event: "nope".to_string(),
        output: Some(file.clone()),
    };
    assert_eq!(run_pull(&args, Scope::Regional, &config_for(&server)).unwrap(), 1);
    assert!(!file.exists());
}

// ── push ─────────────────────────────────────────────────────────────

#[test]
fn push_success_moves_baseline() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let server = rt.block_on(MockServer::start());
    rt.block_on(
        Mock::given(method("PUT"))
            .and(path("/api/v1/events/cup-final/jury"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server),
    );

    let dir = tempfile::tempdir().unwrap();
    let file = write_fixture(dir.path());
    let edit = EditArgs {
        file: file.clone(),
        ops: vec![EditOp::ToggleErase { index: 1 }],
    };
    assert_eq!(run_edit(&edit, None).unwrap(), 0);

    let args = PushArgs { file: file.clone() };
    assert_eq!(run_push(&args, Some(Scope::Regional), &config_for(&server)).unwrap(), 0);

    let draft = read_draft(&file).unwrap();
    assert_eq!(draft.baseline, draft.positions);
    assert!(draft.positions[1].is_erased());

    let requests = rt.block_on(server.received_requests()).unwrap();
    assert_eq!(requests.len(), 1);
    let body: Vec<Position> = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body.len(), 2);
    assert!(body[1].is_erased());
}

#[test]
fn push_failure_leaves_draft_untouched() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let server = rt.block_on(MockServer::start());
    rt.block_on(
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(409).set_body_string("official already seated"))
            .mount(&server),
    );

    let dir = tempfile::tempdir().unwrap();
    let file = write_fixture(dir.path());
    let edit = EditArgs {
        file: file.clone(),
        ops: vec![EditOp::Rename {
            index: 1,
            role: "Line Judge".to_string(),
        }],
    };
    assert_eq!(run_edit(&edit, None).unwrap(), 0);
    let before = std::fs::read(&file).unwrap();

    let args = PushArgs { file: file.clone() };
    assert_eq!(run_push(&args, None, &config_for(&server)).unwrap(), 1);
    assert_eq!(std::fs::read(&file).unwrap(), before);
}

#[test]
fn unchanged_draft_is_not_sent() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let server = rt.block_on(MockServer::start());

    let dir = tempfile::tempdir().unwrap();
    let file = write_fixture(dir.path());
    let args = PushArgs { file };
    assert_eq!(run_push(&args, None, &config_for(&server)).unwrap(), 1);
    assert!(rt.block_on(server.received_requests()).unwrap().is_empty());
}
