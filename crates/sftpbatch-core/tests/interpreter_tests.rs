mod common;

use common::{connect, credentials, Call, MockGateway};
use sftpbatch_core::{CredentialStore, Error, Interpreter, Program, SessionState};

const CREDS: &str = "host1;u;p;\nhost2;v;q;\n";

fn interpreter(gateway: MockGateway, store: CredentialStore) -> Interpreter<MockGateway> {
    Interpreter::new(gateway, store)
}

#[tokio::test]
async fn open_download_close_runs_in_order() {
    let (_f, store) = credentials(CREDS);
    let mut interp = interpreter(MockGateway::default(), store);

    let program = Program::parse("OPEN;host1;22\nDOWN;/r/a.txt;/l/a.txt\nCLOSE\n");
    let report = interp.run(&program).await.unwrap();

    assert_eq!(report.executed, 3);
    assert_eq!(interp.gateway().calls, vec![
        connect("host1", 22, "u", "p"),
        Call::Stat(1, "/r/a.txt".into()),
        Call::Get(1, "/r/a.txt".into(), "/l/a.txt".into()),
        Call::Close(1),
    ]);
    assert!(matches!(interp.state(), SessionState::NoSession));
}

#[tokio::test]
async fn balanced_open_close_pairs_end_without_session() {
    let (_f, store) = credentials(CREDS);
    let mut interp = interpreter(MockGateway::default(), store);

    let program = Program::parse(
        "OPEN;host1;22\nUP;/l/x;/r/x\nCLOSE\nOPEN;host2;2222\nDIR;/in\nCLOSE\n",
    );
    interp.run(&program).await.unwrap();

    assert!(!interp.state().is_open());
    assert_eq!(interp.gateway().calls, vec![
        connect("host1", 22, "u", "p"),
        Call::Put(1, "/l/x".into(), "/r/x".into()),
        Call::Close(1),
        connect("host2", 2222, "v", "q"),
        Call::List(2, "/in".into()),
        Call::Close(2),
    ]);
}

#[tokio::test]
async fn unmatched_server_fails_before_connecting() {
    let (_f, store) = credentials(CREDS);
    let mut interp = interpreter(MockGateway::default(), store);

    let err = interp.run(&Program::parse("OPEN;nowhere;22\nCLOSE\n")).await.unwrap_err();

    assert_eq!(err.line, 1);
    assert!(matches!(err.error, Error::CredentialsInvalid { ref server, found: 0 } if server == "nowhere"));
    assert!(interp.gateway().calls.is_empty());
}

#[tokio::test]
async fn dir_without_open_is_no_active_session() {
    let (_f, store) = credentials(CREDS);
    let mut interp = interpreter(MockGateway::default(), store);

    let err = interp.run(&Program::parse("DIR;/remote/path\n")).await.unwrap_err();

    assert_eq!(err.line, 1);
    assert_eq!(err.command, "DIR");
    assert!(matches!(err.error, Error::NoActiveSession { .. }));
    assert!(interp.gateway().calls.is_empty());
}

#[tokio::test]
async fn transfers_and_close_without_open_fail() {
    for text in ["CLOSE", "DOWN;/r/a;/l/a", "UP;/l/a;/r/a"] {
        let (_f, store) = credentials(CREDS);
        let mut interp = interpreter(MockGateway::default(), store);

        let err = interp.run(&Program::parse(text)).await.unwrap_err();
        assert!(matches!(err.error, Error::NoActiveSession { .. }), "{}", text);
        assert!(!interp.state().is_open());
    }
}

#[tokio::test]
async fn close_after_close_fails() {
    let (_f, store) = credentials(CREDS);
    let mut interp = interpreter(MockGateway::default(), store);

    let err = interp.run(&Program::parse("OPEN;host1;22\nCLOSE\nCLOSE\n")).await.unwrap_err();

    assert_eq!(err.line, 3);
    assert_eq!(err.completed, 2);
    assert_eq!(interp.gateway().calls.iter().filter(|c| matches!(c, Call::Close(_))).count(), 1);
}

#[tokio::test]
async fn missing_close_leaves_session_open() {
    let (_f, store) = credentials(CREDS);
    let mut interp = interpreter(MockGateway::default(), store);

    let report = interp.run(&Program::parse("OPEN;host1;22\nDIR;/\n")).await.unwrap();

    assert_eq!(report.executed, 2);
    assert!(matches!(interp.state(), SessionState::SessionOpen(1)));
    assert!(!interp.gateway().calls.iter().any(|c| matches!(c, Call::Close(_))));
}

#[tokio::test]
async fn reopen_parks_previous_session_unclosed() {
    let (_f, store) = credentials(CREDS);
    let mut interp = interpreter(MockGateway::default(), store);

    let program = Program::parse("OPEN;host1;22\nOPEN;host2;22\nDIR;/\nCLOSE\n");
    interp.run(&program).await.unwrap();

    assert_eq!(interp.orphaned(), 1);
    assert_eq!(interp.gateway().calls, vec![
        connect("host1", 22, "u", "p"),
        connect("host2", 22, "v", "q"),
        Call::List(2, "/".into()),
        Call::Close(2),
    ]);
}

#[tokio::test]
async fn failed_reopen_keeps_current_session() {
    let (_f, store) = credentials(CREDS);
    let gateway = MockGateway { refuse_host: Some("host2".into()), ..Default::default() };
    let mut interp = interpreter(gateway, store);

    let err = interp.run(&Program::parse("OPEN;host1;22\nOPEN;host2;22\nCLOSE\n")).await.unwrap_err();

    assert!(matches!(err.error, Error::Connection(_)));
    assert_eq!(err.line, 2);
    assert!(matches!(interp.state(), SessionState::SessionOpen(1)));
    assert_eq!(interp.orphaned(), 0);
}

#[tokio::test]
async fn blank_and_unknown_lines_are_skipped() {
    let (_f, store) = credentials(CREDS);
    let mut interp = interpreter(MockGateway::default(), store);

    let program = Program::parse("\nOPEN;host1;22\n# nightly upload\nMKDIR;/x\n \nCLOSE\n");
    let report = interp.run(&program).await.unwrap();

    assert_eq!(report.executed, 2);
    assert_eq!(report.skipped, 4);
}

#[tokio::test]
async fn malformed_line_aborts_after_earlier_lines_ran() {
    let (_f, store) = credentials(CREDS);
    let mut interp = interpreter(MockGateway::default(), store);

    let program = Program::parse("OPEN;host1;22\nDIR;/a\nDOWN;/only-source\nCLOSE\n");
    let err = interp.run(&program).await.unwrap_err();

    assert_eq!(err.line, 3);
    assert_eq!(err.completed, 2);
    assert!(matches!(
        err.error,
        Error::MalformedDirective { ref keyword, expected: 3, found: 2 } if keyword == "DOWN"
    ));
    assert_eq!(interp.gateway().calls.len(), 2);
    assert!(interp.state().is_open());
}

#[tokio::test]
async fn missing_remote_file_skips_transfer_and_aborts() {
    let (_f, store) = credentials(CREDS);
    let gateway = MockGateway { missing: vec!["/r/gone".into()], ..Default::default() };
    let mut interp = interpreter(gateway, store);

    let err = interp.run(&Program::parse("OPEN;host1;22\nDOWN;/r/gone;/l/gone\nCLOSE\n"))
        .await
        .unwrap_err();

    assert!(matches!(err.error, Error::RemotePath { .. }));
    assert!(!interp.gateway().calls.iter().any(|c| matches!(c, Call::Get(..))));
    // no cleanup on error
    assert!(interp.state().is_open());
}

#[tokio::test]
async fn transfer_error_stops_remaining_directives() {
    let (_f, store) = credentials(CREDS);
    let gateway = MockGateway { broken_transfer: Some("/l/big".into()), ..Default::default() };
    let mut interp = interpreter(gateway, store);

    let program = Program::parse("OPEN;host1;22\nUP;/l/big;/r/big\nUP;/l/small;/r/small\nCLOSE\n");
    let err = interp.run(&program).await.unwrap_err();

    assert!(matches!(err.error, Error::Transfer(_)));
    assert_eq!(err.to_string().split(':').next(), Some("line 2 (UP)"));
    assert_eq!(interp.gateway().calls.last(), Some(&Call::Put(1, "/l/big".into(), "/r/big".into())));
}

#[tokio::test]
async fn listing_is_reported() {
    let (_f, store) = credentials(CREDS);
    let gateway = MockGateway { listing: vec!["a.txt".into(), "b.txt".into()], ..Default::default() };
    let mut interp = interpreter(gateway, store);

    let report = interp.run(&Program::parse("open;host1;22\ndir;/out\nclose\n")).await.unwrap();

    assert_eq!(report.listings, vec![("/out".to_string(), vec!["a.txt".to_string(), "b.txt".to_string()])]);
}

#[tokio::test]
async fn substring_server_uses_stored_credentials() {
    let (_f, store) = credentials("example.com;alice;secret;\n");
    let mut interp = interpreter(MockGateway::default(), store);

    interp.run(&Program::parse("OPEN;ple.com;22\n")).await.unwrap();

    assert_eq!(interp.gateway().calls, vec![connect("ple.com", 22, "alice", "secret")]);
}

#[tokio::test]
async fn missing_credentials_path_is_a_setup_error() {
    let mut interp = interpreter(MockGateway::default(), CredentialStore::new(None));

    let err = interp.run(&Program::parse("OPEN;host1;22\n")).await.unwrap_err();

    assert!(matches!(err.error, Error::CredentialsFileMissing));
    assert!(err.error.is_setup_error());
}

#[tokio::test]
async fn bad_port_is_a_connection_error() {
    let (_f, store) = credentials(CREDS);
    let mut interp = interpreter(MockGateway::default(), store);

    let err = interp.run(&Program::parse("OPEN;host1;ssh\n")).await.unwrap_err();

    assert!(matches!(err.error, Error::Connection(_)));
    assert!(interp.gateway().calls.is_empty());
}
