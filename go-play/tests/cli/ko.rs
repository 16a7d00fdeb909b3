use crate::common::TestGame;

/// Ko shape in the top-left corner of a 5x5 board, in `row,col` terms:
/// ```
///      c1  c2  c3  c4
/// r1:   .   B   W   .
/// r2:   B   W   .   W
/// r3:   .   B   W   .
/// ```
/// Black then plays 2,3 and takes the white stone at 2,2.
const KO_SETUP: &str = "\
B 1,2
W 1,3
B 2,1
W 2,2
B 3,2
W 2,4
B 5,5
W 3,3
B 2,3
";

#[tokio::test]
async fn immediate_recapture_is_refused() {
    let script = format!("{KO_SETUP}W 2,2\nW 5,1\nB pass\nW pass\n");
    let run = TestGame::new("ko_refused", 5)
        .players("scripted", "scripted")
        .arg("--json")
        .script(&script)
        .run()
        .await;

    assert!(run.status.success(), "stderr: {}", run.stderr);
    assert!(run.stderr.contains("rejected: ko violation"));
    let json = run.json();
    assert_eq!(json["captures"]["black"], 1);
    assert_eq!(json["moves"], 12);
}

#[tokio::test]
async fn recapture_allowed_after_exchange_elsewhere() {
    let script = format!("{KO_SETUP}W 5,1\nB 4,5\nW 2,2\nB pass\nW pass\n");
    let run = TestGame::new("ko_lifted", 5)
        .players("scripted", "scripted")
        .arg("--json")
        .script(&script)
        .run()
        .await;

    assert!(run.status.success(), "stderr: {}", run.stderr);
    assert!(!run.stderr.contains("rejected"));
    let json = run.json();
    assert_eq!(json["captures"]["black"], 1);
    assert_eq!(json["captures"]["white"], 1);
}
