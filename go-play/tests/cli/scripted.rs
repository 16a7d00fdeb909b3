use crate::common::TestGame;

#[tokio::test]
async fn scripted_game_reports_json() {
    let run = TestGame::new("scripted_json", 3)
        .players("scripted", "scripted")
        .arg("--json")
        .script("# two stones, then both pass\nB 1,1\nW 2,2\nB pass\nW pass\n")
        .run()
        .await;

    assert!(run.status.success(), "stderr: {}", run.stderr);
    let json = run.json();
    assert_eq!(json["finished"], true);
    assert_eq!(json["moves"], 4);
    assert_eq!(json["summary"], "W+6.5");
    assert_eq!(json["result"]["black"], 1.0);
    assert_eq!(json["result"]["white"], 1.0);
}

#[tokio::test]
async fn illegal_script_line_is_skipped() {
    let run = TestGame::new("scripted_skip", 3)
        .players("scripted", "scripted")
        .arg("--json")
        .script("B 1,1\nW 1,1\nW 3,3\nB pass\nW pass\n")
        .run()
        .await;

    assert!(run.status.success(), "stderr: {}", run.stderr);
    assert!(run.stderr.contains("rejected: point is occupied"));
    assert_eq!(run.json()["moves"], 4);
}

#[tokio::test]
async fn exhausted_script_passes() {
    let run = TestGame::new("scripted_exhausted", 3)
        .players("scripted", "scripted")
        .arg("--json")
        .script("B 2,2\n")
        .run()
        .await;

    assert!(run.status.success(), "stderr: {}", run.stderr);
    let json = run.json();
    assert_eq!(json["finished"], true);
    assert_eq!(json["moves"], 3);
}

#[tokio::test]
async fn random_players_stay_within_move_cap() {
    let run = TestGame::new("random_cap", 5)
        .players("random", "random")
        .arg("--max-moves")
        .arg("10")
        .arg("--json")
        .run()
        .await;

    assert!(run.status.success(), "stderr: {}", run.stderr);
    let json = run.json();
    assert_eq!(json["moves"], 10);
    assert_eq!(json["finished"], false);
    assert!(!run.stderr.contains("invariant violated"));
}
