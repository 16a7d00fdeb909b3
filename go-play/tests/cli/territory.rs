use crate::common::TestGame;

#[tokio::test]
async fn lone_stone_owns_the_board() {
    let run = TestGame::new("territory_text", 3)
        .players("scripted", "scripted")
        .script("B 2,2\nW pass\nB pass\n")
        .run()
        .await;

    assert!(run.status.success(), "stderr: {}", run.stderr);
    assert!(run.stdout.contains(". . .\n. X .\n. . .\n"));
    assert!(run.stdout.contains("Black: 1 stones + 8 territory = 9"));
    assert!(run.stdout.contains("White: 0 stones + 0 territory + 6.5 komi = 6.5"));
    assert!(!run.stdout.contains("Dame:"));
    assert!(run.stdout.contains("Result: B+2.5"));
}

#[tokio::test]
async fn komi_flag_changes_the_result() {
    let run = TestGame::new("territory_komi", 3)
        .players("scripted", "scripted")
        .arg("--komi")
        .arg("9")
        .arg("--json")
        .script("B 2,2\nW pass\nB pass\n")
        .run()
        .await;

    assert!(run.status.success(), "stderr: {}", run.stderr);
    assert_eq!(run.json()["summary"], "Draw");
}

#[tokio::test]
async fn shared_region_is_dame() {
    let run = TestGame::new("territory_dame", 3)
        .players("scripted", "scripted")
        .arg("--komi")
        .arg("0")
        .arg("--json")
        .script("B 1,1\nW 3,3\nB pass\nW pass\n")
        .run()
        .await;

    assert!(run.status.success(), "stderr: {}", run.stderr);
    assert_eq!(run.json()["summary"], "Draw");
}

#[tokio::test]
async fn text_report_counts_dame() {
    let run = TestGame::new("territory_dame_text", 3)
        .players("scripted", "scripted")
        .script("B 1,1\nW 3,3\nB pass\nW pass\n")
        .run()
        .await;

    assert!(run.status.success(), "stderr: {}", run.stderr);
    assert!(run.stdout.contains("Dame: 7"));
}
