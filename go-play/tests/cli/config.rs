use crate::common::TestGame;

#[tokio::test]
async fn scripted_player_without_script_fails() {
    let run = TestGame::new("config_no_script", 5)
        .players("scripted", "human")
        .run()
        .await;

    assert!(!run.status.success());
    assert!(run.stderr.contains("a scripted player needs --script"));
}

#[tokio::test]
async fn oversized_board_is_rejected() {
    let run = TestGame::new("config_size", 30).run().await;
    assert_eq!(run.status.code(), Some(2));
    assert!(run.stderr.contains("--size"));
}

#[tokio::test]
async fn bad_script_line_is_reported() {
    let run = TestGame::new("config_bad_script", 5)
        .players("scripted", "scripted")
        .script("B 1,1\nB 1-1\n")
        .run()
        .await;

    assert!(!run.status.success());
    assert!(run.stderr.contains("script line 2"));
}
