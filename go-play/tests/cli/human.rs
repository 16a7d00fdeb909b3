use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::time::{sleep, timeout};

use crate::common::TestGame;

#[tokio::test]
async fn human_moves_from_stdin() {
    let run = TestGame::new("human_stdin", 3)
        .players("human", "human")
        .stdin("2,2\nnonsense\n4,4\n1,1\npass\npass\n")
        .run()
        .await;

    assert!(run.status.success(), "stderr: {}", run.stderr);
    assert!(run.stdout.contains("Black's move (row,col or pass):"));
    assert!(run.stdout.contains("invalid format"));
    assert!(run.stdout.contains("both numbers must be between 1 and 3"));
    assert!(run.stdout.contains("O . .\n. X .\n. . .\n"));
}

#[tokio::test]
async fn illegal_human_move_is_reprompted() {
    let run = TestGame::new("human_illegal", 3)
        .players("human", "scripted")
        .script("W 1,1\n")
        .stdin("2,2\n1,1\n3,3\npass\n")
        .run()
        .await;

    assert!(run.status.success(), "stderr: {}", run.stderr);
    assert!(run.stdout.contains("Illegal move: point is occupied"));
    assert!(run.stdout.contains("O . .\n. X .\n. . X\n"));
}

#[tokio::test]
async fn end_of_input_cancels() {
    let run = TestGame::new("human_eof", 3)
        .players("human", "human")
        .stdin("2,2\n")
        .run()
        .await;

    assert!(!run.status.success());
    assert!(run.stderr.contains("error: game cancelled"));
}

#[tokio::test]
async fn ctrl_c_while_waiting_exits() {
    let mut child = TestGame::new("human_sigint", 3)
        .players("human", "random")
        .spawn();
    let stdin = child.stdin.take().unwrap();
    let mut stdout = child.stdout.take().unwrap();

    let mut seen = Vec::new();
    let mut buf = [0u8; 256];
    while !String::from_utf8_lossy(&seen).contains("move (row,col or pass):") {
        let n = timeout(Duration::from_secs(10), stdout.read(&mut buf))
            .await
            .expect("prompt within 10s")
            .unwrap();
        assert!(n > 0, "stdout closed before the prompt");
        seen.extend_from_slice(&buf[..n]);
    }
    // Let the session start listening for the signal.
    sleep(Duration::from_millis(300)).await;

    let pid = child.id().unwrap().to_string();
    let sent = Command::new("kill").args(["-INT", &pid]).status().await.unwrap();
    assert!(sent.success());

    // Stdin is still open here, so only the signal can end the game.
    let output = timeout(Duration::from_secs(5), child.wait_with_output())
        .await
        .expect("exit within 5s of ctrl-c")
        .unwrap();
    drop(stdin);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("error: game cancelled"));
}
