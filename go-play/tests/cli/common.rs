#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};

use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};

/// Finished run of the `go-play` binary.
pub struct Run {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl Run {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}):\n{}", self.stdout))
    }
}

/// Builder for one invocation of the binary.
pub struct TestGame {
    name: String,
    args: Vec<String>,
    script: Option<String>,
    stdin: String,
}

impl TestGame {
    /// `name` keeps the script files of parallel tests apart.
    pub fn new(name: &str, size: u8) -> Self {
        TestGame {
            name: name.to_string(),
            args: vec!["--size".to_string(), size.to_string()],
            script: None,
            stdin: String::new(),
        }
    }

    pub fn arg(mut self, arg: &str) -> Self {
        self.args.push(arg.to_string());
        self
    }

    pub fn players(self, black: &str, white: &str) -> Self {
        self.arg("--black").arg(black).arg("--white").arg(white)
    }

    pub fn script(mut self, text: &str) -> Self {
        self.script = Some(text.to_string());
        self
    }

    pub fn stdin(mut self, text: &str) -> Self {
        self.stdin = text.to_string();
        self
    }

    /// Start the binary and hand back the child with all three pipes open.
    pub fn spawn(self) -> Child {
        assert!(self.script.is_none(), "spawned games take their moves from stdin");
        command(&self.args).kill_on_drop(true).spawn().unwrap()
    }

    pub async fn run(self) -> Run {
        let mut args = self.args;
        let script_path = self.script.as_ref().map(|text| {
            let path = script_path(&self.name);
            std::fs::write(&path, text).unwrap();
            args.push("--script".to_string());
            args.push(path.display().to_string());
            path
        });

        let mut child = command(&args).spawn().unwrap();

        let mut stdin = child.stdin.take().unwrap();
        stdin.write_all(self.stdin.as_bytes()).await.unwrap();
        drop(stdin);

        let output = child.wait_with_output().await.unwrap();
        if let Some(path) = script_path {
            let _ = std::fs::remove_file(path);
        }

        Run {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

fn command(args: &[String]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_go-play"));
    cmd.args(args)
        .env_remove("GO_BOARD_SIZE")
        .env_remove("GO_KOMI")
        .env("RUST_LOG", "go_play=info")
        .env("NO_COLOR", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    cmd
}

fn script_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("go-play-{}-{name}.txt", std::process::id()))
}
