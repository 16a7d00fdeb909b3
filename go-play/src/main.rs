use std::process::ExitCode;

use clap::Parser;
use go_play::{Config, Outcome, PlayError, Session};
use go_rules::Color;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "go_play=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    ExitCode::from(exit_status(run(&config).await))
}

async fn run(config: &Config) -> Result<(), PlayError> {
    config.validate()?;
    let mut session = Session::from_config(config).await?;
    let outcome = session.run().await?;

    if config.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("\n{}", session.game().board());
        print_outcome(&outcome);
    }
    Ok(())
}

/// Report a failed run on stderr and pick the process status.
fn exit_status(result: Result<(), PlayError>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("error: {e}");
            1
        }
    }
}

fn print_outcome(outcome: &Outcome) {
    let r = &outcome.result;
    let t = &outcome.territory;
    if !outcome.finished {
        println!("Move limit reached after {} moves.", outcome.moves);
    }
    println!(
        "Black: {} stones + {} territory = {} (captured {})",
        t.stones(Color::Black),
        t.territory(Color::Black),
        r.black_total(),
        outcome.captures.black
    );
    println!(
        "White: {} stones + {} territory + {} komi = {} (captured {})",
        t.stones(Color::White),
        t.territory(Color::White),
        r.komi,
        r.white_total(),
        outcome.captures.white
    );
    let dame = t.dame_points();
    if !dame.is_empty() {
        println!("Dame: {}", dame.len());
    }
    println!("Result: {}", outcome.summary);
}
