use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use client_logging::client_info;
use linkpress_app::config::Config;
use linkpress_app::logging::{self, LogDestination};
use linkpress_app::persistence::FileHistoryBackend;
use linkpress_app::term::{self, ManualChallengeProvider};
use linkpress_app::{challenge_callbacks, EffectRunner, Shell};
use linkpress_core::{CopyTarget, HistoryStore, Msg};
use linkpress_engine::{
    ChallengeConfig, ChallengeHost, EngineHandle, ShortenSettings, SystemClipboard,
};

fn main() -> anyhow::Result<()> {
    logging::initialize(LogDestination::File);
    let config = Config::from_env()?;
    client_info!("Starting linkpress against {}", config.api_url);

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let provider = ManualChallengeProvider::new();
    let challenge = ChallengeHost::new(
        Box::new(provider.clone()),
        ChallengeConfig {
            site_key: config.site_key.clone(),
            theme: config.theme,
        },
        challenge_callbacks(msg_tx),
    );
    let engine = EngineHandle::new(ShortenSettings {
        base_url: config.api_url.clone(),
        ..ShortenSettings::default()
    });
    let history = HistoryStore::open(Box::new(FileHistoryBackend::new(&config.state_dir)));
    let runner = EffectRunner::new(engine, Box::new(SystemClipboard::new()), challenge);
    let mut shell = Shell::new(history, runner, msg_rx);

    println!("linkpress — paste a long URL, get a short one.");
    println!("service: {}", config.api_url);
    print_help();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        shell.poll();
        if shell.consume_dirty() {
            term::render(&shell.view());
        }
        print!("> ");
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "help" => print_help(),
            "token" => {
                if rest.is_empty() {
                    println!("usage: token <value>");
                } else if !provider.submit_token(rest) {
                    println!("no challenge widget is waiting for a token");
                }
            }
            "shorten" => {
                if rest.is_empty() {
                    println!("usage: shorten <url>");
                    continue;
                }
                shell.handle(Msg::InputChanged(rest.to_string()));
                shell.handle(Msg::SubmitRequested);
                wait_for_idle(&mut shell);
            }
            "copy" => {
                let target = match rest {
                    "" => Some(CopyTarget::CurrentResult),
                    index => history_target(&shell, index),
                };
                if let Some(target) = target {
                    shell.handle(Msg::CopyRequested { target });
                }
            }
            "delete" => match history_target(&shell, rest) {
                Some(CopyTarget::HistoryEntry { id }) => shell.handle(Msg::LinkDeleted { id }),
                _ => println!("usage: delete <history number>"),
            },
            "history" => term::render_history(&shell.view()),
            "clear" => shell.handle(Msg::HistoryCleared),
            "quit" | "exit" => break,
            other => println!("unknown command {other:?}; try `help`"),
        }
    }

    Ok(())
}

fn print_help() {
    println!("commands:");
    println!("  token <value>      feed the verification token");
    println!("  shorten <url>      shorten a URL");
    println!("  copy [n]           copy the result (or history entry n)");
    println!("  delete <n>         delete history entry n");
    println!("  history            list created links");
    println!("  clear              clear the history");
    println!("  quit               leave");
}

/// Resolves a 1-based history index as printed by `history`.
fn history_target(shell: &Shell, index: &str) -> Option<CopyTarget> {
    let n: usize = match index.parse() {
        Ok(n) if n >= 1 => n,
        _ => {
            println!("expected a history number, got {index:?}");
            return None;
        }
    };
    match shell.view().history.get(n - 1) {
        Some(row) => Some(CopyTarget::HistoryEntry { id: row.id.clone() }),
        None => {
            println!("history has no entry {n}");
            None
        }
    }
}

/// Pumps the shell until in-flight submissions resolve (or a deadline
/// passes; the engine may still resolve later and be picked up by the
/// next poll).
fn wait_for_idle(shell: &mut Shell) {
    let deadline = Instant::now() + Duration::from_secs(45);
    while shell.view().submitting && Instant::now() < deadline {
        shell.poll();
        std::thread::sleep(Duration::from_millis(50));
    }
}
