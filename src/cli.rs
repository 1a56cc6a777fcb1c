use std::future::Future;
use std::io::Write as _;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::boost::{derive_boost_percentage, format_percentage};
use crate::client::ApiClient;
use crate::config::{bind_addr_from_env, ClientConfig};
use crate::controller::{actions, Controller, ACTIONS};
use crate::error::ClientError;
use crate::server;

const USAGE: &str = "usage: rs3calc <serve|shell|derive|ACTION> [args...] (try 'rs3calc help')";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Shell,
    Derive,
    /// One-shot run of an entry in [ACTIONS].
    Action,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("shell") => Some(Command::Shell),
        Some("derive") => Some(Command::Derive),
        Some(id) if ACTIONS.iter().any(|(name, _, _)| name.eq_ignore_ascii_case(id)) => {
            Some(Command::Action)
        }
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Serve) => block_on(handle_serve()),
        Some(Command::Shell) => block_on(handle_shell()),
        Some(Command::Derive) => handle_derive(args),
        Some(Command::Action) => block_on(handle_action(args)),
        None => {
            eprintln!("{USAGE}");
            2
        }
    }
}

fn block_on<F: Future<Output = i32>>(future: F) -> i32 {
    match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime.block_on(future),
        Err(err) => {
            eprintln!("failed to start runtime: {err}");
            1
        }
    }
}

async fn handle_serve() -> i32 {
    let bind_addr = bind_addr_from_env();
    match server::run_server(&bind_addr).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

fn build_controller() -> Result<Controller, ClientError> {
    let config = ClientConfig::from_env();
    log::debug!("using calculator API at {}", config.base_url);
    Ok(Controller::new(ApiClient::new(&config)?))
}

async fn handle_action(args: &[String]) -> i32 {
    let words: Vec<&str> = args.iter().skip(1).map(String::as_str).collect();
    let action = match actions::parse_words(&words) {
        Ok(action) => action,
        Err(err) => {
            eprintln!("{err}");
            return 2;
        }
    };
    let controller = match build_controller() {
        Ok(controller) => controller,
        Err(err) => {
            eprintln!("failed to build client: {err}");
            return 1;
        }
    };
    match controller.dispatch(action).await {
        Ok(notice) => {
            println!("{notice}");
            0
        }
        Err(err @ ClientError::Validation(_)) => {
            eprintln!("{err}");
            2
        }
        Err(err) => {
            eprintln!("error: {err}");
            1
        }
    }
}

/// Reads actions from stdin until EOF or `quit`. Failed actions are
/// reported and the shell keeps going.
async fn handle_shell() -> i32 {
    let controller = match build_controller() {
        Ok(controller) => controller,
        Err(err) => {
            eprintln!("failed to build client: {err}");
            return 1;
        }
    };
    println!("rs3calc shell against {} ('help' lists actions)", controller.client().base_url());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("rs3calc> ");
        let _ = std::io::stdout().flush();
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                eprintln!("failed to read input: {err}");
                return 1;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }
        let outcome = match actions::parse_action(line) {
            Ok(action) => controller.dispatch(action).await,
            Err(err) => Err(err),
        };
        match outcome {
            Ok(notice) => println!("{notice}"),
            Err(err) if err.is_still_loading() => println!("GE data still loading; please wait."),
            Err(err) => eprintln!("error: {err}"),
        }
    }
    0
}

fn handle_derive(args: &[String]) -> i32 {
    if args.len() < 5 {
        eprintln!("usage: rs3calc derive <base_xp> <add_xp> <total>");
        return 2;
    }
    let base_xp = parse_f64_arg(args.get(2), "base_xp");
    let add_xp = parse_f64_arg(args.get(3), "add_xp");
    let total = parse_f64_arg(args.get(4), "total");
    println!(
        "{}",
        format_percentage(derive_boost_percentage(base_xp, add_xp, total))
    );
    0
}

fn parse_f64_arg(raw: Option<&String>, name: &str) -> f64 {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid {name} '{value}', defaulting to 0");
            }
            0.0
        })
}
