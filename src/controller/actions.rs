//! Action identifiers, their argument parsers, and the notices actions
//! produce for whatever front end is displaying them.

use std::fmt;
use std::path::PathBuf;

use crate::boost::{format_percentage, BoostInputs};
use crate::client::{canonical_skill, GeStatus, Hiscore, UpdateStatus};
use crate::error::{ClientError, Result};

use super::{CartItem, Calculation};

pub const DEFAULT_REPORT_PATH: &str = "rs3_xp_report.txt";
pub const DEFAULT_LOGS_PATH: &str = "rs3calc_logs.txt";
pub const DEFAULT_GE_WAIT_ATTEMPTS: u32 = 30;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Calculate(BoostInputs),
    Hiscore { username: String, skill: String },
    SaveReport { path: PathBuf },
    CheckUpdates,
    WikiSearch { term: String },
    WikiPick { choice: usize },
    GeStatus,
    GeWait { attempts: u32 },
    GeSuggest { term: String },
    AddToCart { choice: usize, qty: u32 },
    ShowReceipt,
    ViewLogs,
    SaveLogs { path: PathBuf },
    Help,
}

/// Builds an [Action] from the words following its identifier.
pub type ActionParser = fn(&[&str]) -> Result<Action>;

/// Identifier, usage line, parser.
pub const ACTIONS: &[(&str, &str, ActionParser)] = &[
    (
        "calc",
        "calc <base_xp> [add=<pct>] [clan=<pct>] [toggle ...]",
        parse_calc,
    ),
    ("hiscore", "hiscore <username> [skill]", parse_hiscore),
    ("report", "report [path]", parse_report),
    ("updates", "updates", parse_updates),
    ("wiki", "wiki <term>", parse_wiki),
    ("wiki-pick", "wiki-pick <n>", parse_wiki_pick),
    ("ge-status", "ge-status", parse_ge_status),
    ("ge-wait", "ge-wait [attempts]", parse_ge_wait),
    ("ge-suggest", "ge-suggest <term>", parse_ge_suggest),
    ("cart-add", "cart-add <n> [qty]", parse_cart_add),
    ("receipt", "receipt", parse_receipt),
    ("logs", "logs", parse_logs),
    ("logs-save", "logs-save [path]", parse_logs_save),
    ("help", "help", parse_help),
];

/// Looks up the first word of `line` in [ACTIONS] and parses the rest.
pub fn parse_action(line: &str) -> Result<Action> {
    let words: Vec<&str> = line.split_whitespace().collect();
    parse_words(&words)
}

pub fn parse_words(words: &[&str]) -> Result<Action> {
    let Some((id, rest)) = words.split_first() else {
        return Err(ClientError::validation("Enter an action; try 'help'."));
    };
    ACTIONS
        .iter()
        .find(|(name, _, _)| name.eq_ignore_ascii_case(id))
        .ok_or_else(|| ClientError::validation(format!("Unknown action '{id}'; try 'help'.")))
        .and_then(|(_, _, parser)| parser(rest))
}

fn parse_updates(_: &[&str]) -> Result<Action> {
    Ok(Action::CheckUpdates)
}

fn parse_ge_status(_: &[&str]) -> Result<Action> {
    Ok(Action::GeStatus)
}

fn parse_receipt(_: &[&str]) -> Result<Action> {
    Ok(Action::ShowReceipt)
}

fn parse_logs(_: &[&str]) -> Result<Action> {
    Ok(Action::ViewLogs)
}

fn parse_help(_: &[&str]) -> Result<Action> {
    Ok(Action::Help)
}

fn parse_calc(args: &[&str]) -> Result<Action> {
    let mut inputs = BoostInputs::default();
    let mut rest = args.iter();
    if let Some(base) = rest.next() {
        inputs.base_xp = Some(base.to_string());
    }
    for arg in rest {
        if let Some(pct) = arg.strip_prefix("add=") {
            inputs.add_pct = Some(pct.to_string());
        } else if let Some(pct) = arg.strip_prefix("clan=") {
            inputs.clan_avatar = Some(pct.to_string());
        } else {
            inputs.toggles.push(arg.to_string());
        }
    }
    Ok(Action::Calculate(inputs))
}

/// A trailing known skill is split off; the remaining words form the
/// username, which may contain spaces.
fn parse_hiscore(args: &[&str]) -> Result<Action> {
    let (username_words, skill) = match args.split_last() {
        Some((last, head)) if !head.is_empty() && canonical_skill(last).is_some() => {
            (head, last.to_string())
        }
        _ => (args, "Overall".to_string()),
    };
    let username = username_words.join(" ");
    if username.trim().is_empty() {
        return Err(ClientError::validation("Please enter a username."));
    }
    Ok(Action::Hiscore { username, skill })
}

fn parse_report(args: &[&str]) -> Result<Action> {
    Ok(Action::SaveReport {
        path: PathBuf::from(args.first().copied().unwrap_or(DEFAULT_REPORT_PATH)),
    })
}

fn parse_logs_save(args: &[&str]) -> Result<Action> {
    Ok(Action::SaveLogs {
        path: PathBuf::from(args.first().copied().unwrap_or(DEFAULT_LOGS_PATH)),
    })
}

fn parse_wiki(args: &[&str]) -> Result<Action> {
    Ok(Action::WikiSearch {
        term: args.join(" "),
    })
}

fn parse_wiki_pick(args: &[&str]) -> Result<Action> {
    Ok(Action::WikiPick {
        choice: parse_choice(args.first().copied())?,
    })
}

fn parse_ge_wait(args: &[&str]) -> Result<Action> {
    let attempts = args
        .first()
        .and_then(|raw| raw.parse::<u32>().ok())
        .unwrap_or(DEFAULT_GE_WAIT_ATTEMPTS);
    Ok(Action::GeWait { attempts })
}

fn parse_ge_suggest(args: &[&str]) -> Result<Action> {
    Ok(Action::GeSuggest {
        term: args.join(" "),
    })
}

/// Unparseable or zero quantities become 1.
fn parse_cart_add(args: &[&str]) -> Result<Action> {
    let choice = parse_choice(args.first().copied())?;
    let qty = args
        .get(1)
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|qty| *qty > 0)
        .unwrap_or(1);
    Ok(Action::AddToCart { choice, qty })
}

fn parse_choice(raw: Option<&str>) -> Result<usize> {
    raw.and_then(|value| value.parse::<usize>().ok())
        .filter(|choice| *choice > 0)
        .ok_or_else(|| ClientError::validation("Choose an entry by its number (1, 2, ...)."))
}

/// What an action produced, ready to be shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Calculated(Calculation),
    Superseded { seq: u64 },
    Hiscore {
        username: String,
        skill: String,
        hiscore: Hiscore,
    },
    ReportSaved(PathBuf),
    Updates(UpdateStatus),
    WikiResults(Vec<String>),
    WikiPage { title: String, extract: String },
    GeStatus(GeStatus),
    GeSuggestions(Vec<String>),
    GeStillLoading,
    CartAdded(CartItem),
    Receipt(String),
    Logs(Vec<String>),
    LogsSaved(PathBuf),
    Help,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Calculated(calc) => {
                writeln!(f, "Total XP: {:.2}", calc.result.total)?;
                write!(f, "Boost: {}", format_percentage(calc.boost_pct))?;
                for step in &calc.result.steps {
                    write!(f, "\n  {step}")?;
                }
                Ok(())
            }
            Notice::Superseded { seq } => {
                write!(f, "Calculation #{seq} was superseded by a newer one.")
            }
            Notice::Hiscore {
                username,
                skill,
                hiscore,
            } => write!(
                f,
                "{username} ({skill}): rank {} level {} xp {}",
                hiscore.rank, hiscore.level, hiscore.xp
            ),
            Notice::ReportSaved(path) => write!(f, "Report saved to {}", path.display()),
            Notice::Updates(status) if status.update_available => {
                write!(f, "New version available: {}", status.latest)
            }
            Notice::Updates(status) => write!(f, "You are up to date ({})", status.current),
            Notice::WikiResults(titles) if titles.is_empty() => write!(f, "No pages found."),
            Notice::WikiResults(titles) => write_numbered(f, titles),
            Notice::WikiPage { title, extract } => write!(f, "{title}\n\n{extract}"),
            Notice::GeStatus(status) if status.loaded => {
                write!(f, "GE catalog loaded ({} items)", status.count)
            }
            Notice::GeStatus(_) => write!(f, "GE catalog loading..."),
            Notice::GeSuggestions(names) if names.is_empty() => write!(f, "No matching items."),
            Notice::GeSuggestions(names) => write_numbered(f, names),
            Notice::GeStillLoading => write!(f, "GE data still loading; please wait."),
            Notice::CartAdded(item) => write!(
                f,
                "Added {} x{} @ {} = {}",
                item.name, item.qty, item.unit, item.total
            ),
            Notice::Receipt(text) => f.write_str(text),
            Notice::Logs(lines) => f.write_str(&lines.join("\n")),
            Notice::LogsSaved(path) => write!(f, "Logs saved to {}", path.display()),
            Notice::Help => {
                f.write_str("actions:")?;
                for (_, usage, _) in ACTIONS {
                    write!(f, "\n  {usage}")?;
                }
                Ok(())
            }
        }
    }
}

fn write_numbered(f: &mut fmt::Formatter<'_>, entries: &[String]) -> fmt::Result {
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            f.write_str("\n")?;
        }
        write!(f, "{}. {entry}", i + 1)?;
    }
    Ok(())
}
