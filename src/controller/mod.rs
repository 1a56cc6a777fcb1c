//! Owns every piece of calculator state and runs user actions against the API.
//!
//! Methods take `&self`; state sits behind short-lived locks that are never
//! held across an `.await`, so a controller can be shared between tasks.

pub mod actions;
pub mod cart;

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::boost::{collect, derive_boost_percentage, BoostInputs, BoostRequest, BoostResult};
use crate::client::{
    canonical_skill, ApiClient, GeStatus, Hiscore, ReportRequest, Suggestions, UpdateStatus,
};
use crate::error::{ClientError, Result};

pub use actions::{parse_action, Action, Notice, ACTIONS};
pub use cart::{Cart, CartItem};

/// Lines kept from the most recent log fetch.
pub const LOG_BUFFER_CAPACITY: usize = 500;

/// Shortest gap between GE status polls.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// A completed calculation together with the exact request that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    pub seq: u64,
    pub request: BoostRequest,
    pub result: BoostResult,
    pub boost_pct: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CalcOutcome {
    Applied(Calculation),
    /// A newer calculation was issued while this one was in flight; its
    /// response was dropped and the stored result left untouched.
    Superseded { seq: u64, latest: u64 },
}

/// Username/skill pair reports are filed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub username: String,
    pub skill: String,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            username: String::new(),
            skill: "Overall".to_string(),
        }
    }
}

pub struct Controller {
    client: ApiClient,
    calc_seq: AtomicU64,
    last_calc: Mutex<Option<Calculation>>,
    selection: Mutex<Selection>,
    cart: Mutex<Cart>,
    log_buffer: Mutex<VecDeque<String>>,
    wiki_suggestions: Mutex<Vec<String>>,
    ge_suggestions: Mutex<Vec<String>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Controller {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            calc_seq: AtomicU64::new(0),
            last_calc: Mutex::new(None),
            selection: Mutex::new(Selection::default()),
            cart: Mutex::new(Cart::default()),
            log_buffer: Mutex::new(VecDeque::new()),
            wiki_suggestions: Mutex::new(Vec::new()),
            ge_suggestions: Mutex::new(Vec::new()),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Collect, submit and derive. The percentage is computed from the
    /// request that was sent, and the result is stored only if no newer
    /// calculation has been issued in the meantime.
    pub async fn calculate(&self, inputs: &BoostInputs) -> Result<CalcOutcome> {
        let seq = self.calc_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let request = collect(inputs);
        let result = self.client.calculate(&request).await?;
        let boost_pct = derive_boost_percentage(request.base_xp, request.add_xp, result.total);
        Ok(self.complete(Calculation {
            seq,
            request,
            result,
            boost_pct,
        }))
    }

    fn complete(&self, calculation: Calculation) -> CalcOutcome {
        let mut slot = lock(&self.last_calc);
        let latest = self.calc_seq.load(Ordering::SeqCst);
        if calculation.seq != latest {
            log::info!(
                "discarding calculation #{} superseded by #{latest}",
                calculation.seq
            );
            return CalcOutcome::Superseded {
                seq: calculation.seq,
                latest,
            };
        }
        log::info!(
            "calculation #{}: total={:.2} boost={:.2}%",
            calculation.seq,
            calculation.result.total,
            calculation.boost_pct
        );
        *slot = Some(calculation.clone());
        CalcOutcome::Applied(calculation)
    }

    pub fn last_calculation(&self) -> Option<Calculation> {
        lock(&self.last_calc).clone()
    }

    /// Looks up a hiscore row and remembers the username/skill for reports.
    pub async fn fetch_hiscore(&self, username: &str, skill: &str) -> Result<Hiscore> {
        let hiscore = self.client.hiscore(username, skill).await;
        if !matches!(hiscore, Err(ClientError::Validation(_))) {
            let mut selection = lock(&self.selection);
            selection.username = username.trim().to_string();
            selection.skill = canonical_skill(skill).unwrap_or("Overall").to_string();
        }
        hiscore
    }

    pub fn selection(&self) -> Selection {
        lock(&self.selection).clone()
    }

    /// Downloads a report of the last calculation's steps into `path`.
    pub async fn save_report(&self, path: &Path) -> Result<PathBuf> {
        let Some(calculation) = self.last_calculation() else {
            return Err(ClientError::validation(
                "Please calculate XP before saving a report.",
            ));
        };
        let selection = self.selection();
        let report = ReportRequest {
            username: selection.username,
            skill: selection.skill,
            steps: calculation.result.steps,
        };
        let text = self.client.download_report(&report).await?;
        tokio::fs::write(path, text).await?;
        log::info!("saved report to {}", path.display());
        Ok(path.to_path_buf())
    }

    pub async fn check_updates(&self) -> Result<UpdateStatus> {
        self.client.updates().await
    }

    pub async fn wiki_search(&self, term: &str) -> Result<Vec<String>> {
        let titles = self.client.wiki_search(term).await?;
        *lock(&self.wiki_suggestions) = titles.clone();
        Ok(titles)
    }

    /// Fetches the extract of the `choice`-th (1-based) title from the last
    /// wiki search.
    pub async fn wiki_pick(&self, choice: usize) -> Result<(String, String)> {
        let title = pick_from(&self.wiki_suggestions, choice)
            .ok_or_else(|| ClientError::validation("Pick a title from the last wiki search."))?;
        let page = self.client.wiki_extract(&title).await?;
        Ok((title, page.extract))
    }

    pub async fn ge_status(&self) -> Result<GeStatus> {
        self.client.ge_status().await
    }

    /// Polls the GE status every `interval` until the catalog is loaded or
    /// `attempts` polls have been made. Returns the last status seen.
    /// Intervals shorter than [MIN_POLL_INTERVAL] are raised to it.
    pub async fn wait_for_catalog(&self, interval: Duration, attempts: u32) -> Result<GeStatus> {
        let mut ticker = tokio::time::interval(interval.max(MIN_POLL_INTERVAL));
        let mut status = GeStatus {
            loaded: false,
            count: 0,
        };
        for attempt in 1..=attempts.max(1) {
            ticker.tick().await;
            status = self.client.ge_status().await?;
            if status.loaded {
                break;
            }
            log::debug!("GE catalog loading ({} items, poll {attempt})", status.count);
        }
        Ok(status)
    }

    /// On `StillLoading` the previous suggestions are kept.
    pub async fn ge_suggest(&self, term: &str) -> Result<Suggestions> {
        let suggestions = self.client.ge_suggest(term).await?;
        if let Suggestions::Ready(names) = &suggestions {
            *lock(&self.ge_suggestions) = names.clone();
        }
        Ok(suggestions)
    }

    /// Prices the `choice`-th (1-based) GE suggestion and adds it to the cart.
    pub async fn add_to_cart(&self, choice: usize, qty: u32) -> Result<CartItem> {
        let name = pick_from(&self.ge_suggestions, choice)
            .ok_or_else(|| ClientError::validation("Select an item first."))?;
        let detail = self.client.ge_detail(&name).await?;
        let item = lock(&self.cart).add(name, qty, detail.unit).clone();
        log::info!("cart: {} x{} @ {}", item.name, item.qty, item.unit);
        Ok(item)
    }

    pub fn cart(&self) -> Cart {
        lock(&self.cart).clone()
    }

    pub fn receipt(&self) -> Result<String> {
        let cart = lock(&self.cart);
        if cart.is_empty() {
            return Err(ClientError::validation("Cart is empty."));
        }
        Ok(cart.receipt())
    }

    /// Refreshes the log buffer from the server.
    pub async fn view_logs(&self) -> Result<Vec<String>> {
        let lines = self.client.logs().await?;
        let mut buffer = lock(&self.log_buffer);
        buffer.clear();
        let skip = lines.len().saturating_sub(LOG_BUFFER_CAPACITY);
        buffer.extend(lines.into_iter().skip(skip));
        Ok(buffer.iter().cloned().collect())
    }

    pub fn log_buffer(&self) -> Vec<String> {
        lock(&self.log_buffer).iter().cloned().collect()
    }

    pub async fn save_logs(&self, path: &Path) -> Result<PathBuf> {
        let text = self.client.download_logs().await?;
        tokio::fs::write(path, text).await?;
        Ok(path.to_path_buf())
    }

    /// Runs one dispatched action.
    pub async fn dispatch(&self, action: Action) -> Result<Notice> {
        let notice = match action {
            Action::Calculate(inputs) => match self.calculate(&inputs).await? {
                CalcOutcome::Applied(calculation) => Notice::Calculated(calculation),
                CalcOutcome::Superseded { seq, .. } => Notice::Superseded { seq },
            },
            Action::Hiscore { username, skill } => {
                let hiscore = self.fetch_hiscore(&username, &skill).await?;
                let selection = self.selection();
                Notice::Hiscore {
                    username: selection.username,
                    skill: selection.skill,
                    hiscore,
                }
            }
            Action::SaveReport { path } => Notice::ReportSaved(self.save_report(&path).await?),
            Action::CheckUpdates => Notice::Updates(self.check_updates().await?),
            Action::WikiSearch { term } => Notice::WikiResults(self.wiki_search(&term).await?),
            Action::WikiPick { choice } => {
                let (title, extract) = self.wiki_pick(choice).await?;
                Notice::WikiPage { title, extract }
            }
            Action::GeStatus => Notice::GeStatus(self.ge_status().await?),
            Action::GeWait { attempts } => Notice::GeStatus(
                self.wait_for_catalog(Duration::from_secs(2), attempts)
                    .await?,
            ),
            Action::GeSuggest { term } => match self.ge_suggest(&term).await? {
                Suggestions::Ready(names) => Notice::GeSuggestions(names),
                Suggestions::StillLoading => Notice::GeStillLoading,
            },
            Action::AddToCart { choice, qty } => {
                Notice::CartAdded(self.add_to_cart(choice, qty).await?)
            }
            Action::ShowReceipt => Notice::Receipt(self.receipt()?),
            Action::ViewLogs => Notice::Logs(self.view_logs().await?),
            Action::SaveLogs { path } => Notice::LogsSaved(self.save_logs(&path).await?),
            Action::Help => Notice::Help,
        };
        Ok(notice)
    }
}

/// 1-based selection from a stored suggestion list.
fn pick_from(list: &Mutex<Vec<String>>, choice: usize) -> Option<String> {
    let list = lock(list);
    choice
        .checked_sub(1)
        .and_then(|index| list.get(index))
        .cloned()
}
