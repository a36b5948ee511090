//! Line-based front end: amount edits, currency changes and swaps each
//! re-run the conversion against the current snapshot.

use super::{display, rates, ui};
use crate::core::config::AppConfig;
use crate::core::currency::normalize_code;
use crate::core::{
    ConversionError, ConversionRequest, ConversionResult, FetchError, RateTable, convert,
};
use crate::store::{RateStatus, RateStore};
use anyhow::{Context, Result};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, error};

const HELP: &str = "\
Commands:
  <amount>      set the amount to convert
  from <CODE>   change the source currency
  to <CODE>     change the target currency
  swap          exchange source and target
  clear         clear the amount
  rates         show rates from the source currency
  refresh       fetch rates again
  help          show this help
  quit          exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Amount(String),
    From(String),
    To(String),
    Swap,
    Refresh,
    Rates,
    Help,
    Quit,
    /// Blank line.
    Nothing,
}

impl Command {
    /// Anything that is not a known command, including a known keyword with
    /// trailing words, is taken as amount input.
    pub fn parse(line: &str) -> Command {
        let line = line.trim();
        let mut words = line.split_whitespace();
        let keyword = words.next().unwrap_or("").to_lowercase();
        let argument = words.next();
        if words.next().is_some() {
            return Command::Amount(line.to_string());
        }

        match (keyword.as_str(), argument) {
            ("", _) => Command::Nothing,
            ("from", Some(code)) => Command::From(normalize_code(code)),
            ("to", Some(code)) => Command::To(normalize_code(code)),
            ("swap", None) => Command::Swap,
            ("clear", None) => Command::Amount(String::new()),
            ("refresh", None) => Command::Refresh,
            ("rates", None) => Command::Rates,
            ("help", None) | ("?", None) => Command::Help,
            ("quit", None) | ("exit", None) | ("q", None) => Command::Quit,
            _ => Command::Amount(line.to_string()),
        }
    }
}

/// What the result area shows for the current inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// Empty amount field; carries the one-unit conversion for the rate line if available.
    Idle(Option<ConversionResult>),
    Converted(ConversionResult),
    Failed(ConversionError),
}

/// Current inputs of the converter. Owns the selection, not the rates.
#[derive(Debug, Clone)]
pub struct Session {
    request: ConversionRequest,
}

impl Session {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            request: ConversionRequest::new("", from, to),
        }
    }

    pub fn request(&self) -> &ConversionRequest {
        &self.request
    }

    pub fn set_amount(&mut self, amount: &str) {
        self.request.amount = amount.trim().to_string();
    }

    pub fn set_from(&mut self, code: &str) {
        self.request.from = code.to_string();
    }

    pub fn set_to(&mut self, code: &str) {
        self.request.to = code.to_string();
    }

    pub fn swap(&mut self) {
        self.request = self.request.swapped();
    }

    /// An empty amount is a no-op rather than an invalid number.
    pub fn view(&self, snapshot: &RateTable) -> View {
        if self.request.amount.is_empty() {
            let unit = ConversionRequest::new("1", &self.request.from, &self.request.to);
            return View::Idle(convert(snapshot, &unit).ok());
        }
        match convert(snapshot, &self.request) {
            Ok(result) => View::Converted(result),
            Err(e) => View::Failed(e),
        }
    }
}

pub fn render_view(view: &View, request: &ConversionRequest) -> String {
    match view {
        View::Idle(Some(unit)) => format!(
            "{}\n{}",
            ui::style_text("0.00", ui::StyleType::Subtle),
            ui::style_text(&display::rate_line(unit), ui::StyleType::Subtle)
        ),
        View::Idle(None) => ui::style_text(
            &format!("0.00\n1 {} ≈ ? {}", request.from, request.to),
            ui::StyleType::Subtle,
        ),
        View::Converted(result) => display::render_conversion(&Ok(result.clone())),
        View::Failed(e) => display::render_conversion(&Err(e.clone())),
    }
}

type RefreshHandle = JoinHandle<Result<Arc<RateTable>, FetchError>>;

fn spawn_refresh(store: &Arc<RateStore>) -> RefreshHandle {
    let store = Arc::clone(store);
    tokio::spawn(async move { store.refresh().await })
}

async fn wait_for(
    pending: &mut Option<RefreshHandle>,
) -> Result<Result<Arc<RateTable>, FetchError>, JoinError> {
    match pending {
        Some(handle) => handle.await,
        None => std::future::pending().await,
    }
}

fn prompt<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    let request = session.request();
    write!(
        out,
        "[{} {} -> {}] > ",
        if request.amount.is_empty() { "_" } else { request.amount.as_str() },
        request.from,
        request.to
    )?;
    out.flush().context("Failed to write prompt")
}

fn show<W: Write>(session: &Session, store: &RateStore, out: &mut W) -> Result<()> {
    let view = session.view(&store.current_snapshot());
    writeln!(out, "{}", render_view(&view, session.request()))?;
    Ok(())
}

/// Reads commands from `input` until `quit` or end of input, writing everything to `out`.
///
/// A finished background refresh is reported before the next line is handled.
pub async fn run<R, W>(
    store: Arc<RateStore>,
    config: &AppConfig,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut session = Session::new(&config.default_from, &config.default_to);

    writeln!(out, "{}", ui::style_text("Currency Converter", ui::StyleType::Title))?;
    writeln!(
        out,
        "{}\n",
        ui::style_text(
            &format!("Currencies: {}", config.currencies.join(", ")),
            ui::StyleType::Subtle
        )
    )?;
    writeln!(out, "{HELP}\n")?;

    let mut pending = Some(spawn_refresh(&store));
    writeln!(out, "{}", display::render_status(&store.status()))?;

    let mut lines = input.lines();
    loop {
        prompt(&session, out)?;
        tokio::select! {
            biased;
            joined = wait_for(&mut pending) => {
                pending = None;
                writeln!(out)?;
                match joined {
                    Ok(Ok(_)) => show(&session, &store, out)?,
                    Ok(Err(e)) => writeln!(
                        out,
                        "{}",
                        ui::style_text(&format!("Cannot reach the rate server: {e}"), ui::StyleType::Error)
                    )?,
                    Err(e) => error!(error = %e, "Refresh task failed"),
                }
                writeln!(out, "{}", display::render_status(&store.status()))?;
            }
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    writeln!(out)?;
                    break;
                };
                let command = Command::parse(&line);
                debug!(?command, "Handling command");
                match command {
                    Command::Nothing => {}
                    Command::Quit => break,
                    Command::Help => writeln!(out, "{HELP}")?,
                    Command::Amount(amount) => {
                        session.set_amount(&amount);
                        show(&session, &store, out)?;
                    }
                    Command::From(code) | Command::To(code) if !config.is_selectable(&code) => {
                        writeln!(
                            out,
                            "{}",
                            ui::style_text(
                                &format!("{code} is not one of: {}", config.currencies.join(", ")),
                                ui::StyleType::Warning
                            )
                        )?;
                    }
                    Command::From(code) => {
                        session.set_from(&code);
                        show(&session, &store, out)?;
                    }
                    Command::To(code) => {
                        session.set_to(&code);
                        show(&session, &store, out)?;
                    }
                    Command::Swap => {
                        session.swap();
                        show(&session, &store, out)?;
                    }
                    Command::Rates => {
                        let from = &session.request().from;
                        writeln!(
                            out,
                            "{}",
                            rates::rates_table(&store.current_snapshot(), from, &config.currencies)
                        )?;
                    }
                    Command::Refresh => {
                        if pending.is_some() {
                            writeln!(out, "{}", ui::style_text("Already updating rates", ui::StyleType::Subtle))?;
                        } else {
                            pending = Some(spawn_refresh(&store));
                            writeln!(out, "{}", display::render_status(&RateStatus::Loading))?;
                        }
                    }
                }
            }
        }
    }

    if let Some(handle) = pending {
        handle.abort();
    }
    Ok(())
}
