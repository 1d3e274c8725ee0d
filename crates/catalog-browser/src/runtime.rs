//! Event loop driving the browser.
//!
//! Input lines, debounce expiries and fetch completions all arrive on one
//! channel and are handled one at a time, so `Browser` needs no locking.

use crate::api::{CatalogClient, FetchError};
use crate::browser::{Browser, DebounceTicket, Effect, QueryRequest, RequestId};
use crate::debounce::Debouncer;
use crate::render::{render, HELP};
use crate::state::{Listing, View};
use anyhow::{Context, Result};
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

/// Something the user asked for, parsed from one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// The search field now holds this text
    Type(String),
    Next,
    Prev,
    Clear,
    Help,
    Quit,
}

impl UserAction {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            ":next" | ":n" => UserAction::Next,
            ":prev" | ":p" => UserAction::Prev,
            ":clear" | ":c" => UserAction::Clear,
            ":help" | ":h" | ":?" => UserAction::Help,
            ":quit" | ":q" => UserAction::Quit,
            _ => UserAction::Type(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

#[derive(Debug)]
pub enum Event {
    User(UserAction),
    DebounceElapsed(DebounceTicket),
    Response {
        id: RequestId,
        result: Result<Listing, FetchError>,
    },
}

pub struct Runtime {
    browser: Browser,
    client: CatalogClient,
    debouncer: Debouncer<Event>,
    tx: UnboundedSender<Event>,
    rx: UnboundedReceiver<Event>,
}

impl Runtime {
    pub fn new(browser: Browser, client: CatalogClient, debounce: Duration) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            browser,
            client,
            debouncer: Debouncer::new(debounce, tx.clone()),
            tx,
            rx,
        }
    }

    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Load the first page
    pub fn start(&mut self) {
        let effects = self.browser.start();
        self.dispatch(effects);
    }

    /// Wait for the next timer or fetch completion
    pub async fn next_event(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Apply one event. Returns true when the screen changed.
    pub fn handle(&mut self, event: Event) -> bool {
        let effects = match event {
            Event::User(action) => match action {
                UserAction::Type(text) => self.browser.type_text(&text),
                UserAction::Next => self.browser.next_page(),
                UserAction::Prev => self.browser.prev_page(),
                UserAction::Clear => self.browser.clear_search(),
                UserAction::Help | UserAction::Quit => Vec::new(),
            },
            Event::DebounceElapsed(ticket) => self.browser.debounce_elapsed(ticket),
            Event::Response { id, result } => {
                let result = result.map_err(|e| {
                    warn!(request = ?id, error = %e, "Error fetching manga data");
                    e.to_string()
                });
                return self.browser.apply_response(id, result);
            }
        };

        let changed = effects.iter().any(|e| matches!(e, Effect::Fetch(_)));
        self.dispatch(effects);
        changed
    }

    fn dispatch(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Fetch(request) => self.spawn_fetch(request),
                Effect::ArmDebounce(ticket) => self.debouncer.arm(Event::DebounceElapsed(ticket)),
                Effect::CancelDebounce => self.debouncer.cancel(),
            }
        }
    }

    fn spawn_fetch(&self, request: QueryRequest) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let id = request.id;
            let result = execute(&client, request).await;
            // Receiver gone means the browser is shutting down
            let _ = tx.send(Event::Response { id, result });
        });
    }

    /// No query in flight and no search waiting on the debounce timer
    pub fn is_settled(&self) -> bool {
        !self.browser.state().is_loading() && !self.browser.search_pending()
    }

    /// Run until `:quit`, or until input ends and the browser has settled,
    /// rendering to `out` after every change
    pub async fn run<R, W>(mut self, input: R, mut out: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();
        let mut input_open = true;

        self.start();
        draw(&mut out, &render(&self.browser))?;

        loop {
            if !input_open && self.is_settled() {
                break;
            }

            let changed = tokio::select! {
                line = lines.next_line(), if input_open => {
                    match line.context("Failed to read input")? {
                        None => {
                            info!("Input closed");
                            input_open = false;
                            false
                        }
                        Some(line) => match UserAction::parse(&line) {
                            UserAction::Quit => break,
                            UserAction::Help => {
                                draw(&mut out, HELP)?;
                                false
                            }
                            action => self.handle(Event::User(action)),
                        },
                    }
                }
                Some(event) = self.rx.recv() => self.handle(event),
            };

            if changed {
                draw(&mut out, &render(&self.browser))?;
            }
        }

        self.debouncer.cancel();
        Ok(())
    }
}

/// Send one query and shape its answer for the browser
pub async fn execute(client: &CatalogClient, request: QueryRequest) -> Result<Listing, FetchError> {
    debug!(request = ?request.id, view = ?request.view, "Fetching");
    match request.view {
        View::Paged { page } => {
            let entries = client.fetch_page(page).await?;
            Ok(Listing::Paged { page, entries })
        }
        View::Search { query } => {
            let found = client.search(&query, request.limit).await?;
            Ok(Listing::Searching {
                query,
                results: found.results,
                total: found.total,
                limited: found.limited,
            })
        }
    }
}

fn draw<W: Write>(out: &mut W, screen: &str) -> Result<()> {
    writeln!(out, "\n{}", screen.trim_end()).context("Failed to write screen")?;
    out.flush().context("Failed to flush screen")
}
