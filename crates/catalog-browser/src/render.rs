//! Plain-text rendering of the browser.

use crate::browser::Browser;
use crate::state::{BrowserState, Listing, View};
use shared::MangaEntry;
use std::fmt::Write;

pub const TITLE: &str = "New Gen Mangareader";

pub const HELP: &str = "\
Type to search by title or genre (an empty line clears the field).
Commands: :next  :prev  :clear  :help  :quit";

/// Render the whole screen
pub fn render(browser: &Browser) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== {} ===", TITLE);
    if browser.input().is_empty() {
        let _ = writeln!(out, "Search: (by title or genre)");
    } else {
        let _ = writeln!(out, "Search: {}", browser.input());
    }

    match browser.state() {
        BrowserState::Loading { .. } => {
            let _ = writeln!(out, "Loading manga data...");
            return out;
        }
        BrowserState::Ready(listing) => {
            render_listing(&mut out, listing);
            render_controls(&mut out, browser, Some(listing));
        }
        BrowserState::Failed {
            previous, reason, ..
        } => {
            if let Some(listing) = previous {
                render_listing(&mut out, listing);
            }
            // Controls follow the failed query's view
            render_controls(&mut out, browser, previous.as_ref());
            let _ = writeln!(out, "! Failed to fetch manga data: {}", reason);
        }
    }

    out
}

fn render_listing(out: &mut String, listing: &Listing) {
    if let Listing::Searching {
        results,
        total,
        limited,
        ..
    } = listing
    {
        let _ = writeln!(out, "{}", search_summary(results.len(), *total, *limited));
    }

    let entries = listing.entries();
    if entries.is_empty() {
        match listing {
            Listing::Searching { query, .. } => {
                let _ = writeln!(out, "No mangas found matching \"{}\"", query);
            }
            Listing::Paged { .. } => {
                let _ = writeln!(out, "No mangas available for this page");
            }
        }
    } else {
        for (index, entry) in entries.iter().enumerate() {
            let _ = writeln!(out, "{}", card(index + 1, entry));
        }
    }
}

/// Pagination bar while paging, the refine notice under a capped search
fn render_controls(out: &mut String, browser: &Browser, listing: Option<&Listing>) {
    match browser.state().view() {
        View::Paged { page } => {
            let prev = if page <= 1 {
                "(Previous Page)"
            } else {
                "[Previous Page]"
            };
            let _ = writeln!(out, "{}  Page {}  [Next Page]", prev, page);
        }
        View::Search { .. } => {
            if let Some(Listing::Searching { limited: true, .. }) = listing {
                let _ = writeln!(
                    out,
                    "Showing top {} results. Try refining your search for more specific results.",
                    browser.search_limit()
                );
            }
        }
    }
}

/// Result count line shown above search results
pub fn search_summary(shown: usize, total: usize, limited: bool) -> String {
    if limited {
        format!("Showing top {} of {} mangas found", shown, total)
    } else if total == 1 {
        "Found 1 manga".to_string()
    } else {
        format!("Found {} mangas", total)
    }
}

/// One catalog entry as a single line
pub fn card(position: usize, entry: &MangaEntry) -> String {
    let mut line = format!("{:>3}. {}", position, entry.title);
    if !entry.genres().is_empty() {
        let _ = write!(line, " [{}]", entry.genres().join(", "));
    }
    if !entry.cover_url.is_empty() {
        let _ = write!(line, " <{}>", entry.cover_url);
    }
    line
}
