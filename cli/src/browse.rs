use std::io::{self, BufRead};

use log::{debug, warn};
use rehome_core::{Ad, FetchError, FetchRequest, PageData, Pager, AD_PAGE_SIZES};

use crate::args::OutputFormat;
use crate::formatters::AdListFormatter;
use crate::forms::canonical_category;
use crate::session::Session;
use crate::web_client::Client;

/// What a listing view is looking at. The engine treats it as an opaque
/// filter; only identity changes matter to it.
#[derive(Debug, Clone, PartialEq)]
pub enum AdSource {
    /// Every ad, optionally narrowed to a category
    All { category: Option<String> },
    /// Ads the user marked as favorites
    Favorites { user_id: i64 },
    /// Ads the user authored
    Mine { user_id: i64 },
}

/// Resolve one engine request against the service
fn resolve(client: &dyn Client, req: &FetchRequest<AdSource>) -> Result<PageData<Ad>, FetchError> {
    let page = match &req.filter {
        AdSource::All { category } => {
            client.list_ads(req.page, req.page_size, category.as_deref())?
        }
        AdSource::Favorites { user_id } => {
            client.list_favorites(*user_id, req.page, req.page_size)?
        }
        AdSource::Mine { user_id } => client.list_user_ads(*user_id, req.page, req.page_size)?,
    };

    Ok(page.into())
}

/// Pump the engine until it has no pending fetch
pub fn pump(pager: &mut Pager<Ad, AdSource>, client: &dyn Client) {
    while let Some(req) = pager.take_request() {
        let token = req.token;
        let page = req.page;
        let outcome = resolve(client, &req);
        if !pager.apply(token, outcome) {
            warn!("Discarded stale response for page {page}");
        }
    }
}

/// Fetch and print a single page
pub fn render_once(
    pager: &mut Pager<Ad, AdSource>,
    client: &dyn Client,
    output: OutputFormat,
) -> anyhow::Result<()> {
    pump(pager, client);

    if let Some(error) = pager.error() {
        anyhow::bail!("{error}");
    }

    let mut formatter = AdListFormatter::new(output);
    formatter
        .print_page(pager)
        .map_err(|e| anyhow::anyhow!("Error while printing ads: {e}"))
}

/// Interactive listing loop: renders the current page, then reads one command
/// per line until quit. A failed fetch is shown on stderr while the last
/// rendered page stays visible.
pub fn interactive(
    pager: &mut Pager<Ad, AdSource>,
    client: &dyn Client,
    session: Option<&Session>,
    image_origin: &str,
    output: OutputFormat,
) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut formatter = AdListFormatter::new(output);

    loop {
        pump(pager, client);
        formatter
            .print_page(pager)
            .map_err(|e| anyhow::anyhow!("Error while printing ads: {e}"))?;
        if let Some(error) = pager.error() {
            eprintln!("Error: {error}");
        }

        println!("{}", prompt_for(pager.filter(), session.is_some()));

        let Some(line) = lines.next() else { break };
        let line = line?;
        let trimmed = line.trim();
        let (command, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (trimmed, ""),
        };

        match command {
            "" => {}
            "q" | "quit" => break,
            "n" | "next" => {
                if !pager.next_page() {
                    println!("Already on the last page.");
                }
            }
            "p" | "prev" => {
                if !pager.previous_page() {
                    println!("Already on the first page.");
                }
            }
            "r" | "refresh" => pager.refresh(),
            "s" | "size" => match rest.parse::<usize>() {
                Ok(n) if n > 0 => pager.set_page_size(n),
                _ => println!("Usage: s <ads per page>, e.g. one of {AD_PAGE_SIZES:?}"),
            },
            "c" | "category" if matches!(pager.filter(), AdSource::All { .. }) => {
                if rest.is_empty() {
                    pager.set_filter(AdSource::All { category: None });
                } else {
                    match canonical_category(rest) {
                        Some(category) => pager.set_filter(AdSource::All {
                            category: Some(category.to_string()),
                        }),
                        None => println!("Unknown category: {rest}"),
                    }
                }
            }
            "f" | "fav" if matches!(pager.filter(), AdSource::All { .. }) => {
                favorite(pager, client, session, rest);
            }
            "d" | "drop" => {
                if let AdSource::Favorites { user_id } = *pager.filter() {
                    drop_favorite(pager, client, user_id, rest);
                } else {
                    println!("Unknown command: {command}");
                }
            }
            "o" | "open" => open_image(pager, image_origin, rest),
            other => println!("Unknown command: {other}"),
        }
    }

    Ok(())
}

fn prompt_for(source: &AdSource, logged_in: bool) -> String {
    let mut parts = vec!["n)ext", "p)rev", "s)ize N", "o)pen N", "r)efresh"];
    match source {
        AdSource::All { .. } => {
            parts.push("c)ategory NAME");
            if logged_in {
                parts.push("f)av N");
            }
        }
        AdSource::Favorites { .. } => parts.push("d)rop N"),
        AdSource::Mine { .. } => {}
    }
    parts.push("q)uit");
    parts.join("  ")
}

/// 1-based index into the current page, as shown by the formatter
fn select_ad_id(pager: &Pager<Ad, AdSource>, arg: &str) -> Option<i64> {
    let Ok(number) = arg.parse::<usize>() else {
        println!("Expected an ad number between 1 and {}", pager.items().len());
        return None;
    };
    match pager.items().get(number.wrapping_sub(1)) {
        Some(ad) => Some(ad.ad_id),
        None => {
            println!("No ad number {number} on this page.");
            None
        }
    }
}

fn favorite(
    pager: &Pager<Ad, AdSource>,
    client: &dyn Client,
    session: Option<&Session>,
    arg: &str,
) {
    let Some(session) = session else {
        println!("You must be logged in to favorite an ad");
        return;
    };
    let Some(ad_id) = select_ad_id(pager, arg) else {
        return;
    };

    match client.add_favorite(session.user.id, ad_id) {
        Ok(message) => println!("{message}"),
        Err(e) => eprintln!("Error: {e}"),
    }
}

/// Optimistic removal: on success the ad disappears from the loaded page
/// without a refetch. The total stays as fetched, so the page display can
/// overstate the count until the next fetch.
fn drop_favorite(pager: &mut Pager<Ad, AdSource>, client: &dyn Client, user_id: i64, arg: &str) {
    let Some(ad_id) = select_ad_id(pager, arg) else {
        return;
    };

    match client.remove_favorite(user_id, ad_id) {
        Ok(message) => {
            pager.remove_local(|ad| ad.ad_id == ad_id);
            println!("{message}");
        }
        Err(e) => {
            debug!("remove_favorite failed for ad {ad_id}: {e}");
            eprintln!("Could not delete the ad, please try again");
        }
    }
}

fn open_image(pager: &Pager<Ad, AdSource>, image_origin: &str, arg: &str) {
    let Ok(number) = arg.parse::<usize>() else {
        println!("Expected an ad number between 1 and {}", pager.items().len());
        return;
    };
    let Some(ad) = pager.items().get(number.wrapping_sub(1)) else {
        println!("No ad number {number} on this page.");
        return;
    };

    match ad.image() {
        None => println!("This ad has no image."),
        Some(path) => {
            let url = format!("{image_origin}{path}");
            if let Err(e) = webbrowser::open(&url) {
                eprintln!("Could not open browser: {e}");
                println!("{url}");
            }
        }
    }
}
