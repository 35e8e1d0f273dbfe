mod cancel;
mod clock;
mod countries;
mod debounce;
mod error;
mod search;
mod view;
mod worldtime;

use std::io::Write;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use cancel::CancelToken;
use countries::Country;
use search::{SEARCH_ERROR_MESSAGE, SearchSession, SearchUpdate};
use view::ClockCard;

/// How many snapshot fetches may run at once for one country.
const SNAPSHOT_FETCH_CONCURRENCY: usize = 3;

/// How one pass through the search view ended.
enum SearchOutcome {
    Selected(Country),
    Exit,
}

/// How one stay in the clock grid ended.
enum GridOutcome {
    Back,
    Exit,
}

/// The main function initializes the tracing subscriber and alternates
/// between the two top-level states: searching for a country and viewing the
/// live clocks of a selected one. The two states are mutually exclusive;
/// leaving the grid discards the selection and returns to a fresh search.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Multi-Country Clock");
    println!("Search a country to view real-time clocks for all of its timezones.");
    println!("Type a name to search, a number to pick a result, `exit` to quit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        match run_search(&mut lines).await? {
            SearchOutcome::Exit => break,
            SearchOutcome::Selected(country) => {
                if let GridOutcome::Exit = run_clock_grid(&mut lines, &country).await? {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Drives the search view until the user selects a country or quits.
///
/// Typed lines feed the debouncer; once a query settles, a lookup starts and
/// supersedes any in-flight one. Lookup results come back over a channel
/// tagged with their cancellation token, so a stale response is dropped at
/// commit time and the visible list always reflects the newest query only.
async fn run_search(lines: &mut Lines<BufReader<Stdin>>) -> anyhow::Result<SearchOutcome> {
    let mut session = SearchSession::new();
    let mut results: Vec<Country> = Vec::new();
    let (tx, mut rx) = mpsc::unbounded_channel();

    prompt()?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    session.cancel_pending();
                    return Ok(SearchOutcome::Exit);
                };
                let input = line.trim().to_string();

                if input == "exit" || input == "quit" {
                    session.cancel_pending();
                    return Ok(SearchOutcome::Exit);
                }

                if let Ok(index) = input.parse::<usize>() {
                    if index >= 1 && index <= results.len() {
                        session.cancel_pending();
                        return Ok(SearchOutcome::Selected(results[index - 1].clone()));
                    }
                    println!("No result [{}] to pick; type a country name to search.", index);
                    prompt()?;
                    continue;
                }

                session.input(input);
            }

            query = session.settled() => {
                if query.trim().is_empty() {
                    // Blank input clears the list silently; no lookup fires.
                    session.cancel_pending();
                    results.clear();
                    prompt()?;
                    continue;
                }

                println!("Searching...");
                let token = session.begin();
                let tx = tx.clone();
                tokio::spawn(async move {
                    let result = countries::search_countries(&query).await;
                    if !token.is_cancelled() {
                        let _ = tx.send((token, result));
                    }
                });
            }

            Some((token, result)) = rx.recv() => {
                match session.commit(&token, result) {
                    None => {
                        debug!("Discarding search response for a superseded query");
                    }
                    Some(SearchUpdate::Failed) => {
                        results.clear();
                        println!("{}", SEARCH_ERROR_MESSAGE);
                        prompt()?;
                    }
                    Some(SearchUpdate::Results(found)) => {
                        results = found;
                        if results.is_empty() {
                            println!("{}", SEARCH_ERROR_MESSAGE);
                        } else {
                            for (index, country) in results.iter().enumerate() {
                                println!("{}", view::country_line(index + 1, country));
                            }
                            println!("Type a number to view its clocks.");
                        }
                        prompt()?;
                    }
                }
            }
        }
    }
}

/// Drives the clock grid for the selected country.
///
/// One card per timezone, one snapshot fetch each; a shared one-second tick
/// advances every live clock and redraws the grid in place. Leaving the grid
/// cancels the shared token, so a snapshot arriving afterwards is discarded
/// by its own task and the dropped ticker can never mutate card state again.
async fn run_clock_grid(
    lines: &mut Lines<BufReader<Stdin>>,
    country: &Country,
) -> anyhow::Result<GridOutcome> {
    info!(
        "Viewing clocks for {} ({}), {} timezone(s)",
        country.common_name,
        country.code,
        country.timezone_ids.len()
    );

    let mut cards: Vec<ClockCard> = country
        .timezone_ids
        .iter()
        .map(|tz| ClockCard::new(tz.clone()))
        .collect();

    if cards.is_empty() {
        println!("{} reports no timezones.", country.common_name);
        return Ok(GridOutcome::Back);
    }

    let token = CancelToken::new();
    let (tx, mut rx) = mpsc::unbounded_channel();

    // One snapshot fetch per card, tagged with the card index. The token is
    // checked after each fetch completes, so anything finishing after the
    // grid is torn down is dropped instead of sent.
    {
        let tx = tx.clone();
        let token = token.clone();
        let timezones = country.timezone_ids.clone();
        tokio::spawn(async move {
            let mut fetches = Box::pin(
                stream::iter(timezones.into_iter().enumerate())
                    .map(|(index, timezone_id)| async move {
                        (index, worldtime::fetch_snapshot(&timezone_id).await)
                    })
                    .buffer_unordered(SNAPSHOT_FETCH_CONCURRENCY),
            );
            while let Some((index, result)) = fetches.next().await {
                if token.is_cancelled() || tx.send((index, result)).is_err() {
                    break;
                }
            }
        });
    }

    let mut ticker = interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut drawn = 0usize;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                for card in &mut cards {
                    card.tick();
                }
                drawn = redraw(country, &cards, drawn)?;
            }

            Some((index, result)) = rx.recv() => {
                match result {
                    Ok(snapshot) => cards[index].set_snapshot(snapshot),
                    Err(err) => {
                        warn!("Snapshot fetch for {} failed: {}", cards[index].timezone_id, err);
                        cards[index].set_error(err.to_string());
                    }
                }
                drawn = redraw(country, &cards, drawn)?;
            }

            line = lines.next_line() => {
                token.cancel();
                let outcome = match line? {
                    None => GridOutcome::Exit,
                    Some(input) => match input.trim() {
                        "exit" | "quit" => GridOutcome::Exit,
                        _ => GridOutcome::Back,
                    },
                };
                return Ok(outcome);
            }
        }
    }
}

/// Redraws the grid block in place: move the cursor back up over the
/// previously drawn block, then rewrite each line. Returns the new height.
fn redraw(country: &Country, cards: &[ClockCard], previous: usize) -> anyhow::Result<usize> {
    let lines = view::render_grid(country, cards);
    let mut out = String::new();
    if previous > 0 {
        out.push_str(&format!("\x1b[{}A", previous));
    }
    for line in &lines {
        out.push_str("\x1b[2K");
        out.push_str(line);
        out.push('\n');
    }
    print!("{}", out);
    std::io::stdout().flush()?;
    Ok(lines.len())
}

fn prompt() -> std::io::Result<()> {
    print!("search> ");
    std::io::stdout().flush()
}
