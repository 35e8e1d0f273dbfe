use crate::clock::{LocalClock, TIME_PLACEHOLDER, format_utc_offset};
use crate::countries::Country;
use crate::worldtime::TimeSnapshot;

/// One live clock for a single timezone of the selected country.
///
/// Starts out loading, then either goes live from its snapshot or records a
/// card-scoped error. Ticking only moves a live clock; loading and failed
/// cards render the placeholder.
pub struct ClockCard {
    pub timezone_id: String,
    state: CardState,
}

enum CardState {
    Loading,
    Failed(String),
    Live {
        snapshot: TimeSnapshot,
        clock: LocalClock,
    },
}

impl ClockCard {
    pub fn new(timezone_id: String) -> Self {
        Self {
            timezone_id,
            state: CardState::Loading,
        }
    }

    /// Seeds the card's clock from a freshly fetched snapshot. A snapshot
    /// whose instant does not parse fails this card only.
    pub fn set_snapshot(&mut self, snapshot: TimeSnapshot) {
        self.state = match LocalClock::from_iso(&snapshot.iso_datetime, snapshot.utc_offset_minutes)
        {
            Ok(clock) => CardState::Live { snapshot, clock },
            Err(err) => CardState::Failed(err.to_string()),
        };
    }

    pub fn set_error(&mut self, message: String) {
        self.state = CardState::Failed(message);
    }

    /// Advances the card's clock by one second. No-op unless live.
    pub fn tick(&mut self) {
        if let CardState::Live { clock, .. } = &mut self.state {
            clock.tick();
        }
    }

    /// Renders the card as display lines: timezone header with abbreviation
    /// badge, the ticking time and date, then the snapshot metadata row.
    pub fn render(&self) -> Vec<String> {
        match &self.state {
            CardState::Loading => vec![
                self.timezone_id.clone(),
                format!("  {}  Loading time...", TIME_PLACEHOLDER),
            ],
            CardState::Failed(message) => vec![
                self.timezone_id.clone(),
                format!("  {}  {}", TIME_PLACEHOLDER, message),
            ],
            CardState::Live { snapshot, clock } => {
                let display = clock.display();
                vec![
                    format!("{} [{}]", self.timezone_id, snapshot.abbreviation),
                    format!("  {}  {}", display.time, display.date),
                    format!(
                        "  UTC {} | {} | DST: {} | IP: {}",
                        format_utc_offset(snapshot.utc_offset_minutes),
                        snapshot.day_of_week,
                        snapshot.is_dst,
                        snapshot.source_ip
                    ),
                ]
            }
        }
    }
}

/// One selectable search result line.
pub fn country_line(index: usize, country: &Country) -> String {
    format!(
        "[{}] {} ({}) | {} timezone(s) | {}",
        index,
        country.common_name,
        country.code,
        country.timezone_ids.len(),
        country.flag_image_url
    )
}

/// The full clock grid: country header plus every card, ready to print as
/// one block so the caller can redraw it in place each tick.
pub fn render_grid(country: &Country, cards: &[ClockCard]) -> Vec<String> {
    let mut lines = vec![
        format!(
            "{} ({}) | {} timezone(s) | type `back` to search again",
            country.common_name,
            country.code,
            country.timezone_ids.len()
        ),
        String::new(),
    ];
    for card in cards {
        lines.extend(card.render());
        lines.push(String::new());
    }
    lines
}
