use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// Where the "while you wait" joke comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JokeSource {
    Off,
    #[default]
    Canned,
    Oracle,
}

pub const CANNED_JOKES: [&str; 4] = [
    "Why don't programmers like nature? It has too many bugs.",
    "Why do Java developers wear glasses? Because they don't see sharp.",
    "Why do programmers prefer dark mode? Because light attracts bugs!",
    "Why did the developer go broke? Because he used up all his cache.",
];

pub(super) fn pick_canned() -> &'static str {
    CANNED_JOKES
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(CANNED_JOKES[0])
}
