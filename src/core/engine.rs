use crate::core::matcher::SearchQuery;
use crate::core::navigator::{NavState, Navigator};
use crate::core::orderer::{order, SourceCollation};
use crate::core::transcriber::PhoneticEngine;
use crate::core::types::{OrderMode, Side, WordEntry};
use crate::deck::Deck;
use crate::speech::SpeechRequest;
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Inputs fixed for the lifetime of a session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub source_lang: String,
    pub target_lang: String,
    pub mode: OrderMode,
    /// Seeds the random source; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            source_lang: "en-US".to_string(),
            target_lang: "id-ID".to_string(),
            mode: OrderMode::Alphabetical,
            seed: None,
        }
    }
}

// The browsing session composes the read-only deck with the search, ordering
// and navigation state. (query, mode) are the only inputs that trigger a
// recompute; the cursor moves only through the navigation methods.
pub struct DeckSession {
    deck: Deck,
    query: SearchQuery,
    mode: OrderMode,
    ordered: Vec<WordEntry>,
    navigator: Navigator,
    phonetics: PhoneticEngine,
    collation: SourceCollation,
    rng: StdRng,
    source_lang: String,
    target_lang: String,
}

impl DeckSession {
    pub fn new(deck: Deck, options: SessionOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut session = Self {
            deck,
            query: SearchQuery::default(),
            mode: options.mode,
            ordered: Vec::new(),
            navigator: Navigator::default(),
            phonetics: PhoneticEngine::new(),
            collation: SourceCollation::for_language(&options.source_lang),
            rng,
            source_lang: options.source_lang,
            target_lang: options.target_lang,
        };
        session.recompute();
        session
    }

    /// Re-derives the ordered sequence from (deck, query, mode) and resets the cursor.
    fn recompute(&mut self) {
        let filtered = self.query.filter(self.deck.entries());
        self.ordered = order(&filtered, self.mode, &self.collation, &mut self.rng).into_iter().cloned().collect();
        self.navigator.rebind(self.ordered.len());
        debug!(
            "recompute: query={:?} mode={} matches={}",
            self.query.raw(),
            self.mode,
            self.ordered.len()
        );
    }

    pub fn set_query(&mut self, query: &str) {
        if self.query.raw() == query {
            return;
        }
        self.query = SearchQuery::new(query);
        self.recompute();
    }

    pub fn clear_query(&mut self) {
        self.set_query("");
    }

    pub fn set_mode(&mut self, mode: OrderMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        self.recompute();
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(self.mode.toggled());
    }

    pub fn query(&self) -> &str {
        self.query.raw()
    }

    pub fn mode(&self) -> OrderMode {
        self.mode
    }

    // Navigation. Each returns whether the cursor was live, so callers can
    // decide on feedback such as a click.

    pub fn next(&mut self) -> bool {
        self.navigator.next();
        self.log_step("next")
    }

    pub fn prev(&mut self) -> bool {
        self.navigator.prev();
        self.log_step("prev")
    }

    pub fn jump_random(&mut self) -> bool {
        self.navigator.jump_random(&mut self.rng);
        self.log_step("random")
    }

    pub fn jump_to_start(&mut self) -> bool {
        self.navigator.jump_to_start();
        self.log_step("start")
    }

    pub fn reset(&mut self) -> bool {
        self.navigator.reset();
        self.log_step("reset")
    }

    fn log_step(&self, action: &str) -> bool {
        debug!("nav {}: {:?}", action, self.navigator.state());
        !self.navigator.is_empty()
    }

    pub fn state(&self) -> NavState {
        self.navigator.state()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.navigator.cursor()
    }

    pub fn current_entry(&self) -> Option<&WordEntry> {
        self.navigator.cursor().and_then(|cursor| self.ordered.get(cursor))
    }

    /// Length of the filtered, ordered sequence.
    pub fn match_count(&self) -> usize {
        self.ordered.len()
    }

    /// Size of the whole deck regardless of the query.
    pub fn total_count(&self) -> usize {
        self.deck.len()
    }

    pub fn ordered(&self) -> &[WordEntry] {
        &self.ordered
    }

    /// 1-based "position of count" for display, when positioned.
    pub fn position(&self) -> Option<(usize, usize)> {
        self.navigator.cursor().map(|cursor| (cursor + 1, self.ordered.len()))
    }

    pub fn phonetic_hint(&self, text: &str) -> String {
        self.phonetics.transcribe_phrase(text)
    }

    pub fn language(&self, side: Side) -> &str {
        match side {
            Side::Source => &self.source_lang,
            Side::Target => &self.target_lang,
        }
    }

    /// Decides what to hand to the speech collaborator for one
    /// "pronounce" action. Nothing when there is no card or no text.
    pub fn pronounce(&self, side: Side) -> Option<SpeechRequest> {
        let entry = self.current_entry()?;
        let text = match side {
            Side::Source => &entry.source_text,
            Side::Target => &entry.target_text,
        };
        if text.trim().is_empty() {
            return None;
        }
        Some(SpeechRequest::new(text.clone(), self.language(side)))
    }
}
