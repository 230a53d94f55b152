//! The render cycle: a store, the cards built for its current page, and the
//! frame that the output layer draws.
//!
//! Every call that changes the store (load, search, page change) discards
//! the visible cards and builds new ones, so reveal and copy state never
//! survives a render cycle.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, error};

use crate::card::{Card, CopyIcon, CopyOutcome, ImagePool};
use crate::clipboard::Clipboard;
use crate::pagination::{Control, ControlStrip};
use crate::record::CheatRecord;
use crate::store::{CheatStore, PageView};

pub const NO_RESULTS: &str = "No cheats found.";
pub const LOAD_FAILED: &str = "Failed to load cheat codes.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeckStatus {
    Loading,
    Ready,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub slot: usize,
    pub image: String,
    pub title: String,
    pub body: String,
    pub code: String,
    pub revealed: bool,
    pub icon: CopyIcon,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameBody {
    Loading,
    Cards(Vec<CardView>),
    Message(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub first: usize,
    pub last: usize,
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub body: FrameBody,
    pub summary: Option<Summary>,
    pub controls: ControlStrip,
    pub scroll_to_cards: bool,
}

pub struct Deck {
    store: CheatStore,
    pool: ImagePool,
    cards: Vec<Card>,
    status: DeckStatus,
    scroll_pending: bool,
}

impl Deck {
    pub fn new(store: CheatStore, pool: ImagePool) -> Self {
        let mut deck = Self {
            store,
            pool,
            cards: Vec::new(),
            status: DeckStatus::Loading,
            scroll_pending: false,
        };
        if deck.store.is_loaded() {
            deck.status = DeckStatus::Ready;
            deck.rebuild();
        }
        deck
    }

    pub fn store(&self) -> &CheatStore {
        &self.store
    }

    pub fn status(&self) -> DeckStatus {
        self.status
    }

    pub fn load(&mut self, records: Vec<CheatRecord>) {
        self.store.load(records);
        self.status = DeckStatus::Ready;
        self.rebuild();
    }

    /// Replaces the card area with the load failure message for the rest of
    /// the session.
    pub fn fail(&mut self, reason: &str) {
        error!("Error loading cheats: {reason}");
        self.status = DeckStatus::Failed;
        self.cards.clear();
    }

    pub fn search(&mut self, query: &str) {
        if self.status == DeckStatus::Failed {
            return;
        }
        self.store.set_query(query);
        debug!(
            "query '{}' matched {} of {}",
            query.trim(),
            self.store.filtered_len(),
            self.store.all().len()
        );
        self.rebuild();
    }

    /// Activates a control from the strip. Disabled controls do nothing.
    pub fn go(&mut self, control: Control) -> bool {
        if self.status != DeckStatus::Ready || !self.store.navigate(control) {
            return false;
        }
        self.rebuild();
        self.scroll_pending = true;
        true
    }

    pub fn go_to_page(&mut self, page: usize) -> usize {
        let before = self.store.current_page();
        let now = self.store.set_page(page);
        if now != before {
            self.rebuild();
        }
        now
    }

    fn rebuild(&mut self) {
        let pool = &self.pool;
        self.cards = self.store.visible().map(|r| Card::new(r, pool)).collect();
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// 1-based position on the current page.
    pub fn card(&self, slot: usize) -> Option<&Card> {
        slot.checked_sub(1).and_then(|i| self.cards.get(i))
    }

    fn card_mut(&mut self, slot: usize) -> Option<&mut Card> {
        slot.checked_sub(1).and_then(|i| self.cards.get_mut(i))
    }

    pub fn reveal(&mut self, slot: usize) -> bool {
        match self.card_mut(slot) {
            Some(card) => {
                card.reveal();
                true
            }
            None => false,
        }
    }

    pub fn reveal_all(&mut self) {
        self.cards.iter_mut().for_each(Card::reveal);
    }

    pub fn copy(
        &mut self,
        slot: usize,
        clipboard: &mut dyn Clipboard,
        now: Instant,
    ) -> Option<CopyOutcome> {
        self.card_mut(slot).map(|card| card.copy(clipboard, now))
    }

    /// Earliest moment a confirmation icon on this page reverts.
    pub fn next_revert(&self, now: Instant) -> Option<Instant> {
        self.cards.iter().filter_map(|c| c.revert_at(now)).min()
    }

    pub fn frame(&mut self, now: Instant) -> Frame {
        let scroll_to_cards = std::mem::take(&mut self.scroll_pending);
        match self.status {
            DeckStatus::Loading => Frame {
                body: FrameBody::Loading,
                summary: None,
                controls: ControlStrip::default(),
                scroll_to_cards,
            },
            DeckStatus::Failed => Frame {
                body: FrameBody::Message(LOAD_FAILED.to_string()),
                summary: None,
                controls: ControlStrip::default(),
                scroll_to_cards,
            },
            DeckStatus::Ready => match self.store.view() {
                PageView::NoResults => Frame {
                    body: FrameBody::Message(NO_RESULTS.to_string()),
                    summary: None,
                    controls: ControlStrip::default(),
                    scroll_to_cards,
                },
                PageView::Page {
                    page,
                    total_pages,
                    range,
                    total_matches,
                    controls,
                    ..
                } => Frame {
                    body: FrameBody::Cards(self.card_views(now)),
                    summary: Some(Summary {
                        first: range.start + 1,
                        last: range.end,
                        total: total_matches,
                        page,
                        total_pages,
                    }),
                    controls,
                    scroll_to_cards,
                },
            },
        }
    }

    fn card_views(&self, now: Instant) -> Vec<CardView> {
        self.cards
            .iter()
            .enumerate()
            .map(|(i, c)| CardView {
                slot: i + 1,
                image: c.image.clone(),
                title: c.title.clone(),
                body: c.body.clone(),
                code: c.stored_code().to_string(),
                revealed: c.is_revealed(),
                icon: c.copy_icon(now),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::tests::MemoryClipboard;
    use crate::csv::parse_csv;

    fn deck_with(n: usize) -> Deck {
        let mut csv = String::from("Reward,Description,Code\n");
        for i in 0..n {
            csv.push_str(&format!("Item {i},Desc {i},CODE{i}\n"));
        }
        let mut deck = Deck::new(CheatStore::new(10), ImagePool::default());
        deck.load(parse_csv(&csv).unwrap());
        deck
    }

    #[test]
    fn loading_frame_before_fetch() {
        let mut deck = Deck::new(CheatStore::default(), ImagePool::default());
        assert_eq!(deck.status(), DeckStatus::Loading);
        assert_eq!(deck.frame(Instant::now()).body, FrameBody::Loading);
    }

    #[test]
    fn empty_seeded_store_is_ready() {
        let mut store = CheatStore::default();
        store.load(Vec::new());
        let mut deck = Deck::new(store, ImagePool::default());
        assert_eq!(deck.status(), DeckStatus::Ready);
        assert_eq!(
            deck.frame(Instant::now()).body,
            FrameBody::Message(NO_RESULTS.to_string())
        );
    }

    #[test]
    fn reveal_affects_only_one_card() {
        let mut deck = deck_with(3);
        assert!(deck.reveal(2));
        assert!(!deck.card(1).unwrap().is_revealed());
        assert!(deck.card(2).unwrap().is_revealed());
        assert!(!deck.card(3).unwrap().is_revealed());
        assert!(!deck.reveal(4));
        assert!(!deck.reveal(0));
    }

    #[test]
    fn page_change_rebuilds_cards_and_requests_scroll() {
        let mut deck = deck_with(25);
        deck.reveal(1);
        assert!(deck.go(Control::Next));
        assert_eq!(deck.card(1).unwrap().title, "Item 10");
        assert!(!deck.card(1).unwrap().is_revealed());

        let frame = deck.frame(Instant::now());
        assert!(frame.scroll_to_cards);
        assert!(!deck.frame(Instant::now()).scroll_to_cards);
    }

    #[test]
    fn disabled_control_is_ignored() {
        let mut deck = deck_with(25);
        deck.reveal(1);
        assert!(!deck.go(Control::Previous));
        assert!(deck.card(1).unwrap().is_revealed());
        assert!(!deck.frame(Instant::now()).scroll_to_cards);
    }

    #[test]
    fn search_without_matches_shows_placeholder() {
        let mut deck = deck_with(5);
        deck.search("zzz");
        let frame = deck.frame(Instant::now());
        assert_eq!(frame.body, FrameBody::Message(NO_RESULTS.to_string()));
        assert!(frame.controls.is_empty());
        assert!(frame.summary.is_none());
        assert!(deck.cards().is_empty());
    }

    #[test]
    fn failure_replaces_card_area() {
        let mut deck = deck_with(5);
        deck.fail("connection refused");
        let frame = deck.frame(Instant::now());
        assert_eq!(frame.body, FrameBody::Message(LOAD_FAILED.to_string()));
        assert!(!deck.go(Control::Next));
    }

    #[test]
    fn frame_summary_and_views() {
        let mut deck = deck_with(25);
        deck.go_to_page(3);
        deck.reveal(5);
        let frame = deck.frame(Instant::now());
        assert_eq!(
            frame.summary,
            Some(Summary {
                first: 21,
                last: 25,
                total: 25,
                page: 3,
                total_pages: 3
            })
        );
        match frame.body {
            FrameBody::Cards(views) => {
                assert_eq!(views.len(), 5);
                assert!(views[4].revealed);
                assert_eq!(views[4].code, "CODE24");
                assert!(!views[0].revealed);
            }
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn copy_sets_next_revert() {
        let mut deck = deck_with(3);
        let mut cb = MemoryClipboard::default();
        let now = Instant::now();
        assert_eq!(deck.copy(1, &mut cb, now), Some(CopyOutcome::CodeHidden));
        deck.reveal(1);
        assert_eq!(deck.copy(1, &mut cb, now), Some(CopyOutcome::Copied));
        assert_eq!(cb.contents, vec!["CODE0".to_string()]);
        assert!(deck.next_revert(now).is_some());
        assert_eq!(deck.copy(9, &mut cb, now), None);
    }
}
