use std::ops::Range;

use crate::pagination::{self, Control, ControlStrip};
use crate::record::CheatRecord;
use crate::search::{self, Query};

/// Full record set plus the current search and page position.
///
/// `filtered` holds indices into `all`, so it is always an order-preserving
/// subset of it.
#[derive(Clone, Debug)]
pub struct CheatStore {
    all: Vec<CheatRecord>,
    filtered: Vec<usize>,
    query: Query,
    current_page: usize,
    page_size: usize,
    loaded: bool,
}

/// What a render cycle should show for the store's current state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageView<'a> {
    NoResults,
    Page {
        records: Vec<&'a CheatRecord>,
        page: usize,
        total_pages: usize,
        range: Range<usize>,
        total_matches: usize,
        controls: ControlStrip,
    },
}

impl Default for CheatStore {
    fn default() -> Self {
        Self::new(pagination::DEFAULT_PAGE_SIZE)
    }
}

impl CheatStore {
    pub fn new(page_size: usize) -> Self {
        Self {
            all: Vec::new(),
            filtered: Vec::new(),
            query: Query::default(),
            current_page: 1,
            page_size: page_size.max(1),
            loaded: false,
        }
    }

    /// Replaces the record set wholesale and re-applies the current query.
    pub fn load(&mut self, records: Vec<CheatRecord>) {
        self.all = records;
        self.loaded = true;
        self.refilter();
    }

    /// True once a record set has been loaded, even an empty one.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn set_query(&mut self, raw: &str) {
        self.query = Query::new(raw);
        self.refilter();
    }

    /// Moves to `page`, clamped into the valid range. Returns the page that
    /// is current afterwards.
    pub fn set_page(&mut self, page: usize) -> usize {
        self.current_page = pagination::clamp_page(page, self.total_pages());
        self.current_page
    }

    /// Applies a strip control. Disabled controls leave the page unchanged
    /// and return `false`.
    pub fn navigate(&mut self, control: Control) -> bool {
        match pagination::resolve(control, self.current_page, self.total_pages()) {
            Some(page) => {
                self.current_page = page;
                true
            }
            None => false,
        }
    }

    fn refilter(&mut self) {
        self.filtered = search::matching_indices(&self.all, &self.query);
        self.current_page = 1;
    }

    pub fn all(&self) -> &[CheatRecord] {
        &self.all
    }

    pub fn filtered(&self) -> impl Iterator<Item = &CheatRecord> + '_ {
        self.filtered.iter().map(move |&i| &self.all[i])
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.filtered.len(), self.page_size)
    }

    pub fn visible(&self) -> impl Iterator<Item = &CheatRecord> + '_ {
        let range = pagination::page_bounds(self.current_page, self.filtered.len(), self.page_size);
        self.filtered[range].iter().map(move |&i| &self.all[i])
    }

    pub fn view(&self) -> PageView<'_> {
        if self.filtered.is_empty() {
            return PageView::NoResults;
        }
        let total_pages = self.total_pages();
        PageView::Page {
            records: self.visible().collect(),
            page: self.current_page,
            total_pages,
            range: pagination::page_bounds(self.current_page, self.filtered.len(), self.page_size),
            total_matches: self.filtered.len(),
            controls: pagination::control_strip(self.current_page, total_pages),
        }
    }
}
