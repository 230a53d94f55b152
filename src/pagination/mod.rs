use std::ops::{Range, RangeInclusive};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_BUTTONS: usize = 3;

pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Clamps `page` into `[1, max(1, total)]`.
pub fn clamp_page(page: usize, total: usize) -> usize {
    page.clamp(1, total.max(1))
}

/// Index range of the slice shown on `page` (1-based).
pub fn page_bounds(page: usize, count: usize, page_size: usize) -> Range<usize> {
    let start = page.saturating_sub(1).saturating_mul(page_size).min(count);
    let end = start.saturating_add(page_size).min(count);
    start..end
}

/// Numbered buttons around `current`, at most three wide.
pub fn page_window(current: usize, total: usize) -> RangeInclusive<usize> {
    let span = MAX_PAGE_BUTTONS - 1;
    let mut start = current.saturating_sub(1).max(1);
    let end = total.min(start + span);
    if end.saturating_sub(start) < span {
        start = end.saturating_sub(span).max(1);
    }
    start..=end
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Previous,
    Page(usize),
    Next,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Button {
    pub control: Control,
    pub label: String,
    pub enabled: bool,
    pub active: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ControlStrip {
    pub buttons: Vec<Button>,
}

impl ControlStrip {
    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    pub fn page_numbers(&self) -> Vec<usize> {
        self.buttons
            .iter()
            .filter_map(|b| match b.control {
                Control::Page(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    pub fn button(&self, control: Control) -> Option<&Button> {
        self.buttons.iter().find(|b| b.control == control)
    }
}

pub fn control_strip(current: usize, total: usize) -> ControlStrip {
    if total <= 1 {
        return ControlStrip::default();
    }

    let mut buttons = Vec::with_capacity(MAX_PAGE_BUTTONS + 2);
    buttons.push(Button {
        control: Control::Previous,
        label: "Previous".to_string(),
        enabled: current > 1,
        active: false,
    });
    for n in page_window(current, total) {
        buttons.push(Button {
            control: Control::Page(n),
            label: n.to_string(),
            enabled: n != current,
            active: n == current,
        });
    }
    buttons.push(Button {
        control: Control::Next,
        label: "Next".to_string(),
        enabled: current < total,
        active: false,
    });
    ControlStrip { buttons }
}

/// Page that activating `control` leads to, or `None` when that control
/// would be disabled in the strip for `current`/`total`.
pub fn resolve(control: Control, current: usize, total: usize) -> Option<usize> {
    match control {
        Control::Previous if current > 1 => Some(current - 1),
        Control::Next if current < total => Some(current + 1),
        Control::Page(n) if (1..=total).contains(&n) && n != current => Some(n),
        _ => None,
    }
}
