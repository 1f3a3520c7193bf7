//! Pager - page size and current page over the record list.
//!
//! Page changes are reported to registered callbacks, the way the grid hooks
//! "reset the edit session" onto navigation.

use std::cell::{Cell, RefCell};
use std::ops::Range;
use std::rc::Rc;

use spark_signals::{signal, Signal};

/// Called with the new page index after every page change.
pub type PageChangeCallback = Box<dyn Fn(usize)>;

/// Paging state. Cloning shares the signal and callbacks.
#[derive(Clone)]
pub struct Pager {
    page_size: usize,
    current: Signal<usize>,
    callbacks: Rc<RefCell<Vec<(usize, PageChangeCallback)>>>,
    next_id: Rc<Cell<usize>>,
}

impl Pager {
    /// Create a pager on page 0. A zero page size is treated as 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current: signal(0),
            callbacks: Rc::new(RefCell::new(Vec::new())),
            next_id: Rc::new(Cell::new(0)),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current(&self) -> usize {
        self.current.get()
    }

    /// Number of pages for `total` rows. Always at least 1.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// Row range of the current page, clamped to `total`.
    pub fn range(&self, total: usize) -> Range<usize> {
        let page = self.current().min(self.page_count(total) - 1);
        let start = page * self.page_size;
        start.min(total)..(start + self.page_size).min(total)
    }

    /// Go to `page`, clamped to the last page for `total` rows.
    ///
    /// Callbacks fire on every navigation request, even when the page index
    /// does not move. Returns the resulting page.
    pub fn set_page(&self, page: usize, total: usize) -> usize {
        let page = page.min(self.page_count(total) - 1);
        if page != self.current() {
            self.current.set(page);
        }
        for (_, callback) in self.callbacks.borrow().iter() {
            callback(page);
        }
        page
    }

    pub fn next(&self, total: usize) -> usize {
        self.set_page(self.current() + 1, total)
    }

    pub fn prev(&self, total: usize) -> usize {
        self.set_page(self.current().saturating_sub(1), total)
    }

    /// Pull the current page back inside range after rows were removed.
    /// Does not fire callbacks.
    pub fn clamp(&self, total: usize) {
        let last = self.page_count(total) - 1;
        if self.current() > last {
            self.current.set(last);
        }
    }

    /// Register a page-change callback. Returns cleanup function.
    pub fn on_change<F>(&self, callback: F) -> impl FnOnce() + use<F>
    where
        F: Fn(usize) + 'static,
    {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.callbacks.borrow_mut().push((id, Box::new(callback)));

        let callbacks = self.callbacks.clone();
        move || {
            callbacks.borrow_mut().retain(|(cb_id, _)| *cb_id != id);
        }
    }
}
