// SPDX-FileCopyrightText: 2025 - 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

use itertools::Itertools;
use std::collections::HashMap;
use std::fmt;

const PAGE_SIZE: usize = 512;
const PAGE_MASK: i64 = 0x1ff;

type Page = [i64; PAGE_SIZE];

static BLANK_PAGE: Page = [0; PAGE_SIZE];

macro_rules! page_offset {
    ($addr: expr) => {{
        #[allow(clippy::cast_sign_loss, reason = "masked down anyway")]
        {
            ($addr & PAGE_MASK) as usize
        }
    }};
}

macro_rules! page_base {
    ($addr: expr) => {{ $addr & !PAGE_MASK }};
}

/// Sparse memory for a single interpreter, split into 512-cell pages which are only allocated
/// once something writes to them.
///
/// Addresses are never negative by the time they reach this type. The interpreter checks them
/// first.
pub(crate) struct Memory {
    pages: HashMap<i64, Box<Page>>,
}

impl Memory {
    fn is_blank(page: &Page) -> bool {
        page == &BLANK_PAGE
    }

    /// Base addresses of every page that holds at least one non-zero cell
    fn live_pages(&self) -> impl Iterator<Item = i64> + '_ {
        self.pages
            .iter()
            .filter(|(_, page)| !Self::is_blank(page))
            .map(|(&base, _)| base)
    }

    /// Drop every page that only holds zeros
    pub(crate) fn prune(&mut self) {
        self.pages.retain(|_, page| !Self::is_blank(page));
        self.pages.shrink_to_fit();
    }

    /// Read the cell at `addr`. Untouched cells read as zero.
    pub(crate) fn get(&self, addr: i64) -> i64 {
        debug_assert!(addr >= 0, "negative address {addr} reached memory");
        self.pages
            .get(&page_base!(addr))
            .map_or(0, |page| page[page_offset!(addr)])
    }

    /// Number of cells from address 0 up to the end of the highest non-zero cell
    pub(crate) fn extent(&self) -> usize {
        let Some(top) = self.live_pages().max() else {
            return 0;
        };
        let page = &self.pages[&top];
        let used = page.iter().rposition(|&cell| cell != 0).map_or(0, |i| i + 1);
        #[allow(
            clippy::cast_sign_loss,
            clippy::cast_possible_truncation,
            reason = "page bases are never negative"
        )]
        {
            top as usize + used
        }
    }

    /// Copy out the cells `0..extent()`
    pub(crate) fn dump(&self) -> Vec<i64> {
        let extent = self.extent();
        let mut cells = Vec::with_capacity(extent);
        for base in (0..extent).step_by(PAGE_SIZE) {
            #[allow(clippy::cast_possible_wrap, reason = "extent fits in an i64 address")]
            let page = self
                .pages
                .get(&(base as i64))
                .map_or(&BLANK_PAGE, |page| page.as_ref());
            let take = (extent - base).min(PAGE_SIZE);
            cells.extend_from_slice(&page[..take]);
        }
        cells
    }
}

impl std::ops::Index<i64> for Memory {
    type Output = i64;
    fn index(&self, addr: i64) -> &i64 {
        debug_assert!(addr >= 0, "negative address {addr} reached memory");
        self.pages
            .get(&page_base!(addr))
            .map_or(&0, |page| &page[page_offset!(addr)])
    }
}

impl std::ops::IndexMut<i64> for Memory {
    fn index_mut(&mut self, addr: i64) -> &mut i64 {
        debug_assert!(addr >= 0, "negative address {addr} reached memory");
        &mut self
            .pages
            .entry(page_base!(addr))
            .or_insert_with(|| Box::new([0; PAGE_SIZE]))[page_offset!(addr)]
    }
}

impl PartialEq for Memory {
    fn eq(&self, other: &Self) -> bool {
        let mut ours: Vec<i64> = self.live_pages().collect();
        let mut theirs: Vec<i64> = other.live_pages().collect();
        ours.sort_unstable();
        theirs.sort_unstable();
        ours == theirs && ours.iter().all(|base| self.pages[base] == other.pages[base])
    }
}

impl FromIterator<i64> for Memory {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut pages = HashMap::with_capacity(iter.size_hint().0.div_ceil(PAGE_SIZE));

        for (base, chunk) in (0..).step_by(PAGE_SIZE).zip(&iter.chunks(PAGE_SIZE)) {
            let page = chunk
                .chain(std::iter::repeat(0))
                .take(PAGE_SIZE)
                .collect_array::<PAGE_SIZE>()
                .expect("padded to exactly one page");
            pages.insert(base, Box::new(page));
        }

        Self { pages }
    }
}

impl Clone for Memory {
    fn clone(&self) -> Self {
        let pages = self
            .pages
            .iter()
            .filter(|(_, page)| !Self::is_blank(page))
            .map(|(&base, page)| (base, page.clone()))
            .collect();
        Self { pages }
    }
}

impl fmt::Debug for Memory {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = fmt.debug_map();
        for base in self.live_pages().sorted_unstable() {
            map.entry(
                &format_args!("{{ page 0x{base:04x} }}"),
                &format_args!("{:?}", self.pages[&base]),
            );
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_cells_read_zero() {
        let mem: Memory = [1, 2, 3].into_iter().collect();
        assert_eq!(mem[1], 2);
        assert_eq!(mem[3], 0);
        assert_eq!(mem.get(1_000_000), 0);
        assert_eq!(mem.pages.len(), 1);
    }

    #[test]
    fn writes_allocate_pages_on_demand() {
        let mut mem: Memory = [99].into_iter().collect();
        mem[5000] = 7;
        assert_eq!(mem.get(5000), 7);
        assert_eq!(mem.pages.len(), 2);
        assert_eq!(mem.extent(), 5001);
    }

    #[test]
    fn blank_pages_do_not_affect_equality() {
        let a: Memory = [1, 0, 3].into_iter().collect();
        let mut b = a.clone();
        b[2048] = 4;
        assert_ne!(a, b);
        b[2048] = 0;
        assert_eq!(a, b);
        b.prune();
        assert_eq!(b.pages.len(), 1);
    }

    #[test]
    fn dump_spans_pages() {
        let mut mem: Memory = (1..=3).collect();
        mem[600] = 9;
        let dumped = mem.dump();
        assert_eq!(dumped.len(), 601);
        assert_eq!(&dumped[..4], &[1, 2, 3, 0]);
        assert_eq!(dumped[600], 9);
        assert!(dumped[3..600].iter().all(|&c| c == 0));
    }
}
