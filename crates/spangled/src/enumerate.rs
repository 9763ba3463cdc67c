//! Enumerate every star arrangement for a given number of stars.
//!
//! Long rows are walked `a = 1, 2, ...` and row lengths `b = 1, 2, ...` until
//! `a*b` passes the star count. For each `(a, b)` the candidates are the plain
//! grid when `a*b` is exactly the star count, otherwise the interleavings with
//! `c` short rows in `{a-1, a, a+1}` of `d` stars in `{b-1}`, plus `d = b` when
//! `c = a-1`.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use tracing::trace;

use crate::arrangement::{Arrangement, ArrangementKind, Taxonomy};

/// Lazy, finite sequence of arrangements for one star count.
///
/// A clone continues from the same position. Build a new one with
/// [`StarLayouts::new`] to start over.
#[derive(Debug, Clone)]
pub struct StarLayouts {
    nstars: u32,
    kinds: Option<Vec<ArrangementKind>>,
    taxonomy: Taxonomy,
    include_cubes: bool,
    a: u32,
    b: u32,
    pending: VecDeque<Arrangement>,
    exhausted: bool,
}

impl StarLayouts {
    /// All arrangements of `nstars` stars, every kind accepted.
    pub fn new(nstars: u32) -> Self {
        Self {
            nstars,
            kinds: None,
            taxonomy: Taxonomy::Extended,
            include_cubes: false,
            a: 1,
            b: 0,
            pending: VecDeque::new(),
            exhausted: nstars == 0,
        }
    }

    /// Only yield arrangements classified as one of `kinds`.
    pub fn with_kinds(mut self, kinds: &[ArrangementKind]) -> Self {
        self.kinds = Some(kinds.to_vec());
        self
    }

    /// Classify candidates for the kind filter under `taxonomy`.
    pub fn with_taxonomy(mut self, taxonomy: Taxonomy) -> Self {
        self.taxonomy = taxonomy;
        self
    }

    /// Also admit `d = b` when `c = a`, which is how cubes are built.
    pub fn with_cubes(mut self, include_cubes: bool) -> Self {
        self.include_cubes = include_cubes;
        self
    }

    /// The star count being enumerated.
    pub fn nstars(&self) -> u32 {
        self.nstars
    }

    fn accepts(&self, layout: Arrangement) -> bool {
        match &self.kinds {
            None => true,
            Some(kinds) => self
                .taxonomy
                .classify(layout)
                .is_ok_and(|kind| kinds.contains(&kind)),
        }
    }

    /// Step to the next `(a, b)` with `a*b <= nstars` and queue its accepted
    /// candidates. Returns `false` once every pair has been visited.
    fn advance(&mut self) -> bool {
        let nstars = u64::from(self.nstars);

        self.b += 1;
        if u64::from(self.a) * u64::from(self.b) > nstars {
            self.a += 1;
            self.b = 1;
            if u64::from(self.a) > nstars {
                return false;
            }
        }

        let (a, b) = (self.a, self.b);
        let long_stars = u64::from(a) * u64::from(b);

        // A grid takes precedence over interleavings of the same rows.
        if long_stars == nstars {
            let grid = Arrangement::grid(a, b);
            if self.accepts(grid) {
                self.pending.push_back(grid);
            }
            return true;
        }

        for c in [a.checked_sub(1), Some(a), a.checked_add(1)].into_iter().flatten() {
            if c == 0 {
                continue;
            }
            let full_short_rows = a.checked_sub(1) == Some(c) || (self.include_cubes && c == a);
            let lengths = [Some(b - 1), full_short_rows.then_some(b)];
            for d in lengths.into_iter().flatten() {
                if d == 0 || long_stars + u64::from(c) * u64::from(d) != nstars {
                    continue;
                }
                let layout = Arrangement::new(a, b, c, d);
                if self.accepts(layout) {
                    self.pending.push_back(layout);
                }
            }
        }
        true
    }
}

impl Iterator for StarLayouts {
    type Item = Arrangement;

    fn next(&mut self) -> Option<Arrangement> {
        loop {
            if let Some(layout) = self.pending.pop_front() {
                trace!(%layout, nstars = self.nstars, "candidate layout");
                return Some(layout);
            }
            if self.exhausted {
                return None;
            }
            if !self.advance() {
                self.exhausted = true;
            }
        }
    }
}

impl FusedIterator for StarLayouts {}

/// Every arrangement of `nstars` stars, optionally restricted to `kinds`.
///
/// The sequence is empty for zero stars.
pub fn generate_star_layouts(nstars: u32, kinds: Option<&[ArrangementKind]>) -> StarLayouts {
    let layouts = StarLayouts::new(nstars);
    match kinds {
        Some(kinds) => layouts.with_kinds(kinds),
        None => layouts,
    }
}
