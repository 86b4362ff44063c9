//! Explicit timing and throughput instrumentation.
//!
//! A [`Profiler`] is a plain value owned by the caller. Parsing with
//! [`crate::parse_profiled`] opens one block per parsed value, so the report
//! shows how much time went into the recursive descent itself.
//!
//! ```rust
//! use strict_json::{parse_profiled, profile::Profiler};
//!
//! let profiler = Profiler::new();
//! let value = parse_profiled(r#"{"pairs": [1, 2, 3]}"#, &profiler).unwrap();
//!
//! assert!(value.is_object());
//!
//! let report = profiler.report();
//! assert!(report.anchor("parse_value").is_some());
//! ```

use std::{
    cell::RefCell,
    collections::HashMap,
    fmt::Display,
    time::{Duration, Instant},
};

/// Accumulated measurements for one named region.
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
    pub name: &'static str,
    pub hits: u64,
    pub bytes: u64,
    // Wrapping: a parent is charged its children's time before its own lands.
    exclusive_nanos: u64,
    inclusive: Duration,
}

impl Anchor {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            hits: 0,
            bytes: 0,
            exclusive_nanos: 0,
            inclusive: Duration::ZERO,
        }
    }

    /// Time spent in the region itself, children excluded.
    pub fn exclusive(&self) -> Duration {
        Duration::from_nanos(self.exclusive_nanos)
    }

    /// Time spent in the region including children. Recursive entries are
    /// only counted once.
    pub fn inclusive(&self) -> Duration {
        self.inclusive
    }
}

#[derive(Debug, Default)]
struct State {
    anchors: Vec<Anchor>,
    by_name: HashMap<&'static str, usize>,
    parent: Option<usize>,
}

impl State {
    fn anchor_index(&mut self, name: &'static str) -> usize {
        if let Some(index) = self.by_name.get(name) {
            return *index;
        }

        let index = self.anchors.len();
        self.anchors.push(Anchor::new(name));
        self.by_name.insert(name, index);

        index
    }
}

/// Collects named timing regions.
///
/// Not `Sync`: one profiler belongs to one thread.
#[derive(Debug)]
pub struct Profiler {
    started: Instant,
    state: RefCell<State>,
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Profiler {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            state: RefCell::new(State::default()),
        }
    }

    /// Opens a timed region that closes when the returned guard is dropped.
    pub fn block(&self, name: &'static str) -> Block<'_> {
        self.open(name, 0)
    }

    /// Like [`Profiler::block`], also counting `bytes` as processed.
    pub fn bandwidth(&self, name: &'static str, bytes: u64) -> Block<'_> {
        self.open(name, bytes)
    }

    fn open(&self, name: &'static str, bytes: u64) -> Block<'_> {
        let mut state = self.state.borrow_mut();

        let anchor = state.anchor_index(name);
        state.anchors[anchor].bytes += bytes;

        let old_inclusive = state.anchors[anchor].inclusive;
        let parent = state.parent.replace(anchor);

        Block {
            profiler: self,
            anchor,
            parent,
            old_inclusive,
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Snapshot of every region hit so far, most expensive first.
    pub fn report(&self) -> Report {
        let state = self.state.borrow();

        let mut anchors: Vec<Anchor> = state
            .anchors
            .iter()
            .filter(|anchor| anchor.hits > 0)
            .cloned()
            .collect();
        anchors.sort_by(|a, b| b.exclusive_nanos.cmp(&a.exclusive_nanos));

        Report {
            total: self.elapsed(),
            anchors,
        }
    }
}

/// Guard for an open region.
#[must_use = "the region closes as soon as the guard is dropped"]
pub struct Block<'p> {
    profiler: &'p Profiler,
    anchor: usize,
    parent: Option<usize>,
    old_inclusive: Duration,
    start: Instant,
}

impl Block<'_> {
    /// Counts `bytes` against this region once the amount is known.
    pub fn add_bytes(&self, bytes: u64) {
        self.profiler.state.borrow_mut().anchors[self.anchor].bytes += bytes;
    }
}

impl Drop for Block<'_> {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        let nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);

        let mut state = self.profiler.state.borrow_mut();
        state.parent = self.parent;

        if let Some(parent) = self.parent {
            let parent = &mut state.anchors[parent];
            parent.exclusive_nanos = parent.exclusive_nanos.wrapping_sub(nanos);
        }

        let anchor = &mut state.anchors[self.anchor];
        anchor.exclusive_nanos = anchor.exclusive_nanos.wrapping_add(nanos);
        anchor.inclusive = self.old_inclusive + elapsed;
        anchor.hits += 1;
    }
}

#[derive(Debug, Clone)]
pub struct Report {
    pub total: Duration,
    pub anchors: Vec<Anchor>,
}

impl Report {
    pub fn anchor(&self, name: &str) -> Option<&Anchor> {
        self.anchors.iter().find(|anchor| anchor.name == name)
    }

    fn percent_of_total(&self, duration: Duration) -> f64 {
        if self.total.is_zero() {
            return 0.0;
        }

        100.0 * duration.as_secs_f64() / self.total.as_secs_f64()
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Total time: {:.4}ms\n",
            self.total.as_secs_f64() * 1000.0
        )?;
        writeln!(
            f,
            "{:<20}{:>8}{:>12}{:>12}{:>12}",
            "Function", "Calls", "Time(ms)", "Self(%)", "Total(%)"
        )?;
        writeln!(f, "{}", "-".repeat(64))?;

        for anchor in &self.anchors {
            let exclusive = anchor.exclusive();
            let total = if anchor.inclusive != exclusive {
                format!("{:.4}%", self.percent_of_total(anchor.inclusive))
            } else {
                String::from("-")
            };

            write!(
                f,
                "{:<20}{:>8}{:>12.4}{:>11.4}%{:>12}",
                anchor.name,
                anchor.hits,
                exclusive.as_secs_f64() * 1000.0,
                self.percent_of_total(exclusive),
                total
            )?;

            if anchor.bytes > 0 && !anchor.inclusive.is_zero() {
                let megabytes = anchor.bytes as f64 / (1024.0 * 1024.0);
                write!(
                    f,
                    "  {:.3}MB at {:.2}MB/s",
                    megabytes,
                    megabytes / anchor.inclusive.as_secs_f64()
                )?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}
