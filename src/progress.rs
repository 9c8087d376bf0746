//! Progress relay: an identity decorator over any iterator that reports
//! per-item progress into an injectable sink.
//!
//! Two modes, matching two honesty levels:
//!
//! - **exact**: the input is materialized first so the total is known, and
//!   each item carries an accurate completion percentage. Trades memory
//!   (and laziness) for precision.
//! - **tick**: fully lazy; a cyclic glyph and a running item counter, no
//!   percentage.
//!
//! Either way the relay forwards every item unchanged, in order, exactly
//! once.

/// Palette cycled by the tick mode, one glyph per item.
pub const TICK_GLYPHS: [&str; 12] = [
    "🕛", "🕐", "🕑", "🕒", "🕓", "🕔", "🕕", "🕖", "🕗", "🕘", "🕙", "🕚",
];

/// One progress signal. `total` is known only in exact mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressUpdate {
    /// Emitted once, before the first item.
    Started { total: Option<usize> },
    /// Emitted per item, after the item is pulled and before it is
    /// handed to the consumer.
    Item { index: usize, total: Option<usize> },
}

/// Receiver for progress signals. Injected so the relay has no hidden
/// console state and tests can capture updates directly.
pub trait ProgressSink {
    fn update(&mut self, update: &ProgressUpdate);
}

/// Sink rendering to the terminal on stderr: a bold green header, then a
/// `\r`-rewritten bar with percentage (exact mode) or glyph-plus-counter
/// (tick mode). Stderr keeps the chatter out of piped item output.
pub struct ConsoleSink {
    term: console::Term,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            term: console::Term::stderr(),
        }
    }

    fn quarter_columns(&self) -> usize {
        self.term
            .size_checked()
            .map(|(_, columns)| columns as usize / 4)
            .unwrap_or(64)
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for ConsoleSink {
    fn update(&mut self, update: &ProgressUpdate) {
        let line = match update {
            ProgressUpdate::Started { total: Some(_) } => {
                format!(
                    "{}\n",
                    console::style("Processing, please wait.").green().bold()
                )
            }
            ProgressUpdate::Started { total: None } => return,
            ProgressUpdate::Item {
                index,
                total: Some(total),
            } => {
                let percentage = (index + 1) * 100 / total.max(&1);
                let columns = percentage * self.quarter_columns() / 100;
                format!("\r {} {percentage}%", "🟦".repeat(columns))
            }
            ProgressUpdate::Item { index, total: None } => {
                let glyph = TICK_GLYPHS[index % TICK_GLYPHS.len()];
                format!("\r {glyph}  Processed {} items.", index + 1)
            }
        };

        // terminal write failures are not the relayed sequence's problem
        let _ = self.term.write_str(&line);
    }
}

enum Feed<I: Iterator> {
    Lazy(I),
    Buffered(std::vec::IntoIter<I::Item>, usize),
}

/// The relay itself: forwards items while signalling the sink.
pub struct Progress<I: Iterator, S: ProgressSink> {
    feed: Feed<I>,
    index: usize,
    started: bool,
    sink: S,
}

impl<I: Iterator, S: ProgressSink> Progress<I, S> {
    fn total(&self) -> Option<usize> {
        match &self.feed {
            Feed::Lazy(_) => None,
            Feed::Buffered(_, total) => Some(*total),
        }
    }
}

impl<I: Iterator, S: ProgressSink> Iterator for Progress<I, S> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if !self.started {
            self.started = true;
            self.sink.update(&ProgressUpdate::Started {
                total: self.total(),
            });
        }

        let item = match &mut self.feed {
            Feed::Lazy(iter) => iter.next(),
            Feed::Buffered(iter, _) => iter.next(),
        }?;

        self.sink.update(&ProgressUpdate::Item {
            index: self.index,
            total: self.total(),
        });
        self.index += 1;

        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.feed {
            Feed::Lazy(iter) => iter.size_hint(),
            Feed::Buffered(iter, _) => iter.size_hint(),
        }
    }
}

/// Wrap `iter` in a progress relay rendering to the console.
///
/// `exact` selects the precise mode: the input is fully materialized up
/// front (forcing eager evaluation) so a percentage can be computed.
/// Non-exact stays lazy and only ticks.
pub fn progress<I>(iter: I, exact: bool) -> Progress<I::IntoIter, ConsoleSink>
where
    I: IntoIterator,
{
    progress_with_sink(iter, exact, ConsoleSink::new())
}

/// Like [`progress`] with a caller-supplied sink.
pub fn progress_with_sink<I, S>(iter: I, exact: bool, sink: S) -> Progress<I::IntoIter, S>
where
    I: IntoIterator,
    S: ProgressSink,
{
    let feed = if exact {
        let items: Vec<I::Item> = iter.into_iter().collect();
        let total = items.len();
        Feed::Buffered(items.into_iter(), total)
    } else {
        Feed::Lazy(iter.into_iter())
    };

    Progress {
        feed,
        index: 0,
        started: false,
        sink,
    }
}
