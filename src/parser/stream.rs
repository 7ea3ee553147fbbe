//! Symbol stream with unlimited pushback
//!
//! [`SymbolStream`] puts a LIFO undo buffer in front of a [`SymbolSource`].
//! The source is either the [`Lexer`] itself, scanning inline as the parser
//! pulls, or a [`Pipeline`] whose producer thread scans ahead and hands
//! symbols over a channel. Undo and peek only ever touch the consumer-side
//! buffer, so the producer never sees a symbol twice.

use super::diagnostics::Diagnostics;
use super::lexer::{Lexer, Scanned};
use super::symbol::Symbol;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Anything that can hand out scanned symbols in order.
///
/// Implementations must keep returning an end-of-input symbol once the input
/// is exhausted.
pub trait SymbolSource {
    fn pull(&mut self) -> Scanned;
}

impl SymbolSource for Lexer {
    fn pull(&mut self) -> Scanned {
        self.scan_symbol()
    }
}

/// How the lexer is scheduled relative to the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheduling {
    /// Scan on demand, on the parsing thread.
    #[default]
    Inline,
    /// Scan on a producer thread. `capacity` bounds the handoff channel;
    /// `None` leaves it unbounded.
    Pipelined { capacity: Option<usize> },
}

enum Handoff {
    Bounded(SyncSender<Scanned>),
    Unbounded(mpsc::Sender<Scanned>),
}

impl Handoff {
    /// Deliver one symbol, waiting for room on a bounded channel. Fails once
    /// the consumer hangs up, which also wakes a blocked send.
    fn send(&self, scanned: Scanned) -> bool {
        match self {
            Handoff::Bounded(tx) => tx.send(scanned).is_ok(),
            Handoff::Unbounded(tx) => tx.send(scanned).is_ok(),
        }
    }
}

/// Lexer running on its own thread, feeding symbols through a channel.
pub struct Pipeline {
    rx: Option<Receiver<Scanned>>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    last: Option<Scanned>,
    /// Offset of end of input, for a producer that stopped short of it.
    end: usize,
}

impl Pipeline {
    /// Start scanning `source` on a new producer thread.
    pub fn spawn(source: &str, capacity: Option<usize>) -> io::Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let (handoff, rx) = match capacity {
            Some(bound) => {
                let (tx, rx) = mpsc::sync_channel(bound);
                (Handoff::Bounded(tx), rx)
            }
            None => {
                let (tx, rx) = mpsc::channel();
                (Handoff::Unbounded(tx), rx)
            }
        };

        let lexer = Lexer::new(source);
        let flag = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("symbol-producer".to_string())
            .spawn(move || produce(lexer, handoff, &flag))?;

        tracing::debug!(?capacity, "symbol producer started");
        Ok(Self {
            rx: Some(rx),
            stop,
            handle: Some(handle),
            last: None,
            end: source.len(),
        })
    }

    /// Stop the producer and wait for it to exit. Anything it scanned but
    /// has not delivered is discarded. Safe to call more than once.
    pub fn cancel(&mut self) {
        self.stop.store(true, Ordering::Release);
        // Hanging up wakes a producer blocked on send.
        self.rx.take();

        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("symbol producer panicked");
            } else {
                tracing::debug!("symbol producer joined");
            }
        }
    }
}

fn produce(mut lexer: Lexer, handoff: Handoff, stop: &AtomicBool) {
    loop {
        if stop.load(Ordering::Acquire) {
            tracing::debug!("symbol producer stopped");
            return;
        }
        let scanned = lexer.scan_symbol();
        let done = scanned.symbol.is_eof();
        if !handoff.send(scanned) {
            tracing::debug!("symbol consumer went away");
            return;
        }
        if done {
            tracing::debug!("symbol producer reached end of input");
            return;
        }
    }
}

impl SymbolSource for Pipeline {
    fn pull(&mut self) -> Scanned {
        if let Some(last) = &self.last {
            return Scanned {
                symbol: last.symbol.clone(),
                error: None,
            };
        }

        let received = self.rx.as_ref().and_then(|rx| rx.recv().ok());
        let scanned = match received {
            Some(scanned) => scanned,
            // Producer gone without an end-of-input symbol: cancelled.
            None => Scanned {
                symbol: Symbol::eof(self.end),
                error: None,
            },
        };
        if scanned.symbol.is_eof() {
            self.last = Some(scanned.clone());
        }
        scanned
    }
}

impl Drop for Pipeline {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Pull-based cursor over symbols with unlimited pushback.
pub struct SymbolStream<S> {
    source: S,
    undone: Vec<Symbol>,
    diagnostics: Diagnostics,
}

impl<S: SymbolSource> SymbolStream<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            undone: Vec::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// The most recently undone symbol, or else a fresh one from the source.
    /// A lexical error is recorded the first time its symbol is pulled.
    pub fn next(&mut self) -> Symbol {
        if let Some(symbol) = self.undone.pop() {
            return symbol;
        }
        let Scanned { symbol, error } = self.source.pull();
        if let Some(error) = error {
            self.diagnostics.report(error.offset, error.message);
        }
        symbol
    }

    /// Push `symbol` back; it is the next one `next` returns.
    pub fn undo(&mut self, symbol: Symbol) {
        tracing::trace!(symbol = %symbol.spelling(), depth = self.undone.len() + 1, "undo");
        self.undone.push(symbol);
    }

    /// The symbol `next` would return, without consuming it.
    pub fn peek(&mut self) -> Symbol {
        let symbol = self.next();
        self.undone.push(symbol.clone());
        symbol
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    /// Give up the stream, keeping only what it recorded.
    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::symbol::SymbolKind;

    fn inline(source: &str) -> SymbolStream<Lexer> {
        SymbolStream::new(Lexer::new(source))
    }

    #[test]
    fn test_undo_is_lifo() {
        let mut stream = inline("a b c");
        let s1 = stream.next();
        let s2 = stream.next();
        stream.undo(s1.clone());
        stream.undo(s2.clone());

        assert_eq!(stream.next(), s2);
        assert_eq!(stream.next(), s1);
        assert_eq!(stream.next().lexeme, "c");
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut stream = inline("x + 1");
        assert_eq!(stream.peek().lexeme, "x");
        assert_eq!(stream.peek().lexeme, "x");
        assert_eq!(stream.next().lexeme, "x");
        assert_eq!(stream.next().kind, SymbolKind::Add);
    }

    #[test]
    fn test_exhausted_stream_repeats_eof() {
        let mut stream = inline("1");
        stream.next();
        for _ in 0..3 {
            assert!(stream.next().is_eof());
        }
    }

    #[test]
    fn test_lex_error_recorded_once() {
        let mut stream = inline("$");
        let illegal = stream.peek();
        assert!(illegal.is_illegal());
        assert_eq!(stream.next(), illegal);
        stream.undo(illegal);
        stream.next();

        assert_eq!(stream.diagnostics().len(), 1);
        assert_eq!(stream.diagnostics().first().unwrap().offset, 0);
    }

    #[test]
    fn test_pipelined_matches_inline() {
        let text = "a + b * (c - 'x') @ 0x1F";
        for capacity in [None, Some(0), Some(1), Some(8)] {
            let mut piped = SymbolStream::new(Pipeline::spawn(text, capacity).unwrap());
            let mut local = inline(text);
            loop {
                let expected = local.next();
                assert_eq!(piped.next(), expected, "capacity {:?}", capacity);
                if expected.is_eof() {
                    break;
                }
            }
            assert!(piped.next().is_eof());
            assert_eq!(piped.diagnostics(), local.diagnostics());
        }
    }

    #[test]
    fn test_pipelined_undo_stays_on_consumer_side() {
        let mut stream = SymbolStream::new(Pipeline::spawn("p q", Some(1)).unwrap());
        let p = stream.next();
        stream.undo(p.clone());
        assert_eq!(stream.peek(), p);
        assert_eq!(stream.next(), p);
        assert_eq!(stream.next().lexeme, "q");
    }

    #[test]
    fn test_cancel_stops_blocked_producer() {
        let long = "x ".repeat(10_000);
        let mut pipeline = Pipeline::spawn(&long, Some(1)).unwrap();
        assert_eq!(pipeline.pull().symbol.lexeme, "x");
        pipeline.cancel();
        assert!(pipeline.handle.is_none());
        assert_eq!(pipeline.pull().symbol, Symbol::eof(long.len()));
    }

    #[test]
    fn test_bounded_handoff_waits_for_consumer() {
        let (tx, rx) = mpsc::sync_channel(1);
        let handoff = Handoff::Bounded(tx);
        let sent = thread::spawn(move || {
            ["a", "b", "c"]
                .iter()
                .enumerate()
                .map(|(offset, name)| {
                    handoff.send(Scanned {
                        symbol: Symbol::new(SymbolKind::Ident, *name, offset),
                        error: None,
                    })
                })
                .collect::<Vec<_>>()
        });

        // The channel holds one symbol; the rest wait until they are taken.
        let received: Vec<String> = (0..2)
            .map(|_| rx.recv().unwrap().symbol.lexeme)
            .collect();
        assert_eq!(received, ["a", "b"]);
        assert_eq!(rx.recv().unwrap().symbol.lexeme, "c");
        assert_eq!(sent.join().unwrap(), [true, true, true]);
    }

    #[test]
    fn test_blocked_handoff_fails_when_consumer_hangs_up() {
        let (tx, rx) = mpsc::sync_channel(0);
        let handoff = Handoff::Bounded(tx);
        let sent = thread::spawn(move || {
            handoff.send(Scanned {
                symbol: Symbol::eof(0),
                error: None,
            })
        });
        drop(rx);
        assert!(!sent.join().unwrap());
    }

    #[test]
    fn test_pipelined_parse_drives_producer() {
        let source = "a * (b + 0x2A) -- c";
        let mut stream = SymbolStream::new(Pipeline::spawn(source, Some(1)).unwrap());
        let kinds: Vec<SymbolKind> = std::iter::from_fn(|| {
            let symbol = stream.next();
            (!symbol.is_eof()).then_some(symbol.kind)
        })
        .collect();
        let expected: Vec<SymbolKind> = Lexer::new(source)
            .map(|scanned| scanned.symbol.kind)
            .filter(|kind| *kind != SymbolKind::Eof)
            .collect();
        assert_eq!(kinds, expected);
        assert_eq!(stream.next(), Symbol::eof(source.len()));
    }
}
