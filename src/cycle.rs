use log::trace;

use crate::input::Source;

/// Endless view over a source: starts over from the first value once the
/// source runs out.
#[derive(Debug)]
pub struct Cycle<'a> {
    state: State<'a>,
}

enum State<'a> {
    Replay {
        values: Vec<i64>,
        cursor: usize,
    },
    Stream {
        values: Box<dyn Iterator<Item = i64> + 'a>,
        seen: Vec<i64>,
    },
    // reports itself as never ending, so nothing is kept for replay
    Endless(Box<dyn Iterator<Item = i64> + 'a>),
}

impl std::fmt::Debug for State<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            State::Replay { values, cursor } => f
                .debug_struct("Replay")
                .field("len", &values.len())
                .field("cursor", cursor)
                .finish(),
            State::Stream { seen, .. } => f
                .debug_struct("Stream")
                .field("seen", &seen.len())
                .finish(),
            State::Endless(_) => f.write_str("Endless"),
        }
    }
}

impl<'a> Cycle<'a> {
    pub fn new(source: Source<'a>) -> Self {
        let state = match source {
            Source::Finite(values) => State::Replay { values, cursor: 0 },
            Source::Stream(values) if values.size_hint().0 == usize::MAX => {
                State::Endless(values)
            }
            Source::Stream(values) => State::Stream {
                values,
                seen: Vec::new(),
            },
        };
        Cycle { state }
    }

    // a cycle over nothing never yields
    pub fn is_empty(&self) -> bool {
        matches!(&self.state, State::Replay { values, .. } if values.is_empty())
    }

    #[cfg(test)]
    fn buffered(&self) -> usize {
        match &self.state {
            State::Replay { values, .. } => values.len(),
            State::Stream { seen, .. } => seen.len(),
            State::Endless(_) => 0,
        }
    }
}

impl Iterator for Cycle<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        match &mut self.state {
            State::Replay { values, cursor } => {
                let value = *values.get(*cursor)?;
                *cursor = (*cursor + 1) % values.len();
                Some(value)
            }
            State::Stream { values, seen } => {
                if let Some(value) = values.next() {
                    seen.push(value);
                    return Some(value);
                }

                // stream ran out, replay what it gave us
                trace!("stream exhausted after {} values, replaying", seen.len());
                let values = std::mem::take(seen);
                let first = values.first().copied();
                let cursor = if values.len() > 1 { 1 } else { 0 };
                self.state = State::Replay { values, cursor };
                first
            }
            State::Endless(values) => {
                let value = values.next();
                if value.is_none() {
                    // lied about being endless, nothing to replay
                    trace!("endless stream ended");
                    self.state = State::Replay {
                        values: Vec::new(),
                        cursor: 0,
                    };
                }
                value
            }
        }
    }
}

impl std::iter::FusedIterator for Cycle<'_> {}

#[test]
fn cycle_finite_test() {
    let cycle = Cycle::new(Source::Finite(vec![1, 2, 3]));
    assert_eq!(cycle.take(7).collect::<Vec<_>>(), vec![1, 2, 3, 1, 2, 3, 1]);
}

#[test]
fn cycle_single_value_test() {
    let cycle = Cycle::new(Source::Finite(vec![9]));
    assert_eq!(cycle.take(3).collect::<Vec<_>>(), vec![9, 9, 9]);
}

#[test]
fn cycle_empty_test() {
    let mut cycle = Cycle::new(Source::Finite(Vec::new()));
    assert!(cycle.is_empty());
    assert_eq!(cycle.next(), None);
    assert_eq!(cycle.next(), None);
}

#[test]
fn cycle_replays_finite_stream_test() {
    let cycle = Cycle::new(Source::Stream(Box::new(vec![4_i64, 5].into_iter())));
    assert_eq!(cycle.take(5).collect::<Vec<_>>(), vec![4, 5, 4, 5, 4]);
}

#[test]
fn cycle_replays_single_value_stream_test() {
    let cycle = Cycle::new(Source::Stream(Box::new(std::iter::once(8_i64))));
    assert_eq!(cycle.take(3).collect::<Vec<_>>(), vec![8, 8, 8]);
}

#[test]
fn cycle_empty_stream_test() {
    let mut cycle = Cycle::new(Source::Stream(Box::new(std::iter::empty::<i64>())));
    assert_eq!(cycle.next(), None);
    assert!(cycle.is_empty());
    assert_eq!(cycle.next(), None);
}

#[test]
fn cycle_infinite_stream_test() {
    let cycle = Cycle::new(Source::Stream(Box::new(0_i64..)));
    assert_eq!(cycle.skip(1000).next(), Some(1000));
}

#[test]
fn cycle_infinite_stream_keeps_nothing_test() {
    let mut cycle = Cycle::new(Source::Stream(Box::new(std::iter::repeat(0x31_i64))));
    for _ in 0..1_000_000 {
        assert_eq!(cycle.next(), Some(0x31));
    }
    assert_eq!(cycle.buffered(), 0);
}

#[test]
fn cycle_finite_stream_is_buffered_test() {
    let values = vec![1_i64, 2, 3].into_iter().filter(|v| *v != 2);
    let mut cycle = Cycle::new(Source::Stream(Box::new(values)));
    assert_eq!(cycle.next(), Some(1));
    assert_eq!(cycle.buffered(), 1);
    assert_eq!(cycle.by_ref().take(4).collect::<Vec<_>>(), vec![3, 1, 3, 1]);
    assert_eq!(cycle.buffered(), 2);
}
