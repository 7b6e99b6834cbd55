// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Stateful decoder for terminal input bytes. See [`StatefulInputDecoder`] docs.

use super::{ByteAccumulator, Clock, DEBUG_TTY_INPUT_SHOW_DECODER, EscDisambiguator,
            EscState, EscTimerId, SystemClock};
use crate::{DecodeStep, PendingIntroducer, SequenceTable, TtyInputConfig, TtyInputEvent,
            try_decode_event};
use std::collections::VecDeque;
use tokio::time::Instant;

/// Stateful decoder for terminal input bytes.
///
/// Accumulates bytes across [`feed()`] calls, decodes every complete event they contain,
/// and queues the events for the caller to drain through [`Iterator`]. A buffer holding
/// only `ESC` (or `ESC ESC`) arms the escape deadline instead of producing anything:
///
/// - More bytes arrive first: the deadline is cancelled and the introducer is decoded
///   together with them (a key sequence, an Alt chord, or a doubled-introducer form).
/// - The deadline passes first: [`poll_deadline()`] (or [`fire_timer()`] with the armed
///   id) emits a standalone `escape`.
///
/// The decoder never blocks and never sleeps. Whoever drives it (the async loop in
/// [`TtyInput::run`], or a test) decides when to call [`poll_deadline()`] using
/// [`next_deadline()`].
///
/// [`feed()`]: Self::feed
/// [`poll_deadline()`]: Self::poll_deadline
/// [`fire_timer()`]: Self::fire_timer
/// [`next_deadline()`]: Self::next_deadline
/// [`TtyInput::run`]: crate::TtyInput::run
#[derive(Debug)]
pub struct StatefulInputDecoder<C: Clock = SystemClock> {
    accumulator: ByteAccumulator,
    esc: EscDisambiguator,
    table: &'static SequenceTable,
    clock: C,
    /// Decoded events waiting to be drained.
    internal_events: VecDeque<TtyInputEvent>,
    discarded_byte_count: usize,
    is_shut_down: bool,
}

impl Default for StatefulInputDecoder<SystemClock> {
    fn default() -> Self { Self::new(&TtyInputConfig::default()) }
}

impl StatefulInputDecoder<SystemClock> {
    #[must_use]
    pub fn new(config: &TtyInputConfig) -> Self { Self::with_clock(config, SystemClock) }
}

impl<C: Clock> StatefulInputDecoder<C> {
    #[must_use]
    pub fn with_clock(config: &TtyInputConfig, clock: C) -> Self {
        Self {
            accumulator: ByteAccumulator::new(),
            esc: EscDisambiguator::new(config.esc_key_timeout),
            table: SequenceTable::global(),
            clock,
            internal_events: VecDeque::with_capacity(16),
            discarded_byte_count: 0,
            is_shut_down: false,
        }
    }

    /// Append a chunk of input and decode every complete event in the buffer.
    ///
    /// Text and byte inputs are treated the same (`&str`, `String`, `&[u8]`,
    /// `Vec<u8>`). A chunk may split a sequence or a character anywhere.
    pub fn feed(&mut self, chunk: impl AsRef<[u8]>) {
        let chunk = chunk.as_ref();
        if chunk.is_empty() || self.is_shut_down {
            return;
        }

        // A deadline that already passed resolves before the new bytes are looked at.
        self.poll_deadline();
        self.esc.cancel();

        self.accumulator.append(chunk);
        self.decode_available();
    }

    /// Emit the standalone escape if the armed deadline has passed. Returns `true` if
    /// an event was queued.
    pub fn poll_deadline(&mut self) -> bool {
        let now = self.clock.now();
        match self.esc.poll_expired(now) {
            Some(pending) => self.resolve_pending_introducer(pending),
            None => false,
        }
    }

    /// A scheduled timer went off. A stale or cancelled `timer` is ignored, as is one
    /// that fires early according to this decoder's clock. Returns `true` if an event
    /// was queued.
    pub fn fire_timer(&mut self, timer: EscTimerId) -> bool {
        let now = self.clock.now();
        match self.esc.fire(timer, now) {
            Some(pending) => self.resolve_pending_introducer(pending),
            None => false,
        }
    }

    /// When [`poll_deadline()`](Self::poll_deadline) should next be called, if at all.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> { self.esc.deadline() }

    /// Id of the currently armed escape timer, for external schedulers.
    #[must_use]
    pub fn armed_timer(&self) -> Option<EscTimerId> { self.esc.armed_timer() }

    #[must_use]
    pub fn esc_state(&self) -> EscState { self.esc.state() }

    /// Bytes received but not yet part of an event.
    #[must_use]
    pub fn pending_bytes(&self) -> &[u8] { self.accumulator.unconsumed() }

    /// Total bytes dropped as unrecognized or malformed since creation.
    #[must_use]
    pub fn discarded_byte_count(&self) -> usize { self.discarded_byte_count }

    #[must_use]
    pub fn is_shut_down(&self) -> bool { self.is_shut_down }

    /// Cancel any armed deadline and stop accepting input. Already queued events can
    /// still be drained. Idempotent.
    pub fn shutdown(&mut self) {
        if self.is_shut_down {
            return;
        }
        self.is_shut_down = true;
        let had_timer = self.esc.shutdown();
        let dropped = self.accumulator.clear();
        self.discarded_byte_count += dropped;

        DEBUG_TTY_INPUT_SHOW_DECODER.then(|| {
            tracing::debug!(
                message = "StatefulInputDecoder: shutdown",
                had_timer = had_timer,
                dropped_pending_bytes = dropped,
            );
        });
    }

    fn decode_available(&mut self) {
        loop {
            match try_decode_event(self.accumulator.unconsumed(), self.table) {
                DecodeStep::Event { event, consumed } => {
                    self.accumulator.consume(consumed);
                    self.internal_events.push_back(event);
                }
                DecodeStep::Discard(count) => {
                    DEBUG_TTY_INPUT_SHOW_DECODER.then(|| {
                        let unconsumed = self.accumulator.unconsumed();
                        tracing::debug!(
                            message = "StatefulInputDecoder: discarding unrecognized bytes",
                            bytes = ?&unconsumed[..count.min(unconsumed.len())],
                        );
                    });
                    self.discarded_byte_count += self.accumulator.discard(count);
                }
                DecodeStep::PendingIntroducer(pending) => {
                    let timer = self.esc.arm(self.clock.now(), pending);
                    DEBUG_TTY_INPUT_SHOW_DECODER.then(|| {
                        tracing::debug!(
                            message = "StatefulInputDecoder: armed escape deadline",
                            timer = ?timer,
                            pending = ?pending,
                        );
                    });
                    break;
                }
                DecodeStep::Incomplete => break,
            }
        }
    }

    fn resolve_pending_introducer(&mut self, pending: PendingIntroducer) -> bool {
        // Any feed cancels the timer first, so the buffer still holds exactly the
        // introducer bytes here.
        if self.accumulator.unconsumed() != pending.bytes() {
            tracing::warn!(
                message = "StatefulInputDecoder: escape deadline fired over unexpected bytes",
                pending = ?pending,
                bytes = ?self.accumulator.unconsumed(),
            );
            return false;
        }

        self.accumulator.consume(pending.byte_len());
        self.internal_events
            .push_back(TtyInputEvent::Keyboard(pending.resolve_to_escape()));
        true
    }
}

impl<C: Clock> Iterator for StatefulInputDecoder<C> {
    type Item = TtyInputEvent;

    fn next(&mut self) -> Option<Self::Item> { self.internal_events.pop_front() }
}



#[cfg(test)]
mod tests_chunked_input {
    use super::test_fixtures::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_split_of_a_function_key_yields_one_event() {
        let bytes = b"\x1b\x1b[18$";
        for split in 1..bytes.len() {
            let (mut decoder, _) = decoder();
            decoder.feed(&bytes[..split]);
            assert_eq!((&mut decoder).count(), 0, "split at {split}");
            decoder.feed(&bytes[split..]);

            let events: Vec<_> = decoder.collect();
            let expected = keypress(
                "f7",
                "\x1b\x1b[18$",
                true,
                KeyModifiers {
                    shift: true,
                    ctrl: false,
                    alt: true,
                },
            );
            assert_eq!(events, vec![expected], "split at {split}");
        }
    }

    #[test]
    fn byte_at_a_time_supplementary_character() {
        let (mut decoder, _) = decoder();
        for byte in "😁".as_bytes() {
            decoder.feed([*byte]);
        }
        assert_eq!(key_names(&mut decoder), vec!["😁"]);
    }

    #[test]
    fn escape_then_click_survives_every_split() {
        let bytes = b"\x1b\x1b[M !!";
        for split in 1..bytes.len() {
            let (mut decoder, _) = decoder();
            decoder.feed(&bytes[..split]);
            let mut events: Vec<_> = (&mut decoder).collect();
            decoder.feed(&bytes[split..]);
            events.extend(&mut decoder);

            assert_eq!(
                key_names(events.clone().into_iter()),
                vec!["escape", "mousedown@1,1"],
                "split at {split}"
            );
            assert_eq!(
                events[0],
                keypress("escape", "\x1b", true, KeyModifiers::NONE),
                "split at {split}"
            );
            assert_eq!(decoder.discarded_byte_count(), 0, "split at {split}");
        }
    }

    #[test]
    fn mouse_report_split_with_long_pause_still_decodes() {
        let (mut decoder, clock) = decoder();
        decoder.feed(b"\x1b[M#");
        clock.advance(TIMEOUT * 50);
        assert!(!decoder.poll_deadline());
        decoder.feed(b"*!");

        let events: Vec<_> = decoder.collect();
        let mouse = events[0].as_mouse().unwrap();
        assert_eq!(mouse.kind, MouseEventKind::Mouseup);
        assert_eq!((mouse.x, mouse.y), (10, 1));
    }
}
