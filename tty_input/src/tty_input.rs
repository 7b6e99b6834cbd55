// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! [`TtyInput`] ties the decoder to the dispatcher and drives both from a byte source.
//!
//! Two ways to use it:
//!
//! 1. **Push**: call [`TtyInput::feed`] with each chunk as it arrives, and
//!    [`TtyInput::poll_timer`] once [`TtyInput::next_deadline`] has passed.
//! 2. **Async**: hand any [`AsyncRead`] to [`TtyInput::run`]. One task multiplexes the
//!    reads and the escape deadline with [`tokio::select!`], so byte arrival and timer
//!    firing never overlap. Requires the default [`SystemClock`].
//!
//! Acquiring the terminal (raw mode, echo) is left to the caller.

use crate::{Clock, EventDispatcher, EventKind, STDIN_READ_BUFFER_SIZE, StatefulInputDecoder,
            SubscriptionId, SystemClock, TtyInputConfig, TtyInputError, TtyInputEvent};
use std::io::ErrorKind;
use tokio::{io::{AsyncRead, AsyncReadExt},
            sync::watch,
            time::Instant};

const DEBUG_TTY_INPUT_SHOW_DRIVER: bool = false;

/// Whether the async driver keeps going after handling one wakeup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Continuation {
    Continue,
    Stop,
}

#[derive(Debug)]
pub struct TtyInput<C: Clock = SystemClock> {
    decoder: StatefulInputDecoder<C>,
    dispatcher: EventDispatcher,
    config: TtyInputConfig,
}

impl Default for TtyInput<SystemClock> {
    fn default() -> Self { Self::new(TtyInputConfig::default()) }
}

impl TtyInput<SystemClock> {
    #[must_use]
    pub fn new(config: TtyInputConfig) -> Self { Self::with_clock(config, SystemClock) }
}

impl<C: Clock> TtyInput<C> {
    #[must_use]
    pub fn with_clock(config: TtyInputConfig, clock: C) -> Self {
        Self {
            decoder: StatefulInputDecoder::with_clock(&config, clock),
            dispatcher: EventDispatcher::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &TtyInputConfig { &self.config }

    /// Handle to the registry. Clones may be moved into handlers to subscribe or
    /// unsubscribe from inside a dispatch round.
    #[must_use]
    pub fn dispatcher(&self) -> &EventDispatcher { &self.dispatcher }

    pub fn on(
        &self,
        kind: EventKind,
        handler: impl FnMut(&TtyInputEvent) + Send + 'static,
    ) -> SubscriptionId {
        self.dispatcher.subscribe(kind, handler)
    }

    pub fn remove_listener(&self, id: SubscriptionId) -> bool {
        self.dispatcher.unsubscribe(id)
    }

    /// Decode `chunk` and dispatch every event it completes. Returns the number of
    /// events dispatched.
    pub fn feed(&mut self, chunk: impl AsRef<[u8]>) -> usize {
        self.decoder.feed(chunk);
        self.dispatch_decoded()
    }

    /// Service the escape deadline. Returns the number of events dispatched (0 or 1).
    pub fn poll_timer(&mut self) -> usize {
        self.decoder.poll_deadline();
        self.dispatch_decoded()
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> { self.decoder.next_deadline() }

    #[must_use]
    pub fn decoder(&self) -> &StatefulInputDecoder<C> { &self.decoder }

    /// Cancel any armed deadline. No further input is accepted.
    pub fn shutdown(&mut self) { self.decoder.shutdown(); }

    fn dispatch_decoded(&mut self) -> usize {
        let mut count = 0;
        for event in self.decoder.by_ref() {
            self.dispatcher.emit(event.kind(), &event);
            count += 1;
        }
        count
    }
}

/// The async driver sleeps on tokio time, so it is only available with [`SystemClock`],
/// whose deadlines are measured on the same timeline. Other clocks are driven by hand
/// with [`TtyInput::poll_timer`].
///
/// ```compile_fail
/// # async fn drive_with_manual_clock() {
/// use tty_input::{ManualClock, TtyInput, TtyInputConfig};
///
/// let mut input = TtyInput::with_clock(TtyInputConfig::default(), ManualClock::new());
/// input.run(tokio::io::empty()).await.ok();
/// # }
/// ```
impl TtyInput<SystemClock> {
    /// Read `reader` to EOF, dispatching events as they decode. The decoder is shut
    /// down when this returns.
    ///
    /// # Errors
    ///
    /// [`TtyInputError::Read`] if the reader fails with anything other than
    /// [`ErrorKind::Interrupted`].
    pub async fn run<R>(&mut self, reader: R) -> miette::Result<()>
    where
        R: AsyncRead + Unpin,
    {
        self.drive(reader, None).await
    }

    /// Like [`run`](Self::run), but also stops when `shutdown` turns `true` or its
    /// sender is dropped.
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run).
    pub async fn run_until_shutdown<R>(
        &mut self,
        reader: R,
        shutdown: watch::Receiver<bool>,
    ) -> miette::Result<()>
    where
        R: AsyncRead + Unpin,
    {
        self.drive(reader, Some(shutdown)).await
    }

    async fn drive<R>(
        &mut self,
        mut reader: R,
        mut shutdown: Option<watch::Receiver<bool>>,
    ) -> miette::Result<()>
    where
        R: AsyncRead + Unpin,
    {
        let mut read_buffer = [0_u8; STDIN_READ_BUFFER_SIZE];

        let result = loop {
            if shutdown.as_ref().is_some_and(|it| *it.borrow()) {
                break Ok(());
            }
            let deadline = self.decoder.next_deadline();

            let continuation = tokio::select! {
                () = wait_for_shutdown(shutdown.as_mut()) => {
                    DEBUG_TTY_INPUT_SHOW_DRIVER.then(|| {
                        tracing::debug!(message = "TtyInput driver: shutdown requested");
                    });
                    Continuation::Stop
                }

                () = sleep_until_deadline(deadline) => {
                    self.poll_timer();
                    Continuation::Continue
                }

                read_result = reader.read(&mut read_buffer) => match read_result {
                    Ok(0) => {
                        DEBUG_TTY_INPUT_SHOW_DRIVER.then(|| {
                            tracing::debug!(message = "TtyInput driver: EOF (0 bytes)");
                        });
                        Continuation::Stop
                    }
                    Ok(n) => {
                        DEBUG_TTY_INPUT_SHOW_DRIVER.then(|| {
                            tracing::debug!(message = "TtyInput driver: read bytes", bytes_read = n);
                        });
                        self.feed(&read_buffer[..n]);
                        Continuation::Continue
                    }
                    Err(error) if error.kind() == ErrorKind::Interrupted => Continuation::Continue,
                    Err(error) => {
                        tracing::warn!(message = "TtyInput driver: read error", error = ?error);
                        break Err(TtyInputError::Read(error).into());
                    }
                },
            };

            if continuation == Continuation::Stop {
                break Ok(());
            }
        };

        self.shutdown();
        result
    }
}

/// Pends forever when no deadline is armed.
async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Pends forever when there is no shutdown channel.
async fn wait_for_shutdown(shutdown: Option<&mut watch::Receiver<bool>>) {
    let Some(shutdown) = shutdown else {
        return std::future::pending().await;
    };
    // A dropped sender also means stop.
    shutdown.wait_for(|it| *it).await.ok();
}

#[cfg(test)]
mod test_fixtures {
    pub use super::TtyInput;
    pub use crate::{EventKind, KeyModifiers, ManualClock, TtyInputConfig, TtyInputEvent,
                    test_fixtures::keypress};
    pub use std::{sync::{Arc, Mutex}, time::Duration};

    pub type Recorded = Arc<Mutex<Vec<TtyInputEvent>>>;

    /// Subscribe to every kind and record the events in order.
    pub fn record_all<C: crate::Clock>(input: &TtyInput<C>) -> Recorded {
        let recorded: Recorded = Arc::new(Mutex::new(vec![]));
        for kind in [
            EventKind::Keypress,
            EventKind::Mousedown,
            EventKind::Mouseup,
            EventKind::Mousemove,
        ] {
            let recorded = Arc::clone(&recorded);
            input.on(kind, move |event| recorded.lock().unwrap().push(event.clone()));
        }
        recorded
    }

    pub fn names(recorded: &Recorded) -> Vec<String> {
        recorded
            .lock()
            .unwrap()
            .iter()
            .map(|event| match event {
                TtyInputEvent::Keyboard(it) => it.name.to_string(),
                TtyInputEvent::Mouse(it) => format!("mouse@{},{}", it.x, it.y),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests_push {
    use super::test_fixtures::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn feed_dispatches_by_kind() {
        let clock = ManualClock::new();
        let mut input = TtyInput::with_clock(TtyInputConfig::default(), clock);
        let recorded = record_all(&input);

        assert_eq!(input.feed("a\x1b[M#*!"), 2);
        assert_eq!(names(&recorded), vec!["a", "mouse@10,1"]);
    }

    #[test]
    fn poll_timer_emits_escape_after_timeout() {
        let clock = ManualClock::new();
        let config = TtyInputConfig::default().with_esc_key_timeout(Duration::from_millis(100));
        let mut input = TtyInput::with_clock(config, clock.clone());
        let recorded = record_all(&input);

        assert_eq!(input.feed([0x1b]), 0);
        clock.advance(Duration::from_millis(50));
        assert_eq!(input.poll_timer(), 0);
        clock.advance(Duration::from_millis(50));
        assert_eq!(input.poll_timer(), 1);

        assert_eq!(
            recorded.lock().unwrap().clone(),
            vec![keypress("escape", "\x1b", true, KeyModifiers::NONE)]
        );
    }

    #[test]
    fn remove_listener_stops_delivery() {
        let mut input = TtyInput::with_clock(TtyInputConfig::default(), ManualClock::new());
        let count = Arc::new(Mutex::new(0));
        let id = {
            let count = Arc::clone(&count);
            input.on(EventKind::Keypress, move |_| *count.lock().unwrap() += 1)
        };
        input.feed("a");
        assert!(input.remove_listener(id));
        input.feed("b");
        assert_eq!(*count.lock().unwrap(), 1);
    }
}

#[cfg(test)]
mod tests_async_driver {
    use super::test_fixtures::*;
    use pretty_assertions::assert_eq;
    use tokio::io::AsyncWriteExt;

    #[tokio::test(start_paused = true)]
    async fn lone_escape_resolves_after_timeout_not_before() {
        let (mut writer, reader) = tokio::io::duplex(64);
        let mut input = TtyInput::new(TtyInputConfig::default());
        let recorded = record_all(&input);

        let task = tokio::spawn(async move {
            input.run(reader).await.unwrap();
            input
        });

        writer.write_all(b"\x1b").await.unwrap();
        tokio::time::sleep(Duration::from_millis(99)).await;
        assert!(names(&recorded).is_empty());

        tokio::time::sleep(Duration::from_millis(51)).await;
        assert_eq!(names(&recorded), vec!["escape"]);

        drop(writer);
        let input = task.await.unwrap();
        assert!(input.decoder().is_shut_down());
    }

    #[tokio::test(start_paused = true)]
    async fn bytes_before_timeout_make_an_alt_chord() {
        let (mut writer, reader) = tokio::io::duplex(64);
        let mut input = TtyInput::new(TtyInputConfig::default());
        let recorded = record_all(&input);
        let task = tokio::spawn(async move { input.run(reader).await });

        writer.write_all(b"\x1b").await.unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;
        writer.write_all(b"x").await.unwrap();
        tokio::time::sleep(Duration::from_millis(500)).await;

        assert_eq!(
            recorded.lock().unwrap().clone(),
            vec![keypress("x", "\x1bx", false, KeyModifiers::ALT)]
        );

        drop(writer);
        task.await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn eof_cancels_a_pending_escape() {
        let (mut writer, reader) = tokio::io::duplex(64);
        let mut input = TtyInput::new(TtyInputConfig::default());
        let recorded = record_all(&input);

        writer.write_all(b"a\x1b").await.unwrap();
        drop(writer);
        input.run(reader).await.unwrap();

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(input.poll_timer(), 0);
        assert_eq!(names(&recorded), vec!["a"]);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_signal_stops_the_driver() {
        let (_writer, reader) = tokio::io::duplex(64);
        let (tx, rx) = tokio::sync::watch::channel(false);
        let mut input = TtyInput::new(TtyInputConfig::default());
        let task = tokio::spawn(async move { input.run_until_shutdown(reader, rx).await });

        tokio::time::sleep(Duration::from_millis(10)).await;
        tx.send(true).unwrap();
        task.await.unwrap().unwrap();
    }
}
