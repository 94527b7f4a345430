//! Input event handler for polling and processing terminal events.

use super::keys::{map_key_event, InputEvent};
use crate::app::state::{AppState, CommandOutcome, InputTarget, Mode, UrlPart};
use anyhow::{Context, Result};
use std::fs::File;
use std::time::{Duration, Instant};
use termion::event::{Event, MouseButton, MouseEvent};
use termion::input::{Events, TermRead};
use termion::AsyncReader;

/// Event source for reading terminal events.
///
/// Keeps the events iterator alive across polls so characters are not lost
/// during rapid input (paste).
enum EventSource {
    /// Non-blocking reader over stdin
    Async(Events<AsyncReader>),
    /// Reading from /dev/tty (when stdin was consumed for piped data)
    Tty(Events<File>),
}

/// Polls terminal events and applies them to the application state.
pub struct InputHandler {
    events: EventSource,
}

impl InputHandler {
    /// Creates a handler reading asynchronously from stdin.
    pub fn new() -> Self {
        Self {
            events: EventSource::Async(termion::async_stdin().events()),
        }
    }

    /// Creates a handler reading from /dev/tty. Use this when stdin has
    /// been consumed for piped document data.
    pub fn new_with_tty() -> Result<Self> {
        let tty = File::options()
            .read(true)
            .write(true)
            .open("/dev/tty")
            .context("Failed to open /dev/tty for keyboard input")?;

        Ok(Self {
            events: EventSource::Tty(tty.events()),
        })
    }

    /// Polls for a terminal event, waiting at most `timeout`.
    ///
    /// Returns `Ok(None)` when the timeout elapses without input, so the
    /// event loop can run its timers (message expiry) on a steady cadence.
    pub fn poll_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        match &mut self.events {
            EventSource::Async(events) => {
                let deadline = Instant::now() + timeout;
                loop {
                    if let Some(event) = events.next() {
                        return Ok(Some(event?));
                    }
                    if Instant::now() >= deadline {
                        return Ok(None);
                    }
                    std::thread::sleep(Duration::from_millis(10));
                }
            }
            EventSource::Tty(events) => match events.next() {
                Some(event) => Ok(Some(event?)),
                None => Ok(None),
            },
        }
    }

    /// Handles one terminal event. Returns true when the application
    /// should quit.
    pub fn handle_event(&mut self, event: Event, state: &mut AppState) -> Result<bool> {
        if let Event::Mouse(mouse) = event {
            if state.enable_mouse() {
                self.handle_mouse(mouse, state);
            }
            return Ok(false);
        }

        let input = map_key_event(event, state.mode(), state.view());
        self.handle_input(input, state)
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, state: &mut AppState) {
        match mouse {
            MouseEvent::Press(MouseButton::WheelUp, _, _) => state.move_cursor(-3),
            MouseEvent::Press(MouseButton::WheelDown, _, _) => state.move_cursor(3),
            _ => {}
        }
    }

    fn handle_input(&mut self, input: InputEvent, state: &mut AppState) -> Result<bool> {
        // Help overlay swallows everything except its own dismissal
        if state.show_help() {
            match input {
                InputEvent::Quit => return Ok(true),
                _ => {
                    state.toggle_help();
                    return Ok(false);
                }
            }
        }

        match input {
            InputEvent::Quit => return Ok(true),

            InputEvent::MoveDown => state.move_cursor(1),
            InputEvent::MoveUp => state.move_cursor(-1),
            InputEvent::HalfPageDown => state.move_half_page(1),
            InputEvent::HalfPageUp => state.move_half_page(-1),
            InputEvent::FullPageDown => state.move_page(1),
            InputEvent::FullPageUp => state.move_page(-1),
            InputEvent::JumpToTop => state.move_to_top(),
            InputEvent::JumpToBottom => state.move_to_bottom(),

            InputEvent::Activate => state.activate_cursor_row(),
            InputEvent::ExpandAll => state.expand_all(),
            InputEvent::CollapseAll => state.collapse_all(),

            InputEvent::EnterInput => state.enter_input(InputTarget::Document),
            InputEvent::EnterCommandMode => state.enter_command(),
            InputEvent::EnterSearchMode => state.enter_search(),
            InputEvent::NextSearchResult => state.next_match(),
            InputEvent::CopyOutput => state.copy_output(),
            InputEvent::SwitchView => state.switch_view(),
            InputEvent::Help => state.toggle_help(),
            InputEvent::ExitMode => state.exit_mode(),

            InputEvent::ParseUrl => state.parse_url_input(),
            InputEvent::EditUrl => state.enter_input(InputTarget::UrlLine),
            InputEvent::EditEncode => state.enter_input(InputTarget::EncodeLine),
            InputEvent::EncodeText => state.encode_text(),
            InputEvent::DecodeText => state.decode_text(),
            InputEvent::CopyUrlOrigin => state.copy_url_part(UrlPart::OriginAndPath),
            InputEvent::CopyUrlParams => state.copy_url_part(UrlPart::Params),
            InputEvent::CopyUrlFragment => state.copy_url_part(UrlPart::Fragment),

            InputEvent::InsertCharacter(c) => state.insert_char(c),
            InputEvent::InsertBackspace => state.insert_backspace(),
            InputEvent::InsertEnter => match state.mode() {
                Mode::Input => state.submit_input(),
                Mode::Command => {
                    if state.execute_command() == CommandOutcome::Quit {
                        return Ok(true);
                    }
                }
                Mode::Search => state.submit_search(),
                Mode::Normal => {}
            },

            InputEvent::Unknown => {}
        }

        Ok(false)
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
