//! Keyboard event mapping and input event types.

use crate::app::state::{Mode, View};
use termion::event::{Event, Key};

/// High-level input events abstracted from raw keyboard input.
///
/// These events represent user intentions (quit, move, toggle) rather than
/// specific key presses, allowing for mode-specific keybindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Quit the application
    Quit,
    /// Move cursor down
    MoveDown,
    /// Move cursor up
    MoveUp,
    /// Half-page down (Ctrl-d)
    HalfPageDown,
    /// Half-page up (Ctrl-u)
    HalfPageUp,
    /// Full-page down (Ctrl-f, PageDown)
    FullPageDown,
    /// Full-page up (Ctrl-b, PageUp)
    FullPageUp,
    /// Jump to top of document (g, Home)
    JumpToTop,
    /// Jump to bottom of document (G, End)
    JumpToBottom,
    /// Toggle the container under the cursor, or load more items
    Activate,
    /// Expand all containers
    ExpandAll,
    /// Collapse all containers
    CollapseAll,
    /// Enter input mode for the document or the focused URL field
    EnterInput,
    /// Enter command mode (:)
    EnterCommandMode,
    /// Enter search mode (/)
    EnterSearchMode,
    /// Jump to next search result
    NextSearchResult,
    /// Copy the active view's output
    CopyOutput,
    /// Switch between the JSON and URL tools
    SwitchView,
    /// Toggle help overlay
    Help,
    /// Exit current mode back to normal mode
    ExitMode,
    /// Parse the URL input line
    ParseUrl,
    /// Edit the URL input line
    EditUrl,
    /// Edit the encode/decode text
    EditEncode,
    /// Percent-encode the encode/decode text
    EncodeText,
    /// Percent-decode the encode/decode text
    DecodeText,
    /// Copy scheme+host+path of the parsed URL
    CopyUrlOrigin,
    /// Copy the parsed URL's parameters as JSON
    CopyUrlParams,
    /// Copy the parsed URL's fragment
    CopyUrlFragment,
    /// Insert a character into the active buffer
    InsertCharacter(char),
    /// Backspace in the active buffer
    InsertBackspace,
    /// Submit the active buffer
    InsertEnter,
    /// Unknown or unmapped key
    Unknown,
}

/// Maps a termion Event to an InputEvent based on the current mode and
/// active view.
///
/// # Example
///
/// ```
/// use termion::event::{Event, Key};
/// use textquill::app::state::{Mode, View};
/// use textquill::input::keys::{map_key_event, InputEvent};
///
/// let event = Event::Key(Key::Char('j'));
/// assert_eq!(
///     map_key_event(event, Mode::Normal, View::Json),
///     InputEvent::MoveDown
/// );
/// ```
pub fn map_key_event(event: Event, mode: Mode, view: View) -> InputEvent {
    let key = match event {
        Event::Key(k) => k,
        _ => return InputEvent::Unknown,
    };

    match mode {
        Mode::Normal => match key {
            Key::Ctrl('d') => InputEvent::HalfPageDown,
            Key::Ctrl('u') => InputEvent::HalfPageUp,
            Key::Ctrl('f') => InputEvent::FullPageDown,
            Key::Ctrl('b') => InputEvent::FullPageUp,
            Key::Char('q') => InputEvent::Quit,
            Key::Char('j') | Key::Down => InputEvent::MoveDown,
            Key::Char('k') | Key::Up => InputEvent::MoveUp,
            Key::PageDown => InputEvent::FullPageDown,
            Key::PageUp => InputEvent::FullPageUp,
            Key::Char('g') | Key::Home => InputEvent::JumpToTop,
            Key::Char('G') | Key::End => InputEvent::JumpToBottom,
            Key::Char(':') => InputEvent::EnterCommandMode,
            Key::Char('/') => InputEvent::EnterSearchMode,
            Key::Char('n') => InputEvent::NextSearchResult,
            Key::Char('c') => InputEvent::CopyOutput,
            Key::Char('v') => InputEvent::SwitchView,
            Key::Char('?') | Key::F(1) => InputEvent::Help,
            Key::Esc => InputEvent::ExitMode,
            _ => match view {
                View::Json => map_json_key(key),
                View::Url => map_url_key(key),
            },
        },
        Mode::Input | Mode::Command | Mode::Search => match key {
            Key::Esc => InputEvent::ExitMode,
            Key::Char('\n') => InputEvent::InsertEnter,
            Key::Backspace => InputEvent::InsertBackspace,
            Key::Char(c) => InputEvent::InsertCharacter(c),
            _ => InputEvent::Unknown,
        },
    }
}

fn map_json_key(key: Key) -> InputEvent {
    match key {
        Key::Char('\n') | Key::Char(' ') => InputEvent::Activate,
        Key::Char('E') => InputEvent::ExpandAll,
        Key::Char('C') => InputEvent::CollapseAll,
        Key::Char('i') => InputEvent::EnterInput,
        _ => InputEvent::Unknown,
    }
}

fn map_url_key(key: Key) -> InputEvent {
    match key {
        Key::Char('\n') => InputEvent::ParseUrl,
        Key::Char('u') | Key::Char('i') => InputEvent::EditUrl,
        Key::Char('e') => InputEvent::EditEncode,
        Key::Char('E') => InputEvent::EncodeText,
        Key::Char('D') => InputEvent::DecodeText,
        Key::Char('1') => InputEvent::CopyUrlOrigin,
        Key::Char('2') => InputEvent::CopyUrlParams,
        Key::Char('3') => InputEvent::CopyUrlFragment,
        _ => InputEvent::Unknown,
    }
}
