//! TUI widgets for the Hack or Snooze client

pub mod input;
pub mod status_bar;
pub mod story_list;

pub use input::InputWidget;
pub use status_bar::{HotkeyBarWidget, HotkeyContext, StatusBarWidget};
pub use story_list::StoryListWidget;
