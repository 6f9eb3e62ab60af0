//! Story list widget

use std::sync::Arc;

use hns_core::{Story, StoryList};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget, Wrap},
};

use crate::ui::theme::HnsTheme;

/// Scrollable list of stories with one selected.
///
/// Each story takes two lines: star, title and host, then author and poster.
/// Stars are drawn only when `favorites` is set, i.e. someone is logged in.
pub struct StoryListWidget<'a> {
    stories: &'a [Arc<Story>],
    favorites: Option<&'a StoryList>,
    selected: usize,
    title: &'a str,
    empty_message: &'a str,
    theme: &'a HnsTheme,
}

impl<'a> StoryListWidget<'a> {
    pub fn new(stories: &'a [Arc<Story>], theme: &'a HnsTheme) -> Self {
        Self {
            stories,
            favorites: None,
            selected: 0,
            title: "Stories",
            empty_message: "No stories here yet",
            theme,
        }
    }

    pub fn favorites(mut self, favorites: Option<&'a StoryList>) -> Self {
        self.favorites = favorites;
        self
    }

    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn empty_message(mut self, message: &'a str) -> Self {
        self.empty_message = message;
        self
    }

    fn story_item(&self, story: &Story) -> ListItem<'a> {
        let mut headline = Vec::with_capacity(4);
        let indent = match self.favorites {
            Some(favorites) => {
                let is_favorite = favorites.contains(story.story_id());
                let star = if is_favorite { "★ " } else { "☆ " };
                headline.push(Span::styled(star, self.theme.star_style(is_favorite)));
                "  "
            }
            None => "",
        };

        headline.push(Span::styled(
            story.title().to_string(),
            self.theme.title_style(),
        ));
        headline.push(Span::styled(
            format!(" ({})", story.host_name()),
            self.theme.host_style(),
        ));

        let byline = Line::from(Span::styled(
            format!(
                "{indent}by {} | posted by {}",
                story.author(),
                story.username()
            ),
            self.theme.meta_style(),
        ));

        ListItem::new(Text::from(vec![Line::from(headline), byline]))
    }
}

impl Widget for StoryListWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {} ({}) ", self.title, self.stories.len()))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(true));

        if self.stories.is_empty() {
            Paragraph::new(Span::styled(
                self.empty_message,
                self.theme.meta_style(),
            ))
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .stories
            .iter()
            .map(|story| self.story_item(story))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(self.theme.selected_style().add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");

        let mut state = ListState::default().with_selected(Some(self.selected));
        StatefulWidget::render(list, area, buf, &mut state);
    }
}
