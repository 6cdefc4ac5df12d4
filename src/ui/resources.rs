//! Resource path table
//!
//! A multi-select table of resource links. The widget owns only its
//! selection; every change hands the full selection to the caller.

use crate::types::ResourceLink;
use crate::ui::draw::styling;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};
use std::collections::BTreeSet;

#[derive(Debug, Default)]
pub struct ResourceList {
    links: Vec<ResourceLink>,
    selected: BTreeSet<usize>,
    /// Row the last toggle happened on, start of a range extension
    anchor: Option<usize>,
    table_state: TableState,
}

impl ResourceList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt `links` for display. Selection survives if the data is unchanged.
    /// Returns true when a previous selection was dropped.
    pub fn sync(&mut self, links: &[ResourceLink]) -> bool {
        if self.links == links {
            return false;
        }

        let had_selection = !self.selected.is_empty();
        self.links = links.to_vec();
        self.selected.clear();
        self.anchor = None;
        self.table_state
            .select(if self.is_empty() { None } else { Some(0) });
        had_selection
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.table_state.selected()
    }

    pub fn cursor_link(&self) -> Option<&ResourceLink> {
        self.cursor().and_then(|i| self.links.get(i))
    }

    pub fn move_down(&mut self) {
        if self.is_empty() {
            return;
        }
        let next = match self.cursor() {
            Some(i) if i + 1 < self.len() => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.table_state.select(Some(next));
    }

    pub fn move_up(&mut self) {
        if self.is_empty() {
            return;
        }
        let prev = self.cursor().map_or(0, |i| i.saturating_sub(1));
        self.table_state.select(Some(prev));
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Selected links in table order
    pub fn selection(&self) -> Vec<ResourceLink> {
        self.selected
            .iter()
            .filter_map(|&i| self.links.get(i).cloned())
            .collect()
    }

    /// Flip one row and report the whole selection
    pub fn toggle(&mut self, index: usize, report: impl FnOnce(&[ResourceLink])) {
        if index >= self.len() {
            return;
        }
        if !self.selected.remove(&index) {
            self.selected.insert(index);
        }
        self.anchor = Some(index);
        report(&self.selection());
    }

    /// Select every row, or clear if every row is already selected
    pub fn toggle_all(&mut self, report: impl FnOnce(&[ResourceLink])) {
        if self.selected.len() == self.len() {
            self.selected.clear();
        } else {
            self.selected = (0..self.len()).collect();
        }
        report(&self.selection());
    }

    /// Add every row between the anchor and `index` to the selection
    pub fn extend_to(&mut self, index: usize, report: impl FnOnce(&[ResourceLink])) {
        if index >= self.len() {
            return;
        }
        let anchor = self.anchor.unwrap_or(index);
        let (start, end) = if anchor <= index {
            (anchor, index)
        } else {
            (index, anchor)
        };
        self.selected.extend(start..=end);
        report(&self.selection());
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let header = Row::new(vec![
            Cell::from(""),
            Cell::from("Path"),
            Cell::from("Methods"),
        ])
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = self
            .links
            .iter()
            .enumerate()
            .map(|(index, link)| {
                let check = if self.is_selected(index) {
                    "[x]"
                } else {
                    "[ ]"
                };
                Row::new(vec![
                    Cell::from(check),
                    Cell::from(link.display_path()),
                    Cell::from(method_badges(link)),
                ])
            })
            .collect();

        let border_color = if focused {
            styling::focused_border()
        } else {
            styling::unfocused_border()
        };

        let title = if self.selected.is_empty() {
            format!(" Resources ({}) ", self.len())
        } else {
            format!(
                " Resources ({}) - {} selected ",
                self.len(),
                self.selected.len()
            )
        };

        let table = Table::new(
            rows,
            [
                Constraint::Length(3),
                Constraint::Percentage(55),
                Constraint::Min(10),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        )
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

        frame.render_stateful_widget(table, area, &mut self.table_state);
    }
}

fn method_badges(link: &ResourceLink) -> Line<'static> {
    let mut spans = Vec::with_capacity(link.methods.len() * 2);
    for method in &link.methods {
        if !spans.is_empty() {
            spans.push(Span::raw(" "));
        }
        let label = if method.name.is_empty() {
            method.verb.to_uppercase()
        } else {
            method.name.clone()
        };
        spans.push(Span::styled(
            format!(" {label} "),
            Style::default()
                .fg(Color::Black)
                .bg(styling::get_method_color(&method.verb))
                .add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResourceMethod;
    use ratatui::{backend::TestBackend, Terminal};

    fn link(url: &str) -> ResourceLink {
        ResourceLink {
            url: url.to_string(),
            version: "v1.0".to_string(),
            methods: vec![
                ResourceMethod {
                    verb: "get".to_string(),
                    name: "list".to_string(),
                },
                ResourceMethod {
                    verb: "post".to_string(),
                    name: "create".to_string(),
                },
            ],
        }
    }

    fn links() -> Vec<ResourceLink> {
        vec![link("/me"), link("/users"), link("/groups")]
    }

    fn urls(selection: &[ResourceLink]) -> Vec<String> {
        selection.iter().map(|l| l.url.clone()).collect()
    }

    #[test]
    fn test_deselect_reports_full_selection() {
        let mut list = ResourceList::new();
        list.sync(&links());

        let mut reported = Vec::new();
        list.toggle(0, |s| reported = urls(s));
        list.toggle(2, |s| reported = urls(s));
        assert_eq!(reported, vec!["/me", "/groups"]);

        list.toggle(0, |s| reported = urls(s));
        assert_eq!(reported, vec!["/groups"]);
    }

    #[test]
    fn test_selection_survives_same_data() {
        let mut list = ResourceList::new();
        list.sync(&links());
        list.toggle(1, |_| {});

        assert!(!list.sync(&links()));
        assert!(list.is_selected(1));
    }

    #[test]
    fn test_new_data_clears_selection() {
        let mut list = ResourceList::new();
        list.sync(&links());
        list.toggle(1, |_| {});

        assert!(list.sync(&[link("/sites")]));
        assert!(list.selection().is_empty());
        assert_eq!(list.cursor(), Some(0));
    }

    #[test]
    fn test_toggle_all() {
        let mut list = ResourceList::new();
        list.sync(&links());
        list.toggle(1, |_| {});

        let mut reported = Vec::new();
        list.toggle_all(|s| reported = urls(s));
        assert_eq!(reported.len(), 3);

        list.toggle_all(|s| reported = urls(s));
        assert!(reported.is_empty());
    }

    #[test]
    fn test_extend_from_anchor() {
        let mut list = ResourceList::new();
        list.sync(&links());
        list.toggle(2, |_| {});

        let mut reported = Vec::new();
        list.extend_to(0, |s| reported = urls(s));
        assert_eq!(reported, vec!["/me", "/users", "/groups"]);
    }

    #[test]
    fn test_out_of_range_toggle_is_ignored() {
        let mut list = ResourceList::new();
        list.sync(&links());
        let mut called = false;
        list.toggle(9, |_| called = true);
        assert!(!called);
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut list = ResourceList::new();
        list.move_down();
        assert_eq!(list.cursor(), None);

        list.sync(&links());
        list.move_up();
        assert_eq!(list.cursor(), Some(0));
        for _ in 0..5 {
            list.move_down();
        }
        assert_eq!(list.cursor(), Some(2));
    }

    #[test]
    fn test_render_shows_paths_and_badges() {
        let mut list = ResourceList::new();
        list.sync(&links());
        list.toggle(0, |_| {});

        let mut terminal = Terminal::new(TestBackend::new(60, 8)).unwrap();
        terminal
            .draw(|frame| list.render(frame, frame.area(), true))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("v1.0/me"));
        assert!(text.contains("[x]"));
        assert!(text.contains(" list "));
        assert!(text.contains(" create "));
        assert!(!text.contains(" POST "));
    }

    #[test]
    fn test_badge_falls_back_to_verb_without_name() {
        let unnamed = ResourceLink {
            url: "/me".to_string(),
            version: "v1.0".to_string(),
            methods: vec![ResourceMethod {
                verb: "patch".to_string(),
                name: String::new(),
            }],
        };
        let badges = method_badges(&unnamed);
        assert_eq!(badges.spans.len(), 1);
        assert_eq!(badges.spans[0].content, " PATCH ");
    }
}
