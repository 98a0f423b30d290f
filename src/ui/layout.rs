use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone, Copy)]
pub struct UiAreas {
    pub size: Rect,
    pub header: Rect,
    pub body: Rect,
    pub status_line: Rect,
    pub hints_line: Rect,
}

pub fn areas(size: Rect) -> UiAreas {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(size);

    UiAreas {
        size,
        header: vertical[0],
        body: vertical[1],
        status_line: vertical[2],
        hints_line: vertical[3],
    }
}

/// Split the Lookup screen body into input box and result panel
pub fn lookup_areas(body: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(body);
    (chunks[0], chunks[1])
}

/// Center the two network cards on the Home screen
pub fn card_areas(body: Rect) -> (Rect, Rect) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(9),
            Constraint::Min(1),
        ])
        .split(body);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(10),
            Constraint::Percentage(40),
            Constraint::Percentage(40),
            Constraint::Percentage(10),
        ])
        .split(vertical[1]);

    (horizontal[1], horizontal[2])
}
