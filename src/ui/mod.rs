use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

pub mod layout;

use crate::app::{short_address, App, InputMode, LookupState, Screen, StatusLevel};
use crate::domain::account::Network;

pub fn draw(f: &mut Frame, app: &App) {
    let areas = layout::areas(f.size());

    draw_header(f, areas.header, app);
    match app.screen {
        Screen::Home => draw_home(f, areas.body, app),
        Screen::Lookup => draw_lookup(f, areas.body, app),
    }
    draw_status_line(f, areas.status_line, app);
    draw_hints_line(f, areas.hints_line, app);

    if app.help_open {
        draw_help_popup(f, areas.size);
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(
            "Scry",
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
    ];
    match app.network {
        Some(network) => {
            spans.push(Span::styled("Network", Style::default().fg(Color::DarkGray)));
            spans.push(Span::raw(format!(" {} ({}) ", network, network.ticker())));
            spans.push(Span::styled("RPC", Style::default().fg(Color::DarkGray)));
            spans.push(Span::raw(format!(" {}", app.endpoint_for(network))));
        }
        None => {
            spans.push(Span::styled(
                "Select the blockchain network",
                Style::default().fg(Color::DarkGray),
            ));
        }
    }

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);
    f.render_widget(header, area);
}

fn draw_home(f: &mut Frame, area: Rect, app: &App) {
    let title_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    let title = Paragraph::new(Line::from(Span::styled(
        "Choose Network",
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(title, title_chunks[0]);

    let (left, right) = layout::card_areas(title_chunks[1]);
    draw_network_card(f, left, Network::Ethereum, app);
    draw_network_card(f, right, Network::Solana, app);
}

fn draw_network_card(f: &mut Frame, area: Rect, network: Network, app: &App) {
    let selected = app.selected_card() == network;
    let border_style = if selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let description = match network {
        Network::Ethereum => "Balance, nonce, and contract check",
        Network::Solana => "Balance, recent activity, and program check",
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            network.ticker(),
            Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            network.title(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(description),
        Line::from(""),
        Line::from(Span::styled(
            if selected { "Press Enter" } else { " " },
            Style::default().fg(Color::Cyan),
        )),
    ];

    let card = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!(" {} ", network.shortcut())),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(card, area);
}

fn draw_lookup(f: &mut Frame, area: Rect, app: &App) {
    let (input_area, result_area) = layout::lookup_areas(area);

    let editing = app.input_mode == InputMode::Editing;
    let border_style = if editing {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let cursor = if editing { "▏" } else { "" };
    let input = Paragraph::new(format!("{}{}", app.input, cursor))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(" Address "),
        );
    f.render_widget(input, input_area);

    draw_result_panel(f, result_area, app);
}

fn draw_result_panel(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title(" Account ");

    let lines: Vec<Line> = match &app.lookup {
        LookupState::Idle => vec![
            Line::from(""),
            Line::from(Span::styled(
                "Enter an address and press Enter to look it up",
                Style::default().fg(Color::DarkGray),
            )),
        ],
        LookupState::Loading => vec![
            Line::from(""),
            Line::from(Span::styled(
                "Looking up account…",
                Style::default().fg(Color::Yellow),
            )),
        ],
        LookupState::Success(snapshot) => {
            let network = snapshot.network;
            let kind = if snapshot.is_contract {
                network.program_label()
            } else {
                "Wallet"
            };
            let activity = format_activity(snapshot.transaction_count, network);
            vec![
                Line::from(""),
                field_line("Address", short_address(&snapshot.address)),
                field_line(
                    "Balance",
                    format!("{} {}", format_balance(snapshot.balance), network.ticker()),
                ),
                field_line("Transactions", activity),
                field_line("Account type", kind.to_string()),
                field_line(
                    network.height_label(),
                    format!("#{}", snapshot.latest_block_height),
                ),
            ]
        }
        LookupState::Failed(message) => vec![
            Line::from(""),
            Line::from(Span::styled(
                "Lookup failed. Check the address and try again",
                Style::default().fg(Color::Red),
            )),
            Line::from(""),
            Line::from(Span::styled(
                message.as_str(),
                Style::default().fg(Color::DarkGray),
            )),
        ],
    };

    let panel = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(panel, area);
}

fn field_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:<14}", label),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(value),
    ])
}

/// Render a balance without float noise: up to 9 fractional digits,
/// trailing zeros trimmed
fn format_balance(balance: f64) -> String {
    let formatted = format!("{:.9}", balance);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Solana activity counts saturate at one signature page; mark the cap
fn format_activity(count: u64, network: Network) -> String {
    use crate::infrastructure::chain::SIGNATURE_PAGE_LIMIT;
    if network == Network::Solana && count >= SIGNATURE_PAGE_LIMIT {
        format!("{count}+ (recent signatures)")
    } else if network == Network::Solana {
        format!("{count} (recent signatures)")
    } else {
        count.to_string()
    }
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let Some((message, level)) = &app.status else {
        f.render_widget(Paragraph::new(""), area);
        return;
    };
    let style = match level {
        StatusLevel::Info => Style::default().fg(Color::Gray),
        StatusLevel::Warn => Style::default().fg(Color::Yellow),
        StatusLevel::Error => Style::default().fg(Color::Red),
    };
    f.render_widget(Paragraph::new(Span::styled(message.clone(), style)), area);
}

fn draw_hints_line(f: &mut Frame, area: Rect, app: &App) {
    let hints = match (app.screen, app.input_mode) {
        (Screen::Home, _) => "←/→ select  Enter open  q quit  ? help",
        (Screen::Lookup, InputMode::Editing) => "Enter look up  Esc done editing",
        (Screen::Lookup, InputMode::Normal) => {
            "i edit  r re-run  y copy address  Esc back  q quit  ? help"
        }
    };
    let line = Paragraph::new(Span::styled(hints, Style::default().fg(Color::DarkGray)));
    f.render_widget(line, area);
}

fn draw_help_popup(f: &mut Frame, size: Rect) {
    let area = centered_rect(50, 60, size);
    f.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(
            "Keys",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Home"),
        Line::from("  ←/→ h/l   select network card"),
        Line::from("  1 / 2     jump to a network"),
        Line::from("  Enter     open lookup"),
        Line::from(""),
        Line::from("Lookup"),
        Line::from("  i, /      edit the address"),
        Line::from("  Enter     run the lookup"),
        Line::from("  r         re-run with the same address"),
        Line::from("  y         copy address to clipboard"),
        Line::from("  Esc       back to network selection"),
        Line::from(""),
        Line::from("  q         quit    ? close help"),
    ];

    let popup = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Help "))
        .wrap(Wrap { trim: false });
    f.render_widget(popup, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, size: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(size);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
