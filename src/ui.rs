use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, InputMode};
use crate::catalog::favorites::EMPTY_TEXT;
use crate::catalog::{CardView, EntityKind, ListModel, ListView};
use crate::graphql::Suspense;
use crate::theme::ColorScheme;
use crate::types::Tab;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const CARD_MIN_WIDTH: u16 = 36;
const CARD_HEIGHT: u16 = 12;

// ===============================
// Top-level draw
// ===============================
pub fn draw(f: &mut Frame, app: &mut App) {
    app.tick_spinner();
    // Resolve the active tab before drawing; other tabs stay untouched.
    app.sync();
    let app: &App = app;

    let show_debug = app.debug_visible() && !app.debug_log().is_empty();

    let mut constraints: Vec<Constraint> = Vec::with_capacity(5);
    constraints.push(Constraint::Length(2)); // tabs
    constraints.push(Constraint::Length(2)); // heading + description
    constraints.push(Constraint::Min(0)); // body
    if show_debug {
        constraints.push(Constraint::Length(6));
    }
    constraints.push(Constraint::Length(2)); // footer

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    let mut idx = 0usize;
    header(f, chunks[idx], app);
    idx += 1;
    heading(f, chunks[idx], app);
    idx += 1;
    match app.list(app.tab()) {
        Some(view) => list_body(f, chunks[idx], app, view),
        None => favorites_body(f, chunks[idx], app),
    }
    idx += 1;
    if show_debug {
        debug_panel(f, chunks[idx], app);
        idx += 1;
    }
    footer(f, chunks[idx], app);

    // Overlays render last
    if app.input_mode() == InputMode::FavoriteDialog {
        draw_favorite_dialog(f, app);
    }
    if app.toast_message().is_some() {
        draw_toast_modal(f, app);
    }
}

// ===============================
// Header
// ===============================
fn header(f: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme();
    let mut spans = vec![Span::styled(
        " STAR WARS ",
        Style::default()
            .fg(theme.accent_yellow)
            .add_modifier(Modifier::BOLD),
    )];

    for (i, tab) in Tab::ALL.iter().enumerate() {
        spans.push(Span::raw(if i == 0 { "┌─" } else { "┬─" }));
        let title = format!("{} {}", i + 1, tab.title());
        if *tab == app.tab() {
            spans.push(Span::styled(
                title,
                Style::default()
                    .fg(theme.focus_border)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::raw(title));
        }
        spans.push(Span::raw("─"));
    }
    spans.push(Span::raw("┐"));

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::BOTTOM).border_type(BorderType::Plain));
    f.render_widget(paragraph, area);
}

fn heading(f: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme();
    let tab = app.tab();
    let lines = vec![
        Line::from(Span::styled(
            tab.heading(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            tab.description(),
            Style::default().fg(theme.text_dim),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

// ===============================
// Lists
// ===============================
fn list_body(f: &mut Frame, area: Rect, app: &App, view: &ListView) {
    let theme = app.theme();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    match view.current() {
        Suspense::Pending => {
            let frame = SPINNER[app.spinner_frame() % SPINNER.len()];
            let status = Paragraph::new(Line::from(vec![
                Span::styled(frame, Style::default().fg(theme.accent_yellow)),
                Span::styled(
                    format!(" Loading {}...", view.spec().noun),
                    Style::default().fg(theme.text_dim),
                ),
            ]));
            f.render_widget(status, rows[0]);
            skeleton_grid(f, rows[1], theme, view.spec().skeleton);
        }
        Suspense::Failed(err) => {
            let text = vec![
                Line::from(Span::styled(
                    "Something went wrong",
                    Style::default()
                        .fg(theme.toast_error)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(err.to_string(), Style::default().fg(theme.text_dim))),
            ];
            let w = Paragraph::new(text).wrap(Wrap { trim: true }).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(theme.toast_error)),
            );
            f.render_widget(w, rows[1]);
        }
        Suspense::Ready(model) => {
            let status = Paragraph::new(model.summary()).style(Style::default().fg(theme.text_dim));
            f.render_widget(status, rows[0]);
            card_grid(f, rows[1], theme, model, view.selected());
        }
    }
}

fn columns_for(width: u16) -> usize {
    (width / CARD_MIN_WIDTH).max(1) as usize
}

fn grid_cells(area: Rect, count: usize, selected: usize) -> Vec<(usize, Rect)> {
    let cols = columns_for(area.width);
    let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
    let selected_row = selected / cols;
    let first_row = selected_row.saturating_sub(visible_rows - 1);
    let card_width = area.width / cols as u16;

    (0..count)
        .filter_map(|i| {
            let (row, col) = (i / cols, i % cols);
            if row < first_row || row >= first_row + visible_rows {
                return None;
            }
            let y = area.y + ((row - first_row) as u16) * CARD_HEIGHT;
            let height = CARD_HEIGHT.min(area.bottom().saturating_sub(y));
            if height < 3 {
                return None;
            }
            Some((
                i,
                Rect {
                    x: area.x + (col as u16) * card_width,
                    y,
                    width: card_width,
                    height,
                },
            ))
        })
        .collect()
}

fn card_grid(f: &mut Frame, area: Rect, theme: &ColorScheme, model: &ListModel, selected: usize) {
    for (i, cell) in grid_cells(area, model.cards.len(), selected) {
        render_card(f, cell, theme, &model.cards[i], i == selected);
    }
}

fn render_card(f: &mut Frame, area: Rect, theme: &ColorScheme, card: &CardView, selected: bool) {
    let accent = theme.tone(card.kind.tone());
    let mut lines: Vec<Line> = Vec::with_capacity(10);

    lines.push(Line::from(Span::styled(
        card.eyebrow.as_str(),
        Style::default().fg(theme.text_dim),
    )));
    let mut title = vec![Span::styled(
        card.title.as_str(),
        Style::default().fg(accent).add_modifier(Modifier::BOLD),
    )];
    if let Some(badge) = &card.badge {
        title.push(Span::raw("  "));
        title.push(Span::styled(
            format!("[{}]", badge.text),
            Style::default().fg(theme.tone(badge.tone)),
        ));
    }
    lines.push(Line::from(title));
    if let Some(sub) = &card.subtitle {
        lines.push(Line::from(Span::styled(sub.as_str(), Style::default().fg(theme.text_dim))));
    }
    if let Some(blurb) = card.blurb.as_deref().filter(|b| !b.is_empty()) {
        lines.push(Line::from(Span::styled(
            format!("\"{blurb}\""),
            Style::default()
                .fg(theme.text_dim)
                .add_modifier(Modifier::ITALIC),
        )));
    }
    for field in &card.fields {
        lines.push(Line::from(vec![
            Span::styled(field.label, Style::default().fg(theme.text_dim)),
            Span::raw(" "),
            Span::styled(field.value.as_str(), Style::default().fg(theme.text)),
        ]));
    }
    if !card.tags.is_empty() {
        let mut tags = Vec::with_capacity(card.tags.len() * 2);
        for tag in &card.tags {
            tags.push(Span::styled(
                format!("[{}]", tag.text),
                Style::default().fg(theme.tone(tag.tone)),
            ));
            tags.push(Span::raw(" "));
        }
        lines.push(Line::from(tags));
    }

    let border = if selected {
        Style::default().fg(theme.focus_border)
    } else {
        Style::default().fg(theme.unfocused_border)
    };
    let w = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border),
    );
    f.render_widget(w, area);
}

fn skeleton_grid(f: &mut Frame, area: Rect, theme: &ColorScheme, count: usize) {
    let bar = |width: usize| {
        Line::from(Span::styled(
            "░".repeat(width),
            Style::default().fg(theme.skeleton),
        ))
    };
    for (_, cell) in grid_cells(area, count, 0) {
        let inner = cell.width.saturating_sub(4) as usize;
        let lines = vec![
            bar(inner * 3 / 4),
            bar(inner / 2),
            Line::from(""),
            bar(inner),
            bar(inner * 5 / 6),
            Line::from(""),
            bar(inner / 4),
        ];
        let w = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme.skeleton)),
        );
        f.render_widget(w, cell);
    }
}

// ===============================
// Favorites
// ===============================
fn kind_style(theme: &ColorScheme, kind: EntityKind) -> Style {
    Style::default()
        .fg(theme.tone(kind.tone()))
        .add_modifier(Modifier::BOLD)
}

fn favorites_body(f: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme();
    let favs = app.favorites();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    let banner = Paragraph::new(vec![Line::from(vec![
        Span::styled(
            "Mutation Demo: ",
            Style::default()
                .fg(theme.accent_blue)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "adds are simulated locally with a short delay; nothing is sent to the server.",
            Style::default().fg(theme.text),
        ),
    ])])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.accent_blue)),
    );
    f.render_widget(banner, rows[0]);

    let block = Block::default()
        .title(format!(" ★ My Favorites ({}) ", favs.len()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.focus_border));

    if favs.is_empty() {
        let p = Paragraph::new(EMPTY_TEXT)
            .style(Style::default().fg(theme.text_dim))
            .block(block);
        f.render_widget(p, rows[1]);
        return;
    }

    let items: Vec<ListItem> = favs
        .items()
        .iter()
        .map(|fav| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<11}", format!("[{}]", fav.kind)), kind_style(theme, fav.kind)),
                Span::styled(fav.name.as_str(), Style::default().fg(theme.text)),
                Span::styled(
                    format!("  {}", fav.added_at.format("%Y-%m-%d")),
                    Style::default().fg(theme.text_dim),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▶ ");
    let mut state = ListState::default();
    state.select(Some(favs.selected()));
    f.render_stateful_widget(list, rows[1], &mut state);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn draw_favorite_dialog(f: &mut Frame, app: &App) {
    let theme = app.theme();
    let favs = app.favorites();
    let overlay = centered_rect(f.area(), 60, 11);
    f.render_widget(Clear, overlay);

    let mut kinds = vec![Span::styled("Type: ", Style::default().fg(theme.text_dim))];
    for kind in EntityKind::ALL {
        let style = if kind == favs.draft_kind() {
            kind_style(theme, kind).add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(theme.text_dim)
        };
        kinds.push(Span::styled(format!(" {kind} "), style));
        kinds.push(Span::raw(" "));
    }

    let submit = if favs.is_adding() {
        Span::styled("Adding...", Style::default().fg(theme.text_dim))
    } else if favs.can_submit() {
        Span::styled(
            "[Enter] Add to Favorites",
            Style::default()
                .fg(theme.focus_border)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("[Enter] Add to Favorites", Style::default().fg(theme.text_dim))
    };

    let lines = vec![
        Line::from(Span::styled(
            "Add a Star Wars item to your favorites list.",
            Style::default().fg(theme.text_dim),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Name: ", Style::default().fg(theme.text_dim)),
            Span::styled(favs.draft_name(), Style::default().fg(theme.text)),
        ]),
        Line::from(""),
        Line::from(kinds),
        Line::from(""),
        Line::from(vec![
            submit,
            Span::styled("   ←/→ type · Esc close", Style::default().fg(theme.text_dim)),
        ]),
    ];
    let w = Paragraph::new(lines).block(
        Block::default()
            .title(" Add New Favorite ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.focus_border)),
    );
    f.render_widget(w, overlay);

    // Cursor after the typed name
    let x = overlay.x + 1 + 6 + favs.draft_name().chars().count() as u16;
    let y = overlay.y + 3;
    if x < overlay.right().saturating_sub(1) {
        f.set_cursor_position((x, y));
    }
}

// ===============================
// Footer / Debug / Toast
// ===============================
fn footer(f: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme();
    let key = |k: &'static str| Span::styled(k, Style::default().fg(theme.focus_border));
    let mut spans: Vec<Span> = Vec::with_capacity(24);

    spans.push(key("1-5/Tab"));
    spans.push(Span::raw(" switch │ "));
    spans.push(key("←/→"));
    spans.push(Span::raw(" select │ "));
    spans.push(key("c"));
    spans.push(Span::raw(" copy │ "));
    if app.tab() == Tab::Favorites {
        spans.push(key("a"));
        spans.push(Span::raw(" add │ "));
        spans.push(key("d"));
        spans.push(Span::raw(" remove │ "));
    }
    spans.push(key("Ctrl+D"));
    spans.push(Span::raw(" debug │ "));
    spans.push(key("q"));
    spans.push(Span::raw(" quit"));

    let in_flight = app.env().in_flight();
    if in_flight > 0 {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            format!("{in_flight} in flight"),
            Style::default().fg(theme.accent_cyan),
        ));
    }
    if app.debug_visible() {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled("[DEBUG]", Style::default().fg(theme.debug_indicator)));
    }
    spans.push(Span::raw(format!(" │ FPS {}", app.fps())));

    let w = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::TOP).border_type(BorderType::Plain));
    f.render_widget(w, area);
}

fn debug_panel(f: &mut Frame, area: Rect, app: &App) {
    let log = app.debug_log();
    let lines_to_show = (area.height.saturating_sub(2)) as usize;
    let start = log.len().saturating_sub(lines_to_show);
    let lines: Vec<Line> = log[start..]
        .iter()
        .map(|msg| Line::from(Span::raw(msg.as_str())))
        .collect();

    let paragraph = Paragraph::new(lines)
        .style(Style::default().fg(app.theme().text_dim))
        .block(
            Block::default()
                .title(" Debug ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(app.theme().text_dim)),
        );
    f.render_widget(paragraph, area);
}

fn draw_toast_modal(f: &mut Frame, app: &App) {
    let message = app.toast_message().unwrap_or("");
    let area = f.area();
    let width = ((area.width * 4) / 10).max(message.chars().count() as u16 + 6);
    let overlay = centered_rect(area, width, 3);

    f.render_widget(Clear, overlay);
    let text = Paragraph::new(format!("✓ {message}"))
        .style(
            Style::default()
                .fg(app.theme().toast_success)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(app.theme().toast_success)),
        );
    f.render_widget(text, overlay);
}
