// ui rendering

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::tui::app::{App, LogLevel, Mode, Panel, Popup};
use crate::tui::theme::{Theme, ThemeKind};
use crate::{DecisionTrace, Panel as TracePanel, Status, TraceBlock};

pub fn render(frame: &mut Frame, app: &App) {
    let theme = &app.theme;

    // clear with bg color
    frame.render_widget(Clear, frame.area());
    frame.render_widget(Block::default().style(theme.base()), frame.area());

    // header + content + footer
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, app, main[0]);
    render_content(frame, app, main[1]);
    render_footer(frame, app, main[2]);

    match app.popup {
        Popup::Themes => render_theme_popup(frame, app),
        Popup::Models => render_model_popup(frame, app),
        Popup::None => {}
    }
}

fn panel_block<'a>(title: &'a str, active: bool, theme: &Theme) -> Block<'a> {
    let border_style = if active {
        theme.accent()
    } else {
        theme.border()
    };

    Block::default()
        .title(Span::styled(title, theme.title()))
        .borders(Borders::ALL)
        .border_style(border_style)
        .style(theme.base())
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let latency = app
        .latency_ms
        .map(|ms| format!("{ms}ms"))
        .unwrap_or_else(|| "-".to_string());

    let mode_str = match app.mode {
        Mode::Normal => "normal",
        Mode::Insert => "insert",
    };

    let submit_style = if app.console.is_busy() {
        theme.warning()
    } else {
        theme.accent()
    };

    let mut service_line = vec![
        Span::styled("| Service: ", theme.muted()),
        Span::styled(&app.service_url, theme.base()),
        Span::styled(" | ", theme.muted()),
        Span::styled(latency, theme.accent()),
    ];
    if let Some(model) = app.console.draft().embedding_model() {
        service_line.push(Span::styled(" | Model: ", theme.muted()));
        service_line.push(Span::styled(model, theme.base()));
    }

    let lines = vec![
        Line::from(vec![
            Span::styled("| ", theme.muted()),
            Span::styled("ctrlq", theme.title()),
            Span::styled("  control plane console", theme.muted()),
        ]),
        Line::from(service_line),
        Line::from(vec![
            Span::styled("| Mode: ", theme.muted()),
            Span::styled(mode_str, theme.accent()),
            Span::styled("  | ", theme.muted()),
            Span::styled(format!("[{}]", app.console.submit_label()), submit_style),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .style(theme.base());

    let paragraph = Paragraph::new(lines).block(block).style(theme.base());
    frame.render_widget(paragraph, area);
}

fn render_content(frame: &mut Frame, app: &App, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(cols[0]);

    render_query(frame, app, left[0]);
    render_logs(frame, app, left[1]);
    render_trace(frame, app, cols[1]);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let mut parts = vec![
        Span::styled(" Enter ", theme.base().bg(theme.accent).fg(theme.bg)),
        Span::styled(format!(" {} ", app.console.submit_label()), theme.muted()),
        Span::styled("| ", theme.border()),
        Span::styled("i ", theme.accent()),
        Span::styled("Edit ", theme.muted()),
        Span::styled("| ", theme.border()),
        Span::styled("y ", theme.accent()),
        Span::styled("Copy ", theme.muted()),
    ];

    if app.model_selection() {
        parts.extend([
            Span::styled("| ", theme.border()),
            Span::styled("m ", theme.accent()),
            Span::styled("Model ", theme.muted()),
        ]);
    }

    parts.extend([
        Span::styled("| ", theme.border()),
        Span::styled("t ", theme.accent()),
        Span::styled("Theme ", theme.muted()),
        Span::styled("| ", theme.border()),
        Span::styled("q ", theme.accent()),
        Span::styled("Quit ", theme.muted()),
    ]);

    let paragraph = Paragraph::new(Line::from(parts))
        .style(theme.base())
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn render_query(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let active = app.panel == Panel::Query;
    let block = panel_block(" Query ", active, theme);
    let inner = area.inner(Margin {
        horizontal: 1,
        vertical: 1,
    });
    let width = usize::from(inner.width);

    // wrapped here rather than by the paragraph so the cursor math matches
    let (row, col) = app.wrapped_cursor(width);
    let scroll = row.saturating_sub(usize::from(inner.height).saturating_sub(1));

    let text = app.console.text();
    let content: Vec<Line> = if text.is_empty() && app.mode != Mode::Insert {
        vec![Line::styled(
            "press 'i' to enter a query for evaluation...",
            theme.muted(),
        )]
    } else {
        app.wrapped_lines(width)
            .into_iter()
            .map(|l| Line::styled(l, theme.base()))
            .collect()
    };

    let paragraph = Paragraph::new(content)
        .block(block)
        .style(theme.base())
        .scroll((to_u16(scroll), 0));

    frame.render_widget(paragraph, area);

    // real terminal cursor while editing
    if app.mode == Mode::Insert && active {
        let x = inner.x.saturating_add(to_u16(col));
        let y = inner.y.saturating_add(to_u16(row - scroll));

        if x < inner.right() && y < inner.bottom() {
            frame.set_cursor_position((x, y));
        }
    }
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn render_trace(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let block = panel_block(" Decision Trace ", app.panel == Panel::Trace, theme);

    let lines = match app.console.panel() {
        TracePanel::Empty => vec![Line::styled(
            "submit a query to see the verdict",
            theme.muted(),
        )],
        TracePanel::Busy => vec![Line::styled(
            app.console.submit_label().to_string(),
            theme.muted(),
        )],
        TracePanel::Failed(message) => vec![
            Line::styled("request failed", theme.error()),
            Line::from(""),
            Line::styled(message.to_string(), theme.error()),
        ],
        TracePanel::Trace(trace) => trace_lines(&trace, theme),
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(theme.base())
        .wrap(Wrap { trim: false })
        .scroll((to_u16(app.trace_scroll), 0));

    frame.render_widget(paragraph, area);
}

fn field(label: &str, value: String, style: Style, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<12}"), theme.muted()),
        Span::styled(value, style),
    ])
}

fn trace_lines(trace: &DecisionTrace<'_>, theme: &Theme) -> Vec<Line<'static>> {
    let allow = trace.status == Status::Allow;

    let mut lines: Vec<Line<'static>> = vec![
        Line::from(vec![Span::styled(
            format!(" {} ", trace.status),
            theme.badge(allow),
        )]),
        Line::from(""),
        field(
            "Reason:",
            trace.reason_code.to_string(),
            Style::default().fg(theme.reason),
            theme,
        ),
        field(
            "Confidence:",
            trace.confidence.clone(),
            Style::default().fg(theme.confidence),
            theme,
        ),
        field(
            "Evidence:",
            trace.evidence.clone(),
            Style::default().fg(theme.evidence),
            theme,
        ),
    ];

    if let Some(id) = trace.request_id {
        lines.push(field("Request:", id.to_string(), theme.muted(), theme));
    }

    let (title, body) = match trace.block {
        Some(TraceBlock::Answer(answer)) => ("ANSWER", answer),
        Some(TraceBlock::Response(message)) => ("RESPONSE", message),
        None => return lines,
    };

    lines.push(Line::styled("─".repeat(30), theme.border()));
    lines.push(Line::styled(title, theme.muted()));
    lines.push(Line::from(""));
    for l in body.lines() {
        lines.push(Line::styled(l.to_string(), theme.base()));
    }

    lines
}

fn render_logs(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let block = panel_block(" Logs ", app.panel == Panel::Logs, theme);

    let lines: Vec<Line> = app
        .logs
        .iter()
        .map(|entry| {
            let (prefix, style) = match entry.level {
                LogLevel::Ok => ("[OK]", theme.success()),
                LogLevel::Info => ("[--]", theme.muted()),
                LogLevel::Warn => ("[!!]", theme.warning()),
                LogLevel::Error => ("[ERR]", theme.error()),
            };
            Line::from(vec![
                Span::styled(format!("{} ", entry.time), theme.muted()),
                Span::styled(format!("{prefix} "), style),
                Span::styled(entry.message.as_str(), theme.base()),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(theme.base())
        .scroll((to_u16(app.log_scroll), 0));

    frame.render_widget(paragraph, area);
}

fn render_list_popup(
    frame: &mut Frame,
    theme: &Theme,
    title: &str,
    items: &[&str],
    selected: usize,
) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(Span::styled(title, theme.title()))
        .borders(Borders::ALL)
        .border_style(theme.accent())
        .style(theme.base());

    let mut lines: Vec<Line> = items
        .iter()
        .enumerate()
        .map(|(i, &name)| {
            if i == selected {
                Line::from(vec![
                    Span::styled(" > ", theme.accent()),
                    Span::styled(name, theme.selected().fg(theme.accent)),
                ])
            } else {
                Line::styled(format!("   {name}"), theme.base())
            }
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" j/k ", theme.accent()),
        Span::styled("navigate  ", theme.muted()),
        Span::styled("enter ", theme.accent()),
        Span::styled("select  ", theme.muted()),
        Span::styled("esc ", theme.accent()),
        Span::styled("close", theme.muted()),
    ]));

    let paragraph = Paragraph::new(lines).block(block).style(theme.base());
    frame.render_widget(paragraph, area);
}

fn render_theme_popup(frame: &mut Frame, app: &App) {
    let names: Vec<&str> = ThemeKind::ALL.iter().map(|k| k.name()).collect();
    render_list_popup(frame, &app.theme, " select theme ", &names, app.theme_scroll);
}

fn render_model_popup(frame: &mut Frame, app: &App) {
    let Some(models) = app.console.models() else {
        return;
    };
    let names: Vec<&str> = models.models().iter().map(String::as_str).collect();
    render_list_popup(
        frame,
        &app.theme,
        " embedding model ",
        &names,
        app.model_scroll,
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
