// app state for the tui

use std::time::Duration;

use crate::tui::theme::{Theme, ThemeKind, detect_theme};
use crate::{
    Console, ControlResponse, Error, Panel as TracePanel, QueryRequest, RequestState, Status,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Query,
    Trace,
    Logs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Insert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Themes,
    Models,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Ok,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub time: String,
    pub message: String,
}

pub struct App {
    pub mode: Mode,
    pub panel: Panel,
    pub popup: Popup,
    pub theme_kind: ThemeKind,
    pub theme: Theme,

    pub service_url: String,
    pub console: Console,

    // char index into the query text
    pub cursor: usize,

    pub latency_ms: Option<u64>,
    pub logs: Vec<LogEntry>,

    // scroll
    pub trace_scroll: usize,
    pub log_scroll: usize,
    pub theme_scroll: usize,
    pub model_scroll: usize,
}

impl App {
    pub fn new(console: Console, service_url: String, theme: Option<ThemeKind>) -> Self {
        let theme_kind = theme.unwrap_or_else(detect_theme);
        let model_scroll = console.models().map(|m| m.index()).unwrap_or(0);

        let mut app = Self {
            mode: Mode::Normal,
            panel: Panel::Query,
            popup: Popup::None,
            theme_kind,
            theme: Theme::from_kind(theme_kind),
            service_url,
            console,
            cursor: 0,
            latency_ms: None,
            logs: Vec::new(),
            trace_scroll: 0,
            log_scroll: 0,
            theme_scroll: theme_kind.index(),
            model_scroll,
        };

        app.log(LogLevel::Info, format!("decision service: {}", app.service_url));
        if let Some(model) = app.console.draft().embedding_model().map(str::to_string) {
            app.log(LogLevel::Info, format!("embedding model: {model}"));
        }

        app
    }

    pub fn log(&mut self, level: LogLevel, message: String) {
        self.logs.push(LogEntry {
            level,
            time: chrono::Local::now().format("%H:%M:%S").to_string(),
            message,
        });
        // auto-scroll to bottom
        if self.logs.len() > 1 {
            self.log_scroll = self.logs.len().saturating_sub(10);
        }
    }

    pub fn model_selection(&self) -> bool {
        self.console.models().is_some()
    }

    pub fn set_theme(&mut self, kind: ThemeKind) {
        self.theme_kind = kind;
        self.theme = Theme::from_kind(kind);
        self.theme_scroll = kind.index();
    }

    pub fn open_theme_popup(&mut self) {
        self.popup = Popup::Themes;
        self.theme_scroll = self.theme_kind.index();
    }

    pub fn open_model_popup(&mut self) {
        if let Some(models) = self.console.models() {
            self.model_scroll = models.index();
            self.popup = Popup::Models;
        }
    }

    pub fn close_popup(&mut self) {
        self.popup = Popup::None;
    }

    pub fn popup_up(&mut self) {
        match self.popup {
            Popup::Themes => self.theme_scroll = self.theme_scroll.saturating_sub(1),
            Popup::Models => self.model_scroll = self.model_scroll.saturating_sub(1),
            Popup::None => {}
        }
    }

    pub fn popup_down(&mut self) {
        match self.popup {
            Popup::Themes => {
                if self.theme_scroll + 1 < ThemeKind::ALL.len() {
                    self.theme_scroll += 1;
                }
            }
            Popup::Models => {
                let len = self.console.models().map(|m| m.models().len()).unwrap_or(0);
                if self.model_scroll + 1 < len {
                    self.model_scroll += 1;
                }
            }
            Popup::None => {}
        }
    }

    pub fn popup_select(&mut self) {
        match self.popup {
            Popup::Themes => self.set_theme(ThemeKind::ALL[self.theme_scroll]),
            Popup::Models => {
                let index = self.model_scroll;
                let chosen = self.console.models_mut().map(|models| {
                    models.select_index(index);
                    models.selected().to_string()
                });
                if let Some(model) = chosen {
                    self.log(LogLevel::Ok, format!("embedding model: {model}"));
                }
            }
            Popup::None => {}
        }
        self.close_popup();
    }

    pub fn cycle_panel(&mut self) {
        self.panel = match self.panel {
            Panel::Query => Panel::Trace,
            Panel::Trace => Panel::Logs,
            Panel::Logs => Panel::Query,
        };
    }

    pub fn enter_insert(&mut self) {
        self.panel = Panel::Query;
        self.mode = Mode::Insert;
    }

    pub fn exit_insert(&mut self) {
        self.mode = Mode::Normal;
    }

    // query editing, cursor counts chars not bytes
    fn byte_index(&self) -> usize {
        let text = self.console.text();
        text.char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(text.len())
    }

    fn text_len(&self) -> usize {
        self.console.text().chars().count()
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index();
        self.console.draft_mut().text.insert(at, c);
        self.cursor += 1;
    }

    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index();
            self.console.draft_mut().text.remove(at);
        }
    }

    pub fn delete_char_forward(&mut self) {
        if self.cursor < self.text_len() {
            let at = self.byte_index();
            self.console.draft_mut().text.remove(at);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.text_len() {
            self.cursor += 1;
        }
    }

    pub fn move_cursor_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.text_len();
    }

    pub fn clear_query(&mut self) {
        self.console.draft_mut().text.clear();
        self.cursor = 0;
    }

    /// (line, column) of the cursor inside the query text.
    pub fn cursor_position(&self) -> (usize, usize) {
        let mut line = 0;
        let mut col = 0;
        for ch in self.console.text().chars().take(self.cursor) {
            if ch == '\n' {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        (line, col)
    }

    /// Query text hard-wrapped to `width` columns, one entry per screen row.
    pub fn wrapped_lines(&self, width: usize) -> Vec<String> {
        let width = width.max(1);
        let mut rows = Vec::new();
        for line in self.console.text().split('\n') {
            let chars: Vec<char> = line.chars().collect();
            if chars.is_empty() {
                rows.push(String::new());
            } else {
                rows.extend(chars.chunks(width).map(|c| c.iter().collect::<String>()));
            }
        }
        rows
    }

    /// Screen (row, column) of the cursor once the text is wrapped to `width`.
    pub fn wrapped_cursor(&self, width: usize) -> (usize, usize) {
        let width = width.max(1);
        let (line, col) = self.cursor_position();
        let rows_above: usize = self
            .console
            .text()
            .split('\n')
            .take(line)
            .map(|l| l.chars().count().div_ceil(width).max(1))
            .sum();
        (rows_above + col / width, col % width)
    }

    pub fn submit(&mut self) -> Option<QueryRequest> {
        if self.console.is_busy() {
            self.log(LogLevel::Warn, "a query is already being evaluated".to_string());
            return None;
        }

        let request = self.console.submit()?;
        self.trace_scroll = 0;
        self.latency_ms = None;

        let first_line = request.query.trim().lines().next().unwrap_or_default();
        self.log(LogLevel::Info, format!("evaluating: {first_line}"));
        Some(request)
    }

    pub fn settle(&mut self, outcome: Result<ControlResponse, Error>, elapsed: Duration) {
        self.console.settle(outcome);
        self.latency_ms = Some(elapsed.as_millis() as u64);

        let entry = match self.console.state() {
            RequestState::Failed(message) => Some((LogLevel::Error, message.clone())),
            _ => self.console.response().map(|r| {
                let level = match r.status {
                    Status::Allow => LogLevel::Ok,
                    Status::Abstain => LogLevel::Warn,
                };
                (level, format!("{} ({})", r.status, r.reason_code))
            }),
        };

        if let Some((level, message)) = entry {
            self.log(level, message);
        }
    }

    /// Current trace as plain text, for the clipboard.
    pub fn trace_text(&self) -> Option<String> {
        match self.console.panel() {
            TracePanel::Trace(trace) => Some(trace.to_string()),
            _ => None,
        }
    }

    pub fn scroll_up(&mut self) {
        match self.panel {
            Panel::Trace => self.trace_scroll = self.trace_scroll.saturating_sub(1),
            Panel::Logs => self.log_scroll = self.log_scroll.saturating_sub(1),
            Panel::Query => {}
        }
    }

    pub fn scroll_down(&mut self) {
        match self.panel {
            Panel::Trace => self.trace_scroll += 1,
            Panel::Logs => self.log_scroll += 1,
            Panel::Query => {}
        }
    }
}
