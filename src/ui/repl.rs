use std::{
    io::stdout,
    sync::{Arc, Mutex},
    time::Duration,
};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Terminal,
};

use crate::{
    styled_line, styled_span,
    ui::{
        browser::{Field, SkinBrowser},
        views::{render_browser, render_notice, ACCENT},
        RenderContext,
    },
};

use super::ReplError;

const PAGE_SIZE: usize = 10;

enum AppState {
    Browsing,
    Error(String),
}

fn key_hint(state: &AppState) -> &'static str {
    match state {
        AppState::Browsing => {
            "Tab/←/→ list, ↑/↓ PgUp/PgDn Home/End move, Enter choose, d download, o open cache, r reload, q quit."
        }
        AppState::Error(_) => "Use ↑/↓ to scroll, q to quit.",
    }
}

/// Runs `restore` on drop, so the terminal is handed back even while a panic unwinds.
struct RestoreOnDrop<F: FnMut()> {
    restore: F,
}

impl<F: FnMut()> Drop for RestoreOnDrop<F> {
    fn drop(&mut self) {
        (self.restore)();
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(stdout(), LeaveAlternateScreen, cursor::Show);
}

struct App {
    state: AppState,
    focus: Field,
    should_quit: bool,
    scroll_offset: u16,
    panic_flag: Arc<Mutex<Option<String>>>,
}

impl App {
    fn new(panic_flag: Arc<Mutex<Option<String>>>) -> Self {
        Self {
            state: AppState::Browsing,
            focus: Field::Champion,
            should_quit: false,
            scroll_offset: 0,
            panic_flag,
        }
    }

    fn handle_key(&mut self, code: KeyCode, browser: &mut SkinBrowser) {
        if let AppState::Error(_) = self.state {
            match code {
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                KeyCode::Up => self.scroll_offset = self.scroll_offset.saturating_sub(1),
                KeyCode::Down => self.scroll_offset = self.scroll_offset.saturating_add(1),
                _ => {}
            }
            return;
        }

        if browser.notice().is_some() {
            if matches!(code, KeyCode::Enter | KeyCode::Esc) {
                browser.dismiss_notice();
            }
            return;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Right => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Left => self.focus = self.focus.previous(),
            KeyCode::Up => browser.selector_mut(self.focus).previous(),
            KeyCode::Down => browser.selector_mut(self.focus).next(),
            KeyCode::PageUp => browser.selector_mut(self.focus).page_up(PAGE_SIZE),
            KeyCode::PageDown => browser.selector_mut(self.focus).page_down(PAGE_SIZE),
            KeyCode::Home => browser.selector_mut(self.focus).first(),
            KeyCode::End => browser.selector_mut(self.focus).last(),
            KeyCode::Enter => {
                browser.select_highlighted(self.focus);
                if self.focus != Field::Chroma {
                    self.focus = self.focus.next();
                }
            }
            KeyCode::Char('d') => browser.download_selected(),
            KeyCode::Char('o') => browser.open_cache_folder(),
            KeyCode::Char('r') => {
                self.focus = Field::Champion;
                browser.load_catalog();
            }
            _ => {}
        }
    }

    fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
        browser: &mut SkinBrowser,
    ) -> Result<(), ReplError> {
        while !self.should_quit {
            // Check if panic occurred and update state
            if let Ok(panic_guard) = self.panic_flag.lock() {
                if let Some(panic_msg) = panic_guard.as_ref() {
                    if !matches!(self.state, AppState::Error(_)) {
                        error!("{}", panic_msg);
                        self.state = AppState::Error(panic_msg.clone());
                    }
                }
            }

            browser.poll();

            terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
                    .split(f.size());

                let selection = [Field::Champion, Field::Skin, Field::Chroma]
                    .into_iter()
                    .map(|field| {
                        let selector = browser.selector(field);
                        styled_line!(LIST [
                            styled_span!(" {}: ", selector.label(); Color::Gray),
                            styled_span!(selector.chosen().unwrap_or("-"); Bold Color::White),
                        ])
                    })
                    .flat_map(|line| line.spans)
                    .chain([styled_span!("   cache: {}", browser.cache_dir().display(); Color::DarkGray)])
                    .collect::<Vec<_>>();
                let busy = if browser.has_pending_tasks() { ", working…" } else { "" };
                let title = Paragraph::new(styled_line!(VAR selection)).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(ACCENT))
                        .title(format!("Skindrop - LoL Skin Browser [{}{}]", browser.stage().hint(), busy))
                        .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
                );
                f.render_widget(title, chunks[0]);

                let info = key_hint(&self.state);
                let footer = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Min(0), Constraint::Length(info.chars().count() as u16 + 1)])
                    .split(chunks[2]);
                f.render_widget(Paragraph::new(format!(" {}", browser.status())), footer[0]);

                let info_paragraph = Paragraph::new(info)
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Right);
                f.render_widget(info_paragraph, footer[1]);

                match &self.state {
                    AppState::Error(panic_msg) => {
                        let error_block = Block::default()
                            .borders(Borders::ALL)
                            .title("ERROR - Application Panicked")
                            .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                            .padding(ratatui::widgets::Padding::horizontal(1))
                            .border_style(Style::default().fg(Color::Red));

                        let error_text = Paragraph::new(panic_msg.as_str())
                            .block(error_block)
                            .wrap(Wrap { trim: false })
                            .scroll((self.scroll_offset, 0))
                            .style(Style::default().fg(Color::Red));

                        f.render_widget(error_text, chunks[1]);
                    }
                    AppState::Browsing if chunks[1].width < 60 || chunks[1].height < 12 => {
                        let rc = RenderContext {
                            frame: f,
                            area: chunks[1],
                            block: Block::default().borders(Borders::ALL),
                        };
                        rc.error("Terminal too small, please enlarge the window.");
                    }
                    AppState::Browsing => {
                        render_browser(f, chunks[1], browser, self.focus);
                        if let Some(notice) = browser.notice() {
                            render_notice(f, chunks[1], notice);
                        }
                    }
                }
            })?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    self.handle_key(key.code, browser);
                }
            }
        }

        Ok(())
    }
}

pub fn run(mut browser: SkinBrowser) -> Result<(), ReplError> {
    // Enable backtrace in debug builds
    #[cfg(debug_assertions)]
    {
        std::env::set_var("RUST_BACKTRACE", "1");
    }

    let panic_flag = Arc::new(Mutex::new(None));
    let panic_flag_hook = panic_flag.clone();

    // Panics on any thread end up on the error page instead of tearing down the terminal
    std::panic::set_hook(Box::new(move |panic_info| {
        let mut msg = String::from("Application panicked!\n\n");

        if let Some(location) = panic_info.location() {
            msg.push_str(&format!(
                "Location: {}:{}:{}\n\n",
                location.file(),
                location.line(),
                location.column()
            ));
        }

        msg.push_str("Message:\n");
        if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            msg.push_str(&format!("  {}\n\n", s));
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            msg.push_str(&format!("  {}\n\n", s));
        } else {
            msg.push_str("  <no message>\n\n");
        }

        let thread = std::thread::current();
        msg.push_str(&format!("Thread: {}\n\n", thread.name().unwrap_or("<unnamed>")));

        if std::env::var("RUST_BACKTRACE").is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("full")) {
            msg.push_str(&format!("Backtrace:\n{}\n", std::backtrace::Backtrace::force_capture()));
        }

        if let Ok(mut panic_info_guard) = panic_flag_hook.lock() {
            *panic_info_guard = Some(msg);
        }
    }));

    enable_raw_mode()?;
    let _restore = RestoreOnDrop { restore: restore_terminal };
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!("Terminal UI started");
    let mut app = App::new(panic_flag);
    let result = app.run(&mut terminal, &mut browser);

    if let Err(err) = &result {
        error!("Terminal UI failed: {}", err);
    }

    result
}

#[cfg(test)]
mod tests {
    use std::{
        panic,
        sync::atomic::{AtomicBool, Ordering},
    };

    use super::*;

    #[test]
    fn restore_runs_while_unwinding() {
        let restored = Arc::new(AtomicBool::new(false));
        let flag = restored.clone();

        let outcome = panic::catch_unwind(move || {
            let _restore = RestoreOnDrop {
                restore: move || flag.store(true, Ordering::SeqCst),
            };
            panic!("draw failed");
        });

        assert!(outcome.is_err());
        assert!(restored.load(Ordering::SeqCst));
    }

    #[test]
    fn key_hint_lists_every_binding() {
        let hint = key_hint(&AppState::Browsing);
        for key in ["Tab", "PgUp/PgDn", "Home/End", "Enter", "d download", "o open cache", "r reload", "q quit"] {
            assert!(hint.contains(key), "missing {}", key);
        }
        assert!(key_hint(&AppState::Error(String::new())).contains("scroll"));
    }
}
