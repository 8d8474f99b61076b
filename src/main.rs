use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph, Wrap};

use ipl_terminal::fetch::Endpoints;
use ipl_terminal::provider;
use ipl_terminal::state::{
    apply_delta, AppState, MatchRecord, MatchStatus, ProviderCommand, Screen, TeamMatchesModel,
    View,
};
use ipl_terminal::stats::MatchStats;
use ipl_terminal::theme;

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: mpsc::Sender<ProviderCommand>,
}

impl App {
    fn new(cmd_tx: mpsc::Sender<ProviderCommand>) -> Self {
        Self {
            state: AppState::new(),
            should_quit: false,
            cmd_tx,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => {
                if matches!(self.state.screen, Screen::TeamList) {
                    self.state.select_next();
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if matches!(self.state.screen, Screen::TeamList) {
                    self.state.select_prev();
                }
            }
            KeyCode::Char('d') | KeyCode::Enter => {
                if matches!(self.state.screen, Screen::TeamList) {
                    self.open_selected_team();
                }
            }
            KeyCode::Char('b') | KeyCode::Esc => {
                if matches!(self.state.screen, Screen::TeamMatches { .. }) {
                    self.request_team_list();
                }
            }
            KeyCode::Char('r') => self.retry_current(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }

    fn request_team_list(&mut self) {
        let token = self.state.begin_team_list_load();
        if self
            .cmd_tx
            .send(ProviderCommand::FetchTeamList { token })
            .is_err()
        {
            self.state.push_log("[WARN] Team list request failed");
        }
    }

    fn request_team_matches(&mut self, team_id: &str) {
        let token = self.state.begin_team_matches_load(team_id);
        if self
            .cmd_tx
            .send(ProviderCommand::FetchTeamMatches {
                token,
                team_id: team_id.to_string(),
            })
            .is_err()
        {
            self.state.push_log("[WARN] Team matches request failed");
        }
    }

    fn open_selected_team(&mut self) {
        let Some(team) = self.state.selected_team().cloned() else {
            self.state.push_log("[INFO] No team selected");
            return;
        };
        self.request_team_matches(&team.id);
    }

    fn retry_current(&mut self) {
        match self.state.screen.clone() {
            Screen::TeamList => self.request_team_list(),
            Screen::TeamMatches { team_id } => self.request_team_matches(&team_id),
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    provider::spawn_provider(Endpoints::from_env(), tx, cmd_rx);

    let mut app = App::new(cmd_tx);
    app.request_team_list();
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<ipl_terminal::state::Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match &app.state.screen {
        Screen::TeamList => render_team_list(frame, chunks[1], &app.state),
        Screen::TeamMatches { team_id } => {
            render_team_matches(frame, chunks[1], &app.state, team_id)
        }
    }

    let footer = Paragraph::new(footer_text(&app.state))
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[2]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    match &state.screen {
        Screen::TeamList => "IPL DASHBOARD | Teams".to_string(),
        Screen::TeamMatches { team_id } => format!("IPL DASHBOARD | {team_id} Matches"),
    }
}

fn footer_text(state: &AppState) -> String {
    let keys = match state.screen {
        Screen::TeamList => "j/k/↑/↓ Move | Enter/d Open | r Refresh | ? Help | q Quit",
        Screen::TeamMatches { .. } => "b/Esc Back | r Retry | ? Help | q Quit",
    };
    match state.logs.back() {
        Some(line) => format!("{keys}\n{line}"),
        None => keys.to_string(),
    }
}

fn render_team_list(frame: &mut Frame, area: Rect, state: &AppState) {
    let teams = match &state.team_list {
        View::Loading => {
            render_notice(frame, area, "Loading teams...", Color::DarkGray);
            return;
        }
        View::Error(kind) => {
            render_notice(
                frame,
                area,
                &format!("Could not load teams: {} (r to retry)", kind.label()),
                Color::Red,
            );
            return;
        }
        View::Ready(teams) => teams,
    };

    if teams.is_empty() {
        render_notice(frame, area, "No teams returned", Color::DarkGray);
        return;
    }

    let visible = area.height as usize;
    let start = state.selected.saturating_sub(visible.saturating_sub(1));
    let end = (start + visible).min(teams.len());

    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: area.x,
            y: area.y + i as u16,
            width: area.width,
            height: 1,
        };

        let team = &teams[idx];
        let selected = idx == state.selected;
        let mut style = Style::default().fg(theme::team_accent(&team.id));
        if selected {
            style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
        }

        let line = format!("{:<5} {:<30} {}", team.id, team.name, team.logo_url);
        frame.render_widget(Paragraph::new(line).style(style), row_area);
    }
}

fn render_team_matches(frame: &mut Frame, area: Rect, state: &AppState, team_id: &str) {
    let model = match &state.team_matches {
        View::Loading => {
            render_notice(frame, area, "Loading team matches...", Color::DarkGray);
            return;
        }
        View::Error(kind) => {
            render_notice(
                frame,
                area,
                &format!("Could not load matches: {} (r to retry)", kind.label()),
                Color::Red,
            );
            return;
        }
        View::Ready(model) => model,
    };

    let accent = theme::team_accent(team_id);
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(8),
            Constraint::Min(1),
        ])
        .split(area);

    let banner = Paragraph::new(format!("Banner: {}", model.detail.banner_url))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(banner, sections[0]);

    render_summary_row(frame, sections[1], model, accent);
    render_recent_matches(frame, sections[2], &model.detail.recent_matches);
}

fn render_summary_row(frame: &mut Frame, area: Rect, model: &TeamMatchesModel, accent: Color) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(34)])
        .split(area);

    let latest = &model.detail.latest_match;
    let lines = vec![
        Line::from(vec![
            Span::styled("vs ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                latest.competing_team.clone(),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  {} @ {}", latest.date, latest.venue)),
        ]),
        Line::from(latest.result.clone()),
        Line::from(format!("1st innings: {}", latest.first_innings)),
        Line::from(format!("2nd innings: {}", latest.second_innings)),
        Line::from(format!("Man of the match: {}", latest.man_of_the_match)),
        Line::from(format!("Umpires: {}", latest.umpires)),
    ];
    let card = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Latest Match"));
    frame.render_widget(card, cols[0]);

    let chart = stats_bar_chart(&model.stats);
    frame.render_widget(
        chart.block(Block::default().borders(Borders::ALL).title("Won/Lost/Drawn")),
        cols[1],
    );
}

fn render_recent_matches(frame: &mut Frame, area: Rect, matches: &[MatchRecord]) {
    if matches.is_empty() {
        render_notice(frame, area, "No recent matches", Color::DarkGray);
        return;
    }

    let visible = area.height as usize;
    for (i, record) in matches.iter().take(visible).enumerate() {
        let row_area = Rect {
            x: area.x,
            y: area.y + i as u16,
            width: area.width,
            height: 1,
        };
        let status_style = Style::default().fg(status_color(record.match_status));
        let line = Line::from(vec![
            Span::styled(
                format!("{:<6}", record.match_status.label()),
                status_style.add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                "{:<12} vs {:<28} {}",
                record.date, record.competing_team, record.result
            )),
        ]);
        frame.render_widget(Paragraph::new(line), row_area);
    }
}

fn stats_bar_chart(stats: &MatchStats) -> BarChart<'static> {
    let won = Bar::default()
        .value(stats.won as u64)
        .label(Line::from("Won"))
        .style(Style::default().fg(Color::Green));
    let lost = Bar::default()
        .value(stats.lost as u64)
        .label(Line::from("Lost"))
        .style(Style::default().fg(Color::Red));
    let drawn = Bar::default()
        .value(stats.drawn as u64)
        .label(Line::from("Drawn"))
        .style(Style::default().fg(Color::Yellow));

    BarChart::default()
        .data(BarGroup::default().bars(&[won, lost, drawn]))
        .bar_width(7)
        .bar_gap(2)
}

fn status_color(status: MatchStatus) -> Color {
    match status {
        MatchStatus::Won => Color::Green,
        MatchStatus::Lost => Color::Red,
        MatchStatus::Drawn => Color::Yellow,
    }
}

fn render_notice(frame: &mut Frame, area: Rect, text: &str, color: Color) {
    let notice = Paragraph::new(text).style(Style::default().fg(color));
    frame.render_widget(notice, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let width = area.width.min(52);
    let height = area.height.min(12);
    let overlay = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };
    frame.render_widget(Clear, overlay);

    let text = "Keys\n\
        j/k or ↑/↓  move selection\n\
        Enter or d  open team matches\n\
        b or Esc    back to team list\n\
        r           retry / refresh\n\
        ?           toggle this help\n\
        q           quit";
    let help = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .wrap(Wrap { trim: false });
    frame.render_widget(help, overlay);
}
