use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{block::Title, Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::{EventKind, EventOutcome, RenderContext};
use tui_dispatch_components::centered_rect;

use crate::action::Action;
use crate::battle::{MoveKind, PLAYER_MOVES};
use crate::leaderboard::LeaderboardEntry;
use crate::species::{Species, BOSS_NAME};
use crate::state::{AppState, Mood, Phase};

const BG_BASE: Color = Color::Rgb(22, 24, 40);
const BG_PANEL: Color = Color::Rgb(34, 38, 62);
const BG_PANEL_ALT: Color = Color::Rgb(28, 32, 52);
const TEXT_MAIN: Color = Color::Rgb(230, 232, 244);
const TEXT_DIM: Color = Color::Rgb(160, 166, 196);
const ACCENT_GREEN: Color = Color::Rgb(110, 206, 150);
const ACCENT_GOLD: Color = Color::Rgb(230, 200, 110);
const ACCENT_RED: Color = Color::Rgb(224, 100, 100);
const ACCENT_SHINY: Color = Color::Rgb(240, 150, 220);
const HIGHLIGHT_BG: Color = ACCENT_GREEN;
const HIGHLIGHT_TEXT: Color = Color::Rgb(16, 20, 30);
const BORDER_ACCENT: Color = Color::Rgb(86, 94, 140);

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, _ctx: RenderContext) {
    draw(frame, area, state);
}

pub fn draw(frame: &mut Frame, area: Rect, state: &AppState) {
    frame.render_widget(Block::default().style(Style::default().bg(BG_BASE)), area);
    if state.phase == Phase::Intro {
        render_intro(frame, area, state);
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(3)])
        .split(area);
    match state.phase {
        Phase::Intro => {}
        Phase::Selection => render_selection(frame, layout[0], state),
        Phase::Round1 | Phase::Round2 => render_quiz(frame, layout[0], state),
        Phase::Evolution | Phase::PreBoss => render_interlude(frame, layout[0], state),
        Phase::BossBattle => render_boss(frame, layout[0], state),
        Phase::GameOver | Phase::Victory => render_finished(frame, layout[0], state),
    }
    render_status(frame, layout[1], state);
}

pub fn handle_event(event: &EventKind, state: &AppState) -> EventOutcome<Action> {
    match event {
        EventKind::Resize(width, height) => {
            EventOutcome::action(Action::UiTerminalResize(*width, *height)).with_render()
        }
        EventKind::Key(key) => handle_key(*key, state),
        _ => EventOutcome::ignored(),
    }
}

fn handle_key(key: KeyEvent, state: &AppState) -> EventOutcome<Action> {
    if state.phase == Phase::Intro {
        return handle_intro_key(key);
    }

    let global = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('m') => Some(Action::ToggleMute),
        KeyCode::Char('b') if state.phase.shop_open() => Some(Action::ShopBuyBerry),
        KeyCode::Char('u') if state.phase.shop_open() => Some(Action::ShopUseBerry),
        _ => None,
    };
    if global.is_some() {
        return EventOutcome::from(global);
    }

    match state.phase {
        Phase::Selection => handle_selection_key(key, state),
        Phase::Round1 | Phase::Round2 => handle_quiz_key(key, state),
        Phase::BossBattle => handle_boss_key(key, state),
        Phase::GameOver | Phase::Victory => {
            let action = match key.code {
                KeyCode::Char('r') => Some(Action::Restart),
                KeyCode::Char('s') => Some(Action::Share),
                _ => None,
            };
            EventOutcome::from(action)
        }
        Phase::Intro | Phase::Evolution | Phase::PreBoss => EventOutcome::ignored(),
    }
}

fn handle_intro_key(key: KeyEvent) -> EventOutcome<Action> {
    let action = match key.code {
        KeyCode::Enter => Some(Action::StartGame),
        KeyCode::Tab => Some(Action::Share),
        KeyCode::Backspace => Some(Action::NameBackspace),
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(ch) => Some(Action::NameInput(ch)),
        _ => None,
    };
    EventOutcome::from(action)
}

fn is_confirm(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Enter | KeyCode::Char('z') | KeyCode::Char('Z')
    )
}

fn digit_index(code: KeyCode, count: usize) -> Option<usize> {
    let KeyCode::Char(ch) = code else {
        return None;
    };
    let digit = ch.to_digit(10)? as usize;
    (1..=count).contains(&digit).then(|| digit - 1)
}

/// Wrapping step through `count` entries; `None` for non-navigation keys.
fn step_index(code: KeyCode, current: usize, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    match code {
        KeyCode::Left | KeyCode::Up | KeyCode::Char('a') | KeyCode::Char('w') => {
            Some(if current == 0 { count - 1 } else { current - 1 })
        }
        KeyCode::Right | KeyCode::Down | KeyCode::Char('d') | KeyCode::Char('s') => {
            Some((current + 1) % count)
        }
        _ => None,
    }
}

fn handle_selection_key(key: KeyEvent, state: &AppState) -> EventOutcome<Action> {
    let count = Species::ALL.len();
    if is_confirm(key.code) {
        return EventOutcome::action(Action::SpeciesConfirm);
    }
    let index = digit_index(key.code, count)
        .or_else(|| step_index(key.code, state.selection_index, count));
    EventOutcome::from(index.map(Action::SpeciesSelect))
}

fn handle_quiz_key(key: KeyEvent, state: &AppState) -> EventOutcome<Action> {
    if state.stats.is_fainted() {
        return EventOutcome::ignored();
    }
    let count = state
        .quiz
        .current()
        .map(|question| question.options.len())
        .unwrap_or(0);
    if is_confirm(key.code) {
        return EventOutcome::action(Action::QuizAnswer(state.quiz.selected));
    }
    if let Some(index) = digit_index(key.code, count) {
        return EventOutcome::action(Action::QuizAnswer(index));
    }
    EventOutcome::from(step_index(key.code, state.quiz.selected, count).map(Action::QuizSelect))
}

fn handle_boss_key(key: KeyEvent, state: &AppState) -> EventOutcome<Action> {
    if !state.battle.player_turn {
        return EventOutcome::ignored();
    }
    let count = PLAYER_MOVES.len();
    if is_confirm(key.code) {
        return EventOutcome::action(Action::BossAttack(state.battle.selected));
    }
    if let Some(index) = digit_index(key.code, count) {
        return EventOutcome::action(Action::BossAttack(index));
    }
    EventOutcome::from(step_index(key.code, state.battle.selected, count).map(Action::MoveSelect))
}

fn render_intro(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = panel_block(" RHYTHMON ", BG_PANEL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let content = centered_rect(50, 20, inner);
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(4),
        ])
        .split(content);

    let title = Paragraph::new(Text::from(vec![
        Line::from(Span::styled(
            "♩ ♪ RHYTHMON ♪ ♩",
            Style::default()
                .fg(ACCENT_GOLD)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Learn your rhythms, raise your partner.",
            Style::default().fg(TEXT_DIM),
        )),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(title, layout[0]);

    let cursor = if (state.tick / 4) % 2 == 0 { "_" } else { " " };
    let input = Paragraph::new(Line::from(vec![
        Span::raw(state.name_input.clone()),
        Span::styled(cursor, Style::default().fg(ACCENT_GREEN)),
    ]))
    .block(panel_block(" Trainer name ", BG_PANEL_ALT));
    frame.render_widget(input, layout[1]);

    let hint = state
        .message
        .clone()
        .unwrap_or_else(|| "Enter: start  |  Tab: share  |  Esc: quit".to_string());
    frame.render_widget(
        Paragraph::new(Span::styled(hint, Style::default().fg(TEXT_DIM)))
            .alignment(Alignment::Center),
        layout[2],
    );

    let board = Paragraph::new(Text::from(leaderboard_lines(&state.leaderboard, None)))
        .block(panel_block(" Top 10 ", BG_PANEL_ALT));
    frame.render_widget(board, layout[3]);
}

fn render_selection(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = panel_block(" CHOOSE YOUR PARTNER ", BG_PANEL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(20)])
        .split(inner);

    let mut list_lines: Vec<Line> = Species::ALL
        .iter()
        .enumerate()
        .map(|(idx, species)| {
            menu_line(
                &format!("{}. {}", idx + 1, species.profile().name),
                idx == state.selection_index,
            )
        })
        .collect();
    list_lines.push(Line::from(""));
    list_lines.push(Line::from(Span::styled(
        "Z/Enter: Choose",
        Style::default().fg(TEXT_DIM),
    )));
    frame.render_widget(
        Paragraph::new(Text::from(list_lines)).block(panel_block("Partners", BG_PANEL_ALT)),
        layout[0],
    );

    let species = Species::from_index(state.selection_index).unwrap_or(Species::Charmander);
    let profile = species.profile();
    let stages = profile
        .stages
        .iter()
        .map(|stage| format!("{} ({} HP)", stage.name, stage.max_hp))
        .collect::<Vec<_>>()
        .join(" > ");
    let preview = vec![
        Line::from(Span::styled(
            profile.name.to_ascii_uppercase(),
            Style::default()
                .fg(ACCENT_GREEN)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Type: {}", profile.kind)),
        Line::from(profile.description),
        Line::from(""),
        Line::from(Span::styled(stages, Style::default().fg(TEXT_DIM))),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(preview))
            .wrap(Wrap { trim: true })
            .block(panel_block("Preview", BG_PANEL_ALT)),
        layout[1],
    );
}

fn render_quiz(frame: &mut Frame, area: Rect, state: &AppState) {
    let total = state.quiz.questions.len();
    let title = format!(
        " ROUND {}  |  Question {}/{} ",
        state.quiz.round,
        (state.quiz.index + 1).min(total),
        total
    );
    let block = panel_block(title.as_str(), BG_PANEL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(inner);

    render_partner(frame, layout[0], state);

    let Some(question) = state.quiz.current() else {
        return;
    };
    let mut lines = vec![
        Line::from(Span::styled(
            question.prompt.clone(),
            Style::default()
                .fg(ACCENT_GOLD)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    let mut spans = Vec::new();
    for (idx, option) in question.options.iter().enumerate() {
        let label = format!(" {}: {} ", idx + 1, option.label);
        spans.push(if idx == state.quiz.selected {
            Span::styled(
                label,
                Style::default()
                    .fg(HIGHLIGHT_TEXT)
                    .bg(HIGHLIGHT_BG)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(label, Style::default().fg(TEXT_MAIN))
        });
        spans.push(Span::raw("   "));
    }
    lines.push(Line::from(spans));
    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        layout[1],
    );

    render_message(frame, layout[2], state);
}

fn render_partner(frame: &mut Frame, area: Rect, state: &AppState) {
    let face = match state.mood {
        Mood::Neutral => "(•‿•)",
        Mood::Happy => "(^o^)",
        Mood::Sad => "(;_;)",
    };
    let shiny = state.creature.is_some_and(|c| c.shiny);
    let name_style = Style::default()
        .fg(if shiny { ACCENT_SHINY } else { ACCENT_GREEN })
        .add_modifier(Modifier::BOLD);
    let mut name_spans = vec![
        Span::styled(state.creature_name().to_ascii_uppercase(), name_style),
        Span::raw("  "),
        Span::styled(face, Style::default().fg(TEXT_MAIN)),
    ];
    if shiny {
        name_spans.push(Span::styled("  ★", Style::default().fg(ACCENT_SHINY)));
    }
    let lines = vec![
        Line::from(name_spans),
        hp_line(state.stats.hp, state.stats.max_hp),
    ];
    frame.render_widget(Paragraph::new(Text::from(lines)), area);
}

fn render_message(frame: &mut Frame, area: Rect, state: &AppState) {
    let text = state.message.clone().unwrap_or_default();
    frame.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(TEXT_MAIN))
            .wrap(Wrap { trim: true })
            .block(panel_block("", BG_PANEL_ALT)),
        area,
    );
}

fn render_interlude(frame: &mut Frame, area: Rect, state: &AppState) {
    let flash = (state.tick / 3) % 2 == 0;
    let (title, headline, detail) = if state.phase == Phase::Evolution {
        (
            " EVOLUTION ",
            state
                .evolution_message
                .clone()
                .unwrap_or_else(|| "Something is happening...".to_string()),
            format!("{} now has {} HP.", state.creature_name(), state.stats.max_hp),
        )
    } else {
        (
            " WARNING ",
            state
                .message
                .clone()
                .unwrap_or_else(|| "Something is approaching...".to_string()),
            format!("{} blocks the way!", BOSS_NAME),
        )
    };
    let color = if flash { ACCENT_GOLD } else { TEXT_MAIN };

    let block = panel_block(title, BG_PANEL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let content = centered_rect(60, 5, inner);
    let lines = vec![
        Line::from(Span::styled(
            headline,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(detail, Style::default().fg(TEXT_DIM))),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        content,
    );
}

fn render_boss(frame: &mut Frame, area: Rect, state: &AppState) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Min(6),
        ])
        .split(area);

    let boss_block = panel_block(format!(" {} ", BOSS_NAME.to_ascii_uppercase()), BG_PANEL);
    let boss_inner = boss_block.inner(layout[0]);
    frame.render_widget(boss_block, layout[0]);
    frame.render_widget(
        Paragraph::new(hp_line(state.boss.hp, state.boss.max_hp)),
        boss_inner,
    );

    let player_block = panel_block(format!(" {} ", state.stats.name), BG_PANEL);
    let player_inner = player_block.inner(layout[1]);
    frame.render_widget(player_block, layout[1]);
    render_partner(frame, player_inner, state);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(20)])
        .split(layout[2]);

    let mut move_lines: Vec<Line> = PLAYER_MOVES
        .iter()
        .enumerate()
        .map(|(idx, mv)| {
            let uses = match state.battle.usage.remaining(mv.id) {
                Some(left) => format!(" {}/{}", left, mv.max_uses.unwrap_or(0)),
                None => String::new(),
            };
            let kind = match mv.kind {
                MoveKind::Normal => "",
                MoveKind::Special => " *",
            };
            let label = format!("{}. {}{}{}", idx + 1, mv.name, kind, uses);
            if state.battle.usage.can_use(mv.id) {
                menu_line(&label, idx == state.battle.selected)
            } else {
                Line::from(Span::styled(label, Style::default().fg(TEXT_DIM)))
            }
        })
        .collect();
    move_lines.push(Line::from(""));
    move_lines.push(Line::from(Span::styled(
        if state.battle.player_turn {
            "Z/Enter: Attack"
        } else {
            "Waiting..."
        },
        Style::default().fg(TEXT_DIM),
    )));
    frame.render_widget(
        Paragraph::new(Text::from(move_lines)).block(panel_block("FIGHT", BG_PANEL_ALT)),
        bottom[0],
    );

    let mut log_lines: Vec<Line> = state
        .battle
        .log
        .iter()
        .map(|line| Line::from(line.clone()))
        .collect();
    if let Some(message) = &state.message {
        log_lines.push(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(ACCENT_GOLD),
        )));
    }
    frame.render_widget(
        Paragraph::new(Text::from(log_lines))
            .wrap(Wrap { trim: true })
            .block(panel_block("LOG", BG_PANEL_ALT)),
        bottom[1],
    );
}

fn render_finished(frame: &mut Frame, area: Rect, state: &AppState) {
    let (title, headline, color) = if state.phase == Phase::Victory {
        (" VICTORY ", "You defeated the boss!", ACCENT_GREEN)
    } else {
        (" GAME OVER ", "Your partner can't battle anymore.", ACCENT_RED)
    };
    let block = panel_block(title, BG_PANEL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(4)])
        .split(centered_rect(50, 18, inner));

    let mut lines = vec![
        Line::from(Span::styled(
            headline,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Final score: {:.0}", state.stats.score)),
    ];
    if let Some(message) = &state.message {
        if message != headline {
            lines.push(Line::from(Span::styled(
                message.clone(),
                Style::default().fg(TEXT_DIM),
            )));
        }
    }
    lines.push(Line::from(Span::styled(
        "r: restart  |  s: share  |  q: quit",
        Style::default().fg(TEXT_DIM),
    )));
    frame.render_widget(
        Paragraph::new(Text::from(lines)).alignment(Alignment::Center),
        layout[0],
    );

    let highlight = (state.phase == Phase::Victory).then_some(state.stats.name.as_str());
    frame.render_widget(
        Paragraph::new(Text::from(leaderboard_lines(&state.leaderboard, highlight)))
            .block(panel_block(" Top 10 ", BG_PANEL_ALT)),
        layout[1],
    );
}

fn render_status(frame: &mut Frame, area: Rect, state: &AppState) {
    let sound = if state.muted { "muted" } else { "sound" };
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", state.stats.name),
            Style::default()
                .fg(ACCENT_GREEN)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("[{}]", state.phase.label()),
            Style::default().fg(TEXT_DIM),
        ),
        Span::raw(format!(
            " Score {:.0}  Streak {}  Berries {}  HP {}/{} ",
            state.stats.score,
            state.stats.streak,
            state.stats.berries,
            state.stats.hp,
            state.stats.max_hp
        )),
        Span::styled(
            format!(" b: buy  u: use  m: {}  q: quit ", sound),
            Style::default().fg(TEXT_DIM),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(line).block(panel_block("", BG_PANEL_ALT)),
        area,
    );
}

fn leaderboard_lines(entries: &[LeaderboardEntry], highlight: Option<&str>) -> Vec<Line<'static>> {
    if entries.is_empty() {
        return vec![Line::from(Span::styled(
            "No scores yet.",
            Style::default().fg(TEXT_DIM),
        ))];
    }
    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let star = if entry.is_shiny { " ★" } else { "" };
            let label = format!("{:>2}. {:<16} {:>8.0}{}", idx + 1, entry.name, entry.score, star);
            let selected = highlight.is_some_and(|name| name == entry.name);
            menu_line(&label, selected)
        })
        .collect()
}

fn hp_line(current: u32, max: u32) -> Line<'static> {
    let width: usize = 20;
    let ratio = if max == 0 {
        0.0
    } else {
        current as f32 / max as f32
    };
    let filled = ((ratio * width as f32).round() as usize).min(width);
    let empty = width.saturating_sub(filled);
    let color = if ratio > 0.5 {
        ACCENT_GREEN
    } else if ratio > 0.2 {
        ACCENT_GOLD
    } else {
        ACCENT_RED
    };
    Line::from(vec![
        Span::raw("HP "),
        Span::styled(
            "█".repeat(filled),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled("░".repeat(empty), Style::default().fg(TEXT_DIM)),
        Span::raw(format!(" {}/{}", current, max)),
    ])
}

fn panel_block<'a, T>(title: T, bg: Color) -> Block<'a>
where
    T: Into<Title<'a>>,
{
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title)
        .style(Style::default().bg(bg).fg(TEXT_MAIN))
        .border_style(Style::default().fg(BORDER_ACCENT))
}

fn menu_line(label: &str, selected: bool) -> Line<'static> {
    let style = if selected {
        Style::default()
            .fg(HIGHLIGHT_TEXT)
            .bg(HIGHLIGHT_BG)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_MAIN)
    };
    Line::from(Span::styled(label.to_string(), style))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Creature;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state_in(phase: Phase) -> AppState {
        let mut state = AppState::default();
        state.phase = phase;
        state.creature = Some(Creature::new(Species::Chimchar));
        state
    }

    #[test]
    fn intro_types_letters_that_are_shortcuts_elsewhere() {
        let state = AppState::default();
        let actions = handle_key(press(KeyCode::Char('q')), &state).actions;
        assert_eq!(actions, vec![Action::NameInput('q')]);
        let actions = handle_key(press(KeyCode::Enter), &state).actions;
        assert_eq!(actions, vec![Action::StartGame]);
    }

    #[test]
    fn selection_wraps_and_digits_pick() {
        let state = state_in(Phase::Selection);
        let actions = handle_key(press(KeyCode::Left), &state).actions;
        assert_eq!(actions, vec![Action::SpeciesSelect(2)]);
        let actions = handle_key(press(KeyCode::Char('2')), &state).actions;
        assert_eq!(actions, vec![Action::SpeciesSelect(1)]);
        let actions = handle_key(press(KeyCode::Char('4')), &state).actions;
        assert!(actions.is_empty());
    }

    #[test]
    fn quiz_digits_answer_directly() {
        let mut state = state_in(Phase::Round1);
        state.quiz = crate::state::QuizState::new(1, crate::quiz::round1_questions());
        let actions = handle_key(press(KeyCode::Char('3')), &state).actions;
        assert_eq!(actions, vec![Action::QuizAnswer(2)]);
        let actions = handle_key(press(KeyCode::Right), &state).actions;
        assert_eq!(actions, vec![Action::QuizSelect(1)]);
    }

    #[test]
    fn boss_keys_wait_for_player_turn() {
        let mut state = state_in(Phase::BossBattle);
        let actions = handle_key(press(KeyCode::Char('4')), &state).actions;
        assert_eq!(actions, vec![Action::BossAttack(3)]);

        state.battle.player_turn = false;
        let actions = handle_key(press(KeyCode::Char('4')), &state).actions;
        assert!(actions.is_empty());
    }

    #[test]
    fn shop_keys_only_while_shop_is_open() {
        let state = state_in(Phase::Round2);
        let actions = handle_key(press(KeyCode::Char('b')), &state).actions;
        assert_eq!(actions, vec![Action::ShopBuyBerry]);

        let state = state_in(Phase::Victory);
        let actions = handle_key(press(KeyCode::Char('b')), &state).actions;
        assert!(actions.is_empty());
        let actions = handle_key(press(KeyCode::Char('r')), &state).actions;
        assert_eq!(actions, vec![Action::Restart]);
    }

    #[test]
    fn share_keys_on_intro_and_finished_screens() {
        let state = AppState::default();
        let actions = handle_key(press(KeyCode::Tab), &state).actions;
        assert_eq!(actions, vec![Action::Share]);
        // Letters still go to the name field.
        let actions = handle_key(press(KeyCode::Char('s')), &state).actions;
        assert_eq!(actions, vec![Action::NameInput('s')]);

        let state = state_in(Phase::GameOver);
        let actions = handle_key(press(KeyCode::Char('s')), &state).actions;
        assert_eq!(actions, vec![Action::Share]);

        let state = state_in(Phase::Round1);
        let actions = handle_key(press(KeyCode::Tab), &state).actions;
        assert!(actions.is_empty());
    }
}
