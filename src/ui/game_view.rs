use crate::game::{Board, Position, Session, Token};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const PALETTE: [Color; 10] = [
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::LightRed,
    Color::LightGreen,
    Color::LightBlue,
    Color::LightMagenta,
];

pub fn render(
    frame: &mut Frame,
    session: &Session,
    selected_column: usize,
    message: &Option<String>,
) {
    let board_height = session.board().rows() as u16 + 4;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // Header
            Constraint::Min(board_height),    // Board
            Constraint::Length(3),            // Message
            Constraint::Length(3),            // Controls
        ])
        .split(frame.area());

    render_header(frame, session, chunks[0]);
    render_board(frame, session, selected_column, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn token_color(session: &Session, token: Token) -> Color {
    session
        .players()
        .tokens()
        .iter()
        .position(|&t| t == token)
        .map_or(Color::White, |seat| PALETTE[seat % PALETTE.len()])
}

fn render_header(frame: &mut Frame, session: &Session, area: Rect) {
    let board = session.board();
    let current = session.current_player();
    let rules = format!(
        "{}x{}, {} to win, {} players",
        board.rows(),
        board.columns(),
        board.num_to_win(),
        session.players().count()
    );

    let status = if session.is_terminal() {
        format!("Game Over  |  {}", rules)
    } else {
        format!("Current Player: {}  |  {}", current, rules)
    };

    let header = Paragraph::new(status)
        .style(
            Style::default()
                .fg(token_color(session, current))
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Connect X"));

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, session: &Session, selected_column: usize, area: Rect) {
    let board: &Board = session.board();
    let winning = session.winning_line().unwrap_or_default();
    let inner_width = board.columns() * 3 + 1;
    let mut lines = Vec::new();

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")];
    for col in 0..board.columns() {
        let label = format!("{:^3}", col);
        if col == selected_column {
            col_line.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(label));
        }
    }
    col_line.push(Span::raw("  "));
    lines.push(Line::from(col_line));

    lines.push(Line::from(format!("  ╔{}╗", "═".repeat(inner_width))));

    // Row 0 is the bottom, so draw from the top row down.
    for row in (0..board.rows()).rev() {
        let mut row_spans = vec![Span::raw("  ║")];

        for col in 0..board.columns() {
            let pos = Position::new(row, col);
            let span = match board.token_at(pos).ok().flatten() {
                None => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
                Some(token) => {
                    let mut style = Style::default().fg(token_color(session, token));
                    if winning.contains(&pos) {
                        style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                    }
                    Span::styled(format!(" {} ", token), style)
                }
            };
            row_spans.push(span);
        }

        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  ╚{}╝", "═".repeat(inner_width))));

    // Selection indicator
    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..board.columns() {
        if col == selected_column {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new(Line::from(
        "←/→: Move  |  Enter: Drop  |  R: Restart  |  Q: Quit",
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
