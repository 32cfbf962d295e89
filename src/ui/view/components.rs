//! 通用 UI 组件
//!
//! 选项按钮、导航按钮等

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::ui::presenter::OptionView;

/// [组件] 单个选项按钮
pub fn render_option_widget(frame: &mut Frame, area: Rect, number: usize, option: &OptionView) {
    let style = if option.selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else if !option.enabled {
        Style::default().fg(Color::DarkGray)
    } else if option.focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default().fg(Color::Blue)
    };

    let marker = if option.selected { "✔ " } else { "" };
    let widget = Paragraph::new(format!("[{}] {}{}", number, marker, option.label))
        .style(style)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(widget, area);
}

/// [组件] 导航按钮，禁用时置灰
pub fn nav_button(label: &str, enabled: bool, active_color: Color) -> Span<'static> {
    let style = if enabled {
        Style::default()
            .fg(Color::White)
            .bg(active_color)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(format!(" {} ", label), style)
}

/// [组件] 庆祝横幅
pub fn confetti_line(width: u16) -> Line<'static> {
    const PIECES: [(&str, Color); 5] = [
        ("✦", Color::Yellow),
        ("✧", Color::Magenta),
        ("★", Color::Cyan),
        ("•", Color::Green),
        ("✶", Color::Red),
    ];
    let spans: Vec<Span> = (0..width as usize / 2)
        .map(|i| {
            let (symbol, color) = PIECES[i % PIECES.len()];
            Span::styled(format!("{} ", symbol), Style::default().fg(color))
        })
        .collect();
    Line::from(spans)
}
