//! 视图层模块
//!
//! 包含主渲染入口，由 presenter 给出的 Screen 绘制答题页或结果页

pub mod components;
pub mod layouts;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::presenter::{QuestionView, ResultView, Screen, present};
use super::state::App;
use crate::session::Tier;
use components::{confetti_line, nav_button, render_option_widget};
use layouts::centered_rect;

const FOOTER_QUOTE: &str = "“The beautiful thing about learning is that no one can take it away from you.” - B.B. King";

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题
            Constraint::Min(10),   // 题目 / 结果
            Constraint::Length(3), // 帮助
            Constraint::Length(1), // 页脚
        ])
        .split(frame.area());

    render_title(frame, chunks[0]);

    let screen = present(&app.session, app.cursor);
    match &screen {
        Screen::Question(view) => render_question(frame, view, chunks[1]),
        Screen::Result(view) => render_result(frame, view, chunks[1]),
    }

    render_help(frame, app, &screen, chunks[2]);
    render_footer(frame, chunks[3]);
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new("Quiz Challenge 🎯")
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_question(frame: &mut Frame, view: &QuestionView, area: Rect) {
    let timer_color = if view.seconds_remaining <= 5 {
        Color::Red
    } else {
        Color::LightRed
    };
    let block = Block::default()
        .title(format!("第 {}/{} 题", view.number, view.total))
        .title(
            Line::from(Span::styled(
                format!("⏳ {}s", view.seconds_remaining),
                Style::default().fg(timer_color).add_modifier(Modifier::BOLD),
            ))
            .right_aligned(),
        )
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints = vec![Constraint::Length(3)]; // 题干
    constraints.extend(view.options.iter().map(|_| Constraint::Length(3)));
    constraints.push(Constraint::Length(1)); // 导航
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let prompt = Paragraph::new(view.prompt.as_str())
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .wrap(Wrap { trim: true });
    frame.render_widget(prompt, chunks[0]);

    for (i, option) in view.options.iter().enumerate() {
        render_option_widget(frame, chunks[i + 1], i + 1, option);
    }

    let nav = Line::from(vec![
        nav_button("◀ Prev", view.previous_enabled, Color::Yellow),
        Span::raw("   "),
        nav_button("Next ▶", view.next_enabled, Color::Red),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(Paragraph::new(nav), chunks[view.options.len() + 1]);
}

fn render_result(frame: &mut Frame, view: &ResultView, area: Rect) {
    let tier_color = match view.tier {
        Tier::TryAgain => Color::Red,
        Tier::GoodGoing => Color::Yellow,
        Tier::WellDone => Color::Green,
    };

    let panel = centered_rect(80, 90, area);
    let mut lines = Vec::new();
    if view.celebrate {
        lines.push(confetti_line(panel.width.saturating_sub(2)));
    }
    lines.push(Line::from(Span::styled(
        "Quiz Completed!",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(format!(
        "Your score: {} / {}",
        view.score, view.total
    )));
    lines.push(Line::from(Span::styled(
        view.tier.label(),
        Style::default().fg(tier_color).add_modifier(Modifier::BOLD),
    )));
    if view.celebrate {
        lines.push(confetti_line(panel.width.saturating_sub(2)));
    }

    lines.push(Line::from(""));
    if let Some((best, total)) = view.best {
        lines.push(Line::from(format!("最高分: {} / {}", best, total)));
    }
    for entry in &view.recent {
        lines.push(Line::from(Span::styled(
            format!("{}  {} / {}", entry.finished_at, entry.score, entry.total),
            Style::default().fg(Color::Gray),
        )));
    }

    let result = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("结果").borders(Borders::ALL));
    frame.render_widget(result, panel);
}

fn render_help(frame: &mut Frame, app: &App, screen: &Screen, area: Rect) {
    let help_text = match screen {
        Screen::Question(_) => "[1-4] 作答  [j/k] 选择  [Enter] 确认  [h] 上一题  [l] 下一题/跳过  [q] 退出",
        Screen::Result(_) => "[r] 重新开始  [q] 退出",
    };

    let message = app.message.as_deref().unwrap_or("");
    let text = if message.is_empty() {
        help_text.to_string()
    } else {
        format!("{}  |  {}", help_text, message)
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(FOOTER_QUOTE)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        );
    frame.render_widget(footer, area);
}
