//! 键盘事件映射 (Input -> Action)
//!
//! 将按键事件转换为 Action

use std::time::Instant;

use crossterm::event::KeyCode;

use super::actions::Action;
use super::state::App;

/// 根据当前页面和按键获取对应的 Action
pub fn get_action(is_complete: bool, key: KeyCode) -> Option<Action> {
    if is_complete {
        return match key {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => Some(Action::Restart),
            _ => None,
        };
    }

    match key {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveCursorDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveCursorUp),
        KeyCode::Char(c @ '1'..='4') => Some(Action::SelectOption(c as usize - '1' as usize)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::SelectAtCursor),
        KeyCode::Char('l') | KeyCode::Char('n') | KeyCode::Right => Some(Action::NextQuestion),
        KeyCode::Char('h') | KeyCode::Char('p') | KeyCode::Left => Some(Action::PreviousQuestion),
        _ => None,
    }
}

/// 处理按键事件，返回是否退出
pub fn handle_key_event(app: &mut App, key: KeyCode, now: Instant) -> bool {
    match get_action(app.session.is_complete(), key) {
        Some(action) => app.dispatch(action, now),
        None => false,
    }
}
