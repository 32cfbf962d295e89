//! 业务逻辑处理 (Update/Dispatch)
//!
//! Action 转为会话事件，并根据迁移结果维护倒计时句柄

use std::time::Instant;

use super::actions::Action;
use super::state::App;
use crate::session::{SessionEvent, Transition};

impl App {
    /// 核心逻辑分发，返回是否退出
    pub fn dispatch(&mut self, action: Action, now: Instant) -> bool {
        match action {
            Action::Quit => return true,
            Action::MoveCursorUp => self.move_up(),
            Action::MoveCursorDown => self.move_down(),

            Action::SelectOption(n) => {
                if n < self.option_count() {
                    self.cursor = n;
                    self.select_at_cursor(now);
                }
            }
            Action::SelectAtCursor => self.select_at_cursor(now),

            Action::NextQuestion => {
                self.apply(SessionEvent::Advance, now);
            }
            Action::PreviousQuestion => {
                self.apply(SessionEvent::Retreat, now);
            }
            Action::Restart => {
                self.apply(SessionEvent::Restart, now);
            }
        }
        false
    }

    /// 处理到期的计时周期；每个周期作为一次 Tick 完整处理
    pub fn on_timer(&mut self, now: Instant) {
        let due = self.countdown.fire(now);
        for _ in 0..due {
            let transition = self.apply(SessionEvent::Tick, now);
            // 计时器已重启或停止，剩余的过期周期作废
            if transition.resets_countdown() || !self.countdown.is_armed() {
                break;
            }
        }
    }

    // ============ 导航相关 ============

    /// 向上移动光标
    pub fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// 向下移动光标
    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.option_count() {
            self.cursor += 1;
        }
    }

    // ============ 答题相关 ============

    fn select_at_cursor(&mut self, now: Instant) {
        let Some(option) = self.cursor_option().map(str::to_string) else {
            return;
        };
        let index = self.session.current_index();
        self.apply(SessionEvent::Select { index, option }, now);
    }

    // ============ 通用操作 ============

    fn apply(&mut self, event: SessionEvent, now: Instant) -> Transition {
        let skipped = self.session.current_index();
        let transition = self.session.apply(event);

        if transition.resets_countdown() {
            self.countdown.rearm(now);
            self.reset_cursor();
        }
        if transition.completes() {
            self.countdown.disarm();
        }

        match transition {
            Transition::Recorded { .. } => self.message = Some("答案已锁定".to_string()),
            Transition::Expired { .. } => {
                self.message = Some(format!("第 {} 题超时，已跳过", skipped + 1));
            }
            Transition::Moved | Transition::Completed | Transition::Restarted => {
                self.message = None;
            }
            Transition::Ticked | Transition::Ignored => {}
        }
        transition
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::models::QuestionBank;
    use crate::session::QUESTION_SECONDS;
    use crate::timer::TICK_PERIOD;

    fn app(now: Instant) -> App {
        App::new(QuestionBank::builtin(), now)
    }

    #[test]
    fn test_select_by_number_locks_answer() {
        let t0 = Instant::now();
        let mut app = app(t0);
        // "Paris" 是第 3 个选项
        app.dispatch(Action::SelectOption(2), t0);
        assert_eq!(app.session.answer_for(0), Some("Paris"));
        assert_eq!(app.session.score(), 1);

        app.dispatch(Action::SelectOption(0), t0);
        assert_eq!(app.session.answer_for(0), Some("Paris"));
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_select_at_cursor() {
        let t0 = Instant::now();
        let mut app = app(t0);
        app.dispatch(Action::MoveCursorDown, t0);
        app.dispatch(Action::SelectAtCursor, t0);
        assert_eq!(app.session.answer_for(0), Some("Madrid"));
        assert_eq!(app.session.score(), 0);
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let t0 = Instant::now();
        let mut app = app(t0);
        app.dispatch(Action::MoveCursorUp, t0);
        assert_eq!(app.cursor, 0);
        for _ in 0..10 {
            app.dispatch(Action::MoveCursorDown, t0);
        }
        assert_eq!(app.cursor, 3);
        app.dispatch(Action::SelectOption(7), t0);
        assert!(app.session.answers().is_empty());
    }

    #[test]
    fn test_navigation_rearms_countdown() {
        let t0 = Instant::now();
        let mut app = app(t0);
        let t1 = t0 + Duration::from_millis(700);
        app.dispatch(Action::NextQuestion, t1);
        assert_eq!(app.countdown.time_until(t1), Some(TICK_PERIOD));

        // 旧的截止时间已失效
        app.on_timer(t0 + TICK_PERIOD);
        assert_eq!(app.session.seconds_remaining(), QUESTION_SECONDS);
        app.on_timer(t1 + TICK_PERIOD);
        assert_eq!(app.session.seconds_remaining(), QUESTION_SECONDS - 1);
    }

    #[test]
    fn test_cursor_returns_to_locked_answer() {
        let t0 = Instant::now();
        let mut app = app(t0);
        app.dispatch(Action::SelectOption(2), t0);
        app.dispatch(Action::NextQuestion, t0);
        assert_eq!(app.cursor, 0);
        app.dispatch(Action::PreviousQuestion, t0);
        assert_eq!(app.cursor, 2);
    }

    #[test]
    fn test_idle_user_is_advanced_once() {
        let t0 = Instant::now();
        let mut app = app(t0);
        let mut now = t0;
        for _ in 0..QUESTION_SECONDS {
            now += TICK_PERIOD;
            app.on_timer(now);
        }
        assert_eq!(app.session.current_index(), 1);
        assert_eq!(app.session.seconds_remaining(), QUESTION_SECONDS);
        assert_eq!(app.session.answer_for(0), None);
        assert!(app.message.as_deref().unwrap().contains('1'));
    }

    #[test]
    fn test_late_wakeup_advances_only_once() {
        let t0 = Instant::now();
        let mut app = app(t0);
        // 一次性过期 40 个周期：归零后只前进一题，其余周期作废
        app.on_timer(t0 + TICK_PERIOD * 40);
        assert_eq!(app.session.current_index(), 1);
        assert_eq!(app.session.seconds_remaining(), QUESTION_SECONDS);
    }

    #[test]
    fn test_completion_stops_and_restart_rearms() {
        let t0 = Instant::now();
        let mut app = app(t0);
        for _ in 0..app.session.total() {
            app.dispatch(Action::NextQuestion, t0);
        }
        assert!(app.session.is_complete());
        assert!(!app.countdown.is_armed());

        app.on_timer(t0 + TICK_PERIOD * 100);
        assert_eq!(app.session.history().len(), 1);

        let t1 = t0 + Duration::from_secs(5);
        app.dispatch(Action::Restart, t1);
        assert!(!app.session.is_complete());
        assert_eq!(app.session.current_index(), 0);
        assert_eq!(app.countdown.time_until(t1), Some(TICK_PERIOD));
        assert_eq!(app.session.history().len(), 1);
    }

    #[test]
    fn test_quit() {
        let t0 = Instant::now();
        let mut app = app(t0);
        assert!(app.dispatch(Action::Quit, t0));
        assert!(!app.dispatch(Action::NextQuestion, t0));
    }
}
