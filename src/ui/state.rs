//! App 状态定义 (Model)
//!
//! 包含应用状态结构体：会话、选项光标、倒计时句柄

use std::time::Instant;

use crate::models::QuestionBank;
use crate::session::Session;
use crate::timer::{Countdown, TICK_PERIOD};

/// 应用状态
pub struct App {
    pub session: Session,
    pub cursor: usize, // 当前题目中高亮的选项
    pub countdown: Countdown,
    pub message: Option<String>,
}

impl App {
    /// 创建新的应用实例，倒计时从 now 开始
    pub fn new(bank: QuestionBank, now: Instant) -> Self {
        Self {
            session: Session::new(bank),
            cursor: 0,
            countdown: Countdown::start(TICK_PERIOD, now),
            message: None,
        }
    }

    /// 当前题目的选项数量
    pub fn option_count(&self) -> usize {
        self.session.current_question().options.len()
    }

    /// 光标所在的选项文本
    pub fn cursor_option(&self) -> Option<&str> {
        self.session
            .current_question()
            .options
            .get(self.cursor)
            .map(String::as_str)
    }

    /// 切换题目后把光标放到已锁定的答案上（没有则放在第一项）
    pub fn reset_cursor(&mut self) {
        let index = self.session.current_index();
        self.cursor = self
            .session
            .answer_for(index)
            .and_then(|answer| {
                self.session
                    .current_question()
                    .options
                    .iter()
                    .position(|o| o == answer)
            })
            .unwrap_or(0);
    }
}
