//! 视图模型 (Session -> Screen)
//!
//! 纯函数：只读取会话状态与光标位置，不依赖终端

use crate::session::{Session, Tier};

/// 结果页展示的历史条数
pub const RECENT_SCORES: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Question(QuestionView),
    Result(ResultView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionView {
    pub label: String,
    pub selected: bool,
    pub enabled: bool,
    pub focused: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionView {
    pub number: usize, // 从 1 开始
    pub total: usize,
    pub prompt: String,
    pub options: Vec<OptionView>,
    pub previous_enabled: bool,
    pub next_enabled: bool,
    pub seconds_remaining: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub score: usize,
    pub total: usize,
    pub finished_at: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub score: usize,
    pub total: usize,
    pub tier: Tier,
    pub celebrate: bool,
    pub best: Option<(usize, usize)>,
    pub recent: Vec<HistoryEntry>,
}

/// 由会话状态推导当前页面
pub fn present(session: &Session, cursor: usize) -> Screen {
    if session.is_complete() {
        return Screen::Result(present_result(session));
    }

    let index = session.current_index();
    let question = session.current_question();
    let locked = session.answer_for(index);

    let options = question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| OptionView {
            label: option.clone(),
            // 同一题选项文本重复时只标记第一个
            selected: locked == Some(option.as_str())
                && question.options.iter().position(|o| o == option) == Some(i),
            enabled: locked.is_none(),
            focused: locked.is_none() && i == cursor,
        })
        .collect();

    Screen::Question(QuestionView {
        number: index + 1,
        total: session.total(),
        prompt: question.prompt.clone(),
        options,
        previous_enabled: index > 0,
        next_enabled: true,
        seconds_remaining: session.seconds_remaining(),
    })
}

fn present_result(session: &Session) -> ResultView {
    let history = session.history();
    ResultView {
        score: session.score(),
        total: session.total(),
        tier: session.tier(),
        celebrate: session.celebrates(),
        best: history.best().map(|r| (r.score, r.total)),
        recent: history
            .recent(RECENT_SCORES)
            .map(|r| HistoryEntry {
                score: r.score,
                total: r.total,
                finished_at: r.finished_at.format("%H:%M:%S").to_string(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{QuestionBank, QuestionRecord};

    fn question_view(session: &Session, cursor: usize) -> QuestionView {
        match present(session, cursor) {
            Screen::Question(view) => view,
            Screen::Result(_) => panic!("expected question screen"),
        }
    }

    #[test]
    fn test_fresh_question_view() {
        let session = Session::new(QuestionBank::builtin());
        let view = question_view(&session, 1);
        assert_eq!(view.number, 1);
        assert_eq!(view.total, 10);
        assert_eq!(view.options.len(), 4);
        assert!(view.options.iter().all(|o| o.enabled && !o.selected));
        assert!(view.options[1].focused);
        assert!(!view.previous_enabled);
        assert!(view.next_enabled);
        assert_eq!(view.seconds_remaining, 15);
    }

    #[test]
    fn test_locked_question_view() {
        let mut session = Session::new(QuestionBank::builtin());
        session.select_option(0, "Madrid");
        let view = question_view(&session, 0);
        assert!(view.options.iter().all(|o| !o.enabled && !o.focused));
        let selected: Vec<_> = view.options.iter().filter(|o| o.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].label, "Madrid");

        session.advance();
        let view = question_view(&session, 0);
        assert!(view.previous_enabled);
        assert!(view.options.iter().all(|o| o.enabled));
    }

    #[test]
    fn test_duplicate_options_mark_one() {
        let bank = QuestionBank::new(vec![QuestionRecord::new(
            "Dup",
            ["same", "same", "x", "y"],
            "same",
        )])
        .unwrap();
        let mut session = Session::new(bank);
        session.select_option(0, "same");
        let view = question_view(&session, 0);
        assert_eq!(view.options.iter().filter(|o| o.selected).count(), 1);
        assert!(view.options[0].selected);
    }

    #[test]
    fn test_result_view() {
        let mut session = Session::new(QuestionBank::builtin());
        for i in 0..session.total() {
            if i < 5 {
                let right = session.bank().get(i).unwrap().correct.clone();
                session.select_option(i, &right);
            }
            session.advance();
        }
        let Screen::Result(view) = present(&session, 0) else {
            panic!("expected result screen");
        };
        assert_eq!(view.score, 5);
        assert_eq!(view.total, 10);
        assert_eq!(view.tier, Tier::GoodGoing);
        assert!(!view.celebrate);
        assert_eq!(view.best, Some((5, 10)));
        assert_eq!(view.recent.len(), 1);
    }
}
