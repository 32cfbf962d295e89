//! 答题会话状态机
//!
//! 状态只有 `InProgress(current_index)` 与 `Completed` 两种。
//! 所有迁移都是全函数：非法或重复的操作静默忽略，不会报错。

use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, Local};
use uuid::Uuid;

use crate::models::{QuestionBank, QuestionRecord};

/// 每道题的倒计时秒数
pub const QUESTION_SECONDS: u32 = 15;

/// 成绩记录保留上限
pub const SCORE_LOG_CAPACITY: usize = 100;

/// 会话阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    InProgress,
    Completed,
}

/// 一次倒计时的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// 仍在倒计时，附带剩余秒数
    Running(u32),
    /// 本次恰好归零，调用方需要 advance 一次
    Expired,
    /// 已完成或已归零，无事发生
    Idle,
}

/// 驱动会话的事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Select { index: usize, option: String },
    Advance,
    Retreat,
    Restart,
    Tick,
}

/// 事件处理后的状态变化
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// 记录了答案
    Recorded { correct: bool },
    /// 题目下标变化，倒计时已重置
    Moved,
    /// 越过最后一题，会话结束
    Completed,
    /// 会话重新开始
    Restarted,
    /// 倒计时减一
    Ticked,
    /// 倒计时归零并自动前进
    Expired { completed: bool },
    /// 无效操作，状态未变
    Ignored,
}

impl Transition {
    /// 倒计时是否被重置（需要重新启动计时器）
    pub fn resets_countdown(self) -> bool {
        matches!(
            self,
            Transition::Moved | Transition::Restarted | Transition::Expired { completed: false }
        )
    }

    /// 是否进入了结果页
    pub fn completes(self) -> bool {
        matches!(
            self,
            Transition::Completed | Transition::Expired { completed: true }
        )
    }
}

/// 成绩评价等级
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    TryAgain,
    GoodGoing,
    WellDone,
}

impl Tier {
    /// score <= 3 / 4..=6 / >= 7
    pub fn from_score(score: usize) -> Self {
        match score {
            0..=3 => Tier::TryAgain,
            4..=6 => Tier::GoodGoing,
            _ => Tier::WellDone,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::TryAgain => "Wanna Give Another Try",
            Tier::GoodGoing => "Good Going",
            Tier::WellDone => "Well Done!",
        }
    }
}

/// 得分超过总题数 60% 时庆祝
pub fn celebrates(score: usize, total: usize) -> bool {
    score * 10 > total * 6
}

/// 一次完成的会话成绩
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRecord {
    pub session_id: Uuid,
    pub score: usize,
    pub total: usize,
    pub finished_at: DateTime<Local>,
}

/// 只追加的成绩日志（仅内存，超过上限时丢弃最旧的）
#[derive(Debug, Clone, Default)]
pub struct ScoreLog {
    records: VecDeque<ScoreRecord>,
}

impl ScoreLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: ScoreRecord) {
        if self.records.len() == SCORE_LOG_CAPACITY {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn latest(&self) -> Option<&ScoreRecord> {
        self.records.back()
    }

    /// 最高分；同分取较早的一次
    pub fn best(&self) -> Option<&ScoreRecord> {
        self.records
            .iter()
            .fold(None, |best: Option<&ScoreRecord>, r| match best {
                Some(b) if b.score >= r.score => Some(b),
                _ => Some(r),
            })
    }

    /// 最近的 n 条，新的在前
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &ScoreRecord> {
        self.records.iter().rev().take(n)
    }
}

/// 答题会话
#[derive(Debug, Clone)]
pub struct Session {
    bank: QuestionBank,
    id: Uuid,
    current_index: usize,
    phase: Phase,
    score: usize,
    answers: BTreeMap<usize, String>,
    seconds_remaining: u32,
    history: ScoreLog,
}

impl Session {
    pub fn new(bank: QuestionBank) -> Self {
        let session = Self {
            bank,
            id: Uuid::new_v4(),
            current_index: 0,
            phase: Phase::InProgress,
            score: 0,
            answers: BTreeMap::new(),
            seconds_remaining: QUESTION_SECONDS,
            history: ScoreLog::new(),
        };
        tracing::info!(session = %session.id, questions = session.bank.len(), "session started");
        session
    }

    // ============ 只读访问 ============

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> &QuestionRecord {
        // 下标始终在 [0, len-1] 且题库非空
        &self.bank.questions()[self.current_index]
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Completed
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.bank.len()
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    #[cfg(test)]
    pub fn answers(&self) -> &BTreeMap<usize, String> {
        &self.answers
    }

    /// 已锁定的答案；None 表示未作答（跳过）
    pub fn answer_for(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    pub fn history(&self) -> &ScoreLog {
        &self.history
    }

    pub fn tier(&self) -> Tier {
        Tier::from_score(self.score)
    }

    pub fn celebrates(&self) -> bool {
        celebrates(self.score, self.total())
    }

    // ============ 状态迁移 ============

    /// 事件入口：一个事件进，新状态出
    pub fn apply(&mut self, event: SessionEvent) -> Transition {
        match event {
            SessionEvent::Select { index, option } => self.select_option(index, &option),
            SessionEvent::Advance => self.advance(),
            SessionEvent::Retreat => self.retreat(),
            SessionEvent::Restart => self.restart(),
            SessionEvent::Tick => match self.tick() {
                Tick::Running(_) => Transition::Ticked,
                Tick::Expired => {
                    let completed = self.advance().completes();
                    tracing::debug!(session = %self.id, completed, "countdown expired");
                    Transition::Expired { completed }
                }
                Tick::Idle => Transition::Ignored,
            },
        }
    }

    /// 选择答案；每题只记录第一次选择
    pub fn select_option(&mut self, index: usize, option: &str) -> Transition {
        if self.is_complete() || self.answers.contains_key(&index) {
            return Transition::Ignored;
        }
        let Some(question) = self.bank.get(index) else {
            return Transition::Ignored;
        };

        let correct = question.is_correct(option);
        self.answers.insert(index, option.to_string());
        if correct {
            self.score += 1;
        }
        tracing::debug!(session = %self.id, question = index, correct, "answer locked");
        Transition::Recorded { correct }
    }

    /// 下一题；最后一题时结束会话并记录成绩
    pub fn advance(&mut self) -> Transition {
        if self.is_complete() {
            return Transition::Ignored;
        }

        if self.current_index >= self.bank.last_index() {
            self.phase = Phase::Completed;
            self.history.append(ScoreRecord {
                session_id: self.id,
                score: self.score,
                total: self.total(),
                finished_at: Local::now(),
            });
            tracing::info!(
                session = %self.id,
                score = self.score,
                total = self.total(),
                "session completed"
            );
            return Transition::Completed;
        }

        self.current_index += 1;
        self.seconds_remaining = QUESTION_SECONDS;
        Transition::Moved
    }

    /// 上一题；不清除已记录的答案
    pub fn retreat(&mut self) -> Transition {
        if self.is_complete() || self.current_index == 0 {
            return Transition::Ignored;
        }
        self.current_index -= 1;
        self.seconds_remaining = QUESTION_SECONDS;
        Transition::Moved
    }

    /// 重新开始；保留成绩日志
    pub fn restart(&mut self) -> Transition {
        self.id = Uuid::new_v4();
        self.current_index = 0;
        self.phase = Phase::InProgress;
        self.score = 0;
        self.answers.clear();
        self.seconds_remaining = QUESTION_SECONDS;
        tracing::info!(session = %self.id, "session restarted");
        Transition::Restarted
    }

    /// 倒计时减一，最低为 0
    pub fn tick(&mut self) -> Tick {
        if self.is_complete() || self.seconds_remaining == 0 {
            return Tick::Idle;
        }
        self.seconds_remaining -= 1;
        if self.seconds_remaining == 0 {
            Tick::Expired
        } else {
            Tick::Running(self.seconds_remaining)
        }
    }
}
