use serde::{Deserialize, Serialize};

use crate::error::BankError;

/// 每道题固定的选项数量
pub const OPTIONS_PER_QUESTION: usize = 4;

/// 题目记录（运行期只读）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub prompt: String,
    pub options: Vec<String>,
    /// 必须等于 options 中的某一项；不匹配时该题永远无法得分
    pub correct: String,
}

impl QuestionRecord {
    pub fn new(prompt: &str, options: [&str; OPTIONS_PER_QUESTION], correct: &str) -> Self {
        Self {
            prompt: prompt.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct: correct.to_string(),
        }
    }

    /// 精确字符串比较，不做大小写或空白归一化
    pub fn is_correct(&self, option: &str) -> bool {
        self.correct == option
    }

    /// 数据质量问题（不会导致运行时错误，只用于日志提示）
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.options.len() != OPTIONS_PER_QUESTION {
            problems.push(format!(
                "expected {} options, found {}",
                OPTIONS_PER_QUESTION,
                self.options.len()
            ));
        }
        if !self.options.iter().any(|o| o == &self.correct) {
            problems.push(format!("correct answer '{}' is not among options", self.correct));
        }
        problems
    }
}

/// TOML文件结构
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionBankData {
    #[serde(default)]
    pub questions: Vec<QuestionRecord>,
}

/// 题库：有序、非空、只读
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionBank {
    questions: Vec<QuestionRecord>,
}

impl QuestionBank {
    pub fn new(questions: Vec<QuestionRecord>) -> Result<Self, BankError> {
        if questions.is_empty() {
            return Err(BankError::Empty);
        }
        Ok(Self { questions })
    }

    pub fn from_data(data: QuestionBankData) -> Result<Self, BankError> {
        Self::new(data.questions)
    }

    /// 内置题库（10 题）
    pub fn builtin() -> Self {
        let questions = vec![
            QuestionRecord::new(
                "What is the capital of France?",
                ["Berlin", "Madrid", "Paris", "Rome"],
                "Paris",
            ),
            QuestionRecord::new(
                "Which language runs in the browser?",
                ["Java", "C", "Python", "JavaScript"],
                "JavaScript",
            ),
            QuestionRecord::new(
                "What does CSS stand for?",
                [
                    "Creative Style Sheets",
                    "Cascading Style Sheets",
                    "Computer Style Sheets",
                    "Colorful Style Sheets",
                ],
                "Cascading Style Sheets",
            ),
            QuestionRecord::new(
                "What is the capital of Japan?",
                ["Beijing", "Seoul", "Tokyo", "Bangkok"],
                "Tokyo",
            ),
            QuestionRecord::new("What is 5 + 3?", ["5", "8", "12", "7"], "8"),
            QuestionRecord::new(
                "Which planet is known as the Red Planet?",
                ["Earth", "Mars", "Jupiter", "Venus"],
                "Mars",
            ),
            QuestionRecord::new(
                "What is the largest ocean on Earth?",
                ["Atlantic Ocean", "Indian Ocean", "Arctic Ocean", "Pacific Ocean"],
                "Pacific Ocean",
            ),
            QuestionRecord::new(
                "Who wrote 'Hamlet'?",
                ["Charles Dickens", "William Shakespeare", "Jane Austen", "Mark Twain"],
                "William Shakespeare",
            ),
            QuestionRecord::new(
                "What is the boiling point of water?",
                ["90°C", "100°C", "120°C", "80°C"],
                "100°C",
            ),
            QuestionRecord::new(
                "Which gas do plants absorb?",
                ["Oxygen", "Carbon Dioxide", "Nitrogen", "Hydrogen"],
                "Carbon Dioxide",
            ),
        ];
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn last_index(&self) -> usize {
        self.questions.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&QuestionRecord> {
        self.questions.get(index)
    }

    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    /// 收集所有题目的数据质量问题 (题目下标, 描述)
    pub fn diagnostics(&self) -> Vec<(usize, String)> {
        self.questions
            .iter()
            .enumerate()
            .flat_map(|(i, q)| q.problems().into_iter().map(move |p| (i, p)))
            .collect()
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_bank_is_well_formed() {
        let bank = QuestionBank::builtin();
        assert_eq!(bank.len(), 10);
        assert_eq!(bank.last_index(), 9);
        assert!(bank.diagnostics().is_empty());
        assert!(
            bank.questions()
                .iter()
                .all(|q| q.options.len() == OPTIONS_PER_QUESTION)
        );
    }

    #[test]
    fn test_empty_bank_rejected() {
        assert!(matches!(QuestionBank::new(Vec::new()), Err(BankError::Empty)));
        assert!(matches!(
            QuestionBank::from_data(QuestionBankData::default()),
            Err(BankError::Empty)
        ));
    }

    #[test]
    fn test_exact_match() {
        let q = QuestionRecord::new("2 + 2?", ["3", "4", "5", "6"], "4");
        assert!(q.is_correct("4"));
        assert!(!q.is_correct(" 4"));

        let named = QuestionRecord::new("Capital?", ["Paris", "paris", "Rome", "Oslo"], "Paris");
        assert!(!named.is_correct("paris"));
    }

    #[test]
    fn test_malformed_record_reported() {
        let q = QuestionRecord {
            prompt: "Broken".to_string(),
            options: vec!["a".to_string(), "b".to_string()],
            correct: "z".to_string(),
        };
        assert_eq!(q.problems().len(), 2);

        let bank = QuestionBank::new(vec![q]).unwrap();
        let diagnostics = bank.diagnostics();
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.iter().all(|(i, _)| *i == 0));
    }
}
