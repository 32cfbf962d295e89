//! Action 枚举定义 (Intent)
//!
//! 用户交互转化为明确的语义化 Action

/// 用户操作枚举
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    MoveCursorUp,
    MoveCursorDown,

    // 答题
    SelectOption(usize), // 直接选择第 n 个选项（从 0 开始）
    SelectAtCursor,      // Enter

    // 导航
    NextQuestion, // 同时充当“跳过”
    PreviousQuestion,

    // 结果页
    Restart,
}
