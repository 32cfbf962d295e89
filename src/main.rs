mod error;
mod logging;
mod models;
mod session;
mod storage;
mod timer;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use crate::error::AppError;
use crate::logging::init_logging;
use crate::storage::{BANK_FILE, get_data_dir, load_bank};
use crate::ui::{App, render};

/// 倒计时停止（结果页）时的事件轮询间隔
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> Result<(), AppError> {
    // 数据目录 (~/.local/share/quizsession/)
    let data_dir = get_data_dir()?;
    init_logging(&data_dir)?;

    // 加载题库（questions.toml 不存在时使用内置题库）
    let bank = load_bank(&data_dir.join(BANK_FILE))?;

    // 创建应用状态
    let mut app = App::new(bank, Instant::now());

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app);

    // 恢复终端
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    let history = app.session.history();
    if let (Some(latest), Some(best)) = (history.latest(), history.best()) {
        println!(
            "最近一次: {} / {}  最高分: {} / {}",
            latest.score, latest.total, best.score, best.total
        );
    }
    tracing::info!(session = %app.session.id(), completed = app.session.history().len(), "quit");

    result.map_err(AppError::from)
}

/// 事件循环：按键与计时器 tick 依次处理，每个事件处理完才读取下一个
fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        let timeout = app.countdown.time_until(Instant::now()).unwrap_or(IDLE_POLL);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && ui::handle_key_event(app, key.code, Instant::now()) {
                    break;
                }
            }
        }

        app.on_timer(Instant::now());
    }
    Ok(())
}
