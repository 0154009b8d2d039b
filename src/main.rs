//! # picocross - 分子吸收光谱计算工具
//!
//! 由 ExoMol 线表计算配分函数、逐线强度与多普勒展宽截面。
//!
//! ## 子命令
//! - `partition`     - 配分函数 Q(T)
//! - `lines`         - 逐线积分强度
//! - `cross-section` - 多普勒展宽吸收截面
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     └── picocross (库: parsers/, spectra/, units/)
//!   └── utils/      (工具函数)
//! ```

mod cli;
mod commands;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
