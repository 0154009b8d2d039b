//! # 分块线表流水线
//!
//! `lines` 与 `cross-section` 共用的流程：
//! 读取态表 → 计算 Q(T) → 分块读取跃迁 → 连接 → 处理缺失 → 计算强度。
//! 每块结果按文件顺序交给回调。
//!
//! ## 依赖关系
//! - 被 `commands/lines.rs`、`commands/cross_section.rs` 调用
//! - 使用 `cli/lines.rs` 的 LineSourceArgs
//! - 使用 `utils/` 的输出、进度与线程池

use crate::cli::lines::{LineSourceArgs, OnMissing};
use crate::utils::{output, parallel, progress};

use picocross::error::Result;
use picocross::parsers::{self, TransitionChunks};
use picocross::spectra::{combine_states_transitions, LineQuantities};
use picocross::units::{Quantity, KELVIN};
use picocross::StateTable;

/// 流水线上下文，回调中可用
pub struct LineContext {
    pub states: StateTable,
    pub temperature: Quantity,
    pub partition: Quantity,
}

/// 运行统计
#[derive(Debug, Default)]
pub struct PipelineSummary {
    pub chunks: usize,
    pub lines: usize,
    /// `skip` 模式下丢弃的行数
    pub dropped: usize,
    /// `nan` 模式下保留的缺失行数
    pub unmatched: usize,
}

/// 读取态表并计算配分函数
pub fn load_context(args: &LineSourceArgs) -> Result<LineContext> {
    let jobs = parallel::init_thread_pool(args.jobs)?;
    output::print_info(&format!("Using {} threads", jobs));

    let states = parsers::load_exomol_states(&args.states)?;
    output::print_info(&format!(
        "Loaded {} states from '{}'",
        states.len(),
        args.states.display()
    ));

    let temperature = Quantity::scalar(args.temperature, KELVIN);
    let partition = states.partition_function(&temperature)?;
    output::print_value(
        &format!("Q({} K)", args.temperature),
        &format!("{:.6}", partition.as_scalar().unwrap_or(f64::NAN)),
    );

    Ok(LineContext {
        states,
        temperature,
        partition,
    })
}

/// 逐块处理跃迁文件
///
/// 回调接收本块的逐线物理量与强度 (cm/molecule)。
pub fn run_chunks<F>(
    args: &LineSourceArgs,
    ctx: &LineContext,
    mut on_chunk: F,
) -> Result<PipelineSummary>
where
    F: FnMut(&LineQuantities, &Quantity) -> Result<()>,
{
    let chunks = TransitionChunks::open(&args.transitions, args.chunk_size)?;
    let spinner = progress::create_spinner(&format!("Reading '{}'", args.transitions.display()));

    let mut summary = PipelineSummary::default();

    let result = chunks.into_iter().try_for_each(|chunk| -> Result<()> {
        let joined = combine_states_transitions(&ctx.states, &chunk?);
        let lines = match args.on_missing {
            OnMissing::Error => joined.into_quantities()?,
            OnMissing::Skip => {
                let (lines, dropped) = joined.matched();
                summary.dropped += dropped;
                lines
            }
            OnMissing::Nan => {
                summary.unmatched += joined.unmatched_count();
                joined.into_quantities_lossy()
            }
        };

        let intensity = lines.intensity(&ctx.temperature, &ctx.partition)?;
        on_chunk(&lines, &intensity)?;

        summary.chunks += 1;
        summary.lines += lines.len();
        spinner.set_message(format!("{} lines in {} chunks", summary.lines, summary.chunks));
        Ok(())
    });

    spinner.finish_and_clear();
    result?;

    output::print_info(&format!(
        "Processed {} lines in {} chunks",
        summary.lines, summary.chunks
    ));
    if summary.dropped > 0 {
        output::print_warning(&format!(
            "Dropped {} transitions referencing unknown states",
            summary.dropped
        ));
    }
    if summary.unmatched > 0 {
        output::print_warning(&format!(
            "{} transitions reference unknown states (written as NaN)",
            summary.unmatched
        ));
    }

    Ok(summary)
}
