//! Run orchestration
//!
//! Resolves settings, launches the editor and feeds its stdout through the
//! log interpreter. The editor's exit code becomes ours.

use std::future::Future;
use std::io;
use std::process::Stdio;

use tokio::io::AsyncRead;
use tokio::process::Command;

use crate::commands::RunArgs;
use crate::common::config::{Config, ProjectConfig, Settings};
use crate::common::{Error, Result};
use crate::display::{Palette, StatusSink, TerminalSink};
use crate::engine::{self, EditorInvocation};
use crate::stream::{pump, Dispatcher, Gate, RunSummary};

/// Run the tests described by `args`, returning the editor's exit code
pub async fn run(args: RunArgs) -> Result<i32> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::resolve(args, &cwd, ProjectConfig::load(&cwd)?, Config::load()?);
    tracing::debug!(?settings, "Resolved settings");

    let invocation = engine::prepare(&settings).await?;

    let palette = Palette::new(settings.color);
    println!();
    let summary = run_editor(
        &invocation,
        TerminalSink::new(palette),
        palette,
        &settings.pattern,
    )
    .await?;

    Ok(summary.exit_code)
}

/// Launch `invocation` and interpret its output through `sink`
///
/// Returns once the editor has exited and the summary has been rendered.
pub async fn run_editor<S: StatusSink + 'static>(
    invocation: &EditorInvocation,
    sink: S,
    palette: Palette,
    pattern: &str,
) -> Result<RunSummary> {
    let mut dispatcher = Dispatcher::new(sink, palette, pattern);
    dispatcher.starting().await;

    tracing::info!(
        program = %invocation.program.display(),
        args = ?invocation.args,
        "Starting Unreal"
    );

    let mut child = Command::new(&invocation.program)
        .args(&invocation.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| {
            Error::SpawnFailed(format!("{}: {}", invocation.program.display(), e))
        })?;

    if let Some(pid) = child.id() {
        dispatcher.spawned(pid).await;
    }

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| Error::SpawnFailed("Failed to get editor stdout".to_string()))?;

    let gate = Gate::open(dispatcher);
    read_output(stdout, &gate, tokio::signal::ctrl_c, || child.start_kill()).await?;

    // Every queued batch must be dispatched before the summary reads the state
    let dispatcher = gate.drain().await?;

    let status = child.wait().await?;
    let exit_code = status.code().unwrap_or_else(|| {
        tracing::warn!(?status, "Unreal terminated without an exit code");
        1
    });
    tracing::info!(exit_code, "Unreal exited");

    Ok(dispatcher.finish(exit_code).await)
}

/// Pump `reader` into `gate` until the editor closes its output
///
/// The first interrupt calls `stop` and keeps reading, so lines the editor
/// wrote before dying are still reported. A second interrupt gives up on the
/// remaining output.
async fn read_output<R, S, I, F>(
    reader: R,
    gate: &Gate<S>,
    mut interrupt: I,
    mut stop: impl FnMut() -> io::Result<()>,
) -> Result<()>
where
    R: AsyncRead + Unpin,
    S: StatusSink + 'static,
    I: FnMut() -> F,
    F: Future<Output = io::Result<()>>,
{
    let pumping = pump(reader, gate);
    tokio::pin!(pumping);
    let mut interrupted = false;

    loop {
        tokio::select! {
            result = &mut pumping => {
                result?;
                return Ok(());
            }
            _ = interrupt() => {
                if interrupted {
                    tracing::warn!("Interrupted again, abandoning remaining editor output");
                    return Ok(());
                }
                tracing::info!("Interrupted, stopping Unreal");
                interrupted = true;
                stop()?;
            }
        }
    }
}
