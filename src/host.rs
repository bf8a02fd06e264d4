use crate::actions::Response;
use crate::extension::{Event, Extension};
use crate::joplin::NotebookBackend;
use crate::settings::PreferenceStore;
use anyhow::Context;
use std::io::{BufRead, Write};
use std::ops::ControlFlow;

/// Serve host events read line by line from `input`, writing one JSON
/// response line per non-blank line to `output`; lines that are not a valid
/// event get an empty response. Returns when the host sends
/// `system_exit` or closes the input.
pub fn run<B, S, R, W>(ext: &mut Extension<B, S>, input: R, mut output: W) -> anyhow::Result<()>
where
    B: NotebookBackend,
    S: PreferenceStore,
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line.context("failed to read host event")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let response = match serde_json::from_str::<Event>(line) {
            Ok(event) => {
                tracing::debug!(?event, "host event");
                match ext.handle(event) {
                    ControlFlow::Continue(response) => response,
                    ControlFlow::Break(()) => {
                        tracing::info!("host requested exit");
                        break;
                    }
                }
            }
            Err(e) => {
                tracing::warn!("malformed host event: {e}");
                Response::Nothing
            }
        };
        serde_json::to_writer(&mut output, &response)?;
        output.write_all(b"\n")?;
        output.flush()?;
    }
    Ok(())
}
