use crate::ollama_api::GenerateResponse;
use std::io::{self, Write};

const NANOS_PER_SEC: i64 = 1_000_000_000;

/// Prints the eleven labeled response lines
pub fn write_detailed<W: Write>(out: &mut W, response: &GenerateResponse) -> io::Result<()> {
    writeln!(out, "Model: {}", response.model)?;
    writeln!(out, "Created At: {}", response.created_at)?;
    writeln!(out, "Response: {}", response.response)?;
    writeln!(out, "Done: {}", response.done)?;
    writeln!(out, "Done Reason: {}", response.done_reason)?;
    writeln!(out, "Total Duration: {:.1} s", whole_seconds(response.total_duration))?;
    writeln!(out, "Load Duration: {:.1} s", whole_seconds(response.load_duration))?;
    writeln!(out, "Prompt Evaluation Count: {}", response.prompt_eval_count)?;
    writeln!(
        out,
        "Prompt Evaluation Duration: {:.1} s",
        whole_seconds(response.prompt_eval_duration)
    )?;
    writeln!(out, "Evaluation Count: {}", response.eval_count)?;
    writeln!(out, "Evaluation Duration: {:.1} s", whole_seconds(response.eval_duration))?;
    out.flush()
}

/// Prints the body untouched, plus a trailing newline
pub fn write_raw<W: Write>(out: &mut W, body: &[u8]) -> io::Result<()> {
    out.write_all(body)?;
    out.write_all(b"\n")?;
    out.flush()
}

// integer division first, sub-second precision is dropped
fn whole_seconds(nanos: i64) -> f64 {
    (nanos / NANOS_PER_SEC) as f64
}
