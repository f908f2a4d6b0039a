// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line-by-line forwarding of child process output.

use std::io;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;

/// Read `reader` to EOF, handing each line to `emit` as soon as it is read.
///
/// Bytes are decoded lossily and trailing whitespace (including `\r`) is
/// trimmed. Returns the number of lines forwarded.
pub(crate) async fn forward_lines<R, F>(reader: R, mut emit: F) -> io::Result<usize>
where
    R: AsyncRead + Unpin,
    F: FnMut(String),
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    let mut count = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(count);
        }
        emit(String::from_utf8_lossy(&buf).trim_end().to_string());
        count += 1;
    }
}

/// Forward stdout and stderr of `child` concurrently until both close.
///
/// Order is preserved within each pipe; lines from the two pipes interleave
/// in arrival order.
pub(crate) async fn forward_output<F>(child: &mut Child, emit: F) -> io::Result<usize>
where
    F: Fn(String),
{
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let out = async {
        match stdout {
            Some(pipe) => forward_lines(pipe, &emit).await,
            None => Ok(0),
        }
    };
    let err = async {
        match stderr {
            Some(pipe) => forward_lines(pipe, &emit).await,
            None => Ok(0),
        }
    };

    let (out, err) = tokio::join!(out, err);
    Ok(out? + err?)
}

#[cfg(test)]
#[path = "pump_tests.rs"]
mod tests;
