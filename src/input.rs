//! Standard-input collection.

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// Read standard input to end-of-stream and join its lines with `\n`.
///
/// No separator follows the last line, and input arriving without a final
/// newline is preserved. Returns `None` when nothing accumulated (an empty
/// stream, or newlines only), which callers treat as a successful no-op and
/// skip the network round-trip entirely.
///
/// # Errors
///
/// Returns the underlying I/O error when reading fails.
pub async fn read_message() -> std::io::Result<Option<String>> {
    collect(tokio::io::stdin()).await
}

/// Accumulate lines from a reader, separating with `\n` only once the
/// accumulator is non-empty.
async fn collect<R>(reader: R) -> std::io::Result<Option<String>>
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    let mut message = String::new();
    while let Some(line) = lines.next_line().await? {
        if !message.is_empty() {
            message.push('\n');
        }
        message.push_str(&line);
    }
    Ok((!message.is_empty()).then_some(message))
}
