//! Streaming JSON array writer.
//!
//! Payloads are written as they arrive, without buffering the whole array in
//! memory. Entries are separated by `,\n` and there is no trailing separator,
//! so the output is a valid JSON array whenever every payload is valid JSON.
//! Payload bytes are written verbatim.

use std::io;

use tokio::io::{AsyncWrite, AsyncWriteExt};

const ARRAY_OPEN: &[u8] = b"[";
const ENTRY_SEPARATOR: &[u8] = b",\n";
const ARRAY_CLOSE: &[u8] = b"]";

pub struct JsonArrayWriter<W> {
    inner: W,
    entries: usize,
}

impl<W: AsyncWrite + Unpin> JsonArrayWriter<W> {
    pub async fn begin(mut inner: W) -> io::Result<Self> {
        inner.write_all(ARRAY_OPEN).await?;
        Ok(Self { inner, entries: 0 })
    }

    pub async fn push(&mut self, payload: &[u8]) -> io::Result<()> {
        if self.entries > 0 {
            self.inner.write_all(ENTRY_SEPARATOR).await?;
        }
        self.inner.write_all(payload).await?;
        self.entries += 1;
        Ok(())
    }

    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Close the array and flush, handing back the underlying writer.
    pub async fn finish(mut self) -> io::Result<W> {
        self.inner.write_all(ARRAY_CLOSE).await?;
        self.inner.flush().await?;
        Ok(self.inner)
    }
}
