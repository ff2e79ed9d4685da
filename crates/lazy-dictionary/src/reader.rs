use std::io::SeekFrom;
use std::path::Path;

use encoding_rs::Encoding;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use crate::encoding;
use crate::error::ImportError;

/// Reads a file in byte windows and hands back text that ends on a line boundary.
///
/// A window without any newline is grown by `default_chunk` bytes and re-read from
/// the same offset, so one very long line costs several reads but never recursion.
pub struct ChunkReader {
    file: File,
    file_size: u64,
    encoding: &'static Encoding,
    offset: u64,
    default_chunk: usize,
    chunk_size: usize,
    eof: bool,
}

impl ChunkReader {
    /// Open `path`, resolving the encoding from `label` or from the first
    /// `detect_prefix_len` bytes.
    pub async fn open(
        path: &Path,
        label: Option<&str>,
        default_chunk: usize,
        detect_prefix_len: usize,
    ) -> Result<Self, ImportError> {
        let mut file = File::open(path).await?;
        let file_size = file.metadata().await?.len();

        let mut prefix = Vec::with_capacity(detect_prefix_len);
        (&mut file)
            .take(detect_prefix_len as u64)
            .read_to_end(&mut prefix)
            .await?;
        let encoding = encoding::resolve(label, &prefix)?;

        let mut reader = Self::new(file, file_size, encoding, default_chunk);

        // A BOM is not part of the first headword
        if let Some((bom_encoding, bom_len)) = Encoding::for_bom(&prefix) {
            if bom_encoding == encoding {
                reader.offset = bom_len as u64;
            }
        }

        tracing::debug!(
            "Opened {} ({} bytes, {})",
            path.display(),
            file_size,
            encoding.name()
        );

        Ok(reader)
    }

    pub fn new(
        file: File,
        file_size: u64,
        encoding: &'static Encoding,
        default_chunk: usize,
    ) -> Self {
        let default_chunk = default_chunk.max(1);
        Self {
            file,
            file_size,
            encoding,
            offset: 0,
            default_chunk,
            chunk_size: default_chunk,
            eof: false,
        }
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    pub fn is_eof(&self) -> bool {
        self.eof
    }

    /// Bytes consumed so far
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Next run of complete lines, without the trailing line terminator.
    ///
    /// The chunk returned together with `eof` may end in a line that had no
    /// terminator in the file.
    pub async fn next_chunk(&mut self) -> Result<String, ImportError> {
        loop {
            let window = self.read_window().await?;
            let (text, _) = self.encoding.decode_without_bom_handling(&window);

            if self.offset + window.len() as u64 >= self.file_size {
                self.eof = true;
                self.offset += window.len() as u64;
                self.chunk_size = self.default_chunk;
                return Ok(strip_last_terminator(&text).to_string());
            }

            let Some(last_n) = text.rfind('\n') else {
                self.chunk_size += self.default_chunk;
                tracing::debug!(
                    "No line break at offset {}, growing window to {} bytes",
                    self.offset,
                    self.chunk_size
                );
                continue;
            };

            let consumed = self.consumed_bytes(&text[..=last_n]);
            if consumed_matches(&window, consumed) {
                let chunk = strip_last_terminator(&text[..=last_n]).to_string();
                self.advance(consumed);
                return Ok(chunk);
            }

            // Malformed input does not survive the round trip; cut on the raw byte
            tracing::warn!(
                "Re-encoded length disagrees with source at offset {}, cutting on raw line break",
                self.offset
            );
            let consumed = window
                .iter()
                .rposition(|&b| b == b'\n')
                .map_or(window.len(), |i| i + 1);
            let (text, _) = self
                .encoding
                .decode_without_bom_handling(&window[..consumed]);
            let chunk = strip_last_terminator(&text).to_string();
            self.advance(consumed);
            return Ok(chunk);
        }
    }

    async fn read_window(&mut self) -> Result<Vec<u8>, ImportError> {
        self.file.seek(SeekFrom::Start(self.offset)).await?;
        let mut window = Vec::with_capacity(self.chunk_size);
        (&mut self.file)
            .take(self.chunk_size as u64)
            .read_to_end(&mut window)
            .await?;
        Ok(window)
    }

    /// Source byte length of `consumed`, measured by encoding it back
    fn consumed_bytes(&self, consumed: &str) -> usize {
        let (bytes, _, _) = self.encoding.encode(consumed);
        bytes.len()
    }

    fn advance(&mut self, consumed: usize) {
        self.offset += consumed as u64;
        self.chunk_size = self.default_chunk;
        if self.offset >= self.file_size {
            self.eof = true;
        }
    }
}

fn consumed_matches(window: &[u8], consumed: usize) -> bool {
    consumed > 0 && window.get(consumed - 1) == Some(&b'\n')
}

/// Drop the final `\n` or `\r\n`, if the text ends with one
fn strip_last_terminator(text: &str) -> &str {
    let Some(last_n) = text.rfind('\n') else {
        return text;
    };
    if last_n + 1 != text.len() {
        return text;
    }
    let use_rn = text.rfind("\r\n").is_some_and(|rn| rn + 1 == last_n);
    if use_rn {
        &text[..last_n - 1]
    } else {
        &text[..last_n]
    }
}
