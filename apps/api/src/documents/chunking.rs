/// Default window size, in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;
/// Default overlap between consecutive windows, in characters.
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// Fixed-size overlapping character windows over a text.
#[derive(Debug, Clone, Copy)]
pub struct ChunkWindow {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Default for ChunkWindow {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_OVERLAP)
    }
}

impl ChunkWindow {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            chunk_overlap,
        }
    }

    /// Effective overlap: an overlap that would stall the window is treated as zero.
    pub fn overlap(&self) -> usize {
        if self.chunk_size > self.chunk_overlap {
            self.chunk_overlap
        } else {
            0
        }
    }

    /// Splits `text` into windows in source order.
    ///
    /// Every window except possibly the last holds exactly `chunk_size` characters.
    /// The window stops once it reaches the end of the text, so no emitted chunk is
    /// wholly contained in the previous one.
    pub fn split(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let total_len = chars.len();
        let step = self.chunk_size - self.overlap();

        let mut chunks = Vec::new();
        let mut offset = 0;
        while offset < total_len {
            let end = (offset + self.chunk_size).min(total_len);
            chunks.push(chars[offset..end].iter().collect());
            if end == total_len {
                break;
            }
            offset += step;
        }
        chunks
    }

    /// Inverse of [`ChunkWindow::split`]: drops each later chunk's overlap prefix.
    pub fn reassemble(&self, chunks: &[String]) -> String {
        let overlap = self.overlap();
        let mut text = String::new();
        for (i, chunk) in chunks.iter().enumerate() {
            if i == 0 {
                text.push_str(chunk);
            } else {
                text.extend(chunk.chars().skip(overlap));
            }
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(len: usize) -> String {
        "abcdefghij".chars().cycle().take(len).collect()
    }

    #[test]
    fn test_empty_text_has_no_chunks() {
        assert!(ChunkWindow::default().split("").is_empty());
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        let chunks = ChunkWindow::default().split("Requirements: Python.");
        assert_eq!(chunks, vec!["Requirements: Python.".to_string()]);
    }

    #[test]
    fn test_exact_chunk_size_is_single_chunk() {
        let text = sample(DEFAULT_CHUNK_SIZE);
        assert_eq!(ChunkWindow::default().split(&text).len(), 1);
    }

    #[test]
    fn test_windows_advance_by_size_minus_overlap() {
        let text = sample(2500);
        let chunks = ChunkWindow::default().split(&text);
        // offsets 0, 800, 1600 -> the third window reaches the end
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].chars().count(), 1000);
        assert_eq!(chunks[1].chars().count(), 1000);
        assert_eq!(chunks[2].chars().count(), 900);
        assert_eq!(
            chunks[1].chars().take(200).collect::<String>(),
            chunks[0].chars().skip(800).collect::<String>()
        );
    }

    #[test]
    fn test_reassemble_reconstructs_source() {
        let window = ChunkWindow::default();
        for len in [0, 1, 999, 1000, 1001, 1800, 1801, 4321] {
            let text = sample(len);
            let chunks = window.split(&text);
            assert_eq!(window.reassemble(&chunks), text, "len {len}");
            for chunk in chunks.iter().take(chunks.len().saturating_sub(1)) {
                assert_eq!(chunk.chars().count(), DEFAULT_CHUNK_SIZE);
            }
        }
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let text: String = "é".repeat(1500);
        let chunks = ChunkWindow::default().split(&text);
        assert_eq!(chunks[0].chars().count(), 1000);
        assert_eq!(ChunkWindow::default().reassemble(&chunks), text);
    }

    #[test]
    fn test_overlap_not_smaller_than_size_is_ignored() {
        let window = ChunkWindow::new(10, 10);
        let chunks = window.split(&sample(25));
        assert_eq!(chunks.len(), 3);
        assert_eq!(window.reassemble(&chunks), sample(25));
    }
}
