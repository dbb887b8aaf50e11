//! Fixed-window text splitter
//!
//! Breaks document text into overlapping character windows, preferring
//! whitespace boundaries so words are not cut mid-way. This is the
//! trivial baseline chunker, not a tokenizer-aware strategy.

/// Character-window text splitter with overlap
#[derive(Debug, Clone)]
pub struct TextSplitter {
    /// Maximum chunk size in characters
    pub chunk_size: usize,

    /// Characters carried over between consecutive chunks
    pub chunk_overlap: usize,
}

impl TextSplitter {
    /// Create a new splitter
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            chunk_overlap,
        }
    }

    /// Split text into chunks
    ///
    /// Whitespace-only input yields no chunks. The final chunk may be
    /// shorter than `chunk_size`.
    pub fn split(&self, text: &str) -> Vec<String> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }

        // Work in char positions to stay on UTF-8 boundaries
        let chars: Vec<char> = text.chars().collect();
        let total = chars.len();

        if total <= self.chunk_size {
            return vec![text.to_string()];
        }

        let mut chunks = Vec::new();
        let mut start = 0usize;

        while start < total {
            let mut end = (start + self.chunk_size).min(total);

            // Prefer breaking on whitespace, but never shrink the window
            // below half its size looking for one
            if end < total {
                let floor = start + self.chunk_size / 2;
                if let Some(pos) = (floor..end).rev().find(|&i| chars[i].is_whitespace()) {
                    end = pos;
                }
            }

            let chunk: String = chars[start..end].iter().collect();
            let chunk = chunk.trim();
            if !chunk.is_empty() {
                chunks.push(chunk.to_string());
            }

            if end >= total {
                break;
            }

            let mut next_start = end.saturating_sub(self.chunk_overlap);
            if next_start <= start {
                next_start = start + 1;
            }
            start = next_start;
        }

        chunks
    }
}
