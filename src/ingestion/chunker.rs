//! Fixed-size word-window chunking

/// Split text into contiguous windows of `chunk_size` whitespace-delimited
/// words. The final window may be shorter; empty text yields no chunks.
/// Windows do not overlap and preserve word order.
pub fn chunk_words(text: &str, chunk_size: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();

    words
        .chunks(chunk_size.max(1))
        .map(|window| window.join(" "))
        .collect()
}
