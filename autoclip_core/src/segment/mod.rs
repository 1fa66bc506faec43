//! Splitting oversized clipboard text into speakable chunks.
//!
//! Long text is cut into windows of at most `chunk_size` characters. With
//! word splitting enabled a window that would end mid-word is shortened to
//! its last space, and that space is consumed as the separator between two
//! chunks. Nothing else is ever dropped or duplicated: re-inserting one
//! space after every segment flagged `separator` rebuilds the input.

/// Chunk sizes below this disable splitting entirely.
pub const MIN_CHUNK_SIZE: usize = 100;

/// One chunk of the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    /// The space following this chunk was consumed as a split point.
    pub separator: bool,
}

/// Lazy iterator over the chunks of a text. Created by [`segments`].
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    text: &'a str,
    /// Byte offset of the next unread character.
    pos: usize,
    chunk_size: usize,
    split_at_word: bool,
    whole: bool,
    done: bool,
}

/// Iterates over the chunks of `text`.
///
/// Yields `text` unchanged as a single segment when it is empty, when
/// `chunk_size` is below [`MIN_CHUNK_SIZE`], or when it already fits.
pub fn segments(text: &str, chunk_size: usize, split_at_word: bool) -> Segments<'_> {
    let whole = text.is_empty()
        || chunk_size < MIN_CHUNK_SIZE
        || text.chars().nth(chunk_size).is_none();
    Segments {
        text,
        pos: 0,
        chunk_size,
        split_at_word,
        whole,
        done: false,
    }
}

/// Splits `text` into owned chunks, in order. Never returns an empty vector.
pub fn split(text: &str, chunk_size: usize, split_at_word: bool) -> Vec<String> {
    segments(text, chunk_size, split_at_word)
        .map(|s| s.text.to_owned())
        .collect()
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        if self.done {
            return None;
        }
        if self.whole {
            self.done = true;
            return Some(Segment {
                text: self.text,
                separator: false,
            });
        }

        let rest = &self.text[self.pos..];
        if rest.is_empty() {
            self.done = true;
            return None;
        }

        let end = rest
            .char_indices()
            .nth(self.chunk_size)
            .map_or(rest.len(), |(i, _)| i);
        let window = &rest[..end];

        if end == rest.len() || !self.split_at_word || window.ends_with(' ') {
            self.pos += end;
            return Some(Segment {
                text: window,
                separator: false,
            });
        }

        match window.rfind(' ') {
            // A split in the first two characters would leave a near-empty chunk.
            Some(space) if window[..space].chars().count() > 1 => {
                self.pos += space + 1;
                Some(Segment {
                    text: &window[..space],
                    separator: true,
                })
            }
            _ => {
                self.pos += end;
                Some(Segment {
                    text: window,
                    separator: false,
                })
            }
        }
    }
}
