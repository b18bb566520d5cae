//! Frame extraction: locate SOF/EOF boundaries in a raw capture

use crate::constants::{Marker, EOF_MARKER, MARKER_SIZE, SOF_MARKER};
use crate::error::ExtractError;
use crate::types::Frame;
use bytes::Bytes;

/// Find the next occurrence of a two-byte marker
fn find_marker(data: &[u8], marker: &[u8; MARKER_SIZE]) -> Option<usize> {
    // memmem dispatches to vectorised backends where available
    memchr::memmem::find(data, marker)
}

/// Locate frame bounds as `(start, end)` with `end` one past the EOF marker
fn locate(buffer: &[u8]) -> Result<(usize, usize), ExtractError> {
    let sof = find_marker(buffer, SOF_MARKER).ok_or(ExtractError::MarkerNotFound(Marker::Sof))?;

    // EOF search starts after the SOF bytes so the two markers never overlap
    let search_from = sof + MARKER_SIZE;
    let eof = find_marker(&buffer[search_from..], EOF_MARKER)
        .map(|rel| search_from + rel)
        .ok_or(ExtractError::MarkerNotFound(Marker::Eof))?;

    Ok((sof, eof + MARKER_SIZE))
}

/// Extract the first candidate frame from a raw buffer
///
/// The frame runs from the first SOF to the first EOF after it, both markers
/// included. Nothing is verified here; a short or garbled capture simply
/// yields [`ExtractError::MarkerNotFound`].
pub fn extract(buffer: &[u8]) -> Result<Frame<'_>, ExtractError> {
    let (start, end) = locate(buffer)?;
    Ok(Frame::new(start, &buffer[start..end]))
}

/// Extract the first candidate frame without copying
///
/// The returned `Bytes` shares the allocation of `buffer`.
pub fn extract_zero_copy(buffer: &Bytes) -> Result<Bytes, ExtractError> {
    let (start, end) = locate(buffer)?;
    Ok(buffer.slice(start..end))
}

/// Iterator over every candidate frame in a long capture
///
/// Each search resumes after the previous frame's EOF, or just past its SOF
/// after a [`resync`](FrameIter::resync). Iteration stops at the first SOF
/// that has no EOF after it.
///
/// A bounded iterator (see [`bounded_frames`]) only looks for the EOF within
/// `max_len` bytes of each SOF. An SOF without one is counted as truncated and
/// skipped, which keeps a capture full of stray SOF markers linear to scan.
#[derive(Debug, Clone)]
pub struct FrameIter<'a> {
    buffer: &'a [u8],
    pos: usize,
    max_len: Option<usize>,
    truncated: usize,
}

impl<'a> FrameIter<'a> {
    /// Resume the search two bytes after `frame`'s SOF instead of past its EOF
    ///
    /// Used when a candidate is rejected: its SOF may have been a stray marker
    /// and the real frame can start anywhere inside it.
    pub fn resync(&mut self, frame: &Frame<'_>) {
        self.pos = frame.offset + MARKER_SIZE;
    }

    /// Number of SOF markers skipped for lack of an EOF within `max_len`
    pub fn truncated(&self) -> usize {
        self.truncated
    }
}

impl<'a> Iterator for FrameIter<'a> {
    type Item = Frame<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let rest = self.buffer.get(self.pos..)?;
            let sof = find_marker(rest, SOF_MARKER)?;
            let search_from = sof + MARKER_SIZE;
            let limit = match self.max_len {
                Some(max) => sof.saturating_add(max).min(rest.len()),
                None => rest.len(),
            };

            match rest
                .get(search_from..limit)
                .and_then(|window| find_marker(window, EOF_MARKER))
            {
                Some(rel) => {
                    let end = search_from + rel + MARKER_SIZE;
                    let frame = Frame::new(self.pos + sof, &rest[sof..end]);
                    self.pos += end;
                    return Some(frame);
                }
                None if limit == rest.len() => {
                    self.pos = self.buffer.len();
                    return None;
                }
                None => {
                    self.truncated += 1;
                    self.pos += search_from;
                }
            }
        }
    }
}

/// Iterate all candidate frames in `buffer`
pub fn frames(buffer: &[u8]) -> FrameIter<'_> {
    FrameIter {
        buffer,
        pos: 0,
        max_len: None,
        truncated: 0,
    }
}

/// Iterate candidate frames no longer than `max_len` bytes, markers included
pub fn bounded_frames(buffer: &[u8], max_len: usize) -> FrameIter<'_> {
    FrameIter {
        buffer,
        pos: 0,
        max_len: Some(max_len),
        truncated: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_with_noise() {
        let buffer = [
            0x00, 0xFF, 0x1A, 0x85, 0x01, 0x02, 0x22, 0xCE, 0x99, 0x1A, 0x85,
        ];
        let frame = extract(&buffer).unwrap();
        assert_eq!(frame.offset, 2);
        assert_eq!(frame.as_bytes(), &[0x1A, 0x85, 0x01, 0x02, 0x22, 0xCE]);
    }

    #[test]
    fn test_missing_sof() {
        let buffer = [0x22, 0xCE, 0x00, 0x1A];
        assert_eq!(
            extract(&buffer),
            Err(ExtractError::MarkerNotFound(Marker::Sof))
        );
        assert_eq!(extract(&[]), Err(ExtractError::MarkerNotFound(Marker::Sof)));
    }

    #[test]
    fn test_missing_eof() {
        // EOF before SOF does not count
        let buffer = [0x22, 0xCE, 0x1A, 0x85, 0x00, 0x01];
        assert_eq!(
            extract(&buffer),
            Err(ExtractError::MarkerNotFound(Marker::Eof))
        );
    }

    #[test]
    fn test_eof_not_overlapping_sof() {
        // 1A 85 22 CE: EOF immediately after SOF gives a 4-byte frame
        let buffer = [0x1A, 0x85, 0x22, 0xCE];
        let frame = extract(&buffer).unwrap();
        assert_eq!(frame.len(), 4);

        // A lone SOF whose second byte could start an EOF is not a frame
        let buffer = [0x1A, 0x85, 0xCE];
        assert!(extract(&buffer).is_err());
    }

    #[test]
    fn test_first_eof_wins() {
        let buffer = [0x1A, 0x85, 0xAA, 0x22, 0xCE, 0xBB, 0x22, 0xCE];
        let frame = extract(&buffer).unwrap();
        assert_eq!(frame.len(), 5);
    }

    #[test]
    fn test_zero_copy_matches_borrowed() {
        let buffer = Bytes::from_static(&[0x07, 0x1A, 0x85, 0x10, 0x20, 0x22, 0xCE, 0x07]);
        let owned = extract_zero_copy(&buffer).unwrap();
        let borrowed = extract(&buffer).unwrap();
        assert_eq!(owned.as_ref(), borrowed.as_bytes());
    }

    #[test]
    fn test_frame_iter() {
        let buffer = [
            0x1A, 0x85, 0x01, 0x22, 0xCE, // frame at 0
            0xEE, 0xEE, // noise
            0x1A, 0x85, 0x02, 0x03, 0x22, 0xCE, // frame at 7
            0x1A, 0x85, 0x04, // truncated
        ];
        let found: Vec<_> = frames(&buffer).collect();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].offset, 0);
        assert_eq!(found[1].offset, 7);
        assert_eq!(found[1].len(), 6);
    }

    #[test]
    fn test_bounded_frames_skip_distant_eof() {
        // Stray SOFs whose only EOF lies beyond max_len
        let mut buffer = Vec::new();
        for _ in 0..4 {
            buffer.extend_from_slice(&[0x1A, 0x85, 0x00, 0x00]);
        }
        buffer.extend_from_slice(&[0x1A, 0x85, 0x01, 0x22, 0xCE]);

        let mut iter = bounded_frames(&buffer, 6);
        let found: Vec<_> = iter.by_ref().collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].offset, 16);
        assert_eq!(iter.truncated(), 4);

        // Unbounded iteration pairs the first SOF with the distant EOF
        let found: Vec<_> = frames(&buffer).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].offset, 0);
    }

    #[test]
    fn test_bounded_frames_stop_at_end() {
        let buffer = [0x1A, 0x85, 0x01, 0x22, 0xCE, 0x1A, 0x85, 0x02];
        let mut iter = bounded_frames(&buffer, 64);
        assert_eq!(iter.next().map(|f| f.offset), Some(0));
        assert!(iter.next().is_none());
        assert_eq!(iter.truncated(), 0);
    }

    #[test]
    fn test_resync_after_rejected_candidate() {
        let buffer = [
            0x1A, 0x85, 0x00, // dangling SOF
            0x1A, 0x85, 0x01, 0x22, 0xCE, // frame at 3
        ];
        let mut iter = frames(&buffer);
        let first = iter.next().unwrap();
        assert_eq!((first.offset, first.len()), (0, 8));

        iter.resync(&first);
        let second = iter.next().unwrap();
        assert_eq!((second.offset, second.len()), (3, 5));
        assert!(iter.next().is_none());
    }
}
