use std::io::{self, BufRead};

use tracing::debug;

/// Longest chunk handed to the scanner per refill. Lines longer than this
/// arrive in several pieces.
pub const DEFAULT_CHUNK_LEN: usize = 511;

/// Anything the scanner can pull raw bytes from.
pub trait SourceReader {
    /// Replaces the contents of `buf` with the next chunk of input: at most
    /// `max` bytes, ending early after a `\n`. Returns the number of bytes
    /// read, `0` meaning end of input.
    ///
    /// A read failure after some bytes were already taken still hands those
    /// bytes back; the failure is left for the next call.
    fn read_chunk(&mut self, buf: &mut Vec<u8>, max: usize) -> io::Result<usize>;
}

impl<R: BufRead> SourceReader for R {
    fn read_chunk(&mut self, buf: &mut Vec<u8>, max: usize) -> io::Result<usize> {
        buf.clear();

        while buf.len() < max {
            let available = match self.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) if buf.is_empty() => return Err(e),
                Err(e) => {
                    debug!(error = %e, bytes = buf.len(), "read failed mid-chunk, returning partial chunk");
                    break;
                }
            };

            if available.is_empty() {
                break;
            }

            let room = max - buf.len();
            let window = &available[..available.len().min(room)];
            let (taken, ends_line) = match window.iter().position(|&b| b == b'\n') {
                Some(newline) => (newline + 1, true),
                None => (window.len(), false),
            };

            buf.extend_from_slice(&window[..taken]);
            self.consume(taken);

            if ends_line {
                break;
            }
        }

        Ok(buf.len())
    }
}
