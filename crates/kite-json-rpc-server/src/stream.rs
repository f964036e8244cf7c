//! Byte-stream plumbing between a transport and the dispatcher.

use std::io::{self, Read};

use bytes::Bytes;

/// Drains `source` and returns two independently consumable copies of its
/// bytes: a peek copy and a full copy.
///
/// The method name must be known before the type-specific request parser can
/// be selected, so the same message is parsed twice from separate copies.
/// The copies share one allocation; the source is fully consumed and dropped
/// regardless of what the dispatch pipeline does with either copy.
pub fn tee<R: Read>(mut source: R) -> io::Result<(Bytes, Bytes)> {
    let mut buffer = Vec::new();
    source.read_to_end(&mut buffer)?;
    let full = Bytes::from(buffer);
    Ok((full.clone(), full))
}
