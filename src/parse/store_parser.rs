use crate::model::section::Section;
use crate::model::store::TaskStore;
use crate::model::task::Task;

/// Smallest possible encoded task: length word plus done flag, no text
const MIN_TASK_LEN: usize = 8 + 1;

/// The data file does not match the expected layout
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("truncated data at byte {offset}: need {needed} bytes, {remaining} left")]
    Truncated {
        offset: usize,
        needed: usize,
        remaining: usize,
    },
    #[error("implausible count {value} at byte {offset}")]
    LengthOverflow { offset: usize, value: u64 },
    #[error("{extra} unexpected trailing bytes at byte {offset}")]
    TrailingBytes { offset: usize, extra: usize },
}

/// Parse the on-disk layout written by `serialize_store`.
///
/// Every count and length is checked against the bytes that remain before
/// anything is read or allocated.
pub fn parse_store(bytes: &[u8]) -> Result<TaskStore, CodecError> {
    let mut reader = Reader { bytes, pos: 0 };
    let mut store = TaskStore::default();

    for section in Section::ALL {
        let count_offset = reader.pos;
        let count = reader.read_len()?;
        if count > reader.remaining() / MIN_TASK_LEN {
            return Err(CodecError::LengthOverflow {
                offset: count_offset,
                value: count as u64,
            });
        }

        let tasks = store.section_mut(section);
        tasks.reserve_exact(count);
        for _ in 0..count {
            tasks.push(reader.read_task()?);
        }
    }

    if reader.remaining() > 0 {
        return Err(CodecError::TrailingBytes {
            offset: reader.pos,
            extra: reader.remaining(),
        });
    }
    Ok(store)
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        if n > self.remaining() {
            return Err(CodecError::Truncated {
                offset: self.pos,
                needed: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// A u64 LE count that must fit in `usize`
    fn read_len(&mut self) -> Result<usize, CodecError> {
        let offset = self.pos;
        let raw = self.take(8)?;
        let mut word = [0u8; 8];
        word.copy_from_slice(raw);
        let value = u64::from_le_bytes(word);
        usize::try_from(value).map_err(|_| CodecError::LengthOverflow { offset, value })
    }

    fn read_task(&mut self) -> Result<Task, CodecError> {
        let len_offset = self.pos;
        let len = self.read_len()?;
        // Text plus the trailing done flag must still be present
        if len >= self.remaining() {
            return Err(CodecError::Truncated {
                offset: len_offset,
                needed: len.saturating_add(1),
                remaining: self.remaining(),
            });
        }
        let text = self.take(len)?.to_vec();
        let done = self.take(1)?[0] != 0;
        Ok(Task { text, done })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::serialize_store;

    fn word(v: u64) -> [u8; 8] {
        v.to_le_bytes()
    }

    fn sample_store() -> TaskStore {
        TaskStore {
            daily: vec![
                Task::new("Buy milk"),
                Task {
                    text: Vec::new(),
                    done: true,
                },
            ],
            weekly: vec![Task {
                text: vec![0xC3, 0x28, 0xFF, 0x00],
                done: true,
            }],
            monthly: vec![Task::new("Pay rent \u{1F3E0}")],
        }
    }

    #[test]
    fn round_trip_preserves_every_field() {
        let store = sample_store();
        let parsed = parse_store(&serialize_store(&store)).unwrap();
        assert_eq!(parsed, store);
    }

    /// Deterministic store: `shape` gives per-section counts, `seed` varies
    /// text lengths, bytes and done flags
    fn generated_store(shape: [usize; 3], seed: u64) -> TaskStore {
        let mut state = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        };
        let mut store = TaskStore::default();
        for (section, count) in Section::ALL.into_iter().zip(shape) {
            for _ in 0..count {
                let len = (next() % 40) as usize;
                let text = (0..len).map(|_| next() as u8).collect();
                let done = next() % 2 == 0;
                store.section_mut(section).push(Task { text, done });
            }
        }
        store
    }

    #[test]
    fn round_trip_generated_stores() {
        let shapes = [
            [0, 0, 0],
            [1, 0, 0],
            [0, 1, 0],
            [0, 0, 1],
            [3, 0, 7],
            [12, 5, 1],
            [0, 30, 0],
        ];
        for (i, shape) in shapes.into_iter().enumerate() {
            for seed in 0..8 {
                let store = generated_store(shape, ((i as u64) << 8) | seed);
                let parsed = parse_store(&serialize_store(&store)).unwrap();
                assert_eq!(parsed, store, "shape {shape:?} seed {seed}");
            }
        }
    }

    #[test]
    fn round_trip_every_byte_value_and_empty_text() {
        let all_bytes: Vec<u8> = (0..=255).collect();
        let store = TaskStore {
            daily: vec![Task {
                text: all_bytes.clone(),
                done: true,
            }],
            weekly: vec![Task::new(Vec::<u8>::new()), Task::new(all_bytes.clone())],
            monthly: (0..=255u8)
                .map(|b| Task {
                    text: vec![b],
                    done: b % 3 == 0,
                })
                .collect(),
        };
        assert_eq!(parse_store(&serialize_store(&store)).unwrap(), store);
    }

    #[test]
    fn round_trip_empty_store() {
        let store = TaskStore::default();
        assert_eq!(parse_store(&serialize_store(&store)).unwrap(), store);
    }

    #[test]
    fn nonzero_done_byte_reads_as_true() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&word(1));
        bytes.extend_from_slice(&word(1));
        bytes.push(b'x');
        bytes.push(7);
        bytes.extend_from_slice(&word(0));
        bytes.extend_from_slice(&word(0));

        let store = parse_store(&bytes).unwrap();
        assert!(store.daily[0].done);
    }

    #[test]
    fn empty_input_is_truncated() {
        assert_eq!(
            parse_store(&[]),
            Err(CodecError::Truncated {
                offset: 0,
                needed: 8,
                remaining: 0
            })
        );
    }

    #[test]
    fn text_length_past_end_is_truncated() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&word(1));
        bytes.extend_from_slice(&word(100));
        bytes.extend_from_slice(b"short");

        assert!(matches!(
            parse_store(&bytes),
            Err(CodecError::Truncated { offset: 8, .. })
        ));
    }

    #[test]
    fn missing_done_flag_is_truncated() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&word(1));
        bytes.extend_from_slice(&word(2));
        bytes.extend_from_slice(b"ab");

        assert!(matches!(parse_store(&bytes), Err(CodecError::Truncated { .. })));
    }

    #[test]
    fn huge_task_count_is_rejected_without_allocating() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&word(u64::MAX / 2));
        bytes.extend_from_slice(&[0u8; 32]);

        assert!(matches!(
            parse_store(&bytes),
            Err(CodecError::LengthOverflow { offset: 0, .. })
        ));
    }

    #[test]
    fn missing_sections_are_truncated() {
        // Only the daily count is present
        let bytes = word(0);
        assert!(matches!(
            parse_store(&bytes),
            Err(CodecError::Truncated { offset: 8, .. })
        ));
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut bytes = serialize_store(&sample_store());
        let end = bytes.len();
        bytes.extend_from_slice(b"junk");

        assert_eq!(
            parse_store(&bytes),
            Err(CodecError::TrailingBytes {
                offset: end,
                extra: 4
            })
        );
    }
}
