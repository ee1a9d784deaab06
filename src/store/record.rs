//! Record log entry format
//!
//! Each entry in the record log is laid out as:
//!
//! ```text
//! +------------------+
//! | Record Length    | (u32 LE, total including this field)
//! +------------------+
//! | Collection       | (length-prefixed string)
//! +------------------+
//! | Document ID      | (length-prefixed string)
//! +------------------+
//! | Tombstone Flag   | (u8: 0 = live, 1 = deleted)
//! +------------------+
//! | Document Body    | (length-prefixed JSON bytes, empty for tombstones)
//! +------------------+
//! | Checksum         | (u32 LE, CRC32 over length prefix and body)
//! +------------------+
//! ```

use std::io;

const LEN_FIELD: usize = 4;
const CRC_FIELD: usize = 4;
// Length field, two empty length-prefixed strings, flag byte, empty
// length-prefixed body, checksum.
const MIN_RECORD_LEN: usize = LEN_FIELD + 4 + 4 + 1 + 4 + CRC_FIELD;

/// One entry of the record log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Collection the document belongs to
    pub collection: String,
    /// Document primary key
    pub document_id: String,
    /// Whether this entry marks a deletion
    pub is_tombstone: bool,
    /// JSON document body (empty for tombstones)
    pub document_body: Vec<u8>,
}

impl LogRecord {
    /// Create a live document entry
    pub fn document(
        collection: impl Into<String>,
        document_id: impl Into<String>,
        document_body: Vec<u8>,
    ) -> Self {
        Self {
            collection: collection.into(),
            document_id: document_id.into(),
            is_tombstone: false,
            document_body,
        }
    }

    /// Create a tombstone entry for a deleted document
    pub fn tombstone(collection: impl Into<String>, document_id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            document_id: document_id.into(),
            is_tombstone: true,
            document_body: Vec::new(),
        }
    }

    /// Serialize the complete record, checksum included.
    pub fn serialize(&self) -> Vec<u8> {
        let payload_len = 4
            + self.collection.len()
            + 4
            + self.document_id.len()
            + 1
            + 4
            + self.document_body.len();
        let total_len = (LEN_FIELD + payload_len + CRC_FIELD) as u32;

        let mut framed = Vec::with_capacity(total_len as usize);
        framed.extend_from_slice(&total_len.to_le_bytes());
        put_slice(&mut framed, self.collection.as_bytes());
        put_slice(&mut framed, self.document_id.as_bytes());
        framed.push(u8::from(self.is_tombstone));
        put_slice(&mut framed, &self.document_body);

        let crc = crc32fast::hash(&framed);
        framed.extend_from_slice(&crc.to_le_bytes());

        framed
    }

    /// Deserialize a record from bytes, verifying the checksum.
    ///
    /// Returns the record and the number of bytes consumed.
    pub fn deserialize(data: &[u8]) -> io::Result<(Self, usize)> {
        if data.len() < MIN_RECORD_LEN {
            return Err(bad_record(
                io::ErrorKind::UnexpectedEof,
                format!("record shorter than minimum frame ({} bytes)", data.len()),
            ));
        }

        let mut scanner = ByteScanner::new(data);
        let total_len = scanner.take_u32()? as usize;

        if total_len < MIN_RECORD_LEN {
            return Err(bad_record(
                io::ErrorKind::InvalidData,
                format!("declared record length {} below minimum", total_len),
            ));
        }
        if data.len() < total_len {
            return Err(bad_record(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "record needs {} bytes but only {} remain",
                    total_len,
                    data.len()
                ),
            ));
        }

        let crc_offset = total_len - CRC_FIELD;
        let stored_crc = u32::from_le_bytes([
            data[crc_offset],
            data[crc_offset + 1],
            data[crc_offset + 2],
            data[crc_offset + 3],
        ]);
        let computed_crc = crc32fast::hash(&data[..crc_offset]);
        if computed_crc != stored_crc {
            return Err(bad_record(
                io::ErrorKind::InvalidData,
                format!(
                    "checksum mismatch: computed {:08x}, stored {:08x}",
                    computed_crc, stored_crc
                ),
            ));
        }

        scanner.limit(crc_offset);
        let collection = scanner.take_string("collection")?;
        let document_id = scanner.take_string("document id")?;
        let is_tombstone = scanner.take_u8()? != 0;
        let document_body = scanner.take_slice()?.to_vec();

        Ok((
            Self {
                collection,
                document_id,
                is_tombstone,
                document_body,
            },
            total_len,
        ))
    }
}

fn put_slice(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
    out.extend_from_slice(bytes);
}

fn bad_record(kind: io::ErrorKind, reason: impl Into<String>) -> io::Error {
    io::Error::new(kind, reason.into())
}

/// Bounds-checked forward scanner over a record frame.
struct ByteScanner<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteScanner<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Restrict the scanner to the first `end` bytes.
    fn limit(&mut self, end: usize) {
        self.data = &self.data[..end];
    }

    fn take(&mut self, n: usize) -> io::Result<&'a [u8]> {
        if self.data.len() - self.pos < n {
            return Err(bad_record(
                io::ErrorKind::UnexpectedEof,
                format!("field of {} bytes overruns record frame", n),
            ));
        }
        let taken = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(taken)
    }

    fn take_u8(&mut self) -> io::Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn take_u32(&mut self) -> io::Result<u32> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn take_slice(&mut self) -> io::Result<&'a [u8]> {
        let len = self.take_u32()? as usize;
        self.take(len)
    }

    fn take_string(&mut self, what: &str) -> io::Result<String> {
        let bytes = self.take_slice()?;
        std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|e| {
                bad_record(
                    io::ErrorKind::InvalidData,
                    format!("{} is not valid UTF-8: {}", what, e),
                )
            })
    }
}
