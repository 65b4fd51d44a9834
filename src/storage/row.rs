//! Fixed-width row codec: `(id, username, email)` <-> a packed 291-byte image.
//!
//! No allocation. `serialize`/`deserialize` both touch exactly `ROW_SIZE`
//! bytes of a caller-supplied window so that trailing bytes in the
//! destination are overwritten deterministically on every call.
use std::mem;

pub const USERNAME_SIZE: usize = 32;
pub const EMAIL_SIZE: usize = 255;

const ID_SIZE: usize = mem::size_of::<u32>();
const ID_OFFSET: usize = 0;
const USERNAME_OFFSET: usize = ID_OFFSET + ID_SIZE;
const EMAIL_OFFSET: usize = USERNAME_OFFSET + USERNAME_SIZE;

/// Total on-disk width of one row. Load-bearing: part of the file format.
pub const ROW_SIZE: usize = ID_SIZE + USERNAME_SIZE + EMAIL_SIZE;

/// An in-memory row. The string fields carry one extra byte of capacity
/// over their on-disk width to guarantee a null terminator regardless of
/// how much of the buffer is occupied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: u32,
    username: [u8; USERNAME_SIZE + 1],
    email: [u8; EMAIL_SIZE + 1],
}

impl Row {
    /// Builds a row from borrowed strings, rejecting overlength input.
    ///
    /// # Errors
    /// Returns `None` if `username` exceeds [`USERNAME_SIZE`] bytes or
    /// `email` exceeds [`EMAIL_SIZE`] bytes.
    pub fn new(id: u32, username: &str, email: &str) -> Option<Row> {
        if username.len() > USERNAME_SIZE || email.len() > EMAIL_SIZE {
            return None;
        }
        let mut row = Row {
            id,
            username: [0u8; USERNAME_SIZE + 1],
            email: [0u8; EMAIL_SIZE + 1],
        };
        row.username[..username.len()].copy_from_slice(username.as_bytes());
        row.email[..email.len()].copy_from_slice(email.as_bytes());
        Some(row)
    }

    pub fn username(&self) -> &str {
        str_from_padded(&self.username)
    }

    pub fn email(&self) -> &str {
        str_from_padded(&self.email)
    }
}

fn str_from_padded(buf: &[u8]) -> &str {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    std::str::from_utf8(&buf[..end]).unwrap_or("")
}

/// Writes `row` into `dst`, a 291-byte window. `id` is written
/// little-endian; the string fields are copied zero-padded to their
/// fixed capacity.
pub fn serialize(row: &Row, dst: &mut [u8]) {
    debug_assert_eq!(dst.len(), ROW_SIZE);
    dst[ID_OFFSET..ID_OFFSET + ID_SIZE].copy_from_slice(&row.id.to_le_bytes());
    dst[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE]
        .copy_from_slice(&row.username[..USERNAME_SIZE]);
    dst[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE].copy_from_slice(&row.email[..EMAIL_SIZE]);
}

/// The inverse of [`serialize`]: populates `row` from a 291-byte window.
pub fn deserialize(src: &[u8]) -> Row {
    debug_assert_eq!(src.len(), ROW_SIZE);
    let id = u32::from_le_bytes(src[ID_OFFSET..ID_OFFSET + ID_SIZE].try_into().unwrap());
    let mut row = Row {
        id,
        username: [0u8; USERNAME_SIZE + 1],
        email: [0u8; EMAIL_SIZE + 1],
    };
    row.username[..USERNAME_SIZE]
        .copy_from_slice(&src[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE]);
    row.email[..EMAIL_SIZE].copy_from_slice(&src[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE]);
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let row = Row::new(1, "alice", "alice@example.com").unwrap();
        let mut buf = [0u8; ROW_SIZE];
        serialize(&row, &mut buf);
        let back = deserialize(&buf);
        assert_eq!(back, row);
        assert_eq!(back.username(), "alice");
        assert_eq!(back.email(), "alice@example.com");
    }

    #[test]
    fn round_trip_max_length_fields() {
        let username = "u".repeat(USERNAME_SIZE);
        let email = "e".repeat(EMAIL_SIZE);
        let row = Row::new(42, &username, &email).unwrap();
        let mut buf = [0u8; ROW_SIZE];
        serialize(&row, &mut buf);
        let back = deserialize(&buf);
        assert_eq!(back.username(), username);
        assert_eq!(back.email(), email);
    }

    #[test]
    fn rejects_overlength_fields() {
        assert!(Row::new(1, &"u".repeat(USERNAME_SIZE + 1), "e").is_none());
        assert!(Row::new(1, "u", &"e".repeat(EMAIL_SIZE + 1)).is_none());
    }

    #[test]
    fn serialize_overwrites_trailing_bytes_deterministically() {
        let mut buf = [0xAAu8; ROW_SIZE];
        let row = Row::new(1, "a", "b").unwrap();
        serialize(&row, &mut buf);
        assert_eq!(buf[USERNAME_OFFSET + 1], 0);
        assert_eq!(buf[EMAIL_OFFSET + 1], 0);
    }
}
