use crate::result::{DecodeError, FormatError};

pub struct Reader<'a> {
    pub data: &'a [u8],
    pub cur: usize,
}

#[derive(Debug)]
pub struct ReadError;

impl From<ReadError> for FormatError {
    fn from(ReadError: ReadError) -> Self {
        Self::Truncated
    }
}

impl<'a> Reader<'a> {
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, cur: 0 }
    }
    pub fn next<T: bytemuck::AnyBitPattern>(&mut self) -> Result<T, ReadError> {
        let amount = size_of::<T>();
        let bytes = self.data.get(self.cur..self.cur + amount).ok_or(ReadError)?;
        self.cur += amount;
        Ok(bytemuck::pod_read_unaligned(bytes))
    }
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.cur)
    }
}

/// Check that `data` is exactly `expected` bytes long before handing out a reader for it.
pub const fn exact_reader(data: &[u8], expected: usize) -> Result<Reader<'_>, DecodeError> {
    if data.len() != expected {
        return Err(DecodeError::Length {
            expected,
            found: data.len(),
        });
    }
    Ok(Reader::new(data))
}

#[test]
fn test_reader_le_scalars() {
    let data = [7u8, 0x78, 0x56, 0x34, 0x12, 0xFF];
    let mut rd = Reader::new(&data);
    assert_eq!(rd.next::<u8>().unwrap(), 7);
    assert_eq!(rd.next::<u32>().unwrap(), 0x1234_5678);
    assert_eq!(rd.remaining(), 1);
    assert!(rd.next::<u16>().is_err());
    // A failed read doesn't advance
    assert_eq!(rd.next::<u8>().unwrap(), 0xFF);
}

#[test]
fn test_exact_reader_rejects_wrong_len() {
    assert_eq!(
        exact_reader(&[0; 3], 4).err(),
        Some(DecodeError::Length {
            expected: 4,
            found: 3
        })
    );
    assert!(exact_reader(&[0; 4], 4).is_ok());
}
