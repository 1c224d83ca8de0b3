use crate::error::{Result, err_end_of_data};

/// Forward-only little endian reader over a borrowed block stream.
pub struct BlockCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BlockCursor<'a> {
    #[inline]
    pub fn new(data: &'a [u8]) -> BlockCursor<'a> {
        BlockCursor { data, pos: 0 }
    }

    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    #[inline]
    pub fn has_remaining(&self) -> bool {
        self.pos < self.data.len()
    }

    pub fn get_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let end = self.pos + N;
        let Some(bytes) = self.data.get(self.pos..end) else {
            return Err(err_end_of_data(end, self.data.len()));
        };
        let mut buf = [0u8; N];
        buf.copy_from_slice(bytes);
        self.pos = end;
        Ok(buf)
    }

    #[inline]
    pub fn get_u8(&mut self) -> Result<u8> {
        Ok(self.get_array::<1>()?[0])
    }

    #[inline]
    pub fn get_u16_le(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.get_array()?))
    }

    #[inline]
    pub fn get_u32_le(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.get_array()?))
    }

    /// reads a 6 byte little endian field into the low 48 bits
    #[inline]
    pub fn get_u48_le(&mut self) -> Result<u64> {
        let [b0, b1, b2, b3, b4, b5] = self.get_array()?;
        Ok(u64::from_le_bytes([b0, b1, b2, b3, b4, b5, 0, 0]))
    }
}
