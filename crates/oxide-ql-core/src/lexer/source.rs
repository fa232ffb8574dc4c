//! Byte sources the lexer pulls statement text from.

/// A pull-based source of statement bytes.
///
/// The lexer calls [`read`](Self::read) whenever its buffer runs dry.
pub trait ScanSource {
    /// Copies up to `buf.len()` bytes into `buf` and returns how many were
    /// copied. Returning 0 signals the end of input.
    fn read(&mut self, buf: &mut [u8]) -> usize;
}

impl ScanSource for &[u8] {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        let amt = self.len().min(buf.len());
        let (head, tail) = self.split_at(amt);
        buf[..amt].copy_from_slice(head);
        *self = tail;
        amt
    }
}

impl<S: ScanSource + ?Sized> ScanSource for &mut S {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        (**self).read(buf)
    }
}
