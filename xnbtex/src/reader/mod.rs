mod cursor;

pub use cursor::BlockCursor;
