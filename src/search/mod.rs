pub mod affine;
pub mod vigenere;

pub use self::affine::AffineSearch;
pub use self::vigenere::VigenereSearch;
