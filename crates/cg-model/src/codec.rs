/// Converts between text and token sequences.
pub trait TokenCodec: Send {
    /// Encode text into token IDs without adding any special tokens.
    fn encode(&self, text: &str) -> crate::Result<Vec<u32>>;

    /// Decode token IDs back into text.
    fn decode(&self, tokens: &[u32]) -> crate::Result<String>;
}

impl<C: TokenCodec + ?Sized> TokenCodec for Box<C> {
    fn encode(&self, text: &str) -> crate::Result<Vec<u32>> {
        (**self).encode(text)
    }

    fn decode(&self, tokens: &[u32]) -> crate::Result<String> {
        (**self).decode(tokens)
    }
}
