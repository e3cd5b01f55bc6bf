use crate::traits::Lexeme;

/// A cursor over already-lexed tokens.
///
/// The stream borrows the token slice and owns only its position, so it is
/// `Copy`: forking for lookahead is a plain copy, and each exploration branch
/// keeps its own position. Speculative matches on a fork are never visible to
/// the stream it was forked from.
///
/// # Example
///
/// ```ignore
/// let mut stream = AssistStream::new(&tokens);
/// let mut fork = stream.fork();
/// if element.match_once(&grammar, &mut fork) {
///     stream = fork; // commit
/// }
/// ```
#[derive(Debug)]
pub struct AssistStream<'t, T> {
    tokens: &'t [T],
    index: usize,
}

impl<T> Clone for AssistStream<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for AssistStream<'_, T> {}

impl<'t, T: Lexeme> AssistStream<'t, T> {
    /// Creates a stream positioned at the first token.
    #[inline]
    pub const fn new(tokens: &'t [T]) -> Self {
        Self { tokens, index: 0 }
    }

    /// Creates a stream positioned at `index`.
    ///
    /// Positions past the end are clamped to the end-of-stream position.
    #[inline]
    pub fn at(tokens: &'t [T], index: usize) -> Self {
        Self {
            tokens,
            index: index.min(tokens.len()),
        }
    }

    /// The full token slice, independent of the cursor.
    #[inline]
    pub const fn tokens(&self) -> &'t [T] {
        self.tokens
    }

    /// Total number of tokens in the stream.
    #[inline]
    pub const fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the current cursor position.
    #[inline]
    pub const fn cursor(&self) -> usize {
        self.index
    }

    /// Rewinds (or fast-forwards) to a previous cursor position.
    #[inline]
    pub fn rewind(&mut self, pos: usize) {
        self.index = pos.min(self.tokens.len());
    }

    /// Creates a fork for lookahead without moving this stream.
    #[inline]
    pub const fn fork(&self) -> Self {
        Self {
            tokens: self.tokens,
            index: self.index,
        }
    }

    /// Returns `true` once every token has been consumed.
    #[inline]
    pub const fn is_eof(&self) -> bool {
        self.index >= self.tokens.len()
    }

    /// Peeks at the token under the cursor.
    #[inline]
    pub fn current(&self) -> Option<&'t T> {
        self.tokens.get(self.index)
    }

    /// Moves the cursor past the current token.
    ///
    /// Does nothing at end-of-stream.
    #[inline]
    pub fn advance(&mut self) {
        if !self.is_eof() {
            self.index += 1;
        }
    }

    /// Consumes and returns the token under the cursor.
    #[inline]
    pub fn next_token(&mut self) -> Option<&'t T> {
        let token = self.current()?;
        self.index += 1;
        Some(token)
    }

    /// Number of tokens after the cursor.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.tokens.len().saturating_sub(self.index)
    }
}
