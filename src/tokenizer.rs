//! Splits an input line into a command word and its arguments.
//!
//! Words are separated by single spaces. Text between single quotes is taken
//! literally, spaces included, and the quotes themselves are dropped. An
//! unterminated quote simply runs to the end of the line.

/// A tokenized input line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    /// First word of the line. Empty when the line is empty.
    pub command: String,
    /// Remaining words, in the order they were typed.
    pub args: Vec<String>,
}

impl CommandLine {
    /// True when there is nothing to dispatch.
    pub fn is_empty(&self) -> bool {
        self.command.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenizingState {
    Unquoted,
    SingleQuoted,
}

struct TokenizingFSM<'a> {
    input: std::str::Chars<'a>,
    state: TokenizingState,
    words: Vec<String>,
    buffer: String,
}

impl<'a> TokenizingFSM<'a> {
    fn new(line: &'a str) -> Self {
        TokenizingFSM {
            input: line.chars(),
            state: TokenizingState::Unquoted,
            words: Vec::new(),
            buffer: String::new(),
        }
    }

    fn make_words(mut self) -> Vec<String> {
        while let Some(ch) = self.input.next() {
            match self.state {
                TokenizingState::Unquoted => self.handle_unquoted(ch),
                TokenizingState::SingleQuoted => self.handle_single_quote(ch),
            }
        }

        // The last word is kept even when empty; an open quote needs no special care.
        self.finish_word();
        self.words
    }

    fn handle_unquoted(&mut self, ch: char) {
        match ch {
            ' ' => self.finish_word(),
            '\'' => self.state = TokenizingState::SingleQuoted,
            c => self.buffer.push(c),
        }
    }

    fn handle_single_quote(&mut self, ch: char) {
        match ch {
            '\'' => self.state = TokenizingState::Unquoted,
            c => self.buffer.push(c),
        }
    }

    fn finish_word(&mut self) {
        self.words.push(std::mem::take(&mut self.buffer));
    }
}

/// Tokenize `line` into a [`CommandLine`].
///
/// Never fails: consecutive spaces produce empty words and unbalanced quotes
/// extend to the end of the line.
pub fn tokenize(line: &str) -> CommandLine {
    let mut words = TokenizingFSM::new(line).make_words().into_iter();
    let command = words.next().unwrap_or_default();
    CommandLine {
        command,
        args: words.collect(),
    }
}
