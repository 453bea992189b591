pub mod token;

use quick_error::quick_error;
use std::{
    io::{BufReader, Cursor, Read, Seek, SeekFrom},
    path::PathBuf,
};
use token::{Keyword, Symbol, Token, TokenType};

quick_error! {
    #[derive(Debug)]
    pub enum Error {
        IOError(err: std::io::Error) {
            from()
            display("IO Error: {}", err)
            source(err)
        }
        NumberParseError(err: std::num::ParseIntError, line: usize, column: usize) {
            display("Number Parse Error: {}\nLine: {}, Column: {}", err, line, column)
            source(err)
        }
        UnknownSymbolError(char: char, line: usize, column: usize) {
            display("Unknown Symbol: {}\nLine: {}, Column: {}", char, line, column)
        }
        UnknownKeywordOrIdentifierError(val: String, line: usize, column: usize) {
            display("Unknown Keyword or Identifier: {}\nLine: {}, Column: {}", val, line, column)
        }
    }
}

pub trait Tokenize: Read + Seek {}

impl<T> Tokenize for T where T: Read + Seek {}

pub struct Tokenizer {
    reader: BufReader<Box<dyn Tokenize>>,
    char_buffer: [u8; 1],
    line: usize,
    column: usize,
    returned_eof: bool,
}

impl Tokenizer {
    pub fn from_path(input_file: impl Into<PathBuf>) -> Result<Self, Error> {
        let file = std::fs::File::open(input_file.into())?;
        let reader = BufReader::new(Box::new(file) as Box<dyn Tokenize>);

        Ok(Self {
            reader,
            line: 1,
            column: 1,
            char_buffer: [0],
            returned_eof: false,
        })
    }
}

impl From<String> for Tokenizer {
    fn from(input: String) -> Self {
        let reader = BufReader::new(Box::new(Cursor::new(input)) as Box<dyn Tokenize>);

        Self {
            reader,
            line: 1,
            column: 1,
            char_buffer: [0],
            returned_eof: false,
        }
    }
}

impl Tokenizer {
    /// Reads the next character in the stream, or None at end of input.
    ///
    /// # Important
    /// This function will increment the line and column counters
    fn next_char(&mut self) -> Result<Option<char>, Error> {
        let bytes_read = self.reader.read(&mut self.char_buffer)?;

        if bytes_read == 0 {
            return Ok(None);
        }

        let c = self.char_buffer[0] as char;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Ok(Some(c))
    }

    /// Peeks the next character in the stream without consuming it
    ///
    /// # Important
    /// This does not increment the line or column counters
    fn peek_next_char(&mut self) -> Result<Option<char>, Error> {
        let current_pos = self.reader.stream_position()?;

        let to_return = if self.reader.read(&mut self.char_buffer)? == 0 {
            None
        } else {
            self.reader.seek(SeekFrom::Start(current_pos))?;

            Some(self.char_buffer[0] as char)
        };

        Ok(to_return)
    }

    /// Skips the current line in the stream.
    /// Useful for skipping comments
    ///
    /// # Important
    /// This function will increment the line and column counters
    fn skip_line(&mut self) -> Result<(), Error> {
        while let Some(next_char) = self.next_char()? {
            if next_char == '\n' {
                break;
            }
        }
        Ok(())
    }

    /// Returns the next token in the stream, or None once the stream and the
    /// trailing EOF token have both been consumed
    pub fn next_token(&mut self) -> Result<Option<Token>, Error> {
        while let Some(next_char) = self.next_char()? {
            // skip whitespace
            if next_char.is_whitespace() {
                continue;
            }
            // skip comments
            if next_char == '/' && self.peek_next_char()? == Some('/') {
                self.skip_line()?;
                continue;
            }

            match next_char {
                // numbers
                '0'..='9' => {
                    return self.tokenize_number(next_char).map(Some);
                }
                // symbols
                char if !char.is_alphanumeric() => {
                    return self.tokenize_symbol(next_char).map(Some);
                }
                // keywords and identifiers
                char if char.is_alphabetic() => {
                    return self.tokenize_keyword_or_identifier(next_char).map(Some);
                }
                _ => {
                    return Err(Error::UnknownSymbolError(next_char, self.line, self.column));
                }
            }
        }
        if self.returned_eof {
            Ok(None)
        } else {
            self.returned_eof = true;
            Ok(Some(Token::new(TokenType::EOF, self.line, self.column)))
        }
    }

    /// Peeks the next token in the stream without consuming it
    pub fn peek_next(&mut self) -> Result<Option<Token>, Error> {
        let current_pos = self.reader.stream_position()?;
        let column = self.column;
        let line = self.line;
        let returned_eof = self.returned_eof;

        let token = self.next_token()?;
        self.reader.seek(SeekFrom::Start(current_pos))?;
        self.column = column;
        self.line = line;
        self.returned_eof = returned_eof;
        Ok(token)
    }

    /// Tokenizes a symbol
    fn tokenize_symbol(&mut self, first_symbol: char) -> Result<Token, Error> {
        /// Helper macro to create a symbol token
        macro_rules! symbol {
            ($symbol:ident) => {
                Ok(Token::new(
                    TokenType::Symbol(Symbol::$symbol),
                    self.line,
                    self.column,
                ))
            };
        }

        match first_symbol {
            '(' => symbol!(LParen),
            ')' => symbol!(RParen),
            '{' => symbol!(LBrace),
            '}' => symbol!(RBrace),
            ';' => symbol!(Semicolon),
            '+' => symbol!(Plus),
            '-' => symbol!(Minus),
            '*' => symbol!(Asterisk),
            '/' => symbol!(Slash),
            '=' => symbol!(Assign),

            _ => Err(Error::UnknownSymbolError(
                first_symbol,
                self.line,
                self.column,
            )),
        }
    }

    /// Tokenizes an integer literal
    fn tokenize_number(&mut self, first_char: char) -> Result<Token, Error> {
        let mut buffer = String::with_capacity(16);

        let column = self.column;
        let line = self.line;

        buffer.push(first_char);

        while let Some(next_char) = self.peek_next_char()? {
            // support underscores in numbers for readability
            if next_char == '_' {
                self.next_char()?;
                continue;
            }

            // stop when a number is followed by a symbol (like a semicolon or =)
            if !next_char.is_numeric() {
                break;
            }

            buffer.push(next_char);
            self.next_char()?;
        }

        let number = buffer
            .parse()
            .map_err(|e| Error::NumberParseError(e, line, column))?;

        Ok(Token::new(TokenType::Number(number), line, column))
    }

    /// Tokenizes a keyword or an identifier
    fn tokenize_keyword_or_identifier(&mut self, first_char: char) -> Result<Token, Error> {
        macro_rules! keyword {
            ($keyword:ident) => {{
                return Ok(Token::new(
                    TokenType::Keyword(Keyword::$keyword),
                    self.line,
                    self.column,
                ));
            }};
        }

        /// Helper macro to check if the next character is whitespace or not alphanumeric
        macro_rules! next_ws {
            () => {
                matches!(self.peek_next_char()?, Some(x) if x.is_whitespace() || !x.is_alphanumeric()) || self.peek_next_char()?.is_none()
            };
        }

        let mut buffer = String::with_capacity(16);
        let line = self.line;
        let column = self.column;

        let mut looped_char = Some(first_char);

        while let Some(next_char) = looped_char {
            if next_char.is_whitespace() {
                break;
            }

            if !next_char.is_alphanumeric() {
                break;
            }
            buffer.push(next_char);

            match buffer.as_str() {
                "var" if next_ws!() => keyword!(Var),
                "return" if next_ws!() => keyword!(Return),
                "if" if next_ws!() => keyword!(If),
                "else" if next_ws!() => keyword!(Else),

                // keywords are checked first, so anything else followed by
                // whitespace or a symbol is an identifier
                val if next_ws!() => {
                    return Ok(Token::new(
                        TokenType::Identifier(val.to_string()),
                        line,
                        column,
                    ));
                }
                _ => {}
            }

            looped_char = self.next_char()?;
        }
        Err(Error::UnknownKeywordOrIdentifierError(buffer, line, column))
    }
}
