mod lexer;

pub use lexer::buffer::{SourceBuffer, DEFAULT_READ_CHUNK_SIZE, MAX_TOKEN_SIZE};
pub use lexer::error;
pub use lexer::print;
pub use lexer::text::{ByteOffset, Position};
pub use lexer::token_type::{Lexeme, Paren, Token, TokenKind};
pub use lexer::{lex_program, lex_program_deferred};
