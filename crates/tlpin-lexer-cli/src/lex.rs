use std::io::{self, Write};
use std::ops::AddAssign;
use std::time::Instant;

use tlpin_lexer::{lex_program, lex_program_deferred, print::write_lexemes};

pub(crate) struct LexPrintConfig {
    pub(crate) deferred: bool,
    pub(crate) print_tokens: bool,
}

/// Counters accumulated over all lexed sources
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub(crate) struct LexTotals {
    pub(crate) files: usize,
    pub(crate) lexemes: usize,
    pub(crate) errors: usize,
    pub(crate) failed_files: usize,
}

impl AddAssign for LexTotals {
    fn add_assign(&mut self, rhs: Self) {
        self.files += rhs.files;
        self.lexemes += rhs.lexemes;
        self.errors += rhs.errors;
        self.failed_files += rhs.failed_files;
    }
}

/// Lexes one source, dumping lexemes to `out` and diagnostics to `err`.
///
/// Lexing errors are not I/O errors: they are printed and counted.
pub(crate) fn lex_and_print(
    source: &[u8],
    source_name: &str,
    config: &LexPrintConfig,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<LexTotals> {
    let start = Instant::now();

    let result = if config.deferred {
        lex_program_deferred(source, source_name)
    } else {
        lex_program(source, source_name).map_err(|error| vec![error].into_boxed_slice())
    };

    tracing::info!(source_name, elapsed = ?start.elapsed(), ok = result.is_ok(), "lexed");

    match result {
        Ok(lexemes) => {
            if config.print_tokens {
                write_lexemes(out, &lexemes, source_name)?;
            }

            Ok(LexTotals {
                files: 1,
                lexemes: lexemes.len(),
                ..LexTotals::default()
            })
        }
        Err(errors) => {
            for error in &*errors {
                writeln!(err, "{error}")?;
            }

            Ok(LexTotals {
                files: 1,
                errors: errors.len(),
                failed_files: 1,
                ..LexTotals::default()
            })
        }
    }
}
