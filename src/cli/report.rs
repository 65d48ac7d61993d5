use base437::CodePoint;
use std::fmt;

/// Characters of context shown on each side of an invalid character.
const CONTEXT: usize = 24;

/// Check if colored output should be used
pub fn should_use_color() -> bool {
    // Respect NO_COLOR environment variable
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    use std::io::IsTerminal;
    std::io::stderr().is_terminal()
}

/// Prints an error to stderr with an `error:` header.
pub fn print_error(err: &dyn std::error::Error) {
    if should_use_color() {
        eprintln!("\x1b[1;31merror:\x1b[0m {}", err);
    } else {
        eprintln!("error: {}", err);
    }
}

/// A decode failure rendered with the surrounding input and a caret.
#[derive(Debug)]
pub struct InvalidInputReport {
    position: usize,
    character: char,
    excerpt: String,
    caret: usize,
}

impl InvalidInputReport {
    pub fn new(input: &str, position: usize, character: char) -> Self {
        let start = position.saturating_sub(CONTEXT);
        let excerpt: String = input
            .chars()
            .skip(start)
            .take(position - start + CONTEXT + 1)
            .map(visible)
            .collect();

        InvalidInputReport {
            position,
            character,
            excerpt,
            caret: position - start,
        }
    }
}

/// Replaces characters that would break the excerpt layout.
fn visible(c: char) -> char {
    match c {
        '\n' | '\r' | '\t' => ' ',
        c if c.is_control() => '\u{FFFD}',
        c => c,
    }
}

impl fmt::Display for InvalidInputReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let use_color = should_use_color();
        let point = CodePoint::from(self.character);

        writeln!(
            f,
            "invalid character {:?} ({}) at position {}",
            self.character, point, self.position
        )?;
        writeln!(f)?;
        writeln!(f, "  {}", self.excerpt)?;
        write!(f, "  {}", " ".repeat(self.caret))?;
        if use_color {
            writeln!(f, "\x1b[1;31m^\x1b[0m")?;
        } else {
            writeln!(f, "^")?;
        }
        writeln!(f)?;

        let hint = format!(
            "{} has no byte in the active mapping; decode with the mapping used to encode (--mapping, --map)",
            point
        );
        if use_color {
            write!(f, "\x1b[1;36mhint:\x1b[0m {}", hint)
        } else {
            write!(f, "hint: {}", hint)
        }
    }
}

impl std::error::Error for InvalidInputReport {}
