use std::{
    env,
    fs::{self, File},
    io::{self, Read, Write},
    process,
};

use kbd::{
    errors::errors::{Error, ErrorTip},
    get_line_at_position,
    lexer::lexer::Lexer,
};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    let (input, file_name): (Box<dyn Read>, Option<String>) = match args.len() {
        1 => (Box::new(io::stdin().lock()), None),
        2 => match File::open(&args[1]) {
            Ok(file) => (Box::new(file), Some(args[1].clone())),
            Err(e) => {
                eprintln!("Error: cannot open {}: {}", args[1], e);
                process::exit(1);
            }
        },
        _ => {
            eprintln!("Usage: {} [<filename>]", program_name(&args));
            process::exit(2);
        }
    };

    let mut lexer = Lexer::new(input, file_name.clone());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    loop {
        let token = match lexer.get() {
            Ok(Some(token)) => token,
            Ok(None) => break,
            Err(error) => {
                flush_records(&mut out);
                display_error(&error, file_name.as_deref());
                process::exit(1);
            }
        };

        if let Err(e) = print_record(&mut out, &token) {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Name for the usage line; argv may be empty.
fn program_name(args: &[String]) -> &str {
    args.first().map(String::as_str).unwrap_or("kbd")
}

/// Flushes records printed so far, reporting a write failure on stderr.
fn flush_records(out: &mut impl Write) -> bool {
    match out.flush() {
        Ok(()) => true,
        Err(e) => {
            eprintln!("Error: cannot write tokens: {}", e);
            false
        }
    }
}

/// Writes one debug record, tab-indented, followed by a newline.
fn print_record(out: &mut impl Write, token: &impl Serialize) -> io::Result<()> {
    let mut serializer = Serializer::with_formatter(&mut *out, PrettyFormatter::with_indent(b"\t"));
    token.serialize(&mut serializer)?;
    writeln!(out)
}

fn display_error(error: &Error, file: Option<&str>) {
    /*
        Error: UnexpectedSpacing: state=Value: unexpected spacing: <_x> (...)
        -> us.map:2:14
           |
         2 | keycode 2 = _x
           | -------------^
    */

    if let ErrorTip::None = error.get_tip() {
        eprintln!("Error: {}: {}", error.get_error_name(), error);
    } else {
        eprintln!("Error: {}: {} ({})", error.get_error_name(), error, error.get_tip());
    }

    let position = error.get_position();
    let content = file.and_then(|path| fs::read(path).ok());
    let located = content
        .as_deref()
        .map(String::from_utf8_lossy)
        .and_then(|content| get_line_at_position(&content, position.0.saturating_sub(1)));

    let Some((line, line_text, line_pos)) = located else {
        eprintln!("-> {} @ byte {}", position.1, position.0);
        return;
    };

    let line_str = line.to_string();
    let padding = line_str.len() + 2;

    eprintln!("-> {}:{}:{}", position.1, line, line_pos + 1);
    eprintln!("{:>padding$}", "|");
    eprintln!("{} | {}", line_str, line_text.trim_end());

    let arrows = line_pos + 1;
    eprintln!("{:>padding$} {:->arrows$}", "|", "^");
}

#[cfg(test)]
mod tests {
    use std::io::{self, ErrorKind, Write};

    use kbd::lexer::lexer::tokenize;

    use super::{flush_records, print_record, program_name};

    #[test]
    fn test_program_name() {
        assert_eq!(program_name(&[]), "kbd");
        assert_eq!(program_name(&["/usr/bin/kbd".to_string()]), "/usr/bin/kbd");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_flush_records() {
        assert!(flush_records(&mut Vec::new()));
        assert!(!flush_records(&mut BrokenPipe));
    }

    #[test]
    fn test_print_record() {
        let tokens = tokenize("plain\n".as_bytes(), None).unwrap();
        let mut out = Vec::new();
        print_record(&mut out, &tokens[0]).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\n\t\"Type\": \"Leaf\",\n\t\"Kind\": \"Plain\",\n\t\"Data\": \"plain\"\n}\n"
        );
    }
}
