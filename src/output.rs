use std::io::{self, Write};

pub fn println(message: &str, writer: &mut Option<&mut dyn Write>) -> io::Result<()> {
    if let Err(e) = writeln!(io::stdout(), "{message}") {
        eprintln!("Failed to write to stdout: {e}");
    }

    if let Some(w) = writer {
        writeln!(w, "{message}")?;
    }

    Ok(())
}

pub fn eprintln(message: &str, writer: &mut Option<&mut dyn Write>) -> io::Result<()> {
    // Nowhere left to report a failing stderr.
    let _ = writeln!(io::stderr(), "{message}");

    if let Some(w) = writer {
        writeln!(w, "{message}")?;
    }

    Ok(())
}
