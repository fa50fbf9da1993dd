/// Abstraction over user-facing output.
///
/// Command modules use this trait instead of `println!`/`eprintln!` so that
/// output can be captured in tests or suppressed when only JSON is wanted.
pub trait UserOutput {
    /// Informational status message (e.g., "Registered services:")
    fn status(&self, message: &str);

    /// Success message (e.g., "Start requested for web@app1")
    fn success(&self, message: &str);

    /// Warning message (e.g., "web@app1 is not stopped; nothing sent")
    fn warning(&self, message: &str);

    /// Error message
    fn error(&self, message: &str);
}

/// Standard CLI output: stdout/stderr with ANSI colors.
pub struct CliOutput;

impl UserOutput for CliOutput {
    fn status(&self, message: &str) {
        println!("{}", message);
    }

    fn success(&self, message: &str) {
        println!("\x1b[32m{}\x1b[0m", message);
    }

    fn warning(&self, message: &str) {
        eprintln!("\x1b[33m{}\x1b[0m", message);
    }

    fn error(&self, message: &str) {
        eprintln!("\x1b[31m{}\x1b[0m", message);
    }
}
