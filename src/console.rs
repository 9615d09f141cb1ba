//! Human-readable progress lines for whoever is watching the setup.

use crate::error::{SetupError, TROUBLESHOOTING};
use std::io::{self, Write};

pub const OK: &str = "✓";
pub const FAIL: &str = "✗";

/// Follow-up work the operator still has to do by hand.
pub const NEXT_STEPS: [&str; 4] = [
    "Update config/database.php with your database credentials",
    "Update email settings in config/database.php",
    "Test the website forms",
    "Set up admin panel for managing submissions",
];

pub struct Console<W: Write> {
    out: W,
}

impl Console<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    // Progress output is best effort; a closed stdout must not abort provisioning.
    pub fn line(&mut self, msg: impl std::fmt::Display) {
        let _ = writeln!(self.out, "{msg}");
    }

    pub fn ok(&mut self, msg: impl std::fmt::Display) {
        self.line(format_args!("{OK} {msg}"));
    }

    pub fn fail(&mut self, msg: impl std::fmt::Display) {
        self.line(format_args!("{FAIL} {msg}"));
    }

    pub fn banner(&mut self, title: &str) {
        self.line(format_args!("=== {title} ==="));
    }

    fn numbered(&mut self, items: &[&str]) {
        for (i, item) in items.iter().enumerate() {
            self.line(format_args!("{}. {item}", i + 1));
        }
    }

    pub fn summary(&mut self, database: &str) {
        self.line("");
        self.banner("Setup Complete");
        self.line(format_args!("Database '{database}' is ready for use!"));
        self.line("\nNext steps:");
        self.numbered(&NEXT_STEPS);
    }

    pub fn failure(&mut self, err: &SetupError) {
        self.fail(format_args!("Setup failed: {err}"));
        self.line("\nPlease check:");
        self.numbered(&TROUBLESHOOTING);
    }
}
