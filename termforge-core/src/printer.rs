/// Console progress reporting for the setup flows.
///
/// Plain stdout lines with a timestamp and step counter; log-file
/// output is left to the `log` facade so `RUST_LOG` controls it
/// independently of what the user sees.
pub struct StepPrinter {
    total: usize,
    current: usize,
}

impl StepPrinter {
    pub fn new(total: usize) -> Self {
        Self { total, current: 0 }
    }

    fn timestamp() -> String {
        chrono::Local::now().format("%H:%M:%S").to_string()
    }

    /// Prints a section banner
    pub fn section(&self, title: &str) {
        println!("\n==================================================");
        println!("  {}", title);
        println!("==================================================\n");
    }

    /// Prints the next numbered step
    pub fn step(&mut self, message: &str) {
        self.current += 1;
        println!(
            "[{}] [{:>2}/{}] {}",
            Self::timestamp(),
            self.current,
            self.total,
            message
        );
    }

    /// Marks the current step as completed
    pub fn ok(&self, message: &str) {
        println!("[{}]        ✓ {}", Self::timestamp(), message);
    }

    /// Marks the current step as failed but non-fatal
    pub fn warn(&self, message: &str) {
        println!("[{}]        ✗ {}", Self::timestamp(), message);
    }

    /// Prints an unnumbered informational line
    pub fn note(&self, message: &str) {
        println!("[{}]          {}", Self::timestamp(), message);
    }
}
