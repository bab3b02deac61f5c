//! Pass/fail accounting for scenario checks

use std::process::ExitCode;

use colored::Colorize;

/// Running pass/fail counters for a scenario run
///
/// Checks are independent and non-fatal: a failed check is recorded and the
/// scenario keeps going; the counters only fold into an exit status at the
/// very end.
#[derive(Debug, Default)]
pub struct TestOutcome {
    passed: usize,
    failed: usize,
}

impl TestOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one named check; returns the condition for convenience.
    pub fn check(&mut self, name: &str, condition: bool, detail: &str) -> bool {
        if condition {
            println!("  {} {}", "PASS:".green(), name);
            self.passed += 1;
        } else {
            if detail.is_empty() {
                println!("  {} {}", "FAIL:".red(), name);
            } else {
                println!("  {} {} ({})", "FAIL:".red(), name, detail);
            }
            self.failed += 1;
        }
        condition
    }

    pub fn passed(&self) -> usize {
        self.passed
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Print the summary line and fold the counters into an exit status.
    pub fn summary(&self) -> ExitCode {
        let total = self.passed + self.failed;
        println!(
            "\n=== Results: {}/{} passed, {} failed ===",
            self.passed, total, self.failed
        );
        if self.failed == 0 {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}
