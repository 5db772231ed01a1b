//! Check results and the rendered preflight report.

use crate::style::Style;

/// One line of the preflight report.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    /// A scan will not work until this is fixed.
    Fail,
    /// Usable, but worth a look.
    Warn,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, details: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            status,
            details: details.map(str::to_string),
        }
    }

    pub fn pass(name: &str) -> Self {
        Self::new(name, CheckStatus::Pass, None)
    }

    pub fn pass_with(name: &str, details: &str) -> Self {
        Self::new(name, CheckStatus::Pass, Some(details))
    }

    pub fn fail(name: &str, details: &str) -> Self {
        Self::new(name, CheckStatus::Fail, Some(details))
    }

    pub fn warn(name: &str, details: &str) -> Self {
        Self::new(name, CheckStatus::Warn, Some(details))
    }
}

/// Results of all preflight checks.
pub struct PreflightReport {
    pub checks: Vec<CheckResult>,
}

impl PreflightReport {
    /// Returns true if no check failed.
    pub fn all_passed(&self) -> bool {
        !self.checks.iter().any(|c| c.status == CheckStatus::Fail)
    }

    pub fn fail_count(&self) -> usize {
        self.count(CheckStatus::Fail)
    }

    pub fn warn_count(&self) -> usize {
        self.count(CheckStatus::Warn)
    }

    fn count(&self, status: CheckStatus) -> usize {
        self.checks.iter().filter(|c| c.status == status).count()
    }

    /// Render the report as console text.
    pub fn render(&self, style: &Style) -> String {
        let mut out = String::from("=== Preflight Check Results ===\n\n");

        for check in &self.checks {
            let tag = match check.status {
                CheckStatus::Pass => style.success("[PASS]"),
                CheckStatus::Fail => style.error("[FAIL]"),
                CheckStatus::Warn => style.warning("[WARN]"),
            };

            out.push_str(&format!("  {} {}", tag, check.name));
            if let Some(details) = &check.details {
                out.push_str(&format!(": {}", details));
            }
            out.push('\n');
        }

        let passed = self.count(CheckStatus::Pass);
        out.push_str(&format!(
            "\nSummary: {}/{} passed\n",
            passed,
            self.checks.len()
        ));
        if self.fail_count() > 0 {
            out.push_str(&format!(
                "         {} FAILED - scanning will not work\n",
                self.fail_count()
            ));
        }
        if self.warn_count() > 0 {
            out.push_str(&format!("         {} warnings\n", self.warn_count()));
        }
        out
    }
}
