use std::fmt::{self, Write};

use super::Perm;

impl fmt::Display for Perm {
    /// Formats the permutation in one-based one-line notation, e.g. `3 5 1 2 4`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, &value) in self.entries().iter().enumerate() {
            if idx > 0 {
                f.write_char(' ')?;
            }
            write!(f, "{}", value + 1)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Perm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries().iter()).finish()
    }
}

impl Perm {
    /// Renders the permutation as an ASCII grid, one row per value from the
    /// largest down, with each one-based value printed in its own column.
    pub fn grid_string(&self) -> String {
        let n = self.len();
        let width = 2.max(n.to_string().len());
        let blank = " ".repeat(width);

        let mut lines = Vec::with_capacity(n);
        for value in (0..n as u16).rev() {
            let mut line = String::with_capacity(n * width);
            for &entry in self.entries() {
                if entry == value {
                    line.push_str(&format!("{:>width$}", value + 1));
                } else {
                    line.push_str(&blank);
                }
            }
            lines.push(line);
        }
        lines.join("\n")
    }
}
