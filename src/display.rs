use std::fmt::{Display, Formatter};

/// Renders a slice of numbers joined by a fixed separator, without surrounding brackets.
pub struct DisplayNumbers<'a> {
    numbers: &'a [u64],
    separator: &'a str,
}
impl<'a> DisplayNumbers<'a> {
    pub fn comma_separated(numbers: &'a [u64]) -> Self {
        Self {
            numbers,
            separator: ",",
        }
    }

    pub fn space_separated(numbers: &'a [u64]) -> Self {
        Self {
            numbers,
            separator: " ",
        }
    }
}

impl<'a> Display for DisplayNumbers<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let len = self.numbers.len();
        for (index, number) in self.numbers.iter().enumerate() {
            write!(f, "{number}")?;
            if index != len - 1 {
                write!(f, "{}", self.separator)?;
            }
        }
        Ok(())
    }
}
