use std::fmt::{Display, Formatter};

/// Renders lottery numbers as zero-padded, space-separated pairs of digits, e.g. `01 07 25`.
pub struct DisplayNumbers<'a> {
    numbers: &'a [u8],
}
impl Display for DisplayNumbers<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write_joined(f, self.numbers, " ")
    }
}

impl<'a> From<&'a [u8]> for DisplayNumbers<'a> {
    fn from(numbers: &'a [u8]) -> Self {
        DisplayNumbers { numbers }
    }
}

/// Renders a co-drawn combination with dashes, e.g. `03-11-20`.
pub struct DisplayCombination<'a> {
    members: &'a [u8],
}
impl Display for DisplayCombination<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write_joined(f, self.members, "-")
    }
}

impl<'a> From<&'a [u8]> for DisplayCombination<'a> {
    fn from(members: &'a [u8]) -> Self {
        DisplayCombination { members }
    }
}

fn write_joined(f: &mut Formatter<'_>, numbers: &[u8], separator: &str) -> std::fmt::Result {
    for (index, number) in numbers.iter().enumerate() {
        if index != 0 {
            write!(f, "{separator}")?;
        }
        write!(f, "{number:02}")?;
    }
    Ok(())
}
