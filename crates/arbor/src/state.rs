use std::fmt;

use convert_case::{Case, Casing};

/// Return true if the character is valid in a node name.
pub fn valid_nodename_char(c: char) -> bool {
    (c.is_ascii_lowercase() || c.is_ascii_digit()) || c == '_'
}

/// A node name, which consists of lowercase ASCII alphanumeric characters, plus
/// underscores. Names appear in tree dumps and trace output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeName {
    /// Stored node name string.
    name: String,
}

impl NodeName {
    /// Takes a string and munges it into a valid node name. It does this by
    /// first converting the string to snake case, then removing all invalid
    /// characters.
    pub fn convert(name: &str) -> Self {
        let raw = name.to_case(Case::Snake);
        let filtered: String = raw.chars().filter(|x| valid_nodename_char(*x)).collect();
        let name = if filtered.is_empty() {
            "node".to_string()
        } else {
            filtered
        };
        Self { name }
    }

    /// Name derived from the last path segment of a type name.
    pub fn of_type(type_name: &str) -> Self {
        let short = type_name.rsplit("::").next().unwrap_or(type_name);
        Self::convert(short)
    }
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl PartialEq<&str> for NodeName {
    fn eq(&self, other: &&str) -> bool {
        self.name == *other
    }
}
