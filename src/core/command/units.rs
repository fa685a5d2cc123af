/// The value part of a prefixed unit: one path or several.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    One(String),
    Many(Vec<String>),
}

/// One element of the working argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgUnit {
    Literal(String),
    Prefixed { prefix: String, value: ArgValue },
}

impl ArgUnit {
    pub fn literal(s: impl Into<String>) -> Self {
        ArgUnit::Literal(s.into())
    }

    pub fn prefixed(prefix: impl Into<String>, value: ArgValue) -> Self {
        ArgUnit::Prefixed {
            prefix: prefix.into(),
            value,
        }
    }
}

/// Flatten units into tokens in order, dropping every empty-string leaf.
pub fn flatten(units: &[ArgUnit]) -> Vec<String> {
    let mut tokens = Vec::with_capacity(units.len() * 2);
    let mut push = |s: &String| {
        if !s.is_empty() {
            tokens.push(s.clone());
        }
    };
    for unit in units {
        match unit {
            ArgUnit::Literal(s) => push(s),
            ArgUnit::Prefixed { prefix, value } => {
                push(prefix);
                match value {
                    ArgValue::One(s) => push(s),
                    ArgValue::Many(values) => values.iter().for_each(&mut push),
                }
            }
        }
    }
    tokens
}
