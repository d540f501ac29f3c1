/// How a field's text input is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Non-negative whole number, capped by [`FieldSpec::max`].
    Integer,
    Decimal,
    /// `true`/`false`; empty means `false`.
    Flag,
    /// `YYYY-MM-DD`.
    Date,
    /// One of a fixed set of labels.
    Choice(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Empty input is left out of the payload.
    Optional,
    Required,
    /// Required, and numeric values must be strictly greater than zero.
    Positive,
}

/// One form field: its local key, API name, input kind and validation rule.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: &'static str,
    pub api_field: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub rule: Rule,
    pub required_message: &'static str,
    pub invalid_message: &'static str,
    /// Largest accepted integer.
    pub max: u64,
    pub default: Option<fn() -> String>,
}

impl FieldSpec {
    pub const fn new(
        key: &'static str,
        api_field: &'static str,
        label: &'static str,
        kind: FieldKind,
    ) -> Self {
        Self {
            key,
            api_field,
            label,
            kind,
            rule: Rule::Optional,
            required_message: "",
            invalid_message: "Valor no válido",
            max: u64::MAX,
            default: None,
        }
    }

    pub const fn required(self, message: &'static str) -> Self {
        Self {
            rule: Rule::Required,
            required_message: message,
            ..self
        }
    }

    pub const fn positive(self, message: &'static str) -> Self {
        Self {
            rule: Rule::Positive,
            required_message: message,
            ..self
        }
    }

    pub const fn invalid(self, message: &'static str) -> Self {
        Self {
            invalid_message: message,
            ..self
        }
    }

    pub const fn at_most(self, max: u64) -> Self {
        Self { max, ..self }
    }

    pub const fn with_default(self, default: fn() -> String) -> Self {
        Self {
            default: Some(default),
            ..self
        }
    }

    pub fn default_value(&self) -> String {
        self.default.map(|generate| generate()).unwrap_or_default()
    }
}
