/// High‑level semantic role of a stepper part, similar to ARIA roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// The whole control (a spin button).
    Stepper,
    Button,
    TextField,
}

/// What an accessibility layer may read from a stepper. It never writes.
#[derive(Clone, Debug, PartialEq)]
pub struct Semantics {
    pub role: Role,
    /// Human‑readable name announced by screen readers.
    pub label: Option<String>,
    /// The value as text, or the placeholder while empty.
    pub value: Option<String>,
    pub focused: bool,
    /// Disabled nodes remain in the tree but are marked not enabled.
    pub enabled: bool,
}

impl Semantics {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            label: None,
            value: None,
            focused: false,
            enabled: true,
        }
    }
}
