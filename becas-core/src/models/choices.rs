use crate::models::{CapSelection, TabuladorId};

/// One option of a form select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormChoice {
    pub value: String,
    pub label: String,
    /// Rendering hint only; a disabled choice is still valid submission data.
    pub disabled: bool,
}

impl From<CapSelection> for FormChoice {
    fn from(selection: CapSelection) -> Self {
        Self {
            value: selection.form_value(),
            label: selection.label(),
            disabled: selection.is_out_of_range(),
        }
    }
}

/// Tabulador options for caps `min_cap..=max_cap`, followed by the
/// out-of-range option.
pub fn tabulador_choices(
    min_cap: u8,
    max_cap: u8,
) -> Vec<FormChoice> {
    (min_cap..=max_cap)
        .filter_map(|cap| TabuladorId::new(cap).ok())
        .map(CapSelection::Cap)
        .chain(std::iter::once(CapSelection::OutOfRange))
        .map(FormChoice::from)
        .collect()
}

/// Scholarship percentage options, `1%` through `100%`.
pub fn percent_choices() -> Vec<FormChoice> {
    (1..=100u8)
        .map(|percent| FormChoice {
            value: percent.to_string(),
            label: format!("{percent}%"),
            disabled: false,
        })
        .collect()
}
