use crate::features::forms::FieldErrors;
use serde::Serialize;

/// A `<form>` as rendered by `form.html`: labelled fields, each carrying its
/// own error message, and a submit button that disables itself on submit.
#[derive(Debug, Serialize)]
pub struct FormView<'a> {
    action: String,
    multipart: bool,
    submit: &'static str,
    fields: Vec<Field>,
    #[serde(skip)]
    errors: Option<&'a FieldErrors>,
}

#[derive(Debug, Serialize)]
struct Field {
    name: &'static str,
    label: &'static str,
    kind: &'static str,
    value: String,
    accept: Option<&'static str>,
    options: Vec<Choice>,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct Choice {
    value: &'static str,
    label: &'static str,
    selected: bool,
}

impl<'a> FormView<'a> {
    /// `action` must already be a percent-encoded path.
    #[must_use]
    pub fn new(action: impl Into<String>, errors: Option<&'a FieldErrors>, submit: &'static str) -> Self {
        Self {
            action: action.into(),
            multipart: false,
            submit,
            fields: Vec::new(),
            errors,
        }
    }

    #[must_use]
    pub fn multipart(mut self) -> Self {
        self.multipart = true;
        self
    }

    /// Text-like input. Pass an empty `value` for password inputs so a
    /// submitted password is never echoed back.
    #[must_use]
    pub fn input(self, name: &'static str, label: &'static str, kind: &'static str, value: &str) -> Self {
        self.push(name, label, kind, value, None, Vec::new())
    }

    /// `<select>` with `options` as `(value, label)` pairs.
    #[must_use]
    pub fn select(
        self,
        name: &'static str,
        label: &'static str,
        options: &[(&'static str, &'static str)],
        selected: &str,
    ) -> Self {
        let options = options
            .iter()
            .map(|&(value, label)| Choice {
                value,
                label,
                selected: value == selected,
            })
            .collect();
        self.push(name, label, "select", "", None, options)
    }

    #[must_use]
    pub fn file(self, name: &'static str, label: &'static str, accept: &'static str) -> Self {
        self.push(name, label, "file", "", Some(accept), Vec::new())
    }

    fn push(
        mut self,
        name: &'static str,
        label: &'static str,
        kind: &'static str,
        value: &str,
        accept: Option<&'static str>,
        options: Vec<Choice>,
    ) -> Self {
        let error = self
            .errors
            .and_then(|errors| errors.get(name))
            .map(str::to_string);
        self.fields.push(Field {
            name,
            label,
            kind,
            value: value.to_string(),
            accept,
            options,
            error,
        });
        self
    }
}
