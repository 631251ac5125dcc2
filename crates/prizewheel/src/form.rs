use serde::{Deserialize, Serialize};
use strum::{Display as StrumDisplay, EnumIter, IntoEnumIterator};
use thiserror::Error;
use wheel::Label;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, StrumDisplay)]
pub enum Step {
    #[strum(serialize = "Your details")]
    Details,
    #[strum(serialize = "Prizes")]
    Words,
    #[strum(serialize = "Spin the wheel")]
    Spin,
}

impl Step {
    pub fn as_index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::iter().nth(idx)
    }

    pub fn count() -> usize {
        Self::iter().count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Next,
    Previous,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Please enter your name")]
    BlankName,
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("'{0}' is not a valid phone number")]
    InvalidPhone(String),
    #[error("Add at least one prize to the wheel")]
    NoWords,
}

/// Raw text of every input on the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub words: String,
}

impl FormFields {
    pub fn validate(&self, step: Step) -> Result<(), FieldError> {
        match step {
            Step::Details => {
                if self.name.trim().is_empty() {
                    return Err(FieldError::BlankName);
                }
                if !is_valid_email(self.email.trim()) {
                    return Err(FieldError::InvalidEmail(self.email.clone()));
                }
                if !is_valid_phone(self.phone.trim()) {
                    return Err(FieldError::InvalidPhone(self.phone.clone()));
                }
                Ok(())
            }
            Step::Words => {
                if self.labels().is_empty() {
                    return Err(FieldError::NoWords);
                }
                Ok(())
            }
            Step::Spin => Ok(()),
        }
    }

    pub fn validate_all(&self) -> Result<(), FieldError> {
        Step::iter().try_for_each(|step| self.validate(step))
    }

    pub fn labels(&self) -> Vec<Label> {
        Label::parse_list(&self.words)
    }
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let domain_ok = domain
        .split_once('.')
        .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        && !domain.ends_with('.')
        && !domain.contains('@');

    !local.is_empty() && domain_ok && !email.chars().any(char::is_whitespace)
}

fn is_valid_phone(phone: &str) -> bool {
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | ' '));
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    allowed && (6..=15).contains(&digits)
}

/// Tracks which step of the form is showing. Moving requires the current step to validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stepper {
    current: Step,
}

impl Default for Stepper {
    fn default() -> Self {
        Self {
            current: Step::Details,
        }
    }
}

impl Stepper {
    pub fn current(&self) -> Step {
        self.current
    }

    pub fn navigate(&mut self, nav: Nav, fields: &FormFields) -> Result<Step, FieldError> {
        fields.validate(self.current)?;

        let idx = self.current.as_index();
        let target = match nav {
            Nav::Next => (idx + 1).min(Step::count() - 1),
            Nav::Previous => idx.saturating_sub(1),
        };
        if let Some(step) = Step::from_index(target) {
            self.current = step;
        }
        Ok(self.current)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Editing,
    Spinning,
    Done,
}

/// One-shot gate between Submit and the upload: only the first settle after a valid submit
/// produces a [`Submission`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubmitFlow {
    state: SubmitState,
}

impl SubmitFlow {
    pub fn state(&self) -> SubmitState {
        self.state
    }

    pub fn is_submitted(&self) -> bool {
        self.state != SubmitState::Editing
    }

    /// Checks every step and arms the flow. `Ok(false)` means it was already submitted.
    pub fn submit(&mut self, fields: &FormFields) -> Result<bool, FieldError> {
        if self.is_submitted() {
            return Ok(false);
        }
        fields.validate_all()?;
        self.state = SubmitState::Spinning;
        Ok(true)
    }

    /// The spin could not start; the form is editable again.
    pub fn abort(&mut self) {
        if self.state == SubmitState::Spinning {
            self.state = SubmitState::Editing;
        }
    }

    pub fn settle(&mut self, fields: &FormFields, discount: Label) -> Option<Submission> {
        if self.state != SubmitState::Spinning {
            return None;
        }
        self.state = SubmitState::Done;
        Some(Submission::new(fields, discount))
    }
}

/// What gets posted once the wheel has picked a prize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub discount: Label,
}

impl Submission {
    pub fn new(fields: &FormFields, discount: Label) -> Self {
        Self {
            name: fields.name.trim().to_string(),
            email: fields.email.trim().to_string(),
            phone: fields.phone.trim().to_string(),
            discount,
        }
    }

    pub fn form_fields(&self) -> [(&str, &str); 4] {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("discount", &self.discount),
        ]
    }

    pub fn confirmation(&self) -> String {
        format!(
            "Well done {}! We'll send a discount coupon of {} to {}. Bye!",
            self.name, self.discount, self.email
        )
    }
}
