//! Form validation errors.

use std::fmt;

use thiserror::Error;

/// A step of the signup flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    BasicInfo,
    Work,
    Education,
    Citizenship,
    Additional,
}

impl Step {
    /// All steps in the order the flow visits them.
    pub const ALL: [Self; 5] = [
        Self::BasicInfo,
        Self::Work,
        Self::Education,
        Self::Citizenship,
        Self::Additional,
    ];

    /// 1-based position in the flow.
    pub const fn number(self) -> u8 {
        match self {
            Self::BasicInfo => 1,
            Self::Work => 2,
            Self::Education => 3,
            Self::Citizenship => 4,
            Self::Additional => 5,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::BasicInfo => "Basic Info",
            Self::Work => "Work Experience",
            Self::Education => "Education",
            Self::Citizenship => "Citizenship Status",
            Self::Additional => "Additional Info",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {} ({})", self.number(), self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{step}: `{field}` {message}")]
    Step {
        step: Step,
        field: &'static str,
        message: String,
    },
}

impl FormError {
    pub fn new(step: Step, field: &'static str, message: impl Into<String>) -> Self {
        Self::Step {
            step,
            field,
            message: message.into(),
        }
    }

    pub(super) fn required(step: Step, field: &'static str) -> Self {
        Self::new(step, field, "is required")
    }

    pub const fn step(&self) -> Step {
        match self {
            Self::Step { step, .. } => *step,
        }
    }

    pub const fn field(&self) -> &'static str {
        match self {
            Self::Step { field, .. } => field,
        }
    }
}
