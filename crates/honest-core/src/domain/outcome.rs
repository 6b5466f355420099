//! Non-fatal problems carried alongside a result.

use std::fmt;

/// Where a warning was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningStage {
    Prompts,
    Variables,
    Transforms,
    SharedConfigs,
    Git,
    Install,
}

impl WarningStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Prompts => "prompts",
            Self::Variables => "variables",
            Self::Transforms => "transforms",
            Self::SharedConfigs => "shared-configs",
            Self::Git => "git",
            Self::Install => "install",
        }
    }
}

impl fmt::Display for WarningStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub stage: WarningStage,
    pub message: String,
}

impl Warning {
    pub fn new(stage: WarningStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.stage, self.message)
    }
}

/// A value plus every warning collected while producing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub value: T,
    pub warnings: Vec<Warning>,
}

impl<T> Outcome<T> {
    pub fn ok(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    pub fn with_warning(value: T, warning: Warning) -> Self {
        Self {
            value,
            warnings: vec![warning],
        }
    }

    /// Move the warnings into `sink`, returning the value.
    pub fn drain_into(self, sink: &mut Vec<Warning>) -> T {
        sink.extend(self.warnings);
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_follow_the_value() {
        let outcome = Outcome::with_warning(2, Warning::new(WarningStage::Git, "no git"));
        let mut sink = Vec::new();
        let value = outcome.drain_into(&mut sink);
        assert_eq!(value, 2);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].to_string(), "[git] no git");
    }
}
