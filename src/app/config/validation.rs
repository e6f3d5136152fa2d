use super::{ConfigError, LoggerConfig};
use crate::serializer::{Indent, MAX_INDENT};

impl LoggerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Validate indent width
        match &self.indent {
            Some(Indent::Spaces(count)) if *count > MAX_INDENT => {
                return Err(ConfigError::InvalidConfig(format!(
                    "Indent of {count} spaces exceeds the maximum of {MAX_INDENT}"
                )));
            }
            Some(Indent::Literal(literal)) if literal.chars().count() > MAX_INDENT => {
                return Err(ConfigError::InvalidConfig(format!(
                    "Indent string {literal:?} is longer than {MAX_INDENT} characters"
                )));
            }
            _ => {}
        }

        Ok(())
    }
}
