//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(e.into())
    }
}

impl From<DomainError> for CliError {
    fn from(e: DomainError) -> Self {
        CliError::Infra(e.into())
    }
}

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => crate::exitcode::IOERR,
                InfraError::Application(app) => match app {
                    ApplicationError::Domain(DomainError::UnknownVariant { .. }) => {
                        crate::exitcode::USAGE
                    }
                    ApplicationError::Domain(_) => crate::exitcode::DATAERR,
                    ApplicationError::NoExpression | ApplicationError::NoTree => {
                        crate::exitcode::SOFTWARE
                    }
                    ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValidationRule;
    use crate::exitcode;

    #[test]
    fn given_domain_failures_when_mapping_exit_code_then_reports_data_error() {
        let invalid: CliError = DomainError::InvalidExpression {
            rule: ValidationRule::Operators,
        }
        .into();
        let zero: CliError = DomainError::DivisionByZero.into();

        assert_eq!(invalid.exit_code(), exitcode::DATAERR);
        assert_eq!(zero.exit_code(), exitcode::DATAERR);
    }

    #[test]
    fn given_infra_failures_when_mapping_exit_code_then_distinguishes_io_and_config() {
        let io = CliError::Infra(InfraError::io(
            "read input",
            std::io::Error::other("boom"),
        ));
        let config: CliError = ApplicationError::Config {
            message: "bad".into(),
        }
        .into();

        assert_eq!(io.exit_code(), exitcode::IOERR);
        assert_eq!(config.exit_code(), exitcode::CONFIG);
        assert_eq!(CliError::Usage("x".into()).exit_code(), exitcode::USAGE);
    }
}
