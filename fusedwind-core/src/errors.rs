use thiserror::Error;

/// Error type for declaration and contract violations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContractError {
    #[error("Variables of the class {derived} are different from base {base}. The missing variable(s) of {derived} are: {}", .missing.join(", "))]
    MissingVariables {
        derived: String,
        base: String,
        missing: Vec<String>,
    },
    #[error("Inputs of the class {derived} are different from base {base}. The missing input(s) of {derived} are: {}", .missing.join(", "))]
    MissingInputs {
        derived: String,
        base: String,
        missing: Vec<String>,
    },
    #[error("Outputs of the class {derived} are different from base {base}. The missing output(s) of {derived} are: {}", .missing.join(", "))]
    MissingOutputs {
        derived: String,
        base: String,
        missing: Vec<String>,
    },
    #[error("Field '{field}' of the class {derived} is declared as {found}, but base {base} declares it as {expected}")]
    KindMismatch {
        derived: String,
        base: String,
        field: String,
        expected: String,
        found: String,
    },
    #[error("Invalid declaration of {type_name}: {details}")]
    InvalidDeclaration { type_name: String, details: String },
    #[error("Slot '{slot}' requires {interface}, which {candidate} does not provide")]
    SlotMismatch {
        slot: String,
        interface: String,
        candidate: String,
    },
    #[error("Field '{0}' is not an interface slot")]
    NotASlot(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Convenience type for `Result<T, ContractError>`.
pub type ContractResult<T> = Result<T, ContractError>;
