//! Unified error type for the point-of-sale backend.
//!
//! Validation and lookup failures carry the user-facing message that the
//! client shows in its alert box, so their `Display` text is in Spanish.
//! Infrastructure failures keep the underlying error text.

use thiserror::Error;

/// All errors produced by the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or unreadable configuration (catalog TOML, environment).
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what is wrong with the configuration
        message: String,
    },

    /// Any failure reported by the relational store.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O failure, e.g. binding the listener or reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Required environment variable missing or not unicode.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// The request body could not be decoded.
    #[error("Solicitud inválida: {message}")]
    InvalidPayload {
        /// Decoder message
        message: String,
    },

    /// A sale arrived without a team.
    #[error("Debes seleccionar un equipo")]
    MissingTeam,

    /// A sale named a team that is not configured.
    #[error("Equipo desconocido: {team}")]
    UnknownTeam {
        /// The team key as received
        team: String,
    },

    /// A sale with no positive quantity.
    #[error("Debes vender al menos un plato")]
    EmptySale,

    /// A negative quantity was requested for a dish.
    #[error("Cantidad inválida para el plato {dish_id}: {quantity}")]
    InvalidQuantity {
        /// Dish key as received
        dish_id: String,
        /// The offending quantity
        quantity: i64,
    },

    /// The dish id does not exist or is not a number.
    #[error("Plato no encontrado")]
    DishNotFound {
        /// Dish id as received
        id: String,
    },

    /// Selling the requested quantity would exceed the dish stock.
    #[error("No hay suficiente stock de {dish}")]
    InsufficientStock {
        /// Name of the dish
        dish: String,
        /// Units still available when the check failed
        available: i32,
        /// Units requested
        requested: i32,
    },

    /// Admin correction below zero.
    #[error("La cantidad vendida no puede ser negativa")]
    NegativeUnitsSold {
        /// The rejected value
        value: i64,
    },

    /// Admin correction above the dish stock.
    #[error("La cantidad vendida no puede exceder el stock de {stock}")]
    UnitsSoldExceedStock {
        /// The rejected value
        value: i64,
        /// Stock of the dish
        stock: i32,
    },
}

impl Error {
    /// Whether the error was caused by the request rather than the server.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(
            self,
            Self::Config { .. } | Self::Database(_) | Self::Io(_) | Self::EnvVar(_)
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
