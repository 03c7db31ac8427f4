//! User-facing messages for pagination errors.
//!
//! The engine only produces [`ErrorKind`]s. A [`Localizer`] turns them into
//! text at the API boundary. [`Locale`] is the built-in English/French one;
//! hosts with their own catalogue put an `Arc<dyn Localizer>` in the schema
//! data instead.

use serde::Deserialize;

use crate::error::ErrorKind;

/// Renders an [`ErrorKind`] for the requester.
pub trait Localizer: Send + Sync {
    fn localize(&self, kind: &ErrorKind) -> String;
}

/// Built-in message catalogues
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
}

impl Locale {
    /// First supported language in an `Accept-Language` header.
    pub fn from_accept_language(header: &str) -> Option<Self> {
        header
            .split(',')
            .filter_map(|part| part.split(';').next())
            .map(|tag| tag.trim().to_ascii_lowercase())
            .find_map(|tag| match tag.split('-').next() {
                Some("en") => Some(Locale::En),
                Some("fr") => Some(Locale::Fr),
                _ => None,
            })
    }
}

impl Localizer for Locale {
    fn localize(&self, kind: &ErrorKind) -> String {
        match self {
            Locale::En => english(kind),
            Locale::Fr => french(kind),
        }
    }
}

fn english(kind: &ErrorKind) -> String {
    match kind {
        ErrorKind::MissingBound { connection } => format!(
            "You must provide a `first` or `last` value to properly paginate the `{connection}` connection."
        ),
        ErrorKind::BothBoundsSet { connection } => format!(
            "Passing both `first` and `last` to paginate the `{connection}` connection is not supported."
        ),
        ErrorKind::NegativeBound {
            argument,
            connection,
        } => format!("`{argument}` on the `{connection}` connection cannot be less than zero."),
        ErrorKind::BoundExceedsMax {
            argument,
            connection,
            requested,
            max,
        } => format!(
            "Requesting `{requested}` records on the `{connection}` connection exceeds the `{argument}` limit of {max} records."
        ),
        ErrorKind::NonIntegerBound { argument, found } => {
            format!("`{argument}` must be a whole number, not `{found}`.")
        }
        ErrorKind::UnableToPaginate { connection } => {
            format!("Unable to paginate the `{connection}` connection. Please check your cursor.")
        }
        ErrorKind::UnableToLoad { connection } => {
            format!("Unable to load `{connection}` records. Please try again.")
        }
    }
}

fn french(kind: &ErrorKind) -> String {
    match kind {
        ErrorKind::MissingBound { connection } => format!(
            "Vous devez fournir une valeur `first` ou `last` pour paginer correctement la connexion `{connection}`."
        ),
        ErrorKind::BothBoundsSet { connection } => format!(
            "Passer à la fois `first` et `last` pour paginer la connexion `{connection}` n'est pas supporté."
        ),
        ErrorKind::NegativeBound {
            argument,
            connection,
        } => format!("`{argument}` sur la connexion `{connection}` ne peut être inférieur à zéro."),
        ErrorKind::BoundExceedsMax {
            argument,
            connection,
            requested,
            max,
        } => format!(
            "La demande de `{requested}` enregistrements sur la connexion `{connection}` dépasse la limite `{argument}` de {max} enregistrements."
        ),
        ErrorKind::NonIntegerBound { argument, found } => {
            format!("`{argument}` doit être un nombre entier, et non `{found}`.")
        }
        ErrorKind::UnableToPaginate { connection } => format!(
            "Impossible de paginer la connexion `{connection}`. Veuillez vérifier votre curseur."
        ),
        ErrorKind::UnableToLoad { connection } => {
            format!("Impossible de charger les enregistrements `{connection}`. Veuillez réessayer.")
        }
    }
}
