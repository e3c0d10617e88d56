use thiserror::Error;

/// Taxonomie d'erreurs du moteur.
///
/// Les composants (règles, trames, vérification, agrégation) lèvent ;
/// l'orchestrateur est le seul point qui classe, journalise et relance.
#[derive(Error, Debug)]
pub enum SimError {
    /// Entrée malformée (règle ou trame) : la simulation ne démarre pas.
    #[error("validation failed: {message}")]
    Validation { message: String },

    /// Référence absente (scénario, trame, règle) : la simulation ne démarre pas.
    #[error("not found: {what}")]
    NotFound { what: String },

    /// Échec inattendu pendant l'expansion, l'évaluation ou l'agrégation.
    #[error("computation failed: {message}")]
    Computation { message: String },

    /// Échec d'entrée/sortie de la couche de persistance (non réessayé ici).
    #[error("persistence failed: {message}")]
    Persistence { message: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SimError {
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found<S: Into<String>>(what: S) -> Self {
        Self::NotFound { what: what.into() }
    }

    pub fn computation<S: Into<String>>(message: S) -> Self {
        Self::Computation {
            message: message.into(),
        }
    }

    pub fn persistence<S: Into<String>>(message: S) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }
}
