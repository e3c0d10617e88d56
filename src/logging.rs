//! Initialisation de la journalisation (`tracing`).

use tracing_subscriber::{fmt, EnvFilter};

/// Initialise le souscripteur global.
///
/// Niveau configurable via `RUST_LOG` (défaut : `info`). À appeler depuis un
/// binaire ; la bibliothèque émet mais n'installe jamais de souscripteur.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(true).init();
}

/// Variante pour les tests : niveau `debug`, sortie capturée, initialisation
/// tolérante aux appels répétés.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
