#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use simulateur::{
    logging,
    simulation::{ChannelProgress, SimulationOptions, SimulationParams, Simulator, Strategy},
    storage::{JsonStorage, Storage},
    template,
};
use std::sync::Arc;

/// CLI du moteur de simulation de planning (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (niveau via RUST_LOG)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du lot (scénarios, trames, règles, effectif)
    #[arg(long, global = true, default_value = "bundle.json")]
    bundle: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Valider les trames et règles du lot
    Validate,

    /// Développer une trame sur une plage de dates
    Expand {
        #[arg(long)]
        trame: String,
        /// AAAA-MM-JJ
        #[arg(long)]
        start: NaiveDate,
        /// AAAA-MM-JJ
        #[arg(long)]
        end: NaiveDate,
        /// Export JSON des affectations (optionnel)
        #[arg(long)]
        out_json: Option<String>,
    },

    /// Lancer une simulation sur un scénario du lot
    Simulate {
        #[arg(long)]
        scenario: String,
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        /// standard | incremental | cached | parallel | hybrid
        #[arg(long, default_value = "standard")]
        strategy: String,
        /// Taille des lots (jours) en parallèle/hybride
        #[arg(long, default_value_t = 7)]
        batch_size: u32,
        #[arg(long)]
        no_cache: bool,
        /// Affiche les événements de progression sur stderr
        #[arg(long)]
        progress: bool,
    },

    /// Stratégie conseillée pour une plage de dates
    Strategy {
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.log {
        logging::init();
    }
    let storage = JsonStorage::open(&cli.bundle)?;

    match cli.cmd {
        Commands::Validate => {
            let bundle = storage.load()?;
            for trame in &bundle.trames {
                trame
                    .validate()
                    .with_context(|| format!("trame {}", trame.id))?;
            }
            for rule in &bundle.rules {
                rule.validate().with_context(|| format!("règle {}", rule.id))?;
            }
            println!(
                "{} trame(s) et {} règle(s) valides",
                bundle.trames.len(),
                bundle.rules.len()
            );
        }

        Commands::Expand {
            trame,
            start,
            end,
            out_json,
        } => {
            let bundle = storage.load()?;
            let Some(trame) = bundle.trames.iter().find(|t| t.id == trame) else {
                bail!("trame inconnue: {trame}");
            };
            trame.validate()?;
            let assignments = template::expand(trame, start, end)?;
            println!(
                "{} affectation(s) développée(s) du {start} au {end}",
                assignments.len()
            );
            if let Some(path) = out_json {
                let json = serde_json::to_string_pretty(&assignments)?;
                std::fs::write(&path, json).with_context(|| format!("writing {path}"))?;
            }
        }

        Commands::Simulate {
            scenario,
            start,
            end,
            strategy,
            batch_size,
            no_cache,
            progress,
        } => {
            let bundle = storage.load()?;
            let store = Arc::new(bundle.into_store().await);
            let strategy: Strategy = strategy.parse().map_err(anyhow::Error::msg)?;

            let mut params = SimulationParams::new(scenario, start, end);
            params.options = SimulationOptions {
                strategy,
                use_cache: !no_cache,
                batch_size,
                notify_progress: progress,
            };

            let mut simulator = Simulator::new(store);
            if progress {
                let (publisher, mut rx) = ChannelProgress::new();
                simulator = simulator.with_progress(Arc::new(publisher));
                tokio::spawn(async move {
                    while let Some(event) = rx.recv().await {
                        eprintln!(
                            "[{}] {} ({} %)",
                            event.kind.as_str(),
                            event.message,
                            event.progress
                        );
                    }
                });
            }

            let result = simulator.run(params).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Strategy { start, end } => {
            let days = (end - start).num_days() + 1;
            println!("{}", Strategy::recommended_for_days(days).as_str());
        }
    }

    Ok(())
}
