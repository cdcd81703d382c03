use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use poke_calc::{DamageCalc, StatModifier};
use tracing::info;

use crate::models::Scenario;

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Scenario JSON file
    pub scenario: PathBuf,

    /// Attacker stages as att/def/spd/spc
    #[arg(long, default_value = "0/0/0/0", allow_hyphen_values = true)]
    pub attacker_stages: String,

    /// Attacker badge boosts as att/def/spd/spc
    #[arg(long, default_value = "0/0/0/0")]
    pub attacker_bbs: String,

    /// Defender stages as att/def/spd/spc
    #[arg(long, default_value = "0/0/0/0", allow_hyphen_values = true)]
    pub defender_stages: String,

    /// Defender badge boosts as att/def/spd/spc
    #[arg(long, default_value = "0/0/0/0")]
    pub defender_bbs: String,
}

pub fn execute(args: SummaryArgs) -> Result<()> {
    let fight = Scenario::load(&args.scenario)?.resolve()?;
    let att_mod = StatModifier::parse(&args.attacker_stages, &args.attacker_bbs)
        .context("invalid attacker modifier")?;
    let def_mod = StatModifier::parse(&args.defender_stages, &args.defender_bbs)
        .context("invalid defender modifier")?;

    info!(
        scenario = %args.scenario.display(),
        moves = fight.moves.len(),
        "summarizing"
    );

    println!(
        "Attacker L{} {} {}",
        fight.attacker.level,
        att_mod.stats_line(&fight.attacker),
        att_mod
    );
    println!(
        "Defender L{} {} {}",
        fight.defender.level,
        def_mod.stats_line(&fight.defender),
        def_mod
    );

    for move_data in &fight.moves {
        let calc = DamageCalc::new(move_data, &fight.attacker, &fight.defender)
            .with_mods(&att_mod, &def_mod);
        let lines = calc
            .summary()
            .with_context(|| format!("failed to summarize {}", move_data.name))?;
        for line in lines {
            println!("{}", line);
        }
    }

    Ok(())
}
