use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use poke_calc::kill::{compile_turns, kill_chance, turns_identical};
use poke_calc::{ConvolutionMethod, DamageCalc, KillOptions};
use tracing::info;

use crate::models::{Fight, KillReport, Scenario, TurnReport};
use crate::utils::{get_timestamps, save_report};

#[derive(Args, Debug)]
pub struct KillArgs {
    /// Scenario JSON file
    pub scenario: PathBuf,

    /// How roll combinations are counted
    #[arg(long, default_value_t = ConvolutionMethod::Recursive)]
    pub method: ConvolutionMethod,

    /// Treat every turn as identical (overrides the scenario)
    #[arg(long)]
    pub repeat: bool,

    /// Print the report as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Save the report to .calc_runs/
    #[arg(long)]
    pub save: bool,
}

pub fn execute(args: KillArgs) -> Result<()> {
    let fight = Scenario::load(&args.scenario)?.resolve()?;
    if fight.turns.is_empty() {
        bail!("scenario {} has no turns", args.scenario.display());
    }

    let options = KillOptions {
        repeat: args.repeat || fight.repeat,
        method: args.method,
    };

    let report = build_report(&fight, options, &args.scenario.display().to_string())?;
    info!(
        turns = report.turns.len(),
        percent = report.kill_percent,
        repeat = report.repeat_applied,
        "kill calculation complete"
    );

    let json = serde_json::to_string_pretty(&report)?;
    if args.json {
        println!("{}", json);
    } else {
        print_report(&report);
    }

    if args.save {
        let path = save_report(&report.timestamp, &json)?;
        if !args.json {
            println!("Report saved to {}", path.display());
        }
    }

    Ok(())
}

fn build_report(fight: &Fight, options: KillOptions, scenario: &str) -> Result<KillReport> {
    let inputs = fight.inputs();
    let records = compile_turns(&fight.attacker, &fight.defender, &inputs);

    let hp = fight.defender.stats.hp as u32;
    let chance = kill_chance(&records, hp, options).context("kill calculation failed")?;

    let turns = inputs
        .iter()
        .zip(&records)
        .map(|(&(move_data, att_mod, def_mod), record)| {
            let calc = DamageCalc::new(move_data, &fight.attacker, &fight.defender)
                .with_mods(att_mod, def_mod);
            TurnReport {
                move_name: move_data.name.clone(),
                attacker_mod: att_mod.to_string(),
                defender_mod: def_mod.to_string(),
                damage: format!("{}-{}", calc.min_damage(false), calc.max_damage(false)),
                crit_damage: format!("{}-{}", calc.min_damage(true), calc.max_damage(true)),
                crit_rate: record.crit_rate,
            }
        })
        .collect();

    let (timestamp, timestamp_human) = get_timestamps()?;
    Ok(KillReport {
        timestamp,
        timestamp_human,
        scenario: scenario.to_string(),
        defender_hp: hp,
        repeat_requested: options.repeat,
        repeat_applied: options.repeat && turns_identical(&records),
        method: options.method.to_string(),
        turns,
        kill_percent: chance.percent(),
        numerator: chance.numerator.to_string(),
        denominator: chance.denominator.to_string(),
    })
}

fn print_report(report: &KillReport) {
    println!("Defender HP: {}", report.defender_hp);
    for (i, turn) in report.turns.iter().enumerate() {
        println!(
            "  Turn {}: {} {}\t(crit: {}, {}/256)\t{} vs {}",
            i + 1,
            turn.move_name,
            turn.damage,
            turn.crit_damage,
            turn.crit_rate,
            turn.attacker_mod,
            turn.defender_mod
        );
    }
    println!(
        "Kill%: {:.4}% ({} method{})",
        report.kill_percent,
        report.method,
        match (report.repeat_requested, report.repeat_applied) {
            (_, true) => ", repeat",
            (true, false) => ", repeat ignored for differing turns",
            (false, false) => "",
        }
    );
}
