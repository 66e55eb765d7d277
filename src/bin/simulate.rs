use chrono::Utc;
use clap::Parser;
use coop_pickup_arbiter::constants::{SAVE_SCOPE, WAIVER_ACTIONS};
use coop_pickup_arbiter::engine::{Arbiter, ArbiterOptions};
use coop_pickup_arbiter::host::{Animation, Host, MemoryHost};
use coop_pickup_arbiter::ledger::FairnessLedger;
use coop_pickup_arbiter::logging::{emit_log, LogLevel};
use coop_pickup_arbiter::participants::safe_players;
use coop_pickup_arbiter::rng::Rng;
use coop_pickup_arbiter::save_data::SaveDataStore;
use coop_pickup_arbiter::types::{
    CategoryLabel, Collider, CollectibleType, CollisionDecision, ItemType, PedestalKind,
    PedestalView, PickingUpItem, PickupIndex, PlayerIndex, PlayerVariant, PlayerView, RoomKind,
    Vec2,
};
use serde::Serialize;
use serde_json::json;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

const FRAMES_PER_ROOM: usize = 12;
const BABY_ATTEMPT_PROBABILITY: f64 = 0.1;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[arg(long)]
    players: Option<i32>,
    #[arg(long)]
    rooms: Option<i32>,
    #[arg(long)]
    waive_rate: Option<f64>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    debug: bool,
    #[arg(long)]
    match_id: Option<String>,
    #[arg(long)]
    summary_out: Option<PathBuf>,
    #[arg(long)]
    state_out: Option<PathBuf>,
}

#[derive(Clone, Debug, Serialize)]
struct Scenario {
    name: String,
    players: usize,
    rooms: usize,
    #[serde(rename = "waiveRate")]
    waive_rate: f64,
    seed: u32,
}

#[derive(Clone, Debug, Default, Serialize)]
struct ScenarioResultLine {
    scenario: String,
    seed: u32,
    players: usize,
    rooms: usize,
    frames: usize,
    allowed: usize,
    blocked: usize,
    acquisitions: usize,
    #[serde(rename = "unmanagedPickups")]
    unmanaged_pickups: usize,
    #[serde(rename = "leftoverPedestals")]
    leftover_pedestals: usize,
    waivers: usize,
    #[serde(rename = "sadAnimations")]
    sad_animations: usize,
    #[serde(rename = "renderedTexts")]
    rendered_texts: usize,
    #[serde(rename = "categorySpread")]
    category_spread: BTreeMap<String, u32>,
    anomalies: Vec<String>,
}

#[derive(Clone, Debug)]
struct ScenarioRunResult {
    result: ScenarioResultLine,
    save_text: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
struct RunSummary {
    #[serde(rename = "matchId")]
    match_id: String,
    #[serde(rename = "startedAtMs")]
    started_at_ms: u64,
    #[serde(rename = "finishedAtMs")]
    finished_at_ms: u64,
    #[serde(rename = "scenarioCount")]
    scenario_count: usize,
    #[serde(rename = "anomalyCount")]
    anomaly_count: usize,
    #[serde(rename = "totalBlocked")]
    total_blocked: usize,
    scenarios: Vec<ScenarioResultLine>,
}

fn main() {
    let cli = Cli::parse();
    let scenarios = resolve_scenarios(&cli);
    let run_started_at_ms = now_ms();
    let seed_hint = scenarios.first().map(|scenario| scenario.seed).unwrap_or(0);
    let match_id = cli
        .match_id
        .clone()
        .unwrap_or_else(|| default_match_id(seed_hint, run_started_at_ms));
    let mut scenario_results = Vec::new();
    let mut last_save_text = None;

    for scenario in scenarios {
        emit_log(
            LogLevel::Info,
            "scenario_started",
            json!({
                "matchId": match_id,
                "scenario": scenario,
            }),
        );
        let scenario_run = run_scenario(&scenario, cli.debug);

        for anomaly in &scenario_run.result.anomalies {
            emit_log(
                LogLevel::Warn,
                "anomaly_detected",
                json!({
                    "matchId": match_id,
                    "scenario": scenario.name,
                    "message": anomaly,
                }),
            );
        }
        emit_log(
            LogLevel::Info,
            "scenario_finished",
            json!({
                "matchId": match_id,
                "scenario": scenario.name,
                "acquisitions": scenario_run.result.acquisitions,
                "blocked": scenario_run.result.blocked,
                "anomalyCount": scenario_run.result.anomalies.len(),
            }),
        );

        match serde_json::to_string(&scenario_run.result) {
            Ok(line) => println!("{line}"),
            Err(error) => emit_log(
                LogLevel::Error,
                "result_serialize_failed",
                json!({ "error": error.to_string() }),
            ),
        }
        if scenario_run.save_text.is_some() {
            last_save_text = scenario_run.save_text;
        }
        scenario_results.push(scenario_run.result);
    }

    let summary = build_run_summary(
        match_id.clone(),
        run_started_at_ms,
        now_ms(),
        scenario_results,
    );

    if let Some(path) = cli.summary_out.as_ref() {
        if let Err(error) = write_summary(path, &summary) {
            emit_log(
                LogLevel::Error,
                "summary_write_failed",
                json!({
                    "matchId": match_id,
                    "path": path.to_string_lossy(),
                    "error": error.to_string(),
                }),
            );
            std::process::exit(2);
        }
    }

    if let (Some(path), Some(text)) = (cli.state_out.as_ref(), last_save_text.as_ref()) {
        if let Err(error) = std::fs::write(path, text) {
            emit_log(
                LogLevel::Error,
                "state_write_failed",
                json!({
                    "matchId": match_id,
                    "path": path.to_string_lossy(),
                    "error": error.to_string(),
                }),
            );
            std::process::exit(2);
        }
    }

    emit_log(
        LogLevel::Info,
        "run_finished",
        json!({
            "matchId": match_id,
            "scenarioCount": summary.scenario_count,
            "anomalyCount": summary.anomaly_count,
            "totalBlocked": summary.total_blocked,
        }),
    );

    if summary.anomaly_count > 0 {
        std::process::exit(1);
    }
}

fn run_scenario(scenario: &Scenario, debug: bool) -> ScenarioRunResult {
    let mut rng = Rng::new(scenario.seed);
    let mut arbiter = Arbiter::new(
        ArbiterOptions {
            debug,
            ..ArbiterOptions::default()
        },
        Rng::new(scenario.seed ^ 0x5bd1_e995),
    );
    let mut host = MemoryHost::new(RoomKind::Default, build_roster(scenario.players));
    let safe_indexes: Vec<PlayerIndex> = safe_players(&host.players)
        .iter()
        .map(|player| player.player_index)
        .collect();

    let mut result = ScenarioResultLine {
        scenario: scenario.name.clone(),
        seed: scenario.seed,
        players: scenario.players,
        rooms: scenario.rooms,
        ..ScenarioResultLine::default()
    };
    let mut next_pickup = 1u64;
    let mut next_collectible = 1u32;

    for _ in 0..scenario.rooms {
        arbiter.on_new_room();
        host.enter_room(RoomKind::ALL[rng.pick_index(RoomKind::ALL.len())]);
        for _ in 0..rng.int(1, 3) {
            host.spawn(random_pedestal(
                &mut rng,
                PickupIndex(next_pickup),
                CollectibleType(next_collectible),
            ));
            next_pickup += 1;
            next_collectible += 1;
        }
        for player in safe_players(&host.players) {
            if rng.bool(scenario.waive_rate) {
                for action in WAIVER_ACTIONS {
                    host.press(player.controller_index, action);
                }
            }
        }

        for _ in 0..FRAMES_PER_ROOM {
            arbiter.post_render(&mut host);
            result.frames += 1;
            result.rendered_texts += host.take_rendered().len();
            for animation in host.take_animations() {
                match animation {
                    Animation::Happy(_) => result.waivers += 1,
                    Animation::Sad(_) => result.sad_animations += 1,
                }
            }
            if host.pedestals.is_empty() {
                break;
            }
            attempt_pickups(&mut arbiter, &mut host, &mut rng, &mut result);
        }
        result.leftover_pedestals += host.pedestals.len();
    }

    if scenario.waive_rate <= 0.0 {
        result.category_spread = category_spread(arbiter.ledger(), &safe_indexes);
        for (category, spread) in &result.category_spread {
            if *spread > 1 {
                result
                    .anomalies
                    .push(format!("category {category} spread {spread} exceeds 1"));
            }
        }
    }

    let store = SaveDataStore::new(SAVE_SCOPE);
    let save_text = match store.save(arbiter.ledger()) {
        Ok(text) => {
            if store.restore(&text).ok().as_ref() != Some(arbiter.ledger()) {
                result
                    .anomalies
                    .push("save/restore round trip changed the ledger".to_string());
            }
            Some(text)
        }
        Err(error) => {
            result.anomalies.push(format!("save failed: {error}"));
            None
        }
    };

    ScenarioRunResult { result, save_text }
}

/// Every entity tries every remaining pedestal once, in a shuffled order.
/// An allowed collision acquires the item on the spot.
fn attempt_pickups(
    arbiter: &mut Arbiter,
    host: &mut MemoryHost,
    rng: &mut Rng,
    result: &mut ScenarioResultLine,
) {
    let mut order = host.players.clone();
    for idx in (1..order.len()).rev() {
        order.swap(idx, rng.pick_index(idx + 1));
    }

    for player in order {
        if player.variant == PlayerVariant::CoopBaby && !rng.bool(BABY_ATTEMPT_PROBABILITY) {
            continue;
        }
        let collider = Collider::Player(player.clone());
        for pedestal in host.collectibles() {
            match arbiter.pre_pickup_collision(host, &pedestal, &collider) {
                CollisionDecision::Block => result.blocked += 1,
                CollisionDecision::Allow => {
                    result.allowed += 1;
                    host.remove_pedestal(pedestal.pickup_index);
                    if player.variant == PlayerVariant::CoopBaby {
                        result.unmanaged_pickups += 1;
                    } else {
                        result.acquisitions += 1;
                    }
                    arbiter.pre_item_pickup(
                        &player,
                        PickingUpItem {
                            item_type: pedestal.item_type,
                            sub_type: pedestal.collectible,
                        },
                    );
                    break;
                }
            }
        }
    }
}

fn build_roster(players: usize) -> Vec<PlayerView> {
    let mut roster: Vec<PlayerView> = (0..players)
        .map(|idx| PlayerView {
            entity_index: idx as i32,
            player_index: PlayerIndex(1_000 + idx as u64 * 7),
            controller_index: idx as u32,
            variant: PlayerVariant::Player,
            dead: false,
            main_twin_index: idx as i32,
            baby_skin: None,
            coop_ghost: false,
            extra_animation_finished: true,
            position: Vec2::new(120.0 + idx as f32 * 48.0, 280.0),
        })
        .collect();
    let baby_index = players as i32;
    roster.push(PlayerView {
        entity_index: baby_index,
        player_index: PlayerIndex(9_000),
        controller_index: baby_index as u32,
        variant: PlayerVariant::CoopBaby,
        dead: false,
        main_twin_index: baby_index,
        baby_skin: Some(1),
        coop_ghost: false,
        extra_animation_finished: true,
        position: Vec2::new(60.0, 280.0),
    });
    roster
}

fn random_pedestal(
    rng: &mut Rng,
    pickup_index: PickupIndex,
    collectible: CollectibleType,
) -> PedestalView {
    let pedestal_kind = if rng.bool(0.7) {
        PedestalKind::Default
    } else {
        PedestalKind::ALL[rng.pick_index(PedestalKind::ALL.len())]
    };
    let roll = rng.next_f64();
    let item_type = if roll < 0.75 {
        ItemType::Passive
    } else if roll < 0.85 {
        ItemType::Familiar
    } else if roll < 0.95 {
        ItemType::Active
    } else {
        ItemType::Trinket
    };
    let price = if rng.bool(0.1) {
        -1
    } else if rng.bool(0.2) {
        15
    } else {
        0
    };
    PedestalView {
        pickup_index,
        collectible,
        item_type,
        pedestal_kind,
        price,
        blind: rng.bool(0.1),
        position: Vec2::new(rng.int(60, 420) as f32, rng.int(60, 260) as f32),
    }
}

/// Max minus min count per category across the given players.
fn category_spread(ledger: &FairnessLedger, players: &[PlayerIndex]) -> BTreeMap<String, u32> {
    let categories: BTreeSet<&CategoryLabel> = ledger
        .counts()
        .values()
        .flat_map(|counts| counts.keys())
        .collect();

    categories
        .into_iter()
        .map(|category| {
            let counts: Vec<u32> = players
                .iter()
                .map(|player| {
                    ledger
                        .counts()
                        .get(player)
                        .and_then(|counts| counts.get(category))
                        .copied()
                        .unwrap_or(0)
                })
                .collect();
            let max = counts.iter().copied().max().unwrap_or(0);
            let min = counts.iter().copied().min().unwrap_or(0);
            (category.to_string(), max - min)
        })
        .collect()
}

fn resolve_scenarios(cli: &Cli) -> Vec<Scenario> {
    let seed = normalize_seed(cli.seed.unwrap_or_else(|| rand::random::<u32>() as u64));

    if cli.players.is_some() || cli.rooms.is_some() || cli.waive_rate.is_some() {
        let players = cli.players.unwrap_or(2).clamp(1, 8) as usize;
        return vec![Scenario {
            name: format!("custom-p{players}"),
            players,
            rooms: cli.rooms.unwrap_or(30).clamp(1, 500) as usize,
            waive_rate: cli.waive_rate.unwrap_or(0.0).clamp(0.0, 1.0),
            seed,
        }];
    }

    vec![
        Scenario {
            name: "duo-strict".to_string(),
            players: 2,
            rooms: 40,
            waive_rate: 0.0,
            seed,
        },
        Scenario {
            name: "quad-strict".to_string(),
            players: 4,
            rooms: 60,
            waive_rate: 0.0,
            seed: normalize_seed(seed as u64 + 1),
        },
        Scenario {
            name: "trio-generous".to_string(),
            players: 3,
            rooms: 40,
            waive_rate: 0.3,
            seed: normalize_seed(seed as u64 + 2),
        },
    ]
}

fn normalize_seed(seed: u64) -> u32 {
    seed as u32
}

fn default_match_id(seed: u32, timestamp_ms: u64) -> String {
    format!("sim-{seed}-{timestamp_ms}")
}

fn build_run_summary(
    match_id: String,
    started_at_ms: u64,
    finished_at_ms: u64,
    scenarios: Vec<ScenarioResultLine>,
) -> RunSummary {
    RunSummary {
        match_id,
        started_at_ms,
        finished_at_ms,
        scenario_count: scenarios.len(),
        anomaly_count: scenarios.iter().map(|result| result.anomalies.len()).sum(),
        total_blocked: scenarios.iter().map(|result| result.blocked).sum(),
        scenarios,
    }
}

fn now_ms() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}

fn write_summary(path: &Path, summary: &RunSummary) -> io::Result<()> {
    let summary_text = serde_json::to_string_pretty(summary).map_err(io::Error::other)?;
    std::fs::write(path, summary_text)
}
